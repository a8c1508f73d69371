//! Actions reported by the expo in response to keys.

use crate::types::Id;

/// Something the user did which the embedder should act on.
///
/// At most one action is pending at a time; see
/// [`Expo::action_get`](crate::Expo::action_get).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpoAction {
    /// Object was highlighted (popup mode).
    PointObj(Id),
    /// Menu item was highlighted.
    PointItem(Id),
    /// Menu item was selected.
    Select(Id),
    /// Menu was opened so an item can be chosen.
    Open(Id),
    /// Menu was closed.
    Close(Id),
    /// Request to exit the menu.
    Quit,
}

impl ExpoAction {
    /// Id of the object or item affected, if any.
    pub fn id(&self) -> Option<Id> {
        match *self {
            Self::PointObj(id)
            | Self::PointItem(id)
            | Self::Select(id)
            | Self::Open(id)
            | Self::Close(id) => Some(id),
            Self::Quit => None,
        }
    }
}
