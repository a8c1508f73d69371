//! String table - maps string ids to displayed text.

use crate::error::{ExpoError, Result};
use crate::types::Id;

#[derive(Debug, Clone)]
struct ExpoString {
    id: Id,
    name: String,
    text: String,
}

/// Strings owned by an expo, looked up by id.
#[derive(Debug, Default, Clone)]
pub struct StringTable {
    strings: Vec<ExpoString>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string with an already-resolved id.
    ///
    /// A later string with the same id shadows nothing: lookups return the
    /// first one added. Nothing is added if memory runs out.
    pub(crate) fn insert(&mut self, id: Id, name: &str, text: &str) -> Result<()> {
        let mut owned_name = String::new();
        let mut owned_text = String::new();
        owned_name
            .try_reserve_exact(name.len())
            .map_err(|_| ExpoError::OutOfMemory)?;
        owned_text
            .try_reserve_exact(text.len())
            .map_err(|_| ExpoError::OutOfMemory)?;
        self.strings
            .try_reserve(1)
            .map_err(|_| ExpoError::OutOfMemory)?;

        owned_name.push_str(name);
        owned_text.push_str(text);
        self.strings.push(ExpoString {
            id,
            name: owned_name,
            text: owned_text,
        });
        Ok(())
    }

    /// Drop the most recently added string.
    pub(crate) fn remove_last(&mut self) {
        self.strings.pop();
    }

    /// Text of a string, or None if there is no string with that id.
    pub fn get(&self, id: Id) -> Option<&str> {
        self.strings
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.text.as_str())
    }

    /// Writable access to a string.
    pub fn get_mut(&mut self, id: Id) -> Result<&mut String> {
        self.strings
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| &mut s.text)
            .ok_or(ExpoError::NotFound(id))
    }

    /// Id of the first string with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<Id> {
        self.strings.iter().find(|s| s.name == name).map(|s| s.id)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
