//! Error type shared by every expo operation.

use std::io;

use thiserror::Error;

use crate::types::Id;

#[derive(Debug, Error)]
pub enum ExpoError {
    /// Id does not resolve to an object, item, scene or string of the
    /// expected kind.
    #[error("id {0} not found")]
    NotFound(Id),

    /// A required cross-reference does not exist.
    #[error("invalid reference to id {0}")]
    InvalidArgument(Id),

    #[error("out of memory")]
    OutOfMemory,

    /// Every id up to the top of the id space has been handed out.
    #[error("no ids left")]
    IdsExhausted,

    /// Operation has no effect in the current state, e.g. a key sent to a
    /// menu with no items.
    #[error("not applicable in current state")]
    NotApplicable,

    /// Operation is not available here. Also returned by the text-mode menu
    /// dump after a complete dump.
    #[error("not supported")]
    NotSupported,

    #[error("no scene selected")]
    NoScene,

    #[error("malformed description: {0}")]
    Format(String),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ExpoError>;
