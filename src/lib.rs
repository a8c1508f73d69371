//! # expo
//!
//! Boot-menu presentation engine: scenes of text, images and menus, driven
//! by the keyboard and drawn on a simple graphical console or as plain text.
//!
//! ## Architecture
//!
//! An [`Expo`] owns a list of scenes plus the state they share: the string
//! table, the theme, the id allocator and the display. Objects refer to each
//! other by numeric id rather than by pointer, so a menu item is just the ids
//! of its key, label and description text objects.
//!
//! Each key goes through a fixed pipeline:
//! ```text
//! KeyInput → Expo::send_key → Scene router → Menu router → ExpoAction
//! ```
//! The embedder reads the action with [`Expo::action_get`] (or gets it from
//! [`Expo::poll`]), decides what it means and calls [`Expo::render`] again.
//!
//! ## Modules
//!
//! - [`types`] - Ids, geometry, flags and keys
//! - [`expo`] - The container: ids, strings, theme, actions
//! - [`scene`] - Scenes, objects, menus, layout and rendering
//! - [`display`] - Display and key-input backends (canvas, terminal)
//! - [`builder`] - Building an expo from a TOML description
//! - [`error`] - The error type

pub mod builder;
pub mod display;
pub mod error;
pub mod expo;
pub mod scene;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use builder::{build_from_file, build_from_toml};
pub use display::{Canvas, Display, KeyInput, KeyQueue, Terminal, TerminalKeys};
pub use error::{ExpoError, Result};
pub use expo::{Expo, ExpoAction, StringTable, Theme};
pub use scene::{
    Menu, MenuBboxes, MenuItem, MenuItemProps, ObjKind, ObjType, Scene, SceneMut, SceneObj,
    TextObj, VALUE_UNSET,
};
