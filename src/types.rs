//! Core types for expo.
//!
//! Identifiers, geometry, flag sets and key codes shared by every layer:
//! the expo container, scenes, menus and the display backends.

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a string, scene, object or menu item.
///
/// All kinds share one id space per [`Expo`](crate::Expo). Constructors take
/// `0` to mean "allocate the next free id".
pub type Id = u32;

/// User asked for the expo data to be saved.
pub const EXPOID_SAVE: Id = 1;

/// User asked for the expo data to be discarded.
pub const EXPOID_DISCARD: Id = 2;

/// First id handed out by automatic allocation.
pub const EXPOID_BASE_ID: Id = 5;

/// Width/height placeholder meaning "extend to the edge of the display".
pub const SCENEOB_DISPLAY_MAX: i32 = 0x7f00_0000;

/// Display size assumed when no display is attached.
pub const DEFAULT_DISPLAY_WIDTH: i32 = 1280;
pub const DEFAULT_DISPLAY_HEIGHT: i32 = 1024;

// =============================================================================
// Geometry
// =============================================================================

/// Bounding box of an object, in pixels.
///
/// `x1`/`y1` are exclusive: width is `x1 - x0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bbox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Bbox {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Grow `acc` to include this box widened by `inset` on each side.
    ///
    /// An empty accumulator (`None`) takes the inset box as-is. The inset is
    /// horizontal only.
    pub fn union_into(&self, inset: i32, acc: &mut Option<Bbox>) {
        let widened = Bbox::new(self.x0 - inset, self.y0, self.x1 + inset, self.y1);
        *acc = Some(match acc.take() {
            Some(cur) => cur.join(&widened),
            None => widened,
        });
    }

    /// Smallest box containing both.
    pub fn join(&self, other: &Bbox) -> Bbox {
        Bbox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// Size of the content of an object (text as rendered, image size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dims {
    pub x: i32,
    pub y: i32,
}

impl Dims {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Offset from the top-left of the bbox at which content is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub xofs: i32,
    pub yofs: i32,
}

/// Alignment of content within its bounding box.
///
/// Vertical alignment reuses the same values: `Left` is top, `Right` is
/// bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Centre,
}

impl Align {
    pub const TOP: Align = Align::Left;
    pub const BOTTOM: Align = Align::Right;

    /// Offset of content `size` wide inside a span `span` wide.
    pub fn offset(self, span: i32, size: i32) -> i32 {
        match self {
            Align::Left => 0,
            Align::Right => span - size,
            Align::Centre => (span - size) / 2,
        }
    }
}

// =============================================================================
// Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Per-object state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ObjFlags: u8 {
        /// Object is not drawn.
        const HIDE = 1 << 0;
        /// Object is drawn highlighted.
        const POINT = 1 << 1;
        /// Menu is opened so an option can be chosen.
        const OPEN = 1 << 2;
        /// Width/height are valid; moving keeps them.
        const SIZE_VALID = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Per-item flags for menu items.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MenuItemFlags: u8 {
        /// Leave a one-row gap before this item.
        const GAP_BEFORE = 1 << 0;
    }
}

// =============================================================================
// Colours
// =============================================================================

/// Palette entries understood by every display backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Black,
    White,
}

// =============================================================================
// Keys
// =============================================================================

/// A key delivered to the expo.
///
/// Navigation keys are named; everything else is passed through as the
/// character typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Select,
    Quit,
    Save,
    Plus,
    Minus,
    Space,
    Char(char),
}

impl Key {
    /// Convert a raw console character to a key.
    ///
    /// CR/LF select, Ctrl-C and ESC quit, Ctrl-P/Ctrl-N move up/down and
    /// Ctrl-S saves.
    pub fn from_ascii(ch: char) -> Key {
        match ch {
            '\r' | '\n' => Key::Select,
            '\x03' | '\x1b' => Key::Quit,
            '\x10' => Key::Up,
            '\x0e' => Key::Down,
            '\x13' => Key::Save,
            '+' => Key::Plus,
            '-' => Key::Minus,
            ' ' => Key::Space,
            other => Key::Char(other),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_union_applies_inset_horizontally() {
        let mut acc = None;
        Bbox::new(10, 10, 20, 30).union_into(4, &mut acc);
        assert_eq!(acc, Some(Bbox::new(6, 10, 24, 30)));

        Bbox::new(0, 40, 5, 50).union_into(0, &mut acc);
        assert_eq!(acc, Some(Bbox::new(0, 10, 24, 50)));
    }

    #[test]
    fn test_align_offset() {
        assert_eq!(Align::Left.offset(100, 40), 0);
        assert_eq!(Align::Right.offset(100, 40), 60);
        assert_eq!(Align::Centre.offset(100, 40), 30);
        assert_eq!(Align::BOTTOM, Align::Right);
    }

    #[test]
    fn test_key_from_ascii() {
        assert_eq!(Key::from_ascii('\r'), Key::Select);
        assert_eq!(Key::from_ascii('\x1b'), Key::Quit);
        assert_eq!(Key::from_ascii('\x0e'), Key::Down);
        assert_eq!(Key::from_ascii('7'), Key::Char('7'));
        assert_eq!(Key::from_ascii('\x10'), Key::Up);
    }
}
