//! Display and input backends.
//!
//! The expo never touches pixels itself. It hands positions and resolved
//! content to a [`Display`] and reads keys from a [`KeyInput`].
//!
//! - [`Canvas`] - In-memory cell grid, used headless and by tests
//! - [`Terminal`] - crossterm backend drawing a canvas to the terminal
//!
//! # Example
//!
//! ```ignore
//! use expo::display::{Canvas, KeyQueue};
//! use expo::{Expo, Key};
//!
//! let mut exp = Expo::new("menu");
//! exp.set_display(Box::new(Canvas::new(80, 25)));
//! let mut keys = KeyQueue::from_keys([Key::Down, Key::Select]);
//! while let Some(action) = exp.poll(&mut keys)? {
//!     println!("{action:?}");
//! }
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use unicode_width::UnicodeWidthStr;

use crate::types::{Bbox, Colour, Dims, Key};

pub mod canvas;
pub mod terminal;

pub use canvas::Canvas;
pub use terminal::{Terminal, TerminalKeys};

/// Width of one character cell in pixels.
pub const CELL_WIDTH: i32 = 8;

/// Height of one character cell in pixels.
pub const CELL_HEIGHT: i32 = 16;

// =============================================================================
// Display backend
// =============================================================================

/// A graphical console the expo can draw on.
pub trait Display {
    /// Size of the display in pixels.
    fn size(&self) -> Dims;

    /// Size of `text` as it would be drawn with the given font.
    ///
    /// `font_size` of 0 selects the default font.
    fn measure(&self, font_name: Option<&str>, font_size: u32, text: &str) -> Dims;

    /// Fill the whole display.
    fn fill(&mut self, colour: Colour) -> io::Result<()>;

    /// Fill part of the display.
    fn fill_part(&mut self, bbox: Bbox, colour: Colour) -> io::Result<()>;

    /// Draw a string with its top-left corner at (x, y).
    fn put_text(&mut self, x: i32, y: i32, text: &str, highlight: bool) -> io::Result<()>;

    /// Draw a BMP image with its top-left corner at (x, y).
    fn put_image(&mut self, x: i32, y: i32, data: &[u8]) -> io::Result<()>;

    /// Draw the outline of a box, `width` pixels thick.
    fn draw_box(&mut self, bbox: Bbox, width: u32, colour: Colour) -> io::Result<()>;

    /// Flush pending drawing to the device.
    fn sync(&mut self) -> io::Result<()>;

    fn white_on_black(&self) -> bool;

    fn set_white_on_black(&mut self, white_on_black: bool);

    /// Background colour for the current scheme.
    fn background(&self) -> Colour {
        if self.white_on_black() {
            Colour::Black
        } else {
            Colour::White
        }
    }
}

/// A shared display, so the embedder can keep a handle on a display owned by
/// the expo.
impl<D: Display> Display for Rc<RefCell<D>> {
    fn size(&self) -> Dims {
        self.borrow().size()
    }

    fn measure(&self, font_name: Option<&str>, font_size: u32, text: &str) -> Dims {
        self.borrow().measure(font_name, font_size, text)
    }

    fn fill(&mut self, colour: Colour) -> io::Result<()> {
        self.borrow_mut().fill(colour)
    }

    fn fill_part(&mut self, bbox: Bbox, colour: Colour) -> io::Result<()> {
        self.borrow_mut().fill_part(bbox, colour)
    }

    fn put_text(&mut self, x: i32, y: i32, text: &str, highlight: bool) -> io::Result<()> {
        self.borrow_mut().put_text(x, y, text, highlight)
    }

    fn put_image(&mut self, x: i32, y: i32, data: &[u8]) -> io::Result<()> {
        self.borrow_mut().put_image(x, y, data)
    }

    fn draw_box(&mut self, bbox: Bbox, width: u32, colour: Colour) -> io::Result<()> {
        self.borrow_mut().draw_box(bbox, width, colour)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.borrow_mut().sync()
    }

    fn white_on_black(&self) -> bool {
        self.borrow().white_on_black()
    }

    fn set_white_on_black(&mut self, white_on_black: bool) {
        self.borrow_mut().set_white_on_black(white_on_black);
    }
}

/// Size of `text` when no display is attached: one 8x16 cell per column.
pub fn fallback_text_dims(text: &str) -> Dims {
    Dims::new(CELL_WIDTH * text.width() as i32, CELL_HEIGHT)
}

/// Largest image width or height accepted, in pixels.
pub const BMP_MAX_DIM: i32 = 1 << 16;

/// Width and height of a BMP image, from its header.
///
/// Returns None if `data` is not a BMP file, or its size is zero, negative
/// or larger than [`BMP_MAX_DIM`].
pub fn bmp_dims(data: &[u8]) -> Option<Dims> {
    if data.len() < 26 || &data[..2] != b"BM" {
        return None;
    }
    let width = i32::from_le_bytes(data[18..22].try_into().ok()?);
    let height = i32::from_le_bytes(data[22..26].try_into().ok()?);

    // Negative height means a top-down bitmap
    let height = height.checked_abs()?;
    let valid = 1..=BMP_MAX_DIM;
    (valid.contains(&width) && valid.contains(&height)).then(|| Dims::new(width, height))
}

// =============================================================================
// Key input
// =============================================================================

/// A source of keys, read one at a time.
pub trait KeyInput {
    /// Read the next key. `Ok(None)` means nothing is available yet.
    fn read_key(&mut self) -> io::Result<Option<Key>>;
}

/// Pre-recorded keys, delivered in order.
#[derive(Debug, Default, Clone)]
pub struct KeyQueue {
    keys: VecDeque<Key>,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Queue raw console characters, converted with [`Key::from_ascii`].
    pub fn from_ascii(text: &str) -> Self {
        Self::from_keys(text.chars().map(Key::from_ascii))
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyInput for KeyQueue {
    fn read_key(&mut self) -> io::Result<Option<Key>> {
        Ok(self.keys.pop_front())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal BMP header with the given size.
    fn bmp(width: i32, height: i32) -> Vec<u8> {
        let mut data = vec![0u8; 54];
        data[0] = b'B';
        data[1] = b'M';
        data[18..22].copy_from_slice(&width.to_le_bytes());
        data[22..26].copy_from_slice(&height.to_le_bytes());
        data
    }

    #[test]
    fn test_fallback_text_dims() {
        assert_eq!(fallback_text_dims("Boot"), Dims::new(32, 16));
        assert_eq!(fallback_text_dims(""), Dims::new(0, 16));
    }

    #[test]
    fn test_bmp_dims() {
        assert_eq!(bmp_dims(&bmp(64, 48)), Some(Dims::new(64, 48)));
        assert_eq!(bmp_dims(&bmp(64, -48)), Some(Dims::new(64, 48)));
        assert_eq!(bmp_dims(b"GIF89a"), None);
    }

    #[test]
    fn test_bmp_dims_rejects_bad_sizes() {
        assert_eq!(bmp_dims(&bmp(64, i32::MIN)), None);
        assert_eq!(bmp_dims(&bmp(-64, 48)), None);
        assert_eq!(bmp_dims(&bmp(0, 48)), None);
        assert_eq!(bmp_dims(&bmp(64, 0)), None);
        assert_eq!(bmp_dims(&bmp(i32::MAX, 48)), None);
        assert_eq!(bmp_dims(&bmp(64, BMP_MAX_DIM + 1)), None);
        assert_eq!(
            bmp_dims(&bmp(BMP_MAX_DIM, -BMP_MAX_DIM)),
            Some(Dims::new(BMP_MAX_DIM, BMP_MAX_DIM))
        );
    }

    #[test]
    fn test_key_queue_order() {
        let mut keys = KeyQueue::from_ascii("1\r");
        assert_eq!(keys.read_key().unwrap(), Some(Key::Char('1')));
        assert_eq!(keys.read_key().unwrap(), Some(Key::Select));
        assert_eq!(keys.read_key().unwrap(), None);
        assert!(keys.is_empty());
    }
}
