//! Terminal backend - crossterm bridge for drawing and key input.
//!
//! Wraps a [`Canvas`] sized to the terminal. Drawing goes to the canvas;
//! [`Display::sync`] writes only the cells that changed since the previous
//! sync. Keys are read from crossterm by [`TerminalKeys`] and converted to
//! [`Key`].
//!
//! # Example
//!
//! ```ignore
//! use expo::display::{Terminal, TerminalKeys};
//!
//! let mut term = Terminal::new()?;
//! term.enter()?;
//! exp.set_display(Box::new(term));
//! let action = exp.poll(&mut TerminalKeys)?;
//! ```

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::{Canvas, Display, KeyInput};
use crate::types::{Bbox, Colour, Dims, Key};

/// How long `read_key` waits for a key before reporting none.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A terminal used as an expo display.
pub struct Terminal {
    canvas: Canvas,
    previous: Option<Canvas>,
    out: Stdout,
    active: bool,
}

impl Terminal {
    /// Create a terminal display the size of the current terminal.
    pub fn new() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            canvas: Canvas::new(cols, rows),
            previous: None,
            out: io::stdout(),
            active: false,
        })
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide)?;
        self.previous = None;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Nothing useful can be done with an error here
        let _ = self.leave();
    }
}

impl Display for Terminal {
    fn size(&self) -> Dims {
        self.canvas.size()
    }

    fn measure(&self, font_name: Option<&str>, font_size: u32, text: &str) -> Dims {
        self.canvas.measure(font_name, font_size, text)
    }

    fn fill(&mut self, colour: Colour) -> io::Result<()> {
        self.canvas.fill(colour)
    }

    fn fill_part(&mut self, bbox: Bbox, colour: Colour) -> io::Result<()> {
        self.canvas.fill_part(bbox, colour)
    }

    fn put_text(&mut self, x: i32, y: i32, text: &str, highlight: bool) -> io::Result<()> {
        self.canvas.put_text(x, y, text, highlight)
    }

    fn put_image(&mut self, x: i32, y: i32, data: &[u8]) -> io::Result<()> {
        self.canvas.put_image(x, y, data)
    }

    fn draw_box(&mut self, bbox: Bbox, width: u32, colour: Colour) -> io::Result<()> {
        self.canvas.draw_box(bbox, width, colour)
    }

    fn sync(&mut self) -> io::Result<()> {
        match &self.previous {
            Some(previous) => {
                self.canvas.render_diff(previous, &mut self.out)?;
            }
            None => self.canvas.render_to(&mut self.out)?,
        }
        self.out.flush()?;
        self.previous = Some(self.canvas.clone());
        self.canvas.sync()
    }

    fn white_on_black(&self) -> bool {
        self.canvas.white_on_black()
    }

    fn set_white_on_black(&mut self, white_on_black: bool) {
        self.canvas.set_white_on_black(white_on_black);
    }
}

/// Keys read from the terminal.
///
/// Separate from [`Terminal`] so the display can be owned by the expo while
/// the embedder keeps reading keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalKeys;

impl KeyInput for TerminalKeys {
    fn read_key(&mut self) -> io::Result<Option<Key>> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(convert_key_event(key)),
            _ => Ok(None),
        }
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm key event to an expo key.
///
/// Releases and keys with no menu meaning give None.
pub fn convert_key_event(event: KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Select),
        KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' => Some(Key::Quit),
            'p' => Some(Key::Up),
            'n' => Some(Key::Down),
            's' => Some(Key::Save),
            _ => None,
        },
        KeyCode::Char(c) => Some(Key::from_ascii(c)),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
