//! In-memory cell display.
//!
//! A `Canvas` is a grid of character cells, each `CELL_WIDTH` x `CELL_HEIGHT`
//! pixels. Pixel coordinates from the expo are mapped down to cells, so any
//! scene laid out for a framebuffer can be shown on a terminal.
//!
//! Images are drawn as a block of `#` covering their BMP size.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor},
};
use unicode_width::UnicodeWidthChar;

use super::{bmp_dims, fallback_text_dims, Display, CELL_HEIGHT, CELL_WIDTH};
use crate::types::{Bbox, Colour, Dims};

bitflags::bitflags! {
    /// Cell attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const INVERSE = 1 << 0;
    }
}

/// A single cell of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub bg: Colour,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            bg: Colour::Black,
            attrs: Attr::NONE,
        }
    }
}

/// Grid of cells implementing [`Display`].
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    white_on_black: bool,
    syncs: usize,
}

impl Canvas {
    /// Create a canvas `cols` x `rows` cells in size.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
            white_on_black: true,
            syncs: 0,
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Get a cell.
    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    fn get_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(index)
    }

    /// Text of a row with trailing blanks removed.
    pub fn row_text(&self, row: u16) -> String {
        let mut text: String = (0..self.cols)
            .filter_map(|col| self.get(col, row))
            .map(|cell| cell.ch)
            .collect();
        text.truncate(text.trim_end().len());
        text
    }

    /// Find the first row containing `needle`.
    pub fn find_row(&self, needle: &str) -> Option<u16> {
        (0..self.rows).find(|&row| self.row_text(row).contains(needle))
    }

    /// Number of times [`Display::sync`] was called.
    pub fn sync_count(&self) -> usize {
        self.syncs
    }

    fn cell_range(bbox: Bbox) -> (i32, i32, i32, i32) {
        let col0 = bbox.x0.div_euclid(CELL_WIDTH);
        let row0 = bbox.y0.div_euclid(CELL_HEIGHT);
        let col1 = (bbox.x1 + CELL_WIDTH - 1).div_euclid(CELL_WIDTH);
        let row1 = (bbox.y1 + CELL_HEIGHT - 1).div_euclid(CELL_HEIGHT);
        (col0, row0, col1, row1)
    }

    /// Queue every cell to `out`, one row at a time.
    pub fn render_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in 0..self.rows {
            queue!(out, MoveTo(0, row))?;
            for col in 0..self.cols {
                if let Some(cell) = self.get(col, row) {
                    queue_cell(out, cell)?;
                }
            }
        }
        queue!(out, SetAttribute(Attribute::Reset))?;
        out.flush()
    }

    /// Queue only the cells that differ from `previous`.
    ///
    /// Falls back to a full render when the sizes differ. Returns true if
    /// anything was written.
    pub fn render_diff<W: Write>(&self, previous: &Canvas, out: &mut W) -> io::Result<bool> {
        if previous.cols != self.cols || previous.rows != self.rows {
            self.render_to(out)?;
            return Ok(true);
        }

        let mut has_changes = false;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (Some(cell), Some(prev)) = (self.get(col, row), previous.get(col, row)) else {
                    continue;
                };
                if cell != prev {
                    has_changes = true;
                    queue!(out, MoveTo(col, row))?;
                    queue_cell(out, cell)?;
                }
            }
        }
        queue!(out, SetAttribute(Attribute::Reset))?;
        out.flush()?;
        Ok(has_changes)
    }
}

fn term_colour(colour: Colour) -> Color {
    match colour {
        Colour::Black => Color::Black,
        Colour::White => Color::White,
    }
}

fn queue_cell<W: Write>(out: &mut W, cell: &Cell) -> io::Result<()> {
    let reverse = if cell.attrs.contains(Attr::INVERSE) {
        Attribute::Reverse
    } else {
        Attribute::NoReverse
    };
    queue!(
        out,
        SetAttribute(reverse),
        SetBackgroundColor(term_colour(cell.bg)),
        Print(cell.ch)
    )
}

impl Display for Canvas {
    fn size(&self) -> Dims {
        Dims::new(
            self.cols as i32 * CELL_WIDTH,
            self.rows as i32 * CELL_HEIGHT,
        )
    }

    fn measure(&self, _font_name: Option<&str>, _font_size: u32, text: &str) -> Dims {
        // Cells have a fixed size whatever font is asked for
        fallback_text_dims(text)
    }

    fn fill(&mut self, colour: Colour) -> io::Result<()> {
        for cell in &mut self.cells {
            *cell = Cell {
                bg: colour,
                ..Cell::default()
            };
        }
        Ok(())
    }

    fn fill_part(&mut self, bbox: Bbox, colour: Colour) -> io::Result<()> {
        let (col0, row0, col1, row1) = Self::cell_range(bbox);
        for row in row0..row1 {
            for col in col0..col1 {
                if let Some(cell) = self.get_mut(col, row) {
                    *cell = Cell {
                        bg: colour,
                        ..Cell::default()
                    };
                }
            }
        }
        Ok(())
    }

    fn put_text(&mut self, x: i32, y: i32, text: &str, highlight: bool) -> io::Result<()> {
        let row = y.div_euclid(CELL_HEIGHT);
        let mut col = x.div_euclid(CELL_WIDTH);
        let attrs = if highlight { Attr::INVERSE } else { Attr::NONE };

        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            if let Some(cell) = self.get_mut(col, row) {
                cell.ch = ch;
                cell.attrs = attrs;
            }
            // Wide characters cover the following cell too
            for extra in 1..width {
                if let Some(cell) = self.get_mut(col + extra, row) {
                    cell.ch = ' ';
                    cell.attrs = attrs;
                }
            }
            col += width;
        }
        Ok(())
    }

    fn put_image(&mut self, x: i32, y: i32, data: &[u8]) -> io::Result<()> {
        let Some(dims) = bmp_dims(data) else {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "not a BMP image"));
        };
        let area = Bbox::new(x, y, x.saturating_add(dims.x), y.saturating_add(dims.y));
        let (col0, row0, col1, row1) = Self::cell_range(area);
        for row in row0..row1 {
            for col in col0..col1 {
                if let Some(cell) = self.get_mut(col, row) {
                    cell.ch = '#';
                }
            }
        }
        Ok(())
    }

    fn draw_box(&mut self, bbox: Bbox, _width: u32, colour: Colour) -> io::Result<()> {
        let (col0, row0, col1, row1) = Self::cell_range(bbox);
        if col1 <= col0 || row1 <= row0 {
            return Ok(());
        }
        for col in col0..col1 {
            for row in [row0, row1 - 1] {
                if let Some(cell) = self.get_mut(col, row) {
                    cell.ch = '-';
                    cell.bg = colour;
                }
            }
        }
        for row in row0..row1 {
            for col in [col0, col1 - 1] {
                if let Some(cell) = self.get_mut(col, row) {
                    cell.ch = if row == row0 || row == row1 - 1 { '+' } else { '|' };
                    cell.bg = colour;
                }
            }
        }
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        self.syncs += 1;
        Ok(())
    }

    fn white_on_black(&self) -> bool {
        self.white_on_black
    }

    fn set_white_on_black(&mut self, white_on_black: bool) {
        self.white_on_black = white_on_black;
    }
}

// =============================================================================
// Tests
// =============================================================================
