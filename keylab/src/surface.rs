//! Retained cell matrix standing in for the display driver.
//!
//! Paint ops land here exactly as a framebuffer driver would receive
//! them; the terminal renderer then draws the whole matrix each frame.
//! Diffing already happened upstream in the widget, so `apply` is the
//! only writer.

use padkey_core::{CellStyle, KeyGrid, PaintOp};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub selected: bool,
}

pub struct Surface {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(grid: &KeyGrid) -> Self {
        let blank = Cell {
            glyph: ' ',
            selected: false,
        };
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: vec![blank; grid.width() as usize * grid.height() as usize],
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn cell(&self, x: u8, y: u8) -> Cell {
        self.cells[self.index(x, y)]
    }

    fn index(&self, x: u8, y: u8) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Apply one paint instruction the way a driver would.
    pub fn apply(&mut self, op: &PaintOp) {
        match op {
            PaintOp::Row { y, text } => {
                for (x, byte) in text.bytes().enumerate() {
                    self.cells[*y as usize * self.width as usize + x] = Cell {
                        glyph: byte as char,
                        selected: false,
                    };
                }
            }
            PaintOp::Cell { x, y, glyph, style } => {
                let i = self.index(*x, *y);
                self.cells[i] = Cell {
                    glyph: *glyph,
                    selected: *style == CellStyle::Selected,
                };
            }
        }
    }
}
