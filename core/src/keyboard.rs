//! Cursor navigation and diff rendering over a [`KeyGrid`].
//!
//! Full repaints are expensive on the target display, so the keyboard
//! remembers which cell it last painted selected and emits at most two
//! cell paints per ordinary frame: the old highlight back to normal and
//! the new one selected.

use heapless::Vec;
use log::{debug, trace};

use crate::grid::{KeyGrid, MAX_ROWS};
use crate::input::{Button, Buttons};
use crate::repeat::RepeatGate;

/// Step `value` by `delta` on a ring of `extent` cells.
#[inline]
pub fn wrap(value: u8, delta: i8, extent: u8) -> u8 {
    let extent = extent as i16;
    ((value as i16 + delta as i16 + extent) % extent) as u8
}

/// Cursor position on the grid, in cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellPos {
    pub x: u8,
    pub y: u8,
}

/// Highlight state of a painted cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellStyle {
    Normal,
    Selected,
}

/// One drawing instruction for the display collaborator. The widget says
/// what goes where; how pixels get there is the display's business.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PaintOp<'a> {
    /// Paint a whole row of unselected cells as one flat string.
    Row { y: u8, text: &'a str },
    /// Paint a single cell.
    Cell {
        x: u8,
        y: u8,
        glyph: char,
        style: CellStyle,
    },
}

/// One frame's instructions, in paint order. A full repaint is `height`
/// row ops plus the selection; a diff is at most two cell ops.
pub type PaintBatch<'a> = Vec<PaintOp<'a>, { MAX_ROWS + 1 }>;

const DIRECTION_STEPS: [(Button, i8, i8); 4] = [
    (Button::Up, 0, -1),
    (Button::Down, 0, 1),
    (Button::Left, -1, 0),
    (Button::Right, 1, 0),
];

/// The keyboard widget proper: a cursor over an immutable layout.
pub struct GridKeyboard<'a> {
    grid: KeyGrid<'a>,
    cursor: CellPos,
    /// Last position painted selected. `None` means nothing on screen can
    /// be trusted and the next render repaints everything.
    painted: Option<CellPos>,
}

impl<'a> GridKeyboard<'a> {
    pub fn new(grid: KeyGrid<'a>) -> Self {
        Self {
            grid,
            cursor: CellPos { x: 0, y: 0 },
            painted: None,
        }
    }

    pub fn grid(&self) -> &KeyGrid<'a> {
        &self.grid
    }

    pub fn cursor(&self) -> CellPos {
        self.cursor
    }

    /// Glyph under the cursor.
    pub fn current_char(&self) -> char {
        self.grid.at(self.cursor.x, self.cursor.y)
    }

    /// Back to the top-left corner, forgetting what was painted.
    pub fn reset(&mut self) {
        self.cursor = CellPos { x: 0, y: 0 };
        self.painted = None;
        debug!("keyboard reset");
    }

    /// Run one frame of navigation. Polls the gate once for each
    /// directional button, in a fixed order; every fire steps the cursor
    /// one cell with wrap-around. Axes are independent, so two directions
    /// firing in the same frame move diagonally.
    pub fn advance(&mut self, gate: &mut RepeatGate, held: Buttons, now_ms: u32) {
        for (button, dx, dy) in DIRECTION_STEPS {
            if gate.classify(button, held.contains(button.flag()), now_ms) {
                self.cursor.x = wrap(self.cursor.x, dx, self.grid.width());
                self.cursor.y = wrap(self.cursor.y, dy, self.grid.height());
                trace!("cursor now ({}, {})", self.cursor.x, self.cursor.y);
            }
        }
    }

    /// Produce this frame's paint instructions.
    ///
    /// With `paint_full` every row is emitted unselected, then the cursor
    /// cell selected. Otherwise only the delta: the previously selected
    /// cell back to normal (when the cursor moved), then the cursor cell
    /// selected. A keyboard that has painted nothing yet (fresh, or just
    /// reset) escalates to a full repaint, so no stale highlight can
    /// survive the sentinel.
    pub fn render(&mut self, paint_full: bool) -> PaintBatch<'a> {
        let mut batch = PaintBatch::new();

        match self.painted {
            Some(prev) if !paint_full => {
                if prev != self.cursor {
                    push(
                        &mut batch,
                        PaintOp::Cell {
                            x: prev.x,
                            y: prev.y,
                            glyph: self.grid.at(prev.x, prev.y),
                            style: CellStyle::Normal,
                        },
                    );
                }
            }
            _ => {
                debug!("full repaint, {} rows", self.grid.height());
                for y in 0..self.grid.height() {
                    push(
                        &mut batch,
                        PaintOp::Row {
                            y,
                            text: self.grid.row(y),
                        },
                    );
                }
            }
        }

        push(
            &mut batch,
            PaintOp::Cell {
                x: self.cursor.x,
                y: self.cursor.y,
                glyph: self.current_char(),
                style: CellStyle::Selected,
            },
        );

        self.painted = Some(self.cursor);
        batch
    }
}

fn push<'a>(batch: &mut PaintBatch<'a>, op: PaintOp<'a>) {
    // Grid height is capped at MAX_ROWS on construction.
    batch.push(op).expect("paint batch sized for the tallest grid");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::KeyGrid;

    const ROWS: [&str; 5] = ["ABCDEFG", "HIJKLMN", "OPQRSTU", "VWXYZ01", "2345678"];

    fn keyboard() -> GridKeyboard<'static> {
        GridKeyboard::new(KeyGrid::new(&ROWS).unwrap())
    }

    fn tap(kb: &mut GridKeyboard<'_>, held: Buttons, now_ms: u32) {
        // A fresh gate fires immediately for every held direction.
        let mut gate = RepeatGate::new();
        kb.advance(&mut gate, held, now_ms);
    }

    #[test]
    fn wrap_is_total_on_the_ring() {
        assert_eq!(wrap(0, -1, 5), 4);
        assert_eq!(wrap(4, 1, 5), 0);
        assert_eq!(wrap(2, 1, 5), 3);
        assert_eq!(wrap(2, -1, 5), 1);
        assert_eq!(wrap(2, 0, 5), 2);
    }

    #[test]
    fn cursor_wraps_on_both_axes() {
        let mut kb = keyboard();
        tap(&mut kb, Buttons::LEFT, 0);
        assert_eq!(kb.cursor(), CellPos { x: 6, y: 0 });
        tap(&mut kb, Buttons::RIGHT, 0);
        assert_eq!(kb.cursor(), CellPos { x: 0, y: 0 });
        tap(&mut kb, Buttons::UP, 0);
        assert_eq!(kb.cursor(), CellPos { x: 0, y: 4 });
        tap(&mut kb, Buttons::DOWN, 0);
        assert_eq!(kb.cursor(), CellPos { x: 0, y: 0 });
    }

    #[test]
    fn cursor_stays_in_bounds_under_long_walks() {
        let mut kb = keyboard();
        let walks = [
            Buttons::LEFT,
            Buttons::UP,
            Buttons::LEFT.union(Buttons::UP),
            Buttons::RIGHT.union(Buttons::DOWN),
            Buttons::DOWN,
        ];
        for (i, held) in walks.iter().cycle().take(100).enumerate() {
            tap(&mut kb, *held, i as u32 * 1_000);
            let pos = kb.cursor();
            assert!(pos.x < 7 && pos.y < 5, "escaped at step {i}: {pos:?}");
        }
    }

    #[test]
    fn diagonal_chord_moves_both_axes_in_one_frame() {
        let mut kb = keyboard();
        tap(&mut kb, Buttons::DOWN.union(Buttons::RIGHT), 0);
        assert_eq!(kb.cursor(), CellPos { x: 1, y: 1 });
    }

    #[test]
    fn three_spaced_right_fires_land_on_column_three() {
        let mut kb = keyboard();
        let mut gate = RepeatGate::new();

        // Held the whole time, sampled on three frames spaced past the
        // required gaps: initial fire, then two repeats.
        kb.advance(&mut gate, Buttons::RIGHT, 0);
        kb.advance(&mut gate, Buttons::RIGHT, 300);
        kb.advance(&mut gate, Buttons::RIGHT, 600);

        assert_eq!(kb.cursor(), CellPos { x: 3, y: 0 });
        assert_eq!(kb.current_char(), 'D');
    }

    #[test]
    fn suppressed_frames_do_not_move_the_cursor() {
        let mut kb = keyboard();
        let mut gate = RepeatGate::new();

        kb.advance(&mut gate, Buttons::RIGHT, 0);
        // Inside the initial delay: held but gated off.
        kb.advance(&mut gate, Buttons::RIGHT, 100);
        kb.advance(&mut gate, Buttons::RIGHT, 200);

        assert_eq!(kb.cursor(), CellPos { x: 1, y: 0 });
    }

    #[test]
    fn first_render_is_a_full_repaint() {
        let mut kb = keyboard();
        let batch = kb.render(false);

        assert_eq!(batch.len(), 6);
        for (y, op) in batch.iter().take(5).enumerate() {
            assert_eq!(
                *op,
                PaintOp::Row {
                    y: y as u8,
                    text: ROWS[y],
                }
            );
        }
        assert_eq!(
            batch[5],
            PaintOp::Cell {
                x: 0,
                y: 0,
                glyph: 'A',
                style: CellStyle::Selected,
            }
        );
    }

    #[test]
    fn moved_cursor_diffs_to_one_unselect_and_one_select() {
        let mut kb = keyboard();
        let _ = kb.render(true);

        tap(&mut kb, Buttons::RIGHT, 0);
        let batch = kb.render(false);

        assert_eq!(
            batch.as_slice(),
            [
                PaintOp::Cell {
                    x: 0,
                    y: 0,
                    glyph: 'A',
                    style: CellStyle::Normal,
                },
                PaintOp::Cell {
                    x: 1,
                    y: 0,
                    glyph: 'B',
                    style: CellStyle::Selected,
                },
            ]
        );
    }

    #[test]
    fn parked_cursor_reasserts_only_the_selection() {
        let mut kb = keyboard();
        let _ = kb.render(true);

        let batch = kb.render(false);
        assert_eq!(
            batch.as_slice(),
            [PaintOp::Cell {
                x: 0,
                y: 0,
                glyph: 'A',
                style: CellStyle::Selected,
            }]
        );
    }

    #[test]
    fn full_render_covers_every_cell_exactly_once() {
        let mut kb = keyboard();
        tap(&mut kb, Buttons::DOWN, 0);
        let batch = kb.render(true);

        let mut covered = [[0u8; 7]; 5];
        for op in batch.iter() {
            if let PaintOp::Row { y, text } = op {
                assert_eq!(text.len(), 7);
                for x in 0..7 {
                    covered[*y as usize][x] += 1;
                }
            }
        }
        assert!(covered.iter().flatten().all(|&n| n == 1));

        // Selection paint comes after the rows, and the sentinel is gone.
        assert_eq!(
            batch.last(),
            Some(&PaintOp::Cell {
                x: 0,
                y: 1,
                glyph: 'H',
                style: CellStyle::Selected,
            })
        );
        let follow_up = kb.render(false);
        assert_eq!(follow_up.len(), 1);
    }

    #[test]
    fn reset_cannot_leave_a_stale_highlight() {
        let mut kb = keyboard();
        let _ = kb.render(true);
        tap(&mut kb, Buttons::DOWN.union(Buttons::RIGHT), 0);
        let _ = kb.render(false);

        // (1, 1) is highlighted on screen. Reset forgets it.
        kb.reset();
        assert_eq!(kb.cursor(), CellPos { x: 0, y: 0 });

        // The next diff render escalates to a full repaint, which rewrites
        // (1, 1) unselected via its row.
        let batch = kb.render(false);
        assert!(
            batch
                .iter()
                .any(|op| matches!(op, PaintOp::Row { y: 1, .. }))
        );
        assert_eq!(
            batch.last(),
            Some(&PaintOp::Cell {
                x: 0,
                y: 0,
                glyph: 'A',
                style: CellStyle::Selected,
            })
        );
    }

    #[test]
    fn current_char_tracks_the_cursor() {
        let mut kb = keyboard();
        assert_eq!(kb.current_char(), 'A');
        tap(&mut kb, Buttons::DOWN, 0);
        tap(&mut kb, Buttons::RIGHT, 1_000);
        assert_eq!(kb.current_char(), 'I');
    }
}
