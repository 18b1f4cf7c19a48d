//! The board of locked cells.
//!
//! Cells hold `0` when empty and `color + 1` when occupied, so a color index
//! of 0 still reads as occupied. Dimensions are fixed at compile time.

use super::{ColorIndex, GRID_HEIGHT, GRID_WIDTH};

type Row = [u8; GRID_WIDTH];

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    rows: [Row; GRID_HEIGHT],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            rows: [[0; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    pub fn in_bounds(&self, col: i16, row: i16) -> bool {
        col >= 0 && (col as usize) < GRID_WIDTH && row >= 0 && (row as usize) < GRID_HEIGHT
    }

    /// Panics if `(col, row)` lies outside the board. Callers bounds-check first.
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        self.value(col, row) != 0
    }

    /// Raw stored value: 0 for empty, otherwise color index + 1.
    pub fn value(&self, col: usize, row: usize) -> u8 {
        assert!(
            col < GRID_WIDTH && row < GRID_HEIGHT,
            "grid query out of bounds: ({col}, {row})"
        );
        self.rows[row][col]
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<ColorIndex> {
        self.value(col, row)
            .checked_sub(1)
            .map(|index| ColorIndex::new(index as usize))
    }

    pub fn rows(&self) -> &[Row; GRID_HEIGHT] {
        &self.rows
    }

    /// Marks every given cell as occupied by `color`.
    pub fn lock<I>(&mut self, cells: I, color: ColorIndex)
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        for (col, row) in cells {
            debug_assert!(
                !self.is_occupied(col, row),
                "locking over an occupied cell at ({col}, {row})"
            );
            self.rows[row][col] = color.stored();
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|&cell| cell != 0)
    }

    pub fn filled_count_in_row(&self, row: usize) -> usize {
        self.rows[row].iter().filter(|&&cell| cell != 0).count()
    }

    pub fn total_filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|&&cell| cell != 0).count()
    }

    /// Removes full rows, scanning top to bottom and collapsing each one as
    /// soon as it is found. Everything above a cleared row drops by one and
    /// row 0 becomes empty. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;

        for row in 0..GRID_HEIGHT {
            if self.is_row_full(row) {
                self.rows.copy_within(0..row, 1);
                self.rows[0] = [0; GRID_WIDTH];
                cleared += 1;
            }
        }

        cleared
    }

    pub fn clear(&mut self) {
        self.rows = [[0; GRID_WIDTH]; GRID_HEIGHT];
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
