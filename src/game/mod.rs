use std::num::NonZeroU32;

mod engine;
mod factory;
mod grid;
mod piece;
mod scheduler;

pub use engine::{Descent, GameEngine, GameEvent, GameState, Intent};
pub use factory::{PieceFactory, RandomPieceFactory, SequencePieceFactory};
pub use grid::Grid;
pub use piece::{ColorIndex, Piece, PieceKind, Position, Shape, PALETTE};
pub use scheduler::TickScheduler;

// ============================================================================
// Configuration
// ============================================================================

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

/// Side of one cell in playfield units. Only the front end cares about it.
pub const BLOCK_SIZE: u32 = 32;
pub const PLAYFIELD_WIDTH: u32 = GRID_WIDTH as u32 * BLOCK_SIZE;
pub const PLAYFIELD_HEIGHT: u32 = GRID_HEIGHT as u32 * BLOCK_SIZE;

pub const COLOR_COUNT: usize = 7;

// Timing (in frames)
pub const FALL_INTERVAL: u32 = 30;
pub const DEFAULT_FALL_INTERVAL: NonZeroU32 = match NonZeroU32::new(FALL_INTERVAL) {
    Some(interval) => interval,
    None => panic!("fall interval must be non-zero"),
};

// Scoring
pub const SCORE_PER_LINE: u32 = 10;

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn empty_grid() -> Grid {
        Grid::new()
    }

    pub fn fill_row(grid: &mut Grid, row: usize) {
        grid.lock((0..GRID_WIDTH).map(|col| (col, row)), ColorIndex::new(0));
    }

    pub fn fill_row_with_gap(grid: &mut Grid, row: usize, gap_col: usize) {
        grid.lock(
            (0..GRID_WIDTH)
                .filter(|&col| col != gap_col)
                .map(|col| (col, row)),
            ColorIndex::new(0),
        );
    }
}
