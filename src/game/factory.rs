use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{ColorIndex, PieceKind, COLOR_COUNT};

// ============================================================================
// Piece Factory Trait
// ============================================================================

/// Source of new pieces. Kind and color are chosen independently.
pub trait PieceFactory {
    fn next(&mut self) -> (PieceKind, ColorIndex);
}

/// Uniform draws from a generator seeded once at construction.
pub struct RandomPieceFactory {
    rng: StdRng,
}

impl RandomPieceFactory {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPieceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceFactory for RandomPieceFactory {
    fn next(&mut self) -> (PieceKind, ColorIndex) {
        let kind = PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())];
        let color = ColorIndex::new(self.rng.gen_range(0..COLOR_COUNT));
        (kind, color)
    }
}

/// Cycles through a fixed list. Panics on an empty list.
pub struct SequencePieceFactory {
    pieces: Vec<(PieceKind, ColorIndex)>,
    index: usize,
}

impl SequencePieceFactory {
    pub fn new(pieces: Vec<(PieceKind, ColorIndex)>) -> Self {
        assert!(!pieces.is_empty(), "piece sequence must not be empty");
        Self { pieces, index: 0 }
    }

    /// Every piece gets the same color.
    pub fn of_kinds(kinds: &[PieceKind], color: ColorIndex) -> Self {
        Self::new(kinds.iter().map(|&kind| (kind, color)).collect())
    }
}

impl PieceFactory for SequencePieceFactory {
    fn next(&mut self) -> (PieceKind, ColorIndex) {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}
