use super::{COLOR_COUNT, GRID_WIDTH};

// ============================================================================
// Colors
// ============================================================================

/// RGB values indexed by `ColorIndex`: red, green, blue, yellow, magenta,
/// cyan, orange.
pub const PALETTE: [(u8, u8, u8); COLOR_COUNT] = [
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (255, 0, 255),
    (0, 255, 255),
    (255, 165, 0),
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ColorIndex(u8);

impl ColorIndex {
    /// Panics if `index` is not below `COLOR_COUNT`.
    pub fn new(index: usize) -> Self {
        assert!(index < COLOR_COUNT, "color index {index} out of range");
        Self(index as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        PALETTE[self.index()]
    }

    /// Grid encoding: 0 is reserved for empty cells.
    pub(crate) fn stored(self) -> u8 {
        self.0 + 1
    }
}

// ============================================================================
// Shapes
// ============================================================================

const MAX_SIZE: usize = 4;

/// A square matrix of cells. Zero is empty, anything else is occupied.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Shape {
    size: usize,
    cells: [[u8; MAX_SIZE]; MAX_SIZE],
}

impl Shape {
    const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        let mut cells = [[0; MAX_SIZE]; MAX_SIZE];
        let mut i = 0;
        while i < N {
            let mut j = 0;
            while j < N {
                cells[i][j] = rows[i][j];
                j += 1;
            }
            i += 1;
        }
        Self { size: N, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw cell value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.size && col < self.size);
        self.cells[row][col]
    }

    /// Occupied cells as `(row, col)` offsets from the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .filter(move |&col| self.cells[row][col] != 0)
                .map(move |col| (row, col))
        })
    }

    /// Quarter turn clockwise: `rotated[j][n - 1 - i] = self[i][j]`.
    pub fn rotated(&self) -> Self {
        let n = self.size;
        let mut cells = [[0; MAX_SIZE]; MAX_SIZE];
        for i in 0..n {
            for j in 0..n {
                cells[j][n - 1 - i] = self.cells[i][j];
            }
        }
        Self { size: n, cells }
    }
}

#[rustfmt::skip]
const SHAPE_I: Shape = Shape::from_rows([
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);

#[rustfmt::skip]
const SHAPE_J: Shape = Shape::from_rows([
    [2, 0, 0],
    [2, 2, 2],
    [0, 0, 0],
]);

#[rustfmt::skip]
const SHAPE_L: Shape = Shape::from_rows([
    [0, 0, 3],
    [3, 3, 3],
    [0, 0, 0],
]);

#[rustfmt::skip]
const SHAPE_O: Shape = Shape::from_rows([
    [4, 4],
    [4, 4],
]);

#[rustfmt::skip]
const SHAPE_S: Shape = Shape::from_rows([
    [0, 5, 5],
    [5, 5, 0],
    [0, 0, 0],
]);

#[rustfmt::skip]
const SHAPE_T: Shape = Shape::from_rows([
    [0, 6, 0],
    [6, 6, 6],
    [0, 0, 0],
]);

#[rustfmt::skip]
const SHAPE_Z: Shape = Shape::from_rows([
    [7, 7, 0],
    [0, 7, 7],
    [0, 0, 0],
]);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn shape(self) -> Shape {
        match self {
            PieceKind::I => SHAPE_I,
            PieceKind::J => SHAPE_J,
            PieceKind::L => SHAPE_L,
            PieceKind::O => SHAPE_O,
            PieceKind::S => SHAPE_S,
            PieceKind::T => SHAPE_T,
            PieceKind::Z => SHAPE_Z,
        }
    }
}

// ============================================================================
// Pieces
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: ColorIndex,
    pub position: Position,
}

impl Piece {
    /// A piece in its spawn orientation, centered on the top row.
    pub fn spawn(kind: PieceKind, color: ColorIndex) -> Self {
        let shape = kind.shape();
        let x = (GRID_WIDTH - shape.size()) / 2;
        Self::new_at(kind, color, x as i16, 0)
    }

    pub fn new_at(kind: PieceKind, color: ColorIndex, x: i16, y: i16) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            color,
            position: Position { x, y },
        }
    }

    pub fn blocks(&self) -> Vec<Position> {
        self.shape
            .cells()
            .map(|(row, col)| Position {
                x: self.position.x + col as i16,
                y: self.position.y + row as i16,
            })
            .collect()
    }

    pub(crate) fn moved(&self, dx: i16, dy: i16) -> Self {
        Self {
            position: Position {
                x: self.position.x + dx,
                y: self.position.y + dy,
            },
            ..*self
        }
    }

    pub(crate) fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }
}
