use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
///
/// The discriminant doubles as the index into every per-kind table, and the
/// value stored in a board cell is `index + 1` (0 means empty).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in index order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Value written into a board cell when a piece of this kind is locked.
    #[must_use]
    pub const fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_value`]. Returns `None` for 0 and out-of-range values.
    #[must_use]
    pub const fn from_cell_value(value: u8) -> Option<Self> {
        match value {
            1..=7 => Some(Self::ALL[(value - 1) as usize]),
            _ => None,
        }
    }

    /// Canonical (unrotated) shape of this piece.
    #[must_use]
    pub const fn base_matrix(self) -> RotationMatrix {
        BASE_MATRICES[self as usize]
    }

    /// Distinct orientations of this piece, starting from the canonical one.
    ///
    /// The list is computed at compile time and shared for the lifetime of the
    /// process; successive entries are 90° clockwise rotations of each other.
    ///
    /// ```
    /// use dropline_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::O.rotations().len(), 1);
    /// assert_eq!(PieceKind::I.rotations().len(), 2);
    /// assert_eq!(PieceKind::T.rotations().len(), 4);
    /// ```
    #[must_use]
    pub fn rotations(self) -> &'static [RotationMatrix] {
        PIECE_ROTATIONS[self as usize].as_slice()
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use dropline_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid piece kind {input:?}, expected one of I, O, T, S, Z, J, L")]
pub struct ParsePieceKindError {
    input: String,
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c.to_ascii_uppercase()),
            _ => None,
        };
        kind.ok_or_else(|| ParsePieceKindError {
            input: s.to_owned(),
        })
    }
}

/// Largest extent of any piece along either axis.
pub const MATRIX_MAX_SIZE: usize = 4;

/// Occupancy grid of one piece orientation.
///
/// Only the top-left `height × width` cells are meaningful; the rest are kept
/// empty so that derived equality compares shapes by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationMatrix {
    width: u8,
    height: u8,
    cells: [[bool; MATRIX_MAX_SIZE]; MATRIX_MAX_SIZE],
}

impl RotationMatrix {
    /// Builds a matrix from rows of `0`/`1` values.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MATRIX_MAX_SIZE);
        assert!(H > 0 && H <= MATRIX_MAX_SIZE);
        let mut cells = [[false; MATRIX_MAX_SIZE]; MATRIX_MAX_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    #[must_use]
    pub const fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.cells[row][col]
    }

    /// Iterates over occupied cells as `(row, col)` offsets from the top-left corner.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |row| {
            (0..self.width()).filter_map(move |col| self.cells[row][col].then_some((row, col)))
        })
    }

    /// Rotates the matrix 90° clockwise (reverse the rows, then transpose).
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let h = self.height();
        let mut cells = [[false; MATRIX_MAX_SIZE]; MATRIX_MAX_SIZE];
        let mut y = 0;
        while y < self.width() {
            let mut x = 0;
            while x < h {
                cells[y][x] = self.cells[h - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    const fn same_shape(&self, other: &Self) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        let mut y = 0;
        while y < MATRIX_MAX_SIZE {
            let mut x = 0;
            while x < MATRIX_MAX_SIZE {
                if self.cells[y][x] != other.cells[y][x] {
                    return false;
                }
                x += 1;
            }
            y += 1;
        }
        true
    }
}

impl fmt::Display for RotationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width() {
                f.write_str(if self.cells[row][col] { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Deduplicated orientations of one piece.
#[derive(Debug, Clone, Copy)]
struct RotationSet {
    matrices: [RotationMatrix; 4],
    len: usize,
}

impl RotationSet {
    fn as_slice(&self) -> &[RotationMatrix] {
        &self.matrices[..self.len]
    }
}

/// Collects orientations reachable by repeated clockwise rotation.
///
/// Stops at the first rotation that reproduces an orientation already collected,
/// so symmetric pieces keep only their distinct shapes.
const fn collect_rotations(base: RotationMatrix) -> RotationSet {
    let mut matrices = [base; 4];
    let mut len = 1;
    let mut current = base.rotated_clockwise();
    while len < 4 {
        let mut i = 0;
        while i < len {
            if matrices[i].same_shape(&current) {
                return RotationSet { matrices, len };
            }
            i += 1;
        }
        matrices[len] = current;
        len += 1;
        current = current.rotated_clockwise();
    }
    RotationSet { matrices, len }
}

const BASE_MATRICES: [RotationMatrix; PieceKind::LEN] = [
    // I-piece
    RotationMatrix::from_rows([[1, 1, 1, 1]]),
    // O-piece
    RotationMatrix::from_rows([[1, 1], [1, 1]]),
    // T-piece
    RotationMatrix::from_rows([[0, 1, 0], [1, 1, 1]]),
    // S-piece
    RotationMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
    // Z-piece
    RotationMatrix::from_rows([[1, 1, 0], [0, 1, 1]]),
    // J-piece
    RotationMatrix::from_rows([[1, 0, 0], [1, 1, 1]]),
    // L-piece
    RotationMatrix::from_rows([[0, 0, 1], [1, 1, 1]]),
];

static PIECE_ROTATIONS: [RotationSet; PieceKind::LEN] = [
    collect_rotations(BASE_MATRICES[0]),
    collect_rotations(BASE_MATRICES[1]),
    collect_rotations(BASE_MATRICES[2]),
    collect_rotations(BASE_MATRICES[3]),
    collect_rotations(BASE_MATRICES[4]),
    collect_rotations(BASE_MATRICES[5]),
    collect_rotations(BASE_MATRICES[6]),
];
