use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    piece::{PieceKind, RotationMatrix},
    signed,
};

/// Largest supported board width or height.
pub const MAX_BOARD_EXTENT: usize = 64;
/// Smallest supported board width or height (every piece must fit flat and upright).
pub const MIN_BOARD_EXTENT: usize = 4;

/// Validated board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    width: usize,
    height: usize,
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl BoardSize {
    /// The standard 10×20 well.
    pub const STANDARD: Self = Self {
        width: 10,
        height: 20,
    };

    pub fn new(width: usize, height: usize) -> Result<Self, BoardSizeError> {
        let range = MIN_BOARD_EXTENT..=MAX_BOARD_EXTENT;
        if !range.contains(&width) {
            return Err(BoardSizeError::Width { width });
        }
        if !range.contains(&height) {
            return Err(BoardSizeError::Height { height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.width * self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardSizeError {
    #[display("board width must be within {MIN_BOARD_EXTENT}..={MAX_BOARD_EXTENT}, got {width}")]
    Width { width: usize },
    #[display("board height must be within {MIN_BOARD_EXTENT}..={MAX_BOARD_EXTENT}, got {height}")]
    Height { height: usize },
}

/// Board coordinate of a matrix's top-left corner.
///
/// Rows grow downward from 0 at the top of the well. Negative rows place part of
/// the matrix above the visible well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    col: isize,
    row: isize,
}

impl Position {
    #[must_use]
    pub const fn new(col: isize, row: isize) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn col(self) -> isize {
        self.col
    }

    #[must_use]
    pub const fn row(self) -> isize {
        self.row
    }

    const fn offset(self, dx: usize, dy: usize) -> (isize, isize) {
        (self.col + signed(dx), self.row + signed(dy))
    }
}

/// Per-column statistics of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStats {
    heights: ArrayVec<u8, MAX_BOARD_EXTENT>,
    holes: usize,
}

impl ColumnStats {
    /// Height of each column, left to right. An empty column has height 0.
    #[must_use]
    pub fn heights(&self) -> &[u8] {
        &self.heights
    }

    /// Empty cells lying below the topmost occupied cell of their column, summed over columns.
    #[must_use]
    pub fn holes(&self) -> usize {
        self.holes
    }
}

/// The well: a fixed-size grid of cells stored row-major in one flat buffer.
///
/// Each cell holds 0 when empty or [`PieceKind::cell_value`] of the piece that
/// was locked there. Cloning copies a single buffer, which keeps the per-candidate
/// simulation in the placement search cheap.
///
/// # Example
///
/// ```
/// use dropline_engine::{Board, PieceKind, Position};
///
/// let mut board = Board::default();
/// let bar = &PieceKind::I.rotations()[0];
/// let row = board.hard_drop_row(bar, 0);
/// assert_eq!(row, 19);
///
/// board.lock_piece(bar, Position::new(0, row), PieceKind::I);
/// assert_eq!(board.heights_and_holes().heights()[..5], [1, 1, 1, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    cells: Box<[u8]>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::STANDARD)
    }
}

impl Board {
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![0; size.cell_count()].into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.size.height
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        row * self.size.width + col
    }

    /// Returns the piece kind locked at the cell, or `None` if it is empty.
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Option<PieceKind> {
        PieceKind::from_cell_value(self.cells[self.index(col, row)])
    }

    #[must_use]
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        self.cells[self.index(col, row)] != 0
    }

    pub fn fill_cell(&mut self, col: usize, row: usize, kind: PieceKind) {
        let index = self.index(col, row);
        self.cells[index] = kind.cell_value();
    }

    /// Iterates over rows from top to bottom as raw cell values.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks_exact(self.size.width)
    }

    /// Checks whether `matrix` fits at `position`.
    ///
    /// Every occupied cell must lie in a column within `[0, width)` and a row
    /// below `height`, and must not overlap an occupied board cell. Cells above
    /// the well (negative rows) are only checked against the side walls.
    #[must_use]
    pub fn is_valid_placement(&self, matrix: &RotationMatrix, position: Position) -> bool {
        matrix.occupied_cells().all(|(dy, dx)| {
            let (col, row) = position.offset(dx, dy);
            let Ok(col) = usize::try_from(col) else {
                return false;
            };
            if col >= self.width() {
                return false;
            }
            let Ok(row) = usize::try_from(row) else {
                return true;
            };
            row < self.height() && self.cells[self.index(col, row)] == 0
        })
    }

    /// Returns the row a hard drop from row 0 comes to rest at in column `col`.
    ///
    /// The row is advanced while the placement one row further down stays valid;
    /// row 0 itself is not checked, so a piece can pass under cells at the top of
    /// the column. Check the result with [`Board::is_valid_placement`].
    #[must_use]
    pub fn hard_drop_row(&self, matrix: &RotationMatrix, col: usize) -> isize {
        let col = signed(col);
        let mut row = 0;
        while self.is_valid_placement(matrix, Position::new(col, row + 1)) {
            row += 1;
        }
        row
    }

    /// Writes `kind` into every cell covered by `matrix` at `position`.
    ///
    /// The placement must already have been validated; cells above the well are
    /// dropped.
    pub fn lock_piece(&mut self, matrix: &RotationMatrix, position: Position, kind: PieceKind) {
        debug_assert!(self.is_valid_placement(matrix, position));
        let value = kind.cell_value();
        for (dy, dx) in matrix.occupied_cells() {
            let (col, row) = position.offset(dx, dy);
            let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
                continue;
            };
            let index = self.index(col, row);
            self.cells[index] = value;
        }
    }

    /// Returns a copy of the board with full rows removed, and the number removed.
    ///
    /// Remaining rows keep their relative order and the same number of empty rows
    /// is inserted at the top.
    #[must_use]
    pub fn clear_lines(&self) -> (Self, usize) {
        let mut board = self.clone();
        let count = board.clear_lines_in_place();
        (board, count)
    }

    /// Removes full rows in place and returns how many were removed.
    pub fn clear_lines_in_place(&mut self) -> usize {
        let width = self.width();
        let mut count = 0;
        for y in (0..self.height()).rev() {
            let start = y * width;
            if self.cells[start..start + width].iter().all(|&c| c != 0) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.cells
                    .copy_within(start..start + width, start + count * width);
            }
        }
        self.cells[..count * width].fill(0);
        count
    }

    /// Computes column heights and the total hole count.
    ///
    /// Each column is scanned once from the top: the first occupied cell fixes
    /// the height and every empty cell after it counts as a hole.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn heights_and_holes(&self) -> ColumnStats {
        let width = self.width();
        let height = self.height();
        let mut heights = ArrayVec::new();
        let mut holes = 0;
        for col in 0..width {
            let mut column_height = 0;
            for row in 0..height {
                let occupied = self.cells[row * width + col] != 0;
                if column_height == 0 {
                    if occupied {
                        column_height = height - row;
                    }
                } else if !occupied {
                    holes += 1;
                }
            }
            heights.push(column_height as u8);
        }
        ColumnStats { heights, holes }
    }

    /// Creates a board from ASCII art, one line per row from top to bottom.
    ///
    /// `.` is an empty cell, a piece letter is a cell locked by that piece and
    /// `#` is an occupied cell stored as an I block. Blank lines and surrounding
    /// whitespace are ignored; the board size is taken from the art.
    pub fn from_ascii(art: &str) -> Result<Self, ParseBoardError> {
        let rows = parse_rows(art.lines())?;
        let width = rows[0].len();
        let size = BoardSize::new(width, rows.len()).map_err(ParseBoardError::Size)?;
        Ok(Self::with_rows(size, &rows))
    }

    /// Creates a board of `size` whose bottom rows are given as ASCII art.
    ///
    /// Rows above the art are empty. Uses the same cell alphabet as
    /// [`Board::from_ascii`].
    pub fn from_ascii_bottom(size: BoardSize, art: &str) -> Result<Self, ParseBoardError> {
        let rows = parse_rows(art.lines())?;
        if rows[0].len() != size.width {
            return Err(ParseBoardError::RaggedRow {
                row: 0,
                expected: size.width,
                found: rows[0].len(),
            });
        }
        if rows.len() > size.height {
            return Err(ParseBoardError::TooManyRows {
                rows: rows.len(),
                height: size.height,
            });
        }
        Ok(Self::with_rows(size, &rows))
    }

    fn with_rows(size: BoardSize, rows: &[Vec<u8>]) -> Self {
        let mut board = Self::new(size);
        let first_row = size.height - rows.len();
        for (y, row) in rows.iter().enumerate() {
            let start = board.index(0, first_row + y);
            board.cells[start..start + size.width].copy_from_slice(row);
        }
        board
    }
}

fn cell_char(value: u8) -> char {
    PieceKind::from_cell_value(value).map_or('.', PieceKind::as_char)
}

fn parse_rows<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Vec<Vec<u8>>, ParseBoardError> {
    let mut rows: Vec<Vec<u8>> = vec![];
    for line in lines.map(str::trim).filter(|line| !line.is_empty()) {
        let y = rows.len();
        let row = line
            .chars()
            .enumerate()
            .map(|(x, ch)| match ch {
                '.' => Ok(0),
                '#' => Ok(PieceKind::I.cell_value()),
                _ => PieceKind::from_char(ch)
                    .map(PieceKind::cell_value)
                    .ok_or(ParseBoardError::InvalidCell { row: y, col: x, ch }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            return Err(ParseBoardError::RaggedRow {
                row: y,
                expected: first.len(),
                found: row.len(),
            });
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(ParseBoardError::Empty);
    }
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board has no rows")]
    Empty,
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("invalid cell {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
    #[display("{rows} rows do not fit in a board of height {height}")]
    TooManyRows { rows: usize, height: usize },
    #[display("invalid board size: {_0}")]
    Size(BoardSizeError),
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &value in row {
                write!(f, "{}", cell_char(value))?;
            }
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "........../....OO..../..." (rows top to bottom, '/' separated)
        let mut s = String::with_capacity(self.cells.len() + self.height());
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                s.push('/');
            }
            s.extend(row.iter().copied().map(cell_char));
        }
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let rows = parse_rows(s.split('/')).map_err(serde::de::Error::custom)?;
        let size = BoardSize::new(rows[0].len(), rows.len()).map_err(serde::de::Error::custom)?;
        Ok(Self::with_rows(size, &rows))
    }
}
