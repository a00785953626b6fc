use serde::Serialize;

use super::{
    board::{Board, Position},
    piece::{PieceKind, RotationMatrix},
    signed,
};

/// Where a piece comes to rest: orientation, column and landing row.
///
/// The rotation is an index into [`PieceKind::rotations`]; column and row give
/// the top-left corner of that matrix on the board.
///
/// # Example
///
/// ```
/// use dropline_engine::{Board, PieceKind, Placement};
///
/// let board = Board::default();
/// let placement = Placement::hard_drop(&board, PieceKind::O, 0, 4).unwrap();
/// assert_eq!(placement.row(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Placement {
    kind: PieceKind,
    rotation: usize,
    column: usize,
    row: isize,
}

impl Placement {
    /// # Panics
    ///
    /// Panics if `rotation` is not an index into `kind.rotations()`.
    #[must_use]
    pub fn new(kind: PieceKind, rotation: usize, column: usize, row: isize) -> Self {
        assert!(
            rotation < kind.rotations().len(),
            "{kind} has no rotation {rotation}"
        );
        Self {
            kind,
            rotation,
            column,
            row,
        }
    }

    /// Hard drops the given orientation in `column` and returns where it lands.
    ///
    /// Returns `None` if the rotation index does not exist or the piece collides
    /// at the row where the drop stops. Cells at the top of the column do not
    /// block the drop by themselves; see [`Board::hard_drop_row`].
    #[must_use]
    pub fn hard_drop(
        board: &Board,
        kind: PieceKind,
        rotation: usize,
        column: usize,
    ) -> Option<Self> {
        let matrix = kind.rotations().get(rotation)?;
        let row = board.hard_drop_row(matrix, column);
        let placement = Self {
            kind,
            rotation,
            column,
            row,
        };
        board
            .is_valid_placement(matrix, placement.position())
            .then_some(placement)
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn row(&self) -> isize {
        self.row
    }

    #[must_use]
    pub fn matrix(&self) -> &'static RotationMatrix {
        &self.kind.rotations()[self.rotation]
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(signed(self.column), self.row)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, BoardSize};

    use super::*;

    #[test]
    fn test_hard_drop_on_empty_board() {
        let board = Board::default();
        let flat = Placement::hard_drop(&board, PieceKind::I, 0, 6).unwrap();
        assert_eq!((flat.column(), flat.row()), (6, 19));
        let upright = Placement::hard_drop(&board, PieceKind::I, 1, 9).unwrap();
        assert_eq!((upright.column(), upright.row()), (9, 16));
        assert_eq!(upright.matrix().height(), 4);
    }

    #[test]
    fn test_hard_drop_rejects_unknown_rotation() {
        let board = Board::default();
        assert_eq!(Placement::hard_drop(&board, PieceKind::O, 1, 0), None);
    }

    #[test]
    fn test_hard_drop_rejects_blocked_column() {
        let mut board = Board::new(BoardSize::new(4, 4).unwrap());
        for row in 0..4 {
            board.fill_cell(0, row, PieceKind::J);
        }
        assert_eq!(Placement::hard_drop(&board, PieceKind::O, 0, 0), None);
        assert!(Placement::hard_drop(&board, PieceKind::O, 0, 1).is_some());
    }

    #[test]
    fn test_hard_drop_passes_under_top_cell() {
        let mut board = Board::default();
        board.fill_cell(0, 0, PieceKind::Z);
        let upright = Placement::hard_drop(&board, PieceKind::I, 1, 0).unwrap();
        assert_eq!(upright.row(), 16);
        assert!(board.is_valid_placement(upright.matrix(), upright.position()));
    }

    #[test]
    #[should_panic(expected = "O has no rotation 2")]
    fn test_new_rejects_unknown_rotation() {
        let _ = Placement::new(PieceKind::O, 2, 0, 0);
    }

    #[test]
    fn test_placement_serialization() {
        let placement = Placement::new(PieceKind::T, 3, 4, 17);
        let serialized = serde_json::to_string(&placement).unwrap();
        assert_eq!(
            serialized,
            r#"{"kind":"T","rotation":3,"column":4,"row":17}"#
        );
    }
}
