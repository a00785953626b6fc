use crate::{
    CompletePlacementError,
    core::{Board, BoardSize, PieceKind, Placement, Position},
};

use super::piece_bag::PieceBag;

/// Spawn point of every new piece: top-left corner of its canonical orientation.
pub const SPAWN_POSITION: Position = Position::new(3, 0);

/// The authoritative game state: the board, the piece supply and the falling piece.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: PieceKind,
    piece_bag: PieceBag,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new(BoardSize::STANDARD, PieceBag::new())
    }
}

impl GameField {
    #[must_use]
    pub fn new(size: BoardSize, mut piece_bag: PieceBag) -> Self {
        let falling_piece = piece_bag.next_piece();
        Self {
            board: Board::new(size),
            falling_piece,
            piece_bag,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> PieceKind {
        self.falling_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.piece_bag.peek()
    }

    /// Checks whether the falling piece fits at the spawn point.
    #[must_use]
    pub fn spawn_is_valid(&self) -> bool {
        self.board
            .is_valid_placement(&self.falling_piece.base_matrix(), SPAWN_POSITION)
    }

    /// Hard drops the falling piece with the chosen rotation and column, locks it,
    /// clears lines and spawns the next piece.
    ///
    /// The landing row is recomputed on the live board. Returns the number of
    /// lines cleared together with the outcome: an error means the placement was
    /// rejected (nothing changed) or the next piece cannot spawn (game over).
    pub fn complete_placement(
        &mut self,
        placement: Placement,
    ) -> (usize, Result<(), CompletePlacementError>) {
        if placement.kind() != self.falling_piece {
            return (
                0,
                Err(CompletePlacementError::PieceMismatch {
                    placed: placement.kind(),
                    falling: self.falling_piece,
                }),
            );
        }
        let Some(dropped) = Placement::hard_drop(
            &self.board,
            placement.kind(),
            placement.rotation(),
            placement.column(),
        ) else {
            return (0, Err(CompletePlacementError::InvalidPlacement));
        };

        self.board
            .lock_piece(dropped.matrix(), dropped.position(), dropped.kind());
        let cleared_lines = self.board.clear_lines_in_place();

        self.falling_piece = self.piece_bag.next_piece();
        if !self.spawn_is_valid() {
            return (
                cleared_lines,
                Err(CompletePlacementError::NewPieceCollision),
            );
        }

        (cleared_lines, Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with_seed(seed: u64) -> GameField {
        GameField::new(BoardSize::STANDARD, PieceBag::with_seed(seed))
    }

    #[test]
    fn test_new_field_follows_bag() {
        let mut bag = PieceBag::with_seed(3);
        let field = GameField::new(BoardSize::STANDARD, bag.clone());
        assert_eq!(field.falling_piece(), bag.next_piece());
        assert_eq!(field.next_piece(), bag.next_piece());
        assert!(field.spawn_is_valid());
    }

    #[test]
    fn test_complete_placement_locks_and_advances() {
        let mut field = field_with_seed(11);
        let kind = field.falling_piece();
        let next = field.next_piece();
        let (cleared, result) = field.complete_placement(Placement::new(kind, 0, 0, 0));
        assert_eq!(cleared, 0);
        assert!(result.is_ok());
        assert_eq!(field.falling_piece(), next);

        let occupied = field.board().rows().flatten().filter(|&&c| c != 0).count();
        assert_eq!(occupied, 4);
        assert!(field.board().is_occupied(0, 19) || field.board().is_occupied(1, 19));
    }

    #[test]
    fn test_complete_placement_rejects_other_piece() {
        let mut field = field_with_seed(11);
        let other = PieceKind::ALL
            .into_iter()
            .find(|&kind| kind != field.falling_piece())
            .unwrap();
        let before = field.board().clone();
        let (cleared, result) = field.complete_placement(Placement::new(other, 0, 0, 0));
        assert_eq!(cleared, 0);
        assert!(matches!(
            result,
            Err(CompletePlacementError::PieceMismatch { .. })
        ));
        assert_eq!(field.board(), &before);
    }

    #[test]
    fn test_complete_placement_rejects_out_of_range_column() {
        let mut field = field_with_seed(11);
        let kind = field.falling_piece();
        let (_, result) = field.complete_placement(Placement::new(kind, 0, 9, 0));
        assert!(matches!(
            result,
            Err(CompletePlacementError::InvalidPlacement)
        ));
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut field = field_with_seed(21);
        let mut result = Ok(());
        for _ in 0..40 {
            let kind = field.falling_piece();
            // Stack everything in the spawn columns until the spawn point is blocked.
            let (_, r) = field.complete_placement(Placement::new(kind, 0, 3, 0));
            result = r;
            if result.is_err() {
                break;
            }
        }
        assert!(matches!(
            result,
            Err(CompletePlacementError::NewPieceCollision)
        ));
        assert!(!field.spawn_is_valid());
    }
}
