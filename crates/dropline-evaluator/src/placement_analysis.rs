//! Analysis of the board state after a piece placement.
//!
//! [`PlacementAnalysis`] captures what a placement does: how many lines it clears and the
//! shape of the board left behind. The caller's board is never modified; the placement is
//! simulated on a copy.
//!
//! ```
//! use dropline_engine::{Board, PieceKind, Placement};
//! use dropline_evaluator::PlacementAnalysis;
//!
//! let board = Board::default();
//! let placement = Placement::hard_drop(&board, PieceKind::O, 0, 0).unwrap();
//! let analysis = PlacementAnalysis::from_board(&board, placement);
//! assert_eq!(analysis.cleared_lines(), 0);
//! assert_eq!(analysis.aggregate_height(), 4);
//! ```

use dropline_engine::{Board, ColumnStats, Placement};

use crate::placement_evaluator::{aggregate_height, bumpiness};

#[derive(Debug, Clone)]
pub struct PlacementAnalysis {
    placement: Placement,
    cleared_lines: usize,
    board: Board,
    column_stats: ColumnStats,
}

impl PlacementAnalysis {
    /// Locks `placement` into a copy of `before_placement`, clears full rows and measures the
    /// resulting board.
    #[must_use]
    pub fn from_board(before_placement: &Board, placement: Placement) -> Self {
        let mut board = before_placement.clone();
        board.lock_piece(placement.matrix(), placement.position(), placement.kind());
        let cleared_lines = board.clear_lines_in_place();
        let column_stats = board.heights_and_holes();

        Self {
            placement,
            cleared_lines,
            board,
            column_stats,
        }
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// The board after the piece was locked and full rows were cleared.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    #[must_use]
    pub fn column_heights(&self) -> &[u8] {
        self.column_stats.heights()
    }

    #[must_use]
    pub fn aggregate_height(&self) -> usize {
        aggregate_height(self.column_stats.heights())
    }

    #[must_use]
    pub fn num_holes(&self) -> usize {
        self.column_stats.holes()
    }

    #[must_use]
    pub fn bumpiness(&self) -> usize {
        bumpiness(self.column_stats.heights())
    }
}
