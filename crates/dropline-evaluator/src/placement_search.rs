//! Placement search: choosing where the current piece should go.
//!
//! For one piece the search tries every distinct orientation and every column the
//! orientation fits in, hard drops it, simulates the lock on a copy of the board and scores
//! the result with a [`PlacementEvaluator`]. The highest score wins.
//!
//! # Order and ties
//!
//! Candidates are visited rotation by rotation in ascending index order and, within a
//! rotation, column by column from the left. A candidate replaces the current best only if
//! its score is strictly greater, so among equal scores the first one visited is kept: the
//! lowest rotation index, then the leftmost column.
//!
//! # Lookahead
//!
//! The search is greedy. It does not look at the next piece and does not consider slides
//! or spins; only straight drops from the top are generated.

use dropline_engine::{Board, PieceKind, Placement};
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{Evaluation, HeuristicEvaluator, PlacementEvaluator},
};

/// Every feasible hard-drop placement of `kind`, in search order.
///
/// Columns run from 0 to `board.width() - matrix.width()` for each orientation. Columns
/// where the piece cannot even enter the board are skipped.
pub fn candidate_placements(
    board: &Board,
    kind: PieceKind,
) -> impl Iterator<Item = Placement> + '_ {
    kind.rotations()
        .iter()
        .enumerate()
        .flat_map(move |(rotation, matrix)| {
            let last_column = board.width() - matrix.width();
            (0..=last_column)
                .filter_map(move |column| Placement::hard_drop(board, kind, rotation, column))
        })
}

/// The winning placement of a search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    placement: Placement,
    evaluation: Evaluation,
    resulting_board: Board,
}

impl SearchResult {
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    #[must_use]
    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// The board after locking the placement and clearing full rows.
    #[must_use]
    pub fn resulting_board(&self) -> &Board {
        &self.resulting_board
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.evaluation.score()
    }
}

/// Selects the best placement of a piece using a [`PlacementEvaluator`].
#[derive(Debug)]
pub struct PlacementSearch<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl Default for PlacementSearch<'_> {
    fn default() -> Self {
        Self::new(Box::new(HeuristicEvaluator))
    }
}

impl<'a> PlacementSearch<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Finds the best placement of `kind` on `board`.
    ///
    /// `board` is not modified. Returns `None` if no orientation fits in any column.
    #[must_use]
    pub fn best_placement(&self, board: &Board, kind: PieceKind) -> Option<SearchResult> {
        let mut best: Option<(f64, PlacementAnalysis)> = None;

        for placement in candidate_placements(board, kind) {
            let analysis = PlacementAnalysis::from_board(board, placement);
            let score = self.placement_evaluator.evaluate_placement(&analysis);
            trace!(
                piece = %kind,
                rotation = placement.rotation(),
                column = placement.column(),
                row = placement.row(),
                score,
                "candidate"
            );
            if best
                .as_ref()
                .is_none_or(|(best_score, _)| score > *best_score)
            {
                best = Some((score, analysis));
            }
        }

        let Some((score, analysis)) = best else {
            debug!(piece = %kind, "no feasible placement");
            return None;
        };
        let placement = analysis.placement();
        debug!(
            piece = %kind,
            rotation = placement.rotation(),
            column = placement.column(),
            row = placement.row(),
            score,
            cleared_lines = analysis.cleared_lines(),
            "selected placement"
        );
        Some(SearchResult {
            placement,
            evaluation: Evaluation::with_score(score, &analysis),
            resulting_board: analysis.into_board(),
        })
    }
}

#[cfg(test)]
mod tests {
    use dropline_engine::BoardSize;

    use super::*;

    fn board(art: &str) -> Board {
        Board::from_ascii_bottom(BoardSize::STANDARD, art).unwrap()
    }

    /// Scores every placement the same.
    #[derive(Debug)]
    struct ConstantEvaluator;

    impl PlacementEvaluator for ConstantEvaluator {
        fn evaluate_placement(&self, _analysis: &PlacementAnalysis) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_candidate_counts_on_empty_board() {
        let board = Board::default();
        // I: flat 7 columns + upright 10 columns.
        assert_eq!(candidate_placements(&board, PieceKind::I).count(), 7 + 10);
        assert_eq!(candidate_placements(&board, PieceKind::O).count(), 9);
        assert_eq!(candidate_placements(&board, PieceKind::T).count(), 8 + 9 + 8 + 9);
        assert_eq!(candidate_placements(&board, PieceKind::S).count(), 8 + 9);
    }

    #[test]
    fn test_candidate_order() {
        let board = Board::default();
        let order = candidate_placements(&board, PieceKind::O)
            .map(|p| (p.rotation(), p.column()))
            .collect::<Vec<_>>();
        assert_eq!(order, (0..9).map(|c| (0, c)).collect::<Vec<_>>());
        let first_upright = candidate_placements(&board, PieceKind::I)
            .find(|p| p.rotation() == 1)
            .unwrap();
        assert_eq!(first_upright.column(), 0);
    }

    #[test]
    fn test_empty_board_prefers_flat_i_on_the_left() {
        let search = PlacementSearch::default();
        let result = search.best_placement(&Board::default(), PieceKind::I).unwrap();
        assert_eq!(result.placement().rotation(), 0);
        assert_eq!(result.placement().column(), 0);
        assert_eq!(result.placement().row(), 19);
        assert_eq!(result.evaluation().aggregate_height(), 4);
        assert_eq!(result.evaluation().bumpiness(), 1);
        assert_eq!(result.evaluation().holes(), 0);
    }

    #[test]
    fn test_takes_the_line_clear() {
        let board = board(
            "
            #########.
            #########.
            #########.
            #########.
            ",
        );
        let result = PlacementSearch::default()
            .best_placement(&board, PieceKind::I)
            .unwrap();
        assert_eq!(result.placement().rotation(), 1);
        assert_eq!(result.placement().column(), 9);
        assert_eq!(result.evaluation().lines_cleared(), 4);
        assert_eq!(result.resulting_board(), &Board::default());
    }

    #[test]
    fn test_flat_i_completes_single_line() {
        let board = board(
            "
            ######....
            ",
        );
        let result = PlacementSearch::default()
            .best_placement(&board, PieceKind::I)
            .unwrap();
        let placement = result.placement();
        assert_eq!((placement.rotation(), placement.column()), (0, 6));
        assert_eq!(placement.row(), 19);
        assert_eq!(result.evaluation().lines_cleared(), 1);
        assert_eq!(result.evaluation().aggregate_height(), 0);
        // Only the line term is left on the cleared board.
        assert_eq!(
            result.score().to_bits(),
            HeuristicEvaluator::LINES_CLEARED_WEIGHT.to_bits()
        );
        assert_eq!(result.resulting_board(), &Board::default());
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let search = PlacementSearch::new(Box::new(ConstantEvaluator));
        let result = search.best_placement(&Board::default(), PieceKind::T).unwrap();
        assert_eq!(result.placement().rotation(), 0);
        assert_eq!(result.placement().column(), 0);
        assert_eq!(result.score().to_bits(), 1.0_f64.to_bits());
    }

    #[test]
    fn test_search_does_not_modify_board() {
        let board = board(
            "
            ..#.......
            .###..##..
            ",
        );
        let snapshot = board.clone();
        for kind in PieceKind::ALL {
            let _ = PlacementSearch::default().best_placement(&board, kind);
        }
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_best_score_is_maximum() {
        let board = board(
            "
            ....#.....
            #..###..#.
            ##.####.##
            ",
        );
        let search = PlacementSearch::default();
        for kind in PieceKind::ALL {
            let result = search.best_placement(&board, kind).unwrap();
            for placement in candidate_placements(&board, kind) {
                let analysis = PlacementAnalysis::from_board(&board, placement);
                assert!(HeuristicEvaluator.evaluate_placement(&analysis) <= result.score());
            }
        }
    }

    #[test]
    fn test_full_board_has_no_placement() {
        let size = BoardSize::new(4, 4).unwrap();
        let board = Board::from_ascii_bottom(
            size,
            "
            I.I.
            I.I.
            I.I.
            I.I.
            ",
        )
        .unwrap();
        // Only single-column gaps remain: everything but the upright I is blocked.
        for kind in PieceKind::ALL {
            let result = PlacementSearch::default().best_placement(&board, kind);
            assert_eq!(result.is_some(), kind == PieceKind::I, "{kind}");
        }

        let full = Board::from_ascii("IIII\nIIII\nIIII\nIIII\n.III").unwrap();
        for kind in PieceKind::ALL {
            assert!(PlacementSearch::default().best_placement(&full, kind).is_none());
        }
    }
}
