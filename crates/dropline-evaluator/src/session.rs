//! Playing whole games with the placement search.

use dropline_engine::{Board, CompletePlacementError, GameField, GameStats};
use serde::Serialize;
use tracing::debug;

use crate::placement_search::PlacementSearch;

/// Why a session stopped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    /// The next piece could not spawn.
    #[display("top out")]
    TopOut,
    /// The search found no legal placement for the falling piece.
    #[display("no feasible placement")]
    NoFeasiblePlacement,
    /// The configured number of pieces was placed.
    #[display("piece limit reached")]
    PieceLimit,
}

/// Result of [`PlacementSearch::play_session`].
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    stats: GameStats,
    end: SessionEnd,
    final_board: Board,
}

impl SessionOutcome {
    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn end(&self) -> SessionEnd {
        self.end
    }

    #[must_use]
    pub fn final_board(&self) -> &Board {
        &self.final_board
    }
}

impl PlacementSearch<'_> {
    /// Repeatedly places the falling piece at its best placement until the game ends
    /// or `max_pieces` pieces have been placed.
    ///
    /// # Panics
    ///
    /// Panics if the field rejects a placement the search produced for its own board.
    #[must_use]
    pub fn play_session(&self, field: &mut GameField, max_pieces: Option<usize>) -> SessionOutcome {
        let mut stats = GameStats::new();
        let end = loop {
            if max_pieces.is_some_and(|limit| stats.completed_pieces() >= limit) {
                break SessionEnd::PieceLimit;
            }
            let Some(result) = self.best_placement(field.board(), field.falling_piece()) else {
                break SessionEnd::NoFeasiblePlacement;
            };
            let (cleared_lines, outcome) = field.complete_placement(result.placement());
            match outcome {
                Ok(()) => stats.complete_piece_drop(cleared_lines),
                Err(CompletePlacementError::NewPieceCollision) => {
                    stats.complete_piece_drop(cleared_lines);
                    break SessionEnd::TopOut;
                }
                Err(err) => panic!("field rejected a searched placement: {err}"),
            }
        };
        debug!(
            %end,
            pieces = stats.completed_pieces(),
            lines = stats.total_cleared_lines(),
            score = stats.score(),
            "session finished"
        );
        SessionOutcome {
            stats,
            end,
            final_board: field.board().clone(),
        }
    }
}
