//! Placement scoring and search for the dropline engine.
//!
//! The crate is layered bottom-up:
//!
//! 1. **Placement analysis** ([`placement_analysis`]) - Simulates a single placement on a
//!    copy of the board (lock, clear lines) and measures the result.
//! 2. **Placement evaluation** ([`placement_evaluator`]) - Turns an analysis into a score.
//!    [`HeuristicEvaluator`] is the fixed four-term linear heuristic.
//! 3. **Placement search** ([`placement_search`]) - Enumerates every hard-drop placement of a
//!    piece, scores each one and keeps the best under a deterministic tie-break.
//! 4. **Sessions** ([`session`]) - Drives a [`GameField`](dropline_engine::GameField) with the
//!    search until the game ends or a piece limit is reached.
//!
//! ```text
//! Session (play a whole game)
//!     ↓ uses
//! Placement search (pick the best placement for one piece)
//!     ↓ uses
//! Placement evaluation (score one simulated placement)
//! ```
//!
//! # Example
//!
//! ```
//! use dropline_engine::{Board, PieceKind};
//! use dropline_evaluator::PlacementSearch;
//!
//! let search = PlacementSearch::default();
//! let result = search.best_placement(&Board::default(), PieceKind::I).unwrap();
//! assert_eq!(result.placement().rotation(), 0);
//! assert_eq!(result.placement().column(), 0);
//! ```

pub use self::{placement_analysis::*, placement_evaluator::*, placement_search::*, session::*};

pub mod placement_analysis;
pub mod placement_evaluator;
pub mod placement_search;
pub mod session;
