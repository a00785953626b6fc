//! Game state driven by the placement search.
//!
//! - [`GameField`] - the authoritative board, the falling piece and the piece supply
//! - [`GameStats`] - score, level and line clear statistics
//! - [`PieceBag`] - 7-bag piece generation
//!
//! # Game Flow
//!
//! 1. Initialize [`GameField`] with a [`PieceBag`]
//! 2. Choose a rotation and column for the falling piece
//! 3. [`GameField::complete_placement`] hard drops, locks and clears lines
//! 4. The next piece spawns; the game ends when it collides at the spawn point
//!
//! # Example
//!
//! ```
//! use dropline_engine::{BoardSize, GameField, GameStats, PieceBag, Placement};
//!
//! let mut field = GameField::new(BoardSize::STANDARD, PieceBag::with_seed(1));
//! let mut stats = GameStats::new();
//!
//! let placement = Placement::new(field.falling_piece(), 0, 0, 0);
//! let (cleared_lines, result) = field.complete_placement(placement);
//! stats.complete_piece_drop(cleared_lines);
//!
//! assert!(result.is_ok());
//! assert_eq!(stats.completed_pieces(), 1);
//! ```

pub use self::{game_field::*, game_stats::*, piece_bag::*};

mod game_field;
mod game_stats;
mod piece_bag;
