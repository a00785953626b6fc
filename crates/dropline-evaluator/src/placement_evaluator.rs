//! Placement evaluation: scoring a single simulated placement.
//!
//! A [`PlacementEvaluator`] maps a [`PlacementAnalysis`] to a score, higher is better. The
//! search only compares scores, so their absolute scale carries no meaning.
//!
//! # Heuristic
//!
//! [`HeuristicEvaluator`] is a fixed linear combination of four board measurements taken
//! after the placement has been locked and full rows cleared:
//!
//! ```text
//! score = -0.51066   * aggregate_height
//!       + 0.760666   * lines_cleared
//!       - 0.35663    * holes
//!       - 0.184483   * bumpiness
//! ```
//!
//! - `aggregate_height` is the sum of all column heights.
//! - `lines_cleared` is the number of rows the placement completed.
//! - `holes` counts empty cells below the top of their column.
//! - `bumpiness` is the sum of absolute height differences between neighbouring columns.
//!
//! The weights are not tuned at runtime.

use std::fmt;

use dropline_engine::Board;
use serde::Serialize;

use crate::placement_analysis::PlacementAnalysis;

/// Evaluates piece placements by assigning scores.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Returns the score of the analyzed placement (higher is better).
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64;
}

/// Sum of all column heights.
#[must_use]
pub fn aggregate_height(heights: &[u8]) -> usize {
    heights.iter().map(|&h| usize::from(h)).sum()
}

/// Sum of absolute height differences between adjacent columns.
#[must_use]
pub fn bumpiness(heights: &[u8]) -> usize {
    heights
        .windows(2)
        .map(|pair| usize::from(pair[0].abs_diff(pair[1])))
        .sum()
}

/// The four-term linear heuristic with fixed weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEvaluator;

impl HeuristicEvaluator {
    pub const AGGREGATE_HEIGHT_WEIGHT: f64 = -0.51066;
    pub const LINES_CLEARED_WEIGHT: f64 = 0.760_666;
    pub const HOLES_WEIGHT: f64 = -0.35663;
    pub const BUMPINESS_WEIGHT: f64 = -0.184_483;

    /// Combines the four measurements into a score.
    #[must_use]
    pub fn score(
        aggregate_height: usize,
        lines_cleared: usize,
        holes: usize,
        bumpiness: usize,
    ) -> f64 {
        Self::AGGREGATE_HEIGHT_WEIGHT * as_f64(aggregate_height)
            + Self::LINES_CLEARED_WEIGHT * as_f64(lines_cleared)
            + Self::HOLES_WEIGHT * as_f64(holes)
            + Self::BUMPINESS_WEIGHT * as_f64(bumpiness)
    }

    /// Scores a board that is already the result of a placement which cleared
    /// `lines_cleared` rows.
    #[must_use]
    pub fn evaluate(&self, board: &Board, lines_cleared: usize) -> f64 {
        self.analyze(board, lines_cleared).score()
    }

    /// Like [`HeuristicEvaluator::evaluate`], but also returns the individual measurements.
    #[must_use]
    pub fn analyze(&self, board: &Board, lines_cleared: usize) -> Evaluation {
        let stats = board.heights_and_holes();
        Evaluation::new(
            aggregate_height(stats.heights()),
            lines_cleared,
            stats.holes(),
            bumpiness(stats.heights()),
        )
    }
}

impl PlacementEvaluator for HeuristicEvaluator {
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64 {
        Self::score(
            analysis.aggregate_height(),
            analysis.cleared_lines(),
            analysis.num_holes(),
            analysis.bumpiness(),
        )
    }
}

#[expect(clippy::cast_precision_loss)]
fn as_f64(value: usize) -> f64 {
    value as f64
}

/// A heuristic score together with the measurements it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    score: f64,
    aggregate_height: usize,
    lines_cleared: usize,
    holes: usize,
    bumpiness: usize,
}

impl Evaluation {
    #[must_use]
    pub fn new(
        aggregate_height: usize,
        lines_cleared: usize,
        holes: usize,
        bumpiness: usize,
    ) -> Self {
        Self {
            score: HeuristicEvaluator::score(aggregate_height, lines_cleared, holes, bumpiness),
            aggregate_height,
            lines_cleared,
            holes,
            bumpiness,
        }
    }

    /// Measurements of `analysis` with the score supplied by some other evaluator.
    #[must_use]
    pub fn with_score(score: f64, analysis: &PlacementAnalysis) -> Self {
        Self {
            score,
            aggregate_height: analysis.aggregate_height(),
            lines_cleared: analysis.cleared_lines(),
            holes: analysis.num_holes(),
            bumpiness: analysis.bumpiness(),
        }
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn aggregate_height(&self) -> usize {
        self.aggregate_height
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    #[must_use]
    pub fn holes(&self) -> usize {
        self.holes
    }

    #[must_use]
    pub fn bumpiness(&self) -> usize {
        self.bumpiness
    }
}

#[cfg(test)]
mod tests {
    use dropline_engine::BoardSize;

    use super::*;

    fn board(art: &str) -> Board {
        Board::from_ascii_bottom(BoardSize::STANDARD, art).unwrap()
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let evaluator = HeuristicEvaluator;
        assert!(evaluator.evaluate(&Board::default(), 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_matches_formula() {
        let board = board(
            "
            .#........
            ###.#.....
            ###.##....
            ",
        );
        let evaluation = HeuristicEvaluator.analyze(&board, 1);
        // heights 2 3 2 0 2 1 0 0 0 0
        assert_eq!(evaluation.aggregate_height(), 10);
        assert_eq!(evaluation.holes(), 0);
        assert_eq!(evaluation.bumpiness(), 1 + 1 + 2 + 2 + 1 + 1);
        let expected = -0.51066 * 10.0 + 0.760_666 * 1.0 - 0.35663 * 0.0 - 0.184_483 * 8.0;
        assert!((evaluation.score() - expected).abs() < 1e-12);
        assert_eq!(
            HeuristicEvaluator.evaluate(&board, 1).to_bits(),
            evaluation.score().to_bits()
        );
    }

    #[test]
    fn test_holes_lower_the_score() {
        let solid = board(
            "
            ##........
            ##........
            ",
        );
        let hollow = board(
            "
            ##........
            .#........
            ",
        );
        let solid = HeuristicEvaluator.analyze(&solid, 0);
        let hollow = HeuristicEvaluator.analyze(&hollow, 0);
        assert_eq!(solid.aggregate_height(), hollow.aggregate_height());
        assert_eq!(solid.bumpiness(), hollow.bumpiness());
        assert_eq!(hollow.holes(), 1);
        assert!(hollow.score() < solid.score());
    }

    #[test]
    fn test_bumpiness_lowers_the_score() {
        let flat = board(
            "
            ###.......
            ",
        );
        let bumpy = board(
            "
            #.........
            #.#.......
            ",
        );
        let flat = HeuristicEvaluator.analyze(&flat, 0);
        let bumpy = HeuristicEvaluator.analyze(&bumpy, 0);
        assert_eq!(flat.aggregate_height(), bumpy.aggregate_height());
        assert_eq!(flat.holes(), bumpy.holes());
        assert!(bumpy.bumpiness() > flat.bumpiness());
        assert!(bumpy.score() < flat.score());
    }

    #[test]
    fn test_cleared_lines_raise_the_score() {
        let board = Board::default();
        assert!(HeuristicEvaluator.evaluate(&board, 1) > HeuristicEvaluator.evaluate(&board, 0));
        assert!(HeuristicEvaluator.evaluate(&board, 4) > HeuristicEvaluator.evaluate(&board, 3));
    }

    #[test]
    fn test_column_measurements() {
        assert_eq!(aggregate_height(&[3, 0, 2]), 5);
        assert_eq!(bumpiness(&[3, 0, 2]), 5);
        assert_eq!(bumpiness(&[4]), 0);
        assert_eq!(bumpiness(&[]), 0);
    }

    #[test]
    fn test_evaluation_serialization() {
        let evaluation = Evaluation::new(0, 0, 0, 0);
        let serialized = serde_json::to_string(&evaluation).unwrap();
        assert_eq!(
            serialized,
            r#"{"score":0.0,"aggregate_height":0,"lines_cleared":0,"holes":0,"bumpiness":0}"#
        );
    }
}
