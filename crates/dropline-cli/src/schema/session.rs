use chrono::{DateTime, Utc};
use dropline_engine::{Board, BoardSize, GameStats};
use dropline_evaluator::{SessionEnd, SessionOutcome};
use serde::{Deserialize, Serialize};

/// Parameters of a headless session, as read from a config file.
///
/// Missing fields take their defaults: a 10x20 board, an OS-drawn seed and no
/// piece limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub max_pieces: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let size = BoardSize::STANDARD;
        Self {
            width: size.width(),
            height: size.height(),
            seed: None,
            max_pieces: None,
        }
    }
}

impl SessionConfig {
    pub fn board_size(&self) -> anyhow::Result<BoardSize> {
        Ok(BoardSize::new(self.width, self.height)?)
    }
}

/// Result of a headless session, written as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Timestamp when the report was created (ISO 8601 format)
    pub generated_at: DateTime<Utc>,
    /// Effective configuration, with the seed that was actually used
    pub config: SessionConfig,
    pub end: SessionEnd,
    pub stats: GameStats,
    pub final_board: Board,
}

impl SessionReport {
    pub fn new(config: SessionConfig, outcome: &SessionOutcome) -> Self {
        Self {
            generated_at: Utc::now(),
            config,
            end: outcome.end(),
            stats: outcome.stats().clone(),
            final_board: outcome.final_board().clone(),
        }
    }
}
