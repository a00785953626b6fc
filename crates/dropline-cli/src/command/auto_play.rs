use std::path::PathBuf;

use dropline_engine::{GameField, PieceBag};
use dropline_evaluator::PlacementSearch;
use tracing::{info, warn};

use crate::{
    schema::session::{SessionConfig, SessionReport},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Session config file (JSON); the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board width
    #[arg(long)]
    width: Option<usize>,
    /// Board height
    #[arg(long)]
    height: Option<usize>,
    /// Seed for the piece bag (drawn at random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many pieces have been placed
    #[arg(long)]
    max_pieces: Option<usize>,
    /// Output file path for the session report (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl AutoPlayArg {
    fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("session config", path)?,
            None => SessionConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_pieces) = self.max_pieces {
            config.max_pieces = Some(max_pieces);
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let config = arg.session_config()?;
    let size = config.board_size()?;
    let seed = config.seed.unwrap_or_else(rand::random);

    info!(
        width = size.width(),
        height = size.height(),
        seed,
        max_pieces = ?config.max_pieces,
        "Starting session"
    );
    if config.max_pieces.is_none() {
        warn!("No piece limit set; the session runs until the game ends");
    }

    let mut field = GameField::new(size, PieceBag::with_seed(seed));
    let outcome = PlacementSearch::default().play_session(&mut field, config.max_pieces);
    let stats = outcome.stats();
    info!(
        end = %outcome.end(),
        pieces = stats.completed_pieces(),
        lines = stats.total_cleared_lines(),
        level = stats.level(),
        score = stats.score(),
        "Session finished"
    );

    let report = SessionReport::new(
        SessionConfig {
            seed: Some(seed),
            ..config
        },
        &outcome,
    );
    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_json(&report)?;
    info!("Wrote session report to {}", output.display_path());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let path =
            std::env::temp_dir().join(format!("dropline-config-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"width": 12, "height": 24, "seed": 5, "max_pieces": 50}"#,
        )
        .unwrap();

        let arg = AutoPlayArg {
            config: Some(path.clone()),
            height: Some(22),
            max_pieces: Some(10),
            ..AutoPlayArg::default()
        };
        let config = arg.session_config().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            config,
            SessionConfig {
                width: 12,
                height: 22,
                seed: Some(5),
                max_pieces: Some(10),
            }
        );
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let arg = AutoPlayArg {
            config: Some(PathBuf::from("/nonexistent/dropline.json")),
            ..AutoPlayArg::default()
        };
        let err = arg.session_config().unwrap_err();
        assert!(err.to_string().contains("session config"), "{err}");
    }

    #[test]
    fn test_defaults_without_config_file() {
        let config = AutoPlayArg::default().session_config().unwrap();
        assert_eq!(config, SessionConfig::default());
    }
}
