use std::path::PathBuf;

use anyhow::{Context, bail};
use dropline_engine::{Board, PieceKind};
use dropline_evaluator::{PlacementSearch, SearchResult};
use tracing::info;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BestMoveArg {
    /// Piece to place (I, O, T, S, Z, J or L)
    #[arg(long)]
    piece: PieceKind,
    /// Board as ASCII art, top row first: `.` is empty, `#` or a piece letter is occupied
    board_file: PathBuf,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BestMoveArg) -> anyhow::Result<()> {
    let BestMoveArg {
        piece,
        board_file,
        output,
    } = arg;

    let art = util::read_text_file("board", board_file)?;
    let board = Board::from_ascii(&art)
        .with_context(|| format!("Failed to parse board file: {}", board_file.display()))?;
    let result = search(&board, *piece)?;

    let placement = result.placement();
    info!(
        rotation = placement.rotation(),
        column = placement.column(),
        row = placement.row(),
        score = result.score(),
        "Best placement for {piece}"
    );
    let mut output = Output::from_output_path(output.clone())?;
    output.write_json(&result)?;
    Ok(())
}

fn search(board: &Board, piece: PieceKind) -> anyhow::Result<SearchResult> {
    let Some(result) = PlacementSearch::default().best_placement(board, piece) else {
        bail!("No feasible placement for {piece} on this board");
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_reports_blocked_board() {
        let board = Board::from_ascii("OOOO\nOOOO\nOOOO\nOOOO\n.OOO").unwrap();
        let err = search(&board, PieceKind::T).unwrap_err();
        assert_eq!(err.to_string(), "No feasible placement for T on this board");
    }

    #[test]
    fn test_search_result_json() {
        let board = Board::from_ascii(
            "
            ....
            ....
            ....
            ##..
            ",
        )
        .unwrap();
        let result = search(&board, PieceKind::O).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["placement"]["kind"], "O");
        assert_eq!(json["placement"]["column"], 2);
        assert_eq!(json["evaluation"]["lines_cleared"], 1);
        assert_eq!(json["resulting_board"], "..../..../..../..OO");
    }
}
