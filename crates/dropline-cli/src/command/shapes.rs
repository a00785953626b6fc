use std::io::Write as _;

use anyhow::Context;
use dropline_engine::PieceKind;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShapesArg {
    /// Only print this piece
    #[arg(long)]
    piece: Option<PieceKind>,
}

pub(crate) fn run(arg: &ShapesArg) -> anyhow::Result<()> {
    let kinds = match arg.piece {
        Some(kind) => vec![kind],
        None => PieceKind::ALL.to_vec(),
    };
    let mut output = Output::stdout();
    for kind in kinds {
        write!(output, "{}", render(kind))
            .with_context(|| format!("Failed to write to {}", output.display_path()))?;
    }
    output
        .flush()
        .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
    Ok(())
}

fn render(kind: PieceKind) -> String {
    let rotations = kind.rotations();
    let body = rotations
        .iter()
        .enumerate()
        .map(|(index, matrix)| format!("[{index}]\n{matrix}\n\n"))
        .collect::<String>();
    format!("{kind}: {} rotation(s)\n{body}", rotations.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_rotation() {
        assert_eq!(render(PieceKind::O), "O: 1 rotation(s)\n[0]\n##\n##\n\n");
        let i = render(PieceKind::I);
        assert_eq!(i, "I: 2 rotation(s)\n[0]\n####\n\n[1]\n#\n#\n#\n#\n\n");
    }

    #[test]
    fn test_render_every_piece() {
        for kind in PieceKind::ALL {
            let text = render(kind);
            let count = kind.rotations().len();
            assert!(text.starts_with(&format!("{kind}: {count} rotation(s)\n")));
            assert_eq!(text.matches('#').count(), 4 * count, "{text}");
            assert!(text.contains(&format!("[{}]", count - 1)), "{text}");
        }
    }
}
