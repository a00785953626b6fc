pub use self::{board::*, piece::*, placement::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod placement;

/// Converts a board extent or matrix offset to a signed coordinate.
///
/// Board extents are capped at [`MAX_BOARD_EXTENT`], so the value always fits.
#[expect(clippy::cast_possible_wrap)]
pub(crate) const fn signed(value: usize) -> isize {
    value as isize
}
