//! Board simulation for the dropline placement agent.
//!
//! [`core`] holds the pure data model (pieces and their rotations, the board,
//! placements) and [`engine`] the stateful game built on top of it.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum CompletePlacementError {
    #[display("placement is for {placed} but the falling piece is {falling}")]
    PieceMismatch { placed: PieceKind, falling: PieceKind },
    #[display("placement does not fit on the board")]
    InvalidPlacement,
    #[display("new piece collides at the spawn point")]
    NewPieceCollision,
}
