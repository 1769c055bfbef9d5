//! Core types for the king-and-rook versus king endgame.
//!
//! This crate provides the fundamental types used across the endgame engine:
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Side`] for the two players
//! - [`Move`] for move representation
//! - [`Position`] for the three-piece board state

mod mov;
mod position;
mod side;
mod square;

pub use mov::Move;
pub use position::{Position, PositionError};
pub use side::Side;
pub use square::{File, Rank, Square};
