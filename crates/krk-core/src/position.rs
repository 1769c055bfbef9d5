//! Board position representation.

use crate::Square;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when constructing a position.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    #[error("two pieces occupy {0}")]
    Overlap(Square),
}

/// A board position: the attacker's king and rook, and the defender's king.
///
/// `rook_x` is `None` once the rook has been captured. Positions are plain
/// values; applying a move produces a new position rather than mutating in
/// place, so speculative search can never corrupt the live game state.
///
/// Construction via [`Position::new`] rejects overlapping pieces.
/// Game-rule invariants (the kings are never adjacent, the defender is never
/// left in check after its own move) are maintained by the legality engine,
/// not by this type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// The attacker's king.
    pub king_x: Square,
    /// The attacker's rook, if not yet captured.
    pub rook_x: Option<Square>,
    /// The defender's king.
    pub king_y: Square,
}

impl Position {
    /// Creates a position, rejecting overlapping pieces.
    pub fn new(
        king_x: Square,
        rook_x: Option<Square>,
        king_y: Square,
    ) -> Result<Self, PositionError> {
        let position = Position {
            king_x,
            rook_x,
            king_y,
        };
        if king_x == king_y {
            return Err(PositionError::Overlap(king_x));
        }
        if let Some(rook) = rook_x {
            if rook == king_x || rook == king_y {
                return Err(PositionError::Overlap(rook));
            }
        }
        Ok(position)
    }

    /// Returns true if all present pieces occupy distinct squares.
    ///
    /// Square types are range-checked by construction, so distinctness is
    /// the only structural invariant left to verify.
    pub fn is_valid(&self) -> bool {
        if self.king_x == self.king_y {
            return false;
        }
        match self.rook_x {
            Some(rook) => rook != self.king_x && rook != self.king_y,
            None => true,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rook_x {
            Some(rook) => write!(f, "K{} R{} k{}", self.king_x, rook, self.king_y),
            None => write!(f, "K{} k{}", self.king_x, self.king_y),
        }
    }
}
