//! Move representation.

use crate::{Side, Square};
use std::fmt;

/// A move in the endgame, tagged by the piece being moved.
///
/// Moves carry only their destination; each side has at most one piece of
/// each kind, so the source is implied by the position the move is applied
/// to. A defender move onto the rook's square captures the rook.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// The attacker's king moves to the given square.
    King(Square),
    /// The attacker's rook moves to the given square.
    Rook(Square),
    /// The defender's king moves to the given square.
    DefenderKing(Square),
}

impl Move {
    /// Returns the destination square.
    #[inline]
    pub const fn destination(self) -> Square {
        match self {
            Move::King(sq) | Move::Rook(sq) | Move::DefenderKing(sq) => sq,
        }
    }

    /// Returns the side making this move.
    #[inline]
    pub const fn side(self) -> Side {
        match self {
            Move::King(_) | Move::Rook(_) => Side::Attacker,
            Move::DefenderKing(_) => Side::Defender,
        }
    }

    /// Returns the piece letter used in notation ('K', 'R', or 'k').
    #[inline]
    pub const fn piece_char(self) -> char {
        match self {
            Move::King(_) => 'K',
            Move::Rook(_) => 'R',
            Move::DefenderKing(_) => 'k',
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.piece_char(), self.destination())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.piece_char(), self.destination())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_destination() {
        assert_eq!(Move::King(Square::A1).destination(), Square::A1);
        assert_eq!(Move::Rook(Square::H8).destination(), Square::H8);
        assert_eq!(Move::DefenderKing(Square::D5).destination(), Square::D5);
    }

    #[test]
    fn move_side() {
        assert_eq!(Move::King(Square::A1).side(), Side::Attacker);
        assert_eq!(Move::Rook(Square::A1).side(), Side::Attacker);
        assert_eq!(Move::DefenderKing(Square::A1).side(), Side::Defender);
    }

    #[test]
    fn move_display() {
        assert_eq!(format!("{}", Move::King(Square::E4)), "Ke4");
        assert_eq!(format!("{}", Move::Rook(Square::H1)), "Rh1");
        assert_eq!(format!("{}", Move::DefenderKing(Square::A8)), "ka8");
        assert_eq!(format!("{:?}", Move::Rook(Square::H1)), "Move(Rh1)");
    }
}
