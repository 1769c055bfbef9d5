//! Player side representation.

/// The two players in the endgame.
///
/// The attacker holds king and rook and must force checkmate; the defender
/// holds a lone king. The attacker moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    Attacker = 0,
    Defender = 1,
}

impl Side {
    /// Returns the opposite side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    /// Returns the index (0 for the attacker, 1 for the defender).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Attacker => write!(f, "X"),
            Side::Defender => write!(f, "Y"),
        }
    }
}
