//! Legal move generation and check detection.
//!
//! The endgame has exactly three pieces, so move generation enumerates the
//! eight king steps (edge-clipped) and the rook's two slide lines. Defender
//! moves are filtered so the defender never ends its own move in check and
//! the kings never become adjacent; a defender move onto the rook's square
//! captures the rook.

use krk_core::{Move, Position, Side, Square};

/// A list of moves with a fixed maximum capacity.
///
/// The attacker has at most 22 moves (8 king steps plus 14 rook
/// destinations) and the defender at most 8, so a fixed-size array avoids
/// heap allocation during enumeration.
#[derive(Clone)]
pub struct MoveList {
    moves: [Option<Move>; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any endgame position.
    pub const MAX_MOVES: usize = 24;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [None; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = Some(m);
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the moves.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves[..self.len].iter().map(|m| {
            // Slots below len are always filled by push.
            match m {
                Some(m) => *m,
                None => unreachable!(),
            }
        })
    }

    /// Returns true if the list contains the given move.
    pub fn contains(&self, m: Move) -> bool {
        self.iter().any(|candidate| candidate == m)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

/// King step offsets as (file, rank) deltas, in enumeration order.
const KING_STEPS: [(i8, i8); 8] = [
    (0, -1),
    (-1, -1),
    (1, -1),
    (0, 1),
    (-1, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
];

/// Returns the square one king step away, or `None` past the board edge.
fn step(from: Square, df: i8, dr: i8) -> Option<Square> {
    let file = from.file().index() as i8 + df;
    let rank = from.rank().index() as i8 + dr;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Square::from_coords(file as u8, rank as u8)
    } else {
        None
    }
}

/// Returns true if the two kings are on adjacent squares.
pub fn kings_adjacent(a: Square, b: Square) -> bool {
    let df = (a.file().index() as i8 - b.file().index() as i8).abs();
    let dr = (a.rank().index() as i8 - b.rank().index() as i8).abs();
    df <= 1 && dr <= 1 && a != b
}

/// Returns true if the defender's king is in check.
///
/// Only the rook gives check: it must share a rank or file with the
/// defender's king with no attacker king strictly between them on that
/// line. The attacker can never be in check.
pub fn in_check(position: &Position) -> bool {
    let rook = match position.rook_x {
        Some(rook) => rook,
        None => return false,
    };
    let (xf, xr) = coords(position.king_x);
    let (rf, rr) = coords(rook);
    let (yf, yr) = coords(position.king_y);

    if yr == rr {
        if yr == xr {
            // Blocked only when the attacker king is strictly between.
            !((yf < xf && xf < rf) || (rf < xf && xf < yf))
        } else {
            true
        }
    } else if yf == rf {
        if yf == xf {
            !((yr < xr && xr < rr) || (rr < xr && xr < yr))
        } else {
            true
        }
    } else {
        false
    }
}

/// Returns true if the defender is in check with no legal move.
pub fn in_checkmate(position: &Position) -> bool {
    in_check(position) && legal_moves_defender(position).is_empty()
}

/// Applies a move, returning the new position.
///
/// Pure: the input position is untouched, so speculative search can apply
/// candidate moves freely. A defender move onto the rook's square removes
/// the rook. The move is assumed legal; enumerate via [`legal_moves`] first.
pub fn apply_move(position: &Position, m: Move) -> Position {
    let mut next = *position;
    match m {
        Move::King(sq) => next.king_x = sq,
        Move::Rook(sq) => next.rook_x = Some(sq),
        Move::DefenderKing(sq) => {
            next.king_y = sq;
            if next.rook_x == Some(sq) {
                next.rook_x = None;
            }
        }
    }
    next
}

/// Enumerates legal moves for the given side.
pub fn legal_moves(position: &Position, side: Side) -> MoveList {
    match side {
        Side::Attacker => legal_moves_attacker(position),
        Side::Defender => legal_moves_defender(position),
    }
}

/// Enumerates the attacker's legal moves.
///
/// If the defender is somehow already in check on the attacker's turn
/// (an inconsistent state that a correct defender filter never produces),
/// the only move returned is the rook capturing the defender's king square.
/// The fallback is diagnostic; it is unreachable through the game driver.
pub fn legal_moves_attacker(position: &Position) -> MoveList {
    let mut moves = MoveList::new();

    if in_check(position) {
        moves.push(Move::Rook(position.king_y));
        return moves;
    }

    // King steps: stay off the rook's square and out of the defender
    // king's reach.
    for (df, dr) in KING_STEPS {
        if let Some(to) = step(position.king_x, df, dr) {
            if Some(to) != position.rook_x && !kings_adjacent(to, position.king_y) {
                moves.push(Move::King(to));
            }
        }
    }

    // Rook slides, truncated at either king. The rook cannot pass through
    // its own king, and never jumps the defender king.
    if let Some(rook) = position.rook_x {
        for (df, dr) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let mut current = rook;
            while let Some(to) = step(current, df, dr) {
                if to == position.king_x || to == position.king_y {
                    break;
                }
                moves.push(Move::Rook(to));
                current = to;
            }
        }
    }

    moves
}

/// Enumerates the defender's legal moves.
///
/// Each edge-clipped king step is kept only if the resulting position
/// leaves the defender out of check and the kings non-adjacent. Stepping
/// onto the rook's square is legal and captures the rook.
pub fn legal_moves_defender(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    for (df, dr) in KING_STEPS {
        if let Some(to) = step(position.king_y, df, dr) {
            let candidate = Move::DefenderKing(to);
            let next = apply_move(position, candidate);
            if !in_check(&next) && !kings_adjacent(next.king_x, next.king_y) {
                moves.push(candidate);
            }
        }
    }
    moves
}

#[inline]
fn coords(sq: Square) -> (u8, u8) {
    (sq.file().index(), sq.rank().index())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(king_x: &str, rook_x: Option<&str>, king_y: &str) -> Position {
        Position::new(
            Square::from_algebraic(king_x).unwrap(),
            rook_x.map(|s| Square::from_algebraic(s).unwrap()),
            Square::from_algebraic(king_y).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn attacker_moves_from_back_rank() {
        // Ka1 Rh1 ka8: the king has steps, the rook slides along rank 1
        // (stopped before a1 by its own king) and up the h-file.
        let p = pos("a1", Some("h1"), "a8");
        let moves = legal_moves_attacker(&p);

        assert!(moves.contains(Move::King(Square::from_algebraic("b1").unwrap())));
        assert!(moves.contains(Move::King(Square::from_algebraic("b2").unwrap())));
        assert!(moves.contains(Move::King(Square::A2)));

        let rook_moves = moves
            .iter()
            .filter(|m| matches!(m, Move::Rook(_)))
            .count();
        // b1..g1 on the rank plus h2..h8 on the file.
        assert_eq!(rook_moves, 13);
        assert!(moves.contains(Move::Rook(Square::from_algebraic("b1").unwrap())));
        assert!(!moves.contains(Move::Rook(Square::A1)));
        assert!(moves.contains(Move::Rook(Square::H8)));
    }

    #[test]
    fn king_cannot_approach_defender() {
        let p = pos("c4", Some("h1"), "c6");
        let moves = legal_moves_attacker(&p);
        // b5, c5, d5 are adjacent to the defender king on c6.
        for target in ["b5", "c5", "d5"] {
            let to = Square::from_algebraic(target).unwrap();
            assert!(!moves.contains(Move::King(to)), "{target} should be illegal");
        }
        assert!(moves.contains(Move::King(Square::from_algebraic("b4").unwrap())));
    }

    #[test]
    fn rook_blocked_by_own_king() {
        let p = pos("d4", Some("h4"), "a8");
        let moves = legal_moves_attacker(&p);
        // Rank slide left stops before d4.
        assert!(moves.contains(Move::Rook(Square::from_algebraic("e4").unwrap())));
        assert!(!moves.contains(Move::Rook(Square::D4)));
        assert!(!moves.contains(Move::Rook(Square::from_algebraic("c4").unwrap())));
    }

    #[test]
    fn check_detection() {
        assert!(in_check(&pos("a1", Some("h8"), "c8")));
        assert!(in_check(&pos("a1", Some("d1"), "d7")));
        assert!(!in_check(&pos("a1", Some("h8"), "c7")));
        // Attacker king strictly between rook and defender blocks the line.
        assert!(!in_check(&pos("d4", Some("d1"), "d7")));
        // King on the line but not between does not block.
        assert!(in_check(&pos("d8", Some("d1"), "d6")));
        // No rook, no check.
        let captured = Position::new(Square::A1, None, Square::A8).unwrap();
        assert!(!in_check(&captured));
    }

    #[test]
    fn defender_capture_of_rook() {
        // kd5 can take the unprotected rook on c4.
        let p = pos("h1", Some("c4"), "d5");
        let moves = legal_moves_defender(&p);
        let capture = Move::DefenderKing(Square::from_algebraic("c4").unwrap());
        assert!(moves.contains(capture));
        let next = apply_move(&p, capture);
        assert_eq!(next.rook_x, None);
        assert!(next.is_valid());
    }

    #[test]
    fn defender_cannot_stay_in_check() {
        // kd7 in check from Rd1 must leave the d-file.
        let p = pos("a1", Some("d1"), "d7");
        assert!(in_check(&p));
        for m in legal_moves_defender(&p).iter() {
            let next = apply_move(&p, m);
            assert!(!in_check(&next), "{m} leaves defender in check");
        }
    }

    #[test]
    fn corner_checkmate() {
        // ka8, Rh8 on the back rank, Ka6 guarding the escape squares.
        let p = pos("a6", Some("h8"), "a8");
        assert!(in_check(&p));
        assert!(legal_moves_defender(&p).is_empty());
        assert!(in_checkmate(&p));
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        // ka8 has no moves but is not in check: Rb7 is protected by Kb6.
        let p = pos("b6", Some("b7"), "a8");
        assert!(!in_check(&p));
        assert!(legal_moves_defender(&p).is_empty());
        assert!(!in_checkmate(&p));
    }

    #[test]
    fn check_fallback_returns_rook_capture() {
        let p = pos("a1", Some("h8"), "c8");
        let moves = legal_moves_attacker(&p);
        assert_eq!(moves.len(), 1);
        assert!(moves.contains(Move::Rook(Square::C8)));
    }

    #[test]
    fn apply_move_preserves_validity() {
        let p = pos("d4", Some("h4"), "a8");
        for m in legal_moves_attacker(&p).iter() {
            assert!(apply_move(&p, m).is_valid(), "{m} broke validity");
        }
        for m in legal_moves_defender(&p).iter() {
            assert!(apply_move(&p, m).is_valid(), "{m} broke validity");
        }
    }

    #[test]
    fn attacker_always_has_a_move() {
        // Cramped corner: the attacker king still has somewhere to go.
        let p = pos("a1", Some("b1"), "c3");
        assert!(!legal_moves_attacker(&p).is_empty());
    }
}
