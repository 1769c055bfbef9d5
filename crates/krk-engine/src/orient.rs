//! Board orientation normalization.
//!
//! The evaluation heuristics are written as if the rook pressures the
//! defender king toward the top edge (or the top-right corner for diagonal
//! cases). Rather than duplicating the scoring logic for all eight push
//! directions, positions are rotated into that canonical frame first.
//!
//! All transforms are rigid rotations of the board (180 degrees, or 90
//! degrees either way), applied to all three pieces in one call; each is a
//! bijection on the 64 squares and preserves the pair `{file distance,
//! rank distance}` between any two pieces. The only reflection in the
//! system is the diagonal flip the attacker evaluation applies internally
//! for up-right positions.

use krk_core::{Position, Square};

/// The direction the rook is pushing the defender king, or the quadrant
/// the defender occupies when the rook exerts no pressure.
///
/// Used only as an intermediate classification for canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    None,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

/// Classifies the direction the rook is pushing the defender king.
///
/// The defender's quadrant decides the base direction (toward the nearest
/// edge); a rook directly fencing the king on an adjacent rank or file can
/// override it, as can a rook pinned against the far edge. Positions with
/// the defender on a board diagonal classify as diagonal pushes.
///
/// Returns [`Direction::None`] if the rook has been captured.
pub fn classify_push_direction(position: &Position) -> Direction {
    let rook = match position.rook_x {
        Some(rook) => rook,
        None => return Direction::None,
    };
    let (kf, kr) = coords(position.king_y);
    let (rf, rr) = coords(rook);

    if kr == kf {
        // Defender on the a1-h8 diagonal.
        if kr < 4 {
            if rr == rf {
                Direction::DownLeft
            } else if kf == rf - 1 {
                Direction::Left
            } else if kr == rr - 1 {
                Direction::Down
            } else if kr == rr + 1 && rf == 7 {
                Direction::Up
            } else {
                Direction::DownLeft
            }
        } else if rr == rf {
            Direction::UpRight
        } else if kf == rf + 1 {
            Direction::Right
        } else if kr == rr + 1 {
            Direction::Up
        } else if kr == rr - 1 && rf == 0 {
            Direction::Down
        } else {
            Direction::UpRight
        }
    } else if 7 - kr == kf {
        // Defender on the a8-h1 diagonal.
        if kr < 4 {
            if 7 - rr == rf {
                Direction::DownRight
            } else if kf == rf + 1 {
                Direction::Right
            } else if kr == rr - 1 {
                Direction::Down
            } else if kr == rr + 1 && rf == 0 {
                Direction::Up
            } else {
                Direction::DownRight
            }
        } else if 7 - rr == rf {
            Direction::UpLeft
        } else if kf == rf - 1 {
            Direction::Left
        } else if kr == rr + 1 {
            Direction::Up
        } else if kr == rr - 1 && rf == 7 {
            Direction::Down
        } else {
            Direction::UpLeft
        }
    } else if kr > kf {
        if kr > 7 - kf {
            // Upper quadrant; a back-rank rook beside the king flips the
            // push sideways.
            if rr == 0 && rf == kf + 1 {
                Direction::Left
            } else if rr == 0 && rf == kf - 1 {
                Direction::Right
            } else {
                Direction::Up
            }
        } else if rf == 7 && rr == kr + 1 {
            Direction::Down
        } else if rf == 7 && rr == kr - 1 {
            Direction::Up
        } else {
            Direction::Left
        }
    } else if kr > 7 - kf {
        if rf == 0 && rr == kr + 1 {
            Direction::Down
        } else if rf == 0 && rr == kr - 1 {
            Direction::Up
        } else {
            Direction::Right
        }
    } else if rr == 7 && rf == kf + 1 {
        Direction::Left
    } else if rr == 7 && rf == kf - 1 {
        Direction::Right
    } else {
        Direction::Down
    }
}

/// Classifies orientation for the defender's evaluation.
///
/// The defender wants the board rotated so its king sits in the upper
/// half with the rook's pressure coming from below; the classification
/// prefers the axis on which the rook is actively fencing the king (one
/// or two ranks/files away, with enough room behind the rook), falling
/// back to the king's quadrant when the rook is not a factor.
pub fn classify_defender_direction(position: &Position) -> Direction {
    let (kf, kr) = coords(position.king_y);
    let rook = match position.rook_x {
        Some(rook) => rook,
        // Rook captured: only the quadrant matters.
        None => return quadrant_direction(kf, kr),
    };
    let (rf, rr) = coords(rook);

    if kr == kf {
        if kr < 4 {
            if rf == kf + 1 {
                Direction::Left
            } else {
                Direction::DownLeft
            }
        } else if rf == kf - 1 {
            Direction::Right
        } else {
            Direction::UpRight
        }
    } else if 7 - kr == kf {
        if kr < 4 {
            if rr == kr + 1 {
                Direction::Down
            } else {
                Direction::DownRight
            }
        } else if rr == kr - 1 {
            Direction::Up
        } else {
            Direction::UpLeft
        }
    } else if kr > 4 && rr == kr - 1 {
        if (kf > 4 && rf == kf - 1) && rf > rr {
            Direction::Right
        } else if (kf < 3 && rf == kf + 1) && (7 - rf) > rr {
            Direction::Left
        } else {
            Direction::Up
        }
    } else if kr < 3 && rr == kr + 1 {
        if (kf > 4 && rf == kf - 1) && rf > (7 - rr) {
            Direction::Right
        } else if (kf < 3 && rf == kf + 1) && rf < rr {
            Direction::Left
        } else {
            Direction::Down
        }
    } else if kf > 4 && rf == kf - 1 {
        Direction::Right
    } else if kf < 3 && rf == kf + 1 {
        Direction::Left
    } else if kr > 5 && rr == kr - 2 {
        Direction::Up
    } else if kr < 2 && rr == kr + 2 {
        Direction::Down
    } else if kf > 5 && rf == kf - 2 {
        Direction::Right
    } else if kf < 2 && rf == kf + 2 {
        Direction::Left
    } else {
        quadrant_direction(kf, kr)
    }
}

/// Base direction from the defender king's quadrant alone.
fn quadrant_direction(kf: i32, kr: i32) -> Direction {
    if kr > kf {
        if kr > 7 - kf {
            Direction::Up
        } else {
            Direction::Left
        }
    } else if kr > 7 - kf {
        Direction::Right
    } else {
        Direction::Down
    }
}

/// Maps a direction to the one it becomes after canonicalization.
///
/// Orthogonal pushes rotate to `Up`, diagonal pushes to `UpRight`;
/// `Up`, `UpRight`, and `None` are already canonical.
pub const fn canonical_direction(dir: Direction) -> Direction {
    match dir {
        Direction::Up | Direction::UpRight | Direction::None => dir,
        Direction::Down | Direction::Left | Direction::Right => Direction::Up,
        Direction::DownLeft | Direction::UpLeft | Direction::DownRight => Direction::UpRight,
    }
}

/// Rotates a position so the given push direction becomes `Up` (or
/// `UpRight` for diagonals).
///
/// Idempotent for `Up`, `UpRight`, and `None`: those directions are
/// already canonical and the position is returned unchanged. The same
/// rotation is applied to all three pieces.
pub fn canonicalize(position: &Position, dir: Direction) -> Position {
    match dir {
        Direction::Up | Direction::UpRight | Direction::None => *position,
        _ => Position {
            king_x: rotate_square(position.king_x, dir),
            rook_x: position.rook_x.map(|rook| rotate_square(rook, dir)),
            king_y: rotate_square(position.king_y, dir),
        },
    }
}

/// Applies the rotation that maps `dir` onto the canonical frame.
fn rotate_square(sq: Square, dir: Direction) -> Square {
    let (f, r) = coords(sq);
    let (nf, nr) = match dir {
        Direction::Down | Direction::DownLeft => (7 - f, 7 - r),
        Direction::Left | Direction::UpLeft => (r, 7 - f),
        Direction::Right | Direction::DownRight => (7 - r, f),
        Direction::Up | Direction::UpRight | Direction::None => (f, r),
    };
    // Rotations keep coordinates on the board.
    match Square::from_coords(nf as u8, nr as u8) {
        Some(sq) => sq,
        None => unreachable!(),
    }
}

#[inline]
fn coords(sq: Square) -> (i32, i32) {
    (sq.file().index() as i32, sq.rank().index() as i32)
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
    fn classify_basic_quadrants() {
        // Defender high and central-left, rook not interfering: pushed up.
        assert_eq!(
            classify_push_direction(&pos("d2", Some("h3"), "c7")),
            Direction::Up
        );
        // Defender low: pushed down.
        assert_eq!(
            classify_push_direction(&pos("d7", Some("h6"), "c2")),
            Direction::Down
        );
        // Defender on the long diagonal, upper half.
        assert_eq!(
            classify_push_direction(&pos("d1", Some("g2"), "f6")),
            Direction::UpRight
        );
    }

    #[test]
    fn classify_rook_fence_overrides_quadrant() {
        // Defender in the upper quadrant but the rook on the back rank
        // beside it flips the push sideways.
        assert_eq!(
            classify_push_direction(&pos("e4", Some("d1"), "c7")),
            Direction::Left
        );
        assert_eq!(
            classify_push_direction(&pos("e4", Some("b1"), "c7")),
            Direction::Right
        );
    }

    #[test]
    fn classify_none_without_rook() {
        let p = Position::new(Square::A1, None, Square::D5).unwrap();
        assert_eq!(classify_push_direction(&p), Direction::None);
    }

    #[test]
    fn canonicalize_is_idempotent_for_canonical_directions() {
        let p = pos("d2", Some("h3"), "c7");
        for dir in [Direction::Up, Direction::UpRight, Direction::None] {
            assert_eq!(canonicalize(&p, dir), p);
        }
    }

    #[test]
    fn rotations_are_bijections() {
        for dir in [
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::DownLeft,
            Direction::UpLeft,
            Direction::DownRight,
        ] {
            let mut seen = [false; 64];
            for index in 0..64u8 {
                let sq = Square::from_index(index).unwrap();
                let rotated = rotate_square(sq, dir);
                assert!(!seen[rotated.index() as usize], "{dir:?} collides");
                seen[rotated.index() as usize] = true;
            }
        }
    }

    #[test]
    fn rotations_preserve_piece_distances() {
        let p = pos("b2", Some("g5"), "c7");
        for dir in [
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::DownLeft,
            Direction::UpLeft,
            Direction::DownRight,
        ] {
            let rotated = canonicalize(&p, dir);
            let before = distance_set(&p);
            let after = distance_set(&rotated);
            assert_eq!(before, after, "{dir:?} changed distances");
        }
    }

    fn distance_set(p: &Position) -> Vec<[i32; 2]> {
        let rook = p.rook_x.unwrap();
        [(p.king_x, rook), (p.king_x, p.king_y), (rook, p.king_y)]
            .iter()
            .map(|(a, b)| {
                let (af, ar) = coords(*a);
                let (bf, br) = coords(*b);
                let mut d = [(af - bf).abs(), (ar - br).abs()];
                d.sort_unstable();
                [d[0], d[1]]
            })
            .collect()
    }

    #[test]
    fn rotation_maps_push_to_up() {
        // Down-push rotated 180: the defender ends up in the top half.
        let p = pos("d7", Some("h6"), "c2");
        let dir = classify_push_direction(&p);
        assert_eq!(dir, Direction::Down);
        let rotated = canonicalize(&p, dir);
        assert_eq!(rotated.king_y, Square::from_algebraic("f7").unwrap());
        assert_eq!(rotated.king_x, Square::from_algebraic("e2").unwrap());
        assert_eq!(rotated.rook_x, Some(Square::from_algebraic("a3").unwrap()));
    }

    #[test]
    fn defender_classifier_prefers_fencing_axis() {
        // Rook one rank below a high defender king: pushed up frame.
        assert_eq!(
            classify_defender_direction(&pos("d3", Some("c5"), "d6")),
            Direction::Up
        );
        // No rook: quadrant only.
        let captured = Position::new(Square::A1, None, Square::B7).unwrap();
        assert_eq!(classify_defender_direction(&captured), Direction::Left);
    }
}
