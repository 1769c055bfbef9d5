//! Positional evaluation for both sides.
//!
//! Both functions are pure and score the position *after* a candidate
//! move; the terminal shortcuts (capture, checkmate, forced edge) are
//! phrased in terms of the resulting configuration. Positions are
//! canonicalized first so the scoring only has to understand a rook
//! pushing the defender toward the top edge (or top-right corner).
//!
//! The numeric weights are a tuning surface, not a contract; they are
//! exposed as named constants so retuning stays local to this module.

use crate::orient::{
    canonical_direction, canonicalize, classify_defender_direction, classify_push_direction,
    Direction,
};
use krk_core::{Position, Side, Square};

/// Terminal score for a checkmate pattern.
pub const CHECKMATE_SCORE: i64 = 65536;
/// Terminal score for the defender once the rook is captured.
pub const ROOK_CAPTURE_SCORE: i64 = 65536;
/// Terminal score for the defender forced to the edge, one step from mate.
pub const EDGE_TRAP_SCORE: i64 = 32768;
/// Scores above this are treated as decided; search stops deepening.
pub const TERMINAL_THRESHOLD: i64 = 30000;

/// Score when the defender can capture an unprotected rook next move.
const HANGING_ROOK_SCORE: i64 = 0;
/// Weight per canonical rank of rook progress toward the top edge.
const ROOK_ROW_WEIGHT: i64 = 1000;
/// Base bonus for a cutting rook anchored on the a- or h-file.
const ROOK_EDGE_ANCHOR_BONUS: i64 = 250;
/// Edge-anchor bonus when the rook is already fencing one rank below.
const ROOK_EDGE_FENCE_BONUS: i64 = 55;
/// Penalty steering the rook off a square the defender king attacks
/// two ranks below its target.
const ROOK_BLUNDER_PENALTY: i64 = -1001;

/// Scores a position for the given side.
pub fn score(position: &Position, side: Side) -> i64 {
    match side {
        Side::Attacker => score_attacker(position),
        Side::Defender => score_defender(position),
    }
}

/// Exact-coordinate direction overrides, applied after canonicalization.
///
/// These four canonical configurations were found in play testing to be
/// misclassified by the general push-direction rule; re-orienting them
/// sideways produces the correct evaluation frame. A workaround for
/// classifier blind spots rather than core logic.
fn direction_override(position: &Position) -> Option<Direction> {
    let rook = position.rook_x?.index();
    let king_x = position.king_x.index();
    let king_y = position.king_y.index();
    match (king_x, rook, king_y) {
        (37, 40, 55) => Some(Direction::Right),
        (29, 16, 15) => Some(Direction::Left),
        (_, 32, 46) => Some(Direction::Right),
        (_, 24, 22) => Some(Direction::Left),
        _ => None,
    }
}

/// Scores a position for the attacker. Higher is better for the attacker.
///
/// After canonicalization the push direction is `Up` or `UpRight`; the
/// scoring combines rook cutoff progress, king approach, edge anchoring,
/// and rook protection, with terminal shortcuts for hanging-rook,
/// checkmate, and forced-edge configurations.
pub fn score_attacker(position: &Position) -> i64 {
    if position.rook_x.is_none() {
        // Rook gone: the attacker can no longer win.
        return HANGING_ROOK_SCORE;
    }

    let classified = classify_push_direction(position);
    let mut canonical = canonicalize(position, classified);
    let mut dir = canonical_direction(classified);
    if let Some(forced) = direction_override(&canonical) {
        canonical = canonicalize(&canonical, forced);
        dir = canonical_direction(forced);
    }

    let rook = match canonical.rook_x {
        Some(rook) => rook,
        None => return HANGING_ROOK_SCORE,
    };
    let (mut xf, mut xr) = coords(canonical.king_x);
    let (mut rf, mut rr) = coords(rook);
    let (yf, yr) = coords(canonical.king_y);

    // Up-right positions with the rook one file left of the defender are
    // reflected across the long diagonal (king and rook only; the
    // defender sits on the diagonal and is its own mirror image).
    if dir == Direction::UpRight && rf == yf - 1 {
        std::mem::swap(&mut xr, &mut xf);
        std::mem::swap(&mut rr, &mut rf);
    }

    let mut rook_factor: i64 = 0;
    let mut king_factor: i64 = 0;
    let mut edge_factor: i64 = 0;
    let mut protection: i64 = 0;
    let rd = yr - rr;
    let fd = yf - rf;
    let rdk = (yr - xr - 2) * 3;
    let mut fdk = (yf - xf) * 3;

    if rd.abs() <= 1 && fd.abs() <= 1 {
        // Defender king can reach the rook. Worthless unless the rook is
        // protected by its own king; then score how well the protection
        // squeezes the defender.
        if (xf - rf).abs() <= 1 && (xr - rr).abs() <= 1 {
            match dir {
                Direction::UpRight => {
                    let r_dist = (xr - yr).abs();
                    let f_dist = (xf - yf).abs();
                    let closeness = 7 - (r_dist + f_dist);
                    protection = closeness * closeness;
                }
                Direction::Up => {
                    protection = if rf > yf {
                        (7 - rf) * 5 + (rf - xf) * 10
                    } else {
                        rf * 5 + (xf - rf) * 10
                    };
                }
                _ => unreachable!("canonical push direction is up or up-right"),
            }
        } else {
            return HANGING_ROOK_SCORE;
        }
    } else if (rr == yr && rr == 0 && xr == 2 && xf == yf)
        || (rr == yr && rr == 7 && xr == 5 && xf == yf)
        || (rf == yf && rf == 0 && xf == 2 && xr == yr)
        || (rf == yf && rf == 7 && xf == 5 && xr == yr)
    {
        // Corner-mate pattern: defender checked on the edge line with the
        // attacker king two squares back covering the escapes.
        return CHECKMATE_SCORE;
    } else if (rr == yr && xr == yr - 2 && xf == yf)
        || (rr == yr && xr == yr + 2 && xf == yf)
        || (rf == yf && xf == yf - 2 && xr == yr)
        || (rf == yf && xf == yf + 2 && xr == yr)
    {
        // Checking rook with the kings in direct opposition: the defender
        // is forced toward the edge.
        return EDGE_TRAP_SCORE;
    }

    if rr > yr {
        // Rook above the defender: no cutoff yet; an edge anchor is the
        // only redeeming feature.
        if rf == 0 || rf == 7 {
            edge_factor = ROOK_EDGE_ANCHOR_BONUS + rd * rd + fd * fd;
        }
    } else if rr == yr {
        // Level with the defender (checking line, defender must react).
        rook_factor = ROOK_ROW_WEIGHT;
    } else if rr == yr - 1 {
        // Ideal fence one rank below the defender.
        if xr > rr {
            // Own king wandered above the fence; push it back down.
            king_factor = (7 - xr) * 150 - 300;
        } else if rr == xr {
            if (yf < xf && xf < rf) || (yf > xf && xf > rf) {
                // King blocks its own rook on the fence line.
                king_factor = xr * -400;
            } else {
                king_factor = 800;
            }
        } else {
            king_factor = 1000;
            if (rf < xf && xf <= yf && yf - rf > 2) || (rf > xf && xf >= yf && rf - yf > 2) {
                king_factor += 30 * xr;
            }
            if xf == yf && xr == yr - 2 {
                king_factor -= 45;
            }
        }
        rook_factor = ROOK_ROW_WEIGHT * rr + fd * fd * 2;
        if rf == 0 || rf == 7 {
            edge_factor = ROOK_EDGE_FENCE_BONUS;
        }
    } else {
        // Rook more than one rank below: reward progress up the board and
        // file separation from the defender.
        rook_factor = ROOK_ROW_WEIGHT * rr + fd * fd * 5;
        if rr == yr - 2 && xr > rr && (rf == yf - 1 || rf == yf + 1) {
            edge_factor = ROOK_BLUNDER_PENALTY;
        }
        if xr > yr {
            king_factor = (8 - xr) * 150 - 200;
        } else if xr == yr {
            king_factor = xr * 30;
        } else if xr > rr {
            king_factor = xr * 40;
        } else if rr == xr {
            if (yf < xf && xf < rf) || (yf > xf && xf > rf) {
                king_factor = xr * -30;
            } else {
                king_factor = xr * 75;
            }
        } else {
            king_factor = xr * 150;
        }
    }

    // An edge-anchored rook shifts the king's ideal file by one.
    if rf == 0 && yf > 3 {
        fdk -= 1;
    } else if rf == 7 && yf < 4 {
        fdk += 1;
    }

    // Quadratic approach terms: the attacker king aims for a fixed offset
    // trailing the defender along both axes.
    king_factor += if rdk > 0 {
        (21 - rdk) * (21 - rdk)
    } else {
        (21 + rdk) * (21 + rdk)
    };
    king_factor += if fdk > 0 {
        (15 - fdk) * (15 - fdk)
    } else {
        (15 + fdk) * (15 + fdk)
    };

    rook_factor + king_factor + edge_factor + protection
}

/// Scores a position for the defender. Higher is better for the defender.
///
/// Capturing the rook is always best; otherwise the defender values
/// central squares, discounted on the rim, plus a rook-interaction term:
/// trapped against a fencing rook is terrible, harassing an unguarded
/// fencing rook is good, and a distant rook is no threat this ply.
pub fn score_defender(position: &Position) -> i64 {
    if position.rook_x.is_none() {
        return ROOK_CAPTURE_SCORE;
    }

    let dir = classify_defender_direction(position);
    let canonical = canonicalize(position, dir);
    let rook = match canonical.rook_x {
        Some(rook) => rook,
        None => return ROOK_CAPTURE_SCORE,
    };
    let (xf, xr) = coords(canonical.king_x);
    let (rf, rr) = coords(rook);
    let (yf, yr) = coords(canonical.king_y);

    // Doubled squared distance from the board center, mapped so central
    // squares score near 7000 and the rim near 2000.
    let rank_off = (2 * yr - 7).abs();
    let file_off = (2 * yf - 7).abs();
    let dist_from_center = file_off * file_off + rank_off * rank_off;
    let mut center_factor = (100 - dist_from_center) * (100 - dist_from_center) / 2 + 2000;

    let mut rook_factor: i64 = 0;
    let mut king_factor: i64 = 0;
    if yr > 3 && rr == yr - 1 {
        // Fenced by the rook one rank below (canonical frame).
        if xr == yr - 2 && yf == xf {
            // Kings in opposition behind the rook: trapped, unless the
            // rook sits right beside us and can be harassed.
            if rf == yf + 1 || rf == yf - 1 {
                rook_factor = 500;
            } else {
                rook_factor = -1000;
                king_factor = -1000;
            }
        } else {
            // Chase the rook along the fence.
            rook_factor = if rf < yf {
                (7 - (yf - rf)) * 150
            } else {
                (7 - (rf - yf)) * 150
            };
            king_factor = if xr < rr {
                if xr == yr - 2 {
                    0
                } else {
                    250
                }
            } else {
                500
            };
        }
    } else if rr == yr || rf == yf {
        // Sharing a line with the rook without being fenced; near neutral.
        rook_factor = 100;
    } else if rr > yr {
        rook_factor = 500;
    }

    if yr == 0 || yr == 7 || yf == 0 || yf == 7 {
        center_factor -= 500;
    }

    center_factor + rook_factor + king_factor
}

#[inline]
fn coords(sq: Square) -> (i64, i64) {
    (sq.file().index() as i64, sq.rank().index() as i64)
}
