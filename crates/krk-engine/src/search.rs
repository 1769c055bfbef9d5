//! Move selection strategies.
//!
//! The baseline for both sides is greedy one-ply choice: apply every legal
//! move, score the resulting position, take the maximum. The lookahead
//! variants layered on top are deliberately not true minimax; the
//! heuristics reward immediate progress, so search assumes strong replies
//! instead of minimizing, and only refines the greedy ranking.
//!
//! The attacker's anti-oscillation memory is owned by [`AttackerSession`],
//! one per game. Batch drivers running many games concurrently must give
//! each game its own session.

use crate::eval::{score_attacker, score_defender, TERMINAL_THRESHOLD};
use crate::movegen::{apply_move, legal_moves_attacker, legal_moves_defender};
use krk_core::{Move, Position};
use thiserror::Error;

/// Default search depth for the lookahead strategies.
pub const DEFAULT_DEPTH: u8 = 2;

/// Candidates kept per level by the attacker lookahead strategies.
const ATTACKER_BEAM: usize = 5;
/// Defender replies kept when modeling the opponent distribution.
const DEFENDER_REPLY_BEAM: usize = 3;
/// Candidates kept per level by the defender lookahead.
const DEFENDER_BEAM: usize = 4;

/// Errors surfaced by move selection.
///
/// These signal programming defects or corrupted positions, not normal
/// game outcomes; a valid non-terminal position always leaves the
/// attacker at least one king move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("attacker has no legal moves from {0}")]
    AttackerStuck(Position),
}

/// Move selection strategies for the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackerStrategy {
    /// One-ply greedy maximization of the attacker evaluation.
    #[default]
    Greedy,
    /// Beam lookahead assuming the defender's single best reply.
    Maximax,
    /// Beam lookahead weighting the defender's top replies by a skewed
    /// probability distribution.
    WeightedExpectation,
}

/// Move selection strategies for the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefenderStrategy {
    /// One-ply greedy maximization of the defender evaluation.
    #[default]
    Greedy,
    /// Beam lookahead replacing candidate scores with recursed scores.
    Lookahead,
    /// Beam lookahead adding recursed scores onto immediate scores.
    AdditiveLookahead,
}

/// The attacker's two-position recency window.
///
/// Remembers the results of the last two selections; a top-ranked
/// candidate that would recreate the position from two selections ago is
/// passed over in favor of the runner-up, breaking 2-cycles.
#[derive(Debug, Clone, Default)]
pub struct SearchMemory {
    last: Option<Position>,
    before_last: Option<Position>,
}

impl SearchMemory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if choosing a move that produces `next` would close a
    /// 2-cycle.
    fn would_cycle(&self, next: &Position) -> bool {
        self.before_last.as_ref() == Some(next)
    }

    /// Records the result of a selection, advancing the window.
    fn record(&mut self, next: Position) {
        self.before_last = self.last.take();
        self.last = Some(next);
    }

    /// Clears the window, as at the start of a new game.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Attacker move selection for one game.
///
/// Owns the strategy, lookahead depth, and anti-oscillation memory for a
/// single game session.
#[derive(Debug, Clone)]
pub struct AttackerSession {
    strategy: AttackerStrategy,
    depth: u8,
    memory: SearchMemory,
}

impl AttackerSession {
    /// Creates a session with the given strategy and lookahead depth.
    ///
    /// Depth only affects the lookahead strategies.
    pub fn new(strategy: AttackerStrategy, depth: u8) -> Self {
        AttackerSession {
            strategy,
            depth,
            memory: SearchMemory::new(),
        }
    }

    /// Clears the anti-oscillation memory for a fresh game.
    pub fn reset(&mut self) {
        self.memory.reset();
    }

    /// Chooses the attacker's move.
    ///
    /// Applies the anti-oscillation rule to the strategy's ranking, then
    /// advances the memory window.
    pub fn choose(&mut self, position: &Position) -> Result<Move, EngineError> {
        let ranked = match self.strategy {
            AttackerStrategy::Greedy => {
                ranked_attacker_moves(position)?.into_iter().map(|(_, m)| m).collect()
            }
            AttackerStrategy::Maximax => maximax_ranking(position, self.depth)?,
            AttackerStrategy::WeightedExpectation => {
                weighted_expectation_ranking(position, self.depth)?
            }
        };

        let mut choice = ranked[0];
        let mut next = apply_move(position, choice);
        if self.memory.would_cycle(&next) && ranked.len() > 1 {
            choice = ranked[1];
            next = apply_move(position, choice);
        }
        self.memory.record(next);
        Ok(choice)
    }
}

/// Chooses the defender's move, or `None` when the defender has no legal
/// move (checkmate or stalemate; the caller distinguishes via the check
/// predicate).
pub fn choose_defender_move(
    position: &Position,
    strategy: DefenderStrategy,
    depth: u8,
) -> Result<Option<Move>, EngineError> {
    match strategy {
        DefenderStrategy::Greedy => {
            Ok(ranked_defender_moves(position).first().map(|&(_, m)| m))
        }
        DefenderStrategy::Lookahead => defender_lookahead(position, depth, false),
        DefenderStrategy::AdditiveLookahead => defender_lookahead(position, depth, true),
    }
}

/// All attacker moves scored one ply deep, sorted descending.
///
/// Stable sort, so equal scores keep enumeration order.
fn ranked_attacker_moves(position: &Position) -> Result<Vec<(i64, Move)>, EngineError> {
    let moves = legal_moves_attacker(position);
    if moves.is_empty() {
        return Err(EngineError::AttackerStuck(*position));
    }
    let mut ranked: Vec<(i64, Move)> = moves
        .iter()
        .map(|m| (score_attacker(&apply_move(position, m)), m))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(ranked)
}

/// All defender moves scored one ply deep, sorted descending.
fn ranked_defender_moves(position: &Position) -> Vec<(i64, Move)> {
    let mut ranked: Vec<(i64, Move)> = legal_moves_defender(position)
        .iter()
        .map(|m| (score_defender(&apply_move(position, m)), m))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked
}

/// The attacker's greedy move without session state, used when modeling
/// replies inside lookahead.
fn best_attacker_move(position: &Position) -> Result<Move, EngineError> {
    Ok(ranked_attacker_moves(position)?[0].1)
}

/// Top candidates for the attacker beam: moves whose one-ply score shows
/// any promise, best first, at most [`ATTACKER_BEAM`]. Falls back to the
/// full ranking when every move looks hopeless (e.g. the rook must hang).
fn attacker_beam(position: &Position) -> Result<Vec<(i64, Move)>, EngineError> {
    let ranked = ranked_attacker_moves(position)?;
    let mut beam: Vec<(i64, Move)> = ranked.iter().copied().filter(|&(s, _)| s > 1).collect();
    if beam.is_empty() {
        beam = ranked;
    }
    beam.truncate(ATTACKER_BEAM);
    Ok(beam)
}

/// Maximax: explore each beam candidate's best defender reply (assumed,
/// not minimized) and the attacker's best counter-reply, re-ranking the
/// beam by the deeper scores. A candidate the defender cannot answer is
/// returned immediately as a found mate.
fn maximax_ranking(position: &Position, depth: u8) -> Result<Vec<Move>, EngineError> {
    let mut beam = attacker_beam(position)?;

    if beam[0].0 < TERMINAL_THRESHOLD && depth > 0 {
        for entry in beam.iter_mut() {
            let after_us = apply_move(position, entry.1);
            let replies = ranked_defender_moves(&after_us);
            let Some(&(_, best_reply)) = replies.first() else {
                return Ok(vec![entry.1]);
            };
            let after_them = apply_move(&after_us, best_reply);
            let counter = maximax_ranking(&after_them, depth - 1)?[0];
            entry.0 = score_attacker(&apply_move(&after_them, counter));
        }
        beam.sort_by(|a, b| b.0.cmp(&a.0));
    }

    Ok(beam.into_iter().map(|(_, m)| m).collect())
}

/// Weighted expectation: like maximax, but models the defender with a
/// skewed distribution over its top replies instead of a single best
/// move. Reply scores are normalized, squared to bias weight toward the
/// defender's best options, and renormalized; each candidate's immediate
/// score is damped by the square root of the expected continuation value.
fn weighted_expectation_ranking(position: &Position, depth: u8) -> Result<Vec<Move>, EngineError> {
    let mut beam: Vec<(f64, Move)> = attacker_beam(position)?
        .into_iter()
        .map(|(s, m)| (s as f64, m))
        .collect();

    if beam[0].0 < TERMINAL_THRESHOLD as f64 && depth > 0 {
        for entry in beam.iter_mut() {
            let after_us = apply_move(position, entry.1);
            let replies = legal_moves_defender(&after_us);
            if replies.is_empty() {
                return Ok(vec![entry.1]);
            }

            let mut weighted: Vec<(f64, Position)> = replies
                .iter()
                .map(|m| {
                    let next = apply_move(&after_us, m);
                    (score_defender(&next) as f64, next)
                })
                .filter(|&(s, _)| s > 1.0)
                .collect();
            weighted.sort_by(|a, b| b.0.total_cmp(&a.0));
            weighted.truncate(DEFENDER_REPLY_BEAM);
            if weighted.is_empty() {
                // Every reply scored as hopeless for the defender; keep
                // the immediate score.
                continue;
            }

            // Normalize, square, renormalize: probability mass shifts
            // toward the defender's strongest replies.
            let total: f64 = weighted.iter().map(|(s, _)| s).sum();
            for reply in weighted.iter_mut() {
                let p = reply.0 / total;
                reply.0 = p * p;
            }
            let total: f64 = weighted.iter().map(|(s, _)| s).sum();
            for reply in weighted.iter_mut() {
                reply.0 /= total;
            }

            let mut expectation = 0.0;
            for (probability, after_them) in &weighted {
                let counter = weighted_expectation_ranking(after_them, depth - 1)?[0];
                let continuation = score_attacker(&apply_move(after_them, counter));
                expectation += continuation as f64 * probability;
            }
            entry.0 *= expectation.sqrt();
        }
        beam.sort_by(|a, b| b.0.total_cmp(&a.0));
    }

    Ok(beam.into_iter().map(|(_, m)| m).collect())
}

/// Defender lookahead: keep the top candidates, assume the attacker's
/// greedy reply to each, recurse one level, and combine the recursed
/// score with the candidate's immediate score by overwrite or addition.
///
/// Recursion always uses the overwrite combination; the additive rule
/// applies at the top level only. A reply line where the defender ends
/// up stuck contributes zero.
fn defender_lookahead(
    position: &Position,
    depth: u8,
    additive: bool,
) -> Result<Option<Move>, EngineError> {
    let mut ranked = ranked_defender_moves(position);
    if ranked.is_empty() {
        return Ok(None);
    }
    ranked.truncate(DEFENDER_BEAM);

    let mut best_index = 0;
    if depth > 0 && ranked[0].0 < TERMINAL_THRESHOLD {
        let mut best_value = 0i64;
        for (i, &(immediate, m)) in ranked.iter().enumerate() {
            let after_us = apply_move(position, m);
            let reply = best_attacker_move(&after_us)?;
            let after_them = apply_move(&after_us, reply);
            let value = match defender_lookahead(&after_them, depth - 1, false)? {
                None => 0,
                Some(continuation) => {
                    let deep = score_defender(&apply_move(&after_them, continuation));
                    if additive {
                        deep + immediate
                    } else {
                        deep
                    }
                }
            };
            if value > best_value {
                best_value = value;
                best_index = i;
            }
        }
    }

    Ok(Some(ranked[best_index].1))
}
