//! Full-game driver alternating attacker and defender turns.

use crate::movegen::{apply_move, in_check, kings_adjacent};
use crate::search::{
    choose_defender_move, AttackerSession, AttackerStrategy, DefenderStrategy, EngineError,
    DEFAULT_DEPTH,
};
use krk_core::{Move, Position};
use thiserror::Error;

/// Turn cap used by [`GameSession::play_to_end`] by default. Any
/// winnable position is mated well inside this bound.
pub const DEFAULT_MAX_TURNS: u32 = 35;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The defender is stuck and in check. Attacker wins.
    Checkmate,
    /// The defender is stuck but not in check. Draw.
    Stalemate,
    /// The defender captured the rook. Draw.
    RookCaptured,
    /// The turn cap was reached with no decision.
    TurnLimit,
}

/// Starting positions a game refuses to play from.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    #[error("kings start on adjacent squares")]
    AdjacentKings,
    #[error("defender starts in check with the attacker to move")]
    DefenderInCheck,
}

/// One game of the endgame, attacker to move first.
///
/// Drives alternating turns until the defender is stuck, the rook is
/// captured, or the turn cap is reached.
#[derive(Debug, Clone)]
pub struct GameSession {
    position: Position,
    attacker: AttackerSession,
    defender_strategy: DefenderStrategy,
    depth: u8,
    history: Vec<(Move, Position)>,
    outcome: Option<GameOutcome>,
    turns: u32,
}

impl GameSession {
    /// Starts a game with the default strategies and depth.
    pub fn new(start: Position) -> Result<Self, StartError> {
        Self::with_strategies(
            start,
            AttackerStrategy::default(),
            DefenderStrategy::default(),
            DEFAULT_DEPTH,
        )
    }

    /// Starts a game with explicit strategies and lookahead depth.
    ///
    /// Rejects starts where the kings touch or the defender is already
    /// in check; with the attacker to move, either means the previous
    /// move could never have been legal.
    pub fn with_strategies(
        start: Position,
        attacker: AttackerStrategy,
        defender: DefenderStrategy,
        depth: u8,
    ) -> Result<Self, StartError> {
        if kings_adjacent(start.king_x, start.king_y) {
            return Err(StartError::AdjacentKings);
        }
        if in_check(&start) {
            return Err(StartError::DefenderInCheck);
        }
        Ok(GameSession {
            position: start,
            attacker: AttackerSession::new(attacker, depth),
            defender_strategy: defender,
            depth,
            history: Vec::new(),
            outcome: None,
            turns: 0,
        })
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Moves played so far with the position after each.
    pub fn history(&self) -> &[(Move, Position)] {
        &self.history
    }

    /// The outcome, once the game has ended.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Completed turns (one attacker move plus one defender reply).
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Plays one full turn: the attacker moves, then the defender
    /// replies. Returns the outcome if the game ended during the turn.
    ///
    /// Calling this after the game has ended returns the existing
    /// outcome without moving.
    pub fn play_turn(&mut self) -> Result<Option<GameOutcome>, EngineError> {
        if self.outcome.is_some() {
            return Ok(self.outcome);
        }

        let attack = self.attacker.choose(&self.position)?;
        self.position = apply_move(&self.position, attack);
        self.history.push((attack, self.position));

        let Some(reply) = choose_defender_move(&self.position, self.defender_strategy, self.depth)?
        else {
            let outcome = if in_check(&self.position) {
                GameOutcome::Checkmate
            } else {
                GameOutcome::Stalemate
            };
            self.outcome = Some(outcome);
            return Ok(self.outcome);
        };

        self.position = apply_move(&self.position, reply);
        self.history.push((reply, self.position));
        self.turns += 1;

        if self.position.rook_x.is_none() {
            self.outcome = Some(GameOutcome::RookCaptured);
        }
        Ok(self.outcome)
    }

    /// Plays turns until the game ends or `max_turns` full turns have
    /// been completed, in which case the outcome is
    /// [`GameOutcome::TurnLimit`].
    pub fn play_to_end(&mut self, max_turns: u32) -> Result<GameOutcome, EngineError> {
        while self.outcome.is_none() {
            if self.turns >= max_turns {
                self.outcome = Some(GameOutcome::TurnLimit);
                break;
            }
            self.play_turn()?;
        }
        // The loop only exits with an outcome set.
        match self.outcome {
            Some(outcome) => Ok(outcome),
            None => unreachable!("game loop exited without an outcome"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::in_checkmate;
    use krk_core::Square;

    fn pos(king_x: &str, rook_x: Option<&str>, king_y: &str) -> Position {
        Position::new(
            Square::from_algebraic(king_x).unwrap(),
            rook_x.map(|s| Square::from_algebraic(s).unwrap()),
            Square::from_algebraic(king_y).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_adjacent_kings() {
        let start = pos("d4", Some("h1"), "e5");
        assert_eq!(GameSession::new(start).unwrap_err(), StartError::AdjacentKings);
    }

    #[test]
    fn rejects_defender_in_check() {
        let start = pos("a1", Some("d1"), "d7");
        assert_eq!(GameSession::new(start).unwrap_err(), StartError::DefenderInCheck);
    }

    #[test]
    fn mate_in_one_ends_the_game() {
        let mut game = GameSession::new(pos("a6", Some("h5"), "a8")).unwrap();
        let outcome = game.play_turn().unwrap();
        assert_eq!(outcome, Some(GameOutcome::Checkmate));
        assert!(in_checkmate(game.position()));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.turns(), 0);
    }

    #[test]
    fn finished_game_stays_finished() {
        let mut game = GameSession::new(pos("a6", Some("h5"), "a8")).unwrap();
        game.play_turn().unwrap();
        let position = *game.position();
        assert_eq!(game.play_turn().unwrap(), Some(GameOutcome::Checkmate));
        assert_eq!(*game.position(), position);
    }

    #[test]
    fn hanging_rook_is_captured() {
        // The attacker may hang the rook; if it does, the defender takes
        // it and the game is drawn. Either way the game must end cleanly.
        let mut game = GameSession::new(pos("h1", Some("b5"), "d5")).unwrap();
        let outcome = game.play_to_end(DEFAULT_MAX_TURNS).unwrap();
        if outcome == GameOutcome::RookCaptured {
            assert_eq!(game.position().rook_x, None);
        }
    }

    #[test]
    fn turn_limit_is_reported() {
        let mut game = GameSession::new(pos("a1", Some("b3"), "e5")).unwrap();
        let outcome = game.play_to_end(0).unwrap();
        assert_eq!(outcome, GameOutcome::TurnLimit);
        assert_eq!(game.turns(), 0);
    }

    #[test]
    fn history_alternates_sides() {
        let mut game = GameSession::new(pos("a1", Some("b3"), "e5")).unwrap();
        game.play_to_end(3).unwrap();
        for (i, (m, _)) in game.history().iter().enumerate() {
            let expect_attacker = i % 2 == 0;
            assert_eq!(
                matches!(m, Move::King(_) | Move::Rook(_)),
                expect_attacker,
                "half-move {i} on the wrong side"
            );
        }
    }
}
