//! Decision engine for the king-and-rook versus lone king endgame.
//!
//! The attacker (white, `X`) has a king and a rook; the defender
//! (black, `Y`) has a bare king. The engine generates legal moves,
//! detects check and checkmate, evaluates positions with hand-tuned
//! heuristics expressed over a canonical board orientation, and selects
//! moves for both sides with several strategies of increasing depth.
//!
//! [`GameSession`] ties it together: it alternates attacker and
//! defender turns from a given start until checkmate, stalemate, rook
//! capture, or a turn cap.
//!
//! ```
//! use krk_core::{Position, Square};
//! use krk_engine::{GameOutcome, GameSession, DEFAULT_MAX_TURNS};
//!
//! let start = Position::new(Square::A6, Some(Square::H5), Square::A8)?;
//! let mut game = GameSession::new(start)?;
//! let outcome = game.play_to_end(DEFAULT_MAX_TURNS)?;
//! assert_eq!(outcome, GameOutcome::Checkmate);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod eval;
pub mod game;
pub mod movegen;
pub mod orient;
pub mod search;

pub use game::{GameOutcome, GameSession, StartError, DEFAULT_MAX_TURNS};
pub use movegen::{apply_move, in_check, in_checkmate, legal_moves, MoveList};
pub use search::{
    choose_defender_move, AttackerSession, AttackerStrategy, DefenderStrategy, EngineError,
    DEFAULT_DEPTH,
};
