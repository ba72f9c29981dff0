//! Perfect-play tic-tac-toe.
//!
//! The engine searches the complete game tree, so the side it plays never
//! loses. Rendering and input handling live outside this crate; a front end
//! drives a [`GameSession`] and draws whatever it returns.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`Position`] and the pure [`rules`]
//! - **Search**: [`Minimax`], exhaustive minimax with optional alpha-beta
//! - **Session**: [`GameSession`], the human/engine turn loop
//! - **Config**: [`EngineConfig`], loaded from TOML or built in code
//!
//! # Example
//!
//! ```
//! use perfect_toe::{GameSession, GameStatus};
//!
//! let mut session = GameSession::default();
//! let status = session.apply_human_move(1, 1)?;
//! assert_eq!(status, GameStatus::InProgress);
//!
//! let reply = session.request_engine_move()?;
//! assert!(!session.board().is_empty(reply.row(), reply.col()));
//! # Ok::<(), perfect_toe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod contracts;
mod position;
pub mod rules;
mod search;
mod session;
mod types;

pub use action::{Move, MoveError};
pub use config::{ConfigError, EngineConfig, MAX_PLIES};
pub use contracts::{
    BoardUnchanged, GameNotOver, Invariant, InvariantSet, LegalMove, MarkBalance, OnBoard,
    PlayersTurn, SessionInvariants, SingleWinner, SquareIsEmpty, check_invariants,
};
pub use position::Position;
pub use search::{Minimax, SearchResult};
pub use session::GameSession;
pub use types::{BOARD_SIZE, Board, BoardParseError, GameStatus, Player, Square};
