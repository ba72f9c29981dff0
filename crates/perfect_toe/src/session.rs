//! Game orchestration between a human player and the engine.
//!
//! A session owns the one live board. The presentation layer reports human
//! moves through [`GameSession::apply_human_move`] and asks for the engine's
//! reply through [`GameSession::request_engine_move`]; everything it needs to
//! render comes back from those calls or from [`GameSession::status`].

use super::action::{Move, MoveError};
use super::config::EngineConfig;
use super::contracts::{GameNotOver, LegalMove, OnBoard, PlayersTurn};
use super::search::Minimax;
use super::{Board, GameStatus, Player, Position, rules};
use tracing::{debug, info, instrument, warn};

/// A single game between a human and the engine.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    to_move: Player,
    config: EngineConfig,
    engine: Minimax,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GameSession {
    /// Starts a session with an empty board.
    #[instrument(skip(config), fields(engine = %config.engine(), first = %config.first_player()))]
    pub fn new(config: EngineConfig) -> Self {
        let engine = Minimax::new(&config);
        Self {
            board: Board::new(),
            to_move: *config.first_player(),
            config,
            engine,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Side played by the human.
    pub fn human(&self) -> Player {
        self.config.human()
    }

    /// Side played by the engine.
    pub fn engine(&self) -> Player {
        *self.config.engine()
    }

    /// Side that opened the game.
    pub fn first_player(&self) -> Player {
        *self.config.first_player()
    }

    /// Returns the configuration this session was started with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derives the game status from the board.
    pub fn status(&self) -> GameStatus {
        rules::status(&self.board)
    }

    /// Returns true once the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }

    /// Applies the human's mark at `(row, col)` and returns the new status.
    ///
    /// # Errors
    ///
    /// Checked in order: `GameOver`, `OutOfBounds`, `WrongPlayer` (engine to
    /// move), `SquareOccupied`. The board is untouched on error.
    #[instrument(skip(self), fields(human = %self.human()))]
    pub fn apply_human_move(&mut self, row: usize, col: usize) -> Result<GameStatus, MoveError> {
        GameNotOver::check(&self.board).inspect_err(|e| warn!(%e, "Human move rejected"))?;
        let position = OnBoard::check(row, col).inspect_err(|e| warn!(%e, "Human move rejected"))?;

        let action = Move::new(self.human(), position);
        LegalMove::check(&action, self).inspect_err(|e| warn!(%e, "Human move rejected"))?;

        self.commit(action)
    }

    /// Asks the engine for its move, applies it and returns it for rendering.
    ///
    /// # Errors
    ///
    /// `GameOver` if the game has finished, `WrongPlayer` if the human is to
    /// move.
    #[instrument(skip(self), fields(engine = %self.engine()))]
    pub fn request_engine_move(&mut self) -> Result<Position, MoveError> {
        GameNotOver::check(&self.board)?;
        let engine_side = self.engine();
        PlayersTurn::check(engine_side, self)
            .inspect_err(|e| warn!(%e, "Engine move requested out of turn"))?;

        let position = self.engine.find_best_move(&mut self.board, engine_side)?;
        info!(position = %position, "Engine chose move");

        self.commit(Move::new(engine_side, position))?;
        Ok(position)
    }

    /// Clears the board and hands the first move back to the opening side.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.to_move = self.first_player();
        info!("Session reset");
    }

    /// Places a validated move and advances the turn.
    fn commit(&mut self, action: Move) -> Result<GameStatus, MoveError> {
        let (row, col) = action.position.row_col();
        self.board.place(row, col, action.player);
        self.to_move = action.player.opponent();

        #[cfg(debug_assertions)]
        super::contracts::check_invariants(self)?;

        let status = self.status();
        match status {
            GameStatus::InProgress => debug!(%action, "Move applied"),
            _ => info!(%action, %status, "Game over"),
        }
        Ok(status)
    }
}
