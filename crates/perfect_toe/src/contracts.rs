//! Contract-based validation for tic-tac-toe.
//!
//! Preconditions gate moves before they touch the board; invariants are
//! checked after each transition in debug builds.

use super::action::{Move, MoveError};
use super::session::GameSession;
use super::{Board, Player, Position};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The game must not be won or drawn yet.
pub struct GameNotOver;

impl GameNotOver {
    /// Checks the board has no winner and at least one empty square.
    #[instrument(skip(board))]
    pub fn check(board: &Board) -> Result<(), MoveError> {
        if super::rules::status(board).is_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The coordinates name a cell on the board.
pub struct OnBoard;

impl OnBoard {
    /// Converts `(row, col)` to a position or reports it as off the board.
    #[instrument]
    pub fn check(row: usize, col: usize) -> Result<Position, MoveError> {
        Position::from_row_col(row, col).ok_or(MoveError::OutOfBounds { row, col })
    }
}

/// Precondition: The square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Checks the target square.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        let (row, col) = mov.position.row_col();
        if !board.is_empty(row, col) {
            Err(MoveError::SquareOccupied(mov.position))
        } else {
            Ok(())
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks `player` against the side to move.
    #[instrument(skip(game))]
    pub fn check(player: Player, game: &GameSession) -> Result<(), MoveError> {
        if player != game.to_move() {
            Err(MoveError::WrongPlayer(player))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: game still running, player's turn, square empty.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameSession) -> Result<(), MoveError> {
        GameNotOver::check(game.board())?;
        PlayersTurn::check(mov.player, game)?;
        SquareIsEmpty::check(mov, game.board())?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Search Postcondition
// ─────────────────────────────────────────────────────────────

/// Postcondition: A search returns the board exactly as it found it.
pub struct BoardUnchanged;

impl BoardUnchanged {
    /// Compares the board before and after a search.
    pub fn check(before: &Board, after: &Board) -> Result<(), MoveError> {
        if before == after {
            Ok(())
        } else {
            warn!(%before, %after, "Search leaked a speculative move");
            Err(MoveError::InvariantViolation(
                "search left the board modified".to_string(),
            ))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Invariants
// ─────────────────────────────────────────────────────────────

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violated description.
    fn check_all(state: &S) -> Result<(), Vec<&'static str>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<&'static str>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(I1::description());
        }

        if !I2::holds(state) {
            violations.push(I2::description());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: moves alternate, so the first player has either as many
/// marks as the second player or exactly one more.
pub struct MarkBalance;

impl Invariant<GameSession> for MarkBalance {
    fn holds(game: &GameSession) -> bool {
        let first = game.first_player();
        let first_count = game.board().count(first);
        let second_count = game.board().count(first.opponent());

        let valid = first_count == second_count || first_count == second_count + 1;
        if !valid {
            warn!(first_count, second_count, "Mark balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "First player has the same number of marks as the second, or one more"
    }
}

/// Invariant: at most one side owns a winning line.
pub struct SingleWinner;

impl Invariant<GameSession> for SingleWinner {
    fn holds(game: &GameSession) -> bool {
        let board = game.board();
        !(board.has_win(Player::X) && board.has_win(Player::O))
    }

    fn description() -> &'static str {
        "At most one player has three in a row"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (MarkBalance, SingleWinner);

/// Checks every session invariant, folding violations into a [`MoveError`].
#[instrument(skip(game))]
pub fn check_invariants(game: &GameSession) -> Result<(), MoveError> {
    SessionInvariants::check_all(game).map_err(|violations| {
        MoveError::InvariantViolation(format!("Postcondition failed: {}", violations.join("; ")))
    })
}
