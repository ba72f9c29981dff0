//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the search and the session can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WIN_LINES, check_winner, has_win};

use super::{Board, GameStatus, Player};
use tracing::instrument;

/// Derives the game status from the board alone.
///
/// X's win is checked before O's; a legal game never has both.
#[instrument(skip(board))]
pub fn status(board: &Board) -> GameStatus {
    if has_win(board, Player::X) {
        GameStatus::Won(Player::X)
    } else if has_win(board, Player::O) {
        GameStatus::Won(Player::O)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_progression() {
        let board: Board = "XX./OO./...".parse().unwrap();
        assert_eq!(status(&board), GameStatus::InProgress);

        let board: Board = "XXX/OO./...".parse().unwrap();
        assert_eq!(status(&board), GameStatus::Won(Player::X));

        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(status(&board), GameStatus::Draw);
    }

    #[test]
    fn test_full_board_with_winner_is_not_draw() {
        let board: Board = "XXX/OOX/XOO".parse().unwrap();
        assert_eq!(status(&board), GameStatus::Won(Player::X));
    }
}
