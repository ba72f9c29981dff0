//! Core domain types for tic-tac-toe.

use super::position::Position;
use super::rules;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 tic-tac-toe board.
///
/// Coordinates are `(row, col)` with both in `0..3`. Passing anything
/// outside that range is a programming error and panics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

#[track_caller]
fn index(row: usize, col: usize) -> usize {
    assert!(
        row < BOARD_SIZE && col < BOARD_SIZE,
        "cell ({row}, {col}) is off the board"
    );
    row * BOARD_SIZE + col
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Returns the square at `(row, col)`.
    #[track_caller]
    pub fn square(&self, row: usize, col: usize) -> Square {
        self.squares[index(row, col)]
    }

    /// Returns the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if the square at `(row, col)` holds no mark.
    #[track_caller]
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.square(row, col) == Square::Empty
    }

    /// Places `player`'s mark at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is off the board or already occupied. The board
    /// is left untouched in that case.
    #[track_caller]
    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        let idx = index(row, col);
        assert!(
            self.squares[idx] == Square::Empty,
            "cell ({row}, {col}) is already occupied by {:?}",
            self.squares[idx]
        );
        self.squares[idx] = Square::Occupied(player);
    }

    /// Resets the square at `(row, col)` to empty.
    ///
    /// Used by the search to take back a speculative move.
    #[track_caller]
    pub fn clear(&mut self, row: usize, col: usize) {
        self.squares[index(row, col)] = Square::Empty;
    }

    /// Empties all nine squares.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; 9];
    }

    /// Returns true if `player` owns a full row, column or diagonal.
    pub fn has_win(&self, player: Player) -> bool {
        rules::has_win(self, player)
    }

    /// Returns true if no square is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of empty squares.
    pub fn empty_count(&self) -> usize {
        self.squares.iter().filter(|s| **s == Square::Empty).count()
    }

    /// Number of squares marked by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = row * BOARD_SIZE + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(player) => write!(f, "{player}")?,
                }
                if col < BOARD_SIZE - 1 {
                    f.write_str("|")?;
                }
            }
            if row < BOARD_SIZE - 1 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Error returned when a board cannot be parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// A character that is neither a mark, an empty marker nor a separator.
    #[display("Unexpected character {:?} in board", _0)]
    InvalidCell(char),

    /// The text did not describe exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongCellCount(usize),
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells in row-major order.
    ///
    /// `X`/`O` (either case) are marks; `.`, `_`, `-` and spaces are empty.
    /// `/` and newlines separate rows and are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for ch in s.chars() {
            let square = match ch {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '_' | '-' | ' ' => Square::Empty,
                '/' | '\n' | '\r' => continue,
                other => return Err(BoardParseError::InvalidCell(other)),
            };
            squares.push(square);
        }

        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::WrongCellCount(v.len()))?;
        Ok(Self { squares })
    }
}

/// Current status of the game.
///
/// Always derived from a [`Board`] through [`rules::status`], never stored
/// as independent truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(player) => write!(f, "Player {} wins", player),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_clear() {
        let mut board = Board::new();
        board.place(1, 2, Player::O);
        assert!(!board.is_empty(1, 2));
        assert_eq!(board.get(Position::MiddleRight), Square::Occupied(Player::O));

        board.clear(1, 2);
        assert_eq!(board, Board::new());
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn test_place_on_occupied_panics() {
        let mut board = Board::new();
        board.place(0, 0, Player::X);
        board.place(0, 0, Player::O);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn test_out_of_range_panics() {
        let board = Board::new();
        board.is_empty(3, 0);
    }

    #[test]
    fn test_display() {
        let board: Board = "X.O/.X./..O".parse().unwrap();
        assert_eq!(board.to_string(), "X|2|O\n-+-+-\n4|X|6\n-+-+-\n7|8|O");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "XO?......".parse::<Board>(),
            Err(BoardParseError::InvalidCell('?'))
        );
        assert_eq!(
            "XO/".parse::<Board>(),
            Err(BoardParseError::WrongCellCount(2))
        );
    }

    #[test]
    fn test_counts() {
        let board: Board = "XOX/.O./...".parse().unwrap();
        assert_eq!(board.count(Player::X), 2);
        assert_eq!(board.count(Player::O), 2);
        assert_eq!(board.empty_count(), 5);
    }
}
