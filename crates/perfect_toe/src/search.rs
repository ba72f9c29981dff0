//! Exhaustive minimax search.
//!
//! The engine explores the full game tree on the caller's board, placing a
//! speculative mark, recursing, then clearing it again. Scores are always
//! seen from the maximizing side: a win is worth `win_score - depth`, a loss
//! `depth - win_score` and a draw `0`, so quicker wins and slower losses are
//! preferred.

use super::action::MoveError;
use super::config::EngineConfig;
#[cfg(debug_assertions)]
use super::contracts::BoardUnchanged;
use super::{Board, Player, Position, rules};
use tracing::{debug, instrument, trace};

const INF: i32 = i32::MAX;
const NEG_INF: i32 = i32::MIN;

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move for the searching side.
    pub best_move: Position,
    /// Game-theoretic value of `best_move` for the searching side.
    pub score: i32,
    /// Nodes visited, root excluded.
    pub nodes: u64,
}

/// Perfect-play tic-tac-toe engine.
#[derive(Debug, Clone)]
pub struct Minimax {
    win_score: i32,
    alpha_beta: bool,
    nodes: u64,
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for Minimax {
    fn from(config: &EngineConfig) -> Self {
        Self::new(config)
    }
}

impl Minimax {
    /// Creates an engine using the scoring and pruning settings of `config`.
    #[instrument(skip(config))]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            win_score: *config.win_score(),
            alpha_beta: *config.alpha_beta(),
            nodes: 0,
        }
    }

    /// Returns whether alpha-beta pruning is enabled.
    pub fn uses_alpha_beta(&self) -> bool {
        self.alpha_beta
    }

    /// Returns the optimal move for `player`.
    ///
    /// Candidates are tried in row-major order and only a strictly better
    /// score replaces the current choice, so the first optimal cell wins.
    ///
    /// # Errors
    ///
    /// `MoveError::GameOver` if someone has already won,
    /// `MoveError::BoardFull` if no square is empty.
    pub fn find_best_move(
        &mut self,
        board: &mut Board,
        player: Player,
    ) -> Result<Position, MoveError> {
        self.search(board, player).map(|result| result.best_move)
    }

    /// Searches the position for `player` and reports the chosen move with
    /// its value.
    ///
    /// The board is identical before and after the call.
    #[instrument(skip(self, board), fields(player = %player))]
    pub fn search(&mut self, board: &mut Board, player: Player) -> Result<SearchResult, MoveError> {
        if rules::check_winner(board).is_some() {
            return Err(MoveError::GameOver);
        }
        if board.is_full() {
            return Err(MoveError::BoardFull);
        }

        #[cfg(debug_assertions)]
        let before = board.clone();

        self.nodes = 0;
        let opponent = player.opponent();
        let mut best: Option<(Position, i32)> = None;

        for pos in Position::ALL {
            let (row, col) = pos.row_col();
            if !board.is_empty(row, col) {
                continue;
            }

            board.place(row, col, player);
            let score = if self.alpha_beta {
                let alpha = best.map_or(NEG_INF, |(_, score)| score);
                self.alpha_beta(board, 0, player, opponent, alpha, INF)
            } else {
                self.minimax(board, 0, player, opponent)
            };
            board.clear(row, col);

            trace!(position = %pos, score, "Root candidate scored");
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        #[cfg(debug_assertions)]
        BoardUnchanged::check(&before, board)?;

        let (best_move, score) = best.ok_or(MoveError::BoardFull)?;
        debug!(best_move = %best_move, score, nodes = self.nodes, "Search complete");

        Ok(SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        })
    }

    /// Scores `board` with `to_move` to play, from `maximizer`'s point of view.
    ///
    /// `depth` is the number of plies already played below the root search.
    pub fn evaluate(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizer: Player,
        to_move: Player,
    ) -> i32 {
        if self.alpha_beta {
            self.alpha_beta(board, depth, maximizer, to_move, NEG_INF, INF)
        } else {
            self.minimax(board, depth, maximizer, to_move)
        }
    }

    /// Value of the position for `player`, with `player` to move.
    #[instrument(skip(self, board), fields(player = %player))]
    pub fn evaluate_position(&mut self, board: &mut Board, player: Player) -> i32 {
        self.evaluate(board, 0, player, player)
    }

    /// Score of a finished position, or `None` while play continues.
    ///
    /// Maximizer's win is checked first, then the minimizer's, then a draw.
    fn terminal_score(&self, board: &Board, depth: i32, maximizer: Player) -> Option<i32> {
        if board.has_win(maximizer) {
            Some(self.win_score - depth)
        } else if board.has_win(maximizer.opponent()) {
            Some(depth - self.win_score)
        } else if board.is_full() {
            Some(0)
        } else {
            None
        }
    }

    fn minimax(&mut self, board: &mut Board, depth: i32, maximizer: Player, to_move: Player) -> i32 {
        self.nodes += 1;
        if let Some(score) = self.terminal_score(board, depth, maximizer) {
            return score;
        }

        let maximizing = to_move == maximizer;
        let mut best = if maximizing { NEG_INF } else { INF };

        for pos in Position::ALL {
            let (row, col) = pos.row_col();
            if !board.is_empty(row, col) {
                continue;
            }

            board.place(row, col, to_move);
            let score = self.minimax(board, depth + 1, maximizer, to_move.opponent());
            board.clear(row, col);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }

    /// Fail-soft alpha-beta. Exact inside `(alpha, beta)`, a bound outside it.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizer: Player,
        to_move: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if let Some(score) = self.terminal_score(board, depth, maximizer) {
            return score;
        }

        let maximizing = to_move == maximizer;
        let mut best = if maximizing { NEG_INF } else { INF };

        for pos in Position::ALL {
            let (row, col) = pos.row_col();
            if !board.is_empty(row, col) {
                continue;
            }

            board.place(row, col, to_move);
            let score =
                self.alpha_beta(board, depth + 1, maximizer, to_move.opponent(), alpha, beta);
            board.clear(row, col);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if alpha >= beta {
                break;
            }
        }

        best
    }
}
