//! # Game Controller - Central Game State Management
//!
//! The `GameController` owns the authoritative game state. Everything else
//! works on copies:
//!
//! - **Authoritative state**: the one real board, owned here. All moves are
//!   validated against it before application.
//! - **Search states**: clones handed to the AI worker, mutated freely
//!   during search.
//! - **Render states**: read-only views taken by the UI.
//!
//! The controller also owns the turn and forfeit rules. An automated player
//! proposing an illegal column forfeits (it had the full board and the
//! rules; a bad answer is a faulty player). A human mistyping simply gets
//! to try again.

use connect4::{Board, GameOutcome, MoveError, Player};
use std::time::SystemTime;

/// Result of attempting a move through the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// Move was validated and applied.
    Applied {
        col: usize,
        /// Row the disc landed in.
        row: usize,
        player: Player,
        /// Game state after the move.
        outcome: GameOutcome,
    },
    /// Move was rejected; the board is unchanged.
    Rejected(MoveError),
    /// The game is already over; no more moves are accepted.
    GameOver,
}

/// Current status of the hosted game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won { winner: Player, by_forfeit: bool },
    Tied,
}

/// A single entry in the move history.
#[derive(Debug, Clone)]
pub struct MoveHistoryEntry {
    pub timestamp: SystemTime,
    /// 1-indexed move number.
    pub move_number: usize,
    pub player: Player,
    pub col: usize,
}

/// Single source of truth for one game of Connect Four.
pub struct GameController {
    board: Board,
    to_move: Player,
    status: GameStatus,
    history: Vec<MoveHistoryEntry>,
}

impl GameController {
    /// Starts a game on `board`, deriving the side to move from the disc
    /// counts so that play resumes correctly from a loaded position.
    pub fn new(board: Board) -> Self {
        let to_move = board.player_to_move();
        let status = match board.outcome() {
            GameOutcome::InProgress => GameStatus::InProgress,
            GameOutcome::Win(winner) => GameStatus::Won {
                winner,
                by_forfeit: false,
            },
            GameOutcome::Tie => GameStatus::Tied,
        };
        GameController {
            board,
            to_move,
            status,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[MoveHistoryEntry] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Validates and applies a move for the side to move.
    pub fn try_move(&mut self, col: usize) -> MoveResult {
        if self.is_over() {
            return MoveResult::GameOver;
        }
        let player = self.to_move;
        let row = match self.board.apply_move(col, player) {
            Ok(row) => row,
            Err(err) => return MoveResult::Rejected(err),
        };

        self.history.push(MoveHistoryEntry {
            timestamp: SystemTime::now(),
            move_number: self.history.len() + 1,
            player,
            col,
        });

        let outcome = self.board.outcome();
        self.status = match outcome {
            GameOutcome::InProgress => GameStatus::InProgress,
            GameOutcome::Win(winner) => GameStatus::Won {
                winner,
                by_forfeit: false,
            },
            GameOutcome::Tie => GameStatus::Tied,
        };
        self.to_move = player.other();

        MoveResult::Applied {
            col,
            row,
            player,
            outcome,
        }
    }

    /// Ends the game with a win for `player`'s opponent.
    pub fn forfeit(&mut self, player: Player) {
        if !self.is_over() {
            self.status = GameStatus::Won {
                winner: player.other(),
                by_forfeit: true,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_alternate_and_accumulate_history() {
        let mut controller = GameController::new(Board::new(6, 7).unwrap());
        assert_eq!(controller.to_move(), Player::One);

        let result = controller.try_move(3);
        assert!(matches!(
            result,
            MoveResult::Applied {
                col: 3,
                row: 0,
                player: Player::One,
                outcome: GameOutcome::InProgress,
            }
        ));
        assert_eq!(controller.to_move(), Player::Two);
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.history()[0].move_number, 1);
    }

    #[test]
    fn rejected_moves_leave_the_game_untouched() {
        let mut controller = GameController::new(Board::new(6, 7).unwrap());
        let result = controller.try_move(12);
        assert_eq!(
            result,
            MoveResult::Rejected(MoveError::OutOfRange { col: 12, cols: 7 })
        );
        assert_eq!(controller.to_move(), Player::One);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn winning_move_closes_the_game() {
        let mut controller = GameController::new(Board::new(6, 7).unwrap());
        for col in [0, 0, 1, 1, 2, 2] {
            controller.try_move(col);
        }
        let result = controller.try_move(3);
        assert!(matches!(
            result,
            MoveResult::Applied {
                outcome: GameOutcome::Win(Player::One),
                ..
            }
        ));
        assert_eq!(
            controller.status(),
            GameStatus::Won {
                winner: Player::One,
                by_forfeit: false
            }
        );
        assert_eq!(controller.try_move(4), MoveResult::GameOver);
    }

    #[test]
    fn forfeit_awards_the_other_player() {
        let mut controller = GameController::new(Board::new(6, 7).unwrap());
        controller.forfeit(Player::Two);
        assert_eq!(
            controller.status(),
            GameStatus::Won {
                winner: Player::One,
                by_forfeit: true
            }
        );
    }

    #[test]
    fn resumes_from_a_loaded_position() {
        let board = Board::from_grid(&[
            vec![1, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
        ])
        .unwrap();
        let controller = GameController::new(board);
        assert_eq!(controller.to_move(), Player::Two);
        assert_eq!(controller.status(), GameStatus::InProgress);
    }
}
