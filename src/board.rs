//! # Connect Four Board Model
//!
//! Value-type representation of the grid plus the pure rules: legality,
//! gravity-fed moves, and win/tie detection.
//!
//! ## Rules
//! - Players alternate dropping discs into columns
//! - Discs fall to the lowest open row in the column
//! - First player to line up four discs (horizontally, vertically, or
//!   diagonally) wins
//! - A full board with no winner is a tie
//!
//! The board stores cells row-major with row 0 at the bottom, which makes
//! the gravity rule a search for the first empty row from index 0.

use crate::error::{ConfigError, MoveError};
use std::fmt;

/// Number of aligned discs required to win.
const LINE_SIZE: usize = 4;

/// Minimum board dimension in either direction; a four-in-a-row must fit.
const MIN_SIZE: usize = 4;

/// The four alignment directions as (row step, col step): horizontal,
/// vertical, up-right diagonal, up-left diagonal.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// One of the two player identities. Player one moves first by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The opposing player.
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// One-indexed label for display (1 or 2).
    pub fn label(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Result of inspecting a board for game-over conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Tie,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

/// The complete state of a Connect Four grid.
///
/// A `Board` is a value: cloning produces an independent copy, and the
/// search engine branches by cloning so that no sibling line of play ever
/// observes another's mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Cells row-major, row 0 at the bottom.
    cells: Vec<Option<Player>>,
    rows: usize,
    cols: usize,
}

impl Board {
    /// Creates an empty board with the given dimensions.
    ///
    /// Dimensions below 4x4 are rejected at construction time; everything
    /// downstream may assume a four-in-a-row is geometrically possible.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows < MIN_SIZE || cols < MIN_SIZE {
            return Err(ConfigError::BoardTooSmall { rows, cols });
        }
        Ok(Board {
            cells: vec![None; rows * cols],
            rows,
            cols,
        })
    }

    /// Builds a board from an externally supplied grid.
    ///
    /// `grid[0]` is the bottom row; cell values are 0 (empty), 1 (player
    /// one), or 2 (player two). Beyond the dimension floor, this validates
    /// the invariants a grid produced by legal play would satisfy: no
    /// floating discs and a disc-count difference of 0 or 1.
    pub fn from_grid(grid: &[Vec<u8>]) -> Result<Self, ConfigError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows < MIN_SIZE || cols < MIN_SIZE {
            return Err(ConfigError::BoardTooSmall { rows, cols });
        }
        for (row, line) in grid.iter().enumerate() {
            if line.len() != cols {
                return Err(ConfigError::RaggedGrid {
                    row,
                    len: line.len(),
                    expected: cols,
                });
            }
        }

        let mut board = Board {
            cells: vec![None; rows * cols],
            rows,
            cols,
        };
        for (row, line) in grid.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                board.cells[row * cols + col] = match value {
                    0 => None,
                    1 => Some(Player::One),
                    2 => Some(Player::Two),
                    _ => return Err(ConfigError::InvalidCell { row, col, value }),
                };
            }
        }

        // Gravity invariant: a disc may not sit above an empty cell.
        for col in 0..cols {
            let mut seen_empty = false;
            for row in 0..rows {
                match board.cell(row, col) {
                    None => seen_empty = true,
                    Some(_) if seen_empty => {
                        return Err(ConfigError::FloatingDisc { row, col });
                    }
                    Some(_) => {}
                }
            }
        }

        // Turn alternation invariant: player one moves first.
        let (one, two) = board.disc_counts();
        if one != two && one != two + 1 {
            return Err(ConfigError::TurnImbalance { one, two });
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The cell at (row, col), row 0 at the bottom.
    ///
    /// # Panics
    /// Panics if the position is out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        assert!(row < self.rows && col < self.cols, "cell out of bounds");
        self.cells[row * self.cols + col]
    }

    /// True iff `col` exists and has at least one empty cell.
    pub fn is_legal(&self, col: usize) -> bool {
        col < self.cols && self.cells[(self.rows - 1) * self.cols + col].is_none()
    }

    /// All playable columns in ascending order.
    ///
    /// The order matters: it is the default tie-break for the search and
    /// for any pick-the-first-move policy. Empty iff the board is full.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| self.is_legal(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| !self.is_legal(col))
    }

    /// Drops `player`'s disc into `col`, returning the row it landed in.
    pub fn apply_move(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::OutOfRange {
                col,
                cols: self.cols,
            });
        }
        if !self.is_legal(col) {
            return Err(MoveError::ColumnFull { col });
        }
        Ok(self.drop_disc(col, player))
    }

    /// Places a disc in a column already known to be legal.
    pub(crate) fn drop_disc(&mut self, col: usize, player: Player) -> usize {
        for row in 0..self.rows {
            let idx = row * self.cols + col;
            if self.cells[idx].is_none() {
                self.cells[idx] = Some(player);
                return row;
            }
        }
        unreachable!("drop_disc requires a non-full column");
    }

    /// Whose turn it is, derived from disc counts (player one moves first).
    pub fn player_to_move(&self) -> Player {
        let (one, two) = self.disc_counts();
        if one > two {
            Player::Two
        } else {
            Player::One
        }
    }

    fn disc_counts(&self) -> (usize, usize) {
        let mut one = 0;
        let mut two = 0;
        for cell in &self.cells {
            match cell {
                Some(Player::One) => one += 1,
                Some(Player::Two) => two += 1,
                None => {}
            }
        }
        (one, two)
    }

    /// Scans for game-over conditions.
    ///
    /// Alignments are checked before fullness, so a move that both fills
    /// the board and completes a line wins rather than ties. If both
    /// players hold an alignment (possible only in a hand-built grid),
    /// player one's win is reported.
    pub fn outcome(&self) -> GameOutcome {
        if self.has_alignment(Player::One) {
            GameOutcome::Win(Player::One)
        } else if self.has_alignment(Player::Two) {
            GameOutcome::Win(Player::Two)
        } else if self.is_full() {
            GameOutcome::Tie
        } else {
            GameOutcome::InProgress
        }
    }

    /// The four cells starting at (row, col) and stepping along `dir`, or
    /// `None` if the window runs off the board.
    pub(crate) fn window(
        &self,
        row: usize,
        col: usize,
        dir: (isize, isize),
    ) -> Option<[Option<Player>; LINE_SIZE]> {
        let (dr, dc) = dir;
        let end_r = row as isize + (LINE_SIZE as isize - 1) * dr;
        let end_c = col as isize + (LINE_SIZE as isize - 1) * dc;
        if end_r < 0 || end_r >= self.rows as isize || end_c < 0 || end_c >= self.cols as isize {
            return None;
        }
        let mut cells = [None; LINE_SIZE];
        for (k, slot) in cells.iter_mut().enumerate() {
            let r = (row as isize + k as isize * dr) as usize;
            let c = (col as isize + k as isize * dc) as usize;
            *slot = self.cells[r * self.cols + c];
        }
        Some(cells)
    }

    fn has_alignment(&self, player: Player) -> bool {
        for row in 0..self.rows {
            for col in 0..self.cols {
                for dir in DIRECTIONS {
                    if let Some(window) = self.window(row, col, dir) {
                        if window.iter().all(|&cell| cell == Some(player)) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let symbol = match self.cell(row, col) {
                    Some(Player::One) => "X",
                    Some(Player::Two) => "O",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Board {
        Board::new(6, 7).unwrap()
    }

    /// Plays a sequence of columns, alternating from player one.
    fn play(board: &mut Board, cols: &[usize]) {
        let mut player = Player::One;
        for &col in cols {
            board.apply_move(col, player).unwrap();
            player = player.other();
        }
    }

    #[test]
    fn new_board() {
        let board = standard();
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 7);
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(board.outcome(), GameOutcome::InProgress);
        assert_eq!(board.player_to_move(), Player::One);
    }

    #[test]
    fn rejects_small_dimensions() {
        assert_eq!(
            Board::new(3, 7),
            Err(ConfigError::BoardTooSmall { rows: 3, cols: 7 })
        );
        assert_eq!(
            Board::new(6, 2),
            Err(ConfigError::BoardTooSmall { rows: 6, cols: 2 })
        );
        assert!(Board::new(4, 4).is_ok());
    }

    #[test]
    fn minimum_board_is_playable() {
        let board = Board::new(4, 4).unwrap();
        for col in 0..4 {
            assert!(board.is_legal(col));
        }
        assert_eq!(board.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn discs_stack_from_the_bottom() {
        let mut board = standard();
        assert_eq!(board.apply_move(3, Player::One), Ok(0));
        assert_eq!(board.apply_move(3, Player::Two), Ok(1));
        assert_eq!(board.cell(0, 3), Some(Player::One));
        assert_eq!(board.cell(1, 3), Some(Player::Two));
        assert_eq!(board.cell(2, 3), None);
        assert_eq!(board.player_to_move(), Player::One);
    }

    #[test]
    fn full_column_is_rejected() {
        let mut board = standard();
        play(&mut board, &[2, 2, 2, 2, 2, 2]);
        assert!(!board.is_legal(2));
        assert_eq!(
            board.apply_move(2, Player::One),
            Err(MoveError::ColumnFull { col: 2 })
        );
        assert_eq!(
            board.apply_move(9, Player::One),
            Err(MoveError::OutOfRange { col: 9, cols: 7 })
        );
        assert_eq!(board.legal_moves(), vec![0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn horizontal_win() {
        let mut board = standard();
        play(&mut board, &[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(board.outcome(), GameOutcome::Win(Player::One));
    }

    #[test]
    fn vertical_win() {
        let mut board = standard();
        play(&mut board, &[0, 1, 0, 1, 0, 1, 0]);
        assert_eq!(board.outcome(), GameOutcome::Win(Player::One));
    }

    #[test]
    fn diagonal_up_win() {
        // Player one climbs the up-right diagonal from (0,0) to (3,3).
        let mut board = standard();
        play(&mut board, &[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        assert_eq!(board.outcome(), GameOutcome::Win(Player::One));
    }

    #[test]
    fn diagonal_down_win() {
        // Mirror image: player one descends from (3,0) to (0,3).
        let mut board = standard();
        play(&mut board, &[3, 2, 2, 1, 1, 0, 1, 0, 0, 6, 0]);
        assert_eq!(board.outcome(), GameOutcome::Win(Player::One));
    }

    #[test]
    fn win_beats_tie_on_the_last_move() {
        // 4x4 board one disc short of full, where the final drop completes
        // a vertical line for player two in column 3.
        let board = Board::from_grid(&[
            vec![1, 1, 2, 2],
            vec![1, 2, 1, 2],
            vec![2, 1, 1, 2],
            vec![1, 1, 2, 0],
        ])
        .unwrap();
        assert_eq!(board.outcome(), GameOutcome::InProgress);
        assert_eq!(board.player_to_move(), Player::Two);
        let mut board = board;
        board.apply_move(3, Player::Two).unwrap();
        assert!(board.is_full());
        assert_eq!(board.outcome(), GameOutcome::Win(Player::Two));
    }

    #[test]
    fn full_board_without_alignment_is_a_tie() {
        let board = Board::from_grid(&[
            vec![1, 2, 1, 2],
            vec![1, 2, 1, 2],
            vec![2, 1, 2, 1],
            vec![2, 1, 2, 1],
        ])
        .unwrap();
        assert_eq!(board.legal_moves(), Vec::<usize>::new());
        assert_eq!(board.outcome(), GameOutcome::Tie);
    }

    #[test]
    fn double_alignment_resolves_to_player_one() {
        // Unreachable through legal play; a hand-built grid where both
        // players hold a horizontal line resolves in player one's favor.
        let board = Board::from_grid(&[
            vec![1, 1, 1, 1, 0, 0, 0],
            vec![2, 2, 2, 2, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0, 0, 0],
        ])
        .unwrap();
        assert_eq!(board.outcome(), GameOutcome::Win(Player::One));
    }

    #[test]
    fn from_grid_rejects_bad_input() {
        assert!(matches!(
            Board::from_grid(&vec![vec![0; 3]; 6]),
            Err(ConfigError::BoardTooSmall { .. })
        ));
        assert!(matches!(
            Board::from_grid(&[vec![0; 7], vec![0; 6], vec![0; 7], vec![0; 7]]),
            Err(ConfigError::RaggedGrid { row: 1, .. })
        ));

        let mut grid = vec![vec![0u8; 7]; 6];
        grid[0][0] = 3;
        assert_eq!(
            Board::from_grid(&grid),
            Err(ConfigError::InvalidCell {
                row: 0,
                col: 0,
                value: 3
            })
        );

        // Disc at row 1 with nothing below it.
        let mut grid = vec![vec![0u8; 7]; 6];
        grid[1][4] = 1;
        assert_eq!(
            Board::from_grid(&grid),
            Err(ConfigError::FloatingDisc { row: 1, col: 4 })
        );

        // Two discs for player one, none for player two.
        let mut grid = vec![vec![0u8; 7]; 6];
        grid[0][0] = 1;
        grid[0][1] = 1;
        assert_eq!(
            Board::from_grid(&grid),
            Err(ConfigError::TurnImbalance { one: 2, two: 0 })
        );
    }

    #[test]
    fn from_grid_derives_side_to_move() {
        let board = Board::from_grid(&[
            vec![1, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        assert_eq!(board.player_to_move(), Player::Two);
    }

    #[test]
    fn read_only_calls_do_not_mutate() {
        let mut board = standard();
        play(&mut board, &[3, 3, 4]);
        let snapshot = board.clone();
        assert_eq!(board.legal_moves(), board.legal_moves());
        assert_eq!(board.outcome(), board.outcome());
        assert_eq!(board, snapshot);
    }

    #[test]
    fn display_renders_from_the_top() {
        let mut board = Board::new(4, 4).unwrap();
        play(&mut board, &[0, 1]);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3].trim_end(), "X O . .");
        assert_eq!(lines[0].trim_end(), ". . . .");
    }
}
