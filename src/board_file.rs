//! Loading a saved board state from a file.
//!
//! Board files hold one row of digits per line, written the way the board
//! is displayed: the first line is the top row. Internally row 0 is the
//! bottom row, so the parser flips the line order before handing the grid
//! to the board's validating constructor.
//!
//! ```text
//! 0000000
//! 0000000
//! 0000000
//! 0000000
//! 0002000
//! 0012100
//! ```

use connect4::{Board, ConfigError};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardFileError {
    #[error("failed to read board file: {0}")]
    Io(#[from] std::io::Error),

    #[error("board file is empty")]
    Empty,

    #[error("unexpected character {ch:?} on line {line}")]
    BadCharacter { line: usize, ch: char },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Reads and parses a board file.
pub fn load_board(path: &Path) -> Result<Board, BoardFileError> {
    let text = fs::read_to_string(path)?;
    parse_board(&text)
}

/// Parses board-file text; the first line is the top row.
pub fn parse_board(text: &str) -> Result<Board, BoardFileError> {
    let mut grid: Vec<Vec<u8>> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut row = Vec::with_capacity(line.len());
        for ch in line.chars() {
            match ch.to_digit(10) {
                Some(digit) => row.push(digit as u8),
                None => {
                    return Err(BoardFileError::BadCharacter {
                        line: index + 1,
                        ch,
                    })
                }
            }
        }
        grid.push(row);
    }
    if grid.is_empty() {
        return Err(BoardFileError::Empty);
    }

    // File order is top-first; the board wants the bottom row at index 0.
    grid.reverse();
    Ok(Board::from_grid(&grid)?)
}
