//! Error taxonomy for the engine library.
//!
//! Construction problems are fatal and reported once, move problems are
//! recoverable and left to the caller (reject the input or treat it as a
//! forfeit), and move-source problems are surfaced as typed values instead
//! of being swallowed where they occur.

use thiserror::Error;

/// Fatal, construction-time board configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Four in a row must be geometrically possible.
    #[error("board must be at least 4x4, got {rows}x{cols}")]
    BoardTooSmall { rows: usize, cols: usize },

    /// Grid rows of differing lengths.
    #[error("grid row {row} has {len} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Cell values outside `{0, 1, 2}`.
    #[error("invalid cell value {value} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: u8 },

    /// A disc with an empty cell somewhere below it in the same column.
    #[error("floating disc at row {row}, column {col}")]
    FloatingDisc { row: usize, col: usize },

    /// Player one moves first, so their disc count may exceed player two's
    /// by at most one and may never trail it.
    #[error("disc counts violate turn order ({one} for player 1, {two} for player 2)")]
    TurnImbalance { one: usize, two: usize },
}

/// Recoverable errors from attempting a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("column {col} is out of range (the board has {cols} columns)")]
    OutOfRange { col: usize, cols: usize },

    #[error("column {col} is full")]
    ColumnFull { col: usize },
}

/// Errors from an automated move source, surfaced to the turn coordinator
/// so it can decide between forfeit and abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The board has no open column. Reaching a source with a terminal
    /// board is a coordination bug, not a reason to skip a turn quietly.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// The source failed to produce a move for a playable board.
    #[error("move source fault: {0}")]
    Fault(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::BoardTooSmall { rows: 3, cols: 7 };
        assert_eq!(err.to_string(), "board must be at least 4x4, got 3x7");
    }

    #[test]
    fn move_error_display() {
        let err = MoveError::ColumnFull { col: 2 };
        assert_eq!(err.to_string(), "column 2 is full");
        let err = MoveError::OutOfRange { col: 9, cols: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is out of range (the board has 7 columns)"
        );
    }

    #[test]
    fn selection_error_display() {
        assert_eq!(
            SelectionError::NoLegalMoves.to_string(),
            "no legal moves available"
        );
    }
}
