//! Positional heuristic used at the search's depth cutoff.
//!
//! Scores a board by scanning every length-4 window along the four
//! alignment directions and summing a per-window value. Completed lines
//! are the terminal check's business and score nothing here.

use crate::board::{Board, Player, DIRECTIONS};

/// Weight for a window holding three of the scored player's discs and one
/// empty cell.
pub const THREE_IN_WINDOW: i64 = 100;

/// Weight for a window holding two of the scored player's discs and two
/// empty cells.
pub const TWO_IN_WINDOW: i64 = 10;

/// Mirror of [`TWO_IN_WINDOW`] for the opponent.
pub const OPP_TWO_IN_WINDOW: i64 = -10;

/// Mirror of [`THREE_IN_WINDOW`] for the opponent, weighted heavier:
/// suppressing an opposing near-win is at least as urgent as building
/// one's own.
pub const OPP_THREE_IN_WINDOW: i64 = -120;

/// Scores `board` from `player`'s perspective.
///
/// Positive values favor `player`. The result is a pure function of the
/// board value; no state is shared between calls.
pub fn evaluate(board: &Board, player: Player) -> i64 {
    let mut score = 0;
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            for dir in DIRECTIONS {
                if let Some(window) = board.window(row, col, dir) {
                    score += score_window(&window, player);
                }
            }
        }
    }
    score
}

fn score_window(window: &[Option<Player>; 4], player: Player) -> i64 {
    let mut own = 0;
    let mut opp = 0;
    for cell in window {
        match cell {
            Some(p) if *p == player => own += 1,
            Some(_) => opp += 1,
            None => {}
        }
    }
    match (own, opp) {
        (3, 0) => THREE_IN_WINDOW,
        (2, 0) => TWO_IN_WINDOW,
        (0, 3) => OPP_THREE_IN_WINDOW,
        (0, 2) => OPP_TWO_IN_WINDOW,
        _ => 0,
    }
}
