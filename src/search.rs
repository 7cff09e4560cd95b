//! Adversarial move search: depth-limited minimax with alpha-beta pruning.
//!
//! The search is a pure function of the board, the player to move, and the
//! depth limit. It keeps no state between calls, so independent searches
//! can run concurrently without interfering. Each branch works on its own
//! board clone; a sibling branch never observes another's mutations.

use crate::board::{Board, GameOutcome, Player};
use crate::eval;

/// Score of a terminal win, chosen to dominate any heuristic sum so a
/// forced win or loss always outranks a heuristic-only line.
pub const WIN_SCORE: i64 = 10_000_000_000;

/// A chosen column paired with the minimax value backing the choice.
///
/// `column` is `None` only when the root position had no legal moves,
/// which means the caller invoked the search on a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: i64,
}

/// Picks the best column for `player`, looking `depth_limit` plies ahead.
///
/// Children are explored in ascending column order and only a strictly
/// better score displaces the incumbent, so among equally valued moves the
/// lowest column wins. Pruning never changes the chosen column or score
/// relative to an unpruned search, only the work performed.
///
/// # Panics
/// Panics if `depth_limit` is zero; searching zero plies is a programmer
/// error, not a recoverable condition.
pub fn choose_move(board: &Board, player: Player, depth_limit: u32) -> SearchResult {
    assert!(depth_limit > 0, "search depth limit must be positive");

    let mut best_column = None;
    let mut best_score = i64::MIN;
    let mut alpha = i64::MIN;
    let beta = i64::MAX;

    for col in board.legal_moves() {
        let mut child = board.clone();
        child.drop_disc(col, player);
        let score = minimax(&child, player.other(), player, depth_limit - 1, alpha, beta);
        if best_column.is_none() || score > best_score {
            best_column = Some(col);
            best_score = score;
        }
        alpha = alpha.max(best_score);
    }

    match best_column {
        Some(_) => SearchResult {
            column: best_column,
            score: best_score,
        },
        None => SearchResult {
            column: None,
            score: static_score(board, player),
        },
    }
}

/// Minimax value of `board` from `perspective`'s point of view, with
/// `to_move` next to act.
///
/// Terminal positions end the branch regardless of remaining depth. On
/// `perspective`'s turns the children are maximized and `alpha` raised; on
/// the opponent's turns they are minimized and `beta` lowered; once
/// `alpha >= beta` the remaining siblings cannot influence the result and
/// are skipped.
fn minimax(
    board: &Board,
    to_move: Player,
    perspective: Player,
    depth: u32,
    mut alpha: i64,
    mut beta: i64,
) -> i64 {
    match board.outcome() {
        GameOutcome::Win(winner) => {
            return if winner == perspective {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
        }
        GameOutcome::Tie => return 0,
        GameOutcome::InProgress => {}
    }
    if depth == 0 {
        return eval::evaluate(board, perspective);
    }

    let maximizing = to_move == perspective;
    let mut best = if maximizing { i64::MIN } else { i64::MAX };

    for col in board.legal_moves() {
        let mut child = board.clone();
        child.drop_disc(col, to_move);
        let score = minimax(&child, to_move.other(), perspective, depth - 1, alpha, beta);
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

fn static_score(board: &Board, perspective: Player) -> i64 {
    match board.outcome() {
        GameOutcome::Win(winner) if winner == perspective => WIN_SCORE,
        GameOutcome::Win(_) => -WIN_SCORE,
        GameOutcome::Tie => 0,
        GameOutcome::InProgress => eval::evaluate(board, perspective),
    }
}
