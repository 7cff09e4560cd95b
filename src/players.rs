//! Automated move sources.
//!
//! Everything that can sit on one side of the board implements
//! [`MoveSource`]: the strategies range from picking the first open column
//! to the full minimax search. Sources report failure as a typed
//! [`SelectionError`] so the turn coordinator can decide between forfeit
//! and abort; no strategy ever skips a turn silently.

use crate::board::{Board, Player};
use crate::error::SelectionError;
use crate::search::{self, SearchResult};
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A strategy that proposes a column for `player` on `board`.
pub trait MoveSource {
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<usize, SelectionError>;

    /// Short strategy name for display.
    fn name(&self) -> &'static str;
}

/// Always drops into the leftmost open column.
#[derive(Debug, Default, Clone, Copy)]
pub struct Leftmost;

impl MoveSource for Leftmost {
    fn choose_move(&mut self, board: &Board, _player: Player) -> Result<usize, SelectionError> {
        board
            .legal_moves()
            .first()
            .copied()
            .ok_or(SelectionError::NoLegalMoves)
    }

    fn name(&self) -> &'static str {
        "leftmost"
    }
}

/// Drops as close to the center as possible, choosing randomly when two
/// columns are equally close.
#[derive(Debug)]
pub struct Middle {
    rng: Xoshiro256PlusPlus,
}

impl Middle {
    pub fn new() -> Self {
        Self::seeded(rand::thread_rng().gen())
    }

    pub fn seeded(seed: u64) -> Self {
        Middle {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Default for Middle {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for Middle {
    fn choose_move(&mut self, board: &Board, _player: Player) -> Result<usize, SelectionError> {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(SelectionError::NoLegalMoves);
        }
        // Doubled distances keep the midpoint exact on even widths.
        let ideal = board.cols() - 1;
        let distance = |col: usize| (2 * col as i64 - ideal as i64).unsigned_abs();
        let best = legal.iter().map(|&col| distance(col)).min().unwrap_or(0);
        let options: Vec<usize> = legal
            .into_iter()
            .filter(|&col| distance(col) == best)
            .collect();
        Ok(options[self.rng.gen_range(0..options.len())])
    }

    fn name(&self) -> &'static str {
        "middle"
    }
}

/// Picks uniformly among the open columns.
#[derive(Debug)]
pub struct Random {
    rng: Xoshiro256PlusPlus,
}

impl Random {
    pub fn new() -> Self {
        Self::seeded(rand::thread_rng().gen())
    }

    pub fn seeded(seed: u64) -> Self {
        Random {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for Random {
    fn choose_move(&mut self, board: &Board, _player: Player) -> Result<usize, SelectionError> {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(SelectionError::NoLegalMoves);
        }
        Ok(legal[self.rng.gen_range(0..legal.len())])
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// The best move found so far by a running [`Minimax`] source, refreshed
/// after every completed depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    pub depth: u32,
    pub column: usize,
    pub score: i64,
}

/// Shared cell a [`Minimax`] source publishes its progress through.
///
/// The coordinator reads it for live display and as the fallback answer
/// when it abandons a search at its deadline.
pub type ProgressCell = Arc<Mutex<Option<SearchProgress>>>;

/// Minimax-backed source with iterative deepening.
///
/// Searches depth 1, then 2, and so on up to the configured limit. The
/// engine itself knows nothing about wall clocks; the deepening loop here
/// checks the optional time budget between depths and stops early, keeping
/// the deepest completed answer.
pub struct Minimax {
    depth_limit: u32,
    time_budget: Option<Duration>,
    progress: Option<ProgressCell>,
}

impl Minimax {
    /// # Panics
    /// Panics if `depth_limit` is zero.
    pub fn new(depth_limit: u32) -> Self {
        assert!(depth_limit > 0, "search depth limit must be positive");
        Minimax {
            depth_limit,
            time_budget: None,
            progress: None,
        }
    }

    /// Stop deepening once this much time has elapsed. The depth currently
    /// in flight still completes; budgets only cut between depths.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Publish per-depth progress into `cell`.
    pub fn with_progress(mut self, cell: ProgressCell) -> Self {
        self.progress = Some(cell);
        self
    }
}

impl MoveSource for Minimax {
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<usize, SelectionError> {
        if board.legal_moves().is_empty() {
            return Err(SelectionError::NoLegalMoves);
        }
        let deadline = self.time_budget.map(|budget| Instant::now() + budget);
        let mut chosen = None;

        for depth in 1..=self.depth_limit {
            let SearchResult { column, score } = search::choose_move(board, player, depth);
            let column = column.ok_or_else(|| {
                SelectionError::Fault(format!("search found no move at depth {depth}"))
            })?;
            chosen = Some(column);
            if let Some(cell) = &self.progress {
                *cell.lock() = Some(SearchProgress {
                    depth,
                    column,
                    score,
                });
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
        }

        chosen.ok_or_else(|| SelectionError::Fault("deepening loop never ran".into()))
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}
