//! # Connect Four Engine
//!
//! Game-state model and adversarial move search for Connect Four, plus the
//! roster of automated players built on top of them.
//!
//! The library is the rules-and-search core; rendering, input, and turn
//! coordination live in the `play` binary. Everything here is pure
//! computation over in-memory values: boards are cloned per search branch,
//! no module-level state exists, and concurrent searches over independent
//! boards never interfere.
//!
//! ## Layout
//! - [`board`]: grid representation, legality, gravity, win/tie detection
//! - [`search`]: depth-limited minimax with alpha-beta pruning
//! - [`eval`]: positional heuristic scoring length-4 windows
//! - [`players`]: move sources, from trivial pickers to iterative-deepening
//!   minimax
//! - [`error`]: typed configuration, move, and selection errors

pub mod board;
pub mod error;
pub mod eval;
pub mod players;
pub mod search;

pub use board::{Board, GameOutcome, Player};
pub use error::{ConfigError, MoveError, SelectionError};
pub use players::{MoveSource, ProgressCell, SearchProgress};
pub use search::{choose_move, SearchResult};
