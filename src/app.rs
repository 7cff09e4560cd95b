//! # Application State and AI Coordination
//!
//! Holds the state behind the terminal UI: the authoritative
//! [`GameController`], the seat configuration, and the channels to the AI
//! worker thread.
//!
//! Automated moves are computed off the UI thread. Each search request
//! carries a request ID; responses with a stale ID (superseded by a new
//! game or an enforced deadline) are discarded. While the minimax source
//! deepens, it publishes its best move so far into a shared progress cell,
//! which doubles as the live "thinking" display and as the fallback answer
//! when the hard deadline expires mid-search.

use crate::game_controller::{GameController, GameStatus, MoveResult};
use connect4::players::{Leftmost, Middle, Minimax, Random};
use connect4::{Board, MoveSource, Player, ProgressCell, SelectionError};
use parking_lot::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Which kind of player occupies a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSpec {
    Human,
    Leftmost,
    Middle,
    Random,
    Minimax,
}

impl PlayerSpec {
    /// Parses a player name as given on the command line.
    pub fn parse(name: &str) -> Option<PlayerSpec> {
        match name {
            "human" => Some(PlayerSpec::Human),
            "leftmost" => Some(PlayerSpec::Leftmost),
            "middle" => Some(PlayerSpec::Middle),
            "random" => Some(PlayerSpec::Random),
            "minimax" => Some(PlayerSpec::Minimax),
            _ => None,
        }
    }

    pub fn is_human(self) -> bool {
        self == PlayerSpec::Human
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayerSpec::Human => "human",
            PlayerSpec::Leftmost => "leftmost",
            PlayerSpec::Middle => "middle",
            PlayerSpec::Random => "random",
            PlayerSpec::Minimax => "minimax",
        }
    }
}

/// Builds the move source backing a seat; `None` for humans.
pub fn build_source(
    spec: PlayerSpec,
    depth: u32,
    time_budget: Option<Duration>,
    progress: Option<ProgressCell>,
) -> Option<Box<dyn MoveSource + Send>> {
    match spec {
        PlayerSpec::Human => None,
        PlayerSpec::Leftmost => Some(Box::new(Leftmost)),
        PlayerSpec::Middle => Some(Box::new(Middle::new())),
        PlayerSpec::Random => Some(Box::new(Random::new())),
        PlayerSpec::Minimax => {
            let mut source = Minimax::new(depth);
            if let Some(budget) = time_budget {
                source = source.with_time_budget(budget);
            }
            if let Some(cell) = progress {
                source = source.with_progress(cell);
            }
            Some(Box::new(source))
        }
    }
}

/// Requests sent to the AI worker thread.
pub enum AiRequest {
    /// Compute a move for `player` on `board`.
    Search {
        request_id: u64,
        board: Board,
        player: Player,
    },
    /// Shut the worker down.
    Stop,
}

/// Responses from the AI worker thread.
pub enum AiResponse {
    MoveReady {
        request_id: u64,
        player: Player,
        result: Result<usize, SelectionError>,
    },
}

/// Worker that evaluates automated moves off the UI thread.
///
/// Owns both seats' move sources and serves one request at a time until it
/// receives [`AiRequest::Stop`] or its channels close.
pub struct AiWorker {
    sources: [Option<Box<dyn MoveSource + Send>>; 2],
}

impl AiWorker {
    pub fn new(sources: [Option<Box<dyn MoveSource + Send>>; 2]) -> Self {
        AiWorker { sources }
    }

    pub fn run(mut self, rx: Receiver<AiRequest>, tx: Sender<AiResponse>) {
        while let Ok(request) = rx.recv() {
            match request {
                AiRequest::Search {
                    request_id,
                    board,
                    player,
                } => {
                    let seat = (player.label() - 1) as usize;
                    let result = match self.sources[seat].as_mut() {
                        Some(source) => source.choose_move(&board, player),
                        None => Err(SelectionError::Fault(
                            "no automated source configured for this seat".into(),
                        )),
                    };
                    if tx
                        .send(AiResponse::MoveReady {
                            request_id,
                            player,
                            result,
                        })
                        .is_err()
                    {
                        break;
                    }
                }
                AiRequest::Stop => break,
            }
        }
    }
}

/// Current state of the AI engine from the UI's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Idle,
    Thinking,
}

/// Everything the terminal UI needs to run one game.
pub struct App {
    pub controller: GameController,
    pub specs: [PlayerSpec; 2],
    pub ai_state: AiState,
    /// One-line message shown above the board.
    pub status_line: String,
    /// Column currently selected by the keyboard cursor.
    pub cursor: usize,
    /// Progress cell shared with the minimax sources.
    pub progress: ProgressCell,
    initial_board: Board,
    request_id: u64,
    ai_tx: Sender<AiRequest>,
    ai_rx: Receiver<AiResponse>,
    search_started: Option<Instant>,
    /// Point past which a search is abandoned for its recorded best move.
    hard_deadline: Option<Duration>,
}

impl App {
    pub fn new(
        board: Board,
        specs: [PlayerSpec; 2],
        depth: u32,
        time_budget: Option<Duration>,
    ) -> App {
        let progress: ProgressCell = Arc::new(Mutex::new(None));
        let sources = [
            build_source(specs[0], depth, time_budget, Some(Arc::clone(&progress))),
            build_source(specs[1], depth, time_budget, Some(Arc::clone(&progress))),
        ];
        let (ai_tx, request_rx) = mpsc::channel();
        let (response_tx, ai_rx) = mpsc::channel();
        let worker = AiWorker::new(sources);
        thread::spawn(move || worker.run(request_rx, response_tx));

        let cursor = board.cols() / 2;
        let mut app = App {
            controller: GameController::new(board.clone()),
            specs,
            ai_state: AiState::Idle,
            status_line: String::new(),
            cursor,
            progress,
            initial_board: board,
            request_id: 0,
            ai_tx,
            ai_rx,
            search_started: None,
            // The soft budget lives inside the minimax source; give the
            // search twice that before falling back to recorded progress.
            hard_deadline: time_budget.map(|budget| budget * 2),
        };
        app.refresh_status();
        app
    }

    pub fn spec_for(&self, player: Player) -> PlayerSpec {
        self.specs[(player.label() - 1) as usize]
    }

    pub fn is_human_turn(&self) -> bool {
        !self.controller.is_over() && self.spec_for(self.controller.to_move()).is_human()
    }

    fn is_ai_turn(&self) -> bool {
        !self.controller.is_over() && !self.spec_for(self.controller.to_move()).is_human()
    }

    /// Advances the app: applies finished AI moves, enforces the search
    /// deadline, and dispatches the next search when an AI is to move.
    pub fn tick(&mut self) {
        self.drain_responses();
        self.enforce_deadline();
        self.dispatch_search();
    }

    fn drain_responses(&mut self) {
        while let Ok(response) = self.ai_rx.try_recv() {
            let AiResponse::MoveReady {
                request_id,
                player,
                result,
            } = response;
            if request_id != self.request_id || self.ai_state != AiState::Thinking {
                continue; // superseded by a new game or the deadline
            }
            self.ai_state = AiState::Idle;
            self.search_started = None;
            match result {
                Ok(col) => self.apply_automated_move(player, col),
                Err(err) => {
                    self.controller.forfeit(player);
                    self.status_line =
                        format!("player {} forfeits ({})", player.label(), err);
                }
            }
        }
    }

    fn enforce_deadline(&mut self) {
        let Some(limit) = self.hard_deadline else {
            return;
        };
        if self.ai_state != AiState::Thinking {
            return;
        }
        let expired = self.search_started.is_some_and(|t| t.elapsed() >= limit);
        if !expired {
            return;
        }
        // Nothing recorded yet means depth 1 is still running; keep
        // waiting, there is nothing better to play.
        let Some(progress) = *self.progress.lock() else {
            return;
        };
        // The worker serves one search at a time, so a previously orphaned
        // search can still be writing into the cell when this one's clock
        // runs out. A recorded column that is not legal on the current
        // board is such a leftover; let the search finish instead.
        if !self.controller.board().is_legal(progress.column) {
            return;
        }
        self.request_id += 1; // orphan the in-flight search
        self.ai_state = AiState::Idle;
        self.search_started = None;
        let player = self.controller.to_move();
        self.apply_automated_move(player, progress.column);
    }

    fn dispatch_search(&mut self) {
        if self.ai_state != AiState::Idle || !self.is_ai_turn() {
            return;
        }
        let player = self.controller.to_move();
        self.request_id += 1;
        *self.progress.lock() = None;
        let request = AiRequest::Search {
            request_id: self.request_id,
            board: self.controller.board().clone(),
            player,
        };
        if self.ai_tx.send(request).is_ok() {
            self.ai_state = AiState::Thinking;
            self.search_started = Some(Instant::now());
            self.status_line = format!(
                "player {} ({}) is thinking...",
                player.label(),
                self.spec_for(player).name()
            );
        } else {
            self.controller.forfeit(player);
            self.status_line = format!(
                "player {} forfeits (AI worker is gone)",
                player.label()
            );
        }
    }

    fn apply_automated_move(&mut self, player: Player, col: usize) {
        match self.controller.try_move(col) {
            MoveResult::Applied { .. } => self.refresh_status(),
            MoveResult::Rejected(err) => {
                // An automated player proposing an illegal move forfeits.
                self.controller.forfeit(player);
                self.status_line = format!(
                    "player {} made an illegal move ({}) and forfeits",
                    player.label(),
                    err
                );
            }
            MoveResult::GameOver => {}
        }
    }

    /// A human drops a disc in `col`. Illegal input keeps the turn; the
    /// human just picks again.
    pub fn drop_at(&mut self, col: usize) {
        if !self.is_human_turn() {
            return;
        }
        match self.controller.try_move(col) {
            MoveResult::Applied { .. } => self.refresh_status(),
            MoveResult::Rejected(err) => {
                self.status_line = format!("{err}; pick another column");
            }
            MoveResult::GameOver => {}
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let cols = self.controller.board().cols() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, cols - 1) as usize;
    }

    /// Resets to the starting position (the loaded board, if any).
    pub fn new_game(&mut self) {
        self.request_id += 1; // orphan any in-flight search
        self.ai_state = AiState::Idle;
        self.search_started = None;
        *self.progress.lock() = None;
        self.controller = GameController::new(self.initial_board.clone());
        self.cursor = self.controller.board().cols() / 2;
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        self.status_line = match self.controller.status() {
            GameStatus::InProgress => {
                let player = self.controller.to_move();
                if self.spec_for(player).is_human() {
                    format!(
                        "player {}: pick a column (1-{})",
                        player.label(),
                        self.controller.board().cols()
                    )
                } else {
                    format!(
                        "player {} ({}) to move",
                        player.label(),
                        self.spec_for(player).name()
                    )
                }
            }
            GameStatus::Won {
                winner,
                by_forfeit: false,
            } => format!("PLAYER {} WINS!", winner.label()),
            GameStatus::Won {
                winner,
                by_forfeit: true,
            } => format!("PLAYER {} WINS BY FORFEIT!", winner.label()),
            GameStatus::Tied => "TIE!".to_string(),
        };
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.ai_tx.send(AiRequest::Stop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ticks the app until the game ends or the cap is hit.
    fn run_to_completion(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while !app.controller.is_over() && Instant::now() < deadline {
            app.tick();
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn leftmost_against_leftmost_fills_columns_until_a_row_wins() {
        let board = Board::new(4, 4).unwrap();
        let mut app = App::new(
            board,
            [PlayerSpec::Leftmost, PlayerSpec::Leftmost],
            1,
            None,
        );
        run_to_completion(&mut app);
        // Both pickers fill columns left to right, so the bottom row
        // eventually belongs entirely to player one.
        assert_eq!(
            app.controller.status(),
            GameStatus::Won {
                winner: Player::One,
                by_forfeit: false
            }
        );
    }

    #[test]
    fn minimax_does_not_lose_to_leftmost() {
        // Leftmost ignores threats entirely; a depth-4 search sees every
        // completable line well before it lands.
        let board = Board::new(6, 7).unwrap();
        let mut app = App::new(
            board,
            [PlayerSpec::Minimax, PlayerSpec::Leftmost],
            4,
            None,
        );
        run_to_completion(&mut app);
        assert!(app.controller.is_over());
        assert!(!matches!(
            app.controller.status(),
            GameStatus::Won {
                winner: Player::Two,
                ..
            }
        ));
    }

    #[test]
    fn human_turns_do_not_dispatch_searches() {
        let board = Board::new(6, 7).unwrap();
        let mut app = App::new(board, [PlayerSpec::Human, PlayerSpec::Minimax], 2, None);
        app.tick();
        assert_eq!(app.ai_state, AiState::Idle);
        assert!(app.is_human_turn());

        // Illegal human input keeps the turn.
        app.drop_at(99);
        assert!(app.is_human_turn());
        assert!(app.status_line.contains("pick another column"));

        // A legal drop hands the turn to the AI.
        app.drop_at(3);
        app.tick();
        assert_eq!(app.ai_state, AiState::Thinking);
    }
}
