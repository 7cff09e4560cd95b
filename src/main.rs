//! # Connect Four Terminal Arena
//!
//! Entry point for playing Connect Four between any mix of humans and
//! automated players. The rules and the minimax search live in the
//! `connect4` library; this binary adds argument parsing, board-file
//! loading, turn coordination, and a Ratatui terminal interface.
//!
//! ## Usage
//! ```text
//! play                                  # human vs human, 6x7 board
//! play --player2 minimax --depth 7     # human vs search
//! play --player1 minimax --player2 random --fast --verbose
//! play --board opening.txt --player2 minimax
//! ```
//!
//! Automated players: `minimax`, `random`, `leftmost`, `middle`.

pub mod app;
pub mod board_file;
pub mod game_controller;
pub mod tui;

use crate::app::{build_source, App, PlayerSpec};
use crate::game_controller::{GameController, GameStatus, MoveResult};
use clap::Parser;
use colored::Colorize;
use connect4::{Board, MoveSource, Player, SelectionError};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Play Connect Four in the terminal!", long_about = None)]
struct Args {
    /// First player: "human" or an automated strategy
    /// (minimax, random, leftmost, middle)
    #[arg(long, default_value = "human")]
    player1: String,

    /// Second player: "human" or an automated strategy
    #[arg(long, default_value = "human")]
    player2: String,

    /// Number of rows on the board
    #[arg(short, long, default_value_t = 6)]
    rows: usize,

    /// Number of columns on the board
    #[arg(short, long, default_value_t = 7)]
    cols: usize,

    /// File containing a starting board state
    #[arg(short, long)]
    board: Option<PathBuf>,

    /// Minimax search depth, in plies
    #[arg(short, long, default_value_t = 6)]
    depth: u32,

    /// Soft time budget per automated move, in seconds (0 = unlimited)
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Skip the interactive UI and play at full speed (AI vs AI only)
    #[arg(long)]
    fast: bool,

    /// Print game details while playing
    #[arg(long)]
    verbose: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let specs = match (
        PlayerSpec::parse(&args.player1),
        PlayerSpec::parse(&args.player2),
    ) {
        (Some(p1), Some(p2)) => [p1, p2],
        _ => {
            eprintln!(
                "{} players must be one of: human, minimax, random, leftmost, middle",
                "error:".red().bold()
            );
            std::process::exit(1);
        }
    };

    if args.depth == 0 {
        eprintln!("{} search depth must be at least 1", "error:".red().bold());
        std::process::exit(1);
    }

    let board = match starting_board(&args) {
        Ok(board) => board,
        Err(message) => {
            eprintln!("{} {}", "error:".red().bold(), message);
            std::process::exit(1);
        }
    };

    let time_budget = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));

    // Full-speed play is only meaningful with no human in the loop.
    if args.fast && specs.iter().all(|spec| !spec.is_human()) {
        run_headless(board, specs, args.depth, time_budget, args.verbose);
        return Ok(());
    }

    let mut app = App::new(board, specs, args.depth, time_budget);
    tui::run_tui(&mut app)
}

/// Builds the starting board from the CLI arguments. A board file, when
/// given, wins over `--rows`/`--cols`; mismatches get a warning.
fn starting_board(args: &Args) -> Result<Board, String> {
    match &args.board {
        Some(path) => {
            let board = board_file::load_board(path).map_err(|err| err.to_string())?;
            if board.rows() != args.rows {
                eprintln!(
                    "{} board file has {} rows, ignoring --rows {}",
                    "warning:".yellow().bold(),
                    board.rows(),
                    args.rows
                );
            }
            if board.cols() != args.cols {
                eprintln!(
                    "{} board file has {} columns, ignoring --cols {}",
                    "warning:".yellow().bold(),
                    board.cols(),
                    args.cols
                );
            }
            Ok(board)
        }
        None => Board::new(args.rows, args.cols).map_err(|err| err.to_string()),
    }
}

/// Plays an AI-vs-AI game to completion without the interactive UI.
fn run_headless(
    board: Board,
    specs: [PlayerSpec; 2],
    depth: u32,
    time_budget: Option<Duration>,
    verbose: bool,
) {
    let mut sources: [Option<Box<dyn MoveSource + Send>>; 2] = [
        build_source(specs[0], depth, time_budget, None),
        build_source(specs[1], depth, time_budget, None),
    ];

    if verbose {
        println!("Let's play Connect Four!");
        println!("{}", "=".repeat(50));
        println!("player 1: {}", specs[0].name().yellow());
        println!("player 2: {}", specs[1].name().red());
    }

    let mut controller = GameController::new(board);
    while !controller.is_over() {
        let player = controller.to_move();
        let seat = (player.label() - 1) as usize;
        let source = sources[seat]
            .as_mut()
            .expect("fast mode runs with automated players only");

        match source.choose_move(controller.board(), player) {
            Ok(col) => {
                if verbose {
                    println!(
                        "\tplayer {} ({}) selects column {}",
                        player.label(),
                        source.name(),
                        col + 1
                    );
                }
                if let MoveResult::Rejected(err) = controller.try_move(col) {
                    println!(
                        "player {} made an illegal move ({}) and forfeits",
                        player.label(),
                        err
                    );
                    controller.forfeit(player);
                }
            }
            Err(SelectionError::NoLegalMoves) => {
                // A live game always has an open column; this is a bug,
                // not something to play through.
                eprintln!(
                    "{} move source reported a dead board mid-game",
                    "error:".red().bold()
                );
                std::process::exit(2);
            }
            Err(err) => {
                println!("player {} forfeits ({})", player.label(), err);
                controller.forfeit(player);
            }
        }
    }

    if verbose {
        print!("{}", controller.board());
    }
    match controller.status() {
        GameStatus::Won { winner, by_forfeit } => {
            let headline = format!(
                "PLAYER {} WINS{}!",
                winner.label(),
                if by_forfeit { " BY FORFEIT" } else { "" }
            );
            let colored = if winner == Player::One {
                headline.yellow().bold()
            } else {
                headline.red().bold()
            };
            println!("{}", colored);
        }
        GameStatus::Tied => println!("{}", "TIE!".bold()),
        GameStatus::InProgress => unreachable!("the loop exits only on a finished game"),
    }
}
