//! Batch AI-vs-AI match runner.
//!
//! Plays a configurable number of games between two automated strategies,
//! in parallel across a rayon pool, and reports win rates and throughput.
//! Per-game RNGs are seeded from the game index, so a run is reproducible
//! at any thread count. Every game invokes the search engine from its own
//! thread with its own board, which also exercises the engine's
//! no-shared-state guarantee.

use clap::Parser;
use colored::Colorize;
use connect4::players::{Leftmost, Middle, Minimax, Random};
use connect4::{Board, GameOutcome, MoveSource, Player};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Batch AI-vs-AI Connect Four matches", long_about = None)]
struct Args {
    /// Strategy for player 1 (minimax, random, leftmost, middle)
    #[arg(long, default_value = "minimax")]
    player1: String,

    /// Strategy for player 2 (minimax, random, leftmost, middle)
    #[arg(long, default_value = "random")]
    player2: String,

    /// Number of games to play
    #[arg(short, long, default_value_t = 100)]
    games: u64,

    /// Number of rows on the board
    #[arg(short, long, default_value_t = 6)]
    rows: usize,

    /// Number of columns on the board
    #[arg(short, long, default_value_t = 7)]
    cols: usize,

    /// Minimax search depth, in plies
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Worker threads (0 = one per CPU)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,
}

#[derive(Debug, Clone, Copy)]
enum Strategy {
    Leftmost,
    Middle,
    Random,
    Minimax,
}

fn parse_strategy(name: &str) -> Option<Strategy> {
    match name {
        "leftmost" => Some(Strategy::Leftmost),
        "middle" => Some(Strategy::Middle),
        "random" => Some(Strategy::Random),
        "minimax" => Some(Strategy::Minimax),
        _ => None,
    }
}

fn build_strategy(strategy: Strategy, depth: u32, seed: u64) -> Box<dyn MoveSource> {
    match strategy {
        Strategy::Leftmost => Box::new(Leftmost),
        Strategy::Middle => Box::new(Middle::seeded(seed)),
        Strategy::Random => Box::new(Random::seeded(seed)),
        Strategy::Minimax => Box::new(Minimax::new(depth)),
    }
}

fn main() {
    let args = Args::parse();

    let (p1, p2) = match (parse_strategy(&args.player1), parse_strategy(&args.player2)) {
        (Some(p1), Some(p2)) => (p1, p2),
        _ => {
            eprintln!(
                "{} strategies must be one of: minimax, random, leftmost, middle",
                "error:".red().bold()
            );
            std::process::exit(1);
        }
    };
    if args.depth == 0 {
        eprintln!("{} search depth must be at least 1", "error:".red().bold());
        std::process::exit(1);
    }
    if let Err(err) = Board::new(args.rows, args.cols) {
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(1);
    }

    let threads = if args.threads == 0 {
        num_cpus::get()
    } else {
        args.threads
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("failed to build thread pool");

    println!("Connect Four - Match Runner");
    println!("===========================");
    println!("player 1: {}", args.player1.yellow());
    println!("player 2: {}", args.player2.red());
    println!(
        "games: {}, board: {}x{}, depth: {}, threads: {}",
        args.games, args.rows, args.cols, args.depth, threads
    );
    println!("---------------------------");

    let start = Instant::now();
    let outcomes: Vec<GameOutcome> = pool.install(|| {
        (0..args.games)
            .into_par_iter()
            .map(|game| play_game(p1, p2, args.rows, args.cols, args.depth, game))
            .collect()
    });
    let elapsed = start.elapsed();

    let p1_wins = outcomes
        .iter()
        .filter(|o| matches!(o, GameOutcome::Win(Player::One)))
        .count();
    let p2_wins = outcomes
        .iter()
        .filter(|o| matches!(o, GameOutcome::Win(Player::Two)))
        .count();
    let ties = outcomes
        .iter()
        .filter(|o| matches!(o, GameOutcome::Tie))
        .count();
    let percent = |count: usize| 100.0 * count as f64 / args.games.max(1) as f64;

    println!(
        "player 1 ({}): {} wins ({:.1}%)",
        args.player1.yellow(),
        p1_wins,
        percent(p1_wins)
    );
    println!(
        "player 2 ({}): {} wins ({:.1}%)",
        args.player2.red(),
        p2_wins,
        percent(p2_wins)
    );
    println!("ties: {} ({:.1}%)", ties, percent(ties));
    println!(
        "finished {} games in {:.2?} ({:.1} games/sec)",
        args.games,
        elapsed,
        args.games as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
}

/// Plays one game to completion. An illegal or failed selection forfeits,
/// scored as a win for the other side.
fn play_game(p1: Strategy, p2: Strategy, rows: usize, cols: usize, depth: u32, game: u64) -> GameOutcome {
    let mut board = Board::new(rows, cols).expect("dimensions validated at startup");
    let mut sources = [
        build_strategy(p1, depth, game * 2 + 1),
        build_strategy(p2, depth, game * 2 + 2),
    ];
    let mut to_move = Player::One;

    loop {
        match board.outcome() {
            GameOutcome::InProgress => {}
            outcome => return outcome,
        }
        let seat = (to_move.label() - 1) as usize;
        let forfeit = match sources[seat].choose_move(&board, to_move) {
            Ok(col) => board.apply_move(col, to_move).is_err(),
            Err(_) => true,
        };
        if forfeit {
            return GameOutcome::Win(to_move.other());
        }
        to_move = to_move.other();
    }
}
