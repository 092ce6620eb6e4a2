//! Engine-vs-engine game runner.
//!
//! Run with:
//! `cargo run --release --bin self_play -- --white minimax --black random --seed 7`

use std::path::PathBuf;

use clap::Parser;

use chess_duel::chess_errors::ChessError;
use chess_duel::config::{GameConfig, OpponentKind};
use chess_duel::search::minimax::SearchConfig;
use chess_duel::session::game_observer::TracingObserver;
use chess_duel::utils::engine_match_harness::{play_engine_match, MatchConfig};
use chess_duel::utils::logging::init_logging;
use chess_duel::utils::render_game_state::render_game_state;

#[derive(Debug, Parser)]
#[command(name = "self_play", about = "Let two engines play one game")]
struct SelfPlayArgs {
    #[arg(long, value_enum, default_value_t = OpponentKind::Minimax)]
    white: OpponentKind,

    #[arg(long, value_enum, default_value_t = OpponentKind::Random)]
    black: OpponentKind,

    #[arg(
        long,
        env = "CHESS_AI_DEPTH",
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(1..=6)
    )]
    depth: u8,

    /// Seeds the random opening and any random engine.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 200)]
    max_plies: u16,

    #[arg(long, default_value_t = 0)]
    opening_plies: u8,

    #[arg(long, env = "CHESS_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), ChessError> {
    let args = SelfPlayArgs::parse();
    init_logging(args.log_file.as_deref())?;

    let engine_config = |opponent: OpponentKind, seed_offset: u64| GameConfig {
        search: SearchConfig { depth: args.depth },
        opponent,
        seed: Some(args.seed.wrapping_add(seed_offset)),
        ..GameConfig::default()
    };
    let mut white = engine_config(args.white, 1).build_engine();
    let mut black = engine_config(args.black, 2).build_engine();

    let result = play_engine_match(
        white.as_mut(),
        black.as_mut(),
        TracingObserver,
        args.seed,
        MatchConfig {
            max_plies: args.max_plies,
            opening_random_plies: args.opening_plies,
        },
    )?;

    println!("{}\n", render_game_state(&result.final_state));
    println!("outcome: {:?}", result.outcome);
    println!("final FEN: {}", result.final_state.get_fen());
    for (name, moves, total_ns) in [
        (white.name(), result.white_move_count, result.white_total_time_ns),
        (black.name(), result.black_move_count, result.black_total_time_ns),
    ] {
        let avg_ms = if moves == 0 {
            0.0
        } else {
            total_ns as f64 / f64::from(moves) / 1_000_000.0
        };
        println!("{name}: {moves} moves, {avg_ms:.3} ms per move");
    }
    Ok(())
}
