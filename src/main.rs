//! Interactive console game: a human against the configured engine.
//!
//! Run with:
//! `cargo run --release -- --depth 3 --human-color white`

use std::io::{self, BufRead, Write};

use clap::Parser;

use chess_duel::chess_errors::ChessError;
use chess_duel::config::{Cli, GameConfig};
use chess_duel::session::chess_game::ChessGame;
use chess_duel::session::game_observer::{GameObserver, TracingObserver};
use chess_duel::utils::algebraic::{algebraic_to_square, parse_move_input};
use chess_duel::utils::logging::init_logging;
use chess_duel::utils::render_game_state::render_game_state;

fn main() -> Result<(), ChessError> {
    let config = GameConfig::from(Cli::parse());
    init_logging(config.log_file.as_deref())?;

    let mut engine = config.build_engine();
    let mut game = ChessGame::with_observer(TracingObserver);
    tracing::info!(
        human = %config.human_color,
        opponent = engine.name(),
        depth = config.search.depth,
        started_at = %game.started_at().to_rfc3339(),
        "new game"
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        println!("\n{}\n", render_game_state(game.state()));

        let outcome = game.checkmate_stalemate_checker()?;
        if outcome.is_terminal() {
            println!("Game over: {outcome} (code {})", outcome.code());
            break;
        }

        let side = game.side_to_move();
        if side == config.ai_color() {
            println!("{side} ({}) is thinking...", engine.name());
            let mv = game
                .play_ai_move(engine.as_mut())?
                .ok_or(ChessError::SearchReturnedNoMove)?;
            println!("{side} plays {mv}");
            continue;
        }

        print!("{side} to move ('e2 e4', 'moves e2', 'undo', 'quit'): ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "undo" => undo_turn(&mut game, &config)?,
            _ if input.starts_with("moves ") => {
                let square_text = input.trim_start_matches("moves ").trim();
                match algebraic_to_square(square_text) {
                    Ok(square) => {
                        let targets: Vec<String> = game
                            .get_valid_moves(square)?
                            .iter()
                            .map(ToString::to_string)
                            .collect();
                        println!("{square}: {}", targets.join(" "));
                    }
                    Err(err) => report_rejected(input, &err),
                }
            }
            _ => match parse_move_input(input) {
                Ok(mv) => match game.move_piece(mv.from, mv.to, false) {
                    Ok(()) => {}
                    Err(err @ ChessError::IllegalMove { .. }) => report_rejected(input, &err),
                    Err(err) => return Err(err),
                },
                Err(err) => report_rejected(input, &err),
            },
        }
    }

    tracing::info!(plies = game.history().len(), "session closed");
    Ok(())
}

/// Take back the human's last move together with the engine's reply.
fn undo_turn<O: GameObserver>(game: &mut ChessGame<O>, config: &GameConfig) -> Result<(), ChessError> {
    match game.undo_last_move() {
        Ok(_) => {
            if game.side_to_move() != config.human_color && !game.history().is_empty() {
                game.undo_last_move()?;
            }
            Ok(())
        }
        Err(ChessError::NothingToUndo) => {
            println!("Nothing to undo.");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn report_rejected(input: &str, err: &ChessError) {
    tracing::warn!(input, error = %err, "rejected input");
    println!("{err}");
}
