//! Head-to-head engine match harness.
//!
//! Runs two `Engine` implementations against each other through a
//! `ChessGame` session, with an optional seeded random opening prefix.

use std::time::Instant;

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::move_generation::game_outcome::Outcome;
use crate::session::chess_game::ChessGame;
use crate::session::game_observer::GameObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawFiftyMoveRule,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_random_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            opening_random_plies: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub opening_moves: Vec<Move>,
    pub played_moves: Vec<Move>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

/// Play one match from the starting position.
///
/// `engine_white` is White, `engine_black` is Black. `seed` drives the random
/// opening prefix only.
pub fn play_engine_match<O: GameObserver>(
    engine_white: &mut dyn Engine,
    engine_black: &mut dyn Engine,
    observer: O,
    seed: u64,
    config: MatchConfig,
) -> ChessResult<MatchResult> {
    engine_white.new_game();
    engine_black.new_game();

    let mut game = ChessGame::with_observer(observer);
    let opening_moves = play_random_opening(&mut game, seed, config.opening_random_plies)?;

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        final_state: GameState::new_empty(),
        opening_moves,
        played_moves: Vec::new(),
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    let mut plies: u16 = 0;
    result.outcome = loop {
        if let Some(finished) = finished_outcome(&mut game)? {
            break finished;
        }
        if plies >= config.max_plies {
            break MatchOutcome::DrawMaxPlies;
        }

        let mover = game.side_to_move();
        let started = Instant::now();
        let chosen = match mover {
            Color::White => game.choose_ai_move(&mut *engine_white)?,
            Color::Black => game.choose_ai_move(&mut *engine_black)?,
        }
        .ok_or(ChessError::SearchReturnedNoMove)?;
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::White => {
                result.white_move_count = result.white_move_count.saturating_add(1);
                result.white_total_time_ns = result.white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Black => {
                result.black_move_count = result.black_move_count.saturating_add(1);
                result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        game.move_piece(chosen.from, chosen.to, true)?;
        result.played_moves.push(chosen);
        plies += 1;
    };

    result.final_state = game.state().clone();
    Ok(result)
}

/// Match result for a position that ends the game, `None` while play goes on.
/// A position reached on the last allowed ply is still classified.
fn finished_outcome<O: GameObserver>(game: &mut ChessGame<O>) -> ChessResult<Option<MatchOutcome>> {
    let finished = match game.checkmate_stalemate_checker()? {
        Outcome::WhiteWins => Some(MatchOutcome::WhiteWinCheckmate),
        Outcome::BlackWins => Some(MatchOutcome::BlackWinCheckmate),
        Outcome::Stalemate => Some(MatchOutcome::DrawStalemate),
        Outcome::Ongoing if game.state().halfmove_clock >= 100 => {
            Some(MatchOutcome::DrawFiftyMoveRule)
        }
        Outcome::Ongoing => None,
    };
    Ok(finished)
}

fn play_random_opening<O: GameObserver>(
    game: &mut ChessGame<O>,
    seed: u64,
    plies: u8,
) -> ChessResult<Vec<Move>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening = Vec::with_capacity(usize::from(plies));
    for _ in 0..plies {
        let legal = game.legal_moves()?;
        let Some(&mv) = legal.as_slice().choose(&mut rng) else {
            break;
        };
        game.move_piece(mv.from, mv.to, false)?;
        opening.push(mv);
    }
    Ok(opening)
}
