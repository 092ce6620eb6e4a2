//! Engine abstraction for the automated opponent.
//!
//! The driver and the match harness pick a move through this trait without
//! knowing which strategy sits behind it.

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::Move, game_state::GameState};

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move. `game_state` is returned unchanged.
    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput>;
}
