use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

/// Produces the legal moves of the side to move.
///
/// Implementations may apply and undo moves on `game_state` while working but
/// must hand it back unchanged.
pub trait MoveGenerator {
    fn generate_legal_moves(&self, game_state: &mut GameState) -> ChessResult<Vec<Move>>;
}
