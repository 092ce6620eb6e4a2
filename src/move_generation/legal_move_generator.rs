//! Legal move generation.
//!
//! Pseudo-legal destinations come from the per-piece enumerators; each one is
//! then played on the live state inside a `MoveGuard` and kept only when the
//! mover's king is not left in check. The guard undoes the move on every exit
//! path, so the state is unchanged once filtering returns.

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::move_generator::MoveGenerator;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &mut GameState) -> ChessResult<Vec<Move>> {
        let side = game_state.side_to_move;
        legal_moves(game_state, side)
    }
}

/// Keep only the candidate destinations that do not expose the mover's king.
pub fn filter_legal(
    game_state: &mut GameState,
    from: Square,
    candidates: Vec<Square>,
) -> ChessResult<Vec<Square>> {
    let mover = game_state.side_to_move;
    let mut legal = Vec::with_capacity(candidates.len());
    for to in candidates {
        let guard = game_state.scoped_move(Move::new(from, to))?;
        if !is_in_check(&guard, mover) {
            legal.push(to);
        }
    }
    Ok(legal)
}

/// Legal destinations for the piece on `square`.
///
/// Empty when the square is empty or holds a piece of the side not on move.
pub fn get_valid_moves(game_state: &mut GameState, square: Square) -> ChessResult<Vec<Square>> {
    let Some(piece) = movable_piece(game_state, square) else {
        return Ok(Vec::new());
    };
    let candidates = piece.all_pseudo_legal_moves(game_state, square);
    filter_legal(game_state, square, candidates)
}

pub fn get_valid_peaceful_moves(
    game_state: &mut GameState,
    square: Square,
) -> ChessResult<Vec<Square>> {
    let Some(piece) = movable_piece(game_state, square) else {
        return Ok(Vec::new());
    };
    let candidates = piece.peaceful_moves(game_state, square);
    filter_legal(game_state, square, candidates)
}

pub fn get_valid_capturing_moves(
    game_state: &mut GameState,
    square: Square,
) -> ChessResult<Vec<Square>> {
    let Some(piece) = movable_piece(game_state, square) else {
        return Ok(Vec::new());
    };
    let candidates = piece.capturing_moves(game_state, square);
    filter_legal(game_state, square, candidates)
}

/// All legal moves of `side`, grouped by piece in row-major order.
///
/// Only the side to move has legal moves; any other side yields an empty list.
pub fn legal_moves(game_state: &mut GameState, side: Color) -> ChessResult<Vec<Move>> {
    if side != game_state.side_to_move {
        return Ok(Vec::new());
    }
    let origins: Vec<Square> = game_state.pieces(side).map(|(square, _)| square).collect();
    let mut moves = Vec::with_capacity(48);
    for from in origins {
        for to in get_valid_moves(game_state, from)? {
            moves.push(Move::new(from, to));
        }
    }
    Ok(moves)
}

/// Whether the side to move has at least one legal move. Stops at the first one found.
pub fn has_legal_move(game_state: &mut GameState) -> ChessResult<bool> {
    let side = game_state.side_to_move;
    let origins: Vec<(Square, Piece)> = game_state.pieces(side).collect();
    for (from, piece) in origins {
        for to in piece.all_pseudo_legal_moves(game_state, from) {
            let guard = game_state.scoped_move(Move::new(from, to))?;
            if !is_in_check(&guard, side) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn movable_piece(game_state: &GameState, square: Square) -> Option<Piece> {
    game_state
        .piece_at(square)
        .filter(|piece| piece.color == game_state.side_to_move)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_legal_moves() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let moves = LegalMoveGenerator
            .generate_legal_moves(&mut game)
            .expect("generation should succeed");
        assert_eq!(moves.len(), 20);
        assert_eq!(game, before);
    }

    #[test]
    fn empty_square_and_off_turn_piece_have_no_moves() {
        let mut game = GameState::new_game();
        assert!(get_valid_moves(&mut game, Square::at(4, 4))
            .expect("query")
            .is_empty());
        // Black knight on b8 while White is to move.
        assert!(get_valid_moves(&mut game, Square::at(0, 1))
            .expect("query")
            .is_empty());
        assert!(legal_moves(&mut game, Color::Black).expect("query").is_empty());
    }

    #[test]
    fn pinned_rook_only_moves_along_pin() {
        // Rook on e4 pinned to the king on e1 by the rook on e8.
        let mut game = GameState::from_fen("4r1k1/8/8/8/4R3/8/8/4K3 w - - 0 1").expect("FEN");
        let e4 = Square::at(4, 4);
        let moves = get_valid_moves(&mut game, e4).expect("query");
        assert!(moves.iter().all(|square| square.col == 4));
        assert!(moves.contains(&Square::at(0, 4)));
        assert_eq!(
            get_valid_capturing_moves(&mut game, e4).expect("query"),
            vec![Square::at(0, 4)]
        );
        assert_eq!(get_valid_peaceful_moves(&mut game, e4).expect("query").len(), 5);
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").expect("FEN");
        let moves = get_valid_moves(&mut game, Square::at(7, 4)).expect("query");
        // The rook covers d1, e2 and f2 but is itself undefended.
        assert_eq!(moves, vec![Square::at(7, 5), Square::at(6, 3)]);
        assert!(has_legal_move(&mut game).expect("query"));
    }
}
