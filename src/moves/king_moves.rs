use crate::game_state::chess_rules::{KINGSIDE_ROOK_COL, KING_START_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::move_vectors::{step_capturing_moves, step_peaceful_moves, ALL_DIRECTIONS};

/// One-step moves onto empty squares, followed by any available castling move.
pub fn peaceful_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    step_peaceful_moves(game_state, from, &ALL_DIRECTIONS, out);
    castling_moves(game_state, from, color, out);
}

pub fn capturing_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    step_capturing_moves(game_state, from, color, &ALL_DIRECTIONS, out);
}

#[inline]
pub fn attacks_square(from: Square, target: Square) -> bool {
    from != target && from.row.abs_diff(target.row) <= 1 && from.col.abs_diff(target.col) <= 1
}

fn castling_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    let row = color.back_row();
    if from != Square::at(row, KING_START_COL) {
        return;
    }
    let rights = game_state.castling_rights;
    if rights & (kingside_right(color) | queenside_right(color)) == 0 {
        return;
    }

    let enemy = color.opposite();
    // Cannot castle out of check.
    if is_square_attacked(game_state, from, enemy) {
        return;
    }

    if rights & kingside_right(color) != 0
        && can_castle_towards(game_state, color, KINGSIDE_ROOK_COL, &[5, 6], &[5, 6])
    {
        out.push(Square::at(row, KING_START_COL + 2));
    }
    if rights & queenside_right(color) != 0
        && can_castle_towards(game_state, color, QUEENSIDE_ROOK_COL, &[1, 2, 3], &[3, 2])
    {
        out.push(Square::at(row, KING_START_COL - 2));
    }
}

fn can_castle_towards(
    game_state: &GameState,
    color: Color,
    rook_col: u8,
    empty_cols: &[u8],
    king_path_cols: &[u8],
) -> bool {
    let row = color.back_row();
    if game_state.piece_at(Square::at(row, rook_col)) != Some(Piece::new(PieceKind::Rook, color)) {
        return false;
    }
    if empty_cols
        .iter()
        .any(|&col| !game_state.is_empty(Square::at(row, col)))
    {
        return false;
    }
    !king_path_cols
        .iter()
        .any(|&col| is_square_attacked(game_state, Square::at(row, col), color.opposite()))
}
