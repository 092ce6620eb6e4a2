use crate::game_state::{chess_types::*, game_state::GameState};

/// Forward pushes: one square, or two from the starting row when both are empty.
pub fn peaceful_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    let forward = color.forward();
    let Some(one_step) = from.offset(forward, 0) else {
        return;
    };
    if !game_state.is_empty(one_step) {
        return;
    }
    out.push(one_step);

    if from.row == color.pawn_start_row() {
        if let Some(two_step) = from.offset(2 * forward, 0) {
            if game_state.is_empty(two_step) {
                out.push(two_step);
            }
        }
    }
}

/// Diagonal forward captures, including the en-passant target square.
pub fn capturing_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    for d_col in [-1i8, 1i8] {
        let Some(to) = from.offset(color.forward(), d_col) else {
            continue;
        };
        match game_state.piece_at(to) {
            Some(target) if target.color != color => out.push(to),
            Some(_) => {}
            None => {
                if is_en_passant_target(game_state, from, to, color) {
                    out.push(to);
                }
            }
        }
    }
}

#[inline]
pub fn attacks_square(from: Square, color: Color, target: Square) -> bool {
    from.row as i8 + color.forward() == target.row as i8 && from.col.abs_diff(target.col) == 1
}

fn is_en_passant_target(game_state: &GameState, from: Square, to: Square, color: Color) -> bool {
    if game_state.en_passant_square != Some(to) {
        return false;
    }
    let passed = Square::at(from.row, to.col);
    game_state.piece_at(passed) == Some(Piece::new(PieceKind::Pawn, color.opposite()))
}
