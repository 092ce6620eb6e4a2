use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_vectors::{step_capturing_moves, step_peaceful_moves};

/// Jump offsets in ascending `(row, col)` order.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub fn peaceful_moves(game_state: &GameState, from: Square, out: &mut Vec<Square>) {
    step_peaceful_moves(game_state, from, &KNIGHT_OFFSETS, out);
}

pub fn capturing_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    step_capturing_moves(game_state, from, color, &KNIGHT_OFFSETS, out);
}

#[inline]
pub fn attacks_square(from: Square, target: Square) -> bool {
    let d_row = from.row.abs_diff(target.row);
    let d_col = from.col.abs_diff(target.col);
    (d_row == 1 && d_col == 2) || (d_row == 2 && d_col == 1)
}
