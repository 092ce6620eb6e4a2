use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_vectors::{
    ray_attacks_square, ray_capturing_moves, ray_peaceful_moves, ALL_DIRECTIONS,
};

pub fn peaceful_moves(game_state: &GameState, from: Square, out: &mut Vec<Square>) {
    ray_peaceful_moves(game_state, from, &ALL_DIRECTIONS, out);
}

pub fn capturing_moves(game_state: &GameState, from: Square, color: Color, out: &mut Vec<Square>) {
    ray_capturing_moves(game_state, from, color, &ALL_DIRECTIONS, out);
}

#[inline]
pub fn attacks_square(game_state: &GameState, from: Square, target: Square) -> bool {
    ray_attacks_square(game_state, from, &ALL_DIRECTIONS, target)
}
