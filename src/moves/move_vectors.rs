//! Direction tables and the shared ray walker used by sliding pieces.
//!
//! Directions are listed clockwise starting from "up the board" (towards
//! row 0), which fixes the scan order of every generated move list.

use crate::game_state::{chess_types::*, game_state::GameState};

pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
pub const DIAGONAL: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Empty squares along each ray up to the first occupied cell.
pub fn ray_peaceful_moves(
    game_state: &GameState,
    from: Square,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(to) = cursor {
            if !game_state.is_empty(to) {
                break;
            }
            out.push(to);
            cursor = to.offset(d_row, d_col);
        }
    }
}

/// First occupied cell along each ray, when it holds an opposing piece.
pub fn ray_capturing_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        if let Some((to, piece)) = first_piece_on_ray(game_state, from, d_row, d_col) {
            if piece.color != color {
                out.push(to);
            }
        }
    }
}

/// Whether `target` is reached along one of the rays before any blocker.
pub fn ray_attacks_square(
    game_state: &GameState,
    from: Square,
    directions: &[(i8, i8)],
    target: Square,
) -> bool {
    let d_row = (target.row as i8 - from.row as i8).signum();
    let d_col = (target.col as i8 - from.col as i8).signum();
    if (d_row, d_col) == (0, 0) || !directions.contains(&(d_row, d_col)) {
        return false;
    }
    let aligned = from.row == target.row
        || from.col == target.col
        || from.row.abs_diff(target.row) == from.col.abs_diff(target.col);
    if !aligned {
        return false;
    }

    let mut cursor = from.offset(d_row, d_col);
    while let Some(square) = cursor {
        if square == target {
            return true;
        }
        if !game_state.is_empty(square) {
            return false;
        }
        cursor = square.offset(d_row, d_col);
    }
    false
}

/// Fixed-offset destinations (knight jumps, king steps) that are empty.
pub fn step_peaceful_moves(
    game_state: &GameState,
    from: Square,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if game_state.is_empty(to) {
                out.push(to);
            }
        }
    }
}

/// Fixed-offset destinations that hold an opposing piece.
pub fn step_capturing_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if matches!(game_state.piece_at(to), Some(piece) if piece.color != color) {
                out.push(to);
            }
        }
    }
}

fn first_piece_on_ray(
    game_state: &GameState,
    from: Square,
    d_row: i8,
    d_col: i8,
) -> Option<(Square, Piece)> {
    let mut cursor = from.offset(d_row, d_col);
    while let Some(square) = cursor {
        if let Some(piece) = game_state.piece_at(square) {
            return Some((square, piece));
        }
        cursor = square.offset(d_row, d_col);
    }
    None
}
