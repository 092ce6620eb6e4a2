use crate::game_state::{chess_types::*, game_state::GameState};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    game_state.king_square(color)
}

/// True when `color`'s king stands on a square the other side attacks.
///
/// A side without a king on the board is never in check.
#[inline]
pub fn is_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Reverse scan: does any piece of `attacker_color` reach `square` by its capture rule.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    game_state
        .pieces(attacker_color)
        .any(|(from, piece)| piece.attacks_square(game_state, from, square))
}

/// Every piece of `attacker_color` that attacks `square`, in row-major order.
pub fn attackers_to_square(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, Piece)> {
    game_state
        .pieces(attacker_color)
        .filter(|(from, piece)| piece.attacks_square(game_state, *from, square))
        .collect()
}
