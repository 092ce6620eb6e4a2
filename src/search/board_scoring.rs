//! Static position evaluation used at the search horizon.

use crate::game_state::{chess_types::*, game_state::GameState};

pub trait BoardScorer {
    /// Score from the perspective of `perspective`; positive favours that side.
    fn score(&self, game_state: &GameState, perspective: Color) -> i32;
}

/// Material balance in centipawns. Kings are never captured and carry no value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        game_state
            .occupied()
            .map(|(_, piece)| match piece.color {
                Color::White => Self::piece_value(piece.kind),
                Color::Black => -Self::piece_value(piece.kind),
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        let white_minus_black = Self::material_balance_white_minus_black(game_state);
        match perspective {
            Color::White => white_minus_black,
            Color::Black => -white_minus_black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(MaterialScorer.score(&game, Color::White), 0);
        assert_eq!(MaterialScorer.score(&game, Color::Black), 0);
    }

    #[test]
    fn score_is_antisymmetric_between_perspectives() {
        // Two rooks against a knight.
        let game = GameState::from_fen("4k3/8/8/3n4/8/8/8/R3K2R w - - 0 1").expect("FEN");
        assert_eq!(MaterialScorer.score(&game, Color::White), 700);
        assert_eq!(MaterialScorer.score(&game, Color::Black), -700);
    }
}
