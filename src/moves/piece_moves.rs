//! Per-kind dispatch of pseudo-legal move enumeration.
//!
//! Every list is in a fixed scan order: ascending direction index, then
//! distance along the direction. `all_pseudo_legal_moves` lists peaceful
//! moves before captures.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::{bishop_moves, king_moves, knight_moves, pawn_moves, queen_moves, rook_moves};

impl Piece {
    /// Destinations on empty squares, including castling and double pawn pushes.
    pub fn peaceful_moves(&self, game_state: &GameState, from: Square) -> Vec<Square> {
        let mut out = Vec::with_capacity(16);
        match self.kind {
            PieceKind::Pawn => pawn_moves::peaceful_moves(game_state, from, self.color, &mut out),
            PieceKind::Knight => knight_moves::peaceful_moves(game_state, from, &mut out),
            PieceKind::Bishop => bishop_moves::peaceful_moves(game_state, from, &mut out),
            PieceKind::Rook => rook_moves::peaceful_moves(game_state, from, &mut out),
            PieceKind::Queen => queen_moves::peaceful_moves(game_state, from, &mut out),
            PieceKind::King => king_moves::peaceful_moves(game_state, from, self.color, &mut out),
        }
        out
    }

    /// Destinations holding an opposing piece, plus the en-passant square for pawns.
    pub fn capturing_moves(&self, game_state: &GameState, from: Square) -> Vec<Square> {
        let mut out = Vec::with_capacity(8);
        self.push_capturing_moves(game_state, from, &mut out);
        out
    }

    pub fn all_pseudo_legal_moves(&self, game_state: &GameState, from: Square) -> Vec<Square> {
        let mut out = self.peaceful_moves(game_state, from);
        self.push_capturing_moves(game_state, from, &mut out);
        out
    }

    /// Whether this piece standing on `from` could capture on `target`.
    ///
    /// Ignores what occupies `target`, so it also answers "is this square
    /// covered" for empty squares and friendly pieces.
    pub fn attacks_square(&self, game_state: &GameState, from: Square, target: Square) -> bool {
        match self.kind {
            PieceKind::Pawn => pawn_moves::attacks_square(from, self.color, target),
            PieceKind::Knight => knight_moves::attacks_square(from, target),
            PieceKind::Bishop => bishop_moves::attacks_square(game_state, from, target),
            PieceKind::Rook => rook_moves::attacks_square(game_state, from, target),
            PieceKind::Queen => queen_moves::attacks_square(game_state, from, target),
            PieceKind::King => king_moves::attacks_square(from, target),
        }
    }

    fn push_capturing_moves(&self, game_state: &GameState, from: Square, out: &mut Vec<Square>) {
        let color = self.color;
        match self.kind {
            PieceKind::Pawn => pawn_moves::capturing_moves(game_state, from, color, out),
            PieceKind::Knight => knight_moves::capturing_moves(game_state, from, color, out),
            PieceKind::Bishop => bishop_moves::capturing_moves(game_state, from, color, out),
            PieceKind::Rook => rook_moves::capturing_moves(game_state, from, color, out),
            PieceKind::Queen => queen_moves::capturing_moves(game_state, from, color, out),
            PieceKind::King => king_moves::capturing_moves(game_state, from, color, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_twenty_pseudo_legal_moves_for_white() {
        let game = GameState::new_game();
        let total: usize = game
            .pieces(Color::White)
            .map(|(square, piece)| piece.all_pseudo_legal_moves(&game, square).len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn peaceful_moves_come_before_captures() {
        let game = GameState::from_fen("4k3/8/8/3p4/4R3/8/8/4K3 w - - 0 1").expect("FEN");
        let e4 = Square::at(4, 4);
        let rook = game.piece_at(e4).expect("rook on e4");
        let all = rook.all_pseudo_legal_moves(&game, e4);
        let captures = rook.capturing_moves(&game, e4);
        // d5 is diagonal to the rook; only the king on e8 is reachable.
        assert_eq!(captures, vec![Square::at(0, 4)]);
        assert_eq!(all.len(), 13);
        assert_eq!(all.first(), Some(&Square::at(3, 4)));
        assert_eq!(all.last(), Some(&Square::at(0, 4)));
    }

    #[test]
    fn knight_capture_list_matches_attack_test() {
        let game = GameState::from_fen("4k3/8/2p1p3/8/3N4/8/8/4K3 w - - 0 1").expect("FEN");
        let d4 = Square::at(4, 3);
        let knight = game.piece_at(d4).expect("knight on d4");
        let captures = knight.capturing_moves(&game, d4);
        assert_eq!(captures, vec![Square::at(2, 2), Square::at(2, 4)]);
        for target in captures {
            assert!(knight.attacks_square(&game, d4, target));
        }
    }
}
