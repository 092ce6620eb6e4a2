use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    /// Captured piece and the square it stood on (differs from `mv.to` for en passant).
    pub captured: Option<(Square, Piece)>,
    pub promoted: bool,
    /// Rook relocation of a castling move.
    pub rook_move: Option<(Square, Square)>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}

impl UndoState {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        matches!(self.captured, Some((square, _)) if square != self.mv.to)
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        self.rook_move.is_some()
    }
}
