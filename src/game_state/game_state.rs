//! Core mailbox board state.
//!
//! `GameState` owns the 8x8 grid, the side to move, king locations, castling
//! and en-passant state, clocks, and the undo stack used by make/unmake style
//! search. Applying `n` moves and undoing `n` moves restores a state that
//! compares equal to the original.

use std::ops::{Deref, DerefMut};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{BACK_RANK_LAYOUT, KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: [[Option<Piece>; 8]; 8],
    pub(crate) king_squares: [Option<Square>; 2],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub(crate) undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [[None; 8]; 8],
            king_squares: [None; 2],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    /// Empty board, White to move, no castling rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut game_state = Self::default();
        for color in [Color::White, Color::Black] {
            let back_row = color.back_row();
            let pawn_row = color.pawn_start_row();
            for (col, kind) in BACK_RANK_LAYOUT.iter().enumerate() {
                let col = col as u8;
                game_state.put(Square::at(back_row, col), Some(Piece::new(*kind, color)));
                game_state.put(
                    Square::at(pawn_row, col),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
        game_state.castling_rights = CASTLE_ALL;
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color.index()]
    }

    /// Place a piece for position setup, returning whatever stood there.
    ///
    /// Placing a second king for one side is rejected.
    pub fn place_piece(&mut self, square: Square, piece: Piece) -> ChessResult<Option<Piece>> {
        if piece.kind == PieceKind::King {
            if let Some(existing) = self.king_square(piece.color) {
                if existing != square {
                    return Err(ChessError::DuplicateKing(piece.color));
                }
            }
        }
        let replaced = self.take(square);
        self.put(square, Some(piece));
        Ok(replaced)
    }

    /// Remove a piece for position setup.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.take(square)
    }

    /// All occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Square::at(row as u8, col as u8), piece))
            })
        })
    }

    /// Pieces of one side with their squares, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[inline]
    pub fn last_undo(&self) -> Option<&UndoState> {
        self.undo_stack.last()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_undo().map(|undo| undo.mv)
    }

    /// Apply a move for the side to move without any check-safety test.
    ///
    /// Legality is the caller's responsibility; this only rejects moves that
    /// cannot be expressed on the board at all.
    pub fn make_move(&mut self, mv: Move) -> ChessResult<()> {
        let Move { from, to } = mv;
        let piece = self.piece_at(from).ok_or(ChessError::EmptySquare(from))?;
        if piece.color != self.side_to_move {
            return Err(ChessError::NotSideToMove {
                square: from,
                color: piece.color,
                side_to_move: self.side_to_move,
            });
        }
        if from == to || matches!(self.piece_at(to), Some(target) if target.color == piece.color)
        {
            return Err(ChessError::IllegalMove { from, to });
        }

        let is_pawn = piece.kind == PieceKind::Pawn;
        let is_en_passant = is_pawn
            && from.col != to.col
            && self.is_empty(to)
            && self.en_passant_square == Some(to);
        let captured_square = if is_en_passant {
            Square::at(from.row, to.col)
        } else {
            to
        };
        let rook_move = if piece.kind == PieceKind::King && from.col.abs_diff(to.col) == 2 {
            let row = from.row;
            if to.col > from.col {
                Some((Square::at(row, KINGSIDE_ROOK_COL), Square::at(row, to.col - 1)))
            } else {
                Some((Square::at(row, QUEENSIDE_ROOK_COL), Square::at(row, to.col + 1)))
            }
        } else {
            None
        };
        let promoted = is_pawn && to.row == piece.color.promotion_row();

        let captured = self.take(captured_square).map(|victim| (captured_square, victim));

        self.undo_stack.push(UndoState {
            mv,
            moved_piece: piece,
            captured,
            promoted,
            rook_move,
            prev_castling_rights: self.castling_rights,
            prev_en_passant_square: self.en_passant_square,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
        });

        self.take(from);
        let placed = if promoted {
            Piece::new(PieceKind::Queen, piece.color)
        } else {
            piece
        };
        self.put(to, Some(placed));

        if let Some((rook_from, rook_to)) = rook_move {
            let rook = self.take(rook_from);
            self.put(rook_to, rook);
        }

        self.update_castling_rights(piece, from, to);

        self.en_passant_square = if is_pawn && from.row.abs_diff(to.row) == 2 {
            Some(Square::at((from.row + to.row) / 2, from.col))
        } else {
            None
        };

        if is_pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if piece.color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = piece.color.opposite();
        Ok(())
    }

    /// Reverse the most recently applied move.
    pub fn unmake_move(&mut self) -> ChessResult<Move> {
        let undo = self.undo_stack.pop().ok_or(ChessError::NothingToUndo)?;
        let mv = undo.mv;
        self.restore(undo);
        Ok(mv)
    }

    /// Apply a move that is undone when the returned guard is dropped.
    pub fn scoped_move(&mut self, mv: Move) -> ChessResult<MoveGuard<'_>> {
        let depth = self.undo_stack.len();
        self.make_move(mv)?;
        Ok(MoveGuard { state: self, depth })
    }

    /// Undo moves until the history is `depth` records long.
    fn unwind_to(&mut self, depth: usize) {
        while self.undo_stack.len() > depth {
            if let Some(undo) = self.undo_stack.pop() {
                self.restore(undo);
            }
        }
    }

    fn restore(&mut self, undo: UndoState) {
        let Move { from, to } = undo.mv;

        if let Some((rook_from, rook_to)) = undo.rook_move {
            let rook = self.take(rook_to);
            self.put(rook_from, rook);
        }

        self.take(to);
        self.put(from, Some(undo.moved_piece));
        if let Some((square, victim)) = undo.captured {
            self.put(square, Some(victim));
        }

        self.side_to_move = undo.moved_piece.color;
        self.castling_rights = undo.prev_castling_rights;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
    }

    fn update_castling_rights(&mut self, piece: Piece, from: Square, to: Square) {
        if piece.kind == PieceKind::King {
            self.castling_rights &= !(kingside_right(piece.color) | queenside_right(piece.color));
        }
        // A rook leaving or being captured on its corner loses that side's right.
        for square in [from, to] {
            for color in [Color::White, Color::Black] {
                if square.row != color.back_row() {
                    continue;
                }
                if square.col == KINGSIDE_ROOK_COL {
                    self.castling_rights &= !kingside_right(color);
                } else if square.col == QUEENSIDE_ROOK_COL {
                    self.castling_rights &= !queenside_right(color);
                }
            }
        }
    }

    /// Raw cell write keeping king locations in sync.
    #[inline]
    fn put(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(piece) = piece {
            if piece.kind == PieceKind::King {
                self.king_squares[piece.color.index()] = Some(square);
            }
        }
        self.board[square.row as usize][square.col as usize] = piece;
    }

    #[inline]
    fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board[square.row as usize][square.col as usize].take();
        if let Some(piece) = piece {
            if piece.kind == PieceKind::King
                && self.king_squares[piece.color.index()] == Some(square)
            {
                self.king_squares[piece.color.index()] = None;
            }
        }
        piece
    }
}

/// Scoped application of one move; dropping the guard undoes it.
///
/// Dereferences to the `GameState` with the move applied. Any further moves
/// applied through the guard and not undone are rolled back as well.
pub struct MoveGuard<'a> {
    state: &'a mut GameState,
    depth: usize,
}

impl Deref for MoveGuard<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.state
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.state
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.state.unwind_to(self.depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    fn mv(from: &str, to: &str) -> Move {
        Move::new(from.parse().expect("from square"), to.parse().expect("to square"))
    }

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
        assert_eq!(game.king_square(Color::White), Some(Square::at(7, 4)));
        assert_eq!(game.king_square(Color::Black), Some(Square::at(0, 4)));
        assert_eq!(game.pieces(Color::White).count(), 16);
    }

    #[test]
    fn make_unmake_restores_equal_state() {
        let mut game = GameState::new_game();
        let before = game.clone();

        game.make_move(mv("e2", "e4")).expect("e2e4");
        assert_eq!(game.en_passant_square, Some("e3".parse().expect("e3")));
        assert_eq!(game.side_to_move, Color::Black);
        game.make_move(mv("d7", "d5")).expect("d7d5");
        game.make_move(mv("e4", "d5")).expect("exd5");
        assert_eq!(game.last_undo().map(UndoState::is_capture), Some(true));

        for _ in 0..3 {
            game.unmake_move().expect("undo");
        }
        assert_eq!(game, before);
        assert!(matches!(game.unmake_move(), Err(ChessError::NothingToUndo)));
    }

    #[test]
    fn guard_undoes_on_drop() {
        let mut game = GameState::new_game();
        let before = game.clone();
        {
            let mut guard = game.scoped_move(mv("g1", "f3")).expect("Nf3");
            assert!(guard.piece_at("f3".parse().expect("f3")).is_some());
            guard.make_move(mv("b8", "c6")).expect("Nc6");
        }
        assert_eq!(game, before);
    }

    #[test]
    fn rejects_moves_that_break_board_contract() {
        let mut game = GameState::new_game();
        assert!(matches!(
            game.make_move(mv("e4", "e5")),
            Err(ChessError::EmptySquare(_))
        ));
        assert!(matches!(
            game.make_move(mv("e7", "e5")),
            Err(ChessError::NotSideToMove { .. })
        ));
        assert!(matches!(
            game.make_move(mv("a1", "a2")),
            Err(ChessError::IllegalMove { .. })
        ));
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let before = game.clone();

        game.make_move(mv("e1", "g1")).expect("O-O");
        assert_eq!(
            game.piece_at("f1".parse().expect("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert!(game.is_empty("h1".parse().expect("h1")));
        assert_eq!(game.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert_eq!(game.king_square(Color::White), "g1".parse().ok());

        game.make_move(mv("a8", "a1")).expect("Rxa1");
        assert_eq!(game.castling_rights, CASTLE_BLACK_KINGSIDE);

        game.unmake_move().expect("undo Rxa1");
        game.unmake_move().expect("undo O-O");
        assert_eq!(game, before);
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let mut game = GameState::from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1")
            .expect("FEN should parse");
        let before = game.clone();

        game.make_move(mv("d5", "e6")).expect("dxe6 e.p.");
        assert!(game.is_empty("e5".parse().expect("e5")));
        assert!(game.last_undo().is_some_and(UndoState::is_en_passant));

        game.unmake_move().expect("undo");
        assert_eq!(game, before);
    }

    #[test]
    fn promotion_places_queen_and_restores_pawn() {
        let mut game =
            GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let before = game.clone();

        game.make_move(mv("b7", "b8")).expect("b8=Q");
        assert_eq!(
            game.piece_at("b8".parse().expect("b8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );

        game.unmake_move().expect("undo");
        assert_eq!(game, before);
    }

    #[test]
    fn place_piece_rejects_second_king() {
        let mut game = GameState::new_empty();
        let king = Piece::new(PieceKind::King, Color::White);
        game.place_piece(Square::at(7, 4), king).expect("first king");
        assert!(matches!(
            game.place_piece(Square::at(7, 0), king),
            Err(ChessError::DuplicateKing(Color::White))
        ));
        assert_eq!(game.remove_piece(Square::at(7, 4)), Some(king));
        assert_eq!(game.king_square(Color::White), None);
    }
}
