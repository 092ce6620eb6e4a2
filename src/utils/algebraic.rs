//! Conversions between board coordinates and algebraic text.
//!
//! `row = 8 - rank`, `col = file - 'a'`, so `"e2"` is row 6, col 4.

use std::str::FromStr;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Move, Square};

/// Convert algebraic notation (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraic(format!(
            "square must be two characters: {square:?}"
        )));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidAlgebraic(format!(
            "file out of range in {square:?}"
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraic(format!(
            "rank out of range in {square:?}"
        )));
    }

    Ok(Square::at(b'8' - rank, file - b'a'))
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(s)
    }
}

/// Parse a console move request such as `"e2 e4"`, `"e2e4"` or `"e2-e4"`.
pub fn parse_move_input(input: &str) -> ChessResult<Move> {
    let compact: String = input
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .collect();
    if compact.len() != 4 || !compact.is_ascii() {
        return Err(ChessError::InvalidAlgebraic(format!(
            "expected a move like \"e2 e4\", got {:?}",
            input.trim()
        )));
    }
    let from = algebraic_to_square(&compact[0..2])?;
    let to = algebraic_to_square(&compact[2..4])?;
    Ok(Move::new(from, to))
}
