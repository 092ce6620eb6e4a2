//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type of the crate. Input-related variants
//! (`InvalidAlgebraic`, `InvalidFen`) are recoverable and meant to be shown to
//! a user. The remaining variants describe a broken contract between the
//! caller and the rules core (moving from an empty square, applying a move
//! that was never offered by the legality filter, a board without a king) and
//! are not expected during normal play.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Error)]
pub enum ChessError {
    /// A coordinate or move string could not be parsed.
    #[error("invalid algebraic input: {0}")]
    InvalidAlgebraic(String),

    /// A FEN string could not be parsed into a position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Tried to move a piece from an empty square.
    #[error("no piece on {0}")]
    EmptySquare(Square),

    /// Tried to move a piece of the side that is not on move.
    #[error("piece on {square} belongs to {color} but {side_to_move} is to move")]
    NotSideToMove {
        square: Square,
        color: Color,
        side_to_move: Color,
    },

    /// The move was not produced by the legality filter.
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// Undo was requested with an empty history.
    #[error("no move to undo")]
    NothingToUndo,

    /// A second king was placed for one side.
    #[error("{0} already has a king on the board")]
    DuplicateKing(Color),

    /// A position without a king for one side was handed to the game layer.
    #[error("{0} has no king on the board")]
    MissingKing(Color),

    /// The search returned no move although the position is not terminal.
    #[error("search returned no move for an ongoing position")]
    SearchReturnedNoMove,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
