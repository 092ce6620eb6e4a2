use std::fmt;

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;

/// Result of a position, computed on demand and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Stalemate,
    Ongoing,
}

impl Outcome {
    /// Integer code reported to the driver: 0 Black wins, 1 White wins, 2 stalemate, 3 ongoing.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Outcome::BlackWins => 0,
            Outcome::WhiteWins => 1,
            Outcome::Stalemate => 2,
            Outcome::Ongoing => 3,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Outcome::BlackWins),
            1 => Some(Outcome::WhiteWins),
            2 => Some(Outcome::Stalemate),
            3 => Some(Outcome::Ongoing),
            _ => None,
        }
    }

    #[inline]
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::White => Outcome::WhiteWins,
            Color::Black => Outcome::BlackWins,
        }
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::WhiteWins => Some(Color::White),
            Outcome::BlackWins => Some(Color::Black),
            Outcome::Stalemate | Outcome::Ongoing => None,
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::BlackWins => write!(f, "checkmate, black wins"),
            Outcome::WhiteWins => write!(f, "checkmate, white wins"),
            Outcome::Stalemate => write!(f, "stalemate"),
            Outcome::Ongoing => write!(f, "ongoing"),
        }
    }
}

/// Classify the position for the side to move.
///
/// Any legal move means the game goes on. Without one, the side to move is
/// checkmated when in check and stalemated otherwise.
pub fn checkmate_stalemate_checker(game_state: &mut GameState) -> ChessResult<Outcome> {
    if has_legal_move(game_state)? {
        return Ok(Outcome::Ongoing);
    }
    let side = game_state.side_to_move;
    if is_in_check(game_state, side) {
        Ok(Outcome::win_for(side.opposite()))
    } else {
        Ok(Outcome::Stalemate)
    }
}
