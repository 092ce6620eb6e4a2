//! Driver-facing game session.
//!
//! `ChessGame` owns the live `GameState` and is the only way the console
//! driver and the match harness touch the rules core. Every applied move goes
//! through the legality filter first and is reported to the observer.

use chrono::{DateTime, Utc};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::game_outcome::{self, Outcome};
use crate::move_generation::legal_move_generator;
use crate::session::game_observer::{GameObserver, NullObserver};

/// One applied move as seen by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub is_ai_move: bool,
    pub played_at: DateTime<Utc>,
}

pub struct ChessGame<O: GameObserver = NullObserver> {
    state: GameState,
    history: Vec<MoveRecord>,
    observer: O,
    started_at: DateTime<Utc>,
}

impl ChessGame<NullObserver> {
    pub fn new() -> Self {
        Self::with_observer(NullObserver)
    }
}

impl Default for ChessGame<NullObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: GameObserver> ChessGame<O> {
    /// New game from the standard starting position.
    pub fn with_observer(observer: O) -> Self {
        Self {
            state: GameState::new_game(),
            history: Vec::new(),
            observer,
            started_at: Utc::now(),
        }
    }

    /// Continue from an arbitrary position. Both kings must be on the board.
    pub fn from_state(state: GameState, observer: O) -> ChessResult<Self> {
        for color in [Color::White, Color::Black] {
            if state.king_square(color).is_none() {
                return Err(ChessError::MissingKing(color));
            }
        }
        Ok(Self {
            state,
            history: Vec::new(),
            observer,
            started_at: Utc::now(),
        })
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[inline]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Legal destinations of the piece on `square`; empty if there is none to move.
    pub fn get_valid_moves(&mut self, square: Square) -> ChessResult<Vec<Square>> {
        legal_move_generator::get_valid_moves(&mut self.state, square)
    }

    pub fn legal_moves(&mut self) -> ChessResult<Vec<Move>> {
        let side = self.state.side_to_move;
        legal_move_generator::legal_moves(&mut self.state, side)
    }

    /// Apply a validated move. `is_ai_move` only labels the observer event.
    ///
    /// A move outside `get_valid_moves(start)` is rejected with `IllegalMove`
    /// and leaves the game untouched.
    pub fn move_piece(&mut self, start: Square, end: Square, is_ai_move: bool) -> ChessResult<()> {
        if !self.get_valid_moves(start)?.contains(&end) {
            return Err(ChessError::IllegalMove {
                from: start,
                to: end,
            });
        }

        let mv = Move::new(start, end);
        let piece = self.state.piece_at(start).ok_or(ChessError::EmptySquare(start))?;
        self.state.make_move(mv)?;

        let captured = self
            .state
            .last_undo()
            .and_then(|undo| undo.captured)
            .map(|(_, victim)| victim);
        let record = MoveRecord {
            mv,
            piece,
            captured,
            is_ai_move,
            played_at: Utc::now(),
        };
        self.observer.on_move(&record, &self.state);
        self.history.push(record);
        Ok(())
    }

    /// Classify the current position; a decided game is reported to the observer.
    pub fn checkmate_stalemate_checker(&mut self) -> ChessResult<Outcome> {
        let outcome = game_outcome::checkmate_stalemate_checker(&mut self.state)?;
        if outcome.is_terminal() {
            self.observer.on_outcome(outcome, &self.state);
        }
        Ok(outcome)
    }

    /// Ask `engine` for a move without applying it.
    pub fn choose_ai_move<E: Engine + ?Sized>(&mut self, engine: &mut E) -> ChessResult<Option<Move>> {
        let output = engine.choose_move(&mut self.state)?;
        for line in &output.info_lines {
            tracing::debug!(engine = engine.name(), "{line}");
        }
        Ok(output.best_move)
    }

    /// Ask `engine` for a move and apply it as an AI move.
    pub fn play_ai_move<E: Engine + ?Sized>(&mut self, engine: &mut E) -> ChessResult<Option<Move>> {
        let Some(mv) = self.choose_ai_move(engine)? else {
            return Ok(None);
        };
        self.move_piece(mv.from, mv.to, true)?;
        Ok(Some(mv))
    }

    pub fn undo_last_move(&mut self) -> ChessResult<MoveRecord> {
        let record = self.history.pop().ok_or(ChessError::NothingToUndo)?;
        self.state.unmake_move()?;
        self.observer.on_undo(&record);
        Ok(record)
    }
}
