//! Event sink for the game session.
//!
//! The session reports applied moves, undos and decided outcomes here. The
//! console driver installs `TracingObserver`; library users and tests can use
//! `NullObserver` or their own implementation.

use crate::game_state::game_state::GameState;
use crate::move_generation::game_outcome::Outcome;
use crate::session::chess_game::MoveRecord;

pub trait GameObserver {
    fn on_move(&mut self, _record: &MoveRecord, _state: &GameState) {}

    fn on_undo(&mut self, _record: &MoveRecord) {}

    fn on_outcome(&mut self, _outcome: Outcome, _state: &GameState) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// Writes one structured `tracing` event per session event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_move(&mut self, record: &MoveRecord, state: &GameState) {
        tracing::info!(
            ply = state.history_len(),
            side = %record.piece.color,
            piece = %record.piece.symbol(),
            from = %record.mv.from,
            to = %record.mv.to,
            captured = ?record.captured.map(|piece| piece.symbol()),
            ai = record.is_ai_move,
            at = %record.played_at.to_rfc3339(),
            fen = %state.get_fen(),
            "move played"
        );
    }

    fn on_undo(&mut self, record: &MoveRecord) {
        tracing::info!(mv = %record.mv, ai = record.is_ai_move, "move undone");
    }

    fn on_outcome(&mut self, outcome: Outcome, state: &GameState) {
        tracing::info!(
            outcome = %outcome,
            code = outcome.code(),
            fullmove = state.fullmove_number,
            "game over"
        );
    }
}
