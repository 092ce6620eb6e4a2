//! Fixed-depth alpha-beta engine playing for the side to move.

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::move_generation::game_outcome::checkmate_stalemate_checker;
use crate::search::minimax::{search_for_side, SearchConfig};

pub struct MinimaxEngine {
    config: SearchConfig,
}

impl MinimaxEngine {
    /// Depth is clamped to at least one ply so an ongoing position always yields a move.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config: SearchConfig {
                depth: config.depth.max(1),
            },
        }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        let side = game_state.side_to_move;
        let result = search_for_side(game_state, side, self.config)?;

        tracing::debug!(
            side = %side,
            depth = self.config.depth,
            nodes = result.stats.nodes,
            cutoffs = result.stats.cutoffs,
            score = result.score,
            best_move = ?result.best_move.map(|mv| mv.to_string()),
            "minimax search finished"
        );

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "depth {} score {} nodes {} cutoffs {}",
            self.config.depth, result.score, result.stats.nodes, result.stats.cutoffs
        ));

        if result.best_move.is_none() && !checkmate_stalemate_checker(game_state)?.is_terminal() {
            return Err(ChessError::SearchReturnedNoMove);
        }
        out.best_move = result.best_move;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_clamped_to_one() {
        let engine = MinimaxEngine::new(SearchConfig { depth: 0 });
        assert_eq!(engine.config().depth, 1);
    }

    #[test]
    fn returns_a_legal_move_and_leaves_state_untouched() {
        let mut game = GameState::new_game();
        let before = game.clone();
        let mut engine = MinimaxEngine::new(SearchConfig { depth: 2 });
        let output = engine.choose_move(&mut game).expect("engine should move");
        let best = output.best_move.expect("start position has moves");
        assert_eq!(game, before);
        assert!(game.make_move(best).is_ok());
        assert_eq!(output.info_lines.len(), 1);
    }

    #[test]
    fn checkmated_side_gets_no_move_without_error() {
        let mut game =
            GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        let output = MinimaxEngine::default()
            .choose_move(&mut game)
            .expect("terminal position is not an error");
        assert_eq!(output.best_move, None);
    }
}
