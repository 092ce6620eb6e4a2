//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Scores are always from the perspective of one fixed `side`; the
//! `maximizing` flag says whether the side to move at a node is that side.
//! Every child is visited through a `MoveGuard`, so the live state is
//! restored on every return path, including early cutoffs and `?`.
//!
//! Comparisons are strict, so on ties the first move in generation order is
//! kept. With a root window wider than any reachable score this makes the
//! pruned search choose exactly the move and score of `full_minimax`.

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};

pub const MATE_SCORE: i32 = 30000;
pub const DEFAULT_ALPHA: i32 = -100_000;
pub const DEFAULT_BETA: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 3 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub stats: SearchStats,
}

pub struct Searcher<'a, G: MoveGenerator, S: BoardScorer> {
    generator: &'a G,
    scorer: &'a S,
    stats: SearchStats,
}

impl<'a, G: MoveGenerator, S: BoardScorer> Searcher<'a, G, S> {
    pub fn new(generator: &'a G, scorer: &'a S) -> Self {
        Self {
            generator,
            scorer,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn alpha_beta(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
        side: Color,
    ) -> ChessResult<(Option<Move>, i32)> {
        self.alpha_beta_node(game_state, depth, alpha, beta, maximizing, side, 0)
    }

    /// Plain minimax over the same tree, without pruning.
    pub fn full_minimax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        maximizing: bool,
        side: Color,
    ) -> ChessResult<(Option<Move>, i32)> {
        self.minimax_node(game_state, depth, maximizing, side, 0)
    }

    #[allow(clippy::too_many_arguments)]
    fn alpha_beta_node(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        side: Color,
        ply: u8,
    ) -> ChessResult<(Option<Move>, i32)> {
        self.stats.nodes += 1;

        // Terminal positions are detected even at the horizon so mates dominate material.
        let moves = self.generator.generate_legal_moves(game_state)?;
        if moves.is_empty() {
            return Ok((None, terminal_score(game_state, side, ply)));
        }
        if depth == 0 {
            return Ok((None, self.scorer.score(game_state, side)));
        }

        let mut best_move = None;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

        for mv in moves {
            let score = {
                let mut child = game_state.scoped_move(mv)?;
                let (_, score) = self.alpha_beta_node(
                    &mut child,
                    depth - 1,
                    alpha,
                    beta,
                    !maximizing,
                    side,
                    ply.saturating_add(1),
                )?;
                score
            };

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok((best_move, best_score))
    }

    fn minimax_node(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        maximizing: bool,
        side: Color,
        ply: u8,
    ) -> ChessResult<(Option<Move>, i32)> {
        self.stats.nodes += 1;

        let moves = self.generator.generate_legal_moves(game_state)?;
        if moves.is_empty() {
            return Ok((None, terminal_score(game_state, side, ply)));
        }
        if depth == 0 {
            return Ok((None, self.scorer.score(game_state, side)));
        }

        let mut best_move = None;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let mut child = game_state.scoped_move(mv)?;
            let (_, score) =
                self.minimax_node(&mut child, depth - 1, !maximizing, side, ply.saturating_add(1))?;
            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves {
                best_score = score;
                best_move = Some(mv);
            }
        }
        Ok((best_move, best_score))
    }
}

/// Score of a position where the side to move has no legal move.
///
/// Mate is worth `MATE_SCORE - ply` so shorter mates rank higher.
fn terminal_score(game_state: &GameState, side: Color, ply: u8) -> i32 {
    let to_move = game_state.side_to_move;
    if !is_in_check(game_state, to_move) {
        return 0;
    }
    let mate = MATE_SCORE - i32::from(ply);
    if to_move == side {
        -mate
    } else {
        mate
    }
}

/// Alpha-beta search with the default legal move generator and material scorer.
pub fn search(
    game_state: &mut GameState,
    depth: u8,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    side: Color,
) -> ChessResult<(Option<Move>, i32)> {
    Searcher::new(&LegalMoveGenerator, &MaterialScorer)
        .alpha_beta(game_state, depth, alpha, beta, maximizing, side)
}

/// Unpruned reference search with the default generator and scorer.
pub fn full_minimax(
    game_state: &mut GameState,
    depth: u8,
    maximizing: bool,
    side: Color,
) -> ChessResult<(Option<Move>, i32)> {
    Searcher::new(&LegalMoveGenerator, &MaterialScorer)
        .full_minimax(game_state, depth, maximizing, side)
}

/// Search from `side`'s perspective over the full default window.
pub fn search_for_side(
    game_state: &mut GameState,
    side: Color,
    config: SearchConfig,
) -> ChessResult<SearchResult> {
    let mut searcher = Searcher::new(&LegalMoveGenerator, &MaterialScorer);
    let maximizing = game_state.side_to_move == side;
    let (best_move, score) = searcher.alpha_beta(
        game_state,
        config.depth,
        DEFAULT_ALPHA,
        DEFAULT_BETA,
        maximizing,
        side,
    )?;
    Ok(SearchResult {
        best_move,
        score,
        stats: searcher.stats(),
    })
}

#[inline]
pub fn search_for_white(game_state: &mut GameState, config: SearchConfig) -> ChessResult<SearchResult> {
    search_for_side(game_state, Color::White, config)
}

#[inline]
pub fn search_for_black(game_state: &mut GameState, config: SearchConfig) -> ChessResult<SearchResult> {
    search_for_side(game_state, Color::Black, config)
}
