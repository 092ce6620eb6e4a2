//! Perft: exhaustive legal-move tree counts used to validate move generation.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::move_generation::move_generator::MoveGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count the leaves `depth` plies below `game_state`, classifying the move into each leaf.
///
/// The state is played forward and back in place and is unchanged on return.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(game_state)? {
        let mut child = game_state.scoped_move(mv)?;
        if depth == 1 {
            total.merge(classify_leaf(&mut child)?);
        } else {
            total.merge(perft(generator, &mut child, depth - 1)?);
        }
    }
    Ok(total)
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> ChessResult<Vec<(Move, usize)>> {
    let mut split = Vec::new();
    if depth == 0 {
        return Ok(split);
    }
    for mv in generator.generate_legal_moves(game_state)? {
        let mut child = game_state.scoped_move(mv)?;
        let counts = perft(generator, &mut child, depth - 1)?;
        split.push((mv, counts.nodes));
    }
    Ok(split)
}

fn classify_leaf(game_state: &mut GameState) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    if let Some(undo) = game_state.last_undo() {
        counts.captures = usize::from(undo.is_capture());
        counts.en_passant = usize::from(undo.is_en_passant());
        counts.castles = usize::from(undo.is_castling());
        counts.promotions = usize::from(undo.promoted);
    }
    let side = game_state.side_to_move;
    if is_in_check(game_state, side) {
        counts.checks = 1;
        if !has_legal_move(game_state)? {
            counts.checkmates = 1;
        }
    }
    Ok(counts)
}
