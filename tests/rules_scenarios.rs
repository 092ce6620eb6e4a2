use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use chess_duel::game_state::chess_types::*;
use chess_duel::game_state::game_state::GameState;
use chess_duel::move_generation::game_outcome::{checkmate_stalemate_checker, Outcome};
use chess_duel::move_generation::legal_move_checks::is_in_check;
use chess_duel::move_generation::legal_move_generator::{
    get_valid_capturing_moves, get_valid_moves, get_valid_peaceful_moves, legal_moves,
};
use chess_duel::search::minimax::{
    full_minimax, search, search_for_white, SearchConfig, DEFAULT_ALPHA, DEFAULT_BETA,
};
use chess_duel::session::chess_game::ChessGame;

fn sq(text: &str) -> Square {
    text.parse().expect("square text")
}

fn game_from(fen: &str) -> GameState {
    GameState::from_fen(fen).expect("FEN should parse")
}

#[test]
fn knight_in_open_centre_has_eight_moves() {
    let mut game = game_from("k7/8/8/8/3N4/8/8/7K w - - 0 1");
    let moves = get_valid_moves(&mut game, sq("d4")).expect("query");
    assert_eq!(moves.len(), 8);
    assert!(get_valid_capturing_moves(&mut game, sq("d4"))
        .expect("query")
        .is_empty());
}

#[test]
fn knight_boxed_in_by_own_pieces_has_no_moves() {
    let mut game = game_from("k7/8/2P1P3/1P3P2/3N4/1P3P2/2P1P3/7K w - - 0 1");
    let d4 = sq("d4");
    let knight = game.piece_at(d4).expect("knight on d4");
    assert!(knight.peaceful_moves(&game, d4).is_empty());
    assert!(knight.capturing_moves(&game, d4).is_empty());
    assert!(get_valid_moves(&mut game, d4).expect("query").is_empty());
}

#[test]
fn knight_in_corner_blocked_by_own_pawns_has_no_moves() {
    let mut game = game_from("k7/8/8/8/8/1P6/2P5/N6K w - - 0 1");
    assert!(get_valid_moves(&mut game, sq("a1")).expect("query").is_empty());
}

#[test]
fn knight_surrounded_by_enemies_can_capture_all_of_them() {
    let mut game = game_from("k7/8/2n1n3/1n3n2/3N4/1n3n2/2n1n3/7K w - - 0 1");
    let d4 = sq("d4");
    let knight = game.piece_at(d4).expect("knight on d4");
    assert!(knight.peaceful_moves(&game, d4).is_empty());
    let mut captures = knight.capturing_moves(&game, d4);
    captures.sort();
    let mut expected: Vec<Square> = ["c6", "e6", "b5", "f5", "b3", "f3", "c2", "e2"]
        .into_iter()
        .map(sq)
        .collect();
    expected.sort();
    assert_eq!(captures, expected);

    assert_eq!(get_valid_moves(&mut game, d4).expect("query").len(), 8);
    assert_eq!(get_valid_capturing_moves(&mut game, d4).expect("query").len(), 8);
    assert!(get_valid_peaceful_moves(&mut game, d4).expect("query").is_empty());
}

#[test]
fn valid_move_queries_are_idempotent_and_pure() {
    let mut game = game_from("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = game.clone();
    for (square, _) in before.occupied() {
        let first = get_valid_moves(&mut game, square).expect("query");
        let second = get_valid_moves(&mut game, square).expect("query");
        assert_eq!(first, second, "repeated query on {square}");
        let mut deduped = first.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), first.len(), "duplicate targets for {square}");
    }
    assert_eq!(game, before);
}

#[test]
fn pinned_bishop_cannot_move() {
    let mut game = game_from("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
    assert!(get_valid_moves(&mut game, sq("e2")).expect("query").is_empty());
    // The king still has moves, so the position is not terminal.
    assert_eq!(
        checkmate_stalemate_checker(&mut game).expect("classification"),
        Outcome::Ongoing
    );
}

#[test]
fn fools_mate_is_a_black_win() {
    let mut game = ChessGame::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        game.move_piece(sq(from), sq(to), false)
            .unwrap_or_else(|err| panic!("{from}{to} should be legal: {err}"));
    }
    assert!(game.get_valid_moves(sq("e1")).expect("query").is_empty());
    let mut position = game.state().clone();
    assert!(get_valid_peaceful_moves(&mut position, sq("e1"))
        .expect("query")
        .is_empty());
    let outcome = game.checkmate_stalemate_checker().expect("classification");
    assert_eq!(outcome, Outcome::BlackWins);
    assert_eq!(outcome.code(), 0);
}

#[test]
fn lone_king_without_moves_is_stalemate() {
    let mut game = game_from("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!is_in_check(&game, Color::Black));
    let outcome = checkmate_stalemate_checker(&mut game).expect("classification");
    assert_eq!(outcome, Outcome::Stalemate);
    assert_eq!(outcome.code(), 2);
}

#[test]
fn stalemate_with_a_blocked_pawn_alongside_the_king() {
    let mut game = game_from("7k/5Q2/6K1/p7/P7/8/8/8 b - - 0 1");
    assert!(!is_in_check(&game, Color::Black));
    let pawn = sq("a5");
    assert!(game.piece_at(pawn).expect("black pawn").all_pseudo_legal_moves(&game, pawn).is_empty());
    assert!(get_valid_moves(&mut game, pawn).expect("query").is_empty());
    assert!(get_valid_moves(&mut game, sq("h8")).expect("query").is_empty());
    assert!(legal_moves(&mut game, Color::Black).expect("query").is_empty());
    let outcome = checkmate_stalemate_checker(&mut game).expect("classification");
    assert_eq!(outcome, Outcome::Stalemate);
    assert_eq!(outcome.code(), 2);
}

#[test]
fn stalemate_with_a_pinned_rook_alongside_the_king() {
    // Bishop on h1 pins the rook on b7; the knights cover a7 and b8.
    let mut game = game_from("k1N5/1r1N4/8/8/8/8/8/4K2B b - - 0 1");
    assert!(!is_in_check(&game, Color::Black));
    let rook = sq("b7");
    assert!(!game.piece_at(rook).expect("black rook").all_pseudo_legal_moves(&game, rook).is_empty());
    assert!(get_valid_moves(&mut game, rook).expect("query").is_empty());
    assert!(get_valid_moves(&mut game, sq("a8")).expect("query").is_empty());
    let outcome = checkmate_stalemate_checker(&mut game).expect("classification");
    assert_eq!(outcome, Outcome::Stalemate);
}

#[test]
fn random_playouts_unwind_to_the_starting_state() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for _ in 0..5 {
        let mut game = GameState::new_game();
        let start = game.clone();
        let mut snapshots = Vec::new();

        for _ in 0..120 {
            let side = game.side_to_move;
            let moves = legal_moves(&mut game, side).expect("generation");
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            snapshots.push(game.clone());
            game.make_move(mv).expect("legal move applies");
            assert!(!is_in_check(&game, side), "{mv} left the mover in check");
        }

        while let Some(expected) = snapshots.pop() {
            game.unmake_move().expect("undo");
            assert_eq!(game, expected);
        }
        assert_eq!(game, start);
    }
}

#[test]
fn check_detection_matches_capture_lists() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut game = GameState::new_game();
    for _ in 0..200 {
        for color in [Color::White, Color::Black] {
            let Some(king) = game.king_square(color) else {
                continue;
            };
            let by_captures = game
                .pieces(color.opposite())
                .any(|(from, piece)| piece.capturing_moves(&game, from).contains(&king));
            assert_eq!(is_in_check(&game, color), by_captures, "at {}", game.get_fen());
        }

        let side = game.side_to_move;
        let moves = legal_moves(&mut game, side).expect("generation");
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        game.make_move(mv).expect("legal move applies");
    }
}

#[test]
fn pruning_never_changes_the_chosen_move() {
    let cases = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
        ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3", 3),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
        ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 2),
    ];
    for (fen, depth) in cases {
        let mut game = game_from(fen);
        let before = game.clone();
        for side in [Color::White, Color::Black] {
            let maximizing = game.side_to_move == side;
            let pruned = search(&mut game, depth, DEFAULT_ALPHA, DEFAULT_BETA, maximizing, side)
                .expect("pruned search");
            let full = full_minimax(&mut game, depth, maximizing, side).expect("full search");
            assert_eq!(pruned, full, "{fen} from {side}'s side");
        }
        assert_eq!(game, before);
    }
}

#[test]
fn search_takes_undefended_rook() {
    let mut game = game_from("4k3/8/8/3r4/8/8/3R4/4K3 w - - 0 1");
    let result = search_for_white(&mut game, SearchConfig::default()).expect("search");
    assert_eq!(result.best_move, Some(Move::new(sq("d2"), sq("d5"))));
    assert_eq!(result.score, 500);
}

#[test]
fn castling_through_session_moves_the_rook() {
    let state = game_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mut game = ChessGame::from_state(state, chess_duel::session::game_observer::NullObserver)
        .expect("both kings present");
    assert!(game.get_valid_moves(sq("e1")).expect("query").contains(&sq("c1")));
    game.move_piece(sq("e1"), sq("c1"), false).expect("O-O-O");
    assert_eq!(
        game.state().piece_at(sq("d1")),
        Some(Piece::new(PieceKind::Rook, Color::White))
    );
    game.undo_last_move().expect("undo");
    assert_eq!(game.state().get_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
}
