//! Exhaustive make/undo round trips over shallow game trees.

use glinski::board::{Board, PieceType, Player};
use glinski::protocol::encode_fen;

/// Everything observable about a position that undo must restore.
fn snapshot(board: &Board) -> (String, u64, u32, Option<usize>) {
    (
        encode_fen(board),
        board.zobrist_hash(),
        board.nonprogress(),
        board.ep_target(),
    )
}

#[test]
fn every_opening_move_round_trips() {
    let mut board = Board::new();
    let before = snapshot(&board);
    for mv in board.moves_legal() {
        board.move_make(mv);
        let undone = board.move_undo();
        assert_eq!(undone, mv, "wrong move popped for {mv}");
        assert_eq!(snapshot(&board), before, "state changed after {mv}");
    }
}

#[test]
fn depth_two_walk_round_trips() {
    let mut board = Board::new();
    let before = snapshot(&board);
    for first in board.moves_legal() {
        board.move_make(first);
        let mid = snapshot(&board);
        for second in board.moves_legal() {
            board.move_make(second);
            board.move_undo();
            assert_eq!(snapshot(&board), mid, "after {first} {second}");
        }
        board.move_undo();
    }
    assert_eq!(snapshot(&board), before);
    assert_eq!(board.halfmove_count(), 0);
}

#[test]
fn hash_is_path_independent() {
    let play = |tokens: &[&str]| {
        let mut board = Board::new();
        for token in tokens {
            let spec = glinski::protocol::parse_movetext(token).unwrap();
            let mv = glinski::movegen::resolve_move(&mut board, &spec).unwrap();
            board.move_make(mv);
        }
        board
    };
    // The same layout reached through two move orders hashes the same.
    let a = play(&["b1b2", "b7b6", "c2c3"]);
    let b = play(&["c2c3", "b7b6", "b1b2"]);
    assert_eq!(a.zobrist_hash(), b.zobrist_hash());
    assert_eq!(encode_fen(&a), encode_fen(&b));
}

#[test]
fn en_passant_and_promotion_round_trip() {
    let mut board = Board::from_placements(
        Player::White,
        &[
            (Player::White, PieceType::King, "g1"),
            (Player::Black, PieceType::King, "g10"),
            (Player::White, PieceType::Pawn, "f6"),
            (Player::White, PieceType::Pawn, "b6"),
            (Player::Black, PieceType::Pawn, "g7"),
        ],
    )
    .unwrap();
    let before = snapshot(&board);

    // White promotes on b7, Black hops g7 to g5, the f6 pawn captures
    // in passing, then everything unwinds.
    let promo = *board
        .moves_legal()
        .iter()
        .find(|m| m.promotion == Some(PieceType::Queen))
        .unwrap();
    board.move_make(promo);
    let hop = *board
        .moves_legal()
        .iter()
        .find(|m| m.piece_type == Some(PieceType::Pawn) && m.to == m.from + 2)
        .unwrap();
    board.move_make(hop);
    let ep = *board
        .moves_legal()
        .iter()
        .find(|m| m.is_en_passant)
        .unwrap();
    board.move_make(ep);

    board.move_undo();
    board.move_undo();
    board.move_undo();
    assert_eq!(snapshot(&board), before);
}
