//! Move generation and legality.
//!
//! Pseudolegal generation follows the precomputed geometry tables;
//! legality is decided by executing each candidate, probing whether the
//! mover's king is attacked, and undoing.

pub mod attacks;
pub mod matching;
pub mod pseudolegal;

pub use attacks::{is_king_attacked, is_space_attacked};
pub use matching::{moves_matching, resolve_move, MatchError};
pub use pseudolegal::{pseudolegal_moves, pseudolegal_moves_from};

use crate::board::moves::Move;
use crate::board::Board;

/// Legal moves for the side to move. The board is mutated speculatively
/// during filtering and is unchanged on return.
pub fn legal_moves(board: &mut Board) -> Vec<Move> {
    let mover = board.to_move();
    pseudolegal_moves(board)
        .into_iter()
        .filter(|&mv| {
            board.apply(mv);
            let attacked = is_king_attacked(board, mover);
            board.revert();
            !attacked
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::alg_to_space;
    use crate::board::piece::{PieceType, Player};

    fn sp(alg: &str) -> crate::board::Space {
        alg_to_space(alg).unwrap()
    }

    #[test]
    fn initial_legal_equals_pseudolegal() {
        let mut board = Board::new();
        assert_eq!(legal_moves(&mut board).len(), 51);
        assert_eq!(board.halfmove_count(), 0);
    }

    #[test]
    fn pinned_rook_cannot_leave_the_file() {
        // Black rook on f9 pins nothing yet; interpose a white rook on
        // f5 and it may only slide along the pin file.
        let mut board = Board::from_placements(
            Player::White,
            &[
                (Player::White, PieceType::King, "f1"),
                (Player::White, PieceType::Rook, "f5"),
                (Player::Black, PieceType::Rook, "f9"),
                (Player::Black, PieceType::King, "l1"),
            ],
        )
        .unwrap();
        let rook_moves: Vec<Move> = legal_moves(&mut board)
            .into_iter()
            .filter(|m| m.from == sp("f5"))
            .collect();
        assert!(!rook_moves.is_empty());
        for mv in &rook_moves {
            assert_eq!(
                crate::board::geometry::file_of(mv.to),
                crate::board::geometry::file_of(sp("f5")),
                "pinned rook escaped the file with {mv}"
            );
        }
    }

    #[test]
    fn checked_king_must_respond() {
        let mut board = Board::from_placements(
            Player::White,
            &[
                (Player::White, PieceType::King, "f1"),
                (Player::White, PieceType::Knight, "a1"),
                (Player::Black, PieceType::Rook, "f9"),
                (Player::Black, PieceType::King, "l1"),
            ],
        )
        .unwrap();
        assert!(is_king_attacked(&board, Player::White));
        let moves = legal_moves(&mut board);
        // Every reply either moves the king off the file or blocks it.
        for mv in &moves {
            board.apply(*mv);
            assert!(!is_king_attacked(&board, Player::White));
            board.revert();
        }
        assert!(!moves.is_empty());
        // The knight on a1 cannot reach the f-file, so only king moves
        // answer the check.
        assert!(moves.iter().all(|m| m.from == sp("f1")));
        assert!(moves.iter().all(|m| m.piece_type == Some(PieceType::King)));
    }
}
