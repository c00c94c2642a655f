//! Resolution of partial move descriptors against the legal-move list.

use thiserror::Error;

use crate::board::geometry::{file_of, rank_of};
use crate::board::moves::{Checkness, Move, MoveSpec};
use crate::board::Board;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("no legal move matches '{0}'")]
    NoMatch(String),
    #[error("'{0}' is ambiguous: {1} legal moves match")]
    Ambiguous(String, usize),
}

/// All legal moves consistent with every known field of the descriptor.
///
/// Filtering on a check or checkmate suffix executes each surviving
/// candidate speculatively and undoes it, so the board must be mutable;
/// it is unchanged on return.
pub fn moves_matching(board: &mut Board, spec: &MoveSpec) -> Vec<Move> {
    let mut candidates: Vec<Move> = board
        .moves_legal()
        .into_iter()
        .filter(|mv| matches_static(mv, spec))
        .collect();

    if let Some(checkness) = spec.checkness {
        candidates.retain(|&mv| {
            let conditions = board.move_make(mv);
            board.move_undo();
            match checkness {
                Checkness::Check => conditions.check,
                Checkness::Checkmate => conditions.checkmate,
            }
        });
    }
    candidates
}

/// Resolves a descriptor to the single matching legal move.
pub fn resolve_move(board: &mut Board, spec: &MoveSpec) -> Result<Move, MatchError> {
    let mut matched = moves_matching(board, spec);
    match matched.len() {
        0 => Err(MatchError::NoMatch(spec.to_string())),
        1 => {
            let mut mv = matched.pop().expect("one match");
            mv.eval = spec.eval;
            Ok(mv)
        }
        n => Err(MatchError::Ambiguous(spec.to_string(), n)),
    }
}

fn matches_static(mv: &Move, spec: &MoveSpec) -> bool {
    if let Some(pt) = spec.piece_type {
        if mv.piece_type != Some(pt) {
            return false;
        }
    }
    if let Some(file) = spec.from_file {
        if file_of(mv.from) != file {
            return false;
        }
    }
    if let Some(rank) = spec.from_rank {
        if rank_of(mv.from) != rank {
            return false;
        }
    }
    if let Some(file) = spec.to_file {
        if file_of(mv.to) != file {
            return false;
        }
    }
    if let Some(rank) = spec.to_rank {
        if rank_of(mv.to) != rank {
            return false;
        }
    }
    match spec.is_capture {
        Some(true) if mv.capture.is_none() => return false,
        Some(false) if mv.capture.is_some() => return false,
        _ => {}
    }
    if let Some(pt) = spec.capture_type {
        if mv.capture != Some(pt) {
            return false;
        }
    }
    if spec.is_en_passant && !mv.is_en_passant {
        return false;
    }
    if spec.is_promotion && mv.promotion.is_none() {
        return false;
    }
    if let Some(promo) = spec.promotion_type {
        if mv.promotion != Some(promo) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::{alg_to_space, file_index};
    use crate::board::piece::{PieceType, Player};

    fn spec_to(pt: Option<PieceType>, to: &str) -> MoveSpec {
        let space = alg_to_space(to).unwrap();
        MoveSpec {
            piece_type: pt,
            to_file: Some(file_of(space)),
            to_rank: Some(rank_of(space)),
            ..MoveSpec::default()
        }
    }

    #[test]
    fn unique_pawn_advance_resolves() {
        let mut board = Board::new();
        let spec = MoveSpec {
            from_file: file_index('b'),
            from_rank: Some(1),
            to_file: file_index('b'),
            to_rank: Some(2),
            ..MoveSpec::default()
        };
        let mv = resolve_move(&mut board, &spec).unwrap();
        assert_eq!(mv.from, alg_to_space("b1").unwrap());
        assert_eq!(mv.to, alg_to_space("b2").unwrap());
    }

    #[test]
    fn both_knights_reach_f4() {
        let mut board = Board::new();
        let spec = spec_to(Some(PieceType::Knight), "f4");
        let matched = moves_matching(&mut board, &spec);
        assert_eq!(matched.len(), 2);
        assert_eq!(
            resolve_move(&mut board, &spec),
            Err(MatchError::Ambiguous(spec.to_string(), 2))
        );

        // Disambiguating by the source file singles one out.
        let narrowed = MoveSpec {
            from_file: file_index('d'),
            ..spec
        };
        let mv = resolve_move(&mut board, &narrowed).unwrap();
        assert_eq!(mv.from, alg_to_space("d1").unwrap());
    }

    #[test]
    fn no_match_reports_descriptor() {
        let mut board = Board::new();
        let spec = spec_to(Some(PieceType::Queen), "f4");
        assert!(matches!(
            resolve_move(&mut board, &spec),
            Err(MatchError::NoMatch(_))
        ));
    }

    #[test]
    fn capture_flag_filters() {
        let mut board = Board::from_placements(
            Player::White,
            &[
                (Player::White, PieceType::King, "a1"),
                (Player::Black, PieceType::King, "h9"),
                (Player::White, PieceType::Rook, "f6"),
                (Player::Black, PieceType::Pawn, "f9"),
            ],
        )
        .unwrap();
        let spec = MoveSpec {
            piece_type: Some(PieceType::Rook),
            is_capture: Some(true),
            ..MoveSpec::default()
        };
        let mv = resolve_move(&mut board, &spec).unwrap();
        assert_eq!(mv.to, alg_to_space("f9").unwrap());
        assert_eq!(mv.capture, Some(PieceType::Pawn));
    }

    #[test]
    fn checkness_filter_requires_check() {
        let mut board = Board::from_placements(
            Player::White,
            &[
                (Player::White, PieceType::King, "f9"),
                (Player::White, PieceType::Queen, "a5"),
                (Player::Black, PieceType::King, "f11"),
            ],
        )
        .unwrap();
        // Both Qf10 and Qe9 deliver mate along the same ray.
        let broad = MoveSpec {
            piece_type: Some(PieceType::Queen),
            checkness: Some(Checkness::Checkmate),
            ..MoveSpec::default()
        };
        assert_eq!(moves_matching(&mut board, &broad).len(), 2);

        let narrowed = MoveSpec {
            to_file: file_index('f'),
            to_rank: Some(10),
            ..broad
        };
        let mv = resolve_move(&mut board, &narrowed).unwrap();
        assert_eq!(mv.to, alg_to_space("f10").unwrap());
        // The board is untouched by the speculative filtering.
        assert_eq!(board.halfmove_count(), 0);
        assert_eq!(board.to_move(), Player::White);
    }
}
