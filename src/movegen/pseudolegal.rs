//! Pseudolegal move generation.
//!
//! Generates every move the side to move could make by movement rules
//! alone, ignoring whether the mover's king is left attacked. Legality
//! filtering lives in [`super::legal_moves`].

use crate::board::geometry::{geometry, Space, SPACE_COUNT};
use crate::board::moves::Move;
use crate::board::piece::{PieceType, Player, PROMOTION_TYPES};
use crate::board::Board;

/// All pseudolegal moves for the side to move, in stable space order.
pub fn pseudolegal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    for space in 0..SPACE_COUNT {
        pseudolegal_moves_from(board, space, &mut moves);
    }
    moves
}

/// Appends the pseudolegal moves of the piece on `from`, if it belongs
/// to the side to move.
pub fn pseudolegal_moves_from(board: &Board, from: Space, moves: &mut Vec<Move>) {
    let piece = match board.piece_at(from) {
        Some(p) if p.player == board.to_move() => p,
        _ => return,
    };
    match piece.piece_type {
        PieceType::King | PieceType::Knight => {
            let leaps = if piece.piece_type == PieceType::King {
                geometry().king_leaps(from)
            } else {
                geometry().knight_leaps(from)
            };
            leaper_moves(board, from, piece.piece_type, leaps, moves)
        }
        PieceType::Queen | PieceType::Rook | PieceType::Bishop => {
            slider_moves(board, from, piece.piece_type, moves)
        }
        PieceType::Pawn => pawn_moves(board, from, piece.player, moves),
    }
}

fn leaper_moves(
    board: &Board,
    from: Space,
    piece_type: PieceType,
    destinations: &[Space],
    moves: &mut Vec<Move>,
) {
    for &to in destinations {
        match board.piece_at(to) {
            Some(p) if p.player == board.to_move() => {}
            other => {
                let mut mv = Move::new(from, to);
                mv.piece_type = Some(piece_type);
                mv.capture = other.map(|p| p.piece_type);
                moves.push(mv);
            }
        }
    }
}

fn slider_moves(board: &Board, from: Space, piece_type: PieceType, moves: &mut Vec<Move>) {
    for ray in geometry().rays(piece_type, from) {
        for &to in ray {
            match board.piece_at(to) {
                None => {
                    let mut mv = Move::new(from, to);
                    mv.piece_type = Some(piece_type);
                    moves.push(mv);
                }
                Some(p) => {
                    if p.player != board.to_move() {
                        let mut mv = Move::new(from, to);
                        mv.piece_type = Some(piece_type);
                        mv.capture = Some(p.piece_type);
                        moves.push(mv);
                    }
                    break;
                }
            }
        }
    }
}

fn pawn_moves(board: &Board, from: Space, player: Player, moves: &mut Vec<Move>) {
    let g = geometry();

    if let Some(to) = g.pawn_advance(player, from) {
        if board.piece_at(to).is_none() {
            push_pawn_move(player, from, to, None, false, moves);
            // Two-step hop, only from the home cell and only through an
            // empty intermediate.
            if let Some(hop) = g.pawn_hop(player, from) {
                if board.piece_at(hop).is_none() {
                    push_pawn_move(player, from, hop, None, false, moves);
                }
            }
        }
    }

    for &to in g.pawn_captures(player, from) {
        if board.ep_target() == Some(to) && board.piece_at(to).is_none() {
            push_pawn_move(player, from, to, Some(PieceType::Pawn), true, moves);
        } else if let Some(victim) = board.piece_at(to) {
            if victim.player != player {
                push_pawn_move(player, from, to, Some(victim.piece_type), false, moves);
            }
        }
    }
}

fn push_pawn_move(
    player: Player,
    from: Space,
    to: Space,
    capture: Option<PieceType>,
    is_en_passant: bool,
    moves: &mut Vec<Move>,
) {
    if geometry().is_promotion_space(player, to) {
        for promo in PROMOTION_TYPES {
            let mut mv = Move::promoting(from, to, promo);
            mv.piece_type = Some(PieceType::Pawn);
            mv.capture = capture;
            mv.is_en_passant = is_en_passant;
            moves.push(mv);
        }
    } else {
        let mut mv = Move::new(from, to);
        mv.piece_type = Some(PieceType::Pawn);
        mv.capture = capture;
        mv.is_en_passant = is_en_passant;
        moves.push(mv);
    }
}
