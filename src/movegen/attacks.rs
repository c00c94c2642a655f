//! Attack detection by reverse probing from the target cell.
//!
//! Rather than generating the opponent's moves, each probe walks
//! outward from the target: leaper tables find enemy kings and
//! knights, edge-truncated rays find the first blocker on each line,
//! and the defender's own capture table mirrors enemy pawn attacks.

use crate::board::geometry::{geometry, Space};
use crate::board::piece::{Piece, PieceType, Player};
use crate::board::Board;

/// True when `attacker` attacks `target`. Occupancy of the target cell
/// itself is ignored.
pub fn is_space_attacked(board: &Board, target: Space, attacker: Player) -> bool {
    let g = geometry();

    for &s in g.king_leaps(target) {
        if board.piece_at(s) == Some(Piece::new(attacker, PieceType::King)) {
            return true;
        }
    }
    for &s in g.knight_leaps(target) {
        if board.piece_at(s) == Some(Piece::new(attacker, PieceType::Knight)) {
            return true;
        }
    }

    // A pawn of `attacker` attacks `target` exactly from the cells the
    // defending side could capture toward; the capture vectors of the
    // two sides are negations of each other.
    for &s in g.pawn_captures(attacker.opponent(), target) {
        if board.piece_at(s) == Some(Piece::new(attacker, PieceType::Pawn)) {
            return true;
        }
    }

    for ray in g.rays(PieceType::Rook, target) {
        if let Some(piece) = first_piece_on_ray(board, ray) {
            if piece.player == attacker
                && matches!(piece.piece_type, PieceType::Rook | PieceType::Queen)
            {
                return true;
            }
        }
    }
    for ray in g.rays(PieceType::Bishop, target) {
        if let Some(piece) = first_piece_on_ray(board, ray) {
            if piece.player == attacker
                && matches!(piece.piece_type, PieceType::Bishop | PieceType::Queen)
            {
                return true;
            }
        }
    }
    false
}

fn first_piece_on_ray(board: &Board, ray: &[Space]) -> Option<Piece> {
    ray.iter().find_map(|&s| board.piece_at(s))
}

/// True when the player's king stands attacked. A board with no king
/// for `player` reports no attack.
pub fn is_king_attacked(board: &Board, player: Player) -> bool {
    match board.king_space(player) {
        Some(space) => is_space_attacked(board, space, player.opponent()),
        None => false,
    }
}
