//! Board representation and game-state types.
//!
//! Contains the hex coordinate system, the precomputed board geometry,
//! pieces, moves, Zobrist keys, and the mutable game state itself.

pub mod geometry;
pub mod hex;
pub mod moves;
pub mod piece;
pub mod state;
pub mod zobrist;

pub use geometry::{
    alg_to_space, file_index, geometry, is_on_board, pos_to_space, rank_of, space_to_alg,
    space_to_pos, AlgError, Geometry, Space, FILE_CHARS, FILE_COUNT, FILE_LENGTHS, FILE_OFFSETS,
    SPACE_COUNT,
};
pub use hex::{HexPos, HexVec};
pub use moves::{Checkness, Move, MoveEval, MoveSpec};
pub use piece::{
    Piece, PieceType, Player, ALL_PIECE_TYPES, ALL_PLAYERS, PIECE_TYPE_COUNT, PLAYER_COUNT,
    PROMOTION_TYPES,
};
pub use state::{Board, BoardError, Conditions, HistoryFrame};
pub use zobrist::{zobrist, ZobristTable, ZOBRIST_KEY_COUNT};
