//! Zobrist keys for position hashing.
//!
//! One 64-bit key per (space, player, piece type) triple. The table is
//! filled from a fixed seed so hashes are reproducible across runs and
//! processes. A position hash is the XOR of the keys of all occupied
//! cells; moving a piece updates the hash by XORing the keys it leaves
//! and enters, and an empty board hashes to zero.

use once_cell::sync::Lazy;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::geometry::{Space, SPACE_COUNT};
use super::piece::{Piece, PIECE_TYPE_COUNT, PLAYER_COUNT};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

pub const ZOBRIST_KEY_COUNT: usize = SPACE_COUNT * PLAYER_COUNT * PIECE_TYPE_COUNT;

pub struct ZobristTable {
    keys: [u64; ZOBRIST_KEY_COUNT],
}

impl ZobristTable {
    fn new() -> ZobristTable {
        let mut rng = SmallRng::seed_from_u64(ZOBRIST_SEED);
        let keys = std::array::from_fn(|_| rng.gen::<u64>());
        ZobristTable { keys }
    }

    /// Key for a piece standing on a space.
    pub fn key(&self, space: Space, piece: Piece) -> u64 {
        let index = space * PLAYER_COUNT * PIECE_TYPE_COUNT
            + piece.player.index() * PIECE_TYPE_COUNT
            + piece.piece_type.index();
        self.keys[index]
    }
}

static ZOBRIST: Lazy<ZobristTable> = Lazy::new(ZobristTable::new);

/// Shared key table, built on first use.
pub fn zobrist() -> &'static ZobristTable {
    &ZOBRIST
}
