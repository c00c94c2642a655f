//! Static geometry of the 91-cell hexagonal board.
//!
//! Spaces are numbered file-major, a-file through l-file, with ranks
//! descending inside each file: space 0 is a6, space 5 is a1, space 40
//! is f11, and space 90 is l1. A cell lies on the board exactly when
//! `hex0`, `hex1`, and `hex1 - hex0` all fall in `[-5, 5]`.
//!
//! All movement lookups are precomputed once into [`Geometry`] and
//! shared through [`geometry()`].

use once_cell::sync::Lazy;
use thiserror::Error;

use super::hex::{HexPos, HexVec};
use super::piece::{Player, PieceType};

/// Index of a board cell, `0..SPACE_COUNT`.
pub type Space = usize;

pub const SPACE_COUNT: usize = 91;
pub const FILE_COUNT: usize = 11;

/// File letters in board order. The letter `j` is skipped by convention.
pub const FILE_CHARS: [char; FILE_COUNT] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'k', 'l'];

pub const FILE_LENGTHS: [usize; FILE_COUNT] = [6, 7, 8, 9, 10, 11, 10, 9, 8, 7, 6];

pub const FILE_OFFSETS: [usize; FILE_COUNT] = [0, 6, 13, 21, 30, 40, 51, 61, 70, 78, 85];

/// The twelve unit directions, clockwise from straight ahead (White's
/// point of view). Even indices are orthogonal, odd are diagonal.
pub const CLOCK_VECS: [HexVec; 12] = [
    HexVec::new(0, 1),
    HexVec::new(1, 2),
    HexVec::new(1, 1),
    HexVec::new(2, 1),
    HexVec::new(1, 0),
    HexVec::new(1, -1),
    HexVec::new(0, -1),
    HexVec::new(-1, -2),
    HexVec::new(-1, -1),
    HexVec::new(-2, -1),
    HexVec::new(-1, 0),
    HexVec::new(-1, 1),
];

pub const ORTHO_VECS: [HexVec; 6] = [
    CLOCK_VECS[0],
    CLOCK_VECS[2],
    CLOCK_VECS[4],
    CLOCK_VECS[6],
    CLOCK_VECS[8],
    CLOCK_VECS[10],
];

pub const DIAG_VECS: [HexVec; 6] = [
    CLOCK_VECS[1],
    CLOCK_VECS[3],
    CLOCK_VECS[5],
    CLOCK_VECS[7],
    CLOCK_VECS[9],
    CLOCK_VECS[11],
];

/// Knight leaps: two steps along one orthogonal direction, one step
/// along an adjacent orthogonal direction.
pub const KNIGHT_VECS: [HexVec; 12] = [
    HexVec::new(1, 3),
    HexVec::new(-1, 2),
    HexVec::new(2, 3),
    HexVec::new(3, 2),
    HexVec::new(3, 1),
    HexVec::new(2, -1),
    HexVec::new(1, -2),
    HexVec::new(-1, -3),
    HexVec::new(-2, -3),
    HexVec::new(-3, -2),
    HexVec::new(-2, 1),
    HexVec::new(-3, -1),
];

/// Failure to interpret an algebraic cell name such as `f11`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgError {
    #[error("empty cell name")]
    Empty,
    #[error("invalid file letter '{0}'")]
    InvalidFile(char),
    #[error("invalid rank in cell name '{0}'")]
    InvalidRank(String),
    #[error("cell '{0}' lies outside the board")]
    OffBoard(String),
}

pub fn is_on_board(pos: HexPos) -> bool {
    let range = -5..=5;
    range.contains(&pos.hex0)
        && range.contains(&pos.hex1)
        && range.contains(&(pos.hex1 - pos.hex0))
}

/// File index (0 for the a-file) of a space.
pub fn file_of(space: Space) -> usize {
    debug_assert!(space < SPACE_COUNT);
    FILE_OFFSETS
        .iter()
        .rposition(|&offset| offset <= space)
        .unwrap_or(0)
}

/// Rank of a space, `1..=11`.
pub fn rank_of(space: Space) -> u8 {
    let file = file_of(space);
    (FILE_LENGTHS[file] - (space - FILE_OFFSETS[file])) as u8
}

pub fn space_to_pos(space: Space) -> HexPos {
    let file = file_of(space);
    let hex0 = file as i8 - 5;
    let hex1 = rank_of(space) as i8 - 6 + hex0.max(0);
    HexPos::new(hex0, hex1)
}

pub fn pos_to_space(pos: HexPos) -> Option<Space> {
    if !is_on_board(pos) {
        return None;
    }
    let file = (pos.hex0 + 5) as usize;
    let rank = (6 - pos.hex0.max(0) + pos.hex1) as usize;
    debug_assert!(rank >= 1 && rank <= FILE_LENGTHS[file]);
    Some(FILE_OFFSETS[file] + FILE_LENGTHS[file] - rank)
}

pub fn space_to_alg(space: Space) -> String {
    format!("{}{}", FILE_CHARS[file_of(space)], rank_of(space))
}

/// Index of a file letter, accepting either case.
pub fn file_index(c: char) -> Option<usize> {
    FILE_CHARS.iter().position(|&f| f == c.to_ascii_lowercase())
}

pub fn alg_to_space(alg: &str) -> Result<Space, AlgError> {
    let mut chars = alg.chars();
    let file_char = chars.next().ok_or(AlgError::Empty)?;
    let file = file_index(file_char).ok_or(AlgError::InvalidFile(file_char))?;
    let rank: usize = chars
        .as_str()
        .parse()
        .map_err(|_| AlgError::InvalidRank(alg.to_string()))?;
    if rank < 1 || rank > 11 {
        return Err(AlgError::InvalidRank(alg.to_string()));
    }
    if rank > FILE_LENGTHS[file] {
        return Err(AlgError::OffBoard(alg.to_string()));
    }
    Ok(FILE_OFFSETS[file] + FILE_LENGTHS[file] - rank)
}

const fn pawn_advance_vec(player: Player) -> HexVec {
    match player {
        Player::White => CLOCK_VECS[0],
        Player::Black => CLOCK_VECS[6],
    }
}

const fn pawn_capture_vecs(player: Player) -> [HexVec; 2] {
    match player {
        Player::White => [CLOCK_VECS[2], CLOCK_VECS[10]],
        Player::Black => [CLOCK_VECS[4], CLOCK_VECS[8]],
    }
}

/// Starting cells of each side's pawns, indexed by `Player`.
const PAWN_HOME_ALGS: [&[&str]; 2] = [
    &["b7", "c7", "d7", "e7", "f7", "g7", "h7", "i7", "k7"],
    &["b1", "c2", "d3", "e4", "f5", "g4", "h3", "i2", "k1"],
];

/// Far edge where each side's pawns promote.
const PROMOTION_ZONE_ALGS: [&[&str]; 2] = [
    &["a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1", "i1", "k1", "l1"],
    &["a6", "b7", "c8", "d9", "e10", "f11", "g10", "h9", "i8", "k7", "l6"],
];

/// Cells behind each side's pawn line. A side's own pawns never stand
/// here in a reachable position.
const COURT_ZONE_ALGS: [&[&str]; 2] = [
    &[
        "c8", "d8", "d9", "e8", "e9", "e10", "f8", "f9", "f10", "f11", "g8", "g9", "g10", "h8",
        "h9", "i8",
    ],
    &[
        "c1", "d1", "d2", "e1", "e2", "e3", "f1", "f2", "f3", "f4", "g1", "g2", "g3", "h1", "h2",
        "i1",
    ],
];

/// Precomputed movement and zone tables for every space.
pub struct Geometry {
    king_leaps: [Vec<Space>; SPACE_COUNT],
    knight_leaps: [Vec<Space>; SPACE_COUNT],
    rook_rays: [Vec<Vec<Space>>; SPACE_COUNT],
    bishop_rays: [Vec<Vec<Space>>; SPACE_COUNT],
    queen_rays: [Vec<Vec<Space>>; SPACE_COUNT],
    pawn_advance: [[Option<Space>; SPACE_COUNT]; 2],
    pawn_hop: [[Option<Space>; SPACE_COUNT]; 2],
    pawn_captures: [[Vec<Space>; SPACE_COUNT]; 2],
    pawn_home: [[bool; SPACE_COUNT]; 2],
    promotion_zone: [[bool; SPACE_COUNT]; 2],
    court_zone: [[bool; SPACE_COUNT]; 2],
}

fn zone_table(algs: [&[&str]; 2]) -> [[bool; SPACE_COUNT]; 2] {
    let mut table = [[false; SPACE_COUNT]; 2];
    for (player, cells) in algs.iter().enumerate() {
        for alg in *cells {
            let space = alg_to_space(alg).expect("zone cell name");
            table[player][space] = true;
        }
    }
    table
}

fn leap_table(vecs: &[HexVec]) -> [Vec<Space>; SPACE_COUNT] {
    std::array::from_fn(|space| {
        let pos = space_to_pos(space);
        vecs.iter().filter_map(|&v| pos_to_space(pos + v)).collect()
    })
}

fn ray_table(vecs: &[HexVec]) -> [Vec<Vec<Space>>; SPACE_COUNT] {
    std::array::from_fn(|space| {
        let start = space_to_pos(space);
        vecs.iter()
            .filter_map(|&v| {
                let mut ray = Vec::new();
                let mut pos = start + v;
                while let Some(s) = pos_to_space(pos) {
                    ray.push(s);
                    pos = pos + v;
                }
                if ray.is_empty() {
                    None
                } else {
                    Some(ray)
                }
            })
            .collect()
    })
}

impl Geometry {
    fn new() -> Geometry {
        let pawn_home = zone_table(PAWN_HOME_ALGS);
        let promotion_zone = zone_table(PROMOTION_ZONE_ALGS);
        let court_zone = zone_table(COURT_ZONE_ALGS);

        let mut pawn_advance = [[None; SPACE_COUNT]; 2];
        let mut pawn_hop = [[None; SPACE_COUNT]; 2];
        let mut pawn_captures: [[Vec<Space>; SPACE_COUNT]; 2] = [
            std::array::from_fn(|_| Vec::new()),
            std::array::from_fn(|_| Vec::new()),
        ];
        for player in [Player::Black, Player::White] {
            let pi = player.index();
            let adv = pawn_advance_vec(player);
            let capts = pawn_capture_vecs(player);
            for space in 0..SPACE_COUNT {
                let pos = space_to_pos(space);
                // A pawn standing in its promotion zone has no further
                // advance.
                if !promotion_zone[pi][space] {
                    pawn_advance[pi][space] = pos_to_space(pos + adv);
                }
                if pawn_home[pi][space] {
                    pawn_hop[pi][space] = pos_to_space(pos + adv * 2);
                }
                pawn_captures[pi][space] =
                    capts.iter().filter_map(|&v| pos_to_space(pos + v)).collect();
            }
        }

        Geometry {
            king_leaps: leap_table(&CLOCK_VECS),
            knight_leaps: leap_table(&KNIGHT_VECS),
            rook_rays: ray_table(&ORTHO_VECS),
            bishop_rays: ray_table(&DIAG_VECS),
            queen_rays: ray_table(&CLOCK_VECS),
            pawn_advance,
            pawn_hop,
            pawn_captures,
            pawn_home,
            promotion_zone,
            court_zone,
        }
    }

    pub fn king_leaps(&self, space: Space) -> &[Space] {
        &self.king_leaps[space]
    }

    pub fn knight_leaps(&self, space: Space) -> &[Space] {
        &self.knight_leaps[space]
    }

    /// Edge-truncated rays for a slider piece type; empty for leapers
    /// and pawns.
    pub fn rays(&self, piece_type: PieceType, space: Space) -> &[Vec<Space>] {
        match piece_type {
            PieceType::Rook => &self.rook_rays[space],
            PieceType::Bishop => &self.bishop_rays[space],
            PieceType::Queen => &self.queen_rays[space],
            _ => &[],
        }
    }

    /// Single-step advance, or `None` at the board edge or inside the
    /// pawn's own promotion zone.
    pub fn pawn_advance(&self, player: Player, space: Space) -> Option<Space> {
        self.pawn_advance[player.index()][space]
    }

    /// Two-step advance, populated only on the pawn's home cells.
    pub fn pawn_hop(&self, player: Player, space: Space) -> Option<Space> {
        self.pawn_hop[player.index()][space]
    }

    pub fn pawn_captures(&self, player: Player, space: Space) -> &[Space] {
        &self.pawn_captures[player.index()][space]
    }

    pub fn is_pawn_home(&self, player: Player, space: Space) -> bool {
        self.pawn_home[player.index()][space]
    }

    pub fn is_promotion_space(&self, player: Player, space: Space) -> bool {
        self.promotion_zone[player.index()][space]
    }

    pub fn is_court_space(&self, player: Player, space: Space) -> bool {
        self.court_zone[player.index()][space]
    }
}

static GEOMETRY: Lazy<Geometry> = Lazy::new(Geometry::new);

/// Shared geometry tables, built on first use.
pub fn geometry() -> &'static Geometry {
    &GEOMETRY
}
