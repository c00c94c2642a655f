//! Players and piece types.

use serde::{Deserialize, Serialize};

/// One of the two sides. Black is listed first so that its discriminant
/// matches its row in the Zobrist key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    Black = 0,
    White = 1,
}

pub const PLAYER_COUNT: usize = 2;

pub const ALL_PLAYERS: [Player; PLAYER_COUNT] = [Player::Black, Player::White];

impl Player {
    pub const fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the active-color letter used in position strings.
    pub const fn fen_char(self) -> char {
        match self {
            Player::Black => 'b',
            Player::White => 'w',
        }
    }

    pub fn from_fen_char(c: char) -> Option<Player> {
        match c {
            'b' => Some(Player::Black),
            'w' => Some(Player::White),
            _ => None,
        }
    }
}

/// The six piece types of hexagonal chess. There is no castling, so the
/// king and rooks carry no extra state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

pub const PIECE_TYPE_COUNT: usize = 6;

pub const ALL_PIECE_TYPES: [PieceType; PIECE_TYPE_COUNT] = [
    PieceType::King,
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Pawn,
];

/// Piece types a pawn may promote to.
pub const PROMOTION_TYPES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

impl PieceType {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the uppercase letter used in movetext and position strings.
    pub const fn symbol(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Pawn => 'P',
        }
    }

    pub fn from_symbol(c: char) -> Option<PieceType> {
        match c {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub player: Player,
    pub piece_type: PieceType,
}

impl Piece {
    pub const fn new(player: Player, piece_type: PieceType) -> Piece {
        Piece { player, piece_type }
    }

    /// Position-string letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        match self.player {
            Player::White => self.piece_type.symbol(),
            Player::Black => self.piece_type.symbol().to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let player = if c.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let piece_type = PieceType::from_symbol(c.to_ascii_uppercase())?;
        Some(Piece::new(player, piece_type))
    }
}
