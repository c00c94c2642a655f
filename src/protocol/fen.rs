//! Position-string codec.
//!
//! The format follows orthodox FEN, adapted to the hexagonal board:
//! eleven file sections separated by `/`, a-file first, each listing
//! its cells from the highest rank down with run-length encoded
//! empties. The trailing fields are the active color, a castling field
//! that is always `-` (there is no castling), the en-passant target,
//! the draw clock in half-moves, and the full-move number.

use thiserror::Error;

use crate::board::geometry::{
    alg_to_space, space_to_alg, FILE_COUNT, FILE_LENGTHS, FILE_OFFSETS, SPACE_COUNT,
};
use crate::board::piece::{Piece, Player};
use crate::board::Board;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 fields, found {0}")]
    WrongFieldCount(usize),
    #[error("expected 11 file sections, found {0}")]
    WrongSectionCount(usize),
    #[error("unknown piece character '{0}'")]
    UnknownPiece(char),
    #[error("file section {0} describes {1} cells, expected {2}")]
    WrongFileLength(usize, usize, usize),
    #[error("invalid active color '{0}'")]
    InvalidColor(String),
    #[error("invalid castling field '{0}' (only '-' is accepted)")]
    InvalidCastling(String),
    #[error("invalid en-passant field '{0}'")]
    InvalidEpTarget(String),
    #[error("invalid counter field '{0}'")]
    InvalidCounter(String),
}

/// Encodes the piece layout alone.
pub fn encode_board(board: &Board) -> String {
    let mut sections = Vec::with_capacity(FILE_COUNT);
    for file in 0..FILE_COUNT {
        let mut section = String::new();
        let mut empties = 0;
        for cell in 0..FILE_LENGTHS[file] {
            match board.piece_at(FILE_OFFSETS[file] + cell) {
                None => empties += 1,
                Some(piece) => {
                    if empties > 0 {
                        section.push_str(&empties.to_string());
                        empties = 0;
                    }
                    section.push(piece.fen_char());
                }
            }
        }
        if empties > 0 {
            section.push_str(&empties.to_string());
        }
        sections.push(section);
    }
    sections.join("/")
}

/// Encodes the full position, including side to move and counters.
pub fn encode_fen(board: &Board) -> String {
    let ep = match board.ep_target() {
        Some(space) => space_to_alg(space),
        None => "-".to_string(),
    };
    format!(
        "{} {} - {} {} {}",
        encode_board(board),
        board.to_move().fen_char(),
        ep,
        board.nonprogress(),
        board.fullmove_number(),
    )
}

/// Parses a full position string into a board with an empty history.
pub fn parse_fen(text: &str) -> Result<Board, FenError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(FenError::WrongFieldCount(fields.len()));
    }

    let sections: Vec<&str> = fields[0].split('/').collect();
    if sections.len() != FILE_COUNT {
        return Err(FenError::WrongSectionCount(sections.len()));
    }
    let mut pieces = [None; SPACE_COUNT];
    for (file, section) in sections.iter().enumerate() {
        let mut cell = 0usize;
        let mut digits = String::new();
        for c in section.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            if !digits.is_empty() {
                cell += digits
                    .parse::<usize>()
                    .map_err(|_| FenError::WrongFileLength(file, cell, FILE_LENGTHS[file]))?;
                digits.clear();
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::UnknownPiece(c))?;
            if cell >= FILE_LENGTHS[file] {
                return Err(FenError::WrongFileLength(file, cell + 1, FILE_LENGTHS[file]));
            }
            pieces[FILE_OFFSETS[file] + cell] = Some(piece);
            cell += 1;
        }
        if !digits.is_empty() {
            cell += digits
                .parse::<usize>()
                .map_err(|_| FenError::WrongFileLength(file, cell, FILE_LENGTHS[file]))?;
        }
        if cell != FILE_LENGTHS[file] {
            return Err(FenError::WrongFileLength(file, cell, FILE_LENGTHS[file]));
        }
    }

    let to_move = match fields[1] {
        "w" => Player::White,
        "b" => Player::Black,
        other => return Err(FenError::InvalidColor(other.to_string())),
    };
    if fields[2] != "-" {
        return Err(FenError::InvalidCastling(fields[2].to_string()));
    }
    let ep_target = match fields[3] {
        "-" => None,
        alg => Some(
            alg_to_space(alg).map_err(|_| FenError::InvalidEpTarget(alg.to_string()))?,
        ),
    };
    let nonprogress: u32 = fields[4]
        .parse()
        .map_err(|_| FenError::InvalidCounter(fields[4].to_string()))?;
    let fullmove: u32 = fields[5]
        .parse()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| FenError::InvalidCounter(fields[5].to_string()))?;

    let base_halfmove = (fullmove - 1) * 2 + u32::from(to_move == Player::Black);
    Ok(Board::from_parts(
        pieces,
        to_move,
        ep_target,
        nonprogress,
        base_halfmove,
    ))
}
