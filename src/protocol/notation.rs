//! Movetext parsing.
//!
//! Turns a single algebraic movetext token such as `Qc3xf9+` or
//! `f10f11=Q` into a [`MoveSpec`] descriptor. Fields are assigned
//! eagerly left to right: a file or rank seen before a capture or
//! destination marker is provisionally the origin, and reassigned to
//! the destination at the end if no destination ever appeared.
//!
//! Ranks may be one or two digits; a leading `1` is held back for one
//! character to see whether `10` or `11` follows. The en-passant
//! markers `ep`, `ep.`, and `e.p.` are recognized by lookahead so the
//! `e` is not mistaken for a file letter.

use thiserror::Error;

use crate::board::geometry::{file_index, geometry, Space, FILE_LENGTHS, FILE_OFFSETS};
use crate::board::moves::{Checkness, MoveEval, MoveSpec};
use crate::board::piece::{PieceType, Player};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("empty movetext")]
    Empty,
    #[error("rank {rank} at index {index} has no place in the move")]
    MisplacedRank { rank: u8, index: usize },
    #[error("file letter '{ch}' at index {index} has no place in the move")]
    MisplacedFile { ch: char, index: usize },
    #[error("invalid file letter '{ch}' at index {index}")]
    InvalidFile { ch: char, index: usize },
    #[error("piece letter '{ch}' at index {index} has no place in the move")]
    MisplacedPiece { ch: char, index: usize },
    #[error("duplicate capture marker at index {0}")]
    DuplicateCapture(usize),
    #[error("duplicate promotion marker at index {0}")]
    DuplicatePromotion(usize),
    #[error("duplicate check marker at index {0}")]
    DuplicateCheckness(usize),
    #[error("unrecognized character '{ch}' at index {index}")]
    UnexpectedChar { ch: char, index: usize },
    #[error("unrecognized evaluation suffix '{0}'")]
    InvalidEval(String),
}

/// Parse progress through a movetext token, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Start,
    FromPieceType,
    FromFile,
    FromRank,
    IsCapture,
    CapturePieceType,
    IsEnPassant,
    ToFile,
    ToRank,
    IsPromotion,
    PromotionType,
    Checkness,
}

/// Parses one movetext token into a move descriptor.
pub fn parse_movetext(text: &str) -> Result<MoveSpec, NotationError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Err(NotationError::Empty);
    }

    let mut spec = MoveSpec::default();
    let mut phase = Phase::Start;
    let mut cached_digit = false;
    let mut skip = 0usize;
    let mut eval = String::new();

    for (k, &c) in chars.iter().enumerate() {
        if skip > 0 {
            skip -= 1;
            continue;
        }

        if c.is_ascii_digit() {
            if cached_digit {
                // Ranks do not exceed 11, so a held-back 1 is only
                // followed by 0 or 1.
                cached_digit = false;
                if c == '0' || c == '1' {
                    let rank = 10 + (c as u8 - b'0');
                    phase = assign_rank(&mut spec, phase, rank, k)?;
                    continue;
                }
                return Err(NotationError::MisplacedRank {
                    rank: c as u8 - b'0',
                    index: k,
                });
            }
            if c == '1' && k + 1 < chars.len() {
                cached_digit = true;
                continue;
            }
            phase = assign_rank(&mut spec, phase, c as u8 - b'0', k)?;
            continue;
        }
        if cached_digit {
            cached_digit = false;
            phase = assign_rank(&mut spec, phase, 1, k)?;
        }

        if c.is_ascii_uppercase() {
            phase = assign_piece(&mut spec, phase, c, k)?;
            continue;
        }
        if c.is_ascii_lowercase() {
            if c == 'x' {
                if spec.is_capture.is_some() {
                    return Err(NotationError::DuplicateCapture(k));
                }
                spec.is_capture = Some(true);
                phase = Phase::IsCapture;
                continue;
            }
            if c == 'e' {
                if chars.get(k + 1) == Some(&'p') {
                    spec.is_en_passant = true;
                    phase = Phase::IsEnPassant;
                    skip = if chars.get(k + 2) == Some(&'.') { 2 } else { 1 };
                    continue;
                }
                if chars.get(k + 1) == Some(&'.')
                    && chars.get(k + 2) == Some(&'p')
                    && chars.get(k + 3) == Some(&'.')
                {
                    spec.is_en_passant = true;
                    phase = Phase::IsEnPassant;
                    skip = 3;
                    continue;
                }
            }
            let file = file_index(c).ok_or(NotationError::InvalidFile { ch: c, index: k })?;
            if phase < Phase::FromFile {
                spec.from_file = Some(file);
                phase = Phase::FromFile;
            } else if phase < Phase::ToFile {
                spec.to_file = Some(file);
                phase = Phase::ToFile;
            } else {
                return Err(NotationError::MisplacedFile { ch: c, index: k });
            }
            continue;
        }
        match c {
            '=' => {
                if spec.is_promotion {
                    return Err(NotationError::DuplicatePromotion(k));
                }
                spec.is_promotion = true;
                phase = Phase::IsPromotion;
            }
            '+' | '#' => {
                if spec.checkness.is_some() {
                    return Err(NotationError::DuplicateCheckness(k));
                }
                spec.checkness = Some(if c == '#' {
                    Checkness::Checkmate
                } else {
                    Checkness::Check
                });
                phase = Phase::Checkness;
            }
            '!' | '?' => eval.push(c),
            _ => return Err(NotationError::UnexpectedChar { ch: c, index: k }),
        }
    }
    if cached_digit {
        phase = assign_rank(&mut spec, phase, 1, chars.len())?;
    }
    let _ = phase;

    if !eval.is_empty() {
        spec.eval =
            Some(MoveEval::from_suffix(&eval).ok_or(NotationError::InvalidEval(eval))?);
    }

    // The eager pass put a lone file and rank in the origin slots; with
    // no destination they were really the destination.
    if spec.from_file.is_some()
        && spec.from_rank.is_some()
        && spec.to_file.is_none()
        && spec.to_rank.is_none()
    {
        spec.to_file = spec.from_file.take();
        spec.to_rank = spec.from_rank.take();
    }
    Ok(spec)
}

fn assign_rank(
    spec: &mut MoveSpec,
    phase: Phase,
    rank: u8,
    index: usize,
) -> Result<Phase, NotationError> {
    if phase < Phase::FromRank {
        spec.from_rank = Some(rank);
        Ok(Phase::FromRank)
    } else if phase < Phase::ToRank {
        spec.to_rank = Some(rank);
        Ok(Phase::ToRank)
    } else {
        Err(NotationError::MisplacedRank { rank, index })
    }
}

fn assign_piece(
    spec: &mut MoveSpec,
    phase: Phase,
    c: char,
    index: usize,
) -> Result<Phase, NotationError> {
    let piece_type =
        PieceType::from_symbol(c).ok_or(NotationError::MisplacedPiece { ch: c, index })?;
    match phase {
        Phase::Start => {
            spec.piece_type = Some(piece_type);
            Ok(Phase::FromPieceType)
        }
        Phase::IsCapture => {
            spec.capture_type = Some(piece_type);
            Ok(Phase::CapturePieceType)
        }
        Phase::IsPromotion => {
            spec.promotion_type = Some(piece_type);
            Ok(Phase::PromotionType)
        }
        // A promotion letter may follow the destination cell directly,
        // without '=', when that cell is on a promotion rank.
        Phase::FromRank if is_promotion_cell(spec.from_file, spec.from_rank) => {
            spec.promotion_type = Some(piece_type);
            Ok(Phase::PromotionType)
        }
        Phase::ToRank if is_promotion_cell(spec.to_file, spec.to_rank) => {
            spec.promotion_type = Some(piece_type);
            Ok(Phase::PromotionType)
        }
        _ => Err(NotationError::MisplacedPiece { ch: c, index }),
    }
}

fn is_promotion_cell(file: Option<usize>, rank: Option<u8>) -> bool {
    let (Some(file), Some(rank)) = (file, rank) else {
        return false;
    };
    let rank = rank as usize;
    if rank < 1 || rank > FILE_LENGTHS[file] {
        return false;
    }
    let space: Space = FILE_OFFSETS[file] + FILE_LENGTHS[file] - rank;
    let g = geometry();
    g.is_promotion_space(Player::White, space) || g.is_promotion_space(Player::Black, space)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(c: char) -> Option<usize> {
        file_index(c)
    }

    #[test]
    fn piece_move_with_origin_and_destination() {
        let spec = parse_movetext("Qe1c3").unwrap();
        assert_eq!(spec.piece_type, Some(PieceType::Queen));
        assert_eq!(spec.from_file, file('e'));
        assert_eq!(spec.from_rank, Some(1));
        assert_eq!(spec.to_file, file('c'));
        assert_eq!(spec.to_rank, Some(3));
        assert_eq!(spec.is_capture, None);
    }

    #[test]
    fn pawn_move_without_piece_letter() {
        let spec = parse_movetext("b1b2").unwrap();
        assert_eq!(spec.piece_type, None);
        assert_eq!(spec.from_file, file('b'));
        assert_eq!(spec.from_rank, Some(1));
        assert_eq!(spec.to_file, file('b'));
        assert_eq!(spec.to_rank, Some(2));
    }

    #[test]
    fn lone_destination_demotes() {
        let spec = parse_movetext("f6").unwrap();
        assert_eq!(spec.from_file, None);
        assert_eq!(spec.from_rank, None);
        assert_eq!(spec.to_file, file('f'));
        assert_eq!(spec.to_rank, Some(6));
    }

    #[test]
    fn capture_with_victim_and_mate() {
        let spec = parse_movetext("Qc3xBf9#").unwrap();
        assert_eq!(spec.piece_type, Some(PieceType::Queen));
        assert_eq!(spec.is_capture, Some(true));
        assert_eq!(spec.capture_type, Some(PieceType::Bishop));
        assert_eq!(spec.to_file, file('f'));
        assert_eq!(spec.to_rank, Some(9));
        assert_eq!(spec.checkness, Some(Checkness::Checkmate));
    }

    #[test]
    fn two_digit_ranks() {
        let spec = parse_movetext("Kg10g9").unwrap();
        assert_eq!(spec.from_rank, Some(10));
        assert_eq!(spec.to_rank, Some(9));

        let spec = parse_movetext("Kg9g10").unwrap();
        assert_eq!(spec.from_rank, Some(9));
        assert_eq!(spec.to_rank, Some(10));

        let spec = parse_movetext("f10f11=Q+").unwrap();
        assert_eq!(spec.from_rank, Some(10));
        assert_eq!(spec.to_rank, Some(11));
        assert!(spec.is_promotion);
        assert_eq!(spec.promotion_type, Some(PieceType::Queen));
        assert_eq!(spec.checkness, Some(Checkness::Check));
    }

    #[test]
    fn trailing_rank_one() {
        let spec = parse_movetext("Kg2g1").unwrap();
        assert_eq!(spec.from_rank, Some(2));
        assert_eq!(spec.to_rank, Some(1));
    }

    #[test]
    fn promotion_without_equals_on_promotion_cell() {
        let spec = parse_movetext("c1Q").unwrap();
        assert_eq!(spec.to_file, file('c'));
        assert_eq!(spec.to_rank, Some(1));
        assert_eq!(spec.promotion_type, Some(PieceType::Queen));
        assert!(!spec.is_promotion);
    }

    #[test]
    fn en_passant_markers() {
        for token in ["fxg6ep", "fxg6ep.", "fxg6e.p."] {
            let spec = parse_movetext(token).unwrap();
            assert!(spec.is_en_passant, "{token}");
            assert_eq!(spec.is_capture, Some(true));
            assert_eq!(spec.from_file, file('f'));
            assert_eq!(spec.to_file, file('g'));
            assert_eq!(spec.to_rank, Some(6));
        }
    }

    #[test]
    fn eval_suffixes() {
        let spec = parse_movetext("Qe1c3!?").unwrap();
        assert_eq!(spec.eval, Some(MoveEval::Interesting));
        assert_eq!(
            parse_movetext("Qe1c3!!!"),
            Err(NotationError::InvalidEval("!!!".into()))
        );
    }

    #[test]
    fn malformed_tokens() {
        assert_eq!(parse_movetext(""), Err(NotationError::Empty));
        assert_eq!(
            parse_movetext("j5"),
            Err(NotationError::InvalidFile { ch: 'j', index: 0 })
        );
        assert_eq!(
            parse_movetext("Zf3"),
            Err(NotationError::MisplacedPiece { ch: 'Z', index: 0 })
        );
        assert_eq!(
            parse_movetext("b1b2b3"),
            Err(NotationError::MisplacedFile { ch: 'b', index: 4 })
        );
        assert_eq!(
            parse_movetext("Qc3xf9*"),
            Err(NotationError::UnexpectedChar { ch: '*', index: 6 })
        );
        assert_eq!(
            parse_movetext("Nf4N"),
            Err(NotationError::MisplacedPiece { ch: 'N', index: 3 })
        );
    }
}
