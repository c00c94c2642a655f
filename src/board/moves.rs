//! Moves, annotations, and partial move descriptors.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::geometry::{space_to_alg, Space};
use super::piece::PieceType;

/// Quality annotation attached to a move in game records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveEval {
    Good,
    Brilliant,
    Mistake,
    Blunder,
    Interesting,
    Dubious,
}

impl MoveEval {
    pub const fn suffix(self) -> &'static str {
        match self {
            MoveEval::Good => "!",
            MoveEval::Brilliant => "!!",
            MoveEval::Mistake => "?",
            MoveEval::Blunder => "??",
            MoveEval::Interesting => "!?",
            MoveEval::Dubious => "?!",
        }
    }

    pub fn from_suffix(s: &str) -> Option<MoveEval> {
        match s {
            "!" => Some(MoveEval::Good),
            "!!" => Some(MoveEval::Brilliant),
            "?" => Some(MoveEval::Mistake),
            "??" => Some(MoveEval::Blunder),
            "!?" => Some(MoveEval::Interesting),
            "?!" => Some(MoveEval::Dubious),
            _ => None,
        }
    }
}

/// Check or checkmate marker from movetext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Checkness {
    Check,
    Checkmate,
}

impl Checkness {
    pub const fn suffix(self) -> char {
        match self {
            Checkness::Check => '+',
            Checkness::Checkmate => '#',
        }
    }
}

/// A single move.
///
/// Identity is the `(from, to, promotion)` triple; the remaining fields
/// are descriptive annotations filled in during generation and
/// execution, and do not take part in equality or hashing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Move {
    pub from: Space,
    pub to: Space,
    pub promotion: Option<PieceType>,
    pub piece_type: Option<PieceType>,
    pub capture: Option<PieceType>,
    pub is_en_passant: bool,
    pub gives_check: bool,
    pub gives_checkmate: bool,
    pub eval: Option<MoveEval>,
}

impl Move {
    pub const fn new(from: Space, to: Space) -> Move {
        Move {
            from,
            to,
            promotion: None,
            piece_type: None,
            capture: None,
            is_en_passant: false,
            gives_check: false,
            gives_checkmate: false,
            eval: None,
        }
    }

    pub const fn promoting(from: Space, to: Space, promotion: PieceType) -> Move {
        let mut mv = Move::new(from, to);
        mv.promotion = Some(promotion);
        mv
    }

    /// True when the move resets the draw clock: any capture or any
    /// pawn move.
    pub fn is_progress(&self) -> bool {
        self.capture.is_some() || self.piece_type == Some(PieceType::Pawn)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promotion.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pt) = self.piece_type {
            if pt != PieceType::Pawn {
                write!(f, "{}", pt.symbol())?;
            }
        }
        write!(f, "{}", space_to_alg(self.from))?;
        if self.capture.is_some() {
            write!(f, "x")?;
        }
        write!(f, "{}", space_to_alg(self.to))?;
        if self.is_en_passant {
            write!(f, "ep")?;
        }
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.symbol())?;
        }
        if self.gives_checkmate {
            write!(f, "#")?;
        } else if self.gives_check {
            write!(f, "+")?;
        }
        if let Some(eval) = self.eval {
            write!(f, "{}", eval.suffix())?;
        }
        Ok(())
    }
}

/// A partial description of a move, as parsed from movetext.
///
/// Every field is optional; a descriptor matches a generated move when
/// all of its known fields agree. Resolution against the legal-move
/// list is done by [`crate::movegen::moves_matching`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSpec {
    pub piece_type: Option<PieceType>,
    pub from_file: Option<usize>,
    pub from_rank: Option<u8>,
    pub is_capture: Option<bool>,
    pub capture_type: Option<PieceType>,
    pub is_en_passant: bool,
    pub to_file: Option<usize>,
    pub to_rank: Option<u8>,
    pub is_promotion: bool,
    pub promotion_type: Option<PieceType>,
    pub checkness: Option<Checkness>,
    pub eval: Option<MoveEval>,
}

impl fmt::Display for MoveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use super::geometry::FILE_CHARS;

        if let Some(pt) = self.piece_type {
            if pt != PieceType::Pawn {
                write!(f, "{}", pt.symbol())?;
            }
        }
        if let Some(file) = self.from_file {
            write!(f, "{}", FILE_CHARS[file])?;
        }
        if let Some(rank) = self.from_rank {
            write!(f, "{rank}")?;
        }
        if self.is_capture == Some(true) {
            write!(f, "x")?;
        }
        if let Some(pt) = self.capture_type {
            write!(f, "{}", pt.symbol())?;
        }
        if let Some(file) = self.to_file {
            write!(f, "{}", FILE_CHARS[file])?;
        }
        if let Some(rank) = self.to_rank {
            write!(f, "{rank}")?;
        }
        if self.is_en_passant {
            write!(f, "ep")?;
        }
        if let Some(promo) = self.promotion_type {
            write!(f, "={}", promo.symbol())?;
        }
        if let Some(checkness) = self.checkness {
            write!(f, "{}", checkness.suffix())?;
        }
        if let Some(eval) = self.eval {
            write!(f, "{}", eval.suffix())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::alg_to_space;
    use std::collections::HashSet;

    #[test]
    fn identity_ignores_annotations() {
        let from = alg_to_space("e1").unwrap();
        let to = alg_to_space("c3").unwrap();
        let bare = Move::new(from, to);
        let mut annotated = Move::new(from, to);
        annotated.piece_type = Some(PieceType::Queen);
        annotated.gives_check = true;
        annotated.eval = Some(MoveEval::Brilliant);
        assert_eq!(bare, annotated);

        let mut set = HashSet::new();
        set.insert(bare);
        assert!(!set.insert(annotated));
    }

    #[test]
    fn promotion_distinguishes_identity() {
        let from = alg_to_space("f10").unwrap();
        let to = alg_to_space("f11").unwrap();
        let queen = Move::promoting(from, to, PieceType::Queen);
        let rook = Move::promoting(from, to, PieceType::Rook);
        assert_ne!(queen, rook);
        assert_ne!(queen, Move::new(from, to));
    }

    #[test]
    fn display_movetext() {
        let from = alg_to_space("c3").unwrap();
        let to = alg_to_space("f9").unwrap();
        let mut mv = Move::new(from, to);
        mv.piece_type = Some(PieceType::Queen);
        mv.capture = Some(PieceType::Bishop);
        mv.gives_check = true;
        assert_eq!(mv.to_string(), "Qc3xf9+");

        let pawn = Move::new(alg_to_space("b1").unwrap(), alg_to_space("b2").unwrap());
        assert_eq!(pawn.to_string(), "b1b2");
    }

    #[test]
    fn eval_suffix_roundtrip() {
        for eval in [
            MoveEval::Good,
            MoveEval::Brilliant,
            MoveEval::Mistake,
            MoveEval::Blunder,
            MoveEval::Interesting,
            MoveEval::Dubious,
        ] {
            assert_eq!(MoveEval::from_suffix(eval.suffix()), Some(eval));
        }
        assert_eq!(MoveEval::from_suffix("!!!"), None);
    }
}
