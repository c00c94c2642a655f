//! Board state, reversible move execution, and game-end conditions.
//!
//! The board holds one optional piece per space plus a history stack of
//! frames, one per executed half-move and one baseline frame for the
//! starting position. Each frame records the move that produced it, the
//! en-passant target it left behind, the draw-clock value, the position
//! hash, and the conditions evaluated for the resulting position. Undo
//! pops a frame and restores the previous position exactly.

use thiserror::Error;

use super::geometry::{alg_to_space, geometry, AlgError, Space, SPACE_COUNT};
use super::moves::Move;
use super::piece::{Piece, PieceType, Player, ALL_PLAYERS};
use super::zobrist::zobrist;
use crate::movegen;

/// Flags evaluated after each half-move, describing the position from
/// the point of view of the player now to move.
///
/// The 3-fold and 50-move flags are claimable: they are surfaced for
/// the caller to act on and play continues. The 5-fold and 75-move
/// thresholds are forced draws and end the game, as do checkmate and
/// stalemate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Conditions {
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    /// Position has now occurred at least three times.
    pub repetition_3x: bool,
    /// Position has now occurred at least five times.
    pub repetition_5x: bool,
    /// At least 100 half-moves without a capture or pawn move.
    pub nonprogress_50: bool,
    /// At least 150 half-moves without a capture or pawn move.
    pub nonprogress_75: bool,
}

impl Conditions {
    /// Forced draw: neither side may play on past these thresholds.
    pub fn is_forced_draw(&self) -> bool {
        self.repetition_5x || self.nonprogress_75
    }

    pub fn is_game_over(&self) -> bool {
        self.checkmate || self.stalemate || self.is_forced_draw()
    }
}

/// One entry of the history stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryFrame {
    /// Move that produced this frame; `None` only for the baseline.
    pub mv: Option<Move>,
    /// En-passant target left for the next player, if any.
    pub ep_target: Option<Space>,
    /// Half-moves since the last capture or pawn move.
    pub nonprogress: u32,
    /// Zobrist hash of the piece layout.
    pub hash: u64,
    pub conditions: Conditions,
}

/// Static-integrity problems found by [`Board::board_errors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum BoardError {
    #[error("{0:?} has more than one king")]
    ExcessKings(Player),
    #[error("{0:?} has more than nine pawns")]
    ExcessPawns(Player),
    #[error("{0:?} has more pieces than promotions could produce")]
    ExcessPieces(Player),
    #[error("{0:?} has no king")]
    MissingKing(Player),
    #[error("{0:?} pawn stands in its own court at space {1}")]
    PawnInCourt(Player, Space),
    #[error("{0:?} pawn stands unpromoted on its promotion rank at space {1}")]
    PawnOnBackRank(Player, Space),
    #[error("en-passant target at space {0} has no capturable pawn behind it")]
    InvalidEpTarget(Space),
}

const INITIAL_LAYOUT: [(Player, PieceType, &[&str]); 12] = [
    (Player::Black, PieceType::King, &["g10"]),
    (Player::Black, PieceType::Queen, &["e10"]),
    (Player::Black, PieceType::Rook, &["c8", "i8"]),
    (Player::Black, PieceType::Bishop, &["f9", "f10", "f11"]),
    (Player::Black, PieceType::Knight, &["d9", "h9"]),
    (
        Player::Black,
        PieceType::Pawn,
        &["b7", "c7", "d7", "e7", "f7", "g7", "h7", "i7", "k7"],
    ),
    (Player::White, PieceType::King, &["g1"]),
    (Player::White, PieceType::Queen, &["e1"]),
    (Player::White, PieceType::Rook, &["c1", "i1"]),
    (Player::White, PieceType::Bishop, &["f1", "f2", "f3"]),
    (Player::White, PieceType::Knight, &["d1", "h1"]),
    (
        Player::White,
        PieceType::Pawn,
        &["b1", "c2", "d3", "e4", "f5", "g4", "h3", "i2", "k1"],
    ),
];

/// The full game state.
#[derive(Debug, PartialEq)]
pub struct Board {
    pieces: [Option<Piece>; SPACE_COUNT],
    to_move: Player,
    /// Half-moves played before the baseline frame. Zero for a fresh
    /// game; nonzero only for positions loaded mid-game.
    base_halfmove: u32,
    history: Vec<HistoryFrame>,
}

impl Board {
    /// The standard starting position, White to move.
    pub fn new() -> Board {
        let placements: Vec<(Player, PieceType, &str)> = INITIAL_LAYOUT
            .iter()
            .flat_map(|&(player, pt, cells)| cells.iter().map(move |&alg| (player, pt, alg)))
            .collect();
        Board::from_placements(Player::White, &placements).expect("initial layout")
    }

    /// A board with an arbitrary piece layout, for tests and puzzles.
    pub fn from_placements(
        to_move: Player,
        placements: &[(Player, PieceType, &str)],
    ) -> Result<Board, AlgError> {
        let mut pieces = [None; SPACE_COUNT];
        for &(player, pt, alg) in placements {
            let space = alg_to_space(alg)?;
            pieces[space] = Some(Piece::new(player, pt));
        }
        Ok(Board::from_parts(pieces, to_move, None, 0, 0))
    }

    pub(crate) fn from_parts(
        pieces: [Option<Piece>; SPACE_COUNT],
        to_move: Player,
        ep_target: Option<Space>,
        nonprogress: u32,
        base_halfmove: u32,
    ) -> Board {
        let mut board = Board {
            pieces,
            to_move,
            base_halfmove,
            history: Vec::new(),
        };
        let hash = board.zobrist_hash();
        board.history.push(HistoryFrame {
            mv: None,
            ep_target,
            nonprogress,
            hash,
            conditions: Conditions::default(),
        });
        // A loaded position may already stand in check or past a draw
        // clock; the baseline frame reports that like any other.
        let conditions = board.evaluate_conditions();
        board.history.last_mut().expect("baseline frame").conditions = conditions;
        board
    }

    pub fn piece_at(&self, space: Space) -> Option<Piece> {
        self.pieces[space]
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Half-moves played since the start of the game.
    pub fn halfmove_count(&self) -> u32 {
        self.base_halfmove + (self.history.len() as u32 - 1)
    }

    pub fn fullmove_number(&self) -> u32 {
        self.halfmove_count() / 2 + 1
    }

    pub fn ep_target(&self) -> Option<Space> {
        self.top_frame().ep_target
    }

    /// Half-moves since the last capture or pawn move.
    pub fn nonprogress(&self) -> u32 {
        self.top_frame().nonprogress
    }

    /// Condition flags for the current position.
    pub fn conditions(&self) -> Conditions {
        self.top_frame().conditions
    }

    /// Move that produced the current position, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.top_frame().mv
    }

    pub fn history(&self) -> &[HistoryFrame] {
        &self.history
    }

    fn top_frame(&self) -> &HistoryFrame {
        self.history.last().expect("history is never empty")
    }

    /// Recomputes the layout hash from scratch.
    pub fn zobrist_hash(&self) -> u64 {
        let table = zobrist();
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(space, piece)| piece.map(|p| table.key(space, p)))
            .fold(0, |acc, key| acc ^ key)
    }

    pub fn king_space(&self, player: Player) -> Option<Space> {
        self.pieces
            .iter()
            .position(|&p| p == Some(Piece::new(player, PieceType::King)))
    }

    /// Pseudolegal moves for the side to move.
    pub fn moves_pseudolegal(&self) -> Vec<Move> {
        movegen::pseudolegal_moves(self)
    }

    /// Legal moves for the side to move. Requires `&mut self` because
    /// legality is tested by speculative make and undo; the board is
    /// unchanged on return.
    pub fn moves_legal(&mut self) -> Vec<Move> {
        movegen::legal_moves(self)
    }

    pub fn is_king_attacked(&self, player: Player) -> bool {
        movegen::is_king_attacked(self, player)
    }

    /// Executes a move and evaluates the resulting conditions.
    ///
    /// The move must come from the generated move list for the current
    /// position. Calling this after the game has ended (checkmate,
    /// stalemate, or a forced draw) is a programming error and panics.
    pub fn move_make(&mut self, mv: Move) -> Conditions {
        assert!(
            !self.conditions().is_game_over(),
            "move_make called after the game has ended"
        );
        self.apply(mv);

        let conditions = self.evaluate_conditions();
        let frame = self.history.last_mut().expect("frame just pushed");
        frame.conditions = conditions;
        if let Some(record) = frame.mv.as_mut() {
            record.gives_check = conditions.check;
            record.gives_checkmate = conditions.checkmate;
        }
        conditions
    }

    /// Reverts the most recent half-move and returns it. Panics on the
    /// baseline position.
    pub fn move_undo(&mut self) -> Move {
        self.revert()
    }

    /// Condition flags for the current position, relative to the side
    /// to move. Uses speculative make/undo for the reply test; the
    /// board is unchanged on return.
    fn evaluate_conditions(&mut self) -> Conditions {
        let check = movegen::is_king_attacked(self, self.to_move);
        let has_reply = !movegen::legal_moves(self).is_empty();
        let hash = self.top_frame().hash;
        let repeats = self.history.iter().filter(|f| f.hash == hash).count();
        let nonprogress = self.nonprogress();
        Conditions {
            check,
            checkmate: check && !has_reply,
            stalemate: !check && !has_reply,
            repetition_3x: repeats >= 3,
            repetition_5x: repeats >= 5,
            nonprogress_50: nonprogress >= 100,
            nonprogress_75: nonprogress >= 150,
        }
    }

    /// Piece mutation half of move execution: updates the layout, the
    /// side to move, and the history stack, without evaluating
    /// conditions. Legality testing uses this directly to avoid
    /// recursing through condition evaluation.
    pub(crate) fn apply(&mut self, mv: Move) {
        let mover = self.pieces[mv.from].unwrap_or_else(|| {
            panic!(
                "no piece on {} to move",
                super::geometry::space_to_alg(mv.from)
            )
        });
        assert_eq!(mover.player, self.to_move, "moving out of turn");

        let g = geometry();
        let mut record = mv;
        record.piece_type = Some(mover.piece_type);

        let is_ep = mover.piece_type == PieceType::Pawn
            && self.ep_target() == Some(mv.to)
            && self.pieces[mv.to].is_none();
        record.is_en_passant = is_ep;

        let capture_space = if is_ep {
            // The hopped pawn sits one of its own steps beyond the
            // target it skipped.
            g.pawn_advance(self.to_move.opponent(), mv.to)
                .expect("en-passant victim space")
        } else {
            mv.to
        };
        record.capture = self.pieces[capture_space].map(|p| p.piece_type);
        self.pieces[capture_space] = None;

        self.pieces[mv.to] = Some(mover);
        self.pieces[mv.from] = None;
        if let Some(promo) = mv.promotion {
            self.pieces[mv.to] = Some(Piece::new(mover.player, promo));
        }

        let next_ep = if mover.piece_type == PieceType::Pawn
            && g.pawn_hop(self.to_move, mv.from) == Some(mv.to)
        {
            g.pawn_advance(self.to_move, mv.from)
        } else {
            None
        };

        let nonprogress = if record.is_progress() {
            0
        } else {
            self.nonprogress() + 1
        };

        self.to_move = self.to_move.opponent();
        let hash = self.zobrist_hash();
        self.history.push(HistoryFrame {
            mv: Some(record),
            ep_target: next_ep,
            nonprogress,
            hash,
            conditions: Conditions::default(),
        });
    }

    /// Inverse of [`Board::apply`].
    pub(crate) fn revert(&mut self) -> Move {
        assert!(self.history.len() > 1, "move_undo on the baseline position");
        let frame = self.history.pop().expect("history is never empty");
        let record = frame.mv.expect("non-baseline frame carries a move");

        self.to_move = self.to_move.opponent();
        let mover = if record.promotion.is_some() {
            Piece::new(self.to_move, PieceType::Pawn)
        } else {
            self.pieces[record.to].expect("moved piece present during undo")
        };
        self.pieces[record.from] = Some(mover);
        self.pieces[record.to] = None;

        if let Some(capture_type) = record.capture {
            let space = if record.is_en_passant {
                geometry()
                    .pawn_advance(self.to_move.opponent(), record.to)
                    .expect("en-passant victim space")
            } else {
                record.to
            };
            self.pieces[space] = Some(Piece::new(self.to_move.opponent(), capture_type));
        }
        record
    }

    /// Scans the layout for statically invalid configurations. An empty
    /// result does not prove reachability, only consistency.
    pub fn board_errors(&self) -> Vec<BoardError> {
        let g = geometry();
        let mut errors = Vec::new();

        for player in ALL_PLAYERS {
            let count = |pt: PieceType| {
                self.pieces
                    .iter()
                    .filter(|&&p| p == Some(Piece::new(player, pt)))
                    .count()
            };
            let kings = count(PieceType::King);
            let pawns = count(PieceType::Pawn);
            if kings == 0 {
                errors.push(BoardError::MissingKing(player));
            } else if kings > 1 {
                errors.push(BoardError::ExcessKings(player));
            }
            if pawns > 9 {
                errors.push(BoardError::ExcessPawns(player));
            }

            // Each piece beyond the starting complement must have come
            // from a promotion, and promotions consume pawns.
            let base = [
                (PieceType::Queen, 1usize),
                (PieceType::Rook, 2),
                (PieceType::Bishop, 3),
                (PieceType::Knight, 2),
            ];
            let promoted: usize = base
                .iter()
                .map(|&(pt, limit)| count(pt).saturating_sub(limit))
                .sum();
            if promoted > 9usize.saturating_sub(pawns) {
                errors.push(BoardError::ExcessPieces(player));
            }

            for space in 0..SPACE_COUNT {
                if self.pieces[space] != Some(Piece::new(player, PieceType::Pawn)) {
                    continue;
                }
                if g.is_court_space(player, space) {
                    errors.push(BoardError::PawnInCourt(player, space));
                }
                // A pawn reaching its promotion rank promotes at once,
                // so one standing there is invalid.
                if g.is_promotion_space(player, space) {
                    errors.push(BoardError::PawnOnBackRank(player, space));
                }
            }
        }

        if let Some(target) = self.ep_target() {
            let hopper = self.to_move.opponent();
            let victim = g.pawn_advance(hopper, target).and_then(|s| self.pieces[s]);
            if victim != Some(Piece::new(hopper, PieceType::Pawn)) {
                errors.push(BoardError::InvalidEpTarget(target));
            }
        }
        errors
    }

    /// Renders the board as a text hexagon, one character per piece,
    /// `-` for empty cells.
    pub fn diagram(&self) -> String {
        const ROWS: [&[Space]; 21] = [
            &[40],
            &[30, 51],
            &[21, 41, 61],
            &[13, 31, 52, 70],
            &[6, 22, 42, 62, 78],
            &[0, 14, 32, 53, 71, 85],
            &[7, 23, 43, 63, 79],
            &[1, 15, 33, 54, 72, 86],
            &[8, 24, 44, 64, 80],
            &[2, 16, 34, 55, 73, 87],
            &[9, 25, 45, 65, 81],
            &[3, 17, 35, 56, 74, 88],
            &[10, 26, 46, 66, 82],
            &[4, 18, 36, 57, 75, 89],
            &[11, 27, 47, 67, 83],
            &[5, 19, 37, 58, 76, 90],
            &[12, 28, 48, 68, 84],
            &[20, 38, 59, 77],
            &[29, 49, 69],
            &[39, 60],
            &[50],
        ];
        const BASE_INDENT: usize = 8;
        const INDENT_STEP: usize = 2;
        const ITEM_WIDTH: usize = 4;

        let mut lines = Vec::with_capacity(ROWS.len());
        for (row_num, row) in ROWS.iter().enumerate() {
            let from_middle = (row_num as i32 - 10).unsigned_abs() as usize;
            let indent = if from_middle > 5 {
                BASE_INDENT + (from_middle - 5) * INDENT_STEP
            } else if from_middle % 2 == 0 {
                BASE_INDENT + INDENT_STEP
            } else {
                BASE_INDENT
            };
            let mut line = " ".repeat(indent);
            for &space in *row {
                let c = self.pieces[space].map_or('-', |p| p.fen_char());
                line.push_str(&format!("{c:<ITEM_WIDTH$}"));
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}
