//! Textual interchange: position strings and movetext.

pub mod fen;
pub mod notation;

pub use fen::{encode_board, encode_fen, parse_fen, FenError};
pub use notation::{parse_movetext, NotationError};
