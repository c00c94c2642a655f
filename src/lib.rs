//! Glinski hexagonal chess rules engine.
//!
//! Exposes the board representation, move generation, and text-protocol
//! modules for use by integration tests and downstream callers.

pub mod board;
pub mod movegen;
pub mod protocol;
