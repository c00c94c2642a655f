//! Axial coordinates for the hexagonal board.
//!
//! Positions and displacement vectors use two axes, `hex0` (file axis,
//! increasing toward the l-file) and `hex1` (forward axis, increasing
//! toward Black's side). The third hex axis is implied by `hex1 - hex0`.

use std::ops::{Add, Mul, Neg, Sub};

/// A cell of the hex grid, not necessarily on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexPos {
    pub hex0: i8,
    pub hex1: i8,
}

/// A displacement between two hex cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexVec {
    pub hex0: i8,
    pub hex1: i8,
}

impl HexPos {
    pub const fn new(hex0: i8, hex1: i8) -> HexPos {
        HexPos { hex0, hex1 }
    }
}

impl HexVec {
    pub const ZERO: HexVec = HexVec::new(0, 0);

    pub const fn new(hex0: i8, hex1: i8) -> HexVec {
        HexVec { hex0, hex1 }
    }
}

impl Add<HexVec> for HexPos {
    type Output = HexPos;

    fn add(self, v: HexVec) -> HexPos {
        HexPos::new(self.hex0 + v.hex0, self.hex1 + v.hex1)
    }
}

impl Sub for HexPos {
    type Output = HexVec;

    fn sub(self, other: HexPos) -> HexVec {
        HexVec::new(self.hex0 - other.hex0, self.hex1 - other.hex1)
    }
}

impl Add for HexVec {
    type Output = HexVec;

    fn add(self, other: HexVec) -> HexVec {
        HexVec::new(self.hex0 + other.hex0, self.hex1 + other.hex1)
    }
}

impl Sub for HexVec {
    type Output = HexVec;

    fn sub(self, other: HexVec) -> HexVec {
        HexVec::new(self.hex0 - other.hex0, self.hex1 - other.hex1)
    }
}

impl Mul<i8> for HexVec {
    type Output = HexVec;

    fn mul(self, k: i8) -> HexVec {
        HexVec::new(self.hex0 * k, self.hex1 * k)
    }
}

impl Neg for HexVec {
    type Output = HexVec;

    fn neg(self) -> HexVec {
        HexVec::new(-self.hex0, -self.hex1)
    }
}
