//! Operation selectors shared by decode and the functional units.
//!
//! [`AluOp`] picks the integer computation a station performs; the ALU
//! dispatches it to the arithmetic, logic or shift family. [`MemWidth`] sizes
//! a load or store.

use serde::Serialize;

/// Integer operation carried out by the ALU or multiply/divide unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    // Arithmetic family.
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// Low half of `a * b`
    Mul,
    /// High half, both signed
    Mulh,
    /// High half, `a` signed and `b` unsigned
    Mulhsu,
    /// High half, both unsigned
    Mulhu,
    /// Signed quotient
    Div,
    /// Unsigned quotient
    Divu,
    /// Signed remainder
    Rem,
    /// Unsigned remainder
    Remu,

    // Logic family.
    /// `a & b`
    And,
    /// `a | b`
    Or,
    /// `a ^ b`
    Xor,
    /// `1` when `a < b` as signed values
    Slt,
    /// `1` when `a < b` as unsigned values
    Sltu,

    // Shift family.
    /// Left shift
    Sll,
    /// Logical right shift
    Srl,
    /// Arithmetic right shift
    Sra,
}

/// Size of a load or store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MemWidth {
    /// 1 byte (`lb`, `lbu`, `sb`)
    Byte,
    /// 2 bytes (`lh`, `lhu`, `sh`)
    Half,
    /// 4 bytes (`lw`, `lwu`, `sw`)
    Word,
    /// 8 bytes (`ld`, `sd`)
    Double,
}

impl MemWidth {
    /// Number of bytes moved.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

    /// Low-bit mask covering [`MemWidth::bytes`] bytes.
    pub const fn mask(self) -> u64 {
        match self {
            Self::Double => u64::MAX,
            width => (1u64 << (width.bytes() * 8)) - 1,
        }
    }
}
