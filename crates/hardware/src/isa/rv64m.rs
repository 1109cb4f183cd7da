//! RV64M multiply/divide encodings.
//!
//! The M extension shares `OP_REG`/`OP_REG_32` with the base ISA and is
//! selected by `funct7 == M_EXTENSION`.

/// funct7 selector for multiply/divide.
pub const M_EXTENSION: u32 = 0b000_0001;

/// funct3 values.
pub mod funct3 {
    /// Low 64 bits of the product (MUL, MULW).
    pub const MUL: u32 = 0b000;
    /// High 64 bits, signed x signed.
    pub const MULH: u32 = 0b001;
    /// High 64 bits, signed x unsigned.
    pub const MULHSU: u32 = 0b010;
    /// High 64 bits, unsigned x unsigned.
    pub const MULHU: u32 = 0b011;
    /// Signed division (DIV, DIVW).
    pub const DIV: u32 = 0b100;
    /// Unsigned division (DIVU, DIVUW).
    pub const DIVU: u32 = 0b101;
    /// Signed remainder (REM, REMW).
    pub const REM: u32 = 0b110;
    /// Unsigned remainder (REMU, REMUW).
    pub const REMU: u32 = 0b111;
}
