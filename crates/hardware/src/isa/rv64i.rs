//! RV64I base integer encodings.
//!
//! Major opcodes (bits 6-0) and the minor function codes that select an
//! operation inside each major opcode.

/// Major opcodes.
pub mod opcodes {
    /// LB, LH, LW, LD, LBU, LHU, LWU.
    pub const OP_LOAD: u32 = 0b000_0011;
    /// ADDI, SLTI, SLTIU, XORI, ORI, ANDI, SLLI, SRLI, SRAI.
    pub const OP_IMM: u32 = 0b001_0011;
    /// AUIPC.
    pub const OP_AUIPC: u32 = 0b001_0111;
    /// ADDIW, SLLIW, SRLIW, SRAIW.
    pub const OP_IMM_32: u32 = 0b001_1011;
    /// SB, SH, SW, SD.
    pub const OP_STORE: u32 = 0b010_0011;
    /// Register-register ALU and M-extension operations.
    pub const OP_REG: u32 = 0b011_0011;
    /// LUI.
    pub const OP_LUI: u32 = 0b011_0111;
    /// 32-bit register-register ALU and M-extension word operations.
    pub const OP_REG_32: u32 = 0b011_1011;
    /// BEQ, BNE, BLT, BGE, BLTU, BGEU.
    pub const OP_BRANCH: u32 = 0b110_0011;
    /// JALR.
    pub const OP_JALR: u32 = 0b110_0111;
    /// JAL.
    pub const OP_JAL: u32 = 0b110_1111;
    /// ECALL (the only SYSTEM encoding accepted).
    pub const OP_SYSTEM: u32 = 0b111_0011;

    /// The complete ECALL word.
    pub const ECALL: u32 = 0x0000_0073;
}

/// funct3 values.
pub mod funct3 {
    /// Load byte (sign-extended).
    pub const LB: u32 = 0b000;
    /// Load halfword (sign-extended).
    pub const LH: u32 = 0b001;
    /// Load word (sign-extended).
    pub const LW: u32 = 0b010;
    /// Load doubleword.
    pub const LD: u32 = 0b011;
    /// Load byte (zero-extended).
    pub const LBU: u32 = 0b100;
    /// Load halfword (zero-extended).
    pub const LHU: u32 = 0b101;
    /// Load word (zero-extended).
    pub const LWU: u32 = 0b110;

    /// Store byte.
    pub const SB: u32 = 0b000;
    /// Store halfword.
    pub const SH: u32 = 0b001;
    /// Store word.
    pub const SW: u32 = 0b010;
    /// Store doubleword.
    pub const SD: u32 = 0b011;

    /// Branch if equal.
    pub const BEQ: u32 = 0b000;
    /// Branch if not equal.
    pub const BNE: u32 = 0b001;
    /// Branch if less than (signed).
    pub const BLT: u32 = 0b100;
    /// Branch if greater or equal (signed).
    pub const BGE: u32 = 0b101;
    /// Branch if less than (unsigned).
    pub const BLTU: u32 = 0b110;
    /// Branch if greater or equal (unsigned).
    pub const BGEU: u32 = 0b111;

    /// ADD/SUB/ADDI/ADDW/SUBW/ADDIW.
    pub const ADD_SUB: u32 = 0b000;
    /// Shift left logical.
    pub const SLL: u32 = 0b001;
    /// Set less than (signed).
    pub const SLT: u32 = 0b010;
    /// Set less than (unsigned).
    pub const SLTU: u32 = 0b011;
    /// Exclusive or.
    pub const XOR: u32 = 0b100;
    /// Shift right, logical or arithmetic depending on funct7.
    pub const SRL_SRA: u32 = 0b101;
    /// Or.
    pub const OR: u32 = 0b110;
    /// And.
    pub const AND: u32 = 0b111;

    /// JALR has a single legal funct3.
    pub const JALR: u32 = 0b000;
}

/// funct7 values (and the funct6 used by 64-bit immediate shifts).
pub mod funct7 {
    /// Plain operation.
    pub const DEFAULT: u32 = 0b000_0000;
    /// SUB/SUBW.
    pub const SUB: u32 = 0b010_0000;
    /// SRA/SRAW/SRAIW.
    pub const SRA: u32 = 0b010_0000;

    /// funct6 (bits 31-26) of SLLI/SRLI.
    pub const SHIFT_LOGICAL_F6: u32 = 0b00_0000;
    /// funct6 (bits 31-26) of SRAI.
    pub const SHIFT_ARITH_F6: u32 = 0b01_0000;
}
