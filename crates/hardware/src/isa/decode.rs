//! RISC-V Instruction Decoder.
//!
//! Turns a 32-bit instruction word into a [`DecodedInst`]. It performs:
//! 1. **Classification:** opcode/funct3/funct7 to [`InstKind`], rejecting every
//!    combination outside RV64IM + `ecall` with [`SimError::Decode`].
//! 2. **Field extraction:** source/destination registers and the sign-extended
//!    I/S/B/U/J immediate.
//! 3. **Operand capture:** the committed values of the source registers.
//! 4. **Mnemonic:** the diagnostic text used by traces and the history dump.
//!
//! Decoding is a pure function of the word, its address and the register
//! snapshot; the issue stage replaces the captured operands with renamed
//! ones where a producer is still in flight.

use serde::Serialize;

use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::core::pipeline::signals::MemWidth;
use crate::isa::abi::{REG_A0, REG_A7};
use crate::isa::disasm;
use crate::isa::instruction::InstructionBits;
use crate::isa::kind::InstKind;
use crate::isa::rv64i::{funct3, funct7, opcodes};
use crate::isa::rv64m::{self, funct3 as m_funct3};

/// I-type immediate position (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

/// U-type immediate field (bits 12-31), already in its final position.
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Shift amount mask for 64-bit immediate shifts.
const SHAMT_MASK_64: u32 = 0x3F;

/// Shift amount mask for 32-bit (W) immediate shifts.
const SHAMT_MASK_32: u32 = 0x1F;

/// Encoding format, which fixes how operands and the immediate are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Format {
    /// `rd, rs1, rs2`.
    R,
    /// `rd, rs1, imm` (ALU immediates and JALR).
    I,
    /// `rd, rs1, shamt`.
    Shift,
    /// `rd, imm(rs1)`.
    Load,
    /// `rs2, imm(rs1)`.
    Store,
    /// `rs1, rs2, offset`.
    Branch,
    /// `rd, upper-immediate`.
    Upper,
    /// `rd, offset`.
    Jump,
    /// No explicit operands; `ecall` reads a0/a7 and writes a0.
    System,
}

/// A fully decoded instruction.
///
/// Immutable once built; execution results are kept in the reorder buffer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecodedInst {
    /// Address the word was fetched from.
    pub pc: u64,
    /// Raw encoding.
    pub word: u32,
    /// Operation.
    pub kind: InstKind,
    /// Encoding format.
    pub format: Format,
    /// First source register, if read.
    pub rs1: Option<usize>,
    /// Second source register, if read.
    pub rs2: Option<usize>,
    /// Destination register, if written.
    pub rd: Option<usize>,
    /// Committed value of `rs1` at decode time (0 when unused).
    pub op1: u64,
    /// Committed value of `rs2` at decode time (0 when unused).
    pub op2: u64,
    /// Sign-extended immediate or branch/jump offset.
    pub imm: i64,
    /// Access width for loads and stores.
    pub mem_width: Option<MemWidth>,
    /// Diagnostic text, e.g. `addi ra,zero,5`.
    pub mnemonic: String,
}

/// Decodes `word` fetched from `pc`, capturing operands from `regs`.
///
/// # Errors
///
/// [`SimError::Decode`] for any encoding outside the supported table. There
/// is no fallback operation.
pub fn decode(word: u32, pc: u64, regs: &RegisterFile) -> Result<DecodedInst, SimError> {
    let (kind, format) = classify(word).ok_or(SimError::Decode {
        word,
        pc,
        opcode: word.opcode(),
        funct3: word.funct3(),
        funct7: word.funct7(),
    })?;

    let (rs1, rs2, rd, imm) = match format {
        Format::R => (Some(word.rs1()), Some(word.rs2()), Some(word.rd()), 0),
        Format::I | Format::Load => (Some(word.rs1()), None, Some(word.rd()), imm_i(word)),
        Format::Shift => {
            let mask = if is_word_op(kind) {
                SHAMT_MASK_32
            } else {
                SHAMT_MASK_64
            };
            let shamt = (word >> I_IMM_SHIFT) & mask;
            (Some(word.rs1()), None, Some(word.rd()), i64::from(shamt))
        }
        Format::Store => (Some(word.rs1()), Some(word.rs2()), None, imm_s(word)),
        Format::Branch => (Some(word.rs1()), Some(word.rs2()), None, imm_b(word)),
        Format::Upper => (None, None, Some(word.rd()), imm_u(word)),
        Format::Jump => (None, None, Some(word.rd()), imm_j(word)),
        Format::System => (Some(REG_A0), Some(REG_A7), Some(REG_A0), 0),
    };

    let mnemonic = disasm::format_mnemonic(kind, format, rd, rs1, rs2, imm);

    Ok(DecodedInst {
        pc,
        word,
        kind,
        format,
        rs1,
        rs2,
        rd,
        op1: rs1.map_or(0, |r| regs.read(r)),
        op2: rs2.map_or(0, |r| regs.read(r)),
        imm,
        mem_width: kind.mem_width(),
        mnemonic,
    })
}

/// Maps an encoding to its operation and format, or `None` when unsupported.
fn classify(word: u32) -> Option<(InstKind, Format)> {
    use InstKind as K;

    let f3 = word.funct3();
    let f7 = word.funct7();

    let decoded = match word.opcode() {
        opcodes::OP_LUI => (K::Lui, Format::Upper),
        opcodes::OP_AUIPC => (K::Auipc, Format::Upper),
        opcodes::OP_JAL => (K::Jal, Format::Jump),
        opcodes::OP_JALR if f3 == funct3::JALR => (K::Jalr, Format::I),
        opcodes::OP_BRANCH => {
            let kind = match f3 {
                funct3::BEQ => K::Beq,
                funct3::BNE => K::Bne,
                funct3::BLT => K::Blt,
                funct3::BGE => K::Bge,
                funct3::BLTU => K::Bltu,
                funct3::BGEU => K::Bgeu,
                _ => return None,
            };
            (kind, Format::Branch)
        }
        opcodes::OP_LOAD => {
            let kind = match f3 {
                funct3::LB => K::Lb,
                funct3::LH => K::Lh,
                funct3::LW => K::Lw,
                funct3::LD => K::Ld,
                funct3::LBU => K::Lbu,
                funct3::LHU => K::Lhu,
                funct3::LWU => K::Lwu,
                _ => return None,
            };
            (kind, Format::Load)
        }
        opcodes::OP_STORE => {
            let kind = match f3 {
                funct3::SB => K::Sb,
                funct3::SH => K::Sh,
                funct3::SW => K::Sw,
                funct3::SD => K::Sd,
                _ => return None,
            };
            (kind, Format::Store)
        }
        opcodes::OP_IMM => match f3 {
            funct3::ADD_SUB => (K::Addi, Format::I),
            funct3::SLT => (K::Slti, Format::I),
            funct3::SLTU => (K::Sltiu, Format::I),
            funct3::XOR => (K::Xori, Format::I),
            funct3::OR => (K::Ori, Format::I),
            funct3::AND => (K::Andi, Format::I),
            funct3::SLL if word.funct6() == funct7::SHIFT_LOGICAL_F6 => (K::Slli, Format::Shift),
            funct3::SRL_SRA => match word.funct6() {
                funct7::SHIFT_LOGICAL_F6 => (K::Srli, Format::Shift),
                funct7::SHIFT_ARITH_F6 => (K::Srai, Format::Shift),
                _ => return None,
            },
            _ => return None,
        },
        opcodes::OP_IMM_32 => match (f3, f7) {
            (funct3::ADD_SUB, _) => (K::Addiw, Format::I),
            (funct3::SLL, funct7::DEFAULT) => (K::Slliw, Format::Shift),
            (funct3::SRL_SRA, funct7::DEFAULT) => (K::Srliw, Format::Shift),
            (funct3::SRL_SRA, funct7::SRA) => (K::Sraiw, Format::Shift),
            _ => return None,
        },
        opcodes::OP_REG => {
            let kind = match (f7, f3) {
                (funct7::DEFAULT, funct3::ADD_SUB) => K::Add,
                (funct7::SUB, funct3::ADD_SUB) => K::Sub,
                (funct7::DEFAULT, funct3::SLL) => K::Sll,
                (funct7::DEFAULT, funct3::SLT) => K::Slt,
                (funct7::DEFAULT, funct3::SLTU) => K::Sltu,
                (funct7::DEFAULT, funct3::XOR) => K::Xor,
                (funct7::DEFAULT, funct3::SRL_SRA) => K::Srl,
                (funct7::SRA, funct3::SRL_SRA) => K::Sra,
                (funct7::DEFAULT, funct3::OR) => K::Or,
                (funct7::DEFAULT, funct3::AND) => K::And,
                (rv64m::M_EXTENSION, m_funct3::MUL) => K::Mul,
                (rv64m::M_EXTENSION, m_funct3::MULH) => K::Mulh,
                (rv64m::M_EXTENSION, m_funct3::MULHSU) => K::Mulhsu,
                (rv64m::M_EXTENSION, m_funct3::MULHU) => K::Mulhu,
                (rv64m::M_EXTENSION, m_funct3::DIV) => K::Div,
                (rv64m::M_EXTENSION, m_funct3::DIVU) => K::Divu,
                (rv64m::M_EXTENSION, m_funct3::REM) => K::Rem,
                (rv64m::M_EXTENSION, m_funct3::REMU) => K::Remu,
                _ => return None,
            };
            (kind, Format::R)
        }
        opcodes::OP_REG_32 => {
            let kind = match (f7, f3) {
                (funct7::DEFAULT, funct3::ADD_SUB) => K::Addw,
                (funct7::SUB, funct3::ADD_SUB) => K::Subw,
                (funct7::DEFAULT, funct3::SLL) => K::Sllw,
                (funct7::DEFAULT, funct3::SRL_SRA) => K::Srlw,
                (funct7::SRA, funct3::SRL_SRA) => K::Sraw,
                (rv64m::M_EXTENSION, m_funct3::MUL) => K::Mulw,
                (rv64m::M_EXTENSION, m_funct3::DIV) => K::Divw,
                (rv64m::M_EXTENSION, m_funct3::DIVU) => K::Divuw,
                (rv64m::M_EXTENSION, m_funct3::REM) => K::Remw,
                (rv64m::M_EXTENSION, m_funct3::REMU) => K::Remuw,
                _ => return None,
            };
            (kind, Format::R)
        }
        opcodes::OP_SYSTEM if word == opcodes::ECALL => (K::Ecall, Format::System),
        _ => return None,
    };

    Some(decoded)
}

/// Operations that work on the low 32 bits and sign-extend the result.
pub const fn is_word_op(kind: InstKind) -> bool {
    matches!(
        kind,
        InstKind::Addiw
            | InstKind::Slliw
            | InstKind::Srliw
            | InstKind::Sraiw
            | InstKind::Addw
            | InstKind::Subw
            | InstKind::Sllw
            | InstKind::Srlw
            | InstKind::Sraw
            | InstKind::Mulw
            | InstKind::Divw
            | InstKind::Divuw
            | InstKind::Remw
            | InstKind::Remuw
    )
}

/// I-type immediate: `inst[31:20]`, sign-extended.
#[inline]
fn imm_i(word: u32) -> i64 {
    i64::from((word as i32) >> I_IMM_SHIFT)
}

/// S-type immediate: `inst[31:25] | inst[11:7]`, sign-extended.
#[inline]
fn imm_s(word: u32) -> i64 {
    let hi = (word >> 25) & 0x7F;
    let lo = (word >> 7) & 0x1F;
    sign_extend(u64::from((hi << 5) | lo), 12)
}

/// B-type immediate: `inst[31] | inst[7] | inst[30:25] | inst[11:8] | 0`.
#[inline]
fn imm_b(word: u32) -> i64 {
    let bit12 = (word >> 31) & 1;
    let bit11 = (word >> 7) & 1;
    let bits10_5 = (word >> 25) & 0x3F;
    let bits4_1 = (word >> 8) & 0xF;
    let raw = (bit12 << 12) | (bit11 << 11) | (bits10_5 << 5) | (bits4_1 << 1);
    sign_extend(u64::from(raw), 13)
}

/// U-type immediate: `inst[31:12] << 12`, sign-extended to 64 bits.
#[inline]
fn imm_u(word: u32) -> i64 {
    i64::from((word & U_IMM_MASK) as i32)
}

/// J-type immediate: `inst[31] | inst[19:12] | inst[20] | inst[30:21] | 0`.
#[inline]
fn imm_j(word: u32) -> i64 {
    let bit20 = (word >> 31) & 1;
    let bits19_12 = (word >> 12) & 0xFF;
    let bit11 = (word >> 20) & 1;
    let bits10_1 = (word >> 21) & 0x3FF;
    let raw = (bit20 << 20) | (bits19_12 << 12) | (bit11 << 11) | (bits10_1 << 1);
    sign_extend(u64::from(raw), 21)
}

/// Sign-extends the low `bits` bits of `val`.
#[inline]
pub const fn sign_extend(val: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((val << shift) as i64) >> shift
}
