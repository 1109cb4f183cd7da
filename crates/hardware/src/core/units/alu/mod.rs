//! Integer ALU.
//!
//! Every RV64I/RV64M computation the execute stage performs goes through
//! [`Alu::execute`]. Word (W) forms are evaluated on 32-bit operands and the
//! result is sign-extended here, once, for all of them.
//!
//! - [`arithmetic`]: add, sub, multiply, divide and remainder
//! - [`logic`]: and, or, xor, slt, sltu
//! - [`shifts`]: sll, srl, sra

/// Add, subtract, multiply, divide.
pub mod arithmetic;

/// Bitwise operations and comparisons.
pub mod logic;

/// Shifts.
pub mod shifts;

use crate::core::pipeline::signals::AluOp;
use crate::isa::decode::is_word_op;
use crate::isa::kind::InstKind;

/// Integer ALU.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Computes `op` on `a` and `b`. With `is32` the W form is used: the
    /// low 32 bits of each operand, result sign-extended to 64 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomasim_core::core::units::alu::Alu;
    /// use tomasim_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8, false), 50);
    /// // 32-bit addition wraps and sign-extends
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1, true), 0);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i64 as u64, 10, false), 1);
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 7, false), 14);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
        let value = if is32 {
            let (a, b) = (a as u32, b as u32);
            arithmetic::word(op, a, b)
                .or_else(|| shifts::word(op, a, b))
                .map(|w| i64::from(w as i32) as u64)
        } else {
            arithmetic::xlen(op, a, b).or_else(|| shifts::xlen(op, a, b))
        };
        value.or_else(|| logic::eval(op, a, b)).unwrap_or_default()
    }
}

/// How an operation feeds the ALU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluForm {
    /// Operation to perform.
    pub op: AluOp,
    /// Second operand is the immediate rather than `rs2`.
    pub uses_imm: bool,
    /// W form.
    pub is32: bool,
}

/// Returns the ALU form of a register/immediate arithmetic operation, or
/// `None` for loads, stores, control flow, upper immediates and `ecall`.
pub const fn alu_form(kind: InstKind) -> Option<AluForm> {
    use InstKind as K;

    let (op, uses_imm) = match kind {
        K::Addi | K::Addiw => (AluOp::Add, true),
        K::Slti => (AluOp::Slt, true),
        K::Sltiu => (AluOp::Sltu, true),
        K::Xori => (AluOp::Xor, true),
        K::Ori => (AluOp::Or, true),
        K::Andi => (AluOp::And, true),
        K::Slli | K::Slliw => (AluOp::Sll, true),
        K::Srli | K::Srliw => (AluOp::Srl, true),
        K::Srai | K::Sraiw => (AluOp::Sra, true),
        K::Add | K::Addw => (AluOp::Add, false),
        K::Sub | K::Subw => (AluOp::Sub, false),
        K::Sll | K::Sllw => (AluOp::Sll, false),
        K::Slt => (AluOp::Slt, false),
        K::Sltu => (AluOp::Sltu, false),
        K::Xor => (AluOp::Xor, false),
        K::Srl | K::Srlw => (AluOp::Srl, false),
        K::Sra | K::Sraw => (AluOp::Sra, false),
        K::Or => (AluOp::Or, false),
        K::And => (AluOp::And, false),
        K::Mul | K::Mulw => (AluOp::Mul, false),
        K::Mulh => (AluOp::Mulh, false),
        K::Mulhsu => (AluOp::Mulhsu, false),
        K::Mulhu => (AluOp::Mulhu, false),
        K::Div | K::Divw => (AluOp::Div, false),
        K::Divu | K::Divuw => (AluOp::Divu, false),
        K::Rem | K::Remw => (AluOp::Rem, false),
        K::Remu | K::Remuw => (AluOp::Remu, false),
        _ => return None,
    };

    Some(AluForm {
        op,
        uses_imm,
        is32: is_word_op(kind),
    })
}
