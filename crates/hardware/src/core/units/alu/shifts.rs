//! Shifts. The amount is the low 6 bits of `b`, or the low 5 bits for word
//! forms.

use crate::core::pipeline::signals::AluOp;

const SHAMT_MASK: u64 = 0x3F;
const SHAMT_MASK_WORD: u32 = 0x1F;

/// Full-width form. `None` when `op` is not a shift.
pub fn xlen(op: AluOp, a: u64, b: u64) -> Option<u64> {
    let sh = (b & SHAMT_MASK) as u32;
    match op {
        AluOp::Sll => Some(a << sh),
        AluOp::Srl => Some(a >> sh),
        AluOp::Sra => Some(((a as i64) >> sh) as u64),
        _ => None,
    }
}

/// Word form on the low 32 bits; the caller sign-extends.
pub fn word(op: AluOp, a: u32, b: u32) -> Option<u32> {
    let sh = b & SHAMT_MASK_WORD;
    match op {
        AluOp::Sll => Some(a << sh),
        AluOp::Srl => Some(a >> sh),
        AluOp::Sra => Some(((a as i32) >> sh) as u32),
        _ => None,
    }
}
