//! Bitwise operations and set-less-than. None of these has a word form.

use crate::core::pipeline::signals::AluOp;

/// Evaluates `op`. `None` when `op` is not a logic or compare operation.
pub fn eval(op: AluOp, a: u64, b: u64) -> Option<u64> {
    let value = match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => u64::from((a as i64) < (b as i64)),
        AluOp::Sltu => u64::from(a < b),
        _ => return None,
    };
    Some(value)
}
