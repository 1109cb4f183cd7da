//! Add, subtract, multiply and divide.
//!
//! Division never traps. A zero divisor gives an all-ones quotient and
//! returns the dividend as remainder; the signed overflow `MIN / -1` gives
//! `MIN` with remainder 0.

use crate::core::pipeline::signals::AluOp;

/// Upper 64 bits of a 128-bit signed product.
const fn high(product: i128) -> u64 {
    (product >> 64) as u64
}

/// Full-width form. `None` when `op` is not arithmetic.
pub fn xlen(op: AluOp, a: u64, b: u64) -> Option<u64> {
    let (sa, sb) = (a as i64, b as i64);
    let value = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Mulh => high(i128::from(sa) * i128::from(sb)),
        AluOp::Mulhsu => high(i128::from(sa) * i128::from(b)),
        AluOp::Mulhu => ((u128::from(a) * u128::from(b)) >> 64) as u64,
        AluOp::Div if b == 0 => u64::MAX,
        AluOp::Div => sa.wrapping_div(sb) as u64,
        AluOp::Divu => a.checked_div(b).unwrap_or(u64::MAX),
        AluOp::Rem if b == 0 => a,
        AluOp::Rem => sa.wrapping_rem(sb) as u64,
        AluOp::Remu => a.checked_rem(b).unwrap_or(a),
        _ => return None,
    };
    Some(value)
}

/// Word form on the low 32 bits; the caller sign-extends. `None` when `op`
/// has no word form.
pub fn word(op: AluOp, a: u32, b: u32) -> Option<u32> {
    let (sa, sb) = (a as i32, b as i32);
    let value = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Div if b == 0 => u32::MAX,
        AluOp::Div => sa.wrapping_div(sb) as u32,
        AluOp::Divu => a.checked_div(b).unwrap_or(u32::MAX),
        AluOp::Rem if b == 0 => a,
        AluOp::Rem => sa.wrapping_rem(sb) as u32,
        AluOp::Remu => a.checked_rem(b).unwrap_or(a),
        _ => return None,
    };
    Some(value)
}
