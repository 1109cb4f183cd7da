//! Branch Resolution Unit.
//!
//! Evaluates branch conditions and computes control-flow targets. There is
//! no predictor: issue stalls behind every branch and jump, so the outcome
//! computed here simply overwrites the PC.

use crate::isa::kind::InstKind;

/// Outcome of resolving a branch or jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Address of the next instruction, when control flow is redirected.
    pub target: Option<u64>,
    /// Value written to `rd` (the link address for jumps).
    pub link: u64,
}

/// Evaluates a conditional branch on its two register operands.
pub const fn branch_taken(kind: InstKind, a: u64, b: u64) -> bool {
    match kind {
        InstKind::Beq => a == b,
        InstKind::Bne => a != b,
        InstKind::Blt => (a as i64) < (b as i64),
        InstKind::Bge => (a as i64) >= (b as i64),
        InstKind::Bltu => a < b,
        InstKind::Bgeu => a >= b,
        _ => false,
    }
}

/// Resolves a branch or jump at `pc`.
///
/// # Arguments
///
/// * `kind` - A branch, `jal` or `jalr`.
/// * `pc`   - Address of the instruction.
/// * `a`    - `rs1` value (base for `jalr`).
/// * `b`    - `rs2` value (branches only).
/// * `imm`  - Sign-extended offset.
pub const fn resolve(kind: InstKind, pc: u64, a: u64, b: u64, imm: i64) -> Resolution {
    let link = pc.wrapping_add(4);
    match kind {
        InstKind::Jal => Resolution {
            target: Some(pc.wrapping_add_signed(imm)),
            link,
        },
        InstKind::Jalr => Resolution {
            target: Some(a.wrapping_add_signed(imm) & !1),
            link,
        },
        _ if branch_taken(kind, a, b) => Resolution {
            target: Some(pc.wrapping_add_signed(imm)),
            link: 0,
        },
        _ => Resolution {
            target: None,
            link: 0,
        },
    }
}
