//! Instruction text for traces and the execution history.
//!
//! Every mnemonic follows one fixed layout: the assembler name, a space, and
//! the operands separated by commas with no spaces, using ABI register names.
//!
//! ```
//! use tomasim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x0050_0093), "addi ra,zero,5");
//! assert_eq!(disassemble(0x0000_0073), "ecall");
//! ```

use crate::common::reg::RegisterFile;
use crate::isa::abi::reg_name;
use crate::isa::decode::{Format, decode};
use crate::isa::kind::InstKind;

/// Mask for the 20-bit upper-immediate field shown by `lui`/`auipc`.
const UPPER_FIELD_MASK: i64 = 0xF_FFFF;

/// Builds the mnemonic for already-extracted fields.
pub fn format_mnemonic(
    kind: InstKind,
    format: Format,
    rd: Option<usize>,
    rs1: Option<usize>,
    rs2: Option<usize>,
    imm: i64,
) -> String {
    let name = kind.name();
    let rd = reg_name(rd.unwrap_or(0));
    let rs1 = reg_name(rs1.unwrap_or(0));
    let rs2 = reg_name(rs2.unwrap_or(0));

    match format {
        Format::R => format!("{name} {rd},{rs1},{rs2}"),
        Format::I | Format::Shift => format!("{name} {rd},{rs1},{imm}"),
        Format::Load => format!("{name} {rd},{imm}({rs1})"),
        Format::Store => format!("{name} {rs2},{imm}({rs1})"),
        Format::Branch => format!("{name} {rs1},{rs2},{imm}"),
        Format::Upper => format!("{name} {rd},{:#x}", (imm >> 12) & UPPER_FIELD_MASK),
        Format::Jump => format!("{name} {rd},{imm}"),
        Format::System => name.to_string(),
    }
}

/// Disassembles a raw word, or returns `"unknown"` for unsupported encodings.
pub fn disassemble(word: u32) -> String {
    decode(word, 0, &RegisterFile::new()).map_or_else(|_| "unknown".to_string(), |d| d.mnemonic)
}
