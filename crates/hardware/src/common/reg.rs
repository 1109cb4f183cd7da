//! Architectural Register File.
//!
//! This module provides the `RegisterFile` struct holding the 32 committed
//! integer registers. It provides:
//! 1. **Storage:** 32 general-purpose 64-bit registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** `x0` is hardwired to zero; writes to it are dropped.
//! 3. **Observability:** The CPU state block used by verbose output and the history transcript.

use std::fmt::Write;

use serde::Serialize;

use crate::isa::abi::REG_NAMES;

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// Committed architectural integer registers.
///
/// Only the commit stage writes this file; in-flight values live in the
/// reorder buffer until they retire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegisterFile {
    regs: [u64; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register zeroed.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register. `x0` always reads as zero.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    #[inline]
    pub const fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a register. Writes to `x0` are ignored.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 64-bit value to write.
    #[inline]
    pub const fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of all 32 registers.
    pub const fn snapshot(&self) -> [u64; NUM_REGS] {
        self.regs
    }

    /// Formats the CPU state block: the PC followed by every register as
    /// `name: 0x%08x(decimal)`, four per line.
    pub fn format_state(&self, pc: u64) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str("------------ CPU STATE ------------\n");
        let _ = writeln!(out, "PC: {pc:#x}");
        for (i, name) in REG_NAMES.iter().enumerate() {
            let val = self.read(i);
            let _ = write!(out, "{name}: 0x{val:08x}({}) ", val as i64);
            if i % 4 == 3 {
                out.push('\n');
            }
        }
        out.push_str("-----------------------------------\n");
        out
    }
}
