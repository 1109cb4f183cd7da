//! Execution units.
//!
//! Pure computation used by the execute stage: the integer ALU, branch
//! resolution, and load/store helpers.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch and jump resolution.
pub mod bru;

/// Load/Store Unit helpers and memory ordering.
pub mod lsu;
