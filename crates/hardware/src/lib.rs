//! Tomasulo out-of-order RISC-V simulator library.
//!
//! This crate implements a cycle-level RV64IM simulator built around
//! Tomasulo's algorithm:
//! 1. **Core:** Reorder buffer, reservation stations, register status table,
//!    functional units and the commit/writeback/execute/issue stages.
//! 2. **ISA:** Decoding, mnemonics and execution for RV64I and RV64M plus `ecall`.
//! 3. **Memory:** A flat, bounds-checked little-endian memory.
//! 4. **Simulation:** ELF loading, system calls, configuration, statistics,
//!    history transcript and JSON snapshots.

/// Common types (errors, register file).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// Out-of-order core (pipeline, execution units).
pub mod core;
/// Instruction set (decode, disassembly, operation kinds, ABI).
pub mod isa;
/// Driver, loader, system calls and diagnostic sinks.
pub mod sim;
/// Flat system memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Crate-wide fatal error type.
pub use crate::common::SimError;
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
