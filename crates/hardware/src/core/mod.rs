//! Core processor implementation.
//!
//! This module contains the out-of-order engine and the execution units it
//! drives.

/// Tomasulo pipeline (ROB, reservation stations, stages, engine).
pub mod pipeline;

/// Execution units (ALU, branch resolution, load/store).
pub mod units;

pub use self::pipeline::engine::{Host, TickOutcome, TomasuloEngine};
