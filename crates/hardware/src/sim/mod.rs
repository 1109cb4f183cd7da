//! Simulation driver and its collaborators.
//!
//! Provides program loading, system calls, the diagnostic sinks and the
//! [`Simulator`] that ties them to the engine.

/// Execution history transcript.
pub mod history;

/// ELF loading.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

/// Per-cycle JSON snapshots.
pub mod snapshot;

/// System call dispatch and console streams.
pub mod syscall;

pub use simulator::{RunOutcome, Simulator};
