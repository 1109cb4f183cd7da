//! Tomasulo pipeline.
//!
//! Each cycle runs four stages in a fixed order:
//! 1. **Commit:** Retire the ready ROB head into architectural state.
//! 2. **Writeback:** Broadcast results computed last cycle and free stations.
//! 3. **Execute:** Start, count down and complete work on functional units.
//! 4. **Issue:** Fetch, decode and rename one instruction.
//!
//! The structures they share are the reorder buffer, the reservation
//! stations, the register status table and the functional units.

/// Commit stage.
pub mod commit;

/// Engine state, host interface and the per-cycle tick.
pub mod engine;

/// Execute stage.
pub mod execute;

/// Issue stage.
pub mod issue;

/// Register status table (latest producer per register).
pub mod register_status;

/// Reorder buffer.
pub mod rob;

/// Control signals shared by decode and the execution units.
pub mod signals;

/// Reservation stations.
pub mod station;

/// Functional unit slots and latencies.
pub mod units;

/// Writeback stage.
pub mod writeback;
