//! Common types shared by every part of the simulator.
//!
//! This module provides the building blocks used across the crate:
//! 1. **Error Handling:** The crate-wide [`SimError`] covering every fatal condition.
//! 2. **Register Management:** The architectural integer register file.

/// Fatal simulation errors.
pub mod error;

/// Architectural register file.
pub mod reg;

pub use error::SimError;
pub use reg::RegisterFile;
