//! System memory.
//!
//! The simulated machine has no devices: a single flat memory backs every
//! fetch, load and store.

/// Flat, bounds-checked memory.
pub mod memory;

pub use memory::Memory;
