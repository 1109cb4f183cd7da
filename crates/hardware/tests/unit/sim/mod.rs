//! # Simulation Driver Tests

/// Whole RV64IM programs run to exit on real memory.
pub mod programs;




/// ELF parsing and segment placement.
pub mod loader;
