//! Instruction Set Architecture (ISA) Definitions.
//!
//! Encodings, field extraction and the decoder for the RV64IM subset this
//! simulator executes, plus `ecall`.
//!
//! # Extensions
//!
//! * `rv64i`: Base Integer Instruction Set (64-bit).
//! * `rv64m`: Integer Multiplication and Division.

/// Application Binary Interface (ABI) register names and indices.
pub mod abi;

/// Instruction decoder.
pub mod decode;

/// Mnemonic formatting.
pub mod disasm;

/// Instruction field extraction.
pub mod instruction;

/// Operation kinds and their classification.
pub mod kind;

/// Base integer encodings.
pub mod rv64i;

/// Multiply/divide encodings.
pub mod rv64m;
