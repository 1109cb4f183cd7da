//! Fatal error definitions.
//!
//! Every error in this simulator is fatal: there is no trap handler and no
//! retry. Errors are raised deep in the engine, propagated with `?` to the
//! driver, and reported once through [`Simulator::report_fatal`].
//!
//! [`Simulator::report_fatal`]: crate::sim::simulator::Simulator::report_fatal

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// All conditions that stop a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The instruction word matches no supported opcode/funct3/funct7 combination.
    #[error(
        "unsupported instruction {word:#010x} at pc {pc:#x} \
         (opcode={opcode:#09b}, funct3={funct3:#05b}, funct7={funct7:#09b})"
    )]
    Decode {
        /// Raw 32-bit instruction word.
        word: u32,
        /// Address the word was fetched from.
        pc: u64,
        /// Opcode field (bits 0-6).
        opcode: u32,
        /// funct3 field (bits 12-14).
        funct3: u32,
        /// funct7 field (bits 25-31).
        funct7: u32,
    },

    /// A fetch, load, store or syscall string read left the flat memory.
    #[error("memory access out of range at address {addr:#x} (pc {pc:#x})")]
    MemoryOutOfRange {
        /// Faulting byte address.
        addr: u64,
        /// PC of the instruction that performed the access.
        pc: u64,
    },

    /// The committed stack pointer dropped below the stack floor.
    #[error("stack overflow: sp {sp:#x} is below the stack floor {floor:#x}")]
    StackOverflow {
        /// Stack pointer value that triggered the check.
        sp: u64,
        /// Lowest legal stack address (`stack_base - stack_size`).
        floor: u64,
    },

    /// `ecall` with an `a7` value that selects no system call.
    #[error("unknown syscall {code} at pc {pc:#x}")]
    UnknownSyscall {
        /// Value of `a7`.
        code: u64,
        /// PC of the `ecall`.
        pc: u64,
    },

    /// A loadable segment extends beyond the 32-bit address space.
    #[error("segment at {vaddr:#x} with size {mem_size:#x} exceeds the 32-bit address space")]
    SegmentOutOfRange {
        /// Segment virtual address.
        vaddr: u64,
        /// Segment size in memory.
        mem_size: u64,
    },

    /// The program image is not a usable RV64 ELF file.
    #[error("invalid ELF image: {0}")]
    Elf(String),

    /// Reading the image or writing a diagnostic file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File involved in the failed operation.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The configuration cannot describe a working machine.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SimError {
    /// Builds an [`SimError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// PC associated with the error, when there is one.
    pub const fn pc(&self) -> Option<u64> {
        match self {
            Self::Decode { pc, .. }
            | Self::MemoryOutOfRange { pc, .. }
            | Self::UnknownSyscall { pc, .. } => Some(*pc),
            _ => None,
        }
    }
}
