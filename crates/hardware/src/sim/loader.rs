//! ELF Loader.
//!
//! This module loads statically linked RV64 ELF executables. It performs:
//! 1. **Binary loading:** Reads the image from disk into a byte buffer.
//! 2. **Parsing:** Validates the image as little-endian RISC-V 64 and collects
//!    its loadable segments and entry point.
//! 3. **Placement:** Copies each segment's file bytes to its virtual address
//!    and zero-fills the remainder up to its memory size.

use std::fs;
use std::path::Path;

use object::{Architecture, Object, ObjectSegment};
use tracing::debug;

use crate::common::error::SimError;
use crate::soc::memory::Memory;

/// Highest address a segment may reach (exclusive end).
pub const MAX_SEGMENT_END: u64 = 0xFFFF_FFFF;

/// A loadable (`PT_LOAD`) segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Virtual address of the first byte.
    pub vaddr: u64,
    /// Bytes present in the file.
    pub file_size: u64,
    /// Bytes occupied in memory; the tail past `file_size` is zero.
    pub mem_size: u64,
    /// File contents of the segment.
    pub data: Vec<u8>,
}

/// A parsed executable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElfImage {
    /// Entry point address.
    pub entry: u64,
    /// Loadable segments in file order.
    pub segments: Vec<Segment>,
}

/// Reads a binary file from disk.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, SimError> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| SimError::io(path, e))
}

/// Parses an RV64 ELF image.
///
/// # Errors
///
/// [`SimError::Elf`] if the bytes are not a little-endian RISC-V 64 ELF file.
pub fn parse_elf(bytes: &[u8]) -> Result<ElfImage, SimError> {
    let file = object::File::parse(bytes).map_err(|e| SimError::Elf(e.to_string()))?;
    if file.architecture() != Architecture::Riscv64 || !file.is_little_endian() {
        return Err(SimError::Elf(format!(
            "expected little-endian RISC-V 64 executable, found {:?}",
            file.architecture()
        )));
    }

    let segments = file
        .segments()
        .map(|seg| {
            let data = seg.data().map_err(|e| SimError::Elf(e.to_string()))?;
            Ok(Segment {
                vaddr: seg.address(),
                file_size: data.len() as u64,
                mem_size: seg.size(),
                data: data.to_vec(),
            })
        })
        .collect::<Result<Vec<_>, SimError>>()?;

    Ok(ElfImage {
        entry: file.entry(),
        segments,
    })
}

/// Copies `segments` into memory, zero-filling each up to its memory size.
///
/// # Errors
///
/// [`SimError::SegmentOutOfRange`] for a segment ending above
/// [`MAX_SEGMENT_END`], or [`SimError::MemoryOutOfRange`] for one that does
/// not fit in `memory`.
pub fn load_segments(memory: &mut Memory, segments: &[Segment]) -> Result<(), SimError> {
    for seg in segments {
        let end = seg.vaddr.checked_add(seg.mem_size);
        if end.is_none_or(|end| end > MAX_SEGMENT_END) {
            return Err(SimError::SegmentOutOfRange {
                vaddr: seg.vaddr,
                mem_size: seg.mem_size,
            });
        }
        let out_of_range = |e: crate::soc::memory::OutOfBounds| SimError::MemoryOutOfRange {
            addr: e.addr,
            pc: 0,
        };
        memory
            .write_bytes(seg.vaddr, &seg.data)
            .map_err(out_of_range)?;
        let file_size = seg.data.len() as u64;
        if seg.mem_size > file_size {
            memory
                .fill(seg.vaddr + file_size, seg.mem_size - file_size, 0)
                .map_err(out_of_range)?;
        }
        debug!(
            vaddr = format_args!("{:#x}", seg.vaddr),
            file_size, mem_size = seg.mem_size, "loaded segment"
        );
    }
    Ok(())
}
