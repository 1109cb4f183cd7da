//! # Loader Tests
//!
//! ELF images are produced by a minimal in-test writer so no toolchain is
//! needed.

use std::fs;

use pretty_assertions::assert_eq;
use tomasim_core::SimError;
use tomasim_core::sim::loader::{self, MAX_SEGMENT_END, Segment};
use tomasim_core::soc::Memory;

use crate::common::builder::elf::ElfBuilder;
use crate::common::builder::instruction::InstructionBuilder as I;
use crate::common::harness::{TestContext, exit_sequence};

const EM_X86_64: u16 = 62;

#[test]
fn parses_entry_and_segments() {
    let image = ElfBuilder::new(0x1000)
        .code(0x1000, &[0x0000_0013, 0x0000_0073])
        .segment(0x2000, b"data", 16)
        .build();

    let parsed = loader::parse_elf(&image).unwrap();
    assert_eq!(parsed.entry, 0x1000);
    assert_eq!(parsed.segments.len(), 2);
    assert_eq!(
        parsed.segments[1],
        Segment {
            vaddr: 0x2000,
            file_size: 4,
            mem_size: 16,
            data: b"data".to_vec(),
        }
    );
}

#[test]
fn rejects_other_architectures() {
    let image = ElfBuilder::new(0x1000)
        .machine(EM_X86_64)
        .code(0x1000, &[0x0000_0013])
        .build();

    assert!(matches!(loader::parse_elf(&image), Err(SimError::Elf(_))));
}

#[test]
fn rejects_non_elf_bytes() {
    assert!(matches!(
        loader::parse_elf(b"not an executable"),
        Err(SimError::Elf(_))
    ));
}

#[test]
fn zero_fills_past_file_size() {
    let mut memory = Memory::new(0x4000);
    memory.fill(0x2000, 0x20, 0xFF).unwrap();
    let segments = [Segment {
        vaddr: 0x2000,
        file_size: 2,
        mem_size: 0x10,
        data: vec![1, 2],
    }];

    loader::load_segments(&mut memory, &segments).unwrap();
    assert_eq!(memory.read_u16(0x2000).unwrap(), 0x0201);
    assert_eq!(memory.read_u64(0x2008).unwrap(), 0);
    assert_eq!(memory.read_u8(0x2010).unwrap(), 0xFF);
}

#[test]
fn segment_past_32_bit_space_is_rejected() {
    let mut memory = Memory::new(0x1000);
    let segments = [Segment {
        vaddr: MAX_SEGMENT_END - 4,
        file_size: 0,
        mem_size: 8,
        data: Vec::new(),
    }];

    let err = loader::load_segments(&mut memory, &segments).unwrap_err();
    assert!(matches!(err, SimError::SegmentOutOfRange { mem_size: 8, .. }));
}

#[test]
fn segment_past_memory_is_rejected() {
    let mut memory = Memory::new(0x1000);
    let segments = [Segment {
        vaddr: 0xFF0,
        file_size: 0,
        mem_size: 0x20,
        data: Vec::new(),
    }];

    let err = loader::load_segments(&mut memory, &segments).unwrap_err();
    assert!(matches!(err, SimError::MemoryOutOfRange { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = loader::load_binary(dir.path().join("missing.elf")).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}

#[test]
fn elf_program_runs_from_its_entry() {
    let mut words = vec![I::new().addi(10, 0, 21).build(), I::new().add(10, 10, 10).build()];
    words.extend(exit_sequence());
    let image = ElfBuilder::new(0x3000).code(0x3000, &words).build();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.elf");
    fs::write(&path, image).unwrap();

    let mut ctx = TestContext::new();
    let entry = ctx.sim.load_elf(&path).unwrap();
    assert_eq!(entry, 0x3000);
    assert_eq!(ctx.sim.engine.pc, 0x3000);
    assert_eq!(ctx.run_to_exit(500), 42);
}
