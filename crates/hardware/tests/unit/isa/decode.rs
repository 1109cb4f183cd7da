//! # Decoder Tests
//!
//! One representative encoding per opcode class, decoded and rendered back to
//! its mnemonic, plus field extraction and rejection of unsupported words.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tomasim_core::SimError;
use tomasim_core::common::RegisterFile;
use tomasim_core::isa::decode::{Format, decode};
use tomasim_core::isa::disasm::disassemble;
use tomasim_core::isa::kind::InstKind;

use crate::common::builder::instruction::InstructionBuilder as I;

#[rstest]
#[case::register_register(I::new().add(10, 11, 12).build(), "add a0,a1,a2")]
#[case::register_immediate(I::new().addi(1, 0, 5).build(), "addi ra,zero,5")]
#[case::load(I::new().lw(10, 2, -4).build(), "lw a0,-4(sp)")]
#[case::store(I::new().sw(1, 11, 0).build(), "sw a1,0(ra)")]
#[case::branch(I::new().beq(0, 0, 8).build(), "beq zero,zero,8")]
#[case::jump_and_link(I::new().jal(1, 16).build(), "jal ra,16")]
#[case::jump_and_link_register(I::new().jalr(0, 1, 0).build(), "jalr zero,ra,0")]
#[case::load_upper(I::new().lui(10, 0x12345).build(), "lui a0,0x12345")]
#[case::add_upper_pc(I::new().auipc(3, 0x2).build(), "auipc gp,0x2")]
#[case::word_variant(I::new().addw(10, 10, 11).build(), "addw a0,a0,a1")]
#[case::ecall(I::new().ecall().build(), "ecall")]
fn mnemonic_per_opcode_class(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(disassemble(word), expected);
}

#[rstest]
#[case(I::new().mul(5, 6, 7).build(), "mul t0,t1,t2")]
#[case(I::new().divu(5, 6, 7).build(), "divu t0,t1,t2")]
#[case(I::new().mulw(5, 6, 7).build(), "mulw t0,t1,t2")]
#[case(I::new().srai(5, 6, 63).build(), "srai t0,t1,63")]
#[case(I::new().srliw(5, 6, 31).build(), "srliw t0,t1,31")]
#[case(I::new().sd(2, 1, -8).build(), "sd ra,-8(sp)")]
#[case(I::new().bne(10, 0, -12).build(), "bne a0,zero,-12")]
fn mnemonic_supplementary_forms(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(disassemble(word), expected);
}

#[test]
fn operands_are_read_from_committed_registers() {
    let mut regs = RegisterFile::new();
    regs.write(11, 40);
    regs.write(12, 2);

    let inst = decode(I::new().add(10, 11, 12).build(), 0x100, &regs).unwrap();
    assert_eq!(inst.kind, InstKind::Add);
    assert_eq!(inst.format, Format::R);
    assert_eq!((inst.rs1, inst.rs2, inst.rd), (Some(11), Some(12), Some(10)));
    assert_eq!((inst.op1, inst.op2), (40, 2));
    assert_eq!(inst.pc, 0x100);
}

#[test]
fn immediates_are_sign_extended() {
    let regs = RegisterFile::new();
    assert_eq!(decode(I::new().addi(1, 0, -1).build(), 0, &regs).unwrap().imm, -1);
    assert_eq!(decode(I::new().sw(1, 2, -2048).build(), 0, &regs).unwrap().imm, -2048);
    assert_eq!(decode(I::new().beq(0, 0, -4096).build(), 0, &regs).unwrap().imm, -4096);
    assert_eq!(decode(I::new().jal(0, -8).build(), 0, &regs).unwrap().imm, -8);
    assert_eq!(
        decode(I::new().lui(1, 0x80000).build(), 0, &regs).unwrap().imm,
        -0x8000_0000
    );
}

#[test]
fn ecall_reads_a0_and_a7_and_writes_a0() {
    let mut regs = RegisterFile::new();
    regs.write(10, 7);
    regs.write(17, 93);

    let inst = decode(I::new().ecall().build(), 0, &regs).unwrap();
    assert_eq!(inst.kind, InstKind::Ecall);
    assert_eq!((inst.rs1, inst.rs2, inst.rd), (Some(10), Some(17), Some(10)));
    assert_eq!((inst.op1, inst.op2), (7, 93));
}

#[test]
fn stores_and_branches_have_no_destination() {
    let regs = RegisterFile::new();
    assert_eq!(decode(I::new().sd(2, 1, 0).build(), 0, &regs).unwrap().rd, None);
    assert_eq!(decode(I::new().blt(1, 2, 8).build(), 0, &regs).unwrap().rd, None);
}

#[rstest]
#[case::all_zero(0x0000_0000)]
#[case::all_ones(0xFFFF_FFFF)]
#[case::ebreak(0x0010_0073)]
#[case::fence(0x0000_000F)]
#[case::bad_op_funct7(0x4000_6033)]
fn unsupported_words_are_rejected(#[case] word: u32) {
    let err = decode(word, 0x2000, &RegisterFile::new()).unwrap_err();
    match err {
        SimError::Decode { word: w, pc, opcode, .. } => {
            assert_eq!(w, word);
            assert_eq!(pc, 0x2000);
            assert_eq!(opcode, word & 0x7F);
        }
        other => panic!("expected decode error, got {other:?}"),
    }
    assert_eq!(disassemble(word), "unknown");
}
