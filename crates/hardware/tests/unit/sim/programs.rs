//! # Program Tests
//!
//! Small hand-assembled programs run through the full simulator until they
//! exit, checking committed architectural state.

use pretty_assertions::assert_eq;
use tomasim_core::config::Config;
use tomasim_core::sim::syscall::EXIT_MESSAGE;

use crate::common::builder::instruction::InstructionBuilder as I;
use crate::common::harness::{PROGRAM_BASE, TEST_MEMORY, TestContext};

const MAX_CYCLES: u64 = 2_000;

#[test]
fn dependent_add_chain() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().addi(1, 0, 5).build(),
            I::new().addi(3, 0, 7).build(),
            I::new().add(3, 1, 3).build(),
        ],
    );

    assert_eq!(ctx.run_to_exit(MAX_CYCLES), 0);
    assert_eq!(ctx.get_reg(3), 12);
}

#[test]
fn load_observes_committed_store() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().addi(1, 0, 0x400).build(),
            I::new().addi(5, 0, 99).build(),
            I::new().sw(1, 5, 0).build(),
            I::new().lw(4, 1, 0).build(),
        ],
    );

    let _ = ctx.run_to_exit(MAX_CYCLES);
    assert_eq!(ctx.get_reg(4), 99);
    assert_eq!(ctx.sim.memory.read_u32(0x400).unwrap(), 99);
    assert!(ctx.sim.stats().stalls_mem > 0);
}

#[test]
fn byte_loads_extend_by_kind() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().addi(1, 0, 0x400).build(),
            I::new().addi(5, 0, -128).build(),
            I::new().sb(1, 5, 3).build(),
            I::new().lb(6, 1, 3).build(),
            I::new().lbu(7, 1, 3).build(),
            I::new().sd(1, 5, 8).build(),
            I::new().ld(8, 1, 8).build(),
        ],
    );

    let _ = ctx.run_to_exit(MAX_CYCLES);
    assert_eq!(ctx.get_reg(6), -128i64 as u64);
    assert_eq!(ctx.get_reg(7), 0x80);
    assert_eq!(ctx.get_reg(8), -128i64 as u64);
}

#[test]
fn taken_branch_skips_next_instruction() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().beq(0, 0, 8).build(),
            I::new().addi(5, 0, 1).build(),
            I::new().addi(6, 0, 2).build(),
        ],
    );

    let _ = ctx.run_to_exit(MAX_CYCLES);
    assert_eq!(ctx.get_reg(5), 0);
    assert_eq!(ctx.get_reg(6), 2);
    assert_eq!(ctx.sim.stats().instructions_retired, 4);
}

#[test]
fn zero_register_ignores_writes() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().addi(0, 0, 5).build(),
            I::new().add(5, 0, 0).build(),
        ],
    );

    let _ = ctx.run_to_exit(MAX_CYCLES);
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.get_reg(5), 0);
}

#[test]
fn counted_loop_sums_to_exit_status() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().addi(5, 0, 10).build(),
            I::new().addi(6, 0, 0).build(),
            I::new().add(6, 6, 5).build(),
            I::new().addi(5, 5, -1).build(),
            I::new().bne(5, 0, -8).build(),
            I::new().addi(10, 6, 0).build(),
        ],
    );

    assert_eq!(ctx.run_to_exit(MAX_CYCLES), 55);
    assert_eq!(ctx.sim.stats().inst_branch, 10);
}

#[test]
fn call_and_return() {
    // 0x00 a0 = 3
    // 0x04 call 0x10
    // 0x08 a0 += 100
    // 0x0c jump to the exit sequence at 0x18
    // 0x10 a0 <<= 1
    // 0x14 ret
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().addi(10, 0, 3).build(),
            I::new().jal(1, 12).build(),
            I::new().addi(10, 10, 100).build(),
            I::new().jal(0, 12).build(),
            I::new().slli(10, 10, 1).build(),
            I::new().jalr(0, 1, 0).build(),
        ],
    );

    assert_eq!(ctx.run_to_exit(MAX_CYCLES), 106);
    assert_eq!(ctx.get_reg(1), PROGRAM_BASE + 8);
}

#[test]
fn multiply_divide_and_remainder() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().addi(5, 0, -7).build(),
            I::new().addi(6, 0, 2).build(),
            I::new().div(7, 5, 6).build(),
            I::new().rem(8, 5, 6).build(),
            I::new().mul(9, 5, 6).build(),
            I::new().divu(11, 5, 0).build(),
        ],
    );

    let _ = ctx.run_to_exit(MAX_CYCLES);
    assert_eq!(ctx.get_reg(7), -3i64 as u64);
    assert_eq!(ctx.get_reg(8), -1i64 as u64);
    assert_eq!(ctx.get_reg(9), -14i64 as u64);
    assert_eq!(ctx.get_reg(11), u64::MAX);
    assert_eq!(ctx.sim.stats().inst_muldiv, 4);
}

#[test]
fn upper_immediates() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().lui(5, 0x12345).build(),
            I::new().auipc(6, 1).build(),
            I::new().lui(7, 0x80000).build(),
        ],
    );

    let _ = ctx.run_to_exit(MAX_CYCLES);
    assert_eq!(ctx.get_reg(5), 0x1234_5000);
    assert_eq!(ctx.get_reg(6), PROGRAM_BASE + 4 + 0x1000);
    assert_eq!(ctx.get_reg(7), 0xFFFF_FFFF_8000_0000);
}

#[test]
fn word_operations_sign_extend() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[
            I::new().lui(5, 0x7FFFF).build(),
            I::new().addiw(5, 5, 0x7FF).build(),
            I::new().addiw(6, 5, 0x7FF).build(),
            I::new().addiw(6, 6, 0x7FF).build(),
            I::new().srliw(7, 5, 4).build(),
        ],
    );

    let _ = ctx.run_to_exit(MAX_CYCLES);
    assert_eq!(ctx.get_reg(5), 0x7FFF_F7FF);
    assert_eq!(ctx.get_reg(6), 0xFFFF_FFFF_8000_07FD);
    assert_eq!(ctx.get_reg(7), 0x07FF_FF7F);
}

#[test]
fn multiply_latency_shows_in_cycle_count() {
    let program = [
        I::new().addi(5, 0, 3).build(),
        I::new().mul(6, 5, 5).build(),
    ];
    let cycles_with = |latency: u32| {
        let mut config = Config::default();
        config.memory.size = TEST_MEMORY;
        config.pipeline.muldiv_latency = latency;
        let mut ctx = TestContext::with_config(config).load_program(PROGRAM_BASE, &program);
        let _ = ctx.run_to_exit(MAX_CYCLES);
        assert_eq!(ctx.get_reg(6), 9);
        ctx.sim.stats().cycles
    };

    assert_eq!(cycles_with(5) - cycles_with(0), 5);
}

#[test]
fn exit_reports_message_and_statistics() {
    let mut ctx = TestContext::new().load_program(
        PROGRAM_BASE,
        &[I::new().addi(10, 0, 42).build()],
    );

    assert_eq!(ctx.run_to_exit(MAX_CYCLES), 42);
    let out = ctx.output();
    assert!(out.contains(EXIT_MESSAGE));
    assert!(out.contains("TOMASULO SIMULATION STATISTICS"));
    assert!(out.contains("sim_insts                3"));
}

#[test]
fn verbose_prints_state_every_cycle() {
    let mut config = Config::default();
    config.memory.size = TEST_MEMORY;
    config.general.verbose = true;
    let mut ctx = TestContext::with_config(config)
        .load_program(PROGRAM_BASE, &[I::new().nop().build()]);

    let _ = ctx.run_to_exit(MAX_CYCLES);
    let cycles = ctx.sim.stats().cycles as usize;
    assert_eq!(ctx.output().matches("PC:").count(), cycles);
}
