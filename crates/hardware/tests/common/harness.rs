use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;

use tomasim_core::config::Config;
use tomasim_core::core::TickOutcome;
use tomasim_core::isa::abi::{REG_A7, REG_ZERO};
use tomasim_core::sim::syscall::{Console, SYS_EXIT_CODE};
use tomasim_core::{SimError, Simulator};
use tracing_subscriber::EnvFilter;

use crate::common::builder::instruction::InstructionBuilder;

/// Memory size used by tests (1 MiB).
pub const TEST_MEMORY: usize = 1024 * 1024;

/// Default program load address.
pub const PROGRAM_BASE: u64 = 0x1000;

/// Output sink shared between the console and the test.
#[derive(Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `addi a7, zero, 93; ecall`: exit with status `a0`.
pub fn exit_sequence() -> [u32; 2] {
    [
        InstructionBuilder::new()
            .addi(REG_A7 as u32, REG_ZERO as u32, SYS_EXIT_CODE as i32)
            .build(),
        InstructionBuilder::new().ecall().build(),
    ]
}

pub struct TestContext {
    pub sim: Simulator,
    output: SharedOutput,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.memory.size = TEST_MEMORY;
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let output = SharedOutput::default();
        let sim = Simulator::new(config)
            .unwrap()
            .with_console(Console::new(Cursor::new(Vec::new()), output.clone()));
        Self { sim, output }
    }

    /// Replaces console input with `input`; output is still captured.
    pub fn with_input(mut self, input: &str) -> Self {
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), self.output.clone());
        self.sim = self.sim.with_console(console);
        self
    }

    /// Loads `instructions` at `addr`, followed by the exit sequence, and sets the PC.
    pub fn load_program(self, addr: u64, instructions: &[u32]) -> Self {
        let mut words = instructions.to_vec();
        words.extend(exit_sequence());
        self.load_raw(addr, &words)
    }

    /// Loads `instructions` at `addr` exactly as given and sets the PC.
    pub fn load_raw(mut self, addr: u64, instructions: &[u32]) -> Self {
        for (i, inst) in instructions.iter().enumerate() {
            self.sim.memory.write_u32(addr + (i as u64) * 4, *inst).unwrap();
        }
        self.sim.engine.pc = addr;
        self
    }

    pub fn set_reg(&mut self, reg: usize, val: u64) {
        self.sim.engine.regs.write(reg, val);
    }

    pub fn get_reg(&self, reg: usize) -> u64 {
        self.sim.engine.regs.read(reg)
    }

    /// Everything the program printed, including the exit message and report.
    pub fn output(&self) -> String {
        self.output.text()
    }

    /// Raw output bytes, for services that write non-UTF-8 data.
    pub fn output_bytes(&self) -> Vec<u8> {
        self.output.bytes()
    }

    /// Ticks until exit or `max_cycles`. Returns the exit status, if any.
    pub fn run(&mut self, max_cycles: u64) -> Result<Option<i32>, SimError> {
        for _ in 0..max_cycles {
            if let TickOutcome::Exited(code) = self.sim.tick()? {
                return Ok(Some(code));
            }
        }
        Ok(None)
    }

    /// Runs a program that must exit within `max_cycles`.
    pub fn run_to_exit(&mut self, max_cycles: u64) -> i32 {
        match self.run(max_cycles) {
            Ok(Some(code)) => code,
            Ok(None) => panic!("program did not exit within {max_cycles} cycles"),
            Err(e) => panic!("fatal error: {e}"),
        }
    }
}
