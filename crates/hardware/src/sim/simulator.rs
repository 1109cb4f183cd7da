//! Simulator: owns the engine, memory and console side-by-side.
//!
//! The engine reaches memory and system calls only through the [`Host`]
//! view built here for each tick, so there is no back-reference from the
//! engine to its driver. The simulator also owns every diagnostic sink
//! (history, snapshots, statistics) and is the single place fatal errors
//! are reported.

use std::io::Write;
use std::path::Path;

use tracing::{error, info, warn};

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::pipeline::engine::{
    Host, IssueResult, SyscallOutcome, TickOutcome, TomasuloEngine,
};
use crate::core::pipeline::signals::MemWidth;
use crate::isa::abi::REG_SP;
use crate::sim::history::History;
use crate::sim::loader::{self, ElfImage};
use crate::sim::snapshot::SnapshotLog;
use crate::sim::syscall::Console;
use crate::soc::memory::{Memory, OutOfBounds};
use crate::stats::SimStats;

/// How a run ended without a fatal error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The program called exit with this status.
    Exited(i32),
    /// The configured cycle limit was reached first.
    CycleLimit,
}

/// The engine's view of memory and the console for one tick.
struct SimHost<'a> {
    memory: &'a mut Memory,
    console: &'a mut Console,
}

impl Host for SimHost<'_> {
    fn load(&mut self, addr: u64, width: MemWidth) -> Result<u64, OutOfBounds> {
        self.memory.read(addr, width)
    }

    fn store(&mut self, addr: u64, width: MemWidth, value: u64) -> Result<(), OutOfBounds> {
        self.memory.write(addr, width, value)
    }

    fn syscall(&mut self, code: u64, arg: u64, pc: u64) -> Result<SyscallOutcome, SimError> {
        self.console.dispatch(self.memory, code, arg, pc)
    }
}

/// Top-level simulator: engine, memory, console and diagnostic sinks.
#[derive(Debug)]
pub struct Simulator {
    /// Out-of-order core.
    pub engine: TomasuloEngine,
    /// Flat memory.
    pub memory: Memory,
    console: Console,
    history: History,
    snapshots: Option<SnapshotLog>,
    config: Config,
    stack_base: u64,
    stack_size: u64,
}

impl Simulator {
    /// Creates a simulator with zeroed memory and the configured stack.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, SimError> {
        config.validate()?;
        let engine = TomasuloEngine::new(&config.pipeline);
        let memory = Memory::new(config.memory.size);
        let history = History::new(config.general.history_limit);
        let snapshots = config
            .general
            .snapshot_file
            .as_ref()
            .map(|path| SnapshotLog::new(path, config.general.history_limit));

        let mut sim = Self {
            engine,
            memory,
            console: Console::default(),
            history,
            snapshots,
            stack_base: 0,
            stack_size: 0,
            config,
        };
        let (base, size) = (sim.config.memory.stack_base(), sim.config.memory.stack_size());
        sim.init_stack(base, size)?;
        Ok(sim)
    }

    /// Replaces the console streams used by system calls and single-step.
    #[must_use]
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Sets `sp` to `base` and zeroes the stack region below it.
    ///
    /// # Errors
    ///
    /// [`SimError::MemoryOutOfRange`] if `base` lies outside memory.
    pub fn init_stack(&mut self, base: u64, size: u64) -> Result<(), SimError> {
        if base > self.memory.size() as u64 {
            return Err(SimError::MemoryOutOfRange { addr: base, pc: 0 });
        }
        let floor = base.saturating_sub(size);
        self.memory
            .fill(floor, base - floor, 0)
            .map_err(|e| SimError::MemoryOutOfRange { addr: e.addr, pc: 0 })?;
        self.engine.regs.write(REG_SP, base);
        self.stack_base = base;
        self.stack_size = size;
        Ok(())
    }

    /// Lowest legal stack address.
    pub const fn stack_floor(&self) -> u64 {
        self.stack_base.saturating_sub(self.stack_size)
    }

    /// Reads, parses and loads an ELF executable, then points PC at its entry.
    ///
    /// # Errors
    ///
    /// Any loader error.
    pub fn load_elf(&mut self, path: impl AsRef<Path>) -> Result<u64, SimError> {
        let bytes = loader::load_binary(path)?;
        let image = loader::parse_elf(&bytes)?;
        self.load_image(&image)?;
        Ok(image.entry)
    }

    /// Loads an already parsed image and points PC at its entry.
    ///
    /// # Errors
    ///
    /// [`SimError::SegmentOutOfRange`] or [`SimError::MemoryOutOfRange`]
    /// for segments that do not fit.
    pub fn load_image(&mut self, image: &ElfImage) -> Result<(), SimError> {
        loader::load_segments(&mut self.memory, &image.segments)?;
        self.engine.pc = image.entry;
        info!(entry = format_args!("{:#x}", image.entry), "program loaded");
        Ok(())
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.engine.stats
    }

    /// Execution history.
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Snapshot log, when enabled.
    pub const fn snapshots(&self) -> Option<&SnapshotLog> {
        self.snapshots.as_ref()
    }

    /// Fails when the committed stack pointer is below the stack floor.
    ///
    /// # Errors
    ///
    /// [`SimError::StackOverflow`].
    pub fn check_stack(&self) -> Result<(), SimError> {
        let sp = self.engine.regs.read(REG_SP);
        let floor = self.stack_floor();
        if sp < floor {
            return Err(SimError::StackOverflow { sp, floor });
        }
        Ok(())
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// On exit the statistics report is printed, the snapshot log is written
    /// and, when configured, the history transcript is dumped.
    ///
    /// # Errors
    ///
    /// Any fatal condition. The caller reports it with
    /// [`Simulator::report_fatal`].
    pub fn tick(&mut self) -> Result<TickOutcome, SimError> {
        if let Some(code) = self.engine.exit_code() {
            return Ok(TickOutcome::Exited(code));
        }
        self.check_stack()?;

        let mut host = SimHost {
            memory: &mut self.memory,
            console: &mut self.console,
        };
        let outcome = self.engine.tick(&mut host)?;

        let state = self.engine.regs.format_state(self.engine.pc);
        self.history.record(
            self.engine.stats.cycles,
            self.engine.last_issue.as_ref().and_then(IssueResult::mnemonic),
            &state,
        );
        if let Some(log) = self.snapshots.as_mut() {
            log.record(&self.engine);
        }
        if self.config.general.verbose {
            write!(self.console.output(), "{state}").map_err(|e| SimError::io("<console>", e))?;
        }

        if let TickOutcome::Exited(code) = outcome {
            self.finish(code)?;
        }
        Ok(outcome)
    }

    fn finish(&mut self, code: i32) -> Result<(), SimError> {
        info!(code, cycles = self.engine.stats.cycles, "program exited");
        if self.config.general.dump_history_on_exit {
            self.history.dump(&self.config.general.history_file)?;
        }
        self.engine
            .stats
            .write_report(self.console.output())
            .map_err(|e| SimError::io("<console>", e))?;
        if let Some(log) = &self.snapshots {
            log.write()?;
        }
        Ok(())
    }

    /// Runs until exit or the configured cycle limit.
    ///
    /// In single-step mode one input line is read after every cycle; a line
    /// containing `d` dumps the history transcript.
    ///
    /// # Errors
    ///
    /// The first fatal condition.
    pub fn run(&mut self) -> Result<RunOutcome, SimError> {
        loop {
            if let Some(max) = self.config.general.max_cycles
                && self.engine.stats.cycles >= max
            {
                warn!(max, "cycle limit reached");
                return Ok(RunOutcome::CycleLimit);
            }
            if let TickOutcome::Exited(code) = self.tick()? {
                return Ok(RunOutcome::Exited(code));
            }
            if self.config.general.single_step {
                self.step_prompt()?;
            }
        }
    }

    fn step_prompt(&mut self) -> Result<(), SimError> {
        if let Some(line) = self.console.read_line()?
            && line.contains('d')
        {
            self.history.dump(&self.config.general.history_file)?;
            info!(path = %self.config.general.history_file, "history dumped");
        }
        Ok(())
    }

    /// Reports a fatal error: flushes the snapshot log, prints a diagnostic
    /// with the PC to stderr and writes the history transcript.
    ///
    /// Failures while writing the diagnostics are logged and otherwise
    /// ignored so the triggering error is always reported.
    pub fn report_fatal(&mut self, err: &SimError) {
        if let Some(log) = &self.snapshots
            && let Err(e) = log.write()
        {
            warn!("snapshot not written: {e}");
        }

        let pc = err.pc().unwrap_or(self.engine.pc);
        error!(pc = format_args!("{pc:#x}"), "{err}");
        eprintln!("\n[!] FATAL: {err}");
        eprintln!("[!] PC: {pc:#x}, cycle {}", self.engine.stats.cycles);
        eprint!("{}", self.engine.regs.format_state(pc));

        if let Err(e) = self.history.dump(&self.config.general.history_file) {
            warn!("history not written: {e}");
        }
    }
}
