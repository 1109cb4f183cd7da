//! Tomasulo execution engine.
//!
//! This module owns all in-flight machine state and advances it one clock
//! at a time. It provides:
//! 1. **`Host`:** The narrow interface the engine calls for memory access
//!    and system calls. The engine holds no reference to the driver.
//! 2. **`TomasuloEngine`:** PC, committed registers, ROB, reservation
//!    stations, register status table and functional units.
//! 3. **`tick`:** One cycle in the fixed order commit, writeback, execute,
//!    issue. Each stage observes what earlier cycles produced, never what a
//!    later stage of the same cycle produced.
//!
//! Fatal conditions come back as `Err(SimError)`; the driver reports them.

use serde::Serialize;

use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::config::PipelineConfig;
use crate::core::pipeline::register_status::RegisterStatus;
use crate::core::pipeline::rob::{Rob, RobIndex};
use crate::core::pipeline::signals::MemWidth;
use crate::core::pipeline::station::StationPool;
use crate::core::pipeline::units::{FunctionalUnits, Latencies};
use crate::core::pipeline::{commit, execute, issue, writeback};
use crate::soc::memory::OutOfBounds;
use crate::stats::SimStats;

/// What a system call asks the engine to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyscallOutcome {
    /// Continue; the value is the new `a0`.
    Continue(u64),
    /// Halt the simulation with this exit status.
    Exit(i32),
}

/// Services the engine needs from its surroundings.
pub trait Host {
    /// Reads `width` bytes at `addr`, little-endian, zero-extended.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] when the access leaves memory.
    fn load(&mut self, addr: u64, width: MemWidth) -> Result<u64, OutOfBounds>;

    /// Writes the low `width` bytes of `value` at `addr`, little-endian.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] when the access leaves memory.
    fn store(&mut self, addr: u64, width: MemWidth, value: u64) -> Result<(), OutOfBounds>;

    /// Fetches the instruction word at `pc`.
    ///
    /// # Errors
    ///
    /// [`OutOfBounds`] when `pc` is outside memory.
    fn fetch(&mut self, pc: u64) -> Result<u32, OutOfBounds> {
        self.load(pc, MemWidth::Word).map(|w| w as u32)
    }

    /// Dispatches the system call selected by `code` (a7) with argument `arg` (a0).
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownSyscall`] for unsupported codes, or any memory
    /// error raised while servicing the call.
    fn syscall(&mut self, code: u64, arg: u64, pc: u64) -> Result<SyscallOutcome, SimError>;
}

/// Why issue did not accept an instruction this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StallReason {
    /// A branch, jump or `ecall` is still in the ROB.
    ControlFlow,
    /// No free ROB slot.
    RobFull,
    /// No free reservation station.
    StationsFull,
}

/// Result of the issue stage for one cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum IssueResult {
    /// An instruction entered the ROB at `index`.
    Issued {
        /// ROB slot allocated.
        index: RobIndex,
        /// Mnemonic of the issued instruction.
        mnemonic: String,
    },
    /// Nothing issued; no state changed.
    Stalled(StallReason),
}

impl IssueResult {
    /// Mnemonic of the issued instruction, if one issued.
    pub fn mnemonic(&self) -> Option<&str> {
        match self {
            Self::Issued { mnemonic, .. } => Some(mnemonic),
            Self::Stalled(_) => None,
        }
    }
}

/// Result of one clock cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The machine keeps running.
    Running,
    /// An exit system call halted the machine.
    Exited(i32),
}

/// The out-of-order core.
#[derive(Debug)]
pub struct TomasuloEngine {
    /// Address of the next instruction to issue.
    pub pc: u64,
    /// Committed architectural registers.
    pub regs: RegisterFile,
    /// Reorder buffer.
    pub rob: Rob,
    /// Reservation station pool.
    pub stations: StationPool,
    /// Latest producer of every register.
    pub status: RegisterStatus,
    /// Functional unit occupancy.
    pub units: FunctionalUnits,
    /// Per-unit latencies.
    pub latencies: Latencies,
    /// Performance counters.
    pub stats: SimStats,
    /// Issue result of the most recent cycle.
    pub last_issue: Option<IssueResult>,
    exit: Option<i32>,
}

impl TomasuloEngine {
    /// Creates an idle engine sized by `cfg`, with PC 0 and zeroed registers.
    pub fn new(cfg: &PipelineConfig) -> Self {
        Self {
            pc: 0,
            regs: RegisterFile::new(),
            rob: Rob::new(cfg.rob_size),
            stations: StationPool::new(cfg.station_count),
            status: RegisterStatus::new(),
            units: FunctionalUnits::new(),
            latencies: Latencies::from(cfg),
            stats: SimStats::default(),
            last_issue: None,
            exit: None,
        }
    }

    /// Exit status once an exit system call has run.
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit
    }

    /// Returns true once the machine has halted.
    pub const fn is_halted(&self) -> bool {
        self.exit.is_some()
    }

    /// Advances the machine by one clock cycle.
    ///
    /// After an exit this is a no-op that keeps reporting the exit.
    ///
    /// # Errors
    ///
    /// Any fatal condition raised by a stage.
    pub fn tick(&mut self, host: &mut dyn Host) -> Result<TickOutcome, SimError> {
        if let Some(code) = self.exit {
            return Ok(TickOutcome::Exited(code));
        }
        self.stats.cycles += 1;
        self.last_issue = None;

        commit::commit_stage(self, host)?;
        writeback::writeback_stage(self);
        if let Some(code) = execute::execute_stage(self, host)? {
            self.exit = Some(code);
            return Ok(TickOutcome::Exited(code));
        }
        self.last_issue = Some(issue::issue_stage(self, host)?);

        Ok(TickOutcome::Running)
    }
}
