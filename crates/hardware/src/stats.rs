//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Counts by category (ALU, multiply/divide, load, store, branch, system).
//! 3. **Hazards:** Control, data, structural and memory-ordering stall counts.

use std::io::{self, Write};
use std::time::Instant;

use crate::isa::kind::InstKind;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of integer ALU instructions retired (including `lui`/`auipc`).
    pub inst_alu: u64,
    /// Count of multiply/divide instructions retired.
    pub inst_muldiv: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of `ecall` instructions retired.
    pub inst_system: u64,

    /// Issue cycles lost behind an in-flight branch, jump or `ecall`.
    pub stalls_control: u64,
    /// Issue cycles lost to a full ROB or station pool.
    pub stalls_structural: u64,
    /// Load start attempts blocked by an older store.
    pub stalls_mem: u64,
    /// Source operands captured as pending at issue (RAW dependencies).
    pub data_hazards: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_muldiv: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_system: 0,
            stalls_control: 0,
            stalls_structural: 0,
            stalls_mem: 0,
            data_hazards: 0,
        }
    }
}

impl SimStats {
    /// Counts one retired instruction of `kind`.
    pub const fn record_retired(&mut self, kind: InstKind) {
        self.instructions_retired += 1;
        if kind.is_load() {
            self.inst_load += 1;
        } else if kind.is_store() {
            self.inst_store += 1;
        } else if kind.is_control_flow() {
            self.inst_branch += 1;
        } else if kind.is_muldiv() {
            self.inst_muldiv += 1;
        } else if matches!(kind, InstKind::Ecall) {
            self.inst_system += 1;
        } else {
            self.inst_alu += 1;
        }
    }

    /// Cycles per retired instruction (0 before anything retires).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Retired instructions per cycle (0 before the first cycle).
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Writes the statistics report.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_report(&self, out: &mut dyn Write) -> io::Result<()> {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        writeln!(out, "\n==========================================================")?;
        writeln!(out, "TOMASULO SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "host_seconds             {seconds:.4} s")?;
        writeln!(out, "sim_cycles               {}", self.cycles)?;
        writeln!(out, "sim_insts                {}", self.instructions_retired)?;
        writeln!(out, "sim_ipc                  {:.4}", self.ipc())?;
        writeln!(out, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "HAZARDS")?;
        for (name, n) in [
            ("stalls.control", self.stalls_control),
            ("stalls.structural", self.stalls_structural),
            ("stalls.memory", self.stalls_mem),
        ] {
            writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, cyc))?;
        }
        writeln!(out, "  {:<22} {}", "hazards.data", self.data_hazards)?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "INSTRUCTION MIX")?;
        for (name, n) in [
            ("op.alu", self.inst_alu),
            ("op.muldiv", self.inst_muldiv),
            ("op.load", self.inst_load),
            ("op.store", self.inst_store),
            ("op.branch", self.inst_branch),
            ("op.system", self.inst_system),
        ] {
            writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, instr))?;
        }
        writeln!(out, "==========================================================")
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        let _ = self.write_report(&mut io::stdout().lock());
    }
}
