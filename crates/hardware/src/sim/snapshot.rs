//! Structured per-cycle snapshots.
//!
//! Each cycle captures the ROB, the busy reservation stations, the register
//! status table and the committed registers. The log is written as pretty
//! JSON for external visualisation; the simulator never reads it back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::common::error::SimError;
use crate::common::reg::NUM_REGS;
use crate::core::pipeline::engine::TomasuloEngine;
use crate::core::pipeline::register_status::RegisterStatus;
use crate::core::pipeline::rob::RobEntry;
use crate::core::pipeline::station::ReservationStation;

/// A busy station and its pool slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StationSnapshot {
    /// Slot in the pool.
    pub id: usize,
    /// Station contents.
    #[serde(flatten)]
    pub station: ReservationStation,
}

/// Machine state at the end of one cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CycleSnapshot {
    /// Cycle number (1-based).
    pub cycle: u64,
    /// Next issue PC.
    pub pc: u64,
    /// Busy ROB entries, oldest first.
    pub rob: Vec<RobEntry>,
    /// Busy reservation stations.
    pub stations: Vec<StationSnapshot>,
    /// Latest producer per register.
    pub register_status: RegisterStatus,
    /// Committed registers.
    pub regs: [u64; NUM_REGS],
}

impl CycleSnapshot {
    /// Captures the current state of `engine`.
    pub fn capture(engine: &TomasuloEngine) -> Self {
        Self {
            cycle: engine.stats.cycles,
            pc: engine.pc,
            rob: engine.rob.iter().cloned().collect(),
            stations: engine
                .stations
                .iter()
                .map(|(id, st)| StationSnapshot {
                    id,
                    station: st.clone(),
                })
                .collect(),
            register_status: engine.status.clone(),
            regs: engine.regs.snapshot(),
        }
    }
}

/// Snapshot log bound to its output file.
#[derive(Clone, Debug)]
pub struct SnapshotLog {
    path: PathBuf,
    cycles: Vec<CycleSnapshot>,
    limit: usize,
}

impl SnapshotLog {
    /// Creates an empty log written to `path`, cleared after `limit` cycles.
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            cycles: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recorded cycles.
    pub fn cycles(&self) -> &[CycleSnapshot] {
        &self.cycles
    }

    /// Appends a snapshot of `engine`.
    pub fn record(&mut self, engine: &TomasuloEngine) {
        if self.cycles.len() >= self.limit {
            self.cycles.clear();
        }
        self.cycles.push(CycleSnapshot::capture(engine));
    }

    /// Writes the log as pretty JSON.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if serialisation or the write fails.
    pub fn write(&self) -> Result<(), SimError> {
        let json = serde_json::to_string_pretty(&self.cycles)
            .map_err(|e| SimError::io(&self.path, e.into()))?;
        fs::write(&self.path, json).map_err(|e| SimError::io(&self.path, e))
    }
}
