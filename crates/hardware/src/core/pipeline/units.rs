//! Functional units.
//!
//! A fixed array of unit slots indexed by unit kind and slot number. A
//! station claims a slot when it starts executing and gives it back once its
//! result is computed; the per-kind latency decides how long that takes.

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::isa::kind::InstKind;

/// Widest unit kind.
const MAX_SLOTS: usize = 4;

/// Functional unit classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FuKind {
    /// Integer ALU, branches, jumps, upper immediates and `ecall`.
    Alu,
    /// Multiply and divide.
    MulDiv,
    /// Loads and stores.
    Mem,
}

impl FuKind {
    /// Number of unit kinds.
    pub const COUNT: usize = 3;

    /// Unit class that executes `kind`.
    pub const fn for_kind(kind: InstKind) -> Self {
        if kind.is_load() || kind.is_store() {
            Self::Mem
        } else if kind.is_muldiv() {
            Self::MulDiv
        } else {
            Self::Alu
        }
    }

    /// Number of slots of this kind.
    pub const fn slots(self) -> usize {
        match self {
            Self::Alu | Self::MulDiv => 4,
            Self::Mem => 1,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Alu => 0,
            Self::MulDiv => 1,
            Self::Mem => 2,
        }
    }
}

/// One slot of one unit kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct UnitSlot {
    /// Unit class.
    pub kind: FuKind,
    /// Slot number within the class.
    pub slot: usize,
}

/// Execution latency per unit kind, in cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latencies {
    /// ALU latency.
    pub alu: u32,
    /// Multiply/divide latency.
    pub muldiv: u32,
    /// Load/store latency.
    pub mem: u32,
}

impl Latencies {
    /// Latency of `kind`.
    pub const fn of(&self, kind: FuKind) -> u32 {
        match kind {
            FuKind::Alu => self.alu,
            FuKind::MulDiv => self.muldiv,
            FuKind::Mem => self.mem,
        }
    }
}

impl From<&PipelineConfig> for Latencies {
    fn from(cfg: &PipelineConfig) -> Self {
        Self {
            alu: cfg.alu_latency,
            muldiv: cfg.muldiv_latency,
            mem: cfg.mem_latency,
        }
    }
}

/// Busy flags for every unit slot.
#[derive(Clone, Debug, Default)]
pub struct FunctionalUnits {
    busy: [[bool; MAX_SLOTS]; FuKind::COUNT],
}

impl FunctionalUnits {
    /// All units idle.
    pub const fn new() -> Self {
        Self {
            busy: [[false; MAX_SLOTS]; FuKind::COUNT],
        }
    }

    /// Claims the first idle slot of `kind`.
    pub fn acquire(&mut self, kind: FuKind) -> Option<UnitSlot> {
        let row = &mut self.busy[kind.index()];
        let slot = row[..kind.slots()].iter().position(|b| !b)?;
        row[slot] = true;
        Some(UnitSlot { kind, slot })
    }

    /// Returns a slot to the idle set.
    pub const fn release(&mut self, unit: UnitSlot) {
        self.busy[unit.kind.index()][unit.slot] = false;
    }

    /// Number of busy slots of `kind`.
    pub fn busy_count(&self, kind: FuKind) -> usize {
        self.busy[kind.index()].iter().filter(|b| **b).count()
    }
}
