//! Register status table.
//!
//! Maps each architectural register to the ROB index of its latest
//! in-flight producer, or `None` when the committed value in the register
//! file is current. Issue overwrites the entry for every new destination,
//! which is the renaming step: WAW and WAR hazards never stall.

use serde::Serialize;

use crate::common::reg::NUM_REGS;
use crate::core::pipeline::rob::RobIndex;

/// Producer table for the 32 integer registers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegisterStatus {
    /// x0 is always `None`.
    producers: [Option<RobIndex>; NUM_REGS],
}

impl RegisterStatus {
    /// Creates a table with every register committed.
    pub const fn new() -> Self {
        Self {
            producers: [None; NUM_REGS],
        }
    }

    /// Records `index` as the latest producer of `reg`. No-op for x0.
    pub const fn set_producer(&mut self, reg: usize, index: RobIndex) {
        if reg != 0 {
            self.producers[reg] = Some(index);
        }
    }

    /// Latest in-flight producer of `reg`, if any.
    pub const fn producer(&self, reg: usize) -> Option<RobIndex> {
        self.producers[reg]
    }

    /// Returns true if `reg` waits on an in-flight producer.
    pub const fn is_busy(&self, reg: usize) -> bool {
        self.producers[reg].is_some()
    }

    /// Clears `reg` only if `index` is still its recorded producer, so a
    /// retiring instruction never clears a tag set by a younger rename.
    ///
    /// Returns true if the entry matched and was cleared.
    pub fn clear_if_match(&mut self, reg: usize, index: RobIndex) -> bool {
        let slot = &mut self.producers[reg];
        if *slot == Some(index) {
            *slot = None;
            true
        } else {
            false
        }
    }
}
