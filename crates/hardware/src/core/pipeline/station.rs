//! Reservation stations.
//!
//! A station holds an issued instruction until its operands are available,
//! a functional unit has finished with it, and its result has been
//! broadcast. Stations move through [`StationState`] once each:
//! `Issued -> Executing -> WrittenBack`, and are freed after broadcast.

use serde::Serialize;

use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::units::UnitSlot;
use crate::isa::decode::DecodedInst;

/// A source operand: either a value or the ROB entry that will produce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Operand {
    /// Value available.
    Ready(u64),
    /// Waiting for the broadcast of this ROB entry.
    PendingOn(RobIndex),
}

impl Operand {
    /// The value, if available.
    pub const fn value(self) -> Option<u64> {
        match self {
            Self::Ready(v) => Some(v),
            Self::PendingOn(_) => None,
        }
    }

    /// Returns true if the operand no longer waits on anything.
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Captures `value` if this operand waits on `index`. Returns true if it did.
    pub fn resolve(&mut self, index: RobIndex, value: u64) -> bool {
        if *self == Self::PendingOn(index) {
            *self = Self::Ready(value);
            true
        } else {
            false
        }
    }
}

/// Lifecycle of a busy station.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StationState {
    /// Waiting for operands or a free functional unit.
    Issued,
    /// Holding a functional unit while the latency counts down.
    Executing,
    /// Result computed; broadcast happens in the next writeback.
    WrittenBack,
}

/// A busy reservation station.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReservationStation {
    /// The instruction being executed.
    pub inst: DecodedInst,
    /// First operand (`rs1`, or a0 for `ecall`).
    pub src1: Operand,
    /// Second operand (`rs2`, or a7 for `ecall`).
    pub src2: Operand,
    /// ROB entry receiving the result.
    pub dest: RobIndex,
    /// Current lifecycle state.
    pub state: StationState,
    /// Cycles left before the result may be produced.
    pub remaining: u32,
    /// Functional unit held while executing.
    pub unit: Option<UnitSlot>,
    /// Computed result (store data for stores).
    pub result: u64,
    /// Effective address for loads and stores.
    pub mem_addr: u64,
}

impl ReservationStation {
    /// Creates an `Issued` station for `inst` targeting `dest`.
    pub const fn new(inst: DecodedInst, src1: Operand, src2: Operand, dest: RobIndex) -> Self {
        Self {
            inst,
            src1,
            src2,
            dest,
            state: StationState::Issued,
            remaining: 0,
            unit: None,
            result: 0,
            mem_addr: 0,
        }
    }

    /// Both operand values, once neither is pending.
    pub const fn operands(&self) -> Option<(u64, u64)> {
        match (self.src1, self.src2) {
            (Operand::Ready(a), Operand::Ready(b)) => Some((a, b)),
            _ => None,
        }
    }
}

/// Fixed-capacity pool of stations. An occupied slot is a busy station.
#[derive(Clone, Debug)]
pub struct StationPool {
    slots: Vec<Option<ReservationStation>>,
}

impl StationPool {
    /// Creates a pool of `capacity` free stations.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    /// Number of stations.
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of busy stations.
    pub fn busy_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if at least one station is free.
    pub fn has_free(&self) -> bool {
        self.slots.iter().any(Option::is_none)
    }

    /// Places `station` in the first free slot and returns the slot number.
    pub fn insert(&mut self, station: ReservationStation) -> Option<usize> {
        let id = self.slots.iter().position(Option::is_none)?;
        self.slots[id] = Some(station);
        Some(id)
    }

    /// Busy station in slot `id`.
    pub fn get(&self, id: usize) -> Option<&ReservationStation> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Mutable access to the busy station in slot `id`.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut ReservationStation> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    /// Frees slot `id`, returning the station that occupied it.
    pub fn release(&mut self, id: usize) -> Option<ReservationStation> {
        self.slots.get_mut(id).and_then(Option::take)
    }

    /// Busy stations with their slot numbers.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ReservationStation)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, s)| s.as_ref().map(|s| (id, s)))
    }

    /// Delivers `value` to every operand waiting on `index`.
    ///
    /// Returns the number of operands resolved.
    pub fn broadcast(&mut self, index: RobIndex, value: u64) -> usize {
        let mut resolved = 0;
        for station in self.slots.iter_mut().flatten() {
            resolved += usize::from(station.src1.resolve(index, value));
            resolved += usize::from(station.src2.resolve(index, value));
        }
        resolved
    }
}
