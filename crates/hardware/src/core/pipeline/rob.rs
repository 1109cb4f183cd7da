//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer holding every in-flight instruction from
//! issue to commit. It provides:
//! 1. **Allocation:** Issue claims the slot at the tail; its position is the
//!    instruction's [`RobIndex`], the tag operands wait on.
//! 2. **Completion:** Writeback marks the entry ready with its value.
//! 3. **In-order Commit:** Only the head retires, one entry per cycle.
//! 4. **Ordering Queries:** Walks from the head used by issue (serialising
//!    instructions) and the load/store ordering rule.

use serde::Serialize;

use crate::isa::decode::DecodedInst;

/// Position of an entry in the reorder buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RobIndex(pub usize);

/// An occupied ROB slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RobEntry {
    /// Slot position.
    pub index: RobIndex,
    /// The instruction this entry tracks.
    pub inst: DecodedInst,
    /// Result has been broadcast and may commit.
    pub ready: bool,
    /// Destination register, if any.
    pub rd: Option<usize>,
    /// Result value; store data for stores.
    pub value: u64,
    /// Effective address for loads and stores.
    pub mem_addr: u64,
}

/// Circular reorder buffer. An occupied slot is a busy entry.
#[derive(Clone, Debug)]
pub struct Rob {
    slots: Vec<Option<RobEntry>>,
    head: usize,
    tail: usize,
    count: usize,
}

impl Rob {
    /// Creates an empty ROB with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of busy entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no entry is busy.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if every slot is busy.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Index of the oldest slot.
    #[inline]
    pub const fn head(&self) -> RobIndex {
        RobIndex(self.head)
    }

    /// Index the next allocation will use.
    #[inline]
    pub const fn tail(&self) -> RobIndex {
        RobIndex(self.tail)
    }

    /// Allocates the tail slot for `inst`. Returns `None` if the ROB is full.
    pub fn allocate(&mut self, inst: DecodedInst) -> Option<RobIndex> {
        if self.is_full() {
            return None;
        }

        let index = RobIndex(self.tail);
        self.slots[self.tail] = Some(RobEntry {
            index,
            rd: inst.rd,
            inst,
            ready: false,
            value: 0,
            mem_addr: 0,
        });
        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
        Some(index)
    }

    /// Returns the busy entry at `index`.
    pub fn get(&self, index: RobIndex) -> Option<&RobEntry> {
        self.slots.get(index.0).and_then(Option::as_ref)
    }

    /// Marks the entry ready with its result and effective address.
    pub fn mark_ready(&mut self, index: RobIndex, value: u64, mem_addr: u64) {
        if let Some(entry) = self.slots.get_mut(index.0).and_then(Option::as_mut) {
            entry.ready = true;
            entry.value = value;
            entry.mem_addr = mem_addr;
        }
    }

    /// Returns the oldest busy entry.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        if self.count == 0 {
            None
        } else {
            self.slots[self.head].as_ref()
        }
    }

    /// Retires the head entry if it is ready.
    ///
    /// Returns `None` if the ROB is empty or the head has no result yet.
    pub fn commit_head(&mut self) -> Option<RobEntry> {
        if !self.peek_head().is_some_and(|e| e.ready) {
            return None;
        }

        let entry = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        entry
    }

    /// Distance of `index` from the head, in program order.
    #[inline]
    pub const fn age(&self, index: RobIndex) -> usize {
        let cap = self.slots.len();
        (index.0 + cap - self.head) % cap
    }

    /// Busy entries from head to tail, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RobEntry> + '_ {
        self.walk(self.count)
    }

    /// Busy entries strictly older than `index`, oldest first.
    pub fn entries_before(&self, index: RobIndex) -> impl Iterator<Item = &RobEntry> + '_ {
        self.walk(self.age(index).min(self.count))
    }

    fn walk(&self, n: usize) -> impl Iterator<Item = &RobEntry> + '_ {
        let cap = self.slots.len();
        (0..n).filter_map(move |i| self.slots[(self.head + i) % cap].as_ref())
    }
}
