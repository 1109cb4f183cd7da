//! Store-to-load ordering.
//!
//! Loads are ordered against older stores without comparing addresses: a
//! load may not execute while any store sits between the ROB head and the
//! load's own entry. Stores never wait on younger instructions.

use crate::core::pipeline::rob::{Rob, RobIndex};

/// Returns `true` when no store is pending ahead of the entry at `load`.
pub fn load_may_proceed(rob: &Rob, load: RobIndex) -> bool {
    !rob
        .entries_before(load)
        .any(|entry| entry.inst.kind.is_store())
}
