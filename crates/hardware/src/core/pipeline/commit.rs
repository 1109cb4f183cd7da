//! Commit stage.
//!
//! Retires at most one instruction per cycle, from the ROB head, and only
//! once its result is ready:
//! 1. **Stores:** Write memory at the address computed in execute.
//! 2. **Register results:** Write the register file, but only while the
//!    register status table still names this entry as the producer. A
//!    younger in-flight writer keeps the register renamed.
//! 3. **Accounting:** Retired count and instruction mix.

use tracing::debug;

use crate::common::error::SimError;
use crate::core::pipeline::engine::{Host, TomasuloEngine};
use crate::core::pipeline::signals::MemWidth;

/// Runs the commit stage for one cycle.
///
/// # Errors
///
/// [`SimError::MemoryOutOfRange`] when a store leaves memory.
pub fn commit_stage(engine: &mut TomasuloEngine, host: &mut dyn Host) -> Result<(), SimError> {
    let Some(head) = engine.rob.peek_head() else {
        return Ok(());
    };
    if !head.ready {
        return Ok(());
    }

    if head.inst.kind.is_store() {
        let width = head.inst.mem_width.unwrap_or(MemWidth::Double);
        host.store(head.mem_addr, width, head.value)
            .map_err(|e| SimError::MemoryOutOfRange {
                addr: e.addr,
                pc: head.inst.pc,
            })?;
    }

    let Some(entry) = engine.rob.commit_head() else {
        return Ok(());
    };
    if let Some(rd) = entry.rd
        && engine.status.clear_if_match(rd, entry.index)
    {
        engine.regs.write(rd, entry.value);
    }
    engine.stats.record_retired(entry.inst.kind);

    debug!(
        pc = format_args!("{:#x}", entry.inst.pc),
        rob = entry.index.0,
        "commit {}",
        entry.inst.mnemonic
    );
    Ok(())
}
