//! Issue stage.
//!
//! Accepts at most one instruction per cycle, in program order:
//! 1. **Serialization:** Stall while a branch, jump or `ecall` is in flight,
//!    so nothing past an unresolved redirect is ever fetched or decoded.
//! 2. **Structural:** Stall if the ROB or the station pool is full.
//! 3. **Fetch & decode:** Read the word at PC and decode it with the
//!    committed register values.
//! 4. **Rename:** Allocate a ROB slot, resolve each source from the register
//!    status table, record the destination's new producer and advance PC.
//!
//! A stall leaves every structure untouched.

use tracing::{debug, trace, warn};

use crate::common::error::SimError;
use crate::core::pipeline::engine::{Host, IssueResult, StallReason, TomasuloEngine};
use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::station::{Operand, ReservationStation};
use crate::isa::decode::{DecodedInst, decode};

/// Runs the issue stage for one cycle.
///
/// # Errors
///
/// [`SimError::MemoryOutOfRange`] if PC is outside memory, or
/// [`SimError::Decode`] for an unrecognised instruction word.
pub fn issue_stage(
    engine: &mut TomasuloEngine,
    host: &mut dyn Host,
) -> Result<IssueResult, SimError> {
    if engine.rob.iter().any(|e| e.inst.kind.is_serializing()) {
        engine.stats.stalls_control += 1;
        trace!(pc = engine.pc, "issue: control stall");
        return Ok(IssueResult::Stalled(StallReason::ControlFlow));
    }
    if engine.rob.is_full() {
        engine.stats.stalls_structural += 1;
        return Ok(IssueResult::Stalled(StallReason::RobFull));
    }
    if !engine.stations.has_free() {
        engine.stats.stalls_structural += 1;
        return Ok(IssueResult::Stalled(StallReason::StationsFull));
    }

    let pc = engine.pc;
    let word = host
        .fetch(pc)
        .map_err(|e| SimError::MemoryOutOfRange { addr: e.addr, pc })?;
    let inst = decode(word, pc, &engine.regs)?;

    let src1 = rename_source(engine, inst.rs1);
    let src2 = rename_source(engine, inst.rs2);

    let rd = inst.rd;
    let mnemonic = inst.mnemonic.clone();
    let index = match allocate(engine, inst, src1, src2) {
        Ok(index) => index,
        Err(reason) => {
            engine.stats.stalls_structural += 1;
            return Ok(IssueResult::Stalled(reason));
        }
    };
    let pending = [src1, src2].iter().filter(|op| !op.is_ready()).count();
    engine.stats.data_hazards += pending as u64;
    if let Some(rd) = rd {
        engine.status.set_producer(rd, index);
    }
    engine.pc = pc.wrapping_add(4);

    debug!(pc = format_args!("{pc:#x}"), rob = index.0, "issue {mnemonic}");
    Ok(IssueResult::Issued { index, mnemonic })
}

/// Claims a station and the ROB tail for `inst`, or neither.
fn allocate(
    engine: &mut TomasuloEngine,
    inst: DecodedInst,
    src1: Operand,
    src2: Operand,
) -> Result<RobIndex, StallReason> {
    let dest = engine.rob.tail();
    let id = engine
        .stations
        .insert(ReservationStation::new(inst.clone(), src1, src2, dest))
        .ok_or(StallReason::StationsFull)?;
    engine.rob.allocate(inst).ok_or_else(|| {
        let _ = engine.stations.release(id);
        StallReason::RobFull
    })
}

/// Resolves one source register to a value or the tag that will produce it.
///
/// No register means the operand is unused and reads as zero.
fn rename_source(engine: &TomasuloEngine, reg: Option<usize>) -> Operand {
    let Some(reg) = reg else {
        return Operand::Ready(0);
    };
    match engine.status.producer(reg) {
        None => Operand::Ready(engine.regs.read(reg)),
        Some(tag) => match engine.rob.get(tag) {
            Some(entry) if entry.ready => Operand::Ready(entry.value),
            Some(_) => Operand::PendingOn(tag),
            None => {
                warn!(reg, rob = tag.0, "issue: dangling producer, reading register file");
                Operand::Ready(engine.regs.read(reg))
            }
        },
    }
}
