//! Execute stage.
//!
//! Walks busy stations oldest-first by ROB age and advances each one:
//! 1. **Start:** An `Issued` station with both operands claims a free slot of
//!    its unit kind and loads the unit latency into its countdown. Loads
//!    additionally wait until no older store remains in the ROB; `ecall`
//!    waits until it is the ROB head.
//! 2. **Count down:** An `Executing` station with a non-zero countdown
//!    decrements it and waits.
//! 3. **Complete:** At zero the result is computed, the unit slot is
//!    released and the station becomes `WrittenBack`. Branches and jumps
//!    redirect the PC here.
//!
//! A station may start and complete in the same cycle when its latency is 0.

use tracing::{debug, trace};

use crate::common::error::SimError;
use crate::core::pipeline::engine::{Host, SyscallOutcome, TomasuloEngine};
use crate::core::pipeline::signals::MemWidth;
use crate::core::pipeline::station::{ReservationStation, StationState};
use crate::core::pipeline::units::FuKind;
use crate::core::units::alu::{Alu, alu_form};
use crate::core::units::{bru, lsu};
use crate::isa::decode::DecodedInst;
use crate::isa::kind::InstKind;

/// Computed outcome of one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Completion {
    value: u64,
    mem_addr: u64,
    redirect: Option<u64>,
    exit: Option<i32>,
}

/// Runs the execute stage for one cycle.
///
/// Returns the exit status if an exit system call ran.
///
/// # Errors
///
/// [`SimError::MemoryOutOfRange`] for a load outside memory, or any error
/// raised by a system call.
pub fn execute_stage(
    engine: &mut TomasuloEngine,
    host: &mut dyn Host,
) -> Result<Option<i32>, SimError> {
    let mut order: Vec<(usize, usize)> = engine
        .stations
        .iter()
        .filter(|(_, st)| st.state != StationState::WrittenBack)
        .map(|(id, st)| (engine.rob.age(st.dest), id))
        .collect();
    order.sort_unstable();

    for (_, id) in order {
        if let Some(code) = step(engine, host, id)? {
            return Ok(Some(code));
        }
    }
    Ok(None)
}

fn step(
    engine: &mut TomasuloEngine,
    host: &mut dyn Host,
    id: usize,
) -> Result<Option<i32>, SimError> {
    let Some(st) = engine.stations.get(id) else {
        return Ok(None);
    };
    let dest = st.dest;
    let kind = st.inst.kind;

    if st.state == StationState::Issued {
        if st.operands().is_none() {
            return Ok(None);
        }
        if kind.is_load() && !lsu::ordering::load_may_proceed(&engine.rob, dest) {
            engine.stats.stalls_mem += 1;
            return Ok(None);
        }
        if kind == InstKind::Ecall && engine.rob.head() != dest {
            return Ok(None);
        }
        let fu = FuKind::for_kind(kind);
        let Some(unit) = engine.units.acquire(fu) else {
            return Ok(None);
        };
        let latency = engine.latencies.of(fu);
        if let Some(st) = engine.stations.get_mut(id) {
            st.unit = Some(unit);
            st.remaining = latency;
            st.state = StationState::Executing;
        }
        trace!(rob = dest.0, ?fu, latency, "execute: start");
    }

    let Some(st) = engine.stations.get_mut(id) else {
        return Ok(None);
    };
    if st.remaining > 0 {
        st.remaining -= 1;
        return Ok(None);
    }
    let Some((a, b)) = st.operands() else {
        return Ok(None);
    };
    let inst = st.inst.clone();

    let done = compute(host, &inst, a, b)?;

    if let Some(target) = done.redirect {
        debug!(
            pc = format_args!("{:#x}", inst.pc),
            target = format_args!("{target:#x}"),
            "execute: redirect"
        );
        engine.pc = target;
    }
    if let Some(st) = engine.stations.get_mut(id) {
        finish(st, done);
        if let Some(unit) = st.unit.take() {
            engine.units.release(unit);
        }
    }
    if let Some(code) = done.exit {
        engine.stats.record_retired(kind);
        return Ok(Some(code));
    }
    Ok(None)
}

const fn finish(st: &mut ReservationStation, done: Completion) {
    st.result = done.value;
    st.mem_addr = done.mem_addr;
    st.state = StationState::WrittenBack;
}

/// Computes the result of `inst` on operand values `a` (rs1) and `b` (rs2).
fn compute(
    host: &mut dyn Host,
    inst: &DecodedInst,
    a: u64,
    b: u64,
) -> Result<Completion, SimError> {
    let kind = inst.kind;
    let mut done = Completion::default();

    if let Some(form) = alu_form(kind) {
        let rhs = if form.uses_imm { inst.imm as u64 } else { b };
        done.value = Alu::execute(form.op, a, rhs, form.is32);
        return Ok(done);
    }

    match kind {
        InstKind::Lui => done.value = inst.imm as u64,
        InstKind::Auipc => done.value = inst.pc.wrapping_add_signed(inst.imm),
        InstKind::Ecall => match host.syscall(b, a, inst.pc)? {
            SyscallOutcome::Continue(a0) => done.value = a0,
            SyscallOutcome::Exit(code) => done.exit = Some(code),
        },
        _ if kind.is_control_flow() => {
            let res = bru::resolve(kind, inst.pc, a, b, inst.imm);
            done.value = res.link;
            done.redirect = res.target;
        }
        _ if kind.is_load() => {
            let width = inst.mem_width.unwrap_or(MemWidth::Double);
            let addr = lsu::effective_address(a, inst.imm);
            let raw = host.load(addr, width).map_err(|e| SimError::MemoryOutOfRange {
                addr: e.addr,
                pc: inst.pc,
            })?;
            done.value = lsu::extend_load(kind, width, raw);
            done.mem_addr = addr;
        }
        _ if kind.is_store() => {
            let width = inst.mem_width.unwrap_or(MemWidth::Double);
            done.mem_addr = lsu::effective_address(a, inst.imm);
            done.value = lsu::store_data(width, b);
        }
        _ => {}
    }
    Ok(done)
}
