//! Writeback stage.
//!
//! Every station whose result was computed in an earlier cycle broadcasts
//! it: waiting operands tagged with its ROB index capture the value, the ROB
//! entry becomes ready, and the station is freed.

use tracing::trace;

use crate::core::pipeline::engine::TomasuloEngine;
use crate::core::pipeline::station::StationState;

/// Runs the writeback stage for one cycle.
pub fn writeback_stage(engine: &mut TomasuloEngine) {
    let done: Vec<usize> = engine
        .stations
        .iter()
        .filter(|(_, st)| st.state == StationState::WrittenBack)
        .map(|(id, _)| id)
        .collect();

    for id in done {
        let Some(st) = engine.stations.release(id) else {
            continue;
        };
        let woken = engine.stations.broadcast(st.dest, st.result);
        engine.rob.mark_ready(st.dest, st.result, st.mem_addr);
        trace!(rob = st.dest.0, value = st.result, woken, "writeback");
    }
}
