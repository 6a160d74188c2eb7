//! I/O completion handler.

use log::debug;

use super::Runtime;
use crate::metrics::TraceKind;
use crate::models::BurstKind;

/// Serves I/O bursts in arrival order until the I/O queue is exhausted.
pub(crate) fn run(rt: &Runtime) {
    while let Some(mut process) = rt.io.dequeue() {
        let Some(duration) = process.current_burst() else {
            rt.finalize(process);
            continue;
        };
        debug_assert_eq!(process.current_kind(), Some(BurstKind::Io));

        rt.ctx.record(process.pid, TraceKind::IoStarted { duration });
        rt.ctx.simulate(duration);
        rt.ctx.advance(duration);
        debug!("process {} completed I/O of {}", process.pid, duration);

        process.complete_burst();
        rt.route(process, &rt.ready);
    }
    debug!("io handler done");
}
