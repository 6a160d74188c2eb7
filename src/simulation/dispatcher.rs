//! CPU dispatcher.
//!
//! Runs one policy until the ready queue is exhausted. Every iteration
//! selects a process, simulates a CPU slice, then either puts a preempted
//! process back on the ready queue or routes it onward.

use log::debug;

use super::Runtime;
use crate::metrics::TraceKind;
use crate::models::BurstKind;
use crate::policy::SchedulingPolicy;

pub(crate) fn run(rt: &Runtime, policy: &dyn SchedulingPolicy) {
    while let Some(mut process) = policy.select(&rt.ready) {
        let Some(remaining) = process.current_burst() else {
            rt.finalize(process);
            continue;
        };
        debug_assert_eq!(process.current_kind(), Some(BurstKind::Cpu));
        let slice = policy.time_slice(remaining).min(remaining).max(1);

        rt.ctx.record(process.pid, TraceKind::Dispatched { slice });
        debug!(
            "running process {} (priority {}) burst {} for {} of {}",
            process.pid, process.priority, process.burst_index(), slice, remaining
        );
        rt.ctx.simulate(slice);
        rt.ctx.run_cpu(slice);

        if slice < remaining {
            process.consume(slice);
            rt.ctx.record(
                process.pid,
                TraceKind::Preempted {
                    remaining: remaining - slice,
                },
            );
            rt.ready.enqueue(process);
        } else {
            process.complete_burst();
            rt.route(process, &rt.io);
        }
    }
    debug!("{} dispatcher done", policy.name());
}
