//! Arrival feeder.
//!
//! Turns the workload stream into processes on the ready queue. Spawns
//! with no delay between them arrive together and are published as one
//! batch. A batch is held until the next delay, stop or end of stream, so
//! a lazy source that stalls after a spawn also delays its dispatch. Bad
//! entries are logged and skipped.

use log::{debug, info, warn};

use super::Runtime;
use crate::error::WorkloadError;
use crate::models::{Process, WorkloadEvent};
use crate::validation::validate_event;

pub(crate) fn run<I>(rt: &Runtime, events: I)
where
    I: IntoIterator<Item = Result<WorkloadEvent, WorkloadError>>,
{
    let mut batch: Vec<Process> = Vec::new();

    for item in events {
        let event = match item {
            Ok(event) => event,
            Err(e) => {
                warn!("skipping workload entry: {e}");
                continue;
            }
        };
        if let Err(errors) = validate_event(&event) {
            for e in &errors {
                warn!("skipping invalid event: {e}");
            }
            continue;
        }

        match event {
            WorkloadEvent::Spawn { priority, bursts } => {
                let process = rt.ctx.admit(priority, bursts);
                info!(
                    "enqueued process {} with priority {} and {} bursts",
                    process.pid, priority, process.burst_count()
                );
                batch.push(process);
            }
            WorkloadEvent::Delay { duration } => {
                publish(rt, &mut batch);
                debug!("feeder idle for {duration}");
                rt.ctx.simulate(duration);
                rt.ctx.advance(duration);
            }
            WorkloadEvent::Stop => {
                info!("workload stopped");
                break;
            }
        }
    }

    publish(rt, &mut batch);
    if rt.ctx.complete_feed() {
        rt.shutdown();
    }
}

fn publish(rt: &Runtime, batch: &mut Vec<Process>) {
    if !batch.is_empty() {
        rt.ready.enqueue_all(batch.drain(..));
    }
}
