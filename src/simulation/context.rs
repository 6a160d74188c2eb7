//! Shared simulation state.
//!
//! The logical clock, the metric counters, the live-process count and the
//! trace all sit behind one dedicated lock, so clock advances from the CPU
//! dispatcher and the I/O handler never interleave.

use std::thread;
use std::time::Duration;

use log::info;
use parking_lot::Mutex;

use crate::metrics::{Completion, Metrics, SimulationReport, TraceEvent, TraceKind};
use crate::models::Process;
use crate::queue::Clock;

#[derive(Debug, Default)]
struct Ledger {
    clock: u64,
    metrics: Metrics,
    next_pid: u64,
    /// Admitted but not yet finalized.
    live: usize,
    feed_complete: bool,
    completions: Vec<Completion>,
    trace: Vec<TraceEvent>,
}

impl Ledger {
    fn exhausted(&self) -> bool {
        self.feed_complete && self.live == 0
    }

    fn record(&mut self, pid: u64, kind: TraceKind) {
        self.trace.push(TraceEvent {
            time: self.clock,
            pid,
            kind,
        });
    }
}

/// Runtime state shared by the feeder, the dispatcher and the I/O handler.
#[derive(Debug)]
pub struct SimulationContext {
    ledger: Mutex<Ledger>,
    tick: Duration,
}

impl SimulationContext {
    /// Creates a context at time zero.
    ///
    /// `tick` is how long one logical time unit is felt by the thread
    /// simulating it. `Duration::ZERO` disables sleeping.
    pub fn new(tick: Duration) -> Self {
        Self {
            ledger: Mutex::new(Ledger::default()),
            tick,
        }
    }

    /// Current logical time.
    pub fn now(&self) -> u64 {
        self.ledger.lock().clock
    }

    /// Suspends the calling thread for `units` logical time units.
    pub fn simulate(&self, units: u64) {
        if self.tick.is_zero() || units == 0 {
            return;
        }
        let units = u32::try_from(units).unwrap_or(u32::MAX);
        thread::sleep(self.tick.saturating_mul(units));
    }

    /// Creates a process arriving now and counts it as live.
    pub(crate) fn admit(&self, priority: i32, bursts: Vec<u64>) -> Process {
        let mut ledger = self.ledger.lock();
        ledger.next_pid += 1;
        ledger.live += 1;
        let pid = ledger.next_pid;
        let process = Process::new(pid, priority, bursts, ledger.clock);
        ledger.record(pid, TraceKind::Arrived);
        process
    }

    /// Advances the clock by `units` without charging the CPU. Returns the new time.
    pub(crate) fn advance(&self, units: u64) -> u64 {
        let mut ledger = self.ledger.lock();
        ledger.clock = ledger.clock.saturating_add(units);
        ledger.clock
    }

    /// Advances the clock and the CPU busy time by `units`. Returns the new time.
    pub(crate) fn run_cpu(&self, units: u64) -> u64 {
        let mut ledger = self.ledger.lock();
        ledger.clock = ledger.clock.saturating_add(units);
        ledger.metrics.busy_time = ledger.metrics.busy_time.saturating_add(units);
        ledger.clock
    }

    /// Appends a trace entry stamped with the current time.
    pub(crate) fn record(&self, pid: u64, kind: TraceKind) {
        self.ledger.lock().record(pid, kind);
    }

    /// Folds a finished process into the metrics and releases it.
    ///
    /// Returns true when this was the last live process after the feed
    /// completed, i.e. the simulation is now exhausted.
    pub(crate) fn finalize(&self, process: Process) -> bool {
        let mut ledger = self.ledger.lock();
        let finish_time = ledger.clock;
        let turnaround_time = finish_time.saturating_sub(process.arrival_time);

        let metrics = &mut ledger.metrics;
        metrics.total_turnaround = metrics.total_turnaround.saturating_add(turnaround_time);
        metrics.total_waiting = metrics.total_waiting.saturating_add(process.waiting_time);
        ledger.metrics.completed += 1;
        ledger.live = ledger.live.saturating_sub(1);
        ledger.record(process.pid, TraceKind::Finished);
        ledger.completions.push(Completion {
            pid: process.pid,
            priority: process.priority,
            arrival_time: process.arrival_time,
            finish_time,
            turnaround_time,
            waiting_time: process.waiting_time,
        });

        info!(
            "process {} (priority {}) finished at t={} turnaround={} waiting={}",
            process.pid, process.priority, finish_time, turnaround_time, process.waiting_time
        );
        ledger.exhausted()
    }

    /// Marks the arrival stream as exhausted.
    ///
    /// Returns true when no process is live, i.e. the simulation is
    /// already exhausted.
    pub(crate) fn complete_feed(&self) -> bool {
        let mut ledger = self.ledger.lock();
        ledger.feed_complete = true;
        ledger.exhausted()
    }

    /// Builds the final report, draining completions and trace.
    pub(crate) fn take_report(&self, policy: &str) -> SimulationReport {
        let mut ledger = self.ledger.lock();
        SimulationReport {
            policy: policy.to_string(),
            metrics: Metrics {
                current_time: ledger.clock,
                ..ledger.metrics
            },
            completions: std::mem::take(&mut ledger.completions),
            trace: std::mem::take(&mut ledger.trace),
        }
    }
}

impl Clock for SimulationContext {
    fn now(&self) -> u64 {
        SimulationContext::now(self)
    }
}
