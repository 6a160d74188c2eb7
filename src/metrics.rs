//! Simulation performance metrics.
//!
//! Counters are accumulated while the run is in progress and are only
//! read once every role has terminated.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | CPU utilization | busy_time / current_time |
//! | Throughput | completed / current_time |
//! | Avg turnaround | total_turnaround / completed |
//! | Avg waiting | total_waiting / completed |
//!
//! A derived metric whose denominator is zero is undefined and reported as
//! `None`.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

/// Raw counters of a simulation run. All times are logical units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Time the CPU spent running bursts.
    pub busy_time: u64,
    /// Number of finalized processes.
    pub completed: u64,
    /// Sum of turnaround times of finalized processes.
    pub total_turnaround: u64,
    /// Sum of ready-queue waiting times of finalized processes.
    pub total_waiting: u64,
    /// Final logical clock value.
    pub current_time: u64,
}

impl Metrics {
    /// Fraction of elapsed time the CPU was busy (0.0..=1.0).
    pub fn cpu_utilization(&self) -> Option<f64> {
        ratio(self.busy_time, self.current_time)
    }

    /// Completed processes per time unit.
    pub fn throughput(&self) -> Option<f64> {
        ratio(self.completed, self.current_time)
    }

    /// Mean turnaround time.
    pub fn avg_turnaround(&self) -> Option<f64> {
        ratio(self.total_turnaround, self.completed)
    }

    /// Mean ready-queue waiting time.
    pub fn avg_waiting(&self) -> Option<f64> {
        ratio(self.total_waiting, self.completed)
    }
}

fn ratio(num: u64, den: u64) -> Option<f64> {
    if den == 0 {
        None
    } else {
        Some(num as f64 / den as f64)
    }
}

/// A finalized process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Process identifier.
    pub pid: u64,
    /// Static priority the process ran with.
    pub priority: i32,
    /// Clock value at admission.
    pub arrival_time: u64,
    /// Clock value when the last burst completed.
    pub finish_time: u64,
    /// `finish_time - arrival_time`.
    pub turnaround_time: u64,
    /// Total time spent in the ready queue.
    pub waiting_time: u64,
}

/// What happened to a process at a point in logical time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceKind {
    /// Admitted into the ready queue by the feeder.
    Arrived,
    /// Selected by the dispatcher and granted `slice` units of CPU.
    Dispatched { slice: u64 },
    /// Returned to the ready queue with `remaining` units left in its burst.
    Preempted { remaining: u64 },
    /// I/O handler began an I/O burst.
    IoStarted { duration: u64 },
    /// Finalized.
    Finished,
}

/// Single trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Clock value when the event was recorded.
    pub time: u64,
    /// Process the event concerns.
    pub pid: u64,
    #[serde(flatten)]
    pub kind: TraceKind,
}

/// Everything a finished run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Name of the policy that ran (e.g. "RR").
    pub policy: String,
    pub metrics: Metrics,
    /// Finalized processes in finalization order.
    pub completions: Vec<Completion>,
    /// Recorded events in the order they happened.
    pub trace: Vec<TraceEvent>,
}

impl SimulationReport {
    /// Pids in the order the dispatcher first selected them.
    pub fn first_dispatch_order(&self) -> Vec<u64> {
        let mut seen = Vec::new();
        for ev in &self.trace {
            if matches!(ev.kind, TraceKind::Dispatched { .. }) && !seen.contains(&ev.pid) {
                seen.push(ev.pid);
            }
        }
        seen
    }

    /// Trace entries belonging to one process.
    pub fn trace_of(&self, pid: u64) -> Vec<TraceEvent> {
        self.trace.iter().filter(|e| e.pid == pid).copied().collect()
    }

    /// Completion record of one process.
    pub fn completion_of(&self, pid: u64) -> Option<&Completion> {
        self.completions.iter().find(|c| c.pid == pid)
    }
}
