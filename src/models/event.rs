//! Workload events consumed by the arrival feeder.

use serde::{Deserialize, Serialize};

/// One entry of a workload stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkloadEvent {
    /// A new process arrives with the given priority and burst list.
    Spawn {
        /// Static priority (higher = more urgent).
        priority: i32,
        /// Alternating CPU/I/O bursts, starting with CPU.
        bursts: Vec<u64>,
    },
    /// No arrivals for `duration` time units.
    Delay {
        /// Idle period length.
        duration: u64,
    },
    /// Ends the stream early.
    Stop,
}

impl WorkloadEvent {
    /// Creates a spawn event.
    pub fn spawn(priority: i32, bursts: impl Into<Vec<u64>>) -> Self {
        WorkloadEvent::Spawn {
            priority,
            bursts: bursts.into(),
        }
    }

    /// Creates a delay event.
    pub fn delay(duration: u64) -> Self {
        WorkloadEvent::Delay { duration }
    }

    /// Whether this event introduces a process.
    pub fn is_spawn(&self) -> bool {
        matches!(self, WorkloadEvent::Spawn { .. })
    }
}
