//! Process control block.
//!
//! A process is an ordered sequence of bursts alternating between CPU
//! and I/O demand, always starting with a CPU burst. The record is owned
//! by exactly one party at a time: a queue, or the role currently
//! simulating its burst.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Kind of demand a burst places on the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstKind {
    /// CPU burst (even positions).
    Cpu,
    /// I/O burst (odd positions).
    Io,
}

impl BurstKind {
    /// Kind of the burst at position `index`.
    #[inline]
    pub fn at(index: usize) -> Self {
        if index % 2 == 0 {
            BurstKind::Cpu
        } else {
            BurstKind::Io
        }
    }
}

/// Process control block.
///
/// All times are logical clock units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    /// Sequential identifier assigned at arrival.
    pub pid: u64,
    /// Static priority (higher = more urgent).
    pub priority: i32,
    /// Remaining duration per burst. Only the current entry is ever reduced.
    bursts: Vec<u64>,
    /// Cursor into `bursts`.
    current: usize,
    /// Clock value when the process arrived.
    pub arrival_time: u64,
    /// Total time spent in the ready queue so far.
    pub waiting_time: u64,
    /// Clock value stamped when the process last entered the ready queue.
    pub(crate) ready_since: Option<u64>,
}

impl Process {
    /// Creates a process arriving at `arrival_time`.
    pub fn new(pid: u64, priority: i32, bursts: Vec<u64>, arrival_time: u64) -> Self {
        Self {
            pid,
            priority,
            bursts,
            current: 0,
            arrival_time,
            waiting_time: 0,
            ready_since: None,
        }
    }

    /// Remaining duration of the current burst, `None` once finished.
    #[inline]
    pub fn current_burst(&self) -> Option<u64> {
        self.bursts.get(self.current).copied()
    }

    /// Kind of the current burst, `None` once finished.
    pub fn current_kind(&self) -> Option<BurstKind> {
        (!self.is_finished()).then(|| BurstKind::at(self.current))
    }

    /// Index of the current burst.
    pub fn burst_index(&self) -> usize {
        self.current
    }

    /// Number of bursts the process was created with.
    pub fn burst_count(&self) -> usize {
        self.bursts.len()
    }

    /// Whether every burst has completed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current >= self.bursts.len()
    }

    /// Marks the current burst complete and moves the cursor forward.
    pub fn complete_burst(&mut self) {
        if !self.is_finished() {
            self.current += 1;
        }
    }

    /// Consumes `units` of the current burst without completing it.
    ///
    /// Used by preemptive policies. Never drops the burst below one unit;
    /// a slice that would exhaust the burst must go through
    /// [`complete_burst`](Self::complete_burst) instead.
    pub fn consume(&mut self, units: u64) {
        if let Some(remaining) = self.bursts.get_mut(self.current) {
            *remaining = remaining.saturating_sub(units).max(1);
        }
    }
}
