//! Built-in scheduling policies.
//!
//! | Policy | Selection | Preemption |
//! |--------|-----------|------------|
//! | FIFO | queue order | none |
//! | SJF | minimum current burst | none |
//! | PR | maximum static priority | none |
//! | RR | queue order | after `quantum` units |
//!
//! Ties in SJF and PR go to the process closest to the head of the queue.
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

use super::SchedulingPolicy;
use crate::models::Process;
use crate::queue::SyncQueue;

/// First-In-First-Out (first-come, first-served).
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl SchedulingPolicy for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn select(&self, ready: &SyncQueue) -> Option<Process> {
        ready.dequeue()
    }

    fn description(&self) -> &'static str {
        "First-In-First-Out"
    }
}

/// Shortest burst first.
///
/// Picks the ready process whose *current* CPU burst is shortest. The
/// selected burst runs to completion; shorter arrivals only win at the
/// next selection point.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurstFirst;

impl ShortestBurstFirst {
    /// Whether `candidate` beats `best`.
    pub fn better(candidate: &Process, best: &Process) -> bool {
        candidate.current_burst() < best.current_burst()
    }
}

impl SchedulingPolicy for ShortestBurstFirst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn select(&self, ready: &SyncQueue) -> Option<Process> {
        ready.remove_best(Self::better)
    }

    fn description(&self) -> &'static str {
        "Shortest Burst First"
    }
}

/// Static priority, non-preemptive. Higher value runs first.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl Priority {
    /// Whether `candidate` beats `best`.
    pub fn better(candidate: &Process, best: &Process) -> bool {
        candidate.priority > best.priority
    }
}

impl SchedulingPolicy for Priority {
    fn name(&self) -> &'static str {
        "PR"
    }

    fn select(&self, ready: &SyncQueue) -> Option<Process> {
        ready.remove_best(Self::better)
    }

    fn description(&self) -> &'static str {
        "Static Priority"
    }
}

/// Round-robin with a fixed quantum.
///
/// A burst longer than the quantum runs for exactly `quantum` units and
/// the process goes back to the tail of the ready queue with the same
/// burst, shortened by the quantum.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    /// Maximum CPU time per dispatch. Always positive.
    pub quantum: u64,
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn select(&self, ready: &SyncQueue) -> Option<Process> {
        ready.dequeue()
    }

    fn time_slice(&self, remaining: u64) -> u64 {
        remaining.min(self.quantum)
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_with(entries: &[(u64, i32, u64)]) -> SyncQueue {
        let q = SyncQueue::new("ready");
        for &(pid, priority, burst) in entries {
            q.enqueue(Process::new(pid, priority, vec![burst], 0));
        }
        q.close();
        q
    }

    fn drain(policy: &dyn SchedulingPolicy, q: &SyncQueue) -> Vec<u64> {
        std::iter::from_fn(|| policy.select(q)).map(|p| p.pid).collect()
    }

    #[test]
    fn test_fifo_keeps_queue_order() {
        let q = ready_with(&[(1, 0, 9), (2, 9, 1), (3, 5, 4)]);
        assert_eq!(drain(&Fifo, &q), vec![1, 2, 3]);
    }

    #[test]
    fn test_sjf_orders_by_current_burst() {
        let q = ready_with(&[(1, 0, 9), (2, 0, 1), (3, 0, 4), (4, 0, 1)]);
        assert_eq!(drain(&ShortestBurstFirst, &q), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_sjf_uses_current_not_total_burst() {
        let q = SyncQueue::new("ready");
        let mut advanced = Process::new(1, 0, vec![10, 1, 2], 0);
        advanced.complete_burst();
        advanced.complete_burst();
        q.enqueue(Process::new(2, 0, vec![3], 0));
        q.enqueue(advanced);
        q.close();
        assert_eq!(drain(&ShortestBurstFirst, &q), vec![1, 2]);
    }

    #[test]
    fn test_priority_highest_first() {
        let q = ready_with(&[(1, 1, 3), (2, 5, 3), (3, 3, 3)]);
        assert_eq!(drain(&Priority, &q), vec![2, 3, 1]);
    }

    #[test]
    fn test_priority_negative_values() {
        let q = ready_with(&[(1, -4, 1), (2, -1, 1)]);
        assert_eq!(drain(&Priority, &q), vec![2, 1]);
    }

    #[test]
    fn test_round_robin_slice() {
        let rr = RoundRobin { quantum: 5 };
        assert_eq!(rr.time_slice(8), 5);
        assert_eq!(rr.time_slice(5), 5);
        assert_eq!(rr.time_slice(3), 3);
        assert_eq!(Fifo.time_slice(8), 8);
    }

    #[test]
    fn test_names() {
        assert_eq!(Fifo.name(), "FIFO");
        assert_eq!(ShortestBurstFirst.description(), "Shortest Burst First");
        assert_eq!(RoundRobin { quantum: 1 }.name(), "RR");
    }
}
