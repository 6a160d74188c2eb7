//! Blocking process queue shared between two roles.
//!
//! A monitor (mutex + condition variable) around an ordered sequence of
//! processes. Every structural change happens under the lock; blocked
//! consumers release the lock while suspended.
//!
//! A queue is either *open* or *closed*. Consumers block while an open
//! queue is empty; a closed, empty queue answers `None` immediately so
//! callers can tell permanent exhaustion from a momentary gap.
//!
//! When built with a wait clock, the queue also measures how long each
//! process sat in it: the clock is stamped on insertion and the elapsed
//! time is added to [`Process::waiting_time`] on removal.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::models::Process;

/// Source of the current logical time.
pub trait Clock: Send + Sync {
    /// Current logical time.
    fn now(&self) -> u64;
}

#[derive(Debug, Default)]
struct QueueState {
    items: VecDeque<Process>,
    closed: bool,
}

/// Blocking FIFO of processes with predicate-based removal.
pub struct SyncQueue {
    name: &'static str,
    state: Mutex<QueueState>,
    available: Condvar,
    wait_clock: Option<Arc<dyn Clock>>,
}

impl SyncQueue {
    /// Creates a queue that does not track waiting time.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(QueueState::default()),
            available: Condvar::new(),
            wait_clock: None,
        }
    }

    /// Creates a queue that charges residence time to each process.
    pub fn with_wait_clock(name: &'static str, clock: Arc<dyn Clock>) -> Self {
        Self {
            wait_clock: Some(clock),
            ..Self::new(name)
        }
    }

    /// Queue name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Appends a process at the tail and wakes one waiter.
    pub fn enqueue(&self, mut process: Process) {
        let mut state = self.state.lock();
        self.stamp(&mut process);
        state.items.push_back(process);
        self.available.notify_one();
    }

    /// Appends several processes atomically, preserving their order.
    ///
    /// Consumers observe either none or all of them.
    pub fn enqueue_all(&self, processes: impl IntoIterator<Item = Process>) {
        let mut state = self.state.lock();
        let before = state.items.len();
        for mut p in processes {
            self.stamp(&mut p);
            state.items.push_back(p);
        }
        if state.items.len() > before {
            self.available.notify_all();
        }
    }

    /// Removes the head, blocking while the queue is open and empty.
    ///
    /// Returns `None` only once the queue is closed and drained.
    pub fn dequeue(&self) -> Option<Process> {
        let mut state = self.state.lock();
        while state.items.is_empty() && !state.closed {
            self.available.wait(&mut state);
        }
        let mut process = state.items.pop_front()?;
        drop(state);
        self.settle(&mut process);
        Some(process)
    }

    /// Removes the best process under `better`, blocking like [`dequeue`](Self::dequeue).
    ///
    /// `better(candidate, best)` returns true when `candidate` should
    /// replace the current best. The scan visits items in queue order and
    /// only replaces on a strict improvement, so the first of several
    /// equally good processes wins.
    pub fn remove_best<F>(&self, better: F) -> Option<Process>
    where
        F: Fn(&Process, &Process) -> bool,
    {
        let mut state = self.state.lock();
        while state.items.is_empty() && !state.closed {
            self.available.wait(&mut state);
        }
        let idx = best_index(&state.items, &better)?;
        let mut process = state.items.remove(idx)?;
        drop(state);
        self.settle(&mut process);
        Some(process)
    }

    /// Non-blocking variant of [`remove_best`](Self::remove_best).
    pub fn try_remove_best<F>(&self, better: F) -> Option<Process>
    where
        F: Fn(&Process, &Process) -> bool,
    {
        let mut state = self.state.lock();
        let idx = best_index(&state.items, &better)?;
        let mut process = state.items.remove(idx)?;
        drop(state);
        self.settle(&mut process);
        Some(process)
    }

    /// Marks the queue permanently exhausted and wakes every waiter.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.available.notify_all();
    }

    /// Number of queued processes.
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Whether no process is queued.
    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    fn stamp(&self, process: &mut Process) {
        if let Some(clock) = &self.wait_clock {
            process.ready_since = Some(clock.now());
        }
    }

    fn settle(&self, process: &mut Process) {
        if let (Some(clock), Some(since)) = (&self.wait_clock, process.ready_since.take()) {
            let waited = clock.now().saturating_sub(since);
            process.waiting_time = process.waiting_time.saturating_add(waited);
        }
    }
}

impl std::fmt::Debug for SyncQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SyncQueue")
            .field("name", &self.name)
            .field("len", &state.items.len())
            .field("closed", &state.closed)
            .finish()
    }
}

fn best_index<F>(items: &VecDeque<Process>, better: &F) -> Option<usize>
where
    F: Fn(&Process, &Process) -> bool,
{
    let mut best: Option<usize> = None;
    for (i, candidate) in items.iter().enumerate() {
        match best {
            Some(b) if !better(candidate, &items[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    struct ManualClock(AtomicU64);

    impl ManualClock {
        fn set(&self, t: u64) {
            self.0.store(t, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn pcb(pid: u64, priority: i32, bursts: &[u64]) -> Process {
        Process::new(pid, priority, bursts.to_vec(), 0)
    }

    #[test]
    fn test_fifo_order() {
        let q = SyncQueue::new("ready");
        q.enqueue(pcb(1, 0, &[3]));
        q.enqueue(pcb(2, 0, &[1]));
        q.enqueue(pcb(3, 0, &[2]));
        q.close();

        let order: Vec<u64> = std::iter::from_fn(|| q.dequeue()).map(|p| p.pid).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_closed_empty_returns_none() {
        let q = SyncQueue::new("io");
        q.close();
        assert!(q.dequeue().is_none());
        assert!(q.remove_best(|_, _| true).is_none());
        assert!(q.try_remove_best(|_, _| true).is_none());
    }

    #[test]
    fn test_closed_queue_still_drains() {
        let q = SyncQueue::new("io");
        q.enqueue(pcb(1, 0, &[1]));
        q.close();
        assert_eq!(q.dequeue().map(|p| p.pid), Some(1));
        assert!(q.dequeue().is_none());
    }

    #[test]
    fn test_remove_best_minimum_burst() {
        let q = SyncQueue::new("ready");
        q.enqueue(pcb(1, 0, &[7]));
        q.enqueue(pcb(2, 0, &[2]));
        q.enqueue(pcb(3, 0, &[5]));

        let shortest = |c: &Process, b: &Process| c.current_burst() < b.current_burst();
        assert_eq!(q.try_remove_best(shortest).map(|p| p.pid), Some(2));
        assert_eq!(q.try_remove_best(shortest).map(|p| p.pid), Some(3));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_remove_best_first_wins_on_tie() {
        let q = SyncQueue::new("ready");
        q.enqueue(pcb(1, 1, &[1]));
        q.enqueue(pcb(2, 5, &[1]));
        q.enqueue(pcb(3, 5, &[1]));

        let highest = |c: &Process, b: &Process| c.priority > b.priority;
        assert_eq!(q.try_remove_best(highest).map(|p| p.pid), Some(2));
        assert_eq!(q.try_remove_best(highest).map(|p| p.pid), Some(3));
        assert_eq!(q.try_remove_best(highest).map(|p| p.pid), Some(1));
        assert!(q.try_remove_best(highest).is_none());
    }

    #[test]
    fn test_waiting_time_accumulates_across_visits() {
        let clock = Arc::new(ManualClock::default());
        let q = SyncQueue::with_wait_clock("ready", clock.clone());

        q.enqueue(pcb(1, 0, &[1]));
        clock.set(4);
        let p = q.dequeue().unwrap();
        assert_eq!(p.waiting_time, 4);

        clock.set(10);
        q.enqueue(p);
        clock.set(13);
        let p = q.dequeue().unwrap();
        assert_eq!(p.waiting_time, 7);
    }

    #[test]
    fn test_untracked_queue_leaves_waiting_time() {
        let q = SyncQueue::new("io");
        q.enqueue(pcb(1, 0, &[1]));
        assert_eq!(q.dequeue().unwrap().waiting_time, 0);
    }

    #[test]
    fn test_blocked_consumer_woken_by_enqueue() {
        let q = Arc::new(SyncQueue::new("ready"));
        let consumer = {
            let q = Arc::clone(&q);
            thread::spawn(move || q.dequeue().map(|p| p.pid))
        };
        thread::sleep(Duration::from_millis(20));
        q.enqueue(pcb(9, 0, &[1]));
        assert_eq!(consumer.join().unwrap(), Some(9));
    }

    #[test]
    fn test_blocked_consumer_woken_by_close() {
        let q = Arc::new(SyncQueue::new("ready"));
        let consumers: Vec<_> = (0..2)
            .map(|_| {
                let q = Arc::clone(&q);
                thread::spawn(move || q.remove_best(|_, _| false).is_none())
            })
            .collect();
        thread::sleep(Duration::from_millis(20));
        q.close();
        for c in consumers {
            assert!(c.join().unwrap());
        }
    }

    #[test]
    fn test_enqueue_all_is_atomic_and_ordered() {
        let q = SyncQueue::new("ready");
        q.enqueue_all(vec![pcb(1, 0, &[1]), pcb(2, 0, &[1])]);
        assert_eq!(q.len(), 2);
        assert_eq!(q.dequeue().map(|p| p.pid), Some(1));
        assert_eq!(q.dequeue().map(|p| p.pid), Some(2));
        assert!(q.is_empty());
    }
}
