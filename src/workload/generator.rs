//! Seeded synthetic workload generator.
//!
//! Produces reproducible streams of spawn and delay events. Every
//! process starts and ends with a CPU burst, so burst lists always have
//! odd length.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::WorkloadEvent;
use crate::validation::MAX_DURATION;

/// Synthetic workload parameters. Ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// RNG seed; the same seed yields the same workload.
    pub seed: u64,
    /// Number of spawn events.
    pub processes: usize,
    /// Priority range.
    pub priority_range: (i32, i32),
    /// Upper bound on CPU bursts per process.
    pub max_cpu_bursts: usize,
    /// Burst duration range.
    pub burst_range: (u64, u64),
    /// Chance of an idle gap before each spawn (0.0..=1.0).
    pub delay_probability: f64,
    /// Idle gap range.
    pub delay_range: (u64, u64),
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            seed: 0,
            processes: 10,
            priority_range: (1, 10),
            max_cpu_bursts: 3,
            burst_range: (1, 20),
            delay_probability: 0.3,
            delay_range: (1, 30),
        }
    }
}

impl WorkloadGenerator {
    /// Creates a generator with default parameters and the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Sets the number of spawn events.
    pub fn with_processes(mut self, processes: usize) -> Self {
        self.processes = processes;
        self
    }

    /// Sets the inclusive priority range.
    pub fn with_priority_range(mut self, low: i32, high: i32) -> Self {
        self.priority_range = (low, high);
        self
    }

    /// Sets the upper bound on CPU bursts per process.
    pub fn with_max_cpu_bursts(mut self, max: usize) -> Self {
        self.max_cpu_bursts = max;
        self
    }

    /// Sets the inclusive burst duration range.
    pub fn with_burst_range(mut self, low: u64, high: u64) -> Self {
        self.burst_range = (low, high);
        self
    }

    /// Sets the idle gap probability and its inclusive duration range.
    pub fn with_delays(mut self, probability: f64, low: u64, high: u64) -> Self {
        self.delay_probability = probability;
        self.delay_range = (low, high);
        self
    }

    /// Generates the event list.
    pub fn generate(&self) -> Vec<WorkloadEvent> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (prio_lo, prio_hi) = ordered(self.priority_range);
        let (burst_lo, burst_hi) = ordered(bounded(self.burst_range));
        let (delay_lo, delay_hi) = ordered(bounded(self.delay_range));
        let delay_p = self.delay_probability.clamp(0.0, 1.0);
        let max_cpu = self.max_cpu_bursts.max(1);

        let mut events = Vec::with_capacity(self.processes * 2);
        for _ in 0..self.processes {
            if rng.random_bool(delay_p) {
                events.push(WorkloadEvent::delay(rng.random_range(delay_lo..=delay_hi)));
            }
            let cpu_bursts = rng.random_range(1..=max_cpu);
            let bursts: Vec<u64> = (0..cpu_bursts * 2 - 1)
                .map(|_| rng.random_range(burst_lo..=burst_hi))
                .collect();
            events.push(WorkloadEvent::spawn(rng.random_range(prio_lo..=prio_hi), bursts));
        }
        events
    }
}

fn bounded((a, b): (u64, u64)) -> (u64, u64) {
    (a.clamp(1, MAX_DURATION), b.clamp(1, MAX_DURATION))
}

fn ordered<T: PartialOrd>((a, b): (T, T)) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_event;

    fn all_valid(events: &[WorkloadEvent]) -> bool {
        events.iter().all(|e| validate_event(e).is_ok())
    }

    #[test]
    fn test_same_seed_same_workload() {
        let a = WorkloadGenerator::new(42).generate();
        let b = WorkloadGenerator::new(42).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_process_count_and_shape() {
        let events = WorkloadGenerator::new(7)
            .with_processes(50)
            .with_max_cpu_bursts(4)
            .with_burst_range(2, 9)
            .generate();

        let spawns: Vec<&WorkloadEvent> = events.iter().filter(|e| e.is_spawn()).collect();
        assert_eq!(spawns.len(), 50);
        for ev in spawns {
            if let WorkloadEvent::Spawn { bursts, priority } = ev {
                assert_eq!(bursts.len() % 2, 1);
                assert!(bursts.len() <= 7);
                assert!(bursts.iter().all(|&b| (2..=9).contains(&b)));
                assert!((1..=10).contains(priority));
            }
        }
        assert!(all_valid(&events));
    }

    #[test]
    fn test_no_delays_when_disabled() {
        let events = WorkloadGenerator::new(3).with_delays(0.0, 1, 5).generate();
        assert!(events.iter().all(WorkloadEvent::is_spawn));
    }

    #[test]
    fn test_degenerate_ranges_are_normalized() {
        let events = WorkloadGenerator::new(1)
            .with_processes(5)
            .with_priority_range(4, -4)
            .with_burst_range(0, 0)
            .with_max_cpu_bursts(0)
            .generate();
        assert!(all_valid(&events));
        assert_eq!(events.iter().filter(|e| e.is_spawn()).count(), 5);
    }

    #[test]
    fn test_huge_ranges_stay_within_bounds() {
        let events = WorkloadGenerator::new(11)
            .with_processes(20)
            .with_burst_range(u64::MAX, 1)
            .with_delays(1.0, u64::MAX, u64::MAX)
            .generate();
        assert!(all_valid(&events));
        assert!(events.contains(&WorkloadEvent::delay(MAX_DURATION)));
    }

    #[test]
    fn test_config_json() {
        let gen = WorkloadGenerator::new(9).with_processes(2);
        let json = serde_json::to_string(&gen).unwrap();
        let back: WorkloadGenerator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, gen);
    }
}
