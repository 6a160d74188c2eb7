//! CPU scheduling simulator.
//!
//! Simulates a stream of processes, each an alternating sequence of CPU
//! and I/O bursts, dispatched onto a single CPU by one of four classical
//! policies, and reports utilization, throughput, turnaround and waiting
//! time.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `BurstKind`, `WorkloadEvent`
//! - **`queue`**: Blocking process queue shared between two roles
//! - **`policy`**: `SchedulingPolicy` trait with FIFO, SJF, PR and RR
//! - **`simulation`**: Feeder, CPU dispatcher and I/O handler threads
//! - **`metrics`**: Counters, derived metrics and the run trace
//! - **`workload`**: Text workload parser and synthetic generator
//! - **`validation`**: Event integrity checks (empty or zero-length bursts)
//!
//! # Time
//!
//! All durations are logical time units. The clock advances only by
//! simulated bursts and explicit delays; a configurable tick controls how
//! long each unit is actually slept.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod error;
pub mod metrics;
pub mod models;
pub mod policy;
pub mod queue;
pub mod simulation;
pub mod validation;
pub mod workload;

pub use error::{ConfigError, SimulationError, WorkloadError};
pub use metrics::{Metrics, SimulationReport};
pub use policy::PolicyKind;
pub use simulation::{Simulation, SimulationConfig};
