//! Workload sources.
//!
//! - **`parser`**: the line-oriented text format (`proc`, `sleep`, `stop`)
//! - **`generator`**: seeded synthetic workloads
//!
//! Both produce [`WorkloadEvent`](crate::models::WorkloadEvent)s that can
//! be handed straight to [`Simulation::run`](crate::simulation::Simulation::run).

mod generator;
mod parser;

pub use generator::WorkloadGenerator;
pub use parser::{parse_line, parse_str, parse_workload, WorkloadLines};
