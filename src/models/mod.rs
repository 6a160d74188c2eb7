//! Simulation domain models.
//!
//! Provides the process control block and the workload events that
//! introduce processes into a simulation.
//!
//! # Domain Mappings
//!
//! | u-procsched | Operating system | Workload file |
//! |-------------|------------------|---------------|
//! | Process | PCB | `proc` line |
//! | Burst | CPU or I/O interval | burst list entry |
//! | Delay | idle arrival gap | `sleep` line |

mod event;
mod process;

pub use event::WorkloadEvent;
pub use process::{BurstKind, Process};
