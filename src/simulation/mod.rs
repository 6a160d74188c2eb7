//! Concurrent scheduling simulation.
//!
//! Three roles run on their own threads for the whole run:
//!
//! - **feeder**: admits processes from the workload stream into the ready queue
//! - **cpu**: runs one [`SchedulingPolicy`] against the ready queue
//! - **io**: serves I/O bursts and sends processes back to the ready queue
//!
//! ```text
//! feeder ──▶ ready ──▶ cpu ──▶ io ──▶ ready ...
//!                       │       │
//!                       └───────┴──▶ finalize (metrics)
//! ```
//!
//! The run ends when the workload is exhausted and every admitted process
//! has been finalized. At that point both queues are closed, which wakes
//! and releases the dispatcher and the I/O handler.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use u_procsched::models::WorkloadEvent;
//! use u_procsched::policy::PolicyKind;
//! use u_procsched::simulation::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::new(PolicyKind::RoundRobin { quantum: 5 })
//!     .with_tick(Duration::ZERO);
//! let sim = Simulation::new(config).unwrap();
//! let report = sim.run_events(vec![WorkloadEvent::spawn(1, [8])]).unwrap();
//! assert_eq!(report.metrics.busy_time, 8);
//! assert_eq!(report.metrics.completed, 1);
//! ```

mod context;
mod dispatcher;
mod feeder;
mod io;

pub use context::SimulationContext;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SimulationError, WorkloadError};
use crate::metrics::SimulationReport;
use crate::models::{Process, WorkloadEvent};
use crate::policy::{PolicyKind, SchedulingPolicy};
use crate::queue::SyncQueue;

/// Wall-clock length of one logical time unit unless configured otherwise.
pub const DEFAULT_TICK: Duration = Duration::from_millis(1);

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scheduling policy for the CPU dispatcher.
    pub policy: PolicyKind,
    /// Wall-clock duration of one logical time unit.
    pub tick: Duration,
}

impl SimulationConfig {
    /// Creates a configuration with the default tick.
    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            tick: DEFAULT_TICK,
        }
    }

    /// Sets the tick. `Duration::ZERO` runs without sleeping.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}

/// Queues and context shared by the three roles.
pub(crate) struct Runtime {
    pub(crate) ctx: Arc<SimulationContext>,
    pub(crate) ready: SyncQueue,
    pub(crate) io: SyncQueue,
}

impl Runtime {
    fn new(tick: Duration) -> Self {
        let ctx = Arc::new(SimulationContext::new(tick));
        Self {
            ready: SyncQueue::with_wait_clock("ready", ctx.clone()),
            io: SyncQueue::new("io"),
            ctx,
        }
    }

    /// Sends a process to `next`, or finalizes it if no bursts remain.
    pub(crate) fn route(&self, process: Process, next: &SyncQueue) {
        if process.is_finished() {
            self.finalize(process);
        } else {
            next.enqueue(process);
        }
    }

    pub(crate) fn finalize(&self, process: Process) {
        if self.ctx.finalize(process) {
            self.shutdown();
        }
    }

    /// Closes both queues, releasing every blocked role.
    pub(crate) fn shutdown(&self) {
        for queue in [&self.ready, &self.io] {
            debug!("closing {} queue with {} waiting", queue.name(), queue.len());
            queue.close();
        }
    }
}

struct ShutdownOnPanic<'a>(&'a Runtime);

impl Drop for ShutdownOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.shutdown();
        }
    }
}

/// A configured simulation, ready to run workloads.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    policy: Box<dyn SchedulingPolicy>,
}

impl Simulation {
    /// Validates the configuration and instantiates the policy.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.policy.validate()?;
        let policy = config.policy.build();
        Ok(Self { config, policy })
    }

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs a workload stream to exhaustion.
    ///
    /// `Err` items are logged and skipped, as are events failing
    /// [`validate_event`](crate::validation::validate_event). The stream
    /// is consumed on the feeder thread, so it may be produced lazily.
    ///
    /// Consecutive spawns form one arrival batch that reaches the ready
    /// queue only at the next delay, stop or end of stream. A lazy source
    /// that blocks between a spawn and the following line holds back that
    /// spawn's dispatch for as long as it blocks.
    pub fn run<I>(&self, events: I) -> Result<SimulationReport, SimulationError>
    where
        I: IntoIterator<Item = Result<WorkloadEvent, WorkloadError>>,
        I::IntoIter: Send,
    {
        let runtime = Runtime::new(self.config.tick);
        let rt = &runtime;
        let policy = self.policy.as_ref();
        let events = events.into_iter();

        info!(
            "starting {} simulation (tick {:?})",
            policy.description(),
            self.config.tick
        );

        thread::scope(|s| -> Result<(), SimulationError> {
            let cpu = spawn_role(s, rt, "cpu", move || dispatcher::run(rt, policy))?;
            let io = spawn_role(s, rt, "io", move || io::run(rt))?;
            let feeder = spawn_role(s, rt, "feeder", move || feeder::run(rt, events))?;

            let joined = [
                ("feeder", feeder.join()),
                ("cpu", cpu.join()),
                ("io", io.join()),
            ];
            for (role, result) in joined {
                if result.is_err() {
                    return Err(SimulationError::RolePanicked(role));
                }
            }
            Ok(())
        })?;

        let report = runtime.ctx.take_report(policy.name());
        info!(
            "simulation finished at t={} with {} processes completed",
            report.metrics.current_time, report.metrics.completed
        );
        Ok(report)
    }

    /// Runs an already-parsed list of events.
    pub fn run_events<I>(&self, events: I) -> Result<SimulationReport, SimulationError>
    where
        I: IntoIterator<Item = WorkloadEvent>,
        I::IntoIter: Send,
    {
        self.run(events.into_iter().map(Ok))
    }
}

fn spawn_role<'scope, 'env, F>(
    scope: &'scope thread::Scope<'scope, 'env>,
    rt: &'env Runtime,
    role: &'static str,
    f: F,
) -> Result<thread::ScopedJoinHandle<'scope, ()>, SimulationError>
where
    F: FnOnce() + Send + 'scope,
{
    thread::Builder::new()
        .name(role.to_string())
        .spawn_scoped(scope, move || {
            let _guard = ShutdownOnPanic(rt);
            f();
        })
        .map_err(|source| {
            rt.shutdown();
            SimulationError::Spawn { role, source }
        })
}
