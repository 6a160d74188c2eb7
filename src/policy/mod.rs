//! CPU scheduling policies.
//!
//! A policy decides which ready process the dispatcher runs next and for
//! how long. Burst simulation, routing and finalization are shared by all
//! policies and live in the dispatcher.
//!
//! # Usage
//!
//! ```
//! use u_procsched::policy::{PolicyKind, SchedulingPolicy};
//!
//! let kind = PolicyKind::from_parts("RR", Some(5)).unwrap();
//! let policy = kind.build();
//! assert_eq!(policy.name(), "RR");
//! assert_eq!(policy.time_slice(8), 5);
//! ```

pub mod rules;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Process;
use crate::queue::SyncQueue;

pub use rules::{Fifo, Priority, RoundRobin, ShortestBurstFirst};

/// A CPU scheduling policy.
///
/// `select` blocks until a process is available and returns `None` only
/// once the ready queue is permanently exhausted.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Short identifier (e.g., "FIFO", "RR").
    fn name(&self) -> &'static str;

    /// Removes the next process to run from the ready queue.
    fn select(&self, ready: &SyncQueue) -> Option<Process>;

    /// CPU time granted for a burst with `remaining` units left.
    ///
    /// Returning less than `remaining` preempts the process after the
    /// slice. The default runs the burst to completion.
    fn time_slice(&self, remaining: u64) -> u64 {
        remaining
    }

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Policy selection, as supplied by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PolicyKind {
    /// First in, first out. Each burst runs to completion.
    Fifo,
    /// Shortest current burst first, non-preemptive.
    ShortestBurstFirst,
    /// Highest priority first, non-preemptive.
    Priority,
    /// Arrival order with preemption after `quantum` units.
    RoundRobin {
        /// Maximum slice length; must be positive.
        quantum: u64,
    },
}

impl PolicyKind {
    /// Builds a policy from an identifier and an optional quantum.
    ///
    /// Identifiers are `FIFO`, `SJF`, `PR` and `RR`, case-insensitive.
    /// The quantum is required (and must be positive) for `RR` and ignored
    /// otherwise.
    pub fn from_parts(name: &str, quantum: Option<u64>) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_uppercase().as_str() {
            "FIFO" | "FCFS" => Ok(PolicyKind::Fifo),
            "SJF" => Ok(PolicyKind::ShortestBurstFirst),
            "PR" => Ok(PolicyKind::Priority),
            "RR" => match quantum {
                None => Err(ConfigError::MissingQuantum),
                Some(0) => Err(ConfigError::ZeroQuantum),
                Some(q) => Ok(PolicyKind::RoundRobin { quantum: q }),
            },
            _ => Err(ConfigError::UnknownPolicy(name.to_string())),
        }
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            PolicyKind::RoundRobin { quantum: 0 } => Err(ConfigError::ZeroQuantum),
            _ => Ok(()),
        }
    }

    /// Short identifier.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::ShortestBurstFirst => "SJF",
            PolicyKind::Priority => "PR",
            PolicyKind::RoundRobin { .. } => "RR",
        }
    }

    /// Round-robin quantum, if any.
    pub fn quantum(&self) -> Option<u64> {
        match self {
            PolicyKind::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Instantiates the policy.
    pub fn build(&self) -> Box<dyn SchedulingPolicy> {
        match *self {
            PolicyKind::Fifo => Box::new(Fifo),
            PolicyKind::ShortestBurstFirst => Box::new(ShortestBurstFirst),
            PolicyKind::Priority => Box::new(Priority),
            PolicyKind::RoundRobin { quantum } => Box::new(RoundRobin { quantum }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        assert_eq!(PolicyKind::from_parts("fifo", None), Ok(PolicyKind::Fifo));
        assert_eq!(
            PolicyKind::from_parts("SJF", Some(3)),
            Ok(PolicyKind::ShortestBurstFirst)
        );
        assert_eq!(PolicyKind::from_parts("PR", None), Ok(PolicyKind::Priority));
        assert_eq!(
            PolicyKind::from_parts("RR", Some(5)),
            Ok(PolicyKind::RoundRobin { quantum: 5 })
        );
    }

    #[test]
    fn test_round_robin_requires_quantum() {
        assert_eq!(
            PolicyKind::from_parts("RR", None),
            Err(ConfigError::MissingQuantum)
        );
        assert_eq!(
            PolicyKind::from_parts("RR", Some(0)),
            Err(ConfigError::ZeroQuantum)
        );
    }

    #[test]
    fn test_unknown_policy() {
        assert!(matches!(
            PolicyKind::from_parts("LOTTERY", None),
            Err(ConfigError::UnknownPolicy(name)) if name == "LOTTERY"
        ));
    }

    #[test]
    fn test_build_matches_kind() {
        for kind in [
            PolicyKind::Fifo,
            PolicyKind::ShortestBurstFirst,
            PolicyKind::Priority,
            PolicyKind::RoundRobin { quantum: 2 },
        ] {
            assert_eq!(kind.build().name(), kind.name());
        }
    }

    #[test]
    fn test_serde_roundtrip_and_validate() {
        let kind: PolicyKind =
            serde_json::from_str(r#"{"policy":"round_robin","quantum":0}"#).unwrap();
        assert_eq!(kind.validate(), Err(ConfigError::ZeroQuantum));
        assert_eq!(kind.quantum(), Some(0));

        let json = serde_json::to_string(&PolicyKind::Priority).unwrap();
        assert_eq!(json, r#"{"policy":"priority"}"#);
    }
}
