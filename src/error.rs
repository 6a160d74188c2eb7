//! Error types.
//!
//! Configuration errors are fatal and surface before a run starts.
//! Workload errors describe a single bad input line; the feeder logs and
//! skips them. Simulation errors mean a role thread could not run to
//! completion.

use std::fmt;

/// Invalid simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The policy identifier is not one of FIFO, SJF, PR, RR.
    UnknownPolicy(String),
    /// Round-robin was selected without a quantum.
    MissingQuantum,
    /// Round-robin quantum must be positive.
    ZeroQuantum,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownPolicy(name) => {
                write!(f, "unknown scheduling policy '{name}' (expected FIFO, SJF, PR or RR)")
            }
            ConfigError::MissingQuantum => write!(f, "round-robin requires a quantum"),
            ConfigError::ZeroQuantum => write!(f, "round-robin quantum must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A workload line that could not be turned into an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    /// Line does not start with a known command.
    UnknownCommand {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },
    /// Known command with missing or unparsable fields.
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },
    /// The underlying reader failed.
    Io(String),
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadError::UnknownCommand { line, text } => {
                write!(f, "line {line}: unknown command '{text}'")
            }
            WorkloadError::Malformed { line, reason } => write!(f, "line {line}: {reason}"),
            WorkloadError::Io(msg) => write!(f, "read error: {msg}"),
        }
    }
}

impl std::error::Error for WorkloadError {}

/// A simulation run that could not complete.
#[derive(Debug)]
pub enum SimulationError {
    /// A role thread could not be started.
    Spawn {
        /// Role name.
        role: &'static str,
        /// OS error.
        source: std::io::Error,
    },
    /// A role thread panicked.
    RolePanicked(&'static str),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Spawn { role, source } => {
                write!(f, "failed to start {role} thread: {source}")
            }
            SimulationError::RolePanicked(role) => write!(f, "{role} thread panicked"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Spawn { source, .. } => Some(source),
            SimulationError::RolePanicked(_) => None,
        }
    }
}
