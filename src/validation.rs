//! Input validation for workload events.
//!
//! Checks structural integrity of events before the feeder admits them.
//! Detects:
//! - Spawns with no bursts
//! - Zero-length bursts
//! - Zero-length delays
//! - Bursts and delays longer than [`MAX_DURATION`]
//!
//! Invalid events are a local failure: the feeder skips them and the run
//! continues.

use crate::models::WorkloadEvent;

/// Longest accepted burst or delay, in logical time units.
///
/// Keeps the clock and the accumulated counters far from `u64` overflow.
/// Matches the largest single sleep the simulation performs.
pub const MAX_DURATION: u64 = u32::MAX as u64;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A spawn event carries no bursts.
    EmptyBursts,
    /// A burst has zero duration.
    ZeroBurst,
    /// A delay has zero duration.
    ZeroDelay,
    /// A burst exceeds [`MAX_DURATION`].
    BurstTooLarge,
    /// A delay exceeds [`MAX_DURATION`].
    DelayTooLarge,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a single workload event.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_event(event: &WorkloadEvent) -> ValidationResult {
    let mut errors = Vec::new();

    match event {
        WorkloadEvent::Spawn { bursts, .. } => {
            if bursts.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyBursts,
                    "Spawn event has no bursts",
                ));
            }
            for (i, &b) in bursts.iter().enumerate() {
                if b == 0 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ZeroBurst,
                        format!("Burst {i} has zero duration"),
                    ));
                } else if b > MAX_DURATION {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::BurstTooLarge,
                        format!("Burst {i} exceeds {MAX_DURATION}"),
                    ));
                }
            }
        }
        WorkloadEvent::Delay { duration: 0 } => {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDelay,
                "Delay event has zero duration",
            ));
        }
        WorkloadEvent::Delay { duration } if *duration > MAX_DURATION => {
            errors.push(ValidationError::new(
                ValidationErrorKind::DelayTooLarge,
                format!("Delay {duration} exceeds {MAX_DURATION}"),
            ));
        }
        WorkloadEvent::Delay { .. } | WorkloadEvent::Stop => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_events() {
        assert!(validate_event(&WorkloadEvent::spawn(1, [5, 2, 3])).is_ok());
        assert!(validate_event(&WorkloadEvent::delay(10)).is_ok());
        assert!(validate_event(&WorkloadEvent::Stop).is_ok());
    }

    #[test]
    fn test_empty_bursts() {
        let errors = validate_event(&WorkloadEvent::spawn(1, [])).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyBursts));
    }

    #[test]
    fn test_zero_burst_reports_each() {
        let errors = validate_event(&WorkloadEvent::spawn(1, [0, 4, 0])).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::ZeroBurst));
        assert!(errors[1].message.contains("Burst 2"));
    }

    #[test]
    fn test_zero_delay() {
        let errors = validate_event(&WorkloadEvent::delay(0)).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ZeroDelay);
    }

    #[test]
    fn test_oversized_durations() {
        let errors = validate_event(&WorkloadEvent::spawn(1, [5, u64::MAX])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::BurstTooLarge);
        assert!(errors[0].message.contains("Burst 1"));

        let errors = validate_event(&WorkloadEvent::delay(MAX_DURATION + 1)).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::DelayTooLarge);

        assert!(validate_event(&WorkloadEvent::spawn(1, [MAX_DURATION])).is_ok());
        assert!(validate_event(&WorkloadEvent::delay(MAX_DURATION)).is_ok());
    }
}
