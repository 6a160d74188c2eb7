//! Text workload format.
//!
//! One command per line:
//!
//! ```text
//! proc <priority> <count> <burst_1> ... <burst_count>
//! sleep <duration>
//! stop
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Parsing is lazy:
//! lines are read only as the feeder asks for the next event.

use std::io::{BufRead, Lines};

use crate::error::WorkloadError;
use crate::models::WorkloadEvent;

/// Lazily parses a workload from a reader.
pub fn parse_workload<R: BufRead>(reader: R) -> WorkloadLines<R> {
    WorkloadLines {
        lines: reader.lines(),
        line_no: 0,
        failed: false,
    }
}

/// Parses a complete workload held in memory.
pub fn parse_str(input: &str) -> Vec<Result<WorkloadEvent, WorkloadError>> {
    parse_workload(input.as_bytes()).collect()
}

/// Iterator over the events of a text workload.
#[derive(Debug)]
pub struct WorkloadLines<R> {
    lines: Lines<R>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> Iterator for WorkloadLines<R> {
    type Item = Result<WorkloadEvent, WorkloadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(WorkloadError::Io(e.to_string())));
                }
            };
            self.line_no += 1;
            if let Some(item) = parse_line(self.line_no, &line) {
                return Some(item);
            }
        }
    }
}

/// Parses one line. Returns `None` for blank and comment lines.
pub fn parse_line(line_no: usize, line: &str) -> Option<Result<WorkloadEvent, WorkloadError>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut fields = trimmed.split_whitespace();
    let command = fields.next()?;
    let rest: Vec<&str> = fields.collect();

    let result = match command {
        "proc" => parse_proc(line_no, &rest),
        "sleep" => parse_sleep(line_no, &rest),
        "stop" => Ok(WorkloadEvent::Stop),
        _ => Err(WorkloadError::UnknownCommand {
            line: line_no,
            text: trimmed.to_string(),
        }),
    };
    Some(result)
}

fn parse_proc(line_no: usize, fields: &[&str]) -> Result<WorkloadEvent, WorkloadError> {
    let malformed = |reason: String| WorkloadError::Malformed {
        line: line_no,
        reason,
    };

    let (priority, count, bursts) = match fields {
        [priority, count, bursts @ ..] => (priority, count, bursts),
        _ => return Err(malformed("proc needs a priority and a burst count".into())),
    };
    let priority: i32 = priority
        .parse()
        .map_err(|_| malformed(format!("invalid priority '{priority}'")))?;
    let count: usize = count
        .parse()
        .map_err(|_| malformed(format!("invalid burst count '{count}'")))?;
    if bursts.len() != count {
        return Err(malformed(format!(
            "expected {count} bursts, found {}",
            bursts.len()
        )));
    }
    let bursts = bursts
        .iter()
        .map(|b| {
            b.parse::<u64>()
                .map_err(|_| malformed(format!("invalid burst '{b}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WorkloadEvent::Spawn { priority, bursts })
}

fn parse_sleep(line_no: usize, fields: &[&str]) -> Result<WorkloadEvent, WorkloadError> {
    match fields {
        [duration] => duration
            .parse()
            .map(WorkloadEvent::delay)
            .map_err(|_| WorkloadError::Malformed {
                line: line_no,
                reason: format!("invalid sleep duration '{duration}'"),
            }),
        _ => Err(WorkloadError::Malformed {
            line: line_no,
            reason: "sleep takes exactly one duration".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# two processes and an idle gap
proc 1 5 10 20 10 50 20
proc 3 1 7

sleep 50
stop
proc 9 1 1
";

    #[test]
    fn test_parse_sample() {
        let events: Vec<WorkloadEvent> = parse_str(SAMPLE)
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(
            events,
            vec![
                WorkloadEvent::spawn(1, [10, 20, 10, 50, 20]),
                WorkloadEvent::spawn(3, [7]),
                WorkloadEvent::delay(50),
                WorkloadEvent::Stop,
                WorkloadEvent::spawn(9, [1]),
            ]
        );
    }

    #[test]
    fn test_unknown_command_keeps_line_number() {
        let items = parse_str("proc 1 1 4\nfork 3\nsleep 2\n");
        assert!(items[0].is_ok());
        assert_eq!(
            items[1],
            Err(WorkloadError::UnknownCommand {
                line: 2,
                text: "fork 3".into()
            })
        );
        assert_eq!(items[2], Ok(WorkloadEvent::delay(2)));
    }

    #[test]
    fn test_burst_count_mismatch() {
        let items = parse_str("proc 1 3 4 5\n");
        assert!(matches!(
            &items[0],
            Err(WorkloadError::Malformed { line: 1, reason }) if reason.contains("expected 3")
        ));
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(parse_line(1, "proc x 1 4").unwrap().is_err());
        assert!(parse_line(1, "proc 1 1 -4").unwrap().is_err());
        assert!(parse_line(1, "proc 1").unwrap().is_err());
        assert!(parse_line(1, "sleep").unwrap().is_err());
        assert!(parse_line(1, "sleep 1 2").unwrap().is_err());
        assert!(parse_line(1, "sleep soon").unwrap().is_err());
    }

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        assert!(parse_line(1, "   ").is_none());
        assert!(parse_line(1, "# proc 1 1 1").is_none());
        assert_eq!(parse_line(1, "  stop  "), Some(Ok(WorkloadEvent::Stop)));
    }

    #[test]
    fn test_negative_priority_allowed() {
        assert_eq!(
            parse_line(1, "proc -2 1 3"),
            Some(Ok(WorkloadEvent::spawn(-2, [3])))
        );
    }
}
