//! Turning command results into `ExecutionResult`s

use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use taskboard_operations::{ExecutionResult, LogEntry, Operation};
use tracing::debug;

use crate::error::{KanbanError, Result};

/// A successful mutation: what the caller gets back, and what the activity
/// log should say about it.
pub(crate) struct Outcome {
    pub value: Value,
    pub subject: String,
    pub details: Value,
}

impl Outcome {
    pub fn new(value: Value, subject: impl ToString, details: Value) -> Self {
        Self {
            value,
            subject: subject.to_string(),
            details,
        }
    }
}

/// Wrap a mutation result. Successes carry a log entry; failures do not,
/// since a failed command left the board untouched.
pub(crate) fn logged<O>(
    op: &O,
    started: Instant,
    result: Result<Outcome>,
) -> ExecutionResult<Value, KanbanError>
where
    O: Operation + Serialize,
{
    let duration_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(Outcome {
            value,
            subject,
            details,
        }) => {
            let input = serde_json::to_value(op).unwrap_or(Value::Null);
            let log_entry = LogEntry::new(op.op_string(), input, details, None, duration_ms)
                .with_subject(subject);
            ExecutionResult::Logged { value, log_entry }
        }
        Err(error) => {
            debug!(op = %op.op_string(), %error, duration_ms, "operation failed");
            ExecutionResult::Failed {
                error,
                log_entry: None,
            }
        }
    }
}

/// Wrap a read-only result
pub(crate) fn unlogged(result: Result<Value>) -> ExecutionResult<Value, KanbanError> {
    ExecutionResult::unlogged_from(result)
}
