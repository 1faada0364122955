//! Decoding of the `status` reply.
//!
//! Each line reads `<function> <unfinished> <running> <available-workers>`.

use serde::Serialize;

use crate::errors::{Counter, ProtocolError};
use crate::fields::split_fields;

/// Queue state of one registered function at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionStatusRecord {
    /// Function name.
    pub name: String,
    /// Jobs queued or running.
    pub unfinished_jobs: i64,
    /// Jobs currently assigned to a worker.
    pub running_jobs: i64,
    /// Workers registered for the function.
    pub available_workers: i64,
}

/// Decodes every line of a `status` reply, stopping at the first bad line.
///
/// # Errors
///
/// Returns the [`ProtocolError`] of the first malformed line.
pub fn decode_statuses<S>(lines: &[S]) -> Result<Vec<FunctionStatusRecord>, ProtocolError>
where
    S: AsRef<str>,
{
    lines
        .iter()
        .map(|line| decode_status(line.as_ref()))
        .collect()
}

/// Decodes a single `status` line. Fields past the fourth are ignored.
///
/// # Errors
///
/// [`ProtocolError::IncompleteStatus`] when fewer than four fields are
/// present, or [`ProtocolError::BadCount`] when a counter is not an integer.
pub fn decode_status(line: &str) -> Result<FunctionStatusRecord, ProtocolError> {
    let fields = split_fields(line);
    let [name, unfinished, running, workers, ..] = fields.as_slice() else {
        return Err(ProtocolError::IncompleteStatus {
            found: fields.len(),
            line: line.to_owned(),
        });
    };
    Ok(FunctionStatusRecord {
        name: (*name).to_owned(),
        unfinished_jobs: parse_counter(unfinished, Counter::Unfinished)?,
        running_jobs: parse_counter(running, Counter::Running)?,
        available_workers: parse_counter(workers, Counter::Worker)?,
    })
}

fn parse_counter(field: &str, counter: Counter) -> Result<i64, ProtocolError> {
    field
        .parse()
        .map_err(|source| ProtocolError::BadCount { counter, source })
}
