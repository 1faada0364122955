//! Decoding of the `workers` reply.
//!
//! Each line reads `<fd> <address> <client-id> : [<function> ...]`.

use serde::Serialize;

use crate::errors::ProtocolError;
use crate::fields::split_fields;

/// Token separating the fixed worker columns from the function list.
pub const FUNCTION_SEPARATOR: &str = ":";

/// One connected worker as reported by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerRecord {
    /// Broker-side file descriptor of the worker connection.
    pub file_descriptor: String,
    /// Peer address of the worker.
    pub address: String,
    /// Client identifier, `-` when the worker set none.
    pub client_id: String,
    /// Registered function names, in the order the broker listed them.
    pub functions: Vec<String>,
}

impl WorkerRecord {
    /// Exact, case-sensitive membership test over [`Self::functions`].
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.iter().any(|function| function == name)
    }

    /// Returns true when the worker has registered no functions.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Decodes every line of a `workers` reply, stopping at the first bad line.
///
/// # Errors
///
/// Returns the [`ProtocolError`] of the first malformed line.
pub fn decode_workers<S>(lines: &[S]) -> Result<Vec<WorkerRecord>, ProtocolError>
where
    S: AsRef<str>,
{
    lines
        .iter()
        .map(|line| decode_worker(line.as_ref()))
        .collect()
}

/// Decodes a single `workers` line.
///
/// # Errors
///
/// [`ProtocolError::IncompleteWorker`] when fewer than four fields are
/// present, or [`ProtocolError::MalformedWorker`] when the fourth field is
/// not `:`.
pub fn decode_worker(line: &str) -> Result<WorkerRecord, ProtocolError> {
    let fields = split_fields(line);
    let [file_descriptor, address, client_id, separator, functions @ ..] = fields.as_slice()
    else {
        return Err(ProtocolError::IncompleteWorker {
            line: line.to_owned(),
        });
    };
    if *separator != FUNCTION_SEPARATOR {
        return Err(ProtocolError::MalformedWorker {
            token: (*separator).to_owned(),
        });
    }
    Ok(WorkerRecord {
        file_descriptor: (*file_descriptor).to_owned(),
        address: (*address).to_owned(),
        client_id: (*client_id).to_owned(),
        functions: functions.iter().map(|name| (*name).to_owned()).collect(),
    })
}
