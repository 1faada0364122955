//! Error types for administrative queries.

use std::io;
use std::num::ParseIntError;

use strum::Display;
use thiserror::Error;

use crate::command::AdminCommand;

/// Numeric column of a `status` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Counter {
    /// Second column: jobs queued or running.
    Unfinished,
    /// Third column: jobs currently assigned to a worker.
    Running,
    /// Fourth column: workers able to run the function.
    Worker,
}

/// A reply was received but did not match the expected line grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A `workers` line had fewer than four fields.
    #[error("incomplete worker entry: '{line}'")]
    IncompleteWorker {
        /// The offending line.
        line: String,
    },
    /// The fourth field of a `workers` line was not the `:` separator.
    #[error("malformed worker entry '{token}'")]
    MalformedWorker {
        /// Token found where `:` was expected.
        token: String,
    },
    /// A `status` line had fewer than four fields.
    #[error("incomplete status entry only {found} fields found: {line}")]
    IncompleteStatus {
        /// Number of fields observed.
        found: usize,
        /// The offending line.
        line: String,
    },
    /// A `status` counter was not a base-10 integer.
    #[error("bad {counter} count format: {source}")]
    BadCount {
        /// Column that failed to parse.
        counter: Counter,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The broker answered with an `ERR` line.
    #[error("server error {code}: {message}")]
    ServerError {
        /// Error code reported by the broker.
        code: String,
        /// Free-form message following the code.
        message: String,
    },
    /// A single-line reply had an unrecognised shape.
    #[error("unexpected reply '{line}'")]
    UnexpectedReply {
        /// The offending line.
        line: String,
    },
}

/// Broad classification of an [`AdminError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connecting, writing, or reading failed.
    Transport,
    /// The reply did not match the expected grammar.
    Protocol,
}

/// Failure of a session operation, tagged with the command in flight.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The transport connection could not be established.
    #[error("error connecting to gearman server at {endpoint}: {source}")]
    Connect {
        /// Endpoint that was dialled.
        endpoint: String,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// Writing the command failed.
    #[error("error requesting {}: {source}", .command.subject())]
    Request {
        /// Command being sent.
        command: AdminCommand,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// Reading the reply failed, including end of stream before it completed.
    #[error("error getting {}: {source}", .command.subject())]
    Response {
        /// Command whose reply was being read.
        command: AdminCommand,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// The reply was read but could not be decoded.
    #[error("error getting {}: protocol error: {source}", .command.subject())]
    Protocol {
        /// Command whose reply was being decoded.
        command: AdminCommand,
        /// Grammar violation.
        #[source]
        source: ProtocolError,
    },
}

impl AdminError {
    /// Classifies the error as a transport or protocol failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connect { .. } | Self::Request { .. } | Self::Response { .. } => {
                ErrorKind::Transport
            }
            Self::Protocol { .. } => ErrorKind::Protocol,
        }
    }

    /// Returns true when the broker's reply was malformed.
    #[must_use]
    pub const fn is_protocol(&self) -> bool {
        matches!(self.kind(), ErrorKind::Protocol)
    }

    /// Command that was executing, if the failure happened after connecting.
    #[must_use]
    pub const fn command(&self) -> Option<AdminCommand> {
        match self {
            Self::Connect { .. } => None,
            Self::Request { command, .. }
            | Self::Response { command, .. }
            | Self::Protocol { command, .. } => Some(*command),
        }
    }

    /// The decoding failure, when the error is a protocol error.
    #[must_use]
    pub const fn protocol_error(&self) -> Option<&ProtocolError> {
        match self {
            Self::Protocol { source, .. } => Some(source),
            _ => None,
        }
    }
}
