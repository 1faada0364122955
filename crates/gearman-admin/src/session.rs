//! Request/response sessions over one administrative connection.

use std::io::{self, BufReader, Read, Write};

use gearman_admin_config::ServerEndpoint;
use tracing::{debug, warn};

use crate::command::AdminCommand;
use crate::errors::{AdminError, ProtocolError};
use crate::lines::{read_reply_line, read_until_sentinel};
use crate::status::{FunctionStatusRecord, decode_statuses};
use crate::transport::{ConnectOptions, Connection, connect};
use crate::version::decode_version;
use crate::workers::{WorkerRecord, decode_workers};

/// Exclusive owner of one broker connection.
///
/// Every query takes `&mut self` and blocks until its reply is complete, so a
/// session never has more than one command outstanding. Replies carry no
/// request identifiers; concurrent callers need one session each.
#[derive(Debug)]
pub struct AdminSession<S> {
    reader: BufReader<S>,
}

impl AdminSession<Connection> {
    /// Connects to `endpoint` and wraps the resulting stream.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Connect`] when the transport cannot be
    /// established.
    pub fn connect(endpoint: &ServerEndpoint, options: &ConnectOptions) -> Result<Self, AdminError> {
        connect(endpoint, options).map(Self::new)
    }
}

impl<S> AdminSession<S>
where
    S: Read + Write,
{
    /// Wraps an already established stream.
    pub fn new(stream: S) -> Self {
        Self {
            reader: BufReader::new(stream),
        }
    }

    /// Lists connected workers with their registered functions.
    ///
    /// # Errors
    ///
    /// Transport failures, including the stream closing before the `.`
    /// terminator, and malformed lines are returned as [`AdminError`]; no
    /// partial listing is returned.
    pub fn list_workers(&mut self) -> Result<Vec<WorkerRecord>, AdminError> {
        let command = AdminCommand::Workers;
        let lines = self.query_listing(command)?;
        let workers = decode_workers(&lines).map_err(|source| reject(command, source))?;
        debug!(count = workers.len(), "decoded worker list");
        Ok(workers)
    }

    /// Reports queue depth and worker availability per registered function.
    ///
    /// # Errors
    ///
    /// Same policy as [`Self::list_workers`].
    pub fn list_function_status(&mut self) -> Result<Vec<FunctionStatusRecord>, AdminError> {
        let command = AdminCommand::Status;
        let lines = self.query_listing(command)?;
        let statuses = decode_statuses(&lines).map_err(|source| reject(command, source))?;
        debug!(count = statuses.len(), "decoded function status list");
        Ok(statuses)
    }

    /// Asks the broker for its version string.
    ///
    /// # Errors
    ///
    /// Transport failures, or a reply that is not `OK <version>`.
    pub fn server_version(&mut self) -> Result<String, AdminError> {
        let command = AdminCommand::Version;
        self.send(command)?;
        let line = read_reply_line(&mut self.reader)
            .and_then(|line| {
                line.ok_or_else(|| {
                    io::Error::new(io::ErrorKind::UnexpectedEof, "stream ended before a reply")
                })
            })
            .map_err(|source| AdminError::Response { command, source })?;
        decode_version(&line).map_err(|source| reject(command, source))
    }

    #[cfg(test)]
    pub(crate) fn get_ref(&self) -> &S {
        self.reader.get_ref()
    }

    /// Returns the underlying stream. Bytes already buffered are discarded.
    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }

    fn send(&mut self, command: AdminCommand) -> Result<(), AdminError> {
        debug!(command = command.verb(), "sending admin command");
        command
            .write_to(self.reader.get_mut())
            .map_err(|source| AdminError::Request { command, source })
    }

    fn query_listing(&mut self, command: AdminCommand) -> Result<Vec<String>, AdminError> {
        self.send(command)?;
        let lines = read_until_sentinel(&mut self.reader)
            .map_err(|source| AdminError::Response { command, source })?;
        debug!(command = command.verb(), lines = lines.len(), "read admin reply");
        Ok(lines)
    }
}

fn reject(command: AdminCommand, source: ProtocolError) -> AdminError {
    warn!(command = command.verb(), error = %source, "rejected admin reply");
    AdminError::Protocol { command, source }
}
