//! Runs one administrative query and applies client-side filters.

use std::io::{Read, Write};

use gearman_admin::{AdminError, AdminSession, ConnectOptions, FunctionStatusRecord, WorkerRecord};
use gearman_admin_config::Config;

use crate::cli::QueryCommand;

/// Decoded reply to a single query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueryReport {
    Workers(Vec<WorkerRecord>),
    Status(Vec<FunctionStatusRecord>),
    Version(String),
}

/// Connects to the configured broker and runs `command` on a fresh session.
pub(crate) fn execute(command: &QueryCommand, config: &Config) -> Result<QueryReport, AdminError> {
    let options = ConnectOptions::from(config);
    let mut session = AdminSession::connect(config.server(), &options)?;
    run_query(&mut session, command)
}

pub(crate) fn run_query<S>(
    session: &mut AdminSession<S>,
    command: &QueryCommand,
) -> Result<QueryReport, AdminError>
where
    S: Read + Write,
{
    match command {
        QueryCommand::Workers { function } => {
            let mut workers = session.list_workers()?;
            if let Some(name) = function {
                workers.retain(|worker| worker.has_function(name));
            }
            Ok(QueryReport::Workers(workers))
        }
        QueryCommand::Status { function } => {
            let mut statuses = session.list_function_status()?;
            if let Some(name) = function {
                statuses.retain(|status| &status.name == name);
            }
            Ok(QueryReport::Status(statuses))
        }
        QueryCommand::Version => session.server_version().map(QueryReport::Version),
    }
}
