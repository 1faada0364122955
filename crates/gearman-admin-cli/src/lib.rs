//! Command-line runtime for the gearman administrative client.
//!
//! The module owns argument parsing, configuration bootstrapping, telemetry
//! installation, and reply rendering. It can be driven from the binary
//! entrypoint or from tests that substitute the configuration loader and the
//! output streams.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;

mod cli;
mod config;
mod errors;
pub mod output;
mod query;
mod telemetry;

use cli::Cli;
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
pub use output::{OutputFormat, ResolvedOutputFormat};

/// CLI flags recognised by the configuration loader.
///
/// MAINTENANCE: This list must be kept in sync with the fields of
/// `gearman_admin_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--server",
    "--log-filter",
    "--log-format",
    "--connect-timeout-secs",
    "--io-timeout-secs",
];

/// Bundles the output streams handed to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E, stdout_is_terminal: bool) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr, stdout_is_terminal);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(args: I, io: &mut IoStreams<'_, W, E>, loader: &L) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);
    let cli_arguments = prepare_cli_arguments(&args, &split);

    let cli = match Cli::try_parse_from(cli_arguments) {
        Ok(cli) => cli,
        Err(error) => return report_usage(error, io),
    };

    match execute(&cli, &split.config_arguments, io, loader) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(io.stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<W, E, L>(
    cli: &Cli,
    config_arguments: &[OsString],
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let config = loader.load(config_arguments)?;
    telemetry::initialise(&config)?;
    debug!(server = %config.server(), command = ?cli.command, "running admin query");

    let format = cli.output.resolve(io.stdout_is_terminal);
    let report = query::execute(&cli.command, &config)?;
    output::write_report(io.stdout, &report, format)
}

/// Help and version requests succeed on stdout; other parse failures,
/// including a bare invocation, print usage to stderr and fail.
fn report_usage<W, E>(error: clap::Error, io: &mut IoStreams<'_, W, E>) -> ExitCode
where
    W: Write,
    E: Write,
{
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(io.stdout, "{error}");
            let _ = io.stdout.flush();
            ExitCode::SUCCESS
        }
        _ => {
            let _ = write!(io.stderr, "{}", AppError::CliUsage(error));
            ExitCode::FAILURE
        }
    }
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    cli_arguments.extend(args.iter().skip(split.command_start).cloned());
    cli_arguments
}
