//! Argument model for the `gearman-admin` binary.

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

const CONFIG_FLAGS_HELP: &str = "\
Configuration flags (must precede the subcommand):
  --config-path <PATH>           Load settings from a TOML file
  --server <URL>                 Broker endpoint, tcp://host:port or unix:///path
  --log-filter <FILTER>          Tracing filter expression
  --log-format <compact|json>    Diagnostic log format
  --connect-timeout-secs <SECS>  Give up connecting after SECS
  --io-timeout-secs <SECS>       Read/write deadline per reply";

#[derive(Parser, Debug)]
#[command(
    name = "gearman-admin",
    version,
    about = "Queries a gearman broker's administrative interface",
    arg_required_else_help = true,
    disable_help_subcommand = true,
    after_help = CONFIG_FLAGS_HELP
)]
pub(crate) struct Cli {
    /// Controls how replies are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: QueryCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueryCommand {
    /// Lists connected workers and the functions they registered.
    Workers {
        /// Only show workers that registered this function.
        #[arg(long, value_name = "NAME")]
        function: Option<String>,
    },
    /// Reports queued jobs, running jobs and available workers per function.
    Status {
        /// Only show the named function.
        #[arg(long, value_name = "NAME")]
        function: Option<String>,
    },
    /// Prints the broker's version string.
    Version,
}
