//! Layered configuration for the gearman administrative client.
//!
//! Values are merged from built-in defaults, an optional TOML file named by
//! `--config-path`, `GEARMAN_ADMIN_*` environment variables, and command-line
//! flags, with later layers taking precedence.

mod defaults;
mod endpoint;
mod logging;

use std::time::Duration;

pub use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_ADMIN_HOST, DEFAULT_ADMIN_PORT, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_LOG_FILTER,
    default_connect_timeout_secs, default_log_filter_string,
    default_log_format, default_server_endpoint,
};
pub use endpoint::{EndpointParseError, ServerEndpoint};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "GEARMAN_ADMIN")]
#[serde(default)]
pub struct Config {
    /// Administrative endpoint of the broker.
    #[ortho_config(default = default_server_endpoint())]
    pub server: ServerEndpoint,
    /// `tracing` filter expression, for example `gearman_admin=debug`.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Seconds allowed for establishing the connection.
    #[ortho_config(default = default_connect_timeout_secs())]
    pub connect_timeout_secs: u64,
    /// Read/write deadline applied to the transport. Unset or zero blocks
    /// indefinitely.
    pub io_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server_endpoint(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            connect_timeout_secs: default_connect_timeout_secs(),
            io_timeout_secs: None,
        }
    }
}

impl Config {
    /// Broker endpoint to query.
    #[must_use]
    pub fn server(&self) -> &ServerEndpoint {
        &self.server
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Transport read/write deadline, if one is configured.
    #[must_use]
    pub fn io_timeout(&self) -> Option<Duration> {
        self.io_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
