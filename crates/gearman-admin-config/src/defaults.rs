use crate::endpoint::ServerEndpoint;
use crate::logging::LogFormat;

/// Conventional administrative port of the broker.
pub const DEFAULT_ADMIN_PORT: u16 = 4730;

/// Host used when no server is configured.
pub const DEFAULT_ADMIN_HOST: &str = "127.0.0.1";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Seconds allowed for establishing the transport connection.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default broker endpoint, `tcp://127.0.0.1:4730`.
#[must_use]
pub fn default_server_endpoint() -> ServerEndpoint {
    ServerEndpoint::tcp(DEFAULT_ADMIN_HOST, DEFAULT_ADMIN_PORT)
}

/// Default connect timeout in seconds.
#[must_use]
pub const fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}
