//! Client for the gearman broker's administrative text protocol.
//!
//! A session writes one newline-terminated command and reads the broker's
//! reply. Multi-line replies end with a line holding a single `.`; each line
//! is split on runs of spaces or tabs and decoded into typed records.
//!
//! # Core Types
//!
//! - [`AdminSession`] - owns one connection and issues queries
//! - [`WorkerRecord`] - one connected worker from the `workers` reply
//! - [`FunctionStatusRecord`] - one function's counters from the `status` reply
//! - [`AdminError`] / [`ProtocolError`] - transport versus grammar failures
//!
//! # Example
//!
//! ```ignore
//! use gearman_admin::{AdminSession, ConnectOptions};
//! use gearman_admin_config::ServerEndpoint;
//!
//! let endpoint = ServerEndpoint::tcp("10.0.50.3", 4730);
//! let mut session = AdminSession::connect(&endpoint, &ConnectOptions::default())?;
//! for worker in session.list_workers()? {
//!     if worker.has_function("resize") {
//!         // ...
//!     }
//! }
//! ```

mod command;
mod errors;
mod fields;
mod lines;
mod session;
mod status;
mod transport;
mod version;
mod workers;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use command::AdminCommand;
pub use errors::{AdminError, Counter, ErrorKind, ProtocolError};
pub use fields::split_fields;
pub use lines::{SENTINEL, read_reply_line, read_until_sentinel};
pub use session::AdminSession;
pub use status::{FunctionStatusRecord, decode_status, decode_statuses};
pub use transport::{Connection, ConnectOptions, DEFAULT_CONNECT_TIMEOUT, connect};
pub use version::decode_version;
pub use workers::{FUNCTION_SEPARATOR, WorkerRecord, decode_worker, decode_workers};
