//! Socket transports for the administrative connection.
//!
//! [`Connection`] wraps the concrete stream so sessions remain transport
//! agnostic: anything that reads and writes bytes in order can carry the
//! protocol.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

#[cfg(unix)]
use socket2::{Domain, SockAddr, Socket, Type};
use tracing::debug;

use gearman_admin_config::{Config, DEFAULT_CONNECT_TIMEOUT_SECS, ServerEndpoint};

use crate::errors::AdminError;

/// Connect timeout used when none is configured.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS);

/// Deadlines applied while establishing and using a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Upper bound for establishing the connection.
    pub connect_timeout: Duration,
    /// Read and write deadline. `None` blocks until the peer responds.
    pub io_timeout: Option<Duration>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            io_timeout: None,
        }
    }
}

impl From<&Config> for ConnectOptions {
    fn from(config: &Config) -> Self {
        Self {
            connect_timeout: config.connect_timeout(),
            io_timeout: config.io_timeout(),
        }
    }
}

/// An established stream to the broker.
#[derive(Debug)]
pub enum Connection {
    /// TCP stream.
    Tcp(TcpStream),
    /// Unix domain socket stream.
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Unix(stream) => stream.flush(),
        }
    }
}

impl Connection {
    fn apply_io_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => {
                stream.set_read_timeout(timeout)?;
                stream.set_write_timeout(timeout)
            }
            #[cfg(unix)]
            Self::Unix(stream) => {
                stream.set_read_timeout(timeout)?;
                stream.set_write_timeout(timeout)
            }
        }
    }
}

/// Dials the broker described by `endpoint`.
///
/// # Errors
///
/// Returns [`AdminError::Connect`] when the address cannot be resolved, the
/// connection is refused or times out, or the deadlines cannot be applied.
pub fn connect(endpoint: &ServerEndpoint, options: &ConnectOptions) -> Result<Connection, AdminError> {
    let connect_error = |source| AdminError::Connect {
        endpoint: endpoint.to_string(),
        source,
    };
    let connection = match endpoint {
        ServerEndpoint::Tcp { host, port } => {
            let address = resolve_tcp_address(host, *port).map_err(connect_error)?;
            TcpStream::connect_timeout(&address, options.connect_timeout)
                .map(Connection::Tcp)
                .map_err(connect_error)?
        }
        ServerEndpoint::Unix { path } => connect_unix(path.as_str(), options.connect_timeout)
            .map_err(connect_error)?,
    };
    connection
        .apply_io_timeout(options.io_timeout)
        .map_err(connect_error)?;
    debug!(%endpoint, "connected to gearman server");
    Ok(connection)
}

fn resolve_tcp_address(host: &str, port: u16) -> io::Result<SocketAddr> {
    let mut addrs = (host, port).to_socket_addrs()?;
    addrs
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::AddrNotAvailable, "no resolved addresses"))
}

#[cfg(unix)]
fn connect_unix(path: &str, timeout: Duration) -> io::Result<Connection> {
    let socket = Socket::new(Domain::UNIX, Type::STREAM, None)?;
    let address = SockAddr::unix(path)?;
    socket.connect_timeout(&address, timeout)?;
    let stream: UnixStream = socket.into();
    Ok(Connection::Unix(stream))
}

#[cfg(not(unix))]
fn connect_unix(_path: &str, _timeout: Duration) -> io::Result<Connection> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "platform does not support Unix sockets",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn refused_connection_is_reported_with_endpoint() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let endpoint = ServerEndpoint::tcp("127.0.0.1", port);
        let error = connect(&endpoint, &ConnectOptions::default()).unwrap_err();
        assert!(matches!(error, AdminError::Connect { .. }));
        assert!(
            error
                .to_string()
                .starts_with(&format!("error connecting to gearman server at tcp://127.0.0.1:{port}: "))
        );
    }

    #[test]
    fn options_follow_configuration() {
        let config = Config {
            connect_timeout_secs: 1,
            io_timeout_secs: Some(3),
            ..Config::default()
        };
        let options = ConnectOptions::from(&config);
        assert_eq!(options.connect_timeout, Duration::from_secs(1));
        assert_eq!(options.io_timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn default_options_match_default_configuration() {
        assert_eq!(
            ConnectOptions::default(),
            ConnectOptions::from(&Config::default())
        );
    }

    #[cfg(unix)]
    #[test]
    fn missing_unix_socket_fails_to_connect() {
        let endpoint = ServerEndpoint::unix("/nonexistent/gearmand-admin.sock");
        let error = connect(&endpoint, &ConnectOptions::default()).unwrap_err();
        assert!(matches!(error, AdminError::Connect { .. }));
    }
}
