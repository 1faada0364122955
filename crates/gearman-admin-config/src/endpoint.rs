//! Transport targets for the broker's administrative port.

use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Declarative address of a broker's administrative endpoint.
///
/// Serialises as a `transport`-tagged table and deserialises from either that
/// table or a `tcp://host:port` / `unix:///path` URL string, so environment
/// variables can carry the URL form.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "transport", rename_all = "snake_case", try_from = "EndpointRepr")]
pub enum ServerEndpoint {
    /// TCP endpoint, the usual deployment.
    Tcp {
        /// Host name or IP literal.
        host: String,
        /// Administrative port.
        port: u16,
    },
    /// Unix domain socket endpoint.
    Unix {
        /// Filesystem path of the socket.
        path: Utf8PathBuf,
    },
}

impl ServerEndpoint {
    /// Builds a TCP endpoint.
    #[must_use]
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::Tcp {
            host: host.into(),
            port,
        }
    }

    /// Builds a Unix domain socket endpoint.
    #[must_use]
    pub fn unix(path: impl Into<Utf8PathBuf>) -> Self {
        Self::Unix { path: path.into() }
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp { host, port } => write!(formatter, "tcp://{host}:{port}"),
            Self::Unix { path } => write!(formatter, "unix://{path}"),
        }
    }
}

impl FromStr for ServerEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(input)?;
        match url.scheme() {
            "tcp" => {
                let host = url
                    .host_str()
                    .ok_or_else(|| EndpointParseError::MissingHost(input.to_owned()))?;
                let port = url
                    .port()
                    .ok_or_else(|| EndpointParseError::MissingPort(input.to_owned()))?;
                Ok(Self::tcp(host.trim_start_matches('[').trim_end_matches(']'), port))
            }
            "unix" => {
                let path = url.path();
                if path.is_empty() {
                    return Err(EndpointParseError::MissingUnixPath(input.to_owned()));
                }
                Ok(Self::unix(path))
            }
            other => Err(EndpointParseError::UnsupportedScheme(other.to_owned())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointRepr {
    Url(String),
    Tagged(TaggedEndpoint),
}

#[derive(Deserialize)]
#[serde(tag = "transport", rename_all = "snake_case")]
enum TaggedEndpoint {
    Tcp { host: String, port: u16 },
    Unix { path: Utf8PathBuf },
}

impl TryFrom<EndpointRepr> for ServerEndpoint {
    type Error = EndpointParseError;

    fn try_from(repr: EndpointRepr) -> Result<Self, Self::Error> {
        match repr {
            EndpointRepr::Url(text) => text.parse(),
            EndpointRepr::Tagged(TaggedEndpoint::Tcp { host, port }) => Ok(Self::tcp(host, port)),
            EndpointRepr::Tagged(TaggedEndpoint::Unix { path }) => Ok(Self::unix(path)),
        }
    }
}

/// Errors encountered while parsing a [`ServerEndpoint`] from text.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// Scheme was neither `tcp` nor `unix`.
    #[error("unsupported endpoint scheme '{0}'")]
    UnsupportedScheme(String),
    /// TCP host name was missing.
    #[error("missing TCP host in '{0}'")]
    MissingHost(String),
    /// TCP port was missing from the address.
    #[error("missing TCP port in '{0}'")]
    MissingPort(String),
    /// Unix socket path was absent.
    #[error("missing Unix socket path in '{0}'")]
    MissingUnixPath(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn display_tcp_endpoint() {
        let endpoint = ServerEndpoint::tcp("10.0.50.3", 4730);
        assert_eq!(endpoint.to_string(), "tcp://10.0.50.3:4730");
    }

    #[test]
    fn display_unix_endpoint() {
        let endpoint = ServerEndpoint::unix(Utf8PathBuf::from("/run/gearmand/admin.sock"));
        assert_eq!(endpoint.to_string(), "unix:///run/gearmand/admin.sock");
    }

    #[test]
    fn parse_tcp_endpoint() {
        let endpoint: ServerEndpoint = "tcp://127.0.0.1:4730".parse().unwrap();
        assert_eq!(endpoint, ServerEndpoint::tcp("127.0.0.1", 4730));
    }

    #[test]
    fn parse_ipv6_endpoint_strips_brackets() {
        let endpoint: ServerEndpoint = "tcp://[::1]:4730".parse().unwrap();
        assert_eq!(endpoint, ServerEndpoint::tcp("::1", 4730));
    }

    #[rstest]
    #[case("http://localhost:4730")]
    #[case("tcp://localhost")]
    #[case("not an endpoint")]
    fn rejects_invalid_endpoints(#[case] input: &str) {
        assert!(input.parse::<ServerEndpoint>().is_err());
    }

    #[test]
    fn deserialises_url_string_and_tagged_table() {
        let from_url: ServerEndpoint = serde_json::from_str(r#""tcp://broker:4730""#).unwrap();
        let from_table: ServerEndpoint =
            serde_json::from_str(r#"{"transport":"tcp","host":"broker","port":4730}"#).unwrap();
        assert_eq!(from_url, from_table);
        assert_eq!(
            serde_json::to_string(&from_url).unwrap(),
            r#"{"transport":"tcp","host":"broker","port":4730}"#
        );
    }

    #[test]
    fn unsupported_scheme_names_the_scheme() {
        let error = "http://localhost:4730"
            .parse::<ServerEndpoint>()
            .unwrap_err();
        assert_eq!(error.to_string(), "unsupported endpoint scheme 'http'");
    }
}
