//! Administrative verbs understood by the broker.

use std::io::{self, Write};

/// A read-only administrative query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    /// `workers`: connected workers and their registered functions.
    Workers,
    /// `status`: per-function queue depth and worker availability.
    Status,
    /// `version`: the broker's version string.
    Version,
}

impl AdminCommand {
    /// Verb written to the wire, without the trailing newline.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Workers => "workers",
            Self::Status => "status",
            Self::Version => "version",
        }
    }

    /// Noun used in error messages for this command's reply.
    #[must_use]
    pub const fn subject(self) -> &'static str {
        match self {
            Self::Workers => "worker list",
            Self::Status => "function status list",
            Self::Version => "server version",
        }
    }

    pub(crate) fn write_to<W>(self, writer: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        writer.write_all(self.verb().as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AdminCommand::Workers, "workers\n")]
    #[case(AdminCommand::Status, "status\n")]
    #[case(AdminCommand::Version, "version\n")]
    fn writes_verb_with_newline(#[case] command: AdminCommand, #[case] expected: &str) {
        let mut buffer = Vec::new();
        command.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }
}
