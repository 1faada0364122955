//! Line framing for administrative replies.
//!
//! Multi-line replies end with a line holding a single `.`. The reader works
//! on any [`BufRead`] so bytes the broker sends after the terminator stay in
//! the caller's buffer for the next reply.

use std::io::{self, BufRead};

/// Line that terminates a multi-line reply.
pub const SENTINEL: &str = ".";

/// Reads lines until the `.` sentinel and returns them without terminators.
///
/// The sentinel itself is consumed but not returned. A stream that ends
/// before the sentinel yields [`io::ErrorKind::UnexpectedEof`] and no lines.
///
/// # Errors
///
/// Returns the underlying read error, or `UnexpectedEof` when the stream
/// closes before the sentinel arrives.
pub fn read_until_sentinel<R>(reader: &mut R) -> io::Result<Vec<String>>
where
    R: BufRead + ?Sized,
{
    let mut lines = Vec::new();
    loop {
        let Some(line) = read_reply_line(reader)? else {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended before the '.' terminator",
            ));
        };
        if line == SENTINEL {
            return Ok(lines);
        }
        lines.push(line);
    }
}

/// Reads a single newline-terminated line.
///
/// Returns `Ok(None)` on a clean end of stream. A trailing line without a
/// newline means the peer closed mid-line and is reported as
/// `UnexpectedEof`.
///
/// # Errors
///
/// Propagates read failures, including invalid UTF-8.
pub fn read_reply_line<R>(reader: &mut R) -> io::Result<Option<String>>
where
    R: BufRead + ?Sized,
{
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let Some(stripped) = line.strip_suffix('\n') else {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ended in the middle of a line",
        ));
    };
    let content_len = stripped.strip_suffix('\r').unwrap_or(stripped).len();
    line.truncate(content_len);
    Ok(Some(line))
}
