//! Decoding of the single-line `version` reply.

use crate::errors::ProtocolError;
use crate::fields::split_fields;

const OK_PREFIX: &str = "OK";
const ERR_PREFIX: &str = "ERR";

/// Decodes `OK <version>` into the version string.
///
/// # Errors
///
/// [`ProtocolError::ServerError`] for an `ERR <code> <message>` reply and
/// [`ProtocolError::UnexpectedReply`] for anything else.
pub fn decode_version(line: &str) -> Result<String, ProtocolError> {
    match split_fields(line).as_slice() {
        [OK_PREFIX, version @ ..] if !version.is_empty() => Ok(version.join(" ")),
        [ERR_PREFIX, code, message @ ..] => Err(ProtocolError::ServerError {
            code: (*code).to_owned(),
            message: message.join(" "),
        }),
        _ => Err(ProtocolError::UnexpectedReply {
            line: line.to_owned(),
        }),
    }
}
