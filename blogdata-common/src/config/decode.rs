//! Strict URI component percent-decoding.
//!
//! Every `%` must introduce exactly two hex digits and the decoded bytes
//! must form valid UTF-8. Anything else is an error; nothing is passed
//! through verbatim. `+` is left alone (it is not a space in URI components).

use thiserror::Error;

/// Errors produced while decoding a percent-encoded value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A `%` at `offset` is not followed by two hex digits.
    #[error("malformed escape at byte {offset}: '%' must be followed by two hex digits")]
    MalformedEscape { offset: usize },

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded bytes are not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Decode a percent-encoded URI component.
///
/// A value without any `%` escapes decodes to itself.
pub fn decode_component(input: &str) -> Result<String, DecodeError> {
    if !input.contains('%') {
        return Ok(input.to_string());
    }

    validate_escapes(input.as_bytes())?;

    let bytes = urlencoding::decode_binary(input.as_bytes()).into_owned();
    String::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8 {
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

/// Percent-encode text so that only RFC 3986 unreserved characters remain.
pub fn encode_component(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// `urlencoding` passes malformed escapes through untouched, so reject them first.
fn validate_escapes(bytes: &[u8]) -> Result<(), DecodeError> {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !well_formed {
                return Err(DecodeError::MalformedEscape { offset: i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
