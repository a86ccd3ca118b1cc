use std::borrow::Cow;

use crate::error::{Error, Result};

#[inline(always)]
fn is_hex(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

/// Decodes a single key or value token.
///
/// `+` has already been turned into a space by the caller, so this only has
/// to deal with percent-escapes. Unlike a lenient form decoder, a `%` that is
/// not followed by two hex digits is an error, as is a decoded byte sequence
/// that is not valid UTF-8. `offset` is the position of the token in the full
/// querystring and is only used for error reporting.
///
/// Avoids allocating when the token contains no escapes.
pub fn decode(token: &str, offset: usize) -> Result<Cow<'_, str>> {
    let bytes = token.as_bytes();
    let Some(first) = bytes.iter().position(|&b| b == b'%') else {
        return Ok(Cow::Borrowed(token));
    };

    let mut idx = first;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            match bytes.get(idx + 1..idx + 3) {
                Some(&[h, l]) if is_hex(h) && is_hex(l) => idx += 3,
                _ => return Err(Error::invalid_escape(offset + idx)),
            }
        } else {
            idx += 1;
        }
    }

    let decoded = percent_encoding::percent_decode(bytes).decode_utf8()?;
    Ok(decoded)
}
