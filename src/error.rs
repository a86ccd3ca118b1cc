use serde::de;

use std::fmt::{self, Display};
use std::str;

/// Errors that can occur while deparaming a querystring.
///
/// Malformed brackets, missing values and duplicate keys are not errors:
/// those fall back to well-defined shapes. The only failures come from
/// decoding a token, or from the typed deserialization layer.
#[derive(Debug)]
pub enum Error {
    /// A `%` that is not followed by two hexadecimal digits.
    ///
    /// `position` is the byte offset of the `%` in the input.
    InvalidEscape { position: usize },
    /// A percent-decoded token is not valid UTF-8.
    Utf8(str::Utf8Error),
    /// Custom message raised while deserializing a `Value` into a typed output.
    Custom(String),
}

impl Error {
    /// Generate an escape error at the given byte offset.
    pub fn invalid_escape(position: usize) -> Self {
        Error::InvalidEscape { position }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEscape { position } => {
                write!(f, "malformed percent-encoding at position {position}")
            }
            Error::Utf8(e) => write!(f, "decoded token is not valid UTF-8: {e}"),
            Error::Custom(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Utf8(e) => Some(e),
            _ => None,
        }
    }
}

impl From<str::Utf8Error> for Error {
    fn from(e: str::Utf8Error) -> Self {
        Error::Utf8(e)
    }
}

impl de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
