use serde::de;

use crate::error::Result;
use crate::value::Mapping;

/// Configuration for deparaming behavior.
///
/// The `Config` struct allows you to customize how `serde_deparam` turns a
/// querystring into a tree of `Value`s.
///
/// ## Coercion
///
/// With `coerce` enabled, string values are converted into richer scalars:
/// `true`/`false` become booleans, `null` becomes `Value::Null`, `undefined`
/// becomes `Value::Undefined`, and numbers become `Value::Number` when they
/// print back to exactly the same text. Keys without a `=` are stored as
/// `Value::Undefined` instead of an empty string.
///
/// Default value: `coerce = false`
///
/// ```
/// use serde_deparam::{Config, Value};
///
/// let map = Config::new().coerce(true).deparam("a=1&b=true&c=01").unwrap();
/// assert_eq!(map["a"], Value::Number(1.0));
/// assert_eq!(map["b"], Value::Bool(true));
/// assert_eq!(map["c"], Value::from("01"));
/// ```
///
/// ## Sequence index limit
///
/// Writing `a[5]=x` into an empty sequence pads indices `0..5` with
/// `Value::Undefined`. The `max_index` parameter bounds how far a single
/// write can grow a sequence; writes to larger indices are dropped.
///
/// Default value: `max_index = 1000`
///
/// ```
/// use serde_deparam::{Config, Value};
///
/// let map = Config::new().max_index(10).deparam("a[2]=x&a[11]=y").unwrap();
/// assert_eq!(
///     map["a"],
///     Value::Sequence(vec![Value::Undefined, Value::Undefined, "x".into()])
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub(crate) coerce: bool,
    pub(crate) max_index: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            coerce: false,
            max_index: 1000,
        }
    }

    /// Converts string values into booleans, null, undefined and numbers
    /// where they match exactly. Default is `false`.
    pub const fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    /// Specifies the largest sequence index a querystring may write to.
    /// Default is 1000.
    pub const fn max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }

    /// Deparams a querystring from a `&str` using this `Config`.
    pub fn deparam(self, input: &str) -> Result<Mapping> {
        crate::de::parse::parse(input, self)
    }

    /// Deparams a querystring from a `&[u8]` using this `Config`.
    ///
    /// The raw input must be valid UTF-8; percent-escapes inside it are
    /// decoded per token.
    pub fn deparam_bytes(self, input: &[u8]) -> Result<Mapping> {
        self.deparam(std::str::from_utf8(input)?)
    }

    /// Deparams a querystring and deserializes the resulting tree into `T`.
    pub fn deserialize_str<T: de::DeserializeOwned>(self, input: &str) -> Result<T> {
        let map = self.deparam(input)?;
        crate::de::from_value(crate::Value::Mapping(map))
    }
}
