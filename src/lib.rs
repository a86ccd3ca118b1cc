//! Deparam querystrings into nested dynamic values
//!
//! Querystrings are not formally defined and loosely take the form of
//! _nested_ urlencoded queries. This library turns one back into the nested
//! structure it was built from, mirroring what jQuery's `$.deparam` does for
//! the output of `$.param`.
//!
//! ## Syntax
//!
//! * `a=1&b=2` sets flat keys.
//! * `a=1&a=2` repeats a flat key, which becomes a sequence `["1", "2"]`.
//! * `a[b][c]=1` builds nested mappings.
//! * `a[]=1&a[]=2` pushes onto a sequence, `a[0]=1` writes to an index.
//! * `+` is a space, and keys and values are percent-decoded.
//!
//! Whether a new node is a sequence or a mapping is decided when it is first
//! created, by looking at the segment that follows it: an empty or numeric
//! segment creates a sequence, anything else a mapping.
//!
//! ## Coercion
//!
//! By default every value is a string. With coercion enabled, `true`,
//! `false`, `null`, `undefined` and numbers that print back to the same text
//! are converted into the matching `Value`.
//!
//! ## Usage
//!
//! ```
//! use serde_deparam::{deparam, Value};
//!
//! let params = deparam("a[]=4&a[]=5&b[x][]=7&b[y]=8&c=true", true).unwrap();
//!
//! assert_eq!(
//!     params["a"],
//!     Value::Sequence(vec![Value::Number(4.0), Value::Number(5.0)])
//! );
//! assert_eq!(params["b"]["x"][0], Value::Number(7.0));
//! assert_eq!(params["b"]["y"], Value::Number(8.0));
//! assert_eq!(params["c"], Value::Bool(true));
//! ```
//!
//! `Value` also implements `serde::Deserializer`, so a querystring can be
//! deparamed straight into your own types with [`from_str`].

mod config;
mod de;
mod error;
mod map;
mod value;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use de::{from_str, from_value};
pub use error::{Error, Result};
pub use map::Map;
pub use value::{Mapping, Value, ValueIndex};

/// Deparams a querystring into a nested tree.
///
/// `query` is the part of a URL after the `?`. With `coerce` set, string
/// values are converted into booleans, null, undefined and numbers where
/// they match exactly.
///
/// Malformed brackets, missing values and repeated keys never fail; the only
/// error is a token that cannot be percent-decoded.
///
/// ```
/// use serde_deparam::{deparam, Value};
///
/// let params = deparam("a=1&a=2&a=3", false).unwrap();
/// assert_eq!(
///     params["a"],
///     Value::Sequence(vec!["1".into(), "2".into(), "3".into()])
/// );
///
/// assert!(deparam("bad=%zz", false).is_err());
/// ```
pub fn deparam(query: &str, coerce: bool) -> Result<Mapping> {
    Config::new().coerce(coerce).deparam(query)
}
