use std::fmt;
use std::ops::Index;

use serde::ser::{self, SerializeMap, SerializeSeq};

use crate::map::Map;

/// A string-keyed node of the result tree. The root of every deparam result
/// is a `Mapping`.
pub type Mapping = Map<String, Value>;

/// A node of the deparamed tree.
///
/// Scalars come straight from the decoded querystring (`String`) or from
/// coercion (`Undefined`, `Null`, `Bool`, `Number`). Containers are created
/// by bracketed keys (`a[b]=1`, `a[]=1`) or by repeating a flat key
/// (`a=1&a=2`).
#[derive(Clone, PartialEq, Default)]
pub enum Value {
    /// The explicit "absent" marker, e.g. a coerced `a` with no `=`.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

static UNDEFINED: Value = Value::Undefined;

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `true` for the scalars JavaScript treats as false in a condition:
    /// `undefined`, `null`, `false`, `0`, `NaN` and the empty string.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null | Value::Bool(false) => true,
            Value::Number(n) => *n == 0.0 || n.is_nan(),
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// `true` for anything that is neither a sequence nor a mapping.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key in a mapping, or an index in a sequence.
    ///
    /// Only entries that were actually written count; there are no inherited
    /// members, so keys such as `hasOwnProperty` or `__proto__` behave like
    /// any other name.
    pub fn get<I: ValueIndex>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }

    /// A short name for the kind of node, used in log events and errors.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

/// Types that can index into a `Value`: `&str` for mappings and `usize` for
/// sequences.
pub trait ValueIndex {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value>;
}

impl ValueIndex for str {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        match v {
            Value::Mapping(map) => map.get(self),
            _ => None,
        }
    }
}

impl ValueIndex for String {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        self.as_str().index_into(v)
    }
}

impl ValueIndex for usize {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        match v {
            Value::Sequence(seq) => seq.get(*self),
            _ => None,
        }
    }
}

impl<T: ValueIndex + ?Sized> ValueIndex for &T {
    fn index_into<'v>(&self, v: &'v Value) -> Option<&'v Value> {
        (**self).index_into(v)
    }
}

/// Missing keys and out-of-range indices evaluate to `Value::Undefined`.
impl<I: ValueIndex> Index<I> for Value {
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        index.index_into(self).unwrap_or(&UNDEFINED)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Sequence(seq) => f.debug_list().entries(seq.iter()).finish(),
            Value::Mapping(map) => f.debug_map().entries(map.iter()).finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(seq: Vec<Value>) -> Self {
        Value::Sequence(seq)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Value::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Largest magnitude below which every integral `f64` is exactly
/// representable as an `i64`.
pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl ser::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(seq) => {
                let mut state = serializer.serialize_seq(Some(seq.len()))?;
                for element in seq {
                    state.serialize_element(element)?;
                }
                state.end()
            }
            Value::Mapping(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Mapping, Value};

    use pretty_assertions::assert_eq;

    #[test]
    fn index_missing_is_undefined() {
        let value: Value = [("a", Value::from("1"))].into_iter().collect();
        assert_eq!(value["a"], Value::from("1"));
        assert_eq!(value["b"], Value::Undefined);
        assert_eq!(value[0], Value::Undefined);
        assert_eq!(value["a"]["nested"], Value::Undefined);
    }

    #[test]
    fn index_sequence() {
        let value = Value::Sequence(vec!["x".into(), true.into()]);
        assert_eq!(value[1], Value::Bool(true));
        assert_eq!(value.get(2), None);
    }

    #[test]
    fn falsy_values() {
        for value in [
            Value::Undefined,
            Value::Null,
            Value::Bool(false),
            Value::Number(0.0),
            Value::Number(-0.0),
            Value::Number(f64::NAN),
            Value::from(""),
        ] {
            assert!(value.is_falsy(), "{value:?}");
        }
        for value in [
            Value::Bool(true),
            Value::Number(1.0),
            Value::from("0"),
            Value::Sequence(Vec::new()),
            Value::Mapping(Mapping::default()),
        ] {
            assert!(!value.is_falsy(), "{value:?}");
        }
    }

    #[test]
    fn reserved_names_are_plain_keys() {
        let mut map = Mapping::default();
        map.insert("__proto__".to_owned(), "p".into());
        let value = Value::Mapping(map);
        assert_eq!(value["__proto__"].as_str(), Some("p"));
        assert_eq!(value.get("constructor"), None);
    }

    #[test]
    fn serialize_as_json() {
        let value: Value = [
            ("int", Value::Number(4.0)),
            ("float", Value::Number(1.5)),
            ("nothing", Value::Undefined),
            ("list", Value::Sequence(vec![Value::Null, "s".into()])),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            serde_json::json!({"int": 4, "float": 1.5, "nothing": null, "list": [null, "s"]})
        );
    }
}
