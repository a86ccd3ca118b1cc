//! Deparaming querystrings, and typed access to the resulting tree.
//!
//! ### An overview of the design
//!
//! The `parse` module does all of the querystring work: it splits the input
//! into pairs, decodes each token, resolves bracketed keys into paths and
//! builds a tree of `Value`s one pair at a time. Shapes are decided when a
//! node is first created and never change afterwards (apart from a repeated
//! flat key turning into a sequence), so the tree can be built in a single
//! left-to-right pass without any backtracking.
//!
//! Optionally, `coerce` converts string values into booleans, null,
//! undefined and numbers before they are inserted.
//!
//! For callers who want their own types rather than a dynamic tree, `Value`
//! also implements `serde::Deserializer`. Uncoerced values are strings, so
//! string scalars and mapping keys go through `StringParsingDeserializer`,
//! which parses them into whatever primitive the visitor asks for.

mod coerce;
pub(crate) mod parse;
mod string_parser;

use serde::de::{self, Deserializer as _, IntoDeserializer};
use serde::de::value::{MapDeserializer, SeqDeserializer};

use crate::error::{Error, Result};
use crate::value::{MAX_SAFE_INTEGER, Mapping, Value};

use string_parser::StringParsingDeserializer;

/// Deparams a querystring (without coercion) and deserializes it into `T`.
///
/// ```
/// # use serde::Deserialize;
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Query {
///     name: String,
///     age: u8,
///     tags: Vec<String>,
/// }
///
/// let q: Query = serde_deparam::from_str("name=Alice&age=24&tags[]=a&tags[]=b").unwrap();
/// assert_eq!(
///     q,
///     Query {
///         name: "Alice".to_owned(),
///         age: 24,
///         tags: vec!["a".to_owned(), "b".to_owned()],
///     }
/// );
/// ```
pub fn from_str<T: de::DeserializeOwned>(input: &str) -> Result<T> {
    crate::Config::default().deserialize_str(input)
}

/// Deserializes an already deparamed tree into `T`.
pub fn from_value<T: de::DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(value)
}

fn visit_number<'de, V>(n: f64, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        visitor.visit_i64(n as i64)
    } else {
        visitor.visit_f64(n)
    }
}

fn visit_sequence<'de, V>(seq: Vec<Value>, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    let mut deserializer: SeqDeserializer<_, Error> = SeqDeserializer::new(seq.into_iter());
    let value = visitor.visit_seq(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

fn visit_mapping<'de, V>(map: Mapping, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    let entries = map
        .into_iter()
        .map(|(k, v)| (StringParsingDeserializer::new(k), v));
    let mut deserializer: MapDeserializer<'de, _, Error> = MapDeserializer::new(entries);
    let value = visitor.visit_map(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

macro_rules! deserialize_primitive {
    ($method:ident) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            match self {
                Value::String(s) => StringParsingDeserializer::new(s).$method(visitor),
                other => other.deserialize_any(visitor),
            }
        }
    };
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Undefined | Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => visit_number(n, visitor),
            Value::String(s) => visitor.visit_string(s),
            Value::Sequence(seq) => visit_sequence(seq, visitor),
            Value::Mapping(map) => visit_mapping(map, visitor),
        }
    }

    /// `Undefined`, `Null` and empty strings are all "nothing".
    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Undefined | Value::Null => visitor.visit_none(),
            Value::String(ref s) if s.is_empty() => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::String(ref s) if s.is_empty() => visitor.visit_unit(),
            other => other.deserialize_any(visitor),
        }
    }

    /// A single value where a sequence is expected is treated as a
    /// sequence of one, and a mapping contributes its values in order.
    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Sequence(seq) => visit_sequence(seq, visitor),
            Value::Mapping(map) => {
                visit_sequence(map.into_iter().map(|(_, v)| v).collect(), visitor)
            }
            other => visit_sequence(vec![other], visitor),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::String(s) => visitor.visit_enum(StringParsingDeserializer::new(s)),
            Value::Mapping(map) if map.len() == 1 => {
                let Some((variant, value)) = map.into_iter().next() else {
                    return Err(de::Error::custom("expected a single-entry mapping"));
                };
                visitor.visit_enum(VariantDeserializer { variant, value })
            }
            other => Err(de::Error::custom(format!(
                "expected a string or a single-entry mapping for an enum, got a {}",
                other.kind()
            ))),
        }
    }

    deserialize_primitive!(deserialize_bool);
    deserialize_primitive!(deserialize_i8);
    deserialize_primitive!(deserialize_i16);
    deserialize_primitive!(deserialize_i32);
    deserialize_primitive!(deserialize_i64);
    deserialize_primitive!(deserialize_u8);
    deserialize_primitive!(deserialize_u16);
    deserialize_primitive!(deserialize_u32);
    deserialize_primitive!(deserialize_u64);
    deserialize_primitive!(deserialize_f32);
    deserialize_primitive!(deserialize_f64);

    serde::forward_to_deserialize_any! {
        char str string bytes byte_buf unit_struct tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

/// An enum written as `kind[Variant]=...`: the single key names the variant
/// and its value holds the content.
struct VariantDeserializer {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for VariantDeserializer {
    type Error = Error;
    type Variant = Value;

    fn variant_seed<T>(self, seed: T) -> Result<(T::Value, Self::Variant)>
    where
        T: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(StringParsingDeserializer::new(self.variant))?;
        Ok((variant, self.value))
    }
}

impl<'de> de::VariantAccess<'de> for Value {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }
}
