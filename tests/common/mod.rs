//! Fixture helpers shared by the integration tests.
//!
//! `param` is a small port of jQuery's `$.param` (non-traditional mode), the
//! serializer whose output `deparam` is meant to invert. It only exists to
//! build querystrings for round-trip tests.
#![allow(dead_code)]

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use serde_deparam::{Mapping, Value};

/// The characters `encodeURIComponent` leaves alone.
const URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, URI_COMPONENT_SET).to_string()
}

/// Serializes a mapping the way `$.param` does, with spaces as `+`.
pub fn param(map: &Mapping) -> String {
    let mut pairs = Vec::new();
    for (key, value) in map {
        build_params(key, value, &mut pairs);
    }
    pairs.join("&").replace("%20", "+")
}

fn build_params(prefix: &str, value: &Value, pairs: &mut Vec<String>) {
    match value {
        Value::Sequence(seq) => {
            for (i, element) in seq.iter().enumerate() {
                if prefix.ends_with("[]") {
                    add(prefix, element, pairs);
                } else if element.is_scalar() {
                    build_params(&format!("{prefix}[]"), element, pairs);
                } else {
                    build_params(&format!("{prefix}[{i}]"), element, pairs);
                }
            }
        }
        Value::Mapping(map) => {
            for (name, element) in map {
                build_params(&format!("{prefix}[{name}]"), element, pairs);
            }
        }
        scalar => add(prefix, scalar, pairs),
    }
}

fn add(key: &str, value: &Value, pairs: &mut Vec<String>) {
    let text = match value {
        Value::Undefined | Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) | Value::Mapping(_) => "[object Object]".to_owned(),
    };
    pairs.push(format!("{}={}", encode_component(key), encode_component(&text)));
}

/// Converts a `serde_json::Value` literal into a deparam `Value`.
pub fn value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(seq) => Value::Sequence(seq.into_iter().map(value).collect()),
        serde_json::Value::Object(map) => map.into_iter().map(|(k, v)| (k, value(v))).collect(),
    }
}

/// Like [`value`], for a JSON object at the top level.
pub fn mapping(json: serde_json::Value) -> Mapping {
    match value(json) {
        Value::Mapping(map) => map,
        other => panic!("expected a JSON object, got {other:?}"),
    }
}

/// The name JavaScript's `typeOf` helper would give a value.
pub fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "object",
    }
}
