use std::borrow::Cow;
use std::mem;

use crate::error::Result;
use crate::map::Entry;
use crate::value::{Mapping, Value};

use super::coerce::coerce;

mod decode;

/// Parses `query` into a fresh result tree.
pub fn parse(query: &str, config: crate::Config) -> Result<Mapping> {
    let mut parser = Parser::new(config);
    parser.parse(query)?;
    Ok(parser.root)
}

/// Splits a decoded key into its path segments.
///
/// A key is only treated as a bracketed path when its first `][`-delimited
/// part contains a `[` and its last part ends with a `]`. Everything else,
/// including unbalanced keys such as `a[b` or `a]`, is a single segment.
///
/// ```text
/// "a"        -> ["a"]
/// "a[]"      -> ["a", ""]
/// "a[b][c]"  -> ["a", "b", "c"]
/// "a[b][]"   -> ["a", "b", ""]
/// "a[b"      -> ["a[b"]
/// ```
pub fn key_segments(key: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = key.split("][").collect();
    let last = parts.len() - 1;

    let balanced = parts[0].contains('[') && parts[last].ends_with(']');
    if !balanced {
        return vec![key];
    }

    parts[last] = &parts[last][..parts[last].len() - 1];
    let mut segments: Vec<&str> = parts[0].split('[').collect();
    segments.extend_from_slice(&parts[1..]);
    segments
}

/// A segment that selects a sequence slot when the next node is created:
/// empty (push) or all ASCII digits.
fn is_sequence_segment(segment: &str) -> bool {
    segment.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a canonical array index: `0`, or digits without a leading zero.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || (segment.len() > 1 && segment.starts_with('0')) {
        return None;
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Builds the result tree one pair at a time, strictly left to right.
struct Parser {
    root: Mapping,
    config: crate::Config,
}

impl Parser {
    fn new(config: crate::Config) -> Self {
        Parser {
            root: Mapping::default(),
            config,
        }
    }

    fn parse(&mut self, query: &str) -> Result<()> {
        // `+` and ` ` are both one byte, so offsets into `query` stay valid
        let query = query.replace('+', " ");

        let mut offset = 0;
        for pair in query.split('&') {
            self.parse_pair(pair, offset)?;
            offset += pair.len() + 1;
        }
        Ok(())
    }

    fn parse_pair(&mut self, pair: &str, offset: usize) -> Result<()> {
        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (pair, None),
        };

        let key = decode::decode(raw_key, offset)?;
        let value = match raw_value {
            Some(raw) => Some(decode::decode(raw, offset + raw_key.len() + 1)?),
            None => None,
        };
        tracing::trace!(key = %key, value = ?value, "decoded pair");

        if key.is_empty() {
            return Ok(());
        }

        let Some(value) = value else {
            // valueless pairs are never split into a path
            let placeholder = self.placeholder();
            self.root.insert(key.into_owned(), placeholder);
            return Ok(());
        };

        let value = self.convert(value);
        match key_segments(&key).as_slice() {
            [simple] => self.insert_simple(simple, value),
            path => self.insert_path(path, value),
        }
        Ok(())
    }

    fn convert(&self, value: Cow<'_, str>) -> Value {
        if self.config.coerce {
            coerce(value)
        } else {
            Value::String(value.into_owned())
        }
    }

    /// The value stored for a pair that has no `=` at all.
    fn placeholder(&self) -> Value {
        if self.config.coerce {
            Value::Undefined
        } else {
            Value::String(String::new())
        }
    }

    /// Inserts a flat `key=value` pair, promoting repeated keys to a sequence.
    fn insert_simple(&mut self, key: &str, value: Value) {
        match self.root.entry(key.to_owned()) {
            Entry::Occupied(mut o) => match o.get_mut() {
                Value::Sequence(seq) => seq.push(value),
                existing => {
                    let first = mem::take(existing);
                    *existing = Value::Sequence(vec![first, value]);
                }
            },
            Entry::Vacant(v) => {
                v.insert(value);
            }
        }
    }

    /// Walks `path` from the root, creating containers on the way, and writes
    /// `value` into the slot named by the last segment.
    ///
    /// Writes that do not fit the shape already present are dropped.
    fn insert_path(&mut self, path: &[&str], value: Value) {
        let max_index = self.config.max_index;
        let (last, parents) = match path.split_last() {
            Some((last, parents)) if !parents.is_empty() => (*last, parents),
            _ => return,
        };

        let mut current = match mapping_child(&mut self.root, parents[0], path[1]) {
            Some(node) => node,
            None => return,
        };
        for (i, segment) in parents.iter().enumerate().skip(1) {
            current = match child(current, segment, path[i + 1], max_index) {
                Some(node) => node,
                None => {
                    tracing::debug!(
                        path = ?path,
                        segment,
                        "dropping write below a scalar or out-of-range slot"
                    );
                    return;
                }
            };
        }

        if !write(current, last, value, max_index) {
            tracing::debug!(
                path = ?path,
                segment = last,
                "dropping write that does not fit the existing sequence"
            );
        }
    }
}

/// A fresh container for the node that `next` will index into.
fn container_for(next: &str) -> Value {
    if is_sequence_segment(next) {
        Value::Sequence(Vec::new())
    } else {
        Value::Mapping(Mapping::default())
    }
}

/// Turns a falsy slot into a container for `next`, and hands back
/// containers as they are. Other scalars cannot be descended into.
fn descend<'v>(slot: &'v mut Value, next: &str) -> Option<&'v mut Value> {
    if slot.is_falsy() {
        *slot = container_for(next);
    }
    if slot.is_scalar() {
        tracing::debug!(kind = slot.kind(), "cannot nest below a scalar");
        return None;
    }
    Some(slot)
}

fn mapping_key(segment: &str) -> String {
    if segment.is_empty() {
        // a mapping has no length to append at
        "undefined".to_owned()
    } else {
        segment.to_owned()
    }
}

fn sequence_index(seq: &[Value], segment: &str, max_index: usize) -> Option<usize> {
    let index = if segment.is_empty() {
        seq.len()
    } else {
        parse_index(segment)?
    };
    (index <= max_index).then_some(index)
}

/// Makes sure `seq[index]` exists, padding any gap with `Undefined` holes.
fn sequence_slot(seq: &mut Vec<Value>, index: usize) -> &mut Value {
    if index >= seq.len() {
        seq.resize(index + 1, Value::Undefined);
    }
    &mut seq[index]
}

fn mapping_child<'v>(map: &'v mut Mapping, segment: &str, next: &str) -> Option<&'v mut Value> {
    let key = mapping_key(segment);
    let slot = map.entry(key).or_insert(Value::Undefined);
    descend(slot, next)
}

fn child<'v>(
    node: &'v mut Value,
    segment: &str,
    next: &str,
    max_index: usize,
) -> Option<&'v mut Value> {
    match node {
        Value::Mapping(map) => mapping_child(map, segment, next),
        Value::Sequence(seq) => {
            let index = sequence_index(seq, segment, max_index)?;
            descend(sequence_slot(seq, index), next)
        }
        _ => None,
    }
}

/// Writes `value` into the slot `segment` of the container `node`,
/// overwriting whatever was there. Returns `false` if the write was dropped.
fn write(node: &mut Value, segment: &str, value: Value, max_index: usize) -> bool {
    match node {
        Value::Mapping(map) => {
            let key = mapping_key(segment);
            map.insert(key, value);
            true
        }
        Value::Sequence(seq) => match sequence_index(seq, segment, max_index) {
            Some(index) => {
                *sequence_slot(seq, index) = value;
                true
            }
            None => false,
        },
        _ => false,
    }
}
