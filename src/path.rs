//! Dotted property paths over row values.
//!
//! A [`PropertyPath`] like `address.city` walks a row by successive property
//! access. Objects are indexed by key, arrays by decimal position. Reads never
//! fail: a missing segment yields `None`. Writes create missing intermediate
//! objects but refuse to descend through scalars.

use std::fmt;

use serde_json::{Map, Value};

/// Errors from writing through a property path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty property path")]
    Empty,
    #[error("cannot write `{path}`: segment `{segment}` is not an object or array slot")]
    NotWritable { path: String, segment: String },
}

/// A dot-separated property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// Parse a path. Surrounding whitespace is ignored; an empty string gives
    /// an empty path, which never resolves.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self {
                segments: Vec::new(),
            };
        }
        Self {
            segments: raw.split('.').map(str::to_owned).collect(),
        }
    }

    /// The individual segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk `root` along this path.
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        if self.segments.is_empty() {
            return None;
        }
        self.segments
            .iter()
            .try_fold(root, |current, segment| step(current, segment))
    }

    /// Write `value` at this path inside `root`.
    ///
    /// Missing intermediate properties on objects are created as empty objects.
    ///
    /// # Errors
    ///
    /// [`PathError::Empty`] for an empty path, [`PathError::NotWritable`] when a
    /// segment lands on a scalar or an out-of-range array slot.
    pub fn assign(&self, root: &mut Value, value: Value) -> Result<(), PathError> {
        let Some((last, parents)) = self.segments.split_last() else {
            return Err(PathError::Empty);
        };

        let mut current = root;
        for segment in parents {
            current = match current {
                Value::Object(map) => map
                    .entry(segment.clone())
                    .or_insert_with(|| Value::Object(Map::new())),
                Value::Array(items) => match array_slot(items, segment) {
                    Some(slot) => slot,
                    None => return Err(self.not_writable(segment)),
                },
                _ => return Err(self.not_writable(segment)),
            };
        }

        match current {
            Value::Object(map) => {
                map.insert(last.clone(), value);
                Ok(())
            }
            Value::Array(items) => match array_slot(items, last) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(self.not_writable(last)),
            },
            _ => Err(self.not_writable(last)),
        }
    }

    fn not_writable(&self, segment: &str) -> PathError {
        PathError::NotWritable {
            path: self.to_string(),
            segment: segment.to_owned(),
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn array_slot<'a>(items: &'a mut [Value], segment: &str) -> Option<&'a mut Value> {
    segment.parse::<usize>().ok().and_then(|i| items.get_mut(i))
}
