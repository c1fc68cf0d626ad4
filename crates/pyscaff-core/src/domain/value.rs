//! Line-annotated document values.
//!
//! A [`Located`] pairs a [`Value`] with the 1-based line it was written on.
//! Containers hold located children, so every list element keeps its own
//! line independent of its runtime type.

use std::fmt;

use indexmap::IndexMap;

/// The shape of a parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Located>),
    Map(IndexMap<String, Located>),
}

impl Value {
    /// Build a list of strings whose elements share the given line.
    pub fn strings<I, S>(items: I, line: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            items
                .into_iter()
                .map(|s| Located::new(Value::Str(s.into()), line))
                .collect(),
        )
    }

    /// Human name of the shape, used in "expected ..." messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Map(_) => "dict",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Located]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The string elements of a list, skipping anything that is not a string.
    pub fn string_items(&self) -> Vec<String> {
        self.as_list()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i.value().as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item.value())?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {}", v.value())?;
                }
                f.write_str("}")
            }
        }
    }
}

/// A value together with the 1-based source line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    value: Value,
    line: usize,
}

impl Located {
    pub fn new(value: Value, line: usize) -> Self {
        Self { value, line }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Replace the value, keeping the original line for error continuity.
    pub fn with_value(self, value: Value) -> Self {
        Self {
            value,
            line: self.line,
        }
    }

    /// Move the value to a different line.
    pub fn at_line(self, line: usize) -> Self {
        Self {
            value: self.value,
            line,
        }
    }
}

/// One top-level field of a [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key_line: usize,
    pub value: Located,
}

/// Ordered mapping from field key to located value.
///
/// Created fresh by every parse and discarded at the end of each edit-verify
/// iteration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: IndexMap<String, Entry>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, key_line: usize, value: Located) {
        self.entries.insert(key.into(), Entry { key_line, value });
    }

    /// Replace the value under `key`, keeping its key line.
    ///
    /// A key that was absent is appended, located at the value's own line.
    pub fn set(&mut self, key: &str, value: Located) {
        match self.entries.get_mut(key) {
            Some(entry) => entry.value = value,
            None => {
                let key_line = value.line();
                self.insert(key, key_line, value);
            }
        }
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn get(&self, key: &str) -> Option<&Located> {
        self.entries.get(key).map(|e| &e.value)
    }

    /// The value under `key`, treating explicit `null` as absent.
    pub fn present(&self, key: &str) -> Option<&Located> {
        self.get(key).filter(|v| !v.value().is_null())
    }

    pub fn key_line(&self, key: &str) -> Option<usize> {
        self.entries.get(key).map(|e| e.key_line)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.value().as_str())
    }

    pub fn int_value(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.value().as_int())
    }

    pub fn bool_value(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.value().as_bool())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_value_keeps_line() {
        let v = Located::new(Value::from("  spaced  "), 7).with_value(Value::from("spaced"));
        assert_eq!(v.line(), 7);
        assert_eq!(v.value().as_str(), Some("spaced"));
    }

    #[test]
    fn set_keeps_key_line() {
        let mut doc = Document::new();
        doc.insert("flag", 3, Located::new(Value::from("yes"), 3));
        doc.set("flag", Located::new(Value::Bool(true), 3));
        assert_eq!(doc.key_line("flag"), Some(3));
        assert_eq!(doc.bool_value("flag"), Some(true));
    }

    #[test]
    fn present_treats_null_as_absent() {
        let mut doc = Document::new();
        doc.insert("namespace", 5, Located::new(Value::Null, 5));
        assert!(doc.get("namespace").is_some());
        assert!(doc.present("namespace").is_none());
    }

    #[test]
    fn keys_preserve_insertion_order() {
        let mut doc = Document::new();
        doc.insert("b", 1, Located::new(Value::Int(1), 1));
        doc.insert("a", 2, Located::new(Value::Int(2), 2));
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn display_renders_lists() {
        let v = Value::strings(["3.9", "3.10"], 1);
        assert_eq!(v.to_string(), "[3.9, 3.10]");
        assert_eq!(v.string_items(), vec!["3.9", "3.10"]);
    }
}
