//! Line-tracking document reader.
//!
//! Parses document text into a [`Document`] whose top-level values, list
//! elements and nested mapping values all carry the 1-based line they start
//! on. Annotation is purely structural: the reader knows nothing about field
//! semantics, so the same reader serves any schema.
//!
//! `marked-yaml` does the YAML work and hands back span-carrying nodes with
//! untyped scalars. Plain scalars are resolved here with the YAML 1.2 core
//! tokens for null, booleans and integers; quoted and block scalars always
//! stay strings. Duplicate keys are parse errors. Floats are deliberately not resolved so that version strings
//! such as `3.10` survive intact.

use marked_yaml::{LoaderOptions, Node, Span};
use regex::Regex;
use tracing::{instrument, trace};

use crate::domain::{
    error::LocatedError,
    value::{Document, Located, Value},
};

/// Source id handed to `marked-yaml`; there is only ever one document.
const SOURCE_ID: usize = 0;

/// Parse `text` into a line-annotated [`Document`].
///
/// Pure function. A syntax error becomes a parse-kind [`LocatedError`]
/// carrying the best line the YAML error reports, or no line at all.
#[instrument(skip_all, fields(bytes = text.len()))]
pub fn parse(text: &str) -> Result<Document, LocatedError> {
    if is_blank(text) {
        return Ok(Document::new());
    }

    let options = LoaderOptions::default().error_on_duplicate_keys(true);
    let root = marked_yaml::parse_yaml_with_options(SOURCE_ID, text, options).map_err(|e| {
        let message = e.to_string();
        LocatedError::parse(error_line(&message), message)
    })?;

    let Node::Mapping(mapping) = &root else {
        return Err(LocatedError::parse(
            Some(span_line(root.span())),
            format!(
                "expected a mapping of fields at the top level, found a {}",
                node_kind(&root)
            ),
        ));
    };

    let mut document = Document::new();
    for (key, node) in mapping.iter() {
        let key_line = span_line(key.span());
        let value = convert(node, key_line);
        trace!(key = key.as_str(), key_line, line = value.line(), "field read");
        document.insert(key.as_str(), key_line, value);
    }

    Ok(document)
}

/// Convert a marked node. `owner_line` locates values that have no position
/// of their own (nulls).
fn convert(node: &Node, owner_line: usize) -> Located {
    match node {
        Node::Scalar(scalar) => {
            let marker = scalar.span().start();
            // Only plain scalars may resolve to null, bool or int.
            let value = if scalar.may_coerce() {
                resolve_plain(scalar.as_str())
            } else {
                Value::Str(scalar.as_str().to_owned())
            };
            let line = match (&value, marker) {
                (Value::Null, _) | (_, None) => owner_line,
                (_, Some(m)) => m.line(),
            };
            Located::new(value, line)
        }
        Node::Sequence(sequence) => {
            let line = span_line_or(sequence.span(), owner_line);
            let items = sequence
                .iter()
                .map(|item| convert(item, line))
                .collect();
            Located::new(Value::List(items), line)
        }
        Node::Mapping(mapping) => {
            let line = span_line_or(mapping.span(), owner_line);
            let map = mapping
                .iter()
                .map(|(k, v)| {
                    let key_line = span_line_or(k.span(), line);
                    (k.as_str().to_owned(), convert(v, key_line))
                })
                .collect();
            Located::new(Value::Map(map), line)
        }
    }
}

/// Resolve an unquoted scalar.
fn resolve_plain(text: &str) -> Value {
    match text {
        "" | "~" | "null" | "Null" | "NULL" => Value::Null,
        "true" | "True" | "TRUE" => Value::Bool(true),
        "false" | "False" | "FALSE" => Value::Bool(false),
        _ => parse_int(text)
            .map(Value::Int)
            .unwrap_or_else(|| Value::Str(text.to_owned())),
    }
}

fn parse_int(text: &str) -> Option<i64> {
    if let Some(hex) = text.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(oct) = text.strip_prefix("0o") {
        return i64::from_str_radix(oct, 8).ok();
    }
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Start line of a span; `0` (unknown) if the span has no start.
fn span_line(span: &Span) -> usize {
    span_line_or(span, 0)
}

fn span_line_or(span: &Span, fallback: usize) -> usize {
    span.start().map_or(fallback, |m| m.line())
}

fn node_kind(node: &Node) -> &'static str {
    match node {
        Node::Scalar(_) => "scalar",
        Node::Sequence(_) => "list",
        Node::Mapping(_) => "mapping",
    }
}

/// Documents made only of comments and blank lines are empty mappings.
fn is_blank(text: &str) -> bool {
    text.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#') || l == "---" || l == "..."
    })
}

/// Best-effort line number out of a YAML error message.
///
/// Scanner errors read `... at line N column M`; loader errors lead with a
/// `N:M` marker.
fn error_line(message: &str) -> Option<usize> {
    let patterns = [r"at line (\d+)", r"^(\d+):\d+", r"line (\d+)"];
    patterns.iter().find_map(|p| {
        Regex::new(p)
            .ok()?
            .captures(message)?
            .get(1)?
            .as_str()
            .parse()
            .ok()
    })
}
