//! Composable validation primitives.
//!
//! A [`Check`] is a function value taking the whole document (read-only, so
//! it can consult earlier fields) and the raw located value of its own field.
//! It either returns the normalized value or a verification error located at
//! the offending value or list element. Checks never panic and never loop.

use std::{cmp::Ordering, collections::BTreeSet, fmt, sync::Arc};

use crate::domain::{
    error::LocatedError,
    pattern::{Pattern, normalize_whitespace},
    value::{Document, Located, Value},
};

type CheckFn = dyn Fn(&Document, Located) -> Result<Located, LocatedError> + Send + Sync;

/// A validation procedure bound to a field.
#[derive(Clone)]
pub struct Check(Arc<CheckFn>);

impl Check {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Document, Located) -> Result<Located, LocatedError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Accepts any value unchanged.
    pub fn accept() -> Self {
        Self::new(|_, value| Ok(value))
    }

    pub fn run(&self, document: &Document, value: Located) -> Result<Located, LocatedError> {
        (self.0)(document, value)
    }

    /// Run `next` on the output of `self`.
    pub fn and_then(self, next: Check) -> Self {
        Self::new(move |doc, value| {
            let value = self.run(doc, value)?;
            next.run(doc, value)
        })
    }

    /// Infallible normalization applied after `self` succeeds.
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(&Document, Located) -> Located + Send + Sync + 'static,
    {
        Self::new(move |doc, value| self.run(doc, value).map(|v| f(doc, v)))
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Check(..)")
    }
}

fn expected(kind: &str, value: &Located) -> LocatedError {
    LocatedError::verification(
        Some(value.line()),
        format!("expected {kind}, found {}", value.value().type_name()),
    )
}

fn invalid(what: &str, value: &Located) -> LocatedError {
    LocatedError::verification(Some(value.line()), format!("Invalid {what} ({})", value.value()))
}

// ============================================================================
// Scalars
// ============================================================================

/// Any string, trimmed.
pub fn text() -> Check {
    Check::new(|_, value| match value.value() {
        Value::Str(s) => {
            let trimmed = s.trim().to_owned();
            Ok(value.with_value(Value::Str(trimmed)))
        }
        _ => Err(expected("str", &value)),
    })
}

/// Strings and lists must have at least one element.
pub fn non_empty() -> Check {
    Check::new(|_, value| {
        let empty = match value.value() {
            Value::Str(s) => s.trim().is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        };
        if empty {
            Err(LocatedError::verification(Some(value.line()), "value is empty"))
        } else {
            Ok(value)
        }
    })
}

/// Whitespace-normalized string matching `pattern`.
pub fn matches(pattern: Pattern) -> Check {
    Check::new(move |_, value| {
        let Some(raw) = value.value().as_str() else {
            return Err(expected("str", &value));
        };
        let normalized = normalize_whitespace(raw);
        if !pattern.is_match(&normalized) {
            return Err(LocatedError::verification(
                Some(value.line()),
                format!("Invalid {} ({raw})", pattern.name()),
            ));
        }
        Ok(value.with_value(Value::Str(normalized)))
    })
}

pub fn integer() -> Check {
    Check::new(|_, value| match value.value() {
        Value::Int(_) => Ok(value),
        _ => Err(expected("int", &value)),
    })
}

/// Integer within the inclusive bounds.
pub fn range(min: i64, max: i64) -> Check {
    integer().and_then(Check::new(move |_, value| match value.value().as_int() {
        Some(i) if (min..=max).contains(&i) => Ok(value),
        _ => Err(invalid("value", &value)),
    }))
}

/// Coerce native booleans, `0`/`1`, and yes/no style tokens.
pub fn boolean() -> Check {
    Check::new(|_, value| {
        let coerced = match value.value() {
            Value::Bool(b) => Some(*b),
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            Value::Int(_) => None,
            Value::Str(s) => match s.trim().to_lowercase().as_str() {
                "yes" | "y" | "true" | "t" | "1" => Some(true),
                "no" | "n" | "false" | "f" | "0" => Some(false),
                _ => None,
            },
            _ => return Err(expected("bool", &value)),
        };
        match coerced {
            Some(b) => Ok(value.with_value(Value::Bool(b))),
            None => Err(invalid("value", &value)),
        }
    })
}

// ============================================================================
// Normalizations
// ============================================================================

/// Append a trailing period to non-empty strings that lack one.
pub fn ensure_period(_: &Document, value: Located) -> Located {
    match value.value() {
        Value::Str(s) if !s.is_empty() && !s.ends_with('.') => {
            let with_period = format!("{s}.");
            value.with_value(Value::Str(with_period))
        }
        _ => value,
    }
}

/// Rewrite the obfuscated `name AT host` e-mail form.
pub fn replace_at_token() -> Check {
    Check::new(|_, value| match value.value() {
        Value::Str(s) if s.contains(" AT ") => {
            let replaced = s.replace(" AT ", "@");
            Ok(value.with_value(Value::Str(replaced)))
        }
        _ => Ok(value),
    })
}

// ============================================================================
// Lists
// ============================================================================

/// Ordering applied when a list is deduplicated and sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Lexical,
    /// Dotted versions compared as numeric tuples: `3.9` < `3.10`.
    Version,
}

impl SortKey {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Lexical => a.cmp(b),
            Self::Version => version_parts(a).cmp(&version_parts(b)),
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum VersionPart<'a> {
    Num(u64),
    Text(&'a str),
}

fn version_parts(version: &str) -> Vec<VersionPart<'_>> {
    version
        .split('.')
        .map(|p| p.parse().map_or(VersionPart::Text(p), VersionPart::Num))
        .collect()
}

/// What each list element must satisfy.
#[derive(Debug, Clone)]
pub enum ElementRule {
    Any,
    Pattern(Pattern),
    OneOf(BTreeSet<String>),
}

/// How a list-of-strings field is validated and normalized.
#[derive(Debug, Clone)]
pub struct ListPolicy {
    label: String,
    element: ElementRule,
    allow_empty: bool,
    sort: Option<SortKey>,
    fallback: Vec<String>,
    suffix: Vec<String>,
}

impl ListPolicy {
    /// Non-empty list of arbitrary strings, order kept.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            element: ElementRule::Any,
            allow_empty: false,
            sort: None,
            fallback: Vec::new(),
            suffix: Vec::new(),
        }
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.element = ElementRule::Pattern(pattern);
        self
    }

    pub fn one_of<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.element = ElementRule::OneOf(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Deduplicate and sort with `key`.
    pub fn sorted(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    /// Used in place of an empty list.
    pub fn fallback<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback = items.into_iter().map(Into::into).collect();
        self
    }

    /// Appended after validation and sorting, unless already present.
    pub fn suffix<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suffix = items.into_iter().map(Into::into).collect();
        self
    }

    fn element_ok(&self, item: &str) -> bool {
        match &self.element {
            ElementRule::Any => true,
            ElementRule::Pattern(p) => p.is_match(item),
            ElementRule::OneOf(choices) => choices.contains(item),
        }
    }
}

/// List of strings normalized according to `policy`.
pub fn string_list(policy: ListPolicy) -> Check {
    Check::new(move |_, value| {
        let list_line = value.line();
        let Some(items) = value.value().as_list() else {
            return Err(expected("list", &value));
        };

        if items.is_empty() && !policy.fallback.is_empty() {
            let fallback = Value::strings(policy.fallback.iter().cloned(), list_line);
            return Ok(value.with_value(fallback));
        }
        if items.is_empty() && !policy.allow_empty {
            return Err(LocatedError::verification(Some(list_line), "list is empty"));
        }

        let mut normalized = Vec::with_capacity(items.len() + policy.suffix.len());
        for item in items {
            let Some(raw) = item.value().as_str() else {
                return Err(expected("str", item));
            };
            let clean = normalize_whitespace(raw);
            if !policy.element_ok(&clean) {
                return Err(invalid(&policy.label, item));
            }
            normalized.push(item.clone().with_value(Value::Str(clean)));
        }

        if let Some(key) = policy.sort {
            normalized.sort_by(|a, b| {
                key.compare(
                    a.value().as_str().unwrap_or_default(),
                    b.value().as_str().unwrap_or_default(),
                )
            });
            normalized.dedup_by(|a, b| a.value() == b.value());
        }

        for extra in &policy.suffix {
            if !normalized.iter().any(|i| i.value().as_str() == Some(extra)) {
                normalized.push(Located::new(Value::Str(extra.clone()), list_line));
            }
        }

        Ok(value.with_value(Value::List(normalized)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(check: &Check, value: Value, line: usize) -> Result<Located, LocatedError> {
        check.run(&Document::new(), Located::new(value, line))
    }

    fn list(items: &[(&str, usize)]) -> Value {
        Value::List(
            items
                .iter()
                .map(|(s, l)| Located::new(Value::from(*s), *l))
                .collect(),
        )
    }

    #[test]
    fn text_trims_and_keeps_line() {
        let out = run(&text(), Value::from("  demo  "), 5).unwrap();
        assert_eq!(out.value().as_str(), Some("demo"));
        assert_eq!(out.line(), 5);
    }

    #[test]
    fn type_mismatch_names_expected_type() {
        let err = run(&text(), Value::Int(3), 7).unwrap_err();
        assert_eq!(err.line(), Some(7));
        assert!(err.detail().contains("expected str"));

        let err = run(&integer(), Value::from("x"), 2).unwrap_err();
        assert!(err.detail().contains("expected int"));
    }

    #[test]
    fn matches_normalizes_whitespace() {
        let check = matches(Pattern::keyword().unwrap());
        let out = run(&check, Value::from("  command   line "), 3).unwrap();
        assert_eq!(out.value().as_str(), Some("command line"));

        let err = run(&check, Value::from("x!"), 3).unwrap_err();
        assert_eq!(err.detail(), "Invalid keyword (x!)");
    }

    #[test]
    fn range_is_inclusive() {
        let check = range(0, 2);
        assert!(run(&check, Value::Int(0), 1).is_ok());
        assert!(run(&check, Value::Int(2), 1).is_ok());
        let err = run(&check, Value::Int(3), 9).unwrap_err();
        assert_eq!(err.line(), Some(9));
    }

    #[test]
    fn boolean_coercion_table() {
        let check = boolean();
        let truthy = [
            Value::from("yes"),
            Value::from("y"),
            Value::from("true"),
            Value::from("t"),
            Value::from("1"),
            Value::from("YES"),
            Value::Int(1),
            Value::Bool(true),
        ];
        for v in truthy {
            let shown = v.to_string();
            assert_eq!(run(&check, v, 1).unwrap().value(), &Value::Bool(true), "{shown}");
        }
        let falsy = [
            Value::from("no"),
            Value::from("n"),
            Value::from("false"),
            Value::from("f"),
            Value::from("0"),
            Value::Int(0),
            Value::Bool(false),
        ];
        for v in falsy {
            let shown = v.to_string();
            assert_eq!(run(&check, v, 1).unwrap().value(), &Value::Bool(false), "{shown}");
        }
        let err = run(&check, Value::from("maybe"), 12).unwrap_err();
        assert_eq!(err.line(), Some(12));
        assert!(run(&check, Value::Int(2), 1).is_err());
    }

    #[test]
    fn non_empty_rejects_blank() {
        assert!(run(&non_empty(), Value::from("   "), 1).is_err());
        assert!(run(&non_empty(), Value::List(vec![]), 1).is_err());
        assert!(run(&non_empty(), Value::from("x"), 1).is_ok());
    }

    #[test]
    fn ensure_period_appends_once() {
        let check = text().map(ensure_period);
        let out = run(&check, Value::from("A tool"), 1).unwrap();
        assert_eq!(out.value().as_str(), Some("A tool."));
        let out = run(&check, Value::from("A tool."), 1).unwrap();
        assert_eq!(out.value().as_str(), Some("A tool."));
    }

    #[test]
    fn at_token_becomes_at_sign() {
        let out = run(&replace_at_token(), Value::from("jane AT example.com"), 1).unwrap();
        assert_eq!(out.value().as_str(), Some("jane@example.com"));
    }

    #[test]
    fn version_sort_is_numeric() {
        let check = string_list(ListPolicy::new("version").sorted(SortKey::Version));
        let out = run(&check, list(&[("3.10", 2), ("3.9", 3)]), 1).unwrap();
        assert_eq!(out.value().string_items(), vec!["3.9", "3.10"]);

        let out = run(&check, list(&[("3.9", 2), ("3.6", 3), ("3.7", 4)]), 1).unwrap();
        assert_eq!(out.value().string_items(), vec!["3.6", "3.7", "3.9"]);
    }

    #[test]
    fn sort_deduplicates() {
        let check = string_list(ListPolicy::new("keyword").sorted(SortKey::Lexical));
        let out = run(&check, list(&[("b", 2), ("a", 3), ("b", 4)]), 1).unwrap();
        assert_eq!(out.value().string_items(), vec!["a", "b"]);
    }

    #[test]
    fn bad_element_fails_at_its_own_line() {
        let check = string_list(ListPolicy::new("requirement").pattern(Pattern::requirement().unwrap()));
        let err = run(&check, list(&[("click", 11), ("bad req!", 12)]), 10).unwrap_err();
        assert_eq!(err.line(), Some(12));
        assert_eq!(err.detail(), "Invalid requirement (bad req!)");
    }

    #[test]
    fn empty_list_policy() {
        let strict = string_list(ListPolicy::new("platform"));
        let err = run(&strict, Value::List(vec![]), 4).unwrap_err();
        assert_eq!(err.line(), Some(4));

        let lenient = string_list(ListPolicy::new("requirement").allow_empty());
        assert!(run(&lenient, Value::List(vec![]), 4).is_ok());

        let fallback = string_list(ListPolicy::new("version").fallback(["3.12", "3.13"]));
        let out = run(&fallback, Value::List(vec![]), 4).unwrap();
        assert_eq!(out.value().string_items(), vec!["3.12", "3.13"]);
    }

    #[test]
    fn membership_and_suffix() {
        let check = string_list(
            ListPolicy::new("classifier")
                .one_of(["Topic :: Utilities", "Typing :: Typed"])
                .allow_empty()
                .sorted(SortKey::Lexical)
                .suffix(["License :: OSI Approved :: MIT License"]),
        );
        let out = run(&check, list(&[("Typing :: Typed", 2), ("Topic :: Utilities", 3)]), 1).unwrap();
        assert_eq!(
            out.value().string_items(),
            vec![
                "Topic :: Utilities",
                "Typing :: Typed",
                "License :: OSI Approved :: MIT License"
            ]
        );

        let err = run(&check, list(&[("Nope :: Nope", 5)]), 1).unwrap_err();
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn non_string_element_is_rejected() {
        let check = string_list(ListPolicy::new("keyword"));
        let value = Value::List(vec![Located::new(Value::Int(3), 8)]);
        let err = run(&check, value, 7).unwrap_err();
        assert_eq!(err.line(), Some(8));
        assert!(err.detail().contains("expected str"));
    }
}
