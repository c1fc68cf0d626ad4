//! Declarative field rules.

use std::{fmt, sync::Arc};

use tracing::trace;

use crate::domain::{
    checks::Check,
    error::LocatedError,
    value::{Document, Value},
};

type Predicate = dyn Fn(&Document) -> bool + Send + Sync;

/// Decides whether a rule applies, by reading already-normalized siblings.
#[derive(Clone)]
pub struct Condition {
    label: String,
    predicate: Arc<Predicate>,
}

impl Condition {
    pub fn new<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Document) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// `key` holds exactly `expected`.
    pub fn field_equals(key: impl Into<String>, expected: impl Into<Value>) -> Self {
        let key = key.into();
        let expected = expected.into();
        let label = format!("{key} == {expected}");
        Self::new(label, move |doc| {
            doc.get(&key).is_some_and(|v| *v.value() == expected)
        })
    }

    /// `key` holds an integer of at least `min`.
    pub fn field_at_least(key: impl Into<String>, min: i64) -> Self {
        let key = key.into();
        let label = format!("{key} >= {min}");
        Self::new(label, move |doc| doc.int_value(&key).is_some_and(|i| i >= min))
    }

    pub fn holds(&self, document: &Document) -> bool {
        (self.predicate)(document)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Condition").field(&self.label).finish()
    }
}

/// One schema entry: key, default, guidance and validation.
///
/// Rules are required unless marked [`optional`](Self::optional). A required
/// rule with no usable value fails at its key line, or with no line when the
/// key is missing altogether.
#[derive(Debug, Clone)]
pub struct FieldRule {
    key: String,
    default: Value,
    description: Vec<String>,
    hint: bool,
    required: bool,
    condition: Option<Condition>,
    fallback: Option<String>,
    check: Check,
}

impl FieldRule {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default: Value::Null,
            description: Vec::new(),
            hint: false,
            required: true,
            condition: None,
            fallback: None,
            check: Check::accept(),
        }
    }

    pub fn describe<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.description = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    /// Render the default as a commented-out example instead of a value.
    pub fn hint(mut self) -> Self {
        self.hint = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn applies_when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Derive an absent or null value from an earlier field.
    pub fn fallback_to(mut self, key: impl Into<String>) -> Self {
        self.fallback = Some(key.into());
        self
    }

    pub fn check(mut self, check: Check) -> Self {
        self.check = check;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    pub fn description(&self) -> &[String] {
        &self.description
    }

    pub fn is_hint(&self) -> bool {
        self.hint
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn applies_to(&self, document: &Document) -> bool {
        self.condition.as_ref().is_none_or(|c| c.holds(document))
    }

    /// Validate this rule's field and fold the normalized value back in.
    pub fn verify(&self, document: &mut Document) -> Result<(), LocatedError> {
        if !self.applies_to(document) {
            trace!(key = %self.key, "rule not applicable, skipped");
            return Ok(());
        }

        let raw = document.present(&self.key).cloned().or_else(|| {
            let source = self.fallback.as_deref()?;
            let derived = document.present(source)?.clone();
            trace!(key = %self.key, source, "value derived from fallback field");
            Some(match document.key_line(&self.key) {
                Some(line) => derived.at_line(line),
                None => derived,
            })
        });

        let Some(raw) = raw else {
            if self.required {
                return Err(LocatedError::verification(
                    document.key_line(&self.key),
                    format!("{}: value is required", self.key),
                ));
            }
            return Ok(());
        };

        let normalized = self
            .check
            .run(document, raw)
            .map_err(|e| e.in_field(&self.key))?;
        document.set(&self.key, normalized);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{checks, value::Located};

    fn doc(entries: &[(&str, usize, Value)]) -> Document {
        let mut d = Document::new();
        for (k, line, v) in entries {
            d.insert(*k, *line, Located::new(v.clone(), *line));
        }
        d
    }

    #[test]
    fn normalization_is_folded_back() {
        let rule = FieldRule::new("initialize_git").check(checks::boolean());
        let mut d = doc(&[("initialize_git", 4, Value::from("yes"))]);
        rule.verify(&mut d).unwrap();
        assert_eq!(d.bool_value("initialize_git"), Some(true));
        assert_eq!(d.get("initialize_git").unwrap().line(), 4);
    }

    #[test]
    fn required_null_fails_at_key_line() {
        let rule = FieldRule::new("author_email").check(checks::text());
        let mut d = doc(&[("author_email", 6, Value::Null)]);
        let err = rule.verify(&mut d).unwrap_err();
        assert_eq!(err.line(), Some(6));
        assert_eq!(err.detail(), "author_email: value is required");
    }

    #[test]
    fn missing_required_key_has_no_line() {
        let rule = FieldRule::new("author_email");
        let err = rule.verify(&mut Document::new()).unwrap_err();
        assert_eq!(err.line(), None);
        assert_eq!(err.reported_line(), -1);
    }

    #[test]
    fn optional_absence_is_valid() {
        let rule = FieldRule::new("namespace").optional().check(checks::text());
        let mut d = doc(&[("namespace", 3, Value::Null)]);
        rule.verify(&mut d).unwrap();
        assert!(d.get("namespace").unwrap().value().is_null());
    }

    #[test]
    fn inapplicable_rule_passes_raw_value() {
        let rule = FieldRule::new("plugin_namespace")
            .applies_when(Condition::field_equals("project_type", 1))
            .check(checks::text());
        let mut d = doc(&[
            ("project_type", 1, Value::Int(0)),
            ("plugin_namespace", 2, Value::Int(42)),
        ]);
        rule.verify(&mut d).unwrap();
        assert_eq!(d.int_value("plugin_namespace"), Some(42));
    }

    #[test]
    fn fallback_fills_absent_value() {
        let rule = FieldRule::new("team_email")
            .fallback_to("author_email")
            .check(checks::text());
        let mut d = doc(&[
            ("author_email", 1, Value::from("jane@example.com")),
            ("team_email", 5, Value::Null),
        ]);
        rule.verify(&mut d).unwrap();
        assert_eq!(d.str_value("team_email"), Some("jane@example.com"));
        assert_eq!(d.get("team_email").unwrap().line(), 5);
    }

    #[test]
    fn check_errors_name_the_field() {
        let rule = FieldRule::new("project_type").check(checks::range(0, 2));
        let mut d = doc(&[("project_type", 9, Value::Int(7))]);
        let err = rule.verify(&mut d).unwrap_err();
        assert_eq!(err.line(), Some(9));
        assert_eq!(err.detail(), "project_type: Invalid value (7)");
    }

    #[test]
    fn at_least_condition() {
        let c = Condition::field_at_least("project_type", 1);
        assert!(c.holds(&doc(&[("project_type", 1, Value::Int(2))])));
        assert!(!c.holds(&doc(&[("project_type", 1, Value::Int(0))])));
        assert!(!c.holds(&Document::new()));
        assert_eq!(c.label(), "project_type >= 1");
    }
}
