// ============================================================================
// domain/error.rs - LOCATED, SETUP AND STRUCTURE ERRORS
// ============================================================================

use std::fmt;
use thiserror::Error;

use crate::error::ErrorCategory;

/// What stage of verification produced a [`LocatedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatedKind {
    /// The document text is not syntactically valid.
    Parse,
    /// The document holds a key that no field rule declares.
    Schema,
    /// A declared field failed its rule.
    Verification,
}

impl LocatedKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Parse => "parse error",
            Self::Schema => "schema error",
            Self::Verification => "verification error",
        }
    }
}

impl fmt::Display for LocatedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error pinned to a 1-based line of the edited document.
///
/// All three kinds are recoverable: they drive the edit-verify retry path and
/// are never fatal to the process. `line` is `None` when no reliable position
/// is known; such errors never produce an editor line jump.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct LocatedError {
    kind: LocatedKind,
    line: Option<usize>,
    detail: String,
}

impl LocatedError {
    pub fn new(kind: LocatedKind, line: Option<usize>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            line: line.filter(|l| *l > 0),
            detail: detail.into(),
        }
    }

    pub fn parse(line: Option<usize>, detail: impl Into<String>) -> Self {
        Self::new(LocatedKind::Parse, line, detail)
    }

    pub fn schema(line: Option<usize>, detail: impl Into<String>) -> Self {
        Self::new(LocatedKind::Schema, line, detail)
    }

    pub fn verification(line: Option<usize>, detail: impl Into<String>) -> Self {
        Self::new(LocatedKind::Verification, line, detail)
    }

    pub fn kind(&self) -> LocatedKind {
        self.kind
    }

    /// 1-based line to jump to, if known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Line as reported to humans and scripts: `-1` when unknown.
    pub fn reported_line(&self) -> i64 {
        self.line.map_or(-1, |l| l as i64)
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Prefix the detail with the field it belongs to.
    pub fn in_field(mut self, key: &str) -> Self {
        self.detail = format!("{key}: {}", self.detail);
        self
    }
}

impl fmt::Display for LocatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "at line {line}: {}", self.detail),
            None => f.write_str(&self.detail),
        }
    }
}

/// The schema itself is malformed.
///
/// These are programming-time faults: they abort the process and are never
/// presented as "please edit again".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("configuration items are not set")]
    NoRules,

    #[error("missing editor")]
    NoEditor,

    #[error("field '{key}' is declared more than once")]
    DuplicateKey { key: String },

    #[error("pattern '{name}' does not compile: {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("no '{license}' license among the known classifiers")]
    MissingLicense { license: String },
}

impl SetupError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoEditor => vec![
                "Set the EDITOR environment variable".into(),
                "Or pass --editor \"vim +@LINE@ @NAME@\"".into(),
                "Or set [editor] command in the configuration file".into(),
            ],
            Self::MissingLicense { license } => vec![
                format!("The classifier list has no '{license}' license entry"),
                "Point [classifiers] file at a complete classifier list".into(),
            ],
            _ => vec!["This is a bug in the schema definition".into()],
        }
    }
}

/// Violations of the scaffolding model: bad templates, bad paths and
/// documents that cannot be projected into a project configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{name}' has no content")]
    EmptyTemplate { name: String },

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Field '{key}' cannot be used: {reason}")]
    Projection { key: String, reason: String },
}

impl DomainError {
    pub fn projection(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Projection {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyTemplate { name } => vec![
                format!("Template '{name}' is corrupted"),
                "Please report this issue".into(),
            ],
            Self::Projection { key, .. } => vec![
                format!("Check the value of '{key}' in the document"),
                "Run: pyscaff check <FILE> to validate it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Projection { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_when_known() {
        let err = LocatedError::verification(Some(11), "Invalid requirement (a b)");
        assert_eq!(err.to_string(), "at line 11: Invalid requirement (a b)");
        assert_eq!(err.reported_line(), 11);
    }

    #[test]
    fn unknown_line_reports_minus_one() {
        let err = LocatedError::parse(None, "unexpected end of stream");
        assert_eq!(err.to_string(), "unexpected end of stream");
        assert_eq!(err.reported_line(), -1);
        assert_eq!(err.line(), None);
    }

    // line 0 is not a real line and must never become a jump target
    #[test]
    fn line_zero_is_treated_as_unknown() {
        let err = LocatedError::schema(Some(0), "Invalid key (x)");
        assert_eq!(err.line(), None);
    }

    #[test]
    fn in_field_prefixes_detail() {
        let err = LocatedError::verification(Some(4), "expected str").in_field("author_email");
        assert_eq!(err.to_string(), "at line 4: author_email: expected str");
    }

    #[test]
    fn setup_error_suggests_editor_env() {
        assert!(
            SetupError::NoEditor
                .suggestions()
                .iter()
                .any(|s| s.contains("EDITOR"))
        );
    }
}
