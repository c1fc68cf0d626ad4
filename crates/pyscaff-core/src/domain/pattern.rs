//! Named format patterns injected into checks.

use std::fmt;

use regex::Regex;

use crate::domain::error::SetupError;

/// Single word: letter first, then at least two of `-`, `_`, digits, letters.
pub const WORD: &str = r"^[a-zA-Z][-_0-9a-zA-Z]{2,}$";

/// One or more space-separated words.
pub const KEYWORD: &str = r"^[a-zA-Z][-_0-9a-zA-Z]{2,}([ ][a-zA-Z][-_0-9a-zA-Z]{2,})*$";

/// Python identifier of at least three characters.
pub const IDENTIFIER: &str = r"^[a-zA-Z][_0-9a-zA-Z]{2,}$";

pub const EMAIL: &str = r"^\S+@\S+$";

/// Distribution name, optional extras, optional version specifiers and an
/// optional environment marker.
pub const REQUIREMENT: &str = r"^[A-Za-z0-9][-_.A-Za-z0-9]*(\[[-_.,A-Za-z0-9 ]+\])?( ?(===|==|!=|<=|>=|~=|<|>) ?[-_.*+!A-Za-z0-9]+( ?, ?(===|==|!=|<=|>=|~=|<|>) ?[-_.*+!A-Za-z0-9]+)*)?( ?;.+)?$";

/// A compiled regular expression with a human name.
#[derive(Clone)]
pub struct Pattern {
    name: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(name: impl Into<String>, source: &str) -> Result<Self, SetupError> {
        let name = name.into();
        let regex = Regex::new(source).map_err(|e| SetupError::InvalidPattern {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { name, regex })
    }

    pub fn word() -> Result<Self, SetupError> {
        Self::new("word", WORD)
    }

    pub fn keyword() -> Result<Self, SetupError> {
        Self::new("keyword", KEYWORD)
    }

    pub fn identifier() -> Result<Self, SetupError> {
        Self::new("identifier", IDENTIFIER)
    }

    pub fn email() -> Result<Self, SetupError> {
        Self::new("e-mail address", EMAIL)
    }

    pub fn requirement() -> Result<Self, SetupError> {
        Self::new("requirement", REQUIREMENT)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

/// Collapse internal whitespace runs to one space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_pattern() {
        let p = Pattern::word().unwrap();
        assert!(p.is_match("my-project"));
        assert!(p.is_match("abc"));
        assert!(!p.is_match("ab"));
        assert!(!p.is_match("1abc"));
        assert!(!p.is_match("my project"));
    }

    #[test]
    fn keyword_pattern_allows_phrases() {
        let p = Pattern::keyword().unwrap();
        assert!(p.is_match("command line"));
        assert!(!p.is_match("command  line"));
        assert!(!p.is_match("a line"));
    }

    #[test]
    fn identifier_rejects_dash() {
        let p = Pattern::identifier().unwrap();
        assert!(p.is_match("my_pkg"));
        assert!(!p.is_match("my-pkg"));
    }

    #[test]
    fn requirement_pattern() {
        let p = Pattern::requirement().unwrap();
        for ok in [
            "click",
            "requests>=2.0",
            "requests >= 2.0, < 3",
            "uvicorn[standard]==0.30.1",
            "tomli; python_version < \"3.11\"",
        ] {
            assert!(p.is_match(ok), "{ok}");
        }
        for bad in ["a b", "requests>=", "@pkg", ""] {
            assert!(!p.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn invalid_pattern_is_setup_error() {
        let err = Pattern::new("broken", "([").unwrap_err();
        assert!(matches!(err, SetupError::InvalidPattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn whitespace_normalization() {
        assert_eq!(normalize_whitespace("  command \t line  "), "command line");
        assert_eq!(normalize_whitespace("   "), "");
    }
}
