//! PyPI trove classifier catalog.

/// Prefix shared by every license classifier.
pub const LICENSE_PREFIX: &str = "License ::";

/// Ordered list of known classifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierCatalog {
    entries: Vec<String>,
}

impl ClassifierCatalog {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// One classifier per line; surrounding whitespace and blank lines are
    /// dropped.
    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines().map(str::trim).filter(|l| !l.is_empty()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn contains(&self, classifier: &str) -> bool {
        self.entries.iter().any(|e| e == classifier)
    }

    /// First license classifier mentioning `name`.
    pub fn find_license(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|c| c.starts_with(LICENSE_PREFIX) && c.contains(name))
    }

    /// Everything except license classifiers.
    pub fn without_licenses(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|c| !c.starts_with(LICENSE_PREFIX))
    }

    /// Case-insensitive substring filter.
    pub fn matching<'a>(&'a self, filter: &str) -> impl Iterator<Item = &'a str> + 'a {
        let needle = filter.to_lowercase();
        self.iter()
            .filter(move |c| c.to_lowercase().contains(&needle))
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ClassifierCatalog {
        ClassifierCatalog::from_lines(
            "Development Status :: 3 - Alpha\n\n  License :: OSI Approved :: Apache Software License\nLicense :: OSI Approved :: MIT License\nTopic :: Utilities\n",
        )
    }

    #[test]
    fn from_lines_trims_and_skips_blanks() {
        let c = catalog();
        assert_eq!(c.len(), 4);
        assert!(c.contains("License :: OSI Approved :: Apache Software License"));
    }

    #[test]
    fn find_license_requires_license_prefix() {
        let c = catalog();
        assert_eq!(c.find_license("MIT"), Some("License :: OSI Approved :: MIT License"));
        assert_eq!(c.find_license("Alpha"), None);
    }

    #[test]
    fn without_licenses_and_matching() {
        let c = catalog();
        assert_eq!(
            c.without_licenses().collect::<Vec<_>>(),
            vec!["Development Status :: 3 - Alpha", "Topic :: Utilities"]
        );
        assert_eq!(c.matching("utilit").collect::<Vec<_>>(), vec!["Topic :: Utilities"]);
    }
}
