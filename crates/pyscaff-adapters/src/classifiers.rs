//! PyPI classifier sources.
//!
//! Sources are tried in order by `pyscaff_core::application::load_catalog`:
//! a local file if configured, the PyPI list when network access is
//! enabled, and finally the bundled snapshot.

use std::path::{Path, PathBuf};

use pyscaff_core::{
    application::{ApplicationError, ports::ClassifierSource},
    domain::ClassifierCatalog,
    error::{PyscaffError, PyscaffResult},
};
use tracing::{debug, instrument};

/// Where PyPI publishes the full classifier list, one per line.
pub const PYPI_CLASSIFIERS_URL: &str = "https://pypi.org/pypi?%3Aaction=list_classifiers";

/// Snapshot of commonly used classifiers shipped with the binary.
pub const BUNDLED: &[&str] = &[
    "Development Status :: 1 - Planning",
    "Development Status :: 2 - Pre-Alpha",
    "Development Status :: 3 - Alpha",
    "Development Status :: 4 - Beta",
    "Development Status :: 5 - Production/Stable",
    "Development Status :: 6 - Mature",
    "Development Status :: 7 - Inactive",
    "Environment :: Console",
    "Environment :: Plugins",
    "Environment :: Web Environment",
    "Framework :: Pytest",
    "Framework :: tox",
    "Intended Audience :: Developers",
    "Intended Audience :: End Users/Desktop",
    "Intended Audience :: Information Technology",
    "Intended Audience :: Science/Research",
    "Intended Audience :: System Administrators",
    "License :: OSI Approved :: Apache Software License",
    "License :: OSI Approved :: BSD License",
    "License :: OSI Approved :: GNU General Public License v3 (GPLv3)",
    "License :: OSI Approved :: MIT License",
    "Natural Language :: English",
    "Operating System :: MacOS",
    "Operating System :: Microsoft :: Windows",
    "Operating System :: OS Independent",
    "Operating System :: POSIX",
    "Operating System :: POSIX :: Linux",
    "Programming Language :: Python",
    "Programming Language :: Python :: 3",
    "Programming Language :: Python :: 3 :: Only",
    "Programming Language :: Python :: 3.8",
    "Programming Language :: Python :: 3.9",
    "Programming Language :: Python :: 3.10",
    "Programming Language :: Python :: 3.11",
    "Programming Language :: Python :: 3.12",
    "Programming Language :: Python :: 3.13",
    "Programming Language :: Python :: Implementation :: CPython",
    "Programming Language :: Python :: Implementation :: PyPy",
    "Topic :: Software Development",
    "Topic :: Software Development :: Build Tools",
    "Topic :: Software Development :: Libraries",
    "Topic :: Software Development :: Libraries :: Python Modules",
    "Topic :: Software Development :: Testing",
    "Topic :: System :: Installation/Setup",
    "Topic :: Utilities",
    "Typing :: Typed",
];

/// The static snapshot in [`BUNDLED`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledClassifiers;

impl ClassifierSource for BundledClassifiers {
    fn name(&self) -> &str {
        "bundled"
    }

    fn load(&self) -> PyscaffResult<Vec<String>> {
        Ok(BUNDLED.iter().map(|c| (*c).to_owned()).collect())
    }
}

/// A local file: one classifier per line, or a JSON array of strings when
/// the file name ends in `.json`.
#[derive(Debug, Clone)]
pub struct FileClassifiers {
    path: PathBuf,
}

impl FileClassifiers {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ClassifierSource for FileClassifiers {
    fn name(&self) -> &str {
        "file"
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> PyscaffResult<Vec<String>> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| source_error(self.name(), format!("{}: {}", self.path.display(), e)))?;

        let entries = if self.path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str::<Vec<String>>(&text)
                .map_err(|e| source_error(self.name(), format!("{}: {}", self.path.display(), e)))?
                .into_iter()
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty())
                .collect()
        } else {
            ClassifierCatalog::from_lines(&text).into_vec()
        };

        debug!(count = entries.len(), "Read classifier file");
        Ok(entries)
    }
}

/// Downloads the list from PyPI.
#[cfg(feature = "network")]
#[derive(Debug, Clone)]
pub struct HttpClassifiers {
    url: String,
    timeout: std::time::Duration,
}

#[cfg(feature = "network")]
impl HttpClassifiers {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: std::time::Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "network")]
impl Default for HttpClassifiers {
    fn default() -> Self {
        Self::new(PYPI_CLASSIFIERS_URL)
    }
}

#[cfg(feature = "network")]
impl ClassifierSource for HttpClassifiers {
    fn name(&self) -> &str {
        "pypi"
    }

    #[instrument(skip(self), fields(url = %self.url))]
    fn load(&self) -> PyscaffResult<Vec<String>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("pyscaff/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| source_error(self.name(), e.to_string()))?;

        let text = client
            .get(&self.url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| source_error(self.name(), e.to_string()))?;

        let entries = ClassifierCatalog::from_lines(&text).into_vec();
        debug!(count = entries.len(), "Downloaded classifiers");
        Ok(entries)
    }
}

fn source_error(name: &str, reason: String) -> PyscaffError {
    ApplicationError::ClassifierSource {
        source_name: name.to_owned(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn bundled_has_mit_license() {
        let catalog = ClassifierCatalog::new(BundledClassifiers.load().unwrap());
        assert_eq!(
            catalog.find_license("MIT"),
            Some("License :: OSI Approved :: MIT License")
        );
    }

    #[test]
    fn file_skips_blank_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("classifiers.txt");
        std::fs::write(&path, "Topic :: Utilities\n\n  Typing :: Typed  \n").unwrap();

        let entries = FileClassifiers::new(&path).load().unwrap();
        assert_eq!(entries, vec!["Topic :: Utilities", "Typing :: Typed"]);
    }

    #[test]
    fn json_file_is_an_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("classifiers.json");
        std::fs::write(&path, r#"["Topic :: Utilities", ""]"#).unwrap();

        let entries = FileClassifiers::new(&path).load().unwrap();
        assert_eq!(entries, vec!["Topic :: Utilities"]);
    }

    #[test]
    fn missing_file_is_source_error() {
        let err = FileClassifiers::new("/nonexistent/classifiers.txt")
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            PyscaffError::Application(ApplicationError::ClassifierSource { ref source_name, .. })
                if source_name == "file"
        ));
    }
}
