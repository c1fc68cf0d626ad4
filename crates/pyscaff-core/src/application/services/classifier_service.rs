//! Classifier loading with source fallback.

use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::ClassifierSource},
    domain::ClassifierCatalog,
    error::PyscaffResult,
};

/// Try each source in order and return the first non-empty catalog.
///
/// Failing and empty sources are logged and skipped.
#[instrument(skip_all, fields(sources = sources.len()))]
pub fn load_catalog(sources: &[Box<dyn ClassifierSource>]) -> PyscaffResult<ClassifierCatalog> {
    for source in sources {
        match source.load() {
            Ok(entries) if !entries.is_empty() => {
                let catalog = ClassifierCatalog::new(entries);
                info!(source = source.name(), count = catalog.len(), "Classifiers loaded");
                return Ok(catalog);
            }
            Ok(_) => warn!(source = source.name(), "Classifier source is empty"),
            Err(e) => warn!(source = source.name(), error = %e, "Classifier source failed"),
        }
    }

    Err(ApplicationError::ClassifiersUnavailable {
        tried: sources
            .iter()
            .map(|s| s.name().to_owned())
            .collect::<Vec<_>>()
            .join(", "),
    }
    .into())
}
