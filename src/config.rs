use anyhow::Result;

use crate::query::collation::{LocaleCollation, DEFAULT_COLLATION_LOCALE};

/// Settings of the query engine that the caller may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// BCP-47 identifier of the locale titles are ordered by.
    pub collation_locale: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collation_locale: DEFAULT_COLLATION_LOCALE.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn collation(&self) -> Result<LocaleCollation> {
        LocaleCollation::new(&self.collation_locale)
    }
}
