//! Content factory for loading the ruleset from a data directory.

use std::path::{Path, PathBuf};

use technique_core::{Catalog, RulesConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads all ruleset content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── catalog.ron
/// └── rules.toml    (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CATALOG_FILE: &'static str = "catalog.ron";
    pub const RULES_FILE: &'static str = "rules.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load and validate the effect catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load(&self.data_dir.join(Self::CATALOG_FILE))
    }

    /// Load rules configuration from `rules.toml`, or the defaults when the
    /// file does not exist.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join(Self::RULES_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no rules config, using defaults");
            return Ok(RulesConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
