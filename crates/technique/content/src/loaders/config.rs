//! Rules configuration loader.

use std::path::Path;

use technique_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rules configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`RulesConfig::default`].
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        tracing::info!(path = %path.display(), "loaded rules config");
        Ok(config)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules config TOML: {}", e))?;

        if config.disadvantage_cap < 0 {
            anyhow::bail!(
                "disadvantage_cap must not be negative (got {})",
                config.disadvantage_cap
            );
        }
        Ok(config)
    }
}
