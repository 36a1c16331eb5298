//! Ruleset data embedded at compile time.

use technique_core::{Catalog, RulesConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// The built-in effect catalog (RON).
pub const BUILTIN_CATALOG_RON: &str = include_str!("../data/catalog.ron");

/// The built-in rules configuration (TOML).
pub const BUILTIN_RULES_TOML: &str = include_str!("../data/rules.toml");

/// Parses and validates the built-in catalog.
pub fn builtin_catalog() -> LoadResult<Catalog> {
    let catalog = CatalogLoader::parse(BUILTIN_CATALOG_RON)?;
    tracing::debug!(effects = catalog.effects().len(), "parsed built-in catalog");
    Ok(catalog)
}

pub fn builtin_rules() -> LoadResult<RulesConfig> {
    ConfigLoader::parse(BUILTIN_RULES_TOML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_match_defaults() {
        assert_eq!(builtin_rules().unwrap(), RulesConfig::default());
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.categories().len(), 9);
        assert_eq!(catalog.categories()[0], "Efectos ofensivos");
        assert_eq!(catalog.categories()[8], "Desventajas");
        assert_eq!(catalog.exclusions().len(), 1);
        assert!(catalog.effects().iter().all(|effect| effect.base_cost == 0));
    }
}
