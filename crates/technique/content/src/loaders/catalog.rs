//! Effect catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use technique_core::{Catalog, Effect, ExclusionRule};

use crate::loaders::{LoadResult, read_file};

/// Effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    /// Category names in display order.
    pub categories: Vec<String>,
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub exclusions: Vec<ExclusionRule>,
}

impl CatalogData {
    /// Validates the data and builds the catalog.
    pub fn into_catalog(self) -> LoadResult<Catalog> {
        Catalog::new(self.categories, self.effects, self.exclusions)
            .map_err(|e| anyhow::anyhow!("Invalid effect catalog: {}", e))
    }
}

/// Loader for the effect catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            effects = catalog.effects().len(),
            categories = catalog.categories().len(),
            "loaded effect catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate catalog RON text.
    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let data: CatalogData = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON: {}", e))?;
        data.into_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
#![enable(implicit_some)]
(
    categories: ["Efectos ofensivos"],
    effects: [
        (
            id: "of_multiplicador",
            category: "Efectos ofensivos",
            name: "Multiplicador de Daño",
            description: "",
            restrictions: "CONSERVATION | ORDER",
            options: [
                Select(id: "mult_select", name: "Multiplicador", values: [
                    (name: "x2", cost: 12),
                    (name: "x4 (Solo Nivel 3)", cost: 25, min_level: Level3),
                ]),
                Toggle(id: "all", name: "A todos (+8 PC)", cost: 8),
            ],
        ),
    ],
)
"#;

    #[test]
    fn parses_options_restrictions_and_gates() {
        let catalog = CatalogLoader::parse(SMALL).unwrap();
        let effect = catalog.effect("of_multiplicador").unwrap();
        assert!(effect.restrictions.has(technique_core::Force::Order));
        assert!(!effect.restrictions.has(technique_core::Force::Chaos));
        assert_eq!(effect.base_cost, 0);

        let values = effect.options[0].values();
        assert_eq!(values[0].min_level, None);
        assert_eq!(values[1].min_level, Some(technique_core::PowerLevel::Level3));
        assert!(catalog.exclusions().is_empty());
    }

    #[test]
    fn rejects_contract_violations() {
        let broken = SMALL.replace(r#"categories: ["Efectos ofensivos"]"#, "categories: []");
        let err = CatalogLoader::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("Invalid effect catalog"));
    }

    #[test]
    fn rejects_malformed_ron() {
        assert!(CatalogLoader::parse("(categories: [").is_err());
    }
}
