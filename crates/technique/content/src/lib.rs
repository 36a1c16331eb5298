//! Data-driven content for the technique builder.
//!
//! This crate ships the built-in ruleset data and the loaders that read it:
//! - Effect catalog (RON): categories, effects with options, exclusion rules
//! - Rules configuration (TOML): disadvantage cap and tree grid
//!
//! Loaded content is validated by `technique-core` before it is handed out, so
//! a `Catalog` obtained here always satisfies the catalog data contract.

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use builtin::{BUILTIN_CATALOG_RON, BUILTIN_RULES_TOML, builtin_catalog, builtin_rules};
#[cfg(feature = "loaders")]
pub use loaders::{CatalogData, CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
