//! Rules engine for the technique builder.
//!
//! `technique-core` defines the ruleset (power levels, forces, the effect
//! catalog), prices effect instances and whole techniques under the
//! disadvantage cap, validates additions, and models the tree of saved
//! techniques. Everything here is pure and synchronous: the technique under
//! edit is mutated only through [`Workbench`], saved techniques only through
//! [`TechniqueTree`], and costs and layouts are derived on read.
pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod export;
pub mod pricing;
pub mod rules;
pub mod technique;
pub mod tree;
pub mod workbench;

pub use catalog::{
    Catalog, CatalogError, CategoryView, Effect, EffectId, EffectOption, EffectOptionValue,
    ExclusionRule, Force, ForceSet, PowerLevel,
};
pub use config::RulesConfig;
pub use draft::{DraftError, EffectDraft};
pub use error::{ErrorSeverity, RulesError};
pub use export::{
    ExportError, MANUAL_FILE_NAME, file_stem, image_file_name, markdown_manual, text_summary,
};
pub use pricing::{BudgetReport, CostBreakdown, aggregate_cost, instance_cost, reprice};
pub use rules::{
    ExclusionViolation, default_selection, is_effect_compatible, options_for_level,
    validate_add_effect,
};
pub use technique::{EffectInstance, InstanceId, SelectedEffectOption, Technique, TechniqueId};
pub use tree::{
    Edge, GridLayout, Layout, Node, Position, TechniqueTree, TreeError, TreeIntent, derive_layout,
};
pub use workbench::{AddEffectError, Phase, Workbench, WorkbenchError};
