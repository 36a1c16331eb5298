//! Static reference data: power levels, forces and the effect catalog.
//!
//! A [`Catalog`] is built once, validated against its data contract and then
//! shared read-only (typically behind an `Arc`) by every component that needs
//! it. Nothing in the catalog changes after construction.

mod effect;
mod force;
mod level;

use std::collections::HashSet;

pub use effect::{Effect, EffectId, EffectOption, EffectOptionValue};
pub use force::{Force, ForceSet};
pub use level::PowerLevel;

use crate::error::{ErrorSeverity, RulesError};

/// Two effects that may not coexist in one technique.
///
/// The rule is symmetric: whichever of the two is already present blocks
/// the other.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionRule {
    pub first: EffectId,
    pub second: EffectId,
    /// Reason surfaced to the user when the rule rejects an addition.
    pub reason: String,
}

impl ExclusionRule {
    pub fn new(
        first: impl Into<EffectId>,
        second: impl Into<EffectId>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            reason: reason.into(),
        }
    }

    /// Returns the effect that `candidate` conflicts with, if the rule
    /// covers it.
    pub fn counterpart(&self, candidate: &EffectId) -> Option<&EffectId> {
        if &self.first == candidate {
            Some(&self.second)
        } else if &self.second == candidate {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// Data contract violations detected while building a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate effect id '{0}'")]
    DuplicateEffect(EffectId),

    #[error("effect '{effect}' declares option '{option}' more than once")]
    DuplicateOption { effect: EffectId, option: String },

    #[error("select option '{option}' of effect '{effect}' has no values")]
    EmptySelect { effect: EffectId, option: String },

    #[error("effect '{effect}' uses unlisted category '{category}'")]
    UnknownCategory { effect: EffectId, category: String },

    #[error("exclusion rule references unknown effect '{0}'")]
    UnknownExclusionEffect(EffectId),
}

impl RulesError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            DuplicateEffect(_) => "CATALOG_DUPLICATE_EFFECT",
            DuplicateOption { .. } => "CATALOG_DUPLICATE_OPTION",
            EmptySelect { .. } => "CATALOG_EMPTY_SELECT",
            UnknownCategory { .. } => "CATALOG_UNKNOWN_CATEGORY",
            UnknownExclusionEffect(_) => "CATALOG_UNKNOWN_EXCLUSION_EFFECT",
        }
    }
}

/// Validated, immutable effect catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<String>,
    effects: Vec<Effect>,
    exclusions: Vec<ExclusionRule>,
}

/// One category of the catalog as offered for a given force.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryView<'a> {
    pub name: &'a str,
    pub effects: Vec<&'a Effect>,
}

impl Catalog {
    /// Builds a catalog, checking:
    /// - effect ids are unique
    /// - option ids are unique within their effect
    /// - every select option has at least one value
    /// - every effect category is listed in `categories`
    /// - exclusion rules reference existing effects
    pub fn new(
        categories: Vec<String>,
        effects: Vec<Effect>,
        exclusions: Vec<ExclusionRule>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for effect in &effects {
            if !seen.insert(&effect.id) {
                return Err(CatalogError::DuplicateEffect(effect.id.clone()));
            }
            if !categories.contains(&effect.category) {
                return Err(CatalogError::UnknownCategory {
                    effect: effect.id.clone(),
                    category: effect.category.clone(),
                });
            }

            let mut option_ids = HashSet::new();
            for option in &effect.options {
                if !option_ids.insert(option.id()) {
                    return Err(CatalogError::DuplicateOption {
                        effect: effect.id.clone(),
                        option: option.id().to_owned(),
                    });
                }
                if option.is_select() && option.values().is_empty() {
                    return Err(CatalogError::EmptySelect {
                        effect: effect.id.clone(),
                        option: option.id().to_owned(),
                    });
                }
            }
        }

        for rule in &exclusions {
            for id in [&rule.first, &rule.second] {
                if !seen.contains(id) {
                    return Err(CatalogError::UnknownExclusionEffect(id.clone()));
                }
            }
        }

        Ok(Self {
            categories,
            effects,
            exclusions,
        })
    }

    /// Category names in display order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// All effects in catalog order.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn exclusions(&self) -> &[ExclusionRule] {
        &self.exclusions
    }

    pub fn effect(&self, id: &str) -> Option<&Effect> {
        self.effects.iter().find(|effect| effect.id.as_str() == id)
    }

    pub fn effects_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Effect> {
        self.effects
            .iter()
            .filter(move |effect| effect.category == category)
    }

    /// Effects that may be offered while `force` is the dominant force.
    pub fn compatible_effects(&self, force: Option<Force>) -> impl Iterator<Item = &Effect> {
        self.effects
            .iter()
            .filter(move |effect| crate::rules::is_effect_compatible(effect, force))
    }

    /// Compatible effects grouped by category, in category order. Categories
    /// with no compatible effect are kept with an empty list.
    pub fn grouped(&self, force: Option<Force>) -> Vec<CategoryView<'_>> {
        self.categories
            .iter()
            .map(|category| CategoryView {
                name: category,
                effects: self
                    .effects_in(category)
                    .filter(|effect| crate::rules::is_effect_compatible(effect, force))
                    .collect(),
            })
            .collect()
    }
}
