//! Effect definitions and their configurable options.

use core::fmt;

use super::force::{Force, ForceSet};
use super::level::PowerLevel;

/// Stable identifier of a catalog effect.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EffectId(pub String);

impl EffectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EffectId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for EffectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One selectable choice of a `Select` option.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectOptionValue {
    pub name: String,
    /// May be negative (discount) or zero.
    pub cost: i32,
    /// Lowest power level at which this value is offered.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_level: Option<PowerLevel>,
}

impl EffectOptionValue {
    pub fn new(name: impl Into<String>, cost: i32) -> Self {
        Self {
            name: name.into(),
            cost,
            min_level: None,
        }
    }

    #[must_use]
    pub fn gated_at(mut self, level: PowerLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Ungated values are always available; gated values need a level that
    /// unlocks them, so they stay hidden while no level is chosen.
    pub fn is_available_at(&self, level: Option<PowerLevel>) -> bool {
        match (self.min_level, level) {
            (None, _) => true,
            (Some(min), Some(level)) => level.unlocks(min),
            (Some(_), None) => false,
        }
    }
}

/// A configurable option of an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectOption {
    /// Exactly one value must be chosen; the first value is the default.
    Select {
        id: String,
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        description: Option<String>,
        values: Vec<EffectOptionValue>,
    },
    /// Adds `cost` only while active. An inactive toggle contributes no
    /// selection entry at all.
    Toggle {
        id: String,
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        description: Option<String>,
        cost: i32,
    },
}

impl EffectOption {
    pub fn select(
        id: impl Into<String>,
        name: impl Into<String>,
        values: impl IntoIterator<Item = EffectOptionValue>,
    ) -> Self {
        Self::Select {
            id: id.into(),
            name: name.into(),
            description: None,
            values: values.into_iter().collect(),
        }
    }

    pub fn toggle(id: impl Into<String>, name: impl Into<String>, cost: i32) -> Self {
        Self::Toggle {
            id: id.into(),
            name: name.into(),
            description: None,
            cost,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Select { id, .. } | Self::Toggle { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Select { name, .. } | Self::Toggle { name, .. } => name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Select { description, .. } | Self::Toggle { description, .. } => {
                description.as_deref()
            }
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select { .. })
    }

    /// Values of a `Select` option; empty for toggles.
    pub fn values(&self) -> &[EffectOptionValue] {
        match self {
            Self::Select { values, .. } => values,
            Self::Toggle { .. } => &[],
        }
    }

    /// Finds a select value by display name.
    pub fn value(&self, name: &str) -> Option<&EffectOptionValue> {
        self.values().iter().find(|value| value.name == name)
    }
}

/// Purchasable capability in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub id: EffectId,
    pub category: String,
    pub name: String,
    pub description: String,
    /// Zero for every built-in effect; all cost lives in the options.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_cost: i32,
    /// Forces that forbid this effect. Empty means universal.
    #[cfg_attr(feature = "serde", serde(default))]
    pub restrictions: ForceSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<EffectOption>,
}

impl Effect {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: EffectId(id.into()),
            category: category.into(),
            name: name.into(),
            description: String::new(),
            base_cost: 0,
            restrictions: ForceSet::empty(),
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_base_cost(mut self, base_cost: i32) -> Self {
        self.base_cost = base_cost;
        self
    }

    #[must_use]
    pub fn forbidden_for(mut self, forces: impl IntoIterator<Item = Force>) -> Self {
        self.restrictions = forces.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_option(mut self, option: EffectOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn option(&self, id: &str) -> Option<&EffectOption> {
        self.options.iter().find(|option| option.id() == id)
    }
}
