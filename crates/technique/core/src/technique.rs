//! Technique data model: effect instances and the technique itself.
//!
//! Whether an instance is "secondary" is never stored. It is derived from the
//! instance's position in [`Technique::effects`] (every instance but the first
//! is secondary), so it cannot drift out of sync with the list.

use core::fmt;

use crate::catalog::{Effect, EffectId, Force, PowerLevel};
use crate::pricing::{self, CostBreakdown};

/// Identifier of a technique admitted into the saved tree.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TechniqueId(pub String);

impl TechniqueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TechniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TechniqueId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for TechniqueId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of an effect instance. Issued in increasing order by the
/// workbench, so ids also reflect generation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx-{}", self.0)
    }
}

/// A chosen option value inside an effect instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedEffectOption {
    pub option_id: String,
    /// Display name of the option.
    pub name: String,
    /// Chosen value name, or [`Self::ACTIVE`] for an active toggle.
    pub value: String,
    pub cost: i32,
}

impl SelectedEffectOption {
    /// Value recorded for an active toggle.
    pub const ACTIVE: &'static str = "true";

    pub fn new(
        option_id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        cost: i32,
    ) -> Self {
        Self {
            option_id: option_id.into(),
            name: name.into(),
            value: value.into(),
            cost,
        }
    }

    pub fn is_toggle(&self) -> bool {
        self.value == Self::ACTIVE
    }
}

/// One concrete addition of an effect to a technique.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectInstance {
    pub id: InstanceId,
    pub effect: Effect,
    pub final_cost: i32,
    pub selected_options: Vec<SelectedEffectOption>,
}

impl EffectInstance {
    /// Creates an instance priced from its own effect and selection.
    pub fn new(id: InstanceId, effect: Effect, selected_options: Vec<SelectedEffectOption>) -> Self {
        let final_cost = pricing::instance_cost(&effect, &selected_options);
        Self {
            id,
            effect,
            final_cost,
            selected_options,
        }
    }

    /// Disadvantages refund PC instead of spending it.
    pub fn is_disadvantage(&self) -> bool {
        self.final_cost < 0
    }
}

/// A technique under construction or saved in the tree.
///
/// `id` and `parent_id` are only set once the technique has been committed
/// to the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Technique {
    pub id: Option<TechniqueId>,
    pub parent_id: Option<TechniqueId>,
    pub name: String,
    pub description: String,
    pub level: Option<PowerLevel>,
    pub force: Option<Force>,
    pub resistance_cost: i32,
    pub effects: Vec<EffectInstance>,
}

impl Technique {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<TechniqueId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<TechniqueId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// True when nothing has been entered yet.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Budget of the chosen level; `None` until a level is chosen.
    pub fn pc_budget(&self) -> Option<i32> {
        self.level.map(PowerLevel::pc_budget)
    }

    /// Positional secondary flag: every instance except the first.
    pub fn is_secondary(&self, index: usize) -> bool {
        index > 0 && index < self.effects.len()
    }

    /// Instances paired with their derived secondary flag.
    pub fn entries(&self) -> impl Iterator<Item = (&EffectInstance, bool)> {
        self.effects
            .iter()
            .enumerate()
            .map(|(index, instance)| (instance, index > 0))
    }

    pub fn instance(&self, id: InstanceId) -> Option<&EffectInstance> {
        self.effects.iter().find(|instance| instance.id == id)
    }

    pub fn contains_effect(&self, effect_id: &EffectId) -> bool {
        self.effects
            .iter()
            .any(|instance| &instance.effect.id == effect_id)
    }

    /// Aggregate cost under the given disadvantage cap.
    pub fn cost(&self, disadvantage_cap: i32) -> CostBreakdown {
        CostBreakdown::from_instances(&self.effects, disadvantage_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn instance(id: u64, effect: Effect, options: &[(&str, &str, i32)]) -> EffectInstance {
        let selected = options
            .iter()
            .map(|(option, value, cost)| SelectedEffectOption::new(*option, *option, *value, *cost))
            .collect();
        EffectInstance::new(InstanceId(id), effect, selected)
    }

    #[test]
    fn instance_prices_itself() {
        let fx = instance(
            1,
            fixtures::damage_bonus().with_base_cost(1),
            &[("bonus_select", "+2", 4), ("different_damage_type", "true", 3)],
        );
        assert_eq!(fx.final_cost, 8);
        assert!(!fx.is_disadvantage());
        assert!(fx.selected_options[1].is_toggle());
    }

    #[test]
    fn secondary_flag_is_positional() {
        let mut technique = Technique::named("Golpe");
        technique.effects = vec![
            instance(1, fixtures::area(), &[]),
            instance(2, fixtures::damage_bonus(), &[]),
        ];
        let flags: Vec<_> = technique.entries().map(|(_, secondary)| secondary).collect();
        assert_eq!(flags, vec![false, true]);
        assert!(!technique.is_secondary(0));
        assert!(technique.is_secondary(1));
        assert!(!technique.is_secondary(2));

        technique.effects.remove(0);
        assert!(!technique.is_secondary(0));
    }

    #[test]
    fn blank_until_edited() {
        assert!(Technique::new().is_blank());
        assert!(!Technique::named("x").is_blank());
        assert_eq!(Technique::new().pc_budget(), None);
    }

    #[test]
    fn instance_id_display() {
        assert_eq!(InstanceId(7).to_string(), "fx-7");
    }
}
