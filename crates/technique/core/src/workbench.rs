//! Technique state machine.
//!
//! The [`Workbench`] owns the single technique under construction and is the
//! only way to mutate it. Every structural change goes through
//! [`Workbench::add_effect`] or [`Workbench::remove_effect`], so the effect
//! list is always priced from its own selections and the secondary flag is
//! always positional. Costs are derived on read; nothing is cached.

use std::sync::Arc;

use crate::catalog::{Catalog, CategoryView, Effect, Force, PowerLevel};
use crate::config::RulesConfig;
use crate::draft::EffectDraft;
use crate::error::{ErrorSeverity, RulesError};
use crate::pricing::{self, BudgetReport, CostBreakdown};
use crate::rules::{self, ExclusionViolation};
use crate::technique::{EffectInstance, InstanceId, SelectedEffectOption, Technique};

/// Coarse lifecycle of the technique under edit. `Saved` is not a workbench
/// state: committing hands the technique to the tree and resets to `Empty`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Empty,
    Configuring,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Empty => "empty",
            Phase::Configuring => "configuring",
        }
    }
}

/// Rejections of [`Workbench::add_effect`]. The technique is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddEffectError {
    #[error("choose a power level before adding effects")]
    LevelNotSelected,

    #[error("draft was configured for another power level; rebuild it at {level}")]
    StaleDraft { level: PowerLevel },

    #[error(transparent)]
    Excluded(#[from] ExclusionViolation),
}

impl RulesError for AddEffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LevelNotSelected | Self::StaleDraft { .. } => ErrorSeverity::Recoverable,
            Self::Excluded(violation) => violation.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LevelNotSelected => "WORKBENCH_LEVEL_NOT_SELECTED",
            Self::StaleDraft { .. } => "WORKBENCH_STALE_DRAFT",
            Self::Excluded(violation) => violation.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorkbenchError {
    #[error("no effect instance {0} in the technique")]
    UnknownInstance(InstanceId),
}

impl RulesError for WorkbenchError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownInstance(_) => "WORKBENCH_UNKNOWN_INSTANCE",
        }
    }
}

/// Holds the technique under edit and mediates all of its mutations.
#[derive(Clone, Debug)]
pub struct Workbench {
    catalog: Arc<Catalog>,
    rules: RulesConfig,
    technique: Technique,
    next_instance: u64,
}

impl Workbench {
    pub fn new(catalog: Arc<Catalog>, rules: RulesConfig) -> Self {
        Self {
            catalog,
            rules,
            technique: Technique::new(),
            next_instance: 1,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn technique(&self) -> &Technique {
        &self.technique
    }

    pub fn phase(&self) -> Phase {
        if self.technique.is_blank() {
            Phase::Empty
        } else {
            Phase::Configuring
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.technique.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.technique.description = description.into();
    }

    /// Sets the level and resets the resistance cost to the level's base,
    /// discarding any manual override.
    pub fn set_level(&mut self, level: PowerLevel) {
        self.technique.level = Some(level);
        self.technique.resistance_cost = level.resistance_cost();
    }

    /// Sets the dominant force. Effects already added are kept even if the
    /// new force forbids them; see [`Self::incompatible_effects`].
    pub fn set_force(&mut self, force: Option<Force>) {
        self.technique.force = force;
    }

    pub fn set_resistance_cost(&mut self, resistance_cost: i32) {
        self.technique.resistance_cost = resistance_cost;
    }

    /// Whether the add affordance should be enabled for `effect`.
    pub fn can_add_effect(&self, effect: &Effect) -> bool {
        self.check_add(effect).is_ok()
    }

    /// Validates and appends a new instance of `effect`.
    pub fn add_effect(
        &mut self,
        effect: &Effect,
        selected_options: Vec<SelectedEffectOption>,
    ) -> Result<InstanceId, AddEffectError> {
        self.check_add(effect)?;

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        self.technique
            .effects
            .push(EffectInstance::new(id, effect.clone(), selected_options));
        Ok(id)
    }

    /// Adds a configured draft. The draft must have been built at the
    /// technique's current level, otherwise its options were filtered
    /// against the wrong gate.
    pub fn add_draft(&mut self, draft: EffectDraft) -> Result<InstanceId, AddEffectError> {
        let level = self
            .technique
            .level
            .ok_or(AddEffectError::LevelNotSelected)?;
        if draft.level() != Some(level) {
            return Err(AddEffectError::StaleDraft { level });
        }
        let (effect, selection) = draft.into_parts();
        self.add_effect(&effect, selection)
    }

    /// Starts configuring `effect` at the current level.
    pub fn draft(&self, effect: &Effect) -> EffectDraft {
        EffectDraft::new(effect.clone(), self.technique.level)
    }

    /// Removes an instance, closing the gap and re-deriving remaining costs.
    pub fn remove_effect(&mut self, id: InstanceId) -> Result<EffectInstance, WorkbenchError> {
        let index = self
            .technique
            .effects
            .iter()
            .position(|instance| instance.id == id)
            .ok_or(WorkbenchError::UnknownInstance(id))?;

        let removed = self.technique.effects.remove(index);
        pricing::reprice(&mut self.technique.effects);
        Ok(removed)
    }

    /// Discards everything and returns to [`Phase::Empty`].
    pub fn reset(&mut self) {
        self.technique = Technique::new();
    }

    /// Loads a saved technique for further editing. Its id and parent are
    /// kept so committing it again replaces the saved copy.
    pub fn load(&mut self, technique: Technique) {
        let highest = technique
            .effects
            .iter()
            .map(|instance| instance.id.0)
            .max()
            .unwrap_or(0);
        self.next_instance = self.next_instance.max(highest.saturating_add(1));
        self.technique = technique;
        pricing::reprice(&mut self.technique.effects);
    }

    /// Hands the technique over (for committing) and resets.
    pub fn take(&mut self) -> Technique {
        std::mem::take(&mut self.technique)
    }

    /// Catalog effects offered under the current force.
    pub fn available_effects(&self) -> impl Iterator<Item = &Effect> {
        self.catalog.compatible_effects(self.technique.force)
    }

    pub fn grouped(&self) -> Vec<CategoryView<'_>> {
        self.catalog.grouped(self.technique.force)
    }

    /// Instances whose effect is forbidden by the current force.
    pub fn incompatible_effects(&self) -> Vec<InstanceId> {
        self.technique
            .effects
            .iter()
            .filter(|instance| !rules::is_effect_compatible(&instance.effect, self.technique.force))
            .map(|instance| instance.id)
            .collect()
    }

    pub fn cost(&self) -> CostBreakdown {
        self.technique.cost(self.rules.disadvantage_cap)
    }

    pub fn report(&self) -> BudgetReport {
        BudgetReport {
            breakdown: self.cost(),
            budget: self.technique.pc_budget(),
        }
    }

    fn check_add(&self, effect: &Effect) -> Result<(), AddEffectError> {
        if self.technique.level.is_none() {
            return Err(AddEffectError::LevelNotSelected);
        }
        rules::validate_add_effect(self.catalog.exclusions(), &self.technique, effect)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn workbench() -> Workbench {
        let mut bench = Workbench::new(Arc::new(fixtures::catalog()), RulesConfig::default());
        bench.set_level(PowerLevel::Level2);
        bench
    }

    fn add_default(bench: &mut Workbench, effect: Effect) -> InstanceId {
        let draft = bench.draft(&effect);
        bench.add_draft(draft).unwrap()
    }

    #[test]
    fn level_resets_resistance_override() {
        let mut bench = workbench();
        assert_eq!(bench.technique().resistance_cost, 4);
        bench.set_resistance_cost(9);
        assert_eq!(bench.technique().resistance_cost, 9);
        bench.set_level(PowerLevel::Level3);
        assert_eq!(bench.technique().resistance_cost, 6);
    }

    #[test]
    fn add_requires_level() {
        let mut bench = Workbench::new(Arc::new(fixtures::catalog()), RulesConfig::default());
        let err = bench.add_effect(&fixtures::area(), Vec::new()).unwrap_err();
        assert_eq!(err, AddEffectError::LevelNotSelected);
        assert!(bench.technique().effects.is_empty());
    }

    #[test]
    fn removing_first_promotes_next() {
        let mut bench = workbench();
        let a = add_default(&mut bench, fixtures::area());
        let b = add_default(&mut bench, fixtures::damage_bonus());
        let c = add_default(&mut bench, fixtures::exhaustion());

        let removed = bench.remove_effect(a).unwrap();
        assert_eq!(removed.id, a);

        let entries: Vec<_> = bench
            .technique()
            .entries()
            .map(|(instance, secondary)| (instance.id, secondary))
            .collect();
        assert_eq!(entries, vec![(b, false), (c, true)]);
    }

    #[test]
    fn remove_unknown_instance() {
        let mut bench = workbench();
        assert_eq!(
            bench.remove_effect(InstanceId(42)),
            Err(WorkbenchError::UnknownInstance(InstanceId(42)))
        );
    }

    #[test]
    fn exclusion_leaves_effects_unchanged() {
        let mut bench = workbench();
        add_default(&mut bench, fixtures::damage_bonus());
        let before = bench.technique().effects.clone();

        let err = bench
            .add_effect(&fixtures::multiplier(), Vec::new())
            .unwrap_err();
        assert!(matches!(err, AddEffectError::Excluded(_)));
        assert_eq!(err.error_code(), "RULE_EXCLUSIVE_EFFECTS");
        assert_eq!(bench.technique().effects, before);
        assert!(!bench.can_add_effect(&fixtures::multiplier()));
    }

    #[test]
    fn budget_overage_does_not_block() {
        let mut bench = workbench();
        let mut draft = bench.draft(&fixtures::multiplier());
        draft.select("mult_select", "x3").unwrap();
        bench.add_draft(draft).unwrap();
        let draft = bench.draft(&fixtures::area());
        bench.add_draft(draft).unwrap();

        let report = bench.report();
        assert_eq!(report.spent(), 22);
        assert_eq!(report.budget, Some(15));
        assert!(report.is_over_budget());
    }

    #[test]
    fn disadvantages_are_capped() {
        let mut bench = workbench();
        for _ in 0..2 {
            let mut draft = bench.draft(&fixtures::exhaustion());
            draft.select("exh_val", "3 rondas").unwrap();
            bench.add_draft(draft).unwrap();
        }
        let report = bench.report();
        assert_eq!(report.breakdown.negative, -24);
        assert_eq!(report.spent(), -12);
        assert!(report.is_disadvantage_capped());
    }

    #[test]
    fn force_change_is_not_retroactive() {
        let mut bench = workbench();
        let id = add_default(&mut bench, fixtures::damage_bonus());
        add_default(&mut bench, fixtures::area());

        bench.set_force(Some(Force::Order));
        assert_eq!(bench.technique().effects.len(), 2);
        assert_eq!(bench.incompatible_effects(), vec![id]);
        assert!(bench.available_effects().all(|e| e.id.as_str() != "of_bono_dano"));

        bench.set_force(None);
        assert!(bench.incompatible_effects().is_empty());
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut bench = workbench();
        bench.set_name("Golpe");
        bench.set_force(Some(Force::Chaos));
        add_default(&mut bench, fixtures::area());
        assert_eq!(bench.phase(), Phase::Configuring);

        bench.reset();
        assert_eq!(bench.phase(), Phase::Empty);
        assert!(bench.technique().effects.is_empty());
        assert_eq!(bench.technique().level, None);
        assert_eq!(bench.technique().force, None);
        assert_eq!(pricing::aggregate_cost(&[]), 0);
        assert_eq!(bench.cost().total, 0);
    }

    #[test]
    fn load_continues_instance_ids() {
        let mut bench = workbench();
        add_default(&mut bench, fixtures::area());
        let technique = bench.take().with_id("tech-1");
        assert_eq!(bench.phase(), Phase::Empty);

        let mut other = Workbench::new(Arc::new(fixtures::catalog()), RulesConfig::default());
        other.load(technique);
        assert_eq!(other.technique().id.as_ref().map(|id| id.as_str()), Some("tech-1"));
        let next = add_default(&mut other, fixtures::exhaustion());
        assert_eq!(next, InstanceId(2));
    }

    #[test]
    fn draft_from_previous_level_is_rejected() {
        let mut bench = workbench();
        bench.set_level(PowerLevel::Level3);
        let mut draft = bench.draft(&fixtures::multiplier());
        draft.select("mult_select", "x4 (Solo Nivel 3)").unwrap();

        bench.set_level(PowerLevel::Level2);
        let err = bench.add_draft(draft).unwrap_err();
        assert_eq!(err, AddEffectError::StaleDraft { level: PowerLevel::Level2 });
        assert_eq!(err.error_code(), "WORKBENCH_STALE_DRAFT");
        assert!(bench.technique().effects.is_empty());

        let mut rebuilt = bench.draft(&fixtures::multiplier());
        assert!(rebuilt.select("mult_select", "x4 (Solo Nivel 3)").is_err());
        bench.add_draft(rebuilt).unwrap();
    }

    #[test]
    fn load_with_maximal_instance_id() {
        let mut technique = Technique::named("Tope");
        technique.effects.push(EffectInstance::new(
            InstanceId(u64::MAX),
            fixtures::area(),
            Vec::new(),
        ));
        let mut bench = workbench();
        bench.load(technique);
        assert_eq!(bench.technique().effects[0].id, InstanceId(u64::MAX));
    }
}
