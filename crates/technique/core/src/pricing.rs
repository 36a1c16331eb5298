//! Pricing engine: instance cost and capped technique aggregation.
//!
//! Aggregation separates spending from refunds:
//!
//! ```text
//! total = Σ(cost ≥ 0) + max(Σ(cost < 0), -cap)
//! ```
//!
//! Stacking more disadvantages never refunds more than `cap` points. Every
//! figure here is recomputed from the current effect list on demand; nothing
//! is cached.

use crate::catalog::Effect;
use crate::technique::{EffectInstance, SelectedEffectOption};

/// `effect.base_cost + Σ selected.cost`.
///
/// Selections that do not belong to `effect` are a caller contract
/// violation and are priced as given.
pub fn instance_cost(effect: &Effect, selected: &[SelectedEffectOption]) -> i32 {
    effect.base_cost + selected.iter().map(|option| option.cost).sum::<i32>()
}

/// Aggregate technique cost with the default disadvantage cap.
pub fn aggregate_cost(effects: &[EffectInstance]) -> i32 {
    CostBreakdown::from_instances(effects, crate::RulesConfig::DEFAULT_DISADVANTAGE_CAP).total
}

/// Re-derives every remaining instance's cost after a structural change.
///
/// Order is preserved. Secondary status needs no update because it is
/// positional (see [`crate::Technique::is_secondary`]).
pub fn reprice(effects: &mut [EffectInstance]) {
    for instance in effects.iter_mut() {
        instance.final_cost = instance_cost(&instance.effect, &instance.selected_options);
    }
}

/// Itemized result of the aggregation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Sum of instances with a non-negative cost.
    pub positive: i32,
    /// Raw sum of negative instances (≤ 0).
    pub negative: i32,
    /// `negative` after the floor at `-cap`.
    pub effective_negative: i32,
    pub total: i32,
}

impl CostBreakdown {
    pub fn from_instances(effects: &[EffectInstance], disadvantage_cap: i32) -> Self {
        let (positive, negative) = effects.iter().map(|instance| instance.final_cost).fold(
            (0, 0),
            |(positive, negative), cost| {
                if cost >= 0 {
                    (positive + cost, negative)
                } else {
                    (positive, negative + cost)
                }
            },
        );

        let effective_negative = negative.max(-disadvantage_cap.abs());

        Self {
            positive,
            negative,
            effective_negative,
            total: positive + effective_negative,
        }
    }

    /// True when stacked disadvantages exceed what the cap refunds.
    pub fn is_capped(&self) -> bool {
        self.negative < self.effective_negative
    }
}

/// Aggregate cost compared against the level budget.
///
/// Exceeding the budget is advisory: it is shown and annotated on export but
/// never blocks editing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BudgetReport {
    pub breakdown: CostBreakdown,
    /// `None` until a level is chosen.
    pub budget: Option<i32>,
}

impl BudgetReport {
    pub fn spent(&self) -> i32 {
        self.breakdown.total
    }

    /// Budget shown to the user; 0 while no level is chosen.
    pub fn budget_or_zero(&self) -> i32 {
        self.budget.unwrap_or(0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.breakdown.total > self.budget_or_zero()
    }

    pub fn remaining(&self) -> i32 {
        self.budget_or_zero() - self.breakdown.total
    }

    pub fn is_disadvantage_capped(&self) -> bool {
        self.breakdown.is_capped()
    }
}
