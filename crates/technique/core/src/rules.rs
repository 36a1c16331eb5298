//! Rule validator: force restrictions, level-gated option values and
//! mutually exclusive effects.

use crate::catalog::{Effect, EffectId, EffectOption, ExclusionRule, Force, PowerLevel};
use crate::error::{ErrorSeverity, RulesError};
use crate::technique::{SelectedEffectOption, Technique};

/// An effect is offered unless the current force is one of its restrictions.
pub fn is_effect_compatible(effect: &Effect, force: Option<Force>) -> bool {
    match force {
        None => true,
        Some(force) => !effect.restrictions.has(force),
    }
}

/// Options as visible at `level`: select values gated above the level are
/// removed. Toggles are never gated.
pub fn options_for_level(options: &[EffectOption], level: Option<PowerLevel>) -> Vec<EffectOption> {
    options
        .iter()
        .map(|option| match option {
            EffectOption::Select {
                id,
                name,
                description,
                values,
            } => EffectOption::Select {
                id: id.clone(),
                name: name.clone(),
                description: description.clone(),
                values: values
                    .iter()
                    .filter(|value| value.is_available_at(level))
                    .cloned()
                    .collect(),
            },
            toggle @ EffectOption::Toggle { .. } => toggle.clone(),
        })
        .collect()
}

/// Fresh default selection: the first value of every non-empty select
/// option, in option order. Toggles start inactive and contribute nothing.
pub fn default_selection(options: &[EffectOption]) -> Vec<SelectedEffectOption> {
    options
        .iter()
        .filter_map(|option| {
            let first = option.values().first()?;
            Some(SelectedEffectOption::new(
                option.id(),
                option.name(),
                first.name.as_str(),
                first.cost,
            ))
        })
        .collect()
}

/// Rejection raised when a candidate effect conflicts with one already in the
/// technique.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason}: '{candidate}' cannot be combined with '{existing}'")]
pub struct ExclusionViolation {
    pub candidate: EffectId,
    pub existing: EffectId,
    pub reason: String,
}

impl RulesError for ExclusionViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "RULE_EXCLUSIVE_EFFECTS"
    }
}

/// Checks `candidate` against every exclusion rule, in both directions.
///
/// Other combinations are accepted unconditionally.
pub fn validate_add_effect(
    exclusions: &[ExclusionRule],
    technique: &Technique,
    candidate: &Effect,
) -> Result<(), ExclusionViolation> {
    for rule in exclusions {
        let Some(counterpart) = rule.counterpart(&candidate.id) else {
            continue;
        };
        if technique.contains_effect(counterpart) {
            return Err(ExclusionViolation {
                candidate: candidate.id.clone(),
                existing: counterpart.clone(),
                reason: rule.reason.clone(),
            });
        }
    }
    Ok(())
}
