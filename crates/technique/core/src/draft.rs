//! Effect drafts: configuring an effect's options before adding it.
//!
//! A draft is created from an effect and the technique's current level. It
//! holds the level-filtered options and a selection that starts at the
//! defaults. When the effect or the level changes, build a new draft; a draft
//! never re-filters itself behind the caller's back.

use crate::catalog::{Effect, EffectOption, PowerLevel};
use crate::error::{ErrorSeverity, RulesError};
use crate::pricing;
use crate::rules;
use crate::technique::SelectedEffectOption;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("effect has no option '{0}'")]
    UnknownOption(String),

    #[error("option '{option}' has no value '{value}' at this level")]
    UnknownValue { option: String, value: String },

    #[error("option '{0}' is not a select option")]
    NotSelect(String),

    #[error("option '{0}' is not a toggle")]
    NotToggle(String),
}

impl RulesError for DraftError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownOption(_) => "DRAFT_UNKNOWN_OPTION",
            Self::UnknownValue { .. } => "DRAFT_UNKNOWN_VALUE",
            Self::NotSelect(_) => "DRAFT_NOT_SELECT",
            Self::NotToggle(_) => "DRAFT_NOT_TOGGLE",
        }
    }
}

/// Option configuration for one effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectDraft {
    effect: Effect,
    level: Option<PowerLevel>,
    options: Vec<EffectOption>,
    selection: Vec<SelectedEffectOption>,
}

impl EffectDraft {
    pub fn new(effect: Effect, level: Option<PowerLevel>) -> Self {
        let options = rules::options_for_level(&effect.options, level);
        let selection = rules::default_selection(&options);
        Self {
            effect,
            level,
            options,
            selection,
        }
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn level(&self) -> Option<PowerLevel> {
        self.level
    }

    /// Options visible at the draft's level.
    pub fn options(&self) -> &[EffectOption] {
        &self.options
    }

    pub fn selection(&self) -> &[SelectedEffectOption] {
        &self.selection
    }

    pub fn selected(&self, option_id: &str) -> Option<&SelectedEffectOption> {
        self.selection
            .iter()
            .find(|selected| selected.option_id == option_id)
    }

    pub fn is_active(&self, option_id: &str) -> bool {
        self.selected(option_id).is_some_and(SelectedEffectOption::is_toggle)
    }

    /// Cost of the effect with the current selection.
    pub fn cost(&self) -> i32 {
        pricing::instance_cost(&self.effect, &self.selection)
    }

    /// Picks `value` for a select option, replacing the previous pick in place.
    pub fn select(&mut self, option_id: &str, value: &str) -> Result<(), DraftError> {
        let option = self.option(option_id)?;
        if !option.is_select() {
            return Err(DraftError::NotSelect(option_id.to_owned()));
        }
        let chosen = option.value(value).ok_or_else(|| DraftError::UnknownValue {
            option: option_id.to_owned(),
            value: value.to_owned(),
        })?;

        let entry =
            SelectedEffectOption::new(option_id, option.name(), chosen.name.as_str(), chosen.cost);
        match self.position(option_id) {
            Some(index) => self.selection[index] = entry,
            None => self.selection.push(entry),
        }
        Ok(())
    }

    /// Activates or deactivates a toggle. Activation appends an entry once;
    /// deactivation removes it entirely.
    pub fn set_toggle(&mut self, option_id: &str, active: bool) -> Result<(), DraftError> {
        let option = self.option(option_id)?;
        let EffectOption::Toggle { name, cost, .. } = option else {
            return Err(DraftError::NotToggle(option_id.to_owned()));
        };
        let entry =
            SelectedEffectOption::new(option_id, name.as_str(), SelectedEffectOption::ACTIVE, *cost);

        match (active, self.position(option_id)) {
            (true, None) => self.selection.push(entry),
            (false, Some(index)) => {
                self.selection.remove(index);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn into_parts(self) -> (Effect, Vec<SelectedEffectOption>) {
        (self.effect, self.selection)
    }

    fn option(&self, option_id: &str) -> Result<&EffectOption, DraftError> {
        self.options
            .iter()
            .find(|option| option.id() == option_id)
            .ok_or_else(|| DraftError::UnknownOption(option_id.to_owned()))
    }

    fn position(&self, option_id: &str) -> Option<usize> {
        self.selection
            .iter()
            .position(|selected| selected.option_id == option_id)
    }
}
