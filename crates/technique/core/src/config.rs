use crate::tree::GridLayout;

/// Ruleset constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Most points a technique may recover from disadvantages, regardless of
    /// how many negative-cost effects are stacked.
    pub disadvantage_cap: i32,

    /// Grid used to place saved techniques on the tree surface.
    pub grid: GridLayout,
}

impl RulesConfig {
    pub const DEFAULT_DISADVANTAGE_CAP: i32 = 12;

    pub fn new() -> Self {
        Self {
            disadvantage_cap: Self::DEFAULT_DISADVANTAGE_CAP,
            grid: GridLayout::default(),
        }
    }

    pub fn with_disadvantage_cap(disadvantage_cap: i32) -> Self {
        Self {
            disadvantage_cap: disadvantage_cap.max(0),
            ..Self::new()
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
