//! Power levels and their fixed costs.

/// Power tier of a technique.
///
/// The level fixes the default resistance cost and the PC budget the
/// technique may spend. Levels are ordered from weakest to strongest so that
/// option values can declare a minimum level.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerLevel {
    #[strum(serialize = "Apoyo")]
    Support,
    #[strum(serialize = "Nivel 1")]
    Level1,
    #[strum(serialize = "Nivel 2")]
    Level2,
    #[strum(serialize = "Nivel 3")]
    Level3,
}

impl PowerLevel {
    /// Resistance the technique costs to use, before any manual override.
    pub const fn resistance_cost(self) -> i32 {
        match self {
            Self::Support => 1,
            Self::Level1 => 2,
            Self::Level2 => 4,
            Self::Level3 => 6,
        }
    }

    /// Spending ceiling in PC.
    pub const fn pc_budget(self) -> i32 {
        match self {
            Self::Support => 5,
            Self::Level1 => 10,
            Self::Level2 => 15,
            Self::Level3 => 25,
        }
    }

    /// Returns true when a value gated at `min_level` is visible at this level.
    #[inline]
    pub fn unlocks(self, min_level: PowerLevel) -> bool {
        self >= min_level
    }
}
