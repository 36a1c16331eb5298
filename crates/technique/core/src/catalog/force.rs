//! Dominant forces and force restriction sets.

use bitflags::bitflags;

/// Thematic affinity of a technique.
///
/// A technique has at most one dominant force. Effects list the forces that
/// forbid them in a [`ForceSet`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Force {
    #[strum(serialize = "Destrucción")]
    Destruction,
    #[strum(serialize = "Conservación")]
    Conservation,
    #[strum(serialize = "Transformación")]
    Transformation,
    #[strum(serialize = "Creación")]
    Creation,
    #[strum(serialize = "Orden")]
    Order,
    #[strum(serialize = "Caos")]
    Chaos,
}

impl Force {
    /// Reference description used by the manual export.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Destruction => "La senda de quienes rompen y terminan. Daño y combate.",
            Self::Conservation => {
                "La senda del cuidado y la preservación. Curación y defensas."
            }
            Self::Transformation => {
                "La senda del cambio constante. Control elemental y del entorno."
            }
            Self::Creation => "La senda de dar forma a lo nuevo. Invocaciones e ilusiones.",
            Self::Order => "La senda del equilibrio y la estructura. Control y sellos.",
            Self::Chaos => {
                "La senda de lo indomable y contradictorio. Efectos aleatorios y daño persistente."
            }
        }
    }

    const fn flag(self) -> ForceSet {
        match self {
            Self::Destruction => ForceSet::DESTRUCTION,
            Self::Conservation => ForceSet::CONSERVATION,
            Self::Transformation => ForceSet::TRANSFORMATION,
            Self::Creation => ForceSet::CREATION,
            Self::Order => ForceSet::ORDER,
            Self::Chaos => ForceSet::CHAOS,
        }
    }
}

bitflags! {
    /// Set of forces, used for effect restrictions.
    ///
    /// Serialized as text (`"DESTRUCTION | ORDER"`); the empty set means the
    /// effect is available to every force.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ForceSet: u8 {
        const DESTRUCTION = 1 << 0;
        const CONSERVATION = 1 << 1;
        const TRANSFORMATION = 1 << 2;
        const CREATION = 1 << 3;
        const ORDER = 1 << 4;
        const CHAOS = 1 << 5;
    }
}

impl ForceSet {
    #[inline]
    pub fn has(&self, force: Force) -> bool {
        self.contains(force.flag())
    }

    /// Iterates the member forces in declaration order.
    pub fn forces(&self) -> impl Iterator<Item = Force> + '_ {
        use strum::IntoEnumIterator;
        Force::iter().filter(|force| self.has(*force))
    }
}

impl From<Force> for ForceSet {
    fn from(force: Force) -> Self {
        force.flag()
    }
}

impl FromIterator<Force> for ForceSet {
    fn from_iter<I: IntoIterator<Item = Force>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ForceSet::empty(), |set, force| set | force.flag())
    }
}
