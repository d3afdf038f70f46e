//! Unit kind discrimination
//!
//! The discriminant is read once when a unit enters the snapshot; hot paths
//! match on it instead of re-inspecting names or flags.

use serde::{Deserialize, Serialize};

/// Category of a minion-class unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinionCategory {
    Melee,
    Ranged,
    Siege,
    Super,
    Pet,
    Clone,
}

/// Tier of a turret, keyed by its position on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurretTier {
    One,
    Two,
    Three,
    Four,
}

/// Kind of a live unit, fixed for the unit's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Hero,
    Minion(MinionCategory),
    Turret(TurretTier),
    Ward,
    Structure,
}

impl UnitKind {
    pub fn is_hero(self) -> bool {
        matches!(self, UnitKind::Hero)
    }

    pub fn is_minion(self) -> bool {
        matches!(self, UnitKind::Minion(_))
    }

    pub fn is_turret(self) -> bool {
        matches!(self, UnitKind::Turret(_))
    }

    pub fn minion_category(self) -> Option<MinionCategory> {
        match self {
            UnitKind::Minion(category) => Some(category),
            _ => None,
        }
    }

    pub fn turret_tier(self) -> Option<TurretTier> {
        match self {
            UnitKind::Turret(tier) => Some(tier),
            _ => None,
        }
    }
}
