//! Movement prediction boundary
//!
//! Position prediction is an external collaborator; the engine only consumes
//! predicted positions and their confidence tier through this interface.

use crate::entity::GameContext;
use crate::types::{UnitId, Vec2};

/// Confidence tier of a predicted position, ordered from untrusted to
/// certain. `Collision` means the path to the position is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HitChance {
    Collision,
    Low,
    Medium,
    High,
    Certain,
}

/// What the predictor needs to know about the intended shot.
#[derive(Debug, Clone)]
pub struct MotionDescriptor {
    pub unit: UnitId,
    /// Windup before the shot leaves, in seconds.
    pub delay: f64,
    /// Missile speed; infinite for instant effects.
    pub speed: f64,
    pub range: f64,
    pub from: Vec2,
}

/// A predicted future position with its confidence tier.
#[derive(Debug, Clone, Copy)]
pub struct PredictedPosition {
    pub position: Vec2,
    pub hit_chance: HitChance,
}

/// External position predictor consumed by target selection.
pub trait MovementPredictor {
    fn predict(&self, ctx: &GameContext, descriptor: &MotionDescriptor) -> PredictedPosition;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_chance_ordering() {
        assert!(HitChance::Collision < HitChance::Low);
        assert!(HitChance::Low < HitChance::Medium);
        assert!(HitChance::Medium < HitChance::High);
        assert!(HitChance::High < HitChance::Certain);
    }
}
