//! Low-health weight factor

use super::WeightItem;
use crate::entity::Unit;
use crate::targeting::RankContext;

/// Prefers targets with little health left.
#[derive(Debug, Default)]
pub struct LowHealthWeight;

impl WeightItem for LowHealthWeight {
    fn name(&self) -> &'static str {
        "low-health"
    }

    fn display_name(&self) -> &'static str {
        "Low Health"
    }

    fn default_weight(&self) -> f64 {
        20.0
    }

    fn inverted(&self) -> bool {
        true
    }

    fn value(&mut self, _ctx: &RankContext, hero: &Unit) -> f64 {
        hero.health
    }
}
