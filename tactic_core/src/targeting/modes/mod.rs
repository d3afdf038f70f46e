//! Ranking strategies for target selection

mod closest;
mod priority;
mod weighted;
pub mod weights;

pub use closest::ClosestMode;
pub use priority::{PriorityMode, PriorityTable};
pub use weighted::{WeightedEntry, WeightedMode};

use super::RankContext;
use crate::types::UnitId;

/// A pluggable target ordering strategy.
pub trait RankingMode {
    /// Stable machine name of the mode.
    fn name(&self) -> &'static str;

    /// Human-readable name of the mode.
    fn display_name(&self) -> &'static str;

    /// Reorder the candidates in place, best target first. Implementations
    /// must sort stably so that equal candidates keep their prior order.
    fn order(&mut self, ctx: &RankContext, candidates: &mut Vec<UnitId>);
}
