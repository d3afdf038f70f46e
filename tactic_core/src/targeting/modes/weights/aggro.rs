//! Aggro-recency weight factor

use super::WeightItem;
use crate::entity::Unit;
use crate::targeting::RankContext;

/// Window within which observed aggro still contributes, in milliseconds.
const AGGRO_WINDOW_MS: i64 = 3000;

/// Prefers enemies that recently turned their aggro onto a hero.
#[derive(Debug, Default)]
pub struct AggroWeight;

impl WeightItem for AggroWeight {
    fn name(&self) -> &'static str {
        "aggro"
    }

    fn display_name(&self) -> &'static str {
        "Aggro"
    }

    fn default_weight(&self) -> f64 {
        10.0
    }

    fn inverted(&self) -> bool {
        false
    }

    fn value(&mut self, ctx: &RankContext, hero: &Unit) -> f64 {
        let tracker = match ctx.aggro {
            Some(tracker) => tracker,
            None => return 0.0,
        };
        match tracker.entry_for(hero.id) {
            Some(entry) => {
                let age = ctx.game.clock.now - entry.tick;
                (AGGRO_WINDOW_MS - age).max(0) as f64
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{GameContext, Snapshot, UnitKind};
    use crate::targeting::AggroTracker;
    use crate::types::{Clock, Team, UnitId};

    #[test]
    fn test_recent_aggro_scores_higher_and_ages_out() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(Unit::new(UnitId(1), "Ashe", UnitKind::Hero, Team::Order));
        snapshot.set_player(UnitId(1));
        snapshot.insert(Unit::new(UnitId(2), "Annie", UnitKind::Hero, Team::Chaos));

        let mut tracker = AggroTracker::new();
        {
            let game = GameContext::new(&snapshot, Clock::new(1000, 0));
            let enemy = snapshot.unit(UnitId(2)).unwrap();
            tracker.on_aggro(&game, enemy, UnitId(1));
        }

        let mut weight = AggroWeight;
        let enemy = snapshot.unit(UnitId(2)).unwrap().clone();

        let game = GameContext::new(&snapshot, Clock::new(1500, 0));
        let ctx = RankContext::with_aggro(&game, &tracker);
        let fresh = weight.value(&ctx, &enemy);
        assert!(fresh > 0.0);

        let game = GameContext::new(&snapshot, Clock::new(9000, 0));
        let ctx = RankContext::with_aggro(&game, &tracker);
        assert_eq!(weight.value(&ctx, &enemy), 0.0);
    }

    #[test]
    fn test_without_tracker_everything_is_zero() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(Unit::new(UnitId(1), "Ashe", UnitKind::Hero, Team::Order));
        snapshot.set_player(UnitId(1));
        let game = GameContext::new(&snapshot, Clock::new(1000, 0));
        let ctx = RankContext::new(&game);

        let enemy = Unit::new(UnitId(2), "Annie", UnitKind::Hero, Team::Chaos);
        assert_eq!(AggroWeight.value(&ctx, &enemy), 0.0);
    }
}
