//! Closest-target ranking

use super::RankingMode;
use crate::targeting::RankContext;
use crate::types::UnitId;

/// Orders candidates by ascending distance to the acting player.
#[derive(Debug, Default)]
pub struct ClosestMode;

impl RankingMode for ClosestMode {
    fn name(&self) -> &'static str {
        "closest"
    }

    fn display_name(&self) -> &'static str {
        "Closest"
    }

    fn order(&mut self, ctx: &RankContext, candidates: &mut Vec<UnitId>) {
        let player_position = match ctx.game.snapshot.player() {
            Some(player) => player.position,
            None => return,
        };
        candidates.sort_by(|a, b| {
            let da = ctx
                .game
                .snapshot
                .unit(*a)
                .map(|u| u.position.distance_squared(player_position))
                .unwrap_or(f64::MAX);
            let db = ctx
                .game
                .snapshot
                .unit(*b)
                .map(|u| u.position.distance_squared(player_position))
                .unwrap_or(f64::MAX);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{GameContext, Snapshot, Unit, UnitKind};
    use crate::types::{Clock, Team, Vec2};

    #[test]
    fn test_orders_by_distance_ascending() {
        let mut snapshot = Snapshot::new();
        let player = Unit::new(crate::types::UnitId(1), "Ashe", UnitKind::Hero, Team::Order);
        snapshot.insert(player);
        snapshot.set_player(crate::types::UnitId(1));

        for (id, x) in [(2u32, 900.0), (3, 100.0), (4, 500.0)] {
            let mut enemy = Unit::new(crate::types::UnitId(id), "Annie", UnitKind::Hero, Team::Chaos);
            enemy.position = Vec2::new(x, 0.0);
            snapshot.insert(enemy);
        }

        let game = GameContext::new(&snapshot, Clock::default());
        let ctx = RankContext::new(&game);
        let mut candidates = vec![
            crate::types::UnitId(2),
            crate::types::UnitId(3),
            crate::types::UnitId(4),
        ];
        ClosestMode.order(&ctx, &mut candidates);
        assert_eq!(
            candidates,
            vec![
                crate::types::UnitId(3),
                crate::types::UnitId(4),
                crate::types::UnitId(2)
            ]
        );
    }
}
