//! Estimated-attack-damage weight factor

use super::WeightItem;
use crate::entity::Unit;
use crate::items;
use crate::targeting::RankContext;

/// Refresh interval of the cached average ally armor, in milliseconds.
const UPDATE_INTERVAL_MS: i64 = 3000;

/// Prefers targets whose sustained basic-attack output is highest, estimated
/// from bonus attack damage, crit and penetration against the average ally
/// armor.
#[derive(Debug)]
pub struct AttackDamageWeight {
    average_armor: f64,
    last_update: i64,
}

impl Default for AttackDamageWeight {
    fn default() -> Self {
        AttackDamageWeight {
            average_armor: 0.0,
            last_update: i64::MIN,
        }
    }
}

impl AttackDamageWeight {
    pub fn new() -> Self {
        AttackDamageWeight::default()
    }

    fn refresh(&mut self, ctx: &RankContext) {
        if ctx.game.clock.now - self.last_update <= UPDATE_INTERVAL_MS {
            return;
        }
        let mut sum = 0.0;
        let mut count = 0usize;
        for ally in ctx.game.snapshot.ally_heroes() {
            sum += ally.armor;
            count += 1;
        }
        self.average_armor = if count == 0 { 0.0 } else { sum / count as f64 };
        self.last_update = ctx.game.clock.now;
    }
}

impl WeightItem for AttackDamageWeight {
    fn name(&self) -> &'static str {
        "attack-damage"
    }

    fn display_name(&self) -> &'static str {
        "Attack Damage"
    }

    fn default_weight(&self) -> f64 {
        15.0
    }

    fn inverted(&self) -> bool {
        false
    }

    fn value(&mut self, ctx: &RankContext, hero: &Unit) -> f64 {
        self.refresh(ctx);

        let crit_amplifier = if hero.has_item(items::INFINITY_EDGE) {
            2.5
        } else {
            2.0
        };
        let attack = hero.bonus_attack_damage / 100.0 * (hero.crit_chance * 100.0) * crit_amplifier;

        let effective_armor = (100.0
            + self.average_armor * hero.percent_armor_pen
            - hero.flat_armor_pen
            - hero.lethality)
            .max(1.0);
        let attack_speed = ctx
            .game
            .snapshot
            .player()
            .map(|p| 1.0 / p.attack_delay.max(f64::EPSILON))
            .unwrap_or(1.0);

        attack * (100.0 / effective_armor) * attack_speed
    }
}
