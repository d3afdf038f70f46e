//! Basic-attack damage resolution

use super::modifiers::AttackState;
use super::passives::support_item_execute;
use super::DamageEngine;
use crate::entity::{GameContext, MinionCategory, TurretTier, Unit};
use crate::items;

/// Fraction of a minion's max health a turret shot removes, by category and
/// turret tier. Bypasses the standard AD/armor math entirely.
fn turret_minion_percent(tier: TurretTier, category: MinionCategory) -> Option<f64> {
    match category {
        MinionCategory::Melee => Some(0.45),
        MinionCategory::Ranged => Some(0.7),
        MinionCategory::Siege => Some(match tier {
            TurretTier::One => 0.14,
            TurretTier::Two => 0.11,
            TurretTier::Three | TurretTier::Four => 0.08,
        }),
        MinionCategory::Super => Some(0.05),
        MinionCategory::Pet | MinionCategory::Clone => None,
    }
}

impl DamageEngine {
    /// Estimated damage of one basic attack from `source` onto `target`.
    pub fn auto_attack_damage(&self, ctx: &GameContext, source: &Unit, target: &Unit) -> f64 {
        let mut state = AttackState::new(source.total_attack_damage());

        // Turrets vs minions.
        if let Some(amount) = self.auto_attack_override(source, target, state.physical) {
            return amount;
        }

        if source.kind.is_hero() {
            // Support-item execute: the proc consumes the minion outright.
            if support_item_execute(ctx, source, target) {
                return f64::MAX;
            }

            let passive_info = self.passives().evaluate(self, ctx, source, target, true);
            state.passive += passive_info.value;
            if passive_info.is_override {
                return state.passive;
            }

            for modifier in self.attack_modifiers() {
                if modifier.champion == source.name {
                    (modifier.apply)(self, ctx, source, target, &mut state);
                }
            }
        }

        if target.kind.is_hero() {
            if target.has_item(items::NINJA_TABI) {
                state.reduce *= 0.88;
            }
            if target.has_item(items::GUARDIANS_HORN) {
                let block = 12.0;
                if state.physical > block {
                    state.physical -= block;
                } else if state.magical > block {
                    state.magical -= block;
                }
            }
        }

        let mut physical = self.physical_damage(ctx, source, target, state.physical);
        let mut magical = self.magic_damage(ctx, source, target, state.magical);

        physical += state.physical_addition;
        magical += state.magical_addition;

        // Nimble fighter: flat per-level reduction of basic attacks.
        if target.kind.is_hero() && target.name == "Fizz" {
            physical -= 4.0 + 2.0 * ((target.level as f64 - 1.0) / 3.0).floor();
        }

        ((physical + magical) * state.reduce
            + self.passive_flat_mod(ctx, source, target)
            + state.passive
            + state.physical_flat
            + state.magical_flat)
            .floor()
            .max(0.0)
    }

    /// Source-type override of the basic-attack amount; `Some` short-circuits
    /// the standard computation.
    fn auto_attack_override(&self, source: &Unit, target: &Unit, _amount: f64) -> Option<f64> {
        let tier = source.kind.turret_tier()?;
        let category = target.kind.minion_category()?;
        turret_minion_percent(tier, category).map(|percent| percent * target.max_health)
    }
}
