//! Damage type dispatch and the penetration formulas

use super::passives::apply_reduction_rules;
use super::DamageEngine;
use crate::entity::{GameContext, Unit};
use crate::types::DamageType;

impl DamageEngine {
    /// Estimated damage of `amount` from `source` onto `target` for the given
    /// damage type. Total over its domain: invalid inputs resolve to 0.
    pub fn calculate_damage(
        &self,
        ctx: &GameContext,
        source: &Unit,
        target: &Unit,
        damage_type: DamageType,
        amount: f64,
    ) -> f64 {
        match damage_type {
            DamageType::Magical => self.magic_damage(ctx, source, target, amount),
            DamageType::Physical => self.physical_damage(ctx, source, target, amount),
            DamageType::Mixed => {
                self.mixed_damage(ctx, source, target, amount / 2.0, amount / 2.0)
            }
            DamageType::True => self
                .passive_percent_mod(ctx, source, target, amount.max(0.0), DamageType::True)
                .floor()
                .max(0.0),
        }
    }

    /// Physical and magical halves resolved independently and summed.
    pub fn mixed_damage(
        &self,
        ctx: &GameContext,
        source: &Unit,
        target: &Unit,
        physical_amount: f64,
        magical_amount: f64,
    ) -> f64 {
        self.physical_damage(ctx, source, target, physical_amount)
            + self.magic_damage(ctx, source, target, magical_amount)
    }

    /// Physical damage after armor and penetration.
    pub(crate) fn physical_damage(
        &self,
        ctx: &GameContext,
        source: &Unit,
        target: &Unit,
        amount: f64,
    ) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }

        let mut pen_percent = source.percent_armor_pen;
        let mut pen_flat = source.flat_armor_pen + source.lethality;
        let mut pen_bonus_percent = source.percent_bonus_armor_pen;

        // Source-type overrides: minions carry garbage penetration stats and
        // turrets shred a fixed 30% of armor.
        if source.kind.is_minion() {
            pen_flat = 0.0;
            pen_percent = 1.0;
            pen_bonus_percent = 1.0;
        }
        if source.kind.is_turret() {
            pen_flat = 0.0;
            pen_percent = 0.7;
            pen_bonus_percent = 1.0;
        }

        // Penetration can't reduce armor below 0.
        let armor = target.armor;
        let bonus_armor = target.bonus_armor;

        let factor = if armor < 0.0 {
            2.0 - 100.0 / (100.0 - armor)
        } else if armor * pen_percent - bonus_armor * (1.0 - pen_bonus_percent) - pen_flat < 0.0 {
            1.0
        } else {
            100.0
                / (100.0 + armor * pen_percent
                    - bonus_armor * (1.0 - pen_bonus_percent)
                    - pen_flat)
        };

        let modified = self.passive_percent_mod(ctx, source, target, factor, DamageType::Physical)
            * amount;
        self.reduction_mod(ctx, source, target, modified, DamageType::Physical)
            .floor()
            .max(0.0)
    }

    /// Magic damage after magic resist and penetration.
    pub(crate) fn magic_damage(
        &self,
        ctx: &GameContext,
        source: &Unit,
        target: &Unit,
        amount: f64,
    ) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }

        // Penetration can't reduce magic resist below 0.
        let magic_resist = target.magic_resist;
        let bonus_magic_resist = target.bonus_magic_resist;

        let factor = if magic_resist < 0.0 {
            2.0 - 100.0 / (100.0 - magic_resist)
        } else if magic_resist * source.percent_magic_pen
            - bonus_magic_resist * (1.0 - source.percent_bonus_magic_pen)
            - source.flat_magic_pen
            - source.magic_lethality
            < 0.0
        {
            1.0
        } else {
            100.0
                / (100.0 + magic_resist * source.percent_magic_pen
                    - bonus_magic_resist * (1.0 - source.percent_bonus_magic_pen)
                    - source.flat_magic_pen
                    - source.magic_lethality)
        };

        // Marked targets take a flat tenth of the raw amount on top.
        let flat_addition = if target.has_buff("cursedtouch") {
            0.1 * amount
        } else {
            0.0
        };

        let modified =
            self.passive_percent_mod(ctx, source, target, factor, DamageType::Magical) * amount;
        (self
            .reduction_mod(ctx, source, target, modified, DamageType::Magical)
            .floor()
            + flat_addition)
            .max(0.0)
    }

    /// Run the ordered reduction rule table over an amount.
    pub(crate) fn reduction_mod(
        &self,
        ctx: &GameContext,
        source: &Unit,
        target: &Unit,
        amount: f64,
        damage_type: DamageType,
    ) -> f64 {
        apply_reduction_rules(self.reduction_rules(), ctx, source, target, damage_type, amount)
    }

    /// Percent-modifier extension hook; identity until hooks are registered.
    pub(crate) fn passive_percent_mod(
        &self,
        ctx: &GameContext,
        source: &Unit,
        target: &Unit,
        amount: f64,
        damage_type: DamageType,
    ) -> f64 {
        self.percent_hooks()
            .iter()
            .fold(amount, |acc, hook| hook(ctx, source, target, acc, damage_type))
    }

    /// Flat-modifier extension hook; zero until hooks are registered.
    pub(crate) fn passive_flat_mod(&self, ctx: &GameContext, source: &Unit, target: &Unit) -> f64 {
        self.flat_hooks()
            .iter()
            .map(|hook| hook(ctx, source, target))
            .sum()
    }
}
