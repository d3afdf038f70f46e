//! Ability damage resolution over the loaded champion profiles

use super::passives::support_item_execute;
use super::profile::{
    per_level, BonusDamage, DamageLimit, MonsterDamage, ScalingTarget, SpellDamage,
    SpellEffectType,
};
use super::DamageEngine;
use crate::entity::{GameContext, Unit};
use crate::items;
use crate::types::{DamageStage, DamageType, SpellSlot, Team};

fn is_enemy_lane_minion(source: &Unit, target: &Unit) -> bool {
    target.kind.is_minion() && target.team != Team::Neutral && target.team != source.team
}

fn is_jungle_monster(target: &Unit) -> bool {
    target.kind.is_minion() && target.team == Team::Neutral
}

fn scaling_unit<'a>(target_kind: ScalingTarget, source: &'a Unit, target: &'a Unit) -> &'a Unit {
    match target_kind {
        ScalingTarget::Source => source,
        ScalingTarget::Target => target,
    }
}

/// Flat per-level reduction a specific defensive passive applies to
/// modified physical damage.
fn nimble_fighter_reduction(target: &Unit) -> f64 {
    4.0 + 2.0 * ((target.level as f64 - 1.0) / 3.0).floor()
}

fn resolve_monster_damage(
    source: &Unit,
    target: &Unit,
    monster: &MonsterDamage,
    index: usize,
) -> f64 {
    let origin = monster
        .scaling_source
        .resolve(scaling_unit(monster.scaling_target, source, target));
    origin * per_level(&monster.damage_percentages, index)
}

fn resolve_limit_damage(source: &Unit, target: &Unit, limit: &DamageLimit, index: usize) -> f64 {
    let origin = limit
        .scaling_source
        .resolve(scaling_unit(limit.scaling_target, source, target));
    origin * per_level(&limit.damage_percentages, index) + per_level(&limit.damages, index)
}

fn resolve_bonus_damage(source: &Unit, target: &Unit, bonus: &BonusDamage, index: usize) -> f64 {
    let origin = bonus
        .scaling_source
        .resolve(scaling_unit(bonus.scaling_target, source, target));
    let percent = per_level(&bonus.damage_percentages, index);

    let stack_percent = if !bonus.percentage_stack_buff.is_empty() {
        let gated = bonus.percentage_check_buff.is_empty()
            || source.has_buff(&bonus.percentage_check_buff);
        if gated {
            bonus.percentage_per_buff_stack * source.buff_count(&bonus.percentage_stack_buff) as f64
        } else {
            0.0
        }
    } else {
        0.0
    };

    let mut damage = origin
        * (percent.max(0.0)
            + if bonus.scale_per_100_ap > 0.0 {
                (source.ability_power / 100.0).abs() * bonus.scale_per_100_ap
            } else {
                0.0
            }
            + if bonus.scale_per_100_ad > 0.0 {
                (source.total_attack_damage() / 100.0).abs() * bonus.scale_per_100_ad
            } else {
                0.0
            }
            + if bonus.scale_per_100_bonus_ad > 0.0 {
                (source.bonus_attack_damage / 100.0).abs() * bonus.scale_per_100_bonus_ad
            } else {
                0.0
            }
            + stack_percent);

    if target.kind.is_minion() && !bonus.bonus_damage_on_minion.is_empty() {
        damage += per_level(&bonus.bonus_damage_on_minion, index);
    }
    if is_jungle_monster(target) && !bonus.bonus_damage_on_monster.is_empty() {
        damage += per_level(&bonus.bonus_damage_on_monster, index);
    }
    if !bonus.bonus_buff.is_empty() {
        damage += source.buff_count(&bonus.bonus_buff) as f64 + bonus.bonus_buff_offset as f64;
    }
    if !bonus.scaling_buff.is_empty() {
        let count = scaling_unit(bonus.scaling_buff_target, source, target)
            .buff_count(&bonus.scaling_buff);
        damage = if count > 0 {
            damage * (count as f64 + bonus.scaling_buff_offset as f64)
        } else {
            0.0
        };
    }

    if damage > 0.0 {
        if !bonus.min_damage.damages.is_empty() {
            damage = damage.max(resolve_limit_damage(source, target, &bonus.min_damage, index));
        }
        if target.kind.is_minion() && !bonus.max_damage_on_minion.is_empty() {
            damage = damage.min(per_level(&bonus.max_damage_on_minion, index));
        }
        if is_jungle_monster(target) && !bonus.max_damage_on_monster.is_empty() {
            damage = damage.min(per_level(&bonus.max_damage_on_monster, index));
        }
    }

    damage
}

impl DamageEngine {
    /// Estimated ability damage of `slot`/`stage` from `source` onto `target`.
    ///
    /// Returns 0 for non-hero sources, unknown archetypes, missing stages and
    /// unlearned abilities.
    pub fn spell_damage(
        &self,
        ctx: &GameContext,
        source: &Unit,
        target: &Unit,
        slot: SpellSlot,
        stage: DamageStage,
    ) -> f64 {
        if !source.is_valid() || !target.is_valid() || !source.kind.is_hero() {
            return 0.0;
        }

        let data = match self
            .library()
            .profile(&source.name)
            .and_then(|profile| profile.spell_data(slot, stage))
        {
            Some(data) => data,
            None => return 0.0,
        };

        let spell_level = source.spell_level(data.scale_slot.unwrap_or(slot));
        if spell_level == 0 {
            return 0.0;
        }
        let index = spell_level as usize - 1;

        self.resolve_spell(ctx, source, target, data, spell_level, index)
    }

    fn resolve_spell(
        &self,
        ctx: &GameContext,
        source: &Unit,
        target: &Unit,
        data: &SpellDamage,
        spell_level: u32,
        index: usize,
    ) -> f64 {
        let target_hero = target.kind.is_hero();
        let target_minion = target.kind.is_minion();
        let direct_or_on_hit = data.is_on_hit() || data.spell_effect_type.is_direct();

        let mut already_on_hit = false;
        let mut already_flat_debuff = false;
        let mut already_horn = false;
        let mut buff_gated_to_zero = false;

        let mut base = 0.0;
        let mut bonus_total = 0.0;
        let mut passive = 0.0;
        let mut reduce = 1.0;

        if !data.damages_per_lvl.is_empty() {
            base += per_level(&data.damages_per_lvl, source.level.saturating_sub(1) as usize);
        }
        if !data.damages.is_empty() {
            base += per_level(&data.damages, index);
            if !data.scaling_buff.is_empty() {
                let count = scaling_unit(data.scaling_buff_target, source, target)
                    .buff_count(&data.scaling_buff);
                base = if count > 0 {
                    base * (count as f64 + data.scaling_buff_offset as f64)
                } else {
                    0.0
                };
                buff_gated_to_zero = count == 0;
            }
        }

        if base > 0.0 || !buff_gated_to_zero {
            if target_minion && !data.bonus_damage_on_minion.is_empty() {
                base += per_level(&data.bonus_damage_on_minion, index);
            }
            if is_jungle_monster(target) && !data.bonus_damage_on_monster.is_empty() {
                base += per_level(&data.bonus_damage_on_monster, index);
            }
            if is_enemy_lane_minion(source, target) && !data.bonus_damage_on_soldier.is_empty() {
                base += per_level(&data.bonus_damage_on_soldier, index);
            }
        }

        if base > 0.0 {
            let mut extra = 0.0;
            if direct_or_on_hit {
                if data.is_on_hit() && support_item_execute(ctx, source, target) {
                    return f64::MAX;
                }
                if !data.is_modified_damage && source.has_buff("itemserrateddirkprocbuff") {
                    extra +=
                        self.calculate_damage(ctx, source, target, DamageType::Physical, 40.0);
                }
                already_on_hit = true;
            }

            base = self.calculate_damage(ctx, source, target, data.damage_type, base);
            base += extra;

            if data.is_modified_damage
                && data.damage_type == DamageType::Physical
                && target_hero
                && target.name == "Fizz"
            {
                base -= nimble_fighter_reduction(target);
                already_flat_debuff = true;
            }
            if target_hero && target.has_item(items::GUARDIANS_HORN) {
                base -= if data.spell_effect_type == SpellEffectType::OverTime {
                    3.0
                } else {
                    12.0
                };
                already_horn = true;
            }
        }

        for bonus in &data.bonus_damages {
            let mut extra = 0.0;
            let damage = resolve_bonus_damage(source, target, bonus, index);
            if damage <= 0.0 {
                continue;
            }

            if !already_on_hit && direct_or_on_hit {
                if data.is_on_hit() && support_item_execute(ctx, source, target) {
                    return f64::MAX;
                }
                if !data.is_modified_damage && source.has_buff("itemserrateddirkprocbuff") {
                    extra +=
                        self.calculate_damage(ctx, source, target, DamageType::Physical, 40.0);
                }
                already_on_hit = true;
            }

            bonus_total += self.calculate_damage(ctx, source, target, bonus.damage_type, damage);
            bonus_total += extra;

            if !already_flat_debuff
                && data.is_modified_damage
                && bonus.damage_type == DamageType::Physical
                && target_hero
                && target.name == "Fizz"
            {
                bonus_total -= nimble_fighter_reduction(target);
                already_flat_debuff = true;
            }
            if !already_horn && target_hero && target.has_item(items::GUARDIANS_HORN) {
                bonus_total -= if data.spell_effect_type == SpellEffectType::OverTime {
                    3.0
                } else {
                    12.0
                };
                already_horn = true;
            }
        }

        let mut total = base + bonus_total;

        if is_jungle_monster(target) {
            for monster in &data.damages_on_monster {
                total += self.calculate_damage(
                    ctx,
                    source,
                    target,
                    monster.damage_type,
                    resolve_monster_damage(source, target, monster, index),
                );
            }
        }

        if total > 0.0 {
            // Order-significant multiplier cascade.
            if data.scaling_value_on_soldier > 0.0 && is_enemy_lane_minion(source, target) {
                total *= data.scaling_value_on_soldier;
            }
            if data.max_level_scaling_value_on_minion > 0.0 && spell_level == 5 && target_minion {
                total *= data.max_level_scaling_value_on_minion;
            }
            if data.scale_per_crit_chance > 0.0 {
                total *= source.crit_chance * data.scale_per_crit_chance + 1.0;
            }
            if !data.scale_per_target_miss_health.is_empty() && target.max_health > 0.0 {
                let missing_fraction = (target.max_health - target.health) / target.max_health;
                total *= missing_fraction.min(data.max_scale_target_miss_health)
                    * per_level(&data.scale_per_target_miss_health, index)
                    + 1.0;
            }
            if !data.damages_reduction_on_soldier.is_empty()
                && is_enemy_lane_minion(source, target)
            {
                total *= 1.0 - per_level(&data.damages_reduction_on_soldier, index);
            }
            if !data.damages_reduction_per_lvl_on_soldier.is_empty()
                && is_enemy_lane_minion(source, target)
            {
                total *= 1.0
                    - per_level(
                        &data.damages_reduction_per_lvl_on_soldier,
                        source.level.saturating_sub(1) as usize,
                    );
            }
            // Counter-strike halves area damage while it is up.
            if data.spell_effect_type == SpellEffectType::AoE && target.has_buff("JaxCounterStrike")
            {
                total *= 0.75;
            }
            // Baron-empowered super minions shrug off area and periodic damage.
            if target.has_buff("exaltedwithbaronnashorminion")
                && target.kind.minion_category() == Some(crate::entity::MinionCategory::Super)
                && matches!(
                    data.spell_effect_type,
                    SpellEffectType::AoE | SpellEffectType::OverTime
                )
            {
                total *= 0.25;
            }
            if target_minion && !data.max_damage_on_minion.is_empty() {
                total = total.min(per_level(&data.max_damage_on_minion, index));
            }
            if is_jungle_monster(target) && !data.max_damage_on_monster.is_empty() {
                total = total.min(per_level(&data.max_damage_on_monster, index));
            }
            if is_enemy_lane_minion(source, target) && !data.min_damage_on_soldier.is_empty() {
                total = total.max(per_level(&data.min_damage_on_soldier, index));
            }
            if data.is_on_hit() {
                passive += self
                    .passives()
                    .evaluate(self, ctx, source, target, false)
                    .value;
                if target_hero && data.is_modified_damage && target.has_item(items::NINJA_TABI) {
                    reduce *= 0.88;
                }
            }
        }

        let flat_hooks = if data.is_on_hit() {
            self.passive_flat_mod(ctx, source, target)
        } else {
            0.0
        };

        (total * reduce + flat_hooks + passive).floor().max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Buff, MinionCategory, Snapshot, Unit, UnitKind};
    use crate::types::{Clock, UnitId};

    fn engine_for(roster: &[&str]) -> DamageEngine {
        let roster: Vec<String> = roster.iter().map(|n| n.to_string()).collect();
        DamageEngine::new("9.7", &roster)
    }

    fn context(snapshot: &Snapshot) -> GameContext<'_> {
        GameContext::new(snapshot, Clock::default())
    }

    fn hero(id: u32, name: &str, team: Team) -> Unit {
        Unit::new(UnitId(id), name, UnitKind::Hero, team)
    }

    #[test]
    fn test_unknown_archetype_resolves_to_zero() {
        let engine = engine_for(&["NotInTheBook"]);
        let snapshot = Snapshot::new();
        let ctx = context(&snapshot);
        let mut source = hero(1, "NotInTheBook", Team::Order);
        source.spell_levels = [5; 4];
        let target = hero(2, "Annie", Team::Chaos);

        assert_eq!(
            engine.spell_damage(&ctx, &source, &target, SpellSlot::Q, DamageStage::Default),
            0.0
        );
    }

    #[test]
    fn test_unlearned_spell_is_zero_for_every_slot() {
        let engine = engine_for(&["Annie"]);
        let snapshot = Snapshot::new();
        let ctx = context(&snapshot);
        let source = hero(1, "Annie", Team::Order);
        let target = hero(2, "Garen", Team::Chaos);

        for slot in [SpellSlot::Q, SpellSlot::W, SpellSlot::E, SpellSlot::R] {
            assert_eq!(
                engine.spell_damage(&ctx, &source, &target, slot, DamageStage::Default),
                0.0
            );
        }
    }

    #[test]
    fn test_base_plus_ap_ratio() {
        let engine = engine_for(&["Annie"]);
        let snapshot = Snapshot::new();
        let ctx = context(&snapshot);
        let mut source = hero(1, "Annie", Team::Order);
        source.spell_levels = [1, 0, 0, 0];
        source.ability_power = 100.0;
        let target = hero(2, "Garen", Team::Chaos);

        // 80 base + 0.8 * 100 AP = 160 vs zero resist.
        let damage =
            engine.spell_damage(&ctx, &source, &target, SpellSlot::Q, DamageStage::Default);
        assert_eq!(damage, 160.0);
    }

    #[test]
    fn test_buff_stack_gating_zeroes_without_stacks() {
        let engine = engine_for(&["Nasus"]);
        let snapshot = Snapshot::new();
        let ctx = context(&snapshot);
        let mut source = hero(1, "Nasus", Team::Order);
        source.spell_levels = [5, 0, 0, 0];
        let target = hero(2, "Garen", Team::Chaos);

        // Stack-scaled bonus contributes nothing at zero stacks; the plain
        // base still lands.
        let unstacked =
            engine.spell_damage(&ctx, &source, &target, SpellSlot::Q, DamageStage::Default);

        let mut stacked = source.clone();
        stacked.buffs.push(Buff::with_count("nasusqstacks", 100));
        let with_stacks =
            engine.spell_damage(&ctx, &stacked, &target, SpellSlot::Q, DamageStage::Default);
        assert!(with_stacks > unstacked);
        assert_eq!(with_stacks - unstacked, 100.0);
    }

    #[test]
    fn test_missing_health_scaling_is_clamped() {
        let engine = engine_for(&["Jhin"]);
        let snapshot = Snapshot::new();
        let ctx = context(&snapshot);
        let mut source = hero(1, "Jhin", Team::Order);
        source.spell_levels = [0, 0, 0, 1];
        source.level = 6;
        let mut target = hero(2, "Garen", Team::Chaos);
        target.max_health = 1000.0;

        // Full health: no amplification.
        target.health = 1000.0;
        let full = engine.spell_damage(&ctx, &source, &target, SpellSlot::R, DamageStage::Default);

        // 40% missing: 0.4 * 2.0 + 1 = 1.8x.
        target.health = 600.0;
        let hurt = engine.spell_damage(&ctx, &source, &target, SpellSlot::R, DamageStage::Default);
        assert_eq!(full, 50.0);
        assert_eq!(hurt, 90.0);

        // 90% missing clamps at the configured 80% ceiling: 0.8 * 2 + 1 = 2.6x.
        target.health = 100.0;
        let nearly_dead =
            engine.spell_damage(&ctx, &source, &target, SpellSlot::R, DamageStage::Default);
        assert_eq!(nearly_dead, 130.0);
    }

    #[test]
    fn test_max_damage_on_minion_clamps() {
        let engine = engine_for(&["KogMaw"]);
        let snapshot = Snapshot::new();
        let ctx = context(&snapshot);
        let mut source = hero(1, "KogMaw", Team::Order);
        source.spell_levels = [0, 1, 0, 0];
        let mut target = Unit::new(
            UnitId(2),
            "SRU_Krug",
            UnitKind::Minion(MinionCategory::Melee),
            Team::Neutral,
        );
        target.max_health = 10000.0;
        target.health = 10000.0;

        // 3% of 10000 = 300 magical, clamped to the 100 minion cap.
        let damage =
            engine.spell_damage(&ctx, &source, &target, SpellSlot::W, DamageStage::Default);
        assert_eq!(damage, 100.0);
    }

    #[test]
    fn test_detonation_stage_is_separate() {
        let engine = engine_for(&["Zac"]);
        let snapshot = Snapshot::new();
        let ctx = context(&snapshot);
        let mut source = hero(1, "Zac", Team::Order);
        source.spell_levels = [1, 0, 0, 0];
        source.max_health = 2000.0;
        let target = hero(2, "Garen", Team::Chaos);

        let default =
            engine.spell_damage(&ctx, &source, &target, SpellSlot::Q, DamageStage::Default);
        let detonation =
            engine.spell_damage(&ctx, &source, &target, SpellSlot::Q, DamageStage::Detonation);
        assert!(default > 0.0);
        assert!(detonation > 0.0);
        assert!(detonation != default);
    }

    #[test]
    fn test_all_zero_levels_yield_zero_for_every_slot_and_stage() {
        let engine = engine_for(&["Annie", "Ashe", "Zac", "KogMaw", "Nasus", "Jhin"]);
        let snapshot = Snapshot::new();
        let ctx = context(&snapshot);
        let target = hero(99, "Garen", Team::Chaos);

        for (id, name) in ["Annie", "Ashe", "Zac", "KogMaw", "Nasus", "Jhin"]
            .iter()
            .enumerate()
        {
            let mut source = hero(id as u32 + 1, name, Team::Order);
            source.spell_levels = [0; 4];
            source.ability_power = 500.0;
            source.base_attack_damage = 300.0;
            for slot in [SpellSlot::Q, SpellSlot::W, SpellSlot::E, SpellSlot::R] {
                for stage in [
                    DamageStage::Default,
                    DamageStage::Detonation,
                    DamageStage::Empowered,
                ] {
                    assert_eq!(
                        engine.spell_damage(&ctx, &source, &target, slot, stage),
                        0.0,
                        "{} {:?} {:?}",
                        name,
                        slot,
                        stage
                    );
                }
            }
        }
    }
}
