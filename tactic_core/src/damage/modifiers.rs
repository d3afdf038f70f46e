//! Damage modifier rule tables
//!
//! Three independently extensible rule families:
//! - reduction rules: buff-conditional multiplicative (or flat) adjustments
//!   applied inside the penetration conversion,
//! - attack modifiers: per-archetype transformations of the physical/magical
//!   split of a basic attack,
//! - percent/flat passive hooks: empty by default, registered by embedders
//!   that model effects the shipped tables do not.
//!
//! Every entry is registered on its own; adding one never touches another.
//! The numeric values are balance data for the patch the damage database
//! targets.

use super::DamageEngine;
use crate::entity::{GameContext, MinionCategory, Unit};
use crate::types::{DamageType, SpellSlot};

/// Running components of a basic-attack damage computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackState {
    /// Physical component, still pre-penetration.
    pub physical: f64,
    /// Magical component, still pre-penetration.
    pub magical: f64,
    /// Passive contributions, already fully resolved.
    pub passive: f64,
    /// Post-penetration physical addition.
    pub physical_addition: f64,
    /// Post-penetration magical addition.
    pub magical_addition: f64,
    /// Flat physical damage added after the final sum.
    pub physical_flat: f64,
    /// Flat magical damage added after the final sum.
    pub magical_flat: f64,
    /// Multiplier on the converted physical+magical total.
    pub reduce: f64,
}

impl AttackState {
    pub fn new(physical: f64) -> Self {
        AttackState {
            physical,
            reduce: 1.0,
            ..AttackState::default()
        }
    }
}

pub type ReductionFn = fn(&GameContext, &Unit, &Unit, DamageType, f64) -> f64;

/// One buff-conditional damage adjustment.
pub struct ReductionRule {
    pub name: &'static str,
    pub apply: ReductionFn,
}

impl std::fmt::Debug for ReductionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReductionRule").field("name", &self.name).finish()
    }
}

pub type PercentModFn = fn(&GameContext, &Unit, &Unit, f64, DamageType) -> f64;
pub type FlatModFn = fn(&GameContext, &Unit, &Unit) -> f64;

pub type AttackModifierFn = fn(&DamageEngine, &GameContext, &Unit, &Unit, &mut AttackState);

/// Per-archetype base-stat transformation of a basic attack.
pub struct AttackModifier {
    pub champion: &'static str,
    pub apply: AttackModifierFn,
}

impl std::fmt::Debug for AttackModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttackModifier")
            .field("champion", &self.champion)
            .finish()
    }
}

const ELEMENTAL_DRAKES: [&str; 4] = [
    "SRU_Dragon_Air",
    "SRU_Dragon_Earth",
    "SRU_Dragon_Fire",
    "SRU_Dragon_Water",
];

const SHYVANA_TARGETS: [&str; 6] = [
    "SRU_Dragon_Air",
    "SRU_Dragon_Earth",
    "SRU_Dragon_Fire",
    "SRU_Dragon_Water",
    "SRU_Dragon_Elder",
    "TT_Spiderboss",
];

/// Index a per-rank table by an ability rank, saturating at both ends.
fn rank_value(table: &[f64], level: u32) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    let index = (level.max(1) as usize - 1).min(table.len() - 1);
    table[index]
}

/// The shipped reduction rule set, in application order.
pub fn default_reduction_rules() -> Vec<ReductionRule> {
    vec![
        ReductionRule {
            name: "drake-grudge-amp",
            apply: |_ctx, source, target, _damage_type, amount| {
                // Elemental drakes hit harder per drake the defender's team
                // has banked.
                if target.kind.is_hero()
                    && source.kind.is_minion()
                    && source.team == crate::types::Team::Neutral
                    && ELEMENTAL_DRAKES.contains(&source.name.as_str())
                {
                    if let Some(buff) = target.buff("dragonbuff_tooltipmanager") {
                        return amount * (1.0 + 0.2 * buff.count as f64);
                    }
                }
                amount
            },
        },
        ReductionRule {
            name: "baron-gaze",
            apply: |_ctx, source, target, _damage_type, amount| {
                if source.kind.is_hero()
                    && target.kind.is_minion()
                    && target.team == crate::types::Team::Neutral
                    && source.has_buff("barontarget")
                    && target.name == "SRU_Baron"
                {
                    return amount * 0.5;
                }
                amount
            },
        },
        ReductionRule {
            name: "drake-grudge-reduction",
            apply: |_ctx, source, target, _damage_type, amount| {
                if source.kind.is_hero()
                    && target.kind.is_minion()
                    && target.team == crate::types::Team::Neutral
                    && ELEMENTAL_DRAKES.contains(&target.name.as_str())
                {
                    if let Some(buff) = source.buff("dragonbuff_tooltipmanager") {
                        return amount * (1.0 - 0.07 * buff.count as f64);
                    }
                }
                amount
            },
        },
        ReductionRule {
            name: "shyvana-dragonborn",
            apply: |_ctx, source, target, _damage_type, amount| {
                if source.kind.is_hero()
                    && target.kind.is_minion()
                    && target.team == crate::types::Team::Neutral
                    && source.has_buff("shyvanapassive")
                    && SHYVANA_TARGETS.contains(&target.name.as_str())
                {
                    return amount * 1.2;
                }
                amount
            },
        },
        ReductionRule {
            name: "summoner-exhaust",
            apply: |_ctx, source, _target, _damage_type, amount| {
                if source.kind.is_hero() && source.has_buff("SummonerExhaust") {
                    return amount * 0.6;
                }
                amount
            },
        },
        ReductionRule {
            name: "hemoplague-amp",
            apply: |_ctx, _source, target, _damage_type, amount| {
                if target.has_buff("vladimirhemoplaguedamageamp") {
                    return amount * 1.1;
                }
                amount
            },
        },
        ReductionRule {
            name: "sona-w-debuff",
            apply: |ctx, source, _target, _damage_type, amount| {
                if let Some(buff) = source.buff("sonapassivedebuff") {
                    let caster_power = buff
                        .caster
                        .and_then(|id| ctx.valid_unit(id))
                        .map(|caster| caster.ability_power)
                        .unwrap_or(0.0);
                    return amount * (1.0 - 0.25 - 0.04 * caster_power / 100.0);
                }
                amount
            },
        },
        ReductionRule {
            name: "baron-empowered-minion",
            apply: |_ctx, source, target, _damage_type, amount| {
                if target.kind.is_minion() && target.has_buff("exaltedwithbaronnashorminion") {
                    match target.kind.minion_category() {
                        Some(MinionCategory::Ranged) if source.kind.is_hero() => {
                            return amount * 0.3;
                        }
                        Some(MinionCategory::Melee) => {
                            if source.kind.is_hero() {
                                return amount * 0.3;
                            }
                            if source.kind.is_minion()
                                && source.team != crate::types::Team::Neutral
                            {
                                return amount * 0.25;
                            }
                        }
                        _ => {}
                    }
                }
                amount
            },
        },
        ReductionRule {
            name: "baron-empowered-siege-vs-turret",
            apply: |_ctx, source, target, _damage_type, amount| {
                if source.kind.minion_category() == Some(MinionCategory::Siege)
                    && target.kind.is_turret()
                    && source.has_buff("exaltedwithbaronnashorminion")
                {
                    return amount * 2.0;
                }
                amount
            },
        },
        ReductionRule {
            name: "alistar-unbreakable-will",
            apply: |_ctx, _source, target, _damage_type, amount| {
                if target.kind.is_hero() && target.has_buff("FerociousHowl") {
                    let percent = rank_value(&[0.55, 0.65, 0.75], target.spell_level(SpellSlot::R));
                    return amount * (1.0 - percent);
                }
                amount
            },
        },
        ReductionRule {
            name: "amumu-tantrum",
            apply: |_ctx, _source, target, damage_type, amount| {
                if target.kind.is_hero()
                    && target.has_buff("Tantrum")
                    && damage_type == DamageType::Physical
                {
                    let flat = rank_value(&[2.0, 4.0, 6.0, 8.0, 10.0], target.spell_level(SpellSlot::E));
                    return amount
                        - (flat + 0.03 * target.bonus_armor + 0.03 * target.bonus_magic_resist);
                }
                amount
            },
        },
        ReductionRule {
            name: "annie-molten-shield",
            apply: |_ctx, _source, target, _damage_type, amount| {
                if target.kind.is_hero() && target.has_buff("AnnieE") {
                    let percent =
                        rank_value(&[0.16, 0.22, 0.28, 0.34, 0.4], target.spell_level(SpellSlot::E));
                    return amount * (1.0 - percent);
                }
                amount
            },
        },
        ReductionRule {
            name: "braum-unbreakable",
            apply: |_ctx, _source, target, _damage_type, amount| {
                if target.kind.is_hero() && target.has_buff("braumeshieldbuff") {
                    let percent =
                        rank_value(&[0.3, 0.325, 0.35, 0.375, 0.4], target.spell_level(SpellSlot::E));
                    return amount * (1.0 - percent);
                }
                amount
            },
        },
        ReductionRule {
            name: "galio-shield-of-durand",
            apply: |_ctx, _source, target, damage_type, amount| {
                if target.kind.is_hero() && target.has_buff("galiowbuff") {
                    let percent = rank_value(&[0.2, 0.25, 0.3, 0.35, 0.4], target.spell_level(SpellSlot::W))
                        + 0.05 * target.ability_power / 100.0
                        + 0.08 * target.bonus_magic_resist / 100.0;
                    let applied = match damage_type {
                        DamageType::Magical => percent,
                        DamageType::Physical => percent / 2.0,
                        _ => 0.0,
                    };
                    return amount * (1.0 - applied);
                }
                amount
            },
        },
        ReductionRule {
            name: "garen-courage",
            apply: |ctx, _source, target, _damage_type, amount| {
                if target.kind.is_hero() {
                    if let Some(buff) = target.buff("GarenW") {
                        let fresh = ctx.clock.game_time() - buff.start_time < 0.75;
                        return amount * (1.0 - if fresh { 0.6 } else { 0.3 });
                    }
                }
                amount
            },
        },
        ReductionRule {
            name: "gragas-drunken-rage",
            apply: |_ctx, _source, target, _damage_type, amount| {
                if target.kind.is_hero() && target.has_buff("gragaswself") {
                    let percent =
                        rank_value(&[0.1, 0.12, 0.14, 0.16, 0.18], target.spell_level(SpellSlot::W))
                            + 0.04 * target.ability_power / 100.0;
                    return amount * (1.0 - percent);
                }
                amount
            },
        },
        ReductionRule {
            name: "irelia-defiant-dance",
            apply: |_ctx, _source, target, damage_type, amount| {
                if target.kind.is_hero()
                    && target.has_buff("ireliawdefense")
                    && damage_type == DamageType::Physical
                {
                    return amount * (1.0 - 0.5 - 0.07 * target.ability_power / 100.0);
                }
                amount
            },
        },
        ReductionRule {
            name: "kassadin-void-stone",
            apply: |_ctx, _source, target, damage_type, amount| {
                if target.kind.is_hero()
                    && target.has_buff("voidstone")
                    && damage_type == DamageType::Magical
                {
                    return amount * (1.0 - 0.15);
                }
                amount
            },
        },
        ReductionRule {
            name: "master-yi-meditate",
            apply: |_ctx, source, target, _damage_type, amount| {
                if target.kind.is_hero() && target.has_buff("Meditate") {
                    let percent =
                        rank_value(&[0.6, 0.625, 0.65, 0.675, 0.7], target.spell_level(SpellSlot::W))
                            * if source.kind.is_turret() { 0.5 } else { 1.0 };
                    return amount * (1.0 - percent);
                }
                amount
            },
        },
        ReductionRule {
            name: "warwick-primal-howl",
            apply: |_ctx, _source, target, _damage_type, amount| {
                if target.kind.is_hero() && target.has_buff("WarwickE") {
                    let percent =
                        rank_value(&[0.35, 0.4, 0.45, 0.5, 0.55], target.spell_level(SpellSlot::E));
                    return amount * (1.0 - percent);
                }
                amount
            },
        },
    ]
}

/// The shipped basic-attack stat transformations.
pub fn default_attack_modifiers() -> Vec<AttackModifier> {
    vec![
        AttackModifier {
            champion: "Kalista",
            apply: |_engine, _ctx, _source, _target, state| {
                state.physical *= 0.9;
            },
        },
        AttackModifier {
            champion: "Corki",
            apply: |_engine, _ctx, _source, _target, state| {
                state.magical = state.physical * 0.8;
                state.physical -= state.magical;
            },
        },
        AttackModifier {
            champion: "Galio",
            apply: |_engine, _ctx, source, _target, state| {
                if source.has_buff("galiopassivebuff") {
                    state.physical = 0.0;
                }
            },
        },
        AttackModifier {
            champion: "Jhin",
            apply: |_engine, _ctx, source, _target, state| {
                let crit = (source.crit_chance - 1.0).abs() < f64::EPSILON;
                if crit || source.has_buff("jhinpassiveattackbuff") {
                    state.physical *= 0.75;
                }
            },
        },
        AttackModifier {
            champion: "Kled",
            apply: |_engine, _ctx, source, _target, state| {
                if source.mana.abs() < f64::EPSILON {
                    state.physical *= 0.8;
                }
            },
        },
        AttackModifier {
            champion: "Urgot",
            apply: |engine, ctx, source, target, state| {
                if source.has_buff("urgotwshield") {
                    state.physical_addition = engine.spell_damage(
                        ctx,
                        source,
                        target,
                        SpellSlot::W,
                        crate::types::DamageStage::Default,
                    );
                    state.physical = 0.0;
                    state.passive /= 2.0;
                }
            },
        },
        AttackModifier {
            champion: "Yasuo",
            apply: |_engine, _ctx, source, _target, state| {
                if (source.crit_chance - 1.0).abs() < f64::EPSILON {
                    state.physical *= 0.9;
                }
            },
        },
        AttackModifier {
            champion: "Zac",
            apply: |engine, ctx, source, target, state| {
                if source.has_buff("zacqempowered") {
                    state.magical_flat = engine.spell_damage(
                        ctx,
                        source,
                        target,
                        SpellSlot::Q,
                        crate::types::DamageStage::Detonation,
                    );
                    state.physical = 0.0;
                    state.passive = 0.0;
                }
            },
        },
    ]
}
