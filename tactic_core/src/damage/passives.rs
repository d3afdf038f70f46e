//! Passive damage rule registry
//!
//! A two-level table of independently registered rules: global rules apply to
//! every hero's basic attacks, per-archetype rules only to their champion.
//! Non-override rules sum into the passive component; an override rule
//! replaces the whole basic-attack computation.
//!
//! Rules are registered once per loaded roster and immutable afterwards.
//! Magnitudes are balance data for the patch the damage database targets.

use super::modifiers;
use super::DamageEngine;
use crate::entity::{GameContext, Unit};
use crate::items;
use crate::types::{DamageStage, DamageType, SpellSlot, Team};
use std::collections::HashMap;

pub type PassiveCondition = fn(&GameContext, &Unit, &Unit) -> bool;
pub type PassiveMagnitude = fn(&DamageEngine, &GameContext, &Unit, &Unit) -> f64;

/// One registered passive damage rule.
pub struct PassiveRule {
    pub condition: PassiveCondition,
    pub damage_type: DamageType,
    pub magnitude: PassiveMagnitude,
    /// Use the magnitude as-is instead of running it through the
    /// penetration conversion.
    pub ignore_calculation: bool,
    /// Replace the entire basic-attack computation with this rule's value.
    pub is_override: bool,
}

impl std::fmt::Debug for PassiveRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassiveRule")
            .field("damage_type", &self.damage_type)
            .field("ignore_calculation", &self.ignore_calculation)
            .field("is_override", &self.is_override)
            .finish()
    }
}

/// Result of evaluating the registry for one (source, target) pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveDamageInfo {
    pub value: f64,
    pub is_override: bool,
}

/// Global plus per-archetype passive rules.
#[derive(Debug, Default)]
pub struct PassiveRegistry {
    global: Vec<PassiveRule>,
    by_champion: HashMap<String, Vec<PassiveRule>>,
}

impl PassiveRegistry {
    /// Registry with the shipped rule set for the given hero roster.
    pub fn for_roster(roster: &[String]) -> Self {
        let mut registry = PassiveRegistry::default();
        register_global_rules(&mut registry);
        for name in roster {
            register_champion_rules(&mut registry, name);
        }
        registry
    }

    pub fn add_global(&mut self, rule: PassiveRule) {
        self.global.push(rule);
    }

    pub fn add_champion(&mut self, champion: impl Into<String>, rule: PassiveRule) {
        self.by_champion.entry(champion.into()).or_default().push(rule);
    }

    pub fn champion_rule_count(&self, champion: &str) -> usize {
        self.by_champion.get(champion).map(|r| r.len()).unwrap_or(0)
    }

    /// Evaluate all matching rules for a hero source. With `include_override`
    /// unset, override rules are skipped entirely (the on-hit pipeline of
    /// spell damage re-enters here and must not recurse into overrides).
    pub fn evaluate(
        &self,
        engine: &DamageEngine,
        ctx: &GameContext,
        source: &Unit,
        target: &Unit,
        include_override: bool,
    ) -> PassiveDamageInfo {
        let mut info = PassiveDamageInfo::default();
        let champion_rules = self.by_champion.get(&source.name);
        let rules = self
            .global
            .iter()
            .chain(champion_rules.into_iter().flatten());

        for rule in rules {
            if rule.is_override && !include_override {
                continue;
            }
            if !(rule.condition)(ctx, source, target) {
                continue;
            }
            let magnitude = (rule.magnitude)(engine, ctx, source, target);
            info.value += if rule.ignore_calculation {
                magnitude
            } else {
                engine.calculate_damage(ctx, source, target, rule.damage_type, magnitude)
            };
            if rule.is_override {
                info.is_override = true;
            }
        }

        info
    }
}

/// Extra damage fraction a critical strike adds on top of the base attack.
pub fn crit_multiplier(hero: &Unit) -> f64 {
    if hero.has_item(items::INFINITY_EDGE) {
        1.25
    } else {
        1.0
    }
}

fn is_enemy_lane_minion(source: &Unit, target: &Unit) -> bool {
    target.kind.is_minion() && target.team != Team::Neutral && target.team != source.team
}

fn is_jungle_monster(target: &Unit) -> bool {
    target.kind.is_minion() && target.team == Team::Neutral
}

/// Per-level scaling used by several item procs.
fn level_scaled(base: f64, per_17: f64, level: u32) -> f64 {
    base + per_17 / 17.0 * (level.saturating_sub(1)) as f64
}

const ENERGIZED_DAMAGE: [f64; 18] = [
    60.0, 60.0, 60.0, 60.0, 60.0, 67.0, 73.0, 79.0, 85.0, 91.0, 97.0, 104.0, 110.0, 116.0, 122.0,
    128.0, 134.0, 140.0,
];

fn level_index(level: u32) -> usize {
    (level.saturating_sub(1) as usize).min(17)
}

/// Archetypes whose kit replaces the plain crit bonus on basic attacks.
const CRIT_EXCLUDED: [&str; 14] = [
    "Ashe", "Corki", "Fiora", "Galio", "Graves", "Jayce", "Jhin", "Kayle", "Kled", "Pantheon",
    "Shaco", "Urgot", "Yasuo", "Zac",
];

fn register_global_rules(registry: &mut PassiveRegistry) {
    // Guaranteed critical strike.
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| {
            !CRIT_EXCLUDED.contains(&source.name.as_str())
                && (source.crit_chance - 1.0).abs() < f64::EPSILON
        },
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, source, _target| {
            let base = source.total_attack_damage()
                * if source.name == "Kalista" { 0.9 } else { 1.0 };
            base * crit_multiplier(source)
        },
        ignore_calculation: false,
        is_override: false,
    });
    // Jungle item bonus vs monsters.
    registry.add_global(PassiveRule {
        condition: |_ctx, source, target| {
            source.has_item(items::HUNTERS_MACHETE) && is_jungle_monster(target)
        },
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, _source, _target| 35.0,
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, target| {
            source.has_item(items::DORANS_RING) && is_enemy_lane_minion(source, target)
        },
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, _source, _target| 5.0,
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, target| {
            source.has_item(items::DORANS_SHIELD) && is_enemy_lane_minion(source, target)
        },
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, _source, _target| 5.0,
        ignore_calculation: false,
        is_override: false,
    });
    // Spellthief line tribute charges.
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.buff_count("kagesluckypickdisplay") > 0,
        damage_type: DamageType::Magical,
        magnitude: |_engine, _ctx, source, _target| {
            if source.has_item(items::SPELLTHIEFS_EDGE) {
                13.0
            } else if source.has_item(items::FROSTFANG)
                || source.has_item(items::REMNANT_OF_THE_WATCHERS)
            {
                18.0
            } else {
                0.0
            }
        },
        ignore_calculation: false,
        is_override: false,
    });
    // Energized proc at full charge; the strongest owned source fires.
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.buff_count("itemstatikshankcharge") == 100,
        damage_type: DamageType::Magical,
        magnitude: |_engine, _ctx, source, _target| {
            let stormrazor = source.has_item(items::STORMRAZOR);
            let amp = if stormrazor { 1.3 } else { 1.0 };
            let d0: f64 = if stormrazor { 65.0 } else { 0.0 };
            let d1: f64 = if source.has_item(items::KIRCHEIS_SHARD) { 50.0 } else { 0.0 };
            let d2 = if source.has_item(items::STATIKK_SHIV) {
                ENERGIZED_DAMAGE[level_index(source.level)] * crit_multiplier(source) * amp
            } else {
                0.0
            };
            let d3 = if source.has_item(items::RAPID_FIRECANNON) {
                ENERGIZED_DAMAGE[level_index(source.level)] * amp
            } else {
                0.0
            };
            d0.max(d1).max(d2).max(d3)
        },
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_item(items::RECURVE_BOW),
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, _source, _target| 15.0,
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, target| {
            source.has_item(items::TRACKERS_KNIFE) && is_jungle_monster(target)
        },
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, _source, _target| 40.0,
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, target| {
            source.has_item(items::STALKERS_BLADE) && is_jungle_monster(target)
        },
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, _source, _target| 40.0,
        ignore_calculation: false,
        is_override: false,
    });
    // Spellblade, sheen-family charge.
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_buff("sheen"),
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, source, _target| {
            let d1 = if source.has_item(items::SHEEN) {
                source.base_attack_damage
            } else {
                0.0
            };
            let d2 = if source.has_item(items::TRINITY_FUSION) {
                2.0 * source.base_attack_damage
            } else {
                0.0
            };
            d1.max(d2)
        },
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_buff("itemangelhandbuff"),
        damage_type: DamageType::Magical,
        magnitude: |_engine, _ctx, source, _target| level_scaled(5.0, 15.0, source.level),
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| {
            source.has_buff("Muramana") && source.mana_percent() > 20.0
        },
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, source, _target| 0.06 * source.mana,
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_item(items::WITS_END),
        damage_type: DamageType::Magical,
        magnitude: |_engine, _ctx, source, _target| level_scaled(15.0, 65.0, source.level),
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| {
            source.has_item(items::TRACKERS_KNIFE_BLOODRAZOR)
                || source.has_item(items::STALKERS_BLADE_BLOODRAZOR)
        },
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, _source, target| {
            let cap = if target.kind.is_minion() { 75.0 } else { f64::MAX };
            (0.04 * target.max_health).min(cap)
        },
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_buff("itemfrozenfist"),
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, source, _target| source.base_attack_damage,
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_buff("itemdusknightstalkerdamageproc"),
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, source, _target| level_scaled(30.0, 120.0, source.level),
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_buff("dreadnoughtmomentumbuff"),
        damage_type: DamageType::Magical,
        magnitude: |_engine, _ctx, source, _target| {
            source.buff_count("dreadnoughtmomentumbuff") as f64
        },
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_item(items::NASHORS_TOOTH),
        damage_type: DamageType::Magical,
        magnitude: |_engine, _ctx, source, _target| 15.0 + 0.15 * source.ability_power,
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_buff("lichbane"),
        damage_type: DamageType::Magical,
        magnitude: |_engine, _ctx, source, _target| {
            0.75 * source.base_attack_damage + 0.5 * source.ability_power
        },
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| {
            source.has_item(items::BLADE_OF_THE_RUINED_KING)
                || source.has_item(items::MIGHT_OF_THE_RUINED_KING)
        },
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, _source, target| {
            let cap = if target.kind.is_minion() { 60.0 } else { f64::MAX };
            (0.08 * target.health).min(cap).max(15.0)
        },
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_item(items::GUINSOOS_RAGEBLADE),
        damage_type: DamageType::Magical,
        magnitude: |_engine, _ctx, _source, _target| 15.0,
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_item(items::TITANIC_HYDRA),
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, source, _target| {
            if source.has_buff("itemtitanichydracleavebuff") {
                40.0 + 0.1 * source.max_health
            } else {
                5.0 + 0.01 * source.max_health
            }
        },
        ignore_calculation: false,
        is_override: false,
    });
    registry.add_global(PassiveRule {
        condition: |_ctx, source, _target| source.has_buff("TrinityForce"),
        damage_type: DamageType::Physical,
        magnitude: |_engine, _ctx, source, _target| 2.0 * source.base_attack_damage,
        ignore_calculation: false,
        is_override: false,
    });
}

fn register_champion_rules(registry: &mut PassiveRegistry, name: &str) {
    match name {
        "Aatrox" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("aatroxpassiveready"),
                damage_type: DamageType::Physical,
                magnitude: |_engine, _ctx, source, target| {
                    let cap = if is_jungle_monster(target) { 400.0 } else { f64::MAX };
                    (target.max_health
                        * (0.08 + 0.0047 * source.level.saturating_sub(1) as f64))
                        .min(cap)
                },
                ignore_calculation: false,
                is_override: false,
            });
        }
        "Akali" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("akalipweapon"),
                damage_type: DamageType::Magical,
                magnitude: |_engine, _ctx, source, _target| {
                    const BASE: [f64; 18] = [
                        39.0, 42.0, 45.0, 48.0, 51.0, 54.0, 57.0, 60.0, 69.0, 78.0, 87.0, 96.0,
                        105.0, 120.0, 135.0, 150.0, 165.0, 180.0,
                    ];
                    BASE[level_index(source.level)]
                        + 0.9 * source.bonus_attack_damage
                        + 0.7 * source.ability_power
                },
                ignore_calculation: false,
                is_override: false,
            });
        }
        "Alistar" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("alistareattack"),
                damage_type: DamageType::Magical,
                magnitude: |_engine, _ctx, source, _target| {
                    35.0 + 15.0 * source.level.saturating_sub(1) as f64
                },
                ignore_calculation: false,
                is_override: false,
            });
        }
        "Ashe" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, _source, target| target.has_buff("ashepassiveslow"),
                damage_type: DamageType::Physical,
                magnitude: |_engine, _ctx, source, _target| {
                    (0.1 + source.crit_chance) * source.total_attack_damage()
                },
                ignore_calculation: false,
                is_override: false,
            });
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("AsheQAttack"),
                damage_type: DamageType::Physical,
                magnitude: |engine, ctx, source, target| {
                    engine.spell_damage(ctx, source, target, SpellSlot::Q, DamageStage::Default)
                },
                ignore_calculation: true,
                is_override: true,
            });
        }
        "Blitzcrank" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("PowerFist"),
                damage_type: DamageType::Physical,
                magnitude: |_engine, _ctx, source, _target| source.total_attack_damage(),
                ignore_calculation: false,
                is_override: false,
            });
        }
        "Caitlyn" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("caitlynheadshot"),
                damage_type: DamageType::Physical,
                magnitude: |_engine, _ctx, source, _target| {
                    source.total_attack_damage()
                        * (0.5 + if (source.crit_chance - 1.0).abs() < f64::EPSILON {
                            crit_multiplier(source) / 2.0
                        } else {
                            0.0
                        })
                },
                ignore_calculation: false,
                is_override: false,
            });
        }
        "Draven" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("DravenSpinningAttack"),
                damage_type: DamageType::Physical,
                magnitude: |engine, ctx, source, target| {
                    engine.spell_damage(ctx, source, target, SpellSlot::Q, DamageStage::Default)
                },
                ignore_calculation: true,
                is_override: false,
            });
        }
        "Garen" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("GarenQProc"),
                damage_type: DamageType::Physical,
                magnitude: |engine, ctx, source, target| {
                    engine.spell_damage(ctx, source, target, SpellSlot::Q, DamageStage::Default)
                },
                ignore_calculation: true,
                is_override: true,
            });
        }
        "Jax" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("JaxEmpowerTwo"),
                damage_type: DamageType::Magical,
                magnitude: |engine, ctx, source, target| {
                    engine.spell_damage(ctx, source, target, SpellSlot::W, DamageStage::Default)
                },
                ignore_calculation: true,
                is_override: false,
            });
        }
        "Jhin" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("jhinpassiveattackbuff"),
                damage_type: DamageType::Physical,
                magnitude: |_engine, _ctx, source, target| {
                    let percent = if source.level < 6 {
                        0.15
                    } else if source.level < 11 {
                        0.2
                    } else {
                        0.25
                    };
                    percent * target.missing_health()
                },
                ignore_calculation: false,
                is_override: false,
            });
        }
        "Nasus" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("NasusQ"),
                damage_type: DamageType::Physical,
                magnitude: |engine, ctx, source, target| {
                    engine.spell_damage(ctx, source, target, SpellSlot::Q, DamageStage::Default)
                },
                ignore_calculation: true,
                is_override: false,
            });
        }
        "Teemo" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.spell_level(SpellSlot::E) > 0,
                damage_type: DamageType::Magical,
                magnitude: |engine, ctx, source, target| {
                    engine.spell_damage(ctx, source, target, SpellSlot::E, DamageStage::Default)
                },
                ignore_calculation: true,
                is_override: false,
            });
        }
        "Vayne" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, _source, target| target.buff_count("VayneSilveredDebuff") == 2,
                damage_type: DamageType::True,
                magnitude: |engine, ctx, source, target| {
                    engine.spell_damage(ctx, source, target, SpellSlot::W, DamageStage::Default)
                },
                ignore_calculation: true,
                is_override: false,
            });
        }
        "Ziggs" => {
            registry.add_champion(name, PassiveRule {
                condition: |_ctx, source, _target| source.has_buff("ziggsshortfuse"),
                damage_type: DamageType::Magical,
                magnitude: |_engine, _ctx, source, _target| {
                    20.0 + 4.0 * source.level as f64 + 0.35 * source.ability_power
                },
                ignore_calculation: false,
                is_override: false,
            });
        }
        _ => {}
    }
}

/// Support-item execute: a melee support attacking a low lane minion with a
/// tribute charge and a nearby ally consumes the minion outright.
pub fn support_item_execute(ctx: &GameContext, source: &Unit, target: &Unit) -> bool {
    if !source.is_melee
        || !target.kind.is_minion()
        || target.team == Team::Neutral
        || source.buff_count("talentreaperdisplay") == 0
    {
        return false;
    }

    let has_nearby_ally = ctx.snapshot.heroes().any(|h| {
        h.team == source.team
            && h.id != source.id
            && h.distance(source) < 1000.0
            && h.distance(target) < 1000.0
    });
    if !has_nearby_ally {
        return false;
    }

    let threshold = if source.has_item(items::RELIC_SHIELD) {
        195.0 + 5.0 * source.level as f64
    } else if source.has_item(items::TARGONS_BRACE) {
        200.0 + 15.0 * source.level as f64
    } else if source.has_item(items::REMNANT_OF_THE_ASPECT) {
        320.0 + 30.0 * source.level as f64
    } else {
        0.0
    };

    target.health < threshold
}

/// Post-penetration modifier table application for the basic-attack and
/// spell pipelines.
pub(crate) fn apply_reduction_rules(
    rules: &[modifiers::ReductionRule],
    ctx: &GameContext,
    source: &Unit,
    target: &Unit,
    damage_type: DamageType,
    amount: f64,
) -> f64 {
    rules
        .iter()
        .fold(amount, |acc, rule| (rule.apply)(ctx, source, target, damage_type, acc))
}
