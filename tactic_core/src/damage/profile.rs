//! Champion damage profiles - the data model behind spell damage
//!
//! Profiles are deserialized once per game version from the embedded damage
//! database and are immutable afterwards. Empty tables mean "not present";
//! every resolver treats absence as a zero contribution.

use crate::entity::Unit;
use crate::types::{DamageStage, DamageType, SpellSlot};
use serde::Deserialize;

/// Which side of the (source, target) pair a scaling reads its attribute from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingTarget {
    Source,
    Target,
}

impl Default for ScalingTarget {
    fn default() -> Self {
        ScalingTarget::Source
    }
}

/// Attribute a damage scaling is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingSource {
    AttackPoints,
    BonusAttackPoints,
    AbilityPoints,
    BonusHealth,
    CurrentHealth,
    MaxHealth,
    MissingHealth,
    BonusMana,
    MaxMana,
    Armor,
    BonusArmor,
    SpellBlock,
    BonusSpellBlock,
    PhysicalLethality,
}

impl Default for ScalingSource {
    fn default() -> Self {
        ScalingSource::AbilityPoints
    }
}

impl ScalingSource {
    /// Read the scaled attribute off a unit.
    pub fn resolve(self, unit: &Unit) -> f64 {
        match self {
            ScalingSource::AttackPoints => unit.total_attack_damage(),
            ScalingSource::BonusAttackPoints => unit.bonus_attack_damage,
            ScalingSource::AbilityPoints => unit.ability_power,
            ScalingSource::BonusHealth => unit.bonus_health,
            ScalingSource::CurrentHealth => unit.health,
            ScalingSource::MaxHealth => unit.max_health,
            ScalingSource::MissingHealth => unit.missing_health(),
            ScalingSource::BonusMana => unit.bonus_mana,
            ScalingSource::MaxMana => unit.max_mana,
            ScalingSource::Armor => unit.armor,
            ScalingSource::BonusArmor => unit.bonus_armor,
            ScalingSource::SpellBlock => unit.magic_resist,
            ScalingSource::BonusSpellBlock => unit.bonus_magic_resist,
            ScalingSource::PhysicalLethality => unit.lethality,
        }
    }
}

/// Shape of an ability's damage delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellEffectType {
    None,
    #[serde(rename = "aoe")]
    AoE,
    Single,
    OverTime,
    Attack,
}

impl Default for SpellEffectType {
    fn default() -> Self {
        SpellEffectType::None
    }
}

impl SpellEffectType {
    /// Effect shapes that behave like a direct hit for the on-hit pipeline.
    pub fn is_direct(self) -> bool {
        matches!(
            self,
            SpellEffectType::Single | SpellEffectType::AoE | SpellEffectType::Attack
        )
    }
}

/// A percent-of-attribute damage term used against jungle monsters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonsterDamage {
    pub damage_percentages: Vec<f64>,
    pub damage_type: DamageType,
    pub scaling_target: ScalingTarget,
    pub scaling_source: ScalingSource,
}

/// An attribute-scaled floor/ceiling for a bonus damage entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DamageLimit {
    pub damages: Vec<f64>,
    pub damage_percentages: Vec<f64>,
    pub scaling_target: ScalingTarget,
    pub scaling_source: ScalingSource,
}

/// One independently scaled bonus damage term of an ability.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BonusDamage {
    pub damage_type: DamageType,
    pub damage_percentages: Vec<f64>,
    pub scaling_target: ScalingTarget,
    pub scaling_source: ScalingSource,
    /// Extra percentage per 100 of the source's attribute.
    pub scale_per_100_ap: f64,
    pub scale_per_100_ad: f64,
    pub scale_per_100_bonus_ad: f64,
    /// Percentage added per stack of `percentage_stack_buff`.
    pub percentage_per_buff_stack: f64,
    pub percentage_stack_buff: String,
    /// Gate for the stack percentage; empty means always on.
    pub percentage_check_buff: String,
    /// Flat addition of a buff's stack count plus an offset.
    pub bonus_buff: String,
    pub bonus_buff_offset: i32,
    /// Multiplies the whole term by stacks of a buff; zero stacks zero it.
    pub scaling_buff: String,
    pub scaling_buff_offset: i32,
    pub scaling_buff_target: ScalingTarget,
    pub bonus_damage_on_minion: Vec<f64>,
    pub bonus_damage_on_monster: Vec<f64>,
    pub max_damage_on_minion: Vec<f64>,
    pub max_damage_on_monster: Vec<f64>,
    pub min_damage: DamageLimit,
}

/// Full damage descriptor of one ability stage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpellDamage {
    pub damage_type: DamageType,
    /// Base damage per invested spell level.
    pub damages: Vec<f64>,
    /// Base damage per champion level.
    pub damages_per_lvl: Vec<f64>,
    /// Multiplies the base by stacks of a buff; zero stacks drop the base.
    pub scaling_buff: String,
    pub scaling_buff_offset: i32,
    pub scaling_buff_target: ScalingTarget,
    /// Slot whose invested level drives the tables, when not the cast slot.
    pub scale_slot: Option<SpellSlot>,
    pub bonus_damage_on_minion: Vec<f64>,
    pub bonus_damage_on_monster: Vec<f64>,
    pub bonus_damage_on_soldier: Vec<f64>,
    pub bonus_damages: Vec<BonusDamage>,
    pub damages_on_monster: Vec<MonsterDamage>,
    pub damages_reduction_on_soldier: Vec<f64>,
    pub damages_reduction_per_lvl_on_soldier: Vec<f64>,
    pub max_damage_on_minion: Vec<f64>,
    pub max_damage_on_monster: Vec<f64>,
    pub min_damage_on_soldier: Vec<f64>,
    pub max_level_scaling_value_on_minion: f64,
    pub scale_per_target_miss_health: Vec<f64>,
    pub max_scale_target_miss_health: f64,
    pub scale_per_crit_chance: f64,
    pub scaling_value_on_soldier: f64,
    pub is_apply_on_hit: bool,
    pub is_modified_damage: bool,
    pub spell_effect_type: SpellEffectType,
}

impl SpellDamage {
    /// True when this descriptor participates in the basic-attack on-hit
    /// pipeline (support execute, proc items, flat debuffs).
    pub fn is_on_hit(&self) -> bool {
        self.is_apply_on_hit || self.is_modified_damage
    }
}

/// One (stage, descriptor) entry of an ability slot.
#[derive(Debug, Clone, Deserialize)]
pub struct SpellEntry {
    #[serde(default)]
    pub stage: DamageStage,
    pub spell_data: SpellDamage,
}

/// Damage descriptors of all four ability slots of one archetype.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChampionProfile {
    pub q: Vec<SpellEntry>,
    pub w: Vec<SpellEntry>,
    pub e: Vec<SpellEntry>,
    pub r: Vec<SpellEntry>,
}

impl ChampionProfile {
    pub fn slot(&self, slot: SpellSlot) -> &[SpellEntry] {
        match slot {
            SpellSlot::Q => &self.q,
            SpellSlot::W => &self.w,
            SpellSlot::E => &self.e,
            SpellSlot::R => &self.r,
        }
    }

    /// Descriptor for a slot and stage, if the profile carries one.
    pub fn spell_data(&self, slot: SpellSlot, stage: DamageStage) -> Option<&SpellDamage> {
        self.slot(slot)
            .iter()
            .find(|e| e.stage == stage)
            .map(|e| &e.spell_data)
    }
}

/// Index a per-level table; levels past the end of the table reuse the last
/// entry.
pub fn per_level(table: &[f64], level_index: usize) -> f64 {
    if table.is_empty() {
        0.0
    } else {
        table[level_index.min(table.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Team, UnitId};
    use crate::entity::UnitKind;

    #[test]
    fn test_per_level_saturates() {
        let table = [10.0, 20.0, 30.0];
        assert!((per_level(&table, 0) - 10.0).abs() < f64::EPSILON);
        assert!((per_level(&table, 2) - 30.0).abs() < f64::EPSILON);
        assert!((per_level(&table, 9) - 30.0).abs() < f64::EPSILON);
        assert!((per_level(&[], 4) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scaling_source_resolution() {
        let mut unit = Unit::new(UnitId(1), "Annie", UnitKind::Hero, Team::Order);
        unit.base_attack_damage = 55.0;
        unit.bonus_attack_damage = 20.0;
        unit.ability_power = 140.0;
        unit.health = 400.0;
        unit.max_health = 1000.0;
        assert!((ScalingSource::AttackPoints.resolve(&unit) - 75.0).abs() < f64::EPSILON);
        assert!((ScalingSource::AbilityPoints.resolve(&unit) - 140.0).abs() < f64::EPSILON);
        assert!((ScalingSource::MissingHealth.resolve(&unit) - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_profile_deserializes_from_json() {
        let json = r#"
        {
            "q": [
                {
                    "stage": "default",
                    "spell_data": {
                        "damage_type": "magical",
                        "damages": [80.0, 115.0, 150.0, 185.0, 220.0],
                        "bonus_damages": [
                            {
                                "damage_type": "magical",
                                "scaling_source": "ability_points",
                                "damage_percentages": [0.8]
                            }
                        ],
                        "spell_effect_type": "single"
                    }
                }
            ]
        }"#;
        let profile: ChampionProfile = serde_json::from_str(json).unwrap();
        let data = profile.spell_data(SpellSlot::Q, DamageStage::Default).unwrap();
        assert_eq!(data.damage_type, DamageType::Magical);
        assert_eq!(data.damages.len(), 5);
        assert_eq!(data.bonus_damages.len(), 1);
        assert!(profile.spell_data(SpellSlot::W, DamageStage::Default).is_none());
    }
}
