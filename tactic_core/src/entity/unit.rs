//! Unit - the tick-scoped view of one live game object

use super::buff::Buff;
use super::kind::UnitKind;
use crate::items::ItemId;
use crate::types::{Team, UnitId, Vec2};

/// Snapshot state of a single unit.
///
/// Units are owned by the snapshot store; engine components keep only
/// `UnitId` handles and look the unit up again each tick.
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: UnitId,
    /// Character archetype name, the key into the data-driven tables.
    pub name: String,
    pub kind: UnitKind,
    pub team: Team,

    pub position: Vec2,
    /// Current movement path; empty when standing still.
    pub path: Vec<Vec2>,

    pub health: f64,
    pub max_health: f64,
    pub bonus_health: f64,
    pub mana: f64,
    pub max_mana: f64,
    pub bonus_mana: f64,

    pub armor: f64,
    pub bonus_armor: f64,
    pub magic_resist: f64,
    pub bonus_magic_resist: f64,

    pub base_attack_damage: f64,
    pub bonus_attack_damage: f64,
    pub ability_power: f64,
    /// Critical strike chance in [0, 1].
    pub crit_chance: f64,

    pub flat_armor_pen: f64,
    /// Multiplier applied to the target's base armor; 1.0 means no penetration.
    pub percent_armor_pen: f64,
    pub percent_bonus_armor_pen: f64,
    pub lethality: f64,
    pub flat_magic_pen: f64,
    pub percent_magic_pen: f64,
    pub percent_bonus_magic_pen: f64,
    pub magic_lethality: f64,

    pub level: u32,
    /// Invested ranks per ability slot, indexed by `SpellSlot::index`.
    pub spell_levels: [u32; 4],

    pub is_melee: bool,
    pub bounding_radius: f64,
    pub attack_range: f64,
    /// Windup before a basic attack commits, in seconds.
    pub attack_cast_delay: f64,
    /// Full basic-attack cycle time, in seconds.
    pub attack_delay: f64,
    /// Basic-attack missile speed; ignored for melee units.
    pub missile_speed: f64,
    /// Current attack target, if the unit is locked onto one.
    pub target: Option<UnitId>,

    pub buffs: Vec<Buff>,
    pub items: Vec<ItemId>,

    pub is_alive: bool,
    pub is_visible: bool,
    pub is_targetable: bool,
    pub is_invulnerable: bool,
    pub is_targetable_to_enemies: bool,
    pub is_hp_bar_rendered: bool,
}

impl Unit {
    /// A unit with neutral combat stats; tests and scenario setup adjust the
    /// fields they care about.
    pub fn new(id: UnitId, name: impl Into<String>, kind: UnitKind, team: Team) -> Self {
        Unit {
            id,
            name: name.into(),
            kind,
            team,
            position: Vec2::default(),
            path: Vec::new(),
            health: 1000.0,
            max_health: 1000.0,
            bonus_health: 0.0,
            mana: 0.0,
            max_mana: 0.0,
            bonus_mana: 0.0,
            armor: 0.0,
            bonus_armor: 0.0,
            magic_resist: 0.0,
            bonus_magic_resist: 0.0,
            base_attack_damage: 0.0,
            bonus_attack_damage: 0.0,
            ability_power: 0.0,
            crit_chance: 0.0,
            flat_armor_pen: 0.0,
            percent_armor_pen: 1.0,
            percent_bonus_armor_pen: 0.0,
            lethality: 0.0,
            flat_magic_pen: 0.0,
            percent_magic_pen: 1.0,
            percent_bonus_magic_pen: 0.0,
            magic_lethality: 0.0,
            level: 1,
            spell_levels: [0; 4],
            is_melee: false,
            bounding_radius: 65.0,
            attack_range: 550.0,
            attack_cast_delay: 0.25,
            attack_delay: 1.0,
            missile_speed: 2000.0,
            target: None,
            buffs: Vec::new(),
            items: Vec::new(),
            is_alive: true,
            is_visible: true,
            is_targetable: true,
            is_invulnerable: false,
            is_targetable_to_enemies: true,
            is_hp_bar_rendered: true,
        }
    }

    /// Total attack damage, base plus bonus.
    pub fn total_attack_damage(&self) -> f64 {
        self.base_attack_damage + self.bonus_attack_damage
    }

    /// Fraction of mana remaining, as a percentage.
    pub fn mana_percent(&self) -> f64 {
        if self.max_mana <= 0.0 {
            0.0
        } else {
            self.mana / self.max_mana * 100.0
        }
    }

    pub fn missing_health(&self) -> f64 {
        (self.max_health - self.health).max(0.0)
    }

    pub fn distance(&self, other: &Unit) -> f64 {
        self.position.distance(other.position)
    }

    pub fn distance_squared(&self, other: &Unit) -> f64 {
        self.position.distance_squared(other.position)
    }

    /// Effective basic-attack range against a target, edge to edge.
    pub fn real_auto_attack_range(&self, target: Option<&Unit>) -> f64 {
        self.attack_range
            + self.bounding_radius
            + target.map(|t| t.bounding_radius).unwrap_or(0.0)
    }

    pub fn has_buff(&self, name: &str) -> bool {
        self.buffs.iter().any(|b| b.name == name)
    }

    pub fn buff(&self, name: &str) -> Option<&Buff> {
        self.buffs.iter().find(|b| b.name == name)
    }

    pub fn buff_count(&self, name: &str) -> u32 {
        self.buff(name).map(|b| b.count).unwrap_or(0)
    }

    pub fn has_item(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn spell_level(&self, slot: crate::types::SpellSlot) -> u32 {
        self.spell_levels[slot.index()]
    }

    /// A unit is valid for queries while it is alive and still in play.
    pub fn is_valid(&self) -> bool {
        self.is_alive
    }
}
