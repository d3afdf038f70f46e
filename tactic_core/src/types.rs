//! Core types shared across the engine

use serde::{Deserialize, Serialize};

/// Stable network identity of a live game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Identity of a non-unit object (missile, effect emitter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Team affiliation of a game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Order,
    Chaos,
    Neutral,
}

impl Team {
    /// True when the two teams are opposed (neutral is hostile to nobody).
    pub fn is_enemy_of(self, other: Team) -> bool {
        self != other && self != Team::Neutral && other != Team::Neutral
    }
}

/// Damage type of an attack or ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    Magical,
    /// Half physical, half magical.
    Mixed,
    True,
}

impl Default for DamageType {
    fn default() -> Self {
        DamageType::Physical
    }
}

/// Ability slot of a hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellSlot {
    Q,
    W,
    E,
    R,
}

impl SpellSlot {
    /// Index into per-slot arrays (Q..R).
    pub fn index(self) -> usize {
        match self {
            SpellSlot::Q => 0,
            SpellSlot::W => 1,
            SpellSlot::E => 2,
            SpellSlot::R => 3,
        }
    }
}

/// Stage of a multi-part ability, selecting one damage descriptor of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageStage {
    Default,
    WayBack,
    Detonation,
    DamagePerTick,
    DamagePerSecond,
    SecondCast,
    ThirdCast,
    SecondForm,
    Buff,
    Empowered,
}

impl Default for DamageStage {
    fn default() -> Self {
        DamageStage::Default
    }
}

/// Per-tick time source. `now` is the game tick in milliseconds, `ping` the
/// measured round-trip latency; half-ping adjustments use `ping / 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    pub now: i64,
    pub ping: i64,
}

impl Clock {
    pub fn new(now: i64, ping: i64) -> Self {
        Clock { now, ping }
    }

    /// Game time in seconds, as exposed by the floating-point game clock.
    pub fn game_time(&self) -> f64 {
        self.now as f64 / 1000.0
    }
}

/// 2D world position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: Vec2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_enmity() {
        assert!(Team::Order.is_enemy_of(Team::Chaos));
        assert!(!Team::Order.is_enemy_of(Team::Order));
        assert!(!Team::Neutral.is_enemy_of(Team::Order));
        assert!(!Team::Order.is_enemy_of(Team::Neutral));
    }

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clock_game_time() {
        let clock = Clock::new(65_500, 60);
        assert!((clock.game_time() - 65.5).abs() < f64::EPSILON);
    }
}
