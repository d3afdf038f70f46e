//! tactic_core - Combat decision-support library for game clients
//!
//! This library provides:
//! - DamageEngine: physical/magical/true damage estimation with penetration
//!   math, passive rules and data-driven ability damage
//! - HealthPrediction: future-health projection from in-flight basic attacks
//! - Event detectors: dash, stealth and turret-attack events from raw
//!   per-tick state deltas
//! - TargetSelector: candidate ranking under pluggable ordering strategies

pub mod auto_attack;
pub mod config;
pub mod damage;
pub mod engine;
pub mod entity;
pub mod events;
pub mod items;
pub mod prediction;
pub mod prelude;
pub mod targeting;
pub mod types;

// Re-export core types for convenience
pub use damage::{DamageEngine, DamageLibrary, PassiveRegistry, PassiveRule};
pub use engine::TacticsEngine;
pub use entity::{Buff, GameContext, MinionCategory, Snapshot, TurretTier, Unit, UnitKind};
pub use events::{DashRecord, DashTracker, NewPathArgs, StealthEvent, StealthTracker, TurretTracker};
pub use prediction::{
    CastArgs, HealthPrediction, HealthPredictionMode, HitChance, MovementPredictor,
};
pub use targeting::{AggroTracker, RankContext, TargetSelector};
pub use types::{Clock, DamageStage, DamageType, ObjectId, SpellSlot, Team, UnitId, Vec2};
