//! Prelude module for convenient imports
//!
//! ```rust
//! use tactic_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Clock, DamageStage, DamageType, ObjectId, SpellSlot, Team, UnitId, Vec2};

// Entity model
pub use crate::entity::{Buff, GameContext, MinionCategory, Snapshot, TurretTier, Unit, UnitKind};

// Damage system
pub use crate::damage::{DamageEngine, DamageLibrary, PassiveRegistry, PassiveRule};

// Prediction
pub use crate::prediction::{CastArgs, HealthPrediction, HealthPredictionMode, HitChance};

// Events
pub use crate::events::{DashRecord, DashTracker, NewPathArgs, StealthTracker, TurretTracker};

// Targeting
pub use crate::targeting::modes::{ClosestMode, PriorityMode, RankingMode, WeightedMode};
pub use crate::targeting::{AggroTracker, RankContext, TargetSelector};

// Engine facade
pub use crate::engine::TacticsEngine;
