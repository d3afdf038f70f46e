//! Entity model: units, buffs, kinds and the snapshot store view

mod buff;
mod kind;
mod snapshot;
mod unit;

pub use buff::Buff;
pub use kind::{MinionCategory, TurretTier, UnitKind};
pub use snapshot::{GameContext, Snapshot};
pub use unit::Unit;
