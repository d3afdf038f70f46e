//! Time-bounded buff records carried by units

use crate::types::UnitId;
use serde::{Deserialize, Serialize};

/// An active buff or debuff on a unit.
///
/// `caster` is a back-reference by identity only; the caster may already be
/// gone from the snapshot, so consumers must re-validate before dereferencing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buff {
    /// Internal buff name, the lookup key used by the damage tables.
    pub name: String,
    /// Current stack count.
    pub count: u32,
    /// Unit that applied the buff, if known.
    pub caster: Option<UnitId>,
    /// Game time the buff started, in seconds.
    pub start_time: f64,
}

impl Buff {
    pub fn new(name: impl Into<String>) -> Self {
        Buff {
            name: name.into(),
            count: 1,
            caster: None,
            start_time: 0.0,
        }
    }

    pub fn with_count(name: impl Into<String>, count: u32) -> Self {
        Buff {
            count,
            ..Buff::new(name)
        }
    }
}
