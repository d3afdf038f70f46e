//! Stealth detection from action-state property changes

use super::Observers;
use crate::entity::Unit;
use crate::types::{Clock, UnitId};

/// Stealth bit of the "ActionState" bitfield.
pub const STEALTHED: u64 = 1 << 10;

/// A stealth transition of a hero.
#[derive(Debug, Clone)]
pub struct StealthEvent {
    pub unit: UnitId,
    /// Game time of the transition, in seconds.
    pub time: f64,
    /// True on entering stealth, false on leaving it.
    pub entered: bool,
}

/// Watches integer-property changes for stealth edges.
#[derive(Debug, Default)]
pub struct StealthTracker {
    observers: Observers<StealthEvent>,
}

impl StealthTracker {
    pub fn new() -> Self {
        StealthTracker::default()
    }

    pub fn on_stealth(&mut self, observer: impl FnMut(&StealthEvent) + 'static) {
        self.observers.subscribe(observer);
    }

    /// Integer-property-change notification entry point. Only the
    /// "ActionState" property of heroes is of interest; every other change
    /// produces no event.
    pub fn on_integer_property_change(
        &mut self,
        clock: Clock,
        unit: &Unit,
        property: &str,
        old_value: u64,
        new_value: u64,
    ) {
        if !unit.kind.is_hero() || property != "ActionState" {
            return;
        }

        let was_stealthed = old_value & STEALTHED != 0;
        let is_stealthed = new_value & STEALTHED != 0;

        if !was_stealthed && is_stealthed {
            self.observers.emit(&StealthEvent {
                unit: unit.id,
                time: clock.game_time(),
                entered: true,
            });
        } else if was_stealthed && !is_stealthed {
            self.observers.emit(&StealthEvent {
                unit: unit.id,
                time: clock.game_time(),
                entered: false,
            });
        }
    }
}
