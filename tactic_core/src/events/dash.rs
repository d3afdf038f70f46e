//! Dash detection from path-change notifications

use super::Observers;
use crate::entity::Unit;
use crate::types::{Clock, UnitId, Vec2};
use std::collections::HashMap;

/// Path-change notification payload delivered by the snapshot store.
#[derive(Debug, Clone)]
pub struct NewPathArgs {
    pub path: Vec<Vec2>,
    pub is_dash: bool,
    pub speed: f64,
}

/// Live dash record of one unit. One record per unit; each new dash
/// overwrites the previous one.
#[derive(Debug, Clone, Default)]
pub struct DashRecord {
    pub unit: Option<UnitId>,
    pub path: Vec<Vec2>,
    pub speed: f64,
    pub start_pos: Vec2,
    pub end_pos: Vec2,
    pub start_tick: i64,
    /// Zero means "not dashing".
    pub end_tick: i64,
    pub duration: i64,
}

/// Watches path changes and keeps the per-unit dash table.
#[derive(Debug, Default)]
pub struct DashTracker {
    dashes: HashMap<UnitId, DashRecord>,
    observers: Observers<DashRecord>,
}

impl DashTracker {
    pub fn new() -> Self {
        DashTracker::default()
    }

    /// Register an observer for dash-started events.
    pub fn on_dash(&mut self, observer: impl FnMut(&DashRecord) + 'static) {
        self.observers.subscribe(observer);
    }

    /// Path-change notification entry point.
    pub fn on_new_path(&mut self, clock: Clock, unit: &Unit, args: &NewPathArgs) {
        if !unit.is_valid() {
            return;
        }

        let record = self.dashes.entry(unit.id).or_default();

        if args.is_dash {
            let mut path = Vec::with_capacity(args.path.len() + 1);
            path.push(unit.position);
            path.extend_from_slice(&args.path);

            let start_pos = unit.position;
            let end_pos = *path.last().unwrap_or(&start_pos);
            let start_tick = clock.now - clock.ping / 2;
            let travel_ms = if args.speed > 0.0 {
                (1000.0 * end_pos.distance(start_pos) / args.speed) as i64
            } else {
                0
            };

            record.unit = Some(unit.id);
            record.path = path;
            record.speed = args.speed;
            record.start_pos = start_pos;
            record.start_tick = start_tick;
            record.end_pos = end_pos;
            record.end_tick = start_tick + travel_ms;
            record.duration = record.end_tick - record.start_tick;

            let snapshot = record.clone();
            self.observers.emit(&snapshot);
        } else {
            record.end_tick = 0;
        }
    }

    /// Dash info of a unit; a default record when none was observed.
    pub fn dash_info(&self, unit: UnitId) -> DashRecord {
        self.dashes.get(&unit).cloned().unwrap_or_default()
    }

    /// True iff the unit has a live dash record, a non-empty path and an
    /// end tick that was not reset.
    pub fn is_dashing(&self, unit: &Unit) -> bool {
        match self.dashes.get(&unit.id) {
            Some(record) if !unit.path.is_empty() => record.end_tick != 0,
            _ => false,
        }
    }

    /// Drop the record of a removed unit.
    pub fn on_unit_removed(&mut self, unit: UnitId) {
        self.dashes.remove(&unit);
    }
}
