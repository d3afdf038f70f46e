//! Aggro tracking for target ranking

use crate::entity::{GameContext, Unit};
use crate::types::UnitId;
use std::collections::HashMap;

/// Latest observed aggro of one enemy hero.
#[derive(Debug, Clone, Copy)]
pub struct AggroEntry {
    pub sender: UnitId,
    pub target: UnitId,
    /// Tick the aggro was last refreshed.
    pub tick: i64,
}

/// Per-enemy-hero aggro entries, refreshed on aggro notifications.
#[derive(Debug, Default)]
pub struct AggroTracker {
    entries: HashMap<UnitId, AggroEntry>,
}

impl AggroTracker {
    pub fn new() -> Self {
        AggroTracker::default()
    }

    /// Aggro notification entry point: only enemy heroes aggroing heroes we
    /// can resolve are recorded.
    pub fn on_aggro(&mut self, ctx: &GameContext, sender: &Unit, target: UnitId) {
        let player_team = match ctx.snapshot.player_team() {
            Some(team) => team,
            None => return,
        };
        if !sender.kind.is_hero() || !sender.team.is_enemy_of(player_team) {
            return;
        }
        let target_unit = match ctx.snapshot.unit(target) {
            Some(unit) if unit.kind.is_hero() => unit,
            _ => return,
        };

        self.entries.insert(
            sender.id,
            AggroEntry {
                sender: sender.id,
                target: target_unit.id,
                tick: ctx.clock.now,
            },
        );
    }

    /// The latest aggro entry of a sender, liveness re-validated by the
    /// caller when dereferencing the ids.
    pub fn entry_for(&self, sender: UnitId) -> Option<&AggroEntry> {
        self.entries.get(&sender)
    }

    /// All entries currently aimed at `target`.
    pub fn entries_targeting(&self, target: UnitId) -> impl Iterator<Item = &AggroEntry> {
        self.entries.values().filter(move |e| e.target == target)
    }

    pub fn on_unit_removed(&mut self, unit: UnitId) {
        self.entries.remove(&unit);
        self.entries.retain(|_, e| e.target != unit);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
