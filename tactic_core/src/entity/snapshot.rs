//! Snapshot - the narrow view over the external entity store
//!
//! The embedding client owns entity lifetimes; it mirrors them into this
//! store and forwards removal notifications to the engine so that
//! component-owned maps can drop their handles.

use super::kind::UnitKind;
use super::unit::Unit;
use crate::types::{Clock, Team, UnitId};
use std::collections::BTreeMap;

/// Categorized store of the currently live units. Keyed by unit id in a
/// B-tree so that iteration order is deterministic across ticks.
#[derive(Debug, Default)]
pub struct Snapshot {
    units: BTreeMap<UnitId, Unit>,
    player: Option<UnitId>,
}

impl Snapshot {
    pub fn new() -> Self {
        Snapshot::default()
    }

    /// Insert or replace a unit.
    pub fn insert(&mut self, unit: Unit) {
        self.units.insert(unit.id, unit);
    }

    /// Remove a unit, returning it if it was present. The caller is expected
    /// to forward the removal to the engine components that track handles.
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }

    pub fn set_player(&mut self, id: UnitId) {
        self.player = Some(id);
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn player(&self) -> Option<&Unit> {
        self.player.and_then(|id| self.units.get(&id))
    }

    pub fn player_team(&self) -> Option<Team> {
        self.player().map(|p| p.team)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn by_kind(&self, kind: UnitKind) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| u.kind == kind)
    }

    pub fn heroes(&self) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(|u| u.kind.is_hero())
    }

    pub fn turrets(&self) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(|u| u.kind.is_turret())
    }

    /// Heroes hostile to the acting player.
    pub fn enemy_heroes(&self) -> impl Iterator<Item = &Unit> + '_ {
        let team = self.player_team();
        self.heroes()
            .filter(move |h| team.map(|t| h.team.is_enemy_of(t)).unwrap_or(false))
    }

    /// Heroes on the acting player's team, the player included.
    pub fn ally_heroes(&self) -> impl Iterator<Item = &Unit> + '_ {
        let team = self.player_team();
        self.heroes()
            .filter(move |h| team.map(|t| h.team == t).unwrap_or(false))
    }

    /// Distinct archetype names of all heroes in play, the roster the
    /// data-driven tables are loaded for.
    pub fn hero_roster(&self) -> Vec<String> {
        let mut names: Vec<String> = self.heroes().map(|h| h.name.clone()).collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Per-query context: the snapshot plus the tick clock, passed by reference
/// into every engine read.
#[derive(Debug, Clone, Copy)]
pub struct GameContext<'a> {
    pub snapshot: &'a Snapshot,
    pub clock: Clock,
}

impl<'a> GameContext<'a> {
    pub fn new(snapshot: &'a Snapshot, clock: Clock) -> Self {
        GameContext { snapshot, clock }
    }

    /// Look up a unit and require it to still be valid.
    pub fn valid_unit(&self, id: UnitId) -> Option<&'a Unit> {
        self.snapshot.unit(id).filter(|u| u.is_valid())
    }
}
