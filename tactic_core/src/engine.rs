//! Engine facade: one instance owning every decision subsystem
//!
//! The embedding client forwards snapshot notifications into the entry
//! points below and reads decisions back out; all state lives in the
//! component structs, none of it global.

use crate::damage::DamageEngine;
use crate::entity::{GameContext, Snapshot, Unit};
use crate::events::{DashRecord, DashTracker, NewPathArgs, StealthTracker, TurretTracker};
use crate::prediction::{CastArgs, HealthPrediction, HealthPredictionMode};
use crate::targeting::{AggroTracker, RankContext, TargetSelector};
use crate::types::{Clock, DamageType, ObjectId, UnitId, Vec2};

/// The assembled decision-support engine.
#[derive(Debug)]
pub struct TacticsEngine {
    damage: DamageEngine,
    health: HealthPrediction,
    dashes: DashTracker,
    stealth: StealthTracker,
    turrets: TurretTracker,
    aggro: AggroTracker,
    selector: TargetSelector,
}

impl TacticsEngine {
    /// Build the engine for a game version against the current snapshot:
    /// loads the damage database for the present roster and seeds the
    /// turret tracker.
    pub fn new(game_version: &str, snapshot: &Snapshot) -> Self {
        let roster = snapshot.hero_roster();
        let mut turrets = TurretTracker::new();
        turrets.seed(snapshot);

        TacticsEngine {
            damage: DamageEngine::new(game_version, &roster),
            health: HealthPrediction::new(),
            dashes: DashTracker::new(),
            stealth: StealthTracker::new(),
            turrets,
            aggro: AggroTracker::new(),
            selector: TargetSelector::new(),
        }
    }

    pub fn damage(&self) -> &DamageEngine {
        &self.damage
    }

    pub fn damage_mut(&mut self) -> &mut DamageEngine {
        &mut self.damage
    }

    pub fn health(&self) -> &HealthPrediction {
        &self.health
    }

    pub fn dashes(&self) -> &DashTracker {
        &self.dashes
    }

    pub fn dashes_mut(&mut self) -> &mut DashTracker {
        &mut self.dashes
    }

    pub fn stealth_mut(&mut self) -> &mut StealthTracker {
        &mut self.stealth
    }

    pub fn turrets(&self) -> &TurretTracker {
        &self.turrets
    }

    pub fn turrets_mut(&mut self) -> &mut TurretTracker {
        &mut self.turrets
    }

    pub fn aggro(&self) -> &AggroTracker {
        &self.aggro
    }

    pub fn selector(&mut self) -> &mut TargetSelector {
        &mut self.selector
    }

    /// Per-tick pulse: runs the throttled maintenance sweeps.
    pub fn on_update(&mut self, clock: Clock) {
        self.health.on_update(clock);
    }

    /// Path-change notification of one unit.
    pub fn on_new_path(&mut self, clock: Clock, unit: &Unit, args: &NewPathArgs) {
        self.dashes.on_new_path(clock, unit, args);
    }

    /// Integer-property-change notification of one unit.
    pub fn on_integer_property_change(
        &mut self,
        clock: Clock,
        unit: &Unit,
        property: &str,
        old_value: u64,
        new_value: u64,
    ) {
        self.stealth
            .on_integer_property_change(clock, unit, property, old_value, new_value);
    }

    /// Do-cast notification of one unit.
    pub fn on_do_cast(&mut self, snapshot: &Snapshot, clock: Clock, sender: UnitId, args: &CastArgs) {
        let sender = match snapshot.unit(sender) {
            Some(sender) => sender,
            None => return,
        };
        let ctx = GameContext::new(snapshot, clock);
        self.health.on_do_cast(&ctx, &self.damage, sender, args);
        self.turrets.on_do_cast(clock, snapshot, sender);
    }

    /// Process-spell-cast notification (melee attack confirmation).
    pub fn on_process_spell_cast(&mut self, snapshot: &Snapshot, sender: UnitId) {
        if let Some(sender) = snapshot.unit(sender) {
            self.health.on_process_spell_cast(sender);
        }
    }

    /// Stop-cast notification of one unit.
    pub fn on_stop_cast(&mut self, sender: UnitId, keep_animation: bool, destroy_missile: bool) {
        self.health.on_stop_cast(sender, keep_animation, destroy_missile);
    }

    /// Aggro notification of one unit.
    pub fn on_aggro(&mut self, snapshot: &Snapshot, clock: Clock, sender: UnitId, target: UnitId) {
        if let Some(sender) = snapshot.unit(sender) {
            let ctx = GameContext::new(snapshot, clock);
            self.aggro.on_aggro(&ctx, sender, target);
        }
    }

    /// Non-unit object creation (missiles, emitters).
    pub fn on_object_created(
        &mut self,
        snapshot: &Snapshot,
        id: ObjectId,
        name: &str,
        position: Vec2,
    ) {
        self.turrets.on_object_created(snapshot, id, name, position);
    }

    /// A basic-attack missile was destroyed before this tick.
    pub fn on_missile_destroyed(&mut self, caster: UnitId) {
        self.health.on_missile_destroyed(caster);
    }

    /// Snapshot removal notification: every component drops its handles.
    pub fn on_unit_removed(&mut self, unit: UnitId) {
        self.health.on_unit_removed(unit);
        self.dashes.on_unit_removed(unit);
        self.turrets.on_unit_removed(unit);
        self.aggro.on_unit_removed(unit);
        if self.selector.selected_target() == Some(unit) {
            self.selector.set_target(None);
        }
    }

    /// True when the unit is currently mid-dash.
    pub fn is_dashing(&self, unit: &Unit) -> bool {
        self.dashes.is_dashing(unit)
    }

    /// Dash info of a unit, a default record when none was observed.
    pub fn dash_info(&self, unit: UnitId) -> DashRecord {
        self.dashes.dash_info(unit)
    }

    /// Predicted health of a unit `time` milliseconds ahead.
    pub fn predicted_health(
        &self,
        snapshot: &Snapshot,
        clock: Clock,
        unit: UnitId,
        time: i64,
        delay: i64,
        mode: HealthPredictionMode,
    ) -> Option<f64> {
        let unit = snapshot.unit(unit)?;
        let ctx = GameContext::new(snapshot, clock);
        Some(self.health.prediction(&ctx, unit, time, delay, mode))
    }

    /// Ordered candidate targets under the active ranking mode.
    pub fn targets(
        &mut self,
        snapshot: &Snapshot,
        clock: Clock,
        range: f64,
        damage_type: DamageType,
        ignore_shields: bool,
        from: Option<Vec2>,
        exclude: &[UnitId],
    ) -> Vec<UnitId> {
        let ctx = GameContext::new(snapshot, clock);
        let rank = RankContext::with_aggro(&ctx, &self.aggro);
        self.selector
            .targets(&rank, range, damage_type, ignore_shields, from, exclude)
    }

    /// Best target, or none.
    pub fn target(
        &mut self,
        snapshot: &Snapshot,
        clock: Clock,
        range: f64,
        damage_type: DamageType,
        ignore_shields: bool,
        from: Option<Vec2>,
        exclude: &[UnitId],
    ) -> Option<UnitId> {
        self.targets(snapshot, clock, range, damage_type, ignore_shields, from, exclude)
            .into_iter()
            .next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{MinionCategory, UnitKind};
    use crate::types::Team;

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        let player = Unit::new(UnitId(1), "Ashe", UnitKind::Hero, Team::Order);
        snapshot.insert(player);
        snapshot.set_player(UnitId(1));

        let mut enemy = Unit::new(UnitId(2), "Annie", UnitKind::Hero, Team::Chaos);
        enemy.position = Vec2::new(400.0, 0.0);
        snapshot.insert(enemy);

        let mut attacker = Unit::new(
            UnitId(10),
            "lane_minion",
            UnitKind::Minion(MinionCategory::Ranged),
            Team::Order,
        );
        attacker.base_attack_damage = 20.0;
        snapshot.insert(attacker);

        let mut victim = Unit::new(
            UnitId(20),
            "lane_minion",
            UnitKind::Minion(MinionCategory::Melee),
            Team::Chaos,
        );
        victim.health = 50.0;
        victim.position = Vec2::new(150.0, 0.0);
        snapshot.insert(victim);
        snapshot
    }

    #[test]
    fn test_do_cast_feeds_health_prediction() {
        let snapshot = snapshot();
        let mut engine = TacticsEngine::new("9.7", &snapshot);
        let clock = Clock::new(1000, 0);

        engine.on_do_cast(
            &snapshot,
            clock,
            UnitId(10),
            &CastArgs {
                target: Some(UnitId(20)),
                name: "BasicAttack",
                missile_speed: 1000.0,
            },
        );

        let predicted = engine
            .predicted_health(
                &snapshot,
                clock,
                UnitId(20),
                2000,
                crate::prediction::DEFAULT_PREDICTION_DELAY,
                HealthPredictionMode::Default,
            )
            .unwrap();
        assert_eq!(predicted, 30.0);

        // Removal of the attacker clears the commitment.
        engine.on_unit_removed(UnitId(10));
        let predicted = engine
            .predicted_health(
                &snapshot,
                clock,
                UnitId(20),
                2000,
                crate::prediction::DEFAULT_PREDICTION_DELAY,
                HealthPredictionMode::Default,
            )
            .unwrap();
        assert_eq!(predicted, 50.0);
    }

    #[test]
    fn test_targets_through_facade() {
        let snapshot = snapshot();
        let mut engine = TacticsEngine::new("9.7", &snapshot);
        let clock = Clock::new(1000, 0);

        let targets = engine.targets(
            &snapshot,
            clock,
            2000.0,
            DamageType::Physical,
            true,
            None,
            &[],
        );
        assert_eq!(targets, vec![UnitId(2)]);
    }

    #[test]
    fn test_removed_selected_target_is_cleared() {
        let snapshot = snapshot();
        let mut engine = TacticsEngine::new("9.7", &snapshot);
        engine.selector().set_target(Some(UnitId(2)));
        engine.on_unit_removed(UnitId(2));
        assert_eq!(engine.selector().selected_target(), None);
    }
}
