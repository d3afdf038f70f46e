//! Health prediction from in-flight basic-attack commitments

use crate::damage::DamageEngine;
use crate::entity::{GameContext, Unit, UnitKind};
use crate::types::{Clock, UnitId};
use std::collections::HashMap;

/// Staleness window after which a commitment stops mattering.
const STALE_AFTER_MS: i64 = 3000;
/// Minimum interval between staleness sweeps.
const SWEEP_INTERVAL_MS: i64 = 1000;
/// Maximum distance from the player at which attacks are tracked.
const TRACK_RANGE: f64 = 2000.0;
/// Assumed extra latency on top of a predicted landing, in milliseconds.
pub const DEFAULT_PREDICTION_DELAY: i64 = 70;

/// Prediction flavor: deterministic landing check or windup simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthPredictionMode {
    Default,
    Simulated,
}

/// Do-cast notification payload.
#[derive(Debug, Clone)]
pub struct CastArgs<'a> {
    pub target: Option<UnitId>,
    pub name: &'a str,
    pub missile_speed: f64,
}

/// A recorded, not-yet-resolved basic attack. At most one per source.
#[derive(Debug, Clone)]
pub struct Commitment {
    pub source: UnitId,
    pub source_kind: UnitKind,
    pub target: UnitId,
    pub start_tick: i64,
    /// Windup before impact, in milliseconds.
    pub delay: f64,
    /// Full attack cycle time, in milliseconds.
    pub animation_time: f64,
    /// Missile speed; infinite for melee attacks.
    pub projectile_speed: f64,
    pub damage: f64,
    pub processed: bool,
}

/// Tracks basic-attack commitments and projects future health.
#[derive(Debug, Default)]
pub struct HealthPrediction {
    commitments: HashMap<UnitId, Commitment>,
    last_sweep: i64,
}

impl HealthPrediction {
    pub fn new() -> Self {
        HealthPrediction::default()
    }

    /// Do-cast notification: records a commitment for basic attacks of
    /// allied or neutral minions and turrets against minions.
    pub fn on_do_cast(
        &mut self,
        ctx: &GameContext,
        engine: &DamageEngine,
        sender: &Unit,
        args: &CastArgs,
    ) {
        if !sender.is_valid() || !crate::auto_attack::is_auto_attack(args.name) {
            return;
        }
        let player = match ctx.snapshot.player() {
            Some(player) => player,
            None => return,
        };
        if player.distance_squared(sender) >= TRACK_RANGE * TRACK_RANGE {
            return;
        }
        let allied_or_neutral =
            sender.team == player.team || sender.team == crate::types::Team::Neutral;
        if !allied_or_neutral || !(sender.kind.is_minion() || sender.kind.is_turret()) {
            return;
        }
        let target = match args.target.and_then(|id| ctx.snapshot.unit(id)) {
            Some(target) if target.kind.is_minion() => target,
            _ => return,
        };

        let commitment = Commitment {
            source: sender.id,
            source_kind: sender.kind,
            target: target.id,
            start_tick: ctx.clock.now - ctx.clock.ping / 2,
            delay: sender.attack_cast_delay * 1000.0,
            animation_time: sender.attack_delay * 1000.0
                - if sender.kind.is_turret() { 70.0 } else { 0.0 },
            projectile_speed: if sender.is_melee {
                f64::INFINITY
            } else {
                args.missile_speed
            },
            damage: engine.auto_attack_damage(ctx, sender, target),
            processed: false,
        };

        // A new basic attack replaces the previous commitment of the source.
        self.commitments.insert(sender.id, commitment);
    }

    /// Process-spell-cast confirmation: a melee source's attack has landed.
    pub fn on_process_spell_cast(&mut self, sender: &Unit) {
        if sender.is_valid() && sender.is_melee {
            if let Some(commitment) = self.commitments.get_mut(&sender.id) {
                commitment.processed = true;
            }
        }
    }

    /// Stop-cast notification: a destroyed windup removes the commitment.
    pub fn on_stop_cast(&mut self, sender: UnitId, keep_animation: bool, destroy_missile: bool) {
        if keep_animation && destroy_missile {
            self.commitments.remove(&sender);
        }
    }

    /// A basic-attack missile was destroyed: the attack was delivered.
    pub fn on_missile_destroyed(&mut self, caster: UnitId) {
        if let Some(commitment) = self.commitments.get_mut(&caster) {
            commitment.processed = true;
        }
    }

    /// Snapshot removal notification: drop everything involving the unit.
    pub fn on_unit_removed(&mut self, unit: UnitId) {
        if self.commitments.remove(&unit).is_some() {
            return;
        }
        self.commitments.retain(|_, c| c.target != unit);
    }

    /// Per-tick sweep, throttled to once per second: purges stale
    /// commitments. Throttling bounds per-tick cost, not correctness.
    pub fn on_update(&mut self, clock: Clock) {
        if clock.now - self.last_sweep <= SWEEP_INTERVAL_MS {
            return;
        }
        self.commitments
            .retain(|_, c| c.start_tick >= clock.now - STALE_AFTER_MS);
        self.last_sweep = clock.now;
    }

    /// Predicted health of `unit` at `now + time` milliseconds.
    pub fn prediction(
        &self,
        ctx: &GameContext,
        unit: &Unit,
        time: i64,
        delay: i64,
        mode: HealthPredictionMode,
    ) -> f64 {
        match mode {
            HealthPredictionMode::Simulated => self.prediction_simulated(ctx, unit, time),
            HealthPredictionMode::Default => self.prediction_default(ctx, unit, time, delay),
        }
    }

    fn travel_time_ms(source: &Unit, unit: &Unit, projectile_speed: f64) -> f64 {
        if projectile_speed.is_infinite() {
            0.0
        } else {
            1000.0 * (unit.distance(source) - source.bounding_radius).max(0.0) / projectile_speed
        }
    }

    fn prediction_default(&self, ctx: &GameContext, unit: &Unit, time: i64, delay: i64) -> f64 {
        let mut predicted_damage = 0.0;
        for commitment in self
            .commitments
            .values()
            .filter(|c| c.target == unit.id && !c.processed)
        {
            let source = match ctx.valid_unit(commitment.source) {
                Some(source) => source,
                None => continue,
            };
            if !unit.is_valid() {
                continue;
            }

            let land_time = commitment.start_tick as f64
                + commitment.delay
                + Self::travel_time_ms(source, unit, commitment.projectile_speed)
                + delay as f64;
            if land_time < (ctx.clock.now + time) as f64 {
                predicted_damage += commitment.damage;
            }
        }

        unit.health - predicted_damage
    }

    fn prediction_simulated(&self, ctx: &GameContext, unit: &Unit, time: i64) -> f64 {
        let mut predicted_damage = 0.0;
        for commitment in self.commitments.values().filter(|c| c.target == unit.id) {
            let source = match ctx.valid_unit(commitment.source) {
                Some(source) => source,
                None => continue,
            };
            if !unit.is_valid() || commitment.animation_time <= 0.0 {
                continue;
            }
            // Sources that stopped attacking a while ago no longer repeat.
            if (ctx.clock.now - 100) as f64 > commitment.start_tick as f64 + commitment.animation_time
            {
                continue;
            }

            let travel = Self::travel_time_ms(source, unit, commitment.projectile_speed);
            let to_tick = (ctx.clock.now + time) as f64;
            let mut landings = 0u32;
            let mut from_tick = commitment.start_tick as f64;
            while from_tick < to_tick {
                if from_tick >= ctx.clock.now as f64
                    && from_tick + commitment.delay + travel < to_tick
                {
                    landings += 1;
                }
                from_tick += commitment.animation_time;
            }

            predicted_damage += landings as f64 * commitment.damage;
        }

        unit.health - predicted_damage
    }

    /// True when a minion-sourced commitment targets the minion.
    pub fn has_minion_aggro(&self, minion: &Unit) -> bool {
        self.commitments
            .values()
            .any(|c| c.source_kind.is_minion() && c.target == minion.id)
    }

    /// True when a turret-sourced commitment targets the minion.
    pub fn has_turret_aggro(&self, minion: &Unit) -> bool {
        self.commitments
            .values()
            .any(|c| c.source_kind.is_turret() && c.target == minion.id)
    }

    /// The turret currently committed onto the minion, if any.
    pub fn aggro_turret(&self, minion: &Unit) -> Option<UnitId> {
        self.commitments
            .values()
            .find(|c| c.source_kind.is_turret() && c.target == minion.id)
            .map(|c| c.source)
    }

    /// Start tick of the turret commitment onto the minion, or 0.
    pub fn turret_aggro_start_tick(&self, minion: &Unit) -> i64 {
        self.commitments
            .values()
            .find(|c| c.source_kind.is_turret() && c.target == minion.id)
            .map(|c| c.start_tick)
            .unwrap_or(0)
    }

    pub fn commitment_for(&self, source: UnitId) -> Option<&Commitment> {
        self.commitments.get(&source)
    }

    pub fn commitment_count(&self) -> usize {
        self.commitments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{MinionCategory, Snapshot, TurretTier};
    use crate::types::{Team, Vec2};

    fn engine() -> DamageEngine {
        DamageEngine::new("9.7", &[])
    }

    fn base_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        let player = Unit::new(UnitId(1), "Ashe", UnitKind::Hero, Team::Order);
        snapshot.insert(player);
        snapshot.set_player(UnitId(1));

        let mut attacker = Unit::new(
            UnitId(10),
            "lane_minion",
            UnitKind::Minion(MinionCategory::Ranged),
            Team::Order,
        );
        attacker.base_attack_damage = 20.0;
        attacker.position = Vec2::new(100.0, 0.0);
        attacker.attack_cast_delay = 0.25;
        attacker.attack_delay = 1.0;
        snapshot.insert(attacker);

        let mut victim = Unit::new(
            UnitId(20),
            "lane_minion",
            UnitKind::Minion(MinionCategory::Melee),
            Team::Chaos,
        );
        victim.health = 100.0;
        victim.max_health = 100.0;
        victim.position = Vec2::new(200.0, 0.0);
        snapshot.insert(victim);
        snapshot
    }

    fn cast_args(target: u32) -> CastArgs<'static> {
        CastArgs {
            target: Some(UnitId(target)),
            name: "BasicAttack",
            missile_speed: 1000.0,
        }
    }

    fn commit(
        prediction: &mut HealthPrediction,
        snapshot: &Snapshot,
        engine: &DamageEngine,
        now: i64,
    ) {
        let ctx = GameContext::new(snapshot, Clock::new(now, 0));
        let attacker = snapshot.unit(UnitId(10)).unwrap().clone();
        prediction.on_do_cast(&ctx, engine, &attacker, &cast_args(20));
    }

    #[test]
    fn test_commitment_created_and_replaced() {
        let engine = engine();
        let snapshot = base_snapshot();
        let mut prediction = HealthPrediction::new();

        commit(&mut prediction, &snapshot, &engine, 1000);
        assert_eq!(prediction.commitment_count(), 1);
        let first_tick = prediction.commitment_for(UnitId(10)).unwrap().start_tick;

        commit(&mut prediction, &snapshot, &engine, 1600);
        assert_eq!(prediction.commitment_count(), 1);
        let second_tick = prediction.commitment_for(UnitId(10)).unwrap().start_tick;
        assert!(second_tick > first_tick);
    }

    #[test]
    fn test_non_attack_and_enemy_sources_are_ignored() {
        let engine = engine();
        let mut snapshot = base_snapshot();
        let mut prediction = HealthPrediction::new();

        let ctx = GameContext::new(&snapshot, Clock::new(1000, 0));
        let attacker = snapshot.unit(UnitId(10)).unwrap().clone();
        prediction.on_do_cast(
            &ctx,
            &engine,
            &attacker,
            &CastArgs {
                target: Some(UnitId(20)),
                name: "Fireball",
                missile_speed: 1000.0,
            },
        );
        assert_eq!(prediction.commitment_count(), 0);

        // An enemy minion's attack is not tracked.
        snapshot.unit_mut(UnitId(10)).unwrap().team = Team::Chaos;
        let enemy = snapshot.unit(UnitId(10)).unwrap().clone();
        let ctx = GameContext::new(&snapshot, Clock::new(1000, 0));
        prediction.on_do_cast(&ctx, &engine, &enemy, &cast_args(20));
        assert_eq!(prediction.commitment_count(), 0);
    }

    #[test]
    fn test_default_prediction_subtracts_landing_attacks() {
        let engine = engine();
        let snapshot = base_snapshot();
        let mut prediction = HealthPrediction::new();
        commit(&mut prediction, &snapshot, &engine, 1000);

        let victim = snapshot.unit(UnitId(20)).unwrap();
        // Landing: 1000 + 250 windup + 100 travel - bounding radius effects
        // + 70 delay, well within a 1s horizon.
        let ctx = GameContext::new(&snapshot, Clock::new(1000, 0));
        let predicted = prediction.prediction(
            &ctx,
            victim,
            1000,
            DEFAULT_PREDICTION_DELAY,
            HealthPredictionMode::Default,
        );
        assert_eq!(predicted, 100.0 - 20.0);

        // Too short a horizon: the attack has not landed yet.
        let predicted = prediction.prediction(
            &ctx,
            victim,
            100,
            DEFAULT_PREDICTION_DELAY,
            HealthPredictionMode::Default,
        );
        assert_eq!(predicted, 100.0);
    }

    #[test]
    fn test_processed_commitment_is_excluded() {
        let engine = engine();
        let snapshot = base_snapshot();
        let mut prediction = HealthPrediction::new();
        commit(&mut prediction, &snapshot, &engine, 1000);

        prediction.on_missile_destroyed(UnitId(10));
        let victim = snapshot.unit(UnitId(20)).unwrap();
        let ctx = GameContext::new(&snapshot, Clock::new(1000, 0));
        let predicted = prediction.prediction(
            &ctx,
            victim,
            1000,
            DEFAULT_PREDICTION_DELAY,
            HealthPredictionMode::Default,
        );
        assert_eq!(predicted, 100.0);
    }

    #[test]
    fn test_stale_commitments_purged_by_throttled_sweep() {
        let engine = engine();
        let snapshot = base_snapshot();
        let mut prediction = HealthPrediction::new();
        commit(&mut prediction, &snapshot, &engine, 1000);

        // Within the throttle window nothing happens.
        prediction.on_update(Clock::new(1500, 0));
        assert_eq!(prediction.commitment_count(), 1);

        // Past the staleness window the commitment goes away.
        prediction.on_update(Clock::new(4500, 0));
        assert_eq!(prediction.commitment_count(), 0);
    }

    #[test]
    fn test_unit_removal_purges_both_sides() {
        let engine = engine();
        let snapshot = base_snapshot();

        let mut prediction = HealthPrediction::new();
        commit(&mut prediction, &snapshot, &engine, 1000);
        prediction.on_unit_removed(UnitId(10));
        assert_eq!(prediction.commitment_count(), 0);

        commit(&mut prediction, &snapshot, &engine, 1000);
        prediction.on_unit_removed(UnitId(20));
        assert_eq!(prediction.commitment_count(), 0);
    }

    #[test]
    fn test_simulated_prediction_counts_repeat_attacks() {
        let engine = engine();
        let snapshot = base_snapshot();
        let mut prediction = HealthPrediction::new();
        commit(&mut prediction, &snapshot, &engine, 1000);

        let victim = snapshot.unit(UnitId(20)).unwrap();
        let ctx = GameContext::new(&snapshot, Clock::new(1000, 0));
        // Three-second horizon at a 1s attack cycle: three windows land.
        let predicted =
            prediction.prediction(&ctx, victim, 3000, 0, HealthPredictionMode::Simulated);
        assert_eq!(predicted, 100.0 - 3.0 * 20.0);
    }

    #[test]
    fn test_turret_aggro_queries() {
        let engine = engine();
        let mut snapshot = base_snapshot();
        let mut turret = Unit::new(
            UnitId(30),
            "turret",
            UnitKind::Turret(TurretTier::One),
            Team::Order,
        );
        turret.position = Vec2::new(300.0, 0.0);
        turret.attack_cast_delay = 0.3;
        turret.attack_delay = 1.2;
        snapshot.insert(turret.clone());

        let mut prediction = HealthPrediction::new();
        let ctx = GameContext::new(&snapshot, Clock::new(1000, 0));
        prediction.on_do_cast(&ctx, &engine, &turret, &cast_args(20));

        let victim = snapshot.unit(UnitId(20)).unwrap();
        assert!(prediction.has_turret_aggro(victim));
        assert!(!prediction.has_minion_aggro(victim));
        assert_eq!(prediction.aggro_turret(victim), Some(UnitId(30)));
        assert_eq!(prediction.turret_aggro_start_tick(victim), 1000);

        // The turret animation is shortened by the fixed bolt lead time.
        let commitment = prediction.commitment_for(UnitId(30)).unwrap();
        assert!((commitment.animation_time - (1200.0 - 70.0)).abs() < f64::EPSILON);
    }
}
