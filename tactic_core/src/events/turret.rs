//! Turret attack tracking

use super::Observers;
use crate::entity::{Snapshot, Unit};
use crate::types::{Clock, ObjectId, UnitId, Vec2};
use std::collections::HashMap;

/// Attack-timing state of one tracked turret.
#[derive(Debug, Clone, Default)]
pub struct TurretAttack {
    pub turret: Option<UnitId>,
    pub target: Option<UnitId>,
    pub attack_start: i64,
    pub attack_delay: f64,
    pub attack_end: i64,
    /// The bolt emitter currently associated with the turret.
    pub bolt: Option<ObjectId>,
}

/// Tracks turret attack windows and their bolt objects.
#[derive(Debug, Default)]
pub struct TurretTracker {
    turrets: HashMap<UnitId, TurretAttack>,
    observers: Observers<TurretAttack>,
}

impl TurretTracker {
    pub fn new() -> Self {
        TurretTracker::default()
    }

    /// Seed tracking records for the turrets already present at load.
    pub fn seed(&mut self, snapshot: &Snapshot) {
        for turret in snapshot.turrets() {
            self.turrets.entry(turret.id).or_insert_with(|| TurretAttack {
                turret: Some(turret.id),
                ..TurretAttack::default()
            });
        }
    }

    pub fn on_turret_attack(&mut self, observer: impl FnMut(&TurretAttack) + 'static) {
        self.observers.subscribe(observer);
    }

    /// Do-cast notification entry point; non-turret senders are ignored.
    pub fn on_do_cast(&mut self, clock: Clock, snapshot: &Snapshot, sender: &Unit) {
        if !sender.kind.is_turret() {
            return;
        }

        let record = self.turrets.entry(sender.id).or_insert_with(|| TurretAttack {
            turret: Some(sender.id),
            ..TurretAttack::default()
        });

        record.attack_start = clock.now;
        record.target = sender.target;
        if let Some(target) = sender.target.and_then(|id| snapshot.unit(id)) {
            if target.is_valid() && sender.missile_speed > 0.0 {
                record.attack_delay = sender.attack_cast_delay * 1000.0
                    + sender.distance(target) / sender.missile_speed * 1000.0;
                record.attack_end = clock.now + record.attack_delay as i64;
            }
        }

        let snapshot_record = record.clone();
        self.observers.emit(&snapshot_record);
    }

    /// Object-creation notification entry point: a new emitter whose name
    /// matches the turret-bolt pattern is attached to the nearest valid
    /// tracked turret.
    pub fn on_object_created(
        &mut self,
        snapshot: &Snapshot,
        id: ObjectId,
        name: &str,
        position: Vec2,
    ) {
        if !name.contains("Turret") {
            return;
        }

        let nearest = self
            .turrets
            .iter_mut()
            .filter_map(|(turret_id, record)| {
                let turret = snapshot.unit(*turret_id)?;
                if !turret.is_valid() {
                    return None;
                }
                Some((turret.position.distance(position), record))
            })
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        if let Some((_, record)) = nearest {
            record.bolt = Some(id);
        }
    }

    pub fn attack_info(&self, turret: UnitId) -> Option<&TurretAttack> {
        self.turrets.get(&turret)
    }

    pub fn on_unit_removed(&mut self, unit: UnitId) {
        self.turrets.remove(&unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{TurretTier, UnitKind};
    use crate::types::Team;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn turret_at(id: u32, x: f64) -> Unit {
        let mut turret = Unit::new(UnitId(id), "turret", UnitKind::Turret(TurretTier::One), Team::Order);
        turret.position = Vec2::new(x, 0.0);
        turret.attack_cast_delay = 0.3;
        turret.missile_speed = 1200.0;
        turret
    }

    #[test]
    fn test_do_cast_updates_attack_window() {
        let mut snapshot = Snapshot::new();
        let mut turret = turret_at(1, 0.0);
        let mut target = Unit::new(
            UnitId(2),
            "lane_minion",
            UnitKind::Minion(crate::entity::MinionCategory::Melee),
            Team::Chaos,
        );
        target.position = Vec2::new(600.0, 0.0);
        turret.target = Some(UnitId(2));
        snapshot.insert(turret.clone());
        snapshot.insert(target);

        let mut tracker = TurretTracker::new();
        tracker.seed(&snapshot);
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        tracker.on_turret_attack(move |_| *counter.borrow_mut() += 1);

        tracker.on_do_cast(Clock::new(20_000, 0), &snapshot, &turret);

        let info = tracker.attack_info(UnitId(1)).unwrap();
        assert_eq!(info.attack_start, 20_000);
        // 300ms windup + 600/1200*1000 = 500ms travel.
        assert!((info.attack_delay - 800.0).abs() < f64::EPSILON);
        assert_eq!(info.attack_end, 20_800);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_lazy_record_for_unseeded_turret() {
        let mut snapshot = Snapshot::new();
        let turret = turret_at(7, 0.0);
        snapshot.insert(turret.clone());

        let mut tracker = TurretTracker::new();
        tracker.on_do_cast(Clock::new(1000, 0), &snapshot, &turret);
        assert!(tracker.attack_info(UnitId(7)).is_some());
    }

    #[test]
    fn test_bolt_attaches_to_nearest_valid_turret() {
        let mut snapshot = Snapshot::new();
        let near = turret_at(1, 100.0);
        let far = turret_at(2, 900.0);
        let mut dead = turret_at(3, 10.0);
        dead.is_alive = false;
        snapshot.insert(near);
        snapshot.insert(far);
        snapshot.insert(dead);

        let mut tracker = TurretTracker::new();
        tracker.seed(&snapshot);

        tracker.on_object_created(
            &snapshot,
            ObjectId(55),
            "TurretBasicAttack",
            Vec2::new(120.0, 0.0),
        );

        assert_eq!(tracker.attack_info(UnitId(1)).unwrap().bolt, Some(ObjectId(55)));
        assert_eq!(tracker.attack_info(UnitId(2)).unwrap().bolt, None);
        // The closer but invalid turret was skipped.
        assert_eq!(tracker.attack_info(UnitId(3)).unwrap().bolt, None);
    }

    #[test]
    fn test_non_bolt_objects_are_ignored() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(turret_at(1, 0.0));
        let mut tracker = TurretTracker::new();
        tracker.seed(&snapshot);

        tracker.on_object_created(&snapshot, ObjectId(9), "SomeParticle", Vec2::default());
        assert_eq!(tracker.attack_info(UnitId(1)).unwrap().bolt, None);
    }
}
