//! End-to-end scenarios across the assembled engine

use proptest::prelude::*;
use tactic_core::prediction::DEFAULT_PREDICTION_DELAY;
use tactic_core::targeting::modes::{ClosestMode, PriorityMode};
use tactic_core::{
    Buff, CastArgs, Clock, DamageStage, DamageType, GameContext, HealthPredictionMode,
    MinionCategory, Snapshot, SpellSlot, TacticsEngine, Team, TurretTier, Unit, UnitId, UnitKind,
    Vec2,
};

fn hero(id: u32, name: &str, team: Team) -> Unit {
    Unit::new(UnitId(id), name, UnitKind::Hero, team)
}

fn base_snapshot() -> Snapshot {
    let mut snapshot = Snapshot::new();
    let mut player = hero(1, "Ashe", Team::Order);
    player.base_attack_damage = 100.0;
    snapshot.insert(player);
    snapshot.set_player(UnitId(1));
    snapshot
}

#[test]
fn hundred_ad_vs_zero_armor_resolves_to_exactly_hundred() {
    let snapshot = base_snapshot();
    let engine = TacticsEngine::new("9.7", &snapshot);
    let ctx = GameContext::new(&snapshot, Clock::default());

    let source = snapshot.unit(UnitId(1)).unwrap();
    let target = hero(2, "Annie", Team::Chaos);
    assert_eq!(engine.damage().auto_attack_damage(&ctx, source, &target), 100.0);
}

#[test]
fn tier_one_turret_kills_forty_five_percent_of_a_melee_minion() {
    let snapshot = base_snapshot();
    let engine = TacticsEngine::new("9.7", &snapshot);
    let ctx = GameContext::new(&snapshot, Clock::default());

    let turret = Unit::new(UnitId(5), "turret", UnitKind::Turret(TurretTier::One), Team::Order);
    let mut minion = Unit::new(
        UnitId(6),
        "lane_minion",
        UnitKind::Minion(MinionCategory::Melee),
        Team::Chaos,
    );
    minion.max_health = 600.0;
    assert_eq!(engine.damage().auto_attack_damage(&ctx, &turret, &minion), 270.0);
}

#[test]
fn commitments_replace_per_source_and_expire() {
    let mut snapshot = base_snapshot();
    let mut attacker = Unit::new(
        UnitId(10),
        "lane_minion",
        UnitKind::Minion(MinionCategory::Ranged),
        Team::Order,
    );
    attacker.base_attack_damage = 25.0;
    attacker.position = Vec2::new(100.0, 0.0);
    snapshot.insert(attacker);

    let mut victim = Unit::new(
        UnitId(11),
        "lane_minion",
        UnitKind::Minion(MinionCategory::Melee),
        Team::Chaos,
    );
    victim.health = 200.0;
    victim.position = Vec2::new(300.0, 0.0);
    snapshot.insert(victim);

    let mut engine = TacticsEngine::new("9.7", &snapshot);
    let args = CastArgs {
        target: Some(UnitId(11)),
        name: "BasicAttack",
        missile_speed: 1500.0,
    };

    engine.on_do_cast(&snapshot, Clock::new(1000, 0), UnitId(10), &args);
    engine.on_do_cast(&snapshot, Clock::new(1400, 0), UnitId(10), &args);

    // Only the replacement commitment contributes.
    let predicted = engine
        .predicted_health(
            &snapshot,
            Clock::new(1400, 0),
            UnitId(11),
            2000,
            DEFAULT_PREDICTION_DELAY,
            HealthPredictionMode::Default,
        )
        .unwrap();
    assert_eq!(predicted, 200.0 - 25.0);

    // Past the staleness window a sweep forgets the commitment.
    engine.on_update(Clock::new(6000, 0));
    let predicted = engine
        .predicted_health(
            &snapshot,
            Clock::new(6000, 0),
            UnitId(11),
            2000,
            DEFAULT_PREDICTION_DELAY,
            HealthPredictionMode::Default,
        )
        .unwrap();
    assert_eq!(predicted, 200.0);
}

#[test]
fn dash_flag_clears_when_path_reverts_to_walking() {
    let snapshot = base_snapshot();
    let mut engine = TacticsEngine::new("9.7", &snapshot);
    let clock = Clock::new(5000, 40);

    let mut dasher = hero(2, "Ahri", Team::Chaos);
    dasher.path = vec![Vec2::new(450.0, 0.0)];

    engine.on_new_path(
        clock,
        &dasher,
        &tactic_core::NewPathArgs {
            path: vec![Vec2::new(450.0, 0.0)],
            is_dash: true,
            speed: 1500.0,
        },
    );
    assert!(engine.is_dashing(&dasher));

    engine.on_new_path(
        clock,
        &dasher,
        &tactic_core::NewPathArgs {
            path: vec![Vec2::new(500.0, 0.0)],
            is_dash: false,
            speed: 325.0,
        },
    );
    // The path is still non-empty, yet the dash flag is down.
    assert!(!dasher.path.is_empty());
    assert!(!engine.is_dashing(&dasher));
}

#[test]
fn forced_focus_beats_range_and_ranking() {
    let mut snapshot = base_snapshot();
    for (id, x) in [(2u32, 200.0), (3, 1500.0)] {
        let mut enemy = hero(id, "Annie", Team::Chaos);
        enemy.position = Vec2::new(x, 0.0);
        snapshot.insert(enemy);
    }

    let mut engine = TacticsEngine::new("9.7", &snapshot);
    engine.selector().set_target(Some(UnitId(3)));
    engine.selector().set_focus(true);
    engine.selector().set_force(true);

    let targets = engine.targets(
        &snapshot,
        Clock::default(),
        500.0,
        DamageType::Physical,
        true,
        None,
        &[],
    );
    assert_eq!(targets, vec![UnitId(3)]);
}

#[test]
fn ranking_modes_are_stable_sorts() {
    let mut snapshot = base_snapshot();
    // Three enemies, two of them at equal distance and equal priority.
    for (id, name, x) in [
        (2u32, "Garen", 400.0),
        (3, "Annie", 400.0),
        (4, "Sona", 800.0),
    ] {
        let mut enemy = hero(id, name, Team::Chaos);
        enemy.position = Vec2::new(x, 0.0);
        snapshot.insert(enemy);
    }

    let mut engine = TacticsEngine::new("9.7", &snapshot);

    engine.selector().set_mode(Box::new(ClosestMode));
    let closest = engine.targets(
        &snapshot,
        Clock::default(),
        2000.0,
        DamageType::Physical,
        true,
        None,
        &[],
    );
    // Equal-distance pair keeps the prior relative order.
    let garen_index = closest.iter().position(|id| *id == UnitId(2)).unwrap();
    let annie_index = closest.iter().position(|id| *id == UnitId(3)).unwrap();
    assert!(garen_index < annie_index);
    assert_eq!(*closest.last().unwrap(), UnitId(4));

    let mut priority = PriorityMode::new();
    priority.set_priority("Sona", 5);
    priority.set_priority("Garen", 2);
    priority.set_priority("Annie", 2);
    engine.selector().set_mode(Box::new(priority));
    let by_priority = engine.targets(
        &snapshot,
        Clock::default(),
        2000.0,
        DamageType::Physical,
        true,
        None,
        &[],
    );
    assert_eq!(by_priority[0], UnitId(4));
    let garen_index = by_priority.iter().position(|id| *id == UnitId(2)).unwrap();
    let annie_index = by_priority.iter().position(|id| *id == UnitId(3)).unwrap();
    assert!(garen_index < annie_index);
}

#[test]
fn zero_level_profiles_deal_zero_from_every_slot() {
    let mut snapshot = base_snapshot();
    let mut caster = hero(2, "Annie", Team::Chaos);
    caster.ability_power = 400.0;
    caster.spell_levels = [0; 4];
    snapshot.insert(caster);

    let engine = TacticsEngine::new("9.7", &snapshot);
    let ctx = GameContext::new(&snapshot, Clock::default());
    let caster = snapshot.unit(UnitId(2)).unwrap();
    let target = snapshot.unit(UnitId(1)).unwrap();

    for slot in [SpellSlot::Q, SpellSlot::W, SpellSlot::E, SpellSlot::R] {
        assert_eq!(
            engine
                .damage()
                .spell_damage(&ctx, caster, target, slot, DamageStage::Default),
            0.0
        );
    }
}

#[test]
fn stealth_edges_round_trip_through_the_facade() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let snapshot = base_snapshot();
    let mut engine = TacticsEngine::new("9.7", &snapshot);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine
        .stealth_mut()
        .on_stealth(move |event| sink.borrow_mut().push(event.entered));

    let twitch = hero(2, "Twitch", Team::Chaos);
    let stealth_bit = tactic_core::events::STEALTHED;
    engine.on_integer_property_change(Clock::new(1000, 0), &twitch, "ActionState", 0, stealth_bit);
    engine.on_integer_property_change(
        Clock::new(4000, 0),
        &twitch,
        "ActionState",
        stealth_bit,
        0,
    );

    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn exhausted_attacker_deals_less() {
    let mut snapshot = base_snapshot();
    snapshot
        .unit_mut(UnitId(1))
        .unwrap()
        .buffs
        .push(Buff::new("SummonerExhaust"));

    let engine = TacticsEngine::new("9.7", &snapshot);
    let ctx = GameContext::new(&snapshot, Clock::default());
    let source = snapshot.unit(UnitId(1)).unwrap();
    let target = hero(2, "Annie", Team::Chaos);

    assert_eq!(engine.damage().auto_attack_damage(&ctx, source, &target), 60.0);
}

proptest! {
    /// Penetration math never produces a negative result, whatever the
    /// armor/resist and penetration combination.
    #[test]
    fn physical_and_magic_damage_are_never_negative(
        armor in -500.0f64..2000.0,
        bonus_armor in 0.0f64..1500.0,
        percent_pen in 0.0f64..1.0,
        percent_bonus_pen in 0.0f64..1.0,
        flat_pen in 0.0f64..400.0,
        lethality in 0.0f64..200.0,
        amount in -100.0f64..5000.0,
    ) {
        let snapshot = base_snapshot();
        let engine = TacticsEngine::new("9.7", &snapshot);
        let ctx = GameContext::new(&snapshot, Clock::default());

        let mut source = hero(2, "Draven", Team::Chaos);
        source.percent_armor_pen = percent_pen;
        source.percent_bonus_armor_pen = percent_bonus_pen;
        source.flat_armor_pen = flat_pen;
        source.lethality = lethality;
        source.percent_magic_pen = percent_pen;
        source.percent_bonus_magic_pen = percent_bonus_pen;
        source.flat_magic_pen = flat_pen;
        source.magic_lethality = lethality;

        let mut target = hero(3, "Garen", Team::Order);
        target.armor = armor;
        target.bonus_armor = bonus_armor;
        target.magic_resist = armor;
        target.bonus_magic_resist = bonus_armor;

        let physical =
            engine.damage().calculate_damage(&ctx, &source, &target, DamageType::Physical, amount);
        let magical =
            engine.damage().calculate_damage(&ctx, &source, &target, DamageType::Magical, amount);
        prop_assert!(physical >= 0.0);
        prop_assert!(magical >= 0.0);
    }
}
