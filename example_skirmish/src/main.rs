//! Example skirmish - a scripted headless fight demonstrating tactic_core
//!
//! This example shows:
//! - Building a snapshot of heroes, minions and a turret
//! - Feeding do-cast / path-change / property-change notifications into the
//!   engine tick by tick
//! - Reading decisions back out: ranked targets, predicted health, damage
//!   estimates and dash/stealth state

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tactic_core::prediction::DEFAULT_PREDICTION_DELAY;
use tactic_core::targeting::modes::{PriorityMode, WeightedMode};
use tactic_core::{
    Buff, CastArgs, Clock, DamageStage, DamageType, GameContext, HealthPredictionMode,
    MinionCategory, NewPathArgs, Snapshot, SpellSlot, TacticsEngine, Team, TurretTier, Unit,
    UnitId, UnitKind, Vec2,
};

const TICK_MS: i64 = 250;
const PING_MS: i64 = 40;

fn make_hero(id: u32, name: &str, team: Team, position: Vec2, rng: &mut ChaCha8Rng) -> Unit {
    let mut hero = Unit::new(UnitId(id), name, UnitKind::Hero, team);
    hero.position = position;
    hero.level = rng.gen_range(6..=11);
    hero.base_attack_damage = rng.gen_range(60.0..90.0);
    hero.bonus_attack_damage = rng.gen_range(0.0..120.0);
    hero.ability_power = rng.gen_range(0.0..150.0);
    hero.armor = rng.gen_range(30.0..80.0);
    hero.magic_resist = rng.gen_range(30.0..60.0);
    hero.max_health = rng.gen_range(1200.0..2200.0);
    hero.health = hero.max_health * rng.gen_range(0.4..1.0);
    hero.spell_levels = [
        rng.gen_range(1..=5),
        rng.gen_range(1..=5),
        rng.gen_range(1..=5),
        rng.gen_range(0..=2),
    ];
    hero
}

fn make_minion(id: u32, team: Team, position: Vec2) -> Unit {
    let mut minion = Unit::new(
        UnitId(id),
        "lane_minion",
        UnitKind::Minion(MinionCategory::Melee),
        team,
    );
    minion.position = position;
    minion.is_melee = true;
    minion.base_attack_damage = 12.0;
    minion.max_health = 480.0;
    minion.health = 480.0;
    minion.attack_cast_delay = 0.25;
    minion.attack_delay = 1.25;
    minion
}

fn build_snapshot(rng: &mut ChaCha8Rng) -> Snapshot {
    let mut snapshot = Snapshot::new();

    let player = make_hero(1, "Ashe", Team::Order, Vec2::new(0.0, 0.0), rng);
    snapshot.insert(player);
    snapshot.set_player(UnitId(1));

    for (id, name, x, y) in [
        (2u32, "Annie", 650.0, 120.0),
        (3, "Garen", 520.0, -200.0),
        (4, "Vayne", 980.0, 60.0),
    ] {
        snapshot.insert(make_hero(id, name, Team::Chaos, Vec2::new(x, y), rng));
    }

    // A lane skirmish around the player: allied and enemy melee minions.
    for i in 0..3u32 {
        snapshot.insert(make_minion(10 + i, Team::Order, Vec2::new(250.0 + 40.0 * i as f64, 40.0)));
        snapshot.insert(make_minion(20 + i, Team::Chaos, Vec2::new(330.0 + 40.0 * i as f64, 40.0)));
    }

    let mut turret = Unit::new(UnitId(30), "turret", UnitKind::Turret(TurretTier::One), Team::Order);
    turret.position = Vec2::new(-400.0, 0.0);
    turret.attack_cast_delay = 0.3;
    turret.missile_speed = 1200.0;
    snapshot.insert(turret);

    snapshot
}

fn log_damage_estimates(engine: &TacticsEngine, snapshot: &Snapshot, clock: Clock) {
    let ctx = GameContext::new(snapshot, clock);
    let player = snapshot.player().expect("player is present");
    for enemy in snapshot.enemy_heroes() {
        let auto = engine.damage().auto_attack_damage(&ctx, player, enemy);
        let volley = engine
            .damage()
            .spell_damage(&ctx, player, enemy, SpellSlot::W, DamageStage::Default);
        println!(
            "    vs {:<6} auto {:>5.0}  W {:>5.0}  health {:>6.0}",
            enemy.name, auto, volley, enemy.health
        );
    }
}

fn main() {
    env_logger::init();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut snapshot = build_snapshot(&mut rng);
    let mut engine = TacticsEngine::new("9.7", &snapshot);

    engine.dashes_mut().on_dash(|dash| {
        println!(
            "  !! dash detected: unit {:?} over {}ms",
            dash.unit, dash.duration
        );
    });
    engine.stealth_mut().on_stealth(|event| {
        println!(
            "  !! stealth {} by unit {:?} at {:.1}s",
            if event.entered { "entered" } else { "broken" },
            event.unit,
            event.time
        );
    });

    println!("== skirmish start ==");
    for tick in 0..16i64 {
        let clock = Clock::new(1000 + tick * TICK_MS, PING_MS);
        engine.on_update(clock);

        // Enemy minions trade with ours; ours feed the health prediction.
        if tick % 5 == 0 {
            for (attacker, victim) in [(10u32, 20u32), (11, 21)] {
                log::debug!("minion {} winds up on {}", attacker, victim);
                engine.on_do_cast(
                    &snapshot,
                    clock,
                    UnitId(attacker),
                    &CastArgs {
                        target: Some(UnitId(victim)),
                        name: "BasicAttack",
                        missile_speed: 0.0,
                    },
                );
            }
        }

        // Annie flashes forward mid-fight.
        if tick == 6 {
            let annie = snapshot.unit(UnitId(2)).expect("annie is present").clone();
            engine.on_new_path(
                clock,
                &annie,
                &NewPathArgs {
                    path: vec![Vec2::new(420.0, 80.0)],
                    is_dash: true,
                    speed: 1400.0,
                },
            );
        }

        // Vayne tumbles into stealth and breaks it two ticks later.
        if tick == 8 || tick == 10 {
            let vayne = snapshot.unit(UnitId(4)).expect("vayne is present").clone();
            let (old_state, new_state) = if tick == 8 {
                (0, tactic_core::events::STEALTHED)
            } else {
                (tactic_core::events::STEALTHED, 0)
            };
            engine.on_integer_property_change(clock, &vayne, "ActionState", old_state, new_state);
        }

        if tick % 4 == 0 {
            println!("-- tick {} ({}ms)", tick, clock.now);
            log_damage_estimates(&engine, &snapshot, clock);

            let targets = engine.targets(
                &snapshot,
                clock,
                1200.0,
                DamageType::Physical,
                true,
                None,
                &[],
            );
            println!("    ranked targets: {:?}", targets);

            for minion in [20u32, 21] {
                if let Some(predicted) = engine.predicted_health(
                    &snapshot,
                    clock,
                    UnitId(minion),
                    1000,
                    DEFAULT_PREDICTION_DELAY,
                    HealthPredictionMode::Default,
                ) {
                    println!("    minion {} predicted health: {:.0}", minion, predicted);
                }
            }
        }

        // Simulate incoming poke on the player so the weighted factors move.
        if tick == 9 {
            let player = snapshot.unit_mut(UnitId(1)).expect("player is present");
            player.health = (player.health - 180.0).max(1.0);
            player.buffs.push(Buff::new("SummonerExhaust"));
        }
    }

    // Switch ranking strategies and compare the resulting focus order.
    let clock = Clock::new(6000, PING_MS);

    let mut priorities = PriorityMode::new();
    {
        let ctx = GameContext::new(&snapshot, clock);
        let rank = tactic_core::RankContext::new(&ctx);
        priorities.auto_fill(&rank);
    }
    engine.selector().set_mode(Box::new(priorities));
    let by_priority = engine.targets(
        &snapshot,
        clock,
        2000.0,
        DamageType::Physical,
        true,
        None,
        &[],
    );
    println!("priority order: {:?}", by_priority);

    engine.selector().set_mode(Box::new(WeightedMode::new()));
    let by_weight = engine.targets(
        &snapshot,
        clock,
        2000.0,
        DamageType::Physical,
        true,
        None,
        &[],
    );
    println!("weighted order: {:?}", by_weight);

    // Pin a forced focus target and show the short-circuit.
    engine.selector().set_target(by_weight.first().copied());
    engine.selector().set_focus(true);
    engine.selector().set_force(true);
    let forced = engine.targets(
        &snapshot,
        clock,
        300.0,
        DamageType::Physical,
        true,
        None,
        &[],
    );
    println!("forced focus: {:?}", forced);
    println!("== skirmish end ==");
}
