//! Damage resolution engine
//!
//! Pure(ish) estimation of physical/magical/true damage between units:
//! penetration math, per-archetype passive rules, and data-driven ability
//! damage. Every entry point is a total function; missing data resolves to 0.

mod auto_attack;
mod calculate;
mod library;
mod modifiers;
mod passives;
mod profile;
mod spell;

pub use library::DamageLibrary;
pub use modifiers::{
    default_attack_modifiers, default_reduction_rules, AttackModifier, AttackState, FlatModFn,
    PercentModFn, ReductionRule,
};
pub use passives::{
    crit_multiplier, support_item_execute, PassiveDamageInfo, PassiveRegistry, PassiveRule,
};
pub use profile::{
    per_level, BonusDamage, ChampionProfile, DamageLimit, MonsterDamage, ScalingSource,
    ScalingTarget, SpellDamage, SpellEffectType, SpellEntry,
};

/// The damage resolution engine: immutable rule tables plus the loaded
/// per-version damage database.
#[derive(Debug)]
pub struct DamageEngine {
    library: DamageLibrary,
    passives: PassiveRegistry,
    attack_modifiers: Vec<AttackModifier>,
    reduction_rules: Vec<ReductionRule>,
    percent_hooks: Vec<PercentModFn>,
    flat_hooks: Vec<FlatModFn>,
}

impl DamageEngine {
    /// Engine for one game version and hero roster: loads the damage
    /// database and registers the passive rules of the present archetypes.
    pub fn new(game_version: &str, roster: &[String]) -> Self {
        DamageEngine {
            library: DamageLibrary::load(game_version, roster),
            passives: PassiveRegistry::for_roster(roster),
            attack_modifiers: default_attack_modifiers(),
            reduction_rules: default_reduction_rules(),
            percent_hooks: Vec::new(),
            flat_hooks: Vec::new(),
        }
    }

    /// Engine with an explicit library, for embedders that source the damage
    /// database themselves.
    pub fn with_library(library: DamageLibrary, roster: &[String]) -> Self {
        DamageEngine {
            library,
            passives: PassiveRegistry::for_roster(roster),
            attack_modifiers: default_attack_modifiers(),
            reduction_rules: default_reduction_rules(),
            percent_hooks: Vec::new(),
            flat_hooks: Vec::new(),
        }
    }

    pub fn library(&self) -> &DamageLibrary {
        &self.library
    }

    pub fn passives(&self) -> &PassiveRegistry {
        &self.passives
    }

    pub(crate) fn attack_modifiers(&self) -> &[AttackModifier] {
        &self.attack_modifiers
    }

    pub(crate) fn reduction_rules(&self) -> &[ReductionRule] {
        &self.reduction_rules
    }

    pub(crate) fn percent_hooks(&self) -> &[PercentModFn] {
        &self.percent_hooks
    }

    pub(crate) fn flat_hooks(&self) -> &[FlatModFn] {
        &self.flat_hooks
    }

    /// Register an additional damage-reduction rule; evaluated after the
    /// shipped table, in registration order.
    pub fn add_reduction_rule(&mut self, rule: ReductionRule) {
        self.reduction_rules.push(rule);
    }

    /// Register a percent-based passive modifier hook.
    pub fn add_percent_hook(&mut self, hook: PercentModFn) {
        self.percent_hooks.push(hook);
    }

    /// Register a flat passive modifier hook.
    pub fn add_flat_hook(&mut self, hook: FlatModFn) {
        self.flat_hooks.push(hook);
    }
}
