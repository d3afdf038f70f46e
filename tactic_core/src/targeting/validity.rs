//! Target validity and invulnerability checks

use crate::entity::{GameContext, Unit};
use crate::types::{DamageType, Vec2};

/// One buff-conditional invulnerability entry. `shield` entries are spell
/// shields and can be bypassed when the caller chooses to ignore them.
pub struct InvulnerabilityRule {
    pub name: &'static str,
    pub shield: bool,
    pub applies: fn(&GameContext, &Unit, DamageType) -> bool,
}

impl std::fmt::Debug for InvulnerabilityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvulnerabilityRule")
            .field("name", &self.name)
            .field("shield", &self.shield)
            .finish()
    }
}

/// The ordered invulnerability rule table.
#[derive(Debug)]
pub struct InvulnerabilityTable {
    rules: Vec<InvulnerabilityRule>,
}

impl Default for InvulnerabilityTable {
    fn default() -> Self {
        InvulnerabilityTable {
            rules: default_invulnerability_rules(),
        }
    }
}

impl InvulnerabilityTable {
    pub fn new(rules: Vec<InvulnerabilityRule>) -> Self {
        InvulnerabilityTable { rules }
    }

    pub fn add(&mut self, rule: InvulnerabilityRule) {
        self.rules.push(rule);
    }

    /// True when the target cannot be damaged by the given damage type.
    /// Spell-shield entries only count when `ignore_shields` is unset.
    pub fn check(
        &self,
        ctx: &GameContext,
        target: &Unit,
        damage_type: DamageType,
        ignore_shields: bool,
    ) -> bool {
        if target.is_invulnerable {
            return true;
        }
        self.rules
            .iter()
            .filter(|rule| !rule.shield || !ignore_shields)
            .any(|rule| (rule.applies)(ctx, target, damage_type))
    }
}

/// The shipped invulnerability entries.
pub fn default_invulnerability_rules() -> Vec<InvulnerabilityRule> {
    vec![
        InvulnerabilityRule {
            name: "kindred-lamb-respite",
            shield: false,
            applies: |_ctx, target, _damage_type| {
                target.has_buff("kindredrnodeathbuff")
                    && target.max_health > 0.0
                    && target.health / target.max_health <= 0.1
            },
        },
        InvulnerabilityRule {
            name: "kayle-intervention",
            shield: false,
            applies: |_ctx, target, _damage_type| target.has_buff("JudicatorIntervention"),
        },
        InvulnerabilityRule {
            name: "tryndamere-undying-rage",
            shield: false,
            applies: |_ctx, target, _damage_type| {
                target.has_buff("UndyingRage") && target.health <= 50.0
            },
        },
        InvulnerabilityRule {
            name: "sivir-spell-shield",
            shield: true,
            applies: |_ctx, target, _damage_type| target.has_buff("SivirE"),
        },
        InvulnerabilityRule {
            name: "nocturne-shroud",
            shield: true,
            applies: |_ctx, target, _damage_type| {
                target.has_buff("NocturneShroudofDarkness")
            },
        },
        InvulnerabilityRule {
            name: "banshees-veil",
            shield: true,
            applies: |_ctx, target, _damage_type| target.has_buff("bansheesveil"),
        },
        InvulnerabilityRule {
            name: "morgana-black-shield",
            shield: true,
            applies: |_ctx, target, damage_type| {
                target.has_buff("BlackShield") && damage_type == DamageType::Magical
            },
        },
    ]
}

/// General target validity: alive, visible, targetable to the player's team,
/// rendered, optionally team-checked, and within range of `from` or the
/// player. Zero range falls back to the player's real basic-attack range.
pub fn is_valid_target(
    ctx: &GameContext,
    unit: &Unit,
    range: f64,
    check_team: bool,
    from: Option<Vec2>,
) -> bool {
    if !unit.is_alive
        || !unit.is_visible
        || !unit.is_targetable
        || unit.is_invulnerable
        || !unit.is_hp_bar_rendered
    {
        return false;
    }

    let player = match ctx.snapshot.player() {
        Some(player) => player,
        None => return false,
    };

    if unit.team != player.team && !unit.is_targetable_to_enemies {
        return false;
    }
    if check_team && unit.team == player.team {
        return false;
    }

    let effective_range = if range <= 0.0 {
        player.real_auto_attack_range(Some(unit))
    } else {
        range
    };
    let origin = from.unwrap_or(player.position);
    origin.distance_squared(unit.position) < effective_range * effective_range
}
