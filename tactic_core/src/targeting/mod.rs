//! Target selection engine

mod aggro;
pub mod modes;
mod validity;

pub use aggro::{AggroEntry, AggroTracker};
pub use validity::{
    default_invulnerability_rules, is_valid_target, InvulnerabilityRule, InvulnerabilityTable,
};

use crate::entity::GameContext;
use crate::prediction::{HitChance, MotionDescriptor, MovementPredictor};
use crate::types::{DamageType, UnitId, Vec2};
use modes::{ClosestMode, RankingMode};

/// Context handed to ranking strategies: the game view plus the aggro table
/// some factors read.
#[derive(Clone, Copy)]
pub struct RankContext<'a> {
    pub game: &'a GameContext<'a>,
    pub aggro: Option<&'a AggroTracker>,
}

impl<'a> RankContext<'a> {
    pub fn new(game: &'a GameContext<'a>) -> Self {
        RankContext { game, aggro: None }
    }

    pub fn with_aggro(game: &'a GameContext<'a>, aggro: &'a AggroTracker) -> Self {
        RankContext {
            game,
            aggro: Some(aggro),
        }
    }
}

/// Externally supplied candidate filter (reaction-time and visibility
/// gating); the engine applies it before validity checks.
pub trait CandidateFilter {
    fn filter(&mut self, ctx: &GameContext, candidates: Vec<UnitId>) -> Vec<UnitId>;
}

/// Ranks candidate enemy heroes under the active strategy, with optional
/// sticky focus locking.
pub struct TargetSelector {
    mode: Box<dyn RankingMode>,
    humanizer: Option<Box<dyn CandidateFilter>>,
    invulnerability: InvulnerabilityTable,
    selected: Option<UnitId>,
    focus: bool,
    force: bool,
}

impl Default for TargetSelector {
    fn default() -> Self {
        TargetSelector {
            mode: Box::new(ClosestMode),
            humanizer: None,
            invulnerability: InvulnerabilityTable::default(),
            selected: None,
            focus: false,
            force: false,
        }
    }
}

impl std::fmt::Debug for TargetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetSelector")
            .field("mode", &self.mode.name())
            .field("selected", &self.selected)
            .field("focus", &self.focus)
            .field("force", &self.force)
            .finish()
    }
}

impl TargetSelector {
    pub fn new() -> Self {
        TargetSelector::default()
    }

    pub fn set_mode(&mut self, mode: Box<dyn RankingMode>) {
        self.mode = mode;
    }

    pub fn mode_name(&self) -> &'static str {
        self.mode.name()
    }

    pub fn set_humanizer(&mut self, filter: Box<dyn CandidateFilter>) {
        self.humanizer = Some(filter);
    }

    pub fn invulnerability_mut(&mut self) -> &mut InvulnerabilityTable {
        &mut self.invulnerability
    }

    /// Pin a target. With `focus` it is promoted to the front of the
    /// ranking; with `focus` and `force` it bypasses ranking entirely.
    pub fn set_target(&mut self, target: Option<UnitId>) {
        self.selected = target;
    }

    pub fn selected_target(&self) -> Option<UnitId> {
        self.selected
    }

    pub fn set_focus(&mut self, focus: bool) {
        self.focus = focus;
    }

    pub fn set_force(&mut self, force: bool) {
        self.force = force;
    }

    /// Ordered candidate targets under the active mode and filters.
    pub fn targets(
        &mut self,
        ctx: &RankContext,
        range: f64,
        damage_type: DamageType,
        ignore_shields: bool,
        from: Option<Vec2>,
        exclude: &[UnitId],
    ) -> Vec<UnitId> {
        // A forced focus target short-circuits everything while it is valid.
        if self.focus && self.force {
            if let Some(selected) = self.selected {
                if self.valid_candidate(ctx.game, selected, f64::MAX, damage_type, ignore_shields, from)
                {
                    return vec![selected];
                }
            }
        }

        let mut candidates: Vec<UnitId> = ctx.game.snapshot.enemy_heroes().map(|h| h.id).collect();
        if let Some(humanizer) = self.humanizer.as_mut() {
            candidates = humanizer.filter(ctx.game, candidates);
        }
        candidates.retain(|id| !exclude.contains(id));
        candidates.retain(|id| {
            self.valid_candidate(ctx.game, *id, range, damage_type, ignore_shields, from)
        });

        self.mode.order(ctx, &mut candidates);

        // A non-forced focus target is promoted without disturbing the rest.
        if self.focus {
            if let Some(selected) = self.selected {
                candidates.sort_by_key(|id| if *id == selected { 0 } else { 1 });
            }
        }

        candidates
    }

    /// Best target under the active mode, or none.
    pub fn target(
        &mut self,
        ctx: &RankContext,
        range: f64,
        damage_type: DamageType,
        ignore_shields: bool,
        from: Option<Vec2>,
        exclude: &[UnitId],
    ) -> Option<UnitId> {
        self.targets(ctx, range, damage_type, ignore_shields, from, exclude)
            .into_iter()
            .next()
    }

    /// Best target whose predicted position is not blocked, using the
    /// external movement predictor.
    pub fn target_filtered(
        &mut self,
        ctx: &RankContext,
        predictor: &dyn MovementPredictor,
        delay: f64,
        speed: f64,
        range: f64,
        damage_type: DamageType,
        ignore_shields: bool,
        from: Option<Vec2>,
    ) -> Option<UnitId> {
        let origin = from
            .or_else(|| ctx.game.snapshot.player().map(|p| p.position))
            .unwrap_or_default();
        self.targets(ctx, range, damage_type, ignore_shields, from, &[])
            .into_iter()
            .find(|id| {
                let descriptor = MotionDescriptor {
                    unit: *id,
                    delay,
                    speed,
                    range,
                    from: origin,
                };
                predictor.predict(ctx.game, &descriptor).hit_chance != HitChance::Collision
            })
    }

    fn valid_candidate(
        &self,
        ctx: &GameContext,
        id: UnitId,
        range: f64,
        damage_type: DamageType,
        ignore_shields: bool,
        from: Option<Vec2>,
    ) -> bool {
        let unit = match ctx.snapshot.unit(id) {
            Some(unit) => unit,
            None => return false,
        };
        is_valid_target(ctx, unit, range, true, from)
            && !self.invulnerability.check(ctx, unit, damage_type, ignore_shields)
    }
}
