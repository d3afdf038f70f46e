//! Priority-slider ranking

use super::RankingMode;
use crate::config;
use crate::targeting::RankContext;
use crate::types::UnitId;
use serde::Deserialize;
use std::collections::HashMap;

const MIN_PRIORITY: u32 = 1;
const MAX_PRIORITY: u32 = 5;

/// One priority category of the static per-archetype table.
#[derive(Debug, Clone, Deserialize)]
pub struct PriorityCategory {
    pub value: u32,
    pub champions: Vec<String>,
}

/// Static per-archetype default priorities, loaded from the embedded table.
#[derive(Debug, Clone, Deserialize)]
pub struct PriorityTable {
    pub categories: Vec<PriorityCategory>,
}

impl PriorityTable {
    /// The embedded default table; an unparsable table degrades to empty.
    pub fn embedded() -> Self {
        config::parse_toml(include_str!("../../../data/priority.toml")).unwrap_or(PriorityTable {
            categories: Vec::new(),
        })
    }

    /// Default priority of an archetype; unlisted archetypes rank lowest.
    pub fn default_priority(&self, archetype: &str) -> u32 {
        self.categories
            .iter()
            .find(|c| c.champions.iter().any(|name| name == archetype))
            .map(|c| c.value.clamp(MIN_PRIORITY, MAX_PRIORITY))
            .unwrap_or(MIN_PRIORITY)
    }
}

/// Orders candidates by descending per-enemy priority slider (1-5).
#[derive(Debug)]
pub struct PriorityMode {
    priorities: HashMap<String, u32>,
    table: PriorityTable,
}

impl Default for PriorityMode {
    fn default() -> Self {
        PriorityMode {
            priorities: HashMap::new(),
            table: PriorityTable::embedded(),
        }
    }
}

impl PriorityMode {
    pub fn new() -> Self {
        PriorityMode::default()
    }

    /// Configured priority of an archetype; unset archetypes rank lowest.
    pub fn priority(&self, archetype: &str) -> u32 {
        self.priorities.get(archetype).copied().unwrap_or(MIN_PRIORITY)
    }

    /// Set the slider of one archetype, clamped to the 1-5 range.
    pub fn set_priority(&mut self, archetype: impl Into<String>, value: u32) {
        self.priorities
            .insert(archetype.into(), value.clamp(MIN_PRIORITY, MAX_PRIORITY));
    }

    /// Populate the sliders of the current enemy roster from the static
    /// per-archetype table.
    pub fn auto_fill(&mut self, ctx: &RankContext) {
        let defaults: Vec<(String, u32)> = ctx
            .game
            .snapshot
            .enemy_heroes()
            .map(|enemy| (enemy.name.clone(), self.table.default_priority(&enemy.name)))
            .collect();
        for (name, value) in defaults {
            self.set_priority(name, value);
        }
    }
}

impl RankingMode for PriorityMode {
    fn name(&self) -> &'static str {
        "priorities"
    }

    fn display_name(&self) -> &'static str {
        "Priorities"
    }

    fn order(&mut self, ctx: &RankContext, candidates: &mut Vec<UnitId>) {
        let scores: HashMap<UnitId, u32> = candidates
            .iter()
            .map(|id| {
                let priority = ctx
                    .game
                    .snapshot
                    .unit(*id)
                    .map(|u| self.priority(&u.name))
                    .unwrap_or(MIN_PRIORITY);
                (*id, priority)
            })
            .collect();
        candidates.sort_by(|a, b| scores[b].cmp(&scores[a]));
    }
}
