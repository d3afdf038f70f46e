//! Weighted multi-factor ranking

use super::weights::{AggroWeight, AttackDamageWeight, LowHealthWeight, WeightItem};
use super::RankingMode;
use crate::targeting::RankContext;
use crate::types::UnitId;
use std::collections::HashMap;

/// One configured factor of the weighted mode.
pub struct WeightedEntry {
    pub item: Box<dyn WeightItem>,
    pub weight: f64,
}

impl std::fmt::Debug for WeightedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedEntry")
            .field("item", &self.item.name())
            .field("weight", &self.weight)
            .finish()
    }
}

/// Orders candidates by a descending linear combination of weight factors.
/// Each factor is min/max-normalized over the candidate set and optionally
/// inverted before weighting.
#[derive(Debug)]
pub struct WeightedMode {
    entries: Vec<WeightedEntry>,
}

impl Default for WeightedMode {
    fn default() -> Self {
        let items: Vec<Box<dyn WeightItem>> = vec![
            Box::new(LowHealthWeight),
            Box::new(AttackDamageWeight::new()),
            Box::new(AggroWeight),
        ];
        WeightedMode {
            entries: items
                .into_iter()
                .map(|item| {
                    let weight = item.default_weight();
                    WeightedEntry { item, weight }
                })
                .collect(),
        }
    }
}

impl WeightedMode {
    pub fn new() -> Self {
        WeightedMode::default()
    }

    pub fn with_entries(entries: Vec<WeightedEntry>) -> Self {
        WeightedMode { entries }
    }

    /// Reconfigure the weight of a factor by name.
    pub fn set_weight(&mut self, name: &str, weight: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item.name() == name) {
            entry.weight = weight;
        }
    }
}

impl RankingMode for WeightedMode {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn display_name(&self) -> &'static str {
        "Weighted"
    }

    fn order(&mut self, ctx: &RankContext, candidates: &mut Vec<UnitId>) {
        if candidates.len() < 2 {
            return;
        }

        let mut scores: HashMap<UnitId, f64> =
            candidates.iter().map(|id| (*id, 0.0)).collect();

        for entry in &mut self.entries {
            let raw: Vec<(UnitId, f64)> = candidates
                .iter()
                .filter_map(|id| {
                    ctx.game
                        .snapshot
                        .unit(*id)
                        .map(|unit| (*id, entry.item.value(ctx, unit)))
                })
                .collect();

            let min = raw.iter().map(|(_, v)| *v).fold(f64::MAX, f64::min);
            let max = raw.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max);
            if (max - min).abs() < f64::EPSILON {
                continue;
            }

            for (id, value) in raw {
                let mut normalized = (value - min) / (max - min);
                if entry.item.inverted() {
                    normalized = 1.0 - normalized;
                }
                *scores.entry(id).or_insert(0.0) += normalized * entry.weight;
            }
        }

        candidates.sort_by(|a, b| {
            let sa = scores.get(a).copied().unwrap_or(0.0);
            let sb = scores.get(b).copied().unwrap_or(0.0);
            sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}
