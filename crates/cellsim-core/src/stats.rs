//! Population statistics for reporting.

use crate::{CellType, LineageId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Aggregate view over the live population at one instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub total: usize,
    pub photosynthetic: usize,
    pub predators: usize,
    /// Number of distinct lineage ids alive
    pub lineages: usize,
    pub mean_energy: f64,
    pub oldest_age: u32,
}

impl PopulationStats {
    /// Build statistics from `(type, lineage, energy, age)` samples.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (CellType, LineageId, i32, u32)>,
    {
        let mut stats = PopulationStats::default();
        let mut lineages = HashSet::new();
        let mut energy_sum: i64 = 0;

        for (cell_type, lineage, energy, age) in samples {
            stats.total += 1;
            match cell_type {
                CellType::Photosynthetic => stats.photosynthetic += 1,
                CellType::Predator => stats.predators += 1,
            }
            lineages.insert(lineage);
            energy_sum += energy as i64;
            stats.oldest_age = stats.oldest_age.max(age);
        }

        stats.lineages = lineages.len();
        if stats.total > 0 {
            stats.mean_energy = energy_sum as f64 / stats.total as f64;
        }
        stats
    }

    pub fn is_extinct(&self) -> bool {
        self.total == 0
    }
}

/// Events recorded while running a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Organisms that took an action
    pub acted: usize,
    pub births: usize,
    /// Removals for starvation, old age or excess energy
    pub deaths: usize,
    /// Organisms eaten by predators
    pub kills: usize,
}

impl TickReport {
    /// Fold another report into this one; `tick` takes the later value.
    pub fn accumulate(&mut self, other: &TickReport) {
        self.tick = self.tick.max(other.tick);
        self.acted += other.acted;
        self.births += other.births;
        self.deaths += other.deaths;
        self.kills += other.kills;
    }
}
