//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid in cells
    pub width: i32,
    /// Height of the world grid in cells
    pub height: i32,
    /// Random seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            seed: None,
        }
    }
}

/// Energy economy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Starting energy for parentless organisms
    pub initial_energy: i32,
    /// Energy cap; photosynthetic organisms above it die
    pub max_energy: i32,
    /// Paid for moving forward and for the move that follows a kill
    pub movement_cost: i32,
    /// Minimum energy required to reproduce
    pub reproduction_threshold: i32,
    /// Gained per photosynthesis action
    pub photosynthesis_gain: i32,
    /// Charged after every action, including no-ops
    pub metabolic_cost: i32,
    /// Share of the victim's energy credited to a thief
    pub steal_gain_percent: i32,
    /// Share of the victim's energy it loses to a theft
    pub steal_loss_percent: i32,
    /// Share of the giver's energy handed over by give-energy
    pub give_percent: i32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            initial_energy: 50,
            max_energy: 150,
            movement_cost: 2,
            reproduction_threshold: 60,
            photosynthesis_gain: 5,
            metabolic_cost: 1,
            steal_gain_percent: 20,
            steal_loss_percent: 40,
            give_percent: 20,
        }
    }
}

/// Ageing limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Organisms at or beyond this age are removed on their next turn
    pub max_age: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self { max_age: 1000 }
    }
}

/// Genome generation and inheritance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Probability that an offspring genome carries one point mutation
    pub mutation_rate: f64,
    /// Zero the genome positions 25..33 of fresh predator genomes
    pub seal_predator_photosynthesis: bool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.125,
            seal_predator_photosynthesis: true,
        }
    }
}

/// Initial population placed by `World::seed_population`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub initial_photosynthetic: usize,
    pub initial_predators: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_photosynthetic: 2000,
            initial_predators: 400,
        }
    }
}

/// Upper bound for any single energy amount in [`EnergyConfig`]
pub const MAX_ENERGY_PARAMETER: i32 = i32::MAX / 4;

/// Full simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub energy: EnergyConfig,
    pub lifecycle: LifecycleConfig,
    pub mutation: MutationConfig,
    pub population: PopulationConfig,
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject parameter sets the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.world.width <= 0 || self.world.height <= 0 {
            return Err(Error::Validation(format!(
                "grid must be non-empty, got {}x{}",
                self.world.width, self.world.height
            )));
        }

        let e = &self.energy;
        if e.max_energy <= 0 {
            return Err(Error::Validation("max_energy must be positive".to_string()));
        }
        if e.movement_cost < 0 || e.metabolic_cost < 0 || e.photosynthesis_gain < 0 {
            return Err(Error::Validation(
                "costs and gains must not be negative".to_string(),
            ));
        }
        for (name, value) in [
            ("initial_energy", e.initial_energy),
            ("max_energy", e.max_energy),
            ("movement_cost", e.movement_cost),
            ("metabolic_cost", e.metabolic_cost),
            ("photosynthesis_gain", e.photosynthesis_gain),
            ("reproduction_threshold", e.reproduction_threshold),
        ] {
            if value > MAX_ENERGY_PARAMETER {
                return Err(Error::Validation(format!(
                    "{name} must be at most {MAX_ENERGY_PARAMETER}, got {value}"
                )));
            }
        }
        for (name, pct) in [
            ("steal_gain_percent", e.steal_gain_percent),
            ("steal_loss_percent", e.steal_loss_percent),
            ("give_percent", e.give_percent),
        ] {
            if !(0..=100).contains(&pct) {
                return Err(Error::Validation(format!(
                    "{name} must be within 0..=100, got {pct}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.mutation.mutation_rate) {
            return Err(Error::Validation(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation.mutation_rate
            )));
        }

        Ok(())
    }
}

/// Output format for the runner's log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Headless runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Number of ticks to run
    pub num_ticks: u64,
    /// Emit population metrics every this many ticks
    pub report_interval: u64,
    pub log_format: LogFormat,
    pub simulation: SimConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            num_ticks: 10_000,
            report_interval: 100,
            log_format: LogFormat::Pretty,
            simulation: SimConfig::default(),
        }
    }
}

impl RunnerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&json)?;
        config.simulation.validate()?;
        Ok(config)
    }
}
