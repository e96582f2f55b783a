//! Headless runner: seeds a world and advances it, logging population metrics.

mod telemetry;

use anyhow::{Context, Result};
use cellsim_core::{RunnerConfig, TickReport};
use cellsim_world::World;
use tracing::{info, warn};

const CONFIG_ENV: &str = "CELLSIM_CONFIG";

fn main() -> Result<()> {
    let config = load_config()?;

    telemetry::init_telemetry(config.log_format)?;

    let sim = &config.simulation;
    info!(
        width = sim.world.width,
        height = sim.world.height,
        seed = ?sim.world.seed,
        num_ticks = config.num_ticks,
        "Starting cellsim runner"
    );

    let mut world = World::from_config(sim.clone()).context("building world")?;
    let placed = world.seed_population(
        sim.population.initial_photosynthetic,
        sim.population.initial_predators,
    );
    info!(placed, "Initial population placed");

    let interval = config.report_interval.max(1);
    let mut totals = TickReport::default();

    while world.tick_count() < config.num_ticks {
        let remaining = config.num_ticks - world.tick_count();
        let report = world.run(interval.min(remaining));
        totals.accumulate(&report);
        emit_population_metrics(&world, &report);

        if world.is_empty() {
            warn!(tick = world.tick_count(), "Population extinct, stopping early");
            break;
        }
    }

    emit_summary(&world, &totals);
    Ok(())
}

/// Config file path from the first argument or `CELLSIM_CONFIG`, defaults otherwise.
fn load_config() -> Result<RunnerConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok());

    match path {
        Some(path) => RunnerConfig::from_json_file(&path)
            .with_context(|| format!("loading runner config from {path}")),
        None => Ok(RunnerConfig::default()),
    }
}

fn emit_population_metrics(world: &World, report: &TickReport) {
    let stats = world.stats();
    info!(
        event = "population_metrics",
        tick = world.tick_count(),
        total = stats.total,
        photosynthetic = stats.photosynthetic,
        predators = stats.predators,
        lineages = stats.lineages,
        mean_energy = format!("{:.1}", stats.mean_energy),
        oldest_age = stats.oldest_age,
        births = report.births,
        deaths = report.deaths,
        kills = report.kills,
        "Population metrics snapshot"
    );
}

fn emit_summary(world: &World, totals: &TickReport) {
    let stats = world.stats();
    info!(
        event = "run_summary",
        final_tick = world.tick_count(),
        survivors = stats.total,
        photosynthetic = stats.photosynthetic,
        predators = stats.predators,
        lineages = stats.lineages,
        total_actions = totals.acted,
        total_births = totals.births,
        total_deaths = totals.deaths,
        total_kills = totals.kills,
        "🏁 Run complete"
    );
}
