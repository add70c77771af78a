//! Headless harness entry point.
//!
//! Plays a scripted scenario against a strafing player and prints a
//! session summary. Configuration comes from `HOSTILE_*` environment
//! variables, optionally loaded from a `.env` file.
mod config;
mod harness;

use anyhow::{Result, anyhow};
use config::CliConfig;
use hostile_content::{ConfigLoader, ContentFactory};
use hostile_runtime::{Scenario, Simulation};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    tracing::info!(
        seed = config.seed,
        ticks = config.ticks,
        difficulty = %config.difficulty,
        data_dir = %config.data_dir.display(),
        "Starting headless session"
    );

    let factory = ContentFactory::new(config.data_dir.clone());
    let sim_config = match &config.config {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_config()?,
    };
    let difficulty = factory
        .load_difficulty()?
        .get(&config.difficulty)
        .ok_or_else(|| anyhow!("Unknown difficulty preset '{}'", config.difficulty))?;
    let scenario = match &config.scenario {
        Some(path) => Scenario::load_from_file(path)?,
        None => harness::demo_scenario(),
    };
    tracing::info!(
        scenario = %scenario.name,
        spawns = scenario.spawns.len(),
        "Scenario ready"
    );

    let mut sim = Simulation::builder()
        .seed(config.seed)
        .sim_config(sim_config)
        .difficulty(difficulty)
        .archetypes(factory.load_archetypes()?)
        .scenario(scenario)
        .build()?;

    let summary = harness::run(&mut sim, config.ticks, config.hits)?;
    tracing::info!(ticks = summary.ticks, "Session finished");
    println!("{}", summary);

    Ok(())
}
