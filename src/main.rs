use thompson_bandits::config::{AppConfig, SimulationConfig};
use thompson_bandits::errors::AppError;
use thompson_bandits::report::{BatchReport, SimulationReport};
use thompson_bandits::simulation::BanditSimulator;

use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let simulation = &config.simulation;
    let experiment = &config.experiment;
    info!(
        runs = %experiment.runs,
        steps = %simulation.steps,
        num_arms = %simulation.num_arms,
        "Starting experiment"
    );

    let batch = (0..experiment.runs)
        .map(|run| -> Result<SimulationReport, AppError> {
            let run_config = SimulationConfig {
                seed: simulation.seed.map(|seed| seed.wrapping_add(run as u64)),
                ..simulation.clone()
            };
            let mut simulator = BanditSimulator::from_config(&run_config)?;
            simulator.run(simulation.steps)?;

            Ok(SimulationReport::new(&simulator, experiment.include_history))
        })
        .collect::<Result<BatchReport, AppError>>()?;

    info!(
        mean_total_regret = %batch.mean_total_regret,
        "Finished experiment"
    );
    println!("{}", serde_json::to_string_pretty(&batch)?);

    Ok(())
}
