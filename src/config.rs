use crate::simulation::PosteriorState;

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SimulationConfig {
    pub num_arms: usize,
    pub priors: Option<Vec<PosteriorState>>,
    pub thetas: Option<Vec<f64>>,
    pub seed: Option<u64>,
    pub steps: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExperimentConfig {
    pub runs: usize,
    pub include_history: bool,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub simulation: SimulationConfig,
    pub experiment: ExperimentConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("config").required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    // priors are tables, so they can only come from the config file
    fn environment() -> Environment {
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("simulation.thetas")
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("logging.log_level", "info")?
            .set_default("simulation.steps", 1000)?
            .set_default("experiment.runs", 1)?
            .set_default("experiment.include_history", false)
    }
}
