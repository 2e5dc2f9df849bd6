use super::oracle::RewardOracle;
use super::posterior::{PosteriorSnapshot, PosteriorState, PosteriorStore};
use super::regret::{DrawResult, RegretTracker};
use super::rng::SimulationRng;
use super::selector::select_arm;

use crate::config::SimulationConfig;
use crate::errors::SimulationError;

use serde::Serialize;
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub successes: u64,
    pub posterior_mean: f64,
    pub theta: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulatorStats {
    pub arms: Vec<ArmStats>,
    pub best_arm: Option<usize>,
    pub total_regret: f64,
}

/// Thompson sampling over Bernoulli arms with Beta priors.
///
/// Each round samples every posterior, pulls the arm with the largest
/// sample, updates that arm's posterior with the Bernoulli reward and
/// records the regret against the best true arm. A copy of all posteriors
/// is archived before the first round and after every round.
#[derive(Clone, Debug)]
pub struct BanditSimulator {
    posteriors: PosteriorStore,
    oracle: RewardOracle,
    regrets: RegretTracker,
    history: Vec<PosteriorSnapshot>,
    rng: SimulationRng,
}

impl BanditSimulator {
    pub fn new(
        num_arms: usize,
        priors: Option<Vec<PosteriorState>>,
        thetas: Option<Vec<f64>>,
        seed: Option<u64>,
    ) -> Result<Self, SimulationError> {
        if num_arms == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "num_arms must be positive".to_string(),
            ));
        }

        let posteriors = match priors {
            Some(priors) => {
                if priors.len() != num_arms {
                    return Err(SimulationError::InvalidConfiguration(format!(
                        "expected {num_arms} priors, got {}",
                        priors.len()
                    )));
                }
                priors
                    .iter()
                    .enumerate()
                    .try_for_each(|(arm_id, prior)| prior.validate(arm_id))?;
                PosteriorStore::new(priors)
            }
            None => PosteriorStore::uniform(num_arms),
        };

        let oracle = match thetas {
            Some(thetas) if thetas.len() != num_arms => {
                return Err(SimulationError::InvalidConfiguration(format!(
                    "expected {num_arms} thetas, got {}",
                    thetas.len()
                )));
            }
            Some(thetas) => Some(RewardOracle::from_thetas(thetas)?),
            None => None,
        };

        // the rng is only created once the configuration is known to be valid
        let mut rng = SimulationRng::new(seed);
        let oracle = oracle.unwrap_or_else(|| RewardOracle::random(num_arms, rng.get_rng()));

        info!(
            num_arms = %num_arms,
            seed = ?seed,
            thetas = ?oracle.thetas(),
            "Created bandit simulator"
        );

        Ok(Self {
            history: vec![posteriors.snapshot()],
            posteriors,
            oracle,
            regrets: RegretTracker::new(),
            rng,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        Self::new(
            config.num_arms,
            config.priors.clone(),
            config.thetas.clone(),
            config.seed,
        )
    }

    pub fn run(&mut self, steps: usize) -> Result<(), SimulationError> {
        self.regrets.reserve(steps);
        self.history.reserve(steps);

        for _ in 0..steps {
            self.step()?;
        }

        info!(
            steps = %steps,
            steps_run = %self.steps_run(),
            total_regret = %self.regrets.total(),
            "Finished simulation run"
        );
        Ok(())
    }

    fn step(&mut self) -> Result<(), SimulationError> {
        let arm_id = select_arm(self.posteriors.arms(), self.rng.get_rng())?;
        let reward = self.oracle.reward(arm_id, self.rng.get_rng())?;
        self.posteriors.update(arm_id, reward)?;

        let regret = self.oracle.regret(arm_id)?;
        self.regrets.record(DrawResult { arm_id, reward }, regret);
        self.history.push(self.posteriors.snapshot());

        debug!(
            round = %self.regrets.rounds(),
            arm_id = %arm_id,
            reward = %reward,
            regret = %regret,
            "Pulled arm"
        );
        Ok(())
    }

    pub fn posteriors_over_time(&self) -> &[PosteriorSnapshot] {
        &self.history
    }

    pub fn regrets(&self) -> &[f64] {
        self.regrets.regrets()
    }

    pub fn thetas(&self) -> &[f64] {
        self.oracle.thetas()
    }

    pub fn draws(&self) -> &[DrawResult] {
        self.regrets.draws()
    }

    pub fn cumulative_regret(&self) -> Vec<f64> {
        self.regrets.cumulative()
    }

    pub fn steps_run(&self) -> usize {
        self.regrets.rounds()
    }

    pub fn num_arms(&self) -> usize {
        self.posteriors.num_arms()
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng.seed()
    }

    pub fn stats(&self) -> SimulatorStats {
        let mut arms = self
            .posteriors
            .arms()
            .iter()
            .zip(self.oracle.thetas())
            .map(|(posterior, &theta)| ArmStats {
                pulls: 0,
                successes: 0,
                posterior_mean: posterior.mean(),
                theta,
            })
            .collect::<Vec<ArmStats>>();

        self.regrets.draws().iter().for_each(|draw| {
            if let Some(arm) = arms.get_mut(draw.arm_id) {
                arm.pulls += 1;
                arm.successes += u64::from(draw.reward);
            }
        });

        SimulatorStats {
            arms,
            best_arm: self.oracle.best_arm(),
            total_regret: self.regrets.total(),
        }
    }
}
