use crate::errors::SimulationError;

use rand::distr::{Bernoulli, Distribution};
use rand::Rng;

/// Environment side of the simulation: the true success rate of every arm.
#[derive(Clone, Debug)]
pub struct RewardOracle {
    thetas: Box<[f64]>,
    best: f64,
}

impl RewardOracle {
    pub fn from_thetas(thetas: Vec<f64>) -> Result<Self, SimulationError> {
        if let Some((arm_id, theta)) = thetas
            .iter()
            .enumerate()
            .find(|(_, theta)| !(0.0..=1.0).contains(*theta))
        {
            return Err(SimulationError::InvalidConfiguration(format!(
                "theta of arm {arm_id} must lie in [0, 1], got {theta}"
            )));
        }

        Ok(Self::build(thetas))
    }

    /// Draws every theta uniformly from [0, 1).
    pub fn random<R: Rng + ?Sized>(num_arms: usize, rng: &mut R) -> Self {
        Self::build((0..num_arms).map(|_| rng.random::<f64>()).collect())
    }

    fn build(thetas: Vec<f64>) -> Self {
        let best = thetas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            thetas: thetas.into_boxed_slice(),
            best,
        }
    }

    pub fn thetas(&self) -> &[f64] {
        &self.thetas
    }

    pub fn best_arm(&self) -> Option<usize> {
        self.thetas.iter().position(|&theta| theta == self.best)
    }

    fn theta(&self, arm_id: usize) -> Result<f64, SimulationError> {
        self.thetas
            .get(arm_id)
            .copied()
            .ok_or(SimulationError::ArmNotFound(arm_id))
    }

    pub fn reward<R: Rng + ?Sized>(
        &self,
        arm_id: usize,
        rng: &mut R,
    ) -> Result<u8, SimulationError> {
        let theta = self.theta(arm_id)?;
        let success = Bernoulli::new(theta)
            .map_err(|e| SimulationError::Sampling(e.to_string()))?
            .sample(rng);

        Ok(u8::from(success))
    }

    pub fn regret(&self, arm_id: usize) -> Result<f64, SimulationError> {
        self.theta(arm_id).map(|theta| self.best - theta)
    }
}
