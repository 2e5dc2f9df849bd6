use crate::errors::SimulationError;

use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Sufficient statistics of the Beta posterior of one arm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PosteriorState {
    pub alpha: f64,
    pub beta: f64,
}

impl Default for PosteriorState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

impl PosteriorState {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    pub(crate) fn validate(&self, arm_id: usize) -> Result<(), SimulationError> {
        let is_valid = |p: f64| p.is_finite() && p >= 1.0;
        if is_valid(self.alpha) && is_valid(self.beta) {
            Ok(())
        } else {
            Err(SimulationError::InvalidConfiguration(format!(
                "prior of arm {arm_id} must have finite parameters >= 1, got alpha={} beta={}",
                self.alpha, self.beta
            )))
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, SimulationError> {
        let s = Beta::new(self.alpha, self.beta)
            .map_err(|e| SimulationError::Sampling(e.to_string()))?
            .sample(rng);

        Ok(s)
    }

    pub fn update(&mut self, reward: u8) {
        let reward = f64::from(reward);
        self.alpha += reward;
        self.beta += 1.0 - reward;
    }

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }
}

/// Frozen copy of every arm's posterior at one point of the run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PosteriorSnapshot(Box<[PosteriorState]>);

impl PosteriorSnapshot {
    pub fn iter(&self) -> impl Iterator<Item = &PosteriorState> {
        self.0.iter()
    }
}

impl Index<usize> for PosteriorSnapshot {
    type Output = PosteriorState;

    fn index(&self, arm_id: usize) -> &Self::Output {
        &self.0[arm_id]
    }
}

#[derive(Clone, Debug)]
pub struct PosteriorStore {
    arms: Vec<PosteriorState>,
}

impl PosteriorStore {
    pub fn new(priors: Vec<PosteriorState>) -> Self {
        Self { arms: priors }
    }

    pub fn uniform(num_arms: usize) -> Self {
        Self::new(vec![PosteriorState::default(); num_arms])
    }

    pub fn num_arms(&self) -> usize {
        self.arms.len()
    }

    pub fn arms(&self) -> &[PosteriorState] {
        &self.arms
    }

    pub fn update(&mut self, arm_id: usize, reward: u8) -> Result<(), SimulationError> {
        self.arms
            .get_mut(arm_id)
            .ok_or(SimulationError::ArmNotFound(arm_id))?
            .update(reward);

        Ok(())
    }

    pub fn snapshot(&self) -> PosteriorSnapshot {
        PosteriorSnapshot(self.arms.clone().into_boxed_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    const EPS: f64 = 1e-9;

    #[test]
    fn default_is_uniform() {
        let state = PosteriorState::default();
        assert_eq!(state, PosteriorState::new(1.0, 1.0));
        assert!((state.mean() - 0.5).abs() < EPS);
    }

    #[test]
    fn update_success_and_failure() {
        let mut state = PosteriorState::default();
        state.update(1);
        assert_eq!(state, PosteriorState::new(2.0, 1.0));
        state.update(0);
        assert_eq!(state, PosteriorState::new(2.0, 2.0));
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        assert!(PosteriorState::new(1.0, 1.0).validate(0).is_ok());
        assert!(PosteriorState::new(2.5, 3.0).validate(0).is_ok());
        assert!(PosteriorState::new(0.5, 3.0).validate(0).is_err());
        assert!(PosteriorState::new(1.0, 0.999).validate(0).is_err());
        assert!(PosteriorState::new(0.0, 1.0).validate(0).is_err());
        assert!(PosteriorState::new(1.0, -2.0).validate(0).is_err());
        assert!(PosteriorState::new(f64::NAN, 1.0).validate(0).is_err());
        assert!(PosteriorState::new(1.0, f64::INFINITY).validate(0).is_err());
    }

    #[test]
    fn sample_in_unit_interval() {
        let mut rng = SmallRng::seed_from_u64(1234);
        let state = PosteriorState::new(3.0, 7.0);
        for _ in 0..100 {
            let s = state.sample(&mut rng).unwrap();
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn sample_concentrates_around_mean() {
        let mut rng = SmallRng::seed_from_u64(1234);
        let state = PosteriorState::new(90.0, 10.0);
        let mean = (0..500)
            .map(|_| state.sample(&mut rng).unwrap())
            .sum::<f64>()
            / 500.0;
        assert!((mean - 0.9).abs() < 0.02, "sample mean {mean}");
    }

    #[test]
    fn sample_invalid_parameters() {
        let mut rng = SmallRng::seed_from_u64(1234);
        let state = PosteriorState::new(0.0, 1.0);
        assert!(matches!(
            state.sample(&mut rng),
            Err(SimulationError::Sampling(_))
        ));
    }

    #[test]
    fn store_updates_one_arm() {
        let mut store = PosteriorStore::uniform(3);
        assert!(store.update(1, 1).is_ok());
        assert_eq!(store.arms()[0], PosteriorState::default());
        assert_eq!(store.arms()[1], PosteriorState::new(2.0, 1.0));
        assert_eq!(store.arms()[2], PosteriorState::default());
        assert_eq!(store.num_arms(), 3);
    }

    #[test]
    fn store_update_unknown_arm() {
        let mut store = PosteriorStore::uniform(2);
        assert!(matches!(
            store.update(2, 1),
            Err(SimulationError::ArmNotFound(2))
        ));
    }

    #[test]
    fn snapshot_does_not_alias() {
        let mut store = PosteriorStore::uniform(2);
        let before = store.snapshot();
        store.update(0, 0).unwrap();
        let after = store.snapshot();

        assert_eq!(before[0], PosteriorState::default());
        assert_eq!(after[0], PosteriorState::new(1.0, 2.0));
        assert_eq!(after.iter().count(), 2);
    }
}
