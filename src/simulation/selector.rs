use super::posterior::PosteriorState;

use crate::errors::SimulationError;

use rand::Rng;

/// Thompson sampling decision rule: draw one sample per arm from its Beta
/// posterior and return the arm with the largest sample.
///
/// Arms are sampled in index order and an arm only displaces the incumbent
/// when its sample is strictly greater, so ties go to the lowest index.
pub fn select_arm<R: Rng + ?Sized>(
    posteriors: &[PosteriorState],
    rng: &mut R,
) -> Result<usize, SimulationError> {
    posteriors
        .iter()
        .enumerate()
        .try_fold(
            None,
            |best: Option<(usize, f64)>, (arm_id, posterior)| -> Result<_, SimulationError> {
                let sample = posterior.sample(rng)?;
                Ok(match best {
                    Some((_, best_sample)) if sample <= best_sample => best,
                    _ => Some((arm_id, sample)),
                })
            },
        )?
        .map(|(arm_id, _)| arm_id)
        .ok_or(SimulationError::NoArmsAvailable)
}
