use rand::{rngs::SmallRng, SeedableRng};

/// Randomness source owned by a single simulator. Every draw of a run goes
/// through it, so a fixed seed replays the whole trajectory.
#[derive(Clone, Debug)]
pub struct SimulationRng {
    seed: Option<u64>,
    rng: SmallRng,
}

impl SimulationRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_os_rng()
        };

        Self { seed, rng }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}
