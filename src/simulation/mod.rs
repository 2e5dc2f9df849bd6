mod oracle;
mod posterior;
mod regret;
mod rng;
mod selector;
mod simulator;

pub use oracle::RewardOracle;
pub use posterior::{PosteriorSnapshot, PosteriorState, PosteriorStore};
pub use regret::{DrawResult, RegretTracker};
pub use rng::SimulationRng;
pub use selector::select_arm;
pub use simulator::{ArmStats, BanditSimulator, SimulatorStats};
