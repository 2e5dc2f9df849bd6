//! Thompson sampling simulator for Bernoulli bandits with Beta priors.
//!
//! ```
//! use thompson_bandits::simulation::BanditSimulator;
//!
//! let mut simulator = BanditSimulator::new(3, None, Some(vec![0.1, 0.5, 0.9]), Some(1234))?;
//! simulator.run(100)?;
//!
//! assert_eq!(simulator.regrets().len(), 100);
//! assert_eq!(simulator.posteriors_over_time().len(), 101);
//! # Ok::<(), thompson_bandits::errors::SimulationError>(())
//! ```

pub mod config;
pub mod errors;
pub mod report;
pub mod simulation;
