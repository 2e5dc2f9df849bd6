use crate::simulation::{BanditSimulator, PosteriorSnapshot, SimulatorStats};

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub experiment_id: Uuid,
    pub seed: Option<u64>,
    pub steps: usize,
    pub thetas: Vec<f64>,
    pub regrets: Vec<f64>,
    pub cumulative_regret: Vec<f64>,
    pub stats: SimulatorStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posteriors_over_time: Option<Vec<PosteriorSnapshot>>,
}

impl SimulationReport {
    pub fn new(simulator: &BanditSimulator, include_history: bool) -> Self {
        Self {
            experiment_id: Uuid::new_v4(),
            seed: simulator.seed(),
            steps: simulator.steps_run(),
            thetas: simulator.thetas().to_vec(),
            regrets: simulator.regrets().to_vec(),
            cumulative_regret: simulator.cumulative_regret(),
            stats: simulator.stats(),
            posteriors_over_time: include_history
                .then(|| simulator.posteriors_over_time().to_vec()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub mean_total_regret: f64,
    pub runs: Vec<SimulationReport>,
}

impl FromIterator<SimulationReport> for BatchReport {
    fn from_iter<I: IntoIterator<Item = SimulationReport>>(iter: I) -> Self {
        let runs = iter.into_iter().collect::<Vec<SimulationReport>>();
        let mean_total_regret = if runs.is_empty() {
            0.0
        } else {
            runs.iter().map(|run| run.stats.total_regret).sum::<f64>() / runs.len() as f64
        };

        Self {
            mean_total_regret,
            runs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_simulator(seed: u64) -> BanditSimulator {
        let mut simulator =
            BanditSimulator::new(2, None, Some(vec![0.2, 0.8]), Some(seed)).unwrap();
        simulator.run(20).unwrap();
        simulator
    }

    #[test]
    fn report_without_history() {
        let report = SimulationReport::new(&make_simulator(1), false);
        assert_eq!(report.steps, 20);
        assert_eq!(report.regrets.len(), 20);
        assert_eq!(report.cumulative_regret.len(), 20);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("posteriors_over_time").is_none());
        assert_eq!(json["seed"], 1);
        assert_eq!(json["stats"]["arms"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn report_with_history() {
        let report = SimulationReport::new(&make_simulator(1), true);
        let json = serde_json::to_value(&report).unwrap();
        let history = json["posteriors_over_time"].as_array().unwrap();
        assert_eq!(history.len(), 21);
        assert_eq!(history[0][0]["alpha"], 1.0);
        assert_eq!(history[0][0]["beta"], 1.0);
    }

    #[test]
    fn batch_mean() {
        let batch = (0..3)
            .map(|seed| SimulationReport::new(&make_simulator(seed), false))
            .collect::<BatchReport>();
        let expected = batch
            .runs
            .iter()
            .map(|run| run.stats.total_regret)
            .sum::<f64>()
            / 3.0;
        assert!((batch.mean_total_regret - expected).abs() < 1e-12);
        assert_ne!(batch.runs[0].experiment_id, batch.runs[1].experiment_id);
    }

    #[test]
    fn empty_batch() {
        let batch = std::iter::empty::<SimulationReport>().collect::<BatchReport>();
        assert_eq!(batch.mean_total_regret, 0.0);
        assert!(batch.runs.is_empty());
    }
}
