use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DrawResult {
    pub arm_id: usize,
    pub reward: u8,
}

/// Per-round record of what was pulled, what it paid and what it cost
/// against the best arm.
#[derive(Clone, Debug, Default)]
pub struct RegretTracker {
    regrets: Vec<f64>,
    draws: Vec<DrawResult>,
}

impl RegretTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self, steps: usize) {
        self.regrets.reserve(steps);
        self.draws.reserve(steps);
    }

    pub fn record(&mut self, draw: DrawResult, regret: f64) {
        self.draws.push(draw);
        self.regrets.push(regret);
    }

    pub fn rounds(&self) -> usize {
        self.regrets.len()
    }

    pub fn regrets(&self) -> &[f64] {
        &self.regrets
    }

    pub fn draws(&self) -> &[DrawResult] {
        &self.draws
    }

    pub fn cumulative(&self) -> Vec<f64> {
        self.regrets
            .iter()
            .scan(0.0, |acc, &regret| {
                *acc += regret;
                Some(*acc)
            })
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.regrets.iter().sum()
    }
}
