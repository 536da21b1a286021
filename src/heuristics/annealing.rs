//! Simulated annealing solver.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::instance::Item;
use crate::solver::KnapsackSolver;

/// Simulated annealing parameters.
#[derive(Debug, Clone)]
pub struct AnnealingConfig {
    /// Starting temperature; the walk runs until it decays below 1.
    pub initial_temperature: f64,
    /// Geometric cooling factor, strictly between 0 and 1.
    pub cooling_rate: f64,
    /// Seed for the random source. Each `solve` call seeds its own ChaCha8
    /// generator from this value, so `Some` gives reproducible runs and
    /// `None` draws a fresh seed from entropy per call.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        AnnealingConfig {
            initial_temperature: 65.0,
            cooling_rate: 0.73,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// A cooling rate outside (0, 1) would loop forever or never cool;
    /// reject it up front.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            ));
        }
        Ok(())
    }
}

/// Approximate randomized solver walking the space of inclusion vectors.
///
/// Starts from the all-excluded vector, flips one random bit per step, and
/// accepts worse neighbors with the Metropolis probability
/// `exp((new - current) / temperature)`. Infeasible vectors score 0 rather
/// than a proportional penalty.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    config: AnnealingConfig,
}

impl SimulatedAnnealing {
    pub fn new(config: AnnealingConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(SimulatedAnnealing { config })
    }

    pub fn with_seed(seed: u64) -> Self {
        SimulatedAnnealing {
            config: AnnealingConfig {
                seed: Some(seed),
                ..Default::default()
            },
        }
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }
}

impl KnapsackSolver for SimulatedAnnealing {
    fn name(&self) -> &str {
        "Simulated Annealing"
    }

    fn solve(&self, capacity: u64, items: &[Item]) -> u64 {
        let n = items.len();
        if n == 0 {
            return 0;
        }

        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut current = vec![false; n];
        let mut current_fitness = 0u64;
        let mut best_fitness = 0u64;
        let mut temperature = self.config.initial_temperature;

        while temperature > 1.0 {
            let flip = rng.gen_range(0..n);
            let mut neighbor = current.clone();
            neighbor[flip] = !neighbor[flip];
            let neighbor_fitness = fitness(&neighbor, items, capacity);

            let accept = neighbor_fitness > current_fitness || {
                let delta = neighbor_fitness as f64 - current_fitness as f64;
                (delta / temperature).exp() > rng.gen::<f64>()
            };

            if accept {
                current = neighbor;
                current_fitness = neighbor_fitness;
                if current_fitness > best_fitness {
                    best_fitness = current_fitness;
                }
            }

            temperature *= self.config.cooling_rate;
        }

        best_fitness
    }
}

/// Total value of the included items, or 0 if their weight breaks capacity.
fn fitness(included: &[bool], items: &[Item], capacity: u64) -> u64 {
    let mut total_weight = 0;
    let mut total_value = 0;
    for (item, &take) in items.iter().zip(included) {
        if take {
            total_weight += item.weight;
            total_value += item.value;
        }
    }
    if total_weight > capacity {
        0
    } else {
        total_value
    }
}
