//! Benchmarking and experimentation module.
//!
//! Runs the solver suite over instances, collects per-run timing and value
//! records, aggregates statistics, and exports CSV/JSON reports.

use crate::exact::{
    Backtracking, BranchAndBound, DynamicProgramming, MemoizedRecursion, PlainRecursion,
};
use crate::heuristics::{AcoConfig, AnnealingConfig, AntColony, GreedyVariant, SimulatedAnnealing};
use crate::instance::KnapsackInstance;
use crate::solver::KnapsackSolver;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

/// Result of one solver run on one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Algorithm name
    pub algorithm: String,
    /// Instance name
    pub instance: String,
    /// Number of items in the instance
    pub num_items: usize,
    /// Instance capacity
    pub capacity: u64,
    /// Value returned by the solver
    pub value: u64,
    /// Wall-clock time in seconds
    pub time: f64,
    /// Run index (stochastic solvers are run several times)
    pub run: usize,
}

/// Aggregated statistics for an algorithm across all recorded runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmStatistics {
    /// Algorithm name
    pub algorithm: String,
    /// Number of runs aggregated
    pub runs: usize,
    /// Best value over all runs
    pub best_value: u64,
    /// Worst value over all runs
    pub worst_value: u64,
    /// Mean value
    pub mean_value: f64,
    /// Sample standard deviation of the value
    pub std_value: f64,
    /// Mean time in seconds
    pub mean_time: f64,
    /// Fastest run in seconds
    pub min_time: f64,
    /// Total time in seconds
    pub total_time: f64,
    /// Mean gap to the exact optimum in percent, when an optimum was recorded
    pub mean_gap: Option<f64>,
}

/// Benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of runs per stochastic solver (seeds `0..num_runs`)
    pub num_runs: usize,
    /// Largest item count the O(2^n) solvers are still run on
    pub exhaustive_limit: usize,
    /// Simulated annealing parameters (seed is overridden per run)
    pub annealing: AnnealingConfig,
    /// Ant colony parameters (seed is overridden per run)
    pub aco: AcoConfig,
    /// Fan independent instances out over rayon
    pub parallel: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_runs: 5,
            exhaustive_limit: 25,
            annealing: AnnealingConfig::default(),
            aco: AcoConfig::default(),
            parallel: true,
        }
    }
}

/// Benchmarking engine.
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<AlgorithmResult>,
    optima: HashMap<String, u64>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
            optima: HashMap::new(),
        }
    }

    /// Run a solver `runs` times on an instance, timing each call.
    fn run_solver(&mut self, instance: &KnapsackInstance, solver: &dyn KnapsackSolver, runs: usize) {
        for run in 0..runs {
            let start = Instant::now();
            let value = solver.solve(instance.capacity, &instance.items);
            let time = start.elapsed().as_secs_f64();

            self.results.push(AlgorithmResult {
                algorithm: solver.name().to_string(),
                instance: instance.name.clone(),
                num_items: instance.num_items(),
                capacity: instance.capacity,
                value,
                time,
                run,
            });
        }
    }

    /// Run the exact solvers. The exponential-time ones are skipped above
    /// the configured item-count limit; the DP result is recorded as the
    /// instance optimum for gap reporting.
    pub fn run_exact(&mut self, instance: &KnapsackInstance) {
        let dp = DynamicProgramming::new();
        let optimum = dp.solve(instance.capacity, &instance.items);
        self.optima.insert(instance.name.clone(), optimum);

        self.run_solver(instance, &dp, 1);
        self.run_solver(instance, &MemoizedRecursion::new(), 1);
        self.run_solver(instance, &BranchAndBound::new(), 1);

        if instance.num_items() <= self.config.exhaustive_limit {
            self.run_solver(instance, &PlainRecursion::new(), 1);
            self.run_solver(instance, &Backtracking::new(), 1);
        } else {
            log::info!(
                "Skipping exponential solvers on {} ({} items)",
                instance.name,
                instance.num_items()
            );
        }
    }

    /// Run every greedy variant once (they are deterministic).
    pub fn run_greedy(&mut self, instance: &KnapsackInstance) {
        for variant in GreedyVariant::ALL {
            self.run_solver(instance, &variant, 1);
        }
    }

    /// Run the stochastic solvers `num_runs` times each with seeds
    /// `0..num_runs`.
    pub fn run_metaheuristics(&mut self, instance: &KnapsackInstance) {
        for seed in 0..self.config.num_runs as u64 {
            let sa_config = AnnealingConfig {
                seed: Some(seed),
                ..self.config.annealing.clone()
            };
            match SimulatedAnnealing::new(sa_config) {
                Ok(sa) => self.run_solver(instance, &sa, 1),
                Err(e) => log::error!("Simulated annealing config rejected: {}", e),
            }

            let aco_config = AcoConfig {
                seed: Some(seed),
                ..self.config.aco.clone()
            };
            match AntColony::new(aco_config) {
                Ok(aco) => self.run_solver(instance, &aco, 1),
                Err(e) => log::error!("Ant colony config rejected: {}", e),
            }
        }
    }

    /// Run the full suite on one instance.
    pub fn run_full_benchmark(&mut self, instance: &KnapsackInstance) {
        log::info!(
            "Benchmarking {} ({} items, capacity {})",
            instance.name,
            instance.num_items(),
            instance.capacity
        );

        self.run_exact(instance);
        self.run_greedy(instance);
        self.run_metaheuristics(instance);
    }

    /// Run the full suite on several instances, in parallel when configured.
    pub fn run_on_instances(&mut self, instances: &[KnapsackInstance]) {
        if self.config.parallel {
            let config = self.config.clone();
            let collected: Vec<(Vec<AlgorithmResult>, HashMap<String, u64>)> = instances
                .par_iter()
                .map(|instance| {
                    let mut local = Benchmark::new(config.clone());
                    local.run_full_benchmark(instance);
                    (local.results, local.optima)
                })
                .collect();

            for (results, optima) in collected {
                self.results.extend(results);
                self.optima.extend(optima);
            }
        } else {
            for instance in instances {
                self.run_full_benchmark(instance);
            }
        }
    }

    /// Compute per-algorithm statistics across all recorded runs.
    pub fn compute_statistics(&self) -> Vec<AlgorithmStatistics> {
        let mut by_algorithm: HashMap<String, Vec<&AlgorithmResult>> = HashMap::new();
        for result in &self.results {
            by_algorithm
                .entry(result.algorithm.clone())
                .or_default()
                .push(result);
        }

        let mut statistics = Vec::new();

        for (algorithm, results) in by_algorithm {
            let values: Vec<f64> = results.iter().map(|r| r.value as f64).collect();
            let times: Vec<f64> = results.iter().map(|r| r.time).collect();

            let gaps: Vec<f64> = results
                .iter()
                .filter_map(|r| {
                    self.optima.get(&r.instance).and_then(|&opt| {
                        if opt > 0 {
                            Some((opt - r.value.min(opt)) as f64 / opt as f64 * 100.0)
                        } else {
                            None
                        }
                    })
                })
                .collect();

            let std_value = if values.len() > 1 {
                values.iter().std_dev()
            } else {
                0.0
            };

            statistics.push(AlgorithmStatistics {
                algorithm,
                runs: results.len(),
                best_value: results.iter().map(|r| r.value).max().unwrap_or(0),
                worst_value: results.iter().map(|r| r.value).min().unwrap_or(0),
                mean_value: values.iter().mean(),
                std_value,
                mean_time: times.iter().mean(),
                min_time: times.iter().cloned().fold(f64::INFINITY, f64::min),
                total_time: times.iter().sum(),
                mean_gap: if gaps.is_empty() {
                    None
                } else {
                    Some(gaps.iter().mean())
                },
            });
        }

        statistics.sort_by(|a, b| {
            b.mean_value
                .partial_cmp(&a.mean_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        statistics
    }

    /// Export raw results to CSV.
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let file = File::create(path).map_err(|e| format!("Cannot create file: {}", e))?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer
                .serialize(result)
                .map_err(|e| format!("CSV write error: {}", e))?;
        }

        writer.flush().map_err(|e| format!("CSV flush error: {}", e))
    }

    /// Export aggregated statistics to CSV.
    pub fn export_statistics_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let file = File::create(path).map_err(|e| format!("Cannot create file: {}", e))?;
        let mut writer = csv::Writer::from_writer(file);

        for stat in self.compute_statistics() {
            writer
                .serialize(&stat)
                .map_err(|e| format!("CSV write error: {}", e))?;
        }

        writer.flush().map_err(|e| format!("CSV flush error: {}", e))
    }

    /// Export raw results to JSON.
    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let file = File::create(path).map_err(|e| format!("Cannot create file: {}", e))?;
        serde_json::to_writer_pretty(file, &self.results)
            .map_err(|e| format!("JSON write error: {}", e))
    }

    /// Generate a plain-text summary report.
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("      Knapsack Benchmark Report\n");
        report.push_str("========================================\n\n");

        let stats = self.compute_statistics();

        report.push_str("Algorithm Performance Summary:\n");
        report.push_str("-".repeat(92).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<26} {:>6} {:>10} {:>12} {:>10} {:>12} {:>10}\n",
            "Algorithm", "Runs", "Best", "Mean", "Gap%", "Min Time", "Mean Time"
        ));
        report.push_str("-".repeat(92).as_str());
        report.push('\n');

        for stat in &stats {
            let gap_str = stat
                .mean_gap
                .map(|g| format!("{:.2}%", g))
                .unwrap_or_else(|| "-".to_string());

            report.push_str(&format!(
                "{:<26} {:>6} {:>10} {:>12.2} {:>10} {:>12.6} {:>10.6}\n",
                stat.algorithm,
                stat.runs,
                stat.best_value,
                stat.mean_value,
                gap_str,
                stat.min_time,
                stat.mean_time
            ));
        }

        report.push_str("-".repeat(92).as_str());
        report.push('\n');

        report.push_str("\nExact optimum per instance:\n");
        let mut optima: Vec<_> = self.optima.iter().collect();
        optima.sort();
        for (instance, optimum) in optima {
            report.push_str(&format!("  {}: {}\n", instance, optimum));
        }

        report
    }

    /// Get all recorded results.
    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    /// Get the recorded exact optima.
    pub fn optima(&self) -> &HashMap<String, u64> {
        &self.optima
    }
}

/// Load every items CSV in a directory as an instance, all sharing the
/// capacity from one capacity CSV. Instances come back sorted by item count.
pub fn load_instances_from_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    dir: P,
    capacity_path: Q,
) -> Result<Vec<KnapsackInstance>, String> {
    let capacity_path = capacity_path.as_ref();
    // Canonicalize so a relative spelling of the capacity path still matches
    // the directory entry it names.
    let capacity_canonical = capacity_path
        .canonicalize()
        .unwrap_or_else(|_| capacity_path.to_path_buf());
    let entries =
        std::fs::read_dir(&dir).map_err(|e| format!("Cannot read directory: {}", e))?;

    let mut instances = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());
        if path.extension().map(|e| e == "csv").unwrap_or(false) && canonical != capacity_canonical
        {
            match KnapsackInstance::from_csv_files(path.as_path(), capacity_path) {
                Ok(instance) => instances.push(instance),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
    }

    instances.sort_by_key(|i| i.num_items());
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            num_runs: 2,
            annealing: AnnealingConfig {
                initial_temperature: 100.0,
                cooling_rate: 0.9,
                seed: None,
            },
            aco: AcoConfig {
                num_ants: 5,
                num_iterations: 5,
                alpha: 1.0,
                beta: 1.0,
                evaporation_rate: 0.3,
                seed: None,
            },
            parallel: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_benchmark_config_defaults() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.num_runs, 5);
        assert_eq!(config.exhaustive_limit, 25);
    }

    #[test]
    fn test_full_benchmark_records_all_solvers() {
        let instance = KnapsackInstance::generate("bench", 10, 30, (1, 10), (1, 50), 5);
        let mut benchmark = Benchmark::new(small_config());
        benchmark.run_full_benchmark(&instance);

        // 5 exact + 9 greedy + 2 metaheuristics x 2 runs
        assert_eq!(benchmark.results().len(), 5 + 9 + 4);

        let optimum = benchmark.optima()["bench"];
        for result in benchmark.results() {
            assert!(result.value <= optimum, "{} overestimated", result.algorithm);
        }
    }

    #[test]
    fn test_exact_solvers_agree_in_statistics() {
        let instance = KnapsackInstance::generate("agree", 12, 40, (1, 12), (1, 60), 9);
        let mut benchmark = Benchmark::new(small_config());
        benchmark.run_exact(&instance);

        let optimum = benchmark.optima()["agree"] as f64;
        for stat in benchmark.compute_statistics() {
            assert_eq!(stat.runs, 1);
            assert!((stat.mean_value - optimum).abs() < 1e-9, "{}", stat.algorithm);
            assert_eq!(stat.mean_gap, Some(0.0));
        }
    }

    #[test]
    fn test_exponential_solvers_skipped_above_limit() {
        let instance = KnapsackInstance::generate("big", 30, 60, (1, 10), (1, 50), 3);
        let config = BenchmarkConfig {
            exhaustive_limit: 25,
            ..small_config()
        };
        let mut benchmark = Benchmark::new(config);
        benchmark.run_exact(&instance);

        let names: Vec<_> = benchmark
            .results()
            .iter()
            .map(|r| r.algorithm.as_str())
            .collect();
        assert!(!names.contains(&"Plain Recursion"));
        assert!(!names.contains(&"Backtracking"));
        assert!(names.contains(&"Dynamic Programming"));
    }

    #[test]
    fn test_parallel_matches_sequential_counts() {
        let instances: Vec<_> = (0..3)
            .map(|i| KnapsackInstance::generate(format!("p{}", i), 8, 20, (1, 8), (1, 30), i))
            .collect();

        let mut sequential = Benchmark::new(small_config());
        sequential.run_on_instances(&instances);

        let mut parallel = Benchmark::new(BenchmarkConfig {
            parallel: true,
            ..small_config()
        });
        parallel.run_on_instances(&instances);

        assert_eq!(sequential.results().len(), parallel.results().len());
        assert_eq!(sequential.optima(), parallel.optima());
    }

    #[test]
    fn test_directory_loader_skips_capacity_file_by_identity() {
        let dir = std::env::temp_dir().join("knapsack_bench_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("inst.csv"), "10,60\n20,100\n").unwrap();
        std::fs::write(dir.join("capacity.csv"), "Capacity\n50\n").unwrap();

        // A differently-spelled path to the same capacity file must still be
        // excluded from the instance list.
        let spelled = dir.join(".").join("capacity.csv");
        let instances = load_instances_from_dir(&dir, &spelled).unwrap();

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].name, "inst");
        assert_eq!(instances[0].capacity, 50);
        assert_eq!(instances[0].num_items(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_report_mentions_every_algorithm() {
        let instance = KnapsackInstance::generate("report", 6, 15, (1, 6), (1, 20), 1);
        let mut benchmark = Benchmark::new(small_config());
        benchmark.run_full_benchmark(&instance);

        let report = benchmark.generate_report();
        assert!(report.contains("Dynamic Programming"));
        assert!(report.contains("Standard Greedy"));
        assert!(report.contains("Simulated Annealing"));
        assert!(report.contains("Ant Colony Optimization"));
    }
}
