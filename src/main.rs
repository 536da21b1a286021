//! Knapsack Benchmark - Command Line Interface
//!
//! Solves and benchmarks 0/1 knapsack instances with the full solver suite.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::ProgressBar;
use knapsack_bench::benchmark::{load_instances_from_dir, Benchmark, BenchmarkConfig};
use knapsack_bench::exact::{
    Backtracking, BranchAndBound, DynamicProgramming, MemoizedRecursion, PlainRecursion,
};
use knapsack_bench::heuristics::{
    AcoConfig, AnnealingConfig, AntColony, GreedyVariant, SimulatedAnnealing,
};
use knapsack_bench::instance::KnapsackInstance;
use knapsack_bench::solver::KnapsackSolver;

use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "knapsack-bench")]
#[command(version = "1.0")]
#[command(about = "Benchmark exact and heuristic 0/1 knapsack solvers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single instance with one algorithm (or all of them)
    Solve {
        /// Items CSV file (one `weight,value` pair per line)
        #[arg(short, long)]
        items: PathBuf,

        /// Knapsack capacity
        #[arg(short, long, conflicts_with = "capacity_file")]
        capacity: Option<u64>,

        /// Capacity CSV file (`Capacity` header, one value per line)
        #[arg(long)]
        capacity_file: Option<PathBuf>,

        /// Algorithm to run
        #[arg(short, long, value_enum, default_value = "dp")]
        algorithm: Algorithm,

        /// Random seed for the stochastic solvers
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Simulated annealing initial temperature
        #[arg(long, default_value = "65")]
        initial_temperature: f64,

        /// Simulated annealing cooling rate
        #[arg(long, default_value = "0.73")]
        cooling_rate: f64,

        /// Ant colony: number of ants
        #[arg(long, default_value = "50")]
        ants: usize,

        /// Ant colony: number of iterations
        #[arg(long, default_value = "1500")]
        iterations: usize,

        /// Ant colony: pheromone importance
        #[arg(long, default_value = "1.5")]
        alpha: f64,

        /// Ant colony: heuristic importance
        #[arg(long, default_value = "4.0")]
        beta: f64,

        /// Ant colony: evaporation rate
        #[arg(long, default_value = "0.7")]
        evaporation_rate: f64,
    },

    /// Run the full benchmark suite over a directory of instances
    Benchmark {
        /// Directory containing items CSV files
        #[arg(short, long)]
        dir: PathBuf,

        /// Capacity CSV file shared by all instances
        #[arg(long)]
        capacity_file: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Number of runs per stochastic solver
        #[arg(short, long, default_value = "5")]
        runs: usize,

        /// Largest item count the exponential solvers are still run on
        #[arg(long, default_value = "25")]
        exhaustive_limit: usize,

        /// Run instances in parallel
        #[arg(long)]
        parallel: bool,

        /// Maximum instance size to include
        #[arg(long)]
        max_size: Option<usize>,
    },

    /// Generate a random instance and write it to CSV
    Generate {
        /// Number of items
        #[arg(short, long)]
        num_items: usize,

        /// Knapsack capacity
        #[arg(short, long)]
        capacity: u64,

        /// Minimum item weight
        #[arg(long, default_value = "1")]
        min_weight: u64,

        /// Maximum item weight
        #[arg(long, default_value = "50")]
        max_weight: u64,

        /// Minimum item value
        #[arg(long, default_value = "1")]
        min_value: u64,

        /// Maximum item value
        #[arg(long, default_value = "100")]
        max_value: u64,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Items CSV output path
        #[arg(long, default_value = "items.csv")]
        items_out: PathBuf,

        /// Capacity CSV output path
        #[arg(long, default_value = "capacity.csv")]
        capacity_out: PathBuf,
    },

    /// Print statistics about an instance
    Analyze {
        /// Items CSV file
        #[arg(short, long)]
        items: PathBuf,

        /// Knapsack capacity
        #[arg(short, long, conflicts_with = "capacity_file")]
        capacity: Option<u64>,

        /// Capacity CSV file
        #[arg(long)]
        capacity_file: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Algorithm {
    /// Dynamic programming (exact)
    Dp,
    /// Memoized recursion (exact)
    Memo,
    /// Plain recursion (exact, exponential)
    Recursive,
    /// Backtracking DFS (exact, exponential)
    Backtracking,
    /// Branch and bound (exact)
    Bnb,
    /// Simulated annealing
    Annealing,
    /// Ant colony optimization
    Aco,
    /// Standard greedy (ratio)
    Greedy,
    /// Defensive greedy (weight)
    Defensive,
    /// Limited greedy (value, two-regime)
    Limited,
    /// Scored greedy
    Scored,
    /// Max of value-fill and ratio-fill
    MaxOfTwo,
    /// Sliding ratio threshold
    Sliding,
    /// Transitioning greedy
    Transitioning,
    /// Deal stingy (evict lowest score)
    DealStingy,
    /// Weight stingy (evict lightest)
    WeightStingy,
    /// Run every solver
    All,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Solve {
            items,
            capacity,
            capacity_file,
            algorithm,
            seed,
            initial_temperature,
            cooling_rate,
            ants,
            iterations,
            alpha,
            beta,
            evaporation_rate,
        } => {
            let annealing = AnnealingConfig {
                initial_temperature,
                cooling_rate,
                seed: Some(seed),
            };
            let aco = AcoConfig {
                num_ants: ants,
                num_iterations: iterations,
                alpha,
                beta,
                evaporation_rate,
                seed: Some(seed),
            };
            run_solve(items, capacity, capacity_file, algorithm, annealing, aco)
        }
        Commands::Benchmark {
            dir,
            capacity_file,
            output,
            runs,
            exhaustive_limit,
            parallel,
            max_size,
        } => run_benchmark(
            dir,
            capacity_file,
            output,
            runs,
            exhaustive_limit,
            parallel,
            max_size,
        ),
        Commands::Generate {
            num_items,
            capacity,
            min_weight,
            max_weight,
            min_value,
            max_value,
            seed,
            items_out,
            capacity_out,
        } => run_generate(
            num_items,
            capacity,
            (min_weight, max_weight),
            (min_value, max_value),
            seed,
            items_out,
            capacity_out,
        ),
        Commands::Analyze {
            items,
            capacity,
            capacity_file,
        } => run_analyze(items, capacity, capacity_file),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Resolve the instance from an items CSV plus either an inline capacity or
/// a capacity CSV.
fn load_instance(
    items: PathBuf,
    capacity: Option<u64>,
    capacity_file: Option<PathBuf>,
) -> Result<KnapsackInstance, String> {
    match (capacity, capacity_file) {
        (Some(_), Some(_)) => Err("Give either --capacity or --capacity-file, not both".to_string()),
        (None, Some(path)) => KnapsackInstance::from_csv_files(items, path),
        (Some(capacity), None) => KnapsackInstance::from_items_csv(items, capacity),
        (None, None) => Err("A capacity is required (--capacity or --capacity-file)".to_string()),
    }
}

fn solvers_for(
    algorithm: Algorithm,
    annealing: &AnnealingConfig,
    aco: &AcoConfig,
) -> Result<Vec<Box<dyn KnapsackSolver>>, String> {
    let solvers: Vec<Box<dyn KnapsackSolver>> = match algorithm {
        Algorithm::Dp => vec![Box::new(DynamicProgramming::new())],
        Algorithm::Memo => vec![Box::new(MemoizedRecursion::new())],
        Algorithm::Recursive => vec![Box::new(PlainRecursion::new())],
        Algorithm::Backtracking => vec![Box::new(Backtracking::new())],
        Algorithm::Bnb => vec![Box::new(BranchAndBound::new())],
        Algorithm::Annealing => vec![Box::new(SimulatedAnnealing::new(annealing.clone())?)],
        Algorithm::Aco => vec![Box::new(AntColony::new(aco.clone())?)],
        Algorithm::Greedy => vec![Box::new(GreedyVariant::Standard)],
        Algorithm::Defensive => vec![Box::new(GreedyVariant::Defensive)],
        Algorithm::Limited => vec![Box::new(GreedyVariant::Limited)],
        Algorithm::Scored => vec![Box::new(GreedyVariant::Scored)],
        Algorithm::MaxOfTwo => vec![Box::new(GreedyVariant::MaxOfTwo)],
        Algorithm::Sliding => vec![Box::new(GreedyVariant::SlidingThreshold)],
        Algorithm::Transitioning => vec![Box::new(GreedyVariant::Transitioning)],
        Algorithm::DealStingy => vec![Box::new(GreedyVariant::DealStingy)],
        Algorithm::WeightStingy => vec![Box::new(GreedyVariant::WeightStingy)],
        Algorithm::All => {
            let mut all: Vec<Box<dyn KnapsackSolver>> = vec![
                Box::new(DynamicProgramming::new()),
                Box::new(MemoizedRecursion::new()),
                Box::new(PlainRecursion::new()),
                Box::new(Backtracking::new()),
                Box::new(BranchAndBound::new()),
                Box::new(SimulatedAnnealing::new(annealing.clone())?),
                Box::new(AntColony::new(aco.clone())?),
            ];
            for variant in GreedyVariant::ALL {
                all.push(Box::new(variant));
            }
            all
        }
    };
    Ok(solvers)
}

fn run_solve(
    items: PathBuf,
    capacity: Option<u64>,
    capacity_file: Option<PathBuf>,
    algorithm: Algorithm,
    annealing: AnnealingConfig,
    aco: AcoConfig,
) -> Result<(), String> {
    let instance = load_instance(items, capacity, capacity_file)?;
    println!(
        "Instance: {} ({} items, capacity {})",
        instance.name,
        instance.num_items(),
        instance.capacity
    );

    for solver in solvers_for(algorithm, &annealing, &aco)? {
        let start = Instant::now();
        let value = solver.solve(instance.capacity, &instance.items);
        let elapsed = start.elapsed().as_secs_f64();
        println!("{:<26} value = {:<10} time = {:.6}s", solver.name(), value, elapsed);
    }

    Ok(())
}

fn run_benchmark(
    dir: PathBuf,
    capacity_file: PathBuf,
    output: PathBuf,
    runs: usize,
    exhaustive_limit: usize,
    parallel: bool,
    max_size: Option<usize>,
) -> Result<(), String> {
    let mut instances = load_instances_from_dir(&dir, &capacity_file)?;
    if let Some(limit) = max_size {
        instances.retain(|i| i.num_items() <= limit);
    }
    if instances.is_empty() {
        return Err(format!("No instances found in {}", dir.display()));
    }
    println!("Loaded {} instances", instances.len());

    let config = BenchmarkConfig {
        num_runs: runs,
        exhaustive_limit,
        parallel,
        ..Default::default()
    };
    let mut benchmark = Benchmark::new(config);

    if parallel {
        benchmark.run_on_instances(&instances);
    } else {
        let bar = ProgressBar::new(instances.len() as u64);
        for instance in &instances {
            benchmark.run_full_benchmark(instance);
            bar.inc(1);
        }
        bar.finish();
    }

    std::fs::create_dir_all(&output).map_err(|e| format!("Cannot create output dir: {}", e))?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    benchmark.export_to_csv(output.join(format!("results_{}.csv", stamp)))?;
    benchmark.export_statistics_csv(output.join(format!("statistics_{}.csv", stamp)))?;
    benchmark.export_to_json(output.join(format!("results_{}.json", stamp)))?;

    println!("{}", benchmark.generate_report());
    println!("Results written to {}", output.display());

    Ok(())
}

fn run_generate(
    num_items: usize,
    capacity: u64,
    weight_range: (u64, u64),
    value_range: (u64, u64),
    seed: u64,
    items_out: PathBuf,
    capacity_out: PathBuf,
) -> Result<(), String> {
    if weight_range.0 > weight_range.1 || value_range.0 > value_range.1 {
        return Err("Empty weight or value range".to_string());
    }

    let instance = KnapsackInstance::generate(
        format!("generated_{}", num_items),
        num_items,
        capacity,
        weight_range,
        value_range,
        seed,
    );
    instance.write_csv_files(&items_out, &capacity_out)?;

    println!(
        "Wrote {} items to {} and capacity {} to {}",
        num_items,
        items_out.display(),
        capacity,
        capacity_out.display()
    );
    Ok(())
}

fn run_analyze(
    items: PathBuf,
    capacity: Option<u64>,
    capacity_file: Option<PathBuf>,
) -> Result<(), String> {
    let instance = load_instance(items, capacity, capacity_file)?;
    print!("{}", instance.statistics());
    Ok(())
}
