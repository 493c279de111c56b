use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use log::{error, info};
use rand::{Rng, SeedableRng, XorShiftRng};
use simplelog::{Config as LogConfig, LevelFilter, SimpleLogger};
use zip_trees::rank::RankSampler;
use zip_trees::zip_tree::{AncestorCounter, OptimizedZipSet, RecursiveZipSet, ZipSet};
use zip_trees::OrderedSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Experiment {
    /// Average low and high ancestor counts of spread search keys
    Ancestors,
    /// Average depth of the iterative, recursive and optimized variants
    Depth,
}

#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(name = "zip-trees")]
#[command(about = "Run randomized experiments over zip trees")]
struct Config {
    #[arg(value_enum)]
    experiment: Experiment,

    /// Number of keys inserted per trial
    #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u32).range(1..))]
    nodes: u32,

    /// Number of random trees built
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    trials: u32,

    /// Number of evenly spread search keys per tree
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(1..))]
    keys: u32,

    /// Highest rank an ancestor may have to be counted
    #[arg(long, default_value_t = 1)]
    threshold: u32,

    /// Seed for reproducible key orders and ranks
    #[arg(long)]
    seed: Option<u64>,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,
}

impl Config {
    fn validate(&self) -> Result<(), String> {
        if self.keys > self.nodes {
            return Err(String::from("--keys must not exceed --nodes"));
        }
        Ok(())
    }

    fn shuffle_rng(&self) -> XorShiftRng {
        match self.seed {
            Some(seed) => SeedableRng::from_seed([seed as u32, (seed >> 32) as u32, 1, 1]),
            None => rand::weak_rng(),
        }
    }

    fn sampler(&self, trial: u32) -> RankSampler {
        match self.seed {
            Some(seed) => RankSampler::from_seed(seed.wrapping_add(u64::from(trial))),
            None => RankSampler::new(),
        }
    }
}

fn fill<S: OrderedSet<u32>>(set: &mut S, keys: &[u32]) {
    for &key in keys {
        if let Err(err) = set.insert(key) {
            error!("failed to insert {}: {}", key, err);
        }
    }
}

// Averages the low and high ancestor counts of evenly spread search keys over random trees.
fn run_ancestors(config: &Config) {
    let mut rng = config.shuffle_rng();
    let mut keys = (0..config.nodes).collect::<Vec<u32>>();
    let targets = (1..=config.keys)
        .map(|i| (u64::from(i) * u64::from(config.nodes) / u64::from(config.keys + 1)) as u32)
        .collect::<Vec<u32>>();

    let mut low_total = 0usize;
    let mut high_total = 0usize;
    for trial in 0..config.trials {
        rng.shuffle(&mut keys);
        let mut counter = AncestorCounter::with_sampler(config.sampler(trial));
        counter.set_threshold(config.threshold);
        fill(&mut counter, &keys);

        for target in &targets {
            let count = counter.count_ancestors(target);
            low_total += count.low;
            high_total += count.high;
        }
    }

    let samples = f64::from(config.trials) * f64::from(config.keys);
    info!(
        "{} trials of {} nodes, threshold {}",
        config.trials, config.nodes, config.threshold,
    );
    info!("average low ancestors: {:.4}", low_total as f64 / samples);
    info!("average high ancestors: {:.4}", high_total as f64 / samples);
}

// Compares the average depth of the variants on identical insertion orders and rank sequences.
fn run_depth(config: &Config) {
    let mut rng = config.shuffle_rng();
    let mut keys = (0..config.nodes).collect::<Vec<u32>>();

    let mut totals = [0isize; 3];
    for trial in 0..config.trials {
        rng.shuffle(&mut keys);

        let mut baseline = ZipSet::with_sampler(config.sampler(trial));
        let mut recursive = RecursiveZipSet::with_sampler(config.sampler(trial));
        let mut optimized = OptimizedZipSet::with_sampler(config.sampler(trial));
        fill(&mut baseline, &keys);
        fill(&mut recursive, &keys);
        fill(&mut optimized, &keys);

        totals[0] += baseline.depth();
        totals[1] += recursive.depth();
        totals[2] += optimized.depth();
    }

    let trials = f64::from(config.trials);
    info!("{} trials of {} nodes", config.trials, config.nodes);
    info!("average depth, iterative: {:.3}", totals[0] as f64 / trials);
    info!("average depth, recursive: {:.3}", totals[1] as f64 / trials);
    info!("average depth, optimized: {:.3}", totals[2] as f64 / trials);
}

fn main() {
    let config = Config::parse();
    if let Err(message) = config.validate() {
        Config::command().error(ErrorKind::ValueValidation, message).exit();
    }

    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = SimpleLogger::init(level, LogConfig::default()) {
        eprintln!("failed to initialize logger: {}", err);
    }

    match config.experiment {
        Experiment::Ancestors => run_ancestors(&config),
        Experiment::Depth => run_depth(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Experiment};
    use clap::Parser;
    use std::iter;

    fn parse(args: &[&str]) -> Result<Config, String> {
        let config = Config::try_parse_from(iter::once("zip-trees").chain(args.iter().copied()))
            .map_err(|err| err.to_string())?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["depth"]).unwrap();
        assert_eq!(config.experiment, Experiment::Depth);
        assert_eq!(config.nodes, 10_000);
        assert_eq!(config.trials, 100);
        assert_eq!(config.keys, 9);
        assert_eq!(config.threshold, 1);
        assert_eq!(config.seed, None);
        assert!(!config.verbose);
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "ancestors", "--nodes", "500", "--trials", "3", "--threshold", "2", "--seed", "9",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(config.experiment, Experiment::Ancestors);
        assert_eq!(config.nodes, 500);
        assert_eq!(config.trials, 3);
        assert_eq!(config.threshold, 2);
        assert_eq!(config.seed, Some(9));
        assert!(config.verbose);
    }

    #[test]
    fn test_invalid_args() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["sort"]).is_err());
        assert!(parse(&["depth", "--nodes"]).is_err());
        assert!(parse(&["depth", "--nodes", "many"]).is_err());
        assert!(parse(&["depth", "--nodes", "0"]).is_err());
        assert!(parse(&["depth", "--trials", "0"]).is_err());
        assert!(parse(&["depth", "--nodes", "5", "--keys", "9"]).is_err());
        assert!(parse(&["depth", "--color"]).is_err());
    }
}
