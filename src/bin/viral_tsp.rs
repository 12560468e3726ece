//! Console front end: solve an edge-list instance and print the best tour.
//!
//! ```bash
//! cargo run --features cli --bin viral-tsp -- graph.txt --generations 300 --seed 42
//! RUST_LOG=u_viral=debug cargo run --features cli --bin viral-tsp -- graph.txt
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_viral::{EdgeListGraph, ViralConfig, ViralRunner};

/// Viral-infection genetic algorithm for the traveling salesman problem.
#[derive(Debug, Parser)]
#[command(name = "viral-tsp", version)]
struct Cli {
    /// Edge-list file (`p`/`e` lines).
    graph: PathBuf,

    /// Population cap.
    #[arg(long, default_value_t = 2000)]
    max_population: usize,

    /// Number of generations.
    #[arg(long, default_value_t = 300)]
    generations: usize,

    /// One parent is drawn per this many chromosomes.
    #[arg(long, default_value_t = 5)]
    crossover_divisor: usize,

    /// Initial population size.
    #[arg(long, default_value_t = 500)]
    population: usize,

    /// Number of virus fragments.
    #[arg(long, default_value_t = 62)]
    viruses: usize,

    /// Fragment length is the city count divided by this.
    #[arg(long, default_value_t = 8)]
    fragment_divisor: usize,

    /// One chromosome is infected per this many.
    #[arg(long, default_value_t = 8)]
    infection_divisor: usize,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> ViralConfig {
        let config = ViralConfig::default()
            .with_max_population(self.max_population)
            .with_max_generations(self.generations)
            .with_crossover_divisor(self.crossover_divisor)
            .with_population_size(self.population)
            .with_virus_population_size(self.viruses)
            .with_fragment_length_divisor(self.fragment_divisor)
            .with_infection_divisor(self.infection_divisor);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| format!("tracing init failed: {e}"))?;

    let cli = Cli::parse();
    let text = std::fs::read_to_string(&cli.graph)?;
    let graph = EdgeListGraph::parse(&text)?;
    info!(path = %cli.graph.display(), edges = graph.num_edges(), "graph loaded");

    let started = std::time::Instant::now();
    let result = ViralRunner::run(&graph, &cli.config())?;

    println!("HALL OF FAME");
    println!("route cost: {}", result.best_fitness);
    let route: Vec<String> = result.best.route().iter().map(ToString::to_string).collect();
    println!("route: {}", route.join(" "));
    println!("elapsed: {} ms", started.elapsed().as_millis());
    Ok(())
}
