//! Genetic algorithm with viral infection for the traveling salesman problem.
//!
//! The solver evolves a population of city-id routes with roulette
//! selection and a tail-swap crossover, and perturbs the best routes with
//! short sub-tours taken from a co-evolving virus population. The best legal
//! tours (starting at city 1, ending at city `N`) are kept in a bounded
//! hall of fame.
//!
//! - [`viral`]: Chromosomes, populations, viruses and the generation loop
//! - [`oracle`]: The [`DistanceOracle`] lookup the solver runs against,
//!   plus an in-memory [`EdgeListGraph`]
//! - [`random`]: Seeded generator helpers
//!
//! # Architecture
//!
//! The crate knows nothing about graph storage. Anything that can enumerate
//! cities and answer directed distance lookups can be solved; the reverse
//! direction fallback for missing records lives in the solver, not the
//! oracle.
//!
//! ```
//! use u_viral::{EdgeListGraph, ViralConfig, ViralRunner};
//!
//! let graph = EdgeListGraph::parse(
//!     "p tsp 9 0\n\
//!      e 1 2 1\n e 1 3 2\n e 1 4 3\n e 1 5 4\n e 1 6 5\n e 1 7 6\n e 1 8 7\n e 1 9 8\n\
//!      e 2 3 1\n e 2 4 2\n e 2 5 3\n e 2 6 4\n e 2 7 5\n e 2 8 6\n e 2 9 7\n\
//!      e 3 4 1\n e 3 5 2\n e 3 6 3\n e 3 7 4\n e 3 8 5\n e 3 9 6\n\
//!      e 4 5 1\n e 4 6 2\n e 4 7 3\n e 4 8 4\n e 4 9 5\n\
//!      e 5 6 1\n e 5 7 2\n e 5 8 3\n e 5 9 4\n\
//!      e 6 7 1\n e 6 8 2\n e 6 9 3\n\
//!      e 7 8 1\n e 7 9 2\n\
//!      e 8 9 1\n",
//! )
//! .unwrap();
//!
//! let config = ViralConfig::fast().with_max_generations(10).with_seed(42);
//! let result = ViralRunner::run(&graph, &config).unwrap();
//! assert_eq!(result.best.route().first(), Some(&1));
//! assert_eq!(result.best.route().last(), Some(&9));
//! assert!(result.best.is_permutation(9));
//! ```

pub mod error;
pub mod oracle;
pub mod random;
pub mod viral;

pub use error::ViralError;
pub use oracle::{CityId, DistanceOracle, EdgeListGraph};
pub use viral::{
    Chromosome, GenerationStats, HallOfFame, Population, ViralConfig, ViralEngine, ViralResult,
    ViralRunner, VirusFragment, VirusPopulation,
};
