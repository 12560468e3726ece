//! Genetic algorithm with viral infection.
//!
//! A standard generational GA over city-id routes, extended with a second
//! population of short sub-tours ("viruses") that act as a local-search
//! operator. Each generation one virus is picked by roulette and written
//! into the best part of the population; viruses that keep producing
//! shorter tours gain infectivity, and those that fail are eventually
//! rewritten from the tours they infected.
//!
//! # Key Types
//!
//! - [`Chromosome`]: A route with cached fitness, rank and lifespan
//! - [`Population`]: Fitness-ordered chromosomes
//! - [`VirusFragment`] / [`VirusPopulation`]: The infection operator and its pool
//! - [`HallOfFame`]: Best legal tours seen so far
//! - [`ViralConfig`]: Run parameters
//! - [`ViralEngine`]: Run state, one [`step`](ViralEngine::step) per generation
//! - [`ViralRunner`]: Runs a whole budget and returns a [`ViralResult`]
//!
//! # Submodules
//!
//! - [`operators`]: Tail-swap crossover
//! - [`roulette`]: Cumulative-slice wheel and range sampling
//!
//! # References
//!
//! - Kubota, Shimojima & Fukuda (1996), "Virus-Evolutionary Genetic Algorithm"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod chromosome;
mod config;
mod hall_of_fame;
pub mod operators;
mod population;
pub mod roulette;
mod runner;
mod virus;
mod virus_population;

pub use chromosome::{route_length, Chromosome, INITIAL_LIFESPAN};
pub use config::ViralConfig;
pub use hall_of_fame::{HallOfFame, HALL_OF_FAME_CAPACITY};
pub use population::Population;
pub use runner::{GenerationStats, ViralEngine, ViralResult, ViralRunner};
pub use virus::{Infection, VirusFragment, INITIAL_INFECTIVITY};
pub use virus_population::VirusPopulation;
