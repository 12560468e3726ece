//! Viral GA generation loop.
//!
//! [`ViralEngine`] owns the run state (both populations, the hall of fame,
//! the oracle and the random generator) and advances it one generation per
//! [`step`](ViralEngine::step):
//!
//! infection → clone removal → crossover → hall of fame → re-sort.
//!
//! [`ViralRunner`] is the convenience entry point that seeds a generator from
//! the config and runs the whole budget.

use super::chromosome::Chromosome;
use super::config::ViralConfig;
use super::hall_of_fame::HallOfFame;
use super::operators::tail_swap_crossover;
use super::population::Population;
use super::roulette::RouletteWheel;
use super::virus_population::VirusPopulation;
use crate::error::ViralError;
use crate::oracle::DistanceOracle;
use crate::random::create_rng;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;
use tracing::{debug, info, trace};

/// Percent chance that a parent pair is crossed rather than one parent
/// being discarded.
pub const CROSSOVER_PERCENT: u32 = 80;

/// Spins allowed per parent draw before the draw is dropped.
pub const MAX_PARENT_SPINS: usize = 1_000;

/// Counters for one generation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based number of the generation just finished.
    pub generation: usize,

    /// Population size after the generation.
    pub population_size: usize,

    /// Hall-of-fame best fitness after the generation.
    pub best_fitness: Option<f64>,

    /// Chromosomes the selected virus infected.
    pub infections: usize,

    /// Infections that shortened the tour.
    pub improving_infections: usize,

    /// Fragments resampled after reaching zero infectivity.
    pub transductions: usize,

    /// Exact-fitness duplicates removed.
    pub clones_removed: usize,

    /// Children appended by crossover.
    pub children: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViralResult {
    /// Best legal tour found.
    pub best: Chromosome,

    /// Same as `best.fitness()`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Final hall of fame, best first.
    pub hall_of_fame: Vec<Chromosome>,

    /// Hall-of-fame best fitness at the start and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Run state of the viral GA.
pub struct ViralEngine<O, R = StdRng> {
    oracle: O,
    config: ViralConfig,
    rng: R,
    num_cities: usize,
    population: Population,
    viruses: VirusPopulation,
    hall: HallOfFame,
    generation: usize,
    fitness_history: Vec<f64>,
}

impl<O: DistanceOracle, R: Rng> ViralEngine<O, R> {
    /// Validates `config` against the instance and generates both
    /// populations.
    ///
    /// The hall of fame is seeded with the best initial chromosome after its
    /// endpoints are fixed, so it holds a legal tour from the start.
    pub fn new(oracle: O, config: ViralConfig, mut rng: R) -> Result<Self, ViralError> {
        let num_cities = oracle.num_cities();
        config.validate_for(num_cities)?;

        let mut population = Population::new(oracle.cities());
        population.generate(config.population_size, &oracle, &mut rng)?;

        let mut viruses = VirusPopulation::new(oracle.cities(), config.fragment_length_divisor);
        viruses.generate(config.virus_population_size, &mut rng)?;

        let mut hall = HallOfFame::new(num_cities);
        if let Some(best) = population.best() {
            let mut seed = best.clone();
            seed.fix_endpoints(num_cities, &oracle)?;
            hall.offer(&seed);
        }

        let fitness_history = hall.best_fitness().into_iter().collect();

        info!(
            cities = num_cities,
            population = population.len(),
            viruses = viruses.len(),
            fragment_length = viruses.fragment_length(),
            generations = config.max_generations,
            "viral GA initialized"
        );

        Ok(Self {
            oracle,
            config,
            rng,
            num_cities,
            population,
            viruses,
            hall,
            generation: 0,
            fitness_history,
        })
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn viruses(&self) -> &VirusPopulation {
        &self.viruses
    }

    pub fn hall_of_fame(&self) -> &HallOfFame {
        &self.hall
    }

    pub fn config(&self) -> &ViralConfig {
        &self.config
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.generation >= self.config.max_generations
    }

    /// Runs one generation.
    pub fn step(&mut self) -> Result<GenerationStats, ViralError> {
        let mut stats = GenerationStats::default();

        // 1-2. Infection
        self.infect(&mut stats)?;

        // 3. Clone removal
        self.population.decay_lifespans();
        self.population.sort_by_fitness();
        stats.clones_removed = self.population.remove_clones();

        // 4. Crossover
        stats.children = self.crossover()?;

        // 5. Hall of fame
        self.maintain_hall_of_fame()?;

        // 6. Re-sort and advance
        self.population.sort_by_fitness();
        self.generation += 1;

        let best = self.hall.best_fitness();
        if let Some(f) = best {
            self.fitness_history.push(f);
        }

        stats.generation = self.generation;
        stats.population_size = self.population.len();
        stats.best_fitness = best;

        debug!(
            generation = stats.generation,
            population = stats.population_size,
            best = ?stats.best_fitness,
            infections = stats.infections,
            improving = stats.improving_infections,
            transductions = stats.transductions,
            clones = stats.clones_removed,
            children = stats.children,
            "generation complete"
        );

        Ok(stats)
    }

    /// Runs the remaining generation budget.
    pub fn run(mut self) -> Result<ViralResult, ViralError> {
        while !self.is_finished() {
            self.step()?;
        }
        self.into_result()
    }

    /// Packages the current hall of fame as a result.
    pub fn into_result(self) -> Result<ViralResult, ViralError> {
        let best = self.hall.best().cloned().ok_or(ViralError::EmptyHallOfFame)?;
        info!(
            generations = self.generation,
            best_fitness = best.fitness(),
            "viral GA finished"
        );
        Ok(ViralResult {
            best_fitness: best.fitness(),
            best,
            generations: self.generation,
            hall_of_fame: self.hall.into_entries(),
            fitness_history: self.fitness_history,
        })
    }

    /// Selects one virus and lets it infect the first
    /// `floor(len / infection_divisor)` chromosomes in current order.
    fn infect(&mut self, stats: &mut GenerationStats) -> Result<(), ViralError> {
        let index = self.viruses.select(&mut self.rng)?;
        let Some(virus) = self.viruses.get_mut(index) else {
            return Err(ViralError::EmptyFragmentSelection { attempts: 0 });
        };

        let quota = self.population.len() / self.config.infection_divisor;
        for chromosome in self.population.chromosomes_mut().iter_mut().take(quota) {
            match virus.infect(chromosome, &self.oracle, &mut self.rng) {
                Ok(outcome) => {
                    stats.infections += 1;
                    stats.improving_infections += usize::from(outcome.improved);
                    stats.transductions += usize::from(outcome.transduced);
                }
                Err(ViralError::DegenerateRange { route_len, .. }) => {
                    trace!(route_len, "route too short to infect, skipped");
                }
                Err(err) => return Err(err),
            }
        }

        self.viruses.rerank();
        Ok(())
    }

    /// Draws `floor(len / crossover_divisor)` parents from the fitness
    /// wheel and pairs them off. Returns the number of children appended.
    fn crossover(&mut self) -> Result<usize, ViralError> {
        let total = self.population.total_fitness();
        self.population.compute_rank(total);

        let wheel = RouletteWheel::from_weights(self.population.iter().map(Chromosome::fitness));
        let draws = self.population.len() / self.config.crossover_divisor;
        let mut parents: VecDeque<usize> = (0..draws)
            .filter_map(|_| wheel.spin_until_hit(&mut self.rng, MAX_PARENT_SPINS))
            .collect();

        let mut children = Vec::new();
        while !parents.is_empty() {
            if self.rng.random_range(0..100) >= CROSSOVER_PERCENT {
                parents.pop_front();
                continue;
            }
            let (Some(a), Some(b)) = (parents.pop_front(), parents.pop_front()) else {
                trace!("parent pool exhausted mid-pass");
                break;
            };
            let (Some(pa), Some(pb)) = (self.population.get(a), self.population.get(b)) else {
                continue;
            };
            let (r1, r2) = tail_swap_crossover(pa.route(), pb.route(), &mut self.rng);
            children.push(Chromosome::new(r1, &self.oracle)?);
            children.push(Chromosome::new(r2, &self.oracle)?);
        }

        let produced = children.len();
        self.population.extend(children);
        Ok(produced)
    }

    /// Truncates an overgrown population, fixes tour endpoints, archives
    /// improvements and culls expired chromosomes.
    pub(crate) fn maintain_hall_of_fame(&mut self) -> Result<(), ViralError> {
        let cap = self.config.max_population;
        let len = self.population.len();
        if len >= cap {
            self.population.truncate(cap.saturating_sub(len / 4));
        }

        for chromosome in self.population.chromosomes_mut() {
            chromosome.fix_endpoints(self.num_cities, &self.oracle)?;
        }

        self.population.decay_lifespans();
        self.population.sort_by_fitness();

        for chromosome in self.population.iter() {
            self.hall.offer(chromosome);
        }
        self.population.cull_expired(cap);

        if self.hall.prune_illegal_best() {
            trace!("illegal tour dropped from hall of fame");
        }
        Ok(())
    }
}

/// Runs the viral GA to completion.
///
/// # Usage
///
/// ```
/// use u_viral::{EdgeListGraph, ViralConfig, ViralRunner};
///
/// let points: Vec<(f64, f64)> = (0..16)
///     .map(|i| ((i as f64).cos() * 10.0, (i as f64).sin() * 10.0))
///     .collect();
/// let graph = EdgeListGraph::from_coordinates(&points);
/// let config = ViralConfig::fast().with_max_generations(5).with_seed(42);
///
/// let result = ViralRunner::run(&graph, &config).unwrap();
/// assert!(result.best.is_legal(16) && result.best.is_permutation(16));
/// assert_eq!(result.generations, 5);
/// ```
pub struct ViralRunner;

impl ViralRunner {
    /// Runs with a generator seeded from `config.seed` (random when `None`).
    pub fn run<O: DistanceOracle + ?Sized>(
        oracle: &O,
        config: &ViralConfig,
    ) -> Result<ViralResult, ViralError> {
        Self::run_with_callback(oracle, config, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_generation` after every
    /// generation.
    pub fn run_with_callback<O, F>(
        oracle: &O,
        config: &ViralConfig,
        mut on_generation: F,
    ) -> Result<ViralResult, ViralError>
    where
        O: DistanceOracle + ?Sized,
        F: FnMut(&GenerationStats),
    {
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let mut engine = ViralEngine::new(oracle, config.clone(), rng)?;
        while !engine.is_finished() {
            let stats = engine.step()?;
            on_generation(&stats);
        }
        engine.into_result()
    }
}
