//! The chromosome population.

use super::chromosome::Chromosome;
use crate::error::ViralError;
use crate::oracle::{CityId, DistanceOracle};
use crate::random::shuffle;
use rand::Rng;

/// Fitness-ordered collection of tours.
///
/// Besides the chromosomes it keeps the working list of city ids that random
/// permutations are shuffled from.
#[derive(Debug, Clone)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    cities: Vec<CityId>,
}

impl Population {
    /// An empty population over the given cities.
    pub fn new(cities: Vec<CityId>) -> Self {
        Self {
            chromosomes: Vec::new(),
            cities,
        }
    }

    /// Appends `size` random permutations, then sorts by fitness.
    pub fn generate<O: DistanceOracle + ?Sized, R: Rng>(
        &mut self,
        size: usize,
        oracle: &O,
        rng: &mut R,
    ) -> Result<(), ViralError> {
        self.chromosomes.reserve(size);
        for _ in 0..size {
            shuffle(&mut self.cities, rng);
            let route = self.cities.clone();
            self.chromosomes.push(Chromosome::new(route, oracle)?);
        }
        self.sort_by_fitness();
        Ok(())
    }

    /// Stable ascending sort; equal fitness keeps insertion order.
    pub fn sort_by_fitness(&mut self) {
        self.chromosomes.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
    }

    /// Assigns `rank = 100 - fitness / total_fitness` to every chromosome.
    ///
    /// This is a weight, not a probability. A non-positive total assigns
    /// every chromosome a rank of 100.
    pub fn compute_rank(&mut self, total_fitness: f64) {
        for c in &mut self.chromosomes {
            let share = if total_fitness > 0.0 {
                c.fitness() / total_fitness
            } else {
                0.0
            };
            c.set_rank(100.0 - share);
        }
    }

    pub fn total_fitness(&self) -> f64 {
        self.chromosomes.iter().map(Chromosome::fitness).sum()
    }

    pub fn decay_lifespans(&mut self) {
        for c in &mut self.chromosomes {
            c.decay_lifespan();
        }
    }

    /// Drops every chromosome whose fitness equals its predecessor's.
    ///
    /// Single pass in current order; only meaningful right after a sort.
    /// Returns how many were removed.
    pub fn remove_clones(&mut self) -> usize {
        let before = self.chromosomes.len();
        self.chromosomes
            .dedup_by(|current, previous| current.fitness() == previous.fitness());
        before - self.chromosomes.len()
    }

    /// Removes expired chromosomes (lifespan <= 0), walking in order, but
    /// only while more than `cap` remain. Returns how many were removed.
    pub fn cull_expired(&mut self, cap: usize) -> usize {
        let mut len = self.chromosomes.len();
        let before = len;
        self.chromosomes.retain(|c| {
            if c.lifespan() <= 0 && len > cap {
                len -= 1;
                false
            } else {
                true
            }
        });
        before - len
    }

    /// Keeps the first `len` chromosomes.
    pub fn truncate(&mut self, len: usize) {
        self.chromosomes.truncate(len);
    }

    pub fn push(&mut self, chromosome: Chromosome) {
        self.chromosomes.push(chromosome);
    }

    pub fn extend<I: IntoIterator<Item = Chromosome>>(&mut self, chromosomes: I) {
        self.chromosomes.extend(chromosomes);
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    pub fn best(&self) -> Option<&Chromosome> {
        self.chromosomes.first()
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn chromosomes_mut(&mut self) -> &mut [Chromosome] {
        &mut self.chromosomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }
}
