//! Bounded archive of the best legal tours seen so far.

use super::chromosome::Chromosome;

/// How many tours the hall keeps.
pub const HALL_OF_FAME_CAPACITY: usize = 10;

/// Best-ever tours, best first.
///
/// Entries are owned clones; later changes to the population never reach
/// them. Only complete tours of `1..=num_cities` that start at city 1 and
/// end at city `num_cities` are admitted.
#[derive(Debug, Clone)]
pub struct HallOfFame {
    num_cities: usize,
    entries: Vec<Chromosome>,
}

impl HallOfFame {
    pub fn new(num_cities: usize) -> Self {
        Self {
            num_cities,
            entries: Vec::with_capacity(HALL_OF_FAME_CAPACITY),
        }
    }

    pub fn best(&self) -> Option<&Chromosome> {
        self.entries.first()
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.best().map(Chromosome::fitness)
    }

    /// Admits `candidate` at the front if it is a legal permutation and
    /// beats the current best.
    ///
    /// An empty hall admits any legal permutation. Overflow drops the worst
    /// entry. Returns whether the candidate was admitted.
    pub fn offer(&mut self, candidate: &Chromosome) -> bool {
        if !self.admissible(candidate) {
            return false;
        }
        let beats = self
            .best_fitness()
            .map_or(true, |best| candidate.fitness() < best);
        if beats {
            self.entries.insert(0, candidate.clone());
            self.entries.truncate(HALL_OF_FAME_CAPACITY);
        }
        beats
    }

    fn admissible(&self, candidate: &Chromosome) -> bool {
        candidate.is_legal(self.num_cities) && candidate.is_permutation(self.num_cities)
    }

    /// Discards the best entry if it is not a legal permutation. Returns
    /// whether an entry was discarded.
    pub fn prune_illegal_best(&mut self) -> bool {
        match self.entries.first() {
            Some(best) if !self.admissible(best) => {
                self.entries.remove(0);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Chromosome] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Chromosome> {
        self.entries
    }
}
