//! Virus fragments and the infection operator.
//!
//! A fragment is a short sub-tour. Infecting a chromosome writes the
//! fragment over a random window of the route and refills the rest of the
//! route with the chromosome's own cities, skipping those the fragment
//! already placed, then with any cities the route was missing. Unlike the
//! tail-swap crossover this repairs the route: a full-length tour with
//! duplicates comes out as a permutation again.
//!
//! The fragment keeps score: every infection that shortens the tour bumps
//! its infectivity, every other infection lowers it. When infectivity hits
//! exactly zero the fragment is rewritten from the tour it just infected
//! (transduction).

use super::chromosome::Chromosome;
use super::roulette::random_range;
use crate::error::ViralError;
use crate::oracle::{CityId, DistanceOracle};
use rand::Rng;
use std::collections::HashSet;
use tracing::trace;

/// Infectivity a fragment starts with and is reset to on transduction.
pub const INITIAL_INFECTIVITY: i32 = 5;

/// What a single infection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Infection {
    /// The infected tour got strictly shorter.
    pub improved: bool,
    /// The fragment was resampled afterwards.
    pub transduced: bool,
}

/// A short sub-tour with a running success counter.
#[derive(Debug, Clone, PartialEq)]
pub struct VirusFragment {
    cities: Vec<CityId>,
    infectivity: i32,
    rank: f64,
}

impl VirusFragment {
    pub fn new(cities: Vec<CityId>) -> Self {
        Self {
            cities,
            infectivity: INITIAL_INFECTIVITY,
            rank: 0.0,
        }
    }

    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Whether the fragment carries any cities to inject.
    pub fn is_populated(&self) -> bool {
        !self.cities.is_empty()
    }

    pub fn infectivity(&self) -> i32 {
        self.infectivity
    }

    pub fn set_infectivity(&mut self, infectivity: i32) {
        self.infectivity = infectivity;
    }

    /// Share of the population's total infectivity.
    pub fn rank(&self) -> f64 {
        self.rank
    }

    pub fn set_rank(&mut self, rank: f64) {
        self.rank = rank;
    }

    /// Infects `chromosome` in place.
    ///
    /// Errors before touching the chromosome if its route is too short for
    /// the fragment, or if the infected route walks an unresolvable edge.
    pub fn infect<O: DistanceOracle + ?Sized, R: Rng>(
        &mut self,
        chromosome: &mut Chromosome,
        oracle: &O,
        rng: &mut R,
    ) -> Result<Infection, ViralError> {
        let (lo, hi) = random_range(chromosome.route().len(), self.cities.len(), rng)?;
        let cities = oracle.cities();
        let infected = splice(chromosome.route(), &self.cities, lo, hi, &cities);

        let old_fitness = chromosome.fitness();
        chromosome.set_route(infected, oracle)?;
        let improved = chromosome.fitness() < old_fitness;

        if improved {
            self.infectivity += 1;
        } else {
            self.infectivity -= 1;
        }

        let transduced = self.infectivity == 0;
        if transduced {
            self.transduce(chromosome, rng);
        }

        Ok(Infection {
            improved,
            transduced,
        })
    }

    /// Rewrites the fragment from an equal-length window of `chromosome` and
    /// resets infectivity.
    ///
    /// If the route has no window of the fragment's length the cities are
    /// kept and only infectivity is reset.
    pub fn transduce<R: Rng>(&mut self, chromosome: &Chromosome, rng: &mut R) {
        let route = chromosome.route();
        match random_range(route.len(), self.cities.len(), rng) {
            Ok((lo, hi)) => {
                self.cities = route[lo..hi].to_vec();
                trace!(lo, hi, "virus transduced");
            }
            Err(err) => trace!(%err, "transduction kept the old fragment"),
        }
        self.infectivity = INITIAL_INFECTIVITY;
    }
}

/// Writes `fragment` over `route[lo..hi]` and fills every other slot, in
/// order, first with the route's cities not yet placed and then with the
/// cities of `cities` the route lacks.
///
/// A route as long as the city set always comes out as a permutation. Only
/// a route longer than the city set can run out of cities; its leftover
/// slots are dropped.
fn splice(
    route: &[CityId],
    fragment: &[CityId],
    lo: usize,
    hi: usize,
    cities: &[CityId],
) -> Vec<CityId> {
    let mut slots: Vec<Option<CityId>> = vec![None; route.len()];
    let mut placed: HashSet<CityId> = HashSet::with_capacity(route.len());

    for (slot, &city) in slots[lo..hi].iter_mut().zip(fragment) {
        if placed.insert(city) {
            *slot = Some(city);
        }
    }

    let mut refill = route.iter().chain(cities).copied();
    for slot in slots.iter_mut().filter(|s| s.is_none()) {
        match refill.find(|&city| placed.insert(city)) {
            Some(city) => *slot = Some(city),
            None => break,
        }
    }

    slots.into_iter().flatten().collect()
}
