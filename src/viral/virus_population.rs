//! The virus population.

use super::roulette::{random_range, RouletteWheel};
use super::virus::VirusFragment;
use crate::error::ViralError;
use crate::oracle::CityId;
use crate::random::shuffle;
use rand::Rng;

/// Maximum spins [`VirusPopulation::select`] tries before giving up.
pub const MAX_SELECTION_SPINS: usize = 10_000;

/// Fixed-size set of fragments, kept in ascending infectivity order.
#[derive(Debug, Clone)]
pub struct VirusPopulation {
    fragments: Vec<VirusFragment>,
    cities: Vec<CityId>,
    length_divisor: usize,
}

impl VirusPopulation {
    /// An empty population whose fragments will be
    /// `cities.len() / length_divisor` long.
    pub fn new(cities: Vec<CityId>, length_divisor: usize) -> Self {
        Self {
            fragments: Vec::new(),
            cities,
            length_divisor,
        }
    }

    /// Length every generated fragment has.
    pub fn fragment_length(&self) -> usize {
        self.cities.len().checked_div(self.length_divisor).unwrap_or(0)
    }

    /// Appends `size` fragments cut from fresh random permutations, then
    /// ranks and sorts.
    pub fn generate<R: Rng>(&mut self, size: usize, rng: &mut R) -> Result<(), ViralError> {
        let length = self.fragment_length();
        self.fragments.reserve(size);
        for _ in 0..size {
            shuffle(&mut self.cities, rng);
            let (lo, hi) = random_range(self.cities.len(), length, rng)?;
            self.fragments
                .push(VirusFragment::new(self.cities[lo..hi].to_vec()));
        }
        self.rerank();
        Ok(())
    }

    /// Sets `rank = infectivity / total infectivity` and re-sorts ascending
    /// by infectivity (stable).
    pub fn rerank(&mut self) {
        let total: i32 = self.fragments.iter().map(VirusFragment::infectivity).sum();
        for v in &mut self.fragments {
            let rank = if total != 0 {
                f64::from(v.infectivity()) / f64::from(total)
            } else {
                0.0
            };
            v.set_rank(rank);
        }
        self.fragments.sort_by_key(VirusFragment::infectivity);
    }

    /// The wheel of infectivity-wide slices, in current order.
    pub fn wheel(&self) -> RouletteWheel {
        RouletteWheel::from_weights(self.fragments.iter().map(|v| f64::from(v.infectivity())))
    }

    /// One roulette spin. `None` when the draw hits no slice.
    pub fn select_by_roulette<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        self.wheel().spin(rng)
    }

    /// Spins until a populated fragment comes up.
    pub fn select<R: Rng>(&self, rng: &mut R) -> Result<usize, ViralError> {
        let wheel = self.wheel();
        (0..MAX_SELECTION_SPINS)
            .find_map(|_| wheel.spin(rng).filter(|&i| self.fragments[i].is_populated()))
            .ok_or(ViralError::EmptyFragmentSelection {
                attempts: MAX_SELECTION_SPINS,
            })
    }

    pub fn push(&mut self, fragment: VirusFragment) {
        self.fragments.push(fragment);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VirusFragment> {
        self.fragments.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut VirusFragment> {
        self.fragments.get_mut(index)
    }

    pub fn fragments(&self) -> &[VirusFragment] {
        &self.fragments
    }
}
