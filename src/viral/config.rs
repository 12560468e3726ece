//! Viral GA configuration.
//!
//! [`ViralConfig`] holds every parameter of a run. All of them are fixed
//! once the run starts.

use crate::error::ViralError;

/// Configuration for the viral-infection GA.
///
/// Several fields are *divisors* rather than fractions: the engine works
/// with `floor(population / divisor)`.
///
/// # Defaults
///
/// ```
/// use u_viral::ViralConfig;
///
/// let config = ViralConfig::default();
/// assert_eq!(config.population_size, 500);
/// assert_eq!(config.max_generations, 300);
/// assert_eq!(config.max_population, 2000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_viral::ViralConfig;
///
/// let config = ViralConfig::default()
///     .with_population_size(200)
///     .with_virus_population_size(25)
///     .with_max_generations(100)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViralConfig {
    /// Population cap. Reaching it triggers truncation by a quarter.
    pub max_population: usize,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Parents drawn per generation: `floor(population / crossover_divisor)`.
    pub crossover_divisor: usize,

    /// Size of the randomly generated initial population.
    pub population_size: usize,

    /// Number of virus fragments. At least 2.
    pub virus_population_size: usize,

    /// Fragment length is `floor(N / fragment_length_divisor)`.
    pub fragment_length_divisor: usize,

    /// Chromosomes infected per generation:
    /// `floor(population / infection_divisor)`.
    pub infection_divisor: usize,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for ViralConfig {
    fn default() -> Self {
        Self {
            max_population: 2000,
            max_generations: 300,
            crossover_divisor: 5,
            population_size: 500,
            virus_population_size: 500 / 8,
            fragment_length_divisor: 8,
            infection_divisor: 8,
            seed: None,
        }
    }
}

impl ViralConfig {
    pub fn with_max_population(mut self, n: usize) -> Self {
        self.max_population = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_crossover_divisor(mut self, d: usize) -> Self {
        self.crossover_divisor = d;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_virus_population_size(mut self, n: usize) -> Self {
        self.virus_population_size = n;
        self
    }

    pub fn with_fragment_length_divisor(mut self, d: usize) -> Self {
        self.fragment_length_divisor = d;
        self
    }

    pub fn with_infection_divisor(mut self, d: usize) -> Self {
        self.infection_divisor = d;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick runs on small instances.
    ///
    /// - Population: 100 (cap 400), Generations: 50, Viruses: 12
    pub fn fast() -> Self {
        Self {
            max_population: 400,
            max_generations: 50,
            population_size: 100,
            virus_population_size: 12,
            ..Self::default()
        }
    }

    /// Preset trading run time for tour quality.
    ///
    /// - Population: 1000 (cap 4000), Generations: 600, Viruses: 125
    pub fn thorough() -> Self {
        Self {
            max_population: 4000,
            max_generations: 600,
            population_size: 1000,
            virus_population_size: 125,
            ..Self::default()
        }
    }

    /// Fragment length for an instance of `num_cities` cities.
    pub fn fragment_length(&self, num_cities: usize) -> usize {
        num_cities
            .checked_div(self.fragment_length_divisor)
            .unwrap_or(0)
    }

    /// Validates the configuration on its own.
    pub fn validate(&self) -> Result<(), ViralError> {
        if self.max_population == 0 {
            return Err(ViralError::InvalidConfig("max_population must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(ViralError::InvalidConfig("max_generations must be at least 1"));
        }
        if self.crossover_divisor == 0 {
            return Err(ViralError::InvalidConfig("crossover_divisor must be at least 1"));
        }
        if self.population_size == 0 {
            return Err(ViralError::InvalidConfig("population_size must be at least 1"));
        }
        // A lone fragment's slice is (0, infectivity), which no draw hits
        // once its infectivity drops to 1.
        if self.virus_population_size < 2 {
            return Err(ViralError::InvalidConfig(
                "virus_population_size must be at least 2",
            ));
        }
        if self.fragment_length_divisor == 0 {
            return Err(ViralError::InvalidConfig(
                "fragment_length_divisor must be at least 1",
            ));
        }
        if self.infection_divisor == 0 {
            return Err(ViralError::InvalidConfig("infection_divisor must be at least 1"));
        }
        Ok(())
    }

    /// Validates the configuration against an instance size.
    ///
    /// On top of [`validate`](Self::validate), the fragment length must lie
    /// strictly between 0 and `num_cities`.
    pub fn validate_for(&self, num_cities: usize) -> Result<(), ViralError> {
        self.validate()?;
        let length = self.fragment_length(num_cities);
        if length == 0 {
            return Err(ViralError::InvalidConfig(
                "fragment length is zero: fragment_length_divisor exceeds the city count",
            ));
        }
        if length >= num_cities {
            return Err(ViralError::InvalidConfig(
                "fragment length must be shorter than the tour",
            ));
        }
        Ok(())
    }
}
