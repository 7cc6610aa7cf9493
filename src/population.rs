//! Trader population
//!
//! The population is built once per run and only read afterwards. Generation
//! takes the random generator as an argument; the simulation driver owns the
//! seeded instance so two runs with the same seed see identical traders.

use rand::Rng;
use rand_distr::{Distribution, Exp, Uniform};
use serde::Serialize;

use crate::config::PopulationConfig;
use crate::error::{ensure_in_range, ensure_positive, ValidationError, ValidationResult};
use crate::types::Trader;

/// Immutable ordered collection of traders (at least one).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Population {
    traders: Vec<Trader>,
}

impl Population {
    /// Wrap traders that were produced elsewhere.
    pub fn new(traders: Vec<Trader>) -> ValidationResult<Self> {
        if traders.is_empty() {
            return Err(ValidationError::EmptyPopulation);
        }
        Ok(Self { traders })
    }

    /// Build from raw `(swap_size, volatility)` pairs, rejecting the first
    /// invalid trader with its index.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> ValidationResult<Self> {
        let traders = pairs
            .iter()
            .enumerate()
            .map(|(i, &(swap, vol))| Trader::new(swap, vol).map_err(|e| e.at_trader(i)))
            .collect::<ValidationResult<Vec<_>>>()?;
        Self::new(traders)
    }

    /// Draw `num_traders` traders: swap sizes from an exponential distribution
    /// with the configured mean, volatility uniform over the configured band.
    ///
    /// Swap sizes for the whole population are drawn before any volatility.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        num_traders: usize,
        config: &PopulationConfig,
    ) -> ValidationResult<Self> {
        if num_traders == 0 {
            return Err(ValidationError::EmptyPopulation);
        }
        config.validate()?;

        let swap_dist = Exp::new(1.0 / config.mean_swap_size).map_err(|_| {
            ValidationError::NotPositive {
                field: "population.mean_swap_size".to_string(),
                value: config.mean_swap_size,
            }
        })?;
        let vol_dist = Uniform::new_inclusive(config.volatility_min, config.volatility_max);

        let swap_sizes: Vec<f64> = (0..num_traders).map(|_| swap_dist.sample(rng)).collect();
        let volatilities: Vec<f64> = (0..num_traders).map(|_| vol_dist.sample(rng)).collect();

        let pairs: Vec<(f64, f64)> = swap_sizes.into_iter().zip(volatilities).collect();
        Self::from_pairs(&pairs)
    }

    pub fn traders(&self) -> &[Trader] {
        &self.traders
    }

    pub fn len(&self) -> usize {
        self.traders.len()
    }

    /// Always false for a constructed population.
    pub fn is_empty(&self) -> bool {
        self.traders.is_empty()
    }

    pub fn swap_sizes(&self) -> Vec<f64> {
        self.traders.iter().map(Trader::swap_size).collect()
    }

    pub fn volatilities(&self) -> Vec<f64> {
        self.traders.iter().map(Trader::volatility).collect()
    }

    /// Largest swap; scenario costs grow with swap size.
    pub fn max_swap_size(&self) -> f64 {
        self.traders
            .iter()
            .map(Trader::swap_size)
            .fold(0.0, f64::max)
    }
}

impl PopulationConfig {
    pub fn validate(&self) -> ValidationResult<()> {
        ensure_positive("population.mean_swap_size", self.mean_swap_size)?;
        ensure_in_range("population.volatility_min", self.volatility_min, 0.0, 1.0)?;
        ensure_in_range("population.volatility_max", self.volatility_max, 0.0, 1.0)?;
        if self.volatility_min > self.volatility_max {
            return Err(ValidationError::Inverted {
                field: "population.volatility_min".to_string(),
                value: self.volatility_min,
                limit_field: "population.volatility_max".to_string(),
                limit: self.volatility_max,
            });
        }
        Ok(())
    }
}
