//! Configuration defaults

pub use crate::scenarios::elasticity::DEFAULT_ELASTICITY_EXPONENT;
pub use crate::scenarios::migration::{DEFAULT_MIGRATION_THRESHOLD, DEFAULT_RETAINED_FRACTION};

use super::{
    ElasticityConfig, FeesConfig, HooksConfig, MigrationConfig, OutputConfig, PopulationConfig,
    SimulationConfig, SweepConfig,
};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_NUM_TRADERS: i64 = 10_000;

pub const DEFAULT_MEAN_SWAP_SIZE: f64 = 50.0;
pub const DEFAULT_VOLATILITY_MIN: f64 = 0.01;
pub const DEFAULT_VOLATILITY_MAX: f64 = 0.1;

pub const DEFAULT_BASE_FEE: f64 = 0.003; // 0.3%
pub const DEFAULT_BASE_GAS_COST: f64 = 0.01;

pub const DEFAULT_SMALL_SWAP_THRESHOLD: f64 = 10.0;
pub const DEFAULT_SMALL_SWAP_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_VOLATILITY_THRESHOLD: f64 = 0.05;
pub const DEFAULT_VOLATILITY_MULTIPLIER: f64 = 0.5;

pub const DEFAULT_SWEEP_START: f64 = 0.5;
pub const DEFAULT_SWEEP_END: f64 = 2.0;
pub const DEFAULT_SWEEP_STEPS: i64 = 5;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_HISTOGRAM_BINS: i64 = 50;

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            num_traders: DEFAULT_NUM_TRADERS,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            mean_swap_size: DEFAULT_MEAN_SWAP_SIZE,
            volatility_min: DEFAULT_VOLATILITY_MIN,
            volatility_max: DEFAULT_VOLATILITY_MAX,
        }
    }
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self {
            base_fee: DEFAULT_BASE_FEE,
            base_gas_cost: DEFAULT_BASE_GAS_COST,
        }
    }
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            small_swap_threshold: DEFAULT_SMALL_SWAP_THRESHOLD,
            small_swap_multiplier: DEFAULT_SMALL_SWAP_MULTIPLIER,
            volatility_threshold: DEFAULT_VOLATILITY_THRESHOLD,
            volatility_multiplier: DEFAULT_VOLATILITY_MULTIPLIER,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_SWEEP_START,
            end: DEFAULT_SWEEP_END,
            steps: DEFAULT_SWEEP_STEPS,
            multipliers: None,
        }
    }
}

impl Default for ElasticityConfig {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_ELASTICITY_EXPONENT,
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MIGRATION_THRESHOLD,
            retained_fraction: DEFAULT_RETAINED_FRACTION,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            csv_enabled: true,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}
