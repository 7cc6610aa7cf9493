//! Configuration management for HookSim
//!
//! Loads from YAML files + environment variables via .env

mod types;

pub use types::*;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ensure_count, ensure_non_negative, ensure_positive, ValidationResult};
use crate::scenarios::{ElasticityModel, MigrationModel};
use crate::types::FeeMultiplierSweep;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub population: PopulationConfig,
    pub fees: FeesConfig,
    pub hooks: HooksConfig,
    pub sweep: SweepConfig,
    pub elasticity: ElasticityConfig,
    pub migration: MigrationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed of the population generator
    pub seed: u64,
    /// Number of simulated traders (must be > 0)
    pub num_traders: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Mean of the exponential swap size distribution
    pub mean_swap_size: f64,
    /// Lower bound of the uniform volatility band
    pub volatility_min: f64,
    /// Upper bound of the uniform volatility band
    pub volatility_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeesConfig {
    /// Base pool fee (0.003 = 0.3%)
    pub base_fee: f64,
    /// Gas cost paid on every swap regardless of size
    pub base_gas_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Swaps strictly below this size pay the penalty
    pub small_swap_threshold: f64,
    /// Fee multiplier of the small swap penalty
    pub small_swap_multiplier: f64,
    /// Volatility strictly above this level earns the reward
    pub volatility_threshold: f64,
    /// Fee multiplier of the volatility reward
    pub volatility_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// First multiplier of the evenly spaced sweep
    pub start: f64,
    /// Last multiplier of the evenly spaced sweep
    pub end: f64,
    /// Number of multipliers
    pub steps: i64,
    /// Explicit multipliers; overrides start/end/steps when set
    #[serde(default)]
    pub multipliers: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticityConfig {
    /// Power-law exponent applied to the fee multiplier
    pub exponent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Multipliers strictly above this trigger migration
    pub threshold: f64,
    /// Share of volume that stays once migration triggers
    pub retained_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Data directory
    pub data_dir: String,
    /// Enable CSV/JSON export
    pub csv_enabled: bool,
    /// Histogram bins per distribution
    pub histogram_bins: i64,
}

impl AppConfig {
    /// Load configuration from `config/default`, `config/local` and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default files when given
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        Self::load_layers(path, Self::environment())
    }

    /// Environment overrides (HOOKSIM__SECTION__KEY, lists comma-separated)
    fn environment() -> Environment {
        Environment::with_prefix("HOOKSIM")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("sweep.multipliers")
    }

    fn load_layers(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            // Simulation defaults
            .set_default("simulation.seed", DEFAULT_SEED)?
            .set_default("simulation.num_traders", DEFAULT_NUM_TRADERS)?
            // Population defaults
            .set_default("population.mean_swap_size", DEFAULT_MEAN_SWAP_SIZE)?
            .set_default("population.volatility_min", DEFAULT_VOLATILITY_MIN)?
            .set_default("population.volatility_max", DEFAULT_VOLATILITY_MAX)?
            // Fee defaults
            .set_default("fees.base_fee", DEFAULT_BASE_FEE)?
            .set_default("fees.base_gas_cost", DEFAULT_BASE_GAS_COST)?
            // Hook rule defaults
            .set_default("hooks.small_swap_threshold", DEFAULT_SMALL_SWAP_THRESHOLD)?
            .set_default("hooks.small_swap_multiplier", DEFAULT_SMALL_SWAP_MULTIPLIER)?
            .set_default("hooks.volatility_threshold", DEFAULT_VOLATILITY_THRESHOLD)?
            .set_default("hooks.volatility_multiplier", DEFAULT_VOLATILITY_MULTIPLIER)?
            // Sweep defaults
            .set_default("sweep.start", DEFAULT_SWEEP_START)?
            .set_default("sweep.end", DEFAULT_SWEEP_END)?
            .set_default("sweep.steps", DEFAULT_SWEEP_STEPS)?
            // Demand model defaults
            .set_default("elasticity.exponent", DEFAULT_ELASTICITY_EXPONENT)?
            .set_default("migration.threshold", DEFAULT_MIGRATION_THRESHOLD)?
            .set_default("migration.retained_fraction", DEFAULT_RETAINED_FRACTION)?
            // Output defaults
            .set_default("output.data_dir", DEFAULT_DATA_DIR)?
            .set_default("output.csv_enabled", true)?
            .set_default("output.histogram_bins", DEFAULT_HISTOGRAM_BINS)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false)),
        };

        let config = builder
            .add_source(env)
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(app_config)
    }

    /// Check every parameter before anything is computed
    pub fn validate(&self) -> ValidationResult<()> {
        self.num_traders()?;
        self.validate_model()
    }

    /// Everything except `simulation.num_traders`, which a supplied
    /// population replaces
    pub fn validate_model(&self) -> ValidationResult<()> {
        self.population.validate()?;
        ensure_positive("fees.base_fee", self.fees.base_fee)?;
        ensure_non_negative("fees.base_gas_cost", self.fees.base_gas_cost)?;
        self.hooks.validate()?;
        self.sweep()?;
        ElasticityModel::from_config(&self.elasticity)?;
        MigrationModel::from_config(&self.migration)?;
        self.histogram_bins()?;
        Ok(())
    }

    pub fn num_traders(&self) -> ValidationResult<usize> {
        ensure_count("simulation.num_traders", self.simulation.num_traders)
    }

    pub fn histogram_bins(&self) -> ValidationResult<usize> {
        ensure_count("output.histogram_bins", self.output.histogram_bins)
    }

    /// Fee multipliers of the elasticity and migration scenarios
    pub fn sweep(&self) -> ValidationResult<FeeMultiplierSweep> {
        match &self.sweep.multipliers {
            Some(list) => FeeMultiplierSweep::new(list.clone()),
            None => {
                let steps = ensure_count("sweep.steps", self.sweep.steps)?;
                FeeMultiplierSweep::linspace(self.sweep.start, self.sweep.end, steps)
            }
        }
    }

    /// Generate a one-line digest of the config for logging
    pub fn digest(&self) -> String {
        format!(
            "seed={} traders={} base_fee={} gas={} sweep={} elasticity={} migration>{} data_dir={}",
            self.simulation.seed,
            self.simulation.num_traders,
            self.fees.base_fee,
            self.fees.base_gas_cost,
            match &self.sweep.multipliers {
                Some(list) => format!("{:?}", list),
                None => format!(
                    "{}..{}x{}",
                    self.sweep.start, self.sweep.end, self.sweep.steps
                ),
            },
            self.elasticity.exponent,
            self.migration.threshold,
            self.output.data_dir,
        )
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_traders().unwrap(), 10_000);
        assert_eq!(config.sweep().unwrap(), FeeMultiplierSweep::default());
    }

    #[test]
    fn test_explicit_multipliers_override_linspace() {
        let mut config = AppConfig::default();
        config.sweep.multipliers = Some(vec![1.0, 3.0]);
        assert_eq!(config.sweep().unwrap().multipliers(), &[1.0, 3.0]);
    }

    #[test]
    fn test_validation_names_field() {
        let mut config = AppConfig::default();
        config.fees.base_fee = 0.0;
        assert_eq!(
            config.validate(),
            Err(ValidationError::NotPositive {
                field: "fees.base_fee".into(),
                value: 0.0
            })
        );

        let mut config = AppConfig::default();
        config.fees.base_gas_cost = -0.01;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Negative { .. })
        ));

        let mut config = AppConfig::default();
        config.simulation.num_traders = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NotPositiveCount { .. })
        ));

        let mut config = AppConfig::default();
        config.sweep.multipliers = Some(vec![0.5, -2.0]);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.migration.threshold = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "simulation:\n  seed: 7\n  num_traders: 250\nfees:\n  base_fee: 0.005\nsweep:\n  multipliers: [1.0, 1.5, 2.5]\n"
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.num_traders, 250);
        assert_eq!(config.fees.base_fee, 0.005);
        // Untouched keys keep their defaults
        assert_eq!(config.fees.base_gas_cost, DEFAULT_BASE_GAS_COST);
        assert_eq!(config.sweep().unwrap().multipliers(), &[1.0, 1.5, 2.5]);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        writeln!(file, "simulation:\n  seed: 7\n  num_traders: 250\n").unwrap();

        let vars: ::config::Map<String, String> = [
            ("HOOKSIM__SIMULATION__SEED", "9"),
            ("HOOKSIM__FEES__BASE_GAS_COST", "0.02"),
            ("HOOKSIM__SWEEP__MULTIPLIERS", "0.5,1.0,3.0"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config =
            AppConfig::load_layers(Some(file.path()), AppConfig::environment().source(Some(vars)))
                .unwrap();
        assert_eq!(config.simulation.seed, 9);
        assert_eq!(config.simulation.num_traders, 250);
        assert_eq!(config.fees.base_gas_cost, 0.02);
        assert_eq!(config.sweep.multipliers, Some(vec![0.5, 1.0, 3.0]));
    }

    #[test]
    fn test_digest_mentions_seed() {
        let config = AppConfig::default();
        assert!(config.digest().contains("seed=42"));
        assert_eq!(config.to_string(), config.digest());
    }
}
