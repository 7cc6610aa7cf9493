//! Liquidity migration
//!
//! Once the fee multiplier exceeds the threshold, a fixed share of volume
//! leaves the pool for every trader at once. The retained fraction is a step
//! function of the multiplier: exactly at the threshold nothing migrates.

use crate::config::MigrationConfig;
use crate::error::{ensure_positive, ValidationError, ValidationResult};

use super::DemandModel;

pub const DEFAULT_MIGRATION_THRESHOLD: f64 = 1.5;
pub const DEFAULT_RETAINED_FRACTION: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MigrationModel {
    threshold: f64,
    retained_fraction: f64,
}

impl MigrationModel {
    pub fn new(threshold: f64, retained_fraction: f64) -> ValidationResult<Self> {
        let threshold = ensure_positive("migration.threshold", threshold)?;
        let retained_fraction = ensure_positive("migration.retained_fraction", retained_fraction)?;
        if retained_fraction > 1.0 {
            return Err(ValidationError::OutOfRange {
                field: "migration.retained_fraction".to_string(),
                value: retained_fraction,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(Self {
            threshold,
            retained_fraction,
        })
    }

    pub fn from_config(config: &MigrationConfig) -> ValidationResult<Self> {
        Self::new(config.threshold, config.retained_fraction)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Share of each swap still routed through the pool at `fee_multiplier`.
    pub fn retained(&self, fee_multiplier: f64) -> f64 {
        if fee_multiplier > self.threshold {
            self.retained_fraction
        } else {
            1.0
        }
    }
}

impl Default for MigrationModel {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MIGRATION_THRESHOLD,
            retained_fraction: DEFAULT_RETAINED_FRACTION,
        }
    }
}

impl DemandModel for MigrationModel {
    fn name(&self) -> &str {
        "migration"
    }

    fn adjusted_swap(&self, swap_size: f64, fee_multiplier: f64) -> f64 {
        swap_size * self.retained(fee_multiplier)
    }
}

/// Migration-adjusted total cost of one swap (retained fraction 0.5).
pub fn migration_cost(
    fee_multiplier: f64,
    swap_size: f64,
    gas_cost: f64,
    threshold: f64,
    base_fee: f64,
) -> ValidationResult<f64> {
    let model = MigrationModel::new(threshold, DEFAULT_RETAINED_FRACTION)?;
    model.check_multiplier(fee_multiplier)?;
    model.adjusted_total_cost(swap_size, fee_multiplier, base_fee, gas_cost)
}
