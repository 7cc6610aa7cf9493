//! Constant-elasticity demand
//!
//! `adjusted_swap = swap_size × fee_multiplier^exponent`. With a negative
//! exponent a fee above base contracts volume and a fee below base expands
//! it; a multiplier of exactly 1 leaves every swap untouched.

use crate::config::ElasticityConfig;
use crate::error::{ensure_finite, ensure_positive, ValidationError, ValidationResult};

use super::DemandModel;

pub const DEFAULT_ELASTICITY_EXPONENT: f64 = -0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticityModel {
    exponent: f64,
}

impl ElasticityModel {
    pub fn new(exponent: f64) -> ValidationResult<Self> {
        Ok(Self {
            exponent: ensure_finite("elasticity.exponent", exponent)?,
        })
    }

    pub fn from_config(config: &ElasticityConfig) -> ValidationResult<Self> {
        Self::new(config.exponent)
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl Default for ElasticityModel {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_ELASTICITY_EXPONENT,
        }
    }
}

impl DemandModel for ElasticityModel {
    fn name(&self) -> &str {
        "elasticity"
    }

    fn check_multiplier(&self, fee_multiplier: f64) -> ValidationResult<f64> {
        if fee_multiplier == 0.0 && self.exponent < 0.0 {
            return Err(ValidationError::UndefinedPower {
                multiplier: fee_multiplier,
                exponent: self.exponent,
            });
        }
        ensure_positive("fee_multiplier", fee_multiplier)?;
        if !fee_multiplier.powf(self.exponent).is_finite() {
            return Err(ValidationError::UndefinedPower {
                multiplier: fee_multiplier,
                exponent: self.exponent,
            });
        }
        Ok(fee_multiplier)
    }

    fn adjusted_swap(&self, swap_size: f64, fee_multiplier: f64) -> f64 {
        swap_size * fee_multiplier.powf(self.exponent)
    }
}

/// Elasticity-adjusted total cost of one swap.
///
/// ```
/// use hooksim::scenarios::elasticity_cost;
///
/// let cost = elasticity_cost(2.0, 100.0, 0.01, -0.5, 0.003).unwrap();
/// assert!((cost - 0.4343).abs() < 1e-4);
/// ```
pub fn elasticity_cost(
    fee_multiplier: f64,
    swap_size: f64,
    gas_cost: f64,
    elasticity_exponent: f64,
    base_fee: f64,
) -> ValidationResult<f64> {
    let model = ElasticityModel::new(elasticity_exponent)?;
    model.check_multiplier(fee_multiplier)?;
    model.adjusted_total_cost(swap_size, fee_multiplier, base_fee, gas_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::total_cost;

    #[test]
    fn test_doubled_fee_scenario() {
        let model = ElasticityModel::default();
        let adjusted = model.adjusted_swap(100.0, 2.0);
        assert!((adjusted - 70.7107).abs() < 1e-4, "got {}", adjusted);

        let cost = elasticity_cost(2.0, 100.0, 0.01, -0.5, 0.003).unwrap();
        assert!((cost - 0.4343).abs() < 1e-4, "got {}", cost);
    }

    #[test]
    fn test_unit_multiplier_is_identity() {
        for &exponent in &[-0.5, -2.0, 0.0, 0.75] {
            let model = ElasticityModel::new(exponent).unwrap();
            for &swap in &[0.3, 12.0, 999.5] {
                assert_eq!(model.adjusted_swap(swap, 1.0), swap);
                assert_eq!(
                    model.adjusted_total_cost(swap, 1.0, 0.003, 0.01).unwrap(),
                    total_cost(swap, 0.003, 0.01)
                );
            }
        }
    }

    #[test]
    fn test_negative_exponent_contracts_and_expands() {
        let model = ElasticityModel::default();
        assert!(model.adjusted_swap(100.0, 2.0) < 100.0);
        assert!(model.adjusted_swap(100.0, 0.5) > 100.0);
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        assert_eq!(
            elasticity_cost(0.0, 100.0, 0.01, -0.5, 0.003),
            Err(ValidationError::UndefinedPower {
                multiplier: 0.0,
                exponent: -0.5
            })
        );
        assert!(matches!(
            elasticity_cost(-1.0, 100.0, 0.01, -0.5, 0.003),
            Err(ValidationError::NotPositive { .. })
        ));
        assert!(elasticity_cost(0.0, 100.0, 0.01, 0.5, 0.003).is_err());
    }

    #[test]
    fn test_overflowing_swap_rejected() {
        // 1e-152^-2 is finite on its own; scaled by the swap it is not
        assert!(ElasticityModel::new(-2.0).unwrap().check_multiplier(1e-152).is_ok());
        assert_eq!(
            elasticity_cost(1e-152, 1e5, 0.01, -2.0, 0.003),
            Err(ValidationError::NotFinite {
                field: "adjusted_swap".into(),
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn test_non_finite_exponent_rejected() {
        assert!(ElasticityModel::new(f64::NAN).is_err());
        assert!(ElasticityModel::new(f64::NEG_INFINITY).is_err());
    }
}
