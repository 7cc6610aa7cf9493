use serde::Serialize;

use crate::config::HooksConfig;
use crate::error::{ensure_in_range, ensure_positive, ValidationResult};
use crate::types::Trader;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FeeCondition {
    /// `swap_size < threshold`
    SwapSizeBelow(f64),
    /// `volatility > threshold`
    VolatilityAbove(f64),
    Always,
}

impl FeeCondition {
    pub fn matches(&self, trader: &Trader) -> bool {
        match *self {
            FeeCondition::SwapSizeBelow(threshold) => trader.swap_size() < threshold,
            FeeCondition::VolatilityAbove(threshold) => trader.volatility() > threshold,
            FeeCondition::Always => true,
        }
    }
}

/// One entry of a fee rule table: when `condition` holds the swap pays
/// `multiplier × base_fee`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeRule {
    pub name: &'static str,
    pub condition: FeeCondition,
    pub multiplier: f64,
}

impl FeeRule {
    pub(crate) const BASELINE: FeeRule = FeeRule {
        name: "baseline",
        condition: FeeCondition::Always,
        multiplier: 1.0,
    };

    pub fn new(name: &'static str, condition: FeeCondition, multiplier: f64) -> Self {
        Self {
            name,
            condition,
            multiplier,
        }
    }
}

impl HooksConfig {
    pub fn validate(&self) -> ValidationResult<()> {
        ensure_positive("hooks.small_swap_threshold", self.small_swap_threshold)?;
        ensure_positive("hooks.small_swap_multiplier", self.small_swap_multiplier)?;
        ensure_in_range(
            "hooks.volatility_threshold",
            self.volatility_threshold,
            0.0,
            1.0,
        )?;
        ensure_positive("hooks.volatility_multiplier", self.volatility_multiplier)?;
        Ok(())
    }
}
