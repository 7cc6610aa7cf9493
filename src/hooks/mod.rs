//! Hook fee policies
//!
//! A hook decides the fee rate of each swap. Two policies share the
//! [`FeePolicy`] seam:
//! - [`FixedFeePolicy`]: every swap pays `base_fee`
//! - [`DynamicFeePolicy`]: an ordered rule table, first match wins
//!
//! Default rule table:
//!
//! | # | rule                 | condition           | fee              |
//! |---|----------------------|---------------------|------------------|
//! | 1 | small swap penalty   | `swap_size < 10`    | `2.0 × base_fee` |
//! | 2 | volatility reward    | `volatility > 0.05` | `0.5 × base_fee` |
//! | 3 | baseline             | always              | `base_fee`       |
//!
//! The penalty is checked before the reward: a small swap in a volatile
//! market pays the penalty rate.

mod rules;

pub use rules::{FeeCondition, FeeRule};

use crate::config::HooksConfig;
use crate::error::{ensure_positive, ValidationResult};
use crate::types::Trader;

/// Maps one trader to a fee rate.
pub trait FeePolicy: Send + Sync {
    /// Short name used in logs and exported files.
    fn name(&self) -> &str;

    /// Fee rate charged to `trader` when the pool's base fee is `base_fee`.
    fn fee_rate(&self, trader: &Trader, base_fee: f64) -> f64;
}

/// Fixed-fee baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedFeePolicy;

impl FeePolicy for FixedFeePolicy {
    fn name(&self) -> &str {
        "base"
    }

    fn fee_rate(&self, _trader: &Trader, base_fee: f64) -> f64 {
        base_fee
    }
}

/// Size/volatility-conditioned fee hook.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicFeePolicy {
    rules: Vec<FeeRule>,
}

impl DynamicFeePolicy {
    pub const SMALL_SWAP_PENALTY: &'static str = "small_swap_penalty";
    pub const VOLATILITY_REWARD: &'static str = "volatility_reward";
    pub const BASELINE: &'static str = "baseline";

    /// Build the three-rule table from configured thresholds and multipliers.
    /// Rule order is fixed regardless of the values.
    pub fn from_config(config: &HooksConfig) -> ValidationResult<Self> {
        config.validate()?;
        Ok(Self {
            rules: vec![
                FeeRule::new(
                    Self::SMALL_SWAP_PENALTY,
                    FeeCondition::SwapSizeBelow(config.small_swap_threshold),
                    config.small_swap_multiplier,
                ),
                FeeRule::new(
                    Self::VOLATILITY_REWARD,
                    FeeCondition::VolatilityAbove(config.volatility_threshold),
                    config.volatility_multiplier,
                ),
                FeeRule::new(Self::BASELINE, FeeCondition::Always, 1.0),
            ],
        })
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[FeeRule] {
        &self.rules
    }

    /// First rule whose condition holds for `trader`.
    pub fn matching_rule(&self, trader: &Trader) -> &FeeRule {
        self.rules
            .iter()
            .find(|rule| rule.condition.matches(trader))
            .unwrap_or(&FeeRule::BASELINE)
    }

    /// Validating entry point for raw values: `fee(swap_size, volatility, base_fee)`.
    pub fn fee(&self, swap_size: f64, volatility: f64, base_fee: f64) -> ValidationResult<f64> {
        let base_fee = ensure_positive("base_fee", base_fee)?;
        let trader = Trader::new(swap_size, volatility)?;
        Ok(self.fee_rate(&trader, base_fee))
    }
}

impl Default for DynamicFeePolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                FeeRule::new(
                    Self::SMALL_SWAP_PENALTY,
                    FeeCondition::SwapSizeBelow(10.0),
                    2.0,
                ),
                FeeRule::new(
                    Self::VOLATILITY_REWARD,
                    FeeCondition::VolatilityAbove(0.05),
                    0.5,
                ),
                FeeRule::new(Self::BASELINE, FeeCondition::Always, 1.0),
            ],
        }
    }
}

impl FeePolicy for DynamicFeePolicy {
    fn name(&self) -> &str {
        "hook"
    }

    fn fee_rate(&self, trader: &Trader, base_fee: f64) -> f64 {
        base_fee * self.matching_rule(trader).multiplier
    }
}

/// Dynamic fee under the default rule table.
pub fn dynamic_fee(swap_size: f64, volatility: f64, base_fee: f64) -> ValidationResult<f64> {
    DynamicFeePolicy::default().fee(swap_size, volatility, base_fee)
}
