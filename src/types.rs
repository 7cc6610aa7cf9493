//! Core types used throughout HookSim
//!
//! Defines traders, cost records, the fee multiplier sweep and per-scenario
//! cost distributions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cost::{total_cost, volume};
use crate::error::{ensure_in_range, ensure_positive, ValidationError, ValidationResult};

/// A single trader: one swap of `swap_size` observed at market `volatility`.
///
/// Fields are private so every `Trader` in circulation satisfies
/// `swap_size > 0` and `volatility ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trader {
    swap_size: f64,
    volatility: f64,
}

impl Trader {
    pub fn new(swap_size: f64, volatility: f64) -> ValidationResult<Self> {
        Ok(Self {
            swap_size: ensure_positive("swap_size", swap_size)?,
            volatility: ensure_in_range("volatility", volatility, 0.0, 1.0)?,
        })
    }

    pub fn swap_size(&self) -> f64 {
        self.swap_size
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

impl fmt::Display for Trader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap={:.4} vol={:.4}", self.swap_size, self.volatility)
    }
}

/// Cost of one swap under one fee rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub swap_size: f64,
    pub fee_rate: f64,
    pub gas_cost: f64,
    pub total_cost: f64,
}

impl CostRecord {
    pub fn compute(swap_size: f64, fee_rate: f64, gas_cost: f64) -> Self {
        Self {
            swap_size,
            fee_rate,
            gas_cost,
            total_cost: total_cost(swap_size, fee_rate, gas_cost),
        }
    }

    /// Fee revenue of the swap (`swap_size × fee_rate`), gas excluded.
    pub fn volume(&self) -> f64 {
        volume(self.swap_size, self.fee_rate)
    }
}

/// Ordered fee multipliers defining the elasticity and migration scenarios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeMultiplierSweep {
    multipliers: Vec<f64>,
}

impl FeeMultiplierSweep {
    /// Build from an explicit list; every multiplier must be strictly positive.
    pub fn new(multipliers: Vec<f64>) -> ValidationResult<Self> {
        if multipliers.is_empty() {
            return Err(ValidationError::EmptySweep);
        }
        for (i, &m) in multipliers.iter().enumerate() {
            ensure_positive(&format!("fee_multipliers[{}]", i), m)?;
        }
        Ok(Self { multipliers })
    }

    /// `steps` evenly spaced values from `start` to `end`, both inclusive.
    /// A single step yields `[start]`.
    pub fn linspace(start: f64, end: f64, steps: usize) -> ValidationResult<Self> {
        ensure_positive("sweep.start", start)?;
        ensure_positive("sweep.end", end)?;

        let multipliers = match steps {
            0 => Vec::new(),
            1 => vec![start],
            n => {
                let step = (end - start) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                    .collect()
            }
        };
        Self::new(multipliers)
    }

    pub fn multipliers(&self) -> &[f64] {
        &self.multipliers
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl Default for FeeMultiplierSweep {
    fn default() -> Self {
        Self {
            multipliers: vec![0.5, 0.875, 1.25, 1.625, 2.0],
        }
    }
}

/// Cost distribution of one demand model at one fee multiplier.
///
/// `adjusted_swaps[i]` and `total_costs[i]` belong to trader `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDistribution {
    pub fee_multiplier: f64,
    pub adjusted_swaps: Vec<f64>,
    pub total_costs: Vec<f64>,
}

impl ScenarioDistribution {
    pub fn len(&self) -> usize {
        self.total_costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_costs.is_empty()
    }

    /// Label used in summaries and exported files, e.g. `Fee x1.6`.
    pub fn label(&self) -> String {
        format!("Fee x{:.1}", self.fee_multiplier)
    }
}
