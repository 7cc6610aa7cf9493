//! Reporting Module
//!
//! Turns raw cost distributions into:
//! - Summary statistics (mean, spread, extremes)
//! - Histogram bins for external plotting
//! - The plain-text results summary

mod histogram;

pub use histogram::Histogram;

use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulation::SimulationReport;
use crate::types::ScenarioDistribution;

/// Summary statistics of one cost distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Distribution label (e.g. `base`, `Fee x2.0`)
    pub label: String,
    /// Fee multiplier for scenario distributions
    pub fee_multiplier: Option<f64>,
    /// Number of values
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl DistributionSummary {
    pub fn from_values(label: impl Into<String>, values: &[f64]) -> Self {
        let label = label.into();
        if values.is_empty() {
            return Self {
                label,
                fee_multiplier: None,
                count: 0,
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                median: 0.0,
                max: 0.0,
            };
        }

        let arr = Array1::from(values.to_vec());
        let mean = arr.mean().unwrap_or(0.0);
        let std_dev = arr.std(0.0);
        let min = arr.fold(f64::INFINITY, |acc, &v| acc.min(v));
        let max = arr.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));

        Self {
            label,
            fee_multiplier: None,
            count: values.len(),
            mean,
            std_dev,
            min,
            median: median(values),
            max,
        }
    }

    pub fn from_scenario(scenario: &ScenarioDistribution) -> Self {
        Self {
            fee_multiplier: Some(scenario.fee_multiplier),
            ..Self::from_values(scenario.label(), &scenario.total_costs)
        }
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Summary of a full simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub num_traders: usize,
    pub base_fee: f64,
    pub base_gas_cost: f64,
    /// Total cost under the fixed fee
    pub base: DistributionSummary,
    /// Total cost under the hook fee policy
    pub hook: DistributionSummary,
    /// Mean fee revenue per swap under the fixed fee
    pub mean_base_volume: f64,
    /// Mean fee revenue per swap under the hook fee policy
    pub mean_hook_volume: f64,
    /// Share of swaps that matched each hook rule, in rule order
    pub hook_rule_shares: Vec<(String, f64)>,
    pub elasticity: Vec<DistributionSummary>,
    pub migration: Vec<DistributionSummary>,
}

impl SummaryReport {
    pub fn from_report(report: &SimulationReport) -> Self {
        let n = report.population.len();
        Self {
            generated_at: Utc::now(),
            seed: report.seed,
            num_traders: n,
            base_fee: report.base_fee,
            base_gas_cost: report.base_gas_cost,
            base: DistributionSummary::from_values("base", &report.base_total_costs()),
            hook: DistributionSummary::from_values("hook", &report.hook_total_costs()),
            mean_base_volume: mean(&report.base_volumes()),
            mean_hook_volume: mean(&report.hook_volumes()),
            hook_rule_shares: report
                .hook_rule_counts()
                .into_iter()
                .map(|(name, count)| (name.to_string(), count as f64 / n as f64))
                .collect(),
            elasticity: report
                .elasticity
                .iter()
                .map(DistributionSummary::from_scenario)
                .collect(),
            migration: report
                .migration
                .iter()
                .map(DistributionSummary::from_scenario)
                .collect(),
        }
    }

    /// Plain-text results summary
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results Summary:")?;
        writeln!(f, "Average total cost (base): {:.4}", self.base.mean)?;
        writeln!(f, "Average total cost (with hooks): {:.4}", self.hook.mean)?;
        writeln!(f, "Average fee volume (base): {:.4}", self.mean_base_volume)?;
        writeln!(
            f,
            "Average fee volume (with hooks): {:.4}",
            self.mean_hook_volume
        )?;
        for (rule, share) in &self.hook_rule_shares {
            writeln!(f, "  {}: {:.1}% of swaps", rule, share * 100.0)?;
        }

        writeln!(f, "Impact of Elasticity on Total Costs:")?;
        for s in &self.elasticity {
            writeln!(f, "{}: Average total cost = {:.4}", s.label, s.mean)?;
        }

        writeln!(f, "Impact of Liquidity Migration on Total Costs:")?;
        for s in &self.migration {
            writeln!(
                f,
                "{}: Remaining average total cost = {:.4}",
                s.label, s.mean
            )?;
        }
        Ok(())
    }
}

fn mean(values: &[f64]) -> f64 {
    Array1::from(values.to_vec()).mean().unwrap_or(0.0)
}
