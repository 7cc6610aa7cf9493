//! Fee multiplier scenarios
//!
//! Demand models rescale each trader's swap when the pool fee is scaled by a
//! multiplier, then recompute the total cost at the scaled fee:
//!
//! ```text
//! adjusted_swap       = model(swap_size, fee_multiplier)
//! adjusted_total_cost = adjusted_swap × base_fee × fee_multiplier + gas_cost
//! ```
//!
//! Models are stateless. Scenarios of a sweep are independent of each other
//! and of the traders' order, so both levels run as parallel iterators.

pub mod elasticity;
pub mod migration;

pub use elasticity::{elasticity_cost, ElasticityModel};
pub use migration::{migration_cost, MigrationModel};

use rayon::prelude::*;

use crate::cost::total_cost;
use crate::error::{ensure_finite, ensure_positive, ValidationResult};
use crate::population::Population;
use crate::types::{FeeMultiplierSweep, ScenarioDistribution};

pub trait DemandModel: Send + Sync {
    /// Short name used in logs and exported files.
    fn name(&self) -> &str;

    /// Reject multipliers the model cannot evaluate.
    fn check_multiplier(&self, fee_multiplier: f64) -> ValidationResult<f64> {
        ensure_positive("fee_multiplier", fee_multiplier)
    }

    /// Swap size remaining after traders react to the scaled fee.
    fn adjusted_swap(&self, swap_size: f64, fee_multiplier: f64) -> f64;

    /// Adjusted swap and its total cost. Overflow is an error, never `inf`.
    fn adjusted_cost(
        &self,
        swap_size: f64,
        fee_multiplier: f64,
        base_fee: f64,
        gas_cost: f64,
    ) -> ValidationResult<(f64, f64)> {
        let adjusted = ensure_finite(
            "adjusted_swap",
            self.adjusted_swap(swap_size, fee_multiplier),
        )?;
        let cost = ensure_finite(
            "adjusted_total_cost",
            total_cost(adjusted, base_fee * fee_multiplier, gas_cost),
        )?;
        Ok((adjusted, cost))
    }

    fn adjusted_total_cost(
        &self,
        swap_size: f64,
        fee_multiplier: f64,
        base_fee: f64,
        gas_cost: f64,
    ) -> ValidationResult<f64> {
        self.adjusted_cost(swap_size, fee_multiplier, base_fee, gas_cost)
            .map(|(_, cost)| cost)
    }

    /// Cost distribution of the whole population at one multiplier.
    fn distribution(
        &self,
        population: &Population,
        fee_multiplier: f64,
        base_fee: f64,
        gas_cost: f64,
    ) -> ValidationResult<ScenarioDistribution> {
        self.check_multiplier(fee_multiplier)?;

        let pairs: Vec<(f64, f64)> = population
            .traders()
            .par_iter()
            .map(|trader| {
                self.adjusted_cost(trader.swap_size(), fee_multiplier, base_fee, gas_cost)
            })
            .collect::<ValidationResult<_>>()?;
        let (adjusted_swaps, total_costs) = pairs.into_iter().unzip();

        Ok(ScenarioDistribution {
            fee_multiplier,
            adjusted_swaps,
            total_costs,
        })
    }
}

/// One distribution per multiplier, in sweep order.
///
/// Every multiplier is checked before any scenario is evaluated.
pub fn run_sweep<M: DemandModel + ?Sized>(
    model: &M,
    population: &Population,
    sweep: &FeeMultiplierSweep,
    base_fee: f64,
    gas_cost: f64,
) -> ValidationResult<Vec<ScenarioDistribution>> {
    for &m in sweep.multipliers() {
        model.check_multiplier(m)?;
    }

    sweep
        .multipliers()
        .par_iter()
        .map(|&m| model.distribution(population, m, base_fee, gas_cost))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population() -> Population {
        Population::from_pairs(&[(100.0, 0.02), (5.0, 0.08), (42.0, 0.06)]).unwrap()
    }

    #[test]
    fn test_sweep_preserves_order_and_length() {
        let pop = population();
        let sweep = FeeMultiplierSweep::default();
        let results = run_sweep(&ElasticityModel::default(), &pop, &sweep, 0.003, 0.01).unwrap();

        assert_eq!(results.len(), sweep.len());
        for (dist, &m) in results.iter().zip(sweep.multipliers()) {
            assert_eq!(dist.fee_multiplier, m);
            assert_eq!(dist.len(), pop.len());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pop = population();
        let model = MigrationModel::default();
        let dist = model.distribution(&pop, 1.625, 0.003, 0.01).unwrap();

        for (i, trader) in pop.traders().iter().enumerate() {
            let expected = model
                .adjusted_total_cost(trader.swap_size(), 1.625, 0.003, 0.01)
                .unwrap();
            assert_eq!(dist.total_costs[i], expected);
        }
    }

    #[test]
    fn test_sweep_rejects_any_bad_multiplier() {
        let pop = population();
        // Bypass sweep validation to reach the model's own check
        let err = MigrationModel::default()
            .distribution(&pop, -1.0, 0.003, 0.01)
            .unwrap_err();
        assert!(err.to_string().contains("fee_multiplier"));
    }

    #[test]
    fn test_overflowing_costs_are_errors() {
        let pop = Population::from_pairs(&[(20.0, 0.02), (1e308, 0.02)]).unwrap();

        let err = MigrationModel::default()
            .distribution(&pop, 1e4, 0.003, 0.01)
            .unwrap_err();
        assert!(err.to_string().contains("adjusted_total_cost"), "{}", err);

        let pop = Population::from_pairs(&[(1e5, 0.02)]).unwrap();
        let sweep = FeeMultiplierSweep::new(vec![1.0, 1e-152]).unwrap();
        let model = ElasticityModel::new(-2.0).unwrap();
        assert!(run_sweep(&model, &pop, &sweep, 0.003, 0.01).is_err());
    }
}
