//! Cost aggregation
//!
//! `total_cost = swap_size × fee_rate + gas_cost`, applied per trader. Each
//! trader is independent, so the population is evaluated with a parallel
//! iterator; collection preserves trader order.

use rayon::prelude::*;

use crate::hooks::FeePolicy;
use crate::population::Population;
use crate::types::CostRecord;

/// Pool fee plus gas for one swap.
pub fn total_cost(swap_size: f64, fee_rate: f64, gas_cost: f64) -> f64 {
    swap_size * fee_rate + gas_cost
}

/// Fee revenue of one swap.
pub fn volume(swap_size: f64, fee_rate: f64) -> f64 {
    swap_size * fee_rate
}

/// Cost record of every trader under `policy`.
pub fn cost_records<P: FeePolicy + ?Sized>(
    population: &Population,
    policy: &P,
    base_fee: f64,
    gas_cost: f64,
) -> Vec<CostRecord> {
    population
        .traders()
        .par_iter()
        .map(|trader| {
            let fee_rate = policy.fee_rate(trader, base_fee);
            CostRecord::compute(trader.swap_size(), fee_rate, gas_cost)
        })
        .collect()
}

pub fn total_costs(records: &[CostRecord]) -> Vec<f64> {
    records.iter().map(|r| r.total_cost).collect()
}

pub fn volumes(records: &[CostRecord]) -> Vec<f64> {
    records.iter().map(CostRecord::volume).collect()
}
