//! Simulation Module
//!
//! Runs the four fee regimes over one trader population:
//! - Fixed base fee
//! - Hook (dynamic) fee
//! - Elasticity of demand per fee multiplier
//! - Liquidity migration per fee multiplier
//!
//! All parameters are validated when the simulation is built; a simulation
//! that exists can always run to completion.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::cost::{cost_records, total_costs, volumes};
use crate::error::ValidationResult;
use crate::hooks::{DynamicFeePolicy, FeePolicy, FixedFeePolicy};
use crate::population::Population;
use crate::scenarios::{run_sweep, DemandModel, ElasticityModel, MigrationModel};
use crate::types::{CostRecord, FeeMultiplierSweep, ScenarioDistribution};

/// Output of one simulation run
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub seed: u64,
    pub base_fee: f64,
    pub base_gas_cost: f64,
    pub population: Population,
    /// Cost records under the fixed fee, one per trader
    pub base: Vec<CostRecord>,
    /// Cost records under the hook fee policy, one per trader
    pub hook: Vec<CostRecord>,
    /// Elasticity distributions in sweep order
    pub elasticity: Vec<ScenarioDistribution>,
    /// Migration distributions in sweep order
    pub migration: Vec<ScenarioDistribution>,
    rule_counts: Vec<(&'static str, usize)>,
}

impl SimulationReport {
    pub fn base_total_costs(&self) -> Vec<f64> {
        total_costs(&self.base)
    }

    pub fn hook_total_costs(&self) -> Vec<f64> {
        total_costs(&self.hook)
    }

    pub fn base_volumes(&self) -> Vec<f64> {
        volumes(&self.base)
    }

    pub fn hook_volumes(&self) -> Vec<f64> {
        volumes(&self.hook)
    }

    /// Number of traders matched by each hook rule, in rule order
    pub fn hook_rule_counts(&self) -> Vec<(&'static str, usize)> {
        self.rule_counts.clone()
    }
}

/// A validated, ready-to-run simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    seed: u64,
    base_fee: f64,
    base_gas_cost: f64,
    population: Population,
    hook_policy: DynamicFeePolicy,
    elasticity: ElasticityModel,
    migration: MigrationModel,
    sweep: FeeMultiplierSweep,
}

impl Simulation {
    /// Validate `config` and generate the population from its seed
    pub fn new(config: &AppConfig) -> ValidationResult<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.simulation.seed);
        let population = Population::generate(&mut rng, config.num_traders()?, &config.population)?;
        info!(
            "Generated {} traders (seed {})",
            population.len(),
            config.simulation.seed
        );

        Self::build(config, population)
    }

    /// Validate `config` and use a population generated elsewhere.
    /// `simulation.num_traders` is ignored; the population defines N.
    pub fn with_population(config: &AppConfig, population: Population) -> ValidationResult<Self> {
        config.validate_model()?;
        Self::build(config, population)
    }

    fn build(config: &AppConfig, population: Population) -> ValidationResult<Self> {
        let sweep = config.sweep()?;
        let elasticity = ElasticityModel::from_config(&config.elasticity)?;
        let migration = MigrationModel::from_config(&config.migration)?;

        // Reject the whole sweep before any scenario runs. Costs are monotone
        // in swap size, so the largest swap bounds every scenario.
        let max_swap = population.max_swap_size();
        let (base_fee, gas) = (config.fees.base_fee, config.fees.base_gas_cost);
        for &m in sweep.multipliers() {
            elasticity.check_multiplier(m)?;
            migration.check_multiplier(m)?;
            elasticity.adjusted_total_cost(max_swap, m, base_fee, gas)?;
            migration.adjusted_total_cost(max_swap, m, base_fee, gas)?;
        }

        Ok(Self {
            seed: config.simulation.seed,
            base_fee: config.fees.base_fee,
            base_gas_cost: config.fees.base_gas_cost,
            population,
            hook_policy: DynamicFeePolicy::from_config(&config.hooks)?,
            elasticity,
            migration,
            sweep,
        })
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn sweep(&self) -> &FeeMultiplierSweep {
        &self.sweep
    }

    pub fn hook_policy(&self) -> &DynamicFeePolicy {
        &self.hook_policy
    }

    /// Run all four regimes
    pub fn run(&self) -> ValidationResult<SimulationReport> {
        let base = cost_records(&self.population, &FixedFeePolicy, self.base_fee, self.base_gas_cost);
        debug!("{} regime: {} cost records", FixedFeePolicy.name(), base.len());

        let hook = cost_records(
            &self.population,
            &self.hook_policy,
            self.base_fee,
            self.base_gas_cost,
        );
        debug!("{} regime: {} cost records", self.hook_policy.name(), hook.len());

        let elasticity = run_sweep(
            &self.elasticity,
            &self.population,
            &self.sweep,
            self.base_fee,
            self.base_gas_cost,
        )?;
        debug!(
            "{} regime: {} scenarios",
            self.elasticity.name(),
            elasticity.len()
        );

        let migration = run_sweep(
            &self.migration,
            &self.population,
            &self.sweep,
            self.base_fee,
            self.base_gas_cost,
        )?;
        debug!(
            "{} regime: {} scenarios",
            self.migration.name(),
            migration.len()
        );

        let rule_counts = self.rule_counts();

        info!(
            "Simulation complete: {} traders, {} fee multipliers",
            self.population.len(),
            self.sweep.len()
        );

        Ok(SimulationReport {
            seed: self.seed,
            base_fee: self.base_fee,
            base_gas_cost: self.base_gas_cost,
            population: self.population.clone(),
            base,
            hook,
            elasticity,
            migration,
            rule_counts,
        })
    }

    fn rule_counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = self
            .hook_policy
            .rules()
            .iter()
            .map(|rule| (rule.name, 0))
            .collect();

        for trader in self.population.traders() {
            let name = self.hook_policy.matching_rule(trader).name;
            if let Some(entry) = counts.iter_mut().find(|(n, _)| *n == name) {
                entry.1 += 1;
            }
        }
        counts
    }
}
