//! Integration tests for the fee regimes

#[cfg(test)]
mod tests {
    use hooksim::config::AppConfig;
    use hooksim::cost::total_cost;
    use hooksim::hooks::{dynamic_fee, DynamicFeePolicy, FeePolicy};
    use hooksim::population::Population;
    use hooksim::report::SummaryReport;
    use hooksim::scenarios::{
        elasticity_cost, migration_cost, DemandModel, ElasticityModel, MigrationModel,
    };
    use hooksim::simulation::Simulation;
    use hooksim::ValidationError;

    const BASE_FEE: f64 = 0.003;
    const GAS: f64 = 0.01;

    fn config_with_traders(n: i64) -> AppConfig {
        let mut config = AppConfig::default();
        config.simulation.num_traders = n;
        config
    }

    // ============================================================================
    // Hook fee rule
    // ============================================================================

    #[test]
    fn test_small_swap_during_volatility_pays_penalty() {
        let fee = dynamic_fee(5.0, 0.08, BASE_FEE).unwrap();
        assert!((fee - 0.006).abs() < 1e-12);
    }

    #[test]
    fn test_large_swap_during_volatility_earns_reward() {
        let fee = dynamic_fee(20.0, 0.08, BASE_FEE).unwrap();
        assert!((fee - 0.0015).abs() < 1e-12);
    }

    #[test]
    fn test_large_swap_in_calm_market_pays_base() {
        let fee = dynamic_fee(20.0, 0.02, BASE_FEE).unwrap();
        assert!((fee - 0.003).abs() < 1e-12);
    }

    #[test]
    fn test_rule_properties_over_generated_population() {
        let sim = Simulation::new(&config_with_traders(5_000)).unwrap();
        let policy = sim.hook_policy();

        for trader in sim.population().traders() {
            let rate = policy.fee_rate(trader, BASE_FEE);
            if trader.swap_size() < 10.0 {
                assert_eq!(rate, 2.0 * BASE_FEE);
            } else if trader.volatility() > 0.05 {
                assert_eq!(rate, 0.5 * BASE_FEE);
            } else {
                assert_eq!(rate, BASE_FEE);
            }
        }
    }

    // ============================================================================
    // Cost aggregation
    // ============================================================================

    #[test]
    fn test_hook_and_base_costs_share_swaps_and_gas() {
        let report = Simulation::new(&config_with_traders(1_000))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.base.len(), report.hook.len());
        for (base, hook) in report.base.iter().zip(&report.hook) {
            assert_eq!(base.swap_size, hook.swap_size);
            assert_eq!(base.gas_cost, GAS);
            assert_eq!(hook.gas_cost, GAS);
            assert_eq!(
                hook.total_cost,
                total_cost(hook.swap_size, hook.fee_rate, hook.gas_cost)
            );
        }
    }

    // ============================================================================
    // Demand models
    // ============================================================================

    #[test]
    fn test_elasticity_doubled_fee() {
        let adjusted = ElasticityModel::default().adjusted_swap(100.0, 2.0);
        assert!((adjusted - 70.7107).abs() < 1e-4);

        let cost = elasticity_cost(2.0, 100.0, GAS, -0.5, BASE_FEE).unwrap();
        assert!((cost - 0.4343).abs() < 1e-4);
    }

    #[test]
    fn test_migration_doubled_fee() {
        assert_eq!(MigrationModel::default().adjusted_swap(100.0, 2.0), 50.0);

        let cost = migration_cost(2.0, 100.0, GAS, 1.5, BASE_FEE).unwrap();
        assert!((cost - 0.31).abs() < 1e-12);
    }

    #[test]
    fn test_elasticity_at_unit_multiplier_matches_base_costs() {
        let mut config = config_with_traders(500);
        config.sweep.multipliers = Some(vec![1.0]);
        let report = Simulation::new(&config).unwrap().run().unwrap();

        let base = report.base_total_costs();
        let scenario = &report.elasticity[0];
        assert_eq!(scenario.total_costs, base);
        assert_eq!(scenario.adjusted_swaps, report.population.swap_sizes());
    }

    #[test]
    fn test_migration_halves_only_above_threshold() {
        let report = Simulation::new(&config_with_traders(300))
            .unwrap()
            .run()
            .unwrap();
        let swaps = report.population.swap_sizes();

        for dist in &report.migration {
            let retained = if dist.fee_multiplier > 1.5 { 0.5 } else { 1.0 };
            for (adjusted, swap) in dist.adjusted_swaps.iter().zip(&swaps) {
                assert_eq!(*adjusted, swap * retained);
            }
        }
    }

    // ============================================================================
    // Validation
    // ============================================================================

    #[test]
    fn test_zero_multiplier_with_negative_exponent_is_rejected() {
        let mut config = config_with_traders(10);
        config.sweep.multipliers = Some(vec![0.0]);
        assert!(Simulation::new(&config).is_err());

        assert_eq!(
            ElasticityModel::default().check_multiplier(0.0),
            Err(ValidationError::UndefinedPower {
                multiplier: 0.0,
                exponent: -0.5
            })
        );
    }

    #[test]
    fn test_invalid_trader_rejected_with_index() {
        let err = Population::from_pairs(&[(20.0, 0.02), (20.0, 0.02), (-1.0, 0.02)]).unwrap_err();
        assert!(err.to_string().starts_with("trader 2:"), "{}", err);
    }

    #[test]
    fn test_invalid_base_fee_rejected() {
        let mut config = config_with_traders(10);
        config.fees.base_fee = -0.003;
        let err = Simulation::new(&config).unwrap_err();
        assert!(err.to_string().contains("fees.base_fee"));
    }

    // ============================================================================
    // Summary
    // ============================================================================

    #[test]
    fn test_summary_text_lists_every_scenario() {
        let report = Simulation::new(&config_with_traders(2_000))
            .unwrap()
            .run()
            .unwrap();
        let summary = SummaryReport::from_report(&report);
        let text = summary.render_text();

        assert!(text.starts_with("Results Summary:"));
        assert!(text.contains("Average total cost (base):"));
        assert!(text.contains("Average total cost (with hooks):"));
        assert_eq!(summary.elasticity.len(), 5);
        assert_eq!(summary.migration.len(), 5);
        for s in summary.elasticity.iter().chain(&summary.migration) {
            assert!(text.contains(&s.label), "missing {} in\n{}", s.label, text);
        }
        assert!(text.contains("Fee x0.5: Average total cost ="));
        assert!(text.contains("Fee x2.0: Remaining average total cost ="));

        // Every base swap pays the same rate, so mean base cost follows the mean swap
        let mean_swap =
            report.population.swap_sizes().iter().sum::<f64>() / report.population.len() as f64;
        assert!((summary.base.mean - (mean_swap * BASE_FEE + GAS)).abs() < 1e-9);
    }

    #[test]
    fn test_rule_shares_sum_to_one() {
        let report = Simulation::new(&config_with_traders(1_000))
            .unwrap()
            .run()
            .unwrap();
        let summary = SummaryReport::from_report(&report);
        let total: f64 = summary.hook_rule_shares.iter().map(|(_, s)| s).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(summary.hook_rule_shares[0].0, DynamicFeePolicy::SMALL_SWAP_PENALTY);
    }
}
