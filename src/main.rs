//! HookSim command line
//!
//! Usage: hooksim [--config config/default.yaml] [--output ./data]

use anyhow::{Context, Result};
use clap::Parser;
use hooksim::config::AppConfig;
use hooksim::persistence::ResultWriter;
use hooksim::report::SummaryReport;
use hooksim::simulation::Simulation;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hooksim")]
#[command(about = "Compare hook fee policies against a fixed-fee AMM baseline")]
struct Cli {
    /// Configuration file (defaults to config/default + config/local)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for CSV/JSON exports
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the population seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of traders
    #[arg(short = 'n', long)]
    traders: Option<i64>,

    /// Skip file export
    #[arg(long)]
    no_csv: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(traders) = self.traders {
            config.simulation.num_traders = traders;
        }
        if let Some(output) = &self.output {
            config.output.data_dir = output.display().to_string();
        }
        if self.no_csv {
            config.output.csv_enabled = false;
        }
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    info!("Config: {}", config.digest());

    let simulation = Simulation::new(&config).context("Invalid simulation parameters")?;
    let report = simulation.run().context("Simulation failed")?;
    let summary = SummaryReport::from_report(&report);

    print!("{}", summary);

    if config.output.csv_enabled {
        let writer = ResultWriter::new(&config.output.data_dir)?;
        writer.write_all(&report, &summary, config.histogram_bins()?)?;
    } else {
        warn!("File export disabled, results only printed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "hooksim", "--seed", "11", "-n", "300", "--output", "out", "--no-csv",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.simulation.seed, 11);
        assert_eq!(config.simulation.num_traders, 300);
        assert_eq!(config.output.data_dir, "out");
        assert!(!config.output.csv_enabled);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["hooksim"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, AppConfig::default());
    }
}
