//! CSV Persistence Module
//!
//! Writes cost distributions, histogram bins and the run summary for
//! external analysis and plotting

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::report::{Histogram, SummaryReport};
use crate::simulation::SimulationReport;
use crate::types::{CostRecord, ScenarioDistribution};

pub const BASELINE_COSTS_FILE: &str = "baseline_costs.csv";
pub const HOOK_COSTS_FILE: &str = "hook_costs.csv";
pub const ELASTICITY_COSTS_FILE: &str = "elasticity_costs.csv";
pub const MIGRATION_COSTS_FILE: &str = "migration_costs.csv";
pub const HISTOGRAMS_FILE: &str = "histograms.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Per-trader cost row for CSV storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRow {
    pub trader: usize,
    pub volatility: f64,
    pub swap_size: f64,
    pub fee_rate: f64,
    pub gas_cost: f64,
    pub total_cost: f64,
    pub volume: f64,
}

/// Per-trader scenario row for CSV storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub fee_multiplier: f64,
    pub trader: usize,
    pub swap_size: f64,
    pub adjusted_swap: f64,
    pub total_cost: f64,
}

/// One histogram bin for CSV storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramRow {
    pub distribution: String,
    pub bin: usize,
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

/// Writes every artifact of a run into one directory
pub struct ResultWriter {
    data_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Export cost tables, histograms and summary. Returns written paths.
    pub fn write_all(
        &self,
        report: &SimulationReport,
        summary: &SummaryReport,
        histogram_bins: usize,
    ) -> Result<Vec<PathBuf>> {
        let volatilities = report.population.volatilities();

        let mut histograms = vec![
            Histogram::from_values("base", &report.base_total_costs(), histogram_bins),
            Histogram::from_values("hook", &report.hook_total_costs(), histogram_bins),
        ];
        for (prefix, scenarios) in [("elasticity", &report.elasticity), ("migration", &report.migration)] {
            for s in scenarios.iter() {
                histograms.push(Histogram::from_values(
                    format!("{} {}", prefix, s.label()),
                    &s.total_costs,
                    histogram_bins,
                ));
            }
        }

        let written = vec![
            self.write_costs(BASELINE_COSTS_FILE, &report.base, &volatilities)?,
            self.write_costs(HOOK_COSTS_FILE, &report.hook, &volatilities)?,
            self.write_scenarios(
                ELASTICITY_COSTS_FILE,
                &report.elasticity,
                &report.population.swap_sizes(),
            )?,
            self.write_scenarios(
                MIGRATION_COSTS_FILE,
                &report.migration,
                &report.population.swap_sizes(),
            )?,
            self.write_histograms(HISTOGRAMS_FILE, &histograms)?,
            self.write_summary(SUMMARY_FILE, summary)?,
        ];

        info!(
            "Exported {} files to {}",
            written.len(),
            self.data_dir().display()
        );
        Ok(written)
    }

    pub fn write_costs(
        &self,
        file_name: &str,
        records: &[CostRecord],
        volatilities: &[f64],
    ) -> Result<PathBuf> {
        let rows = records.iter().enumerate().map(|(i, r)| CostRow {
            trader: i,
            volatility: volatilities.get(i).copied().unwrap_or(f64::NAN),
            swap_size: r.swap_size,
            fee_rate: r.fee_rate,
            gas_cost: r.gas_cost,
            total_cost: r.total_cost,
            volume: r.volume(),
        });
        self.write_rows(file_name, rows)
    }

    /// Long format: one row per (multiplier, trader)
    pub fn write_scenarios(
        &self,
        file_name: &str,
        scenarios: &[ScenarioDistribution],
        swap_sizes: &[f64],
    ) -> Result<PathBuf> {
        let rows = scenarios.iter().flat_map(|s| {
            s.total_costs
                .iter()
                .zip(&s.adjusted_swaps)
                .enumerate()
                .map(move |(i, (&total_cost, &adjusted_swap))| ScenarioRow {
                    fee_multiplier: s.fee_multiplier,
                    trader: i,
                    swap_size: swap_sizes.get(i).copied().unwrap_or(f64::NAN),
                    adjusted_swap,
                    total_cost,
                })
        });
        self.write_rows(file_name, rows)
    }

    pub fn write_histograms(&self, file_name: &str, histograms: &[Histogram]) -> Result<PathBuf> {
        let rows = histograms.iter().flat_map(|h| {
            h.counts.iter().enumerate().map(move |(bin, &count)| HistogramRow {
                distribution: h.label.clone(),
                bin,
                lower: h.edges[bin],
                upper: h.edges[bin + 1],
                count,
            })
        });
        self.write_rows(file_name, rows)
    }

    pub fn write_summary(&self, file_name: &str, summary: &SummaryReport) -> Result<PathBuf> {
        let path = self.data_dir.join(file_name);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, summary)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    fn write_rows<T, I>(&self, file_name: &str, rows: I) -> Result<PathBuf>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        let path = self.data_dir.join(file_name);
        let mut writer = WriterBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        for row in rows {
            writer
                .serialize(row)
                .with_context(|| format!("Failed to write row to {}", path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", path.display()))?;
        Ok(path)
    }
}

/// Read back a per-trader cost table written by [`ResultWriter::write_costs`]
pub fn read_costs(path: impl AsRef<Path>) -> Result<Vec<CostRow>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<CostRow>, _>>()
        .with_context(|| format!("Failed to parse {}", path.display()))
}
