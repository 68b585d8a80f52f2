//! Sequential orchestration of the report pipeline.
//!
//! Data source, aggregator, chart renderer and report assembler run strictly
//! in order; every failure is fatal and aborts the run.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::stats::{Aggregates, CategoryStats, SummaryStats};
use crate::{chart, data, report};

/// Paths and statistics produced by a completed run.
#[derive(Clone, Debug)]
pub struct RunArtifacts {
    /// Delimited export of the table (absent when records were loaded from
    /// an existing file).
    pub csv_path: Option<PathBuf>,
    /// Rendered bar chart image.
    pub chart_path: PathBuf,
    /// Assembled PDF report.
    pub report_path: PathBuf,
    /// Overall statistics over the table.
    pub summary: SummaryStats,
    /// Per-category statistics, in first-encounter order.
    pub categories: Vec<CategoryStats>,
}

/// Runs the complete pipeline described by `config`.
pub fn run(config: &ReportConfig) -> ReportResult<RunArtifacts> {
    config.validate()?;

    fs::create_dir_all(&config.output_dir)
        .map_err(|err| ReportError::io("create directory", &config.output_dir, err))?;

    let (records, csv_path) = match &config.input_csv {
        Some(path) => {
            info!("loading records from {}", path.display());
            (data::load_csv(path, config)?, None)
        }
        None => {
            info!("generating {} records (seed {})", config.record_count, config.seed);
            let records = data::generate(config);
            let csv_path = config.csv_path();
            data::export_csv(&records, &csv_path)?;
            info!("exported table to {}", csv_path.display());
            (records, Some(csv_path))
        }
    };

    let aggregates = Aggregates::from_records(&records)?;
    info!(
        "aggregated {} records across {} categories",
        aggregates.summary.count,
        aggregates.categories.len()
    );

    let chart_path = config.chart_path();
    chart::render(&aggregates.categories, &chart_path)?;
    info!("rendered chart to {}", chart_path.display());

    let report_path = config.report_path();
    report::assemble(&aggregates, &chart_path, &report_path)?;
    info!("assembled report at {}", report_path.display());

    Ok(RunArtifacts {
        csv_path,
        chart_path,
        report_path,
        summary: aggregates.summary,
        categories: aggregates.categories,
    })
}
