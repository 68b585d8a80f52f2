//! Run configuration for the report pipeline.
//!
//! The original pipeline kept its output folder, seed and category set as
//! process-wide constants. Here they are explicit values handed to each
//! component, so a run is fully described by one [`ReportConfig`] and two runs
//! with the same configuration produce the same table.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{ReportError, ReportResult};

/// File name of the delimited table export.
pub const CSV_FILE_NAME: &str = "sales_data.csv";
/// File name of the rendered bar chart.
pub const CHART_FILE_NAME: &str = "chart.png";
/// File name of the assembled PDF report.
pub const REPORT_FILE_NAME: &str = "report.pdf";

/// Configuration for a single report run.
#[derive(Clone, Debug)]
pub struct ReportConfig {
    /// Number of synthetic records to generate.
    pub record_count: usize,
    /// Seed for the record generator.
    pub seed: u64,
    /// First date records may fall on.
    pub start_date: NaiveDate,
    /// Last date records may fall on (inclusive).
    pub end_date: NaiveDate,
    /// The fixed set of categories records are drawn from and validated
    /// against.
    pub categories: Vec<String>,
    /// Lower bound of the generated amount range.
    pub min_amount: f64,
    /// Upper bound of the generated amount range.
    pub max_amount: f64,
    /// Directory all artifacts are written beneath; created if absent.
    pub output_dir: PathBuf,
    /// When set, records are loaded from this CSV instead of generated.
    pub input_csv: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid default date");
        Self {
            record_count: 120,
            seed: 10,
            start_date,
            end_date: start_date + chrono::Duration::days(99),
            categories: default_categories(),
            min_amount: 50.0,
            max_amount: 1000.0,
            output_dir: PathBuf::from("report_output"),
            input_csv: None,
        }
    }
}

/// The category set used when none is configured.
pub fn default_categories() -> Vec<String> {
    ["Electronics", "Clothing", "Books", "Food"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl ReportConfig {
    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> ReportResult<()> {
        if self.categories.is_empty() {
            return Err(ReportError::Config("category set is empty".into()));
        }
        if self.start_date > self.end_date {
            return Err(ReportError::Config(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        if !(self.min_amount.is_finite() && self.max_amount.is_finite()) {
            return Err(ReportError::Config("amount bounds must be finite".into()));
        }
        if self.min_amount < 0.0 {
            return Err(ReportError::Config(format!(
                "minimum amount {} is negative",
                self.min_amount
            )));
        }
        if self.min_amount >= self.max_amount {
            return Err(ReportError::Config(format!(
                "amount range [{}, {}) is empty",
                self.min_amount, self.max_amount
            )));
        }
        Ok(())
    }

    /// Path of the delimited table export.
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(CSV_FILE_NAME)
    }

    /// Path of the rendered chart image.
    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(CHART_FILE_NAME)
    }

    /// Path of the assembled PDF report.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    /// Returns whether `category` belongs to the configured set.
    pub fn knows_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Returns a copy rooted at a different output directory.
    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ReportConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_category_set_is_rejected() {
        let config = ReportConfig {
            categories: Vec::new(),
            ..ReportConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let config = ReportConfig {
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_amount_range_is_rejected() {
        let config = ReportConfig {
            min_amount: 900.0,
            max_amount: 50.0,
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn artifact_paths_live_under_output_dir() {
        let config = ReportConfig::default().with_output_dir("out");
        assert_eq!(config.csv_path(), PathBuf::from("out/sales_data.csv"));
        assert_eq!(config.chart_path(), PathBuf::from("out/chart.png"));
        assert_eq!(config.report_path(), PathBuf::from("out/report.pdf"));
    }
}
