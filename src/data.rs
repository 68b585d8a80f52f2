//! Data source: synthetic record generation and CSV import/export.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::format::round_two;

/// A single transactional data point.
///
/// Records are immutable once produced; the aggregator only reads them. The
/// serde field names match the columns of the delimited export
/// (`Date, Category, Amount`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

/// Generates the configured number of synthetic records.
///
/// Dates are uniform over the configured range, categories uniform over the
/// configured set, and amounts uniform over the configured bounds rounded to
/// two decimals. The generator is seeded, so a fixed configuration always
/// yields the same table.
pub fn generate(config: &ReportConfig) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let span_days = (config.end_date - config.start_date).num_days();

    (0..config.record_count)
        .map(|_| {
            let offset = rng.gen_range(0..=span_days);
            let category = config.categories[rng.gen_range(0..config.categories.len())].clone();
            Record {
                date: config.start_date + Duration::days(offset),
                category,
                amount: round_two(rng.gen_range(config.min_amount..config.max_amount)),
            }
        })
        .collect()
}

/// Writes the table to `path` as CSV with a `Date,Category,Amount` header.
pub fn export_csv(records: &[Record], path: &Path) -> ReportResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| ReportError::csv(path, err))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|err| ReportError::csv(path, err))?;
    }
    writer
        .flush()
        .map_err(|err| ReportError::io("write", path, err))?;
    Ok(())
}

/// Loads a table from an existing CSV export.
///
/// The file must carry the `Date,Category,Amount` header. Every record is
/// validated against the configured category set and must carry a finite,
/// non-negative amount; the first offending row aborts the load. Row numbers
/// in errors count data rows from 1.
pub fn load_csv(path: &Path, config: &ReportConfig) -> ReportResult<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| ReportError::csv(path, err))?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<Record>().enumerate() {
        let row_number = index + 1;
        // an unparseable date or amount is a problem with the table, not the
        // filesystem
        let record = match row {
            Ok(record) => record,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => {
                return Err(ReportError::InvalidRecord {
                    row: row_number,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(ReportError::csv(path, err)),
        };

        if !config.knows_category(&record.category) {
            return Err(ReportError::UnknownCategory {
                category: record.category,
                row: row_number,
            });
        }
        if !record.amount.is_finite() {
            return Err(ReportError::InvalidRecord {
                row: row_number,
                reason: format!("amount '{}' is not a finite number", record.amount),
            });
        }
        if record.amount < 0.0 {
            return Err(ReportError::InvalidRecord {
                row: row_number,
                reason: format!("amount {} is negative", record.amount),
            });
        }

        records.push(record);
    }

    Ok(records)
}
