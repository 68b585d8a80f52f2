//! Aggregation of record tables into summary and per-category statistics.
//!
//! Pure functions of the table: no side effects, no mutation of the input.
//! An empty table is a reportable error rather than a row of NaN.

use crate::data::Record;
use crate::error::{ReportError, ReportResult};

/// Aggregate statistics over the entire table.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Aggregate statistics for one category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryStats {
    pub category: String,
    pub count: usize,
    pub total: f64,
    pub mean: f64,
}

/// Summary and per-category statistics computed together in one pass.
///
/// Category rows appear in the order their category was first encountered in
/// the table.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregates {
    pub summary: SummaryStats,
    pub categories: Vec<CategoryStats>,
}

impl Aggregates {
    /// Computes both aggregate views from the table.
    ///
    /// Fails with [`ReportError::EmptyTable`] when there are no records,
    /// since mean, max and min are undefined.
    pub fn from_records(records: &[Record]) -> ReportResult<Self> {
        let first = records.first().ok_or(ReportError::EmptyTable)?;

        let mut total = 0.0;
        let mut max = first.amount;
        let mut min = first.amount;
        let mut categories: Vec<CategoryStats> = Vec::new();

        for record in records {
            total += record.amount;
            max = max.max(record.amount);
            min = min.min(record.amount);

            match categories
                .iter_mut()
                .find(|entry| entry.category == record.category)
            {
                Some(entry) => {
                    entry.count += 1;
                    entry.total += record.amount;
                }
                None => categories.push(CategoryStats {
                    category: record.category.clone(),
                    count: 1,
                    total: record.amount,
                    mean: 0.0,
                }),
            }
        }

        for entry in &mut categories {
            entry.mean = entry.total / entry.count as f64;
        }

        Ok(Self {
            summary: SummaryStats {
                count: records.len(),
                total,
                mean: total / records.len() as f64,
                max,
                min,
            },
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::config::ReportConfig;
    use crate::data::generate;

    const EPSILON: f64 = 1e-9;

    fn record(day: u32, category: &str, amount: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            category: category.into(),
            amount,
        }
    }

    fn scenario_table() -> Vec<Record> {
        vec![
            record(1, "Books", 100.0),
            record(2, "Books", 200.0),
            record(3, "Food", 50.0),
        ]
    }

    #[test]
    fn empty_table_is_an_error() {
        let err = Aggregates::from_records(&[]).unwrap_err();
        assert!(matches!(err, ReportError::EmptyTable));
    }

    #[test]
    fn worked_scenario_matches_expected_stats() {
        let aggregates = Aggregates::from_records(&scenario_table()).unwrap();

        let summary = &aggregates.summary;
        assert_eq!(summary.count, 3);
        assert!((summary.total - 350.0).abs() < EPSILON);
        assert!((summary.mean - 350.0 / 3.0).abs() < EPSILON);
        assert!((summary.max - 200.0).abs() < EPSILON);
        assert!((summary.min - 50.0).abs() < EPSILON);

        assert_eq!(aggregates.categories.len(), 2);
        let books = &aggregates.categories[0];
        assert_eq!(books.category, "Books");
        assert_eq!(books.count, 2);
        assert!((books.total - 300.0).abs() < EPSILON);
        assert!((books.mean - 150.0).abs() < EPSILON);

        let food = &aggregates.categories[1];
        assert_eq!(food.category, "Food");
        assert_eq!(food.count, 1);
        assert!((food.total - 50.0).abs() < EPSILON);
        assert!((food.mean - 50.0).abs() < EPSILON);
    }

    #[test]
    fn categories_keep_first_encounter_order() {
        let table = vec![
            record(1, "Food", 10.0),
            record(2, "Books", 20.0),
            record(3, "Food", 30.0),
        ];
        let aggregates = Aggregates::from_records(&table).unwrap();
        let order: Vec<_> = aggregates
            .categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, ["Food", "Books"]);
    }

    #[test]
    fn category_counts_and_totals_sum_to_the_summary() {
        let config = ReportConfig {
            record_count: 200,
            ..ReportConfig::default()
        };
        let records = generate(&config);
        let aggregates = Aggregates::from_records(&records).unwrap();

        let count: usize = aggregates.categories.iter().map(|c| c.count).sum();
        let total: f64 = aggregates.categories.iter().map(|c| c.total).sum();

        assert_eq!(aggregates.summary.count, count);
        assert!((aggregates.summary.total - total).abs() < 1e-6);
    }

    #[test]
    fn mean_lies_between_min_and_max() {
        let records = generate(&ReportConfig::default());
        let summary = Aggregates::from_records(&records).unwrap().summary;
        assert!(summary.max >= summary.mean);
        assert!(summary.mean >= summary.min);
    }
}
