//! Error types for the report pipeline.
//!
//! Every failure in the pipeline is fatal: the run aborts, nothing is retried
//! and no partial report is published. The variants cover input problems
//! with the table or configuration, filesystem and CSV failures, and
//! rendering failures in the chart or document layer.

use std::path::PathBuf;

use thiserror::Error;

/// The error type shared by all pipeline components.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The table holds no records, so mean/max/min are undefined.
    #[error("dataset is empty; summary statistics are undefined")]
    EmptyTable,

    /// A loaded record names a category outside the configured set.
    #[error("unknown category '{category}' in row {row}")]
    UnknownCategory { category: String, row: usize },

    /// A loaded record carries an unusable value (negative amount, NaN, ...).
    #[error("invalid record in row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// The run configuration is internally inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A filesystem operation on one of the artifacts failed.
    #[error("failed to {} {}: {}", action, path.display(), source)]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the delimited export failed.
    #[error("CSV error for {}: {}", path.display(), source)]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The chart backend failed to draw or encode the image.
    #[error("chart rendering failed: {0}")]
    Chart(String),

    /// The PDF layout engine rejected the document.
    #[error("document layout failed: {0}")]
    Document(#[from] genpdf::error::Error),
}

impl ReportError {
    /// Builds an I/O error that records the attempted action and path.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Builds a CSV error tagged with the file it concerns.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// True for problems with the input table or configuration.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyTable
                | Self::UnknownCategory { .. }
                | Self::InvalidRecord { .. }
                | Self::Config(_)
        )
    }

    /// True for filesystem and CSV failures.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Csv { .. })
    }

    /// True for chart or document rendering failures.
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Chart(_) | Self::Document(_))
    }
}

/// Result alias used throughout the crate.
pub type ReportResult<T> = Result<T, ReportError>;
