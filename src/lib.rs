//! Library for generating a paginated PDF sales report from tabular data.
//!
//! The pipeline runs four components in sequence: a data source that
//! synthesizes or loads `{date, category, amount}` records, an aggregator
//! computing overall and per-category statistics, a chart renderer producing
//! a bar chart PNG, and a report assembler laying out the PDF document.

pub mod chart;
pub mod config;
pub mod data;
pub mod document;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod format;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use pipeline::{run, RunArtifacts};
