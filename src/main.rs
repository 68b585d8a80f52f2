use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use sales_report::config::{default_categories, ReportConfig};
use sales_report::pipeline;

/// Generates a PDF sales report from synthetic or imported transaction data.
///
/// Fonts must be present under `assets/fonts` or in the directory named by
/// the `REPORT_FONTS_DIR` environment variable; see assets/fonts/README.md.
#[derive(Parser)]
#[command(
    name = "sales-report",
    version,
    about = "Generates a paginated PDF sales report with summary tables and a category chart"
)]
struct Cli {
    /// Number of synthetic records to generate.
    #[arg(long, default_value_t = 120)]
    records: usize,

    /// Seed for the record generator.
    #[arg(long, default_value_t = 10)]
    seed: u64,

    /// First date records may fall on.
    #[arg(long, default_value = "2025-01-01")]
    start_date: NaiveDate,

    /// Last date records may fall on (defaults to 99 days after the start).
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Category set, comma separated (defaults to
    /// Electronics,Clothing,Books,Food).
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,

    /// Directory all artifacts are written beneath.
    #[arg(long, default_value = "report_output")]
    output_dir: PathBuf,

    /// Load records from an existing CSV instead of generating them.
    #[arg(long)]
    input: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        let defaults = ReportConfig::default();
        ReportConfig {
            record_count: self.records,
            seed: self.seed,
            start_date: self.start_date,
            end_date: self
                .end_date
                .unwrap_or(self.start_date + chrono::Duration::days(99)),
            categories: if self.categories.is_empty() {
                default_categories()
            } else {
                self.categories
            },
            output_dir: self.output_dir,
            input_csv: self.input,
            ..defaults
        }
    }
}

fn main() {
    env_logger::init();

    let config = Cli::parse().into_config();
    match pipeline::run(&config) {
        Ok(artifacts) => {
            println!(
                "Report generated successfully. Check the folder: {}",
                config.output_dir.display()
            );
            println!("  report: {}", artifacts.report_path.display());
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
