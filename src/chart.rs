//! Bar chart rendering for per-category totals.

use std::path::Path;

use plotters::prelude::*;

use crate::error::{ReportError, ReportResult};
use crate::stats::CategoryStats;

/// Width of the rendered chart in pixels.
pub const CHART_WIDTH: u32 = 600;
/// Height of the rendered chart in pixels.
pub const CHART_HEIGHT: u32 = 400;

const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);
const CHART_TITLE: &str = "Total Sales by Category";

fn chart_error(err: impl std::fmt::Display) -> ReportError {
    ReportError::Chart(err.to_string())
}

/// Renders one vertical bar per category (height = category total) as a PNG
/// at `path`.
///
/// The image always has the fixed [`CHART_WIDTH`] x [`CHART_HEIGHT`] size and
/// an existing file at `path` is overwritten. Rendering the same stats twice
/// yields an equivalent image.
pub fn render(categories: &[CategoryStats], path: &Path) -> ReportResult<()> {
    if categories.is_empty() {
        return Err(ReportError::EmptyTable);
    }

    let y_max = categories
        .iter()
        .map(|entry| entry.total)
        .fold(0.0_f64, f64::max);
    // headroom above the tallest bar; guard against an all-zero table
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (0u32..categories.len() as u32).into_segmented(),
            0.0..y_max,
        )
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Category")
        .y_desc("Total Sales")
        .x_labels(categories.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) if (*index as usize) < categories.len() => {
                categories[*index as usize].category.clone()
            }
            _ => String::new(),
        })
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(12)
                .data(
                    categories
                        .iter()
                        .enumerate()
                        .map(|(index, entry)| (index as u32, entry.total)),
                ),
        )
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> Vec<CategoryStats> {
        vec![
            CategoryStats {
                category: "Books".into(),
                count: 2,
                total: 300.0,
                mean: 150.0,
            },
            CategoryStats {
                category: "Food".into(),
                count: 1,
                total: 50.0,
                mean: 50.0,
            },
        ]
    }

    /// Text rendering needs a system font; environments without one cannot
    /// exercise the backend at all.
    fn skip_on_missing_fonts(err: &ReportError) -> bool {
        matches!(err, ReportError::Chart(message) if message.to_lowercase().contains("font"))
    }

    #[test]
    fn empty_stats_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = render(&[], &dir.path().join("chart.png")).unwrap_err();
        assert!(matches!(err, ReportError::EmptyTable));
    }

    #[test]
    fn renders_a_fixed_size_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        if let Err(err) = render(&sample_stats(), &path) {
            if skip_on_missing_fonts(&err) {
                eprintln!("Skipping renders_a_fixed_size_png: no system font available ({err})");
                return;
            }
            panic!("chart rendering failed: {err}");
        }

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0, "chart file should not be empty");

        let (width, height) = image::image_dimensions(&path).unwrap();
        assert_eq!((width, height), (CHART_WIDTH, CHART_HEIGHT));
    }

    #[test]
    fn rerendering_overwrites_the_previous_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        for _ in 0..2 {
            if let Err(err) = render(&sample_stats(), &path) {
                if skip_on_missing_fonts(&err) {
                    eprintln!(
                        "Skipping rerendering_overwrites_the_previous_chart: no system font available ({err})"
                    );
                    return;
                }
                panic!("chart rendering failed: {err}");
            }
        }

        assert!(path.is_file());
    }
}
