//! Report assembly: builds the paginated PDF from the computed statistics and
//! the rendered chart.
//!
//! The document is rendered to bytes first and only then published to the
//! output path via a temporary sibling file and a rename, so an aborted run
//! never leaves a truncated PDF behind.

use std::fs;
use std::path::Path;

use chrono::Local;
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Element, Margins, Mm, PaperSize};

use crate::document::DocumentBuilder;
use crate::elements::CaptionedImage;
use crate::error::{ReportError, ReportResult};
use crate::format;
use crate::stats::Aggregates;

const REPORT_TITLE: &str = "Automated Sales Report";
const PAGE_MARGIN_MM: f64 = 20.0;
const FOOTER_HEIGHT_MM: f64 = 10.0;
const CHART_WIDTH_MM: f64 = 140.0;
const CHART_HEIGHT_MM: f64 = 80.0;

fn mm(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

fn heading(text: &str, size: u8) -> impl Element {
    Paragraph::new(text).styled(Style::new().bold().with_font_size(size))
}

fn value_cell(text: String) -> impl Element {
    Paragraph::new(text).aligned(Alignment::Right).padded(Margins::all(1))
}

fn summary_table(aggregates: &Aggregates) -> ReportResult<TableLayout> {
    let summary = &aggregates.summary;
    let rows = [
        ("Total Transactions", format::count(summary.count)),
        ("Total Amount", format::thousands(summary.total)),
        ("Average Amount", format::thousands(summary.mean)),
        ("Highest Sale", format::thousands(summary.max)),
        ("Lowest Sale", format::thousands(summary.min)),
    ];

    let mut table = TableLayout::new(vec![2, 1]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    for (label, value) in rows {
        table
            .row()
            .element(Paragraph::new(label).padded(Margins::all(1)))
            .element(value_cell(value))
            .push()?;
    }
    Ok(table)
}

fn category_table(aggregates: &Aggregates) -> ReportResult<TableLayout> {
    let mut table = TableLayout::new(vec![2, 1, 1, 1]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let header = Style::new().bold();
    table
        .row()
        .element(Paragraph::new(StyledString::new("Category", header)).padded(Margins::all(1)))
        .element(Paragraph::new(StyledString::new("Count", header)).padded(Margins::all(1)))
        .element(Paragraph::new(StyledString::new("Total", header)).padded(Margins::all(1)))
        .element(Paragraph::new(StyledString::new("Mean", header)).padded(Margins::all(1)))
        .push()?;

    for entry in &aggregates.categories {
        table
            .row()
            .element(Paragraph::new(entry.category.clone()).padded(Margins::all(1)))
            .element(value_cell(format::count(entry.count)))
            .element(value_cell(format::thousands(entry.total)))
            .element(value_cell(format::thousands(entry.mean)))
            .push()?;
    }
    Ok(table)
}

fn chart_figure(chart_path: &Path) -> ReportResult<CaptionedImage> {
    let caption = Paragraph::new(StyledString::new(
        "Total sales by category",
        Style::new().italic().with_font_size(9),
    ));
    let figure = CaptionedImage::from_path(chart_path, caption)?
        .with_alignment(Alignment::Center)
        .with_width(mm(CHART_WIDTH_MM))
        .with_height(mm(CHART_HEIGHT_MM));
    Ok(figure)
}

/// Renders the complete report document to PDF bytes.
///
/// The chart must already exist at `chart_path`; a missing file is reported
/// as an I/O error before any layout work starts.
pub fn render_to_bytes(aggregates: &Aggregates, chart_path: &Path) -> ReportResult<Vec<u8>> {
    if !chart_path.is_file() {
        return Err(ReportError::io(
            "read",
            chart_path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "chart image not found"),
        ));
    }

    let mut document = DocumentBuilder::new()
        .with_title(REPORT_TITLE)
        .with_paper_size(PaperSize::A4)
        .with_margins(Margins::all(mm(PAGE_MARGIN_MM)))
        .with_footer(mm(FOOTER_HEIGHT_MM), |page| {
            Paragraph::new(StyledString::new(
                format!("Page {page}"),
                Style::new().with_font_size(9),
            ))
            .aligned(Alignment::Center)
        })
        .build()?;

    document.push(
        Paragraph::new(StyledString::new(
            REPORT_TITLE,
            Style::new().bold().with_font_size(20),
        ))
        .aligned(Alignment::Center),
    );
    document.push(Break::new(1.0));
    document.push(Paragraph::new(format!(
        "Generated on: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )));
    document.push(Break::new(1.5));

    document.push(heading("Summary Statistics", 14));
    document.push(Break::new(0.5));
    document.push(summary_table(aggregates)?);
    document.push(Break::new(1.0));

    document.push(heading("Category Totals", 14));
    document.push(Break::new(0.5));
    document.push(category_table(aggregates)?);
    document.push(Break::new(1.0));

    document.push(heading("Visual Summary", 14));
    document.push(Break::new(0.5));
    document.push(chart_figure(chart_path)?);
    document.push(Break::new(1.5));

    document.push(Paragraph::new(StyledString::new(
        "Generated automatically by the sales-report pipeline.",
        Style::new().italic().with_font_size(9),
    )));

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}

/// Assembles the report and publishes it at `output_path`.
///
/// Writes to a temporary sibling path and renames on success, so the target
/// either holds the previous document or the complete new one.
pub fn assemble(
    aggregates: &Aggregates,
    chart_path: &Path,
    output_path: &Path,
) -> ReportResult<()> {
    let bytes = render_to_bytes(aggregates, chart_path)?;

    let mut tmp_path = output_path.to_path_buf();
    tmp_path.set_extension("pdf.tmp");

    fs::write(&tmp_path, &bytes).map_err(|err| ReportError::io("write", &tmp_path, err))?;
    fs::rename(&tmp_path, output_path)
        .map_err(|err| ReportError::io("rename", output_path, err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageBuffer, ImageOutputFormat, Rgb};

    use super::*;
    use crate::data::Record;
    use crate::stats::Aggregates;

    fn sample_aggregates() -> Aggregates {
        let records = vec![
            Record {
                date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                category: "Books".into(),
                amount: 100.0,
            },
            Record {
                date: chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                category: "Books".into(),
                amount: 200.0,
            },
            Record {
                date: chrono::NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
                category: "Food".into(),
                amount: 50.0,
            },
        ];
        Aggregates::from_records(&records).unwrap()
    }

    fn write_placeholder_chart(path: &Path) {
        let buffer = ImageBuffer::from_fn(60, 40, |x, _| {
            if x < 30 {
                Rgb([135u8, 206, 235])
            } else {
                Rgb([255u8, 255, 255])
            }
        });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        fs::write(path, bytes).unwrap();
    }

    fn page_count(bytes: &[u8]) -> usize {
        let page_needle: &[u8] = b"/Type /Page";
        let pages_needle: &[u8] = b"/Type /Pages";
        let pages = bytes
            .windows(page_needle.len())
            .filter(|window| *window == page_needle)
            .count();
        let pages_nodes = bytes
            .windows(pages_needle.len())
            .filter(|window| *window == pages_needle)
            .count();
        pages - pages_nodes
    }

    #[test]
    fn missing_chart_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_to_bytes(&sample_aggregates(), &dir.path().join("absent.png"))
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn assembles_a_non_empty_single_page_document() {
        if !crate::fonts::default_fonts_available() {
            eprintln!(
                "Skipping assembles_a_non_empty_single_page_document: fonts missing. \
                 Set REPORT_FONTS_DIR or install assets/fonts."
            );
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let chart_path = dir.path().join("chart.png");
        write_placeholder_chart(&chart_path);

        let output_path = dir.path().join("report.pdf");
        assemble(&sample_aggregates(), &chart_path, &output_path).unwrap();

        let bytes = fs::read(&output_path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(page_count(&bytes) >= 1);
        assert!(
            !dir.path().join("report.pdf.tmp").exists(),
            "temporary file should be renamed away"
        );
    }
}
