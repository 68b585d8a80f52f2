//! Font loading for the PDF engine.
//!
//! The report uses the Roboto family. The font files are not vendored; they
//! are expected under `assets/fonts` or in the directory named by the
//! `REPORT_FONTS_DIR` environment variable. `assets/fonts/README.md` explains
//! where to obtain them.

use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};

/// Name of the font family used by the report.
pub const FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable that overrides the font directory.
pub const FONTS_DIR_ENV: &str = "REPORT_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

fn font_directory() -> PathBuf {
    match std::env::var_os(FONTS_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    }
}

fn ensure_directory_exists(path: &Path) -> Result<(), Error> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::new(
            format!(
                "Font directory missing at {}. Set {} or see assets/fonts/README.md for setup.",
                path.display(),
                FONTS_DIR_ENV
            ),
            io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
        ))
    }
}

fn ensure_required_fonts_present(path: &Path) -> Result<(), Error> {
    let missing: Vec<_> = FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        let display_list = missing
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Err(Error::new(
            format!(
                "Missing font files: {}. See assets/fonts/README.md for instructions.",
                display_list
            ),
            io::Error::new(io::ErrorKind::NotFound, "report fonts missing"),
        ))
    }
}

/// Loads the Roboto font family for use in a `genpdf` document.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = font_directory();
    ensure_directory_exists(&directory)?;
    ensure_required_fonts_present(&directory)?;

    fonts::from_files(&directory, FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

/// Indicates whether all font files required for rendering are present.
///
/// Tests use this to skip PDF assertions on machines without the assets.
pub fn default_fonts_available() -> bool {
    let directory = font_directory();
    directory.exists()
        && FONT_FILES
            .iter()
            .map(|name| directory.join(name))
            .all(|path| path.is_file())
}
