//! Layout elements built on top of `genpdf` primitives.
//!
//! Adds image decoding helpers with descriptive errors and a captioned figure
//! element used to place the chart inside the report at a fixed size.

use std::path::Path;

use image::GenericImageView;

use genpdf::elements::{Image, Paragraph};
use genpdf::error::{Context as _, Error};
use genpdf::style::Style;
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Scale, Size};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const DEFAULT_CAPTION_SPACING_MM: f64 = 2.0;

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from the given path using the [`image`] crate with
/// descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

fn image_from_dynamic(image: image::DynamicImage) -> Result<(Image, Size), Error> {
    let size = estimated_image_size(&image, DEFAULT_IMAGE_DPI);
    let image = Image::from_dynamic_image(image)?;
    Ok((image, size))
}

/// Converts the image at `path` into a `genpdf` image together with its
/// estimated natural size.
pub fn image_from_path(path: impl AsRef<Path>) -> Result<(Image, Size), Error> {
    let dynamic = decode_image_from_path(path)?;
    image_from_dynamic(dynamic)
}

fn default_caption_spacing() -> Mm {
    mm_from_f64(DEFAULT_CAPTION_SPACING_MM)
}

/// An image with a caption paragraph stacked underneath.
///
/// Image and caption share the same alignment. The image can be scaled to a
/// requested width (aspect ratio preserved) or to an explicit width and
/// height, which is how the report pins the chart to its fixed figure size.
pub struct CaptionedImage {
    image: Image,
    caption: Paragraph,
    alignment: Alignment,
    natural_size: Size,
    requested_width: Option<Mm>,
    requested_height: Option<Mm>,
    spacing: Mm,
}

impl CaptionedImage {
    fn new(image: Image, caption: Paragraph, natural_size: Size) -> Self {
        let mut element = Self {
            image,
            caption,
            alignment: Alignment::Left,
            natural_size,
            requested_width: None,
            requested_height: None,
            spacing: default_caption_spacing(),
        };
        element.apply_alignment();
        element
    }

    /// Creates a captioned image from the file located at `path`.
    pub fn from_path(path: impl AsRef<Path>, caption: Paragraph) -> Result<Self, Error> {
        let (image, size) = image_from_path(path)?;
        Ok(Self::new(image, caption, size))
    }

    /// Sets the horizontal alignment used by both the image and the caption.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self.apply_alignment();
        self
    }

    /// Constrains the rendered width; the aspect ratio is preserved unless a
    /// height is also requested.
    pub fn with_width(mut self, width: impl Into<Option<Mm>>) -> Self {
        self.requested_width = width.into();
        self.apply_scale();
        self
    }

    /// Constrains the rendered height.
    pub fn with_height(mut self, height: impl Into<Option<Mm>>) -> Self {
        self.requested_height = height.into();
        self.apply_scale();
        self
    }

    fn apply_alignment(&mut self) {
        self.image.set_alignment(self.alignment);
        self.caption.set_alignment(self.alignment);
    }

    fn scale_factor(requested: Option<Mm>, natural: Mm) -> Option<f64> {
        let requested = mm_to_f64(requested?);
        let natural = mm_to_f64(natural);
        (natural > f64::EPSILON).then(|| requested / natural)
    }

    fn apply_scale(&mut self) {
        let width_scale = Self::scale_factor(self.requested_width, self.natural_size.width);
        let height_scale = Self::scale_factor(self.requested_height, self.natural_size.height);

        let scale = match (width_scale, height_scale) {
            (Some(x), Some(y)) => Scale::new(x, y),
            (Some(x), None) => Scale::new(x, x),
            (None, Some(y)) => Scale::new(y, y),
            (None, None) => Scale::new(1.0, 1.0),
        };
        self.image.set_scale(scale);
    }
}

impl Element for CaptionedImage {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        self.apply_alignment();
        self.apply_scale();

        let mut result = RenderResult::default();
        let image_result = self.image.render(context, area.clone(), style)?;
        result.size = result.size.stack_vertical(image_result.size);
        result.has_more |= image_result.has_more;

        let spacing = self.spacing;
        area.add_offset(Position::new(0, image_result.size.height + spacing));
        if mm_to_f64(spacing) > 0.0 {
            result.size = result.size.stack_vertical(Size::new(0, spacing));
        }

        let caption_result = self.caption.render(context, area, style)?;
        result.size = result.size.stack_vertical(caption_result.size);
        result.has_more |= caption_result.has_more;

        Ok(result)
    }
}
