//! Rasterized quote sheet
//!
//! Draws the printable text layout into a bitmap so the paginator can export
//! a quote like any other rendered sheet.

use crate::sheet::QuoteSheet;
use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, iso_8859_1::FONT_10X20},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use image::{Rgb, RgbImage};
use pdf_paginate::{
    ExportOptions, ExportReport, FilterType, MAX_RASTER_BYTES, PaginateError, RasterImage,
    RasterSource,
};
use std::convert::Infallible;
use std::sync::Arc;

/// Blank border around the text block, in pixels at 1x
const PADDING_PX: u32 = 24;

/// Extra leading between text lines, in pixels at 1x
const LINE_GAP_PX: u32 = 4;

fn sheet_font() -> &'static MonoFont<'static> {
    &FONT_10X20
}

/// A quote sheet as a raster source: black monospaced text on the export
/// background, one text line per `render_text` line.
#[derive(Debug, Clone)]
pub struct QuoteSheetSource {
    lines: Vec<String>,
}

impl QuoteSheetSource {
    pub fn new(sheet: &QuoteSheet) -> Self {
        Self {
            lines: sheet.render_text().lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Bitmap dimensions (width, height) before oversampling
    pub fn natural_size(&self) -> (u32, u32) {
        let font = sheet_font();
        let advance = font.character_size.width + font.character_spacing;
        let line_height = font.character_size.height + LINE_GAP_PX;
        let columns = self
            .lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let width = u32::try_from(columns)
            .unwrap_or(u32::MAX)
            .saturating_mul(advance)
            .saturating_add(2 * PADDING_PX);
        let height = u32::try_from(self.lines.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(line_height)
            .saturating_add(2 * PADDING_PX);
        (width, height)
    }
}

impl RasterSource for QuoteSheetSource {
    fn describe(&self) -> String {
        format!("quote sheet ({} lines)", self.lines.len())
    }

    fn rasterize(&self, oversample: u32, background: [u8; 3]) -> pdf_paginate::Result<RasterImage> {
        let (width, height) = self.natural_size();
        let bytes = width as u64 * height as u64 * 3;
        if bytes > MAX_RASTER_BYTES {
            return Err(PaginateError::Render(format!(
                "Quote sheet of {}x{} px exceeds the {} byte raster limit",
                width, height, MAX_RASTER_BYTES
            )));
        }

        let mut canvas = Canvas(RgbImage::from_pixel(width, height, Rgb(background)));
        let Ok(()) = draw_lines(&mut canvas, &self.lines);

        // Nearest keeps the glyph edges sharp when upscaling
        RasterImage::from_rgb(canvas.0).oversampled(oversample, FilterType::Nearest)
    }
}

/// Draw each line top-down inside the padding
fn draw_lines<D>(display: &mut D, lines: &[String]) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let font = sheet_font();
    let style = MonoTextStyle::new(font, Rgb888::BLACK);
    let line_height = (font.character_size.height + LINE_GAP_PX) as i32;

    let mut origin = Point::new(PADDING_PX as i32, PADDING_PX as i32);
    for line in lines {
        if !line.trim().is_empty() {
            Text::with_baseline(line, origin, style, Baseline::Top).draw(display)?;
        }
        origin.y += line_height;
    }
    Ok(())
}

/// `DrawTarget` over an RGB buffer; pixels outside the buffer are dropped
struct Canvas(RgbImage);

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.0.width(), self.0.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x < self.0.width() && y < self.0.height() {
                self.0.put_pixel(x, y, Rgb([color.r(), color.g(), color.b()]));
            }
        }
        Ok(())
    }
}

/// Rasterize `sheet` and write it as a paginated PDF to `options.filename`
pub async fn export_quote(
    sheet: &QuoteSheet,
    options: &ExportOptions,
) -> pdf_paginate::Result<ExportReport> {
    let source: Arc<dyn RasterSource> = Arc::new(QuoteSheetSource::new(sheet));
    pdf_paginate::export(source, options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(lines: &[&str]) -> QuoteSheetSource {
        QuoteSheetSource {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_natural_size_follows_longest_line() {
        let (width, height) = source(&["ab", "abcd", ""]).natural_size();
        assert_eq!(width, 4 * 10 + 2 * PADDING_PX);
        assert_eq!(height, 3 * (20 + LINE_GAP_PX) + 2 * PADDING_PX);
    }

    #[test]
    fn test_rasterize_draws_ink_on_background() {
        let raster = source(&["TOTAL: S/ 212.40"])
            .rasterize(1, [255, 255, 255])
            .unwrap();
        let pixels = raster.as_rgb();

        assert_eq!(pixels.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert!(pixels.pixels().any(|px| px == &Rgb([0, 0, 0])));
    }

    #[test]
    fn test_rasterize_applies_oversample() {
        let sheet = source(&["x"]);
        let (width, height) = sheet.natural_size();
        let raster = sheet.rasterize(3, [255, 255, 255]).unwrap();
        assert_eq!((raster.width(), raster.height()), (width * 3, height * 3));
    }
}
