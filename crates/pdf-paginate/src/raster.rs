//! Raster sources
//!
//! A source is the printable sheet: something that renders itself to one
//! opaque bitmap at a requested oversampling factor.

use crate::constants::MAX_RASTER_BYTES;
use crate::plan::SliceRange;
use crate::types::*;
use image::imageops;
pub use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Immutable RGB bitmap produced by rendering a source once
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbImage,
}

impl RasterImage {
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Composite `image` over an opaque `background`, dropping any alpha
    pub fn flatten(image: &DynamicImage, background: [u8; 3]) -> Self {
        let rgba = image.to_rgba8();
        let mut pixels = RgbImage::new(rgba.width(), rgba.height());

        for (x, y, px) in rgba.enumerate_pixels() {
            let [r, g, b, a] = px.0;
            pixels.put_pixel(
                x,
                y,
                Rgb([
                    blend(r, background[0], a),
                    blend(g, background[1], a),
                    blend(b, background[2], a),
                ]),
            );
        }

        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Copy out a full-width band of rows as its own buffer
    pub fn slice(&self, rows: SliceRange) -> RgbImage {
        imageops::crop_imm(&self.pixels, 0, rows.y, self.width(), rows.height).to_image()
    }

    /// Upscale by an integer factor; a factor of 1 returns the image unchanged.
    ///
    /// Fails with `PaginateError::Render` when the upscaled raster would not
    /// fit in `MAX_RASTER_BYTES`.
    pub fn oversampled(self, factor: u32, filter: FilterType) -> Result<Self> {
        if factor <= 1 {
            return Ok(self);
        }

        let too_large = || {
            PaginateError::Render(format!(
                "Oversampling a {}x{} px raster by {} exceeds the {} byte raster limit",
                self.width(),
                self.height(),
                factor,
                MAX_RASTER_BYTES
            ))
        };
        let width = self.width().checked_mul(factor).ok_or_else(too_large)?;
        let height = self.height().checked_mul(factor).ok_or_else(too_large)?;
        let bytes = (width as u64)
            .checked_mul(height as u64)
            .and_then(|px| px.checked_mul(3))
            .ok_or_else(too_large)?;
        if bytes > MAX_RASTER_BYTES {
            return Err(too_large());
        }

        Ok(Self {
            pixels: imageops::resize(&self.pixels, width, height, filter),
        })
    }
}

/// Straight alpha blend of one channel over an opaque background channel
fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u16;
    ((fg as u16 * a + bg as u16 * (255 - a) + 127) / 255) as u8
}

/// Anything that can be rendered to a single bitmap for export
pub trait RasterSource: Send + Sync {
    /// Human readable name used in logs and errors
    fn describe(&self) -> String;

    /// Render once at `oversample`x against an opaque `background`.
    ///
    /// Returns `PaginateError::Precondition` when there is nothing to render
    /// and `PaginateError::Render` when rendering itself fails.
    fn rasterize(&self, oversample: u32, background: [u8; 3]) -> Result<RasterImage>;
}

/// A pre-rendered sheet stored as an image file (PNG or JPEG)
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterSource for ImageFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn rasterize(&self, oversample: u32, background: [u8; 3]) -> Result<RasterImage> {
        if !self.path.is_file() {
            return Err(PaginateError::Precondition(format!(
                "Source sheet not found: {}",
                self.path.display()
            )));
        }

        let decoded = ImageReader::open(&self.path)
            .map_err(|e| {
                PaginateError::Render(format!("Failed to open {}: {}", self.path.display(), e))
            })?
            .with_guessed_format()
            .map_err(|e| {
                PaginateError::Render(format!("Failed to read {}: {}", self.path.display(), e))
            })?
            .decode()?;

        RasterImage::flatten(&decoded, background).oversampled(oversample, FilterType::CatmullRom)
    }
}

/// An already decoded image held in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    image: DynamicImage,
}

impl MemorySource {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }
}

impl RasterSource for MemorySource {
    fn describe(&self) -> String {
        format!("in-memory {}x{} image", self.image.width(), self.image.height())
    }

    fn rasterize(&self, oversample: u32, background: [u8; 3]) -> Result<RasterImage> {
        if self.image.width() == 0 || self.image.height() == 0 {
            return Err(PaginateError::Precondition(
                "Source image has no pixels".to_string(),
            ));
        }
        RasterImage::flatten(&self.image, background).oversampled(oversample, FilterType::CatmullRom)
    }
}
