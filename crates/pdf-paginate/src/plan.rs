//! Page planning
//!
//! Works out how a raster of a given size is cut into page slices. All
//! bookkeeping is done in whole source pixel rows; millimeter heights are
//! derived per slice and never accumulated.

use crate::constants::CAPACITY_EPSILON;
use crate::options::ExportOptions;
use crate::types::*;

/// A horizontal band of source rows, `y..y + height`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRange {
    pub y: u32,
    pub height: u32,
}

impl SliceRange {
    pub fn end(&self) -> u32 {
        self.y + self.height
    }
}

/// One output page: which rows of the raster it carries and where they land
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice {
    /// Zero-based page index
    pub index: usize,
    /// Source rows drawn on this page
    pub rows: SliceRange,
    /// Placement on the page in millimeters, from the top-left corner
    pub placement: Rect,
}

/// Complete pagination layout for one raster
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub raster_width: u32,
    pub raster_height: u32,
    /// Millimeters per source pixel
    pub scale: f64,
    /// Width of the placed image (page width minus both margins)
    pub image_width_mm: f64,
    /// Height of the whole raster once scaled to `image_width_mm`
    pub image_height_mm: f64,
    /// Source rows that fit on one page
    pub capacity_px: u32,
    pub slices: Vec<PageSlice>,
}

impl PagePlan {
    pub fn page_count(&self) -> usize {
        self.slices.len()
    }

    /// Sum of the rows carried by every page
    pub fn total_rows(&self) -> u32 {
        self.slices.iter().map(|s| s.rows.height).sum()
    }

    /// Height in millimeters a slice of `rows` pixel rows occupies on the page
    pub fn rows_to_mm(&self, rows: u32) -> f64 {
        rows as f64 * self.scale
    }
}

/// Split `total_rows` into consecutive bands of at most `capacity` rows.
///
/// The bands cover `0..total_rows` exactly once. A capacity of zero is
/// treated as one row per band.
pub fn slice_rows(total_rows: u32, capacity: u32) -> Vec<SliceRange> {
    let capacity = capacity.max(1);
    let mut slices = Vec::with_capacity(total_rows.div_ceil(capacity) as usize);

    let mut offset = 0;
    while offset < total_rows {
        let height = capacity.min(total_rows - offset);
        slices.push(SliceRange { y: offset, height });
        offset += height;
    }

    slices
}

/// Plan the pages for a raster of `raster_width` x `raster_height` pixels.
///
/// The raster is fitted to the printable width (aspect ratio preserved) and
/// cut into as many pages as its scaled height needs.
pub fn plan_pages(raster_width: u32, raster_height: u32, options: &ExportOptions) -> Result<PagePlan> {
    options.validate()?;

    if raster_width == 0 || raster_height == 0 {
        return Err(PaginateError::Precondition(format!(
            "Rendered sheet is empty ({}x{} px)",
            raster_width, raster_height
        )));
    }

    let (page_width_mm, page_height_mm) = options.page_dimensions_mm();
    let (content_width_mm, content_height_mm) = options.content_dimensions_mm();

    let image_width_mm = content_width_mm as f64;
    let scale = image_width_mm / raster_width as f64;
    let image_height_mm = raster_height as f64 * scale;
    let capacity_px = capacity_rows(content_height_mm as f64, scale);

    log::debug!(
        "Planning {}x{} px raster: scale {:.5} mm/px, {} rows per page",
        raster_width,
        raster_height,
        scale,
        capacity_px
    );

    let margin = options.margin_mm;
    let slices = slice_rows(raster_height, capacity_px)
        .into_iter()
        .enumerate()
        .map(|(index, rows)| PageSlice {
            index,
            rows,
            placement: Rect::new(
                margin,
                margin,
                image_width_mm as f32,
                (rows.height as f64 * scale) as f32,
            ),
        })
        .collect();

    Ok(PagePlan {
        page_width_mm,
        page_height_mm,
        margin_mm: margin,
        raster_width,
        raster_height,
        scale,
        image_width_mm,
        image_height_mm,
        capacity_px,
        slices,
    })
}

/// Whole source rows that fit in `content_height_mm` at `scale` mm per row
fn capacity_rows(content_height_mm: f64, scale: f64) -> u32 {
    let rows = (content_height_mm / scale + CAPACITY_EPSILON).floor();
    if rows < 1.0 {
        1
    } else if rows >= u32::MAX as f64 {
        u32::MAX
    } else {
        rows as u32
    }
}
