//! Shared constants for raster pagination
//!
//! This module centralizes magic numbers and defaults used throughout
//! the export process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Export Defaults
// =============================================================================

/// File name used when the caller does not supply one
pub const DEFAULT_FILENAME: &str = "export.pdf";

/// Uniform page margin in millimeters
pub const DEFAULT_MARGIN_MM: f32 = 10.0;

/// Oversampling factor applied when rasterizing the source
pub const DEFAULT_OVERSAMPLE: u32 = 2;

/// Largest oversampling factor accepted by the exporter
pub const MAX_OVERSAMPLE: u32 = 8;

/// Upper bound on the bytes of one RGB raster, checked before resampling
pub const MAX_RASTER_BYTES: u64 = 512 * 1024 * 1024;

/// Opaque background the source is flattened onto (white)
pub const DEFAULT_BACKGROUND: [u8; 3] = [0xff, 0xff, 0xff];

// =============================================================================
// Pagination
// =============================================================================

/// Slack allowed when flooring the page capacity to whole pixel rows, so an
/// exact quotient computed in floating point is not rounded down by one.
pub const CAPACITY_EPSILON: f64 = 1e-6;

/// PDF version written by the exporter
pub const PDF_VERSION: &str = "1.7";

/// Producer string stored in the document info dictionary
pub const PRODUCER: &str = "pdf-paginate";
