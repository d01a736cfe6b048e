use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Export configuration for the paginator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportOptions {
    // Output
    pub filename: PathBuf,

    // Page geometry
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Uniform inset applied on all four sides of every page
    #[cfg_attr(feature = "serde", serde(alias = "margin"))]
    pub margin_mm: f32,

    // Rasterization
    pub oversample: u32,
    pub background: [u8; 3],
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_FILENAME),
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: DEFAULT_MARGIN_MM,
            oversample: DEFAULT_OVERSAMPLE,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl ExportOptions {
    /// Options writing to `filename` with the given margin, everything else default
    pub fn new(filename: impl Into<PathBuf>, margin_mm: f32) -> Self {
        Self {
            filename: filename.into(),
            margin_mm,
            ..Default::default()
        }
    }

    /// Page dimensions (width, height) in millimeters, orientation applied
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        self.paper_size.dimensions_with_orientation(self.orientation)
    }

    /// Printable area (width, height) in millimeters once margins are removed
    pub fn content_dimensions_mm(&self) -> (f32, f32) {
        let (w, h) = self.page_dimensions_mm();
        (w - 2.0 * self.margin_mm, h - 2.0 * self.margin_mm)
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes).map_err(|e| {
            PaginateError::Precondition(format!("Failed to parse config: {}", e))
        })?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            PaginateError::Precondition(format!("Failed to serialize config: {}", e))
        })?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.filename.as_os_str().is_empty() {
            return Err(PaginateError::Precondition(
                "No output file name specified".to_string(),
            ));
        }

        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(PaginateError::Precondition(format!(
                "Margin must be a non-negative number of millimeters, got {}",
                self.margin_mm
            )));
        }

        let (page_w, page_h) = self.page_dimensions_mm();
        if !(page_w > 0.0 && page_h > 0.0) {
            return Err(PaginateError::Precondition(format!(
                "Page size must be positive, got {}x{} mm",
                page_w, page_h
            )));
        }

        let (content_w, content_h) = self.content_dimensions_mm();
        if content_w <= 0.0 || content_h <= 0.0 {
            return Err(PaginateError::Precondition(format!(
                "A margin of {} mm leaves no printable area on a {}x{} mm page",
                self.margin_mm, page_w, page_h
            )));
        }

        if self.oversample == 0 || self.oversample > MAX_OVERSAMPLE {
            return Err(PaginateError::Precondition(format!(
                "Oversample factor must be between 1 and {}, got {}",
                MAX_OVERSAMPLE, self.oversample
            )));
        }

        Ok(())
    }
}
