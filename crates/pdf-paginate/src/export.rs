//! Export orchestration
//!
//! 1. Rasterize the source once
//! 2. Plan the page slices
//! 3. Assemble the PDF in memory
//! 4. Write it out in one step, so a failed export leaves no file behind

use crate::options::ExportOptions;
use crate::plan::plan_pages;
use crate::raster::RasterSource;
use crate::render::build_document;
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Render `source` and write it as a paginated PDF to `options.filename`.
pub async fn export(source: Arc<dyn RasterSource>, options: &ExportOptions) -> Result<ExportReport> {
    options.validate()?;

    let options = options.clone();
    let filename = options.filename.clone();
    log::debug!("Rasterizing {}", source.describe());

    // Rasterizing and encoding are CPU-bound, spawn blocking
    let (doc, pages, raster_width, raster_height) = tokio::task::spawn_blocking(move || {
        let raster = source.rasterize(options.oversample, options.background)?;
        let plan = plan_pages(raster.width(), raster.height(), &options)?;
        let doc = build_document(&raster, &plan, &options)?;
        Ok::<_, PaginateError>((doc, plan.page_count(), raster.width(), raster.height()))
    })
    .await??;

    let bytes = save_pdf(doc, &filename).await?;

    log::info!(
        "Exported {} page(s) from a {}x{} px raster to {}",
        pages,
        raster_width,
        raster_height,
        filename.display()
    );

    Ok(ExportReport {
        path: filename,
        pages,
        raster_width,
        raster_height,
        bytes,
    })
}

/// Serialize `doc` and write it to `path`, returning the number of bytes written.
///
/// The bytes go to a sibling temporary file that is renamed into place, so
/// `path` either holds the complete document or is untouched.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)
            .map_err(|e| PaginateError::Render(format!("Failed to serialize PDF: {}", e)))?;
        Ok::<_, PaginateError>(writer)
    })
    .await??;

    let partial = partial_path(&path);
    if let Err(e) = tokio::fs::write(&partial, &bytes).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&partial, &path).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }

    Ok(bytes.len())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

/// Runs exports against one shared source, one at a time.
///
/// A request made while another export is still running is ignored rather
/// than queued, since both would read the same sheet.
#[derive(Debug, Default)]
pub struct Exporter {
    in_flight: Mutex<()>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an export is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Export unless another export is already in flight.
    ///
    /// Returns `Ok(None)` when the request was ignored.
    pub async fn try_export(
        &self,
        source: Arc<dyn RasterSource>,
        options: &ExportOptions,
    ) -> Result<Option<ExportReport>> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            log::warn!(
                "Export of {} ignored: another export is in progress",
                source.describe()
            );
            return Ok(None);
        };

        export(source, options).await.map(Some)
    }
}
