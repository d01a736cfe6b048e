use crate::QuoteUpdate;
use pdf_paginate::{ExportOptions, ImageFileSource, RasterSource, export, plan_pages};
use pdf_quote::{QuoteSheet, QuoteSheetSource};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub(crate) fn handle_plan_pages(
    raster_width: u32,
    raster_height: u32,
    options: &ExportOptions,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    match plan_pages(raster_width, raster_height, options) {
        Ok(plan) => {
            let _ = update_tx.send(QuoteUpdate::PagesPlanned { plan });
        }
        Err(e) => {
            let _ = update_tx.send(QuoteUpdate::Error {
                message: format!("Failed to plan pages: {e}"),
            });
        }
    }
}

pub(crate) async fn handle_export(
    sheet_path: PathBuf,
    options: ExportOptions,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    let source: Arc<dyn RasterSource> = Arc::new(ImageFileSource::new(sheet_path));
    run_export(source, options, update_tx).await;
}

pub(crate) async fn handle_export_quote(
    sheet: &QuoteSheet,
    options: ExportOptions,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    let source: Arc<dyn RasterSource> = Arc::new(QuoteSheetSource::new(sheet));
    run_export(source, options, update_tx).await;
}

async fn run_export(
    source: Arc<dyn RasterSource>,
    options: ExportOptions,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    let _ = update_tx.send(QuoteUpdate::ExportStarted {
        path: options.filename.clone(),
    });

    match export(source, &options).await {
        Ok(report) => {
            let _ = update_tx.send(QuoteUpdate::ExportComplete { report });
        }
        Err(e) => {
            log::warn!("Export to {} failed: {}", options.filename.display(), e);
            let _ = update_tx.send(QuoteUpdate::Error {
                message: format!("Failed to export PDF: {e}"),
            });
        }
    }
}
