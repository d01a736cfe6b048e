use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;

mod handlers;
mod worker;

pub use worker::worker_task;

// Re-export types from library crates
pub use pdf_paginate::{ExportOptions, ExportReport, PagePlan};
pub use pdf_quote::{Catalog, QuoteHeader, QuoteSheet, Selection};

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Worker has shut down")]
    WorkerClosed,
}

/// Commands sent from the front end to the worker
#[derive(Debug)]
pub enum QuoteCommand {
    CatalogLoad {
        path: PathBuf,
    },
    QuoteCalculate {
        header: QuoteHeader,
        catalog: Catalog,
        selection: Selection,
        tax_rate: f64,
    },
    PlanPages {
        raster_width: u32,
        raster_height: u32,
        options: ExportOptions,
    },
    /// Rasterize the sheet image at `sheet_path` and write the paginated PDF
    Export {
        sheet_path: PathBuf,
        options: ExportOptions,
    },
    /// Draw a calculated quote sheet and write it as a paginated PDF
    ExportQuote {
        sheet: Box<QuoteSheet>,
        options: ExportOptions,
    },
}

impl QuoteCommand {
    /// Output file written by this command, if it is an export
    pub fn export_target(&self) -> Option<&Path> {
        match self {
            QuoteCommand::Export { options, .. } | QuoteCommand::ExportQuote { options, .. } => {
                Some(options.filename.as_path())
            }
            _ => None,
        }
    }
}

/// Updates sent from the worker to the front end
#[derive(Debug, Clone)]
pub enum QuoteUpdate {
    CatalogLoaded {
        catalog: Catalog,
        /// User-facing message when the catalog could not be read
        error: Option<String>,
    },
    QuoteCalculated {
        sheet: QuoteSheet,
    },
    PagesPlanned {
        plan: PagePlan,
    },
    ExportStarted {
        path: PathBuf,
    },
    ExportComplete {
        report: ExportReport,
    },
    Error {
        message: String,
    },
}

/// Front-end side of a running worker
pub struct WorkerHandle {
    command_tx: mpsc::UnboundedSender<QuoteCommand>,
    update_rx: mpsc::UnboundedReceiver<QuoteUpdate>,
}

impl WorkerHandle {
    /// Spawn the worker on the current tokio runtime
    pub fn spawn() -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        tokio::spawn(worker_task(command_rx, update_tx));
        Self {
            command_tx,
            update_rx,
        }
    }

    pub fn send(&self, cmd: QuoteCommand) -> Result<(), RuntimeError> {
        self.command_tx
            .send(cmd)
            .map_err(|_| RuntimeError::WorkerClosed)
    }

    /// Wait for the next update; `None` once the worker has stopped
    pub async fn next_update(&mut self) -> Option<QuoteUpdate> {
        self.update_rx.recv().await
    }

    /// Non-blocking poll for an update
    pub fn try_update(&mut self) -> Option<QuoteUpdate> {
        self.update_rx.try_recv().ok()
    }
}
