use crate::QuoteUpdate;
use pdf_quote::{Catalog, QuoteHeader, QuoteSheet, Selection, load_catalog_or_empty};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub(crate) async fn handle_catalog_load(
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    let load = load_catalog_or_empty(&path).await;
    let _ = update_tx.send(QuoteUpdate::CatalogLoaded {
        catalog: load.catalog,
        error: load.error,
    });
}

pub(crate) fn handle_quote_calculate(
    header: QuoteHeader,
    catalog: &Catalog,
    selection: &Selection,
    tax_rate: f64,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    let sheet = QuoteSheet::new(header, catalog, selection, tax_rate);
    let _ = update_tx.send(QuoteUpdate::QuoteCalculated { sheet });
}
