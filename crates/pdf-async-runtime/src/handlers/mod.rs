//! Command handlers run by the worker. Each one reports its outcome as a
//! `QuoteUpdate`; failures become `QuoteUpdate::Error` and never stop the
//! worker.

mod export;
mod quote;

pub(crate) use export::{handle_export, handle_export_quote, handle_plan_pages};
pub(crate) use quote::{handle_catalog_load, handle_quote_calculate};
