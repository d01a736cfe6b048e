//! Quotation model: product catalog, line selection, derived rows and
//! totals, and the printable quote sheet with its PDF export.

mod catalog;
mod header;
mod money;
mod render;
mod selection;
mod sheet;
mod totals;
mod types;

pub use catalog::{Catalog, CatalogLoad, load_catalog, load_catalog_or_empty};
pub use header::{ClientInfo, CompanyInfo, QuoteHeader, VendorInfo};
pub use money::format_money;
pub use render::{QuoteSheetSource, export_quote};
pub use selection::{LineField, LineInput, Selection};
pub use sheet::QuoteSheet;
pub use totals::{DEFAULT_TAX_RATE, QuoteRow, Totals, clamp_discount, clamp_quantity, line_subtotal};
pub use types::*;
