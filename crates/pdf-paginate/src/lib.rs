//! Raster pagination: render a printable sheet once, slice the tall bitmap
//! into page-sized strips and assemble them into a multi-page PDF.

mod constants;
pub mod export;
mod options;
mod plan;
mod raster;
mod render;
mod types;

pub use constants::*;
pub use export::{Exporter, export, save_pdf};
pub use options::*;
pub use plan::{PagePlan, PageSlice, SliceRange, plan_pages, slice_rows};
pub use raster::{FilterType, ImageFileSource, MemorySource, RasterImage, RasterSource};
pub use render::build_document;
pub use types::*;
