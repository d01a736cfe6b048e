use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_paginate::{ExportOptions, ImageFileSource, RasterSource};
use pdf_quote::{ProductId, QuoteHeader, QuoteSheet, Selection, format_money};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pdfq", about = "Product quotation CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the products in a catalog
    Catalog {
        /// Catalog JSON file (array of {id, sku, name, price, image})
        #[arg(short, long, default_value = "products.json")]
        catalog: PathBuf,
    },

    /// Price a selection of products and print the quote sheet
    Quote {
        /// Catalog JSON file
        #[arg(short, long, default_value = "products.json")]
        catalog: PathBuf,

        /// Selected line as ID=QTY or ID=QTY:DISCOUNT_PCT (repeatable)
        #[arg(short, long = "select", value_parser = parse_selection)]
        selections: Vec<SelectionArg>,

        /// Tax rate as a fraction
        #[arg(long, default_value_t = pdf_quote::DEFAULT_TAX_RATE)]
        tax_rate: f64,

        /// Header metadata JSON file (company, client, vendor, notes)
        #[arg(long)]
        header: Option<PathBuf>,

        /// Print rows and totals as JSON instead of the text sheet
        #[arg(long)]
        json: bool,

        /// Also export the quote sheet as a paginated PDF to this file
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Export configuration JSON file used with --pdf
        #[arg(long, requires = "pdf")]
        config: Option<PathBuf>,
    },

    /// Show how a sheet of the given size would be paginated
    Plan {
        /// Raster width in pixels
        #[arg(long)]
        width_px: u32,

        /// Raster height in pixels
        #[arg(long)]
        height_px: u32,

        /// Page margin in mm (uniform on all sides)
        #[arg(long, default_value = "10.0")]
        margin: f32,

        /// Output paper size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Output orientation
        #[arg(long, default_value = "portrait", value_enum)]
        orientation: OrientationArg,
    },

    /// Paginate a rendered quote sheet image into a PDF
    Export {
        /// Rendered sheet image (PNG or JPEG)
        #[arg(short, long)]
        sheet: PathBuf,

        /// Output PDF file [default: export.pdf]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export configuration JSON file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Page margin in mm (uniform on all sides) [default: 10]
        #[arg(long)]
        margin: Option<f32>,

        /// Output paper size [default: a4]
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Output orientation [default: portrait]
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Oversampling factor used when rasterizing the sheet [default: 2]
        #[arg(long)]
        oversample: Option<u32>,

        /// Show the page plan only, don't write a PDF
        #[arg(long)]
        plan_only: bool,
    },
}

#[derive(Clone, Debug)]
struct SelectionArg {
    id: ProductId,
    qty: String,
    disc: Option<String>,
}

fn parse_selection(raw: &str) -> std::result::Result<SelectionArg, String> {
    let (id, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY[:DISCOUNT], got '{}'", raw))?;
    if id.trim().is_empty() {
        return Err(format!("missing product id in '{}'", raw));
    }
    let (qty, disc) = match rest.split_once(':') {
        Some((qty, disc)) => (qty, Some(disc.to_string())),
        None => (rest, None),
    };
    Ok(SelectionArg {
        id: ProductId::from(id.trim()),
        qty: qty.to_string(),
        disc,
    })
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for pdf_paginate::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for pdf_paginate::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

fn print_plan(plan: &pdf_paginate::PagePlan) {
    println!("Pagination Plan:");
    println!(
        "  Page size: {} x {} mm (margin {} mm)",
        plan.page_width_mm, plan.page_height_mm, plan.margin_mm
    );
    println!(
        "  Raster: {} x {} px",
        plan.raster_width, plan.raster_height
    );
    println!(
        "  Image: {:.2} x {:.2} mm ({:.5} mm/px)",
        plan.image_width_mm, plan.image_height_mm, plan.scale
    );
    println!("  Rows per page: {}", plan.capacity_px);
    println!("  Pages: {}", plan.page_count());
    for slice in &plan.slices {
        println!(
            "    page {}: rows {}..{} ({:.2} mm)",
            slice.index + 1,
            slice.rows.y,
            slice.rows.end(),
            plan.rows_to_mm(slice.rows.height)
        );
    }
}

async fn load_export_options(config: Option<&Path>) -> Result<ExportOptions> {
    match config {
        Some(path) => ExportOptions::load(path)
            .await
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(ExportOptions::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog { catalog } => {
            let load = pdf_quote::load_catalog_or_empty(&catalog).await;
            if let Some(message) = &load.error {
                eprintln!("{}", message);
            }
            for product in load.catalog.products() {
                println!(
                    "{:>6}  {:<12} {:<40} {:>14}",
                    product.id,
                    product.sku,
                    product.name,
                    format_money(product.price)
                );
            }
            println!("{} product(s)", load.catalog.len());
        }

        Commands::Quote {
            catalog,
            selections,
            tax_rate,
            header,
            json,
            pdf,
            config,
        } => {
            // A missing catalog leaves the quote usable, just empty
            let load = pdf_quote::load_catalog_or_empty(&catalog).await;
            if let Some(message) = &load.error {
                eprintln!("{}", message);
            }

            let header = match header {
                Some(path) => QuoteHeader::load(&path)
                    .await
                    .with_context(|| format!("reading header {}", path.display()))?,
                None => QuoteHeader::default(),
            };

            let mut selection = Selection::new();
            for arg in selections {
                selection.set_quantity(arg.id.clone(), &arg.qty);
                if let Some(disc) = &arg.disc {
                    selection.set_discount(arg.id, disc);
                }
            }

            let sheet = QuoteSheet::new(header, &load.catalog, &selection, tax_rate);
            if json {
                println!("{}", serde_json::to_string_pretty(&sheet)?);
            } else {
                print!("{}", sheet.render_text());
            }

            if let Some(pdf) = pdf {
                let mut options = load_export_options(config.as_deref()).await?;
                options.filename = pdf;
                let report = pdf_quote::export_quote(&sheet, &options).await?;
                eprintln!(
                    "Exported quote to {} ({} page(s))",
                    report.path.display(),
                    report.pages
                );
            }
        }

        Commands::Plan {
            width_px,
            height_px,
            margin,
            paper,
            orientation,
        } => {
            let options = ExportOptions {
                margin_mm: margin,
                paper_size: paper.into(),
                orientation: orientation.into(),
                ..Default::default()
            };
            let plan = pdf_paginate::plan_pages(width_px, height_px, &options)?;
            print_plan(&plan);
        }

        Commands::Export {
            sheet,
            output,
            config,
            margin,
            paper,
            orientation,
            oversample,
            plan_only,
        } => {
            let mut options = load_export_options(config.as_deref()).await?;
            if let Some(output) = output {
                options.filename = output;
            }
            if let Some(margin) = margin {
                options.margin_mm = margin;
            }
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if let Some(oversample) = oversample {
                options.oversample = oversample;
            }
            log::debug!("Export options: {:?}", options);

            if plan_only {
                options.validate()?;
                let source = ImageFileSource::new(&sheet);
                let raster = source.rasterize(options.oversample, options.background)?;
                let plan = pdf_paginate::plan_pages(raster.width(), raster.height(), &options)?;
                print_plan(&plan);
                return Ok(());
            }

            let source: Arc<dyn RasterSource> = Arc::new(ImageFileSource::new(&sheet));
            let report = pdf_paginate::export(source, &options).await?;
            println!(
                "Exported {} page(s) from {} x {} px → {}",
                report.pages,
                report.raster_width,
                report.raster_height,
                report.path.display()
            );
        }
    }

    Ok(())
}
