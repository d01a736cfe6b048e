//! PDF assembly
//!
//! Each planned slice becomes an image XObject drawn on its own page at the
//! margin-inset top-left corner.

use crate::constants::{PDF_VERSION, PRODUCER, mm_to_pt};
use crate::options::ExportOptions;
use crate::plan::{PagePlan, PageSlice};
use crate::raster::RasterImage;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

// =============================================================================
// Public API
// =============================================================================

/// Assemble the paginated document for `raster` following `plan`.
///
/// The plan must have been computed for this raster's dimensions.
pub fn build_document(
    raster: &RasterImage,
    plan: &PagePlan,
    options: &ExportOptions,
) -> Result<Document> {
    if (raster.width(), raster.height()) != (plan.raster_width, plan.raster_height) {
        return Err(PaginateError::Precondition(format!(
            "Plan was made for a {}x{} px raster but got {}x{} px",
            plan.raster_width,
            plan.raster_height,
            raster.width(),
            raster.height()
        )));
    }

    let mut output = Document::with_version(PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::with_capacity(plan.page_count());

    for slice in &plan.slices {
        let page_id = render_slice_page(&mut output, raster, plan, slice, pages_tree_id)?;
        page_refs.push(Object::Reference(page_id));
    }

    // Create pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    let info_id = output.add_object(info_dictionary(options));
    output.trailer.set("Info", info_id);

    output.compress();

    Ok(output)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Create one output page carrying `slice`.
fn render_slice_page(
    output: &mut Document,
    raster: &RasterImage,
    plan: &PagePlan,
    slice: &PageSlice,
    parent_pages_id: ObjectId,
) -> Result<ObjectId> {
    let page_width_pt = mm_to_pt(plan.page_width_mm);
    let page_height_pt = mm_to_pt(plan.page_height_mm);

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width_pt),
            Object::Real(page_height_pt),
        ]),
    );

    let image_id = output.add_object(image_xobject(raster, slice)?);
    let xobject_name = format!("Im{}", slice.index);

    let mut xobjects = Dictionary::new();
    xobjects.set(xobject_name.as_bytes(), Object::Reference(image_id));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = generate_placement_command(&xobject_name, &slice.placement, page_height_pt);
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Encode the slice's rows as an uncompressed DeviceRGB image stream.
/// Compression is applied to the whole document once it is complete.
fn image_xobject(raster: &RasterImage, slice: &PageSlice) -> Result<Stream> {
    let band = raster.slice(slice.rows);
    if band.height() != slice.rows.height {
        return Err(PaginateError::Render(format!(
            "Slice {} expected {} rows but the raster yielded {}",
            slice.index,
            slice.rows.height,
            band.height()
        )));
    }

    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(band.width() as i64)),
        ("Height", Object::Integer(band.height() as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
    ]);

    Ok(Stream::new(dict, band.into_raw()))
}

/// Generate the content stream command that draws an image over `rect`.
///
/// `rect` is measured from the top-left of the page while PDF user space
/// starts at the bottom-left, so the y origin is flipped.
fn generate_placement_command(xobject_name: &str, rect: &Rect, page_height_pt: f32) -> String {
    let width = mm_to_pt(rect.width);
    let height = mm_to_pt(rect.height);
    let x = mm_to_pt(rect.x);
    let y = page_height_pt - mm_to_pt(rect.y) - height;
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        width, height, x, y, xobject_name
    )
}

fn info_dictionary(options: &ExportOptions) -> Dictionary {
    let title = options
        .filename
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Dictionary::from_iter(vec![
        (
            "Title",
            Object::String(title.into_bytes(), StringFormat::Literal),
        ),
        (
            "Producer",
            Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
        ),
    ])
}
