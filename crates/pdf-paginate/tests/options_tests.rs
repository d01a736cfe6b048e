use pdf_paginate::*;
use std::path::PathBuf;

#[test]
fn test_defaults_match_export_contract() {
    let options = ExportOptions::default();
    assert_eq!(options.filename, PathBuf::from("export.pdf"));
    assert_eq!(options.margin_mm, 10.0);
    assert_eq!(options.paper_size, PaperSize::A4);
    assert_eq!(options.oversample, 2);
    assert_eq!(options.background, [255, 255, 255]);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_margin_bounds() {
    let mut options = ExportOptions::default();

    options.margin_mm = 0.0;
    assert!(options.validate().is_ok());

    options.margin_mm = -1.0;
    assert!(options.validate().is_err());

    options.margin_mm = f32::NAN;
    assert!(options.validate().is_err());

    // A4 is 210 mm wide: 105 mm on each side leaves nothing
    options.margin_mm = 105.0;
    match options.validate() {
        Err(PaginateError::Precondition(msg)) => assert!(msg.contains("no printable area")),
        _ => panic!("Expected Precondition error"),
    }
}

#[test]
fn test_validation_oversample_and_filename() {
    let mut options = ExportOptions::default();
    options.oversample = 0;
    assert!(options.validate().is_err());

    let mut options = ExportOptions::default();
    options.filename = PathBuf::new();
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_rejects_oversample_above_limit() {
    let mut options = ExportOptions::default();

    options.oversample = MAX_OVERSAMPLE;
    assert!(options.validate().is_ok());

    options.oversample = MAX_OVERSAMPLE + 1;
    assert!(matches!(options.validate(), Err(PaginateError::Precondition(_))));

    options.oversample = 100_000;
    match options.validate() {
        Err(PaginateError::Precondition(msg)) => assert!(msg.contains("100000")),
        other => panic!("Expected Precondition error, got {:?}", other),
    }
}

#[test]
fn test_paper_dimensions_with_orientation() {
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Portrait),
        (210.0, 297.0)
    );
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
    let custom = PaperSize::Custom {
        width_mm: 100.0,
        height_mm: 50.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 50.0));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = ExportOptions {
        filename: PathBuf::from("cotizacion.pdf"),
        paper_size: PaperSize::Letter,
        orientation: Orientation::Landscape,
        margin_mm: 8.0,
        oversample: 3,
        background: [250, 250, 240],
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = ExportOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_config_fills_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), br#"{ "margin_mm": 8.0 }"#).unwrap();

    let loaded = ExportOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.margin_mm, 8.0);
    assert_eq!(loaded.filename, PathBuf::from("export.pdf"));
    assert_eq!(loaded.paper_size, PaperSize::A4);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_accepts_margin_key() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), br#"{ "filename": "q.pdf", "margin": 8 }"#).unwrap();

    let loaded = ExportOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.margin_mm, 8.0);
    assert_eq!(loaded.filename, PathBuf::from("q.pdf"));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_malformed_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), b"{ not json").unwrap();

    let result = ExportOptions::load(temp_file.path()).await;
    assert!(matches!(result, Err(PaginateError::Precondition(_))));
}
