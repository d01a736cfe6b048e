use chrono::NaiveDate;
use pdf_quote::*;
use tempfile::NamedTempFile;

fn catalog() -> Catalog {
    Catalog::from_json(
        br#"[
            { "id": 1, "sku": "FLT-001", "name": "Oil filter", "price": 100 },
            { "id": 2, "sku": "BRK-010", "name": "Brake pads", "price": 1250 }
        ]"#,
    )
    .unwrap()
}

fn header() -> QuoteHeader {
    QuoteHeader {
        company: CompanyInfo {
            name: "Acme Motors".to_string(),
            branch: "Harbor".to_string(),
            address: "830 Harbor Ave".to_string(),
            quote_number: "PTA-00035-1".to_string(),
        },
        client: ClientInfo {
            name: "Jane Client".to_string(),
            tax_id: "73239198".to_string(),
            ..Default::default()
        },
        vendor: VendorInfo {
            name: "Sam Seller".to_string(),
            email: "sam@example.com".to_string(),
            ..Default::default()
        },
        bank_accounts: "BANK A 191-1163403\nBANK B 0011-0178".to_string(),
        notes: "Valid for 15 days".to_string(),
    }
}

#[test]
fn test_sheet_collects_rows_and_totals() {
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(1), "2");
    selection.set_discount(ProductId::from(1), "10");

    let sheet = QuoteSheet::new(header(), &catalog(), &selection, DEFAULT_TAX_RATE);
    assert_eq!(sheet.rows.len(), 1);
    assert!((sheet.totals.total - 212.4).abs() < 1e-9);
}

#[test]
fn test_render_text_contains_sections() {
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(1), "2");
    selection.set_discount(ProductId::from(1), "10");
    selection.set_quantity(ProductId::from(2), "1");

    let sheet = QuoteSheet::new(header(), &catalog(), &selection, DEFAULT_TAX_RATE)
        .with_date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    let text = sheet.render_text();

    assert!(text.contains("QUOTE PTA-00035-1"));
    assert!(text.contains("Date: 09/03/2024"));
    assert!(text.contains("Jane Client"));
    assert!(text.contains("sam@example.com"));
    assert!(text.contains("  BANK B 0011-0178"));
    assert!(text.contains("Oil filter"));
    assert!(text.contains("S/ 1,250.00"));
    assert!(text.contains("TAX (18%):"));
    // 180 + 1250 = 1430 subtotal, 257.40 tax, 1687.40 total
    assert!(text.contains("S/ 1,430.00"));
    assert!(text.contains("S/ 257.40"));
    assert!(text.contains("S/ 1,687.40"));
}

#[test]
fn test_render_empty_quote() {
    let sheet = QuoteSheet::new(
        QuoteHeader::default(),
        &Catalog::default(),
        &Selection::new(),
        DEFAULT_TAX_RATE,
    );
    let text = sheet.render_text();

    assert!(sheet.rows.is_empty());
    assert!(text.contains("SUBTOTAL:"));
    assert_eq!(text.matches("S/ 0.00").count(), 3);
}

#[test]
fn test_sheet_serializes_to_json() {
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(2), "1");

    let sheet = QuoteSheet::new(header(), &catalog(), &selection, DEFAULT_TAX_RATE)
        .with_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    let json = serde_json::to_value(&sheet).unwrap();

    assert_eq!(json["date"], "2024-01-02");
    assert_eq!(json["rows"][0]["id"], "2");
    assert_eq!(json["totals"]["subtotal"], 1250.0);
}

#[tokio::test]
async fn test_header_save_and_load() {
    let temp_file = NamedTempFile::new().unwrap();
    let original = header();

    original.save(temp_file.path()).await.unwrap();
    let loaded = QuoteHeader::load(temp_file.path()).await.unwrap();

    assert_eq!(loaded, original);
}

#[tokio::test]
async fn test_header_partial_json_uses_defaults() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), br#"{ "client": { "name": "Only Name" } }"#).unwrap();

    let loaded = QuoteHeader::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.client.name, "Only Name");
    assert!(loaded.client.phone.is_empty());
    assert_eq!(loaded.notes, "—");
}
