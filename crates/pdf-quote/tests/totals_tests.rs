use pdf_quote::*;

fn product(id: u64, name: &str, price: f64) -> Product {
    Product {
        id: ProductId::from(id),
        sku: format!("SKU-{}", id),
        name: name.to_string(),
        price,
        image: String::new(),
    }
}

fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        product(1, "Oil filter", 100.0),
        product(2, "Brake pads", 250.0),
        product(3, "Spark plug", 35.5),
    ])
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_empty_selection_totals_are_zero() {
    let selection = Selection::new();
    let totals = selection.totals(&sample_catalog(), DEFAULT_TAX_RATE);
    assert_eq!(totals, Totals::default());
    assert_eq!(totals.subtotal, 0.0);
    assert_eq!(totals.tax, 0.0);
    assert_eq!(totals.total, 0.0);
}

#[test]
fn test_single_discounted_line() {
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(1), "2");
    selection.set_discount(ProductId::from(1), "10");

    let catalog = sample_catalog();
    let rows = selection.rows(&catalog, 0.18);
    assert_eq!(rows.len(), 1);
    assert!(approx(rows[0].subtotal, 180.0));
    assert!(approx(rows[0].total_with_tax, 212.4));

    let totals = selection.totals(&catalog, 0.18);
    assert!(approx(totals.subtotal, 180.0));
    assert!(approx(totals.tax, 32.4));
    assert!(approx(totals.total, 212.4));
}

#[test]
fn test_discount_over_hundred_is_clamped() {
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(2), "3");
    selection.set_discount(ProductId::from(2), "150");

    let rows = selection.rows(&sample_catalog(), DEFAULT_TAX_RATE);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].disc_pct, 100.0);
    assert_eq!(rows[0].subtotal, 0.0);
}

#[test]
fn test_negative_quantity_contributes_nothing() {
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(1), "-4");
    selection.set_quantity(ProductId::from(2), "1");

    let catalog = sample_catalog();
    let rows = selection.rows(&catalog, DEFAULT_TAX_RATE);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, ProductId::from(2));

    let totals = selection.totals(&catalog, DEFAULT_TAX_RATE);
    assert!(approx(totals.subtotal, 250.0));
}

#[test]
fn test_non_numeric_input_reads_as_zero() {
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(1), "two");
    selection.set_quantity(ProductId::from(2), "1");
    selection.set_discount(ProductId::from(2), "lots");

    assert_eq!(
        selection.get(&ProductId::from(1)),
        Some(LineInput { qty: 0.0, disc: 0.0 })
    );

    let rows = selection.rows(&sample_catalog(), DEFAULT_TAX_RATE);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].disc_pct, 0.0);
    assert!(approx(rows[0].subtotal, 250.0));
}

#[test]
fn test_editing_one_field_keeps_the_other() {
    let mut selection = Selection::new();
    let id = ProductId::from(3);
    selection.set_discount(id.clone(), "5");
    selection.set_quantity(id.clone(), "4");
    selection.set_quantity(id.clone(), "6");

    assert_eq!(selection.get(&id), Some(LineInput { qty: 6.0, disc: 5.0 }));
}

#[test]
fn test_rows_follow_catalog_order_and_skip_unknown_ids() {
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(3), "1");
    selection.set_quantity(ProductId::from(99), "5");
    selection.set_quantity(ProductId::from(1), "1");

    let rows = selection.rows(&sample_catalog(), DEFAULT_TAX_RATE);
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn test_duplicate_catalog_ids_price_once() {
    let catalog = Catalog::new(vec![product(1, "First", 10.0), product(1, "Second", 20.0)]);
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(1), "1");

    let rows = selection.rows(&catalog, DEFAULT_TAX_RATE);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "First");
}

#[test]
fn test_totals_sum_over_lines() {
    let mut selection = Selection::new();
    selection.set_quantity(ProductId::from(1), "1");
    selection.set_quantity(ProductId::from(2), "2");
    selection.set_discount(ProductId::from(2), "50");
    selection.set_quantity(ProductId::from(3), "2");

    let totals = selection.totals(&sample_catalog(), 0.1);
    let expected_sub = 100.0 + 250.0 + 71.0;
    assert!(approx(totals.subtotal, expected_sub));
    assert!(approx(totals.tax, expected_sub * 0.1));
    assert!(approx(totals.total, expected_sub * 1.1));
}
