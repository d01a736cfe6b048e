use crate::types::{Product, ProductId};
use serde::Serialize;

/// Sales tax applied to quotes (IGV, 18%)
pub const DEFAULT_TAX_RATE: f64 = 0.18;

/// Discount percentage limited to 0..=100
pub fn clamp_discount(disc_pct: f64) -> f64 {
    if disc_pct.is_finite() {
        disc_pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Quantity limited to non-negative values
pub fn clamp_quantity(qty: f64) -> f64 {
    if qty.is_finite() { qty.max(0.0) } else { 0.0 }
}

/// `qty * unit * (1 - disc/100)` with both inputs clamped first
pub fn line_subtotal(qty: f64, unit: f64, disc_pct: f64) -> f64 {
    clamp_quantity(qty) * unit * (1.0 - clamp_discount(disc_pct) / 100.0)
}

/// One priced line of the quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRow {
    pub id: ProductId,
    pub name: String,
    pub qty: f64,
    pub unit: f64,
    pub disc_pct: f64,
    pub subtotal: f64,
    pub total_with_tax: f64,
}

impl QuoteRow {
    pub fn new(product: &Product, qty: f64, disc_pct: f64, tax_rate: f64) -> Self {
        let qty = clamp_quantity(qty);
        let disc_pct = clamp_discount(disc_pct);
        let unit = product.price;
        let subtotal = line_subtotal(qty, unit, disc_pct);
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            qty,
            unit,
            disc_pct,
            subtotal,
            total_with_tax: subtotal * (1.0 + tax_rate),
        }
    }
}

/// Quote totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl Totals {
    pub fn from_rows(rows: &[QuoteRow], tax_rate: f64) -> Self {
        let subtotal: f64 = rows.iter().map(|r| r.subtotal).sum();
        let tax = subtotal * tax_rate;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_discount(150.0), 100.0);
        assert_eq!(clamp_discount(-5.0), 0.0);
        assert_eq!(clamp_discount(f64::NAN), 0.0);
        assert_eq!(clamp_quantity(-2.0), 0.0);
        assert_eq!(clamp_quantity(3.0), 3.0);
    }

    #[test]
    fn test_line_subtotal() {
        assert!((line_subtotal(2.0, 100.0, 10.0) - 180.0).abs() < 1e-9);
        assert_eq!(line_subtotal(2.0, 100.0, 150.0), 0.0);
        assert_eq!(line_subtotal(-4.0, 100.0, 0.0), 0.0);
    }
}
