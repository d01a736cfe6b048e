use crate::catalog::Catalog;
use crate::totals::{QuoteRow, Totals};
use crate::types::{ProductId, coerce_number};
use std::collections::{HashMap, HashSet};

/// Raw per-product input as typed by the user, already coerced to numbers
/// but not yet clamped
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineInput {
    pub qty: f64,
    pub disc: f64,
}

/// Which field of a line is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Quantity,
    Discount,
}

/// Mutable selection state: product id to typed line input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    lines: HashMap<ProductId, LineInput>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field from raw text; the other field keeps its value (0 if unset).
    pub fn set(&mut self, id: ProductId, field: LineField, raw: &str) {
        let value = coerce_number(raw);
        let line = self.lines.entry(id).or_default();
        match field {
            LineField::Quantity => line.qty = value,
            LineField::Discount => line.disc = value,
        }
    }

    pub fn set_quantity(&mut self, id: ProductId, raw: &str) {
        self.set(id, LineField::Quantity, raw);
    }

    pub fn set_discount(&mut self, id: ProductId, raw: &str) {
        self.set(id, LineField::Discount, raw);
    }

    pub fn get(&self, id: &ProductId) -> Option<LineInput> {
        self.lines.get(id).copied()
    }

    pub fn remove(&mut self, id: &ProductId) -> Option<LineInput> {
        self.lines.remove(id)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Priced rows for every selected product with a positive quantity, in
    /// catalog order. Selections for ids missing from the catalog are skipped.
    pub fn rows(&self, catalog: &Catalog, tax_rate: f64) -> Vec<QuoteRow> {
        let mut seen = HashSet::new();
        catalog
            .products()
            .iter()
            .filter(|p| seen.insert(&p.id))
            .filter_map(|p| {
                let line = self.lines.get(&p.id)?;
                (line.qty > 0.0).then(|| QuoteRow::new(p, line.qty, line.disc, tax_rate))
            })
            .collect()
    }

    pub fn totals(&self, catalog: &Catalog, tax_rate: f64) -> Totals {
        Totals::from_rows(&self.rows(catalog, tax_rate), tax_rate)
    }
}
