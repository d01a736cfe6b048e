//! Printable quote sheet
//!
//! Gathers the header, priced rows and totals into the document that gets
//! printed, and renders it as fixed-width text.

use crate::catalog::Catalog;
use crate::header::QuoteHeader;
use crate::money::format_money;
use crate::selection::Selection;
use crate::totals::{QuoteRow, Totals};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

const RULE_WIDTH: usize = 96;
const MAX_NAME_WIDTH: usize = 36;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSheet {
    pub header: QuoteHeader,
    pub date: NaiveDate,
    pub tax_rate: f64,
    pub rows: Vec<QuoteRow>,
    pub totals: Totals,
}

impl QuoteSheet {
    /// Build a sheet dated today
    pub fn new(
        header: QuoteHeader,
        catalog: &Catalog,
        selection: &Selection,
        tax_rate: f64,
    ) -> Self {
        let rows = selection.rows(catalog, tax_rate);
        let totals = Totals::from_rows(&rows, tax_rate);
        Self {
            header,
            date: chrono::Local::now().date_naive(),
            tax_rate,
            rows,
            totals,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Render the sheet as plain text
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let h = &self.header;
        let rule = "-".repeat(RULE_WIDTH);

        // Writing to a String cannot fail
        let _ = writeln!(out, "Company: {}", h.company.name);
        let _ = writeln!(out, "Branch:  {}", h.company.branch);
        let _ = writeln!(out, "Address: {}", h.company.address);
        let _ = writeln!(out, "QUOTE {}", h.company.quote_number);
        let _ = writeln!(out, "Date: {}", self.date.format("%d/%m/%Y"));
        let _ = writeln!(out, "{}", rule);

        let _ = writeln!(out, "CLIENT");
        let _ = writeln!(out, "  Name:     {}", h.client.name);
        let _ = writeln!(out, "  Tax id:   {}", h.client.tax_id);
        let _ = writeln!(out, "  Address:  {}", h.client.address);
        let _ = writeln!(out, "  Phone:    {}", h.client.phone);
        let _ = writeln!(out, "  Country:  {}", h.client.country);
        let _ = writeln!(out, "  Province: {}", h.client.province);
        let _ = writeln!(out, "  District: {}", h.client.district);
        let _ = writeln!(out);

        let _ = writeln!(out, "VENDOR");
        let _ = writeln!(out, "  Name:     {}", h.vendor.name);
        let _ = writeln!(out, "  Phone:    {}", h.vendor.phone);
        let _ = writeln!(out, "  Email:    {}", h.vendor.email);
        let _ = writeln!(out);

        let _ = writeln!(out, "BANK ACCOUNTS");
        for line in h.bank_accounts.lines() {
            let _ = writeln!(out, "  {}", line);
        }
        let _ = writeln!(out, "NOTES");
        for line in h.notes.lines() {
            let _ = writeln!(out, "  {}", line);
        }
        let _ = writeln!(out, "{}", rule);

        self.render_detail(&mut out);
        out
    }

    fn render_detail(&self, out: &mut String) {
        let name_width = self
            .rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .clamp(4, MAX_NAME_WIDTH);

        let _ = writeln!(out, "QUOTE DETAIL");
        let _ = writeln!(
            out,
            "{:<nw$} {:>8} {:>14} {:>7} {:>14} {:>16}",
            "Item",
            "Qty",
            "Unit price",
            "% Disc",
            "Subtotal",
            "Total incl. tax",
            nw = name_width
        );

        for row in &self.rows {
            let name: String = row.name.chars().take(name_width).collect();
            let _ = writeln!(
                out,
                "{:<nw$} {:>8.2} {:>14} {:>7.2} {:>14} {:>16}",
                name,
                row.qty,
                format_money(row.unit),
                row.disc_pct,
                format_money(row.subtotal),
                format_money(row.total_with_tax),
                nw = name_width
            );
        }

        let label_width = name_width + 8 + 14 + 7 + 14 + 4;
        let tax_label = format!("TAX ({}%):", format_percent(self.tax_rate));
        let _ = writeln!(
            out,
            "{:>lw$} {:>16}",
            "SUBTOTAL:",
            format_money(self.totals.subtotal),
            lw = label_width
        );
        let _ = writeln!(
            out,
            "{:>lw$} {:>16}",
            tax_label,
            format_money(self.totals.tax),
            lw = label_width
        );
        let _ = writeln!(
            out,
            "{:>lw$} {:>16}",
            "TOTAL:",
            format_money(self.totals.total),
            lw = label_width
        );
    }
}

/// Tax rate as a percentage without trailing zeros: 0.18 -> "18"
fn format_percent(rate: f64) -> String {
    let pct = (rate * 10_000.0).round() / 100.0;
    let text = format!("{:.2}", pct);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
