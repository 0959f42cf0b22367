//! Allocation report
//!
//! Console rendering of an [`AllocationResult`] for demos and diagnostics.
//! The engine itself never prints; callers pass any [`io::Write`] sink.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Findable, Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::allocation::{Accuracy, AllocationResult};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the per-item allocation table plus a summary to `out`.
///
/// ISO currency codes are formatted through their registry entry (symbol and
/// separators); anything else is printed as a plain decimal with the code.
///
/// # Errors
///
/// Returns a [`ReportError`] if the sink rejects a write.
pub fn write_allocation_report(
    mut out: impl io::Write,
    result: &AllocationResult,
    currency: &str,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Original", "Discount", "Final"]);

    for record in result.records() {
        builder.push_record([
            record.item_id().to_string(),
            format_amount(record.original_amount(), currency),
            format_amount(record.discount_amount(), currency),
            format_amount(record.discounted_amount(), currency),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReportError::IO)?;

    writeln!(
        out,
        " Subtotal: {}",
        format_amount(result.subtotal(), currency)
    )
    .map_err(|_err| ReportError::IO)?;

    writeln!(
        out,
        " Discount: {}",
        format_amount(result.total_discount(), currency)
    )
    .map_err(|_err| ReportError::IO)?;

    if let Accuracy::Reconciled { increments } = result.accuracy() {
        writeln!(out, " Reconciled: {increments} minor-unit increment(s)")
            .map_err(|_err| ReportError::IO)?;
    }

    Ok(())
}

/// Format an amount for display, preferring the ISO registry entry.
fn format_amount(amount: Decimal, currency: &str) -> String {
    match Currency::find(currency) {
        Some(iso_currency) => Money::from_decimal(amount, iso_currency).to_string(),
        None => format!("{amount} {currency}"),
    }
}
