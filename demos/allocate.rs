//! Allocation Example
//!
//! Splits a discount across a small sample cart and prints the result.
//!
//! Use `-r` to apply a percentage rate in percent points (default 15)
//! Use `-a` to apply a fixed amount instead
//! Use `-c` to pick the currency code

use std::io;

use anyhow::{Result, anyhow};
use clap::Parser;
use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use prorata::{
    allocation::AllocationEngine, currency::CurrencyTable, items::LineItem,
    report::write_allocation_report, utils::DemoAllocationArgs,
};

/// Allocation Example
pub fn main() -> Result<()> {
    let args = DemoAllocationArgs::parse();

    let items = [
        LineItem::new("espresso-beans", Decimal::new(1299, 2), 1)?,
        LineItem::new("oat-milk", Decimal::new(850, 2), 2)?,
        LineItem::new("filter-papers", Decimal::new(2245, 2), 1)?,
    ];

    let engine = AllocationEngine::new(CurrencyTable::iso());

    let result = if let Some(amount) = args.amount {
        let amount = Decimal::from_f64_retain(amount)
            .ok_or_else(|| anyhow!("amount {amount} is not representable"))?;

        engine.allocate_fixed_amount(&items, amount, &args.currency)?
    } else {
        let rate = args.rate.unwrap_or(15.0);

        engine.allocate_percentage(&items, Percentage::from(rate / 100.0), &args.currency)?
    };

    let stdout = io::stdout();
    let handle = stdout.lock();

    write_allocation_report(handle, &result, &args.currency)?;

    Ok(())
}
