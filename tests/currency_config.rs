//! Integration tests for file-backed currency precision configuration.
//!
//! The precision table is process-wide, init-once configuration: loaded from
//! YAML before the engine is built, read-only afterwards. These tests
//! exercise the full file → table → engine path.

use std::fs;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use testresult::TestResult;

use prorata::{
    allocation::{AllocationEngine, AllocationError},
    currency::{CurrencyConfigError, CurrencyTable},
    items::LineItem,
};

fn item(id: &str, unit_price: Decimal, quantity: u32) -> LineItem {
    LineItem::new(id, unit_price, quantity).expect("valid test item")
}

#[test]
fn engine_allocates_with_a_file_backed_table() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("currencies.yml");

    fs::write(
        &path,
        "currencies:\n  EUR: 2\n  JPY: 0\n  BHD: 3\n",
    )?;

    let engine = AllocationEngine::new(CurrencyTable::from_yaml_file(&path)?);

    let items = [
        item("a", Decimal::new(1299, 2), 1),
        item("b", Decimal::new(850, 2), 2),
    ];

    let result = engine.allocate_percentage(&items, Percentage::from(Decimal::new(15, 2)), "EUR")?;

    let total: Decimal = result
        .records()
        .iter()
        .map(prorata::allocation::AllocationRecord::discount_amount)
        .sum();

    assert_eq!(total, result.total_discount());

    Ok(())
}

#[test]
fn codes_outside_the_file_are_rejected_by_the_engine() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("currencies.yml");

    fs::write(&path, "currencies:\n  EUR: 2\n")?;

    let engine = AllocationEngine::new(CurrencyTable::from_yaml_file(&path)?);
    let items = [item("a", Decimal::new(100, 2), 1)];

    let result = engine.allocate_percentage(&items, Percentage::from(0.15), "USD");

    assert!(matches!(result, Err(AllocationError::UnknownCurrency(_))));

    Ok(())
}

#[test]
fn opted_in_default_precision_resolves_unlisted_codes() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("currencies.yml");

    fs::write(&path, "default_precision: 2\n")?;

    let engine = AllocationEngine::new(CurrencyTable::from_yaml_file(&path)?);
    let items = [item("a", Decimal::new(999, 2), 1)];

    let result = engine.allocate_percentage(&items, Percentage::from(Decimal::new(10, 2)), "XXX")?;

    assert_eq!(result.total_discount(), Decimal::new(100, 2));

    Ok(())
}

#[test]
fn missing_file_surfaces_an_io_error() {
    let result = CurrencyTable::from_yaml_file("does/not/exist.yml");

    assert!(matches!(result, Err(CurrencyConfigError::Io(_))));
}

#[test]
fn malformed_file_surfaces_a_parse_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("currencies.yml");

    fs::write(&path, "currencies: [EUR, JPY]\n")?;

    let result = CurrencyTable::from_yaml_file(&path);

    assert!(matches!(result, Err(CurrencyConfigError::Yaml(_))));

    Ok(())
}

#[test]
fn iso_fallback_composes_with_overrides() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("currencies.yml");

    // KWD is overridden to two digits for this process; everything else
    // falls through to the ISO registry.
    fs::write(&path, "currencies:\n  KWD: 2\niso_fallback: true\n")?;

    let table = CurrencyTable::from_yaml_file(&path)?;

    assert_eq!(table.precision("KWD")?, 2);
    assert_eq!(table.precision("EUR")?, 2);
    assert_eq!(table.precision("JPY")?, 0);

    Ok(())
}
