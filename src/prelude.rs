//! Prorata prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    allocation::{
        Accuracy, AllocationEngine, AllocationError, AllocationRecord, AllocationResult,
    },
    currency::{CurrencyConfigError, CurrencyTable, UnknownCurrencyError},
    discounts::Discount,
    items::{ItemId, LineItem, LineItemError},
    report::{ReportError, write_allocation_report},
    rounding::round_to_precision,
    snapshot::{SnapshotSignature, compute_signature},
};
