//! Discount allocation
//!
//! Splits a discount across cart line items so that each item's share is
//! proportional to its contribution to the subtotal, every amount is rounded
//! to the currency's minor unit, and the rounded per-item discounts sum to
//! the rounded target exactly.
//!
//! Multi-item splits floor every share and then reconcile with the
//! largest-remainder method, so the per-item correction is always a
//! non-negative addition of at most one minor unit.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    currency::{CurrencyTable, UnknownCurrencyError},
    discounts::{Discount, positive_amount, rate_fraction},
    items::{ItemId, LineItem},
    rounding::{floor_to_precision, minor_unit, round_to_precision},
};

/// Errors specific to discount allocation.
///
/// All variants are deterministic input-validation failures, detected before
/// any allocation arithmetic begins. The engine never masks a failure with a
/// fallback value; that decision belongs to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// Discount rate or fixed amount outside the valid range.
    #[error("invalid discount: {0}")]
    InvalidDiscount(String),

    /// Non-empty cart whose subtotal is zero; proportions are undefined.
    #[error("cart subtotal is zero; cannot apportion a discount")]
    DegenerateCart,

    /// Currency code absent from the precision table.
    #[error(transparent)]
    UnknownCurrency(#[from] UnknownCurrencyError),

    /// Arithmetic left the representable decimal range.
    #[error("amount arithmetic overflowed the decimal range")]
    AmountOverflow,
}

/// How the per-item discounts of a result were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    /// Discounts computed directly; no rounding slack was redistributed.
    Exact,

    /// A largest-remainder pass distributed this many one-minor-unit
    /// increments across the records.
    Reconciled {
        /// Number of increments distributed.
        increments: usize,
    },
}

/// The per-item allocation outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRecord {
    item_id: ItemId,
    original_amount: Decimal,
    discount_amount: Decimal,
    discounted_amount: Decimal,
}

impl AllocationRecord {
    fn new(item: &LineItem, discount_amount: Decimal) -> Self {
        let original_amount = item.line_total();

        // Clamped floor; with rates at or below 100% the subtraction only
        // goes negative when line totals carry sub-minor-unit precision.
        let discounted_amount = (original_amount - discount_amount).max(Decimal::ZERO);

        AllocationRecord {
            item_id: item.id().clone(),
            original_amount,
            discount_amount,
            discounted_amount,
        }
    }

    /// Identifier of the line item this record mirrors.
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// The item's pre-discount contribution (its line total).
    pub fn original_amount(&self) -> Decimal {
        self.original_amount
    }

    /// The item's share of the discount, rounded to the currency precision.
    pub fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }

    /// `original_amount − discount_amount`, clamped at zero.
    pub fn discounted_amount(&self) -> Decimal {
        self.discounted_amount
    }
}

/// The aggregate allocation outcome.
///
/// Invariant: the record discounts sum to [`AllocationResult::total_discount`]
/// exactly, in minor-unit arithmetic, for every valid input.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    records: Vec<AllocationRecord>,
    subtotal: Decimal,
    total_discount: Decimal,
    accuracy: Accuracy,
}

impl AllocationResult {
    fn empty() -> Self {
        AllocationResult {
            records: Vec::new(),
            subtotal: Decimal::ZERO,
            total_discount: Decimal::ZERO,
            accuracy: Accuracy::Exact,
        }
    }

    /// Per-item records, in the order the items were supplied.
    pub fn records(&self) -> &[AllocationRecord] {
        &self.records
    }

    /// Sum of all original amounts.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// The rounded target discount actually distributed.
    pub fn total_discount(&self) -> Decimal {
        self.total_discount
    }

    /// How the per-item discounts were produced.
    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }
}

/// The discount allocation engine.
///
/// Holds the read-only currency precision table and the reconciliation
/// tolerance. Every call is independent pure arithmetic over immutable
/// snapshots, so a single engine may be shared freely across threads.
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    currencies: CurrencyTable,
    epsilon: Decimal,
}

impl AllocationEngine {
    /// Create an engine over the given precision table, with the default
    /// reconciliation tolerance of 0.001 of one minor unit.
    pub fn new(currencies: CurrencyTable) -> Self {
        AllocationEngine {
            currencies,
            epsilon: Decimal::new(1, 3),
        }
    }

    /// Override the reconciliation tolerance, as a fraction of one minor
    /// unit. Shortfalls at or below the tolerance are left unreconciled.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: Decimal) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// The currency precision table this engine consults.
    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    /// Allocate a discount descriptor across the items.
    ///
    /// Dispatches on the active variant; the engine never infers one.
    ///
    /// # Errors
    ///
    /// See [`AllocationEngine::allocate_percentage`] and
    /// [`AllocationEngine::allocate_fixed_amount`].
    pub fn allocate(
        &self,
        items: &[LineItem],
        discount: &Discount,
        currency: &str,
    ) -> Result<AllocationResult, AllocationError> {
        match discount {
            Discount::Percentage(percent) => self.allocate_percentage(items, *percent, currency),
            Discount::FixedAmount(amount) => self.allocate_fixed_amount(items, *amount, currency),
        }
    }

    /// Allocate a percentage discount proportionally across the items.
    ///
    /// An empty cart yields an empty result with zero totals; that is a
    /// valid, common case, not an error. A one-item cart takes the direct
    /// path: its discount is computed in one rounding step and no
    /// reconciliation can introduce slack.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::InvalidDiscount`]: rate outside `(0, 100]`.
    /// - [`AllocationError::UnknownCurrency`]: code absent from the table.
    /// - [`AllocationError::DegenerateCart`]: non-empty cart with a zero
    ///   subtotal.
    /// - [`AllocationError::AmountOverflow`]: amounts left the decimal range.
    pub fn allocate_percentage(
        &self,
        items: &[LineItem],
        percent: Percentage,
        currency: &str,
    ) -> Result<AllocationResult, AllocationError> {
        let fraction = rate_fraction(percent)?;
        let precision = self.currencies.precision(currency)?;

        if items.is_empty() {
            return Ok(AllocationResult::empty());
        }

        let subtotal = cart_subtotal(items)?;

        if subtotal.is_zero() {
            return Err(AllocationError::DegenerateCart);
        }

        // The rounded target is computed once, from the subtotal; every
        // later step must reconstruct exactly this value via per-item sums.
        let target = round_to_precision(
            subtotal
                .checked_mul(fraction)
                .ok_or(AllocationError::AmountOverflow)?,
            precision,
        );

        if let [item] = items {
            return Ok(single_item_result(item, subtotal, target));
        }

        self.distribute(items, subtotal, target, precision)
    }

    /// Allocate a fixed amount proportionally across the items.
    ///
    /// The target is capped at the subtotal: a flat discount may never
    /// exceed what the cart is worth, and the excess is silently dropped
    /// rather than rejected.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::InvalidDiscount`]: amount not positive.
    /// - [`AllocationError::UnknownCurrency`]: code absent from the table.
    /// - [`AllocationError::DegenerateCart`]: non-empty cart with a zero
    ///   subtotal.
    /// - [`AllocationError::AmountOverflow`]: amounts left the decimal range.
    pub fn allocate_fixed_amount(
        &self,
        items: &[LineItem],
        amount: Decimal,
        currency: &str,
    ) -> Result<AllocationResult, AllocationError> {
        positive_amount(amount)?;
        let precision = self.currencies.precision(currency)?;

        if items.is_empty() {
            return Ok(AllocationResult::empty());
        }

        let subtotal = cart_subtotal(items)?;

        if subtotal.is_zero() {
            return Err(AllocationError::DegenerateCart);
        }

        let target = round_to_precision(amount.min(subtotal), precision);

        if let [item] = items {
            return Ok(single_item_result(item, subtotal, target));
        }

        self.distribute(items, subtotal, target, precision)
    }

    /// Round an amount to the currency's minor unit, half away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::UnknownCurrency`] if the code is absent
    /// from the precision table.
    pub fn round_to_currency(
        &self,
        amount: Decimal,
        currency: &str,
    ) -> Result<Decimal, AllocationError> {
        let precision = self.currencies.precision(currency)?;

        Ok(round_to_precision(amount, precision))
    }

    /// Floor every proportional share, then hand the shortfall out in
    /// minor-unit increments to the largest fractional remainders.
    fn distribute(
        &self,
        items: &[LineItem],
        subtotal: Decimal,
        target: Decimal,
        precision: u32,
    ) -> Result<AllocationResult, AllocationError> {
        let unit = minor_unit(precision);

        let mut shares: Vec<Decimal> = Vec::with_capacity(items.len());
        let mut remainders: SmallVec<[(usize, Decimal); 16]> = SmallVec::new();

        for (index, item) in items.iter().enumerate() {
            let exact = target
                .checked_mul(item.line_total())
                .ok_or(AllocationError::AmountOverflow)?
                .checked_div(subtotal)
                .ok_or(AllocationError::AmountOverflow)?;

            let floored = floor_to_precision(exact, precision);

            shares.push(floored);
            remainders.push((index, exact - floored));
        }

        let allocated = shares
            .iter()
            .try_fold(Decimal::ZERO, |acc, share| acc.checked_add(*share))
            .ok_or(AllocationError::AmountOverflow)?;

        let shortfall = target - allocated;
        let mut accuracy = Accuracy::Exact;

        if shortfall > self.epsilon.saturating_mul(unit) {
            // Largest remainder first; the stable sort keeps earlier input
            // positions ahead on ties.
            remainders.sort_by(|a, b| b.1.cmp(&a.1));

            let increments = shortfall
                .checked_div(unit)
                .and_then(|quotient| quotient.round().to_usize())
                .ok_or(AllocationError::AmountOverflow)?;

            for (index, _) in remainders.iter().take(increments) {
                if let Some(share) = shares.get_mut(*index) {
                    *share += unit;
                }
            }

            accuracy = Accuracy::Reconciled { increments };
        }

        let records = items
            .iter()
            .zip(shares)
            .map(|(item, discount)| AllocationRecord::new(item, discount))
            .collect();

        Ok(AllocationResult {
            records,
            subtotal,
            total_discount: target,
            accuracy,
        })
    }
}

/// Sum of all line totals.
fn cart_subtotal(items: &[LineItem]) -> Result<Decimal, AllocationError> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.line_total())
            .ok_or(AllocationError::AmountOverflow)
    })
}

/// One-item carts need no proportional split; the rounded target is the
/// item's whole discount.
fn single_item_result(item: &LineItem, subtotal: Decimal, target: Decimal) -> AllocationResult {
    AllocationResult {
        records: vec![AllocationRecord::new(item, target)],
        subtotal,
        total_discount: target,
        accuracy: Accuracy::Exact,
    }
}
