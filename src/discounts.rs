//! Discounts
//!
//! The resolved discount descriptor consumed by the allocation engine.
//! Exactly one variant is active per allocation call; the engine never
//! infers which.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::allocation::AllocationError;

/// A resolved discount to allocate across a cart.
#[derive(Debug, Copy, Clone)]
pub enum Discount {
    /// Percentage of the cart subtotal (e.g. "15% off").
    Percentage(Percentage),

    /// Fixed currency-denominated amount off the cart (e.g. "5.00 off").
    FixedAmount(Decimal),
}

impl Discount {
    /// Create a percentage discount, validating the rate.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::InvalidDiscount`] if the rate is outside
    /// `(0, 100]`.
    pub fn percentage(percent: Percentage) -> Result<Self, AllocationError> {
        rate_fraction(percent)?;

        Ok(Discount::Percentage(percent))
    }

    /// Create a fixed-amount discount, validating the amount.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::InvalidDiscount`] if the amount is not
    /// positive.
    pub fn fixed_amount(amount: Decimal) -> Result<Self, AllocationError> {
        positive_amount(amount)?;

        Ok(Discount::FixedAmount(amount))
    }
}

/// Extract the rate as a decimal fraction, rejecting rates outside `(0, 100]`.
///
/// The percentage crate does not expose its underlying decimal, so it is
/// recovered by multiplying with one.
pub(crate) fn rate_fraction(percent: Percentage) -> Result<Decimal, AllocationError> {
    let fraction = percent * Decimal::ONE;

    if fraction <= Decimal::ZERO || fraction > Decimal::ONE {
        return Err(AllocationError::InvalidDiscount(format!(
            "rate {}% is outside (0, 100]",
            fraction * Decimal::ONE_HUNDRED
        )));
    }

    Ok(fraction)
}

/// Reject fixed discount amounts that are not positive.
pub(crate) fn positive_amount(amount: Decimal) -> Result<(), AllocationError> {
    if amount <= Decimal::ZERO {
        return Err(AllocationError::InvalidDiscount(format!(
            "fixed amount {amount} is not positive"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percentage_in_range_is_accepted() -> TestResult {
        let discount = Discount::percentage(Percentage::from(0.15))?;

        assert!(matches!(discount, Discount::Percentage(_)));

        Ok(())
    }

    #[test]
    fn full_percentage_is_accepted() -> TestResult {
        let discount = Discount::percentage(Percentage::from(1.0))?;

        assert!(matches!(discount, Discount::Percentage(_)));

        Ok(())
    }

    #[test]
    fn zero_percentage_is_rejected() {
        let result = Discount::percentage(Percentage::from(0.0));

        assert!(matches!(result, Err(AllocationError::InvalidDiscount(_))));
    }

    #[test]
    fn over_full_percentage_is_rejected() {
        let result = Discount::percentage(Percentage::from(1.5));

        assert!(matches!(result, Err(AllocationError::InvalidDiscount(_))));
    }

    #[test]
    fn negative_percentage_is_rejected() {
        let result = Discount::percentage(Percentage::from(-0.1));

        assert!(matches!(result, Err(AllocationError::InvalidDiscount(_))));
    }

    #[test]
    fn positive_fixed_amount_is_accepted() -> TestResult {
        let discount = Discount::fixed_amount(Decimal::new(500, 2))?;

        assert!(matches!(discount, Discount::FixedAmount(_)));

        Ok(())
    }

    #[test]
    fn zero_fixed_amount_is_rejected() {
        let result = Discount::fixed_amount(Decimal::ZERO);

        assert!(matches!(result, Err(AllocationError::InvalidDiscount(_))));
    }

    #[test]
    fn negative_fixed_amount_is_rejected() {
        let result = Discount::fixed_amount(Decimal::new(-500, 2));

        assert!(matches!(result, Err(AllocationError::InvalidDiscount(_))));
    }

    #[test]
    fn rate_fraction_recovers_the_decimal() -> TestResult {
        let fraction = rate_fraction(Percentage::from(0.25))?;

        assert_eq!(fraction, Decimal::new(25, 2));

        Ok(())
    }
}
