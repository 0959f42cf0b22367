//! Rounding
//!
//! Minor-unit rounding primitives shared by the allocation strategies.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to the given number of minor-unit digits, half away from
/// zero.
///
/// This is the single public rounding primitive; the allocation passes
/// intentionally floor instead, so that reconciliation stays the sole source
/// of final-cent adjustment.
pub fn round_to_precision(amount: Decimal, precision: u32) -> Decimal {
    amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Floor an amount to the given number of minor-unit digits, toward zero.
///
/// Systematically under-allocates, so the reconciliation correction is always
/// a non-negative addition.
pub(crate) fn floor_to_precision(amount: Decimal, precision: u32) -> Decimal {
    amount.round_dp_with_strategy(precision, RoundingStrategy::ToZero)
}

/// One minor unit at the given precision (e.g. `0.01` for two digits).
pub(crate) fn minor_unit(precision: u32) -> Decimal {
    Decimal::new(1, precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(
            round_to_precision(Decimal::new(6516, 3), 2),
            Decimal::new(652, 2)
        );
        assert_eq!(
            round_to_precision(Decimal::new(125, 2), 1),
            Decimal::new(13, 1)
        );
    }

    #[test]
    fn rounds_to_zero_digits_for_zero_decimal_currencies() {
        assert_eq!(
            round_to_precision(Decimal::new(1495, 1), 0),
            Decimal::from(150)
        );
    }

    #[test]
    fn floor_truncates_fractional_minor_units() {
        assert_eq!(
            floor_to_precision(Decimal::new(19499, 4), 2),
            Decimal::new(194, 2)
        );
        assert_eq!(
            floor_to_precision(Decimal::new(19999, 4), 2),
            Decimal::new(199, 2)
        );
    }

    #[test]
    fn floor_leaves_exact_amounts_unchanged() {
        assert_eq!(
            floor_to_precision(Decimal::new(255, 2), 2),
            Decimal::new(255, 2)
        );
    }

    #[test]
    fn minor_unit_scales_with_precision() {
        assert_eq!(minor_unit(2), Decimal::new(1, 2));
        assert_eq!(minor_unit(0), Decimal::ONE);
        assert_eq!(minor_unit(3), Decimal::new(1, 3));
    }
}
