//! Line items
//!
//! Immutable entries of a cart snapshot. Items are constructed by the caller
//! from live cart state each time an allocation is requested and are never
//! mutated by the engine.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors related to line item construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// The unit price was negative.
    #[error("item {0} has a negative unit price")]
    NegativeUnitPrice(ItemId),

    /// The quantity was zero.
    #[error("item {0} has zero quantity")]
    ZeroQuantity(ItemId),
}

/// Opaque stable identifier for a line item, unique within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

/// A line in a cart snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    id: ItemId,
    unit_price: Decimal,
    quantity: u32,
}

impl LineItem {
    /// Create a new line item.
    ///
    /// # Errors
    ///
    /// - [`LineItemError::NegativeUnitPrice`]: the unit price was negative.
    /// - [`LineItemError::ZeroQuantity`]: the quantity was zero.
    pub fn new(
        id: impl Into<ItemId>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Self, LineItemError> {
        let id = id.into();

        if unit_price < Decimal::ZERO {
            return Err(LineItemError::NegativeUnitPrice(id));
        }

        if quantity == 0 {
            return Err(LineItemError::ZeroQuantity(id));
        }

        Ok(LineItem {
            id,
            unit_price,
            quantity,
        })
    }

    /// Returns the item identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the unit price.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity, computed on demand.
    ///
    /// Saturates at the decimal range limit; the engine's checked subtotal
    /// pass surfaces that case as a typed error.
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}
