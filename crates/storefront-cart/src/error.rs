//! Cart error types.

use storefront_kv::StoreError;
use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// The storage slot could not be read or written.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StoreError),

    /// Prices must be finite and non-negative.
    #[error("Invalid price for {product_id}: {price}")]
    InvalidPrice { product_id: String, price: String },

    /// Line items are stored with a quantity of at least one.
    #[error("Invalid quantity for {product_id}: {quantity}")]
    InvalidQuantity { product_id: String, quantity: i64 },

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, u32),

    /// The same product appears twice.
    #[error("Duplicate line item: {0}")]
    DuplicateItem(ProductId),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
