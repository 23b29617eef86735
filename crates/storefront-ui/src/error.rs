//! Error types for the storefront UI layer.

use storefront_cart::CartError;
use storefront_kv::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by [`crate::Storefront`].
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// A cart mutation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}
