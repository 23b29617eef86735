//! Cart state for the storefront.
//!
//! - **Money**: minor-unit amounts with a currency
//! - **Cart**: ordered line items, unique by product id, quantity always >= 1
//! - **Store**: the persisted cart slot plus change notification
//!
//! # Example
//!
//! ```rust
//! use storefront_cart::prelude::*;
//! use storefront_kv::MemoryStore;
//!
//! let mut store = CartStore::new(MemoryStore::new());
//! let aspirin = Product::new("p-1", "Aspirin", Money::from_decimal(10.0, Currency::USD));
//!
//! store.add(&aspirin).unwrap();
//! let cart = store.add(&aspirin).unwrap();
//!
//! assert_eq!(cart.quantity_of(&ProductId::new("p-1")), 2);
//! assert_eq!(cart.total().unwrap().display(), "$20.00");
//! ```

pub mod cart;
pub mod error;
pub mod event;
pub mod ids;
pub mod money;
pub mod store;

pub use cart::{Cart, CartItem, Product, MAX_QUANTITY_PER_ITEM};
pub use error::CartError;
pub use event::{CartChange, SubscriptionId};
pub use ids::ProductId;
pub use money::{Currency, Money};
pub use store::{CartStore, DEFAULT_CART_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartItem, Product, MAX_QUANTITY_PER_ITEM};
    pub use crate::error::CartError;
    pub use crate::event::{CartChange, SubscriptionId};
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};
    pub use crate::store::CartStore;
}
