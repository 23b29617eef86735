//! Cart event handlers.
//!
//! Each user action maps to exactly one store mutation. Surfaces refresh
//! through the store's subscribers, not from here.

use storefront_cart::{Cart, CartError, CartStore, Product, ProductId};
use storefront_kv::KvStore;

/// A cart interaction on a product card, the sidebar or the popup.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// "Add to Cart" clicked.
    Add(Product),
    /// "+" clicked.
    Increment(ProductId),
    /// "-" clicked; at quantity one this removes the line.
    Decrement(ProductId),
    /// "Remove" clicked.
    Remove(ProductId),
    /// Quantity typed into an input.
    EditQuantity { id: ProductId, input: String },
}

/// Apply an action to the store and return the resulting cart.
pub fn handle<S: KvStore>(store: &mut CartStore<S>, action: CartAction) -> Result<Cart, CartError> {
    match action {
        CartAction::Add(product) => store.add(&product),
        CartAction::Increment(id) => step(store, &id, 1),
        CartAction::Decrement(id) => step(store, &id, -1),
        CartAction::Remove(id) => store.remove(&id),
        CartAction::EditQuantity { id, input } => match parse_quantity(&input) {
            Some(quantity) => store.set_quantity(&id, quantity),
            None => {
                tracing::debug!(product_id = %id, input = %input, "ignoring non-numeric quantity");
                Ok(store.load())
            }
        },
    }
}

fn step<S: KvStore>(store: &mut CartStore<S>, id: &ProductId, delta: i64) -> Result<Cart, CartError> {
    let cart = store.load();
    match cart.get(id) {
        Some(item) => store.set_quantity(id, i64::from(item.quantity) + delta),
        None => {
            tracing::debug!(product_id = %id, "quantity step on product not in cart");
            Ok(cart)
        }
    }
}

/// Integer value of a quantity input; surrounding whitespace is allowed.
pub fn parse_quantity(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}
