//! Change notifications emitted by the cart store.

use crate::ids::ProductId;

/// What a successful cart mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A product was added or incremented to `quantity`.
    Added { id: ProductId, quantity: u32 },
    /// A line's quantity was overwritten.
    QuantityChanged { id: ProductId, quantity: u32 },
    /// A line was removed.
    Removed { id: ProductId },
    /// Every line was removed.
    Cleared,
    /// The whole cart was written at once.
    Replaced,
}

impl CartChange {
    /// Product affected by the change, if it targets a single line.
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            CartChange::Added { id, .. }
            | CartChange::QuantityChanged { id, .. }
            | CartChange::Removed { id } => Some(id),
            CartChange::Cleared | CartChange::Replaced => None,
        }
    }
}

/// Handle returned by [`crate::CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
