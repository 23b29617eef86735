//! The cart store: the persisted cart slot plus its subscribers.
//!
//! Every read goes to storage, so the slot stays the single source of
//! truth even when several handles share it. Every successful write
//! notifies subscribers in registration order.

use storefront_kv::{Cache, KvStore, StoreError};

use crate::cart::{Cart, CartItemRecord, Product};
use crate::error::CartError;
use crate::event::{CartChange, SubscriptionId};
use crate::ids::ProductId;
use crate::money::Currency;

/// Slot name the cart is persisted under.
pub const DEFAULT_CART_KEY: &str = "cart";

type Observer = Box<dyn FnMut(&CartChange, &Cart)>;

/// Persisted cart with change notification.
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    currency: Currency,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<S: KvStore> CartStore<S> {
    /// Create a store over the default `"cart"` slot, priced in USD.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY, Currency::USD)
    }

    /// Create a store over a custom slot and currency.
    pub fn with_key(storage: S, key: impl Into<String>, currency: Currency) -> Self {
        Self {
            cache: Cache::new(storage),
            key: key.into(),
            currency,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Slot name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Currency prices are read in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Read the persisted cart.
    ///
    /// An absent slot is an empty cart. So is a slot that cannot be read or
    /// decoded: the failure is logged and swallowed.
    pub fn load(&self) -> Cart {
        match self.try_load() {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable cart");
                Cart::new(self.currency)
            }
        }
    }

    fn try_load(&self) -> Result<Cart, CartError> {
        let records: Option<Vec<CartItemRecord>> = self.cache.get(&self.key)?;
        match records {
            Some(records) => Cart::from_records(records, self.currency),
            None => Ok(Cart::new(self.currency)),
        }
    }

    /// Overwrite the persisted cart wholesale and notify subscribers.
    pub fn save(&mut self, cart: &Cart) -> Result<(), CartError> {
        self.commit(cart, CartChange::Replaced)
    }

    /// Add one unit of a product and persist.
    pub fn add(&mut self, product: &Product) -> Result<Cart, CartError> {
        let mut cart = self.load();
        let quantity = cart.add(product)?;
        tracing::debug!(product_id = %product.id, quantity, "cart add");
        self.commit(
            &cart,
            CartChange::Added {
                id: product.id.clone(),
                quantity,
            },
        )?;
        Ok(cart)
    }

    /// Remove a product's line. Absent ids are a no-op: nothing is written
    /// and nobody is notified.
    pub fn remove(&mut self, id: &ProductId) -> Result<Cart, CartError> {
        let mut cart = self.load();
        if cart.remove(id) {
            tracing::debug!(product_id = %id, "cart remove");
            self.commit(&cart, CartChange::Removed { id: id.clone() })?;
        }
        Ok(cart)
    }

    /// Overwrite a line's quantity; `quantity <= 0` removes the line.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<Cart, CartError> {
        if quantity <= 0 {
            return self.remove(id);
        }

        let mut cart = self.load();
        if cart.set_quantity(id, quantity)? {
            tracing::debug!(product_id = %id, quantity, "cart set quantity");
            let quantity = cart.quantity_of(id);
            self.commit(
                &cart,
                CartChange::QuantityChanged {
                    id: id.clone(),
                    quantity,
                },
            )?;
        }
        Ok(cart)
    }

    /// Remove every line.
    pub fn clear(&mut self) -> Result<Cart, CartError> {
        let mut cart = self.load();
        if cart.clear() {
            tracing::debug!("cart cleared");
            self.commit(&cart, CartChange::Cleared)?;
        }
        Ok(cart)
    }

    /// Register an observer called after every successful write.
    pub fn subscribe(&mut self, observer: impl FnMut(&CartChange, &Cart) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() < len_before
    }

    /// Number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Delete the persisted slot entirely.
    pub fn purge(&mut self) -> Result<(), StoreError> {
        self.cache.delete(&self.key)
    }

    fn commit(&mut self, cart: &Cart, change: CartChange) -> Result<(), CartError> {
        self.cache.set(&self.key, &cart.to_records())?;
        for (_, observer) in self.observers.iter_mut() {
            observer(&change, cart);
        }
        Ok(())
    }
}
