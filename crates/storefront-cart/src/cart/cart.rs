//! The cart: an ordered list of line items, unique by product id.

use std::collections::HashSet;

use crate::cart::{CartItem, CartItemRecord, Product};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// A shopping cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Build a cart from existing line items.
    ///
    /// Fails if an id repeats, a quantity is zero or above the limit, or a
    /// price is negative or in another currency.
    pub fn from_items(items: Vec<CartItem>, currency: Currency) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(CartError::DuplicateItem(item.id.clone()));
            }
            if item.quantity == 0 {
                return Err(CartError::InvalidQuantity {
                    product_id: item.id.to_string(),
                    quantity: 0,
                });
            }
            if item.quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CartError::QuantityExceedsLimit(
                    i64::from(item.quantity),
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            check_price(&item.id, &item.price, currency)?;
        }
        Ok(Self { items, currency })
    }

    /// Decode persisted records.
    pub fn from_records(records: Vec<CartItemRecord>, currency: Currency) -> Result<Self, CartError> {
        let items = records
            .into_iter()
            .map(|r| r.into_item(currency))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_items(items, currency)
    }

    /// Encode for persistence, preserving order.
    pub fn to_records(&self) -> Vec<CartItemRecord> {
        self.items.iter().map(CartItemRecord::from).collect()
    }

    /// Add one unit of a product.
    ///
    /// An existing line is incremented by one; otherwise a new line with
    /// quantity one is appended. Returns the line's new quantity.
    pub fn add(&mut self, product: &Product) -> Result<u32, CartError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == product.id) {
            let new_quantity = existing.quantity + 1;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CartError::QuantityExceedsLimit(
                    i64::from(new_quantity),
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            return Ok(new_quantity);
        }

        check_price(&product.id, &product.price, self.currency)?;
        self.items.push(CartItem::from_product(product));
        Ok(1)
    }

    /// Remove the line for a product. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Overwrite a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Unknown ids are left
    /// alone. Returns whether the cart changed.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<bool, CartError> {
        if quantity <= 0 {
            return Ok(self.remove(id));
        }

        if quantity > i64::from(MAX_QUANTITY_PER_ITEM) {
            return Err(CartError::QuantityExceedsLimit(quantity, MAX_QUANTITY_PER_ITEM));
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                let quantity = quantity as u32;
                let changed = item.quantity != quantity;
                item.quantity = quantity;
                Ok(changed)
            }
            None => Ok(false),
        }
    }

    /// Clear all items from the cart. Returns whether it had any.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Whether the product has a line in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Quantity for a product, zero when absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map(|i| i.quantity).unwrap_or(0)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `sum(price x quantity)` over all lines.
    pub fn total(&self) -> Result<Money, CartError> {
        let lines = self
            .items
            .iter()
            .map(|item| item.line_total().ok_or(CartError::Overflow))
            .collect::<Result<Vec<_>, _>>()?;
        // Every line was priced in the cart currency on the way in.
        Money::try_sum(lines.iter(), self.currency).ok_or(CartError::Overflow)
    }
}

fn check_price(id: &ProductId, price: &Money, currency: Currency) -> Result<(), CartError> {
    if price.currency != currency {
        return Err(CartError::CurrencyMismatch {
            expected: currency.code().to_string(),
            got: price.currency.code().to_string(),
        });
    }
    if price.is_negative() {
        return Err(CartError::InvalidPrice {
            product_id: id.to_string(),
            price: price.display(),
        });
    }
    Ok(())
}
