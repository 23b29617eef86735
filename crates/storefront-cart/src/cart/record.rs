//! Persisted line item format.
//!
//! The cart slot holds a JSON array of these records. Prices are plain
//! decimal numbers; the currency comes from the store that reads them.

use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, MAX_QUANTITY_PER_ITEM};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// One element of the persisted cart array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemRecord {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartItemRecord {
    /// Convert into a line item, checking the item invariants.
    ///
    /// A quantity above [`MAX_QUANTITY_PER_ITEM`] is clamped to the limit
    /// rather than rejected.
    pub fn into_item(self, currency: Currency) -> Result<CartItem, CartError> {
        let price = Money::try_from_decimal(self.price, currency).ok_or_else(|| {
            CartError::InvalidPrice {
                product_id: self.id.clone(),
                price: self.price.to_string(),
            }
        })?;

        if self.quantity == 0 {
            return Err(CartError::InvalidQuantity {
                product_id: self.id,
                quantity: 0,
            });
        }

        let quantity = if self.quantity > MAX_QUANTITY_PER_ITEM {
            tracing::warn!(
                product_id = %self.id,
                quantity = self.quantity,
                limit = MAX_QUANTITY_PER_ITEM,
                "clamping persisted quantity"
            );
            MAX_QUANTITY_PER_ITEM
        } else {
            self.quantity
        };

        Ok(CartItem {
            id: ProductId::new(self.id),
            name: self.name,
            price,
            image: self.image,
            quantity,
        })
    }
}

impl From<&CartItem> for CartItemRecord {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.as_str().to_string(),
            name: item.name.clone(),
            price: item.price.to_decimal(),
            image: item.image.clone(),
            quantity: item.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let record = CartItemRecord {
            id: "p1".into(),
            name: "Vitamin C".into(),
            price: 12.5,
            image: None,
            quantity: 2,
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":"p1","name":"Vitamin C","price":12.5,"quantity":2}"#
        );
    }

    #[test]
    fn test_into_item() {
        let record: CartItemRecord = serde_json::from_str(
            r#"{"id":"p1","name":"Vitamin C","price":12.5,"image":"/img/c.png","quantity":2}"#,
        )
        .unwrap();
        let item = record.into_item(Currency::USD).unwrap();
        assert_eq!(item.price, Money::new(1250, Currency::USD));
        assert_eq!(item.image.as_deref(), Some("/img/c.png"));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let record = CartItemRecord {
            id: "p1".into(),
            name: "x".into(),
            price: 1.0,
            image: None,
            quantity: 0,
        };
        assert!(matches!(
            record.into_item(Currency::USD),
            Err(CartError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_over_limit_quantity_clamped() {
        let record = CartItemRecord {
            id: "p1".into(),
            name: "x".into(),
            price: 1.0,
            image: None,
            quantity: MAX_QUANTITY_PER_ITEM + 1,
        };
        let item = record.into_item(Currency::USD).unwrap();
        assert_eq!(item.quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_negative_price_rejected() {
        let record = CartItemRecord {
            id: "p1".into(),
            name: "x".into(),
            price: -3.0,
            image: None,
            quantity: 1,
        };
        assert!(matches!(
            record.into_item(Currency::USD),
            Err(CartError::InvalidPrice { .. })
        ));
    }
}
