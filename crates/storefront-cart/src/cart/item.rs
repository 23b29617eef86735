//! Products and the cart line items made from them.

use crate::ids::ProductId;
use crate::money::Money;

/// A purchasable product as shown on a product card.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image URL.
    pub image: Option<String>,
}

impl Product {
    /// Create a product without an image.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A line item in the cart.
///
/// `quantity` is always at least one; a line that would drop to zero is
/// removed from the cart instead.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Product being purchased.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image URL.
    pub image: Option<String>,
    /// Quantity.
    pub quantity: u32,
}

impl CartItem {
    /// Start a new line for a product with quantity one.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// `price x quantity`, or None on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.price.try_multiply(i64::from(self.quantity))
    }
}
