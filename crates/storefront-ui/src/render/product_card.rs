//! Per-product controls on catalog cards.

use storefront_cart::{Cart, ProductId};

use super::{Surface, SurfaceKind};
use crate::html::escape;

/// Which control a product card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardControl {
    /// Not in the cart: an "Add to Cart" button.
    Add,
    /// In the cart: a stepper showing the current quantity.
    Quantity(u32),
}

/// Pick the control for a product given the cart.
pub fn card_control(cart: &Cart, id: &ProductId) -> CardControl {
    match cart.quantity_of(id) {
        0 => CardControl::Add,
        quantity => CardControl::Quantity(quantity),
    }
}

/// Render the control area of a product card.
pub fn render_card_control(id: &ProductId, control: CardControl) -> String {
    let id = escape(id.as_str());
    match control {
        CardControl::Add => format!(
            r#"<div class="product-actions" data-product-id="{id}"><button class="add-to-cart" data-product-id="{id}">Add to Cart</button></div>"#
        ),
        CardControl::Quantity(quantity) => format!(
            r#"<div class="product-actions" data-product-id="{id}"><div class="quantity-control"><button class="qty-btn decrement" data-product-id="{id}">-</button><input class="qty-input" type="number" min="1" value="{quantity}" data-product-id="{id}"><button class="qty-btn increment" data-product-id="{id}">+</button></div></div>"#
        ),
    }
}

/// The control area of one product card in the current view.
#[derive(Debug, Clone)]
pub struct ProductCardSurface {
    name: String,
    product: ProductId,
}

impl ProductCardSurface {
    /// Mounted as `card:<product id>`.
    pub fn new(product: ProductId) -> Self {
        Self {
            name: format!("card:{}", product),
            product,
        }
    }

    pub fn product(&self) -> &ProductId {
        &self.product
    }
}

impl Surface for ProductCardSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::ProductCard
    }

    fn render(&self, cart: &Cart) -> String {
        render_card_control(&self.product, card_control(cart, &self.product))
    }
}
