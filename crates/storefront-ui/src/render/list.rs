//! Line item lists: the cart sidebar and the cart popup.

use storefront_cart::{Cart, CartItem};

use super::{Surface, SurfaceKind};
use crate::html::escape;

/// Shown in place of the list when the cart has no lines.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// How much detail each line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// Image, name, unit price, quantity control, subtotal and remove.
    Full,
    /// Name, quantity and subtotal only.
    Compact,
}

/// Render the item list from scratch.
pub fn render_list(cart: &Cart, style: ListStyle) -> String {
    if cart.is_empty() {
        return format!(r#"<p class="cart-empty">{}</p>"#, EMPTY_CART_MESSAGE);
    }

    let lines: String = cart
        .items()
        .iter()
        .map(|item| match style {
            ListStyle::Full => render_full_line(item),
            ListStyle::Compact => render_compact_line(item),
        })
        .collect();

    format!(r#"<ul class="cart-items">{}</ul>"#, lines)
}

fn render_full_line(item: &CartItem) -> String {
    let id = escape(item.id.as_str());
    let name = escape(&item.name);
    let image = item
        .image
        .as_deref()
        .map(|src| format!(r#"<img class="cart-item-image" src="{}" alt="{}">"#, escape(src), name))
        .unwrap_or_default();

    format!(
        r#"<li class="cart-item" data-product-id="{id}">{image}<div class="cart-item-info"><span class="cart-item-name">{name}</span><span class="cart-item-price">{price}</span></div><div class="quantity-control" data-product-id="{id}"><button class="qty-btn decrement" data-product-id="{id}">-</button><input class="qty-input" type="number" min="1" value="{quantity}" data-product-id="{id}"><button class="qty-btn increment" data-product-id="{id}">+</button></div><span class="cart-item-subtotal">{subtotal}</span><button class="remove-item" data-product-id="{id}">Remove</button></li>"#,
        price = item.price.display(),
        quantity = item.quantity,
        subtotal = line_subtotal(item),
    )
}

fn render_compact_line(item: &CartItem) -> String {
    format!(
        r#"<li class="cart-item compact" data-product-id="{}"><span class="cart-item-name">{}</span><span class="cart-item-qty">x{}</span><span class="cart-item-subtotal">{}</span></li>"#,
        escape(item.id.as_str()),
        escape(&item.name),
        item.quantity,
        line_subtotal(item),
    )
}

fn line_subtotal(item: &CartItem) -> String {
    item.line_total()
        .map(|m| m.display())
        .unwrap_or_else(|| "--".to_string())
}

/// A mounted item list.
#[derive(Debug, Clone)]
pub struct ItemListSurface {
    name: String,
    style: ListStyle,
}

impl ItemListSurface {
    pub fn new(name: impl Into<String>, style: ListStyle) -> Self {
        Self {
            name: name.into(),
            style,
        }
    }

    /// The full-detail cart sidebar.
    pub fn sidebar() -> Self {
        Self::new("sidebar", ListStyle::Full)
    }

    /// The compact popup under the cart icon.
    pub fn popup() -> Self {
        Self::new("popup", ListStyle::Compact)
    }
}

impl Surface for ItemListSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::ItemList
    }

    fn render(&self, cart: &Cart) -> String {
        render_list(cart, self.style)
    }
}
