//! Cart total displays and item count badges.

use storefront_cart::Cart;

use super::{Surface, SurfaceKind};

/// Formatted `sum(price x quantity)`, e.g. `$25.00`.
pub fn render_total(cart: &Cart) -> String {
    match cart.total() {
        Ok(total) => total.display(),
        Err(e) => {
            tracing::warn!(error = %e, "cart total unavailable");
            "--".to_string()
        }
    }
}

/// Total quantity across all lines.
pub fn render_count(cart: &Cart) -> String {
    cart.item_count().to_string()
}

/// A mounted total display.
#[derive(Debug, Clone)]
pub struct TotalSurface {
    name: String,
}

impl TotalSurface {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Surface for TotalSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Total
    }

    fn render(&self, cart: &Cart) -> String {
        render_total(cart)
    }
}

/// A mounted count badge.
#[derive(Debug, Clone)]
pub struct CounterSurface {
    name: String,
}

impl CounterSurface {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Surface for CounterSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Counter
    }

    fn render(&self, cart: &Cart) -> String {
        render_count(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cart::{CartItem, Currency, Money, ProductId};

    fn line(id: &str, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: id.to_string(),
            price: Money::new(cents, Currency::USD),
            image: None,
            quantity,
        }
    }

    #[test]
    fn test_total_and_count() {
        let cart =
            Cart::from_items(vec![line("a", 1000, 2), line("b", 500, 1)], Currency::USD).unwrap();
        assert_eq!(render_total(&cart), "$25.00");
        assert_eq!(render_count(&cart), "3");
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new(Currency::USD);
        assert_eq!(render_total(&cart), "$0.00");
        assert_eq!(render_count(&cart), "0");
    }

    #[test]
    fn test_total_overflow_renders_placeholder() {
        let cart = Cart::from_items(vec![line("a", i64::MAX, 2)], Currency::USD).unwrap();
        assert_eq!(render_total(&cart), "--");
    }
}
