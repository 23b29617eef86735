//! Cart surfaces and the renderer that keeps them in sync.
//!
//! A surface is a pure projection of the cart into an HTML fragment. The
//! [`CartRenderer`] owns the surfaces mounted on the current page and the
//! last fragment each one produced. Attached to a [`CartStore`], it
//! re-renders every surface after each change.

mod list;
mod product_card;
mod summary;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use storefront_cart::{Cart, CartStore, SubscriptionId};
use storefront_kv::KvStore;

pub use list::{render_list, ItemListSurface, ListStyle, EMPTY_CART_MESSAGE};
pub use product_card::{card_control, render_card_control, CardControl, ProductCardSurface};
pub use summary::{render_count, render_total, CounterSurface, TotalSurface};

/// The four families of cart surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Line item lists (sidebar, popup).
    ItemList,
    /// Formatted cart total displays.
    Total,
    /// Item count badges.
    Counter,
    /// Add / quantity control on a product card.
    ProductCard,
}

/// A place on the page that shows cart state.
pub trait Surface {
    /// Unique mount name, e.g. `"sidebar"` or `"card:p-1"`.
    fn name(&self) -> &str;

    fn kind(&self) -> SurfaceKind;

    /// Project the cart. Must depend on nothing but `cart`.
    fn render(&self, cart: &Cart) -> String;
}

/// Owns the mounted surfaces and their latest output.
#[derive(Default)]
pub struct CartRenderer {
    surfaces: Vec<Box<dyn Surface>>,
    output: BTreeMap<String, String>,
}

impl CartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a surface. A later surface with the same name replaces the
    /// earlier one.
    pub fn mount(&mut self, surface: impl Surface + 'static) -> &mut Self {
        let name = surface.name().to_string();
        self.surfaces.retain(|s| s.name() != name);
        self.output.remove(&name);
        self.surfaces.push(Box::new(surface));
        self
    }

    /// Builder form of [`CartRenderer::mount`].
    pub fn with(mut self, surface: impl Surface + 'static) -> Self {
        self.mount(surface);
        self
    }

    /// Unmount a surface by name. Returns whether it was mounted.
    pub fn unmount(&mut self, name: &str) -> bool {
        let len_before = self.surfaces.len();
        self.surfaces.retain(|s| s.name() != name);
        self.output.remove(name);
        self.surfaces.len() < len_before
    }

    /// Names of mounted surfaces, in mount order.
    pub fn surface_names(&self) -> Vec<&str> {
        self.surfaces.iter().map(|s| s.name()).collect()
    }

    /// Latest fragment of a surface, if it is mounted and has rendered.
    pub fn output(&self, name: &str) -> Option<&str> {
        self.output.get(name).map(String::as_str)
    }

    /// All latest fragments keyed by surface name.
    pub fn outputs(&self) -> &BTreeMap<String, String> {
        &self.output
    }

    /// Rebuild every item list.
    pub fn render_list(&mut self, cart: &Cart) -> Vec<String> {
        self.render_kind(cart, Some(SurfaceKind::ItemList))
    }

    /// Rewrite every total display.
    pub fn render_total(&mut self, cart: &Cart) -> Vec<String> {
        self.render_kind(cart, Some(SurfaceKind::Total))
    }

    /// Rewrite every counter badge.
    pub fn render_counts(&mut self, cart: &Cart) -> Vec<String> {
        self.render_kind(cart, Some(SurfaceKind::Counter))
    }

    /// Switch every product card between its add and quantity controls.
    pub fn sync_product_cards(&mut self, cart: &Cart) -> Vec<String> {
        self.render_kind(cart, Some(SurfaceKind::ProductCard))
    }

    /// Re-render everything. Returns the names of surfaces whose output
    /// changed; an unchanged cart yields an empty list.
    pub fn refresh(&mut self, cart: &Cart) -> Vec<String> {
        self.render_kind(cart, None)
    }

    fn render_kind(&mut self, cart: &Cart, kind: Option<SurfaceKind>) -> Vec<String> {
        let mut changed = Vec::new();
        for surface in &self.surfaces {
            if kind.is_some_and(|k| k != surface.kind()) {
                continue;
            }
            let html = surface.render(cart);
            if self.output.get(surface.name()) != Some(&html) {
                changed.push(surface.name().to_string());
            }
            self.output.insert(surface.name().to_string(), html);
        }
        if !changed.is_empty() {
            tracing::trace!(surfaces = ?changed, "cart surfaces updated");
        }
        changed
    }
}

/// Render the current cart into `renderer` and keep it updated on every
/// store change.
pub fn attach<S: KvStore>(
    renderer: &Rc<RefCell<CartRenderer>>,
    store: &mut CartStore<S>,
) -> SubscriptionId {
    renderer.borrow_mut().refresh(&store.load());

    let renderer = Rc::clone(renderer);
    store.subscribe(move |_change, cart| {
        renderer.borrow_mut().refresh(cart);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cart::{Currency, Money, Product, ProductId};
    use storefront_kv::MemoryStore;

    fn cart_with(lines: &[(&str, f64, u32)]) -> Cart {
        let mut cart = Cart::new(Currency::USD);
        for (id, price, quantity) in lines {
            let product = Product::new(*id, id.to_uppercase(), Money::from_decimal(*price, Currency::USD));
            cart.add(&product).unwrap();
            cart.set_quantity(&product.id, i64::from(*quantity)).unwrap();
        }
        cart
    }

    fn full_renderer() -> CartRenderer {
        CartRenderer::new()
            .with(ItemListSurface::sidebar())
            .with(ItemListSurface::popup())
            .with(TotalSurface::new("sidebar-total"))
            .with(TotalSurface::new("popup-total"))
            .with(CounterSurface::new("nav-badge"))
            .with(ProductCardSurface::new(ProductId::new("a")))
            .with(ProductCardSurface::new(ProductId::new("z")))
    }

    #[test]
    fn test_total_of_example_cart() {
        let cart = cart_with(&[("a", 10.0, 2), ("b", 5.0, 1)]);
        let mut renderer = full_renderer();
        renderer.render_total(&cart);

        assert_eq!(renderer.output("sidebar-total"), Some("$25.00"));
        assert_eq!(renderer.output("popup-total"), Some("$25.00"));
        assert_eq!(renderer.output("sidebar"), None);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let cart = cart_with(&[("a", 10.0, 2), ("b", 5.0, 1)]);
        let mut renderer = full_renderer();

        let first = renderer.refresh(&cart);
        assert_eq!(first.len(), 7);
        let snapshot = renderer.outputs().clone();

        assert!(renderer.refresh(&cart).is_empty());
        assert_eq!(renderer.outputs(), &snapshot);
    }

    #[test]
    fn test_refresh_reports_only_changed_surfaces() {
        let mut renderer = full_renderer();
        renderer.refresh(&cart_with(&[("a", 10.0, 1)]));

        let changed = renderer.refresh(&cart_with(&[("a", 10.0, 1), ("b", 1.0, 1)]));
        assert!(changed.contains(&"sidebar".to_string()));
        assert!(changed.contains(&"nav-badge".to_string()));
        assert!(!changed.contains(&"card:a".to_string()));
        assert!(!changed.contains(&"card:z".to_string()));
    }

    #[test]
    fn test_counts() {
        let cart = cart_with(&[("a", 1.0, 3), ("b", 1.0, 4)]);
        let mut renderer = full_renderer();
        renderer.render_counts(&cart);
        assert_eq!(renderer.output("nav-badge"), Some("7"));
    }

    #[test]
    fn test_empty_renderer_is_noop() {
        let mut renderer = CartRenderer::new();
        assert!(renderer.refresh(&cart_with(&[("a", 1.0, 1)])).is_empty());
        assert!(renderer.outputs().is_empty());
    }

    #[test]
    fn test_mount_replaces_and_unmount() {
        let mut renderer = CartRenderer::new();
        renderer
            .mount(CounterSurface::new("badge"))
            .mount(CounterSurface::new("badge"));
        assert_eq!(renderer.surface_names(), vec!["badge"]);

        renderer.refresh(&Cart::new(Currency::USD));
        assert!(renderer.unmount("badge"));
        assert!(renderer.output("badge").is_none());
        assert!(!renderer.unmount("badge"));
    }

    #[test]
    fn test_attach_follows_store() {
        let renderer = Rc::new(RefCell::new(full_renderer()));
        let mut store = CartStore::new(MemoryStore::new());
        attach(&renderer, &mut store);

        assert_eq!(renderer.borrow().output("nav-badge"), Some("0"));
        assert!(renderer
            .borrow()
            .output("sidebar")
            .unwrap()
            .contains(EMPTY_CART_MESSAGE));

        let a = Product::new("a", "A", Money::from_decimal(4.0, Currency::USD));
        store.add(&a).unwrap();
        store.add(&a).unwrap();

        let view = renderer.borrow();
        assert_eq!(view.output("nav-badge"), Some("2"));
        assert_eq!(view.output("sidebar-total"), Some("$8.00"));
        assert!(view.output("card:a").unwrap().contains(r#"value="2""#));
        assert!(view.output("card:z").unwrap().contains("add-to-cart"));
    }
}
