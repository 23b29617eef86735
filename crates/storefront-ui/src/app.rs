//! Storefront page state: the cart, its surfaces, the theme, search and
//! the message box, wired together from one configuration.

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use storefront_cart::{Cart, CartStore, Currency};
use storefront_kv::{FileStore, KvStore};

use crate::carousel::{Carousel, CarouselKind, CarouselSettings};
use crate::config::{ConfigError, StorefrontConfig};
use crate::error::StorefrontError;
use crate::handlers::{self, CartAction};
use crate::message::{MessageBox, Toast};
use crate::navbar::{Navbar, NavbarSettings};
use crate::render::{self, CartRenderer, Surface};
use crate::search::{SearchNavigator, SearchOutcome};
use crate::signup::SignupFlow;
use crate::theme::{Theme, ThemeController};

/// One page of the storefront.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use storefront_cart::{Currency, Money, Product};
/// use storefront_kv::MemoryStore;
/// use storefront_ui::{CartAction, CounterSurface, Storefront, StorefrontConfig};
///
/// let mut page = Storefront::new(Rc::new(MemoryStore::new()), StorefrontConfig::default()).unwrap();
/// page.mount(CounterSurface::new("badge"));
///
/// let zinc = Product::new("p-7", "Zinc", Money::new(300, Currency::USD));
/// page.dispatch(CartAction::Add(zinc)).unwrap();
///
/// assert_eq!(page.output("badge").as_deref(), Some("1"));
/// ```
pub struct Storefront<S> {
    config: StorefrontConfig,
    cart: CartStore<S>,
    renderer: Rc<RefCell<CartRenderer>>,
    theme: ThemeController<S>,
    search: SearchNavigator,
    messages: MessageBox,
}

impl<S: KvStore + Clone> Storefront<S> {
    /// Build a page over `storage`. Both the cart and the theme slots live
    /// in it.
    pub fn new(storage: S, config: StorefrontConfig) -> Result<Self, StorefrontError> {
        config.validate()?;
        let currency = config.store.currency().ok_or_else(|| ConfigError::Invalid {
            field: "store.currency",
            reason: format!("unknown currency code {:?}", config.store.currency),
        })?;

        let mut cart = CartStore::with_key(storage.clone(), config.storage.cart_key.clone(), currency);
        let renderer = Rc::new(RefCell::new(CartRenderer::new()));
        render::attach(&renderer, &mut cart);

        let theme = ThemeController::load(storage, config.storage.theme_key.clone())?;

        tracing::debug!(
            cart_key = %config.storage.cart_key,
            currency = currency.code(),
            theme = %theme.theme(),
            "storefront ready"
        );

        Ok(Self {
            search: SearchNavigator::from_config(&config.search),
            messages: MessageBox::new(config.messages.toast_duration()),
            config,
            cart,
            renderer,
            theme,
        })
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn currency(&self) -> Currency {
        self.cart.currency()
    }

    /// Current persisted cart.
    pub fn cart(&self) -> Cart {
        self.cart.load()
    }

    pub fn cart_store(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    /// Mount a surface and render it right away.
    pub fn mount(&mut self, surface: impl Surface + 'static) {
        let cart = self.cart.load();
        let mut renderer = self.renderer.borrow_mut();
        renderer.mount(surface);
        renderer.refresh(&cart);
    }

    pub fn unmount(&mut self, name: &str) -> bool {
        self.renderer.borrow_mut().unmount(name)
    }

    pub fn renderer(&self) -> Ref<'_, CartRenderer> {
        self.renderer.borrow()
    }

    /// Latest fragment of a mounted surface.
    pub fn output(&self, name: &str) -> Option<String> {
        self.renderer.borrow().output(name).map(str::to_string)
    }

    /// Apply a cart action; mounted surfaces follow through the store.
    pub fn dispatch(&mut self, action: CartAction) -> Result<Cart, StorefrontError> {
        Ok(handlers::handle(&mut self.cart, action)?)
    }

    /// Submit a search. Returns the URL to go to, or shows the empty-search
    /// message and returns `None`.
    pub fn search(&mut self, input: &str) -> Option<String> {
        match self.search.submit(input) {
            SearchOutcome::Navigate(url) => Some(url),
            SearchOutcome::Message(text) => {
                self.messages.show(Toast::warning(text));
                None
            }
        }
    }

    pub fn search_navigator(&self) -> &SearchNavigator {
        &self.search
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn theme_controller(&self) -> &ThemeController<S> {
        &self.theme
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorefrontError> {
        Ok(self.theme.toggle()?)
    }

    pub fn show_message(&mut self, toast: Toast) {
        self.messages.show(toast);
    }

    pub fn messages(&self) -> &MessageBox {
        &self.messages
    }

    /// A carousel configured for this page.
    pub fn carousel(&self, kind: CarouselKind, item_count: usize, viewport_width: u32) -> Carousel {
        Carousel::new(
            item_count,
            viewport_width,
            CarouselSettings::from_config(&self.config, kind),
        )
    }

    /// The navbar configured for this page.
    pub fn navbar(&self, viewport_width: u32, scroll_top: i64) -> Navbar {
        Navbar::new(NavbarSettings::from_config(&self.config), viewport_width, scroll_top)
    }

    /// The signup wizard configured for this page.
    pub fn signup_flow(&self) -> SignupFlow {
        SignupFlow::new(&self.config.signup)
    }

    /// Let time pass for page-level timers.
    pub fn advance(&mut self, elapsed: Duration) {
        self.messages.advance(elapsed);
    }
}

impl Storefront<Rc<FileStore>> {
    /// Open a page backed by files under `config.storage.data_dir`.
    pub fn open(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let storage = Rc::new(FileStore::open(config.storage.data_dir.clone())?);
        Self::new(storage, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CounterSurface, ItemListSurface, TotalSurface};
    use storefront_cart::{Money, Product, ProductId};
    use storefront_kv::MemoryStore;

    fn page() -> (Rc<MemoryStore>, Storefront<Rc<MemoryStore>>) {
        let storage = Rc::new(MemoryStore::new());
        let page = Storefront::new(Rc::clone(&storage), StorefrontConfig::default()).unwrap();
        (storage, page)
    }

    #[test]
    fn test_dispatch_updates_mounted_surfaces() {
        let (_, mut page) = page();
        page.mount(ItemListSurface::sidebar());
        page.mount(TotalSurface::new("total"));
        page.mount(CounterSurface::new("badge"));
        assert_eq!(page.output("badge").as_deref(), Some("0"));

        let a = Product::new("a", "A", Money::new(1000, Currency::USD));
        page.dispatch(CartAction::Add(a.clone())).unwrap();
        page.dispatch(CartAction::Add(a)).unwrap();
        page.dispatch(CartAction::Add(Product::new("b", "B", Money::new(500, Currency::USD))))
            .unwrap();

        assert_eq!(page.output("total").as_deref(), Some("$25.00"));
        assert_eq!(page.output("badge").as_deref(), Some("3"));

        page.dispatch(CartAction::Decrement(ProductId::new("a"))).unwrap();
        assert_eq!(page.output("badge").as_deref(), Some("2"));
    }

    #[test]
    fn test_mount_on_existing_cart() {
        let storage = Rc::new(MemoryStore::with_entries([(
            "cart",
            r#"[{"id":"a","name":"A","price":2.5,"quantity":4}]"#,
        )]));
        let mut page = Storefront::new(storage, StorefrontConfig::default()).unwrap();
        page.mount(TotalSurface::new("total"));
        assert_eq!(page.output("total").as_deref(), Some("$10.00"));
    }

    #[test]
    fn test_empty_search_shows_message() {
        let (_, mut page) = page();
        assert_eq!(page.search("  "), None);
        let toast = page.messages().visible().unwrap();
        assert_eq!(toast.text, "Please enter a medicine name to search.");

        page.advance(Duration::from_millis(3000));
        assert!(page.messages().visible().is_none());

        assert_eq!(
            page.search("cough syrup").as_deref(),
            Some("shopping.html?search=cough%20syrup")
        );
    }

    #[test]
    fn test_theme_shares_storage() {
        let (storage, mut page) = page();
        assert_eq!(page.theme(), Theme::Light);
        page.toggle_theme().unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = StorefrontConfig::default();
        config.store.currency = "XYZ".to_string();
        let result = Storefront::new(Rc::new(MemoryStore::new()), config);
        assert!(matches!(result, Err(StorefrontError::Config(_))));
    }

    #[test]
    fn test_open_file_backed() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::default();
        config.storage.data_dir = dir.path().join("data");

        {
            let mut page = Storefront::open(config.clone()).unwrap();
            page.dispatch(CartAction::Add(Product::new("a", "A", Money::new(100, Currency::USD))))
                .unwrap();
        }

        let page = Storefront::open(config).unwrap();
        assert_eq!(page.cart().quantity_of(&ProductId::new("a")), 1);
    }

    #[test]
    fn test_widget_factories_follow_config() {
        let (_, page) = page();
        assert_eq!(page.carousel(CarouselKind::Featured, 8, 1280).items_per_view(), 4);
        assert!(page.navbar(1280, 200).is_collapsed());
        assert_eq!(page.signup_flow().step(), 1);
    }
}
