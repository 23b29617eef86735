//! Storefront interaction layer.
//!
//! - **Render**: cart surfaces (lists, totals, counters, product cards) as
//!   pure `Cart -> HTML` projections, kept in sync through the cart store
//! - **Handlers**: user actions mapped onto cart store mutations
//! - **Widgets**: theme, search, carousels, navbar, accordions and the
//!   signup wizard as state machines driven by explicit events
//! - **Config**: one TOML or JSON file with defaults for every section
//!
//! Timers never read a clock: the host reports elapsed time through each
//! widget's `advance`.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use storefront_cart::{CartStore, Currency, Money, Product};
//! use storefront_kv::MemoryStore;
//! use storefront_ui::prelude::*;
//!
//! let mut store = CartStore::new(MemoryStore::new());
//! let renderer = Rc::new(RefCell::new(
//!     CartRenderer::new()
//!         .with(ItemListSurface::sidebar())
//!         .with(TotalSurface::new("sidebar-total")),
//! ));
//! attach(&renderer, &mut store);
//!
//! let gauze = Product::new("p-3", "Gauze", Money::new(1250, Currency::USD));
//! handle(&mut store, CartAction::Add(gauze.clone())).unwrap();
//! handle(&mut store, CartAction::Add(gauze)).unwrap();
//!
//! assert_eq!(renderer.borrow().output("sidebar-total"), Some("$25.00"));
//! ```

pub mod accordion;
pub mod app;
pub mod carousel;
pub mod config;
pub mod error;
pub mod handlers;
mod html;
pub mod message;
pub mod navbar;
pub mod render;
pub mod search;
pub mod signup;
pub mod theme;
pub mod timing;

pub use accordion::{Accordion, FooterColumns};
pub use app::Storefront;
pub use carousel::{Carousel, CarouselKind, CarouselSettings, TrackGeometry, Transition};
pub use config::{ConfigError, StorefrontConfig};
pub use error::StorefrontError;
pub use handlers::{handle, CartAction};
pub use message::{MessageBox, MessageKind, Toast};
pub use navbar::{Navbar, NavbarLayout, NavbarSettings};
pub use render::{
    attach, CardControl, CartRenderer, CounterSurface, ItemListSurface, ListStyle,
    ProductCardSurface, Surface, SurfaceKind, TotalSurface, EMPTY_CART_MESSAGE,
};
pub use search::{SearchBox, SearchNavigator, SearchOutcome, SearchTrigger};
pub use signup::{BackAction, Section, SignupError, SignupFlow, StepForm};
pub use theme::{Theme, ThemeController, ToggleVariant};
pub use timing::{Interval, Timer};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StorefrontConfig;
    pub use crate::error::StorefrontError;
    pub use crate::handlers::{handle, CartAction};
    pub use crate::render::{
        attach, CartRenderer, CounterSurface, ItemListSurface, ProductCardSurface, Surface,
        TotalSurface,
    };
    pub use crate::Storefront;
}
