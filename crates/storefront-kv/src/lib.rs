//! Key-value persistence for the storefront.
//!
//! Browser storefronts keep their durable state in a flat string-to-string
//! store (one slot for the cart, one for the theme, ...). This crate models
//! that store behind the [`KvStore`] trait and layers typed JSON access on
//! top of it with [`Cache`].
//!
//! # Example
//!
//! ```rust
//! use storefront_kv::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Line {
//!     id: String,
//!     quantity: u32,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &vec![Line { id: "p1".into(), quantity: 2 }]).unwrap();
//!
//! let lines: Option<Vec<Line>> = cache.get("cart").unwrap();
//! assert_eq!(lines.unwrap()[0].quantity, 2);
//! ```

mod cache;
mod error;
mod store;

pub use cache::Cache;
pub use error::StoreError;
pub use store::{validate_key, FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, FileStore, KvStore, MemoryStore, StoreError};
}
