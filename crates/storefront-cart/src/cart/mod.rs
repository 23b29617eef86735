//! Shopping cart module.
//!
//! Contains the cart, its line items and the persisted record format.

mod cart;
mod item;
mod record;

pub use cart::{Cart, MAX_QUANTITY_PER_ITEM};
pub use item::{CartItem, Product};
pub use record::CartItemRecord;
