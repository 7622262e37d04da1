//! Shared domain types for the delivery ordering system.
//!
//! Pure types used by the server and by panel clients:
//!
//! - [`order::status`] - order lifecycle state machine and per-surface view rules
//! - [`order::cart`] - cart aggregate as a pure reducer
//! - [`util`] - timestamps and snowflake-style IDs

pub mod order;
pub mod util;

pub use order::cart::{Adicionais, CartAction, CartItem, CartState, Extra, reduce};
pub use order::status::{OrderStatus, Surface, TransitionError};
