//! Order domain: status lifecycle and cart aggregate.

pub mod cart;
pub mod status;

pub use cart::{Adicionais, CartAction, CartItem, CartState, Extra, reduce};
pub use status::{OrderStatus, Surface, TransitionError};
