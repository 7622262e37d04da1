//! Database models.

pub mod configuracao;
pub mod pedido;
pub mod serde_helpers;

pub use configuracao::{Configuracao, ConfiguracaoUpdate};
pub use pedido::{
    CheckoutItem, CheckoutRequest, Cliente, Item, Pedido, PedidoComItens, StatusUpdateRequest,
};
