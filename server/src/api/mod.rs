//! API route modules.
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`delivery`] - fee quotes and neighborhood list (public)
//! - [`pedidos`] - checkout (public), customer lookup (public), admin order management
//! - [`motoboy`] - rider feed and hand-off transitions
//! - [`statistics`] - admin dashboard numbers
//! - [`configuracao`] - store delivery configuration

pub mod configuracao;
pub mod delivery;
pub mod health;
pub mod motoboy;
pub mod pedidos;
pub mod statistics;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

/// Assemble the full application router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(delivery::router())
        .merge(pedidos::router())
        .merge(motoboy::router())
        .merge(statistics::router())
        .merge(configuracao::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
