//! Delivery quote API module (public).

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/delivery", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/quote", get(handler::quote))
        .route("/bairros", get(handler::bairros))
}
