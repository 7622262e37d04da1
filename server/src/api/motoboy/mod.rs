//! Rider panel API module. All routes require the panel password.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/motoboy", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/pedidos", get(handler::feed))
        .route("/pedidos/{id}/status", put(handler::update_status))
}
