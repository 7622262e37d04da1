//! Order API module.
//!
//! Checkout and customer lookup are public; listing, detail and status
//! updates require the panel password.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pedidos", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", axum::routing::post(handler::checkout).get(handler::list))
        .route("/lookup", get(handler::lookup))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
}
