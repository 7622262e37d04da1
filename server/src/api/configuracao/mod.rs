//! Store configuration API module (admin only).

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/configuracao", get(handler::get).put(handler::update))
}
