//! Panel password gate.
//!
//! The admin and motoboy panels share one static password, sent on every
//! request in the `x-painel-senha` header and checked against the configured
//! value. Customer-facing endpoints are not gated.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::ServerState;
use crate::utils::AppError;

/// Header carrying the shared panel password.
pub const PANEL_PASSWORD_HEADER: &str = "x-painel-senha";

/// Panel Auth Extractor
///
/// Add this extractor to a handler to require the panel password.
#[derive(Debug, Clone, Copy)]
pub struct PanelAccess;

impl FromRequestParts<ServerState> for PanelAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(PANEL_PASSWORD_HEADER)
            .and_then(|h| h.to_str().ok());

        match provided {
            Some(password) if password == state.config.panel_password => Ok(PanelAccess),
            Some(_) => {
                tracing::warn!(uri = %parts.uri, "panel access denied: wrong password");
                Err(AppError::Unauthorized)
            }
            None => Err(AppError::Unauthorized),
        }
    }
}
