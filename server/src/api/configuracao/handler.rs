use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::PanelAccess;
use crate::core::ServerState;
use crate::db::models::{Configuracao, ConfiguracaoUpdate};
use crate::db::repository::ConfiguracaoRepository;
use crate::utils::AppResult;

/// GET /api/configuracao - current delivery defaults.
pub async fn get(
    _auth: PanelAccess,
    State(state): State<ServerState>,
) -> AppResult<Json<Configuracao>> {
    let repo = ConfiguracaoRepository::new(state.db.clone());
    Ok(Json(repo.get_or_default().await?))
}

/// PUT /api/configuracao - partial update; absent fields keep their value.
pub async fn update(
    _auth: PanelAccess,
    State(state): State<ServerState>,
    Json(changes): Json<ConfiguracaoUpdate>,
) -> AppResult<Json<Configuracao>> {
    changes.validate()?;
    let repo = ConfiguracaoRepository::new(state.db.clone());
    Ok(Json(repo.update(changes).await?))
}
