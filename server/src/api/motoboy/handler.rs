use axum::{
    Json,
    extract::{Path, State},
};
use shared::Surface;

use crate::auth::PanelAccess;
use crate::core::ServerState;
use crate::db::models::{Pedido, PedidoComItens, StatusUpdateRequest};
use crate::db::repository::PedidoRepository;
use crate::orders;
use crate::utils::AppResult;

/// GET /api/motoboy/pedidos - delivery queue, oldest first.
///
/// Only orders that are ready or on the road, and only real delivery
/// addresses; pickups never reach the rider.
pub async fn feed(
    _auth: PanelAccess,
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<PedidoComItens>>> {
    let repo = PedidoRepository::new(state.db.clone());
    let pedidos = repo.find_for_motoboy().await?;

    let mut result = Vec::with_capacity(pedidos.len());
    for pedido in pedidos {
        let itens = match &pedido.id {
            Some(id) => repo.itens_for(id).await?,
            None => Vec::new(),
        };
        result.push(PedidoComItens { pedido, itens });
    }

    Ok(Json(result))
}

/// PUT /api/motoboy/pedidos/{id}/status - rider hand-off transitions only
/// (`Pronto -> Entregando`, `Entregando -> Entregue`).
pub async fn update_status(
    _auth: PanelAccess,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> AppResult<Json<Pedido>> {
    let updated = orders::apply_transition(
        &state.db,
        &id,
        request.status,
        request.expected_version,
        Surface::Motoboy,
    )
    .await?;
    Ok(Json(updated))
}
