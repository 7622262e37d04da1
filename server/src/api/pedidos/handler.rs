use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::{OrderStatus, Surface};

use crate::auth::PanelAccess;
use crate::core::ServerState;
use crate::db::models::{CheckoutRequest, Pedido, PedidoComItens, StatusUpdateRequest};
use crate::db::repository::PedidoRepository;
use crate::orders;
use crate::utils::{AppError, AppResult};
use crate::utils::time::{day_end_exclusive, day_start, parse_day};

/// POST /api/pedidos - customer checkout (public).
pub async fn checkout(
    State(state): State<ServerState>,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<PedidoComItens>)> {
    let created = orders::create_order(&state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

fn default_limit() -> usize {
    100
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    /// YYYY-MM-DD, inclusive.
    pub inicio: Option<String>,
    /// YYYY-MM-DD, inclusive. Defaults to `inicio`.
    pub fim: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

/// GET /api/pedidos - admin list, newest first. Filters by status or by day
/// range.
pub async fn list(
    _auth: PanelAccess,
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Pedido>>> {
    let repo = PedidoRepository::new(state.db.clone());

    let pedidos = if let Some(status) = query.status {
        repo.find_by_status(status).await?
    } else if query.inicio.is_some() || query.fim.is_some() {
        let inicio = query.inicio.as_deref().or(query.fim.as_deref());
        let inicio = inicio
            .and_then(parse_day)
            .ok_or_else(|| AppError::validation("inicio/fim must be YYYY-MM-DD"))?;
        let fim = match query.fim.as_deref() {
            Some(s) => {
                parse_day(s).ok_or_else(|| AppError::validation("fim must be YYYY-MM-DD"))?
            }
            None => inicio,
        };
        repo.find_by_date_range(day_start(inicio), day_end_exclusive(fim))
            .await?
    } else {
        repo.find_all(query.limit, query.offset).await?
    };

    Ok(Json(pedidos))
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub telefone: String,
}

/// GET /api/pedidos/lookup?telefone= - customer order lookup (public).
///
/// Statuses are mapped through the customer surface, so `Pronto` shows as
/// `Preparando`.
pub async fn lookup(
    State(state): State<ServerState>,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<Vec<PedidoComItens>>> {
    let repo = PedidoRepository::new(state.db.clone());
    let pedidos = repo.find_by_phone(&query.telefone).await?;

    let mut result = Vec::with_capacity(pedidos.len());
    for mut pedido in pedidos {
        pedido.status = pedido.status.display_for(Surface::Customer);
        let itens = match &pedido.id {
            Some(id) => repo.itens_for(id).await?,
            None => Vec::new(),
        };
        result.push(PedidoComItens { pedido, itens });
    }

    Ok(Json(result))
}

/// GET /api/pedidos/{id} - admin order detail with line items.
pub async fn get_by_id(
    _auth: PanelAccess,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PedidoComItens>> {
    let repo = PedidoRepository::new(state.db.clone());
    let pedido = repo
        .find_with_itens(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("pedido {id}")))?;
    Ok(Json(pedido))
}

/// PUT /api/pedidos/{id}/status - admin status transition.
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
        Surface::Admin,
    )
    .await?;
    Ok(Json(updated))
}
