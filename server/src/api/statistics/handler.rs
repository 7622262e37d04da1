use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::OrderStatus;

use crate::auth::PanelAccess;
use crate::core::ServerState;
use crate::db::models::Pedido;
use crate::db::repository::PedidoRepository;
use crate::orders::money;
use crate::utils::time::{day_end_exclusive, day_start, last_days, parse_day};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    /// YYYY-MM-DD, inclusive. Defaults to 7 days ago.
    pub inicio: Option<String>,
    /// YYYY-MM-DD, inclusive. Defaults to today.
    pub fim: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PontoReceita {
    pub dia: String,
    pub valor: f64,
}

#[derive(Debug, Serialize)]
pub struct TopItem {
    pub nome: String,
    pub quantidade: i64,
}

#[derive(Debug, Serialize)]
pub struct EstatisticasResponse {
    pub total_pedidos: usize,
    /// Revenue over the window; cancelled orders do not count.
    pub receita_total: f64,
    pub ticket_medio: f64,
    pub por_status: BTreeMap<OrderStatus, usize>,
    pub receita_por_dia: Vec<PontoReceita>,
    pub itens_mais_vendidos: Vec<TopItem>,
}

/// GET /api/statistics?inicio=&fim= - dashboard numbers for a day range.
pub async fn statistics(
    _auth: PanelAccess,
    State(state): State<ServerState>,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<Json<EstatisticasResponse>> {
    let (inicio, fim) = match (query.inicio.as_deref(), query.fim.as_deref()) {
        (None, None) => last_days(7),
        (inicio, fim) => {
            let inicio = inicio
                .map(|s| parse_day(s).ok_or_else(|| AppError::validation("inicio must be YYYY-MM-DD")))
                .transpose()?;
            let fim = fim
                .map(|s| parse_day(s).ok_or_else(|| AppError::validation("fim must be YYYY-MM-DD")))
                .transpose()?;
            let inicio = inicio.or(fim).unwrap_or_else(|| chrono::Utc::now().date_naive());
            let fim = fim.unwrap_or(inicio);
            (day_start(inicio), day_end_exclusive(fim))
        }
    };

    let repo = PedidoRepository::new(state.db.clone());
    let pedidos = repo.find_by_date_range(inicio, fim).await?;

    Ok(Json(aggregate(&repo, pedidos).await?))
}

async fn aggregate(
    repo: &PedidoRepository,
    pedidos: Vec<Pedido>,
) -> AppResult<EstatisticasResponse> {
    let mut por_status: BTreeMap<OrderStatus, usize> = BTreeMap::new();
    for status in OrderStatus::ALL {
        por_status.insert(status, 0);
    }

    let mut receita = Decimal::ZERO;
    let mut pagos = 0usize;
    let mut por_dia: BTreeMap<String, Decimal> = BTreeMap::new();

    for pedido in &pedidos {
        *por_status.entry(pedido.status).or_default() += 1;
        if pedido.status == OrderStatus::Cancelado {
            continue;
        }
        let total = money::to_decimal(pedido.total);
        receita += total;
        pagos += 1;
        let dia = pedido.created_at.date_naive().to_string();
        *por_dia.entry(dia).or_default() += total;
    }

    let ticket_medio = if pagos > 0 {
        money::to_f64(receita / Decimal::from(pagos))
    } else {
        0.0
    };

    let pedido_ids = pedidos.iter().filter_map(|p| p.id.clone()).collect();
    let itens = repo.itens_for_pedidos(pedido_ids).await?;
    let mut por_item: BTreeMap<String, i64> = BTreeMap::new();
    for item in itens {
        *por_item.entry(item.nome).or_default() += i64::from(item.qtd);
    }
    let mut itens_mais_vendidos: Vec<TopItem> = por_item
        .into_iter()
        .map(|(nome, quantidade)| TopItem { nome, quantidade })
        .collect();
    itens_mais_vendidos.sort_by(|a, b| b.quantidade.cmp(&a.quantidade).then(a.nome.cmp(&b.nome)));
    itens_mais_vendidos.truncate(5);

    Ok(EstatisticasResponse {
        total_pedidos: pedidos.len(),
        receita_total: money::to_f64(receita),
        ticket_medio,
        por_status,
        receita_por_dia: por_dia
            .into_iter()
            .map(|(dia, valor)| PontoReceita {
                dia,
                valor: money::to_f64(valor),
            })
            .collect(),
        itens_mais_vendidos,
    })
}
