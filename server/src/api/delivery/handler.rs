use axum::{Json, extract::Query, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::delivery::{self, DeliveryQuote, DeliveryService};

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub endereco: String,
    /// Order subtotal; free delivery kicks in at the threshold.
    #[serde(default)]
    pub total: f64,
}

/// GET /api/delivery/quote?endereco=&total=
///
/// Never fails: unrecognized addresses get the default fee.
pub async fn quote(
    State(state): State<ServerState>,
    Query(query): Query<QuoteQuery>,
) -> Json<DeliveryQuote> {
    let service = DeliveryService::new(state.db.clone());
    Json(service.quote(&query.endereco, query.total).await)
}

#[derive(Debug, Serialize)]
pub struct BairroInfo {
    pub nome: &'static str,
    pub taxa: f64,
}

/// GET /api/delivery/bairros - the mapped service area, sorted by name.
pub async fn bairros() -> Json<Vec<BairroInfo>> {
    let list = delivery::available_neighborhoods()
        .into_iter()
        .map(|nome| BairroInfo {
            nome,
            taxa: delivery::fee_for_neighborhood(nome),
        })
        .collect();
    Json(list)
}
