//! Order records and API payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::OrderStatus;
use shared::order::cart::Adicionais;
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Customer data embedded in the order. `endereco` is free text as typed at
/// checkout; pickup orders carry the literal "Retirada na loja".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cliente {
    pub nome: String,
    pub telefone: String,
    pub endereco: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distancia: Option<f64>,
}

/// Order record (`pedido` table).
///
/// Money fields are BRL amounts rounded to 2 decimal places; at creation
/// `total == subtotal - desconto + taxa_entrega`. `version` is bumped on
/// every status write and backs the optional compare-and-swap update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pedido {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub numero_pedido: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub subtotal: f64,
    pub desconto: f64,
    pub taxa_entrega: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagamento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obs: Option<String>,
    pub cliente: Cliente,
    #[serde(default)]
    pub version: i64,
}

/// Order line item record (`item` table), linked to its order by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub pedido_id: RecordId,
    pub nome: String,
    pub qtd: i32,
    pub preco: f64,
    #[serde(default)]
    pub adicionais: Adicionais,
}

/// An order with its line items, as returned to all three panels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PedidoComItens {
    #[serde(flatten)]
    pub pedido: Pedido,
    pub itens: Vec<Item>,
}

// ========== API payloads ==========

/// One line of a checkout request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutItem {
    #[validate(length(min = 1, max = 120))]
    pub nome: String,
    #[validate(range(min = 1, max = 99))]
    pub qtd: i32,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub preco: f64,
    #[serde(default)]
    pub adicionais: Adicionais,
}

/// Checkout payload (`POST /api/pedidos`).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 2, max = 120))]
    pub nome: String,
    #[validate(length(min = 8, max = 20))]
    pub telefone: String,
    #[validate(length(min = 3, max = 240))]
    pub endereco: String,
    #[validate(length(min = 1, max = 50), nested)]
    pub itens: Vec<CheckoutItem>,
    pub pagamento: Option<String>,
    pub obs: Option<String>,
}

/// Status update payload (`PUT .../{id}/status`).
///
/// `expected_version` turns the write into a compare-and-swap: a mismatch is
/// rejected with a conflict. Omitted, the write keeps last-write-wins.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub expected_version: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_payload_round_trips_from_json() {
        let payload = serde_json::json!({
            "nome": "Maria Silva",
            "telefone": "(27) 99888-7766",
            "endereco": "Rua A, 12, Eldorado",
            "itens": [{
                "nome": "Açaí 500ml",
                "qtd": 2,
                "preco": 18.0,
                "adicionais": {
                    "frutas": ["Morango"],
                    "extras": [{"nome": "Nutella", "preco": 4.0, "quantidade": 1}]
                }
            }],
            "pagamento": "Pix"
        });

        let request: CheckoutRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(request.itens.len(), 1);
        assert_eq!(request.itens[0].adicionais.frutas, vec!["Morango"]);
        assert_eq!(request.itens[0].adicionais.extras[0].preco, 4.0);
        assert!(request.obs.is_none());
        assert!(validator::Validate::validate(&request).is_ok());
    }

    #[test]
    fn checkout_payload_rejects_empty_order() {
        let payload = serde_json::json!({
            "nome": "M",
            "telefone": "123",
            "endereco": "x",
            "itens": []
        });
        let request: CheckoutRequest = serde_json::from_value(payload).unwrap();
        assert!(validator::Validate::validate(&request).is_err());
    }

    #[test]
    fn status_update_version_is_optional() {
        let bare: StatusUpdateRequest =
            serde_json::from_value(serde_json::json!({"status": "Confirmado"})).unwrap();
        assert_eq!(bare.status, OrderStatus::Confirmado);
        assert_eq!(bare.expected_version, None);

        let cas: StatusUpdateRequest = serde_json::from_value(
            serde_json::json!({"status": "Entregando", "expected_version": 3}),
        )
        .unwrap();
        assert_eq!(cas.expected_version, Some(3));
    }
}
