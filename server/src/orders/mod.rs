//! Order services: checkout and status transitions.
//!
//! Handlers stay thin; the rules live here so the admin and motoboy routes
//! share one transition path.

pub mod money;

use chrono::Utc;
use shared::{OrderStatus, Surface};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::info;
use validator::Validate;

use crate::db::models::{CheckoutRequest, Cliente, Item, Pedido, PedidoComItens};
use crate::db::repository::PedidoRepository;
use crate::delivery::DeliveryService;
use crate::utils::{AppError, AppResult};

/// Create an order from a checkout payload.
///
/// Subtotal and total are computed server-side; the delivery fee comes from
/// the quote for the customer address and subtotal. New orders start
/// `Pendente` with `desconto = 0` and `version = 0`.
pub async fn create_order(db: &Surreal<Db>, request: CheckoutRequest) -> AppResult<PedidoComItens> {
    request.validate()?;

    let repo = PedidoRepository::new(db.clone());
    let delivery = DeliveryService::new(db.clone());

    let subtotal = money::order_subtotal(&request.itens);
    let quote = delivery.quote(&request.endereco, subtotal).await;
    let desconto = 0.0;
    let total = money::order_total(subtotal, desconto, quote.delivery_fee);

    let numero_pedido = repo.next_order_number().await?;
    let pedido = Pedido {
        id: None,
        numero_pedido,
        created_at: Utc::now(),
        status: OrderStatus::Pendente,
        subtotal,
        desconto,
        taxa_entrega: quote.delivery_fee,
        total,
        pagamento: request.pagamento,
        obs: request.obs,
        cliente: Cliente {
            nome: request.nome,
            telefone: request.telefone,
            endereco: request.endereco,
            distancia: None,
        },
        version: 0,
    };

    let itens: Vec<Item> = request
        .itens
        .into_iter()
        .map(|i| Item {
            id: None,
            // overwritten with the real order id on insert
            pedido_id: surrealdb::RecordId::from_table_key("pedido", "pending"),
            nome: i.nome,
            qtd: i.qtd,
            preco: i.preco,
            adicionais: i.adicionais,
        })
        .collect();

    let created = repo.create(pedido, itens).await?;
    info!(
        numero = %created.pedido.numero_pedido,
        total = created.pedido.total,
        bairro = ?quote.neighborhood,
        "pedido criado"
    );
    Ok(created)
}

/// Apply a status transition on behalf of a surface.
///
/// Order of checks: existence, stale version (conflict), idempotent no-op,
/// surface permission, lifecycle legality. A request carrying
/// `expected_version` writes with a compare-and-swap on `version`; without
/// one the write is unconditional (last-write-wins).
pub async fn apply_transition(
    db: &Surreal<Db>,
    id: &str,
    to: OrderStatus,
    expected_version: Option<i64>,
    surface: Surface,
) -> AppResult<Pedido> {
    let repo = PedidoRepository::new(db.clone());
    let pedido = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("pedido {id}")))?;
    let from = pedido.status;

    if let Some(expected) = expected_version
        && expected != pedido.version
    {
        return Err(AppError::conflict(format!(
            "pedido {id} changed since it was read (version {}, expected {expected})",
            pedido.version
        )));
    }

    // A request for the status the order already has is a no-op.
    if to == from {
        return Ok(pedido);
    }

    if !surface.may_request(from, to) {
        return Err(AppError::forbidden(format!(
            "this panel cannot move an order from {from} to {to}"
        )));
    }

    from.transition_to(to)?;

    // No expected version means last-write-wins; only explicit versions CAS.
    let updated = repo.update_status(id, to, expected_version).await?;
    info!(numero = %updated.numero_pedido, %from, %to, "status atualizado");
    Ok(updated)
}
