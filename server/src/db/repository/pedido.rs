//! Order repository.

use serde::Deserialize;
use shared::util::snowflake_id;
use shared::{OrderStatus, Surface};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Item, Pedido, PedidoComItens};
use crate::delivery::PICKUP_ADDRESS;

const TABLE: &str = "pedido";
const ITEM_TABLE: &str = "item";

/// Batch size for the phone lookup table scan.
const PHONE_SCAN_PAGE: usize = 500;

/// Persisted counter row backing `numero_pedido`.
#[derive(Debug, Deserialize)]
struct Contador {
    valor: i64,
}

pub struct PedidoRepository {
    base: BaseRepository,
}

impl PedidoRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Next order number from an atomic persisted counter, zero-padded.
    pub async fn next_order_number(&self) -> RepoResult<String> {
        let mut result = self
            .base
            .db()
            .query("UPSERT contador:pedido SET valor = (valor ?? 0) + 1 RETURN AFTER")
            .await?;
        let counter: Option<Contador> = result.take(0)?;
        let n = counter.map(|c| c.valor).unwrap_or(1);
        Ok(format!("{:06}", n))
    }

    /// Insert an order and its line items. Record keys are snowflake ids
    /// (prefixed so they stay plain identifiers), sortable by creation time.
    pub async fn create(
        &self,
        pedido: Pedido,
        itens: Vec<Item>,
    ) -> RepoResult<PedidoComItens> {
        let created: Option<Pedido> = self
            .base
            .db()
            .create((TABLE, format!("p{}", snowflake_id())))
            .content(pedido)
            .await?;
        let pedido =
            created.ok_or_else(|| RepoError::Database("pedido insert returned nothing".into()))?;
        let pedido_id = pedido
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("pedido created without id".into()))?;

        let mut saved = Vec::with_capacity(itens.len());
        for mut item in itens {
            item.pedido_id = pedido_id.clone();
            let created: Option<Item> = self
                .base
                .db()
                .create((ITEM_TABLE, format!("i{}", snowflake_id())))
                .content(item)
                .await?;
            saved.push(
                created
                    .ok_or_else(|| RepoError::Database("item insert returned nothing".into()))?,
            );
        }

        Ok(PedidoComItens {
            pedido,
            itens: saved,
        })
    }

    /// All orders, newest first.
    pub async fn find_all(&self, limit: usize, offset: usize) -> RepoResult<Vec<Pedido>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($table) ORDER BY created_at DESC LIMIT $limit START $offset")
            .bind(("table", TABLE))
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Pedido>> {
        let record_id = parse_pedido_id(id)?;
        Ok(self.base.db().select(record_id).await?)
    }

    /// Order plus line items, or None when the order does not exist.
    pub async fn find_with_itens(&self, id: &str) -> RepoResult<Option<PedidoComItens>> {
        let Some(pedido) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let itens = match &pedido.id {
            Some(record_id) => self.itens_for(record_id).await?,
            None => Vec::new(),
        };
        Ok(Some(PedidoComItens { pedido, itens }))
    }

    pub async fn itens_for(&self, pedido_id: &RecordId) -> RepoResult<Vec<Item>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($table) WHERE pedido_id = $pedido_id")
            .bind(("table", ITEM_TABLE))
            .bind(("pedido_id", pedido_id.clone()))
            .await?;
        Ok(result.take(0)?)
    }

    /// Line items for a batch of orders, one round trip.
    pub async fn itens_for_pedidos(&self, pedido_ids: Vec<RecordId>) -> RepoResult<Vec<Item>> {
        if pedido_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($table) WHERE pedido_id INSIDE $pedido_ids")
            .bind(("table", ITEM_TABLE))
            .bind(("pedido_ids", pedido_ids))
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn find_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Pedido>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($table) WHERE status = $status ORDER BY created_at DESC")
            .bind(("table", TABLE))
            .bind(("status", status.to_string()))
            .await?;
        Ok(result.take(0)?)
    }

    /// Orders created in `[inicio, fim)`, newest first. Timestamps are stored
    /// as RFC 3339 strings, which compare correctly lexicographically.
    pub async fn find_by_date_range(
        &self,
        inicio: chrono::DateTime<chrono::Utc>,
        fim: chrono::DateTime<chrono::Utc>,
    ) -> RepoResult<Vec<Pedido>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($table) WHERE created_at >= $inicio AND created_at < $fim ORDER BY created_at DESC")
            .bind(("table", TABLE))
            .bind(("inicio", inicio))
            .bind(("fim", fim))
            .await?;
        Ok(result.take(0)?)
    }

    /// Orders whose customer phone contains the given digits. Both sides are
    /// normalized to digits only, so "(27) 99888-7766" matches "998887766".
    pub async fn find_by_phone(&self, telefone: &str) -> RepoResult<Vec<Pedido>> {
        self.find_by_phone_paged(telefone, PHONE_SCAN_PAGE).await
    }

    /// Pages through the whole table so old orders stay findable.
    pub async fn find_by_phone_paged(
        &self,
        telefone: &str,
        page_size: usize,
    ) -> RepoResult<Vec<Pedido>> {
        let needle = digits_only(telefone);
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let mut found = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.find_all(page_size, offset).await?;
            let fetched = page.len();
            found.extend(
                page.into_iter()
                    .filter(|p| digits_only(&p.cliente.telefone).contains(&needle)),
            );
            if fetched < page_size {
                break;
            }
            offset += fetched;
        }
        Ok(found)
    }

    /// Rider feed: orders ready to go or on the road, excluding pickups.
    /// Which statuses qualify comes from [`Surface::Motoboy`].
    pub async fn find_for_motoboy(&self) -> RepoResult<Vec<Pedido>> {
        let statuses: Vec<String> = OrderStatus::ALL
            .into_iter()
            .filter(|status| Surface::Motoboy.shows(*status))
            .map(|status| status.to_string())
            .collect();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM type::table($table) \
                 WHERE status IN $statuses \
                   AND cliente.endereco != $retirada \
                   AND cliente.endereco != '' \
                 ORDER BY created_at ASC",
            )
            .bind(("table", TABLE))
            .bind(("statuses", statuses))
            .bind(("retirada", PICKUP_ADDRESS))
            .await?;
        Ok(result.take(0)?)
    }

    /// Status write, always bumping `version`.
    ///
    /// With `expected_version` the write is a compare-and-swap: it only
    /// applies while the stored version still matches, and an empty result
    /// means another writer got there first. Without it the write is
    /// unconditional (last-write-wins).
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        expected_version: Option<i64>,
    ) -> RepoResult<Pedido> {
        let record_id = parse_pedido_id(id)?;

        let Some(expected) = expected_version else {
            let mut result = self
                .base
                .db()
                .query("UPDATE $pedido SET status = $status, version = version + 1 RETURN AFTER")
                .bind(("pedido", record_id))
                .bind(("status", status.to_string()))
                .await?;
            let updated: Vec<Pedido> = result.take(0)?;
            return updated
                .into_iter()
                .next()
                .ok_or_else(|| RepoError::NotFound(format!("pedido {id}")));
        };

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $pedido SET status = $status, version = version + 1 \
                 WHERE version = $expected RETURN AFTER",
            )
            .bind(("pedido", record_id))
            .bind(("status", status.to_string()))
            .bind(("expected", expected))
            .await?;
        let updated: Vec<Pedido> = result.take(0)?;
        updated.into_iter().next().ok_or_else(|| {
            RepoError::Conflict(format!(
                "pedido {id} was updated concurrently (expected version {expected})"
            ))
        })
    }
}

fn parse_pedido_id(id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        id.parse::<RecordId>()
            .map_err(|_| RepoError::Validation(format!("invalid pedido id: {id}")))
    } else {
        Ok(RecordId::from_table_key(TABLE, id))
    }
}

fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_strips_formatting() {
        assert_eq!(digits_only("(27) 99888-7766"), "27998887766");
        assert_eq!(digits_only("sem numero"), "");
    }

    #[test]
    fn parses_full_and_bare_ids() {
        assert!(parse_pedido_id("pedido:abc123").is_ok());
        let bare = parse_pedido_id("abc123").unwrap();
        assert_eq!(bare.to_string(), "pedido:abc123");
    }
}
