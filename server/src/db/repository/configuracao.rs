//! Store configuration repository (singleton record).

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Configuracao, ConfiguracaoUpdate};
use crate::delivery::DEFAULT_FEE;

const TABLE: &str = "configuracao";
const KEY: &str = "principal";

pub struct ConfiguracaoRepository {
    base: BaseRepository,
}

impl ConfiguracaoRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record_id() -> RecordId {
        RecordId::from_table_key(TABLE, KEY)
    }

    pub async fn get(&self) -> RepoResult<Option<Configuracao>> {
        Ok(self.base.db().select(Self::record_id()).await?)
    }

    /// Stored configuration, or the hardcoded defaults when the record was
    /// never written.
    pub async fn get_or_default(&self) -> RepoResult<Configuracao> {
        Ok(self.get().await?.unwrap_or_else(default_configuracao))
    }

    /// Merge-update the singleton record, creating it on first write.
    pub async fn update(&self, changes: ConfiguracaoUpdate) -> RepoResult<Configuracao> {
        let mut current = self.get_or_default().await?;
        if let Some(taxa_base) = changes.taxa_base {
            current.taxa_base = taxa_base;
        }
        if let Some(preco_por_km) = changes.preco_por_km {
            current.preco_por_km = preco_por_km;
        }
        if let Some(endereco_loja) = changes.endereco_loja {
            current.endereco_loja = endereco_loja;
        }
        current.id = None;

        let saved: Option<Configuracao> = self
            .base
            .db()
            .upsert(Self::record_id())
            .content(current)
            .await?;
        saved.ok_or_else(|| RepoError::Database("configuracao upsert returned nothing".into()))
    }
}

fn default_configuracao() -> Configuracao {
    Configuracao {
        id: None,
        taxa_base: DEFAULT_FEE,
        preco_por_km: 0.0,
        endereco_loja: String::new(),
    }
}
