//! Shared application state.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// Cloned into every handler. Cheap to clone: the database handle is an Arc
/// internally.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
}

impl ServerState {
    /// Open the embedded database under the configured work dir.
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("entrega.db");
        let db_path = db_path.to_string_lossy();
        let service = DbService::new(&db_path)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            db: service.db,
        })
    }

    pub fn get_db(&self) -> &Surreal<Db> {
        &self.db
    }
}
