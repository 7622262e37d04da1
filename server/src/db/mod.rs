//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine). No external database process: the
//! store lives in a directory under the work dir.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Owns the database connection. Handlers reach it through `ServerState`.
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("loja")
            .use_db("entrega")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database ready at {}", db_path);

        Ok(Self { db })
    }
}
