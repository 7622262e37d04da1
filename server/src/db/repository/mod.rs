//! Repository layer.
//!
//! One repository per table, all built on [`BaseRepository`]. Repositories
//! speak [`RepoError`]; the HTTP layer converts to `AppError`.

pub mod configuracao;
pub mod pedido;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

pub use configuracao::ConfiguracaoRepository;
pub use pedido::PedidoRepository;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(e: surrealdb::Error) -> Self {
        RepoError::Database(e.to_string())
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Shared database handle for table repositories.
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
