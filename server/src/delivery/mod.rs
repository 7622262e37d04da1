//! Delivery fees: neighborhood table, quote resolver, service wrapper.

pub mod fees;
pub mod resolver;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::warn;

pub use fees::{
    DEFAULT_FEE, FREE_DELIVERY_THRESHOLD, NEIGHBORHOOD_FEES, PICKUP_ADDRESS,
    available_neighborhoods, fee_for_neighborhood,
};
pub use resolver::{DeliveryConfig, DeliveryQuote, extract_neighborhood, format_quote, quote};

use crate::db::repository::ConfiguracaoRepository;

/// Quotes delivery fees using the persisted configuration when available.
/// Configuration lookups never fail a quote; errors downgrade to the
/// hardcoded defaults with a warning.
pub struct DeliveryService {
    config_repo: ConfiguracaoRepository,
}

impl DeliveryService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            config_repo: ConfiguracaoRepository::new(db),
        }
    }

    /// Effective defaults: stored `taxa_base` when set, hardcoded otherwise.
    pub async fn effective_config(&self) -> DeliveryConfig {
        match self.config_repo.get().await {
            Ok(Some(config)) if config.taxa_base > 0.0 => DeliveryConfig {
                default_fee: config.taxa_base,
                ..DeliveryConfig::default()
            },
            Ok(_) => DeliveryConfig::default(),
            Err(e) => {
                warn!("configuracao lookup failed, using defaults: {e}");
                DeliveryConfig::default()
            }
        }
    }

    pub async fn quote(&self, address: &str, order_total: f64) -> DeliveryQuote {
        quote(address, order_total, &self.effective_config().await)
    }
}
