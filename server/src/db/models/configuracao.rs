//! Store configuration record.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Singleton record `configuracao:principal`. Holds the editable delivery
/// defaults; hardcoded fallbacks apply when the record is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuracao {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Base delivery fee for unmatched neighborhoods, BRL.
    pub taxa_base: f64,
    /// Per-km surcharge, BRL. Reserved for distance-based pricing.
    #[serde(default)]
    pub preco_por_km: f64,
    /// Store street address shown to riders.
    #[serde(default)]
    pub endereco_loja: String,
}

/// Update payload for `PUT /api/configuracao`. Absent fields keep their
/// current value.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConfiguracaoUpdate {
    #[validate(range(min = 0.0, max = 100.0))]
    pub taxa_base: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub preco_por_km: Option<f64>,
    #[validate(length(max = 240))]
    pub endereco_loja: Option<String>,
}
