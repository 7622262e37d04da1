//! Delivery fee resolution from a free-text address.
//!
//! Pure and infallible: whatever the address looks like, checkout always
//! gets a quote. Unmatched addresses fall back to the default fee and are
//! marked as outside the mapped area.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use super::fees::{COMMON_TOKENS, DEFAULT_FEE, FREE_DELIVERY_THRESHOLD, NEIGHBORHOOD_FEES};

/// Effective delivery defaults. `default_fee` may come from the persisted
/// configuration; the free-delivery threshold is fixed.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryConfig {
    pub default_fee: f64,
    pub free_delivery_threshold: f64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            default_fee: DEFAULT_FEE,
            free_delivery_threshold: FREE_DELIVERY_THRESHOLD,
        }
    }
}

/// Result of a fee quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryQuote {
    /// Matched neighborhood name, `None` when the address was not recognized.
    pub neighborhood: Option<String>,
    pub delivery_fee: f64,
    pub is_free_delivery: bool,
    pub estimated_time: String,
    pub is_in_delivery_area: bool,
}

impl DeliveryQuote {
    /// Safe quote for any failure path: default fee, unmapped area.
    pub fn fallback(default_fee: f64) -> Self {
        Self {
            neighborhood: None,
            delivery_fee: round2(default_fee),
            is_free_delivery: false,
            estimated_time: "15-30 min".to_string(),
            is_in_delivery_area: false,
        }
    }
}

/// Quote the delivery fee for an address and order subtotal.
pub fn quote(address: &str, order_total: f64, config: &DeliveryConfig) -> DeliveryQuote {
    let matched = extract_neighborhood(address);

    let mut fee = match matched {
        Some((_, table_fee)) => table_fee,
        None => config.default_fee,
    };

    let is_free_delivery = order_total >= config.free_delivery_threshold;
    if is_free_delivery {
        fee = 0.0;
    }
    let fee = round2(fee);

    DeliveryQuote {
        neighborhood: matched.map(|(name, _)| name.to_string()),
        delivery_fee: fee,
        is_free_delivery,
        estimated_time: estimated_time_for_fee(fee).to_string(),
        is_in_delivery_area: matched.is_some(),
    }
}

/// Find the neighborhood named in the address.
///
/// First pass: case-insensitive substring search over the full table names.
/// Overlapping names ("José de Anchieta" inside "José de Anchieta III") are
/// disambiguated deterministically: the longest matching name wins, ties
/// break by table order. Second pass: common partial tokens, each resolved
/// to the longest table name containing it.
pub fn extract_neighborhood(address: &str) -> Option<(&'static str, f64)> {
    let address = address.to_lowercase();

    let direct = longest_match(
        NEIGHBORHOOD_FEES
            .iter()
            .filter(|(name, _)| address.contains(&name.to_lowercase())),
    );
    if direct.is_some() {
        return direct;
    }

    for token in COMMON_TOKENS {
        if !address.contains(token) {
            continue;
        }
        let by_token = longest_match(
            NEIGHBORHOOD_FEES
                .iter()
                .filter(|(name, _)| name.to_lowercase().contains(token)),
        );
        if by_token.is_some() {
            return by_token;
        }
    }

    None
}

/// Longest candidate name; length ties keep the earliest table entry.
fn longest_match<'a, I>(candidates: I) -> Option<(&'static str, f64)>
where
    I: Iterator<Item = &'a (&'static str, f64)>,
{
    let mut best: Option<(&'static str, f64)> = None;
    let mut best_len = 0;
    for &(name, fee) in candidates {
        let len = name.chars().count();
        if best.is_none() || len > best_len {
            best = Some((name, fee));
            best_len = len;
        }
    }
    best
}

/// Rough time estimate from the final fee: cheaper means closer.
fn estimated_time_for_fee(fee: f64) -> &'static str {
    if fee <= 1.50 {
        "15-20 min"
    } else if fee <= 3.00 {
        "20-30 min"
    } else if fee <= 4.00 {
        "25-35 min"
    } else {
        "30-45 min"
    }
}

/// Human-readable quote summary, pt-BR.
pub fn format_quote(quote: &DeliveryQuote) -> String {
    if quote.is_free_delivery {
        return format!("Entrega grátis ({})", quote.estimated_time);
    }
    let area = match &quote.neighborhood {
        Some(name) if quote.is_in_delivery_area => format!("Bairro: {name}"),
        _ => "Área não mapeada".to_string(),
    };
    format!(
        "Taxa de entrega: R$ {} ({} - {})",
        format_brl(quote.delivery_fee),
        area,
        quote.estimated_time
    )
}

fn format_brl(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}

fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_quote(address: &str, total: f64) -> DeliveryQuote {
        quote(address, total, &DeliveryConfig::default())
    }

    #[test]
    fn exact_name_in_address_uses_table_fee() {
        let q = default_quote("Rua das Palmeiras, 100, Nova Carapina I", 30.0);
        assert_eq!(q.neighborhood.as_deref(), Some("Nova Carapina I"));
        assert_eq!(q.delivery_fee, 1.00);
        assert!(q.is_in_delivery_area);
        assert!(!q.is_free_delivery);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let q = default_quote("av. central, BICANGA", 10.0);
        assert_eq!(q.neighborhood.as_deref(), Some("Bicanga"));
        assert_eq!(q.delivery_fee, 15.40);
    }

    #[test]
    fn longest_name_wins_on_overlap() {
        let q = default_quote("Rua A, José de Anchieta III, Serra", 10.0);
        assert_eq!(q.neighborhood.as_deref(), Some("José de Anchieta III"));
        assert_eq!(q.delivery_fee, 5.50);

        // The bare prefix still matches the short name.
        let q = default_quote("Rua A, José de Anchieta, Serra", 10.0);
        assert_eq!(q.neighborhood.as_deref(), Some("José de Anchieta"));
        assert_eq!(q.delivery_fee, 6.00);
    }

    #[test]
    fn overlap_resolution_is_deterministic() {
        let address = "Rua B, Serra Dourada II";
        let first = extract_neighborhood(address);
        for _ in 0..10 {
            assert_eq!(extract_neighborhood(address), first);
        }
        assert_eq!(first.map(|(n, _)| n), Some("Serra Dourada II"));
    }

    #[test]
    fn equal_length_tie_keeps_table_order() {
        // "Alterosas" and "Barcelona" are both nine characters; the earlier
        // table entry wins.
        let q = default_quote("Esquina de Alterosas com Barcelona", 10.0);
        assert_eq!(q.neighborhood.as_deref(), Some("Alterosas"));
        assert_eq!(q.delivery_fee, 10.20);

        // Same pair in the opposite order in the address text changes nothing.
        let q = default_quote("Esquina de Barcelona com Alterosas", 10.0);
        assert_eq!(q.neighborhood.as_deref(), Some("Alterosas"));
    }

    #[test]
    fn common_token_falls_back_to_table_name() {
        // "carapina" appears but no full table name does.
        let q = default_quote("perto do terminal de carapina", 10.0);
        assert!(q.is_in_delivery_area);
        let name = q.neighborhood.unwrap();
        assert!(name.to_lowercase().contains("carapina"), "{name}");
    }

    #[test]
    fn unmatched_address_gets_default_fee() {
        let q = default_quote("Rua Sete, Centro, Vitória", 20.0);
        assert_eq!(q.neighborhood, None);
        assert_eq!(q.delivery_fee, DEFAULT_FEE);
        assert!(!q.is_in_delivery_area);
        assert_eq!(q.estimated_time, "20-30 min");
    }

    #[test]
    fn threshold_grants_free_delivery_anywhere() {
        let matched = default_quote("Bicanga", 50.0);
        assert!(matched.is_free_delivery);
        assert_eq!(matched.delivery_fee, 0.0);
        assert!(matched.is_in_delivery_area);

        let unmatched = default_quote("Rua Sete, Centro, Vitória", 120.0);
        assert!(unmatched.is_free_delivery);
        assert_eq!(unmatched.delivery_fee, 0.0);
        assert!(!unmatched.is_in_delivery_area);
    }

    #[test]
    fn just_below_threshold_still_pays() {
        let q = default_quote("Eldorado", 49.99);
        assert!(!q.is_free_delivery);
        assert_eq!(q.delivery_fee, 3.00);
    }

    #[test]
    fn time_bands_follow_fee() {
        assert_eq!(default_quote("Nova Carapina I", 0.0).estimated_time, "15-20 min");
        assert_eq!(default_quote("Eldorado", 0.0).estimated_time, "20-30 min");
        assert_eq!(default_quote("Barcelona", 0.0).estimated_time, "25-35 min");
        assert_eq!(default_quote("Bicanga", 0.0).estimated_time, "30-45 min");
        // Free delivery lands in the fastest band.
        assert_eq!(default_quote("Bicanga", 80.0).estimated_time, "15-20 min");
    }

    #[test]
    fn configured_default_fee_applies_to_unmatched_only() {
        let config = DeliveryConfig {
            default_fee: 5.0,
            ..DeliveryConfig::default()
        };
        assert_eq!(quote("Centro, Vitória", 10.0, &config).delivery_fee, 5.0);
        assert_eq!(quote("Eldorado", 10.0, &config).delivery_fee, 3.0);
    }

    #[test]
    fn formats_pt_br() {
        let q = default_quote("Eldorado", 10.0);
        assert_eq!(
            format_quote(&q),
            "Taxa de entrega: R$ 3,00 (Bairro: Eldorado - 20-30 min)"
        );
        let free = default_quote("Eldorado", 60.0);
        assert_eq!(format_quote(&free), "Entrega grátis (15-20 min)");
        let fallback = DeliveryQuote::fallback(3.0);
        assert_eq!(
            format_quote(&fallback),
            "Taxa de entrega: R$ 3,00 (Área não mapeada - 15-30 min)"
        );
    }
}
