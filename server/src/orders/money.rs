//! Money arithmetic.
//!
//! All amounts are BRL. Arithmetic happens in `Decimal`; amounts cross the
//! API and the database as `f64` rounded to 2 decimal places, midpoint away
//! from zero.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::db::models::CheckoutItem;

const DECIMAL_PLACES: u32 = 2;

pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(
            DECIMAL_PLACES,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        )
        .to_f64()
        .unwrap_or(0.0)
}

pub fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Line total: unit price times quantity plus the extras, which carry their
/// own quantity and are charged once per line.
pub fn line_total(item: &CheckoutItem) -> Decimal {
    let base = to_decimal(item.preco) * Decimal::from(item.qtd);
    let extras: Decimal = item
        .adicionais
        .extras
        .iter()
        .map(|e| to_decimal(e.preco) * Decimal::from(e.quantidade))
        .sum();
    base + extras
}

/// Order subtotal over all lines.
pub fn order_subtotal(itens: &[CheckoutItem]) -> f64 {
    to_f64(itens.iter().map(line_total).sum())
}

/// Final order total. Holds `total = subtotal - desconto + taxa_entrega`.
pub fn order_total(subtotal: f64, desconto: f64, taxa_entrega: f64) -> f64 {
    to_f64(to_decimal(subtotal) - to_decimal(desconto) + to_decimal(taxa_entrega))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::cart::{Adicionais, Extra};

    fn item(preco: f64, qtd: i32) -> CheckoutItem {
        CheckoutItem {
            nome: "Açaí 300ml".to_string(),
            qtd,
            preco,
            adicionais: Adicionais::default(),
        }
    }

    #[test]
    fn subtotal_multiplies_quantity() {
        assert_eq!(order_subtotal(&[item(12.5, 2)]), 25.0);
    }

    #[test]
    fn extras_are_charged_per_line_not_per_unit() {
        let mut i = item(10.0, 3);
        i.adicionais.extras.push(Extra {
            nome: "Leite condensado".to_string(),
            preco: 2.0,
            quantidade: 2,
        });
        // 10 * 3 + 2 * 2, extras not multiplied by qtd
        assert_eq!(order_subtotal(&[i]), 34.0);
    }

    #[test]
    fn no_float_drift_on_awkward_prices() {
        let items = vec![item(0.1, 1), item(0.2, 1)];
        assert_eq!(order_subtotal(&items), 0.3);
    }

    #[test]
    fn total_identity_holds() {
        let subtotal = order_subtotal(&[item(19.9, 2)]);
        let total = order_total(subtotal, 0.0, 3.0);
        assert_eq!(total, 42.8);
    }

    #[test]
    fn rounds_midpoint_away_from_zero() {
        assert_eq!(round2(2.005), 2.01);
        assert_eq!(round2(2.004), 2.0);
    }
}
