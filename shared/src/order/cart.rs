//! Cart aggregate as a pure reducer.
//!
//! The cart is an immutable snapshot plus a [`reduce`] function: every action
//! produces a new [`CartState`], the previous one is never mutated. Adding an
//! item that is indistinguishable from one already in the cart (same name,
//! same price, same add-ons) merges quantities instead of duplicating lines.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

/// A paid extra attached to a cart item ("extra morango", "extra nutella").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    pub nome: String,
    pub preco: f64,
    pub quantidade: i32,
}

/// Add-on selections for a cart item. Toppings, fruits and complements are
/// included in the base price; `extras` carry their own price and quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Adicionais {
    #[serde(default)]
    pub coberturas: Vec<String>,
    #[serde(default)]
    pub frutas: Vec<String>,
    #[serde(default)]
    pub complementos: Vec<String>,
    #[serde(default)]
    pub extras: Vec<Extra>,
}

impl Adicionais {
    pub fn is_empty(&self) -> bool {
        self.coberturas.is_empty()
            && self.frutas.is_empty()
            && self.complementos.is_empty()
            && self.extras.is_empty()
    }
}

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub nome: String,
    pub preco: f64,
    pub quantidade: i32,
    #[serde(default)]
    pub adicionais: Adicionais,
}

impl CartItem {
    /// Two lines merge when the customer could not tell them apart.
    fn merges_with(&self, other: &CartItem) -> bool {
        self.nome == other.nome
            && decimal(self.preco) == decimal(other.preco)
            && self.adicionais == other.adicionais
    }

    /// Line total: base price times quantity, plus each extra's price times
    /// its own quantity. Extras are per line, not multiplied by `quantidade`.
    pub fn line_total(&self) -> Decimal {
        let base = decimal(self.preco) * Decimal::from(self.quantidade);
        let extras: Decimal = self
            .adicionais
            .extras
            .iter()
            .map(|e| decimal(e.preco) * Decimal::from(e.quantidade))
            .sum();
        base + extras
    }
}

/// Immutable cart snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total unit count across all lines.
    pub fn total_items(&self) -> i32 {
        self.items.iter().map(|i| i.quantidade).sum()
    }

    /// Cart subtotal in BRL, rounded to 2 decimal places.
    pub fn subtotal(&self) -> f64 {
        let total: Decimal = self.items.iter().map(CartItem::line_total).sum();
        total
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(0.0)
    }
}

/// Cart mutation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartAction {
    AddItem(CartItem),
    RemoveItem { index: usize },
    SetQuantity { index: usize, quantidade: i32 },
    Clear,
}

/// Apply an action to a snapshot, returning the next snapshot.
///
/// Out-of-range indices are ignored. `SetQuantity` to zero or below removes
/// the line.
pub fn reduce(state: &CartState, action: CartAction) -> CartState {
    let mut items = state.items.clone();
    match action {
        CartAction::AddItem(item) => {
            if item.quantidade <= 0 {
                return state.clone();
            }
            match items.iter_mut().find(|existing| existing.merges_with(&item)) {
                Some(existing) => existing.quantidade += item.quantidade,
                None => items.push(item),
            }
        }
        CartAction::RemoveItem { index } => {
            if index < items.len() {
                items.remove(index);
            }
        }
        CartAction::SetQuantity { index, quantidade } => {
            if index < items.len() {
                if quantidade <= 0 {
                    items.remove(index);
                } else {
                    items[index].quantidade = quantidade;
                }
            }
        }
        CartAction::Clear => items.clear(),
    }
    CartState { items }
}

fn decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acai(preco: f64) -> CartItem {
        CartItem {
            nome: "Açaí 500ml".to_string(),
            preco,
            quantidade: 1,
            adicionais: Adicionais::default(),
        }
    }

    #[test]
    fn add_merges_identical_items() {
        let s0 = CartState::default();
        let s1 = reduce(&s0, CartAction::AddItem(acai(18.0)));
        let s2 = reduce(&s1, CartAction::AddItem(acai(18.0)));
        assert_eq!(s2.items.len(), 1);
        assert_eq!(s2.items[0].quantidade, 2);
        assert_eq!(s2.total_items(), 2);
    }

    #[test]
    fn different_addons_do_not_merge() {
        let mut with_extra = acai(18.0);
        with_extra.adicionais.extras.push(Extra {
            nome: "Nutella".to_string(),
            preco: 4.0,
            quantidade: 1,
        });
        let s0 = reduce(&CartState::default(), CartAction::AddItem(acai(18.0)));
        let s1 = reduce(&s0, CartAction::AddItem(with_extra));
        assert_eq!(s1.items.len(), 2);
    }

    #[test]
    fn reduce_does_not_mutate_previous_snapshot() {
        let s0 = reduce(&CartState::default(), CartAction::AddItem(acai(18.0)));
        let _s1 = reduce(&s0, CartAction::SetQuantity { index: 0, quantidade: 5 });
        assert_eq!(s0.items[0].quantidade, 1);
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let s0 = reduce(&CartState::default(), CartAction::AddItem(acai(18.0)));
        let s1 = reduce(&s0, CartAction::SetQuantity { index: 0, quantidade: 0 });
        assert!(s1.is_empty());
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let s0 = reduce(&CartState::default(), CartAction::AddItem(acai(18.0)));
        let s1 = reduce(&s0, CartAction::RemoveItem { index: 7 });
        assert_eq!(s1, s0);
    }

    #[test]
    fn clear_empties_cart() {
        let s0 = reduce(&CartState::default(), CartAction::AddItem(acai(18.0)));
        let s1 = reduce(&s0, CartAction::Clear);
        assert!(s1.is_empty());
        assert_eq!(s1.subtotal(), 0.0);
    }

    #[test]
    fn subtotal_includes_extras_once_per_line() {
        let mut item = acai(18.0);
        item.quantidade = 2;
        item.adicionais.extras.push(Extra {
            nome: "Morango".to_string(),
            preco: 3.5,
            quantidade: 2,
        });
        let s = reduce(&CartState::default(), CartAction::AddItem(item));
        // 18.00 * 2 + 3.50 * 2 = 43.00; extras are not multiplied by the
        // line quantity.
        assert_eq!(s.subtotal(), 43.0);
    }

    #[test]
    fn subtotal_avoids_float_drift() {
        let s = reduce(&CartState::default(), CartAction::AddItem(acai(0.1)));
        let s = reduce(&s, CartAction::SetQuantity { index: 0, quantidade: 3 });
        assert_eq!(s.subtotal(), 0.3);
    }
}
