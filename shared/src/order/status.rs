//! Order lifecycle state machine.
//!
//! Statuses are serialized with their literal Portuguese names - they are the
//! wire format shared with the panels and the values persisted in the database.
//!
//! Lifecycle:
//!
//! ```text
//! Pendente -> Confirmado -> Preparando -> Pronto -> Entregando -> Entregue
//!     \            \
//!      `-> Cancelado`-> Cancelado
//! ```
//!
//! `Entregue` and `Cancelado` are terminal. Every status update goes through
//! [`OrderStatus::transition_to`], which accepts a transition to the current
//! status as an idempotent no-op (riders double-tap).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Order status, in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    Pendente,
    Confirmado,
    Preparando,
    Pronto,
    Entregando,
    Entregue,
    Cancelado,
}

/// Rejected status transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pendente,
        OrderStatus::Confirmado,
        OrderStatus::Preparando,
        OrderStatus::Pronto,
        OrderStatus::Entregando,
        OrderStatus::Entregue,
        OrderStatus::Cancelado,
    ];

    /// Statuses reachable in one step from `self`.
    pub fn allowed_transitions(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pendente => &[OrderStatus::Confirmado, OrderStatus::Cancelado],
            OrderStatus::Confirmado => &[OrderStatus::Preparando, OrderStatus::Cancelado],
            OrderStatus::Preparando => &[OrderStatus::Pronto],
            OrderStatus::Pronto => &[OrderStatus::Entregando],
            OrderStatus::Entregando => &[OrderStatus::Entregue],
            OrderStatus::Entregue | OrderStatus::Cancelado => &[],
        }
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// No further transitions possible.
    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Validate a transition. A transition to the current status is accepted
    /// and returns the status unchanged.
    pub fn transition_to(self, next: OrderStatus) -> Result<OrderStatus, TransitionError> {
        if next == self || self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError { from: self, to: next })
        }
    }

    /// Status as shown on `surface`. The customer page never shows `Pronto`;
    /// it stays "Preparando" until the rider picks the order up. Display-only,
    /// the persisted status is untouched.
    pub fn display_for(self, surface: Surface) -> OrderStatus {
        match (surface, self) {
            (Surface::Customer, OrderStatus::Pronto) => OrderStatus::Preparando,
            _ => self,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pendente => "Pendente",
            OrderStatus::Confirmado => "Confirmado",
            OrderStatus::Preparando => "Preparando",
            OrderStatus::Pronto => "Pronto",
            OrderStatus::Entregando => "Entregando",
            OrderStatus::Entregue => "Entregue",
            OrderStatus::Cancelado => "Cancelado",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// Which panel is acting on or viewing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Back-office panel: full visibility, any legal transition.
    Admin,
    /// Rider panel: only the hand-off steps.
    Motoboy,
    /// Customer lookup page: read-only.
    Customer,
}

impl Surface {
    /// May this surface request the transition `from -> to`?
    /// Legality of the transition itself is checked separately by
    /// [`OrderStatus::transition_to`].
    pub fn may_request(self, from: OrderStatus, to: OrderStatus) -> bool {
        match self {
            Surface::Admin => true,
            Surface::Motoboy => {
                from == to
                    || matches!(
                        (from, to),
                        (OrderStatus::Pronto, OrderStatus::Entregando)
                            | (OrderStatus::Entregando, OrderStatus::Entregue)
                    )
            }
            Surface::Customer => false,
        }
    }

    /// Is an order with this status visible on this surface?
    pub fn shows(self, status: OrderStatus) -> bool {
        match self {
            Surface::Motoboy => {
                matches!(status, OrderStatus::Pronto | OrderStatus::Entregando)
            }
            Surface::Admin | Surface::Customer => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pendente_can_confirm_or_cancel() {
        assert!(OrderStatus::Pendente.can_transition_to(OrderStatus::Confirmado));
        assert!(OrderStatus::Pendente.can_transition_to(OrderStatus::Cancelado));
        assert!(!OrderStatus::Pendente.can_transition_to(OrderStatus::Preparando));
        assert!(!OrderStatus::Pendente.can_transition_to(OrderStatus::Entregue));
    }

    #[test]
    fn cancel_only_from_pendente_or_confirmado() {
        for status in OrderStatus::ALL {
            let expected = matches!(status, OrderStatus::Pendente | OrderStatus::Confirmado);
            assert_eq!(
                status.can_transition_to(OrderStatus::Cancelado),
                expected,
                "{status}"
            );
        }
    }

    #[test]
    fn happy_path_is_linear() {
        let path = [
            OrderStatus::Pendente,
            OrderStatus::Confirmado,
            OrderStatus::Preparando,
            OrderStatus::Pronto,
            OrderStatus::Entregando,
            OrderStatus::Entregue,
        ];
        for pair in path.windows(2) {
            assert_eq!(pair[0].transition_to(pair[1]), Ok(pair[1]));
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        assert!(OrderStatus::Entregue.is_terminal());
        assert!(OrderStatus::Cancelado.is_terminal());
        for to in OrderStatus::ALL {
            if to != OrderStatus::Entregue {
                assert!(OrderStatus::Entregue.transition_to(to).is_err());
            }
            if to != OrderStatus::Cancelado {
                assert!(OrderStatus::Cancelado.transition_to(to).is_err());
            }
        }
    }

    #[test]
    fn no_backward_transitions() {
        assert!(OrderStatus::Entregando.transition_to(OrderStatus::Pronto).is_err());
        assert!(OrderStatus::Preparando.transition_to(OrderStatus::Confirmado).is_err());
    }

    #[test]
    fn same_status_is_idempotent_no_op() {
        for status in OrderStatus::ALL {
            assert_eq!(status.transition_to(status), Ok(status));
        }
    }

    #[test]
    fn customer_sees_pronto_as_preparando() {
        assert_eq!(
            OrderStatus::Pronto.display_for(Surface::Customer),
            OrderStatus::Preparando
        );
        assert_eq!(
            OrderStatus::Pronto.display_for(Surface::Admin),
            OrderStatus::Pronto
        );
        assert_eq!(
            OrderStatus::Entregando.display_for(Surface::Customer),
            OrderStatus::Entregando
        );
    }

    #[test]
    fn motoboy_surface_rules() {
        assert!(Surface::Motoboy.may_request(OrderStatus::Pronto, OrderStatus::Entregando));
        assert!(Surface::Motoboy.may_request(OrderStatus::Entregando, OrderStatus::Entregue));
        assert!(Surface::Motoboy.may_request(OrderStatus::Entregando, OrderStatus::Entregando));
        assert!(!Surface::Motoboy.may_request(OrderStatus::Pendente, OrderStatus::Confirmado));
        assert!(!Surface::Motoboy.may_request(OrderStatus::Confirmado, OrderStatus::Cancelado));
        assert!(Surface::Motoboy.shows(OrderStatus::Pronto));
        assert!(Surface::Motoboy.shows(OrderStatus::Entregando));
        assert!(!Surface::Motoboy.shows(OrderStatus::Pendente));
        assert!(!Surface::Motoboy.shows(OrderStatus::Entregue));
    }

    #[test]
    fn customer_surface_is_read_only() {
        assert!(!Surface::Customer.may_request(OrderStatus::Pendente, OrderStatus::Cancelado));
        assert!(!Surface::Customer.may_request(OrderStatus::Pronto, OrderStatus::Entregando));
    }

    #[test]
    fn serde_uses_portuguese_names() {
        let json = serde_json::to_string(&OrderStatus::Entregando).unwrap();
        assert_eq!(json, "\"Entregando\"");
        let parsed: OrderStatus = serde_json::from_str("\"Pendente\"").unwrap();
        assert_eq!(parsed, OrderStatus::Pendente);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("pronto".parse::<OrderStatus>(), Ok(OrderStatus::Pronto));
        assert!("Enviado".parse::<OrderStatus>().is_err());
    }
}
