use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Placed,    // El comensal creó el pedido; el pago todavía no fue autorizado o aceptado
    Accepted,  // El restaurante aceptó el pedido y lo está preparando
    Fulfilled, // Pedido entregado, con el pago liquidado
    Cancelled, // Pedido cancelado (rechazo, pago rechazado o cancelación del comensal)
}

impl OrderStatus {
    /// Transiciones válidas del ciclo de vida. `Fulfilled` y `Cancelled`
    /// son estados terminales.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Placed, OrderStatus::Accepted)
                | (OrderStatus::Placed, OrderStatus::Cancelled)
                | (OrderStatus::Accepted, OrderStatus::Fulfilled)
                | (OrderStatus::Accepted, OrderStatus::Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Fulfilled | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Placed => write!(f, "Placed"),
            OrderStatus::Accepted => write!(f, "Accepted"),
            OrderStatus::Fulfilled => write!(f, "Fulfilled"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;

    #[test]
    fn forward_transitions_allowed() {
        assert!(Placed.can_transition_to(Accepted));
        assert!(Accepted.can_transition_to(Fulfilled));
    }

    #[test]
    fn cancellation_only_before_fulfillment() {
        assert!(Placed.can_transition_to(Cancelled));
        assert!(Accepted.can_transition_to(Cancelled));
        assert!(!Fulfilled.can_transition_to(Cancelled));
    }

    #[test]
    fn no_skipping_acceptance() {
        assert!(!Placed.can_transition_to(Fulfilled));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for next in [Placed, Accepted, Fulfilled, Cancelled] {
            assert!(!Fulfilled.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }
}
