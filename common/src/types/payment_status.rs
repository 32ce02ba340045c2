use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado de una transacción en el gateway de pagos. Cada transacción
/// pertenece a exactamente un pedido.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Autorizada pero todavía no cobrada.
    Authorized,
    /// Cobrada; el pedido asociado puede completarse.
    Settled,
    /// La autorización fue rechazada.
    Declined,
    /// El cobro falló después de autorizarse.
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Authorized => write!(f, "Authorized"),
            PaymentStatus::Settled => write!(f, "Settled"),
            PaymentStatus::Declined => write!(f, "Declined"),
            PaymentStatus::Failed => write!(f, "Failed"),
        }
    }
}
