use crate::gateway_acceptor::RegisterConnection;
use actix::prelude::*;
use chrono::{DateTime, Utc};
use colored::Color;
use common::logger::Logger;
use common::messages::payment_messages::{
    AuthorizationResult, BillPayment, PaymentCompleted, PaymentFailed, RequestAuthorization,
};
use common::messages::shared_messages::NetworkMessage;
use common::network::communicator::Communicator;
use common::types::dtos::OrderDTO;
use common::types::payment_status::PaymentStatus;
use common::utils::random_bool_by_given_probability;
use std::collections::HashMap;
use std::net::SocketAddr;
use uuid::Uuid;

/// Registro interno de una transacción del gateway.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub transaction_id: String,
    pub order_id: u64,
    pub amount: f64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Pasarela de pagos simulada. Autoriza pagos con una probabilidad
/// configurable y luego cobra las transacciones autorizadas.
///
/// Toda transacción queda registrada, incluidas las rechazadas, de modo
/// que un cobro solo puede ejecutarse contra una autorización previa.
pub struct PaymentGateway {
    success_probability: f32,
    communicators: HashMap<SocketAddr, Communicator<PaymentGateway>>,
    transactions: HashMap<String, Transaction>,
    logger: Logger,
}

impl PaymentGateway {
    pub fn new(success_probability: f32) -> Self {
        Self {
            success_probability,
            communicators: HashMap::new(),
            transactions: HashMap::new(),
            logger: Logger::new("PaymentGateway", Color::Magenta),
        }
    }

    /// Decide si autoriza el pago de una orden. Si autoriza, registra la
    /// transacción como `Authorized` y devuelve su ID; si no, registra el
    /// rechazo y devuelve un resultado sin transacción.
    pub fn authorize(&mut self, order: &OrderDTO) -> AuthorizationResult {
        let transaction_id = Uuid::new_v4().to_string();
        let authorized = random_bool_by_given_probability(self.success_probability);
        let status = if authorized {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Declined
        };
        self.transactions.insert(
            transaction_id.clone(),
            Transaction {
                transaction_id: transaction_id.clone(),
                order_id: order.order_id,
                amount: order.total,
                status,
                created_at: Utc::now(),
            },
        );
        AuthorizationResult {
            order_id: order.order_id,
            transaction_id: if authorized {
                Some(transaction_id)
            } else {
                None
            },
            authorized,
        }
    }

    /// Cobra una transacción previamente autorizada. El cobro se rechaza
    /// si la transacción no existe, no corresponde a la orden, su monto
    /// no coincide o ya fue cobrada.
    pub fn bill(
        &mut self,
        order_id: u64,
        transaction_id: &str,
        amount: f64,
    ) -> Result<PaymentCompleted, PaymentFailed> {
        let Some(transaction) = self.transactions.get_mut(transaction_id) else {
            return Err(PaymentFailed {
                order_id,
                reason: format!("Unknown transaction [{}]", transaction_id),
            });
        };
        if transaction.order_id != order_id {
            return Err(PaymentFailed {
                order_id,
                reason: format!(
                    "Transaction [{}] does not belong to order [{}]",
                    transaction_id, order_id
                ),
            });
        }
        if (transaction.amount - amount).abs() > f64::EPSILON {
            return Err(PaymentFailed {
                order_id,
                reason: format!(
                    "Amount mismatch for transaction [{}]: authorized {}, billed {}",
                    transaction_id, transaction.amount, amount
                ),
            });
        }
        match transaction.status {
            PaymentStatus::Authorized => {
                transaction.status = PaymentStatus::Settled;
                Ok(PaymentCompleted {
                    order_id,
                    transaction_id: transaction_id.to_string(),
                })
            }
            PaymentStatus::Settled => Err(PaymentFailed {
                order_id,
                reason: format!("Transaction [{}] already settled", transaction_id),
            }),
            PaymentStatus::Declined | PaymentStatus::Failed => Err(PaymentFailed {
                order_id,
                reason: format!("Transaction [{}] was not authorized", transaction_id),
            }),
        }
    }

    fn reply_to(&self, addr: SocketAddr, msg: NetworkMessage) {
        match self.communicators.get(&addr) {
            Some(communicator) => communicator.send(msg),
            None => self
                .logger
                .warn(format!("No connection registered for {}", addr)),
        }
    }
}

impl Actor for PaymentGateway {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info("Payment gateway up");
    }
}

impl Handler<RegisterConnection> for PaymentGateway {
    type Result = ();

    fn handle(&mut self, msg: RegisterConnection, _ctx: &mut Self::Context) {
        self.communicators.insert(msg.client_addr, msg.communicator);
    }
}

impl Handler<NetworkMessage> for PaymentGateway {
    type Result = ();

    fn handle(&mut self, msg: NetworkMessage, _ctx: &mut Self::Context) {
        match msg {
            NetworkMessage::RequestAuthorization(RequestAuthorization { origin_addr, order }) => {
                let result = self.authorize(&order);
                self.logger.info(format!(
                    "Payment [{}] for order [{}] of customer [{}]",
                    if result.authorized {
                        "AUTHORIZED"
                    } else {
                        "DECLINED"
                    },
                    order.order_id,
                    order.customer_id
                ));
                self.reply_to(origin_addr, NetworkMessage::AuthorizationResult(result));
            }
            NetworkMessage::BillPayment(BillPayment {
                origin_addr,
                order_id,
                transaction_id,
                amount,
            }) => {
                let reply = match self.bill(order_id, &transaction_id, amount) {
                    Ok(completed) => {
                        self.logger.info(format!(
                            "Settled {} for order [{}], transaction [{}]",
                            amount, order_id, transaction_id
                        ));
                        NetworkMessage::PaymentCompleted(completed)
                    }
                    Err(failed) => {
                        self.logger.warn(format!(
                            "Billing failed for order [{}]: {}",
                            order_id, failed.reason
                        ));
                        NetworkMessage::PaymentFailed(failed)
                    }
                };
                self.reply_to(origin_addr, reply);
            }
            NetworkMessage::ConnectionClosed(closed) => {
                self.logger
                    .info(format!("Connection closed by {}", closed.remote_addr));
                self.communicators.remove(&closed.remote_addr);
            }
            other => {
                self.logger
                    .warn(format!("Unexpected message: {:?}", other));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::order_status::OrderStatus;

    fn order(order_id: u64, total: f64) -> OrderDTO {
        OrderDTO {
            order_id,
            customer_id: "ana".to_string(),
            vendor_id: "la_esquina".to_string(),
            items: Vec::new(),
            total,
            status: OrderStatus::Placed,
            payment_ref: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn authorization_with_certain_success_yields_a_transaction() {
        let mut gateway = PaymentGateway::new(1.0);
        let result = gateway.authorize(&order(1, 25.0));
        assert!(result.authorized);
        let transaction_id = result.transaction_id.unwrap();
        assert_eq!(
            gateway.transactions[&transaction_id].status,
            PaymentStatus::Authorized
        );
    }

    #[test]
    fn authorization_with_certain_failure_declines() {
        let mut gateway = PaymentGateway::new(0.0);
        let result = gateway.authorize(&order(1, 25.0));
        assert!(!result.authorized);
        assert!(result.transaction_id.is_none());
        // El rechazo queda registrado igual.
        assert_eq!(gateway.transactions.len(), 1);
    }

    #[test]
    fn billing_settles_an_authorized_transaction_once() {
        let mut gateway = PaymentGateway::new(1.0);
        let result = gateway.authorize(&order(3, 40.0));
        let transaction_id = result.transaction_id.unwrap();

        let completed = gateway.bill(3, &transaction_id, 40.0).unwrap();
        assert_eq!(completed.order_id, 3);
        assert_eq!(
            gateway.transactions[&transaction_id].status,
            PaymentStatus::Settled
        );

        let second = gateway.bill(3, &transaction_id, 40.0);
        assert!(second.is_err());
    }

    #[test]
    fn billing_rejects_unknown_and_mismatched_transactions() {
        let mut gateway = PaymentGateway::new(1.0);
        assert!(gateway.bill(1, "nope", 10.0).is_err());

        let result = gateway.authorize(&order(2, 30.0));
        let transaction_id = result.transaction_id.unwrap();
        // Orden equivocada.
        assert!(gateway.bill(99, &transaction_id, 30.0).is_err());
        // Monto equivocado.
        assert!(gateway.bill(2, &transaction_id, 31.0).is_err());
        // El monto correcto sigue siendo cobrable.
        assert!(gateway.bill(2, &transaction_id, 30.0).is_ok());
    }
}
