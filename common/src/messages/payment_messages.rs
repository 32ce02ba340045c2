use crate::types::dtos::OrderDTO;
use actix::Message;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct RequestAuthorization {
    pub origin_addr: SocketAddr,
    pub order: OrderDTO,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct AuthorizationResult {
    pub order_id: u64,
    pub transaction_id: Option<String>,
    pub authorized: bool,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct BillPayment {
    pub origin_addr: SocketAddr,
    pub order_id: u64,
    pub transaction_id: String,
    pub amount: f64,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct PaymentCompleted {
    pub order_id: u64,
    pub transaction_id: String,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct PaymentFailed {
    pub order_id: u64,
    pub reason: String,
}
