use crate::types::approval_status::ApprovalStatus;
use crate::types::dtos::CustomerDTO;
use crate::types::dtos::DishDTO;
use crate::types::dtos::OrderDTO;
use crate::types::dtos::VendorDTO;
use crate::types::order_status::OrderStatus;
use actix::Message;
use serde::{Deserialize, Serialize};

/////////////////////////////////////////////////////////////////////
// Mensajes del storage
/////////////////////////////////////////////////////////////////////

/// Message to add a new customer to storage.
///
/// ## Purpose
/// Used to record the addition of a new customer profile.
///
/// ## Contents
/// - `customer`: The [`CustomerDTO`] representing the customer.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct AddCustomer {
    pub customer: CustomerDTO,
}

/// Message to add a new vendor to storage.
///
/// ## Purpose
/// Used to record the addition of a new vendor profile. New vendors start
/// with their license pending review.
///
/// ## Contents
/// - `vendor`: The [`VendorDTO`] representing the vendor.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct AddVendor {
    pub vendor: VendorDTO,
}

/// Message to retrieve a customer from storage.
///
/// ## Contents
/// - `customer_id`: The ID of the customer to retrieve.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Option<CustomerDTO>")]
pub struct GetCustomer {
    pub customer_id: String,
}

/// Message to retrieve a vendor from storage.
///
/// ## Contents
/// - `vendor_id`: The ID of the vendor to retrieve.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Option<VendorDTO>")]
pub struct GetVendor {
    pub vendor_id: String,
}

/// Message to retrieve every vendor from storage, regardless of approval.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Vec<VendorDTO>")]
pub struct GetVendors;

/// Message to retrieve the vendors whose license is still pending review.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Vec<VendorDTO>")]
pub struct GetPendingVendors;

/// Message to record the outcome of a license review.
///
/// ## Contents
/// - `vendor_id`: The ID of the reviewed vendor.
/// - `approval`: The new [`ApprovalStatus`].
///
/// Replies with `false` when the vendor does not exist.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "bool")]
pub struct SetVendorApproval {
    pub vendor_id: String,
    pub approval: ApprovalStatus,
}

/// Message to replace a vendor's menu with a new set of dishes.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct ReplaceMenu {
    pub vendor_id: String,
    pub dishes: Vec<DishDTO>,
}

/// Message to add or update a single dish in a vendor's menu.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct UpsertVendorDish {
    pub vendor_id: String,
    pub dish: DishDTO,
}

/// Message to toggle a dish's availability.
///
/// Replies with `false` when the vendor or the dish does not exist.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "bool")]
pub struct SetVendorDishAvailability {
    pub vendor_id: String,
    pub dish_name: String,
    pub available: bool,
}

/// Message to insert a new order into storage.
///
/// ## Purpose
/// Storage assigns the order ID, so the caller sends the order with a
/// placeholder ID and receives the definitive one in the reply.
///
/// ## Contents
/// - `order`: The [`OrderDTO`] to insert.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "u64")]
pub struct InsertOrder {
    pub order: OrderDTO,
}

/// Message to retrieve an order from storage.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Option<OrderDTO>")]
pub struct GetOrder {
    pub order_id: u64,
}

/// Message to move an order to a new status.
///
/// ## Purpose
/// Storage enforces the order lifecycle: the transition is applied only when
/// it is legal, and an order is never marked fulfilled without a settled
/// payment reference. Replies with `true` when the transition was applied.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "bool")]
pub struct SetOrderStatus {
    pub order_id: u64,
    pub status: OrderStatus,
}

/// Message to attach the gateway transaction ID to an order.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct SetOrderPaymentRef {
    pub order_id: u64,
    pub transaction_id: String,
}

/// Message to bump a vendor's sales metrics after a fulfilled order.
///
/// ## Contents
/// - `vendor_id`: The vendor that fulfilled the order.
/// - `amount`: The order total to add to the vendor's sales.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct RecordFulfilledSale {
    pub vendor_id: String,
    pub amount: f64,
}

/// Message to retrieve every order placed with a vendor.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Vec<OrderDTO>")]
pub struct GetVendorOrders {
    pub vendor_id: String,
}
