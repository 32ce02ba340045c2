use crate::types::{
    dashboard::DashboardSummary,
    dtos::{DishDTO, OrderDTO},
};
use actix::Message;
use serde::{Deserialize, Serialize};

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct PublishMenu {
    pub vendor_id: String,
    pub dishes: Vec<DishDTO>,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct UpsertDish {
    pub vendor_id: String,
    pub dish: DishDTO,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct SetDishAvailability {
    pub vendor_id: String,
    pub dish_name: String,
    pub available: bool,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct NewOrder {
    pub order: OrderDTO,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct AcceptOrder {
    pub vendor_id: String,
    pub order_id: u64,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct RejectOrder {
    pub vendor_id: String,
    pub order_id: u64,
    pub reason: String,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct OrderPrepared {
    pub vendor_id: String,
    pub order_id: u64,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct RequestDashboard {
    pub vendor_id: String,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct DashboardReport {
    pub vendor_id: String,
    pub summary: DashboardSummary,
}
