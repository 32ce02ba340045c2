use crate::types::{
    dtos::{DishDTO, OrderDTO},
    ranking::RankingKey,
    vendor_listing::VendorListing,
};
use actix::Message;
use serde::{Deserialize, Serialize};

/// Renglón pedido por el comensal. El precio lo resuelve el servidor
/// contra el menú vigente.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequestItem {
    pub dish_name: String,
    pub quantity: u32,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct RequestRestaurants {
    pub customer_id: String,
    pub position: (f64, f64),
    pub sort: RankingKey,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct RestaurantListing {
    pub customer_id: String,
    pub restaurants: Vec<VendorListing>,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct ListingError {
    pub customer_id: String,
    pub reason: String,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct RequestMenu {
    pub customer_id: String,
    pub vendor_id: String,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct MenuListing {
    pub customer_id: String,
    pub vendor_id: String,
    pub dishes: Vec<DishDTO>,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct PlaceOrder {
    pub customer_id: String,
    pub vendor_id: String,
    pub items: Vec<OrderRequestItem>,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct OrderReceipt {
    pub order: OrderDTO,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct OrderRejectedNotice {
    pub customer_id: String,
    pub vendor_id: String,
    pub reason: String,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct CancelOrder {
    pub customer_id: String,
    pub order_id: u64,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct NotifyOrderUpdated {
    pub peer_id: String,
    pub order: OrderDTO,
}
