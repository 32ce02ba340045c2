use crate::types::approval_status::ApprovalStatus;
use crate::types::order_status::OrderStatus;
use actix::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, Message, Clone)]
#[serde(tag = "user_type")]
#[rtype(result = "()")]
pub enum UserDTO {
    Customer(CustomerDTO),
    Vendor(VendorDTO),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDTO {
    /// ID único del comensal.
    pub customer_id: String,
    /// Posición del comensal como (latitud, longitud).
    pub position: (f64, f64),
    /// Pedido en curso, si hay uno.
    pub current_order: Option<OrderDTO>,
    /// Momento del alta del perfil.
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorDTO {
    /// ID único del restaurante.
    pub vendor_id: String,
    /// Nombre visible en los listados.
    pub name: String,
    /// Posición del local como (latitud, longitud).
    pub position: (f64, f64),
    /// Referencia al documento de licencia presentado al registrarse.
    pub license_ref: String,
    /// Estado de la revisión de licencia.
    pub approval: ApprovalStatus,
    /// Menú del restaurante, indexado por nombre de plato.
    pub menu: HashMap<String, DishDTO>,
    /// Pedidos completados (métrica de popularidad).
    pub orders_taken: u64,
    /// Total facturado por pedidos completados.
    pub sales_total: f64,
    /// Momento del alta del perfil.
    pub registered_at: DateTime<Utc>,
}

impl VendorDTO {
    /// Platos visibles para un comensal: solo los disponibles, ordenados
    /// por nombre para que el listado sea determinístico.
    pub fn listed_dishes(&self) -> Vec<DishDTO> {
        let mut dishes: Vec<DishDTO> = self
            .menu
            .values()
            .filter(|d| d.available)
            .cloned()
            .collect();
        dishes.sort_by(|a, b| a.name.cmp(&b.name));
        dishes
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishDTO {
    pub name: String,
    pub price: f64,
    pub available: bool,
}

/// Renglón de un pedido. El precio unitario queda congelado al momento
/// de la compra: cambios posteriores en el menú no lo afectan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDTO {
    pub dish_name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDTO {
    /// ID de la orden, asignado por el servidor.
    pub order_id: u64,
    /// ID del comensal que realizó el pedido.
    pub customer_id: String,
    /// ID del restaurante que recibe el pedido.
    pub vendor_id: String,
    /// Renglones del pedido.
    pub items: Vec<LineItemDTO>,
    /// Total del pedido; siempre la suma de los renglones.
    pub total: f64,
    /// Estado de la orden.
    pub status: OrderStatus,
    /// ID de transacción del gateway, presente una vez autorizado el pago.
    pub payment_ref: Option<String>,
    /// Momento de creación del pedido.
    pub created_at: DateTime<Utc>,
}

impl OrderDTO {
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|item| item.amount).sum()
    }
}

impl Eq for OrderDTO {}

impl PartialEq for OrderDTO {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id
    }
}

impl std::hash::Hash for OrderDTO {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.order_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(name: &str, price: f64, available: bool) -> DishDTO {
        DishDTO {
            name: name.to_string(),
            price,
            available,
        }
    }

    fn sample_vendor() -> VendorDTO {
        let mut menu = HashMap::new();
        for d in [
            dish("Milanesa", 12.5, true),
            dish("Empanada", 3.0, true),
            dish("Locro", 9.0, false),
        ] {
            menu.insert(d.name.clone(), d);
        }
        VendorDTO {
            vendor_id: "la_esquina".to_string(),
            name: "La Esquina".to_string(),
            position: (-34.6, -58.38),
            license_ref: "licenses/la_esquina.png".to_string(),
            approval: ApprovalStatus::Approved,
            menu,
            orders_taken: 0,
            sales_total: 0.0,
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn listed_dishes_hide_unavailable_and_sort_by_name() {
        let vendor = sample_vendor();
        let dishes = vendor.listed_dishes();
        let names: Vec<&str> = dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Empanada", "Milanesa"]);
    }

    #[test]
    fn order_identity_is_its_id() {
        let base = OrderDTO {
            order_id: 7,
            customer_id: "ana".to_string(),
            vendor_id: "la_esquina".to_string(),
            items: Vec::new(),
            total: 0.0,
            status: OrderStatus::Placed,
            payment_ref: None,
            created_at: Utc::now(),
        };
        let mut other = base.clone();
        other.status = OrderStatus::Accepted;
        assert_eq!(base, other);
    }

    #[test]
    fn items_total_sums_line_amounts() {
        let mut order = OrderDTO {
            order_id: 1,
            customer_id: "ana".to_string(),
            vendor_id: "la_esquina".to_string(),
            items: vec![
                LineItemDTO {
                    dish_name: "Empanada".to_string(),
                    unit_price: 3.0,
                    quantity: 4,
                    amount: 12.0,
                },
                LineItemDTO {
                    dish_name: "Milanesa".to_string(),
                    unit_price: 12.5,
                    quantity: 1,
                    amount: 12.5,
                },
            ],
            total: 24.5,
            status: OrderStatus::Placed,
            payment_ref: None,
            created_at: Utc::now(),
        };
        assert!((order.items_total() - order.total).abs() < 1e-9);
        order.items.pop();
        assert!((order.items_total() - 12.0).abs() < 1e-9);
    }
}
