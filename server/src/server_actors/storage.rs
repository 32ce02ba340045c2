use actix::prelude::*;
use colored::Color;
use common::logger::Logger;
use common::messages::internal_messages::{
    AddCustomer, AddVendor, GetCustomer, GetOrder, GetPendingVendors, GetVendor, GetVendorOrders,
    GetVendors, InsertOrder, RecordFulfilledSale, ReplaceMenu, SetOrderPaymentRef, SetOrderStatus,
    SetVendorApproval, SetVendorDishAvailability, UpsertVendorDish,
};
use common::types::approval_status::ApprovalStatus;
use common::types::dtos::{CustomerDTO, OrderDTO, VendorDTO};
use common::types::order_status::OrderStatus;
use std::collections::HashMap;

/// The `Storage` actor maintains all marketplace state: customer and vendor
/// profiles, menus and orders.
///
/// # Responsibilities
/// - Stores and manages all entities (customers, vendors, orders).
/// - Assigns order IDs and enforces the order lifecycle on status changes.
/// - Keeps the customer's order-in-progress mirror consistent with the
///   orders table.
pub struct Storage {
    /// Dictionary with information about customers.
    pub customers: HashMap<String, CustomerDTO>,
    /// Dictionary with information about vendors.
    pub vendors: HashMap<String, VendorDTO>,
    /// Dictionary of orders.
    pub orders: HashMap<u64, OrderDTO>,
    /// Next order ID to assign.
    pub next_order_id: u64,
    /// Logger for storage events.
    pub logger: Logger,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            customers: HashMap::new(),
            vendors: HashMap::new(),
            orders: HashMap::new(),
            next_order_id: 1,
            logger: Logger::new("Storage", Color::White),
        }
    }

    /// Propaga el estado actual de una orden al perfil de su comensal.
    fn mirror_order_to_customer(&mut self, order_id: u64) {
        let Some(order) = self.orders.get(&order_id).cloned() else {
            return;
        };
        if let Some(customer) = self.customers.get_mut(&order.customer_id) {
            // Un pedido terminado deja de acompañar al perfil, así un
            // comensal que se reconecta puede volver a pedir.
            customer.current_order = if order.status.is_terminal() {
                None
            } else {
                Some(order)
            };
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for Storage {
    type Context = Context<Self>;
}

// --------------- ADD ------------------ //

impl Handler<AddCustomer> for Storage {
    type Result = ();

    fn handle(&mut self, msg: AddCustomer, _ctx: &mut Self::Context) -> Self::Result {
        self.logger
            .info(format!("Customer added: {}", msg.customer.customer_id));
        self.customers
            .insert(msg.customer.customer_id.clone(), msg.customer);
    }
}

impl Handler<AddVendor> for Storage {
    type Result = ();

    fn handle(&mut self, msg: AddVendor, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!(
            "Vendor added: {} (license {})",
            msg.vendor.vendor_id, msg.vendor.license_ref
        ));
        self.vendors.insert(msg.vendor.vendor_id.clone(), msg.vendor);
    }
}

/// Handles inserting a new order. The definitive order ID is assigned here
/// and returned to the caller.
impl Handler<InsertOrder> for Storage {
    type Result = u64;

    fn handle(&mut self, msg: InsertOrder, _ctx: &mut Self::Context) -> Self::Result {
        let mut order = msg.order;
        let order_id = self.next_order_id;
        self.next_order_id += 1;
        order.order_id = order_id;
        self.logger.info(format!(
            "Order [{}] inserted for customer [{}] at vendor [{}]",
            order_id, order.customer_id, order.vendor_id
        ));
        self.orders.insert(order_id, order);
        self.mirror_order_to_customer(order_id);
        order_id
    }
}

// --------------- GET ------------------ //

impl Handler<GetCustomer> for Storage {
    type Result = MessageResult<GetCustomer>;

    fn handle(&mut self, msg: GetCustomer, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.customers.get(&msg.customer_id).cloned())
    }
}

impl Handler<GetVendor> for Storage {
    type Result = MessageResult<GetVendor>;

    fn handle(&mut self, msg: GetVendor, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.vendors.get(&msg.vendor_id).cloned())
    }
}

impl Handler<GetVendors> for Storage {
    type Result = MessageResult<GetVendors>;

    fn handle(&mut self, _msg: GetVendors, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.vendors.values().cloned().collect())
    }
}

impl Handler<GetPendingVendors> for Storage {
    type Result = MessageResult<GetPendingVendors>;

    fn handle(&mut self, _msg: GetPendingVendors, _ctx: &mut Self::Context) -> Self::Result {
        let mut pending: Vec<VendorDTO> = self
            .vendors
            .values()
            .filter(|v| v.approval == ApprovalStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.registered_at.cmp(&b.registered_at));
        MessageResult(pending)
    }
}

impl Handler<GetOrder> for Storage {
    type Result = MessageResult<GetOrder>;

    fn handle(&mut self, msg: GetOrder, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.orders.get(&msg.order_id).cloned())
    }
}

impl Handler<GetVendorOrders> for Storage {
    type Result = MessageResult<GetVendorOrders>;

    fn handle(&mut self, msg: GetVendorOrders, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(
            self.orders
                .values()
                .filter(|o| o.vendor_id == msg.vendor_id)
                .cloned()
                .collect(),
        )
    }
}

// --------------- SET ------------------ //

impl Handler<SetVendorApproval> for Storage {
    type Result = bool;

    fn handle(&mut self, msg: SetVendorApproval, _ctx: &mut Self::Context) -> Self::Result {
        match self.vendors.get_mut(&msg.vendor_id) {
            Some(vendor) => {
                self.logger.info(format!(
                    "Vendor [{}] license review: {}",
                    msg.vendor_id, msg.approval
                ));
                vendor.approval = msg.approval;
                true
            }
            None => {
                self.logger
                    .warn(format!("Vendor not found: {}", msg.vendor_id));
                false
            }
        }
    }
}

impl Handler<ReplaceMenu> for Storage {
    type Result = ();

    fn handle(&mut self, msg: ReplaceMenu, _ctx: &mut Self::Context) -> Self::Result {
        match self.vendors.get_mut(&msg.vendor_id) {
            Some(vendor) => {
                vendor.menu = msg
                    .dishes
                    .into_iter()
                    .map(|dish| (dish.name.clone(), dish))
                    .collect();
                self.logger.info(format!(
                    "Menu published for vendor [{}]: {} dishes",
                    msg.vendor_id,
                    vendor.menu.len()
                ));
            }
            None => {
                self.logger
                    .warn(format!("Vendor not found: {}", msg.vendor_id));
            }
        }
    }
}

impl Handler<UpsertVendorDish> for Storage {
    type Result = ();

    fn handle(&mut self, msg: UpsertVendorDish, _ctx: &mut Self::Context) -> Self::Result {
        match self.vendors.get_mut(&msg.vendor_id) {
            Some(vendor) => {
                self.logger.info(format!(
                    "Dish [{}] upserted for vendor [{}]",
                    msg.dish.name, msg.vendor_id
                ));
                vendor.menu.insert(msg.dish.name.clone(), msg.dish);
            }
            None => {
                self.logger
                    .warn(format!("Vendor not found: {}", msg.vendor_id));
            }
        }
    }
}

impl Handler<SetVendorDishAvailability> for Storage {
    type Result = bool;

    fn handle(&mut self, msg: SetVendorDishAvailability, _ctx: &mut Self::Context) -> Self::Result {
        let Some(vendor) = self.vendors.get_mut(&msg.vendor_id) else {
            self.logger
                .warn(format!("Vendor not found: {}", msg.vendor_id));
            return false;
        };
        match vendor.menu.get_mut(&msg.dish_name) {
            Some(dish) => {
                dish.available = msg.available;
                true
            }
            None => {
                self.logger.warn(format!(
                    "Dish [{}] not found for vendor [{}]",
                    msg.dish_name, msg.vendor_id
                ));
                false
            }
        }
    }
}

/// Handles order status changes, enforcing the lifecycle. An order is never
/// marked fulfilled without a settled payment reference.
impl Handler<SetOrderStatus> for Storage {
    type Result = bool;

    fn handle(&mut self, msg: SetOrderStatus, _ctx: &mut Self::Context) -> Self::Result {
        let Some(order) = self.orders.get_mut(&msg.order_id) else {
            self.logger
                .warn(format!("Order not found: {}", msg.order_id));
            return false;
        };
        if !order.status.can_transition_to(msg.status) {
            self.logger.warn(format!(
                "Illegal transition for order [{}]: {} -> {}",
                msg.order_id, order.status, msg.status
            ));
            return false;
        }
        if msg.status == OrderStatus::Fulfilled && order.payment_ref.is_none() {
            self.logger.warn(format!(
                "Order [{}] cannot be fulfilled without a settled payment",
                msg.order_id
            ));
            return false;
        }
        self.logger.info(format!(
            "Order [{}]: {} -> {}",
            msg.order_id, order.status, msg.status
        ));
        order.status = msg.status;
        self.mirror_order_to_customer(msg.order_id);
        true
    }
}

impl Handler<SetOrderPaymentRef> for Storage {
    type Result = ();

    fn handle(&mut self, msg: SetOrderPaymentRef, _ctx: &mut Self::Context) -> Self::Result {
        match self.orders.get_mut(&msg.order_id) {
            Some(order) => {
                order.payment_ref = Some(msg.transaction_id);
                self.mirror_order_to_customer(msg.order_id);
            }
            None => {
                self.logger
                    .warn(format!("Order not found: {}", msg.order_id));
            }
        }
    }
}

/// Bumps the vendor metrics that feed discovery rankings and the dashboard.
impl Handler<RecordFulfilledSale> for Storage {
    type Result = ();

    fn handle(&mut self, msg: RecordFulfilledSale, _ctx: &mut Self::Context) -> Self::Result {
        match self.vendors.get_mut(&msg.vendor_id) {
            Some(vendor) => {
                vendor.orders_taken += 1;
                vendor.sales_total += msg.amount;
                self.logger.info(format!(
                    "Vendor [{}]: {} orders taken, {:.2} total sales",
                    msg.vendor_id, vendor.orders_taken, vendor.sales_total
                ));
            }
            None => {
                self.logger
                    .warn(format!("Vendor not found: {}", msg.vendor_id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::types::dtos::DishDTO;

    fn customer(id: &str) -> CustomerDTO {
        CustomerDTO {
            customer_id: id.to_string(),
            position: (-34.60, -58.38),
            current_order: None,
            registered_at: Utc::now(),
        }
    }

    fn vendor(id: &str) -> VendorDTO {
        VendorDTO {
            vendor_id: id.to_string(),
            name: id.to_string(),
            position: (-34.60, -58.38),
            license_ref: format!("licenses/{}.png", id),
            approval: ApprovalStatus::Pending,
            menu: HashMap::new(),
            orders_taken: 0,
            sales_total: 0.0,
            registered_at: Utc::now(),
        }
    }

    fn order(customer_id: &str, vendor_id: &str) -> OrderDTO {
        OrderDTO {
            order_id: 0,
            customer_id: customer_id.to_string(),
            vendor_id: vendor_id.to_string(),
            items: Vec::new(),
            total: 20.0,
            status: OrderStatus::Placed,
            payment_ref: None,
            created_at: Utc::now(),
        }
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn insert_order_assigns_sequential_ids() {
        let storage = Storage::new().start();
        storage.do_send(AddCustomer {
            customer: customer("ana"),
        });
        let first = storage
            .send(InsertOrder {
                order: order("ana", "la_esquina"),
            })
            .await
            .unwrap();
        let second = storage
            .send(InsertOrder {
                order: order("ana", "la_esquina"),
            })
            .await
            .unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn fulfillment_requires_a_payment_reference() {
        let storage = Storage::new().start();
        let order_id = storage
            .send(InsertOrder {
                order: order("ana", "la_esquina"),
            })
            .await
            .unwrap();
        assert!(
            storage
                .send(SetOrderStatus {
                    order_id,
                    status: OrderStatus::Accepted,
                })
                .await
                .unwrap()
        );
        // Sin pago cobrado, no se completa.
        assert!(
            !storage
                .send(SetOrderStatus {
                    order_id,
                    status: OrderStatus::Fulfilled,
                })
                .await
                .unwrap()
        );
        storage.do_send(SetOrderPaymentRef {
            order_id,
            transaction_id: "tx-1".to_string(),
        });
        assert!(
            storage
                .send(SetOrderStatus {
                    order_id,
                    status: OrderStatus::Fulfilled,
                })
                .await
                .unwrap()
        );
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn rejects_skipping_acceptance() {
        let storage = Storage::new().start();
        let order_id = storage
            .send(InsertOrder {
                order: order("ana", "la_esquina"),
            })
            .await
            .unwrap();
        storage.do_send(SetOrderPaymentRef {
            order_id,
            transaction_id: "tx-1".to_string(),
        });
        assert!(
            !storage
                .send(SetOrderStatus {
                    order_id,
                    status: OrderStatus::Fulfilled,
                })
                .await
                .unwrap()
        );
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn pending_vendors_excludes_reviewed_ones() {
        let storage = Storage::new().start();
        storage.do_send(AddVendor {
            vendor: vendor("la_esquina"),
        });
        storage.do_send(AddVendor {
            vendor: vendor("el_galpon"),
        });
        assert!(
            storage
                .send(SetVendorApproval {
                    vendor_id: "la_esquina".to_string(),
                    approval: ApprovalStatus::Approved,
                })
                .await
                .unwrap()
        );
        let pending = storage.send(GetPendingVendors).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].vendor_id, "el_galpon");
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn menu_updates_touch_only_the_named_dish() {
        let storage = Storage::new().start();
        storage.do_send(AddVendor {
            vendor: vendor("la_esquina"),
        });
        storage.do_send(ReplaceMenu {
            vendor_id: "la_esquina".to_string(),
            dishes: vec![
                DishDTO {
                    name: "Milanesa".to_string(),
                    price: 12.5,
                    available: true,
                },
                DishDTO {
                    name: "Empanada".to_string(),
                    price: 3.0,
                    available: true,
                },
            ],
        });
        assert!(
            storage
                .send(SetVendorDishAvailability {
                    vendor_id: "la_esquina".to_string(),
                    dish_name: "Milanesa".to_string(),
                    available: false,
                })
                .await
                .unwrap()
        );
        let vendor = storage
            .send(GetVendor {
                vendor_id: "la_esquina".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert!(!vendor.menu["Milanesa"].available);
        assert!(vendor.menu["Empanada"].available);
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn fulfilled_sales_bump_vendor_metrics() {
        let storage = Storage::new().start();
        storage.do_send(AddVendor {
            vendor: vendor("la_esquina"),
        });
        storage.do_send(RecordFulfilledSale {
            vendor_id: "la_esquina".to_string(),
            amount: 20.0,
        });
        storage.do_send(RecordFulfilledSale {
            vendor_id: "la_esquina".to_string(),
            amount: 15.5,
        });
        let vendor = storage
            .send(GetVendor {
                vendor_id: "la_esquina".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(vendor.orders_taken, 2);
        assert!((vendor.sales_total - 35.5).abs() < 1e-9);
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn terminal_orders_leave_the_customer_profile() {
        let storage = Storage::new().start();
        storage.do_send(AddCustomer {
            customer: customer("ana"),
        });
        let order_id = storage
            .send(InsertOrder {
                order: order("ana", "la_esquina"),
            })
            .await
            .unwrap();
        let ana = storage
            .send(GetCustomer {
                customer_id: "ana".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert!(ana.current_order.is_some());
        assert!(
            storage
                .send(SetOrderStatus {
                    order_id,
                    status: OrderStatus::Cancelled,
                })
                .await
                .unwrap()
        );
        let ana = storage
            .send(GetCustomer {
                customer_id: "ana".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert!(ana.current_order.is_none());
    }
}
