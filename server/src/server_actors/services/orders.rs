use crate::messages::internal_messages::SetActorsAddresses;
use crate::server_actors::coordinator::Coordinator;
use crate::server_actors::storage::Storage;
use actix::prelude::*;
use chrono::Utc;
use colored::Color;
use common::logger::Logger;
use common::messages::customer_messages::{
    CancelOrder, NotifyOrderUpdated, OrderReceipt, OrderRejectedNotice, OrderRequestItem,
    PlaceOrder,
};
use common::messages::internal_messages::{
    GetCustomer, GetOrder, GetVendor, InsertOrder, RecordFulfilledSale, SetOrderPaymentRef,
    SetOrderStatus,
};
use common::messages::payment_messages::{BillPayment, RequestAuthorization};
use common::messages::shared_messages::NetworkMessage;
use common::messages::vendor_messages::{AcceptOrder, NewOrder, OrderPrepared, RejectOrder};
use common::types::approval_status::ApprovalStatus;
use common::types::dtos::{DishDTO, LineItemDTO, OrderDTO};
use common::types::order_status::OrderStatus;
use common::{
    constants::{PAYMENT_GATEWAY_PORT, SERVER_IP_ADDRESS, TIMEOUT_SECONDS},
    network::{communicator::Communicator, connections::try_to_connect, peer_types::PeerType},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;

/// OrderService es responsable de:
/// 1. Validar y registrar los pedidos entrantes contra el Storage.
/// 2. Gestionar la autorización y el cobro con el PaymentGateway.
/// 3. Notificar al Coordinator para que este informe a los actores externos.
pub struct OrderService {
    pub coordinator_address: Option<Addr<Coordinator>>,
    pub storage_address: Option<Addr<Storage>>,
    /// Transacciones autorizadas a la espera del cobro, por orden.
    pub authorized_transactions: HashMap<u64, String>,
    pub logger: Logger,
    pub payment_gateway: Option<Communicator<OrderService>>,
    /// Dirección local con la que nos ve el gateway, para que sus
    /// respuestas vuelvan por la conexión correcta.
    pub gateway_origin_addr: Option<SocketAddr>,
    pub pending_stream: Option<TcpStream>,
}

/// Congela los precios del menú vigente en renglones del pedido.
///
/// Cada renglón referencia un plato del menú del restaurante del pedido,
/// por lo que un pedido nunca mezcla platos de distintos restaurantes.
pub fn build_line_items(
    menu: &HashMap<String, DishDTO>,
    requested: &[OrderRequestItem],
) -> Result<(Vec<LineItemDTO>, f64), String> {
    if requested.is_empty() {
        return Err("Order has no items".to_string());
    }
    let mut items = Vec::with_capacity(requested.len());
    let mut total = 0.0;
    for request in requested {
        if request.quantity == 0 {
            return Err(format!("Zero quantity for dish [{}]", request.dish_name));
        }
        let Some(dish) = menu.get(&request.dish_name) else {
            return Err(format!("Dish [{}] is not on the menu", request.dish_name));
        };
        if !dish.available {
            return Err(format!("Dish [{}] is not available", request.dish_name));
        }
        let amount = dish.price * request.quantity as f64;
        total += amount;
        items.push(LineItemDTO {
            dish_name: dish.name.clone(),
            unit_price: dish.price,
            quantity: request.quantity,
            amount,
        });
    }
    Ok((items, total))
}

impl OrderService {
    pub async fn new() -> Self {
        let logger = Logger::new("OrderService", Color::Blue);
        logger.info("Initializing OrderService");

        let payment_gateway_address = format!("{}:{}", SERVER_IP_ADDRESS, PAYMENT_GATEWAY_PORT)
            .parse::<SocketAddr>()
            .expect("Failed to parse gateway address");

        let pending_stream =
            try_to_connect(payment_gateway_address, PeerType::CoordinatorType).await;

        Self {
            coordinator_address: None,
            storage_address: None,
            authorized_transactions: HashMap::new(),
            logger,
            payment_gateway: None,
            gateway_origin_addr: None,
            pending_stream,
        }
    }

    fn attach_gateway(&mut self, stream: TcpStream, ctx: &mut Context<Self>) {
        self.gateway_origin_addr = stream.local_addr().ok();
        self.payment_gateway = Some(Communicator::new(
            stream,
            ctx.address(),
            PeerType::GatewayType,
        ));
        self.logger.info("Connected to PaymentGateway successfully");
    }

    fn reconnect_gateway(&mut self, ctx: &mut Context<Self>) {
        let gateway_addr = format!("{}:{}", SERVER_IP_ADDRESS, PAYMENT_GATEWAY_PORT)
            .parse::<SocketAddr>()
            .expect("Failed to parse gateway address");
        ctx.spawn(
            async move { try_to_connect(gateway_addr, PeerType::CoordinatorType).await }
                .into_actor(self)
                .map(|stream, act, ctx| match stream {
                    Some(stream) => act.attach_gateway(stream, ctx),
                    None => {
                        act.logger.warn("PaymentGateway unreachable, retrying");
                        ctx.run_later(Duration::from_secs(TIMEOUT_SECONDS), |act, ctx| {
                            act.reconnect_gateway(ctx);
                        });
                    }
                }),
        );
    }

    fn gateway_origin(&self) -> SocketAddr {
        self.gateway_origin_addr
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 0)))
    }

    fn send_to_gateway(&self, msg: NetworkMessage) {
        match &self.payment_gateway {
            Some(gateway) => gateway.send(msg),
            None => self.logger.error("PaymentGateway not connected"),
        }
    }

    fn notify(&self, peer_id: String, order: OrderDTO) {
        if let Some(coordinator) = &self.coordinator_address {
            coordinator.do_send(NotifyOrderUpdated { peer_id, order });
        }
    }
}

impl Actor for OrderService {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.logger.info("OrderService started");
        match self.pending_stream.take() {
            Some(stream) => self.attach_gateway(stream, ctx),
            None => {
                self.logger.error("Failed to connect to PaymentGateway");
                self.reconnect_gateway(ctx);
            }
        }
    }
}

impl Handler<SetActorsAddresses> for OrderService {
    type Result = ();

    fn handle(&mut self, msg: SetActorsAddresses, _ctx: &mut Self::Context) -> Self::Result {
        self.coordinator_address = Some(msg.coordinator_addr);
        self.storage_address = Some(msg.storage_addr);
    }
}

/// Valida el pedido contra el Storage y lo registra como `Placed`.
///
/// El restaurante tiene que existir y estar aprobado, el comensal tiene que
/// estar registrado y sin un pedido en curso.
async fn validate_and_store_order(
    storage: Addr<Storage>,
    msg: PlaceOrder,
) -> Result<OrderDTO, String> {
    let vendor = storage
        .send(GetVendor {
            vendor_id: msg.vendor_id.clone(),
        })
        .await
        .map_err(|_| "Internal error".to_string())?
        .ok_or(format!("Unknown restaurant [{}]", msg.vendor_id))?;
    if vendor.approval != ApprovalStatus::Approved {
        return Err(format!("Restaurant [{}] is not available", msg.vendor_id));
    }
    let customer = storage
        .send(GetCustomer {
            customer_id: msg.customer_id.clone(),
        })
        .await
        .map_err(|_| "Internal error".to_string())?
        .ok_or(format!("Unregistered customer [{}]", msg.customer_id))?;
    if let Some(current) = &customer.current_order {
        if !current.status.is_terminal() {
            return Err(format!("Order [{}] is still in progress", current.order_id));
        }
    }
    let (items, total) = build_line_items(&vendor.menu, &msg.items)?;
    let order = OrderDTO {
        order_id: 0,
        customer_id: msg.customer_id.clone(),
        vendor_id: msg.vendor_id.clone(),
        items,
        total,
        status: OrderStatus::Placed,
        payment_ref: None,
        created_at: Utc::now(),
    };
    let order_id = storage
        .send(InsertOrder {
            order: order.clone(),
        })
        .await
        .map_err(|_| "Internal error".to_string())?;
    Ok(OrderDTO { order_id, ..order })
}

/// Cancela el pedido solo si pertenece al comensal y el Storage admite la
/// transición a `Cancelled`. Devuelve el pedido ya cancelado.
async fn cancel_order_in_storage(
    storage: Addr<Storage>,
    order_id: u64,
    customer_id: String,
) -> Option<OrderDTO> {
    let order = storage.send(GetOrder { order_id }).await.ok().flatten()?;
    if order.customer_id != customer_id {
        return None;
    }
    let cancelled = storage
        .send(SetOrderStatus {
            order_id,
            status: OrderStatus::Cancelled,
        })
        .await
        .unwrap_or(false);
    if !cancelled {
        return None;
    }
    storage.send(GetOrder { order_id }).await.ok().flatten()
}

/// Valida un pedido nuevo contra el Storage y, si pasa, lo registra y pide
/// la autorización del pago al gateway.
impl Handler<PlaceOrder> for OrderService {
    type Result = ();

    fn handle(&mut self, msg: PlaceOrder, ctx: &mut Self::Context) -> Self::Result {
        let Some(storage) = self.storage_address.clone() else {
            self.logger.error("Storage not initialized yet");
            return;
        };
        let customer_id = msg.customer_id.clone();
        let vendor_id = msg.vendor_id.clone();

        ctx.spawn(
            validate_and_store_order(storage, msg)
                .into_actor(self)
                .map(move |result, act, _ctx| match result {
                    Ok(order) => {
                        act.logger.info(format!(
                            "Order [{}] placed, requesting payment authorization for {:.2}",
                            order.order_id, order.total
                        ));
                        act.send_to_gateway(NetworkMessage::RequestAuthorization(
                            RequestAuthorization {
                                origin_addr: act.gateway_origin(),
                                order,
                            },
                        ));
                    }
                    Err(reason) => {
                        act.logger
                            .warn(format!("Order rejected for [{}]: {}", customer_id, reason));
                        if let Some(coordinator) = &act.coordinator_address {
                            coordinator.do_send(OrderRejectedNotice {
                                customer_id,
                                vendor_id,
                                reason,
                            });
                        }
                    }
                }),
        );
    }
}

/// Mensajes que llegan por la conexión con el PaymentGateway.
impl Handler<NetworkMessage> for OrderService {
    type Result = ();

    fn handle(&mut self, msg: NetworkMessage, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            NetworkMessage::AuthorizationResult(result) => {
                let Some(storage) = self.storage_address.clone() else {
                    return;
                };
                let order_id = result.order_id;
                if result.authorized {
                    if let Some(transaction_id) = result.transaction_id {
                        self.authorized_transactions
                            .insert(order_id, transaction_id);
                    }
                    ctx.spawn(
                        async move { storage.send(GetOrder { order_id }).await.ok().flatten() }
                            .into_actor(self)
                            .map(move |order, act, _ctx| {
                                let Some(order) = order else {
                                    act.logger
                                        .error(format!("Authorized order [{}] not found", order_id));
                                    return;
                                };
                                act.logger.info(format!(
                                    "Order [{}] authorized, notifying vendor [{}]",
                                    order_id, order.vendor_id
                                ));
                                if let Some(coordinator) = &act.coordinator_address {
                                    coordinator.do_send(NewOrder {
                                        order: order.clone(),
                                    });
                                    coordinator.do_send(OrderReceipt { order });
                                }
                            }),
                    );
                } else {
                    // Autorización rechazada: el pedido se cancela de plano.
                    ctx.spawn(
                        async move {
                            storage.send(SetOrderStatus {
                                order_id,
                                status: OrderStatus::Cancelled,
                            })
                            .await
                            .ok();
                            storage.send(GetOrder { order_id }).await.ok().flatten()
                        }
                        .into_actor(self)
                        .map(move |order, act, _ctx| {
                            let Some(order) = order else {
                                return;
                            };
                            act.logger.warn(format!(
                                "Payment declined for order [{}], cancelled",
                                order_id
                            ));
                            if let Some(coordinator) = &act.coordinator_address {
                                coordinator.do_send(OrderRejectedNotice {
                                    customer_id: order.customer_id,
                                    vendor_id: order.vendor_id,
                                    reason: "Payment was declined".to_string(),
                                });
                            }
                        }),
                    );
                }
            }
            NetworkMessage::PaymentCompleted(completed) => {
                let Some(storage) = self.storage_address.clone() else {
                    return;
                };
                let order_id = completed.order_id;
                self.authorized_transactions.remove(&order_id);
                ctx.spawn(
                    async move {
                        storage
                            .send(SetOrderPaymentRef {
                                order_id,
                                transaction_id: completed.transaction_id,
                            })
                            .await
                            .ok();
                        let fulfilled = storage
                            .send(SetOrderStatus {
                                order_id,
                                status: OrderStatus::Fulfilled,
                            })
                            .await
                            .unwrap_or(false);
                        let order = storage.send(GetOrder { order_id }).await.ok().flatten();
                        (fulfilled, order)
                    }
                    .into_actor(self)
                    .map(move |(fulfilled, order), act, _ctx| {
                        let Some(order) = order else {
                            act.logger
                                .error(format!("Settled order [{}] not found", order_id));
                            return;
                        };
                        if !fulfilled {
                            act.logger.warn(format!(
                                "Order [{}] settled but could not be fulfilled (status {})",
                                order_id, order.status
                            ));
                            return;
                        }
                        act.logger
                            .info(format!("Order [{}] fulfilled", order_id));
                        if let Some(storage) = &act.storage_address {
                            storage.do_send(RecordFulfilledSale {
                                vendor_id: order.vendor_id.clone(),
                                amount: order.total,
                            });
                        }
                        act.notify(order.customer_id.clone(), order.clone());
                        act.notify(order.vendor_id.clone(), order);
                    }),
                );
            }
            NetworkMessage::PaymentFailed(failed) => {
                let Some(storage) = self.storage_address.clone() else {
                    return;
                };
                let order_id = failed.order_id;
                self.logger.warn(format!(
                    "Billing failed for order [{}]: {}",
                    order_id, failed.reason
                ));
                // El pedido queda aceptado; el restaurante puede reintentar.
                ctx.spawn(
                    async move { storage.send(GetOrder { order_id }).await.ok().flatten() }
                        .into_actor(self)
                        .map(|order, act, _ctx| {
                            if let Some(order) = order {
                                act.notify(order.vendor_id.clone(), order);
                            }
                        }),
                );
            }
            NetworkMessage::ConnectionClosed(closed) => {
                self.logger.warn(format!(
                    "PaymentGateway connection closed ({})",
                    closed.remote_addr
                ));
                self.payment_gateway = None;
                self.gateway_origin_addr = None;
                self.reconnect_gateway(ctx);
            }
            other => {
                self.logger.error(format!(
                    "Unhandled NetworkMessage in OrderService: {:?}",
                    other
                ));
            }
        }
    }
}

impl Handler<AcceptOrder> for OrderService {
    type Result = ();

    fn handle(&mut self, msg: AcceptOrder, ctx: &mut Self::Context) -> Self::Result {
        let Some(storage) = self.storage_address.clone() else {
            return;
        };
        let order_id = msg.order_id;
        let vendor_id = msg.vendor_id;
        ctx.spawn(
            async move {
                let accepted = storage
                    .send(SetOrderStatus {
                        order_id,
                        status: OrderStatus::Accepted,
                    })
                    .await
                    .unwrap_or(false);
                let order = storage.send(GetOrder { order_id }).await.ok().flatten();
                (accepted, order)
            }
            .into_actor(self)
            .map(move |(accepted, order), act, _ctx| {
                let Some(order) = order else {
                    act.logger.warn(format!("Order not found: {}", order_id));
                    return;
                };
                if !accepted {
                    act.logger.warn(format!(
                        "Vendor [{}] cannot accept order [{}] in status {}",
                        vendor_id, order_id, order.status
                    ));
                    return;
                }
                act.notify(order.customer_id.clone(), order);
            }),
        );
    }
}

impl Handler<RejectOrder> for OrderService {
    type Result = ();

    fn handle(&mut self, msg: RejectOrder, ctx: &mut Self::Context) -> Self::Result {
        let Some(storage) = self.storage_address.clone() else {
            return;
        };
        let order_id = msg.order_id;
        self.logger.info(format!(
            "Vendor [{}] rejected order [{}]: {}",
            msg.vendor_id, order_id, msg.reason
        ));
        ctx.spawn(
            async move {
                let cancelled = storage
                    .send(SetOrderStatus {
                        order_id,
                        status: OrderStatus::Cancelled,
                    })
                    .await
                    .unwrap_or(false);
                let order = storage.send(GetOrder { order_id }).await.ok().flatten();
                (cancelled, order)
            }
            .into_actor(self)
            .map(move |(cancelled, order), act, _ctx| {
                act.authorized_transactions.remove(&order_id);
                if let (true, Some(order)) = (cancelled, order) {
                    act.notify(order.customer_id.clone(), order);
                }
            }),
        );
    }
}

/// El restaurante avisa que el pedido está listo: se dispara el cobro.
impl Handler<OrderPrepared> for OrderService {
    type Result = ();

    fn handle(&mut self, msg: OrderPrepared, ctx: &mut Self::Context) -> Self::Result {
        let Some(storage) = self.storage_address.clone() else {
            return;
        };
        let Some(transaction_id) = self.authorized_transactions.get(&msg.order_id).cloned() else {
            self.logger.warn(format!(
                "No authorized transaction for order [{}]",
                msg.order_id
            ));
            return;
        };
        let order_id = msg.order_id;
        let vendor_id = msg.vendor_id;
        ctx.spawn(
            async move { storage.send(GetOrder { order_id }).await.ok().flatten() }
                .into_actor(self)
                .map(move |order, act, _ctx| {
                    let Some(order) = order else {
                        act.logger.warn(format!("Order not found: {}", order_id));
                        return;
                    };
                    if order.vendor_id != vendor_id {
                        act.logger.warn(format!(
                            "Vendor [{}] does not own order [{}]",
                            vendor_id, order_id
                        ));
                        return;
                    }
                    if order.status != OrderStatus::Accepted {
                        act.logger.warn(format!(
                            "Order [{}] is not accepted (status {})",
                            order_id, order.status
                        ));
                        return;
                    }
                    act.logger.info(format!(
                        "Order [{}] prepared, billing {:.2}",
                        order_id, order.total
                    ));
                    act.send_to_gateway(NetworkMessage::BillPayment(BillPayment {
                        origin_addr: act.gateway_origin(),
                        order_id,
                        transaction_id,
                        amount: order.total,
                    }));
                }),
        );
    }
}

/// El comensal cancela un pedido que todavía no fue completado.
impl Handler<CancelOrder> for OrderService {
    type Result = ();

    fn handle(&mut self, msg: CancelOrder, ctx: &mut Self::Context) -> Self::Result {
        let Some(storage) = self.storage_address.clone() else {
            return;
        };
        let order_id = msg.order_id;
        let customer_id = msg.customer_id;
        ctx.spawn(
            cancel_order_in_storage(storage, order_id, customer_id)
                .into_actor(self)
                .map(move |order, act, _ctx| {
                    let Some(order) = order else {
                        act.logger
                            .warn(format!("Could not cancel order [{}]", order_id));
                        return;
                    };
                    act.authorized_transactions.remove(&order_id);
                    act.logger.info(format!("Order [{}] cancelled", order_id));
                    act.notify(order.customer_id.clone(), order.clone());
                    act.notify(order.vendor_id.clone(), order);
                }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::messages::internal_messages::{AddCustomer, AddVendor, SetVendorApproval};
    use common::types::dtos::{CustomerDTO, VendorDTO};

    fn menu() -> HashMap<String, DishDTO> {
        let mut menu = HashMap::new();
        for (name, price, available) in [
            ("Milanesa", 12.5, true),
            ("Empanada", 3.0, true),
            ("Locro", 9.0, false),
        ] {
            menu.insert(
                name.to_string(),
                DishDTO {
                    name: name.to_string(),
                    price,
                    available,
                },
            );
        }
        menu
    }

    fn item(dish_name: &str, quantity: u32) -> OrderRequestItem {
        OrderRequestItem {
            dish_name: dish_name.to_string(),
            quantity,
        }
    }

    fn placed_order(customer_id: &str, vendor_id: &str) -> OrderDTO {
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

    #[test]
    fn line_items_snapshot_menu_prices() {
        let (items, total) =
            build_line_items(&menu(), &[item("Empanada", 4), item("Milanesa", 1)]).unwrap();
        assert_eq!(items.len(), 2);
        let empanadas = items.iter().find(|i| i.dish_name == "Empanada").unwrap();
        assert!((empanadas.unit_price - 3.0).abs() < 1e-9);
        assert!((empanadas.amount - 12.0).abs() < 1e-9);
        assert!((total - 24.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_dishes_off_the_menu() {
        let err = build_line_items(&menu(), &[item("Sushi", 1)]).unwrap_err();
        assert!(err.contains("Sushi"));
    }

    #[test]
    fn rejects_unavailable_dishes() {
        let err = build_line_items(&menu(), &[item("Locro", 1)]).unwrap_err();
        assert!(err.contains("Locro"));
    }

    #[test]
    fn rejects_empty_and_zero_quantity_orders() {
        assert!(build_line_items(&menu(), &[]).is_err());
        assert!(build_line_items(&menu(), &[item("Empanada", 0)]).is_err());
    }

    fn registered_customer(id: &str) -> CustomerDTO {
        CustomerDTO {
            customer_id: id.to_string(),
            position: (-34.60, -58.38),
            current_order: None,
            registered_at: Utc::now(),
        }
    }

    fn pending_vendor(id: &str) -> VendorDTO {
        VendorDTO {
            vendor_id: id.to_string(),
            name: id.to_string(),
            position: (-34.60, -58.38),
            license_ref: format!("licenses/{}.pdf", id),
            approval: ApprovalStatus::Pending,
            menu: menu(),
            orders_taken: 0,
            sales_total: 0.0,
            registered_at: Utc::now(),
        }
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn orders_refused_until_the_restaurant_is_approved() {
        let storage = Storage::new().start();
        storage.do_send(AddVendor {
            vendor: pending_vendor("la_esquina"),
        });
        storage.do_send(AddCustomer {
            customer: registered_customer("ana"),
        });
        let request = PlaceOrder {
            customer_id: "ana".to_string(),
            vendor_id: "la_esquina".to_string(),
            items: vec![item("Empanada", 2)],
        };

        let refused = validate_and_store_order(storage.clone(), request.clone()).await;
        assert!(refused.unwrap_err().contains("not available"));

        assert!(
            storage
                .send(SetVendorApproval {
                    vendor_id: "la_esquina".to_string(),
                    approval: ApprovalStatus::Approved,
                })
                .await
                .unwrap()
        );
        let order = validate_and_store_order(storage, request).await.unwrap();
        assert_eq!(order.status, OrderStatus::Placed);
        assert!((order.total - 6.0).abs() < 1e-9);
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn cancellation_requires_the_owning_customer() {
        let storage = Storage::new().start();
        let order_id = storage
            .send(InsertOrder {
                order: placed_order("ana", "la_esquina"),
            })
            .await
            .unwrap();

        let denied =
            cancel_order_in_storage(storage.clone(), order_id, "bob".to_string()).await;
        assert!(denied.is_none());
        let order = storage.send(GetOrder { order_id }).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Placed);

        let cancelled = cancel_order_in_storage(storage, order_id, "ana".to_string())
            .await
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn settled_orders_cannot_be_cancelled() {
        let storage = Storage::new().start();
        let order_id = storage
            .send(InsertOrder {
                order: placed_order("ana", "la_esquina"),
            })
            .await
            .unwrap();
        storage.do_send(SetOrderStatus {
            order_id,
            status: OrderStatus::Accepted,
        });
        storage.do_send(SetOrderPaymentRef {
            order_id,
            transaction_id: "tx-1".to_string(),
        });
        storage.do_send(SetOrderStatus {
            order_id,
            status: OrderStatus::Fulfilled,
        });

        let denied = cancel_order_in_storage(storage.clone(), order_id, "ana".to_string()).await;
        assert!(denied.is_none());
        let order = storage.send(GetOrder { order_id }).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Fulfilled);
    }
}
