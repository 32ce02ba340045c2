use actix::fut::wrap_future;
use actix::prelude::*;
use colored::Color;
use common::logger::Logger;
use common::messages::customer_messages::{
    OrderRequestItem, PlaceOrder, RequestMenu, RequestRestaurants,
};
use common::messages::shared_messages::{ConnectionClosed, NetworkMessage, RegisterUser};
use common::network::communicator::Communicator;
use common::network::connections::connect_some;
use common::network::peer_types::PeerType;
use common::types::dtos::{DishDTO, OrderDTO, UserDTO};
use common::types::ranking::RankingKey;
use rand::Rng;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;

/// Mensaje interno para volver a pedir el listado de restaurantes.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct BrowseRestaurants;

pub struct Customer {
    /// Identificador único del comensal.
    pub customer_id: String,
    /// Posición actual del comensal como (latitud, longitud).
    pub position: (f64, f64),
    /// Criterio de orden elegido para el listado de restaurantes.
    pub sort: RankingKey,
    /// Pedido en curso, si hay uno.
    pub current_order: Option<OrderDTO>,
    pub communicator: Option<Communicator<Customer>>,
    pub pending_stream: Option<TcpStream>,
    pub logger: Logger,
    pub servers: Vec<SocketAddr>,
}

impl Customer {
    pub async fn new(
        servers: Vec<SocketAddr>,
        customer_id: String,
        position: (f64, f64),
        sort: RankingKey,
    ) -> Self {
        let logger = Logger::new(format!("Customer {}", &customer_id), Color::BrightBlue);
        logger.info(format!("Welcome, {}!", customer_id));
        let pending_stream = connect_some(servers.clone(), PeerType::CustomerType).await;

        if pending_stream.is_none() {
            logger.error(format!(
                "Failed to connect to any server from the list: {:?}",
                servers
            ));
            std::process::exit(1);
        }

        Self {
            customer_id,
            position,
            sort,
            current_order: None,
            communicator: None,
            pending_stream,
            logger,
            servers,
        }
    }

    pub fn send_network_message(&self, message: NetworkMessage) {
        if let Some(communicator) = &self.communicator {
            communicator.send(message);
        } else {
            self.logger.error("Communicator not found!");
        }
    }

    pub fn register(&self) {
        let local_addr = self
            .communicator
            .as_ref()
            .map(|c| c.local_addr)
            .expect("Socket address not initialized");
        self.send_network_message(NetworkMessage::RegisterUser(RegisterUser {
            origin_addr: local_addr,
            user_id: self.customer_id.clone(),
            position: self.position,
            display_name: None,
            license_ref: None,
        }));
    }

    /// Elige hasta dos platos del menú, con cantidades al azar.
    fn pick_items(&self, dishes: &[DishDTO]) -> Vec<OrderRequestItem> {
        let mut rng = rand::thread_rng();
        let how_many = rng.gen_range(1..=dishes.len().min(2));
        dishes
            .iter()
            .take(how_many)
            .map(|dish| OrderRequestItem {
                dish_name: dish.name.clone(),
                quantity: rng.gen_range(1..=3),
            })
            .collect()
    }
}

pub async fn reconnect(servers: Vec<SocketAddr>) -> Option<TcpStream> {
    connect_some(servers, PeerType::CustomerType).await
}

impl Actor for Customer {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let communicator = Communicator::new(
            self.pending_stream
                .take()
                .expect("Pending stream should be set"),
            ctx.address(),
            PeerType::CoordinatorType,
        );
        self.communicator = Some(communicator);
        self.register();
    }
}

impl Handler<BrowseRestaurants> for Customer {
    type Result = ();

    fn handle(&mut self, _msg: BrowseRestaurants, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!(
            "Browsing restaurants sorted by {}...",
            self.sort
        ));
        self.send_network_message(NetworkMessage::RequestRestaurants(RequestRestaurants {
            customer_id: self.customer_id.clone(),
            position: self.position,
            sort: self.sort,
        }));
    }
}

impl Handler<ConnectionClosed> for Customer {
    type Result = ();

    fn handle(&mut self, msg: ConnectionClosed, ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!(
            "Connection closed with address: {}",
            msg.remote_addr
        ));
        let servers = self.servers.clone();
        let fut = wrap_future::<_, Self>(async move { reconnect(servers).await }).map(
            |new_stream, actor: &mut Self, ctx| match new_stream {
                Some(stream) => {
                    actor.communicator = Some(Communicator::new(
                        stream,
                        ctx.address(),
                        PeerType::CoordinatorType,
                    ));
                    actor.register();
                }
                None => {
                    actor.logger.error("No se pudo reconectar. Cerrando actor.");
                    ctx.stop();
                }
            },
        );
        ctx.spawn(fut);
    }
}

impl Handler<NetworkMessage> for Customer {
    type Result = ();

    fn handle(&mut self, msg: NetworkMessage, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            NetworkMessage::RecoveredInfo(UserDTO::Customer(customer_dto)) => {
                if customer_dto.customer_id == self.customer_id {
                    self.logger.info(format!(
                        "Recovered info for Customer ID={}, updating local state...",
                        customer_dto.customer_id
                    ));
                    self.position = customer_dto.position;
                    // Un pedido ya terminado no bloquea una nueva compra.
                    self.current_order = customer_dto
                        .current_order
                        .filter(|order| !order.status.is_terminal());
                    if self.current_order.is_none() {
                        ctx.address().do_send(BrowseRestaurants);
                    }
                } else {
                    self.logger.warn(format!(
                        "Received recovered info for a different customer ({}), ignoring",
                        customer_dto.customer_id
                    ));
                }
            }
            NetworkMessage::RecoveredInfo(other) => {
                self.logger.warn(format!(
                    "Received recovered info of type {:?}, but I'm a Customer. Ignoring.",
                    other
                ));
            }
            NetworkMessage::NoRecoveredInfo => {
                ctx.address().do_send(BrowseRestaurants);
            }
            NetworkMessage::RestaurantListing(msg_data) => {
                if msg_data.restaurants.is_empty() {
                    self.logger
                        .warn("No restaurants available yet, retrying shortly...");
                    ctx.run_later(Duration::from_secs(5), |_act, ctx| {
                        ctx.address().do_send(BrowseRestaurants);
                    });
                    return;
                }
                for (i, listing) in msg_data.restaurants.iter().enumerate() {
                    self.logger.info(format!(
                        "{}: {} ({:.1} km, {} orders, {:.2} in sales)",
                        i + 1,
                        listing.name,
                        listing.distance_km,
                        listing.orders_taken,
                        listing.sales_total
                    ));
                }
                // El primero del ranking es el elegido.
                let chosen = &msg_data.restaurants[0];
                self.logger
                    .info(format!("Requesting menu from {}...", chosen.name));
                self.send_network_message(NetworkMessage::RequestMenu(RequestMenu {
                    customer_id: self.customer_id.clone(),
                    vendor_id: chosen.vendor_id.clone(),
                }));
            }
            NetworkMessage::ListingError(msg_data) => {
                self.logger
                    .warn(format!("Could not browse restaurants: {}", msg_data.reason));
                ctx.run_later(Duration::from_secs(5), |_act, ctx| {
                    ctx.address().do_send(BrowseRestaurants);
                });
            }
            NetworkMessage::MenuListing(msg_data) => {
                if msg_data.dishes.is_empty() {
                    self.logger.warn(format!(
                        "{} has no available dishes, browsing again...",
                        msg_data.vendor_id
                    ));
                    ctx.address().do_send(BrowseRestaurants);
                    return;
                }
                let items = self.pick_items(&msg_data.dishes);
                self.logger.info(format!(
                    "Placing order at {} with {} item(s)",
                    msg_data.vendor_id,
                    items.len()
                ));
                self.send_network_message(NetworkMessage::PlaceOrder(PlaceOrder {
                    customer_id: self.customer_id.clone(),
                    vendor_id: msg_data.vendor_id,
                    items,
                }));
            }
            NetworkMessage::OrderReceipt(msg_data) => {
                let order = msg_data.order;
                self.logger.info(format!(
                    "Order [{}] placed, total {:.2}. Payment authorized.",
                    order.order_id, order.total
                ));
                self.current_order = Some(order);
            }
            NetworkMessage::OrderRejectedNotice(msg_data) => {
                self.logger.warn(format!(
                    "Order at {} was rejected: {}",
                    msg_data.vendor_id, msg_data.reason
                ));
                self.current_order = None;
                ctx.run_later(Duration::from_secs(5), |_act, ctx| {
                    ctx.address().do_send(BrowseRestaurants);
                });
            }
            NetworkMessage::NotifyOrderUpdated(msg_data) => {
                let order = msg_data.order;
                self.logger.info(format!(
                    "Order [{}] is now {:?}",
                    order.order_id, order.status
                ));
                if order.status.is_terminal() {
                    self.current_order = None;
                } else {
                    self.current_order = Some(order);
                }
            }
            NetworkMessage::ConnectionClosed(msg_data) => {
                if let Some(communicator) = &self.communicator {
                    if communicator.remote_addr == msg_data.remote_addr {
                        self.communicator = None;
                        self.logger.warn("Reconnecting to the server...");
                        ctx.address().do_send(msg_data);
                    }
                }
            }
            other => {
                self.logger.info(format!(
                    "NetworkMessage received but not handled: {:?}",
                    other
                ));
            }
        }
    }
}
