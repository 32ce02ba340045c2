use crate::messages::internal_messages::{RegisterConnection, SetActorsAddresses};
use crate::server_actors::services::dashboard::DashboardService;
use crate::server_actors::services::discovery::DiscoveryService;
use crate::server_actors::services::orders::OrderService;
use crate::server_actors::storage::Storage;
use actix::prelude::*;
use chrono::Utc;
use colored::Color;
use common::bimap::BiMap;
use common::logger::Logger;
use common::messages::admin_messages::{LicenseReviewed, PendingVendors, ReviewLicense};
use common::messages::customer_messages::{
    ListingError, MenuListing, NotifyOrderUpdated, OrderReceipt, OrderRejectedNotice,
    RestaurantListing,
};
use common::messages::internal_messages::{
    AddCustomer, AddVendor, GetCustomer, GetPendingVendors, GetVendor, ReplaceMenu,
    SetVendorApproval, SetVendorDishAvailability, UpsertVendorDish,
};
use common::messages::shared_messages::{NetworkMessage, RegisterUser};
use common::messages::vendor_messages::{DashboardReport, NewOrder};
use common::network::communicator::Communicator;
use common::network::peer_types::PeerType;
use common::types::approval_status::ApprovalStatus;
use common::types::dtos::{CustomerDTO, UserDTO, VendorDTO};
use std::collections::HashMap;
use std::net::SocketAddr;

/// The `Coordinator` actor orchestrates the marketplace: it owns the peer
/// connections and routes every network message to the right service.
///
/// ## Responsibilities
/// - Registers customer, vendor and admin connections.
/// - Registers profiles on first contact and recovers them on reconnection.
/// - Routes catalog, ordering, dashboard and license-review traffic to the
///   `OrderService`, `DiscoveryService`, `DashboardService` and `Storage`.
/// - Delivers service replies back to the right peer.
#[derive(Debug)]
pub struct Coordinator {
    /// Socket address of this server.
    pub my_addr: SocketAddr,
    /// Bi-directional map of user addresses and user IDs.
    pub user_addresses: BiMap<SocketAddr, String>,
    /// Map of remote addresses to their communicators.
    pub communicators: HashMap<SocketAddr, Communicator<Coordinator>>,
    /// Address of the storage actor.
    pub storage: Option<Addr<Storage>>,
    /// Address of the order service actor.
    pub order_service: Option<Addr<OrderService>>,
    /// Address of the discovery service actor.
    pub discovery_service: Option<Addr<DiscoveryService>>,
    /// Address of the dashboard service actor.
    pub dashboard_service: Option<Addr<DashboardService>>,
    /// Logger for coordinator events.
    pub logger: Logger,
}

impl Coordinator {
    /// Asynchronously creates a new `Coordinator`, connecting the order
    /// service to the payment gateway in the process.
    pub async fn new(srv_addr: SocketAddr) -> Self {
        Self {
            my_addr: srv_addr,
            user_addresses: BiMap::new(),
            communicators: HashMap::new(),
            storage: None,
            order_service: Some(OrderService::new().await.start()),
            discovery_service: None,
            dashboard_service: None,
            logger: Logger::new("COORDINATOR", Color::Cyan),
        }
    }

    /// Sends a [`NetworkMessage`] to a user by their user ID.
    pub fn send_network_message(&self, user_id: String, message: NetworkMessage) {
        if let Some(user_addr) = self.user_addresses.get_by_value(&user_id).cloned() {
            if let Some(communicator) = self.communicators.get(&user_addr) {
                communicator.send(message);
            } else {
                self.logger
                    .info(format!("Communicator not found for {}", user_id));
            }
        } else {
            self.logger.info(format!("User ID {} not found", user_id));
        }
    }

    /// Registers a customer, recovering the stored profile if one exists.
    fn register_customer(&mut self, msg: RegisterUser, ctx: &mut Context<Self>) {
        let Some(storage) = self.storage.clone() else {
            self.logger.error("Storage not initialized yet");
            return;
        };
        let user_id = msg.user_id.clone();
        let logger = self.logger.clone();
        ctx.spawn(
            async move {
                match storage
                    .send(GetCustomer {
                        customer_id: msg.user_id.clone(),
                    })
                    .await
                {
                    Ok(Some(customer_dto)) => {
                        NetworkMessage::RecoveredInfo(UserDTO::Customer(customer_dto))
                    }
                    Ok(None) => {
                        storage.do_send(AddCustomer {
                            customer: CustomerDTO {
                                customer_id: msg.user_id.clone(),
                                position: msg.position,
                                current_order: None,
                                registered_at: Utc::now(),
                            },
                        });
                        NetworkMessage::NoRecoveredInfo
                    }
                    Err(e) => {
                        logger.error(format!("Error retrieving customer info: {}", e));
                        NetworkMessage::NoRecoveredInfo
                    }
                }
            }
            .into_actor(self)
            .map(move |network_message, actor, _ctx| {
                actor.send_network_message(user_id, network_message);
            }),
        );
    }

    /// Registers a vendor. First-time vendors start with their license
    /// pending review and an empty menu.
    fn register_vendor(&mut self, msg: RegisterUser, ctx: &mut Context<Self>) {
        let Some(storage) = self.storage.clone() else {
            self.logger.error("Storage not initialized yet");
            return;
        };
        let user_id = msg.user_id.clone();
        let logger = self.logger.clone();
        ctx.spawn(
            async move {
                match storage
                    .send(GetVendor {
                        vendor_id: msg.user_id.clone(),
                    })
                    .await
                {
                    Ok(Some(vendor_dto)) => {
                        NetworkMessage::RecoveredInfo(UserDTO::Vendor(vendor_dto))
                    }
                    Ok(None) => {
                        storage.do_send(AddVendor {
                            vendor: VendorDTO {
                                vendor_id: msg.user_id.clone(),
                                name: msg.display_name.unwrap_or_else(|| msg.user_id.clone()),
                                position: msg.position,
                                license_ref: msg
                                    .license_ref
                                    .unwrap_or_else(|| "unlicensed".to_string()),
                                approval: ApprovalStatus::Pending,
                                menu: HashMap::new(),
                                orders_taken: 0,
                                sales_total: 0.0,
                                registered_at: Utc::now(),
                            },
                        });
                        NetworkMessage::NoRecoveredInfo
                    }
                    Err(e) => {
                        logger.error(format!("Error retrieving vendor info: {}", e));
                        NetworkMessage::NoRecoveredInfo
                    }
                }
            }
            .into_actor(self)
            .map(move |network_message, actor, _ctx| {
                actor.send_network_message(user_id, network_message);
            }),
        );
    }
}

impl Actor for Coordinator {
    type Context = Context<Self>;

    /// Initializes storage and services when the actor starts.
    fn started(&mut self, ctx: &mut Self::Context) {
        let storage_address = Storage::new().start();
        self.storage = Some(storage_address.clone());

        let discovery_service = DiscoveryService::new(storage_address.clone(), ctx.address());
        self.discovery_service = Some(discovery_service.start());

        let dashboard_service = DashboardService::new(storage_address.clone(), ctx.address());
        self.dashboard_service = Some(dashboard_service.start());

        if let Some(order_service) = &self.order_service {
            order_service.do_send(SetActorsAddresses {
                coordinator_addr: ctx.address(),
                storage_addr: storage_address,
            });
        }

        self.logger.info("Coordinator started, services initialized.");
    }
}

/// Handles registration of a new peer connection.
impl Handler<RegisterConnection> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: RegisterConnection, _ctx: &mut Self::Context) -> Self::Result {
        self.logger
            .info(format!("Registered connection from {}", msg.client_addr));
        self.communicators.insert(msg.client_addr, msg.communicator);
    }
}

/// Handles sending a restaurant listing back to a customer.
impl Handler<RestaurantListing> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: RestaurantListing, _ctx: &mut Self::Context) -> Self::Result {
        let customer_id = msg.customer_id.clone();
        self.send_network_message(customer_id, NetworkMessage::RestaurantListing(msg));
    }
}

impl Handler<ListingError> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: ListingError, _ctx: &mut Self::Context) -> Self::Result {
        let customer_id = msg.customer_id.clone();
        self.send_network_message(customer_id, NetworkMessage::ListingError(msg));
    }
}

impl Handler<MenuListing> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: MenuListing, _ctx: &mut Self::Context) -> Self::Result {
        let customer_id = msg.customer_id.clone();
        self.send_network_message(customer_id, NetworkMessage::MenuListing(msg));
    }
}

/// Handles notifications of order updates to peers.
impl Handler<NotifyOrderUpdated> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: NotifyOrderUpdated, _ctx: &mut Self::Context) -> Self::Result {
        let peer_id = msg.peer_id.clone();
        self.send_network_message(peer_id, NetworkMessage::NotifyOrderUpdated(msg));
    }
}

/// Handles new authorized order notifications for vendors.
impl Handler<NewOrder> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: NewOrder, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!(
            "New order [{}] for vendor [{}]",
            msg.order.order_id, msg.order.vendor_id
        ));
        let vendor_id = msg.order.vendor_id.clone();
        self.send_network_message(vendor_id, NetworkMessage::NewOrder(msg));
    }
}

impl Handler<OrderReceipt> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: OrderReceipt, _ctx: &mut Self::Context) -> Self::Result {
        let customer_id = msg.order.customer_id.clone();
        self.send_network_message(customer_id, NetworkMessage::OrderReceipt(msg));
    }
}

impl Handler<OrderRejectedNotice> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: OrderRejectedNotice, _ctx: &mut Self::Context) -> Self::Result {
        let customer_id = msg.customer_id.clone();
        self.send_network_message(customer_id, NetworkMessage::OrderRejectedNotice(msg));
    }
}

impl Handler<DashboardReport> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: DashboardReport, _ctx: &mut Self::Context) -> Self::Result {
        let vendor_id = msg.vendor_id.clone();
        self.send_network_message(vendor_id, NetworkMessage::DashboardReport(msg));
    }
}

/// Handles a license review: persists the outcome and notifies both the
/// admin and the reviewed vendor.
impl Handler<ReviewLicense> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: ReviewLicense, ctx: &mut Self::Context) -> Self::Result {
        let Some(storage) = self.storage.clone() else {
            self.logger.error("Storage not initialized yet");
            return;
        };
        let approval = if msg.approved {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Rejected
        };
        let vendor_id = msg.vendor_id.clone();
        let admin_id = msg.admin_id.clone();
        ctx.spawn(
            async move {
                storage
                    .send(SetVendorApproval {
                        vendor_id: msg.vendor_id.clone(),
                        approval,
                    })
                    .await
                    .unwrap_or(false)
            }
            .into_actor(self)
            .map(move |applied, actor, _ctx| {
                if !applied {
                    actor
                        .logger
                        .warn(format!("License review failed for [{}]", vendor_id));
                    return;
                }
                let reviewed = LicenseReviewed {
                    vendor_id: vendor_id.clone(),
                    approval,
                };
                actor.send_network_message(
                    vendor_id,
                    NetworkMessage::LicenseReviewed(reviewed.clone()),
                );
                actor.send_network_message(admin_id, NetworkMessage::LicenseReviewed(reviewed));
            }),
        );
    }
}

/// Handles all incoming [`NetworkMessage`]s, dispatching them to the appropriate service or handler.
impl Handler<NetworkMessage> for Coordinator {
    type Result = ();

    fn handle(&mut self, msg: NetworkMessage, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            NetworkMessage::RegisterUser(msg_data) => {
                let user_addr = msg_data.origin_addr;
                self.user_addresses
                    .insert(user_addr, msg_data.user_id.clone());
                let Some(peer_type) = self.communicators.get(&user_addr).map(|c| c.peer_type)
                else {
                    self.logger
                        .warn(format!("Communicator not found for {}", user_addr));
                    return;
                };
                match peer_type {
                    PeerType::CustomerType => self.register_customer(msg_data, ctx),
                    PeerType::VendorType => self.register_vendor(msg_data, ctx),
                    PeerType::AdminType => {
                        // Los admins no tienen perfil persistido.
                        self.send_network_message(
                            msg_data.user_id,
                            NetworkMessage::NoRecoveredInfo,
                        );
                    }
                    other => {
                        self.logger.warn(format!(
                            "Received RegisterUser from unexpected peer type: {:?}",
                            other
                        ));
                    }
                }
            }

            // Customer messages
            NetworkMessage::RequestRestaurants(msg_data) => {
                if let Some(service) = &self.discovery_service {
                    service.do_send(msg_data);
                } else {
                    self.logger.warn("DiscoveryService not initialized yet.");
                }
            }
            NetworkMessage::RequestMenu(msg_data) => {
                if let Some(service) = &self.discovery_service {
                    service.do_send(msg_data);
                } else {
                    self.logger.warn("DiscoveryService not initialized yet.");
                }
            }
            NetworkMessage::PlaceOrder(msg_data) => {
                if let Some(order_service) = &self.order_service {
                    order_service.do_send(msg_data);
                } else {
                    self.logger.warn("OrderService not initialized yet.");
                }
            }
            NetworkMessage::CancelOrder(msg_data) => {
                if let Some(order_service) = &self.order_service {
                    order_service.do_send(msg_data);
                } else {
                    self.logger.warn("OrderService not initialized yet.");
                }
            }

            // Vendor messages
            NetworkMessage::PublishMenu(msg_data) => {
                if let Some(storage) = &self.storage {
                    storage.do_send(ReplaceMenu {
                        vendor_id: msg_data.vendor_id,
                        dishes: msg_data.dishes,
                    });
                }
            }
            NetworkMessage::UpsertDish(msg_data) => {
                if let Some(storage) = &self.storage {
                    storage.do_send(UpsertVendorDish {
                        vendor_id: msg_data.vendor_id,
                        dish: msg_data.dish,
                    });
                }
            }
            NetworkMessage::SetDishAvailability(msg_data) => {
                if let Some(storage) = &self.storage {
                    storage.do_send(SetVendorDishAvailability {
                        vendor_id: msg_data.vendor_id,
                        dish_name: msg_data.dish_name,
                        available: msg_data.available,
                    });
                }
            }
            NetworkMessage::AcceptOrder(msg_data) => {
                if let Some(order_service) = &self.order_service {
                    order_service.do_send(msg_data);
                } else {
                    self.logger.warn("OrderService not initialized yet.");
                }
            }
            NetworkMessage::RejectOrder(msg_data) => {
                if let Some(order_service) = &self.order_service {
                    order_service.do_send(msg_data);
                } else {
                    self.logger.warn("OrderService not initialized yet.");
                }
            }
            NetworkMessage::OrderPrepared(msg_data) => {
                if let Some(order_service) = &self.order_service {
                    order_service.do_send(msg_data);
                } else {
                    self.logger.warn("OrderService not initialized yet.");
                }
            }
            NetworkMessage::RequestDashboard(msg_data) => {
                if let Some(service) = &self.dashboard_service {
                    service.do_send(msg_data);
                } else {
                    self.logger.warn("DashboardService not initialized yet.");
                }
            }

            // Admin messages
            NetworkMessage::RequestPendingVendors(msg_data) => {
                let Some(storage) = self.storage.clone() else {
                    self.logger.error("Storage not initialized yet");
                    return;
                };
                let admin_id = msg_data.admin_id;
                ctx.spawn(
                    async move { storage.send(GetPendingVendors).await.unwrap_or_default() }
                        .into_actor(self)
                        .map(move |vendors, actor, _ctx| {
                            actor.send_network_message(
                                admin_id.clone(),
                                NetworkMessage::PendingVendors(PendingVendors {
                                    admin_id,
                                    vendors,
                                }),
                            );
                        }),
                );
            }
            NetworkMessage::ReviewLicense(msg_data) => {
                ctx.address().do_send(msg_data);
            }

            NetworkMessage::ConnectionClosed(msg_data) => {
                let remote_addr = msg_data.remote_addr;
                self.logger
                    .info(format!("Connection closed for {}", remote_addr));
                self.communicators.remove(&remote_addr);
                self.user_addresses.remove_by_key(&remote_addr);
            }

            other => {
                self.logger
                    .info(format!("NetworkMessage descartado: {:?}", other));
            }
        }
    }
}
