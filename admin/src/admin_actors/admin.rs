use crate::admin_actors::ui_handler::UIHandler;
use crate::internal_messages::messages::{RefreshPending, ReviewPending, SubmitReview};
use actix::fut::wrap_future;
use actix::prelude::*;
use colored::Color;
use common::logger::Logger;
use common::messages::admin_messages::{RequestPendingVendors, ReviewLicense};
use common::messages::shared_messages::{ConnectionClosed, NetworkMessage, RegisterUser};
use common::network::communicator::Communicator;
use common::network::connections::connect_some;
use common::network::peer_types::PeerType;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;

/// Back-office actor: pide la cola de licencias pendientes y envía los
/// veredictos que carga el operador.
pub struct Admin {
    /// Identificador del operador del marketplace.
    pub admin_id: String,
    /// Canal de envío hacia el actor `UIHandler`.
    pub ui_handler: Option<Addr<UIHandler>>,
    pub communicator: Option<Communicator<Admin>>,
    pub pending_stream: Option<TcpStream>,
    pub logger: Logger,
    pub servers: Vec<SocketAddr>,
}

impl Admin {
    pub async fn new(servers: Vec<SocketAddr>, admin_id: String) -> Self {
        let logger = Logger::new(format!("Admin {}", &admin_id), Color::BrightYellow);
        let pending_stream = connect_some(servers.clone(), PeerType::AdminType).await;

        if pending_stream.is_none() {
            logger.error(format!(
                "Failed to connect to any server from the list: {:?}",
                servers
            ));
            std::process::exit(1);
        }

        Self {
            admin_id,
            ui_handler: None,
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
            user_id: self.admin_id.clone(),
            position: (0.0, 0.0),
            display_name: None,
            license_ref: None,
        }));
    }
}

pub async fn reconnect(servers: Vec<SocketAddr>) -> Option<TcpStream> {
    connect_some(servers, PeerType::AdminType).await
}

impl Actor for Admin {
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
        self.ui_handler = Some(UIHandler::new(ctx.address(), self.logger.clone()).start());
        self.register();
    }
}

impl Handler<RefreshPending> for Admin {
    type Result = ();

    fn handle(&mut self, _msg: RefreshPending, _ctx: &mut Self::Context) -> Self::Result {
        self.send_network_message(NetworkMessage::RequestPendingVendors(
            RequestPendingVendors {
                admin_id: self.admin_id.clone(),
            },
        ));
    }
}

impl Handler<SubmitReview> for Admin {
    type Result = ();

    fn handle(&mut self, msg: SubmitReview, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!(
            "Submitting review for [{}]: {}",
            msg.vendor_id,
            if msg.approved { "approve" } else { "deny" }
        ));
        self.send_network_message(NetworkMessage::ReviewLicense(ReviewLicense {
            admin_id: self.admin_id.clone(),
            vendor_id: msg.vendor_id,
            approved: msg.approved,
        }));
    }
}

impl Handler<ConnectionClosed> for Admin {
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

impl Handler<NetworkMessage> for Admin {
    type Result = ();

    fn handle(&mut self, msg: NetworkMessage, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            NetworkMessage::NoRecoveredInfo => {
                ctx.address().do_send(RefreshPending);
            }
            NetworkMessage::PendingVendors(msg_data) => {
                if msg_data.vendors.is_empty() {
                    self.logger
                        .info("Review queue is empty, polling again shortly...");
                    ctx.run_later(Duration::from_secs(5), |_act, ctx| {
                        ctx.address().do_send(RefreshPending);
                    });
                    return;
                }
                if let Some(ui_handler) = &self.ui_handler {
                    ui_handler.do_send(ReviewPending {
                        vendors: msg_data.vendors,
                    });
                }
            }
            NetworkMessage::LicenseReviewed(msg_data) => {
                self.logger.info(format!(
                    "License of [{}] is now: {}",
                    msg_data.vendor_id, msg_data.approval
                ));
                // Volvemos a la cola para seguir revisando.
                ctx.address().do_send(RefreshPending);
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
