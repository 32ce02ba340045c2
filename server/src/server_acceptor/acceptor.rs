use crate::messages::internal_messages::RegisterConnection;
use crate::server_actors::coordinator::Coordinator;
use actix::prelude::*;
use colored::Color;
use common::logger::Logger;
use common::network::communicator::Communicator;
use common::network::peer_types::PeerType;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Acepta conexiones entrantes de comensales, restaurantes y admins.
/// Cada peer se presenta con un byte de tipo antes de hablar JSON.
pub struct Acceptor {
    pub addr: SocketAddr,
    pub coordinator: Addr<Coordinator>,
    pub logger: Arc<Logger>,
}

impl Acceptor {
    pub fn new(addr: SocketAddr, coordinator: Addr<Coordinator>) -> Self {
        Self {
            addr,
            coordinator,
            logger: Arc::new(Logger::new("ACCEPTOR", Color::Cyan)),
        }
    }

    pub async fn start(&self) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        self.logger
            .info(format!("Acceptor started, listening on {}", self.addr));
        self.accept_connections(listener).await
    }

    async fn accept_connections(&self, listener: tokio::net::TcpListener) -> std::io::Result<()> {
        loop {
            match listener.accept().await {
                Ok((mut stream, client_addr)) => {
                    let mut peer_type_byte = [0u8; 1];
                    match stream.read_exact(&mut peer_type_byte).await {
                        Ok(_) => {
                            let Some(peer_type) = PeerType::from_u8(peer_type_byte[0]) else {
                                self.logger.warn(format!(
                                    "Unknown peer type byte from {}",
                                    client_addr
                                ));
                                continue;
                            };
                            self.logger.info(format!(
                                "Accepted connection from {} as {:?}",
                                client_addr, peer_type
                            ));
                            let communicator =
                                Communicator::new(stream, self.coordinator.clone(), peer_type);
                            self.coordinator.do_send(RegisterConnection {
                                client_addr,
                                communicator,
                            });
                        }
                        Err(e) => {
                            self.logger.warn(format!(
                                "Error reading peer type from {}: {}",
                                client_addr, e
                            ));
                        }
                    }
                }
                Err(e) => {
                    self.logger
                        .warn(format!("Failed to accept connection: {}", e));
                }
            }
        }
    }
}
