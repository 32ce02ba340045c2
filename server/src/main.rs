use actix::prelude::*;
use common::constants::{SERVER_IP_ADDRESS, SERVER_PORT};
use std::net::SocketAddr;
mod messages;
mod server_acceptor;
mod server_actors;
use crate::server_acceptor::acceptor::Acceptor;
use crate::server_actors::coordinator::Coordinator;

#[actix::main]
async fn main() -> std::io::Result<()> {
    let addr: SocketAddr = format!("{}:{}", SERVER_IP_ADDRESS, SERVER_PORT)
        .parse()
        .expect("Error al parsear la dirección IP");

    let coordinator = Coordinator::new(addr).await.start();

    let acceptor = Acceptor::new(addr, coordinator);
    acceptor.start().await?;

    Ok(())
}
