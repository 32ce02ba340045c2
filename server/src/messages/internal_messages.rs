use crate::server_actors::coordinator::Coordinator;
use crate::server_actors::storage::Storage;
use actix::prelude::*;
use common::network::communicator::Communicator;
use std::net::SocketAddr;

/////////////////////////////////////////////////////////////////////
// Mensajes del Aceptador al Coordinator
/////////////////////////////////////////////////////////////////////
#[derive(Message, Debug)]
#[rtype(result = "()")]
pub struct RegisterConnection {
    pub client_addr: SocketAddr,
    pub communicator: Communicator<Coordinator>,
}

/////////////////////////////////////////////////////////////////////
// Mensajes del Coordinator a los servicios
/////////////////////////////////////////////////////////////////////
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SetActorsAddresses {
    pub coordinator_addr: Addr<Coordinator>,
    pub storage_addr: Addr<Storage>,
}
