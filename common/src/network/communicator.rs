use crate::messages::shared_messages::NetworkMessage;
use crate::network::peer_types::PeerType;
use crate::network::tcp_receiver::TCPReceiver;
use crate::network::tcp_sender::TCPSender;
use actix::prelude::*;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::split;
use tokio::net::TcpStream;

/// Owns both halves of a peer connection: a [`TCPSender`] for outgoing
/// messages and a [`TCPReceiver`] that forwards incoming ones to the
/// destination actor.
#[derive(Debug)]
pub struct Communicator<A>
where
    A: Actor<Context = Context<A>> + Handler<NetworkMessage>,
{
    pub sender: Option<Arc<Addr<TCPSender>>>,
    pub receiver: Option<Arc<Addr<TCPReceiver<A>>>>,
    pub remote_addr: SocketAddr,
    pub local_addr: SocketAddr,
    pub peer_type: PeerType,
}

impl<A> Communicator<A>
where
    A: Actor<Context = Context<A>> + Handler<NetworkMessage>,
{
    pub fn new(tcp_stream: TcpStream, destination_address: Addr<A>, peer_type: PeerType) -> Self {
        let remote_addr = tcp_stream
            .peer_addr()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 0)));
        let local_addr = tcp_stream
            .local_addr()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 0)));
        let (read_half, write_half) = split(tcp_stream);
        Self {
            sender: Some(Arc::new(TCPSender::new(write_half).start())),
            receiver: Some(Arc::new(
                TCPReceiver::new(read_half, remote_addr, destination_address).start(),
            )),
            remote_addr,
            local_addr,
            peer_type,
        }
    }

    /// Queues a message on the sending half, if it is still alive.
    pub fn send(&self, msg: NetworkMessage) {
        if let Some(sender) = &self.sender {
            sender.do_send(msg);
        }
    }
}
