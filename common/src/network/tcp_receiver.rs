use crate::messages::shared_messages::{ConnectionClosed, NetworkMessage};
use actix::dev::ToEnvelope;
use actix::prelude::*;
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, BufReader, ReadHalf};
use tokio::net::TcpStream;

/// Reads newline-delimited JSON from the read half of a TCP stream and
/// forwards each decoded [`NetworkMessage`] to a destination actor.
///
/// When the remote end hangs up, the destination actor receives a
/// [`ConnectionClosed`] message with the peer's address.
pub struct TCPReceiver<A: Actor + Handler<NetworkMessage>> {
    remote_addr: SocketAddr,
    reader: Option<BufReader<ReadHalf<TcpStream>>>,
    destination: Addr<A>,
}

impl<A> TCPReceiver<A>
where
    A: Actor + Handler<NetworkMessage>,
{
    pub fn new(reader: ReadHalf<TcpStream>, remote_addr: SocketAddr, destination: Addr<A>) -> Self {
        Self {
            remote_addr,
            reader: Some(BufReader::new(reader)),
            destination,
        }
    }
}

impl<A> Actor for TCPReceiver<A>
where
    A: Actor + Handler<NetworkMessage> + 'static,
    A::Context: ToEnvelope<A, NetworkMessage>,
{
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let addr = self.destination.clone();
        let remote_addr = self.remote_addr;
        let Some(reader) = self.reader.take() else {
            return;
        };

        ctx.spawn(
            async move {
                let mut lines = reader.lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    match serde_json::from_str::<NetworkMessage>(&line) {
                        Ok(msg) => addr.do_send(msg),
                        Err(e) => {
                            // Una línea corrupta no tira abajo la conexión.
                            eprintln!("[TCPReceiver] Undecodable line from {}: {}", remote_addr, e);
                        }
                    }
                }
                addr.do_send(NetworkMessage::ConnectionClosed(ConnectionClosed {
                    remote_addr,
                }));
            }
            .into_actor(self),
        );
    }
}
