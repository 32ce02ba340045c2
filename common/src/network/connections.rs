use crate::network::peer_types::PeerType;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Intenta conectarse a un solo `SocketAddr` y devuelve un `Option` con el `TcpStream` si tuvo éxito.
pub async fn connect(server_addr: SocketAddr) -> Option<TcpStream> {
    match TcpStream::connect(server_addr).await {
        Ok(stream) => Some(stream),
        Err(_) => None,
    }
}

/// Se conecta a `server_addr` y se presenta escribiendo el byte de tipo de
/// peer antes de cualquier otro tráfico. El acceptor del otro lado lee ese
/// byte para saber con quién habla.
pub async fn try_to_connect(server_addr: SocketAddr, peer_type: PeerType) -> Option<TcpStream> {
    let mut stream = connect(server_addr).await?;
    if stream.write_u8(peer_type.to_u8()).await.is_err() {
        return None;
    }
    if stream.flush().await.is_err() {
        return None;
    }
    Some(stream)
}

/// Intenta conectarse a los servidores en orden y devuelve el primer stream
/// abierto exitosamente, ya presentado con el byte de tipo de peer.
pub async fn connect_some(servers: Vec<SocketAddr>, peer_type: PeerType) -> Option<TcpStream> {
    for addr in servers {
        if let Some(stream) = try_to_connect(addr, peer_type).await {
            println!("Connected to {}", addr);
            return Some(stream);
        }
        eprintln!("Failed to connect to {}", addr);
    }
    None
}
