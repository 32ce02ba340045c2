use actix::prelude::*;
use common::constants::{SERVER_IP_ADDRESS, SERVER_PORT};
use std::env;
use std::net::SocketAddr;
use tokio::signal::ctrl_c;

mod admin_actors;
mod internal_messages;

use admin_actors::admin::Admin;

#[actix::main]
async fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let admin_id = args.get(1).cloned().unwrap_or_else(|| "admin".to_string());

    let servers: Vec<SocketAddr> = vec![
        format!("{}:{}", SERVER_IP_ADDRESS, SERVER_PORT)
            .parse()
            .expect("Dirección IP inválida"),
    ];

    let admin = Admin::new(servers, admin_id).await;
    let _addr = admin.start();

    tokio::select! {
        _ = ctrl_c() => {
            println!("Ctrl-C recibido, apagando...");
        }
    }

    Ok(())
}
