use actix::prelude::*;
use common::constants::{SERVER_IP_ADDRESS, SERVER_PORT};
use common::types::ranking::RankingKey;
use common::utils::random_position;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use tokio::signal::ctrl_c;

mod customer_actors;

use customer_actors::customer::Customer;

#[actix::main]
async fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Uso: {} <customer_id> [popularity|sales|proximity]",
            args[0]
        );
        std::process::exit(1);
    }

    let customer_id = args[1].clone();
    let sort = args
        .get(2)
        .and_then(|s| RankingKey::from_str(s).ok())
        .unwrap_or(RankingKey::Proximity);

    let servers: Vec<SocketAddr> = vec![
        format!("{}:{}", SERVER_IP_ADDRESS, SERVER_PORT)
            .parse()
            .expect("Dirección IP inválida"),
    ];

    let position = random_position();

    println!(
        "Creando comensal con ID: {}, posición: {:?}, orden: {}",
        customer_id, position, sort
    );

    let customer = Customer::new(servers, customer_id, position, sort).await;
    let _addr = customer.start();

    tokio::select! {
        _ = ctrl_c() => {
            println!("Ctrl-C recibido, apagando...");
        }
    }

    Ok(())
}
