pub mod bimap;
pub mod constants;
pub mod logger;
pub mod messages;
pub mod network;
pub mod types;
pub mod utils;
