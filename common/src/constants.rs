pub const SERVER_IP_ADDRESS: &str = "127.0.0.1";
pub const SERVER_PORT: u16 = 8080;
pub const PAYMENT_GATEWAY_PORT: u16 = 9090;

/// Probabilidad de que el gateway autorice un pago.
pub const PAYMENT_SUCCESS_PROBABILITY: f32 = 0.9;
/// Probabilidad de que un restaurante acepte un pedido autorizado.
pub const VENDOR_ACCEPT_PROBABILITY: f32 = 0.85;

/// Radio máximo (en km) para el listado por cercanía.
pub const NEARBY_RADIUS_KM: f64 = 15.0;
/// Cantidad de pedidos recientes incluidos en el dashboard.
pub const RECENT_ORDERS_LIMIT: usize = 10;

// Centro y dispersión de las posiciones aleatorias (Buenos Aires).
pub const BASE_LATITUDE: f64 = -34.6037;
pub const BASE_LONGITUDE: f64 = -58.3816;
pub const COORDINATE_SPAN_DEG: f64 = 0.12;

/// Tiempo simulado de preparación de un pedido, en segundos.
pub const PREPARATION_SECS: u64 = 3;
pub const TIMEOUT_SECONDS: u64 = 2;
