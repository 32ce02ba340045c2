use serde::{Deserialize, Serialize};

/// Entrada del listado de restaurantes que recibe un comensal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorListing {
    pub vendor_id: String,
    pub name: String,
    pub position: (f64, f64),
    /// Pedidos completados (popularidad).
    pub orders_taken: u64,
    /// Total facturado por pedidos completados.
    pub sales_total: f64,
    /// Distancia al comensal que pidió el listado, en km.
    pub distance_km: f64,
}
