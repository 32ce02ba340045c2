use crate::types::dtos::OrderDTO;
use serde::{Deserialize, Serialize};

/// Resumen de negocio que el servidor arma para un restaurante.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Cantidad total de pedidos recibidos (en cualquier estado).
    pub orders_count: u64,
    /// Facturación acumulada por pedidos completados.
    pub total_revenue: f64,
    /// Facturación por pedidos completados del mes calendario en curso.
    pub current_month_revenue: f64,
    /// Últimos pedidos, del más nuevo al más viejo.
    pub recent_orders: Vec<OrderDTO>,
}
