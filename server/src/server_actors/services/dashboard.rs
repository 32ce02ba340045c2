use crate::server_actors::coordinator::Coordinator;
use crate::server_actors::storage::Storage;
use actix::prelude::*;
use chrono::{DateTime, Datelike, Utc};
use colored::Color;
use common::constants::RECENT_ORDERS_LIMIT;
use common::logger::Logger;
use common::messages::internal_messages::GetVendorOrders;
use common::messages::vendor_messages::{DashboardReport, RequestDashboard};
use common::types::dashboard::DashboardSummary;
use common::types::dtos::OrderDTO;
use common::types::order_status::OrderStatus;

/// The `DashboardService` actor builds the business summary a vendor sees:
/// order counts, revenue figures and the most recent orders.
pub struct DashboardService {
    pub storage_addr: Addr<Storage>,
    pub coordinator_addr: Addr<Coordinator>,
    pub logger: Logger,
}

impl DashboardService {
    pub fn new(storage_addr: Addr<Storage>, coordinator_addr: Addr<Coordinator>) -> Self {
        let logger = Logger::new("Dashboard Service", Color::Yellow);
        DashboardService {
            storage_addr,
            coordinator_addr,
            logger,
        }
    }
}

/// Arma el resumen de negocio de un restaurante a partir de sus pedidos.
///
/// Solo los pedidos completados facturan; `current_month_revenue` cuenta
/// los del mes calendario de `now`.
pub fn summarize(mut orders: Vec<OrderDTO>, now: DateTime<Utc>) -> DashboardSummary {
    let orders_count = orders.len() as u64;
    let total_revenue: f64 = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Fulfilled)
        .map(|o| o.total)
        .sum();
    let current_month_revenue: f64 = orders
        .iter()
        .filter(|o| {
            o.status == OrderStatus::Fulfilled
                && o.created_at.year() == now.year()
                && o.created_at.month() == now.month()
        })
        .map(|o| o.total)
        .sum();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders.truncate(RECENT_ORDERS_LIMIT);
    DashboardSummary {
        orders_count,
        total_revenue,
        current_month_revenue,
        recent_orders: orders,
    }
}

impl Actor for DashboardService {
    type Context = Context<Self>;
}

impl Handler<RequestDashboard> for DashboardService {
    type Result = ();

    fn handle(&mut self, msg: RequestDashboard, ctx: &mut Self::Context) -> Self::Result {
        let coordinator_addr = self.coordinator_addr.clone();
        let logger = self.logger.clone();
        let vendor_id = msg.vendor_id;

        self.storage_addr
            .send(GetVendorOrders {
                vendor_id: vendor_id.clone(),
            })
            .into_actor(self)
            .map(move |res, _act, _ctx| match res {
                Ok(orders) => {
                    logger.info(format!(
                        "Dashboard for vendor [{}]: {} orders",
                        vendor_id,
                        orders.len()
                    ));
                    coordinator_addr.do_send(DashboardReport {
                        vendor_id,
                        summary: summarize(orders, Utc::now()),
                    });
                }
                Err(_) => {
                    logger.error("Error retrieving vendor orders from storage.");
                }
            })
            .wait(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(order_id: u64, total: f64, status: OrderStatus, created_at: DateTime<Utc>) -> OrderDTO {
        OrderDTO {
            order_id,
            customer_id: "ana".to_string(),
            vendor_id: "la_esquina".to_string(),
            items: Vec::new(),
            total,
            status,
            payment_ref: None,
            created_at,
        }
    }

    #[test]
    fn only_fulfilled_orders_count_as_revenue() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let summary = summarize(
            vec![
                order(1, 20.0, OrderStatus::Fulfilled, now),
                order(2, 50.0, OrderStatus::Cancelled, now),
                order(3, 10.0, OrderStatus::Accepted, now),
            ],
            now,
        );
        assert_eq!(summary.orders_count, 3);
        assert!((summary.total_revenue - 20.0).abs() < 1e-9);
    }

    #[test]
    fn current_month_revenue_splits_by_calendar_month() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let last_month = Utc.with_ymd_and_hms(2026, 7, 31, 23, 59, 0).unwrap();
        let summary = summarize(
            vec![
                order(1, 20.0, OrderStatus::Fulfilled, now),
                order(2, 35.0, OrderStatus::Fulfilled, last_month),
            ],
            now,
        );
        assert!((summary.total_revenue - 55.0).abs() < 1e-9);
        assert!((summary.current_month_revenue - 20.0).abs() < 1e-9);
    }

    #[test]
    fn recent_orders_are_newest_first_and_capped() {
        let base = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let orders: Vec<OrderDTO> = (0..15)
            .map(|i| {
                order(
                    i,
                    5.0,
                    OrderStatus::Fulfilled,
                    base + chrono::Duration::hours(i as i64),
                )
            })
            .collect();
        let summary = summarize(orders, base + chrono::Duration::days(20));
        assert_eq!(summary.recent_orders.len(), RECENT_ORDERS_LIMIT);
        assert_eq!(summary.recent_orders[0].order_id, 14);
        assert_eq!(summary.recent_orders.last().unwrap().order_id, 5);
    }
}
