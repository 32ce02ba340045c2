use crate::server_actors::coordinator::Coordinator;
use crate::server_actors::storage::Storage;
use actix::prelude::*;
use colored::Color;
use common::constants::NEARBY_RADIUS_KM;
use common::logger::Logger;
use common::messages::customer_messages::{
    ListingError, MenuListing, RequestMenu, RequestRestaurants, RestaurantListing,
};
use common::messages::internal_messages::{GetVendor, GetVendors};
use common::types::approval_status::ApprovalStatus;
use common::types::dtos::VendorDTO;
use common::types::ranking::RankingKey;
use common::types::vendor_listing::VendorListing;
use common::utils::distance_km;
use std::cmp::Ordering;

/// The `DiscoveryService` actor answers the customer-facing catalog queries:
/// ranked restaurant listings and published menus.
///
/// ## Responsibilities:
/// - Retrieve vendors from the storage and hide the unapproved ones.
/// - Rank the visible vendors by popularity, sales or proximity.
/// - Serve the available dishes of a vendor's menu.
pub struct DiscoveryService {
    /// The address of the Storage actor to fetch vendors from.
    pub storage_addr: Addr<Storage>,
    /// The address of the Coordinator actor to send replies through.
    pub coordinator_addr: Addr<Coordinator>,
    /// Logger instance for events
    pub logger: Logger,
}

impl DiscoveryService {
    pub fn new(storage_addr: Addr<Storage>, coordinator_addr: Addr<Coordinator>) -> Self {
        let logger = Logger::new("Discovery Service", Color::Green);
        DiscoveryService {
            storage_addr,
            coordinator_addr,
            logger,
        }
    }
}

/// Ranks the vendors visible to a customer. Unapproved vendors never appear.
///
/// Empates se resuelven por ID de restaurante para que el listado sea
/// estable entre consultas.
pub fn rank_vendors(
    vendors: Vec<VendorDTO>,
    position: (f64, f64),
    sort: RankingKey,
) -> Vec<VendorListing> {
    let mut listings: Vec<VendorListing> = vendors
        .into_iter()
        .filter(|v| v.approval == ApprovalStatus::Approved)
        .map(|v| VendorListing {
            distance_km: distance_km(v.position, position),
            vendor_id: v.vendor_id,
            name: v.name,
            position: v.position,
            orders_taken: v.orders_taken,
            sales_total: v.sales_total,
        })
        .collect();

    match sort {
        RankingKey::Popularity => {
            listings.sort_by(|a, b| {
                b.orders_taken
                    .cmp(&a.orders_taken)
                    .then_with(|| a.vendor_id.cmp(&b.vendor_id))
            });
        }
        RankingKey::Sales => {
            listings.sort_by(|a, b| {
                b.sales_total
                    .partial_cmp(&a.sales_total)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.vendor_id.cmp(&b.vendor_id))
            });
        }
        RankingKey::Proximity => {
            let nearby: Vec<VendorListing> = listings
                .iter()
                .filter(|l| l.distance_km <= NEARBY_RADIUS_KM)
                .cloned()
                .collect();
            // Si no hay nada dentro del radio, se devuelve todo igual,
            // ordenado por distancia.
            if !nearby.is_empty() {
                listings = nearby;
            }
            listings.sort_by(|a, b| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.vendor_id.cmp(&b.vendor_id))
            });
        }
    }
    listings
}

/// Decide la respuesta a un pedido de carta. Solo los restaurantes
/// aprobados exponen la suya.
fn menu_reply(
    customer_id: String,
    vendor_id: String,
    vendor: Option<VendorDTO>,
) -> Result<MenuListing, ListingError> {
    match vendor {
        Some(vendor) if vendor.approval == ApprovalStatus::Approved => Ok(MenuListing {
            customer_id,
            vendor_id,
            dishes: vendor.listed_dishes(),
        }),
        _ => Err(ListingError {
            customer_id,
            reason: format!("Restaurant [{}] is not available", vendor_id),
        }),
    }
}

impl Actor for DiscoveryService {
    type Context = Context<Self>;
}

impl Handler<RequestRestaurants> for DiscoveryService {
    type Result = ();

    /// Handles the `RequestRestaurants` message by retrieving all vendors
    /// from storage, ranking the approved ones, and sending the listing back
    /// through the coordinator.
    fn handle(&mut self, msg: RequestRestaurants, ctx: &mut Self::Context) -> Self::Result {
        let coordinator_addr = self.coordinator_addr.clone();
        let logger = self.logger.clone();

        self.storage_addr
            .send(GetVendors)
            .into_actor(self)
            .map(move |res, _act, _ctx| match res {
                Ok(vendors) => {
                    let listings = rank_vendors(vendors, msg.position, msg.sort);
                    if listings.is_empty() {
                        logger.warn(format!(
                            "No visible restaurants for customer [{}]",
                            msg.customer_id
                        ));
                        coordinator_addr.do_send(ListingError {
                            customer_id: msg.customer_id,
                            reason: "No restaurants available yet".to_string(),
                        });
                    } else {
                        logger.info(format!(
                            "{} restaurants listed for customer [{}] by {}",
                            listings.len(),
                            msg.customer_id,
                            msg.sort
                        ));
                        coordinator_addr.do_send(RestaurantListing {
                            customer_id: msg.customer_id,
                            restaurants: listings,
                        });
                    }
                }
                Err(_) => {
                    logger.error("Error retrieving vendors from storage.");
                    coordinator_addr.do_send(ListingError {
                        customer_id: msg.customer_id,
                        reason: "Internal error".to_string(),
                    });
                }
            })
            .wait(ctx);
    }
}

impl Handler<RequestMenu> for DiscoveryService {
    type Result = ();

    fn handle(&mut self, msg: RequestMenu, ctx: &mut Self::Context) -> Self::Result {
        let coordinator_addr = self.coordinator_addr.clone();
        let logger = self.logger.clone();

        self.storage_addr
            .send(GetVendor {
                vendor_id: msg.vendor_id.clone(),
            })
            .into_actor(self)
            .map(move |res, _act, _ctx| match res {
                Ok(vendor) => match menu_reply(msg.customer_id, msg.vendor_id, vendor) {
                    Ok(listing) => coordinator_addr.do_send(listing),
                    Err(error) => {
                        logger.warn(format!("Menu refused: {}", error.reason));
                        coordinator_addr.do_send(error);
                    }
                },
                Err(_) => {
                    logger.error("Error retrieving vendor from storage.");
                    coordinator_addr.do_send(ListingError {
                        customer_id: msg.customer_id,
                        reason: "Internal error".to_string(),
                    });
                }
            })
            .wait(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::messages::internal_messages::{AddVendor, SetVendorApproval};
    use common::types::dtos::DishDTO;
    use std::collections::HashMap;

    fn vendor(id: &str, position: (f64, f64), orders_taken: u64, sales_total: f64) -> VendorDTO {
        VendorDTO {
            vendor_id: id.to_string(),
            name: id.to_string(),
            position,
            license_ref: format!("licenses/{}.png", id),
            approval: ApprovalStatus::Approved,
            menu: HashMap::new(),
            orders_taken,
            sales_total,
            registered_at: Utc::now(),
        }
    }

    const OBELISCO: (f64, f64) = (-34.6037, -58.3816);

    #[test]
    fn unapproved_vendors_never_listed() {
        let mut hidden = vendor("oculto", OBELISCO, 100, 1000.0);
        hidden.approval = ApprovalStatus::Pending;
        let mut rejected = vendor("rechazado", OBELISCO, 100, 1000.0);
        rejected.approval = ApprovalStatus::Rejected;
        let visible = vendor("visible", OBELISCO, 0, 0.0);

        let listings = rank_vendors(
            vec![hidden, rejected, visible],
            OBELISCO,
            RankingKey::Popularity,
        );
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].vendor_id, "visible");
    }

    #[test]
    fn popularity_ranks_by_orders_taken_with_stable_ties() {
        let listings = rank_vendors(
            vec![
                vendor("b", OBELISCO, 5, 0.0),
                vendor("a", OBELISCO, 5, 0.0),
                vendor("c", OBELISCO, 9, 0.0),
            ],
            OBELISCO,
            RankingKey::Popularity,
        );
        let ids: Vec<&str> = listings.iter().map(|l| l.vendor_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn sales_ranks_by_revenue() {
        let listings = rank_vendors(
            vec![
                vendor("a", OBELISCO, 0, 150.0),
                vendor("b", OBELISCO, 0, 900.5),
            ],
            OBELISCO,
            RankingKey::Sales,
        );
        assert_eq!(listings[0].vendor_id, "b");
    }

    #[test]
    fn proximity_filters_by_radius_and_sorts_by_distance() {
        // La Plata queda a unos 52 km del Obelisco, fuera del radio.
        let listings = rank_vendors(
            vec![
                vendor("lejos", (-34.9215, -57.9545), 0, 0.0),
                vendor("cerca", (-34.61, -58.39), 0, 0.0),
            ],
            OBELISCO,
            RankingKey::Proximity,
        );
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].vendor_id, "cerca");
    }

    #[test]
    fn proximity_falls_back_to_all_when_radius_is_empty() {
        let listings = rank_vendors(
            vec![
                vendor("la_plata", (-34.9215, -57.9545), 0, 0.0),
                vendor("rosario", (-32.9442, -60.6505), 0, 0.0),
            ],
            OBELISCO,
            RankingKey::Proximity,
        );
        let ids: Vec<&str> = listings.iter().map(|l| l.vendor_id.as_str()).collect();
        assert_eq!(ids, vec!["la_plata", "rosario"]);
    }

    #[actix_rt::test]
    #[ntest::timeout(3000)]
    async fn menu_denied_until_license_is_approved() {
        let storage = Storage::new().start();
        let mut parrilla = vendor("parrilla", OBELISCO, 0, 0.0);
        parrilla.approval = ApprovalStatus::Pending;
        parrilla.menu.insert(
            "Asado".to_string(),
            DishDTO {
                name: "Asado".to_string(),
                price: 15.0,
                available: true,
            },
        );
        storage.do_send(AddVendor { vendor: parrilla });

        let fetched = storage
            .send(GetVendor {
                vendor_id: "parrilla".to_string(),
            })
            .await
            .unwrap();
        let denied = menu_reply("ana".to_string(), "parrilla".to_string(), fetched);
        assert!(denied.is_err());

        assert!(
            storage
                .send(SetVendorApproval {
                    vendor_id: "parrilla".to_string(),
                    approval: ApprovalStatus::Approved,
                })
                .await
                .unwrap()
        );
        let fetched = storage
            .send(GetVendor {
                vendor_id: "parrilla".to_string(),
            })
            .await
            .unwrap();
        let listing = menu_reply("ana".to_string(), "parrilla".to_string(), fetched).unwrap();
        assert_eq!(listing.dishes.len(), 1);
        assert_eq!(listing.dishes[0].name, "Asado");
    }

    #[test]
    fn menu_denied_for_unknown_restaurants() {
        let denied = menu_reply("ana".to_string(), "fantasma".to_string(), None);
        assert!(denied.unwrap_err().reason.contains("fantasma"));
    }
}
