use crate::messages::admin_messages::*;
use crate::messages::customer_messages::*;
use crate::messages::payment_messages::*;
use crate::messages::vendor_messages::*;
use crate::types::dtos::UserDTO;
use actix::prelude::*;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Enum representing all possible network messages exchanged between system components.
///
/// # Purpose
/// This enum encapsulates all message types that can be sent over the network between
/// customers, vendors, admins, the marketplace server and the payment gateway.
///
/// # Contents
/// Each variant wraps a specific message struct, grouping messages by their origin or target.
/// See the documentation for each variant's struct for details.
#[derive(Serialize, Deserialize, Debug, Message, Clone)]
#[serde(tag = "type")]
#[rtype(result = "()")]
pub enum NetworkMessage {
    // Users messages
    /// Register a new user in the system.
    RegisterUser(RegisterUser),
    /// Response with recovered user information.
    RecoveredInfo(UserDTO),
    /// Indicates no recovered information is available.
    NoRecoveredInfo,

    // Customer messages
    /// Customer requests the list of visible restaurants.
    RequestRestaurants(RequestRestaurants),
    /// Ranked list of restaurants for a customer.
    RestaurantListing(RestaurantListing),
    /// The server could not produce a listing.
    ListingError(ListingError),
    /// Customer requests the published menu of a restaurant.
    RequestMenu(RequestMenu),
    /// Available dishes of a restaurant.
    MenuListing(MenuListing),
    /// Customer requests to place a new order.
    PlaceOrder(PlaceOrder),
    /// Confirms the order was taken and payment authorized.
    OrderReceipt(OrderReceipt),
    /// Informs the customer the order did not go through.
    OrderRejectedNotice(OrderRejectedNotice),
    /// Customer cancels an order that has not been fulfilled yet.
    CancelOrder(CancelOrder),
    /// Notifies a peer that an order has been updated.
    NotifyOrderUpdated(NotifyOrderUpdated),

    // Vendor messages
    /// Vendor publishes a full menu, replacing the previous one.
    PublishMenu(PublishMenu),
    /// Vendor adds or updates a single dish.
    UpsertDish(UpsertDish),
    /// Vendor toggles a dish on or off the listing.
    SetDishAvailability(SetDishAvailability),
    /// Notifies a vendor of a new authorized order.
    NewOrder(NewOrder),
    /// Vendor accepts an order.
    AcceptOrder(AcceptOrder),
    /// Vendor rejects an order.
    RejectOrder(RejectOrder),
    /// Vendor reports an accepted order as ready.
    OrderPrepared(OrderPrepared),
    /// Vendor requests its business dashboard.
    RequestDashboard(RequestDashboard),
    /// Dashboard summary for a vendor.
    DashboardReport(DashboardReport),

    // Admin messages
    /// Admin requests the vendors awaiting license review.
    RequestPendingVendors(RequestPendingVendors),
    /// Vendors awaiting license review.
    PendingVendors(PendingVendors),
    /// Admin approves or rejects a vendor license.
    ReviewLicense(ReviewLicense),
    /// Outcome of a license review, forwarded to the vendor.
    LicenseReviewed(LicenseReviewed),

    // Payment messages
    /// Requests payment authorization for an order.
    RequestAuthorization(RequestAuthorization),
    /// Result of a payment authorization request.
    AuthorizationResult(AuthorizationResult),
    /// Requests billing for an authorized payment.
    BillPayment(BillPayment),
    /// Notifies that payment has been settled.
    PaymentCompleted(PaymentCompleted),
    /// Notifies that billing a payment failed.
    PaymentFailed(PaymentFailed),

    /// Notifies that a TCP connection has been closed.
    ConnectionClosed(ConnectionClosed),
}

/// Message sent to register a new user in the system.
///
/// ## Purpose
/// Used by a peer to register itself with the marketplace, or to recover its
/// profile after a reconnection.
///
/// ## Contents
/// - `origin_addr`: The address of the registering peer.
/// - `user_id`: The ID of the user.
/// - `position`: The (latitude, longitude) of the user.
/// - `display_name`: Public name, only meaningful for vendors.
/// - `license_ref`: License document reference, only meaningful for vendors.
#[derive(Serialize, Deserialize, Debug, Message, Clone)]
#[rtype(result = "()")]
pub struct RegisterUser {
    pub origin_addr: SocketAddr,
    pub user_id: String,
    pub position: (f64, f64),
    pub display_name: Option<String>,
    pub license_ref: Option<String>,
}

/// Message sent to notify that a TCP connection has been closed.
///
/// ## Purpose
/// Emitted by the receiving half of a connection when the remote end hangs up,
/// so the owning actor can clean up or reconnect.
///
/// ## Contents
/// - `remote_addr`: The address of the disconnected peer.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct ConnectionClosed {
    pub remote_addr: SocketAddr,
}
