pub mod approval_status;
pub mod dashboard;
pub mod dtos;
pub mod order_status;
pub mod payment_status;
pub mod ranking;
pub mod vendor_listing;
