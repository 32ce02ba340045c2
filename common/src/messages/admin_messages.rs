use crate::types::{approval_status::ApprovalStatus, dtos::VendorDTO};
use actix::Message;
use serde::{Deserialize, Serialize};

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct RequestPendingVendors {
    pub admin_id: String,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct PendingVendors {
    pub admin_id: String,
    pub vendors: Vec<VendorDTO>,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct ReviewLicense {
    pub admin_id: String,
    pub vendor_id: String,
    pub approved: bool,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct LicenseReviewed {
    pub vendor_id: String,
    pub approval: ApprovalStatus,
}
