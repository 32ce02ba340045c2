use actix::Message;
use common::types::dtos::VendorDTO;

/// Message sent from the admin to the UI handler with the vendors whose
/// licenses are awaiting review.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct ReviewPending {
    pub vendors: Vec<VendorDTO>,
}

/// Message sent from the UI handler back to the admin with the outcome the
/// operator chose for one vendor.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SubmitReview {
    pub vendor_id: String,
    pub approved: bool,
}

/// Message to ask the server again for the pending review queue.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct RefreshPending;
