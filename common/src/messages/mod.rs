pub mod admin_messages;
pub mod customer_messages;
pub mod internal_messages;
pub mod payment_messages;
pub mod shared_messages;
pub mod vendor_messages;

// Optional: reexport all together for `use common::messages::*`
pub use admin_messages::*;
pub use customer_messages::*;
pub use internal_messages::*;
pub use payment_messages::*;
pub use shared_messages::*;
pub use vendor_messages::*;
