pub mod dashboard;
pub mod discovery;
pub mod orders;
