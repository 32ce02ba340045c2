pub mod coordinator;
pub mod services;
pub mod storage;
