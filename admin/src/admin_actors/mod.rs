pub mod admin;
pub mod ui_handler;
