//! Quote Desk: insurance quote intake, notifications, and lead tracking.

pub mod config;
pub mod error;
pub mod form;
pub mod intake;
pub mod notify;
pub mod server;
pub mod store;
