pub mod api;
pub mod client;
pub mod config;
pub mod device;
pub mod error;
pub mod models;
pub mod session;
pub mod utils;
