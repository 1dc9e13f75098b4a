pub mod catalog;
pub mod constants;
pub mod error;
pub mod gateways;
pub mod logger;
pub mod messages;
pub mod proximity;
pub mod types;
pub mod utils;
