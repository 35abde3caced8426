//! Port traits separating the domain from file storage and configuration.

pub mod config_port;
pub mod state_port;
pub mod trade_log_port;
