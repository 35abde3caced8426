//! File-backed adapter implementations for ports.

pub mod csv_log_adapter;
pub mod file_config_adapter;
pub mod json_state_adapter;
