//! Core domain types and logic.

pub mod observation;
pub mod score;
pub mod account;
pub mod ledger;
pub mod trade_log;
pub mod stats;
pub mod config;
pub mod error;
