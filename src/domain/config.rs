//! Application configuration built from a [`ConfigPort`], with validation.

use std::path::PathBuf;

use crate::domain::account::{AccountDefaults, DEFAULT_EQUITY, DEFAULT_LEVERAGE, DEFAULT_RISK_PERCENT};
use crate::domain::error::TradegateError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_STATE_FILE: &str = "state.json";
pub const DEFAULT_LOG_FILE: &str = "trade_log.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub state_file: String,
    pub log_file: String,
    pub account: AccountDefaults,
    /// Prefix verdict labels with a coloured marker when printing.
    pub emoji_labels: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            state_file: DEFAULT_STATE_FILE.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            account: AccountDefaults::default(),
            emoji_labels: true,
        }
    }
}

impl AppConfig {
    pub fn from_port(config: &dyn ConfigPort) -> Result<Self, TradegateError> {
        validate_account_config(config)?;

        let non_empty = |key: &str, default: &str| {
            config
                .get_string("paths", key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(AppConfig {
            data_dir: PathBuf::from(non_empty("data_dir", DEFAULT_DATA_DIR)),
            state_file: non_empty("state_file", DEFAULT_STATE_FILE),
            log_file: non_empty("log_file", DEFAULT_LOG_FILE),
            account: AccountDefaults {
                equity: config.get_double("account", "equity", DEFAULT_EQUITY),
                risk_percent: config.get_double("account", "risk_percent", DEFAULT_RISK_PERCENT),
                leverage: config.get_int("account", "leverage", DEFAULT_LEVERAGE),
            },
            emoji_labels: config.get_bool("display", "emoji", true),
        })
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(&self.state_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }
}

pub fn validate_account_config(config: &dyn ConfigPort) -> Result<(), TradegateError> {
    validate_equity(config)?;
    validate_risk_percent(config)?;
    validate_leverage(config)?;
    Ok(())
}

fn validate_equity(config: &dyn ConfigPort) -> Result<(), TradegateError> {
    let value = config.get_double("account", "equity", DEFAULT_EQUITY);
    if value <= 0.0 || !value.is_finite() {
        return Err(invalid("equity", "equity must be positive"));
    }
    Ok(())
}

fn validate_risk_percent(config: &dyn ConfigPort) -> Result<(), TradegateError> {
    let value = config.get_double("account", "risk_percent", DEFAULT_RISK_PERCENT);
    if !(value > 0.0 && value <= 100.0) {
        return Err(invalid(
            "risk_percent",
            "risk_percent must be greater than 0 and at most 100",
        ));
    }
    Ok(())
}

fn validate_leverage(config: &dyn ConfigPort) -> Result<(), TradegateError> {
    let value = config.get_int("account", "leverage", DEFAULT_LEVERAGE);
    if value < 1 {
        return Err(invalid("leverage", "leverage must be at least 1"));
    }
    Ok(())
}

fn invalid(key: &str, reason: &str) -> TradegateError {
    TradegateError::ConfigInvalid {
        section: "account".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
