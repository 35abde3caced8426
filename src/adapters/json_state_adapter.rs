//! JSON file account state adapter.

use crate::domain::account::AccountState;
use crate::domain::error::TradegateError;
use crate::ports::state_port::StatePort;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct JsonStateAdapter {
    path: PathBuf,
}

impl JsonStateAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_error(&self, reason: impl ToString) -> TradegateError {
        TradegateError::StateParse {
            file: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl StatePort for JsonStateAdapter {
    fn load(&self) -> Result<Option<AccountState>, TradegateError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| self.parse_error(e))
    }

    fn save(&self, state: &AccountState) -> Result<(), TradegateError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state).map_err(|e| self.parse_error(e))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
