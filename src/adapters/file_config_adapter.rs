//! INI file configuration adapter.

use crate::domain::error::TradegateError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug)]
pub struct FileConfigAdapter {
    ini: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TradegateError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path).map_err(|reason| TradegateError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { ini })
    }

    /// Trimmed value, with empty entries treated as absent.
    fn raw(&self, section: &str, key: &str) -> Option<String> {
        let value = self.ini.get(section, key)?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Parsed value, or `None` when missing. Unparsable values are logged
    /// and ignored.
    fn typed<T: FromStr>(&self, section: &str, key: &str) -> Option<T> {
        let raw = self.raw(section, key)?;
        let parsed = raw.parse().ok();
        if parsed.is_none() {
            warn!(section, key, value = %raw, "ignoring unparsable config value");
        }
        parsed
    }
}

impl FromStr for FileConfigAdapter {
    type Err = TradegateError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| TradegateError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { ini })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.raw(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.typed(section, key).unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.typed(section, key).unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.raw(section, key)
            .as_deref()
            .and_then(parse_flag)
            .unwrap_or(default)
    }
}
