//! CSV file trade log adapter.

use crate::domain::error::TradegateError;
use crate::domain::trade_log::TradeLogRow;
use crate::ports::trade_log_port::TradeLogPort;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct CsvLogAdapter {
    path: PathBuf,
}

impl CsvLogAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn log_error(&self, reason: impl ToString) -> TradegateError {
        TradegateError::LogParse {
            file: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl TradeLogPort for CsvLogAdapter {
    fn append(&self, row: &TradeLogRow) -> Result<(), TradegateError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let write_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        wtr.serialize(row).map_err(|e| self.log_error(e))?;
        wtr.flush()?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<TradeLogRow>, TradegateError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut rows = Vec::new();

        for (idx, result) in rdr.deserialize::<TradeLogRow>().enumerate() {
            let row: TradeLogRow =
                result.map_err(|e| self.log_error(format!("row {}: {}", idx + 1, e)))?;
            rows.push(row);
        }

        Ok(rows)
    }
}
