//! Append-only trade log port trait.

use crate::domain::error::TradegateError;
use crate::domain::trade_log::TradeLogRow;

pub trait TradeLogPort {
    fn append(&self, row: &TradeLogRow) -> Result<(), TradegateError>;

    /// All rows in the order they were appended; empty when no log exists.
    fn read_all(&self) -> Result<Vec<TradeLogRow>, TradegateError>;
}
