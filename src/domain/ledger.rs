//! Account ledger: owns the loaded [`AccountState`] and keeps the state
//! file and trade log in step with every recorded trade.
//!
//! Each saved trade performs two independent writes (state, then log) with
//! no locking. Only one process may use a data directory at a time.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use super::account::{AccountDefaults, AccountState, TradeOutcome};
use super::error::TradegateError;
use super::score::ScoreResult;
use super::trade_log::TradeLogRow;
use crate::ports::state_port::StatePort;
use crate::ports::trade_log_port::TradeLogPort;

pub struct Ledger<'a> {
    state_port: &'a dyn StatePort,
    log_port: &'a dyn TradeLogPort,
    state: AccountState,
}

impl<'a> Ledger<'a> {
    /// Loads persisted state, creating it from `defaults` when absent, then
    /// applies the daily reset for `today`. Any change is persisted.
    pub fn load_or_init(
        state_port: &'a dyn StatePort,
        log_port: &'a dyn TradeLogPort,
        defaults: AccountDefaults,
        today: NaiveDate,
    ) -> Result<Self, TradegateError> {
        let state = match state_port.load()? {
            Some(state) => state,
            None => {
                let state = AccountState::new(defaults, today);
                state_port.save(&state)?;
                info!(equity = state.equity, "created new account state");
                state
            }
        };

        let mut ledger = Ledger {
            state_port,
            log_port,
            state,
        };
        ledger.reset_daily(today)?;
        Ok(ledger)
    }

    pub fn state(&self) -> &AccountState {
        &self.state
    }

    /// Returns whether the daily loss counter was cleared.
    pub fn reset_daily(&mut self, today: NaiveDate) -> Result<bool, TradegateError> {
        let previous = self.state.daily_loss;
        if !self.state.reset_daily(today) {
            return Ok(false);
        }
        self.state_port.save(&self.state)?;
        info!(%today, cleared = previous, "daily loss reset");
        Ok(true)
    }

    /// Applies the trade result, persists the new state and appends a log row
    /// carrying the resulting equity. A non-finite R is rejected before
    /// anything changes.
    pub fn save_trade(
        &mut self,
        pair: &str,
        result: &ScoreResult,
        r_multiple: f64,
        timestamp: NaiveDateTime,
    ) -> Result<TradeLogRow, TradegateError> {
        if !r_multiple.is_finite() {
            return Err(TradegateError::InvalidResult(r_multiple));
        }
        let TradeOutcome { pnl, equity, .. } = self.state.apply_trade(r_multiple);
        info!(
            pair,
            r_multiple,
            pnl,
            equity,
            streak = self.state.current_streak,
            "trade applied"
        );
        self.state_port.save(&self.state)?;

        let row = TradeLogRow {
            timestamp,
            pair: pair.to_string(),
            score: result.score,
            verdict: result.verdict,
            r_multiple,
            equity,
        };
        self.log_port.append(&row)?;
        debug!(pair, "trade log row appended");
        Ok(row)
    }
}
