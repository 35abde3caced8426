//! Persistent account state and trade application.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EQUITY: f64 = 1000.0;
pub const DEFAULT_RISK_PERCENT: f64 = 1.0;
pub const DEFAULT_LEVERAGE: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountState {
    pub equity: f64,
    pub risk_percent: f64,
    pub leverage: i64,
    pub daily_loss: f64,
    pub current_streak: i64,
    pub last_reset: NaiveDate,
}

/// Starting values for an account that has no persisted state yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountDefaults {
    pub equity: f64,
    pub risk_percent: f64,
    pub leverage: i64,
}

impl Default for AccountDefaults {
    fn default() -> Self {
        AccountDefaults {
            equity: DEFAULT_EQUITY,
            risk_percent: DEFAULT_RISK_PERCENT,
            leverage: DEFAULT_LEVERAGE,
        }
    }
}

/// Money outcome of applying one trade result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeOutcome {
    pub risk_amount: f64,
    pub pnl: f64,
    pub equity: f64,
}

impl AccountState {
    pub fn new(defaults: AccountDefaults, today: NaiveDate) -> Self {
        AccountState {
            equity: defaults.equity,
            risk_percent: defaults.risk_percent,
            leverage: defaults.leverage,
            daily_loss: 0.0,
            current_streak: 0,
            last_reset: today,
        }
    }

    /// Clears the daily loss counter if `today` differs from the last reset.
    /// Returns whether a reset happened.
    pub fn reset_daily(&mut self, today: NaiveDate) -> bool {
        if self.last_reset == today {
            return false;
        }
        self.daily_loss = 0.0;
        self.last_reset = today;
        true
    }

    pub fn risk_amount(&self) -> f64 {
        self.equity * (self.risk_percent / 100.0)
    }

    /// Applies a realized R-multiple to equity, daily loss and streak.
    pub fn apply_trade(&mut self, r_multiple: f64) -> TradeOutcome {
        let risk_amount = self.risk_amount();
        let pnl = risk_amount * r_multiple;

        self.equity += pnl;
        if r_multiple < 0.0 {
            self.daily_loss += pnl.abs();
        }
        self.update_streak(r_multiple);

        TradeOutcome {
            risk_amount,
            pnl,
            equity: self.equity,
        }
    }

    /// Positive streaks count wins, negative count losses. A result of the
    /// opposite sign restarts the count at +1 / -1; a flat result leaves it.
    pub fn update_streak(&mut self, r_multiple: f64) {
        if r_multiple > 0.0 {
            self.current_streak = if self.current_streak >= 0 {
                self.current_streak + 1
            } else {
                1
            };
        } else if r_multiple < 0.0 {
            self.current_streak = if self.current_streak <= 0 {
                self.current_streak - 1
            } else {
                -1
            };
        }
    }
}
