#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use std::cell::{Cell, RefCell};
use tradegate::domain::account::AccountState;
use tradegate::domain::error::TradegateError;
use tradegate::domain::observation::{MicroConfirmation, Observation, OiTrend, Trend};
use tradegate::domain::trade_log::TradeLogRow;
use tradegate::ports::state_port::StatePort;
use tradegate::ports::trade_log_port::TradeLogPort;

pub struct MockStatePort {
    pub stored: RefCell<Option<AccountState>>,
    pub saves: Cell<usize>,
    pub save_error: Option<String>,
}

impl MockStatePort {
    pub fn new() -> Self {
        Self {
            stored: RefCell::new(None),
            saves: Cell::new(0),
            save_error: None,
        }
    }

    pub fn with_state(self, state: AccountState) -> Self {
        *self.stored.borrow_mut() = Some(state);
        self
    }

    pub fn with_save_error(mut self, reason: &str) -> Self {
        self.save_error = Some(reason.to_string());
        self
    }

    pub fn current(&self) -> Option<AccountState> {
        self.stored.borrow().clone()
    }
}

impl StatePort for MockStatePort {
    fn load(&self) -> Result<Option<AccountState>, TradegateError> {
        Ok(self.stored.borrow().clone())
    }

    fn save(&self, state: &AccountState) -> Result<(), TradegateError> {
        if let Some(reason) = &self.save_error {
            return Err(TradegateError::Io(std::io::Error::other(reason.clone())));
        }
        *self.stored.borrow_mut() = Some(state.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

pub struct MockLogPort {
    pub rows: RefCell<Vec<TradeLogRow>>,
}

impl MockLogPort {
    pub fn new() -> Self {
        Self {
            rows: RefCell::new(Vec::new()),
        }
    }
}

impl TradeLogPort for MockLogPort {
    fn append(&self, row: &TradeLogRow) -> Result<(), TradegateError> {
        self.rows.borrow_mut().push(row.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<TradeLogRow>, TradegateError> {
        Ok(self.rows.borrow().clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

/// A long setup that scores exactly 70 (GO).
pub fn go_setup() -> Observation {
    Observation {
        pair: "BTCUSDT".into(),
        price: 101.0,
        trend: Trend::Uptrend,
        last_hl: 100.0,
        last_hh: 120.0,
        break_confirmed: true,
        funding_rate: 0.01,
        oi_trend: OiTrend::Rising,
        long_short_ratio: 0.8,
        rsi: 55.0,
        high_24h: 130.0,
        low_24h: 90.0,
        change_24h: 1.2,
        volume_24h: 5_000_000.0,
        micro: MicroConfirmation::Strong,
    }
}
