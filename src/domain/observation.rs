//! Market observations fed to the scorer.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Uptrend,
    Downtrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OiTrend {
    Rising,
    Falling,
    Flat,
}

/// Strength of the lower-timeframe entry confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroConfirmation {
    None,
    Weak,
    Strong,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Uptrend => write!(f, "Uptrend"),
            Trend::Downtrend => write!(f, "Downtrend"),
        }
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uptrend" | "up" => Ok(Trend::Uptrend),
            "downtrend" | "down" => Ok(Trend::Downtrend),
            other => Err(format!("unknown trend '{other}' (expected uptrend or downtrend)")),
        }
    }
}

impl fmt::Display for OiTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OiTrend::Rising => write!(f, "Rising"),
            OiTrend::Falling => write!(f, "Falling"),
            OiTrend::Flat => write!(f, "Flat"),
        }
    }
}

impl FromStr for OiTrend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rising" => Ok(OiTrend::Rising),
            "falling" => Ok(OiTrend::Falling),
            "flat" => Ok(OiTrend::Flat),
            other => Err(format!(
                "unknown OI trend '{other}' (expected rising, falling or flat)"
            )),
        }
    }
}

impl fmt::Display for MicroConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MicroConfirmation::None => write!(f, "None"),
            MicroConfirmation::Weak => write!(f, "Weak"),
            MicroConfirmation::Strong => write!(f, "Strong"),
        }
    }
}

impl FromStr for MicroConfirmation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(MicroConfirmation::None),
            "weak" => Ok(MicroConfirmation::Weak),
            "strong" => Ok(MicroConfirmation::Strong),
            other => Err(format!(
                "unknown micro confirmation '{other}' (expected none, weak or strong)"
            )),
        }
    }
}

/// One snapshot of the checklist inputs for a pair.
///
/// `last_hl` is the last higher-low in an uptrend (lower-high in a
/// downtrend); `last_hh` is the opposite swing extreme. `funding_rate` and
/// `change_24h` are percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub pair: String,
    pub price: f64,
    pub trend: Trend,
    pub last_hl: f64,
    pub last_hh: f64,
    pub break_confirmed: bool,
    pub funding_rate: f64,
    pub oi_trend: OiTrend,
    pub long_short_ratio: f64,
    pub rsi: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub change_24h: f64,
    pub volume_24h: f64,
    pub micro: MicroConfirmation,
}

impl Default for Observation {
    fn default() -> Self {
        Observation {
            pair: "BTCUSDT".to_string(),
            price: 0.0,
            trend: Trend::Uptrend,
            last_hl: 0.0,
            last_hh: 0.0,
            break_confirmed: false,
            funding_rate: 0.0,
            oi_trend: OiTrend::Rising,
            long_short_ratio: 1.0,
            rsi: 50.0,
            high_24h: 0.0,
            low_24h: 0.0,
            change_24h: 0.0,
            volume_24h: 0.0,
            micro: MicroConfirmation::None,
        }
    }
}

impl Observation {
    /// Position of `price` within the 24h range, or `None` when the range is
    /// degenerate or the ratio is not finite.
    pub fn range_position(&self) -> Option<f64> {
        if self.high_24h > self.low_24h {
            let pos = (self.price - self.low_24h) / (self.high_24h - self.low_24h);
            pos.is_finite().then_some(pos)
        } else {
            None
        }
    }

    /// Distance of `price` from `last_hl`, as a fraction of the last swing.
    pub fn swing_proximity(&self) -> Option<f64> {
        if self.last_hh == self.last_hl {
            return None;
        }
        let swing = (self.last_hh - self.last_hl).abs();
        let proximity = (self.price - self.last_hl).abs() / swing;
        proximity.is_finite().then_some(proximity)
    }
}
