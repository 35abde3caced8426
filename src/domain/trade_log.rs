//! Trade log rows as written to the CSV log.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::score::Verdict;

/// Column names of the CSV log, in file order.
pub const LOG_HEADERS: [&str; 6] = ["Date", "Pair", "Score", "Verdict", "R", "Equity"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLogRow {
    #[serde(rename = "Date", with = "log_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Pair")]
    pub pair: String,
    #[serde(rename = "Score")]
    pub score: u8,
    #[serde(rename = "Verdict")]
    pub verdict: Verdict,
    #[serde(rename = "R")]
    pub r_multiple: f64,
    #[serde(rename = "Equity")]
    pub equity: f64,
}

mod log_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    // %.f also accepts an absent fractional part
    const READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(WRITE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(raw.trim(), READ_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(serde::de::Error::custom)
    }
}
