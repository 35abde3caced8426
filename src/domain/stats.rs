//! Summary statistics over the trade log.

use super::trade_log::TradeLogRow;

#[derive(Debug, Clone, PartialEq)]
pub struct LogStats {
    pub total_trades: usize,
    pub wins: usize,
    /// Percentage of trades with R > 0.
    pub win_rate: f64,
    pub average_r: f64,
    pub total_r: f64,
    pub cumulative_r: Vec<f64>,
    pub last_equity: Option<f64>,
}

impl LogStats {
    pub fn compute(rows: &[TradeLogRow]) -> Self {
        let total_trades = rows.len();
        let wins = rows.iter().filter(|r| r.r_multiple > 0.0).count();

        let cumulative_r: Vec<f64> = rows
            .iter()
            .scan(0.0, |acc, row| {
                *acc += row.r_multiple;
                Some(*acc)
            })
            .collect();
        let total_r = cumulative_r.last().copied().unwrap_or(0.0);

        let (win_rate, average_r) = if total_trades > 0 {
            (
                wins as f64 / total_trades as f64 * 100.0,
                total_r / total_trades as f64,
            )
        } else {
            (0.0, 0.0)
        };

        LogStats {
            total_trades,
            wins,
            win_rate,
            average_r,
            total_r,
            cumulative_r,
            last_equity: rows.last().map(|r| r.equity),
        }
    }
}
