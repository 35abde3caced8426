//! CLI definition and dispatch.

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

use crate::adapters::csv_log_adapter::CsvLogAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_state_adapter::JsonStateAdapter;
use crate::domain::config::AppConfig;
use crate::domain::error::TradegateError;
use crate::domain::ledger::Ledger;
use crate::domain::observation::{MicroConfirmation, Observation, OiTrend, Trend};
use crate::domain::score::{self, ScoreResult};
use crate::domain::stats::LogStats;
use crate::domain::trade_log::LOG_HEADERS;
use crate::ports::trade_log_port::TradeLogPort;

#[derive(Parser, Debug)]
#[command(name = "tradegate", about = "Futures trade checklist scorer and journal")]
pub struct Cli {
    /// INI file with [paths], [account] and [display] sections
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a trade setup, optionally recording its realized result
    Analyze(AnalyzeArgs),
    /// Show the account snapshot
    Status,
    /// Print the trade log
    Log,
    /// Show statistics over the trade log
    Stats,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(long, default_value = "BTCUSDT")]
    pub pair: String,
    #[arg(long, default_value_t = 0.0)]
    pub price: f64,
    /// uptrend or downtrend
    #[arg(long, default_value = "uptrend")]
    pub trend: Trend,
    /// Last higher-low (uptrend) or lower-high (downtrend)
    #[arg(long, default_value_t = 0.0)]
    pub hl: f64,
    /// Last higher-high (uptrend) or lower-low (downtrend)
    #[arg(long, default_value_t = 0.0)]
    pub hh: f64,
    #[arg(long)]
    pub break_confirmed: bool,
    /// Funding rate in percent
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub funding: f64,
    /// rising, falling or flat
    #[arg(long, default_value = "rising")]
    pub oi_trend: OiTrend,
    #[arg(long, default_value_t = 1.0)]
    pub ls_ratio: f64,
    #[arg(long, default_value_t = 50.0)]
    pub rsi: f64,
    #[arg(long = "high-24h", default_value_t = 0.0)]
    pub high_24h: f64,
    #[arg(long = "low-24h", default_value_t = 0.0)]
    pub low_24h: f64,
    /// 24h change in percent
    #[arg(long = "change-24h", default_value_t = 0.0, allow_negative_numbers = true)]
    pub change_24h: f64,
    /// 24h volume in USDT
    #[arg(long = "volume-24h", default_value_t = 0.0)]
    pub volume_24h: f64,
    /// none, weak or strong
    #[arg(long, default_value = "none")]
    pub micro: MicroConfirmation,
    /// Realized trade result as an R multiple; records the trade when given
    #[arg(long, allow_negative_numbers = true, value_parser = parse_r_multiple)]
    pub result: Option<f64>,
}

impl AnalyzeArgs {
    pub fn observation(&self) -> Observation {
        Observation {
            pair: self.pair.clone(),
            price: self.price,
            trend: self.trend,
            last_hl: self.hl,
            last_hh: self.hh,
            break_confirmed: self.break_confirmed,
            funding_rate: self.funding,
            oi_trend: self.oi_trend,
            long_short_ratio: self.ls_ratio,
            rsi: self.rsi,
            high_24h: self.high_24h,
            low_24h: self.low_24h,
            change_24h: self.change_24h,
            volume_24h: self.volume_24h,
            micro: self.micro,
        }
    }
}

fn parse_r_multiple(raw: &str) -> Result<f64, String> {
    let r: f64 = raw.trim().parse().map_err(|e| format!("{e}"))?;
    if r.is_finite() {
        Ok(r)
    } else {
        Err(format!("{raw} is not a finite R multiple"))
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match load_app_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let now = Local::now().naive_local();
    let mut stdout = io::stdout().lock();

    let result = match cli.command {
        Command::Analyze(args) => run_analyze(&config, &args, now, &mut stdout),
        Command::Status => run_status(&config, now.date(), &mut stdout),
        Command::Log => run_log(&config, &mut stdout),
        Command::Stats => run_stats(&config, &mut stdout),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_app_config(path: Option<&Path>) -> Result<AppConfig, TradegateError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            let adapter = FileConfigAdapter::from_file(path)?;
            AppConfig::from_port(&adapter)
        }
        None => Ok(AppConfig::default()),
    }
}

pub fn run_analyze(
    config: &AppConfig,
    args: &AnalyzeArgs,
    now: NaiveDateTime,
    out: &mut dyn Write,
) -> Result<(), TradegateError> {
    let obs = args.observation();
    let result = score::score(&obs);
    print_analysis(config, &obs, &result, out)?;

    let Some(r_multiple) = args.result else {
        return Ok(());
    };

    let state_port = JsonStateAdapter::new(config.state_path());
    let log_port = CsvLogAdapter::new(config.log_path());
    let mut ledger = Ledger::load_or_init(&state_port, &log_port, config.account, now.date())?;
    let row = ledger.save_trade(&obs.pair, &result, r_multiple, now)?;

    writeln!(
        out,
        "\nTrade saved -> Equity ${:.2} (streak {})",
        row.equity,
        ledger.state().current_streak
    )?;
    Ok(())
}

fn print_analysis(
    config: &AppConfig,
    obs: &Observation,
    result: &ScoreResult,
    out: &mut dyn Write,
) -> Result<(), TradegateError> {
    writeln!(out, "Pair:            {}", obs.pair)?;
    writeln!(out, "Composite Score: {} / 100", result.score)?;
    writeln!(out, "Verdict:         {}", result.verdict.label(config.emoji_labels))?;
    writeln!(out, "\nBreakdown:")?;
    for (category, points) in result.breakdown.entries() {
        writeln!(out, "  {:<16}{:>4}", category, points)?;
    }
    Ok(())
}

pub fn run_status(
    config: &AppConfig,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<(), TradegateError> {
    let state_port = JsonStateAdapter::new(config.state_path());
    let log_port = CsvLogAdapter::new(config.log_path());
    let ledger = Ledger::load_or_init(&state_port, &log_port, config.account, today)?;
    let state = ledger.state();

    writeln!(out, "Equity:      ${:.2}", state.equity)?;
    writeln!(out, "Daily Loss:  ${:.2}", state.daily_loss)?;
    writeln!(out, "Streak:      {}", state.current_streak)?;
    writeln!(out, "Risk:        {:.2}% (${:.2} per R)", state.risk_percent, state.risk_amount())?;
    writeln!(out, "Leverage:    {}x", state.leverage)?;
    writeln!(out, "Last Reset:  {}", state.last_reset)?;
    Ok(())
}

pub fn run_log(config: &AppConfig, out: &mut dyn Write) -> Result<(), TradegateError> {
    let rows = CsvLogAdapter::new(config.log_path()).read_all()?;
    if rows.is_empty() {
        writeln!(out, "No trade logs yet.")?;
        return Ok(());
    }

    let [date, pair, score, verdict, r, equity] = LOG_HEADERS;
    writeln!(
        out,
        "{date:<19}  {pair:<12} {score:>5}  {verdict:<16} {r:>7} {equity:>12}"
    )?;
    for row in &rows {
        writeln!(
            out,
            "{:<19}  {:<12} {:>5}  {:<16} {:>7.2} {:>12.2}",
            row.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            row.pair,
            row.score,
            row.verdict.label(config.emoji_labels),
            row.r_multiple,
            row.equity,
        )?;
    }
    Ok(())
}

pub fn run_stats(config: &AppConfig, out: &mut dyn Write) -> Result<(), TradegateError> {
    let rows = CsvLogAdapter::new(config.log_path()).read_all()?;
    if rows.is_empty() {
        writeln!(out, "No statistics yet.")?;
        return Ok(());
    }

    let stats = LogStats::compute(&rows);
    writeln!(out, "Total Trades:  {}", stats.total_trades)?;
    writeln!(out, "Winrate (%):   {:.2}", stats.win_rate)?;
    writeln!(out, "Average R:     {:.2}", stats.average_r)?;
    writeln!(out, "Total R:       {:.2}", stats.total_r)?;
    if let Some(equity) = stats.last_equity {
        writeln!(out, "Last Equity:   ${:.2}", equity)?;
    }
    writeln!(out, "\nCumulative R:")?;
    for (idx, cum) in stats.cumulative_r.iter().enumerate() {
        writeln!(out, "  {:>4}  {:>8.2}", idx + 1, cum)?;
    }
    Ok(())
}
