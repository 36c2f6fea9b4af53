//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(author, version, about = "Equity sentiment and portfolio valuation engine")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate composite sentiment for a symbol from seed samples
    Sentiment(SentimentArgs),
    /// Replay a trade script against seeded quotes and show the ledger
    Replay(ReplayArgs),
    /// Show watched symbols against seeded quotes
    Watch(WatchArgs),
}

#[derive(clap::Args)]
pub struct SentimentArgs {
    /// Symbol to aggregate
    #[arg(short = 'S', long)]
    pub symbol: String,

    /// Sentiment samples file (CSV: symbol,source,score,as_of)
    #[arg(long)]
    pub samples: PathBuf,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct ReplayArgs {
    /// Quote snapshots file (CSV: symbol,price,change,volume,market_cap,as_of)
    #[arg(long)]
    pub quotes: PathBuf,

    /// Trade script file (CSV: action,symbol,quantity)
    #[arg(long)]
    pub trades: PathBuf,

    /// Starting cash, overriding the configured default
    #[arg(long)]
    pub cash: Option<Decimal>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct WatchArgs {
    /// Quote snapshots file (CSV: symbol,price,change,volume,market_cap,as_of)
    #[arg(long)]
    pub quotes: PathBuf,

    /// Symbols to watch (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,
}
