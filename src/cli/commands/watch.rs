//! Watch command implementation.

use anyhow::Result;
use chrono::Utc;
use pulse_core::traits::QuoteSource;
use pulse_data::{load_quotes, StaticMarketData};
use pulse_engine::PulseService;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::cli::WatchArgs;

use super::service_config;

pub async fn run(args: WatchArgs, config_path: &Path) -> Result<()> {
    let config = pulse_config::load_or_default(config_path)?;

    let market = Arc::new(StaticMarketData::new());
    for quote in load_quotes(&args.quotes, Utc::now())? {
        market.set_quote(quote);
    }

    let service = PulseService::new(service_config(&config, None), market.clone(), market.clone());
    let user = Uuid::new_v4();
    for symbol in &args.symbols {
        service.add_watch(user, symbol);
    }

    println!(
        "{:<8} {:>12} {:>9} {:>14}",
        "Symbol", "Price", "Change", "Volume"
    );
    for symbol in service.watchlist(user) {
        match market.latest_quote(&symbol).await {
            Ok(quote) => println!(
                "{:<8} {:>12} {:>8}% {:>14}",
                quote.symbol, quote.price, quote.percent_change, quote.volume
            ),
            Err(err) => warn!("Skipping {}: {}", symbol, err),
        }
    }

    Ok(())
}
