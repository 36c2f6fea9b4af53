//! Replay command implementation.

use anyhow::Result;
use chrono::Utc;
use pulse_data::{load_quotes, load_trades, StaticMarketData};
use pulse_engine::PulseService;
use pulse_valuation::summarize;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cli::ReplayArgs;

use super::service_config;

#[derive(Serialize)]
struct ReplayReport {
    positions: Vec<pulse_valuation::PositionView>,
    summary: pulse_valuation::PortfolioSummary,
    realized_pnl: rust_decimal::Decimal,
    cash: rust_decimal::Decimal,
    rejected: usize,
}

pub async fn run(args: ReplayArgs, config_path: &Path) -> Result<()> {
    let config = pulse_config::load_or_default(config_path)?;

    let market = Arc::new(StaticMarketData::new());
    let quotes = load_quotes(&args.quotes, Utc::now())?;
    info!("Loaded {} quote(s)", quotes.len());
    for quote in quotes {
        market.set_quote(quote);
    }

    let service = PulseService::new(
        service_config(&config, args.cash),
        market.clone(),
        market,
    );
    let user = Uuid::new_v4();
    service.open_account(user);

    let mut rejected = 0;
    for instruction in load_trades(&args.trades)? {
        match service
            .submit_trade(user, &instruction.symbol, instruction.action, instruction.quantity)
            .await
        {
            Ok(executed) => info!(
                "{} {} {} @ {} (cash {})",
                executed.trade.action,
                executed.trade.quantity,
                executed.trade.symbol,
                executed.trade.execution_price,
                executed.cash
            ),
            Err(err) => {
                warn!(
                    "Rejected {} {} {}: {}",
                    instruction.action, instruction.quantity, instruction.symbol, err
                );
                rejected += 1;
            }
        }
    }

    let positions = service.portfolio(user).await?;
    let summary = summarize(&positions);
    let report = ReplayReport {
        summary,
        realized_pnl: service.realized_pnl(user),
        cash: service.balance(user)?,
        rejected,
        positions,
    };

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ReplayReport) {
    println!(
        "{:<8} {:>8} {:>12} {:>12} {:>12} {:>10}",
        "Symbol", "Shares", "Avg Cost", "Price", "Value", "P/L"
    );
    for view in &report.positions {
        println!(
            "{:<8} {:>8} {:>12} {:>12} {:>12} {:>10}",
            view.holding.symbol,
            view.holding.quantity,
            view.holding.average_cost.round_dp(2),
            view.quote.price,
            view.valuation.market_value.round_dp(2),
            view.valuation.unrealized_pnl.round_dp(2),
        );
    }
    println!();
    println!("Market value:   {}", report.summary.total_market_value.round_dp(2));
    println!("Unrealized P/L: {}", report.summary.total_unrealized_pnl.round_dp(2));
    println!("Realized P/L:   {}", report.realized_pnl.round_dp(2));
    println!("Cash:           {}", report.cash.round_dp(2));
    if report.rejected > 0 {
        println!("Rejected trades: {}", report.rejected);
    }
}
