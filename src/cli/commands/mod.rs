//! Command implementations.

pub mod replay;
pub mod sentiment;
pub mod watch;

use chrono::Duration;
use pulse_config::AppConfig;
use pulse_engine::{ExecutorConfig, ServiceConfig};
use rust_decimal::Decimal;

/// Build the service configuration from loaded settings.
pub fn service_config(config: &AppConfig, cash_override: Option<Decimal>) -> ServiceConfig {
    ServiceConfig {
        executor: ExecutorConfig {
            quote_freshness: Duration::seconds(config.orders.quote_freshness_secs),
        },
        aggregator: config.sentiment.aggregator_config(),
        starting_cash: cash_override.unwrap_or(config.account.starting_cash),
    }
}
