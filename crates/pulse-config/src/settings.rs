//! Configuration structures.

use chrono::Duration;
use pulse_sentiment::{AggregatorConfig, SourceWeights};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sentiment: SentimentSettings,
    #[serde(default)]
    pub orders: OrderSettings,
    #[serde(default)]
    pub account: AccountSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "pulse".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Sentiment aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSettings {
    /// Samples older than this many hours are ignored
    pub staleness_hours: i64,
    pub weights: SourceWeights,
}

impl Default for SentimentSettings {
    fn default() -> Self {
        Self {
            staleness_hours: 24,
            weights: SourceWeights::default(),
        }
    }
}

impl SentimentSettings {
    /// Convert into the aggregator's configuration.
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            staleness_window: Duration::hours(self.staleness_hours),
            weights: self.weights,
        }
    }
}

/// Order validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSettings {
    /// Maximum quote age accepted at validation time, in seconds
    pub quote_freshness_secs: i64,
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            quote_freshness_secs: 60,
        }
    }
}

/// Account settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSettings {
    /// Cash granted when an account is opened
    pub starting_cash: Decimal,
}

impl Default for AccountSettings {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self {
            starting_cash: dec!(100000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sentiment.staleness_hours, 24);
        assert_eq!(config.sentiment.weights.news, dec!(0.5));
        assert_eq!(config.orders.quote_freshness_secs, 60);
        assert_eq!(config.account.starting_cash, dec!(100000));
    }

    #[test]
    fn test_aggregator_config_conversion() {
        let settings = SentimentSettings::default();
        let config = settings.aggregator_config();
        assert_eq!(config.staleness_window, Duration::hours(24));
    }
}
