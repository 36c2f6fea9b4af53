//! CSV seed data loader.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use pulse_core::error::DataError;
use pulse_core::types::{normalize_symbol, Quote, SentimentSample, SourceKind, TradeAction};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One line of a trade script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeInstruction {
    pub symbol: String,
    pub action: TradeAction,
    pub quantity: u64,
}

/// Quote record format.
#[derive(Debug, Deserialize)]
struct QuoteRecord {
    #[serde(alias = "Symbol", alias = "ticker", alias = "Ticker")]
    symbol: String,
    #[serde(alias = "Price", alias = "close", alias = "Close")]
    price: Decimal,
    #[serde(alias = "Change", alias = "percent_change", default)]
    change: Option<Decimal>,
    #[serde(alias = "Volume", default)]
    volume: Option<u64>,
    #[serde(alias = "MarketCap", alias = "market_cap", default)]
    marketcap: Option<Decimal>,
    #[serde(alias = "AsOf", alias = "as_of", alias = "date", default)]
    asof: Option<String>,
}

/// Sentiment record format.
#[derive(Debug, Deserialize)]
struct SampleRecord {
    #[serde(alias = "Symbol", alias = "ticker", alias = "Ticker")]
    symbol: String,
    #[serde(alias = "Source", alias = "kind", alias = "Kind")]
    source: String,
    #[serde(alias = "Score")]
    score: Decimal,
    #[serde(alias = "AsOf", alias = "as_of", alias = "date", default)]
    asof: Option<String>,
}

/// Trade script record format.
#[derive(Debug, Deserialize)]
struct TradeRecord {
    #[serde(alias = "Action")]
    action: String,
    #[serde(alias = "Symbol", alias = "ticker", alias = "Ticker")]
    symbol: String,
    #[serde(alias = "Quantity", alias = "shares", alias = "Shares")]
    quantity: u64,
}

/// Load quote snapshots from a CSV file. Records without a timestamp get
/// `default_as_of`.
pub fn load_quotes(path: &Path, default_as_of: DateTime<Utc>) -> Result<Vec<Quote>, DataError> {
    let file = std::fs::File::open(path)?;
    parse_quotes(file, default_as_of)
}

/// Load sentiment samples from a CSV file.
pub fn load_samples(
    path: &Path,
    default_as_of: DateTime<Utc>,
) -> Result<Vec<SentimentSample>, DataError> {
    let file = std::fs::File::open(path)?;
    parse_samples(file, default_as_of)
}

/// Load a trade script from a CSV file.
pub fn load_trades(path: &Path) -> Result<Vec<TradeInstruction>, DataError> {
    let file = std::fs::File::open(path)?;
    parse_trades(file)
}

fn parse_quotes<R: Read>(input: R, default_as_of: DateTime<Utc>) -> Result<Vec<Quote>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut quotes = Vec::new();
    for result in reader.deserialize() {
        let record: QuoteRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

        let as_of = match record.asof.as_deref() {
            Some(raw) => parse_timestamp(raw)?,
            None => default_as_of,
        };

        let mut quote = Quote::new(&record.symbol, record.price, as_of)
            .with_percent_change(record.change.unwrap_or_default())
            .with_volume(record.volume.unwrap_or_default());
        if let Some(market_cap) = record.marketcap {
            quote = quote.with_market_cap(market_cap);
        }
        quotes.push(quote);
    }

    Ok(quotes)
}

fn parse_samples<R: Read>(
    input: R,
    default_as_of: DateTime<Utc>,
) -> Result<Vec<SentimentSample>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut samples = Vec::new();
    for result in reader.deserialize() {
        let record: SampleRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

        let source: SourceKind = record
            .source
            .parse()
            .map_err(DataError::ParseError)?;
        let as_of = match record.asof.as_deref() {
            Some(raw) => parse_timestamp(raw)?,
            None => default_as_of,
        };

        samples.push(SentimentSample::new(
            &record.symbol,
            source,
            record.score,
            as_of,
        ));
    }

    Ok(samples)
}

fn parse_trades<R: Read>(input: R) -> Result<Vec<TradeInstruction>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut trades = Vec::new();
    for result in reader.deserialize() {
        let record: TradeRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        let action: TradeAction = record.action.parse().map_err(DataError::ParseError)?;
        trades.push(TradeInstruction {
            symbol: normalize_symbol(&record.symbol),
            action,
            quantity: record.quantity,
        });
    }

    Ok(trades)
}

/// Parse the timestamp formats the seed files use.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DataError> {
    let formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d"];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt.and_utc());
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc());
            }
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Unix seconds as a last resort.
    if let Ok(secs) = raw.parse::<i64>() {
        if let Some(dt) = DateTime::from_timestamp(secs, 0) {
            return Ok(dt);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse timestamp: {}",
        raw
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2026-01-15").is_ok());
        assert!(parse_timestamp("2026-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("2026-01-15T10:30:00").is_ok());
        assert!(parse_timestamp("2026-01-15T10:30:00+00:00").is_ok());
        assert!(parse_timestamp("1705312800").is_ok());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_parse_quotes() {
        let csv = "\
symbol,price,change,volume,market_cap,as_of
aapl,150.25,1.2,1000000,2500000000000,2026-01-15
MSFT,310.00,,,,
";
        let quotes = parse_quotes(csv.as_bytes(), Utc::now()).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol, "AAPL");
        assert_eq!(quotes[0].price, dec!(150.25));
        assert_eq!(quotes[0].volume, 1_000_000);
        assert!(quotes[0].market_cap.is_some());
        assert_eq!(quotes[1].symbol, "MSFT");
        assert_eq!(quotes[1].percent_change, Decimal::ZERO);
    }

    #[test]
    fn test_parse_samples() {
        let csv = "\
symbol,source,score,as_of
AAPL,news,0.8,2026-01-15
AAPL,social,0.2,
MSFT,analyst,-0.4,2026-01-15 09:00:00
";
        let samples = parse_samples(csv.as_bytes(), Utc::now()).unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].source, SourceKind::News);
        assert_eq!(samples[0].score, dec!(0.8));
        assert_eq!(samples[2].symbol, "MSFT");
    }

    #[test]
    fn test_parse_trades() {
        let csv = "\
action,symbol,quantity
buy,aapl,10
BUY,AAPL,10
sell,AAPL,5
";
        let trades = parse_trades(csv.as_bytes()).unwrap();

        assert_eq!(trades.len(), 3);
        assert_eq!(trades[0].symbol, "AAPL");
        assert_eq!(trades[0].action, TradeAction::Buy);
        assert_eq!(trades[2].action, TradeAction::Sell);
        assert_eq!(trades[2].quantity, 5);
    }

    #[test]
    fn test_unknown_source_rejected() {
        let csv = "symbol,source,score\nAAPL,fear,0.5\n";
        let err = parse_samples(csv.as_bytes(), Utc::now());
        assert!(matches!(err, Err(DataError::ParseError(_))));
    }
}
