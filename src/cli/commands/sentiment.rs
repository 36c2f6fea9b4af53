//! Sentiment command implementation.

use anyhow::Result;
use chrono::Utc;
use pulse_data::{load_samples, StaticMarketData};
use pulse_engine::PulseService;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::cli::SentimentArgs;

use super::service_config;

pub async fn run(args: SentimentArgs, config_path: &Path) -> Result<()> {
    let config = pulse_config::load_or_default(config_path)?;

    let market = Arc::new(StaticMarketData::new());
    let samples = load_samples(&args.samples, Utc::now())?;
    info!("Loaded {} sentiment sample(s)", samples.len());
    for sample in samples {
        market.push_sample(sample);
    }

    let service = PulseService::new(service_config(&config, None), market.clone(), market);
    let composite = service.composite(&args.symbol).await?;

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&composite)?);
    } else {
        println!("Composite sentiment for {}: {}", composite.symbol, composite.composite);
        for (kind, score) in &composite.per_source {
            println!("  {:<8} {}", kind.to_string(), score);
        }
    }

    Ok(())
}
