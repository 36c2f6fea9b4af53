//! Core types and traits for the engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data snapshots (Quote, SentimentSample)
//! - Holding and trade types with the position transition rules
//! - The error taxonomy
//! - Traits for quote and sentiment adapters

pub mod types;
pub mod traits;
pub mod error;

pub use error::{PulseError, PulseResult};
pub use types::*;
pub use traits::*;
