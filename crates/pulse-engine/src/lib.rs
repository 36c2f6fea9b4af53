//! Order validation, execution, and the service facade.
//!
//! The executor is the only path that mutates ledger state; the service
//! wires it together with the adapters, the aggregator, and the
//! read-side views.

mod executor;
mod service;

pub use executor::{Executed, ExecutorConfig, OrderExecutor};
pub use service::{PulseService, ServiceConfig};
