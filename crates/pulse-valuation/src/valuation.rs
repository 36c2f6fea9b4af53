//! Holding valuation.

use pulse_core::error::ValuationError;
use pulse_core::types::{Holding, Quote};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Valuation of a holding against a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Quantity x quote price
    pub market_value: Decimal,
    /// Market value minus cost basis
    pub unrealized_pnl: Decimal,
    /// Unrealized P/L as a percentage of cost basis
    pub unrealized_pnl_percent: Decimal,
}

/// A holding joined with the quote and valuation used to price it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionView {
    pub holding: Holding,
    pub quote: Quote,
    pub valuation: Valuation,
}

/// Totals across a set of position views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_market_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_unrealized_pnl: Decimal,
}

/// Value a holding against a quote.
///
/// Deterministic and stateless. The only failure mode is wiring two
/// different symbols together, which is a programmer error.
pub fn value(holding: &Holding, quote: &Quote) -> Result<Valuation, ValuationError> {
    if holding.symbol != quote.symbol {
        return Err(ValuationError::SymbolMismatch {
            holding: holding.symbol.clone(),
            quote: quote.symbol.clone(),
        });
    }

    let market_value = Decimal::from(holding.quantity) * quote.price;
    let cost_basis = holding.cost_basis();
    let unrealized_pnl = market_value - cost_basis;
    let unrealized_pnl_percent = if cost_basis == Decimal::ZERO {
        Decimal::ZERO
    } else {
        unrealized_pnl / cost_basis * dec!(100)
    };

    Ok(Valuation {
        market_value,
        unrealized_pnl,
        unrealized_pnl_percent,
    })
}

/// Sum totals across position views.
pub fn summarize(views: &[PositionView]) -> PortfolioSummary {
    let mut summary = PortfolioSummary::default();
    for view in views {
        summary.total_market_value += view.valuation.market_value;
        summary.total_cost_basis += view.holding.cost_basis();
        summary.total_unrealized_pnl += view.valuation.unrealized_pnl;
    }
    summary
}
