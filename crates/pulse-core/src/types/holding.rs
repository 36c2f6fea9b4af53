//! Holding type and position transition rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{normalize_symbol, Trade, TradeAction};
use crate::error::LedgerError;

/// An open position in a single security.
///
/// Invariant: `quantity` > 0 for every stored holding. A position whose
/// quantity reaches zero is removed, not retained at zero, so
/// `average_cost` is always meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Owning user
    pub user_id: Uuid,
    /// Uppercase ticker symbol
    pub symbol: String,
    /// Number of shares held
    pub quantity: u64,
    /// Weighted-average price paid per share
    pub average_cost: Decimal,
}

impl Holding {
    /// Open a new position.
    pub fn open(user_id: Uuid, symbol: &str, quantity: u64, average_cost: Decimal) -> Self {
        Self {
            user_id,
            symbol: normalize_symbol(symbol),
            quantity,
            average_cost,
        }
    }

    /// Total cost of the position (quantity x average cost).
    pub fn cost_basis(&self) -> Decimal {
        Decimal::from(self.quantity) * self.average_cost
    }
}

/// Apply a trade to the prior state of its (user, symbol) position.
///
/// Pure function over the pre-trade snapshot: returns the replacement
/// state (`None` when the position closes) and the realized P/L on the
/// sold quantity (zero for buys). Callers serialize invocations per
/// (user, symbol) and swap the returned state in atomically; no partial
/// update exists in between.
pub fn apply_trade(
    prior: Option<&Holding>,
    trade: &Trade,
) -> Result<(Option<Holding>, Decimal), LedgerError> {
    match trade.action {
        TradeAction::Buy => {
            let next = match prior {
                None => Holding::open(
                    trade.user_id,
                    &trade.symbol,
                    trade.quantity,
                    trade.execution_price,
                ),
                Some(held) => {
                    let quantity = held.quantity + trade.quantity;
                    let total_cost = held.cost_basis() + trade.notional();
                    Holding {
                        quantity,
                        average_cost: total_cost / Decimal::from(quantity),
                        ..held.clone()
                    }
                }
            };
            Ok((Some(next), Decimal::ZERO))
        }
        TradeAction::Sell => match prior {
            Some(held) if trade.quantity <= held.quantity => {
                let realized =
                    Decimal::from(trade.quantity) * (trade.execution_price - held.average_cost);
                let remaining = held.quantity - trade.quantity;
                // Selling never moves the average cost; realized P/L
                // belongs to the trade event, not the residual position.
                let next = (remaining > 0).then(|| Holding {
                    quantity: remaining,
                    ..held.clone()
                });
                Ok((next, realized))
            }
            _ => Err(LedgerError::InsufficientPosition {
                symbol: trade.symbol.clone(),
                requested: trade.quantity,
                held: prior.map_or(0, |held| held.quantity),
            }),
        },
    }
}
