use crate::error::ExecutorError;
use chrono::{DateTime, Utc};
use core_types::{ExecutionMode, OrderSide, PortfolioSnapshot};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// The state of the trading account: cash plus per-symbol position
/// quantities. Exclusively owned and mutated by the engine; its sole
/// responsibility is to reflect settled fills accurately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portfolio {
    pub cash: Decimal,
    pub positions: BTreeMap<String, Decimal>,
}

impl Portfolio {
    /// Creates a new `Portfolio` with a given amount of starting capital.
    pub fn new(initial_cash: Decimal) -> Self {
        Self {
            cash: initial_cash,
            positions: BTreeMap::new(),
        }
    }

    /// Applies a settled fill to the account as a single check-then-mutate
    /// step: if either the cash or the position constraint would be
    /// violated, nothing changes.
    ///
    /// Invariant on success: cash >= 0, and no position is negative unless
    /// `allow_short` is set.
    pub fn apply_fill(
        &mut self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        fill_price: Decimal,
        fee: Decimal,
        allow_short: bool,
    ) -> Result<(), ExecutorError> {
        let notional = fill_price * quantity;

        match side {
            OrderSide::Buy => {
                let total_cost = notional + fee;
                if total_cost > self.cash {
                    return Err(ExecutorError::InsufficientCash {
                        required: total_cost.to_string(),
                        available: self.cash.to_string(),
                    });
                }
                self.cash -= total_cost;
                *self.positions.entry(symbol.to_string()).or_insert(Decimal::ZERO) += quantity;
            }
            OrderSide::Sell => {
                let held = self.position(symbol);
                if !allow_short && quantity > held {
                    return Err(ExecutorError::InsufficientPosition {
                        requested: quantity.to_string(),
                        available: held.to_string(),
                    });
                }
                self.cash += notional - fee;
                *self.positions.entry(symbol.to_string()).or_insert(Decimal::ZERO) -= quantity;
            }
        }

        // Flat positions drop out of the map entirely.
        if self.position(symbol).is_zero() {
            self.positions.remove(symbol);
        }

        Ok(())
    }

    /// The held quantity for a symbol, zero when flat.
    pub fn position(&self, symbol: &str) -> Decimal {
        self.positions.get(symbol).copied().unwrap_or(Decimal::ZERO)
    }

    /// Captures the persistable state of the account.
    pub fn snapshot(&self, mode: ExecutionMode, timestamp: DateTime<Utc>) -> PortfolioSnapshot {
        PortfolioSnapshot {
            cash: self.cash,
            positions: self.positions.clone(),
            mode,
            timestamp,
        }
    }

    /// Restores the account exactly from a snapshot. This is the only way a
    /// portfolio reaches a nonzero state other than through settled fills.
    pub fn restore(&mut self, snapshot: &PortfolioSnapshot) {
        self.cash = snapshot.cash;
        self.positions = snapshot.positions.clone();
    }
}
