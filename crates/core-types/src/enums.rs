use serde::{Deserialize, Serialize};

/// Where the engine's market data comes from. The execution logic itself is
/// identical in both modes; only the settlement delay's provenance differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Backtest,
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the opposite side of the order
    pub fn opposite(&self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    /// Limit orders rest on the book and add liquidity; market orders cross
    /// the spread and take it. This classification drives the fee tier and
    /// is part of the engine's contract, not a caller-supplied hint.
    pub fn is_maker(&self) -> bool {
        matches!(self, OrderType::Limit)
    }
}

/// The deterministic reasons an order can be refused before settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    InvalidQuantity,
    BelowLotSize,
    BelowMinNotional,
    InsufficientBalance,
    InsufficientPosition,
}
