use crate::enums::{ExecutionMode, OrderSide, OrderType, RejectionReason};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// An order as submitted by the caller. Immutable once handed to the engine;
/// the validator may round the quantity down to the lot size, but that
/// adjusted quantity is reported back in the result rather than written here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Trading pair symbol (e.g., "BTC/USD").
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    /// Order quantity in base currency.
    pub quantity: Decimal,
    /// Reference price for a market order, limit price for a limit order.
    pub price: Decimal,
}

impl Order {
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price,
        }
    }

    pub fn limit(symbol: impl Into<String>, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price,
        }
    }

    /// Gross value of the order at its reference price.
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}

/// A per-call snapshot of market conditions, supplied by the caller.
/// In a backtest these come from historical data; live, from a market-data
/// feed. The engine treats both identically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketContext {
    /// 24-hour traded volume in base currency. Drives the market-impact
    /// component of slippage.
    pub volume_24h: Decimal,
    /// Bid-ask spread as a fraction of price (0.001 = 0.1%).
    pub spread_pct: Decimal,
    /// Dimensionless volatility measure; 0 means calm.
    pub volatility: Decimal,
}

impl Default for MarketContext {
    fn default() -> Self {
        Self {
            volume_24h: dec!(1_000_000),
            spread_pct: dec!(0.001),
            volatility: Decimal::ZERO,
        }
    }
}

/// The immutable receipt written to the execution log, one per submitted
/// order, accepted or not. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub record_id: Uuid,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    /// Quantity after lot-size rounding (the quantity that actually traded,
    /// or would have).
    pub quantity: Decimal,
    /// The caller's reference price.
    pub expected_price: Decimal,
    /// The realized price after slippage. Equals `expected_price` on
    /// rejection.
    pub fill_price: Decimal,
    /// Slippage magnitude in quote currency.
    pub slippage: Decimal,
    /// Fee in quote currency, on the post-slippage notional.
    pub fee: Decimal,
    pub is_maker: bool,
    pub mode: ExecutionMode,
    pub timestamp: DateTime<Utc>,
    pub accepted: bool,
    pub rejection_reason: Option<RejectionReason>,
}

/// What `execute_order` hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub accepted: bool,
    pub symbol: String,
    pub side: OrderSide,
    /// Lot-rounded quantity that settled (zero-cost on rejection).
    pub quantity: Decimal,
    pub expected_price: Decimal,
    pub fill_price: Decimal,
    pub slippage: Decimal,
    pub fee: Decimal,
    pub is_maker: bool,
    pub rejection_reason: Option<RejectionReason>,
    /// Portfolio state after this call settled (or didn't).
    pub cash: Decimal,
    pub positions: BTreeMap<String, Decimal>,
}

/// The persisted portfolio state, written by `save_state` and read back by
/// `load_state` at restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub cash: Decimal,
    pub positions: BTreeMap<String, Decimal>,
    pub mode: ExecutionMode,
    pub timestamp: DateTime<Utc>,
}
