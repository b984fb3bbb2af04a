pub mod enums;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{ExecutionMode, OrderSide, OrderType, RejectionReason};
pub use structs::{ExecutionRecord, ExecutionResult, MarketContext, Order, PortfolioSnapshot};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn order_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn limit_orders_are_makers() {
        assert!(OrderType::Limit.is_maker());
        assert!(!OrderType::Market.is_maker());
    }

    #[test]
    fn order_notional() {
        let order = Order::market("BTC/USD", OrderSide::Buy, dec!(0.1), dec!(50000));
        assert_eq!(order.notional(), dec!(5000.0));
    }

    #[test]
    fn market_context_defaults() {
        let ctx = MarketContext::default();
        assert_eq!(ctx.volume_24h, dec!(1_000_000));
        assert_eq!(ctx.spread_pct, dec!(0.001));
        assert_eq!(ctx.volatility, dec!(0));
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ExecutionMode::Backtest).unwrap(),
            "\"backtest\""
        );
        assert_eq!(serde_json::to_string(&ExecutionMode::Live).unwrap(), "\"live\"");
    }

    #[test]
    fn rejection_reason_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&RejectionReason::BelowMinNotional).unwrap(),
            "\"BELOW_MIN_NOTIONAL\""
        );
    }
}
