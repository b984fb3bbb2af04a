use crate::cost::FeeModel;
use crate::portfolio::Portfolio;
use configuration::ValidationConfig;
use core_types::{Order, OrderSide, RejectionReason};
use rust_decimal::Decimal;

/// Checks an order against exchange-style constraints and the portfolio's
/// available balance.
///
/// Validation is a pure predicate: no side effects, no mode awareness, and a
/// fixed check order so the first failing rule always wins. Running the same
/// rule set in backtest and live is the central parity guarantee of the
/// whole engine.
#[derive(Debug, Clone)]
pub struct OrderValidator {
    min_notional: Decimal,
    lot_size: Decimal,
    allow_short: bool,
}

impl OrderValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            min_notional: config.min_notional,
            lot_size: config.lot_size,
            allow_short: config.allow_short,
        }
    }

    /// Validates an order, returning the lot-rounded quantity on acceptance
    /// or the first failing rule on rejection.
    ///
    /// Check order is part of the contract:
    /// 1. quantity must be positive;
    /// 2. quantity is rounded down to a `lot_size` multiple, rejecting if
    ///    nothing remains;
    /// 3. the rounded notional must clear `min_notional`;
    /// 4. a buy must be affordable including the estimated fee; a sell must
    ///    be covered by the existing position unless shorting is enabled.
    pub fn validate(
        &self,
        order: &Order,
        portfolio: &Portfolio,
        fees: &FeeModel,
    ) -> Result<Decimal, RejectionReason> {
        if order.quantity <= Decimal::ZERO {
            tracing::warn!(symbol = %order.symbol, quantity = %order.quantity, "rejected: non-positive quantity");
            return Err(RejectionReason::InvalidQuantity);
        }

        let quantity = self.round_quantity(order.quantity);
        if quantity.is_zero() {
            tracing::warn!(
                symbol = %order.symbol,
                quantity = %order.quantity,
                lot_size = %self.lot_size,
                "rejected: quantity below lot size"
            );
            return Err(RejectionReason::BelowLotSize);
        }

        let notional = order.price * quantity;
        if notional < self.min_notional {
            tracing::warn!(
                symbol = %order.symbol,
                %notional,
                min_notional = %self.min_notional,
                "rejected: notional below minimum"
            );
            return Err(RejectionReason::BelowMinNotional);
        }

        match order.side {
            OrderSide::Buy => {
                // Fee estimated at the reference price; settlement re-checks
                // affordability at the fill price.
                let estimated_fee = fees.fee(notional, order.order_type.is_maker());
                if portfolio.cash < notional + estimated_fee {
                    tracing::warn!(
                        symbol = %order.symbol,
                        required = %(notional + estimated_fee),
                        available = %portfolio.cash,
                        "rejected: insufficient balance"
                    );
                    return Err(RejectionReason::InsufficientBalance);
                }
            }
            OrderSide::Sell => {
                if !self.allow_short && portfolio.position(&order.symbol) < quantity {
                    tracing::warn!(
                        symbol = %order.symbol,
                        requested = %quantity,
                        held = %portfolio.position(&order.symbol),
                        "rejected: insufficient position"
                    );
                    return Err(RejectionReason::InsufficientPosition);
                }
            }
        }

        Ok(quantity)
    }

    /// Rounds a quantity down to the nearest lot-size multiple.
    pub fn round_quantity(&self, quantity: Decimal) -> Decimal {
        (quantity / self.lot_size).floor() * self.lot_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::FeeConfig;
    use core_types::OrderType;
    use rust_decimal_macros::dec;

    fn validator(min_notional: Decimal, lot_size: Decimal) -> OrderValidator {
        OrderValidator::new(&ValidationConfig {
            min_notional,
            lot_size,
            allow_short: false,
        })
    }

    fn fees() -> FeeModel {
        FeeModel::new(&FeeConfig {
            maker_bps: dec!(10),
            taker_bps: dec!(20),
        })
    }

    #[test]
    fn accepts_valid_order() {
        let portfolio = Portfolio::new(dec!(10_000));
        let order = Order::market("BTC/USD", OrderSide::Buy, dec!(0.001), dec!(50000));
        let quantity = validator(dec!(10), dec!(0.00001))
            .validate(&order, &portfolio, &fees())
            .unwrap();
        assert_eq!(quantity, dec!(0.001));
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let portfolio = Portfolio::new(dec!(10_000));
        let order = Order::market("BTC/USD", OrderSide::Buy, dec!(0), dec!(50000));
        let reason = validator(dec!(10), dec!(0.00001))
            .validate(&order, &portfolio, &fees())
            .unwrap_err();
        assert_eq!(reason, RejectionReason::InvalidQuantity);
    }

    #[test]
    fn rejects_quantity_that_rounds_to_zero() {
        let portfolio = Portfolio::new(dec!(10_000));
        let order = Order::market("BTC/USD", OrderSide::Buy, dec!(0.00001), dec!(50000));
        let reason = validator(dec!(10), dec!(0.001))
            .validate(&order, &portfolio, &fees())
            .unwrap_err();
        assert_eq!(reason, RejectionReason::BelowLotSize);
    }

    #[test]
    fn rejects_below_min_notional() {
        let portfolio = Portfolio::new(dec!(10_000));
        let order = Order::market("BTC/USD", OrderSide::Buy, dec!(0.08), dec!(50));
        let reason = validator(dec!(10), dec!(0.00001))
            .validate(&order, &portfolio, &fees())
            .unwrap_err();
        assert_eq!(reason, RejectionReason::BelowMinNotional);
    }

    #[test]
    fn rejects_unaffordable_buy() {
        let portfolio = Portfolio::new(dec!(100));
        let order = Order::market("BTC/USD", OrderSide::Buy, dec!(1), dec!(50000));
        let reason = validator(dec!(10), dec!(0.00001))
            .validate(&order, &portfolio, &fees())
            .unwrap_err();
        assert_eq!(reason, RejectionReason::InsufficientBalance);
    }

    #[test]
    fn buy_check_includes_estimated_fee() {
        // Exactly enough for the notional, but not the taker fee on top.
        let portfolio = Portfolio::new(dec!(5000));
        let order = Order::market("BTC/USD", OrderSide::Buy, dec!(0.1), dec!(50000));
        let reason = validator(dec!(10), dec!(0.00001))
            .validate(&order, &portfolio, &fees())
            .unwrap_err();
        assert_eq!(reason, RejectionReason::InsufficientBalance);
    }

    #[test]
    fn rejects_uncovered_sell() {
        let portfolio = Portfolio::new(dec!(10_000));
        let order = Order::market("BTC/USD", OrderSide::Sell, dec!(0.1), dec!(50000));
        let reason = validator(dec!(10), dec!(0.00001))
            .validate(&order, &portfolio, &fees())
            .unwrap_err();
        assert_eq!(reason, RejectionReason::InsufficientPosition);
    }

    #[test]
    fn allow_short_skips_position_check() {
        let v = OrderValidator::new(&ValidationConfig {
            min_notional: dec!(10),
            lot_size: dec!(0.00001),
            allow_short: true,
        });
        let portfolio = Portfolio::new(dec!(10_000));
        let order = Order::market("BTC/USD", OrderSide::Sell, dec!(0.1), dec!(50000));
        assert!(v.validate(&order, &portfolio, &fees()).is_ok());
    }

    #[test]
    fn lot_size_precedes_min_notional() {
        // Fails both rules; the lot-size check must win.
        let portfolio = Portfolio::new(dec!(10_000));
        let order = Order::market("BTC/USD", OrderSide::Buy, dec!(0.0001), dec!(50));
        let reason = validator(dec!(1000), dec!(0.001))
            .validate(&order, &portfolio, &fees())
            .unwrap_err();
        assert_eq!(reason, RejectionReason::BelowLotSize);
    }

    #[test]
    fn round_quantity_floors_to_lot() {
        let v = validator(dec!(10), dec!(0.00001));
        assert_eq!(v.round_quantity(dec!(0.123456)), dec!(0.12345));
        assert_eq!(v.round_quantity(dec!(0.12345)), dec!(0.12345));
    }
}
