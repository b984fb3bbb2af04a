use configuration::{FeeConfig, SlippageConfig};
use core_types::MarketContext;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Divisor floor so a zero or dust-level 24h volume cannot blow up the
/// participation ratio. The impact cap below is what actually bounds the
/// result.
const VOLUME_FLOOR: Decimal = dec!(0.000000001);

/// Impact fraction contributed per unit of volume participation. An order
/// that is 0.01% of the 24h volume costs 50 * 0.0001 = 50 bps of impact.
const IMPACT_COEFFICIENT: Decimal = dec!(50);

const BPS_DENOMINATOR: Decimal = dec!(10_000);

/// Models the price degradation of an order as it works through the book.
///
/// Slippage grows with order size relative to volume, with volatility, and
/// with the width of the spread. The returned amount is a magnitude in quote
/// currency; the direction (against the trader) is applied by the caller.
///
/// The model is pure and mode-independent: given identical inputs it returns
/// identical outputs whether the engine is backtesting or live.
#[derive(Debug, Clone)]
pub struct SlippageModel {
    base_bps: Decimal,
    volatility_multiplier: Decimal,
    max_impact_pct: Decimal,
}

impl SlippageModel {
    pub fn new(config: &SlippageConfig) -> Self {
        Self {
            base_bps: config.base_bps,
            volatility_multiplier: config.volatility_multiplier,
            max_impact_pct: config.max_impact_pct,
        }
    }

    /// Calculates the slippage for an order in quote currency.
    ///
    /// Three components, summed as fractions of notional:
    /// - a flat base cost (`base_bps`);
    /// - market impact, linear in `quantity / volume_24h` and capped at
    ///   `max_impact_pct` so that an empty or unknown market saturates
    ///   instead of diverging;
    /// - half the bid-ask spread (the cost of crossing it).
    ///
    /// The base and impact components scale with volatility; the spread is
    /// already an observed market width and is not scaled again.
    pub fn slippage(&self, price: Decimal, quantity: Decimal, market: &MarketContext) -> Decimal {
        let base = self.base_bps / BPS_DENOMINATOR;

        let participation = quantity / market.volume_24h.max(VOLUME_FLOOR);
        let impact = (participation * IMPACT_COEFFICIENT).min(self.max_impact_pct);

        let volatility_scale = Decimal::ONE + market.volatility * self.volatility_multiplier;
        let fraction = (base + impact) * volatility_scale + market.spread_pct / dec!(2);

        let slippage = price * quantity * fraction;
        tracing::debug!(
            %price,
            %quantity,
            volume_24h = %market.volume_24h,
            %fraction,
            %slippage,
            "slippage calculated"
        );
        slippage
    }
}

/// Maker/taker fee schedule.
#[derive(Debug, Clone)]
pub struct FeeModel {
    maker_bps: Decimal,
    taker_bps: Decimal,
}

impl FeeModel {
    pub fn new(config: &FeeConfig) -> Self {
        Self {
            maker_bps: config.maker_bps,
            taker_bps: config.taker_bps,
        }
    }

    /// Calculates the trading fee on a notional value in quote currency.
    pub fn fee(&self, notional: Decimal, is_maker: bool) -> Decimal {
        let bps = if is_maker { self.maker_bps } else { self.taker_bps };
        notional * bps / BPS_DENOMINATOR
    }
}
