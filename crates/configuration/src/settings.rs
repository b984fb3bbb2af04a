use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Upper bound on the configured execution latency (24 hours). Keeps the
/// simulated timestamp offset safely inside `i64` milliseconds arithmetic.
pub const MAX_EXECUTION_LATENCY_MS: u64 = 86_400_000;

/// The root configuration for an execution engine.
///
/// Every field has a default, so an empty file (or `Config::default()`) is a
/// complete, valid configuration. Unknown keys are a hard error: a typo'd
/// option must fail at construction, never silently fall back to a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Starting cash balance in quote currency.
    #[serde(default = "default_initial_cash")]
    pub initial_cash: Decimal,

    /// Simulated order-path latency. In a backtest this becomes a logical
    /// timestamp offset on the settlement; live, latency occurs naturally
    /// on the wire and this value is not applied.
    #[serde(default = "default_execution_latency_ms")]
    pub execution_latency_ms: u64,

    #[serde(default)]
    pub slippage: SlippageConfig,

    #[serde(default)]
    pub fees: FeeConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Parameters of the slippage model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlippageConfig {
    /// Base slippage in basis points (1 bps = 0.01%).
    #[serde(default = "default_base_bps")]
    pub base_bps: Decimal,

    /// Scales the base and impact components in volatile markets.
    #[serde(default = "default_volatility_multiplier")]
    pub volatility_multiplier: Decimal,

    /// Ceiling on the market-impact fraction. With zero or missing 24h
    /// volume the impact saturates here instead of diverging.
    #[serde(default = "default_max_impact_pct")]
    pub max_impact_pct: Decimal,
}

/// Maker/taker fee tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeeConfig {
    /// Fee for orders that add liquidity, in basis points.
    #[serde(default = "default_maker_bps")]
    pub maker_bps: Decimal,

    /// Fee for orders that take liquidity, in basis points.
    #[serde(default = "default_taker_bps")]
    pub taker_bps: Decimal,
}

/// Exchange-style order constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Minimum order value in quote currency.
    #[serde(default = "default_min_notional")]
    pub min_notional: Decimal,

    /// Minimum tradable quantity increment; submitted quantities are
    /// rounded down to a multiple of this.
    #[serde(default = "default_lot_size")]
    pub lot_size: Decimal,

    /// Permit selling into a negative position. Off by default; pending
    /// product review, see the configuration notes in DESIGN.md.
    #[serde(default)]
    pub allow_short: bool,
}

fn default_initial_cash() -> Decimal {
    dec!(10_000)
}

fn default_execution_latency_ms() -> u64 {
    100
}

fn default_base_bps() -> Decimal {
    dec!(5)
}

fn default_volatility_multiplier() -> Decimal {
    Decimal::ONE
}

fn default_max_impact_pct() -> Decimal {
    dec!(0.05)
}

fn default_maker_bps() -> Decimal {
    dec!(10)
}

fn default_taker_bps() -> Decimal {
    dec!(20)
}

fn default_min_notional() -> Decimal {
    dec!(10)
}

fn default_lot_size() -> Decimal {
    dec!(0.00001)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_cash: default_initial_cash(),
            execution_latency_ms: default_execution_latency_ms(),
            slippage: SlippageConfig::default(),
            fees: FeeConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Default for SlippageConfig {
    fn default() -> Self {
        Self {
            base_bps: default_base_bps(),
            volatility_multiplier: default_volatility_multiplier(),
            max_impact_pct: default_max_impact_pct(),
        }
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            maker_bps: default_maker_bps(),
            taker_bps: default_taker_bps(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_notional: default_min_notional(),
            lot_size: default_lot_size(),
            allow_short: false,
        }
    }
}

impl Config {
    /// Checks the numeric sanity of every field. Run eagerly at
    /// construction so a bad configuration halts initialization instead of
    /// surfacing mid-session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(name: &str, value: Decimal) -> Result<(), ConfigError> {
            if value.is_sign_negative() {
                return Err(ConfigError::Validation(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
            Ok(())
        }

        non_negative("initial_cash", self.initial_cash)?;
        non_negative("slippage.base_bps", self.slippage.base_bps)?;
        non_negative(
            "slippage.volatility_multiplier",
            self.slippage.volatility_multiplier,
        )?;
        non_negative("slippage.max_impact_pct", self.slippage.max_impact_pct)?;
        non_negative("fees.maker_bps", self.fees.maker_bps)?;
        non_negative("fees.taker_bps", self.fees.taker_bps)?;
        non_negative("validation.min_notional", self.validation.min_notional)?;

        if self.validation.lot_size <= Decimal::ZERO {
            return Err(ConfigError::Validation(format!(
                "validation.lot_size must be positive, got {}",
                self.validation.lot_size
            )));
        }

        if self.execution_latency_ms > MAX_EXECUTION_LATENCY_MS {
            return Err(ConfigError::Validation(format!(
                "execution_latency_ms must be at most {MAX_EXECUTION_LATENCY_MS}, got {}",
                self.execution_latency_ms
            )));
        }

        Ok(())
    }
}
