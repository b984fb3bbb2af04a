//! The execution orchestrator.
//!
//! `Engine` drives every submitted order through one state machine,
//! `Received → Validated → Priced → Delayed → Settled` (or `Rejected`),
//! calling the pure cost models and validator, mutating the portfolio, and
//! appending exactly one record to the execution log per submission.
//!
//! The mode (`Backtest` or `Live`) is fixed at construction and consulted in
//! exactly one place: the provenance of the settlement delay. Everything
//! else (validation, pricing, settlement arithmetic) runs the identical
//! code path, which is what makes backtest results trustworthy predictors
//! of live behavior.

use chrono::{DateTime, Duration, Utc};
use configuration::Config;
use core_types::{
    ExecutionMode, ExecutionRecord, ExecutionResult, MarketContext, Order, OrderSide,
    PortfolioSnapshot, RejectionReason,
};
use execution_log::{ExecutionLog, ExecutionStats};
use executor::{ExecutorError, FeeModel, OrderValidator, Portfolio, SlippageModel};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub mod error;

pub use error::EngineError;

/// The lifecycle of a single order inside `execute_order`. Terminal states
/// are `Settled` and `Rejected`; there is no cancellation, so a validated
/// order always reaches one of them within the same call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Received,
    Validated,
    Priced,
    Delayed,
    Settled,
    Rejected,
}

/// The execution orchestrator. Owns the portfolio and the execution log;
/// processes one order at a time, fully, before the next.
pub struct Engine {
    mode: ExecutionMode,
    config: Config,
    slippage_model: SlippageModel,
    fee_model: FeeModel,
    validator: OrderValidator,
    portfolio: Portfolio,
    log: ExecutionLog,
}

impl Engine {
    /// Builds an engine for the given mode. The configuration is validated
    /// eagerly: a malformed configuration halts construction rather than
    /// surfacing mid-session.
    pub fn new(mode: ExecutionMode, config: Config, log: ExecutionLog) -> Result<Self, EngineError> {
        config.validate()?;

        let slippage_model = SlippageModel::new(&config.slippage);
        let fee_model = FeeModel::new(&config.fees);
        let validator = OrderValidator::new(&config.validation);
        let portfolio = Portfolio::new(config.initial_cash);

        tracing::info!(?mode, initial_cash = %config.initial_cash, "engine initialized");

        Ok(Self {
            mode,
            config,
            slippage_model,
            fee_model,
            validator,
            portfolio,
            log,
        })
    }

    /// Prices and settles one order against the portfolio.
    ///
    /// A validation or settlement failure is a normal negative outcome: it
    /// is logged, returned as `accepted = false` with a reason, and never
    /// raised as an error. `Err` is reserved for faults outside the order's
    /// lifecycle (none arise in the in-memory path today).
    pub fn execute_order(
        &mut self,
        order: &Order,
        market: &MarketContext,
    ) -> Result<ExecutionResult, EngineError> {
        tracing::info!(
            symbol = %order.symbol,
            side = ?order.side,
            quantity = %order.quantity,
            price = %order.price,
            "order received"
        );
        self.transition(OrderState::Received);

        // --- VALIDATED ---
        let quantity = match self.validator.validate(order, &self.portfolio, &self.fee_model) {
            Ok(quantity) => quantity,
            Err(reason) => {
                self.transition(OrderState::Rejected);
                return Ok(self.reject(order, order.quantity, reason));
            }
        };
        self.transition(OrderState::Validated);

        // --- PRICED ---
        // Slippage is a quote-currency magnitude; the fill price moves by
        // the per-unit share so that fill * qty == price * qty ± slippage.
        let slippage = self.slippage_model.slippage(order.price, quantity, market);
        let per_unit = slippage / quantity;
        let fill_price = match order.side {
            OrderSide::Buy => order.price + per_unit,
            OrderSide::Sell => order.price - per_unit,
        };
        let is_maker = order.order_type.is_maker();
        let fee = self.fee_model.fee(fill_price * quantity, is_maker);
        self.transition(OrderState::Priced);

        // --- DELAYED ---
        // The single mode-dependent decision point in the engine.
        let timestamp = self.settlement_timestamp(Utc::now());
        self.transition(OrderState::Delayed);

        // --- SETTLED ---
        // Critical section: the fill is applied check-then-mutate and the
        // log append is infallible, so the portfolio mutation and its
        // record land together or not at all.
        match self.portfolio.apply_fill(
            &order.symbol,
            order.side,
            quantity,
            fill_price,
            fee,
            self.config.validation.allow_short,
        ) {
            Ok(()) => {
                let record = ExecutionRecord {
                    record_id: Uuid::new_v4(),
                    symbol: order.symbol.clone(),
                    side: order.side,
                    order_type: order.order_type,
                    quantity,
                    expected_price: order.price,
                    fill_price,
                    slippage,
                    fee,
                    is_maker,
                    mode: self.mode,
                    timestamp,
                    accepted: true,
                    rejection_reason: None,
                };
                let result = self.result_from(&record);
                self.log.record(record);
                self.transition(OrderState::Settled);

                tracing::info!(
                    symbol = %order.symbol,
                    %fill_price,
                    %slippage,
                    %fee,
                    "order settled"
                );
                Ok(result)
            }
            Err(err) => {
                // Slippage can push the realized cost past what validation
                // estimated at the reference price; the account stays
                // untouched and the order ends as a rejection.
                let reason = match err {
                    ExecutorError::InsufficientCash { .. } => RejectionReason::InsufficientBalance,
                    ExecutorError::InsufficientPosition { .. } => {
                        RejectionReason::InsufficientPosition
                    }
                };
                self.transition(OrderState::Rejected);
                Ok(self.reject(order, quantity, reason))
            }
        }
    }

    /// Aggregate statistics folded from the execution log.
    pub fn execution_stats(&self) -> ExecutionStats {
        self.log.stats()
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn log(&self) -> &ExecutionLog {
        &self.log
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Captures the portfolio for persistence.
    pub fn save_state(&self) -> PortfolioSnapshot {
        self.portfolio.snapshot(self.mode, Utc::now())
    }

    /// Restores the portfolio exactly from a snapshot. Together with
    /// `initial_cash` at construction, this is the only way the portfolio
    /// reaches a given state other than through settled fills.
    pub fn load_state(&mut self, snapshot: &PortfolioSnapshot) {
        self.portfolio.restore(snapshot);
        tracing::info!(cash = %self.portfolio.cash, "portfolio state restored");
    }

    /// Writes the current snapshot to `path` as JSON.
    pub fn save_state_to_file(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let snapshot = self.save_state();
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path.as_ref(), json)?;
        tracing::info!(path = %path.as_ref().display(), "portfolio state saved");
        Ok(())
    }

    /// Reads a snapshot written by `save_state_to_file` and restores it.
    pub fn load_state_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let json = fs::read_to_string(path.as_ref())?;
        let snapshot: PortfolioSnapshot = serde_json::from_str(&json)?;
        self.load_state(&snapshot);
        Ok(())
    }

    /// Ends the session: persists the execution log and the portfolio
    /// snapshot, then reports the final statistics.
    pub fn finalize(
        &self,
        log_path: impl AsRef<Path>,
        state_path: impl AsRef<Path>,
    ) -> Result<ExecutionStats, EngineError> {
        self.log.save_to_file(log_path)?;
        self.save_state_to_file(state_path)?;

        let stats = self.execution_stats();
        tracing::info!(
            total_orders = stats.total_orders,
            total_fees = %stats.total_fees,
            total_slippage = %stats.total_slippage,
            "session finalized"
        );
        Ok(stats)
    }

    /// Where the settlement timestamp comes from; this is the only place
    /// the engine consults its mode. A backtest stamps the configured latency
    /// as a logical offset (no wall-clock wait, so subsequent orders are
    /// not stalled); live, the order path itself supplies the delay.
    fn settlement_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.mode {
            ExecutionMode::Backtest => {
                // `Config::validate` caps the latency at
                // MAX_EXECUTION_LATENCY_MS, so the conversion cannot wrap.
                let latency_ms =
                    self.config.execution_latency_ms.min(configuration::MAX_EXECUTION_LATENCY_MS);
                now + Duration::milliseconds(latency_ms as i64)
            }
            ExecutionMode::Live => now,
        }
    }

    /// Logs a rejection record and shapes the caller-facing result. The
    /// record carries the reference price as the fill price and zero cost;
    /// rejected orders never traverse the delay, so they are stamped with
    /// the submission time.
    fn reject(&mut self, order: &Order, quantity: Decimal, reason: RejectionReason) -> ExecutionResult {
        let record = ExecutionRecord {
            record_id: Uuid::new_v4(),
            symbol: order.symbol.clone(),
            side: order.side,
            order_type: order.order_type,
            quantity,
            expected_price: order.price,
            fill_price: order.price,
            slippage: Decimal::ZERO,
            fee: Decimal::ZERO,
            is_maker: order.order_type.is_maker(),
            mode: self.mode,
            timestamp: Utc::now(),
            accepted: false,
            rejection_reason: Some(reason),
        };
        let result = self.result_from(&record);
        self.log.record(record);
        result
    }

    fn result_from(&self, record: &ExecutionRecord) -> ExecutionResult {
        ExecutionResult {
            accepted: record.accepted,
            symbol: record.symbol.clone(),
            side: record.side,
            quantity: record.quantity,
            expected_price: record.expected_price,
            fill_price: record.fill_price,
            slippage: record.slippage,
            fee: record.fee,
            is_maker: record.is_maker,
            rejection_reason: record.rejection_reason,
            cash: self.portfolio.cash,
            positions: self.portfolio.positions.clone(),
        }
    }

    fn transition(&self, state: OrderState) {
        tracing::debug!(?state, "order state");
    }
}
