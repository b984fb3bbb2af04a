//! # Parity Executor Crate
//!
//! This crate provides the pure building blocks of realistic order
//! execution: the cost models that price slippage and fees, the validator
//! that enforces exchange-style constraints, and the `Portfolio` state
//! manager that applies settled fills.
//!
//! ## Architectural Principles
//!
//! - **State vs. Logic Decoupling:** `SlippageModel`, `FeeModel`, and
//!   `OrderValidator` are pure calculators; they never touch account state.
//!   `Portfolio` is the state machine that applies the results. This
//!   separation is key for testability and for the backtest/live parity
//!   guarantee: none of the calculators can observe the execution mode.
//! - **Atomic Mutation:** `Portfolio::apply_fill` is check-then-mutate; a
//!   failed constraint leaves the account exactly as it was.
//!
//! ## Public API
//!
//! - `SlippageModel` / `FeeModel`: the cost models.
//! - `OrderValidator`: the exchange-constraint predicate.
//! - `Portfolio`: the in-memory state manager for a trading account.
//! - `ExecutorError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod cost;
pub mod error;
pub mod portfolio;
pub mod validator;

// Re-export the key components to provide a clean, public-facing API.
pub use cost::{FeeModel, SlippageModel};
pub use error::ExecutorError;
pub use portfolio::Portfolio;
pub use validator::OrderValidator;
