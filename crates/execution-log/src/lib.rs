//! Append-only record store for order executions.
//!
//! Every submitted order, settled or rejected, produces exactly one
//! `ExecutionRecord`, appended here and never touched again. Aggregate
//! statistics are recomputed as a fold over the full log on every query
//! rather than maintained incrementally, so a restart that reloads the log
//! can never drift from the records it holds.

use core_types::{ExecutionRecord, RejectionReason};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub mod error;

pub use error::ExecutionLogError;

/// Aggregate statistics folded from the full execution log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStats {
    /// Every submission, accepted or not.
    pub total_orders: u64,
    pub accepted_orders: u64,
    pub total_slippage: Decimal,
    /// Mean slippage per accepted order; zero when nothing settled.
    pub avg_slippage: Decimal,
    pub total_fees: Decimal,
    /// Mean fee per accepted order; zero when nothing settled.
    pub avg_fees: Decimal,
    pub rejections: BTreeMap<RejectionReason, u64>,
}

/// The append-only execution log.
#[derive(Debug, Default)]
pub struct ExecutionLog {
    records: Vec<ExecutionRecord>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Prior entries are never mutated or removed.
    pub fn record(&mut self, record: ExecutionRecord) {
        tracing::debug!(
            record_id = %record.record_id,
            symbol = %record.symbol,
            accepted = record.accepted,
            "execution recorded"
        );
        self.records.push(record);
    }

    /// Folds the aggregate statistics from every record in the log.
    pub fn stats(&self) -> ExecutionStats {
        let mut stats = ExecutionStats {
            total_orders: 0,
            accepted_orders: 0,
            total_slippage: Decimal::ZERO,
            avg_slippage: Decimal::ZERO,
            total_fees: Decimal::ZERO,
            avg_fees: Decimal::ZERO,
            rejections: BTreeMap::new(),
        };

        for record in &self.records {
            stats.total_orders += 1;
            if record.accepted {
                stats.accepted_orders += 1;
                stats.total_slippage += record.slippage;
                stats.total_fees += record.fee;
            } else if let Some(reason) = record.rejection_reason {
                *stats.rejections.entry(reason).or_insert(0) += 1;
            }
        }

        if stats.accepted_orders > 0 {
            let accepted = Decimal::from(stats.accepted_orders);
            stats.avg_slippage = stats.total_slippage / accepted;
            stats.avg_fees = stats.total_fees / accepted;
        }

        stats
    }

    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the full log to `path` as a JSON array. I/O failures are
    /// surfaced to the caller, never swallowed.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ExecutionLogError> {
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(path.as_ref(), json)?;
        tracing::info!(path = %path.as_ref().display(), records = self.records.len(), "execution log saved");
        Ok(())
    }

    /// Reloads a log previously written by `save_to_file`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ExecutionLogError> {
        let json = fs::read_to_string(path.as_ref())?;
        let records: Vec<ExecutionRecord> = serde_json::from_str(&json)?;
        tracing::info!(path = %path.as_ref().display(), records = records.len(), "execution log loaded");
        Ok(Self { records })
    }
}
