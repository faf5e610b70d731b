//! Simulation History
//!
//! Append-only log of [`SimulationRun`] records.
//!
//! # Critical Invariants
//!
//! - **Append-only**: records are never mutated or removed
//! - **Chronological**: insertion order is creation order
//! - **Integrity**: a saved log carries a SHA-256 hash of its runs and is
//!   rejected on load if the hash does not match

pub mod persist;

use crate::models::SimulationRun;
use thiserror::Error;

pub use persist::{compute_canonical_hash, HistoryFile};

/// Errors raised while saving or loading history
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("History serialization failed: {0}")]
    Serialization(String),

    #[error("History integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },
}

/// In-memory run history
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::history::HistoryStore;
/// use delivery_simulator_core_rs::{RunKpis, RunParameters, SimulationRun};
///
/// let params = RunParameters {
///     number_of_drivers: 1,
///     route_start_time: "09:00".to_string(),
///     max_hours_per_driver: 8.0,
/// };
///
/// let mut history = HistoryStore::new();
/// let first = history.append(SimulationRun::record(params.clone(), RunKpis::default(), String::new())).to_string();
/// let second = history.append(SimulationRun::record(params, RunKpis::default(), String::new())).to_string();
///
/// let newest_first: Vec<&str> = history.recent_first().map(|r| r.id()).collect();
/// assert_eq!(newest_first, vec![second.as_str(), first.as_str()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    runs: Vec<SimulationRun>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Rebuild a store from runs already in chronological order
    pub fn from_runs(runs: Vec<SimulationRun>) -> Self {
        Self { runs }
    }

    /// Append a run; returns its ID
    pub fn append(&mut self, run: SimulationRun) -> &str {
        self.runs.push(run);
        self.runs.last().map(|r| r.id()).unwrap_or_default()
    }

    /// Runs newest first
    pub fn recent_first(&self) -> impl Iterator<Item = &SimulationRun> {
        self.runs.iter().rev()
    }

    /// Runs oldest first
    pub fn runs(&self) -> &[SimulationRun] {
        &self.runs
    }

    pub fn latest(&self) -> Option<&SimulationRun> {
        self.runs.last()
    }

    pub fn get(&self, id: &str) -> Option<&SimulationRun> {
        self.runs.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
