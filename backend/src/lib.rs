//! Delivery Simulator Core - Rust Engine
//!
//! Greedy delivery allocation with deterministic KPI output.
//!
//! # Architecture
//!
//! - **core**: Shift time-keeping
//! - **models**: Domain types (Driver, Route, Order, SimulationRun)
//! - **rules**: Fatigue, lateness, bonus and fuel-cost rules
//! - **orchestrator**: The allocation pass
//! - **datasource**: Roster and order loading (JSON, CSV seed files)
//! - **history**: Append-only run log with integrity-checked persistence
//! - **service**: Request validation, run, record
//!
//! # Critical Invariants
//!
//! 1. Same inputs produce identical KPIs (no randomness, no hidden state)
//! 2. Input entities are never mutated by a run
//! 3. Stored records keep full precision; only summaries are rounded

// Module declarations
pub mod core;
pub mod datasource;
pub mod history;
pub mod models;
pub mod orchestrator;
pub mod rules;
pub mod service;

// Re-exports for convenience
pub use crate::core::shift::ShiftClock;
pub use datasource::{DataSource, DataSourceError, Dataset};
pub use history::{HistoryError, HistoryStore};
pub use models::{
    driver::Driver,
    event::{Event, EventLog},
    order::{Order, RoutedOrder},
    queue::OrderQueue,
    route::{Route, TrafficLevel},
    run::{DeliveryRecord, RunKpis, RunParameters, RunSummary, SimulationRun},
};
pub use orchestrator::{
    run_simulation, KpiAccumulator, SimulationEngine, SimulationError, SimulationOutcome,
    ValidationError,
};
pub use rules::{BusinessRules, DeliveryCharges};
pub use service::{RunReport, SimulationRequest, SimulationService};
