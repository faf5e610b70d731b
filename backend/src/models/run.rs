//! Simulation run records
//!
//! - [`RunParameters`]: the inputs echoed back into every record
//! - [`RunKpis`]: aggregate results of one allocation pass (full precision)
//! - [`DeliveryRecord`]: ledger entry for a single delivered order
//! - [`SimulationRun`]: the immutable history record
//! - [`RunSummary`]: the presentation view, rounded to 2 decimals
//!
//! Full precision is kept in everything that is stored. Rounding happens
//! only when a [`RunSummary`] is built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round to 2 decimal places for presentation
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Validated run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// How many drivers (taken from the head of the roster) to dispatch
    pub number_of_drivers: usize,

    /// Nominal start time, echoed into the record and otherwise unused
    pub route_start_time: String,

    /// Hour cap per driver
    pub max_hours_per_driver: f64,
}

/// Aggregate KPIs of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunKpis {
    pub total_profit: f64,
    pub efficiency_score: f64,
    pub on_time_deliveries: usize,
    pub late_deliveries: usize,
    pub total_fuel_cost: f64,
    pub unassigned_orders: usize,
}

impl RunKpis {
    pub fn total_deliveries(&self) -> usize {
        self.on_time_deliveries + self.late_deliveries
    }
}

/// Ledger entry for one delivered order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub order_id: String,
    pub driver_id: String,
    pub effective_minutes: f64,
    pub late: bool,
    pub bonus: f64,
    pub penalty: f64,
    pub fuel_cost: f64,

    /// `value + bonus - penalty - fuel_cost`
    pub profit: f64,
}

/// Immutable record of a completed simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Unique run identifier (UUID)
    id: String,

    /// When the run was recorded
    created_at: DateTime<Utc>,

    /// Echoed inputs
    parameters: RunParameters,

    /// Full-precision results
    kpis: RunKpis,

    /// SHA-256 of the canonical JSON of the run inputs
    input_digest: String,
}

impl SimulationRun {
    /// Stamp a new record with a fresh ID and the current time
    pub fn record(parameters: RunParameters, kpis: RunKpis, input_digest: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            parameters,
            kpis,
            input_digest,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn parameters(&self) -> &RunParameters {
        &self.parameters
    }

    pub fn kpis(&self) -> &RunKpis {
        &self.kpis
    }

    pub fn input_digest(&self) -> &str {
        &self.input_digest
    }

    /// Presentation view of this run
    pub fn summary(&self) -> RunSummary {
        RunSummary::from(&self.kpis)
    }
}

/// Rounded KPI view returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_profit: f64,
    pub efficiency_score: f64,
    pub on_time_deliveries: usize,
    pub late_deliveries: usize,
    pub total_deliveries: usize,
    pub total_fuel_cost: f64,
    pub unassigned_orders: usize,
}

impl From<&RunKpis> for RunSummary {
    fn from(kpis: &RunKpis) -> Self {
        RunSummary {
            total_profit: round2(kpis.total_profit),
            efficiency_score: round2(kpis.efficiency_score),
            on_time_deliveries: kpis.on_time_deliveries,
            late_deliveries: kpis.late_deliveries,
            total_deliveries: kpis.total_deliveries(),
            total_fuel_cost: round2(kpis.total_fuel_cost),
            unassigned_orders: kpis.unassigned_orders,
        }
    }
}
