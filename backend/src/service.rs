//! Simulation Service
//!
//! Glue between the engine and its collaborators:
//!
//! ```text
//! 1. Validate the raw request shape (missing / non-positive inputs)
//! 2. Load a fresh snapshot of drivers and routed orders
//! 3. Run the engine
//! 4. Append the SimulationRun record to history
//! 5. Return the rounded summary with the record ID
//! ```
//!
//! Each call loads its own snapshot, so runs never share a queue.

use crate::datasource::DataSource;
use crate::history::{compute_canonical_hash, HistoryStore};
use crate::models::{RunParameters, RunSummary, SimulationRun};
use crate::orchestrator::{SimulationEngine, SimulationError, SimulationOutcome, ValidationError};
use crate::rules::BusinessRules;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Raw run request as received from a caller
///
/// Every field is optional so that absence can be reported precisely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub number_of_drivers: Option<i64>,
    pub route_start_time: Option<String>,
    pub max_hours_per_driver: Option<f64>,
}

impl SimulationRequest {
    pub fn new(number_of_drivers: i64, route_start_time: &str, max_hours_per_driver: f64) -> Self {
        Self {
            number_of_drivers: Some(number_of_drivers),
            route_start_time: Some(route_start_time.to_string()),
            max_hours_per_driver: Some(max_hours_per_driver),
        }
    }

    /// Check presence first, then positivity
    ///
    /// The roster bound is checked by the engine once drivers are loaded.
    pub fn validate(&self) -> Result<RunParameters, ValidationError> {
        let number_of_drivers = self
            .number_of_drivers
            .ok_or(ValidationError::MissingField("numberOfDrivers"))?;
        let route_start_time = self
            .route_start_time
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingField("routeStartTime"))?;
        let max_hours_per_driver = self
            .max_hours_per_driver
            .ok_or(ValidationError::MissingField("maxHoursPerDriver"))?;

        if number_of_drivers <= 0 {
            return Err(ValidationError::NonPositiveDriverCount(number_of_drivers));
        }
        if !(max_hours_per_driver.is_finite() && max_hours_per_driver > 0.0) {
            return Err(ValidationError::NonPositiveMaxHours(max_hours_per_driver));
        }

        Ok(RunParameters {
            number_of_drivers: number_of_drivers as usize,
            route_start_time: route_start_time.to_string(),
            max_hours_per_driver,
        })
    }
}

/// What a caller gets back from a run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// ID of the appended history record
    pub simulation_id: String,

    /// Rounded KPIs
    pub summary: RunSummary,

    /// Full engine output, including the per-order ledger
    pub outcome: SimulationOutcome,
}

/// Runs simulations against a data source and keeps their history
pub struct SimulationService<D: DataSource> {
    source: D,
    engine: SimulationEngine,
    history: HistoryStore,
}

impl<D: DataSource> SimulationService<D> {
    pub fn new(source: D, rules: BusinessRules) -> Self {
        Self {
            source,
            engine: SimulationEngine::new(rules),
            history: HistoryStore::new(),
        }
    }

    /// Continue appending to an existing history
    pub fn with_history(mut self, history: HistoryStore) -> Self {
        self.history = history;
        self
    }

    /// Validate, load, run and record
    pub fn run(&mut self, request: &SimulationRequest) -> Result<RunReport, SimulationError> {
        let params = request.validate()?;

        let drivers = self.source.drivers()?;
        let orders = self.source.orders_with_routes()?;
        let input_digest = compute_canonical_hash(&(&params, &drivers, &orders))?;

        let outcome = self.engine.run(&params, &drivers, orders)?;

        let record = SimulationRun::record(params, outcome.kpis.clone(), input_digest);
        let summary = record.summary();
        let simulation_id = self.history.append(record).to_string();

        info!(
            simulation_id = simulation_id.as_str(),
            total_profit = summary.total_profit,
            efficiency_score = summary.efficiency_score,
            "simulation recorded"
        );

        Ok(RunReport {
            simulation_id,
            summary,
            outcome,
        })
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn into_history(self) -> HistoryStore {
        self.history
    }

    pub fn source(&self) -> &D {
        &self.source
    }
}
