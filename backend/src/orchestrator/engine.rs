//! Simulation Engine
//!
//! Greedy, single-pass allocation of pending orders to drivers.
//!
//! # Architecture
//!
//! ```text
//! Validate parameters
//! Select the first N drivers from the roster
//! Queue every order in input order
//! For each selected driver, in roster order:
//!   While the driver has hours left and the queue is non-empty:
//!     1. Pop the head order
//!     2. Drop it if its route did not resolve
//!     3. Compute effective time (fatigue rule)
//!     4. Requeue at the front and end the shift if it does not fit
//!     5. Commit the time
//!     6. Price the delivery (late penalty, bonus, fuel cost)
//!     7. Accumulate KPIs, record ledger entry, log event
//! Compute efficiency; count what is left in the queue
//! ```
//!
//! # Determinism
//!
//! The engine holds no state between runs and uses no randomness. The same
//! drivers, orders, parameters and rules always produce identical KPIs.
//!
//! # Example
//!
//! ```rust
//! use delivery_simulator_core_rs::{
//!     Driver, Order, Route, RoutedOrder, RunParameters, SimulationEngine, TrafficLevel,
//! };
//!
//! let drivers = vec![Driver::new("D001".to_string(), "Amit".to_string())];
//! let route = Route::new("R1".to_string(), 10.0, TrafficLevel::Low, 60.0);
//! let orders = vec![RoutedOrder::resolved(
//!     Order::new("ORD-1".to_string(), 1_200.0, "R1".to_string()),
//!     route,
//! )];
//! let params = RunParameters {
//!     number_of_drivers: 1,
//!     route_start_time: "09:00".to_string(),
//!     max_hours_per_driver: 8.0,
//! };
//!
//! let outcome = SimulationEngine::default().run(&params, &drivers, orders).unwrap();
//! assert_eq!(outcome.kpis.on_time_deliveries, 1);
//! assert_eq!(outcome.kpis.efficiency_score, 100.0);
//! ```

use crate::core::shift::{minutes_to_hours, ShiftClock};
use crate::datasource::DataSourceError;
use crate::history::HistoryError;
use crate::models::{
    DeliveryRecord, Driver, Event, EventLog, Order, OrderQueue, RoutedOrder, RunKpis,
    RunParameters,
};
use crate::rules::{BusinessRules, DeliveryCharges};
use thiserror::Error;
use tracing::{debug, info, info_span};

// ============================================================================
// Errors
// ============================================================================

/// Rejected run inputs
///
/// Each variant names the bound that was violated so callers can tell a bad
/// driver count from a bad hour cap from an oversized request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing simulation input: {0}")]
    MissingField(&'static str),

    #[error("numberOfDrivers must be greater than 0, got {0}")]
    NonPositiveDriverCount(i64),

    #[error("maxHoursPerDriver must be a finite number greater than 0, got {0}")]
    NonPositiveMaxHours(f64),

    #[error("Input drivers ({requested}) exceeds available drivers ({available})")]
    DriverCountExceedsRoster { requested: usize, available: usize },

    #[error("Invalid business rule {field}: {value} ({requirement})")]
    InvalidRule {
        field: &'static str,
        value: f64,
        requirement: &'static str,
    },
}

/// Simulation error types
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

// ============================================================================
// KPI Accumulation
// ============================================================================

/// Running totals over one allocation pass
#[derive(Debug, Clone, Default)]
pub struct KpiAccumulator {
    pub total_profit: f64,
    pub total_fuel_cost: f64,
    pub on_time_deliveries: usize,
    pub late_deliveries: usize,
}

impl KpiAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one delivered order
    pub fn add(&mut self, charges: &DeliveryCharges) {
        if charges.late {
            self.late_deliveries += 1;
        } else {
            self.on_time_deliveries += 1;
        }
        self.total_profit += charges.profit;
        self.total_fuel_cost += charges.fuel_cost;
    }

    pub fn total_deliveries(&self) -> usize {
        self.on_time_deliveries + self.late_deliveries
    }

    /// Percentage of deliveries that were on time; 0 when nothing was delivered
    pub fn efficiency_score(&self) -> f64 {
        let total = self.total_deliveries();
        if total == 0 {
            return 0.0;
        }
        self.on_time_deliveries as f64 / total as f64 * 100.0
    }

    /// Freeze into final KPIs
    pub fn finish(&self, unassigned_orders: usize) -> RunKpis {
        RunKpis {
            total_profit: self.total_profit,
            efficiency_score: self.efficiency_score(),
            on_time_deliveries: self.on_time_deliveries,
            late_deliveries: self.late_deliveries,
            total_fuel_cost: self.total_fuel_cost,
            unassigned_orders,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Aggregate results (full precision)
    pub kpis: RunKpis,

    /// One entry per delivered order, in delivery order
    pub deliveries: Vec<DeliveryRecord>,

    /// Orders still queued when the last driver finished, front to back
    pub remaining_orders: Vec<RoutedOrder>,

    /// Orders discarded because their route did not resolve
    pub dropped_orders: Vec<Order>,

    /// Allocation decisions in the order they were taken
    pub events: EventLog,
}

/// Greedy order-to-driver allocator
///
/// Holds only the business rules; every run gets its own queue and
/// accumulators.
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    rules: BusinessRules,
}

/// How a driver's shift ended
enum ShiftStop {
    /// Hours exhausted or queue drained
    Exhausted,
    /// Head order did not fit the remaining hours
    OrderDidNotFit,
}

impl SimulationEngine {
    pub fn new(rules: BusinessRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &BusinessRules {
        &self.rules
    }

    /// Check the run parameters against the roster size
    pub fn validate_parameters(
        params: &RunParameters,
        roster_size: usize,
    ) -> Result<(), ValidationError> {
        if params.number_of_drivers == 0 {
            return Err(ValidationError::NonPositiveDriverCount(0));
        }

        // Also rejects NaN and infinities
        if !(params.max_hours_per_driver.is_finite() && params.max_hours_per_driver > 0.0) {
            return Err(ValidationError::NonPositiveMaxHours(
                params.max_hours_per_driver,
            ));
        }

        if params.number_of_drivers > roster_size {
            return Err(ValidationError::DriverCountExceedsRoster {
                requested: params.number_of_drivers,
                available: roster_size,
            });
        }

        Ok(())
    }

    /// Run one allocation pass
    ///
    /// `orders` is consumed: it becomes the run's queue.
    ///
    /// # Returns
    ///
    /// * `Ok(SimulationOutcome)` - Run completed (running out of orders or
    ///   hours is a normal finish)
    /// * `Err(SimulationError::Validation)` - Parameters rejected; nothing
    ///   was computed
    pub fn run(
        &self,
        params: &RunParameters,
        drivers: &[Driver],
        orders: Vec<RoutedOrder>,
    ) -> Result<SimulationOutcome, SimulationError> {
        self.rules.validate()?;
        Self::validate_parameters(params, drivers.len())?;

        let span = info_span!(
            "simulation_run",
            drivers = params.number_of_drivers,
            max_hours = params.max_hours_per_driver,
            orders = orders.len()
        );
        let _guard = span.enter();

        let mut queue = OrderQueue::new(orders);
        let mut accumulator = KpiAccumulator::new();
        let mut deliveries = Vec::new();
        let mut dropped_orders = Vec::new();
        let mut events = EventLog::new();

        for driver in drivers.iter().take(params.number_of_drivers) {
            let mut clock = ShiftClock::new(params.max_hours_per_driver);
            let fatigued = self.rules.is_fatigued(driver);
            let mut driver_deliveries = 0;

            let stop = loop {
                if !clock.has_capacity() {
                    break ShiftStop::Exhausted;
                }
                let Some(routed) = queue.pop_front() else {
                    break ShiftStop::Exhausted;
                };

                let Some(route) = routed.route.as_ref() else {
                    debug!(order_id = routed.id(), "dropping order with unresolved route");
                    events.log(Event::OrderDropped {
                        seq: events.next_seq(),
                        order_id: routed.id().to_string(),
                        route_id: routed.order.route_id().to_string(),
                    });
                    dropped_orders.push(routed.order);
                    continue;
                };

                let effective_minutes = self.rules.effective_minutes(fatigued, route);
                let required_hours = minutes_to_hours(effective_minutes);

                if !clock.try_commit(required_hours) {
                    debug!(
                        driver_id = driver.id(),
                        order_id = routed.id(),
                        required_hours,
                        remaining_hours = clock.remaining_hours(),
                        "order does not fit remaining hours; requeued"
                    );
                    events.log(Event::OrderRequeued {
                        seq: events.next_seq(),
                        driver_id: driver.id().to_string(),
                        order_id: routed.id().to_string(),
                        required_hours,
                        remaining_hours: clock.remaining_hours(),
                    });
                    queue.push_front(routed);
                    break ShiftStop::OrderDidNotFit;
                }

                let charges = self.rules.price_delivery(effective_minutes, route, &routed.order);
                accumulator.add(&charges);
                driver_deliveries += 1;

                events.log(Event::DeliveryCompleted {
                    seq: events.next_seq(),
                    driver_id: driver.id().to_string(),
                    order_id: routed.id().to_string(),
                    effective_minutes,
                    late: charges.late,
                    profit: charges.profit,
                });
                deliveries.push(DeliveryRecord {
                    order_id: routed.id().to_string(),
                    driver_id: driver.id().to_string(),
                    effective_minutes,
                    late: charges.late,
                    bonus: charges.bonus,
                    penalty: charges.penalty,
                    fuel_cost: charges.fuel_cost,
                    profit: charges.profit,
                });
            };

            debug!(
                driver_id = driver.id(),
                fatigued,
                hours_used = clock.hours_used(),
                deliveries = driver_deliveries,
                requeued = matches!(stop, ShiftStop::OrderDidNotFit),
                "shift ended"
            );
            events.log(Event::ShiftEnded {
                seq: events.next_seq(),
                driver_id: driver.id().to_string(),
                hours_used: clock.hours_used(),
                deliveries: driver_deliveries,
            });
        }

        let kpis = accumulator.finish(queue.len());

        info!(
            on_time = kpis.on_time_deliveries,
            late = kpis.late_deliveries,
            unassigned = kpis.unassigned_orders,
            dropped = dropped_orders.len(),
            total_profit = kpis.total_profit,
            "simulation complete"
        );

        Ok(SimulationOutcome {
            kpis,
            deliveries,
            remaining_orders: queue.into_remaining(),
            dropped_orders,
            events,
        })
    }
}

/// Run with the default rule set
pub fn run_simulation(
    params: &RunParameters,
    drivers: &[Driver],
    orders: Vec<RoutedOrder>,
) -> Result<SimulationOutcome, SimulationError> {
    SimulationEngine::default().run(params, drivers, orders)
}

// ============================================================================
// Tests
// ============================================================================
