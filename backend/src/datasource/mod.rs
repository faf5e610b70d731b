//! Data Source
//!
//! Supplies the engine with its inputs: the full driver roster and every
//! pending order resolved to its route.
//!
//! # Architecture
//!
//! - [`DataSource`]: the trait the service loads snapshots through
//! - [`Dataset`]: in-memory roster/route/order tables, loadable from JSON
//! - [`csv`]: import of the `drivers.csv` / `routes.csv` / `orders.csv`
//!   seed files
//!
//! Route resolution happens here, not in the engine. An order whose
//! `route_id` is not in the route table is handed over with `route: None`.

pub mod csv;

use crate::models::{Driver, Order, Route, RoutedOrder};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating input records
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{file}:{line}: {reason}")]
    Csv {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Duplicate {kind} ID: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Invalid {kind} {id}: {reason}")]
    InvalidRecord {
        kind: &'static str,
        id: String,
        reason: String,
    },
}

/// Number of entries in a driver's trailing-week history
pub const TRAILING_WEEK_DAYS: usize = 7;

/// Read access to the entities a run needs
///
/// Implementations return a fresh snapshot on every call; the engine never
/// writes back through this trait.
pub trait DataSource {
    /// The full roster, in natural order
    fn drivers(&self) -> Result<Vec<Driver>, DataSourceError>;

    /// Every order with its route resolved, in natural order
    fn orders_with_routes(&self) -> Result<Vec<RoutedOrder>, DataSourceError>;
}

/// In-memory tables of drivers, routes and orders
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::datasource::{DataSource, Dataset};
/// use delivery_simulator_core_rs::{Driver, Order, Route, TrafficLevel};
///
/// let dataset = Dataset::new(
///     vec![Driver::new("D001".to_string(), "Amit".to_string())],
///     vec![Route::new("R1".to_string(), 10.0, TrafficLevel::Low, 60.0)],
///     vec![
///         Order::new("ORD-1".to_string(), 500.0, "R1".to_string()),
///         Order::new("ORD-2".to_string(), 700.0, "R9".to_string()),
///     ],
/// )
/// .unwrap();
///
/// let orders = dataset.orders_with_routes().unwrap();
/// assert!(orders[0].is_resolved());
/// assert!(!orders[1].is_resolved());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate IDs and non-positive quantities
    pub fn new(
        drivers: Vec<Driver>,
        routes: Vec<Route>,
        orders: Vec<Order>,
    ) -> Result<Self, DataSourceError> {
        let dataset = Self {
            drivers,
            routes,
            orders,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parse and validate a JSON dataset
    pub fn from_json_str(json: &str) -> Result<Self, DataSourceError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Read, parse and validate a JSON dataset file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DataSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Write the dataset as pretty-printed JSON
    pub fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), DataSourceError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| DataSourceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check ID uniqueness and value ranges
    ///
    /// Deserialized records bypass the model constructors, so the positivity
    /// checks are repeated here. Every quantity must also be finite: JSON
    /// has no representation for infinities and would write them as `null`.
    ///
    /// A driver's trailing week is either empty (no history recorded) or
    /// exactly [`TRAILING_WEEK_DAYS`] entries.
    pub fn validate(&self) -> Result<(), DataSourceError> {
        ensure_unique("driver", self.drivers.iter().map(|d| d.id()))?;
        ensure_unique("route", self.routes.iter().map(|r| r.id()))?;
        ensure_unique("order", self.orders.iter().map(|o| o.id()))?;

        for driver in &self.drivers {
            let week = driver.past_7_day_work_hours();
            if !week.is_empty() && week.len() != TRAILING_WEEK_DAYS {
                return Err(invalid(
                    "driver",
                    driver.id(),
                    &format!(
                        "past_7_day_work_hours must have {} entries, got {}",
                        TRAILING_WEEK_DAYS,
                        week.len()
                    ),
                ));
            }
            if !week.iter().all(|&h| non_negative_finite(h)) {
                return Err(invalid(
                    "driver",
                    driver.id(),
                    "past_7_day_work_hours must be finite and non-negative",
                ));
            }
            if !non_negative_finite(driver.current_shift_hours()) {
                return Err(invalid(
                    "driver",
                    driver.id(),
                    "current_shift_hours must be finite and non-negative",
                ));
            }
        }

        for route in &self.routes {
            if !positive_finite(route.distance_km()) {
                return Err(invalid(
                    "route",
                    route.id(),
                    "distance_km must be finite and positive",
                ));
            }
            if !positive_finite(route.base_time_minutes()) {
                return Err(invalid(
                    "route",
                    route.id(),
                    "base_time_minutes must be finite and positive",
                ));
            }
        }

        for order in &self.orders {
            if !positive_finite(order.value_rs()) {
                return Err(invalid(
                    "order",
                    order.id(),
                    "value_rs must be finite and positive",
                ));
            }
        }

        Ok(())
    }
}

impl DataSource for Dataset {
    fn drivers(&self) -> Result<Vec<Driver>, DataSourceError> {
        Ok(self.drivers.clone())
    }

    fn orders_with_routes(&self) -> Result<Vec<RoutedOrder>, DataSourceError> {
        let routes: HashMap<&str, &Route> = self.routes.iter().map(|r| (r.id(), r)).collect();

        Ok(self
            .orders
            .iter()
            .map(|order| match routes.get(order.route_id()) {
                Some(route) => RoutedOrder::resolved(order.clone(), (*route).clone()),
                None => RoutedOrder::unresolved(order.clone()),
            })
            .collect())
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DataSourceError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataSourceError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

pub(crate) fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative_finite(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn invalid(kind: &'static str, id: &str, reason: &str) -> DataSourceError {
    DataSourceError::InvalidRecord {
        kind,
        id: id.to_string(),
        reason: reason.to_string(),
    }
}
