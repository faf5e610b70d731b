//! Driver model
//!
//! A driver on the roster. Each driver has:
//! - An ID and display name
//! - Hours worked in the current shift (informational only)
//! - Hours worked on each of the trailing 7 days
//!
//! The allocation engine only consults the trailing-week hours, and only to
//! decide whether the driver is fatigued (see `BusinessRules::is_fatigued`).

use serde::{Deserialize, Serialize};

/// A driver available for delivery assignment
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::Driver;
///
/// let driver = Driver::new("D001".to_string(), "Amit".to_string())
///     .with_past_week_hours(vec![6.0, 8.0, 7.0, 9.0, 6.0, 7.0, 8.0]);
///
/// assert!(driver.exceeded_daily_hours(8.0));
/// assert!(!driver.exceeded_daily_hours(9.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Unique driver identifier
    id: String,

    /// Display name
    name: String,

    /// Hours already worked in the current shift
    ///
    /// Carried for the roster view; allocation does not read it.
    #[serde(default)]
    current_shift_hours: f64,

    /// Hours worked on each of the last 7 days
    #[serde(default)]
    past_7_day_work_hours: Vec<f64>,
}

impl Driver {
    /// Create a driver with no shift or history hours recorded
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            current_shift_hours: 0.0,
            past_7_day_work_hours: Vec::new(),
        }
    }

    /// Set the hours worked in the current shift (builder pattern)
    pub fn with_shift_hours(mut self, hours: f64) -> Self {
        self.current_shift_hours = hours;
        self
    }

    /// Set the trailing-week work hours (builder pattern)
    pub fn with_past_week_hours(mut self, hours: Vec<f64>) -> Self {
        self.past_7_day_work_hours = hours;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_shift_hours(&self) -> f64 {
        self.current_shift_hours
    }

    pub fn past_7_day_work_hours(&self) -> &[f64] {
        &self.past_7_day_work_hours
    }

    /// True when any trailing-week entry exceeds `threshold` hours
    pub fn exceeded_daily_hours(&self, threshold: f64) -> bool {
        self.past_7_day_work_hours.iter().any(|&h| h > threshold)
    }
}
