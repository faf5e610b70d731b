//! Route model
//!
//! A delivery route with a fixed distance, a traffic level and a base
//! travel time. Orders reference exactly one route.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Traffic level on a route
///
/// Only `High` changes the fuel cost; `Medium` and `Low` are priced the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
        };
        f.write_str(s)
    }
}

impl FromStr for TrafficLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(TrafficLevel::Low),
            "medium" => Ok(TrafficLevel::Medium),
            "high" => Ok(TrafficLevel::High),
            other => Err(format!("Unknown traffic level: {}", other)),
        }
    }
}

/// A delivery route
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::{Route, TrafficLevel};
///
/// let route = Route::new("R1".to_string(), 12.5, TrafficLevel::High, 45.0);
/// assert_eq!(route.traffic_level(), TrafficLevel::High);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Unique route identifier
    id: String,

    /// Route length in kilometres
    distance_km: f64,

    /// Traffic level on the route
    traffic_level: TrafficLevel,

    /// Base travel time in minutes, before any driver adjustment
    base_time_minutes: f64,
}

impl Route {
    /// Create a new route
    ///
    /// # Panics
    /// Panics if distance or base time is not positive
    pub fn new(
        id: String,
        distance_km: f64,
        traffic_level: TrafficLevel,
        base_time_minutes: f64,
    ) -> Self {
        assert!(distance_km > 0.0, "distance_km must be positive");
        assert!(base_time_minutes > 0.0, "base_time_minutes must be positive");

        Self {
            id,
            distance_km,
            traffic_level,
            base_time_minutes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn traffic_level(&self) -> TrafficLevel {
        self.traffic_level
    }

    pub fn base_time_minutes(&self) -> f64 {
        self.base_time_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_level_parse_case_insensitive() {
        assert_eq!("HIGH".parse::<TrafficLevel>(), Ok(TrafficLevel::High));
        assert_eq!(" medium ".parse::<TrafficLevel>(), Ok(TrafficLevel::Medium));
        assert!("jammed".parse::<TrafficLevel>().is_err());
    }

    #[test]
    #[should_panic(expected = "distance_km must be positive")]
    fn test_zero_distance_panics() {
        Route::new("R1".to_string(), 0.0, TrafficLevel::Low, 30.0);
    }
}
