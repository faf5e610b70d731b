//! Business Rules
//!
//! The company rules applied to every delivered order:
//!
//! 1. **Fatigue**: a driver who worked more than 8 hours on any of the last
//!    7 days delivers 30% slower
//! 2. **Late delivery**: an order is late when its effective time exceeds
//!    the route's base time by more than 10 minutes; late orders cost a
//!    fixed 50 penalty
//! 3. **High-value bonus**: on-time orders worth more than 1000 earn 10% of
//!    their value
//! 4. **Fuel cost**: 5 per km, plus a 2 per km surcharge on High traffic
//!    routes
//! 5. **Profit**: `value + bonus - penalty - fuel_cost`
//!
//! All rates live in [`BusinessRules`]; its `Default` is the rule set above.

use crate::models::{Driver, Order, Route, TrafficLevel};
use crate::orchestrator::ValidationError;
use serde::{Deserialize, Serialize};

/// Rates and thresholds for the delivery rules
///
/// Every field falls back to its default when absent from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRules {
    /// Daily hours above which a driver is fatigued
    pub fatigue_daily_hours: f64,

    /// Delivery time multiplier for fatigued drivers
    pub fatigue_time_multiplier: f64,

    /// Minutes over base time tolerated before an order is late
    pub late_grace_minutes: f64,

    /// Flat penalty per late order
    pub late_penalty: f64,

    /// Value above which an on-time order earns the bonus
    pub high_value_threshold: f64,

    /// Fraction of order value paid as bonus
    pub high_value_bonus_rate: f64,

    /// Fuel cost per kilometre
    pub fuel_cost_per_km: f64,

    /// Extra fuel cost per kilometre on High traffic routes
    pub high_traffic_surcharge_per_km: f64,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            fatigue_daily_hours: 8.0,
            fatigue_time_multiplier: 1.30,
            late_grace_minutes: 10.0,
            late_penalty: 50.0,
            high_value_threshold: 1_000.0,
            high_value_bonus_rate: 0.10,
            fuel_cost_per_km: 5.0,
            high_traffic_surcharge_per_km: 2.0,
        }
    }
}

/// What one delivered order contributes to the run
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryCharges {
    pub effective_minutes: f64,
    pub late: bool,
    pub bonus: f64,
    pub penalty: f64,
    pub fuel_cost: f64,
    pub profit: f64,
}

impl BusinessRules {
    /// Validate rule overrides
    ///
    /// Every rate must be finite and non-negative. The fatigue multiplier
    /// must be at least 1 so fatigue never shortens a delivery.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let non_negative = [
            ("fatigue_daily_hours", self.fatigue_daily_hours),
            ("late_grace_minutes", self.late_grace_minutes),
            ("late_penalty", self.late_penalty),
            ("high_value_threshold", self.high_value_threshold),
            ("high_value_bonus_rate", self.high_value_bonus_rate),
            ("fuel_cost_per_km", self.fuel_cost_per_km),
            ("high_traffic_surcharge_per_km", self.high_traffic_surcharge_per_km),
        ];

        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ValidationError::InvalidRule {
                    field,
                    value,
                    requirement: "must be finite and >= 0",
                });
            }
        }

        if !(self.fatigue_time_multiplier.is_finite() && self.fatigue_time_multiplier >= 1.0) {
            return Err(ValidationError::InvalidRule {
                field: "fatigue_time_multiplier",
                value: self.fatigue_time_multiplier,
                requirement: "must be finite and >= 1",
            });
        }

        Ok(())
    }

    pub fn is_fatigued(&self, driver: &Driver) -> bool {
        driver.exceeded_daily_hours(self.fatigue_daily_hours)
    }

    /// Route base time adjusted for driver fatigue
    pub fn effective_minutes(&self, fatigued: bool, route: &Route) -> f64 {
        if fatigued {
            route.base_time_minutes() * self.fatigue_time_multiplier
        } else {
            route.base_time_minutes()
        }
    }

    pub fn is_late(&self, effective_minutes: f64, route: &Route) -> bool {
        effective_minutes > route.base_time_minutes() + self.late_grace_minutes
    }

    /// Bonus for an order delivered on time; zero when late
    pub fn high_value_bonus(&self, order: &Order, late: bool) -> f64 {
        if !late && order.is_high_value(self.high_value_threshold) {
            order.value_rs() * self.high_value_bonus_rate
        } else {
            0.0
        }
    }

    pub fn fuel_cost(&self, route: &Route) -> f64 {
        let base = route.distance_km() * self.fuel_cost_per_km;
        match route.traffic_level() {
            TrafficLevel::High => base + route.distance_km() * self.high_traffic_surcharge_per_km,
            TrafficLevel::Medium | TrafficLevel::Low => base,
        }
    }

    /// Apply every rule to one order
    ///
    /// `effective_minutes` must come from [`BusinessRules::effective_minutes`]
    /// for the delivering driver.
    pub fn price_delivery(&self, effective_minutes: f64, route: &Route, order: &Order) -> DeliveryCharges {
        let late = self.is_late(effective_minutes, route);
        let penalty = if late { self.late_penalty } else { 0.0 };
        let bonus = self.high_value_bonus(order, late);
        let fuel_cost = self.fuel_cost(route);

        DeliveryCharges {
            effective_minutes,
            late,
            bonus,
            penalty,
            fuel_cost,
            profit: order.value_rs() + bonus - penalty - fuel_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rules_default() {
        let rules = BusinessRules::default();
        assert_eq!(rules.fatigue_daily_hours, 8.0);
        assert_eq!(rules.fatigue_time_multiplier, 1.30);
        assert_eq!(rules.late_grace_minutes, 10.0);
        assert_eq!(rules.late_penalty, 50.0);
        assert_eq!(rules.high_value_threshold, 1_000.0);
        assert_eq!(rules.high_value_bonus_rate, 0.10);
        assert_eq!(rules.fuel_cost_per_km, 5.0);
        assert_eq!(rules.high_traffic_surcharge_per_km, 2.0);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let rules: BusinessRules = serde_json::from_str(r#"{"late_penalty": 75.0}"#).unwrap();
        assert_eq!(rules.late_penalty, 75.0);
        assert_eq!(rules.fuel_cost_per_km, 5.0);
    }

    #[test]
    fn test_default_rules_are_valid() {
        assert_eq!(BusinessRules::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_overrides() {
        let rules = BusinessRules {
            fuel_cost_per_km: -5.0,
            ..BusinessRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(ValidationError::InvalidRule { field: "fuel_cost_per_km", .. })
        ));

        let rules = BusinessRules {
            fatigue_time_multiplier: 0.5,
            ..BusinessRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(ValidationError::InvalidRule { field: "fatigue_time_multiplier", .. })
        ));

        let rules = BusinessRules {
            late_penalty: f64::NAN,
            ..BusinessRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_late_bonus_is_forfeited() {
        let rules = BusinessRules::default();
        let order = Order::new("ORD-1".to_string(), 5_000.0, "R1".to_string());
        assert_eq!(rules.high_value_bonus(&order, true), 0.0);
        assert!((rules.high_value_bonus(&order, false) - 500.0).abs() < 1e-9);
    }
}
