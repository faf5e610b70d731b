//! Order model
//!
//! Represents a pending delivery. Each order has:
//! - An order ID
//! - A value in rupees
//! - The ID of the route it must travel
//! - An optional delivery timestamp (kept for record compatibility; the
//!   engine never sets it)
//!
//! Before a run, the data source resolves each order's route and hands the
//! engine a [`RoutedOrder`]. An order whose route did not resolve carries
//! `None` and is skipped by the engine.

use crate::models::route::Route;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending delivery order
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::Order;
///
/// let order = Order::new("ORD-1".to_string(), 1_250.0, "R1".to_string());
/// assert!(order.is_high_value(1_000.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    id: String,

    /// Order value in rupees
    value_rs: f64,

    /// ID of the route this order is delivered over
    route_id: String,

    /// When the order was delivered, if ever recorded upstream
    #[serde(default)]
    delivery_timestamp: Option<DateTime<Utc>>,
}

impl Order {
    /// Create a new order
    ///
    /// # Panics
    /// Panics if value_rs <= 0
    pub fn new(id: String, value_rs: f64, route_id: String) -> Self {
        assert!(value_rs > 0.0, "value_rs must be positive");

        Self {
            id,
            value_rs,
            route_id,
            delivery_timestamp: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value_rs(&self) -> f64 {
        self.value_rs
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn delivery_timestamp(&self) -> Option<DateTime<Utc>> {
        self.delivery_timestamp
    }

    /// True when the value is strictly above `threshold`
    pub fn is_high_value(&self, threshold: f64) -> bool {
        self.value_rs > threshold
    }
}

/// An order paired with its resolved route
///
/// `route` is `None` when the order's route reference could not be found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedOrder {
    pub order: Order,
    pub route: Option<Route>,
}

impl RoutedOrder {
    /// Pair an order with a resolved route
    pub fn resolved(order: Order, route: Route) -> Self {
        Self {
            order,
            route: Some(route),
        }
    }

    /// An order whose route reference did not resolve
    pub fn unresolved(order: Order) -> Self {
        Self { order, route: None }
    }

    pub fn id(&self) -> &str {
        self.order.id()
    }

    pub fn is_resolved(&self) -> bool {
        self.route.is_some()
    }
}
