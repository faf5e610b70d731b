//! Event logging for simulation replay and auditing.
//!
//! Every decision the engine takes about an order is recorded as an
//! [`Event`]. Events enable:
//! - Debugging (which driver took which order, and why one was put back)
//! - Auditing (per-order profit contributions add up to the run total)
//! - Analysis (lateness and requeue patterns per driver)
//!
//! # Event Types
//!
//! - **DeliveryCompleted**: Driver committed time to an order
//! - **OrderRequeued**: Order did not fit the driver's remaining hours
//! - **OrderDropped**: Order route did not resolve
//! - **ShiftEnded**: Driver stopped taking orders
//!
//! # Example
//!
//! ```rust
//! use delivery_simulator_core_rs::models::Event;
//!
//! let event = Event::OrderDropped {
//!     seq: 3,
//!     order_id: "ORD-7".to_string(),
//!     route_id: "R-missing".to_string(),
//! };
//!
//! assert_eq!(event.event_type(), "OrderDropped");
//! ```

use serde::{Deserialize, Serialize};

/// Simulation event capturing one allocation decision.
///
/// `seq` is the position of the event in the run, starting at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Driver delivered an order
    DeliveryCompleted {
        seq: usize,
        driver_id: String,
        order_id: String,
        effective_minutes: f64,
        late: bool,
        profit: f64,
    },

    /// Order did not fit the driver's remaining hours and went back to the
    /// head of the queue
    OrderRequeued {
        seq: usize,
        driver_id: String,
        order_id: String,
        required_hours: f64,
        remaining_hours: f64,
    },

    /// Order discarded because its route did not resolve
    OrderDropped {
        seq: usize,
        order_id: String,
        route_id: String,
    },

    /// Driver stopped taking orders
    ShiftEnded {
        seq: usize,
        driver_id: String,
        hours_used: f64,
        deliveries: usize,
    },
}

impl Event {
    /// Position of this event within the run
    pub fn seq(&self) -> usize {
        match self {
            Event::DeliveryCompleted { seq, .. } => *seq,
            Event::OrderRequeued { seq, .. } => *seq,
            Event::OrderDropped { seq, .. } => *seq,
            Event::ShiftEnded { seq, .. } => *seq,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::DeliveryCompleted { .. } => "DeliveryCompleted",
            Event::OrderRequeued { .. } => "OrderRequeued",
            Event::OrderDropped { .. } => "OrderDropped",
            Event::ShiftEnded { .. } => "ShiftEnded",
        }
    }

    /// Get order ID if event relates to a specific order
    pub fn order_id(&self) -> Option<&str> {
        match self {
            Event::DeliveryCompleted { order_id, .. } => Some(order_id),
            Event::OrderRequeued { order_id, .. } => Some(order_id),
            Event::OrderDropped { order_id, .. } => Some(order_id),
            Event::ShiftEnded { .. } => None,
        }
    }

    /// Get driver ID if event relates to a specific driver
    pub fn driver_id(&self) -> Option<&str> {
        match self {
            Event::DeliveryCompleted { driver_id, .. } => Some(driver_id),
            Event::OrderRequeued { driver_id, .. } => Some(driver_id),
            Event::ShiftEnded { driver_id, .. } => Some(driver_id),
            Event::OrderDropped { .. } => None,
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around Vec<Event> that stamps each event with
/// its sequence number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Sequence number the next logged event should carry
    pub fn next_seq(&self) -> usize {
        self.events.len()
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific order
    pub fn events_for_order(&self, order_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.order_id() == Some(order_id))
            .collect()
    }

    /// Get events for a specific driver
    pub fn events_for_driver(&self, driver_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.driver_id() == Some(driver_id))
            .collect()
    }
}
