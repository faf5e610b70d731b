//! Shift time-keeping for a single driver
//!
//! A driver's shift is measured in hours against a fixed cap. Delivery
//! times arrive in minutes and are converted here.

/// Convert minutes to hours
pub fn minutes_to_hours(minutes: f64) -> f64 {
    minutes / 60.0
}

/// Tracks the hours a driver has committed against their cap
///
/// # Example
/// ```
/// use delivery_simulator_core_rs::ShiftClock;
///
/// let mut clock = ShiftClock::new(8.0);
/// assert!(clock.has_capacity());
///
/// assert!(clock.try_commit(7.5));
/// assert!(!clock.try_commit(1.0)); // would exceed 8 hours
/// assert_eq!(clock.hours_used(), 7.5);
/// ```
#[derive(Debug, Clone)]
pub struct ShiftClock {
    /// Hours committed so far
    hours_used: f64,
    /// Hour cap for the shift
    max_hours: f64,
}

impl ShiftClock {
    /// Create a new clock with nothing committed
    ///
    /// # Panics
    /// Panics if `max_hours` is not positive
    pub fn new(max_hours: f64) -> Self {
        assert!(max_hours > 0.0, "max_hours must be positive");
        Self {
            hours_used: 0.0,
            max_hours,
        }
    }

    /// Hours committed so far
    pub fn hours_used(&self) -> f64 {
        self.hours_used
    }

    pub fn max_hours(&self) -> f64 {
        self.max_hours
    }

    /// Hours left before the cap
    pub fn remaining_hours(&self) -> f64 {
        self.max_hours - self.hours_used
    }

    /// True while committed hours are strictly below the cap
    pub fn has_capacity(&self) -> bool {
        self.hours_used < self.max_hours
    }

    /// Whether `hours` more would still be within the cap
    pub fn fits(&self, hours: f64) -> bool {
        self.hours_used + hours <= self.max_hours
    }

    /// Commit `hours` if they fit. Returns false and leaves the clock
    /// untouched otherwise.
    pub fn try_commit(&mut self, hours: f64) -> bool {
        if !self.fits(hours) {
            return false;
        }
        self.hours_used += hours;
        true
    }
}
