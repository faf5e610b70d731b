//! Engine Scenario Tests
//!
//! Hand-computed runs covering each business rule and every way a driver's
//! shift can end.

use delivery_simulator_core_rs::{
    run_simulation, Driver, Event, Order, Route, RoutedOrder, RunParameters, SimulationError,
    TrafficLevel, ValidationError,
};

// ============================================================================
// Test Helpers
// ============================================================================

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn params(number_of_drivers: usize, max_hours: f64) -> RunParameters {
    RunParameters {
        number_of_drivers,
        route_start_time: "09:00".to_string(),
        max_hours_per_driver: max_hours,
    }
}

fn rested_driver(id: &str) -> Driver {
    Driver::new(id.to_string(), format!("Driver {}", id))
        .with_past_week_hours(vec![6.0, 7.0, 8.0, 6.0, 7.0, 8.0, 6.0])
}

fn fatigued_driver(id: &str) -> Driver {
    Driver::new(id.to_string(), format!("Driver {}", id))
        .with_past_week_hours(vec![6.0, 7.0, 9.0, 6.0, 7.0, 8.0, 6.0])
}

fn route(distance_km: f64, traffic: TrafficLevel, base_minutes: f64) -> Route {
    Route::new("R1".to_string(), distance_km, traffic, base_minutes)
}

fn order(id: &str, value: f64, route: &Route) -> RoutedOrder {
    RoutedOrder::resolved(
        Order::new(id.to_string(), value, route.id().to_string()),
        route.clone(),
    )
}

fn unresolved(id: &str, value: f64) -> RoutedOrder {
    RoutedOrder::unresolved(Order::new(id.to_string(), value, "R-missing".to_string()))
}

// ============================================================================
// Single-order rule scenarios
// ============================================================================

#[test]
fn test_on_time_high_value_delivery() {
    let r = route(10.0, TrafficLevel::Low, 60.0);
    let outcome = run_simulation(
        &params(1, 8.0),
        &[rested_driver("D001")],
        vec![order("ORD-1", 1_200.0, &r)],
    )
    .unwrap();

    let kpis = &outcome.kpis;
    assert_eq!(kpis.on_time_deliveries, 1);
    assert_eq!(kpis.late_deliveries, 0);
    assert_eq!(kpis.unassigned_orders, 0);
    assert_close(kpis.total_profit, 1_270.0);
    assert_close(kpis.total_fuel_cost, 50.0);
    assert_close(kpis.efficiency_score, 100.0);

    let delivery = &outcome.deliveries[0];
    assert_close(delivery.bonus, 120.0);
    assert_close(delivery.penalty, 0.0);
    assert_close(delivery.fuel_cost, 50.0);
}

#[test]
fn test_fatigued_driver_delivers_late() {
    let r = route(10.0, TrafficLevel::Low, 60.0);
    let outcome = run_simulation(
        &params(1, 8.0),
        &[fatigued_driver("D001")],
        vec![order("ORD-1", 1_200.0, &r)],
    )
    .unwrap();

    let kpis = &outcome.kpis;
    assert_eq!(kpis.on_time_deliveries, 0);
    assert_eq!(kpis.late_deliveries, 1);
    assert_close(kpis.total_profit, 1_100.0);
    assert_close(kpis.efficiency_score, 0.0);

    let delivery = &outcome.deliveries[0];
    assert!(delivery.late);
    assert_close(delivery.effective_minutes, 78.0);
    assert_close(delivery.bonus, 0.0);
    assert_close(delivery.penalty, 50.0);
}

#[test]
fn test_fatigue_within_grace_period_stays_on_time() {
    // 30 min * 1.3 = 39 min, only 9 over base
    let r = route(4.0, TrafficLevel::Medium, 30.0);
    let outcome = run_simulation(
        &params(1, 8.0),
        &[fatigued_driver("D001")],
        vec![order("ORD-1", 2_000.0, &r)],
    )
    .unwrap();

    assert_eq!(outcome.kpis.on_time_deliveries, 1);
    assert_close(outcome.deliveries[0].effective_minutes, 39.0);
    assert_close(outcome.deliveries[0].bonus, 200.0);
    // 2000 + 200 - 0 - 20
    assert_close(outcome.kpis.total_profit, 2_180.0);
}

#[test]
fn test_high_traffic_surcharge() {
    let r = route(10.0, TrafficLevel::High, 30.0);
    let outcome = run_simulation(
        &params(1, 8.0),
        &[rested_driver("D001")],
        vec![order("ORD-1", 500.0, &r)],
    )
    .unwrap();

    assert_close(outcome.kpis.total_fuel_cost, 70.0);
    // No bonus at 500; 500 - 70
    assert_close(outcome.kpis.total_profit, 430.0);
}

#[test]
fn test_value_of_exactly_one_thousand_earns_no_bonus() {
    let r = route(2.0, TrafficLevel::Low, 15.0);
    let outcome = run_simulation(
        &params(1, 8.0),
        &[rested_driver("D001")],
        vec![order("ORD-1", 1_000.0, &r)],
    )
    .unwrap();

    assert_close(outcome.deliveries[0].bonus, 0.0);
    assert_close(outcome.kpis.total_profit, 990.0);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_driver_count_exceeds_roster() {
    let err = run_simulation(&params(3, 8.0), &[rested_driver("D001")], Vec::new()).unwrap_err();

    match err {
        SimulationError::Validation(ValidationError::DriverCountExceedsRoster {
            requested,
            available,
        }) => {
            assert_eq!(requested, 3);
            assert_eq!(available, 1);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_zero_max_hours_rejected() {
    let err = run_simulation(&params(1, 0.0), &[rested_driver("D001")], Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Validation(ValidationError::NonPositiveMaxHours(_))
    ));
}

#[test]
fn test_infinite_max_hours_rejected() {
    let r = route(10.0, TrafficLevel::Low, 60.0);
    let err = run_simulation(
        &params(1, f64::INFINITY),
        &[rested_driver("D001")],
        vec![order("ORD-1", 1_200.0, &r)],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        SimulationError::Validation(ValidationError::NonPositiveMaxHours(_))
    ));
}

#[test]
fn test_validation_messages_are_distinct() {
    let messages = [
        ValidationError::NonPositiveDriverCount(0).to_string(),
        ValidationError::NonPositiveMaxHours(0.0).to_string(),
        ValidationError::DriverCountExceedsRoster {
            requested: 5,
            available: 2,
        }
        .to_string(),
    ];

    assert!(messages[0].contains("numberOfDrivers"));
    assert!(messages[1].contains("maxHoursPerDriver"));
    assert!(messages[2].contains("exceeds available drivers"));
}

// ============================================================================
// Empty and unresolved pools
// ============================================================================

#[test]
fn test_empty_order_pool() {
    let outcome = run_simulation(&params(1, 8.0), &[rested_driver("D001")], Vec::new()).unwrap();

    let kpis = &outcome.kpis;
    assert_eq!(kpis.total_profit, 0.0);
    assert_eq!(kpis.efficiency_score, 0.0);
    assert_eq!(kpis.on_time_deliveries, 0);
    assert_eq!(kpis.late_deliveries, 0);
    assert_eq!(kpis.unassigned_orders, 0);
}

#[test]
fn test_all_routes_unresolved() {
    let outcome = run_simulation(
        &params(1, 8.0),
        &[rested_driver("D001")],
        vec![unresolved("A", 500.0), unresolved("B", 900.0)],
    )
    .unwrap();

    assert_eq!(outcome.kpis.total_profit, 0.0);
    assert_eq!(outcome.kpis.efficiency_score, 0.0);
    assert_eq!(outcome.kpis.unassigned_orders, 0);
    assert_eq!(outcome.dropped_orders.len(), 2);
    assert_eq!(outcome.events.events_of_type("OrderDropped").len(), 2);
}

#[test]
fn test_unresolved_order_consumes_no_driver_time() {
    // Cap fits exactly one 60-minute order; the dropped order in front of
    // it must not use any of that hour.
    let r = route(5.0, TrafficLevel::Low, 60.0);
    let outcome = run_simulation(
        &params(1, 1.0),
        &[rested_driver("D001")],
        vec![unresolved("A", 500.0), order("B", 500.0, &r)],
    )
    .unwrap();

    assert_eq!(outcome.kpis.on_time_deliveries, 1);
    assert_eq!(outcome.deliveries[0].order_id, "B");
}

// ============================================================================
// Shift capacity and requeue
// ============================================================================

#[test]
fn test_requeued_order_goes_to_next_driver() {
    // 90-minute orders, 2-hour cap: each driver takes one, the second
    // does not fit and is put back for the next driver.
    let r = route(5.0, TrafficLevel::Low, 90.0);
    let outcome = run_simulation(
        &params(2, 2.0),
        &[rested_driver("D001"), rested_driver("D002")],
        vec![order("A", 500.0, &r), order("B", 500.0, &r), order("C", 500.0, &r)],
    )
    .unwrap();

    let assignments: Vec<(&str, &str)> = outcome
        .deliveries
        .iter()
        .map(|d| (d.driver_id.as_str(), d.order_id.as_str()))
        .collect();
    assert_eq!(assignments, vec![("D001", "A"), ("D002", "B")]);

    assert_eq!(outcome.kpis.unassigned_orders, 1);
    assert_eq!(outcome.remaining_orders[0].id(), "C");

    let requeues = outcome.events.events_of_type("OrderRequeued");
    assert_eq!(requeues.len(), 2);
    assert_eq!(requeues[0].order_id(), Some("B"));
    assert_eq!(requeues[0].driver_id(), Some("D001"));
}

#[test]
fn test_requeue_stops_driver_even_if_later_order_fits() {
    // Long order at the head blocks a short one behind it.
    let long = Route::new("LONG".to_string(), 5.0, TrafficLevel::Low, 120.0);
    let short = Route::new("SHORT".to_string(), 1.0, TrafficLevel::Low, 10.0);

    let outcome = run_simulation(
        &params(1, 1.5),
        &[rested_driver("D001")],
        vec![order("A", 100.0, &short), order("B", 100.0, &long), order("C", 100.0, &short)],
    )
    .unwrap();

    assert_eq!(outcome.kpis.on_time_deliveries, 1);
    assert_eq!(outcome.kpis.unassigned_orders, 2);
    let remaining: Vec<&str> = outcome.remaining_orders.iter().map(|o| o.id()).collect();
    assert_eq!(remaining, vec!["B", "C"]);
}

#[test]
fn test_order_exactly_filling_cap_is_delivered() {
    let r = route(5.0, TrafficLevel::Low, 120.0);
    let outcome = run_simulation(
        &params(1, 2.0),
        &[rested_driver("D001")],
        vec![order("A", 100.0, &r), order("B", 100.0, &r)],
    )
    .unwrap();

    assert_eq!(outcome.kpis.on_time_deliveries, 1);
    assert_eq!(outcome.kpis.unassigned_orders, 1);

    // Driver was full, so B was never popped: no requeue event
    assert!(outcome.events.events_of_type("OrderRequeued").is_empty());
}

#[test]
fn test_last_driver_leaves_requeued_order_unassigned() {
    let r = route(5.0, TrafficLevel::Low, 300.0);
    let outcome = run_simulation(
        &params(1, 4.0),
        &[rested_driver("D001")],
        vec![order("A", 100.0, &r)],
    )
    .unwrap();

    assert_eq!(outcome.kpis.total_deliveries(), 0);
    assert_eq!(outcome.kpis.unassigned_orders, 1);
    assert_eq!(outcome.remaining_orders[0].id(), "A");
}

#[test]
fn test_route_start_time_does_not_affect_results() {
    let r = route(8.0, TrafficLevel::High, 45.0);
    let orders = vec![order("A", 1_500.0, &r), order("B", 800.0, &r)];
    let drivers = [rested_driver("D001")];

    let mut morning = params(1, 8.0);
    morning.route_start_time = "06:00".to_string();
    let mut night = params(1, 8.0);
    night.route_start_time = "23:30".to_string();

    let a = run_simulation(&morning, &drivers, orders.clone()).unwrap();
    let b = run_simulation(&night, &drivers, orders).unwrap();
    assert_eq!(a.kpis, b.kpis);
}

#[test]
fn test_mixed_roster_efficiency() {
    // D001 rested, D002 fatigued; one-hour cap, one order each
    let r = route(10.0, TrafficLevel::Low, 60.0);
    let outcome = run_simulation(
        &params(2, 1.0),
        &[rested_driver("D001"), fatigued_driver("D002")],
        vec![order("A", 500.0, &r), order("B", 500.0, &r)],
    )
    .unwrap();

    // D002 needs 1.3h and has a 1h cap, so B is requeued and unassigned
    assert_eq!(outcome.kpis.on_time_deliveries, 1);
    assert_eq!(outcome.kpis.late_deliveries, 0);
    assert_eq!(outcome.kpis.unassigned_orders, 1);
    assert_close(outcome.kpis.efficiency_score, 100.0);

    let shift_events: Vec<&Event> = outcome.events.events_of_type("ShiftEnded");
    assert_eq!(shift_events.len(), 2);
}
