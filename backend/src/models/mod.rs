//! Domain models for the delivery simulator

pub mod driver;
pub mod event;
pub mod order;
pub mod queue;
pub mod route;
pub mod run;

// Re-exports
pub use driver::Driver;
pub use event::{Event, EventLog};
pub use order::{Order, RoutedOrder};
pub use queue::OrderQueue;
pub use route::{Route, TrafficLevel};
pub use run::{DeliveryRecord, RunKpis, RunParameters, RunSummary, SimulationRun};
