//! Orchestrator - the allocation pass
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{
    run_simulation, KpiAccumulator, SimulationEngine, SimulationError, SimulationOutcome,
    ValidationError,
};
