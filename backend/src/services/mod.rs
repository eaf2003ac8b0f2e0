//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod plan;
pub mod prompt;

pub use plan::{PlanError, PlanService, PlanText};
