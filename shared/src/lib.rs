//! Diet Planner Shared Library
//!
//! This crate contains the metrics calculator, request/response types and
//! validation used by the backend and the WASM module.

pub mod errors;
pub mod health_metrics;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use types::*;
pub use validation::validate_plan_request;
