//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement the
//! single use case of the crate: one prediction per submission.

mod pipeline;

pub use pipeline::PredictionService;
