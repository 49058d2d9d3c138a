//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O. All validation that
//! does not require a fitted artifact lives here.

mod error;
mod features;
mod patient;
mod verdict;

pub use error::{Field, PipelineError};
pub use features::{FeatureVector, CATEGORICAL_WIDTH, FEATURE_ORDER, FEATURE_WIDTH, NUMERIC_WIDTH};
pub use patient::{PatientRecord, RawSubmission};
pub use verdict::{Prediction, Verdict};
