//! # Diabrisk
//!
//! Diabetes risk prediction core. Turns raw form input into the exact
//! feature vector a pre-trained binary classifier expects, runs the
//! classifier, and maps its label to a Positive/Negative verdict.
//!
//! The statistical model, feature scaler and categorical encoders are
//! externally trained artifacts loaded read-only at startup. The hard part
//! of this crate is not the model: it is the validation and feature-assembly
//! pipeline, which is order-sensitive and encoding-sensitive with no runtime
//! safety net beyond the startup width check.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (raw submission, patient record, feature vector, verdict)
//! - `ports`: Trait definitions for the trained artifacts
//! - `adapters`: Concrete implementations (JSON artifact exports, prevalence CSV)
//! - `application`: The prediction service orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::PredictionService;
pub use domain::{PatientRecord, PipelineError, Prediction, RawSubmission, Verdict};

/// Result type for Diabrisk operations
pub type Result<T> = std::result::Result<T, DiabriskError>;

/// Main error type for Diabrisk
#[derive(Debug, thiserror::Error)]
pub enum DiabriskError {
    #[error("Prediction pipeline failed: {0}")]
    Pipeline(#[from] domain::PipelineError),

    #[error("Artifact store failed: {0}")]
    Artifact(#[from] adapters::ArtifactError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ArtifactError;
    use crate::domain::{Field, PipelineError};

    #[test]
    fn layer_errors_convert_into_the_crate_error() {
        let e: DiabriskError = PipelineError::IncompleteInput(vec![Field::Bmi]).into();
        assert!(matches!(e, DiabriskError::Pipeline(_)));

        let e: DiabriskError = ArtifactError::Missing {
            name: "scaler",
            path: "artifacts/scaler.json".into(),
        }
        .into();
        assert!(matches!(e, DiabriskError::Artifact(_)));
    }
}
