//! Pipeline error taxonomy.
//!
//! Four of the five kinds are routine and user-correctable; `ArtifactMismatch`
//! is a deployment bug and is logged distinctly at the pipeline boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for one input field, used in validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Gender,
    Age,
    Hypertension,
    HeartDisease,
    SmokingStatus,
    Bmi,
    HbA1c,
    Glucose,
}

impl Field {
    /// Stable snake_case name, matching the training-time column names.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Hypertension => "hypertension",
            Self::HeartDisease => "heart_disease",
            Self::SmokingStatus => "smoking_status",
            Self::Bmi => "bmi",
            Self::HbA1c => "hba1c",
            Self::Glucose => "glucose",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error produced by the validation, encoding, assembly or prediction stages.
///
/// Validation failures are terminal for a submission: the user corrects the
/// input and resubmits. There is no partial-success state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// One or more required fields are unset (strict variant).
    #[error("Required field(s) not filled: {}", join_fields(.0))]
    IncompleteInput(Vec<Field>),

    /// A numeric field (notably free-text glucose) failed to parse.
    #[error("Field {field} is not a valid number: {value:?}")]
    InvalidNumericInput { field: Field, value: String },

    /// A numeric field parsed but falls outside its documented domain.
    #[error("Field {field} value {value} outside allowed range [{min}, {max}]")]
    OutOfRange {
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A categorical value outside the vocabulary the encoder was fit on.
    /// Never silently substituted with a default.
    #[error("Field {field} value {value:?} is outside the fitted vocabulary")]
    UnknownCategory { field: Field, value: String },

    /// The assembled vector or the classifier output violates the
    /// externally-fixed training contract. Fatal configuration error.
    #[error("Artifact contract violation: {0}")]
    ArtifactMismatch(String),
}

impl PipelineError {
    /// Whether the user can fix this by correcting input and resubmitting.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ArtifactMismatch(_))
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::name)
        .collect::<Vec<_>>()
        .join(", ")
}
