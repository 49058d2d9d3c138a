//! Patient input types for diabetes risk prediction.
//!
//! `RawSubmission` carries field values exactly as the presentation layer
//! collected them; `PatientRecord` is the validated, typed input record.
//! Both are request-local and never retained after the submission.
//!
//! Clinical values are redacted from `Debug` output by type, so they never
//! reach logs even through error paths.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{Field, PipelineError};
use super::features::NUMERIC_WIDTH;

/// Documented numeric domains. Zero is excluded for bmi/hba1c/glucose, but
/// a strict zero there is already reported as "not filled" (widget default),
/// so the range checks only see genuinely entered values.
const AGE_RANGE: (f64, f64) = (0.0, 120.0);
const BMI_RANGE: (f64, f64) = (0.0, 80.0);
const HBA1C_RANGE: (f64, f64) = (0.0, 50.0);
const GLUCOSE_RANGE: (f64, f64) = (0.0, 1000.0);

/// One raw form submission, exactly as entered.
///
/// Selectors arrive as strings with `""` meaning "no selection". Numeric
/// inputs arrive as `Option<f64>` with `None` meaning "not filled", so an
/// entered `0` stays distinct from an untouched field. Glucose arrives as
/// free text and is parsed by the pipeline, not the form.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RawSubmission {
    pub gender: String,
    pub age: Option<f64>,
    pub hypertension: String,
    pub heart_disease: String,
    pub smoking_status: String,
    pub bmi: Option<f64>,
    pub hba1c: Option<f64>,
    pub glucose: String,
}

impl fmt::Debug for RawSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn mark(filled: bool) -> &'static str {
            if filled {
                "<set>"
            } else {
                "<unset>"
            }
        }

        f.debug_struct("RawSubmission")
            .field("gender", &mark(!self.gender.trim().is_empty()))
            .field("age", &mark(self.age.is_some()))
            .field("hypertension", &mark(!self.hypertension.trim().is_empty()))
            .field("heart_disease", &mark(!self.heart_disease.trim().is_empty()))
            .field(
                "smoking_status",
                &mark(!self.smoking_status.trim().is_empty()),
            )
            .field("bmi", &mark(self.bmi.is_some()))
            .field("hba1c", &mark(self.hba1c.is_some()))
            .field("glucose", &mark(!self.glucose.trim().is_empty()))
            .finish()
    }
}

/// The validated, typed representation of one prediction request.
///
/// Categorical fields stay as strings: their vocabulary is owned by the
/// fitted encoders, and checking membership here would duplicate (and could
/// drift from) the artifact's own class list.
#[derive(Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub gender: String,
    pub age: f64,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub smoking_status: String,
    pub bmi: f64,
    pub hba1c: f64,
    pub glucose: f64,
}

impl fmt::Debug for PatientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PatientRecord { <clinical values redacted> }")
    }
}

impl RawSubmission {
    /// Validate this submission into a [`PatientRecord`].
    ///
    /// Strict variant: every field must be present and non-default before
    /// anything else is attempted, and all missing fields are reported
    /// together. A `bmi` or `hba1c` of exactly `0.0` counts as unfilled
    /// (it is the widget default and outside the field's domain anyway);
    /// `age = 0` is a legitimate value.
    ///
    /// # Errors
    /// - `IncompleteInput` listing every unfilled field
    /// - `InvalidNumericInput` when glucose free text fails to parse
    /// - `OutOfRange` when a parsed numeric falls outside its domain
    /// - `UnknownCategory` when a yes/no selector holds an unexpected label
    pub fn validate(&self) -> Result<PatientRecord, PipelineError> {
        let mut missing = Vec::new();

        if self.gender.trim().is_empty() {
            missing.push(Field::Gender);
        }
        if self.age.is_none() {
            missing.push(Field::Age);
        }
        if self.hypertension.trim().is_empty() {
            missing.push(Field::Hypertension);
        }
        if self.heart_disease.trim().is_empty() {
            missing.push(Field::HeartDisease);
        }
        if self.smoking_status.trim().is_empty() {
            missing.push(Field::SmokingStatus);
        }
        if self.bmi.is_none() || self.bmi == Some(0.0) {
            missing.push(Field::Bmi);
        }
        if self.hba1c.is_none() || self.hba1c == Some(0.0) {
            missing.push(Field::HbA1c);
        }
        if self.glucose.trim().is_empty() {
            missing.push(Field::Glucose);
        }

        if !missing.is_empty() {
            return Err(PipelineError::IncompleteInput(missing));
        }

        // Presence was established above.
        let (age, bmi, hba1c) = match (self.age, self.bmi, self.hba1c) {
            (Some(a), Some(b), Some(h)) => (a, b, h),
            _ => return Err(PipelineError::IncompleteInput(missing)),
        };

        let glucose = parse_numeric(Field::Glucose, &self.glucose)?;

        check_closed_range(Field::Age, age, AGE_RANGE)?;
        check_half_open_range(Field::Bmi, bmi, BMI_RANGE)?;
        check_half_open_range(Field::HbA1c, hba1c, HBA1C_RANGE)?;
        check_half_open_range(Field::Glucose, glucose, GLUCOSE_RANGE)?;

        Ok(PatientRecord {
            gender: self.gender.trim().to_string(),
            age,
            hypertension: parse_yes_no(Field::Hypertension, &self.hypertension)?,
            heart_disease: parse_yes_no(Field::HeartDisease, &self.heart_disease)?,
            smoking_status: self.smoking_status.trim().to_string(),
            bmi,
            hba1c,
            glucose,
        })
    }
}

impl PatientRecord {
    /// Numeric features as one row for the fitted scaler, in the exact
    /// column order `{age, bmi, hba1c, glucose}` the scaler was fit on.
    /// The scaler treats column position as identity; reordering here is
    /// a silent correctness bug, not a runtime error.
    #[must_use]
    pub fn numeric_row(&self) -> [f64; NUMERIC_WIDTH] {
        [self.age, self.bmi, self.hba1c, self.glucose]
    }
}

/// Convert free text to a number. Failure here is a distinct error from
/// "field missing".
fn parse_numeric(field: Field, raw: &str) -> Result<f64, PipelineError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| PipelineError::InvalidNumericInput {
            field,
            value: trimmed.to_string(),
        })
}

/// `min <= value <= max`. Written so NaN fails the check.
fn check_closed_range(field: Field, value: f64, (min, max): (f64, f64)) -> Result<(), PipelineError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(PipelineError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// `min < value <= max`.
fn check_half_open_range(
    field: Field,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), PipelineError> {
    if value > min && value <= max {
        Ok(())
    } else {
        Err(PipelineError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Map the closed-set "Yes"/"No" selector labels to booleans.
fn parse_yes_no(field: Field, raw: &str) -> Result<bool, PipelineError> {
    match raw.trim() {
        "Yes" => Ok(true),
        "No" => Ok(false),
        other => Err(PipelineError::UnknownCategory {
            field,
            value: other.to_string(),
        }),
    }
}
