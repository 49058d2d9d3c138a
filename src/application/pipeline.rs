//! Prediction service: validation, encoding, feature assembly, inference.
//!
//! One synchronous, blocking sequence per submission:
//!
//! ```text
//! RawSubmission → validate → PatientRecord
//!                             │
//!                encode categoricals (fitted encoders)
//!                scale numerics     (fitted scaler, batch of one)
//!                             │
//!                  FeatureVector (categorical block first)
//!                             │
//!                   classifier label → Verdict
//! ```
//!
//! The service holds the artifacts behind `Arc` and is safe for unlimited
//! concurrent use: artifacts are immutable after load, and every record and
//! vector is request-local.

use std::sync::Arc;

use crate::domain::{
    FeatureVector, Field, PatientRecord, PipelineError, Prediction, RawSubmission, Verdict,
    CATEGORICAL_WIDTH, FEATURE_WIDTH, NUMERIC_WIDTH,
};
use crate::ports::{CategoryEncoder, Classifier, FeatureScaler};

/// Service for running one risk prediction per submission.
///
/// Artifacts are injected at construction (never looked up ambiently), so
/// the pipeline is testable against in-memory artifacts.
#[derive(Debug)]
pub struct PredictionService<E, S, C>
where
    E: CategoryEncoder,
    S: FeatureScaler,
    C: Classifier,
{
    gender_encoder: Arc<E>,
    smoking_encoder: Arc<E>,
    scaler: Arc<S>,
    classifier: Arc<C>,
}

impl<E, S, C> PredictionService<E, S, C>
where
    E: CategoryEncoder,
    S: FeatureScaler,
    C: Classifier,
{
    /// Create the service and run the startup self-check.
    ///
    /// The feature order is an externally-fixed contract with no per-request
    /// safety net, so the one check available (declared artifact widths
    /// against the feature-order constant) happens here, before any
    /// request is served.
    ///
    /// # Errors
    /// Returns `ArtifactMismatch` if the scaler or classifier widths do not
    /// match the training-time layout.
    pub fn new(
        gender_encoder: Arc<E>,
        smoking_encoder: Arc<E>,
        scaler: Arc<S>,
        classifier: Arc<C>,
    ) -> Result<Self, PipelineError> {
        if scaler.width() != NUMERIC_WIDTH {
            return Err(PipelineError::ArtifactMismatch(format!(
                "scaler fit on {} columns, feature layout has {} numeric columns",
                scaler.width(),
                NUMERIC_WIDTH
            )));
        }

        if let Some(width) = classifier.expected_width() {
            if width != FEATURE_WIDTH {
                return Err(PipelineError::ArtifactMismatch(format!(
                    "classifier fit on {width} features, feature layout has {FEATURE_WIDTH}"
                )));
            }
        }

        tracing::info!(
            "Prediction service ready (feature width={}, categorical block={}, numeric block={})",
            FEATURE_WIDTH,
            CATEGORICAL_WIDTH,
            NUMERIC_WIDTH
        );

        Ok(Self {
            gender_encoder,
            smoking_encoder,
            scaler,
            classifier,
        })
    }

    /// Run the full pipeline for one raw submission.
    ///
    /// This is the single call the presentation layer makes. Routine
    /// validation failures are logged at `warn`; `ArtifactMismatch` is a
    /// deployment bug and is logged at `error`, distinctly.
    ///
    /// # Errors
    /// Any [`PipelineError`]; all are terminal for this submission.
    pub fn evaluate(&self, raw: &RawSubmission) -> Result<Prediction, PipelineError> {
        match self.evaluate_inner(raw) {
            Ok(prediction) => {
                tracing::info!(
                    id = %prediction.id,
                    verdict = %prediction.verdict,
                    "Prediction complete"
                );
                Ok(prediction)
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(error = %e, "Submission rejected");
                Err(e)
            }
            Err(e) => {
                tracing::error!(error = %e, "Artifact contract violation");
                Err(e)
            }
        }
    }

    fn evaluate_inner(&self, raw: &RawSubmission) -> Result<Prediction, PipelineError> {
        let record = raw.validate()?;
        let features = self.assemble(&record)?;
        let verdict = self.predict(&features)?;
        Ok(Prediction::new(verdict))
    }

    /// Assemble the fixed-width feature vector for a validated record.
    ///
    /// # Errors
    /// - `UnknownCategory` for a categorical outside the fitted vocabulary
    /// - `ArtifactMismatch` if the scaler rejects the numeric block
    pub fn assemble(&self, record: &PatientRecord) -> Result<FeatureVector, PipelineError> {
        let gender_code = self.encode(&*self.gender_encoder, Field::Gender, &record.gender)?;
        let smoking_code = self.encode(
            &*self.smoking_encoder,
            Field::SmokingStatus,
            &record.smoking_status,
        )?;

        let categorical = [
            gender_code as f64,
            f64::from(u8::from(record.hypertension)),
            f64::from(u8::from(record.heart_disease)),
            smoking_code as f64,
        ];

        // One batch of one row, in the scaler's fit order.
        let scaled = self
            .scaler
            .transform(&record.numeric_row())
            .map_err(|e| PipelineError::ArtifactMismatch(format!("scaler rejected numeric block: {e}")))?;
        let scaled: [f64; NUMERIC_WIDTH] = scaled.try_into().map_err(|v: Vec<f64>| {
            PipelineError::ArtifactMismatch(format!(
                "scaler returned {} columns, expected {}",
                v.len(),
                NUMERIC_WIDTH
            ))
        })?;

        Ok(FeatureVector::from_blocks(categorical, scaled))
    }

    /// Invoke the classifier and map its label to a verdict.
    ///
    /// # Errors
    /// `ArtifactMismatch` if the classifier rejects the vector shape or
    /// produces a label outside {0, 1}.
    pub fn predict(&self, features: &FeatureVector) -> Result<Verdict, PipelineError> {
        let label = self.classifier.predict(features).map_err(|e| {
            PipelineError::ArtifactMismatch(format!("classifier rejected feature vector: {e}"))
        })?;

        Verdict::from_label(label).ok_or_else(|| {
            PipelineError::ArtifactMismatch(format!("classifier produced undefined label {label}"))
        })
    }

    fn encode(
        &self,
        encoder: &E,
        field: Field,
        value: &str,
    ) -> Result<usize, PipelineError> {
        encoder
            .encode(value)
            .ok_or_else(|| PipelineError::UnknownCategory {
                field,
                value: value.to_string(),
            })
    }
}
