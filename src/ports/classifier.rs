//! Classifier port: the pre-trained binary decision function.

use crate::domain::FeatureVector;

/// A pre-trained classifier, loaded read-only at startup and shared across
/// requests.
///
/// The output contract defines labels {0, 1}; the pipeline treats anything
/// else as an artifact mismatch. A deterministic classifier is part of the
/// artifact contract: the same feature vector must always yield the same
/// label.
pub trait Classifier: Send + Sync {
    /// Error type for prediction failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The input width the artifact declares, when it exposes one.
    ///
    /// Used by the startup self-check against the feature-order constant.
    fn expected_width(&self) -> Option<usize>;

    /// Predict a class label for one assembled feature vector.
    ///
    /// # Errors
    /// Returns an error if the vector shape violates the artifact contract.
    fn predict(&self, features: &FeatureVector) -> Result<i64, Self::Error>;
}
