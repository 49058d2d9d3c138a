//! Transformer ports: fitted categorical encoders and the numeric scaler.

/// A fitted mapping from a closed set of categorical string values to
/// integer codes, established at training time.
///
/// Implementations are immutable after load and shared read-only across
/// requests.
pub trait CategoryEncoder: Send + Sync {
    /// The vocabulary the encoder was fit on, in code order.
    fn classes(&self) -> &[String];

    /// Integer code for `value`.
    ///
    /// # Returns
    /// `None` when the value is outside the fitted vocabulary. Callers must
    /// treat that as an error, never substitute a default code.
    fn encode(&self, value: &str) -> Option<usize>;
}

/// A fitted numeric transformer applied identically at training and
/// inference time.
///
/// The scaler was fit on multi-column input and treats column position as
/// identity: callers must pass rows in the exact column order used at fit
/// time.
pub trait FeatureScaler: Send + Sync {
    /// Error type for transform failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of columns the scaler was fit on.
    fn width(&self) -> usize;

    /// Transform one row (a batch of one).
    ///
    /// # Errors
    /// Returns an error if the row width does not match the fitted width.
    /// Implementations must reject mismatched shapes rather than coerce.
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, Self::Error>;
}
