//! Feature vector layout for the trained classifier.
//!
//! The column order below is the order the scaler and classifier were fit
//! on. It is an externally-fixed contract, not a design choice: a silent
//! column swap produces a numerically valid but semantically wrong
//! prediction with no runtime error. Keep `FEATURE_ORDER` as the single
//! source of truth and validate artifact widths against it at startup.

use serde::{Deserialize, Serialize};

/// Column order the classifier was fit on: categorical block first, then
/// the scaled numeric block in the internal order `{age, bmi, hba1c, glucose}`.
pub const FEATURE_ORDER: [&str; 8] = [
    "gender",
    "hypertension",
    "heart_disease",
    "smoking_status",
    "age",
    "bmi",
    "hba1c",
    "glucose",
];

/// Total width of the assembled vector.
pub const FEATURE_WIDTH: usize = FEATURE_ORDER.len();

/// Width of the leading categorical/boolean block.
pub const CATEGORICAL_WIDTH: usize = 4;

/// Width of the trailing scaled numeric block.
pub const NUMERIC_WIDTH: usize = FEATURE_WIDTH - CATEGORICAL_WIDTH;

/// The fixed-order numeric array passed to the classifier for one prediction.
///
/// Ephemeral and request-local; created during feature assembly and
/// discarded after the verdict is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_WIDTH],
}

impl FeatureVector {
    /// Concatenate the encoded categorical block and the scaled numeric
    /// block, categorical-first.
    #[must_use]
    pub fn from_blocks(
        categorical: [f64; CATEGORICAL_WIDTH],
        scaled_numeric: [f64; NUMERIC_WIDTH],
    ) -> Self {
        let mut values = [0.0; FEATURE_WIDTH];
        values[..CATEGORICAL_WIDTH].copy_from_slice(&categorical);
        values[CATEGORICAL_WIDTH..].copy_from_slice(&scaled_numeric);
        Self { values }
    }

    /// The full vector in training column order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Vector width (always [`FEATURE_WIDTH`]).
    #[must_use]
    pub fn width(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_constant_is_consistent() {
        assert_eq!(FEATURE_WIDTH, 8);
        assert_eq!(CATEGORICAL_WIDTH + NUMERIC_WIDTH, FEATURE_WIDTH);
        // Numeric block order is part of the scaler's fit contract.
        assert_eq!(
            &FEATURE_ORDER[CATEGORICAL_WIDTH..],
            &["age", "bmi", "hba1c", "glucose"]
        );
    }

    #[test]
    fn test_from_blocks_keeps_categorical_first() {
        let v = FeatureVector::from_blocks([1.0, 0.0, 1.0, 4.0], [0.1, -0.2, 0.3, -0.4]);
        assert_eq!(v.width(), FEATURE_WIDTH);
        assert_eq!(&v.as_slice()[..4], &[1.0, 0.0, 1.0, 4.0]);
        assert_eq!(&v.as_slice()[4..], &[0.1, -0.2, 0.3, -0.4]);
    }
}
