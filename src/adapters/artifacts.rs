//! JSON artifact adapters for the trained model store.
//!
//! The artifacts are JSON exports of the fitted sklearn objects, one file
//! per artifact, mirroring the fitted attributes (`classes_`, `mean_` /
//! `scale_`, `coef_` / `intercept_` / `classes_`). They are versioned,
//! immutable inputs: this crate never trains or refits anything.
//!
//! Loading is fail-fast: a missing or incompatible artifact aborts startup
//! with a diagnostic rather than serving wrong predictions later.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::FeatureVector;
use crate::ports::{CategoryEncoder, Classifier, FeatureScaler};

/// File names inside the artifact directory.
pub const GENDER_ENCODER_FILE: &str = "le_gender.json";
pub const SMOKING_ENCODER_FILE: &str = "le_smoking.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const CLASSIFIER_FILE: &str = "model.json";

/// Error type for artifact loading and artifact-backed operations.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact {name} not found at {path}")]
    Missing { name: &'static str, path: String },

    #[error("Failed to read artifact {name}: {source}")]
    Io {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid artifact {name} format: {source}")]
    Format {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Incompatible artifact {name}: {reason}")]
    Incompatible { name: &'static str, reason: String },
}

// =========================================================================
// Categorical encoders
// =========================================================================

/// JSON export of a fitted label encoder: the class list in code order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCategoryEncoder {
    pub classes: Vec<String>,
}

impl JsonCategoryEncoder {
    fn check(&self, name: &'static str) -> Result<(), ArtifactError> {
        if self.classes.is_empty() {
            return Err(ArtifactError::Incompatible {
                name,
                reason: "empty class list".into(),
            });
        }
        for (i, class) in self.classes.iter().enumerate() {
            if self.classes[..i].contains(class) {
                return Err(ArtifactError::Incompatible {
                    name,
                    reason: format!("duplicate class {class:?}"),
                });
            }
        }
        Ok(())
    }
}

impl CategoryEncoder for JsonCategoryEncoder {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn encode(&self, value: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == value)
    }
}

// =========================================================================
// Numeric scaler
// =========================================================================

/// JSON export of a fitted standardization scaler: per-column mean and
/// scale. Transform is `(x - mean) / scale`, column position is identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonStandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl JsonStandardScaler {
    fn check(&self, name: &'static str) -> Result<(), ArtifactError> {
        if self.mean.is_empty() || self.mean.len() != self.scale.len() {
            return Err(ArtifactError::Incompatible {
                name,
                reason: format!(
                    "mean has {} columns, scale has {}",
                    self.mean.len(),
                    self.scale.len()
                ),
            });
        }
        if self
            .scale
            .iter()
            .any(|s| !s.is_finite() || s.abs() < f64::EPSILON)
        {
            return Err(ArtifactError::Incompatible {
                name,
                reason: "scale contains zero or non-finite values".into(),
            });
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(ArtifactError::Incompatible {
                name,
                reason: "mean contains non-finite values".into(),
            });
        }
        Ok(())
    }
}

impl FeatureScaler for JsonStandardScaler {
    type Error = ArtifactError;

    fn width(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        if row.len() != self.mean.len() {
            return Err(ArtifactError::Incompatible {
                name: "scaler",
                reason: format!(
                    "column count mismatch: got {}, fit on {}",
                    row.len(),
                    self.mean.len()
                ),
            });
        }

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

// =========================================================================
// Classifier
// =========================================================================

/// JSON export of a fitted linear binary classifier.
///
/// Prediction follows the exporting library's decision rule: the label is
/// `classes[1]` when `coef . x + intercept > 0`, `classes[0]` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonLinearClassifier {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub classes: Vec<i64>,
}

impl JsonLinearClassifier {
    fn check(&self, name: &'static str) -> Result<(), ArtifactError> {
        if self.coefficients.is_empty() {
            return Err(ArtifactError::Incompatible {
                name,
                reason: "empty coefficient vector".into(),
            });
        }
        if self.coefficients.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err(ArtifactError::Incompatible {
                name,
                reason: "non-finite coefficients or intercept".into(),
            });
        }
        if self.classes.len() != 2 {
            return Err(ArtifactError::Incompatible {
                name,
                reason: format!("expected 2 classes, got {}", self.classes.len()),
            });
        }
        Ok(())
    }

    /// The raw decision function `coef . x + intercept`.
    fn decision(&self, row: &[f64]) -> f64 {
        row.iter()
            .zip(self.coefficients.iter())
            .map(|(x, c)| x * c)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for JsonLinearClassifier {
    type Error = ArtifactError;

    fn expected_width(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64, ArtifactError> {
        let row = features.as_slice();
        if row.len() != self.coefficients.len() {
            return Err(ArtifactError::Incompatible {
                name: "classifier",
                reason: format!(
                    "feature width mismatch: got {}, fit on {}",
                    row.len(),
                    self.coefficients.len()
                ),
            });
        }

        let idx = usize::from(self.decision(row) > 0.0);
        self.classes
            .get(idx)
            .copied()
            .ok_or_else(|| ArtifactError::Incompatible {
                name: "classifier",
                reason: "class list shorter than 2".into(),
            })
    }
}

// =========================================================================
// Artifact store
// =========================================================================

/// The four trained artifacts, loaded once at process start and shared
/// read-only by every request. Never mutated after load.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    pub gender: JsonCategoryEncoder,
    pub smoking: JsonCategoryEncoder,
    pub scaler: JsonStandardScaler,
    pub classifier: JsonLinearClassifier,
}

impl ArtifactStore {
    /// Load all four artifacts from `dir`.
    ///
    /// # Errors
    /// Fails fast on the first missing, unreadable, malformed or internally
    /// inconsistent artifact. Cross-artifact width checks belong to the
    /// prediction service, which owns the feature-order constant.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let gender: JsonCategoryEncoder = load_json(dir, GENDER_ENCODER_FILE, "gender encoder")?;
        gender.check("gender encoder")?;

        let smoking: JsonCategoryEncoder = load_json(dir, SMOKING_ENCODER_FILE, "smoking encoder")?;
        smoking.check("smoking encoder")?;

        let scaler: JsonStandardScaler = load_json(dir, SCALER_FILE, "scaler")?;
        scaler.check("scaler")?;

        let classifier: JsonLinearClassifier = load_json(dir, CLASSIFIER_FILE, "classifier")?;
        classifier.check("classifier")?;

        tracing::info!(
            "Loaded artifacts from {:?} (gender classes={}, smoking classes={}, scaler width={}, classifier width={})",
            dir,
            gender.classes.len(),
            smoking.classes.len(),
            scaler.width(),
            classifier.coefficients.len(),
        );

        Ok(Self {
            gender,
            smoking,
            scaler,
            classifier,
        })
    }
}

fn load_json<T: serde::de::DeserializeOwned>(
    dir: &Path,
    file: &'static str,
    name: &'static str,
) -> Result<T, ArtifactError> {
    let path = dir.join(file);
    if !path.exists() {
        return Err(ArtifactError::Missing {
            name,
            path: path.display().to_string(),
        });
    }

    let content =
        std::fs::read_to_string(&path).map_err(|source| ArtifactError::Io { name, source })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Format { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn gender_encoder() -> JsonCategoryEncoder {
        JsonCategoryEncoder {
            classes: vec!["Female".into(), "Male".into()],
        }
    }

    fn smoking_encoder() -> JsonCategoryEncoder {
        JsonCategoryEncoder {
            classes: [
                "No Info",
                "current",
                "ever",
                "former",
                "never",
                "not current",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    fn scaler() -> JsonStandardScaler {
        JsonStandardScaler {
            mean: vec![40.0, 27.0, 5.5, 138.0],
            scale: vec![20.0, 6.0, 1.0, 40.0],
        }
    }

    fn classifier() -> JsonLinearClassifier {
        JsonLinearClassifier {
            coefficients: vec![0.2, 0.7, 0.7, 0.05, 1.0, 0.6, 2.3, 1.8],
            intercept: -4.0,
            classes: vec![0, 1],
        }
    }

    fn write_artifacts(dir: &Path) {
        let pairs = [
            (
                GENDER_ENCODER_FILE,
                serde_json::to_string(&gender_encoder()).expect("serialize"),
            ),
            (
                SMOKING_ENCODER_FILE,
                serde_json::to_string(&smoking_encoder()).expect("serialize"),
            ),
            (
                SCALER_FILE,
                serde_json::to_string(&scaler()).expect("serialize"),
            ),
            (
                CLASSIFIER_FILE,
                serde_json::to_string(&classifier()).expect("serialize"),
            ),
        ];
        for (file, json) in pairs {
            std::fs::write(dir.join(file), json).expect("write artifact");
        }
    }

    #[test]
    fn test_encoder_positions_match_fit_order() {
        let enc = smoking_encoder();
        assert_eq!(enc.encode("No Info"), Some(0));
        assert_eq!(enc.encode("never"), Some(4));
        assert_eq!(enc.encode("not current"), Some(5));
    }

    #[test]
    fn test_encoder_rejects_out_of_vocabulary() {
        let enc = gender_encoder();
        assert_eq!(enc.encode("Other"), None);
        assert_eq!(enc.encode("male"), None); // case matters, no normalization
    }

    #[test]
    fn test_scaler_standardizes_by_column() {
        let s = scaler();
        let out = s.transform(&[60.0, 33.0, 6.5, 178.0]).expect("transform");
        assert!((out[0] - 1.0).abs() < 1e-9);
        assert!((out[1] - 1.0).abs() < 1e-9);
        assert!((out[2] - 1.0).abs() < 1e-9);
        assert!((out[3] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaler_rejects_wrong_width() {
        let s = scaler();
        let err = s.transform(&[1.0, 2.0]).expect_err("must reject");
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn test_classifier_decision_rule() {
        let c = JsonLinearClassifier {
            coefficients: vec![1.0; 8],
            intercept: -0.5,
            classes: vec![0, 1],
        };
        let positive = FeatureVector::from_blocks([1.0, 0.0, 0.0, 0.0], [0.0; 4]);
        assert_eq!(c.predict(&positive).expect("predict"), 1);

        let negative = FeatureVector::from_blocks([0.0; 4], [0.0; 4]);
        assert_eq!(c.predict(&negative).expect("predict"), 0);
    }

    #[test]
    fn test_store_loads_all_four_artifacts() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());

        let store = ArtifactStore::load(temp.path()).expect("load store");
        assert_eq!(store.gender.classes.len(), 2);
        assert_eq!(store.smoking.classes.len(), 6);
        assert_eq!(store.scaler.width(), 4);
        assert_eq!(store.classifier.expected_width(), Some(8));
    }

    #[test]
    fn test_store_fails_fast_on_missing_artifact() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());
        std::fs::remove_file(temp.path().join(SCALER_FILE)).expect("remove");

        let err = ArtifactStore::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, ArtifactError::Missing { name: "scaler", .. }));
    }

    #[test]
    fn test_store_rejects_inconsistent_scaler() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());
        let bad = JsonStandardScaler {
            mean: vec![1.0, 2.0],
            scale: vec![1.0],
        };
        std::fs::write(
            temp.path().join(SCALER_FILE),
            serde_json::to_string(&bad).expect("serialize"),
        )
        .expect("write");

        let err = ArtifactStore::load(temp.path()).expect_err("must fail");
        assert!(matches!(
            err,
            ArtifactError::Incompatible { name: "scaler", .. }
        ));
    }

    #[test]
    fn test_store_rejects_zero_scale() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());
        let bad = JsonStandardScaler {
            mean: vec![1.0, 2.0],
            scale: vec![1.0, 0.0],
        };
        std::fs::write(
            temp.path().join(SCALER_FILE),
            serde_json::to_string(&bad).expect("serialize"),
        )
        .expect("write");

        assert!(ArtifactStore::load(temp.path()).is_err());
    }

    #[test]
    fn test_store_rejects_malformed_json() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());
        std::fs::write(temp.path().join(CLASSIFIER_FILE), "{not json").expect("write");

        let err = ArtifactStore::load(temp.path()).expect_err("must fail");
        assert!(matches!(
            err,
            ArtifactError::Format {
                name: "classifier",
                ..
            }
        ));
    }
}
