//! Verdict types for the binary diabetes risk prediction.

use serde::{Deserialize, Serialize};

/// Binary verdict mapped from the classifier label.
///
/// The classifier's output contract defines exactly two labels: 0 and 1.
/// Anything else is an artifact mismatch, which is why [`Verdict::from_label`]
/// returns `Option` instead of defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Label 0: no elevated diabetes risk detected
    Negative,
    /// Label 1: elevated diabetes risk detected
    Positive,
}

impl Verdict {
    /// Map a classifier label to a verdict. `None` for undefined labels.
    #[must_use]
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(Self::Negative),
            1 => Some(Self::Positive),
            _ => None,
        }
    }

    /// The label this verdict corresponds to.
    #[must_use]
    pub fn label(&self) -> i64 {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    /// Human-facing verdict text for the presentation layer.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Negative => "Negative - no elevated type 2 diabetes risk detected",
            Self::Positive => "Positive - elevated type 2 diabetes risk, consult a clinician",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => write!(f, "Negative"),
            Self::Positive => write!(f, "Positive"),
        }
    }
}

/// One prediction result. Request-scoped: created for a single submission,
/// shown to the user, then discarded. The id exists for log correlation
/// only; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Random request id (hex)
    pub id: String,

    /// The binary verdict
    pub verdict: Verdict,

    /// Timestamp of the prediction
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    /// Wrap a verdict with a fresh request id and timestamp.
    #[must_use]
    pub fn new(verdict: Verdict) -> Self {
        Self {
            id: request_id(),
            verdict,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a short random request id using a CSPRNG seeded from OS entropy,
/// so ids are unpredictable across processes and platforms.
fn request_id() -> String {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 8] = rng.gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(Verdict::from_label(0), Some(Verdict::Negative));
        assert_eq!(Verdict::from_label(1), Some(Verdict::Positive));
        assert_eq!(Verdict::from_label(2), None);
        assert_eq!(Verdict::from_label(-1), None);
    }

    #[test]
    fn test_verdict_text() {
        assert_eq!(Verdict::Positive.to_string(), "Positive");
        assert_eq!(Verdict::Negative.to_string(), "Negative");
        assert!(Verdict::Positive.description().contains("Positive"));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = Prediction::new(Verdict::Negative);
        let b = Prediction::new(Verdict::Negative);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 16);
    }
}
