//! Adapters layer: Concrete implementations of ports.
//!
//! - `artifacts`: JSON exports of the fitted sklearn objects (encoders,
//!   scaler, classifier) loaded read-only at startup
//! - `prevalence`: yearly case-count CSV consumed by the informational chart

pub mod artifacts;
pub mod prevalence;

pub use artifacts::{
    ArtifactError, ArtifactStore, JsonCategoryEncoder, JsonLinearClassifier, JsonStandardScaler,
};
pub use prevalence::{load_yearly_cases, PrevalenceError, YearlyCases};
