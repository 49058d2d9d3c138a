//! Ports layer: Trait definitions for the trained artifacts.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the pipeline and the externally trained artifacts (encoders,
//! scaler, classifier). The pipeline depends only on these capabilities,
//! never on a concrete modeling library, so artifacts can be swapped or
//! mocked without touching pipeline logic.

mod classifier;
mod transform;

pub use classifier::Classifier;
pub use transform::{CategoryEncoder, FeatureScaler};
