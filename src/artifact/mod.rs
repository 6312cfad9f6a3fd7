//! Artifact loading
//!
//! Reads the trained model (and optional scaler) from a JSON bundle,
//! validates it against the feature schema and memoizes the outcome for the
//! lifetime of the process.

pub mod bundle;
pub mod cache;
pub mod loader;

pub use bundle::ArtifactBundle;
pub use cache::{cached_artifacts, ArtifactCache};
pub use loader::{load_artifacts, load_bundle, LoadedArtifacts};
