//! # Phone Price
//!
//! A small prediction engine that places a mobile phone in one of four price
//! tiers from twenty hardware features, using a pre-trained classifier and an
//! optional pre-fit scaler loaded from a JSON artifact bundle.
//!
//! ## Features
//!
//! - **Feature Schema**: The twenty features in the exact training order
//! - **Artifact Loading**: Bundled `{model, scaler}` files or a bare model, validated and cached once per process
//! - **Model Capabilities**: Class prediction always; class probabilities only when the model supports them
//! - **Prediction Pipeline**: Scale → classify → map class id to tier → optional probabilities
//! - **Diagnostics**: A fixed low-end reference phone that should land in "Low Cost"
//! - **Terminal Front-end**: A form-driven prompt with colored tier labels
//!
//! ## Quick Start
//!
//! ```no_run
//! use phone_price::{load_bundle, predict_price, render_prediction, FeatureRecord};
//!
//! let artifacts = load_bundle("mobile_price_classifier.json")?;
//! let record = FeatureRecord::from_slice(&[
//!     1200.0, 1.0, 2.2, 0.0, 5.0, 1.0, 32.0, 0.5, 140.0, 4.0,
//!     12.0, 900.0, 1400.0, 3000.0, 14.0, 7.0, 12.0, 1.0, 1.0, 1.0,
//! ])?;
//!
//! let prediction = predict_price(&record, &artifacts)?;
//! println!("{}", render_prediction(&prediction));
//! # Ok::<(), phone_price::PriceError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Artifact file → Loader → Cache → Session ─┐
//!                                           ▼
//! Form → FeatureRecord → Scaler → Classifier → PriceTier (+ probabilities)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod artifact;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod form;
pub mod model;
pub mod prediction;
pub mod schema;
pub mod session;
pub mod terminal;

// Re-export main types
pub use artifact::{cached_artifacts, load_artifacts, load_bundle, ArtifactBundle, LoadedArtifacts};
pub use config::AppConfig;
pub use diagnostic::{run_diagnostic, DiagnosticReport};
pub use error::PriceError;
pub use form::{FormEvent, InputForm};
pub use model::{Classifier, FeatureTransform, Model, ProbabilityEstimator, Scaler};
pub use prediction::{render_prediction, run_prediction, Prediction, PriceTier, Probabilities};
pub use schema::{FeatureName, FeatureRecord, FEATURE_COUNT};
pub use session::{Session, SessionState};

/// Predict the price tier of one phone with loaded artifacts
///
/// Scales the record with the bundled scaler (if any), classifies it, maps the
/// class id to a tier, and attaches probabilities when the model supports them.
///
/// # Arguments
///
/// * `record` - Twenty features in training order
/// * `artifacts` - Validated model and optional scaler
///
/// # Returns
///
/// `Prediction` with the class id, tier, optional probabilities and the record
/// actually passed to the model
///
/// # Errors
///
/// - `PriceError::Transform` if scaling fails
/// - `PriceError::Prediction` if the classifier fails or returns a probability
///   vector that does not cover the four tiers
/// - `PriceError::UnknownTier` if the class id is not 0-3
///
/// # Example
///
/// ```no_run
/// use phone_price::{load_bundle, predict_price, InputForm};
///
/// let artifacts = load_bundle("mobile_price_classifier.json")?;
/// let record = InputForm::new().to_record()?;
/// let prediction = predict_price(&record, &artifacts)?;
/// println!("{}", prediction.tier);
/// # Ok::<(), phone_price::PriceError>(())
/// ```
pub fn predict_price(
    record: &FeatureRecord,
    artifacts: &LoadedArtifacts,
) -> Result<Prediction, PriceError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Predicting with {} from {}",
        artifacts.describe(),
        artifacts.source.display()
    );
    let prediction = run_prediction(record, artifacts.classifier(), artifacts.transform())?;

    log::debug!(
        "Prediction finished in {:.3} ms: class {} ({})",
        start_time.elapsed().as_secs_f64() * 1000.0,
        prediction.class_id,
        prediction.tier
    );
    Ok(prediction)
}
