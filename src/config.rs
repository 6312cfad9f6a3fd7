//! Configuration parameters for the predictor front-end

use std::path::PathBuf;

/// Default artifact bundle location, relative to the working directory
pub const DEFAULT_ARTIFACT_PATH: &str = "mobile_price_classifier.json";

/// Application configuration parameters
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the artifact bundle (default: `mobile_price_classifier.json`)
    pub artifact_path: PathBuf,

    /// Color tier labels in terminal output (default: true)
    pub color: bool,

    /// Print the record sent to the model after scaling (default: false)
    ///
    /// Useful when checking that the scaler and the model agree on feature order.
    pub show_model_input: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            color: true,
            show_model_input: false,
        }
    }
}
