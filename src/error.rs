//! Error types for the price prediction engine

use thiserror::Error;

/// Errors that can occur while loading artifacts or predicting a price tier
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    /// Artifact file could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// Artifact file is not a valid bundle encoding
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// Artifact decoded but does not describe a usable model or scaler
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Invalid input record or form value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scaler failed to transform a record
    #[error("Transform error: {0}")]
    Transform(String),

    /// Classifier failed to produce a class or probabilities
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Classifier returned a class id with no price tier
    #[error("Unknown price tier for class id {0}")]
    UnknownTier(usize),

    /// No model is loaded for this session
    #[error("Prediction disabled: {0}")]
    PredictionDisabled(String),
}

impl From<std::io::Error> for PriceError {
    fn from(err: std::io::Error) -> Self {
        PriceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PriceError {
    fn from(err: serde_json::Error) -> Self {
        PriceError::Deserialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PriceError::UnknownTier(7).to_string(),
            "Unknown price tier for class id 7"
        );
        assert_eq!(
            PriceError::InvalidInput("ram".to_string()).to_string(),
            "Invalid input: ram"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PriceError = io.into();
        assert!(matches!(err, PriceError::Io(_)));
    }
}
