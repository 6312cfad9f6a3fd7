//! Artifact loading and validation

use super::bundle::ArtifactBundle;
use crate::error::PriceError;
use crate::model::{Classifier, FeatureTransform, Model, Scaler};
use crate::prediction::TIER_COUNT;
use std::fs;
use std::path::{Path, PathBuf};

/// A validated model and its optional scaler
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedArtifacts {
    /// Trained classifier
    pub model: Model,
    /// Pre-fit scaler, if present in the bundle
    pub scaler: Option<Scaler>,
    /// File the artifacts were read from
    pub source: PathBuf,
}

impl LoadedArtifacts {
    /// Model as a classifier capability
    pub fn classifier(&self) -> &dyn Classifier {
        &self.model
    }

    /// Scaler as a transform capability
    pub fn transform(&self) -> Option<&dyn FeatureTransform> {
        self.scaler.as_ref().map(|s| s as &dyn FeatureTransform)
    }

    /// One-line description for status output
    pub fn describe(&self) -> String {
        format!(
            "{} model ({} classes), {}",
            self.model.kind(),
            self.model.n_classes(),
            match &self.scaler {
                Some(scaler) => format!("{} scaler", scaler.kind()),
                None => "no scaler".to_string(),
            }
        )
    }
}

/// Load and validate an artifact bundle
///
/// # Arguments
///
/// * `path` - Path to the JSON bundle
///
/// # Errors
///
/// - `PriceError::Io` if the file cannot be read
/// - `PriceError::Deserialize` if it is not valid bundle JSON
/// - `PriceError::InvalidArtifact` if it holds no usable model, a model or
///   scaler whose parameters do not match the twenty-feature schema, or a
///   probability-capable model that does not cover the four price tiers
pub fn load_bundle<P: AsRef<Path>>(path: P) -> Result<LoadedArtifacts, PriceError> {
    let path = path.as_ref();
    log::debug!("Loading artifact bundle from: {}", path.display());

    let text = fs::read_to_string(path)
        .map_err(|e| PriceError::Io(format!("{}: {}", path.display(), e)))?;
    let (model, scaler) = ArtifactBundle::from_json(&text)?.into_parts();

    model.validate()?;
    if model.probability_estimator().is_some() && model.n_classes() != TIER_COUNT {
        return Err(PriceError::InvalidArtifact(format!(
            "{} model has {} classes, expected {} price tiers",
            model.kind(),
            model.n_classes(),
            TIER_COUNT
        )));
    }
    match &scaler {
        Some(scaler) => scaler.validate()?,
        None => log::warn!("No scaler in artifact bundle, records reach the model unscaled"),
    }

    let loaded = LoadedArtifacts {
        model,
        scaler,
        source: path.to_path_buf(),
    };
    log::info!("Loaded {} from {}", loaded.describe(), path.display());
    Ok(loaded)
}

/// Load artifacts, reporting failure instead of returning it
///
/// Returns `None` on any failure (missing file, corrupt bundle, invalid
/// model). The failure is logged at error level.
pub fn load_artifacts<P: AsRef<Path>>(path: P) -> Option<LoadedArtifacts> {
    match load_bundle(path) {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            log::error!("Artifact load failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FEATURE_COUNT;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_bare_model() {
        let file = write_temp(&format!(
            r#"{{"kind": "nearest_centroid", "centroids": [{:?}, {:?}]}}"#,
            vec![0.0; FEATURE_COUNT],
            vec![1.0; FEATURE_COUNT]
        ));
        let loaded = load_bundle(file.path()).unwrap();
        assert_eq!(loaded.model.n_classes(), 2);
        assert!(loaded.transform().is_none());
        assert_eq!(loaded.source, file.path());
        assert_eq!(loaded.describe(), "nearest_centroid model (2 classes), no scaler");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(load_bundle(&path), Err(PriceError::Io(_))));
        assert!(load_artifacts(&path).is_none());
    }

    #[test]
    fn test_corrupt_file() {
        let file = write_temp("\u{0}\u{1}not json");
        assert!(matches!(load_bundle(file.path()), Err(PriceError::Deserialize(_))));
        assert!(load_artifacts(file.path()).is_none());
    }

    #[test]
    fn test_invalid_model_shape() {
        let file = write_temp(r#"{"kind": "nearest_centroid", "centroids": [[1.0, 2.0]]}"#);
        assert!(matches!(
            load_bundle(file.path()),
            Err(PriceError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_invalid_scaler_shape() {
        let file = write_temp(&format!(
            r#"{{"model": {{"kind": "nearest_centroid", "centroids": [{:?}]}},
                "scaler": {{"kind": "standard", "mean": [0.0], "scale": [1.0]}}}}"#,
            vec![0.0; FEATURE_COUNT]
        ));
        let err = load_bundle(file.path()).unwrap_err();
        assert!(err.to_string().contains("standard scaler mean"));
    }

    #[test]
    fn test_probability_model_must_cover_four_tiers() {
        let file = write_temp(&format!(
            r#"{{"kind": "logistic_regression", "coefficients": [{:?}], "intercepts": [0.0]}}"#,
            vec![0.5; FEATURE_COUNT]
        ));
        let err = load_bundle(file.path()).unwrap_err();
        assert_eq!(
            err,
            PriceError::InvalidArtifact(
                "logistic_regression model has 2 classes, expected 4 price tiers".to_string()
            )
        );
        assert!(load_artifacts(file.path()).is_none());
    }
}
