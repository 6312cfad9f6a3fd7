//! Artifact bundle shapes
//!
//! A bundle file holds either
//! - an object with a `model` entry and an optional `scaler` entry, or
//! - a bare model object (older artifacts written without a scaler).
//!
//! The shape is resolved once, right after decoding, so nothing downstream
//! needs to inspect it again.

use crate::error::PriceError;
use crate::model::{Model, Scaler};
use serde::Serialize;
use serde_json::Value;

/// Decoded artifact bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArtifactBundle {
    /// `{ "model": ..., "scaler": ... }`
    Bundle {
        /// Trained classifier
        model: Model,
        /// Pre-fit scaler, if the model was trained on scaled features
        #[serde(skip_serializing_if = "Option::is_none")]
        scaler: Option<Scaler>,
    },
    /// A model object on its own
    Bare(Model),
}

impl ArtifactBundle {
    /// Decode a bundle from JSON text
    pub fn from_json(text: &str) -> Result<Self, PriceError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Resolve the bundle shape of an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, PriceError> {
        match value {
            Value::Object(mut map) if map.contains_key("model") => {
                let model = match map.remove("model") {
                    Some(Value::Null) | None => {
                        return Err(PriceError::InvalidArtifact(
                            "bundle has an empty model entry".to_string(),
                        ))
                    }
                    Some(model) => serde_json::from_value(model)?,
                };
                let scaler = match map.remove("scaler") {
                    Some(Value::Null) | None => None,
                    Some(scaler) => Some(serde_json::from_value(scaler)?),
                };
                Ok(ArtifactBundle::Bundle { model, scaler })
            }
            Value::Object(map) if map.contains_key("kind") => {
                Ok(ArtifactBundle::Bare(serde_json::from_value(Value::Object(map))?))
            }
            _ => Err(PriceError::InvalidArtifact(
                "file does not contain a model".to_string(),
            )),
        }
    }

    /// Encode the bundle as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, PriceError> {
        serde_json::to_string_pretty(self).map_err(|e| PriceError::InvalidArtifact(e.to_string()))
    }

    /// Split into (model, optional scaler)
    pub fn into_parts(self) -> (Model, Option<Scaler>) {
        match self {
            ArtifactBundle::Bundle { model, scaler } => (model, scaler),
            ArtifactBundle::Bare(model) => (model, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NearestCentroid;
    use crate::schema::FEATURE_COUNT;

    fn centroid_json() -> String {
        format!(
            r#"{{"kind": "nearest_centroid", "centroids": [{:?}]}}"#,
            vec![1.0; FEATURE_COUNT]
        )
    }

    fn scaler_json() -> String {
        format!(
            r#"{{"kind": "standard", "mean": {:?}, "scale": {:?}}}"#,
            vec![0.0; FEATURE_COUNT],
            vec![1.0; FEATURE_COUNT]
        )
    }

    #[test]
    fn test_bare_model() {
        let bundle = ArtifactBundle::from_json(&centroid_json()).unwrap();
        let (model, scaler) = bundle.into_parts();
        assert_eq!(model.kind(), "nearest_centroid");
        assert!(scaler.is_none());
    }

    #[test]
    fn test_bundle_with_scaler() {
        let json = format!(r#"{{"model": {}, "scaler": {}}}"#, centroid_json(), scaler_json());
        let (model, scaler) = ArtifactBundle::from_json(&json).unwrap().into_parts();
        assert_eq!(model.kind(), "nearest_centroid");
        assert_eq!(scaler.map(|s| s.kind()), Some("standard"));
    }

    #[test]
    fn test_bundle_with_null_scaler() {
        let json = format!(r#"{{"model": {}, "scaler": null}}"#, centroid_json());
        let (_, scaler) = ArtifactBundle::from_json(&json).unwrap().into_parts();
        assert!(scaler.is_none());
    }

    #[test]
    fn test_not_a_model() {
        for json in [r#"{"scaler": null}"#, "[1, 2, 3]", r#""model""#, r#"{"model": null}"#] {
            let err = ArtifactBundle::from_json(json).unwrap_err();
            assert!(
                matches!(err, PriceError::InvalidArtifact(_)),
                "{} gave {:?}",
                json,
                err
            );
        }
    }

    #[test]
    fn test_corrupt_json() {
        let err = ArtifactBundle::from_json("{\"model\": ").unwrap_err();
        assert!(matches!(err, PriceError::Deserialize(_)));
    }

    #[test]
    fn test_to_json_reads_back() {
        let bundle = ArtifactBundle::Bundle {
            model: Model::NearestCentroid(NearestCentroid {
                centroids: vec![vec![2.0; FEATURE_COUNT]],
            }),
            scaler: None,
        };
        let json = bundle.to_json().unwrap();
        assert!(!json.contains("scaler"));
        assert_eq!(ArtifactBundle::from_json(&json).unwrap(), bundle);
    }
}
