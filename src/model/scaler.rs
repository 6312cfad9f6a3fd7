//! Pre-fit feature scalers
//!
//! Supports two scaler kinds:
//! - Standard: `z = (x - mean) / scale`
//! - Min-max: `x * scale + min`
//!
//! Parameters come from the training pipeline; nothing is fitted here.

use super::{check_row, FeatureTransform};
use crate::error::PriceError;
use crate::schema::{FeatureRecord, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Standardizes features by removing the mean and scaling to unit variance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each feature
    pub mean: Vec<f64>,
    /// Standard deviation of each feature (zero is treated as 1)
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Check parameter shapes
    pub fn validate(&self) -> Result<(), PriceError> {
        check_row("standard scaler mean", &self.mean)?;
        check_row("standard scaler scale", &self.scale)
    }
}

impl FeatureTransform for StandardScaler {
    fn transform(&self, record: &FeatureRecord) -> Result<FeatureRecord, PriceError> {
        let values = record.values();
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(PriceError::Transform(format!(
                "standard scaler fitted on {} features, record has {}",
                self.mean.len().min(self.scale.len()),
                FEATURE_COUNT
            )));
        }
        let scaled: Vec<f64> = values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect();
        FeatureRecord::from_slice(&scaled).map_err(|e| PriceError::Transform(e.to_string()))
    }
}

/// Scales each feature into a fixed range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Per-feature offset applied after scaling
    pub min: Vec<f64>,
    /// Per-feature multiplier
    pub scale: Vec<f64>,
}

impl MinMaxScaler {
    /// Check parameter shapes
    pub fn validate(&self) -> Result<(), PriceError> {
        check_row("min_max scaler min", &self.min)?;
        check_row("min_max scaler scale", &self.scale)
    }
}

impl FeatureTransform for MinMaxScaler {
    fn transform(&self, record: &FeatureRecord) -> Result<FeatureRecord, PriceError> {
        let values = record.values();
        if self.min.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(PriceError::Transform(format!(
                "min_max scaler fitted on {} features, record has {}",
                self.min.len().min(self.scale.len()),
                FEATURE_COUNT
            )));
        }
        let scaled: Vec<f64> = values
            .iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(x, (min, scale))| x * scale + min)
            .collect();
        FeatureRecord::from_slice(&scaled).map_err(|e| PriceError::Transform(e.to_string()))
    }
}

/// A scaler loaded from an artifact bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// Zero mean, unit variance
    Standard(StandardScaler),
    /// Fixed output range
    MinMax(MinMaxScaler),
}

impl Scaler {
    /// Short kind name, as written in the artifact
    pub fn kind(&self) -> &'static str {
        match self {
            Scaler::Standard(_) => "standard",
            Scaler::MinMax(_) => "min_max",
        }
    }

    /// Check parameter shapes
    pub fn validate(&self) -> Result<(), PriceError> {
        match self {
            Scaler::Standard(s) => s.validate(),
            Scaler::MinMax(s) => s.validate(),
        }
    }
}

impl FeatureTransform for Scaler {
    fn transform(&self, record: &FeatureRecord) -> Result<FeatureRecord, PriceError> {
        match self {
            Scaler::Standard(s) => s.transform(record),
            Scaler::MinMax(s) => s.transform(record),
        }
    }
}
