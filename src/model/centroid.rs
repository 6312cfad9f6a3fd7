//! Nearest-centroid classifier
//!
//! Predicts the class whose centroid is closest in Euclidean distance. This
//! kind has no probability output.

use super::{check_row, Classifier};
use crate::error::PriceError;
use crate::schema::FeatureRecord;
use serde::{Deserialize, Serialize};

/// One centroid per class, in class-id order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestCentroid {
    /// Class centroids (20 values each)
    pub centroids: Vec<Vec<f64>>,
}

impl NearestCentroid {
    /// Number of classes the model can emit
    pub fn n_classes(&self) -> usize {
        self.centroids.len()
    }

    /// Check centroid shapes
    pub fn validate(&self) -> Result<(), PriceError> {
        if self.centroids.is_empty() {
            return Err(PriceError::InvalidArtifact(
                "nearest_centroid has no centroids".to_string(),
            ));
        }
        for (i, centroid) in self.centroids.iter().enumerate() {
            check_row(&format!("nearest_centroid centroid {}", i), centroid)?;
        }
        Ok(())
    }
}

impl Classifier for NearestCentroid {
    fn predict(&self, record: &FeatureRecord) -> Result<usize, PriceError> {
        let x = record.values();
        let mut best: Option<(usize, f64)> = None;
        for (class, centroid) in self.centroids.iter().enumerate() {
            let dist: f64 = centroid
                .iter()
                .zip(x.iter())
                .map(|(c, v)| (c - v) * (c - v))
                .sum();
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((class, dist));
            }
        }
        best.map(|(class, _)| class)
            .ok_or_else(|| PriceError::Prediction("nearest_centroid has no centroids".to_string()))
    }
}
