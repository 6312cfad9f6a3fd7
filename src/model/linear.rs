//! Logistic regression classifier
//!
//! Pre-trained weights only. A single coefficient row is the binary form
//! (class 1 when the decision function is positive); `k > 1` rows are the
//! multinomial form with one row per class and softmax probabilities.

use super::{argmax, check_row, Classifier, ProbabilityEstimator};
use crate::error::PriceError;
use crate::schema::FeatureRecord;
use serde::{Deserialize, Serialize};

/// Logistic regression weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// One row of 20 weights per class (or a single row for binary models)
    pub coefficients: Vec<Vec<f64>>,
    /// One intercept per coefficient row
    pub intercepts: Vec<f64>,
}

impl LogisticRegression {
    /// Number of classes the model can emit
    pub fn n_classes(&self) -> usize {
        match self.coefficients.len() {
            1 => 2,
            n => n,
        }
    }

    /// Check weight shapes
    pub fn validate(&self) -> Result<(), PriceError> {
        if self.coefficients.is_empty() {
            return Err(PriceError::InvalidArtifact(
                "logistic_regression has no coefficient rows".to_string(),
            ));
        }
        if self.intercepts.len() != self.coefficients.len() {
            return Err(PriceError::InvalidArtifact(format!(
                "logistic_regression has {} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        for (i, row) in self.coefficients.iter().enumerate() {
            check_row(&format!("logistic_regression coefficient row {}", i), row)?;
        }
        if self.intercepts.iter().any(|v| !v.is_finite()) {
            return Err(PriceError::InvalidArtifact(
                "logistic_regression intercepts contain non-finite values".to_string(),
            ));
        }
        Ok(())
    }

    /// Raw decision function, one score per coefficient row
    pub fn decision_function(&self, record: &FeatureRecord) -> Vec<f64> {
        let x = record.values();
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| b + row.iter().zip(x.iter()).map(|(w, v)| w * v).sum::<f64>())
            .collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

impl Classifier for LogisticRegression {
    fn predict(&self, record: &FeatureRecord) -> Result<usize, PriceError> {
        let scores = self.decision_function(record);
        match scores.as_slice() {
            [] => Err(PriceError::Prediction(
                "logistic_regression has no coefficient rows".to_string(),
            )),
            [z] => Ok(usize::from(*z > 0.0)),
            _ => argmax(&scores).ok_or_else(|| {
                PriceError::Prediction("empty decision function".to_string())
            }),
        }
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        Some(self)
    }
}

impl ProbabilityEstimator for LogisticRegression {
    fn predict_proba(&self, record: &FeatureRecord) -> Result<Vec<f64>, PriceError> {
        let scores = self.decision_function(record);
        let proba = match scores.as_slice() {
            [] => {
                return Err(PriceError::Prediction(
                    "logistic_regression has no coefficient rows".to_string(),
                ))
            }
            [z] => {
                let p = sigmoid(*z);
                vec![1.0 - p, p]
            }
            _ => softmax(&scores),
        };
        if proba.iter().any(|p| !p.is_finite()) {
            return Err(PriceError::Prediction(
                "probabilities are not finite".to_string(),
            ));
        }
        Ok(proba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FeatureName, FEATURE_COUNT};

    /// Four classes driven by RAM only
    fn ram_model() -> LogisticRegression {
        let mut coefficients = vec![vec![0.0; FEATURE_COUNT]; 4];
        let ram = FeatureName::Ram.index();
        coefficients[0][ram] = -3.0;
        coefficients[1][ram] = -1.0;
        coefficients[2][ram] = 1.0;
        coefficients[3][ram] = 3.0;
        LogisticRegression {
            coefficients,
            intercepts: vec![0.0; 4],
        }
    }

    fn record_with_ram(ram: f64) -> FeatureRecord {
        let mut values = [0.0; FEATURE_COUNT];
        values[FeatureName::Ram.index()] = ram;
        FeatureRecord::from_values(values).unwrap()
    }

    #[test]
    fn test_multinomial_predict() {
        let model = ram_model();
        assert!(model.validate().is_ok());
        assert_eq!(model.n_classes(), 4);
        assert_eq!(model.predict(&record_with_ram(-2.0)).unwrap(), 0);
        assert_eq!(model.predict(&record_with_ram(2.0)).unwrap(), 3);
    }

    #[test]
    fn test_softmax_probabilities() {
        let model = ram_model();
        let proba = model.predict_proba(&record_with_ram(0.0)).unwrap();
        assert_eq!(proba.len(), 4);
        for p in &proba {
            assert!((p - 0.25).abs() < 1e-12);
        }

        let proba = model.predict_proba(&record_with_ram(1.5)).unwrap();
        let sum: f64 = proba.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(proba[3] > proba[2] && proba[2] > proba[1]);
    }

    #[test]
    fn test_softmax_large_scores_stay_finite() {
        let model = ram_model();
        let proba = model.predict_proba(&record_with_ram(4096.0)).unwrap();
        assert!((proba[3] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_binary_form() {
        let mut row = vec![0.0; FEATURE_COUNT];
        row[FeatureName::Ram.index()] = 1.0;
        let model = LogisticRegression {
            coefficients: vec![row],
            intercepts: vec![-1000.0],
        };
        assert_eq!(model.n_classes(), 2);
        assert_eq!(model.predict(&record_with_ram(500.0)).unwrap(), 0);
        assert_eq!(model.predict(&record_with_ram(2000.0)).unwrap(), 1);

        let proba = model.predict_proba(&record_with_ram(1000.0)).unwrap();
        assert_eq!(proba, vec![0.5, 0.5]);
    }

    #[test]
    fn test_validate_shapes() {
        let mut model = ram_model();
        model.intercepts.pop();
        assert!(model.validate().is_err());

        let mut model = ram_model();
        model.coefficients[2].truncate(19);
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("row 2"));

        let empty = LogisticRegression {
            coefficients: vec![],
            intercepts: vec![],
        };
        assert!(empty.validate().is_err());
    }
}
