//! Model capabilities and deserializable model kinds
//!
//! The prediction pipeline only talks to the traits defined here:
//! - [`Classifier`]: class id for one record
//! - [`ProbabilityEstimator`]: optional per-class probabilities
//! - [`FeatureTransform`]: pre-fit rescaling applied before prediction
//!
//! [`Model`] and [`Scaler`] are the concrete kinds an artifact bundle can hold.

pub mod centroid;
pub mod forest;
pub mod linear;
pub mod scaler;

pub use centroid::NearestCentroid;
pub use forest::{Leaf, RandomForest, Split, TreeNode};
pub use linear::LogisticRegression;
pub use scaler::{MinMaxScaler, Scaler, StandardScaler};

use crate::error::PriceError;
use crate::schema::{FeatureRecord, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Classification capability
pub trait Classifier {
    /// Predict the class id of one record
    fn predict(&self, record: &FeatureRecord) -> Result<usize, PriceError>;

    /// Probability capability, if this model has one
    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        None
    }
}

/// Probability-estimation capability
pub trait ProbabilityEstimator {
    /// Per-class probabilities for one record, indexed by class id
    fn predict_proba(&self, record: &FeatureRecord) -> Result<Vec<f64>, PriceError>;
}

/// Pre-fit feature transformation (scaler)
pub trait FeatureTransform {
    /// Rescale one record, preserving feature order and count
    fn transform(&self, record: &FeatureRecord) -> Result<FeatureRecord, PriceError>;
}

/// A trained classifier loaded from an artifact bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    /// Multinomial (or binary) logistic regression
    LogisticRegression(LogisticRegression),
    /// Averaged ensemble of decision trees
    RandomForest(RandomForest),
    /// Nearest class centroid (no probability output)
    NearestCentroid(NearestCentroid),
}

impl Model {
    /// Short kind name, as written in the artifact
    pub fn kind(&self) -> &'static str {
        match self {
            Model::LogisticRegression(_) => "logistic_regression",
            Model::RandomForest(_) => "random_forest",
            Model::NearestCentroid(_) => "nearest_centroid",
        }
    }

    /// Number of classes the model can emit
    pub fn n_classes(&self) -> usize {
        match self {
            Model::LogisticRegression(m) => m.n_classes(),
            Model::RandomForest(m) => m.n_classes(),
            Model::NearestCentroid(m) => m.n_classes(),
        }
    }

    /// Check that the model can actually be evaluated on a record
    pub fn validate(&self) -> Result<(), PriceError> {
        match self {
            Model::LogisticRegression(m) => m.validate(),
            Model::RandomForest(m) => m.validate(),
            Model::NearestCentroid(m) => m.validate(),
        }
    }
}

impl Classifier for Model {
    fn predict(&self, record: &FeatureRecord) -> Result<usize, PriceError> {
        match self {
            Model::LogisticRegression(m) => m.predict(record),
            Model::RandomForest(m) => m.predict(record),
            Model::NearestCentroid(m) => m.predict(record),
        }
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        match self {
            Model::LogisticRegression(m) => m.probability_estimator(),
            Model::RandomForest(m) => m.probability_estimator(),
            Model::NearestCentroid(m) => m.probability_estimator(),
        }
    }
}

/// Index of the largest value, first one on ties
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Check one parameter row: twenty finite values
pub(crate) fn check_row(what: &str, row: &[f64]) -> Result<(), PriceError> {
    if row.len() != FEATURE_COUNT {
        return Err(PriceError::InvalidArtifact(format!(
            "{} has {} values, expected {}",
            what,
            row.len(),
            FEATURE_COUNT
        )));
    }
    if row.iter().any(|v| !v.is_finite()) {
        return Err(PriceError::InvalidArtifact(format!(
            "{} contains non-finite values",
            what
        )));
    }
    Ok(())
}
