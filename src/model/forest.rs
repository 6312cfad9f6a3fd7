//! Random forest classifier
//!
//! Trees are stored as nested split/leaf nodes. A split sends a record left
//! when `value <= threshold`. Each leaf holds the class distribution of the
//! training samples that reached it; the forest probability is the mean of
//! the normalized leaf distributions and the prediction is its argmax.

use super::{argmax, Classifier, ProbabilityEstimator};
use crate::error::PriceError;
use crate::schema::{FeatureRecord, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Internal split node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f64,
    /// Subtree for `value <= threshold`
    pub left: Box<TreeNode>,
    /// Subtree for `value > threshold`
    pub right: Box<TreeNode>,
}

/// Leaf node with per-class sample counts (or weights)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    /// Class distribution, indexed by class id
    pub distribution: Vec<f64>,
}

/// A node in a decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal decision node
    Split(Split),
    /// Terminal node
    Leaf(Leaf),
}

impl TreeNode {
    /// Depth of the tree rooted at this node (leaves have depth 0)
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Split(split) => 1 + split.left.depth().max(split.right.depth()),
        }
    }

    /// Walk the tree down to the leaf for this record
    fn leaf_for(&self, x: &[f64; FEATURE_COUNT]) -> Result<&Leaf, PriceError> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return Ok(leaf),
                TreeNode::Split(split) => {
                    let value = x.get(split.feature_idx).ok_or_else(|| {
                        PriceError::Prediction(format!(
                            "split on feature {} (only {} features)",
                            split.feature_idx, FEATURE_COUNT
                        ))
                    })?;
                    node = if *value <= split.threshold {
                        &split.left
                    } else {
                        &split.right
                    };
                }
            }
        }
    }

    fn validate(&self, n_classes: usize, tree: usize) -> Result<(), PriceError> {
        match self {
            TreeNode::Split(split) => {
                if split.feature_idx >= FEATURE_COUNT {
                    return Err(PriceError::InvalidArtifact(format!(
                        "tree {} splits on feature {} (only {} features)",
                        tree, split.feature_idx, FEATURE_COUNT
                    )));
                }
                if split.threshold.is_nan() {
                    return Err(PriceError::InvalidArtifact(format!(
                        "tree {} has a NaN threshold",
                        tree
                    )));
                }
                split.left.validate(n_classes, tree)?;
                split.right.validate(n_classes, tree)
            }
            TreeNode::Leaf(leaf) => {
                if leaf.distribution.len() != n_classes {
                    return Err(PriceError::InvalidArtifact(format!(
                        "tree {} has a leaf with {} classes, expected {}",
                        tree,
                        leaf.distribution.len(),
                        n_classes
                    )));
                }
                let valid = leaf.distribution.iter().all(|v| v.is_finite() && *v >= 0.0);
                let total: f64 = leaf.distribution.iter().sum();
                if !valid || total <= 0.0 {
                    return Err(PriceError::InvalidArtifact(format!(
                        "tree {} has a leaf with an invalid distribution",
                        tree
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Ensemble of decision trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    /// Number of classes every leaf distribution covers
    pub n_classes: usize,
    /// Tree roots
    pub trees: Vec<TreeNode>,
}

impl RandomForest {
    /// Number of classes the model can emit
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Check every tree for well-formed splits and leaves
    pub fn validate(&self) -> Result<(), PriceError> {
        if self.n_classes == 0 {
            return Err(PriceError::InvalidArtifact(
                "random_forest has zero classes".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(PriceError::InvalidArtifact(
                "random_forest has no trees".to_string(),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_classes, i)?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn predict(&self, record: &FeatureRecord) -> Result<usize, PriceError> {
        let proba = self.predict_proba(record)?;
        argmax(&proba).ok_or_else(|| PriceError::Prediction("random_forest has no classes".to_string()))
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        Some(self)
    }
}

impl ProbabilityEstimator for RandomForest {
    fn predict_proba(&self, record: &FeatureRecord) -> Result<Vec<f64>, PriceError> {
        if self.trees.is_empty() {
            return Err(PriceError::Prediction("random_forest has no trees".to_string()));
        }

        let x = record.values();
        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf_for(x)?;
            if leaf.distribution.len() != self.n_classes {
                return Err(PriceError::Prediction(format!(
                    "leaf has {} classes, expected {}",
                    leaf.distribution.len(),
                    self.n_classes
                )));
            }
            let total: f64 = leaf.distribution.iter().sum();
            if !total.is_finite() || total <= 0.0 {
                return Err(PriceError::Prediction(format!(
                    "leaf distribution sums to {}",
                    total
                )));
            }
            for (p, v) in proba.iter_mut().zip(&leaf.distribution) {
                *p += v / total;
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(proba.into_iter().map(|p| p / n_trees).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FeatureName;

    fn leaf(distribution: &[f64]) -> Box<TreeNode> {
        Box::new(TreeNode::Leaf(Leaf {
            distribution: distribution.to_vec(),
        }))
    }

    /// RAM stump: <= 1000 leans cheap, above leans expensive
    fn ram_stump() -> TreeNode {
        TreeNode::Split(Split {
            feature_idx: FeatureName::Ram.index(),
            threshold: 1000.0,
            left: leaf(&[8.0, 2.0, 0.0, 0.0]),
            right: leaf(&[0.0, 0.0, 1.0, 3.0]),
        })
    }

    /// Battery stump: <= 1200 is class 1, above is class 2
    fn battery_stump() -> TreeNode {
        TreeNode::Split(Split {
            feature_idx: FeatureName::BatteryPower.index(),
            threshold: 1200.0,
            left: leaf(&[0.0, 1.0, 0.0, 0.0]),
            right: leaf(&[0.0, 0.0, 1.0, 0.0]),
        })
    }

    fn record(ram: f64, battery: f64) -> FeatureRecord {
        let mut values = [0.0; FEATURE_COUNT];
        values[FeatureName::Ram.index()] = ram;
        values[FeatureName::BatteryPower.index()] = battery;
        FeatureRecord::from_values(values).unwrap()
    }

    #[test]
    fn test_single_tree() {
        let forest = RandomForest {
            n_classes: 4,
            trees: vec![ram_stump()],
        };
        assert!(forest.validate().is_ok());
        assert_eq!(forest.predict(&record(512.0, 0.0)).unwrap(), 0);
        assert_eq!(forest.predict(&record(4096.0, 0.0)).unwrap(), 3);

        let proba = forest.predict_proba(&record(1000.0, 0.0)).unwrap();
        assert_eq!(proba, vec![0.8, 0.2, 0.0, 0.0]);
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = RandomForest {
            n_classes: 4,
            trees: vec![ram_stump(), battery_stump()],
        };
        let proba = forest.predict_proba(&record(512.0, 500.0)).unwrap();
        assert!((proba[0] - 0.4).abs() < 1e-12);
        assert!((proba[1] - 0.6).abs() < 1e-12);
        assert_eq!(forest.predict(&record(512.0, 500.0)).unwrap(), 1);
    }

    #[test]
    fn test_depth() {
        assert_eq!(ram_stump().depth(), 1);
        assert_eq!(leaf(&[1.0]).depth(), 0);
    }

    #[test]
    fn test_validate_rejects_bad_trees() {
        let bad_feature = RandomForest {
            n_classes: 4,
            trees: vec![TreeNode::Split(Split {
                feature_idx: 20,
                threshold: 0.0,
                left: leaf(&[1.0, 0.0, 0.0, 0.0]),
                right: leaf(&[1.0, 0.0, 0.0, 0.0]),
            })],
        };
        assert!(bad_feature.validate().is_err());

        let wrong_width = RandomForest {
            n_classes: 4,
            trees: vec![*leaf(&[1.0, 0.0])],
        };
        assert!(wrong_width.validate().is_err());

        let empty_leaf = RandomForest {
            n_classes: 2,
            trees: vec![*leaf(&[0.0, 0.0])],
        };
        assert!(empty_leaf.validate().is_err());

        let no_trees = RandomForest {
            n_classes: 4,
            trees: vec![],
        };
        assert!(no_trees.validate().is_err());
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "n_classes": 2,
            "trees": [
                {"split": {"feature_idx": 13, "threshold": 1000.0,
                           "left": {"leaf": {"distribution": [1.0, 0.0]}},
                           "right": {"leaf": {"distribution": [0.0, 1.0]}}}}
            ]
        }"#;
        let forest: RandomForest = serde_json::from_str(json).unwrap();
        assert!(forest.validate().is_ok());
        assert_eq!(forest.predict(&record(2048.0, 0.0)).unwrap(), 1);
    }

    #[test]
    fn test_unvalidated_split_out_of_range_is_an_error() {
        let forest = RandomForest {
            n_classes: 4,
            trees: vec![TreeNode::Split(Split {
                feature_idx: 25,
                threshold: 0.0,
                left: leaf(&[1.0, 0.0, 0.0, 0.0]),
                right: leaf(&[0.0, 1.0, 0.0, 0.0]),
            })],
        };
        let err = forest.predict(&record(256.0, 0.0)).unwrap_err();
        assert!(matches!(err, PriceError::Prediction(_)));
    }

    #[test]
    fn test_unvalidated_empty_leaf_is_an_error() {
        let forest = RandomForest {
            n_classes: 2,
            trees: vec![*leaf(&[0.0, 0.0])],
        };
        let err = forest.predict_proba(&record(256.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            PriceError::Prediction("leaf distribution sums to 0".to_string())
        );
    }
}
