//! Prediction pipeline
//!
//! 1. Optional rescaling with the pre-fit scaler
//! 2. Class prediction
//! 3. Class id → price tier lookup
//! 4. Optional probability estimation on the same (scaled) record
//!
//! Every failure is returned as a [`PriceError`]; nothing here panics on bad
//! model output.

use super::result::{Prediction, Probabilities};
use super::tier::{PriceTier, TIER_COUNT};
use crate::error::PriceError;
use crate::model::{Classifier, FeatureTransform};
use crate::schema::FeatureRecord;

/// Run one record through the scaler (if any) and the classifier
///
/// # Arguments
///
/// * `record` - Record collected from the form (or the diagnostic harness)
/// * `classifier` - Loaded model
/// * `transform` - Loaded scaler, `None` to pass the record through unchanged
///
/// # Errors
///
/// Returns `PriceError::Transform` or `PriceError::Prediction` when the scaler
/// or the model fails, and `PriceError::UnknownTier` when the class id has no
/// price tier.
pub fn run_prediction(
    record: &FeatureRecord,
    classifier: &dyn Classifier,
    transform: Option<&dyn FeatureTransform>,
) -> Result<Prediction, PriceError> {
    let model_input = match transform {
        Some(scaler) => {
            log::debug!("Scaling record before prediction");
            scaler.transform(record)?
        }
        None => *record,
    };

    let class_id = classifier.predict(&model_input)?;
    log::debug!("Classifier returned class id {}", class_id);
    let tier = PriceTier::from_class_id(class_id)?;

    let probabilities = match classifier.probability_estimator() {
        Some(estimator) => {
            let proba = estimator.predict_proba(&model_input)?;
            let proba: [f64; TIER_COUNT] = proba.as_slice().try_into().map_err(|_| {
                PriceError::Prediction(format!(
                    "Expected {} class probabilities, got {}",
                    TIER_COUNT,
                    proba.len()
                ))
            })?;
            Some(Probabilities(proba))
        }
        None => {
            log::debug!("Model has no probability output");
            None
        }
    };

    Ok(Prediction {
        class_id,
        tier,
        probabilities,
        model_input,
    })
}
