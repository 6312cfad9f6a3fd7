//! Prediction result types

use super::tier::{PriceTier, TIER_COUNT};
use crate::schema::FeatureRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Class probabilities, aligned with class ids 0-3
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities(pub [f64; TIER_COUNT]);

impl Probabilities {
    /// Probability of one tier
    pub fn of(&self, tier: PriceTier) -> f64 {
        self.0[tier.class_id()]
    }

    /// Percentages with two decimals, keyed by class id
    pub fn percentages(&self) -> Vec<(usize, String)> {
        self.0
            .iter()
            .enumerate()
            .map(|(class_id, p)| (class_id, format!("{:.2}%", p * 100.0)))
            .collect()
    }
}

impl fmt::Display for Probabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .percentages()
            .into_iter()
            .map(|(class_id, pct)| format!("{}: {}", class_id, pct))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Outcome of one successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Raw class id returned by the classifier
    pub class_id: usize,

    /// Tier bound to the class id
    pub tier: PriceTier,

    /// Class probabilities, if the model can estimate them
    pub probabilities: Option<Probabilities>,

    /// Record actually passed to the model (after scaling)
    pub model_input: FeatureRecord,
}

/// Render a prediction as user-facing text
///
/// The first line is `Prediction: <emoji> <label>`; a second
/// `Probabilities: {...}` line follows only when probabilities exist.
pub fn render_prediction(prediction: &Prediction) -> String {
    let mut out = format!(
        "Prediction: {} {}",
        prediction.tier.emoji(),
        prediction.tier.label()
    );
    if let Some(probabilities) = &prediction.probabilities {
        out.push_str(&format!("\nProbabilities: {}", probabilities));
    }
    out
}
