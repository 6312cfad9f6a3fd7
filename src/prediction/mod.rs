//! Price prediction
//!
//! Turns a feature record into a price tier:
//! - Tier table (label, color, emoji)
//! - Pipeline (scale, predict, look up, estimate probabilities)
//! - Result types and text rendering

pub mod pipeline;
pub mod result;
pub mod tier;

pub use pipeline::run_prediction;
pub use result::{render_prediction, Prediction, Probabilities};
pub use tier::{PriceTier, TierColor, TIER_COUNT};
