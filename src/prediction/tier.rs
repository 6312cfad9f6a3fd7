//! Price tier table

use crate::error::PriceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of price tiers a classifier must distinguish
pub const TIER_COUNT: usize = 4;

/// Display color bound to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierColor {
    /// Low cost
    Green,
    /// Medium cost
    Blue,
    /// High cost
    Orange,
    /// Very high cost
    Red,
}

impl TierColor {
    /// Lowercase color name
    pub fn name(&self) -> &'static str {
        match self {
            TierColor::Green => "green",
            TierColor::Blue => "blue",
            TierColor::Orange => "orange",
            TierColor::Red => "red",
        }
    }

    /// RGB components, for terminals that support true color
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            TierColor::Green => (0, 170, 0),
            TierColor::Blue => (30, 110, 255),
            TierColor::Orange => (255, 165, 0),
            TierColor::Red => (220, 30, 30),
        }
    }
}

/// Price tier of a phone (class ids 0-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    /// Class 0
    LowCost,
    /// Class 1
    MediumCost,
    /// Class 2
    HighCost,
    /// Class 3
    VeryHighCost,
}

impl PriceTier {
    /// All tiers, indexed by class id
    pub const ALL: [PriceTier; TIER_COUNT] = [
        PriceTier::LowCost,
        PriceTier::MediumCost,
        PriceTier::HighCost,
        PriceTier::VeryHighCost,
    ];

    /// Look up the tier for a classifier output
    ///
    /// Any id outside 0-3 is an error rather than a default tier.
    pub fn from_class_id(class_id: usize) -> Result<Self, PriceError> {
        PriceTier::ALL
            .get(class_id)
            .copied()
            .ok_or(PriceError::UnknownTier(class_id))
    }

    /// Class id of this tier
    pub fn class_id(&self) -> usize {
        *self as usize
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::LowCost => "Low Cost",
            PriceTier::MediumCost => "Medium Cost",
            PriceTier::HighCost => "High Cost",
            PriceTier::VeryHighCost => "Very High Cost",
        }
    }

    /// Display color
    pub fn color(&self) -> TierColor {
        match self {
            PriceTier::LowCost => TierColor::Green,
            PriceTier::MediumCost => TierColor::Blue,
            PriceTier::HighCost => TierColor::Orange,
            PriceTier::VeryHighCost => TierColor::Red,
        }
    }

    /// Emoji marker, one money bag per tier level
    pub fn emoji(&self) -> &'static str {
        match self {
            PriceTier::LowCost => "💰",
            PriceTier::MediumCost => "💰💰",
            PriceTier::HighCost => "💰💰💰",
            PriceTier::VeryHighCost => "💰💰💰💰",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
