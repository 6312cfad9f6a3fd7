//! Feature schema
//!
//! The twenty phone-specification features, in the exact order the classifier
//! was trained on. Every vector handed to a scaler or a model follows this
//! order; reordering silently corrupts predictions.

pub mod record;

pub use record::FeatureRecord;

use crate::error::PriceError;
use std::fmt;
use std::str::FromStr;

/// Number of features in a record
pub const FEATURE_COUNT: usize = 20;

/// One phone-specification feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureName {
    /// Battery capacity (mAh)
    BatteryPower,
    /// Bluetooth support (0/1)
    Blue,
    /// CPU clock speed (GHz)
    ClockSpeed,
    /// Dual SIM support (0/1)
    DualSim,
    /// Front camera (megapixels)
    Fc,
    /// 4G support (0/1)
    FourG,
    /// Internal memory (GB)
    IntMemory,
    /// Thickness (cm)
    MDep,
    /// Weight (g)
    MobileWt,
    /// Number of CPU cores
    NCores,
    /// Primary camera (megapixels)
    Pc,
    /// Pixel resolution height
    PxHeight,
    /// Pixel resolution width
    PxWidth,
    /// RAM (MB)
    Ram,
    /// Screen height (cm)
    ScH,
    /// Screen width (cm)
    ScW,
    /// Talk time on one charge (hours)
    TalkTime,
    /// 3G support (0/1)
    ThreeG,
    /// Touchscreen (0/1)
    TouchScreen,
    /// Wi-Fi support (0/1)
    Wifi,
}

impl FeatureName {
    /// All features in training order
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::BatteryPower,
        FeatureName::Blue,
        FeatureName::ClockSpeed,
        FeatureName::DualSim,
        FeatureName::Fc,
        FeatureName::FourG,
        FeatureName::IntMemory,
        FeatureName::MDep,
        FeatureName::MobileWt,
        FeatureName::NCores,
        FeatureName::Pc,
        FeatureName::PxHeight,
        FeatureName::PxWidth,
        FeatureName::Ram,
        FeatureName::ScH,
        FeatureName::ScW,
        FeatureName::TalkTime,
        FeatureName::ThreeG,
        FeatureName::TouchScreen,
        FeatureName::Wifi,
    ];

    /// Column name used by the training data set
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::BatteryPower => "battery_power",
            FeatureName::Blue => "blue",
            FeatureName::ClockSpeed => "clock_speed",
            FeatureName::DualSim => "dual_sim",
            FeatureName::Fc => "fc",
            FeatureName::FourG => "four_g",
            FeatureName::IntMemory => "int_memory",
            FeatureName::MDep => "m_dep",
            FeatureName::MobileWt => "mobile_wt",
            FeatureName::NCores => "n_cores",
            FeatureName::Pc => "pc",
            FeatureName::PxHeight => "px_height",
            FeatureName::PxWidth => "px_width",
            FeatureName::Ram => "ram",
            FeatureName::ScH => "sc_h",
            FeatureName::ScW => "sc_w",
            FeatureName::TalkTime => "talk_time",
            FeatureName::ThreeG => "three_g",
            FeatureName::TouchScreen => "touch_screen",
            FeatureName::Wifi => "wifi",
        }
    }

    /// Position of this feature in a record
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| PriceError::InvalidInput(format!("Unknown feature name: {}", s)))
    }
}
