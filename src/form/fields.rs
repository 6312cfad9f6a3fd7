//! Form field definitions
//!
//! One entry per feature, in training order. The first fifteen fields are laid
//! out in three columns of five; the last five form a trailing row.

use crate::error::PriceError;
use crate::schema::{FeatureName, FEATURE_COUNT};

/// Input widget and its bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    /// Bounded slider; `step` of 1.0 means whole numbers only
    Slider {
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
        /// Increment between positions
        step: f64,
    },
    /// Bounded whole-number entry
    NumberInput {
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
    },
    /// Binary choice stored as 0/1
    YesNo,
}

/// Where a field sits in the form layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// One of the three main columns (0-2)
    Column(usize),
    /// Trailing full-width row
    Footer,
}

/// One form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Feature this field fills
    pub feature: FeatureName,
    /// Label shown next to the input
    pub label: &'static str,
    /// Input widget
    pub widget: Widget,
    /// Initial value
    pub default: f64,
    /// Layout position
    pub placement: Placement,
}

const fn slider(
    feature: FeatureName,
    label: &'static str,
    min: f64,
    max: f64,
    default: f64,
    placement: Placement,
) -> FieldSpec {
    FieldSpec {
        feature,
        label,
        widget: Widget::Slider { min, max, step: 1.0 },
        default,
        placement,
    }
}

const fn fine_slider(
    feature: FeatureName,
    label: &'static str,
    min: f64,
    max: f64,
    default: f64,
    placement: Placement,
) -> FieldSpec {
    FieldSpec {
        feature,
        label,
        widget: Widget::Slider { min, max, step: 0.1 },
        default,
        placement,
    }
}

const fn number(
    feature: FeatureName,
    label: &'static str,
    min: f64,
    max: f64,
    default: f64,
    placement: Placement,
) -> FieldSpec {
    FieldSpec {
        feature,
        label,
        widget: Widget::NumberInput { min, max },
        default,
        placement,
    }
}

const fn yes_no(feature: FeatureName, label: &'static str, placement: Placement) -> FieldSpec {
    FieldSpec {
        feature,
        label,
        widget: Widget::YesNo,
        default: 0.0,
        placement,
    }
}

use FeatureName as F;
use Placement::{Column, Footer};

/// All form fields, in training order
pub const FORM_FIELDS: [FieldSpec; FEATURE_COUNT] = [
    slider(F::BatteryPower, "Battery (mAh)", 500.0, 2000.0, 1000.0, Column(0)),
    yes_no(F::Blue, "Bluetooth", Column(0)),
    fine_slider(F::ClockSpeed, "CPU Speed (GHz)", 0.5, 3.0, 1.0, Column(0)),
    yes_no(F::DualSim, "Dual SIM", Column(0)),
    slider(F::Fc, "Front Camera (MP)", 0.0, 20.0, 5.0, Column(0)),
    yes_no(F::FourG, "4G", Column(1)),
    slider(F::IntMemory, "Storage (GB)", 2.0, 64.0, 16.0, Column(1)),
    fine_slider(F::MDep, "Thickness (cm)", 0.1, 1.0, 0.5, Column(1)),
    slider(F::MobileWt, "Weight (g)", 80.0, 200.0, 150.0, Column(1)),
    slider(F::NCores, "CPU Cores", 1.0, 8.0, 4.0, Column(1)),
    slider(F::Pc, "Main Camera (MP)", 0.0, 20.0, 8.0, Column(2)),
    number(F::PxHeight, "Pixel Height", 0.0, 2000.0, 1000.0, Column(2)),
    number(F::PxWidth, "Pixel Width", 0.0, 2000.0, 1000.0, Column(2)),
    slider(F::Ram, "RAM (MB)", 256.0, 4096.0, 2048.0, Column(2)),
    slider(F::ScH, "Screen Height (cm)", 5.0, 20.0, 10.0, Column(2)),
    slider(F::ScW, "Screen Width (cm)", 5.0, 20.0, 10.0, Footer),
    slider(F::TalkTime, "Talk Time (h)", 2.0, 20.0, 10.0, Footer),
    yes_no(F::ThreeG, "3G", Footer),
    yes_no(F::TouchScreen, "Touchscreen", Footer),
    yes_no(F::Wifi, "Wi-Fi", Footer),
];

/// Field spec for a feature
pub fn field(feature: FeatureName) -> &'static FieldSpec {
    &FORM_FIELDS[feature.index()]
}

impl FieldSpec {
    /// Inclusive (min, max) bounds
    pub fn bounds(&self) -> (f64, f64) {
        match self.widget {
            Widget::Slider { min, max, .. } | Widget::NumberInput { min, max } => (min, max),
            Widget::YesNo => (0.0, 1.0),
        }
    }

    /// Whether only whole numbers are accepted
    pub fn is_integer(&self) -> bool {
        match self.widget {
            Widget::Slider { step, .. } => step >= 1.0,
            Widget::NumberInput { .. } | Widget::YesNo => true,
        }
    }

    /// Check a value against the widget bounds
    pub fn validate(&self, value: f64) -> Result<f64, PriceError> {
        let (min, max) = self.bounds();
        if !value.is_finite() || value < min || value > max {
            return Err(PriceError::InvalidInput(format!(
                "{} must be between {} and {}, got {}",
                self.feature, min, max, value
            )));
        }
        if self.is_integer() && value.fract() != 0.0 {
            return Err(PriceError::InvalidInput(format!(
                "{} must be a whole number, got {}",
                self.feature, value
            )));
        }
        Ok(value)
    }

    /// Parse and validate user text for this field
    ///
    /// Yes/no fields also accept `yes`, `no`, `y`, `n`, `true` and `false`.
    pub fn parse(&self, raw: &str) -> Result<f64, PriceError> {
        let raw = raw.trim();
        if self.widget == Widget::YesNo {
            let value = match raw.to_ascii_lowercase().as_str() {
                "1" | "yes" | "y" | "true" => 1.0,
                "0" | "no" | "n" | "false" => 0.0,
                _ => {
                    return Err(PriceError::InvalidInput(format!(
                        "{} expects yes or no, got '{}'",
                        self.feature, raw
                    )))
                }
            };
            return Ok(value);
        }
        let value: f64 = raw.parse().map_err(|_| {
            PriceError::InvalidInput(format!("{} expects a number, got '{}'", self.feature, raw))
        })?;
        self.validate(value)
    }

    /// Display text for a value of this field
    pub fn format_value(&self, value: f64) -> String {
        match self.widget {
            Widget::YesNo => (if value != 0.0 { "Yes" } else { "No" }).to_string(),
            _ if self.is_integer() => format!("{}", value as i64),
            _ => format!("{:.1}", value),
        }
    }

    /// Range hint, e.g. `[500-2000]` or `[yes/no]`
    pub fn hint(&self) -> String {
        match self.widget {
            Widget::YesNo => "[yes/no]".to_string(),
            _ => {
                let (min, max) = self.bounds();
                format!("[{}-{}]", self.format_value(min), self.format_value(max))
            }
        }
    }
}
