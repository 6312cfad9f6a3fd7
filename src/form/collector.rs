//! Form state and submission
//!
//! The form only produces a record when it is explicitly submitted. Edits and
//! resets change the form state and return nothing, so callers never run a
//! prediction for them.

use super::fields::{field, FieldSpec, Placement, FORM_FIELDS};
use crate::error::PriceError;
use crate::schema::{FeatureName, FeatureRecord, FEATURE_COUNT};

/// User action on the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Change one field
    Edit {
        /// Field to change
        feature: FeatureName,
        /// New value (validated against the widget bounds)
        value: f64,
    },
    /// Restore every field to its default
    Reset,
    /// Submit the form
    Submit,
}

/// Current values of the twenty form fields
#[derive(Debug, Clone, PartialEq)]
pub struct InputForm {
    values: [f64; FEATURE_COUNT],
}

impl Default for InputForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InputForm {
    /// Form with every field at its default
    pub fn new() -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for (value, spec) in values.iter_mut().zip(FORM_FIELDS.iter()) {
            *value = spec.default;
        }
        Self { values }
    }

    /// Current value of a field
    pub fn get(&self, feature: FeatureName) -> f64 {
        self.values[feature.index()]
    }

    /// Set a field, rejecting values outside its widget bounds
    ///
    /// The form is left unchanged on error.
    pub fn set(&mut self, feature: FeatureName, value: f64) -> Result<(), PriceError> {
        self.values[feature.index()] = field(feature).validate(value)?;
        Ok(())
    }

    /// Set a field from user text (`name`, `value` as typed)
    pub fn set_text(&mut self, name: &str, raw: &str) -> Result<FeatureName, PriceError> {
        let feature: FeatureName = name.trim().parse()?;
        let value = field(feature).parse(raw)?;
        self.values[feature.index()] = value;
        Ok(feature)
    }

    /// Restore every default
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record built from the current values
    pub fn to_record(&self) -> Result<FeatureRecord, PriceError> {
        FeatureRecord::from_values(self.values)
    }

    /// Apply one event
    ///
    /// Returns `Some(record)` only for [`FormEvent::Submit`].
    pub fn handle(&mut self, event: FormEvent) -> Result<Option<FeatureRecord>, PriceError> {
        match event {
            FormEvent::Edit { feature, value } => {
                self.set(feature, value)?;
                Ok(None)
            }
            FormEvent::Reset => {
                self.reset();
                Ok(None)
            }
            FormEvent::Submit => {
                let record = self.to_record()?;
                log::debug!("Form submitted: {}", record);
                Ok(Some(record))
            }
        }
    }

    /// Plain-text rendering: three columns, then the trailing row
    pub fn render(&self) -> String {
        let cell = |spec: &FieldSpec| {
            format!(
                "{}: {} {}",
                spec.label,
                spec.format_value(self.get(spec.feature)),
                spec.hint()
            )
        };

        let columns: Vec<Vec<String>> = (0..3)
            .map(|c| {
                FORM_FIELDS
                    .iter()
                    .filter(|spec| spec.placement == Placement::Column(c))
                    .map(cell)
                    .collect()
            })
            .collect();
        let width = columns
            .iter()
            .flatten()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            + 2;
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

        let mut out = String::new();
        for row in 0..rows {
            let line: String = columns
                .iter()
                .map(|col| {
                    let text = col.get(row).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", text, width = width)
                })
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        for spec in FORM_FIELDS.iter().filter(|s| s.placement == Placement::Footer) {
            out.push_str(&cell(spec));
            out.push('\n');
        }
        out
    }
}
