//! Feature record type

use super::{FeatureName, FEATURE_COUNT};
use crate::error::PriceError;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One phone description, ordered as the classifier expects
///
/// Records are immutable once built. Construction always checks that every
/// value is finite; map-based construction additionally requires each of the
/// twenty names exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    values: [f64; FEATURE_COUNT],
}

impl FeatureRecord {
    /// Build a record from values already in training order
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Result<Self, PriceError> {
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(PriceError::InvalidInput(format!(
                "{} must be finite, got {}",
                FeatureName::ALL[i],
                v
            )));
        }
        Ok(Self { values })
    }

    /// Build a record from literal values known to be finite
    pub(crate) const fn from_trusted(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Build a record from a slice in training order
    ///
    /// Fails if the slice does not hold exactly twenty values.
    pub fn from_slice(values: &[f64]) -> Result<Self, PriceError> {
        let values: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
            PriceError::InvalidInput(format!(
                "Expected {} features, got {}",
                FEATURE_COUNT,
                values.len()
            ))
        })?;
        Self::from_values(values)
    }

    /// Build a record from (name, value) pairs in any order
    ///
    /// Unknown, duplicated or missing names are rejected.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, PriceError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut values = [0.0; FEATURE_COUNT];
        let mut seen = HashSet::with_capacity(FEATURE_COUNT);

        for (name, value) in pairs {
            let feature: FeatureName = name.as_ref().parse()?;
            if !seen.insert(feature) {
                return Err(PriceError::InvalidInput(format!(
                    "Duplicate feature: {}",
                    feature
                )));
            }
            values[feature.index()] = value;
        }

        let missing: Vec<&str> = FeatureName::ALL
            .iter()
            .filter(|name| !seen.contains(*name))
            .map(|name| name.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(PriceError::InvalidInput(format!(
                "Missing features: {}",
                missing.join(", ")
            )));
        }

        Self::from_values(values)
    }

    /// Value of one feature
    pub fn get(&self, name: FeatureName) -> f64 {
        self.values[name.index()]
    }

    /// All values in training order
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// (name, value) pairs in training order
    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        FeatureName::ALL.iter().copied().zip(self.values.iter().copied())
    }
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(name, value)| (name.as_str(), value)))
    }
}

/// Keeps every key as written, so repeated names reach the duplicate check
struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = FeatureRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping feature names to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(FEATURE_COUNT));
        while let Some((name, value)) = map.next_entry::<String, f64>()? {
            pairs.push((name, value));
        }
        FeatureRecord::from_pairs(pairs).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for FeatureRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}
