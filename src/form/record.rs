//! Cumulative booking record

use serde::Serialize;
use std::collections::BTreeMap;

use super::value::FieldValue;

/// Values normalized by the validator for one step
pub type NormalizedValues = BTreeMap<String, FieldValue>;

/// Aggregate of every validated field across completed steps
///
/// Accepting a step never touches keys owned by other steps. Within its own
/// keys the latest accepted values replace the previous ones outright, so an
/// optional field cleared on a revisit disappears from the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CumulativeRecord {
    values: BTreeMap<String, FieldValue>,
}

impl CumulativeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a step's normalized values, overwriting keys it owns
    pub fn merge(&mut self, values: NormalizedValues) {
        self.values.extend(values);
    }

    /// Replace the keys a step owns with its newly validated values
    ///
    /// Owned keys missing from `values` were left blank and are dropped.
    pub fn replace_step<'a>(
        &mut self,
        owned: impl IntoIterator<Item = &'a str>,
        values: NormalizedValues,
    ) {
        for name in owned {
            if !values.contains_key(name) {
                self.values.remove(name);
            }
        }
        self.values.extend(values);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the finished record, leaving an empty one behind
    pub fn take(&mut self) -> CumulativeRecord {
        std::mem::take(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
