//! Field binding layer
//!
//! One value store keyed by field name with two write paths. Direct inputs
//! and controlled widgets both land here, so the validator never needs to know
//! which path produced a value.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::value::{DateRange, FieldValue};
use crate::error::WizardError;
use crate::schema::{self, Binding, Schema};

/// Name of the controlled date range field
pub const DATE_RANGE_FIELD: &str = "dateRange";

/// Current, unvalidated field values
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    values: BTreeMap<String, FieldValue>,
}

impl FieldStore {
    /// Create a store seeded with a one-day date range starting today
    pub fn seeded(today: NaiveDate) -> Self {
        let mut store = Self::default();
        store.values.insert(
            DATE_RANGE_FIELD.to_string(),
            FieldValue::DateRange(DateRange::one_day_from(today)),
        );
        store
    }

    /// Write a plain input's value
    pub fn set_direct(
        &mut self,
        active: &Schema,
        name: &str,
        value: FieldValue,
    ) -> Result<(), WizardError> {
        self.write(active, name, value, Binding::Direct)
    }

    /// Write a controlled widget's value
    pub fn set_field_value(
        &mut self,
        active: &Schema,
        name: &str,
        value: FieldValue,
    ) -> Result<(), WizardError> {
        self.write(active, name, value, Binding::Controlled)
    }

    fn write(
        &mut self,
        active: &Schema,
        name: &str,
        value: FieldValue,
        via: Binding,
    ) -> Result<(), WizardError> {
        let Some(rule) = active.field(name) else {
            return Err(match schema::find_field(name) {
                Some(_) => WizardError::FieldNotInStep {
                    field: name.to_string(),
                    step: active.index,
                },
                None => WizardError::UnknownField(name.to_string()),
            });
        };

        if rule.binding != via {
            return Err(WizardError::BindingMismatch {
                field: name.to_string(),
                expected: rule.binding.label(),
            });
        }

        tracing::debug!(field = name, binding = via.label(), "Field value updated");
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Authoritative current value, used by widgets to re-render selection
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.value(DATE_RANGE_FIELD)
            .and_then(FieldValue::as_date_range)
    }

    /// Values of every field declared by `schema` that currently has one
    pub fn values_for(&self, schema: &Schema) -> BTreeMap<String, FieldValue> {
        schema
            .field_names()
            .filter_map(|name| {
                self.values
                    .get(name)
                    .map(|value| (name.to_string(), value.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop everything and reseed the default date range
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::seeded(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::schema_for;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2027, 3, 14).unwrap()
    }

    #[test]
    fn test_seeded_date_range() {
        let store = FieldStore::seeded(today());
        let range = store.date_range().unwrap();
        assert_eq!(range.start_date, today());
        assert_eq!(range.nights(), 1);
    }

    #[test]
    fn test_direct_write() {
        let mut store = FieldStore::seeded(today());
        let step0 = schema_for(0).unwrap();

        store.set_direct(step0, "firstname", "Ada".into()).unwrap();
        assert_eq!(store.value("firstname"), Some(&FieldValue::text("Ada")));
    }

    #[test]
    fn test_controlled_write() {
        let mut store = FieldStore::seeded(today());
        let step1 = schema_for(1).unwrap();

        store
            .set_field_value(step1, "destination", "tky".into())
            .unwrap();
        assert_eq!(store.value("destination"), Some(&FieldValue::text("tky")));
    }

    #[test]
    fn test_binding_mismatch() {
        let mut store = FieldStore::seeded(today());
        let step1 = schema_for(1).unwrap();

        let err = store
            .set_direct(step1, "destination", "tky".into())
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::BindingMismatch {
                field: "destination".to_string(),
                expected: "controlled",
            }
        );
        assert!(store.value("destination").is_none());
    }

    #[test]
    fn test_field_outside_active_step() {
        let mut store = FieldStore::seeded(today());
        let step0 = schema_for(0).unwrap();

        let err = store.set_direct(step0, "cvv", "123".into()).unwrap_err();
        assert_eq!(
            err,
            WizardError::FieldNotInStep {
                field: "cvv".to_string(),
                step: 0,
            }
        );

        let err = store.set_direct(step0, "nickname", "x".into()).unwrap_err();
        assert_eq!(err, WizardError::UnknownField("nickname".to_string()));
    }

    #[test]
    fn test_values_for_scopes_to_schema() {
        let mut store = FieldStore::seeded(today());
        store
            .set_direct(schema_for(0).unwrap(), "firstname", "Ada".into())
            .unwrap();

        let step1 = store.values_for(schema_for(1).unwrap());
        assert_eq!(step1.len(), 1);
        assert!(step1.contains_key(DATE_RANGE_FIELD));
    }

    #[test]
    fn test_reset() {
        let mut store = FieldStore::seeded(today());
        store
            .set_direct(schema_for(0).unwrap(), "firstname", "Ada".into())
            .unwrap();

        store.reset(today());
        assert!(store.value("firstname").is_none());
        assert_eq!(store.len(), 1);
    }
}
