//! Step validator
//!
//! Runs every rule of a step's schema against the raw values and returns
//! either the normalized values or one message per failing field. Fields are
//! independent, so a single pass reports every violation. Within one field the
//! first failing constraint wins.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::WizardError;
use crate::form::record::NormalizedValues;
use crate::form::value::FieldValue;
use crate::schema::{schema_for, FieldRule, Schema};

/// What a constraint can see besides its own value
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    /// Date the validation runs on
    pub today: NaiveDate,
}

/// Field name to human-readable message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    errors: BTreeMap<String, String>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrorSet {}

/// Validate the values of one step by index
///
/// An out-of-range index is a programming error and is reported separately
/// from field failures.
pub fn validate_step(
    step_index: usize,
    values: &BTreeMap<String, FieldValue>,
    today: NaiveDate,
) -> Result<Result<NormalizedValues, ValidationErrorSet>, WizardError> {
    let schema = schema_for(step_index)?;
    Ok(validate(schema, values, today))
}

/// Validate raw values against a schema
pub fn validate(
    schema: &Schema,
    values: &BTreeMap<String, FieldValue>,
    today: NaiveDate,
) -> Result<NormalizedValues, ValidationErrorSet> {
    let ctx = ValidationContext { today };
    let mut normalized = NormalizedValues::new();
    let mut errors = ValidationErrorSet::new();

    for rule in &schema.fields {
        match check_field(rule, values.get(rule.name), &ctx) {
            Ok(Some(value)) => {
                normalized.insert(rule.name.to_string(), value);
            }
            Ok(None) => {}
            Err(message) => errors.insert(rule.name, message),
        }
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(errors)
    }
}

fn check_field(
    rule: &FieldRule,
    raw: Option<&FieldValue>,
    ctx: &ValidationContext,
) -> Result<Option<FieldValue>, &'static str> {
    let raw = match raw {
        Some(value) if !value.is_blank() => value,
        _ => {
            return match rule.required {
                Some(message) => Err(message),
                None => Ok(None),
            };
        }
    };

    let value = rule.kind.coerce(raw).ok_or(rule.type_message)?;

    for constraint in &rule.constraints {
        constraint.check(&value, ctx)?;
    }

    Ok(Some(value))
}
