//! Per-step validation schemas
//!
//! ## Architecture
//!
//! ```text
//! SCHEMAS (static, built once)
//!   ├── Schema (one per step, index 0..STEP_COUNT)
//!   │     └── FieldRule (name, binding, kind, required?, constraints)
//!   └── schema_for(index) -> &'static Schema
//! ```
//!
//! Schemas are plain data. The validator walks them; nothing here holds
//! runtime state.

pub mod steps;

use regex::Regex;
use std::sync::LazyLock;

use crate::error::WizardError;
use crate::form::value::{FieldValue, YearMonth};
use crate::validator::ValidationContext;

/// Number of steps in the booking wizard
pub const STEP_COUNT: usize = 4;

static SCHEMAS: LazyLock<[Schema; STEP_COUNT]> = LazyLock::new(steps::build_all);

/// Get the schema for a step index
pub fn schema_for(index: usize) -> Result<&'static Schema, WizardError> {
    SCHEMAS.get(index).ok_or(WizardError::StepOutOfRange {
        index,
        count: STEP_COUNT,
    })
}

/// All schemas in step order
pub fn all_schemas() -> &'static [Schema] {
    SCHEMAS.as_slice()
}

/// Find the field rule for a name, searching every step
pub fn find_field(name: &str) -> Option<(usize, &'static FieldRule)> {
    all_schemas()
        .iter()
        .find_map(|schema| schema.field(name).map(|rule| (schema.index, rule)))
}

/// How the presentation layer writes a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Plain input, written on every edit event
    Direct,

    /// Widget-owned value pushed explicitly with `set_field_value`
    Controlled,
}

impl Binding {
    pub fn label(&self) -> &'static str {
        match self {
            Binding::Direct => "direct",
            Binding::Controlled => "controlled",
        }
    }
}

/// Target type a raw value is coerced into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    DateRange,
    YearMonth,
}

impl FieldKind {
    /// Coerce a raw value into this kind, `None` if it cannot be
    pub fn coerce(&self, value: &FieldValue) -> Option<FieldValue> {
        match (self, value) {
            (FieldKind::Text, FieldValue::Text(_)) => Some(value.clone()),
            (FieldKind::Text, FieldValue::Number(n)) => Some(FieldValue::Text(n.to_string())),
            (FieldKind::Integer, FieldValue::Number(_)) => Some(value.clone()),
            (FieldKind::Integer, FieldValue::Text(s)) => {
                s.trim().parse::<i64>().ok().map(FieldValue::Number)
            }
            (FieldKind::DateRange, FieldValue::DateRange(_)) => Some(value.clone()),
            (FieldKind::YearMonth, FieldValue::YearMonth(_)) => Some(value.clone()),
            (FieldKind::YearMonth, FieldValue::Text(s)) => {
                YearMonth::parse(s).map(FieldValue::YearMonth)
            }
            _ => None,
        }
    }
}

/// A single declarative constraint, checked after coercion
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Text must match the pattern
    Matches {
        pattern: &'static LazyLock<Regex>,
        message: &'static str,
    },

    /// Integer lower bound (inclusive)
    Min { min: i64, message: &'static str },

    /// Integer upper bound (inclusive)
    Max { max: i64, message: &'static str },

    /// Date range must not start before today
    StartNotPast { message: &'static str },

    /// Date range must not end before it starts
    EndNotBeforeStart { message: &'static str },

    /// Expiry month must be the current month or later
    ExpiryNotPast { message: &'static str },
}

impl Constraint {
    /// Check a coerced value, returning the failure message
    pub fn check(
        &self,
        value: &FieldValue,
        ctx: &ValidationContext,
    ) -> Result<(), &'static str> {
        let ok = match (self, value) {
            (Constraint::Matches { pattern, .. }, FieldValue::Text(s)) => pattern.is_match(s),
            (Constraint::Min { min, .. }, FieldValue::Number(n)) => n >= min,
            (Constraint::Max { max, .. }, FieldValue::Number(n)) => n <= max,
            (Constraint::StartNotPast { .. }, FieldValue::DateRange(range)) => {
                range.start_date >= ctx.today
            }
            (Constraint::EndNotBeforeStart { .. }, FieldValue::DateRange(range)) => {
                range.is_ordered()
            }
            (Constraint::ExpiryNotPast { .. }, FieldValue::YearMonth(expiry)) => {
                let current = YearMonth::of(ctx.today);
                expiry.year > current.year
                    || (expiry.year == current.year && expiry.month >= current.month)
            }
            // Constraint does not apply to this value kind
            _ => true,
        };

        if ok {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Constraint::Matches { message, .. }
            | Constraint::Min { message, .. }
            | Constraint::Max { message, .. }
            | Constraint::StartNotPast { message }
            | Constraint::EndNotBeforeStart { message }
            | Constraint::ExpiryNotPast { message } => *message,
        }
    }
}

/// Declaration of one field within a step
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub binding: Binding,
    pub kind: FieldKind,
    /// Message reported when the field is missing; `None` means optional
    pub required: Option<&'static str>,
    /// Message reported when the raw value cannot be coerced
    pub type_message: &'static str,
    pub constraints: Vec<Constraint>,
}

impl FieldRule {
    fn new(name: &'static str, kind: FieldKind, type_message: &'static str) -> Self {
        Self {
            name,
            binding: Binding::Direct,
            kind,
            required: None,
            type_message,
            constraints: Vec::new(),
        }
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text, "Must be text")
    }

    pub fn integer(name: &'static str, type_message: &'static str) -> Self {
        Self::new(name, FieldKind::Integer, type_message)
    }

    pub fn date_range(name: &'static str, type_message: &'static str) -> Self {
        Self::new(name, FieldKind::DateRange, type_message)
    }

    pub fn year_month(name: &'static str, type_message: &'static str) -> Self {
        Self::new(name, FieldKind::YearMonth, type_message)
    }

    pub fn controlled(mut self) -> Self {
        self.binding = Binding::Controlled;
        self
    }

    pub fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn matches(self, pattern: &'static LazyLock<Regex>, message: &'static str) -> Self {
        self.with(Constraint::Matches { pattern, message })
    }

    pub fn min(self, min: i64, message: &'static str) -> Self {
        self.with(Constraint::Min { min, message })
    }

    pub fn max(self, max: i64, message: &'static str) -> Self {
        self.with(Constraint::Max { max, message })
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }
}

/// Validation schema for one step
#[derive(Debug, Clone)]
pub struct Schema {
    pub index: usize,
    pub fields: Vec<FieldRule>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|rule| rule.name)
    }

    pub fn controlled_fields(&self) -> impl Iterator<Item = &FieldRule> {
        self.fields
            .iter()
            .filter(|rule| rule.binding == Binding::Controlled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_indices_are_contiguous() {
        for (i, schema) in all_schemas().iter().enumerate() {
            assert_eq!(schema.index, i);
        }
        assert_eq!(all_schemas().len(), STEP_COUNT);
    }

    #[test]
    fn test_schema_for_out_of_range() {
        assert!(schema_for(0).is_ok());
        assert!(schema_for(3).is_ok());
        assert_eq!(
            schema_for(4).unwrap_err(),
            WizardError::StepOutOfRange { index: 4, count: 4 }
        );
    }

    #[test]
    fn test_field_names_are_unique_across_steps() {
        let mut seen = HashSet::new();
        for schema in all_schemas() {
            for name in schema.field_names() {
                assert!(seen.insert(name), "duplicate field {name}");
            }
        }
    }

    #[test]
    fn test_controlled_fields() {
        let controlled: Vec<_> = all_schemas()
            .iter()
            .flat_map(|s| s.controlled_fields().map(|r| r.name))
            .collect();
        assert_eq!(controlled, vec!["destination", "dateRange", "typeOfRoom"]);
    }

    #[test]
    fn test_find_field() {
        let (step, rule) = find_field("cvv").unwrap();
        assert_eq!(step, 3);
        assert_eq!(rule.kind, FieldKind::Text);
        assert!(find_field("nickname").is_none());
    }

    #[test]
    fn test_integer_coercion() {
        let kind = FieldKind::Integer;
        assert_eq!(kind.coerce(&FieldValue::text(" 2 ")), Some(FieldValue::Number(2)));
        assert_eq!(kind.coerce(&FieldValue::text("2.5")), None);
        assert_eq!(kind.coerce(&FieldValue::text("two")), None);
        assert_eq!(kind.coerce(&FieldValue::Number(3)), Some(FieldValue::Number(3)));
    }
}
