//! Form field tables and drafts.
//!
//! A [`FormDraft`] is the editable, string-valued copy of a record that
//! backs a create or edit form. It never touches stored records; it only
//! knows how to become a JSON request body.

use regex::Regex;
use serde_json::{Map, Number, Value};
use std::sync::LazyLock;

use crate::{DraftError, Resource, ResourceId, Result};

static POSITIVE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]*[.,]?[0-9]+)$").expect("valid pattern"));
static UNIT_INTERVAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:0(\.[0-9]+)?|1(\.0*)?)$").expect("valid pattern"));
static PERCENTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{1,2}(?:\.[0-9]*)?|100(\.0*)?)$").expect("valid pattern")
});

/// Input constraint of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Non-negative decimal number
    PositiveNumber,
    /// Number between 0 and 1
    UnitInterval,
    /// Number between 0 and 100
    Percentage,
}

impl FieldKind {
    /// HTML `pattern` attribute for the input, if any.
    pub fn pattern(self) -> Option<&'static str> {
        match self {
            FieldKind::Text => None,
            FieldKind::PositiveNumber => Some(r"[0-9]*[.,]?[0-9]+"),
            FieldKind::UnitInterval => Some(r"^(?:0(\.\d+)?|1(\.0*)?)$"),
            FieldKind::Percentage => Some(r"^(?:\d{1,2}(?:\.\d*)?|100(\.0*)?)$"),
        }
    }

    /// Tooltip shown when the pattern does not match.
    pub fn title(self) -> Option<&'static str> {
        match self {
            FieldKind::Text => None,
            FieldKind::PositiveNumber => Some("Please enter a positive number."),
            FieldKind::UnitInterval => Some("Please enter a number between 0 and 1"),
            FieldKind::Percentage => Some("Please enter a number between 0 and 100"),
        }
    }

    /// Whether the value satisfies the pattern.
    ///
    /// Empty values are not pattern-checked, matching HTML form semantics.
    pub fn accepts(self, value: &str) -> bool {
        if value.is_empty() {
            return true;
        }
        match self {
            FieldKind::Text => true,
            FieldKind::PositiveNumber => POSITIVE_NUMBER.is_match(value),
            FieldKind::UnitInterval => UNIT_INTERVAL.is_match(value),
            FieldKind::Percentage => PERCENTAGE.is_match(value),
        }
    }

    /// Whether the field is sent to the backend as a number.
    pub fn is_numeric(self) -> bool {
        !matches!(self, FieldKind::Text)
    }

    /// Value a blank create form starts with.
    pub fn default_value(self) -> &'static str {
        if self.is_numeric() { "0" } else { "" }
    }
}

/// One editable field of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in the backend's JSON (snake_case)
    pub wire: &'static str,
    /// Input name used by the create form (camelCase)
    pub create_input: &'static str,
    /// Column and input label
    pub label: &'static str,
    /// Input constraint
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(
        wire: &'static str,
        create_input: &'static str,
        label: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            wire,
            create_input,
            label,
            kind,
        }
    }

    /// Input name for this field in the given form mode.
    ///
    /// The create form names inputs in camelCase while the edit form
    /// uses the wire names directly.
    pub fn input_name(&self, mode: FormMode) -> &'static str {
        match mode {
            FormMode::Create => self.create_input,
            FormMode::Edit(_) => self.wire,
        }
    }
}

/// Whether a draft creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ResourceId),
}

/// A field whose value fails its pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Input name of the offending field
    pub input: &'static str,
    /// Tooltip text for the field
    pub title: &'static str,
    /// Rejected value
    pub value: String,
}

/// Client-local editable copy of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    mode: FormMode,
    fields: &'static [FieldSpec],
    values: Vec<String>,
}

impl FormDraft {
    /// Blank draft for the create form.
    pub fn create(fields: &'static [FieldSpec]) -> Self {
        Self {
            mode: FormMode::Create,
            fields,
            values: fields
                .iter()
                .map(|f| f.kind.default_value().to_string())
                .collect(),
        }
    }

    /// Draft pre-populated from an existing record.
    pub fn edit<R: Resource>(record: &R) -> Result<Self> {
        let value = serde_json::to_value(record).map_err(|e| DraftError::Record(e.to_string()))?;
        let Value::Object(object) = value else {
            return Err(DraftError::Record(format!("{} is not an object", R::KIND)));
        };

        let values = R::FIELDS
            .iter()
            .map(|spec| match object.get(spec.wire) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => display_number(n),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            })
            .collect();

        Ok(Self {
            mode: FormMode::Edit(record.id()),
            fields: R::FIELDS,
            values,
        })
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Field specs paired with their current values, in form order.
    pub fn entries(&self) -> impl Iterator<Item = (&FieldSpec, &str)> {
        self.fields
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    fn position(&self, input: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.input_name(self.mode) == input)
    }

    /// Current value of an input.
    pub fn value(&self, input: &str) -> Option<&str> {
        self.position(input).map(|i| self.values[i].as_str())
    }

    /// Replace the value of an input.
    pub fn set(&mut self, input: &str, value: impl Into<String>) -> Result<()> {
        let index = self
            .position(input)
            .ok_or_else(|| DraftError::UnknownField(input.to_string()))?;
        self.values[index] = value.into();
        Ok(())
    }

    /// Value of the first text field, used to name the record in toasts.
    pub fn label(&self) -> &str {
        self.entries()
            .find(|(spec, _)| spec.kind == FieldKind::Text)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }

    /// Fields whose values fail their pattern.
    pub fn violations(&self) -> Vec<FieldViolation> {
        self.entries()
            .filter(|(spec, value)| !spec.kind.accepts(value))
            .map(|(spec, value)| FieldViolation {
                input: spec.input_name(self.mode),
                title: spec.kind.title().unwrap_or_default(),
                value: value.to_string(),
            })
            .collect()
    }

    /// Backend request body with snake_case keys.
    ///
    /// Edit drafts also carry the record's `id`.
    pub fn to_body(&self) -> Result<Value> {
        let mut body = Map::new();
        if let FormMode::Edit(id) = self.mode {
            body.insert("id".to_string(), Value::from(id.0));
        }
        for (spec, raw) in self.entries() {
            let value = if spec.kind.is_numeric() {
                parse_number(spec, raw)?
            } else {
                Value::String(raw.to_string())
            };
            body.insert(spec.wire.to_string(), value);
        }
        Ok(Value::Object(body))
    }
}

/// Largest integer an f64 represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn parse_number(spec: &FieldSpec, raw: &str) -> Result<Value> {
    let invalid = || DraftError::InvalidNumber {
        field: spec.wire,
        value: raw.to_string(),
    };
    let parsed: f64 = raw.trim().replace(',', ".").parse().map_err(|_| invalid())?;
    if !parsed.is_finite() {
        return Err(invalid());
    }
    if parsed.fract() == 0.0 && parsed.abs() < MAX_EXACT_INTEGER {
        return Ok(Value::from(parsed as i64));
    }
    Number::from_f64(parsed).map(Value::Number).ok_or_else(invalid)
}

fn display_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
