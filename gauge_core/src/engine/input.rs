//! Raw form input.
//!
//! An [`InputSet`] is what a form produces on submit: field names mapped to
//! loosely-typed values. Nothing here checks ranges or options; that is the
//! validator's job. Values arrive from three places:
//!
//! - a JSON object (API / `--input file.json`), where `null` means absent
//! - a typed calculator input, serialized back to raw form
//! - `key=value` assignments (CLI `--set`), parsed against the schema

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::validate::{FieldKind, FieldSpec};
use crate::errors::{CalcError, CalcResult, FieldError};

/// A single raw field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl InputValue {
    /// Short name of the value's shape, for error messages
    pub fn shape(&self) -> &'static str {
        match self {
            InputValue::Bool(_) => "boolean",
            InputValue::Number(_) => "number",
            InputValue::Text(_) => "text",
            InputValue::List(_) => "list",
        }
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Number(value)
    }
}

impl From<u32> for InputValue {
    fn from(value: u32) -> Self {
        InputValue::Number(f64::from(value))
    }
}

impl From<i32> for InputValue {
    fn from(value: i32) -> Self {
        InputValue::Number(f64::from(value))
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        InputValue::Bool(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

impl From<Vec<&str>> for InputValue {
    fn from(values: Vec<&str>) -> Self {
        InputValue::List(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for InputValue {
    fn from(values: Vec<String>) -> Self {
        InputValue::List(values)
    }
}

/// Field name to raw value, as submitted by a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSet {
    fields: BTreeMap<String, InputValue>,
}

impl InputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    ///
    /// ```rust
    /// use gauge_core::engine::InputSet;
    ///
    /// let set = InputSet::new().with("height_cm", 180.0).with("weight_kg", 75.0);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<InputValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<InputValue> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay another set; its values win.
    pub fn merge(&mut self, other: InputSet) {
        self.fields.extend(other.fields);
    }

    /// Build from a JSON object. `null` members are treated as absent.
    pub fn from_json(value: Value) -> CalcResult<Self> {
        let Value::Object(map) = value else {
            return Err(CalcError::serialization("Input must be a JSON object"));
        };

        let mut set = InputSet::new();
        let mut errors = Vec::new();
        for (name, member) in map {
            match json_to_input(member) {
                Ok(Some(value)) => set.insert(name, value),
                Ok(None) => {}
                Err(shape) => errors.push(FieldError::invalid_type(
                    name,
                    format!("Unsupported value: {}", shape),
                )),
            }
        }

        if errors.is_empty() {
            Ok(set)
        } else {
            Err(CalcError::validation(errors))
        }
    }

    /// Serialize a typed calculator input back into raw form.
    pub fn from_typed<T: Serialize>(input: &T) -> CalcResult<Self> {
        Self::from_json(serde_json::to_value(input)?)
    }

    /// Parse `key=value` assignments against a schema.
    ///
    /// Numbers that fail to parse are kept as text so the validator reports
    /// them with the field's own message. Lists are comma separated.
    pub fn parse_assignments<S: AsRef<str>>(schema: &[FieldSpec], assignments: &[S]) -> CalcResult<Self> {
        let mut set = InputSet::new();
        let mut errors = Vec::new();

        for assignment in assignments {
            let assignment = assignment.as_ref();
            let Some((name, raw)) = assignment.split_once('=') else {
                errors.push(FieldError::invalid_type(
                    assignment,
                    "Expected key=value",
                ));
                continue;
            };
            let name = name.trim();
            let raw = raw.trim();

            let Some(spec) = schema.iter().find(|spec| spec.name == name) else {
                errors.push(FieldError::invalid_option(name, "Unknown field"));
                continue;
            };

            set.insert(name, parse_raw(&spec.kind, raw));
        }

        if errors.is_empty() {
            Ok(set)
        } else {
            Err(CalcError::validation(errors))
        }
    }
}

fn json_to_input(value: Value) -> Result<Option<InputValue>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(InputValue::Bool(b))),
        Value::Number(n) => n.as_f64().map(|n| Some(InputValue::Number(n))).ok_or("number"),
        Value::String(s) => Ok(Some(InputValue::Text(s))),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err("list items must be text"),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|items| Some(InputValue::List(items))),
        Value::Object(_) => Err("object"),
    }
}

fn parse_raw(kind: &FieldKind, raw: &str) -> InputValue {
    match kind {
        FieldKind::Number { .. } | FieldKind::Integer { .. } => raw
            .parse::<f64>()
            .map(InputValue::Number)
            .unwrap_or_else(|_| InputValue::Text(raw.to_string())),
        FieldKind::Flag => match parse_flag(raw) {
            Some(b) => InputValue::Bool(b),
            None => InputValue::Text(raw.to_string()),
        },
        FieldKind::ChoiceList { .. } => InputValue::List(split_list(raw)),
        FieldKind::Choice { .. } | FieldKind::Date => InputValue::Text(raw.to_string()),
    }
}

/// Accepted spellings for a boolean flag
pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Comma-separated list, blanks dropped
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
