//! Input validation.
//!
//! Each calculator declares its fields as a static slice of [`FieldSpec`].
//! [`validate`] checks a raw [`InputSet`] against that slice and returns a
//! [`ValidationReport`]: the failing fields (all of them, not just the first)
//! plus a normalized JSON object that deserializes straight into the
//! calculator's typed input when validation passes.
//!
//! Numeric bounds are inclusive. Strings that look like numbers are accepted
//! for numeric fields, since HTML forms submit everything as text.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::engine::input::{parse_flag, split_list, InputSet, InputValue};
use crate::errors::FieldError;

/// ISO date format accepted by [`FieldKind::Date`]
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shape and constraints of one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Real number in `[min, max]`
    Number { min: f64, max: f64 },
    /// Whole number in `[min, max]`
    Integer { min: i64, max: i64 },
    /// One tag out of a fixed list
    Choice { options: &'static [&'static str] },
    /// Zero or more distinct tags out of a fixed list
    ChoiceList {
        options: &'static [&'static str],
        min_items: usize,
    },
    /// Boolean
    Flag,
    /// Calendar date, `YYYY-MM-DD`
    Date,
}

/// Declaration of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

impl FieldSpec {
    const fn base(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            label,
            kind,
            required: true,
            unit: None,
        }
    }

    pub const fn number(name: &'static str, label: &'static str, min: f64, max: f64) -> Self {
        Self::base(name, label, FieldKind::Number { min, max })
    }

    pub const fn integer(name: &'static str, label: &'static str, min: i64, max: i64) -> Self {
        Self::base(name, label, FieldKind::Integer { min, max })
    }

    pub const fn choice(name: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self::base(name, label, FieldKind::Choice { options })
    }

    pub const fn choice_list(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        min_items: usize,
    ) -> Self {
        Self::base(name, label, FieldKind::ChoiceList { options, min_items })
    }

    pub const fn flag(name: &'static str, label: &'static str) -> Self {
        Self::base(name, label, FieldKind::Flag)
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self::base(name, label, FieldKind::Date)
    }

    /// Mark the field optional (the typed input supplies a default)
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Option tags for choice fields, empty otherwise
    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Choice { options } | FieldKind::ChoiceList { options, .. } => options,
            _ => &[],
        }
    }
}

/// Outcome of validating an [`InputSet`] against a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Failing fields, in schema order
    pub errors: Vec<FieldError>,
    /// Normalized values of the fields that passed
    pub values: Map<String, Value>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error for a given field, if it failed
    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Whether a field passed. Absent optional fields count as passing.
    pub fn passed(&self, field: &str) -> bool {
        self.error_for(field).is_none()
    }
}

/// Validate raw input against a schema.
///
/// Fields not named in the schema are ignored.
///
/// ```rust
/// use gauge_core::engine::{validate, FieldSpec, InputSet};
/// use gauge_core::errors::FieldErrorKind;
///
/// const SCHEMA: &[FieldSpec] = &[FieldSpec::number("height_cm", "Height", 50.0, 272.0)];
///
/// let report = validate(SCHEMA, &InputSet::new().with("height_cm", 0.0));
/// assert_eq!(report.errors[0].kind, FieldErrorKind::Range);
/// ```
pub fn validate(schema: &[FieldSpec], input: &InputSet) -> ValidationReport {
    let mut report = ValidationReport::default();

    for spec in schema {
        match input.get(spec.name) {
            None if spec.required => report.errors.push(FieldError::required(spec.name)),
            None => {}
            Some(value) => match check_field(spec, value) {
                Ok(normalized) => {
                    report.values.insert(spec.name.to_string(), normalized);
                }
                Err(error) => report.errors.push(error),
            },
        }
    }

    report
}

/// Check a single present value and normalize it to the JSON shape the
/// typed input expects.
pub fn check_field(spec: &FieldSpec, value: &InputValue) -> Result<Value, FieldError> {
    match spec.kind {
        FieldKind::Number { min, max } => {
            let n = numeric(spec, value)?;
            in_bounds(spec, n, min, max)?;
            Ok(Value::from(n))
        }
        FieldKind::Integer { min, max } => {
            let n = numeric(spec, value)?;
            if n.fract() != 0.0 {
                return Err(FieldError::invalid_type(
                    spec.name,
                    format!("{} must be a whole number", spec.label),
                ));
            }
            in_bounds(spec, n, min as f64, max as f64)?;
            Ok(Value::from(n as i64))
        }
        FieldKind::Choice { options } => {
            let InputValue::Text(tag) = value else {
                return Err(wrong_shape(spec, value, "one of the listed options"));
            };
            let tag = tag.trim();
            if options.contains(&tag) {
                Ok(Value::from(tag))
            } else {
                Err(unknown_option(spec, tag, options))
            }
        }
        FieldKind::ChoiceList { options, min_items } => {
            let items = match value {
                InputValue::List(items) => items.clone(),
                InputValue::Text(raw) => split_list(raw),
                other => return Err(wrong_shape(spec, other, "a list of options")),
            };
            let mut seen: Vec<&str> = Vec::with_capacity(items.len());
            for item in &items {
                let item = item.trim();
                if !options.contains(&item) {
                    return Err(unknown_option(spec, item, options));
                }
                if seen.contains(&item) {
                    return Err(FieldError::invalid_option(
                        spec.name,
                        format!("'{}' is listed more than once", item),
                    ));
                }
                seen.push(item);
            }
            if seen.len() < min_items {
                return Err(FieldError::new(
                    spec.name,
                    crate::errors::FieldErrorKind::Required,
                    format!("Select at least {} option(s) for {}", min_items, spec.label),
                ));
            }
            Ok(Value::from(seen))
        }
        FieldKind::Flag => match value {
            InputValue::Bool(b) => Ok(Value::from(*b)),
            InputValue::Text(raw) => parse_flag(raw)
                .map(Value::from)
                .ok_or_else(|| wrong_shape(spec, value, "yes or no")),
            other => Err(wrong_shape(spec, other, "yes or no")),
        },
        FieldKind::Date => {
            let InputValue::Text(raw) = value else {
                return Err(wrong_shape(spec, value, "a date (YYYY-MM-DD)"));
            };
            NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map(|date| Value::from(date.format(DATE_FORMAT).to_string()))
                .map_err(|_| {
                    FieldError::invalid_type(
                        spec.name,
                        format!("{} must be a date in YYYY-MM-DD form", spec.label),
                    )
                })
        }
    }
}

fn numeric(spec: &FieldSpec, value: &InputValue) -> Result<f64, FieldError> {
    match value {
        InputValue::Number(n) => Ok(*n),
        InputValue::Text(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| wrong_shape(spec, value, "a number")),
        other => Err(wrong_shape(spec, other, "a number")),
    }
}

fn in_bounds(spec: &FieldSpec, n: f64, min: f64, max: f64) -> Result<(), FieldError> {
    // NaN fails both comparisons
    if n >= min && n <= max {
        return Ok(());
    }
    let unit = spec.unit.map(|u| format!(" {}", u)).unwrap_or_default();
    Err(FieldError::range(
        spec.name,
        format!("{} must be between {}{} and {}{}", spec.label, min, unit, max, unit),
    ))
}

fn wrong_shape(spec: &FieldSpec, value: &InputValue, expected: &str) -> FieldError {
    FieldError::invalid_type(
        spec.name,
        format!("{} must be {} (got {})", spec.label, expected, value.shape()),
    )
}

fn unknown_option(spec: &FieldSpec, tag: &str, options: &[&str]) -> FieldError {
    FieldError::invalid_option(
        spec.name,
        format!("Unknown option '{}'; expected one of: {}", tag, options.join(", ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldErrorKind;
    use serde_json::json;

    const SCHEMA: &[FieldSpec] = &[
        FieldSpec::integer("age", "Age", 0, 120).with_unit("years"),
        FieldSpec::number("height_cm", "Height", 50.0, 272.0).with_unit("cm"),
        FieldSpec::choice("sex", "Sex", &["male", "female"]),
        FieldSpec::choice_list("areas", "Areas", &["forehead", "chin"], 1),
        FieldSpec::flag("smoker", "Smoker").optional(),
        FieldSpec::date("last_period", "Last period").optional(),
    ];

    fn valid_set() -> InputSet {
        InputSet::new()
            .with("age", 30)
            .with("height_cm", 180.0)
            .with("sex", "male")
            .with("areas", vec!["forehead"])
    }

    #[test]
    fn test_valid_input_normalizes() {
        let report = validate(SCHEMA, &valid_set());
        assert!(report.is_valid());
        assert_eq!(report.values["age"], json!(30));
        assert_eq!(report.values["sex"], json!("male"));
        assert_eq!(report.values["areas"], json!(["forehead"]));
        assert!(!report.values.contains_key("smoker"));
    }

    #[test]
    fn test_missing_required() {
        let mut set = valid_set();
        set.remove("sex");
        let report = validate(SCHEMA, &set);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, FieldErrorKind::Required);
        assert!(!report.passed("sex"));
        assert!(report.passed("age"));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let report = validate(SCHEMA, &valid_set().with("height_cm", 50.0));
        assert!(report.is_valid());
        let report = validate(SCHEMA, &valid_set().with("height_cm", 272.0));
        assert!(report.is_valid());

        let report = validate(SCHEMA, &valid_set().with("height_cm", 49.9));
        let err = report.error_for("height_cm").unwrap();
        assert_eq!(err.kind, FieldErrorKind::Range);
        assert_eq!(err.message, "Height must be between 50 cm and 272 cm");
    }

    #[test]
    fn test_nan_is_out_of_range() {
        let report = validate(SCHEMA, &valid_set().with("height_cm", f64::NAN));
        assert_eq!(report.error_for("height_cm").unwrap().kind, FieldErrorKind::Range);
    }

    #[test]
    fn test_numeric_text_accepted() {
        let report = validate(SCHEMA, &valid_set().with("height_cm", " 175.5 "));
        assert!(report.is_valid());
        assert_eq!(report.values["height_cm"], json!(175.5));
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let report = validate(SCHEMA, &valid_set().with("age", 30.5));
        assert_eq!(report.error_for("age").unwrap().kind, FieldErrorKind::InvalidType);
    }

    #[test]
    fn test_unknown_option() {
        let report = validate(SCHEMA, &valid_set().with("sex", "other"));
        let err = report.error_for("sex").unwrap();
        assert_eq!(err.kind, FieldErrorKind::InvalidOption);
        assert!(err.message.contains("male, female"));
    }

    #[test]
    fn test_choice_list_rules() {
        let report = validate(SCHEMA, &valid_set().with("areas", Vec::<String>::new()));
        assert_eq!(report.error_for("areas").unwrap().kind, FieldErrorKind::Required);

        let report = validate(SCHEMA, &valid_set().with("areas", vec!["chin", "chin"]));
        assert_eq!(report.error_for("areas").unwrap().kind, FieldErrorKind::InvalidOption);

        let report = validate(SCHEMA, &valid_set().with("areas", "forehead,chin"));
        assert_eq!(report.values["areas"], json!(["forehead", "chin"]));
    }

    #[test]
    fn test_flag_and_date() {
        let report = validate(
            SCHEMA,
            &valid_set().with("smoker", "no").with("last_period", "2026-03-01"),
        );
        assert!(report.is_valid());
        assert_eq!(report.values["smoker"], json!(false));
        assert_eq!(report.values["last_period"], json!("2026-03-01"));

        let report = validate(SCHEMA, &valid_set().with("last_period", "03/01/2026"));
        assert_eq!(report.error_for("last_period").unwrap().kind, FieldErrorKind::InvalidType);
    }

    #[test]
    fn test_reports_every_failure() {
        let report = validate(SCHEMA, &InputSet::new().with("age", 500));
        let fields: Vec<_> = report.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["age", "height_cm", "sex", "areas"]);
    }

    #[test]
    fn test_schema_serializes() {
        let json = serde_json::to_value(SCHEMA[2]).unwrap();
        assert_eq!(json["kind"]["type"], "choice");
        assert_eq!(json["kind"]["options"], json!(["male", "female"]));
    }
}
