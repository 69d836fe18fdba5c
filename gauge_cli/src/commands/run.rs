//! Run command implementation.
//!
//! Input is layered: defaults (with `--defaults`), then the JSON input file,
//! then `--set` assignments. Later layers win per field. The merged set goes
//! through the same validate/estimate/present pipeline a form submit does.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use gauge_core::calculators::CalculatorKind;
use gauge_core::engine::InputSet;
use gauge_core::errors::CalcResult;
use gauge_core::settings::Settings;
use serde_json::Value;

use crate::display;

pub(crate) struct RunOptions {
    pub(crate) input: Option<PathBuf>,
    pub(crate) assignments: Vec<String>,
    pub(crate) start_from_defaults: bool,
    pub(crate) json: bool,
}

pub(crate) fn run(id: &str, options: &RunOptions, settings: &Settings) -> Result<()> {
    let kind = CalculatorKind::from_id(id)?;

    let document = options.input.as_deref().map(read_document).transpose()?;
    let outcome = assemble_input(kind, document, options).and_then(|input| {
        tracing::debug!(calculator = %kind, fields = input.len(), "assembled input");
        kind.evaluate(&input, settings)
    });

    match outcome {
        Ok(report) => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                display::print_report(&report.presented);
            }
            Ok(())
        }
        Err(err) if !err.field_errors().is_empty() => {
            if options.json {
                println!("{}", serde_json::to_string_pretty(&err)?);
            } else {
                display::print_field_errors(err.field_errors());
            }
            bail!("{} rejected {} field(s)", kind, err.field_errors().len())
        }
        Err(err) => Err(err.into()),
    }
}

fn assemble_input(kind: CalculatorKind, document: Option<Value>, options: &RunOptions) -> CalcResult<InputSet> {
    let mut input = if options.start_from_defaults {
        kind.defaults()?
    } else {
        InputSet::new()
    };

    if let Some(document) = document {
        input.merge(InputSet::from_json(document)?);
    }

    input.merge(InputSet::parse_assignments(kind.schema(), &options.assignments)?);
    Ok(input)
}

/// Read a JSON document from a file, or from stdin for `-`.
fn read_document(path: &Path) -> Result<Value> {
    let source = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read input from stdin")?;
        buffer
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&source).with_context(|| format!("{} is not valid JSON", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::engine::InputValue;
    use serde_json::json;

    fn options(start_from_defaults: bool, assignments: &[&str]) -> RunOptions {
        RunOptions {
            input: None,
            assignments: assignments.iter().map(|a| a.to_string()).collect(),
            start_from_defaults,
            json: false,
        }
    }

    #[test]
    fn test_assignment_overrides_defaults() {
        let input = assemble_input(CalculatorKind::Bmi, None, &options(true, &["weight_kg=80"])).unwrap();
        assert_eq!(input.get("weight_kg"), Some(&InputValue::Number(80.0)));
        assert_eq!(input.get("height_cm"), Some(&InputValue::Number(170.0)));
    }

    #[test]
    fn test_layers_apply_in_order() {
        let document = json!({ "height_cm": 180.0, "weight_kg": 90.0 });
        let input = assemble_input(CalculatorKind::Bmi, Some(document), &options(true, &["weight_kg=75"])).unwrap();
        // document beats defaults, assignment beats document
        assert_eq!(input.get("height_cm"), Some(&InputValue::Number(180.0)));
        assert_eq!(input.get("weight_kg"), Some(&InputValue::Number(75.0)));
    }

    #[test]
    fn test_without_defaults_only_given_fields() {
        let input = assemble_input(CalculatorKind::Bmi, None, &options(false, &["height_cm=180"])).unwrap();
        assert_eq!(input.len(), 1);
        assert!(!input.contains("weight_kg"));
    }

    #[test]
    fn test_life_expectancy_exercise_assignment() {
        let input = assemble_input(CalculatorKind::LifeExpectancy, None, &options(true, &["exercise_days=5"])).unwrap();
        assert_eq!(input.get("exercise_days"), Some(&InputValue::Number(5.0)));
        assert!(CalculatorKind::LifeExpectancy.evaluate(&input, &Settings::default()).is_ok());
    }

    #[test]
    fn test_unknown_assignment_is_rejected() {
        let err = assemble_input(CalculatorKind::Bmi, None, &options(true, &["exercise=daily"])).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "exercise");
    }
}
