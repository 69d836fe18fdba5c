//! # Estimation Engine
//!
//! Every calculator is an instance of one pipeline:
//!
//! ```text
//! InputSet --validate--> typed Input --estimate--> Output --present--> PresentedResult
//! ```
//!
//! - [`validate`] checks raw input against the calculator's [`FieldSpec`]s
//! - [`Calculator::estimate`] is a pure function of the typed input
//! - [`Calculator::present`] rounds and labels for display
//!
//! An invalid input set yields an error and no result at all. The same
//! [`evaluate`] path serves both the initial estimate from
//! [`Calculator::defaults`] and every later submission.
//!
//! ## Example
//!
//! ```rust
//! use gauge_core::calculators::bmi::{BmiCalculator, BmiInput};
//! use gauge_core::engine::{calculate, evaluate, InputSet};
//! use gauge_core::settings::Settings;
//!
//! // Typed API
//! let output = calculate::<BmiCalculator>(&BmiInput { height_cm: 180.0, weight_kg: 75.0 }).unwrap();
//! assert!((output.bmi - 23.148).abs() < 0.001);
//!
//! // Raw form input
//! let set = InputSet::new().with("height_cm", "180").with("weight_kg", 75.0);
//! let evaluation = evaluate::<BmiCalculator>(&set, &Settings::default()).unwrap();
//! assert_eq!(evaluation.presented.headline, "23.1");
//! ```

pub mod input;
pub mod present;
pub mod table;
pub mod validate;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CalcError, CalcResult, FieldError};
use crate::formulas::Formula;
use crate::settings::Settings;

pub use input::{InputSet, InputValue};
pub use present::{Comparison, PresentedLine, PresentedResult};
pub use table::{Bound, NamedEstimate, Range, Spread, StepTable};
pub use validate::{validate, FieldKind, FieldSpec, ValidationReport};

/// One calculator: schema, formula tables, estimator and presenter.
pub trait Calculator {
    /// Stable identifier, e.g. `"bmi"`
    const ID: &'static str;
    /// Page title
    const TITLE: &'static str;

    /// Typed input, deserialized from a validated [`InputSet`]
    type Input: Serialize + DeserializeOwned + Clone + Debug;
    /// Estimate produced by [`Calculator::estimate`]
    type Output: Serialize + Clone + Debug + PartialEq;

    /// Declared fields, in form order
    fn schema() -> &'static [FieldSpec];

    /// Input used for the estimate shown before the first submission
    fn defaults() -> Self::Input;

    /// Formulas this calculator applies
    fn formulas() -> &'static [Formula] {
        &[]
    }

    /// Rules that span several fields. Runs only after per-field validation passed.
    fn cross_check(_input: &Self::Input) -> Vec<FieldError> {
        Vec::new()
    }

    /// Pure estimate. Assumes validated input.
    fn estimate(input: &Self::Input) -> Self::Output;

    /// Display-ready view of an estimate
    fn present(output: &Self::Output, settings: &Settings) -> PresentedResult;
}

/// Result of running the whole pipeline once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation<O> {
    pub calculator: String,
    pub result: O,
    pub presented: PresentedResult,
}

/// Validate raw input and decode it into the calculator's typed input.
pub fn decode<C: Calculator>(input: &InputSet) -> CalcResult<C::Input> {
    let report = validate(C::schema(), input);
    if !report.is_valid() {
        tracing::debug!(
            calculator = C::ID,
            failures = report.errors.len(),
            "input rejected by validation"
        );
        return Err(CalcError::validation(report.errors));
    }

    let typed: C::Input = serde_json::from_value(Value::Object(report.values)).map_err(|e| CalcError::Internal {
        message: format!("validated input for '{}' did not decode: {}", C::ID, e),
    })?;

    let errors = C::cross_check(&typed);
    if !errors.is_empty() {
        tracing::debug!(calculator = C::ID, failures = errors.len(), "input rejected by cross-field rules");
        return Err(CalcError::validation(errors));
    }

    Ok(typed)
}

/// Typed entry point: validate a typed input, then estimate.
pub fn calculate<C: Calculator>(input: &C::Input) -> CalcResult<C::Output> {
    let raw = InputSet::from_typed(input)?;
    let typed = decode::<C>(&raw)?;
    Ok(C::estimate(&typed))
}

/// Full pipeline from raw input to a presented result.
pub fn evaluate<C: Calculator>(input: &InputSet, settings: &Settings) -> CalcResult<Evaluation<C::Output>> {
    tracing::debug!(calculator = C::ID, fields = input.len(), "evaluating");
    let typed = decode::<C>(input)?;
    let result = C::estimate(&typed);

    let mut presented = C::present(&result, settings);
    if settings.show_formulas {
        presented.formulas = C::formulas().iter().map(|f| f.metadata().name.to_string()).collect();
    }

    Ok(Evaluation {
        calculator: C::ID.to_string(),
        result,
        presented,
    })
}

/// Estimate from the calculator's default input (first render).
pub fn evaluate_defaults<C: Calculator>(settings: &Settings) -> CalcResult<Evaluation<C::Output>> {
    evaluate::<C>(&InputSet::from_typed(&C::defaults())?, settings)
}
