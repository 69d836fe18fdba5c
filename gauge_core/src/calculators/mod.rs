//! # Calculators
//!
//! Every calculator is an implementation of [`Calculator`]. This module also
//! holds the [`CalculatorKind`] catalog, which lets callers that only know a
//! calculator's id (the CLI, a web handler) list, describe and run it with
//! loosely-typed input and JSON output.
//!
//! ## Available Calculators
//!
//! | Id | Model |
//! |----|-------|
//! | `life_expectancy` | Weighted sum over a demographic baseline |
//! | `bmi` | Banded classification |
//! | `bmr_tdee` | Multiplicative adjustment |
//! | `ideal_weight` | Multi-formula average |
//! | `child_height` | Mid-parental formula |
//! | `fertility` | Date arithmetic |
//! | `retirement` | Compound growth |
//! | `implant_size` | Multi-formula average |
//! | `vitamin_d` | Multiplicative adjustment with cap |
//! | `botox_cost` | Cost-range blending |
//! | `dental_implant_cost` | Cost-range blending |
//! | `glp1_weight_loss` | Multiplicative adjustment |
//! | `creatine_water` | Multiplicative adjustment |
//!
//! ## Example
//!
//! ```rust
//! use gauge_core::calculators::CalculatorKind;
//! use gauge_core::settings::Settings;
//!
//! let kind = CalculatorKind::from_id("bmi").unwrap();
//! let input = kind.defaults().unwrap().with("weight_kg", 80.0);
//! let report = kind.evaluate(&input, &Settings::default()).unwrap();
//! assert_eq!(report.result["category"], "overweight");
//! ```

pub mod bmi;
pub mod bmr_tdee;
pub mod botox_cost;
pub mod child_height;
pub mod common;
pub mod creatine_water;
pub mod dental_implant_cost;
pub mod fertility;
pub mod glp1_weight_loss;
pub mod ideal_weight;
pub mod implant_size;
pub mod life_expectancy;
pub mod retirement;
pub mod vitamin_d;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{self, Calculator, FieldSpec, InputSet, PresentedResult};
use crate::errors::{CalcError, CalcResult};
use crate::formulas::Formula;
use crate::settings::Settings;

/// Every calculator in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    LifeExpectancy,
    Bmi,
    BmrTdee,
    IdealWeight,
    ChildHeight,
    Fertility,
    Retirement,
    ImplantSize,
    VitaminD,
    BotoxCost,
    DentalImplantCost,
    Glp1WeightLoss,
    CreatineWater,
}

/// Run `$body` with `$c` bound to the calculator type for `$kind`.
macro_rules! dispatch {
    ($kind:expr, $c:ident => $body:expr) => {
        match $kind {
            CalculatorKind::LifeExpectancy => {
                type $c = life_expectancy::LifeExpectancyCalculator;
                $body
            }
            CalculatorKind::Bmi => {
                type $c = bmi::BmiCalculator;
                $body
            }
            CalculatorKind::BmrTdee => {
                type $c = bmr_tdee::BmrTdeeCalculator;
                $body
            }
            CalculatorKind::IdealWeight => {
                type $c = ideal_weight::IdealWeightCalculator;
                $body
            }
            CalculatorKind::ChildHeight => {
                type $c = child_height::ChildHeightCalculator;
                $body
            }
            CalculatorKind::Fertility => {
                type $c = fertility::FertilityCalculator;
                $body
            }
            CalculatorKind::Retirement => {
                type $c = retirement::RetirementCalculator;
                $body
            }
            CalculatorKind::ImplantSize => {
                type $c = implant_size::ImplantSizeCalculator;
                $body
            }
            CalculatorKind::VitaminD => {
                type $c = vitamin_d::VitaminDCalculator;
                $body
            }
            CalculatorKind::BotoxCost => {
                type $c = botox_cost::BotoxCostCalculator;
                $body
            }
            CalculatorKind::DentalImplantCost => {
                type $c = dental_implant_cost::DentalImplantCostCalculator;
                $body
            }
            CalculatorKind::Glp1WeightLoss => {
                type $c = glp1_weight_loss::Glp1WeightLossCalculator;
                $body
            }
            CalculatorKind::CreatineWater => {
                type $c = creatine_water::CreatineWaterCalculator;
                $body
            }
        }
    };
}

static BY_ID: Lazy<HashMap<&'static str, CalculatorKind>> =
    Lazy::new(|| CalculatorKind::ALL.iter().map(|kind| (kind.id(), *kind)).collect());

/// Output of a catalog evaluation, with the typed result as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub calculator: String,
    pub title: String,
    pub result: Value,
    pub presented: PresentedResult,
}

/// Catalog entry, as listed by `gauge list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
    pub formulas: Vec<&'static str>,
}

impl CalculatorKind {
    pub const ALL: &'static [CalculatorKind] = &[
        CalculatorKind::LifeExpectancy,
        CalculatorKind::Bmi,
        CalculatorKind::BmrTdee,
        CalculatorKind::IdealWeight,
        CalculatorKind::ChildHeight,
        CalculatorKind::Fertility,
        CalculatorKind::Retirement,
        CalculatorKind::ImplantSize,
        CalculatorKind::VitaminD,
        CalculatorKind::BotoxCost,
        CalculatorKind::DentalImplantCost,
        CalculatorKind::Glp1WeightLoss,
        CalculatorKind::CreatineWater,
    ];

    /// Look up a calculator by its id
    pub fn from_id(id: &str) -> CalcResult<Self> {
        BY_ID
            .get(id.trim())
            .copied()
            .ok_or_else(|| CalcError::unknown_calculator(id))
    }

    pub fn id(self) -> &'static str {
        dispatch!(self, C => C::ID)
    }

    pub fn title(self) -> &'static str {
        dispatch!(self, C => C::TITLE)
    }

    pub fn schema(self) -> &'static [FieldSpec] {
        dispatch!(self, C => C::schema())
    }

    pub fn formulas(self) -> &'static [Formula] {
        dispatch!(self, C => C::formulas())
    }

    pub fn info(self) -> CalculatorInfo {
        CalculatorInfo {
            id: self.id(),
            title: self.title(),
            fields: self.schema(),
            formulas: self.formulas().iter().map(|f| f.metadata().name).collect(),
        }
    }

    /// Default input in raw form (what a form shows before the first submit)
    pub fn defaults(self) -> CalcResult<InputSet> {
        dispatch!(self, C => InputSet::from_typed(&C::defaults()))
    }

    /// Run the full pipeline on raw input.
    pub fn evaluate(self, input: &InputSet, settings: &Settings) -> CalcResult<Report> {
        dispatch!(self, C => {
            let evaluation = engine::evaluate::<C>(input, settings)?;
            Ok(Report {
                calculator: evaluation.calculator,
                title: C::TITLE.to_string(),
                result: serde_json::to_value(&evaluation.result)?,
                presented: evaluation.presented,
            })
        })
    }

    /// Estimate from the default input.
    pub fn evaluate_defaults(self, settings: &Settings) -> CalcResult<Report> {
        self.evaluate(&self.defaults()?, settings)
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FieldKind, InputValue};
    use crate::errors::FieldErrorKind;

    #[test]
    fn test_ids_are_unique_and_resolve() {
        assert_eq!(BY_ID.len(), CalculatorKind::ALL.len());
        for kind in CalculatorKind::ALL {
            assert_eq!(CalculatorKind::from_id(kind.id()).unwrap(), *kind);
            // serde name and id agree
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.id());
        }
        let err = CalculatorKind::from_id("horoscope").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
    }

    #[test]
    fn test_defaults_evaluate() {
        let settings = Settings::default();
        for kind in CalculatorKind::ALL {
            let report = kind
                .evaluate_defaults(&settings)
                .unwrap_or_else(|e| panic!("{} defaults failed: {}", kind, e));
            assert_eq!(report.calculator, kind.id());
            assert!(!report.presented.headline.is_empty());
            assert!(!report.presented.lines.is_empty());
            assert_eq!(report.presented.formulas.len(), kind.formulas().len());
        }
    }

    #[test]
    fn test_show_formulas_off() {
        let settings = Settings {
            show_formulas: false,
            ..Settings::default()
        };
        let report = CalculatorKind::Bmi.evaluate_defaults(&settings).unwrap();
        assert!(report.presented.formulas.is_empty());
    }

    #[test]
    fn test_every_calculator_lists_formulas() {
        for kind in CalculatorKind::ALL {
            assert!(!kind.formulas().is_empty(), "{}", kind);
            for formula in kind.formulas() {
                let source = formula.metadata().source_module;
                assert!(source.starts_with("calculators/"), "{:?}", formula);
            }
        }
    }

    #[test]
    fn test_defaults_cover_required_fields() {
        for kind in CalculatorKind::ALL {
            let defaults = kind.defaults().unwrap();
            for spec in kind.schema().iter().filter(|s| s.required) {
                assert!(defaults.contains(spec.name), "{}.{} has no default", kind, spec.name);
            }
        }
    }

    /// Every declared option of every choice field must decode into the typed
    /// input and reach a table entry. Cross-field rules may still reject a
    /// combination, but never with an option or decoding error.
    #[test]
    fn test_every_choice_option_is_handled() {
        let settings = Settings::default();
        for kind in CalculatorKind::ALL {
            let defaults = kind.defaults().unwrap();
            for spec in kind.schema() {
                let values: Vec<InputValue> = match spec.kind {
                    FieldKind::Choice { options } => options.iter().map(|o| InputValue::from(*o)).collect(),
                    FieldKind::ChoiceList { options, .. } => {
                        let mut values: Vec<InputValue> =
                            options.iter().map(|o| InputValue::from(vec![*o])).collect();
                        values.push(InputValue::from(options.to_vec()));
                        values
                    }
                    _ => continue,
                };

                for value in values {
                    let mut input = defaults.clone();
                    input.insert(spec.name, value.clone());
                    match kind.evaluate(&input, &settings) {
                        Ok(_) => {}
                        Err(err) => {
                            let kinds: Vec<_> = err.field_errors().iter().map(|e| e.kind).collect();
                            assert!(
                                !kinds.is_empty() && kinds.iter().all(|k| *k == FieldErrorKind::Constraint),
                                "{}.{} = {:?} failed: {}",
                                kind,
                                spec.name,
                                value,
                                err
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_missing_field_yields_no_result() {
        for kind in CalculatorKind::ALL {
            let mut input = kind.defaults().unwrap();
            let Some(spec) = kind.schema().iter().find(|s| s.required) else {
                continue;
            };
            input.remove(spec.name);
            let err = kind.evaluate(&input, &Settings::default()).unwrap_err();
            assert_eq!(err.field_errors()[0].field, spec.name);
            assert_eq!(err.field_errors()[0].kind, FieldErrorKind::Required);
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let settings = Settings::default();
        for kind in CalculatorKind::ALL {
            let first = kind.evaluate_defaults(&settings).unwrap();
            let second = kind.evaluate_defaults(&settings).unwrap();
            assert_eq!(first, second, "{}", kind);
        }
    }

    #[test]
    fn test_report_serializes() {
        let report = CalculatorKind::ChildHeight
            .evaluate_defaults(&Settings::default())
            .unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
