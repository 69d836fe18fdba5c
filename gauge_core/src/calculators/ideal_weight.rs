//! # Ideal Body Weight
//!
//! Four published formulas, each linear in height over five feet, all
//! scaled by a frame-size factor. The result lists every formula's value
//! plus the min / max / mean across them, and the BMI-based healthy range
//! for comparison.

use serde::{Deserialize, Serialize};

use crate::calculators::bmi::healthy_weight_range;
use crate::calculators::common::Sex;
use crate::engine::present::{weight, weight_range};
use crate::engine::{Calculator, FieldSpec, NamedEstimate, PresentedResult, Range, Spread};
use crate::formulas::Formula;
use crate::settings::Settings;
use crate::units::cm_to_inch;

choice_enum! {
    pub enum Frame {
        Small => "small", "Small";
        Medium => "medium", "Medium";
        Large => "large", "Large";
    }
}

impl Frame {
    pub fn factor(self) -> f64 {
        match self {
            Frame::Small => 0.9,
            Frame::Medium => 1.0,
            Frame::Large => 1.1,
        }
    }
}

choice_enum! {
    pub enum IbwFormula {
        Robinson => "robinson", "Robinson (1983)";
        Miller => "miller", "Miller (1983)";
        Devine => "devine", "Devine (1974)";
        Hamwi => "hamwi", "Hamwi (1964)";
    }
}

impl IbwFormula {
    /// `(kg at 60 in, kg per inch over 60)`
    pub fn coefficients(self, sex: Sex) -> (f64, f64) {
        match (self, sex) {
            (IbwFormula::Robinson, Sex::Male) => (52.0, 1.9),
            (IbwFormula::Robinson, Sex::Female) => (49.0, 1.7),
            (IbwFormula::Miller, Sex::Male) => (56.2, 1.41),
            (IbwFormula::Miller, Sex::Female) => (53.1, 1.36),
            (IbwFormula::Devine, Sex::Male) => (50.0, 2.3),
            (IbwFormula::Devine, Sex::Female) => (45.5, 2.3),
            (IbwFormula::Hamwi, Sex::Male) => (48.0, 2.7),
            (IbwFormula::Hamwi, Sex::Female) => (45.5, 2.2),
        }
    }

    pub fn formula(self) -> Formula {
        match self {
            IbwFormula::Robinson => Formula::IbwRobinson,
            IbwFormula::Miller => Formula::IbwMiller,
            IbwFormula::Devine => Formula::IbwDevine,
            IbwFormula::Hamwi => Formula::IbwHamwi,
        }
    }
}

/// Unscaled ideal weight in kg. Heights under 60 in extrapolate linearly.
pub fn ideal_weight_kg(formula: IbwFormula, sex: Sex, height_in: f64) -> f64 {
    let (base, per_inch) = formula.coefficients(sex);
    base + per_inch * (height_in - 60.0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdealWeightInput {
    pub sex: Sex,
    pub height_cm: f64,
    pub frame: Frame,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealWeightOutput {
    /// One entry per formula, frame factor applied
    pub estimates: Vec<NamedEstimate>,
    pub spread: Spread,
    pub healthy_weight_kg: Range,
}

pub struct IdealWeightCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::choice("sex", "Sex", Sex::TAGS),
    FieldSpec::number("height_cm", "Height", 120.0, 250.0).with_unit("cm"),
    FieldSpec::choice("frame", "Frame size", Frame::TAGS),
];

impl Calculator for IdealWeightCalculator {
    const ID: &'static str = "ideal_weight";
    const TITLE: &'static str = "Ideal Weight Calculator";

    type Input = IdealWeightInput;
    type Output = IdealWeightOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> IdealWeightInput {
        IdealWeightInput {
            sex: Sex::Male,
            height_cm: 175.0,
            frame: Frame::Medium,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[
            Formula::IbwRobinson,
            Formula::IbwMiller,
            Formula::IbwDevine,
            Formula::IbwHamwi,
            Formula::HealthyWeightRange,
        ]
    }

    fn estimate(input: &IdealWeightInput) -> IdealWeightOutput {
        let height_in = cm_to_inch(input.height_cm);
        let frame = input.frame.factor();

        let estimates: Vec<NamedEstimate> = IbwFormula::ALL
            .iter()
            .map(|f| NamedEstimate::new(f.label(), ideal_weight_kg(*f, input.sex, height_in) * frame))
            .collect();
        // IbwFormula::ALL is never empty
        let spread = Spread::of(&estimates).unwrap_or_default();

        IdealWeightOutput {
            estimates,
            spread,
            healthy_weight_kg: healthy_weight_range(input.height_cm),
        }
    }

    fn present(output: &IdealWeightOutput, settings: &Settings) -> PresentedResult {
        let spread = output.spread;
        let mut presented = PresentedResult::new(Self::ID, Self::TITLE, weight(spread.mean, settings));

        for (formula, estimate) in IbwFormula::ALL.iter().zip(&output.estimates) {
            presented = presented.line(formula.tag(), estimate.name.clone(), weight(estimate.value, settings));
        }

        presented
            .line("range", "Formula range", weight_range(spread.min, spread.max, settings))
            .line("average", "Average", weight(spread.mean, settings))
            .line(
                "healthy_weight",
                "Healthy BMI range",
                weight_range(output.healthy_weight_kg.low, output.healthy_weight_kg.high, settings),
            )
            .note("Formulas were derived for adults; they ignore muscle mass and age")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate_defaults;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn value(output: &IdealWeightOutput, formula: IbwFormula) -> f64 {
        output
            .estimates
            .iter()
            .find(|e| e.name == formula.label())
            .map(|e| e.value)
            .unwrap()
    }

    #[test]
    fn test_male_180cm() {
        let output = IdealWeightCalculator::estimate(&IdealWeightInput {
            sex: Sex::Male,
            height_cm: 180.0,
            frame: Frame::Medium,
        });
        assert_eq!(output.estimates.len(), 4);
        assert_relative_eq!(value(&output, IbwFormula::Robinson), 72.646, epsilon = 0.001);
        assert_relative_eq!(value(&output, IbwFormula::Miller), 71.521, epsilon = 0.001);
        assert_relative_eq!(value(&output, IbwFormula::Devine), 74.992, epsilon = 0.001);
        assert_relative_eq!(value(&output, IbwFormula::Hamwi), 77.339, epsilon = 0.001);
        assert_relative_eq!(output.spread.min, 71.521, epsilon = 0.001);
        assert_relative_eq!(output.spread.max, 77.339, epsilon = 0.001);
        assert_relative_eq!(output.spread.mean, 74.124, epsilon = 0.001);
    }

    #[test]
    fn test_five_feet_gives_base_values() {
        let height_cm = 60.0 * 2.54;
        for formula in IbwFormula::ALL {
            let (base, _) = formula.coefficients(Sex::Female);
            assert_relative_eq!(ideal_weight_kg(*formula, Sex::Female, cm_to_inch(height_cm)), base, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_frame_scales_every_formula() {
        let medium = IdealWeightCalculator::estimate(&IdealWeightCalculator::defaults());
        let large = IdealWeightCalculator::estimate(&IdealWeightInput {
            frame: Frame::Large,
            ..IdealWeightCalculator::defaults()
        });
        for (m, l) in medium.estimates.iter().zip(&large.estimates) {
            assert_relative_eq!(l.value, m.value * 1.1, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_every_formula_is_registered() {
        for formula in IbwFormula::ALL {
            assert!(IdealWeightCalculator::formulas().contains(&formula.formula()));
        }
    }

    #[test]
    fn test_presented() {
        let presented = evaluate_defaults::<IdealWeightCalculator>(&Settings::default())
            .unwrap()
            .presented;
        assert!(presented.value_of("devine").is_some());
        assert!(presented.headline.ends_with(" kg"));
        assert_eq!(presented.lines.len(), 7);
    }

    proptest! {
        #[test]
        fn mean_is_between_min_and_max(
            sex in prop::sample::select(Sex::ALL.to_vec()),
            frame in prop::sample::select(Frame::ALL.to_vec()),
            height_cm in 120.0f64..=250.0,
        ) {
            let output = IdealWeightCalculator::estimate(&IdealWeightInput { sex, height_cm, frame });
            let spread = output.spread;
            prop_assert!(spread.min <= spread.mean + 1e-9);
            prop_assert!(spread.mean <= spread.max + 1e-9);

            let n = output.estimates.len();
            prop_assert_eq!(spread.count, n);
            let mean = output.estimates.iter().map(|e| e.value).sum::<f64>() / n as f64;
            prop_assert!((spread.mean - mean).abs() < 1e-9);
        }
    }
}
