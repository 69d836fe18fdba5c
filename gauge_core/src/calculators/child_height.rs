//! # Child Height Predictor
//!
//! Mid-parental height: the average of both parents' heights, shifted by
//! 6.5 cm toward the child's sex, with a ±8.5 cm target range.

use serde::{Deserialize, Serialize};

use crate::calculators::common::Sex;
use crate::engine::present::{height, height_range};
use crate::engine::{Calculator, FieldSpec, PresentedResult, Range};
use crate::formulas::Formula;
use crate::settings::Settings;

/// Half-width of the target range, cm
pub const TARGET_RANGE_CM: f64 = 8.5;

/// Average male/female adult height difference, cm
pub const SEX_DIFFERENCE_CM: f64 = 13.0;

pub fn mid_parental_height(father_cm: f64, mother_cm: f64, child: Sex) -> f64 {
    let shift = match child {
        Sex::Male => SEX_DIFFERENCE_CM,
        Sex::Female => -SEX_DIFFERENCE_CM,
    };
    (father_cm + mother_cm + shift) / 2.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildHeightInput {
    pub father_height_cm: f64,
    pub mother_height_cm: f64,
    pub child_sex: Sex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildHeightOutput {
    pub predicted_cm: f64,
    pub range_cm: Range,
}

pub struct ChildHeightCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::number("father_height_cm", "Father's height", 120.0, 230.0).with_unit("cm"),
    FieldSpec::number("mother_height_cm", "Mother's height", 120.0, 230.0).with_unit("cm"),
    FieldSpec::choice("child_sex", "Child's sex", Sex::TAGS),
];

impl Calculator for ChildHeightCalculator {
    const ID: &'static str = "child_height";
    const TITLE: &'static str = "Child Height Predictor";

    type Input = ChildHeightInput;
    type Output = ChildHeightOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> ChildHeightInput {
        ChildHeightInput {
            father_height_cm: 178.0,
            mother_height_cm: 165.0,
            child_sex: Sex::Male,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::MidParentalHeight]
    }

    fn estimate(input: &ChildHeightInput) -> ChildHeightOutput {
        let predicted_cm = mid_parental_height(input.father_height_cm, input.mother_height_cm, input.child_sex);
        ChildHeightOutput {
            predicted_cm,
            range_cm: Range::new(predicted_cm - TARGET_RANGE_CM, predicted_cm + TARGET_RANGE_CM),
        }
    }

    fn present(output: &ChildHeightOutput, settings: &Settings) -> PresentedResult {
        PresentedResult::new(Self::ID, Self::TITLE, height(output.predicted_cm, settings))
            .line("predicted", "Predicted adult height", height(output.predicted_cm, settings))
            .line(
                "range",
                "Likely range",
                height_range(output.range_cm.low, output.range_cm.high, settings),
            )
            .note("Most children finish within 8.5 cm of the mid-parental height")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{calculate, evaluate_defaults};
    use crate::settings::UnitSystem;
    use approx::assert_relative_eq;

    #[test]
    fn test_boy_and_girl() {
        assert_relative_eq!(mid_parental_height(180.0, 165.0, Sex::Male), 179.0);
        assert_relative_eq!(mid_parental_height(180.0, 165.0, Sex::Female), 166.0);
    }

    #[test]
    fn test_range() {
        let output = calculate::<ChildHeightCalculator>(&ChildHeightInput {
            father_height_cm: 180.0,
            mother_height_cm: 165.0,
            child_sex: Sex::Female,
        })
        .unwrap();
        assert_relative_eq!(output.range_cm.low, 157.5);
        assert_relative_eq!(output.range_cm.high, 174.5);
        assert_relative_eq!(output.range_cm.midpoint(), output.predicted_cm);
    }

    #[test]
    fn test_presented_metric_and_imperial() {
        let presented = evaluate_defaults::<ChildHeightCalculator>(&Settings::default())
            .unwrap()
            .presented;
        // (178 + 165 + 13) / 2 = 178
        assert_eq!(presented.headline, "178.0 cm");
        assert_eq!(presented.value_of("range"), Some("169.5 - 186.5 cm"));

        let imperial = Settings::default().with_unit_system(UnitSystem::Imperial);
        let presented = evaluate_defaults::<ChildHeightCalculator>(&imperial).unwrap().presented;
        assert_eq!(presented.headline, "5 ft 10 in");
    }
}
