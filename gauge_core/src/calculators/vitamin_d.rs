//! # Vitamin D Intake
//!
//! Age-band RDA scaled by skin type, sun exposure and a BMI factor, then
//! capped at the age-band tolerable upper intake level.

use serde::{Deserialize, Serialize};

use crate::calculators::bmi::body_mass_index;
use crate::engine::present::{fixed, grouped};
use crate::engine::{Bound, Calculator, FieldSpec, PresentedResult, StepTable};
use crate::formulas::Formula;
use crate::settings::Settings;

choice_enum! {
    /// Fitzpatrick-style skin type
    pub enum SkinType {
        VeryFair => "very_fair", "Very fair";
        Fair => "fair", "Fair";
        Medium => "medium", "Medium";
        Olive => "olive", "Olive";
        Brown => "brown", "Brown";
        Dark => "dark", "Dark";
    }
}

impl SkinType {
    pub fn factor(self) -> f64 {
        match self {
            SkinType::VeryFair | SkinType::Fair => 1.0,
            SkinType::Medium => 1.1,
            SkinType::Olive => 1.2,
            SkinType::Brown => 1.35,
            SkinType::Dark => 1.5,
        }
    }
}

choice_enum! {
    pub enum SunExposure {
        Minimal => "minimal", "Minimal (mostly indoors)";
        Moderate => "moderate", "Moderate";
        High => "high", "High (outdoors daily)";
    }
}

impl SunExposure {
    pub fn factor(self) -> f64 {
        match self {
            SunExposure::Minimal => 1.5,
            SunExposure::Moderate => 1.0,
            SunExposure::High => 0.75,
        }
    }
}

/// RDA by age in years, IU/day
pub const BASE_IU: StepTable<f64> = StepTable::new(&[(Bound::Below(1.0), 400.0), (Bound::Below(71.0), 600.0)], 800.0);

/// Extra need with higher body fat
pub const BMI_FACTOR: StepTable<f64> = StepTable::new(&[(Bound::Below(30.0), 1.0), (Bound::Below(40.0), 1.5)], 2.0);

/// Tolerable upper intake level by age in years, IU/day
pub const UPPER_LIMIT_IU: StepTable<f64> = StepTable::new(
    &[
        (Bound::Below(1.0), 1000.0),
        (Bound::Below(4.0), 2500.0),
        (Bound::Below(9.0), 3000.0),
    ],
    4000.0,
);

pub const IU_PER_MCG: f64 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitaminDInput {
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub skin_type: SkinType,
    pub sun_exposure: SunExposure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitaminDOutput {
    pub base_iu: f64,
    pub skin_factor: f64,
    pub sun_factor: f64,
    pub bmi: f64,
    pub bmi_factor: f64,
    /// Before the upper-limit cap
    pub raw_iu: f64,
    pub upper_limit_iu: f64,
    pub recommended_iu: f64,
    pub recommended_mcg: f64,
    pub capped: bool,
}

pub struct VitaminDCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::integer("age", "Age", 0, 120).with_unit("years"),
    FieldSpec::number("weight_kg", "Weight", 2.0, 300.0).with_unit("kg"),
    FieldSpec::number("height_cm", "Height", 45.0, 250.0).with_unit("cm"),
    FieldSpec::choice("skin_type", "Skin type", SkinType::TAGS),
    FieldSpec::choice("sun_exposure", "Sun exposure", SunExposure::TAGS),
];

impl Calculator for VitaminDCalculator {
    const ID: &'static str = "vitamin_d";
    const TITLE: &'static str = "Vitamin D Calculator";

    type Input = VitaminDInput;
    type Output = VitaminDOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> VitaminDInput {
        VitaminDInput {
            age: 40,
            weight_kg: 70.0,
            height_cm: 175.0,
            skin_type: SkinType::Medium,
            sun_exposure: SunExposure::Moderate,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::VitaminDRequirement, Formula::BodyMassIndex]
    }

    fn estimate(input: &VitaminDInput) -> VitaminDOutput {
        let age = f64::from(input.age);
        let bmi = body_mass_index(input.height_cm, input.weight_kg);

        let base_iu = BASE_IU.lookup(age);
        let skin_factor = input.skin_type.factor();
        let sun_factor = input.sun_exposure.factor();
        let bmi_factor = BMI_FACTOR.lookup(bmi);
        let raw_iu = base_iu * skin_factor * sun_factor * bmi_factor;
        let upper_limit_iu = UPPER_LIMIT_IU.lookup(age);
        let recommended_iu = raw_iu.min(upper_limit_iu);

        VitaminDOutput {
            base_iu,
            skin_factor,
            sun_factor,
            bmi,
            bmi_factor,
            raw_iu,
            upper_limit_iu,
            recommended_iu,
            recommended_mcg: recommended_iu / IU_PER_MCG,
            capped: raw_iu > upper_limit_iu,
        }
    }

    fn present(output: &VitaminDOutput, _settings: &Settings) -> PresentedResult {
        let iu = |value: f64| format!("{} IU/day", grouped(value, 0));

        let presented = PresentedResult::new(Self::ID, Self::TITLE, iu(output.recommended_iu))
            .line("recommended_iu", "Recommended intake", iu(output.recommended_iu))
            .line("recommended_mcg", "In micrograms", format!("{} mcg/day", fixed(output.recommended_mcg, 1)))
            .line("base_iu", "RDA for age", iu(output.base_iu))
            .line("upper_limit_iu", "Upper limit", iu(output.upper_limit_iu));

        if output.capped {
            presented
                .label("limit", "Capped at upper limit")
                .note("Your adjusted need exceeds the safe upper limit; ask a doctor about testing your levels")
        } else {
            presented.label("limit", "Within upper limit")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate_defaults;
    use approx::assert_relative_eq;

    fn input(age: u32, weight_kg: f64, height_cm: f64, skin_type: SkinType, sun_exposure: SunExposure) -> VitaminDInput {
        VitaminDInput {
            age,
            weight_kg,
            height_cm,
            skin_type,
            sun_exposure,
        }
    }

    #[test]
    fn test_default_adult() {
        let output = VitaminDCalculator::estimate(&VitaminDCalculator::defaults());
        assert_eq!(output.base_iu, 600.0);
        assert_eq!(output.bmi_factor, 1.0);
        assert_relative_eq!(output.recommended_iu, 660.0, epsilon = 1e-9);
        assert_relative_eq!(output.recommended_mcg, 16.5, epsilon = 1e-9);
        assert!(!output.capped);
    }

    #[test]
    fn test_all_factors_multiply() {
        // BMI 35.0 -> factor 1.5
        let output = VitaminDCalculator::estimate(&input(50, 87.5, 158.114, SkinType::Dark, SunExposure::Minimal));
        assert_eq!(output.bmi_factor, 1.5);
        assert_relative_eq!(output.recommended_iu, 600.0 * 1.5 * 1.5 * 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_upper_limit_caps() {
        // Age 2, BMI 41.5
        let output = VitaminDCalculator::estimate(&input(2, 30.0, 85.0, SkinType::Dark, SunExposure::Minimal));
        assert_relative_eq!(output.raw_iu, 2700.0, epsilon = 1e-9);
        assert_eq!(output.upper_limit_iu, 2500.0);
        assert_eq!(output.recommended_iu, 2500.0);
        assert!(output.capped);
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(BASE_IU.lookup(0.0), 400.0);
        assert_eq!(BASE_IU.lookup(70.0), 600.0);
        assert_eq!(BASE_IU.lookup(71.0), 800.0);
        assert_eq!(UPPER_LIMIT_IU.lookup(8.0), 3000.0);
        assert_eq!(UPPER_LIMIT_IU.lookup(9.0), 4000.0);
        for table in [BASE_IU, BMI_FACTOR, UPPER_LIMIT_IU] {
            assert!(table.is_ordered());
            assert!(table.is_non_decreasing());
        }
    }

    #[test]
    fn test_presented() {
        let presented = evaluate_defaults::<VitaminDCalculator>(&Settings::default())
            .unwrap()
            .presented;
        assert_eq!(presented.headline, "660 IU/day");
        assert_eq!(presented.value_of("recommended_mcg"), Some("16.5 mcg/day"));
        assert_eq!(presented.labels["limit"], "Within upper limit");
    }
}
