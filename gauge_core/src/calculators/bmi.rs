//! # Body Mass Index
//!
//! BMI from height and weight, the WHO adult category, BMI prime and the
//! weight range that keeps BMI inside the normal band.
//!
//! ## Example
//!
//! ```rust
//! use gauge_core::calculators::bmi::{BmiCalculator, BmiCategory, BmiInput};
//! use gauge_core::engine::calculate;
//!
//! let output = calculate::<BmiCalculator>(&BmiInput { height_cm: 200.0, weight_kg: 74.0 }).unwrap();
//! assert_eq!(output.bmi, 18.5);
//! assert_eq!(output.category, BmiCategory::Normal);
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::present::{fixed, weight, weight_range};
use crate::engine::{Bound, Calculator, FieldSpec, PresentedResult, Range, StepTable};
use crate::formulas::Formula;
use crate::settings::Settings;

choice_enum! {
    /// WHO adult BMI category
    pub enum BmiCategory {
        SeverelyUnderweight => "severely_underweight", "Severely underweight";
        Underweight => "underweight", "Underweight";
        Normal => "normal", "Normal";
        Overweight => "overweight", "Overweight";
        ObeseClass1 => "obese_1", "Obese (class I)";
        ObeseClass2 => "obese_2", "Obese (class II)";
        ObeseClass3 => "obese_3", "Obese (class III)";
    }
}

pub const CATEGORIES: StepTable<BmiCategory> = StepTable::new(
    &[
        (Bound::Below(16.0), BmiCategory::SeverelyUnderweight),
        (Bound::Below(18.5), BmiCategory::Underweight),
        (Bound::Below(25.0), BmiCategory::Normal),
        (Bound::Below(30.0), BmiCategory::Overweight),
        (Bound::Below(35.0), BmiCategory::ObeseClass1),
        (Bound::Below(40.0), BmiCategory::ObeseClass2),
    ],
    BmiCategory::ObeseClass3,
);

/// Lower edge of the normal band
pub const HEALTHY_BMI_LOW: f64 = 18.5;
/// Upper edge used for the healthy weight range
pub const HEALTHY_BMI_HIGH: f64 = 24.9;

/// `kg / m²`
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Weights (kg) giving a BMI between 18.5 and 24.9 at this height
pub fn healthy_weight_range(height_cm: f64) -> Range {
    let height_m = height_cm / 100.0;
    let m2 = height_m * height_m;
    Range::new(HEALTHY_BMI_LOW * m2, HEALTHY_BMI_HIGH * m2)
}

/// Height and weight, metric.
///
/// ## JSON Example
///
/// ```json
/// { "height_cm": 180.0, "weight_kg": 75.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiOutput {
    pub bmi: f64,
    pub category: BmiCategory,
    /// BMI / 25
    pub bmi_prime: f64,
    pub healthy_weight_kg: Range,
}

pub struct BmiCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::number("height_cm", "Height", 50.0, 272.0).with_unit("cm"),
    FieldSpec::number("weight_kg", "Weight", 2.0, 650.0).with_unit("kg"),
];

impl Calculator for BmiCalculator {
    const ID: &'static str = "bmi";
    const TITLE: &'static str = "BMI Calculator";

    type Input = BmiInput;
    type Output = BmiOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> BmiInput {
        BmiInput {
            height_cm: 170.0,
            weight_kg: 70.0,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::BodyMassIndex, Formula::BmiPrime, Formula::HealthyWeightRange]
    }

    fn estimate(input: &BmiInput) -> BmiOutput {
        let bmi = body_mass_index(input.height_cm, input.weight_kg);
        BmiOutput {
            bmi,
            category: CATEGORIES.lookup(bmi),
            bmi_prime: bmi / 25.0,
            healthy_weight_kg: healthy_weight_range(input.height_cm),
        }
    }

    fn present(output: &BmiOutput, settings: &Settings) -> PresentedResult {
        let healthy = output.healthy_weight_kg;
        let mut presented = PresentedResult::new(Self::ID, Self::TITLE, fixed(output.bmi, 1))
            .line("bmi", "BMI", fixed(output.bmi, 1))
            .line("category", "Category", output.category.label())
            .line("bmi_prime", "BMI prime", fixed(output.bmi_prime, 2))
            .line(
                "healthy_weight",
                "Healthy weight for your height",
                weight_range(healthy.low, healthy.high, settings),
            )
            .label("category", output.category.label());

        if output.category != BmiCategory::Normal {
            presented = presented.note(format!(
                "A weight of {} puts you at the middle of the normal band",
                weight(healthy.midpoint(), settings)
            ));
        }
        presented.note("BMI is a screening measure; it does not distinguish fat from muscle")
    }
}
