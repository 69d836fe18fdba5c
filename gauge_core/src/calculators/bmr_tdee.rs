//! # BMR / TDEE
//!
//! Resting energy expenditure by Mifflin-St Jeor (the headline figure) with
//! the revised Harris-Benedict value alongside, scaled by an activity factor
//! and then by a goal factor.

use serde::{Deserialize, Serialize};

use crate::calculators::common::Sex;
use crate::engine::present::grouped;
use crate::engine::{Calculator, FieldSpec, PresentedResult};
use crate::formulas::Formula;
use crate::settings::Settings;

choice_enum! {
    pub enum ActivityLevel {
        Sedentary => "sedentary", "Sedentary (little or no exercise)";
        Light => "light", "Light (1-3 days/week)";
        Moderate => "moderate", "Moderate (3-5 days/week)";
        Active => "active", "Active (6-7 days/week)";
        VeryActive => "very_active", "Very active (physical job or twice daily)";
    }
}

impl ActivityLevel {
    /// Physical activity level multiplier
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

choice_enum! {
    pub enum Goal {
        LoseFast => "lose_fast", "Lose weight fast";
        Lose => "lose", "Lose weight";
        Maintain => "maintain", "Maintain weight";
        Gain => "gain", "Gain weight";
    }
}

impl Goal {
    pub fn factor(self) -> f64 {
        match self {
            Goal::LoseFast => 0.8,
            Goal::Lose => 0.9,
            Goal::Maintain => 1.0,
            Goal::Gain => 1.1,
        }
    }
}

/// Mifflin-St Jeor BMR, kcal/day
pub fn mifflin_st_jeor(sex: Sex, age: f64, weight_kg: f64, height_cm: f64) -> f64 {
    let s = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age + s
}

/// Harris-Benedict BMR (Roza-Shizgal revision), kcal/day
pub fn harris_benedict(sex: Sex, age: f64, weight_kg: f64, height_cm: f64) -> f64 {
    match sex {
        Sex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Sex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrTdeeInput {
    pub sex: Sex,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmrTdeeOutput {
    /// Mifflin-St Jeor
    pub bmr: f64,
    pub bmr_harris_benedict: f64,
    pub activity_factor: f64,
    pub tdee: f64,
    pub goal_factor: f64,
    pub target_calories: f64,
}

pub struct BmrTdeeCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::choice("sex", "Sex", Sex::TAGS),
    FieldSpec::integer("age", "Age", 15, 100).with_unit("years"),
    FieldSpec::number("weight_kg", "Weight", 20.0, 400.0).with_unit("kg"),
    FieldSpec::number("height_cm", "Height", 100.0, 250.0).with_unit("cm"),
    FieldSpec::choice("activity", "Activity level", ActivityLevel::TAGS),
    FieldSpec::choice("goal", "Goal", Goal::TAGS),
];

impl Calculator for BmrTdeeCalculator {
    const ID: &'static str = "bmr_tdee";
    const TITLE: &'static str = "BMR & TDEE Calculator";

    type Input = BmrTdeeInput;
    type Output = BmrTdeeOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> BmrTdeeInput {
        BmrTdeeInput {
            sex: Sex::Male,
            age: 30,
            weight_kg: 75.0,
            height_cm: 180.0,
            activity: ActivityLevel::Moderate,
            goal: Goal::Maintain,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::MifflinStJeor, Formula::HarrisBenedictRevised, Formula::ActivityMultiplier]
    }

    fn estimate(input: &BmrTdeeInput) -> BmrTdeeOutput {
        let age = f64::from(input.age);
        let bmr = mifflin_st_jeor(input.sex, age, input.weight_kg, input.height_cm);
        let activity_factor = input.activity.factor();
        let goal_factor = input.goal.factor();
        let tdee = bmr * activity_factor;

        BmrTdeeOutput {
            bmr,
            bmr_harris_benedict: harris_benedict(input.sex, age, input.weight_kg, input.height_cm),
            activity_factor,
            tdee,
            goal_factor,
            target_calories: tdee * goal_factor,
        }
    }

    fn present(output: &BmrTdeeOutput, _settings: &Settings) -> PresentedResult {
        let kcal = |value: f64| format!("{} kcal/day", grouped(value, 0));

        PresentedResult::new(Self::ID, Self::TITLE, kcal(output.target_calories))
            .line("bmr", "BMR (Mifflin-St Jeor)", kcal(output.bmr))
            .line("bmr_harris_benedict", "BMR (Harris-Benedict)", kcal(output.bmr_harris_benedict))
            .line("tdee", "Maintenance (TDEE)", kcal(output.tdee))
            .line("target_calories", "Daily target", kcal(output.target_calories))
            .note("Estimates assume a healthy adult; measured metabolic rate can differ by 10% or more")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{calculate, evaluate_defaults};
    use approx::assert_relative_eq;

    #[test]
    fn test_mifflin_reference_value() {
        // 10*75 + 6.25*180 - 5*30 + 5
        assert_relative_eq!(mifflin_st_jeor(Sex::Male, 30.0, 75.0, 180.0), 1730.0);
        assert_relative_eq!(mifflin_st_jeor(Sex::Female, 30.0, 75.0, 180.0), 1564.0);
    }

    #[test]
    fn test_harris_benedict() {
        assert_relative_eq!(harris_benedict(Sex::Male, 30.0, 75.0, 180.0), 1786.647, epsilon = 1e-6);
    }

    #[test]
    fn test_tdee_and_target() {
        let mut input = BmrTdeeCalculator::defaults();
        input.goal = Goal::Lose;
        let output = calculate::<BmrTdeeCalculator>(&input).unwrap();
        assert_relative_eq!(output.tdee, 1730.0 * 1.55, epsilon = 1e-9);
        assert_relative_eq!(output.target_calories, 1730.0 * 1.55 * 0.9, epsilon = 1e-9);
    }

    #[test]
    fn test_factors_increase_with_activity() {
        let factors: Vec<f64> = ActivityLevel::ALL.iter().map(|a| a.factor()).collect();
        assert!(factors.windows(2).all(|w| w[0] < w[1]));
        let goals: Vec<f64> = Goal::ALL.iter().map(|g| g.factor()).collect();
        assert!(goals.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_age_out_of_range() {
        let mut input = BmrTdeeCalculator::defaults();
        input.age = 12;
        let err = calculate::<BmrTdeeCalculator>(&input).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "age");
    }

    #[test]
    fn test_presented() {
        let presented = evaluate_defaults::<BmrTdeeCalculator>(&Settings::default())
            .unwrap()
            .presented;
        assert_eq!(presented.value_of("bmr"), Some("1,730 kcal/day"));
        assert_eq!(presented.value_of("tdee"), presented.value_of("target_calories"));
        assert_eq!(Some(presented.headline.as_str()), presented.value_of("target_calories"));
        assert!(presented.headline.starts_with("2,68"));
    }
}
