//! # Life Expectancy
//!
//! Weighted-sum estimate: a demographic baseline selected by sex and
//! race/ethnicity, plus one additive adjustment per lifestyle or health
//! factor. Continuous factors (exercise days, sleep hours, BMI, number of
//! chronic conditions) are banded; nothing is interpolated.
//!
//! ## Example
//!
//! ```rust
//! use gauge_core::calculators::life_expectancy::LifeExpectancyCalculator;
//! use gauge_core::engine::{calculate, Calculator};
//!
//! let output = calculate::<LifeExpectancyCalculator>(&LifeExpectancyCalculator::defaults()).unwrap();
//! assert!((output.estimate - 80.2).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculators::common::Sex;
use crate::engine::present::{fixed, signed};
use crate::engine::{Bound, Calculator, Comparison, FieldSpec, PresentedResult, StepTable};
use crate::formulas::Formula;
use crate::settings::Settings;

// ============================================================================
// Choice fields
// ============================================================================

choice_enum! {
    pub enum Race {
        White => "white", "White";
        Black => "black", "Black";
        Hispanic => "hispanic", "Hispanic";
        Asian => "asian", "Asian";
        NativeAmerican => "native_american", "Native American";
        Other => "other", "Other / mixed";
    }
}

choice_enum! {
    pub enum Smoking {
        Never => "never", "Never smoked";
        Former => "former", "Former smoker";
        Current => "current", "Current smoker";
    }
}

choice_enum! {
    pub enum Alcohol {
        None => "none", "None";
        Moderate => "moderate", "Moderate";
        Heavy => "heavy", "Heavy";
    }
}

choice_enum! {
    pub enum Diet {
        Poor => "poor", "Poor";
        Balanced => "balanced", "Balanced";
        PlantBased => "plant_based", "Plant-based";
        Mediterranean => "mediterranean", "Mediterranean";
    }
}

choice_enum! {
    pub enum Stress {
        Low => "low", "Low";
        Moderate => "moderate", "Moderate";
        High => "high", "High";
    }
}

choice_enum! {
    pub enum Social {
        Isolated => "isolated", "Isolated";
        Moderate => "moderate", "Moderate";
        Strong => "strong", "Strong";
    }
}

choice_enum! {
    pub enum Education {
        LessThanHighSchool => "less_than_high_school", "Less than high school";
        HighSchool => "high_school", "High school";
        College => "college", "College";
        Graduate => "graduate", "Graduate degree";
    }
}

choice_enum! {
    pub enum Income {
        Low => "low", "Low";
        Middle => "middle", "Middle";
        High => "high", "High";
    }
}

choice_enum! {
    pub enum ChronicCondition {
        Diabetes => "diabetes", "Diabetes";
        HeartDisease => "heart_disease", "Heart disease";
        Hypertension => "hypertension", "Hypertension";
        Copd => "copd", "COPD";
        Cancer => "cancer", "Cancer";
        KidneyDisease => "kidney_disease", "Kidney disease";
    }
}

choice_enum! {
    pub enum AirQuality {
        Good => "good", "Good";
        Moderate => "moderate", "Moderate";
        Poor => "poor", "Poor";
    }
}

choice_enum! {
    /// How often the person sees a doctor
    pub enum Healthcare {
        Regular => "regular", "Regular check-ups";
        Occasional => "occasional", "Occasional";
        Rarely => "rarely", "Rarely";
    }
}

// ============================================================================
// Formula table
// ============================================================================

/// Baseline life expectancy at birth, years
pub fn baseline(sex: Sex, race: Race) -> f64 {
    match (race, sex) {
        (Race::White, Sex::Male) => 76.1,
        (Race::White, Sex::Female) => 81.1,
        (Race::Black, Sex::Male) => 71.5,
        (Race::Black, Sex::Female) => 78.1,
        (Race::Hispanic, Sex::Male) => 78.8,
        (Race::Hispanic, Sex::Female) => 84.0,
        (Race::Asian, Sex::Male) => 83.5,
        (Race::Asian, Sex::Female) => 87.7,
        (Race::NativeAmerican, Sex::Male) => 67.8,
        (Race::NativeAmerican, Sex::Female) => 75.3,
        (Race::Other, Sex::Male) => 75.0,
        (Race::Other, Sex::Female) => 80.2,
    }
}

/// Days of exercise per week
pub const EXERCISE: StepTable<f64> = StepTable::new(
    &[(Bound::Below(1.0), -1.0), (Bound::Below(3.0), 1.6), (Bound::Below(5.0), 3.0)],
    3.7,
);

/// Hours of sleep per night
pub const SLEEP: StepTable<f64> = StepTable::new(
    &[
        (Bound::Below(5.0), -2.0),
        (Bound::Below(6.0), -1.0),
        (Bound::Below(7.0), 0.0),
        (Bound::AtMost(9.0), 1.5),
    ],
    -1.0,
);

pub const BMI: StepTable<f64> = StepTable::new(
    &[
        (Bound::Below(18.5), -2.0),
        (Bound::Below(25.0), 1.0),
        (Bound::Below(30.0), 0.0),
        (Bound::Below(35.0), -2.0),
        (Bound::Below(40.0), -4.0),
    ],
    -7.0,
);

/// Number of chronic conditions
pub const CHRONIC_CONDITIONS: StepTable<f64> = StepTable::new(
    &[(Bound::Below(1.0), 0.0), (Bound::Below(2.0), -2.0), (Bound::Below(3.0), -4.5)],
    -7.0,
);

/// Longevity among parents or grandparents
pub const FAMILY_HISTORY_BONUS: f64 = 2.0;

impl Smoking {
    pub fn impact(self) -> f64 {
        match self {
            Smoking::Never => 0.0,
            Smoking::Former => -2.5,
            Smoking::Current => -10.0,
        }
    }
}

impl Alcohol {
    pub fn impact(self) -> f64 {
        match self {
            Alcohol::None | Alcohol::Moderate => 0.0,
            Alcohol::Heavy => -5.0,
        }
    }
}

impl Diet {
    pub fn impact(self) -> f64 {
        match self {
            Diet::Poor => -2.5,
            Diet::Balanced => 0.0,
            Diet::PlantBased => 1.5,
            Diet::Mediterranean => 2.0,
        }
    }
}

impl Stress {
    pub fn impact(self) -> f64 {
        match self {
            Stress::Low => 1.0,
            Stress::Moderate => 0.0,
            Stress::High => -2.5,
        }
    }
}

impl Social {
    pub fn impact(self) -> f64 {
        match self {
            Social::Isolated => -3.0,
            Social::Moderate => 0.0,
            Social::Strong => 1.5,
        }
    }
}

impl Education {
    pub fn impact(self) -> f64 {
        match self {
            Education::LessThanHighSchool => -2.0,
            Education::HighSchool => -1.0,
            Education::College => 0.0,
            Education::Graduate => 1.0,
        }
    }
}

impl Income {
    pub fn impact(self) -> f64 {
        match self {
            Income::Low => -2.0,
            Income::Middle => 0.0,
            Income::High => 1.5,
        }
    }
}

impl AirQuality {
    pub fn impact(self) -> f64 {
        match self {
            AirQuality::Good => 0.5,
            AirQuality::Moderate => 0.0,
            AirQuality::Poor => -1.5,
        }
    }
}

impl Healthcare {
    pub fn impact(self) -> f64 {
        match self {
            Healthcare::Regular => 0.0,
            Healthcare::Occasional => -1.0,
            Healthcare::Rarely => -2.5,
        }
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Demographics, lifestyle and health history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeExpectancyInput {
    pub age: u32,
    pub sex: Sex,
    pub race: Race,
    /// Days per week with at least 30 minutes of exercise
    pub exercise_days: u32,
    pub sleep_hours: f64,
    pub smoking: Smoking,
    pub alcohol: Alcohol,
    pub diet: Diet,
    pub stress: Stress,
    pub social: Social,
    pub bmi: f64,
    #[serde(default)]
    pub family_history: bool,
    pub education: Education,
    pub income: Income,
    #[serde(default)]
    pub chronic_conditions: Vec<ChronicCondition>,
    pub air_quality: AirQuality,
    pub healthcare: Healthcare,
}

/// One factor's contribution to the estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    /// Field the adjustment comes from
    pub factor: &'static str,
    pub label: &'static str,
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeExpectancyOutput {
    pub baseline: f64,
    /// In form order
    pub adjustments: Vec<Adjustment>,
    pub total_impact: f64,
    pub estimate: f64,
    /// Never negative
    pub years_remaining: f64,
}

impl LifeExpectancyOutput {
    pub fn adjustment(&self, factor: &str) -> Option<f64> {
        self.adjustments.iter().find(|a| a.factor == factor).map(|a| a.years)
    }
}

pub struct LifeExpectancyCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::integer("age", "Age", 0, 120).with_unit("years"),
    FieldSpec::choice("sex", "Sex", Sex::TAGS),
    FieldSpec::choice("race", "Race / ethnicity", Race::TAGS),
    FieldSpec::integer("exercise_days", "Exercise days per week", 0, 7),
    FieldSpec::number("sleep_hours", "Sleep per night", 0.0, 24.0).with_unit("h"),
    FieldSpec::choice("smoking", "Smoking", Smoking::TAGS),
    FieldSpec::choice("alcohol", "Alcohol", Alcohol::TAGS),
    FieldSpec::choice("diet", "Diet", Diet::TAGS),
    FieldSpec::choice("stress", "Stress level", Stress::TAGS),
    FieldSpec::choice("social", "Social connection", Social::TAGS),
    FieldSpec::number("bmi", "BMI", 10.0, 80.0),
    FieldSpec::flag("family_history", "Family history of longevity").optional(),
    FieldSpec::choice("education", "Education", Education::TAGS),
    FieldSpec::choice("income", "Income", Income::TAGS),
    FieldSpec::choice_list("chronic_conditions", "Chronic conditions", ChronicCondition::TAGS, 0).optional(),
    FieldSpec::choice("air_quality", "Air quality", AirQuality::TAGS),
    FieldSpec::choice("healthcare", "Healthcare access", Healthcare::TAGS),
];

impl Calculator for LifeExpectancyCalculator {
    const ID: &'static str = "life_expectancy";
    const TITLE: &'static str = "Life Expectancy Calculator";

    type Input = LifeExpectancyInput;
    type Output = LifeExpectancyOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> LifeExpectancyInput {
        LifeExpectancyInput {
            age: 30,
            sex: Sex::Male,
            race: Race::White,
            exercise_days: 2,
            sleep_hours: 7.0,
            smoking: Smoking::Never,
            alcohol: Alcohol::Moderate,
            diet: Diet::Balanced,
            stress: Stress::Moderate,
            social: Social::Moderate,
            bmi: 24.0,
            family_history: false,
            education: Education::College,
            income: Income::Middle,
            chronic_conditions: Vec::new(),
            air_quality: AirQuality::Moderate,
            healthcare: Healthcare::Regular,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::LifeExpectancyAdjustment]
    }

    fn estimate(input: &LifeExpectancyInput) -> LifeExpectancyOutput {
        let baseline = baseline(input.sex, input.race);
        let family = if input.family_history { FAMILY_HISTORY_BONUS } else { 0.0 };
        let conditions = input.chronic_conditions.len() as f64;

        let adjustments = vec![
            adjust("exercise_days", "Exercise", EXERCISE.lookup(f64::from(input.exercise_days))),
            adjust("sleep_hours", "Sleep", SLEEP.lookup(input.sleep_hours)),
            adjust("smoking", "Smoking", input.smoking.impact()),
            adjust("alcohol", "Alcohol", input.alcohol.impact()),
            adjust("diet", "Diet", input.diet.impact()),
            adjust("stress", "Stress", input.stress.impact()),
            adjust("social", "Social connection", input.social.impact()),
            adjust("bmi", "BMI", BMI.lookup(input.bmi)),
            adjust("family_history", "Family history", family),
            adjust("education", "Education", input.education.impact()),
            adjust("income", "Income", input.income.impact()),
            adjust("chronic_conditions", "Chronic conditions", CHRONIC_CONDITIONS.lookup(conditions)),
            adjust("air_quality", "Air quality", input.air_quality.impact()),
            adjust("healthcare", "Healthcare access", input.healthcare.impact()),
        ];

        let total_impact: f64 = adjustments.iter().map(|a| a.years).sum();
        let estimate = baseline + total_impact;

        LifeExpectancyOutput {
            baseline,
            adjustments,
            total_impact,
            estimate,
            years_remaining: (estimate - f64::from(input.age)).max(0.0),
        }
    }

    fn present(output: &LifeExpectancyOutput, _settings: &Settings) -> PresentedResult {
        let comparison = Comparison::between(output.baseline, output.estimate);
        let outlook = if output.total_impact > 0.0 {
            "Above average"
        } else if output.total_impact < 0.0 {
            "Below average"
        } else {
            "Average"
        };

        let mut presented = PresentedResult::new(Self::ID, Self::TITLE, format!("{} years", fixed(output.estimate, 1)))
            .line("baseline", "Baseline", format!("{} years", fixed(output.baseline, 1)));

        for adjustment in output.adjustments.iter().filter(|a| a.years != 0.0) {
            presented = presented.line(adjustment.factor, adjustment.label, signed(adjustment.years, 1));
        }

        presented
            .line("total_impact", "Lifestyle impact", comparison.describe(1))
            .line("years_remaining", "Years remaining", fixed(output.years_remaining, 1))
            .label("outlook", outlook)
            .compare(comparison)
            .note("Population averages; not a medical prognosis")
    }
}

fn adjust(factor: &'static str, label: &'static str, years: f64) -> Adjustment {
    Adjustment { factor, label, years }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{evaluate, evaluate_defaults, InputSet};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn example() -> LifeExpectancyInput {
        LifeExpectancyCalculator::defaults()
    }

    #[test]
    fn test_reference_scenario() {
        let output = LifeExpectancyCalculator::estimate(&example());
        assert_eq!(output.baseline, 76.1);
        assert_eq!(output.adjustment("exercise_days"), Some(1.6));
        assert_eq!(output.adjustment("sleep_hours"), Some(1.5));
        assert_eq!(output.adjustment("bmi"), Some(1.0));
        assert_relative_eq!(output.total_impact, 4.1, epsilon = 1e-9);
        assert_relative_eq!(output.estimate, 80.2, epsilon = 1e-9);
        assert_relative_eq!(output.years_remaining, 50.2, epsilon = 1e-9);

        let nonzero = output.adjustments.iter().filter(|a| a.years != 0.0).count();
        assert_eq!(nonzero, 3);
    }

    #[test]
    fn test_current_smoker() {
        let mut input = example();
        input.smoking = Smoking::Current;
        let output = LifeExpectancyCalculator::estimate(&input);
        assert_eq!(output.adjustment("smoking"), Some(-10.0));
        assert_relative_eq!(output.estimate, 70.2, epsilon = 1e-9);
    }

    #[test]
    fn test_chronic_condition_bands() {
        let mut input = example();
        let mut deltas = Vec::new();
        for conditions in [
            vec![],
            vec![ChronicCondition::Diabetes],
            vec![ChronicCondition::Diabetes, ChronicCondition::Copd],
            vec![ChronicCondition::Diabetes, ChronicCondition::Copd, ChronicCondition::Cancer],
            ChronicCondition::ALL.to_vec(),
        ] {
            input.chronic_conditions = conditions;
            let output = LifeExpectancyCalculator::estimate(&input);
            deltas.push(output.adjustment("chronic_conditions").unwrap());
        }
        assert_eq!(deltas, vec![0.0, -2.0, -4.5, -7.0, -7.0]);
    }

    #[test]
    fn test_sleep_boundaries() {
        assert_eq!(SLEEP.lookup(6.99), 0.0);
        assert_eq!(SLEEP.lookup(7.0), 1.5);
        assert_eq!(SLEEP.lookup(9.0), 1.5);
        assert_eq!(SLEEP.lookup(9.5), -1.0);
    }

    #[test]
    fn test_tables_are_ordered() {
        for table in [EXERCISE, SLEEP, BMI, CHRONIC_CONDITIONS] {
            assert!(table.is_ordered());
        }
    }

    #[test]
    fn test_monotonic_bands() {
        // More exercise never lowers the estimate; more conditions never raise it
        assert!(EXERCISE.is_non_decreasing());
        assert!(CHRONIC_CONDITIONS.is_non_increasing());
    }

    #[test]
    fn test_every_baseline_is_plausible() {
        for sex in Sex::ALL {
            for race in Race::ALL {
                let value = baseline(*sex, *race);
                assert!((60.0..95.0).contains(&value), "{:?}/{:?} -> {}", sex, race, value);
            }
        }
        for race in Race::ALL {
            assert!(baseline(Sex::Female, *race) > baseline(Sex::Male, *race));
        }
    }

    #[test]
    fn test_years_remaining_never_negative() {
        let mut input = example();
        input.age = 120;
        let output = LifeExpectancyCalculator::estimate(&input);
        assert_eq!(output.years_remaining, 0.0);
    }

    #[test]
    fn test_presented() {
        let evaluation = evaluate_defaults::<LifeExpectancyCalculator>(&Settings::default()).unwrap();
        let presented = evaluation.presented;
        assert_eq!(presented.headline, "80.2 years");
        assert_eq!(presented.value_of("baseline"), Some("76.1 years"));
        assert_eq!(presented.value_of("exercise_days"), Some("+1.6"));
        assert_eq!(presented.value_of("smoking"), None);
        assert_eq!(presented.value_of("total_impact"), Some("+4.1 (+5.4%)"));
        assert_eq!(presented.labels["outlook"], "Above average");
        assert!(presented.comparison.is_some());
    }

    #[test]
    fn test_form_submission_with_text_values() {
        let set = InputSet::from_typed(&example())
            .unwrap()
            .with("age", "45")
            .with("smoking", "former")
            .with("chronic_conditions", "diabetes,hypertension");
        let evaluation = evaluate::<LifeExpectancyCalculator>(&set, &Settings::default()).unwrap();
        assert_relative_eq!(evaluation.result.estimate, 80.2 - 2.5 - 4.5, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let set = InputSet::from_typed(&example()).unwrap().with("diet", "keto");
        let err = evaluate::<LifeExpectancyCalculator>(&set, &Settings::default()).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "diet");
    }

    fn arb_input() -> impl Strategy<Value = LifeExpectancyInput> {
        (
            0u32..=120,
            prop::sample::select(Sex::ALL.to_vec()),
            prop::sample::select(Race::ALL.to_vec()),
            0u32..=7,
            0.0f64..=24.0,
            prop::sample::select(Smoking::ALL.to_vec()),
            10.0f64..=80.0,
            any::<bool>(),
            prop::sample::subsequence(ChronicCondition::ALL.to_vec(), 0..=ChronicCondition::ALL.len()),
        )
            .prop_map(|(age, sex, race, exercise_days, sleep_hours, smoking, bmi, family_history, chronic_conditions)| {
                LifeExpectancyInput {
                    age,
                    sex,
                    race,
                    exercise_days,
                    sleep_hours,
                    smoking,
                    bmi,
                    family_history,
                    chronic_conditions,
                    ..example()
                }
            })
    }

    proptest! {
        #[test]
        fn estimate_is_idempotent(input in arb_input()) {
            let first = LifeExpectancyCalculator::estimate(&input);
            let second = LifeExpectancyCalculator::estimate(&input);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn estimate_is_baseline_plus_adjustments(input in arb_input()) {
            let output = LifeExpectancyCalculator::estimate(&input);
            let sum: f64 = output.adjustments.iter().map(|a| a.years).sum();
            prop_assert!((output.estimate - output.baseline - sum).abs() < 1e-9);
            prop_assert!(output.years_remaining >= 0.0);
        }

        #[test]
        fn more_exercise_never_lowers_estimate(input in arb_input(), extra in 0u32..=7) {
            let mut more = input.clone();
            more.exercise_days = (input.exercise_days + extra).min(7);
            let base = LifeExpectancyCalculator::estimate(&input).estimate;
            let after = LifeExpectancyCalculator::estimate(&more).estimate;
            prop_assert!(after >= base - 1e-9);
        }
    }
}
