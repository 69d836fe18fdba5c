//! # GLP-1 (Semaglutide) Weight Loss Projection
//!
//! Mean fractional loss at the trial endpoint for the maintenance dose,
//! scaled by time on treatment, diet adherence and activity.

use serde::{Deserialize, Serialize};

use crate::engine::present::{fixed, percent, weight};
use crate::engine::{Calculator, Comparison, FieldSpec, PresentedResult};
use crate::formulas::Formula;
use crate::settings::Settings;

choice_enum! {
    /// Weekly maintenance dose
    pub enum Dose {
        Mg025 => "0.25mg", "0.25 mg";
        Mg05 => "0.5mg", "0.5 mg";
        Mg1 => "1mg", "1 mg";
        Mg2 => "2mg", "2 mg";
        Mg24 => "2.4mg", "2.4 mg";
    }
}

impl Dose {
    /// Mean fraction of body weight lost at 68 weeks
    pub fn loss_fraction(self) -> f64 {
        match self {
            Dose::Mg025 => 0.04,
            Dose::Mg05 => 0.06,
            Dose::Mg1 => 0.10,
            Dose::Mg2 => 0.13,
            Dose::Mg24 => 0.149,
        }
    }
}

choice_enum! {
    pub enum Duration {
        Weeks12 => "12_weeks", "12 weeks";
        Weeks24 => "24_weeks", "24 weeks";
        Weeks36 => "36_weeks", "36 weeks";
        Weeks52 => "52_weeks", "52 weeks";
        Weeks68 => "68_weeks", "68 weeks";
    }
}

impl Duration {
    /// Share of the 68-week loss reached by this point
    pub fn progress(self) -> f64 {
        match self {
            Duration::Weeks12 => 0.35,
            Duration::Weeks24 => 0.6,
            Duration::Weeks36 => 0.8,
            Duration::Weeks52 => 0.92,
            Duration::Weeks68 => 1.0,
        }
    }
}

choice_enum! {
    pub enum DietChange {
        None => "none", "No change";
        Moderate => "moderate", "Moderate calorie reduction";
        Strict => "strict", "Strict calorie reduction";
    }
}

impl DietChange {
    pub fn factor(self) -> f64 {
        match self {
            DietChange::None => 0.85,
            DietChange::Moderate => 1.0,
            DietChange::Strict => 1.15,
        }
    }
}

choice_enum! {
    pub enum Activity {
        Sedentary => "sedentary", "Sedentary";
        Light => "light", "Light";
        Moderate => "moderate", "Moderate";
        Active => "active", "Active";
    }
}

impl Activity {
    pub fn factor(self) -> f64 {
        match self {
            Activity::Sedentary => 0.9,
            Activity::Light => 1.0,
            Activity::Moderate => 1.08,
            Activity::Active => 1.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glp1WeightLossInput {
    pub weight_kg: f64,
    pub dose: Dose,
    pub duration: Duration,
    pub diet: DietChange,
    pub activity: Activity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Glp1WeightLossOutput {
    pub loss_fraction: f64,
    pub loss_kg: f64,
    pub final_weight_kg: f64,
    pub percent_lost: f64,
}

pub struct Glp1WeightLossCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::number("weight_kg", "Current weight", 40.0, 300.0).with_unit("kg"),
    FieldSpec::choice("dose", "Weekly dose", Dose::TAGS),
    FieldSpec::choice("duration", "Time on treatment", Duration::TAGS),
    FieldSpec::choice("diet", "Diet", DietChange::TAGS),
    FieldSpec::choice("activity", "Activity", Activity::TAGS),
];

impl Calculator for Glp1WeightLossCalculator {
    const ID: &'static str = "glp1_weight_loss";
    const TITLE: &'static str = "Ozempic Weight Loss Calculator";

    type Input = Glp1WeightLossInput;
    type Output = Glp1WeightLossOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> Glp1WeightLossInput {
        Glp1WeightLossInput {
            weight_kg: 100.0,
            dose: Dose::Mg1,
            duration: Duration::Weeks52,
            diet: DietChange::Moderate,
            activity: Activity::Light,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::Glp1WeightLoss]
    }

    fn estimate(input: &Glp1WeightLossInput) -> Glp1WeightLossOutput {
        let loss_fraction =
            input.dose.loss_fraction() * input.duration.progress() * input.diet.factor() * input.activity.factor();
        let loss_kg = input.weight_kg * loss_fraction;

        Glp1WeightLossOutput {
            loss_fraction,
            loss_kg,
            final_weight_kg: input.weight_kg - loss_kg,
            percent_lost: loss_fraction * 100.0,
        }
    }

    fn present(output: &Glp1WeightLossOutput, settings: &Settings) -> PresentedResult {
        let starting = output.final_weight_kg + output.loss_kg;

        PresentedResult::new(Self::ID, Self::TITLE, weight(output.loss_kg, settings))
            .line("loss", "Projected loss", weight(output.loss_kg, settings))
            .line("final_weight", "Projected weight", weight(output.final_weight_kg, settings))
            .line("percent_lost", "Body weight lost", percent(output.percent_lost, 1))
            .compare(Comparison::between(starting, output.final_weight_kg))
            .label("percent_lost", format!("{}%", fixed(output.percent_lost, 0)))
            .note("Trial averages; individual results vary widely. Use only under medical supervision")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate_defaults;
    use crate::settings::UnitSystem;
    use approx::assert_relative_eq;

    #[test]
    fn test_trial_endpoint() {
        let output = Glp1WeightLossCalculator::estimate(&Glp1WeightLossInput {
            weight_kg: 100.0,
            dose: Dose::Mg24,
            duration: Duration::Weeks68,
            diet: DietChange::Moderate,
            activity: Activity::Light,
        });
        assert_relative_eq!(output.loss_kg, 14.9, epsilon = 1e-9);
        assert_relative_eq!(output.final_weight_kg, 85.1, epsilon = 1e-9);
        assert_relative_eq!(output.percent_lost, 14.9, epsilon = 1e-9);
    }

    #[test]
    fn test_factors_multiply() {
        let output = Glp1WeightLossCalculator::estimate(&Glp1WeightLossInput {
            weight_kg: 120.0,
            dose: Dose::Mg05,
            duration: Duration::Weeks24,
            diet: DietChange::Strict,
            activity: Activity::Active,
        });
        assert_relative_eq!(output.loss_kg, 120.0 * 0.06 * 0.6 * 1.15 * 1.15, epsilon = 1e-9);
    }

    #[test]
    fn test_tables_increase() {
        let doses: Vec<f64> = Dose::ALL.iter().map(|d| d.loss_fraction()).collect();
        assert!(doses.windows(2).all(|w| w[0] < w[1]));
        let durations: Vec<f64> = Duration::ALL.iter().map(|d| d.progress()).collect();
        assert!(durations.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Duration::Weeks68.progress(), 1.0);
    }

    #[test]
    fn test_dose_tags_round_trip() {
        for dose in Dose::ALL {
            let json = serde_json::to_string(dose).unwrap();
            assert_eq!(json, format!("\"{}\"", dose.tag()));
        }
        assert_eq!(Dose::from_tag("2.4mg"), Some(Dose::Mg24));
    }

    #[test]
    fn test_presented() {
        // 100 kg * 0.10 * 0.92 = 9.2 kg
        let presented = evaluate_defaults::<Glp1WeightLossCalculator>(&Settings::default())
            .unwrap()
            .presented;
        assert_eq!(presented.headline, "9.2 kg");
        assert_eq!(presented.value_of("final_weight"), Some("90.8 kg"));
        assert_eq!(presented.value_of("percent_lost"), Some("9.2%"));

        let imperial = Settings::default().with_unit_system(UnitSystem::Imperial);
        let presented = evaluate_defaults::<Glp1WeightLossCalculator>(&imperial).unwrap().presented;
        assert_eq!(presented.headline, "20.3 lb");
    }
}
