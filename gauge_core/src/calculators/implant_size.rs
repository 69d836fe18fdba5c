//! # Breast Implant Size
//!
//! Three independent sizing rules for implant volume (cc): one from the
//! measured breast base width, one from the requested cup increase and one
//! from body frame. The result reports each plus their min / max / mean.

use serde::{Deserialize, Serialize};

use crate::calculators::bmi::body_mass_index;
use crate::engine::present::fixed;
use crate::engine::{Calculator, FieldSpec, NamedEstimate, PresentedResult, Spread};
use crate::errors::FieldError;
use crate::formulas::Formula;
use crate::settings::Settings;

choice_enum! {
    /// US cup sizes, smallest first
    pub enum CupSize {
        Aa => "aa", "AA";
        A => "a", "A";
        B => "b", "B";
        C => "c", "C";
        D => "d", "D";
        Dd => "dd", "DD";
        Ddd => "ddd", "DDD";
    }
}

const CURRENT_CUPS: &[&str] = &["aa", "a", "b", "c", "d", "dd"];
const DESIRED_CUPS: &[&str] = &["a", "b", "c", "d", "dd", "ddd"];

/// Implant volume per cup size step, cc
pub const CC_PER_CUP: f64 = 175.0;

/// Implants are sold in roughly 25 cc steps
const DISPLAY_STEP_CC: f64 = 25.0;

pub fn base_width_volume(base_width_cm: f64) -> f64 {
    50.0 * base_width_cm - 300.0
}

pub fn cup_step_volume(current: CupSize, desired: CupSize) -> f64 {
    let steps = desired.ordinal() as f64 - current.ordinal() as f64;
    CC_PER_CUP * steps
}

pub fn body_frame_volume(height_cm: f64, bmi: f64) -> f64 {
    4.0 * (height_cm - 100.0) + 8.0 * (bmi - 21.0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplantSizeInput {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub base_width_cm: f64,
    pub current_cup: CupSize,
    pub desired_cup: CupSize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplantSizeOutput {
    pub bmi: f64,
    /// Base width, cup step and body frame, in that order
    pub estimates: Vec<NamedEstimate>,
    pub spread: Spread,
}

pub struct ImplantSizeCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::number("height_cm", "Height", 140.0, 200.0).with_unit("cm"),
    FieldSpec::number("weight_kg", "Weight", 35.0, 150.0).with_unit("kg"),
    FieldSpec::number("base_width_cm", "Breast base width", 9.0, 17.0).with_unit("cm"),
    FieldSpec::choice("current_cup", "Current cup size", CURRENT_CUPS),
    FieldSpec::choice("desired_cup", "Desired cup size", DESIRED_CUPS),
];

impl Calculator for ImplantSizeCalculator {
    const ID: &'static str = "implant_size";
    const TITLE: &'static str = "Breast Implant Size Calculator";

    type Input = ImplantSizeInput;
    type Output = ImplantSizeOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> ImplantSizeInput {
        ImplantSizeInput {
            height_cm: 165.0,
            weight_kg: 60.0,
            base_width_cm: 12.0,
            current_cup: CupSize::A,
            desired_cup: CupSize::C,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::ImplantBaseWidth, Formula::ImplantCupStep, Formula::ImplantBodyFrame]
    }

    fn cross_check(input: &ImplantSizeInput) -> Vec<FieldError> {
        if input.desired_cup > input.current_cup {
            Vec::new()
        } else {
            vec![FieldError::constraint(
                "desired_cup",
                "Desired cup size must be larger than current cup size",
            )]
        }
    }

    fn estimate(input: &ImplantSizeInput) -> ImplantSizeOutput {
        let bmi = body_mass_index(input.height_cm, input.weight_kg);
        let estimates = vec![
            NamedEstimate::new("Base width", base_width_volume(input.base_width_cm)),
            NamedEstimate::new("Cup increase", cup_step_volume(input.current_cup, input.desired_cup)),
            NamedEstimate::new("Body frame", body_frame_volume(input.height_cm, bmi)),
        ];
        let spread = Spread::of(&estimates).unwrap_or_default();

        ImplantSizeOutput { bmi, estimates, spread }
    }

    fn present(output: &ImplantSizeOutput, _settings: &Settings) -> PresentedResult {
        let cc = |value: f64| format!("{} cc", fixed(value, 0));
        let suggested = (output.spread.mean / DISPLAY_STEP_CC).round() * DISPLAY_STEP_CC;

        let mut presented = PresentedResult::new(Self::ID, Self::TITLE, cc(suggested));
        for (key, estimate) in ["base_width", "cup_step", "body_frame"].iter().zip(&output.estimates) {
            presented = presented.line(*key, estimate.name.clone(), cc(estimate.value));
        }

        presented
            .line("range", "Range", format!("{} - {}", cc(output.spread.min), cc(output.spread.max)))
            .line("average", "Average", cc(output.spread.mean))
            .note("Final sizing depends on tissue assessment during consultation")
    }
}
