//! # Creatine Water Intake
//!
//! Daily water from body weight (35 ml/kg), scaled by creatine phase,
//! activity and climate.

use serde::{Deserialize, Serialize};

use crate::engine::present::{fixed, volume};
use crate::engine::{Calculator, FieldSpec, PresentedResult};
use crate::formulas::Formula;
use crate::settings::Settings;
use crate::units::{FluidOunces, Liters, Milliliters};

/// Baseline water need, ml per kg body weight
pub const ML_PER_KG: f64 = 35.0;
/// Glass size used for the glasses count, ml
pub const GLASS_ML: f64 = 250.0;

choice_enum! {
    pub enum Phase {
        Maintenance => "maintenance", "Maintenance (3-5 g/day)";
        Loading => "loading", "Loading (20 g/day)";
    }
}

impl Phase {
    pub fn factor(self) -> f64 {
        match self {
            Phase::Maintenance => 1.1,
            Phase::Loading => 1.25,
        }
    }
}

choice_enum! {
    pub enum Activity {
        Sedentary => "sedentary", "Sedentary";
        Light => "light", "Light";
        Moderate => "moderate", "Moderate";
        Intense => "intense", "Intense";
    }
}

impl Activity {
    pub fn factor(self) -> f64 {
        match self {
            Activity::Sedentary => 1.0,
            Activity::Light => 1.1,
            Activity::Moderate => 1.2,
            Activity::Intense => 1.35,
        }
    }
}

choice_enum! {
    pub enum Climate {
        Cool => "cool", "Cool";
        Temperate => "temperate", "Temperate";
        Hot => "hot", "Hot";
        HotHumid => "hot_humid", "Hot and humid";
    }
}

impl Climate {
    pub fn factor(self) -> f64 {
        match self {
            Climate::Cool => 0.95,
            Climate::Temperate => 1.0,
            Climate::Hot => 1.15,
            Climate::HotHumid => 1.25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatineWaterInput {
    pub weight_kg: f64,
    pub phase: Phase,
    pub activity: Activity,
    pub climate: Climate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatineWaterOutput {
    pub base: Milliliters,
    /// Product of phase, activity and climate factors
    pub factor: f64,
    pub total: Milliliters,
    pub liters: Liters,
    pub fluid_ounces: FluidOunces,
    /// Unrounded count of 250 ml glasses
    pub glasses: f64,
}

pub struct CreatineWaterCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::number("weight_kg", "Body weight", 30.0, 250.0).with_unit("kg"),
    FieldSpec::choice("phase", "Creatine phase", Phase::TAGS),
    FieldSpec::choice("activity", "Activity level", Activity::TAGS),
    FieldSpec::choice("climate", "Climate", Climate::TAGS),
];

impl Calculator for CreatineWaterCalculator {
    const ID: &'static str = "creatine_water";
    const TITLE: &'static str = "Creatine Water Intake Calculator";

    type Input = CreatineWaterInput;
    type Output = CreatineWaterOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> CreatineWaterInput {
        CreatineWaterInput {
            weight_kg: 80.0,
            phase: Phase::Maintenance,
            activity: Activity::Moderate,
            climate: Climate::Temperate,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::CreatineHydration]
    }

    fn estimate(input: &CreatineWaterInput) -> CreatineWaterOutput {
        let base = Milliliters(input.weight_kg * ML_PER_KG);
        let factor = input.phase.factor() * input.activity.factor() * input.climate.factor();
        let total = base * factor;

        CreatineWaterOutput {
            base,
            factor,
            total,
            liters: total.into(),
            fluid_ounces: total.into(),
            glasses: total.0 / GLASS_ML,
        }
    }

    fn present(output: &CreatineWaterOutput, settings: &Settings) -> PresentedResult {
        PresentedResult::new(Self::ID, Self::TITLE, volume(output.total.0, settings))
            .line("total", "Daily water", volume(output.total.0, settings))
            .line("base", "Without creatine or activity", volume(output.base.0, settings))
            .line("glasses", "Glasses (250 ml)", fixed(output.glasses.ceil(), 0))
            .line("fluid_ounces", "US fluid ounces", format!("{} fl oz", fixed(output.fluid_ounces.0, 0)))
            .note("Spread intake across the day and drink more during training")
    }
}
