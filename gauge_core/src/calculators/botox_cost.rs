//! # Botox Cost
//!
//! Cost-range blending: the unit ranges of every treated area are summed,
//! priced at the national per-unit band, and scaled by regional and provider
//! indices. The blended figure is the midpoint of the resulting range.

use serde::{Deserialize, Serialize};

use crate::calculators::common::Region;
use crate::engine::present::{currency, currency_range, range};
use crate::engine::{Calculator, FieldSpec, PresentedResult, Range};
use crate::formulas::Formula;
use crate::settings::Settings;

choice_enum! {
    pub enum TreatmentArea {
        Forehead => "forehead", "Forehead lines";
        FrownLines => "frown_lines", "Frown lines (glabella)";
        CrowsFeet => "crows_feet", "Crow's feet";
        BunnyLines => "bunny_lines", "Bunny lines";
        LipFlip => "lip_flip", "Lip flip";
        Chin => "chin", "Chin dimpling";
        Masseter => "masseter", "Masseter (jaw slimming)";
        NeckBands => "neck_bands", "Neck bands";
        Underarms => "underarms", "Underarm sweating";
    }
}

impl TreatmentArea {
    /// Typical units per session
    pub fn units(self) -> Range {
        match self {
            TreatmentArea::Forehead => Range::new(10.0, 20.0),
            TreatmentArea::FrownLines => Range::new(20.0, 25.0),
            TreatmentArea::CrowsFeet => Range::new(12.0, 24.0),
            TreatmentArea::BunnyLines => Range::new(4.0, 8.0),
            TreatmentArea::LipFlip => Range::new(4.0, 6.0),
            TreatmentArea::Chin => Range::new(4.0, 8.0),
            TreatmentArea::Masseter => Range::new(40.0, 60.0),
            TreatmentArea::NeckBands => Range::new(25.0, 50.0),
            TreatmentArea::Underarms => Range::new(50.0, 100.0),
        }
    }
}

choice_enum! {
    pub enum Provider {
        NurseInjector => "nurse_injector", "Nurse injector";
        Dermatologist => "dermatologist", "Dermatologist";
        PlasticSurgeon => "plastic_surgeon", "Plastic surgeon";
    }
}

impl Provider {
    pub fn price_index(self) -> f64 {
        match self {
            Provider::NurseInjector => 0.9,
            Provider::Dermatologist => 1.0,
            Provider::PlasticSurgeon => 1.15,
        }
    }
}

/// National price band per unit, USD
pub const UNIT_PRICE: Range = Range::new(10.0, 18.0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotoxCostInput {
    pub areas: Vec<TreatmentArea>,
    pub region: Region,
    pub provider: Provider,
    pub sessions_per_year: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotoxCostOutput {
    pub units: Range,
    pub price_per_unit: Range,
    pub session_cost: Range,
    pub annual_cost: Range,
    pub blended_session_cost: f64,
    pub blended_annual_cost: f64,
}

pub struct BotoxCostCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::choice_list("areas", "Treatment areas", TreatmentArea::TAGS, 1),
    FieldSpec::choice("region", "Region", Region::TAGS),
    FieldSpec::choice("provider", "Provider", Provider::TAGS),
    FieldSpec::integer("sessions_per_year", "Sessions per year", 1, 6),
];

impl Calculator for BotoxCostCalculator {
    const ID: &'static str = "botox_cost";
    const TITLE: &'static str = "Botox Cost Calculator";

    type Input = BotoxCostInput;
    type Output = BotoxCostOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> BotoxCostInput {
        BotoxCostInput {
            areas: vec![TreatmentArea::Forehead, TreatmentArea::FrownLines],
            region: Region::National,
            provider: Provider::Dermatologist,
            sessions_per_year: 3,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::CostRangeBlend]
    }

    fn estimate(input: &BotoxCostInput) -> BotoxCostOutput {
        let units = input
            .areas
            .iter()
            .fold(Range::default(), |total, area| total.plus(area.units()));
        let price_per_unit = UNIT_PRICE.scale(input.region.cost_index() * input.provider.price_index());
        let session_cost = units.times(price_per_unit);
        let annual_cost = session_cost.scale(f64::from(input.sessions_per_year));

        BotoxCostOutput {
            units,
            price_per_unit,
            session_cost,
            annual_cost,
            blended_session_cost: session_cost.midpoint(),
            blended_annual_cost: annual_cost.midpoint(),
        }
    }

    fn present(output: &BotoxCostOutput, settings: &Settings) -> PresentedResult {
        let symbol = settings.currency_symbol.as_str();
        let money_range = |r: Range| currency_range(r.low, r.high, symbol);

        PresentedResult::new(Self::ID, Self::TITLE, currency(output.blended_session_cost, symbol))
            .line("units", "Units per session", range(output.units.low, output.units.high, 0, "units"))
            .line(
                "price_per_unit",
                "Price per unit",
                format!(
                    "{}{:.2} - {}{:.2}",
                    symbol, output.price_per_unit.low, symbol, output.price_per_unit.high
                ),
            )
            .line("session_cost", "Per session", money_range(output.session_cost))
            .line("annual_cost", "Per year", money_range(output.annual_cost))
            .line("blended_annual_cost", "Typical yearly spend", currency(output.blended_annual_cost, symbol))
            .note("Effects last three to four months; most patients book three or four sessions a year")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{evaluate, evaluate_defaults, InputSet};
    use crate::errors::FieldErrorKind;
    use approx::assert_relative_eq;

    fn input(areas: Vec<TreatmentArea>, region: Region, provider: Provider, sessions_per_year: u32) -> BotoxCostInput {
        BotoxCostInput {
            areas,
            region,
            provider,
            sessions_per_year,
        }
    }

    #[test]
    fn test_single_area_national() {
        let output = BotoxCostCalculator::estimate(&input(
            vec![TreatmentArea::Forehead],
            Region::National,
            Provider::Dermatologist,
            3,
        ));
        assert_eq!(output.units, Range::new(10.0, 20.0));
        assert_relative_eq!(output.session_cost.low, 100.0);
        assert_relative_eq!(output.session_cost.high, 360.0);
        assert_relative_eq!(output.annual_cost.high, 1080.0);
        assert_relative_eq!(output.blended_session_cost, 230.0);
    }

    #[test]
    fn test_region_and_provider_indices() {
        let output = BotoxCostCalculator::estimate(&input(
            vec![TreatmentArea::FrownLines],
            Region::Northeast,
            Provider::PlasticSurgeon,
            1,
        ));
        let index = 1.15 * 1.15;
        assert_relative_eq!(output.session_cost.low, 20.0 * 10.0 * index, epsilon = 1e-9);
        assert_relative_eq!(output.session_cost.high, 25.0 * 18.0 * index, epsilon = 1e-9);
    }

    #[test]
    fn test_units_add_across_areas() {
        let output = BotoxCostCalculator::estimate(&BotoxCostCalculator::defaults());
        assert_eq!(output.units, Range::new(30.0, 45.0));
    }

    #[test]
    fn test_unit_ranges_are_ordered() {
        for area in TreatmentArea::ALL {
            let units = area.units();
            assert!(units.low > 0.0 && units.low <= units.high, "{:?}", area);
        }
    }

    #[test]
    fn test_at_least_one_area_required() {
        let set = InputSet::from_typed(&BotoxCostCalculator::defaults())
            .unwrap()
            .with("areas", Vec::<String>::new());
        let err = evaluate::<BotoxCostCalculator>(&set, &Settings::default()).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "areas");
        assert_eq!(err.field_errors()[0].kind, FieldErrorKind::Required);
    }

    #[test]
    fn test_presented() {
        let presented = evaluate_defaults::<BotoxCostCalculator>(&Settings::default())
            .unwrap()
            .presented;
        // 30-45 units at $10-$18
        assert_eq!(presented.value_of("session_cost"), Some("$300 - $810"));
        assert_eq!(presented.headline, "$555");
        assert_eq!(presented.value_of("price_per_unit"), Some("$10.00 - $18.00"));
    }
}
