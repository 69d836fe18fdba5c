//! # Dental Implant Cost
//!
//! Per-implant price band by material, optional bone graft (per implant)
//! and sinus lift (once), scaled by region, less insurance coverage.

use serde::{Deserialize, Serialize};

use crate::calculators::common::Region;
use crate::engine::present::{currency, currency_range, percent};
use crate::engine::{Calculator, FieldSpec, PresentedResult, Range};
use crate::formulas::Formula;
use crate::settings::Settings;

choice_enum! {
    pub enum ImplantMaterial {
        Titanium => "titanium", "Titanium";
        Zirconia => "zirconia", "Zirconia";
    }
}

impl ImplantMaterial {
    /// Implant, abutment and crown, USD
    pub fn price(self) -> Range {
        match self {
            ImplantMaterial::Titanium => Range::new(3000.0, 4500.0),
            ImplantMaterial::Zirconia => Range::new(3500.0, 5500.0),
        }
    }
}

/// Per implant site, USD
pub const BONE_GRAFT: Range = Range::new(300.0, 1200.0);
/// Once per treatment, USD
pub const SINUS_LIFT: Range = Range::new(1500.0, 2500.0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DentalImplantCostInput {
    pub implant_count: u32,
    pub material: ImplantMaterial,
    pub region: Region,
    #[serde(default)]
    pub bone_graft: bool,
    #[serde(default)]
    pub sinus_lift: bool,
    #[serde(default)]
    pub insurance_coverage_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DentalImplantCostOutput {
    pub per_implant: Range,
    pub implants: Range,
    pub bone_graft: Range,
    pub sinus_lift: Range,
    pub total: Range,
    pub insurance_savings: Range,
    pub out_of_pocket: Range,
    pub blended_out_of_pocket: f64,
}

pub struct DentalImplantCostCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::integer("implant_count", "Number of implants", 1, 32),
    FieldSpec::choice("material", "Implant material", ImplantMaterial::TAGS),
    FieldSpec::choice("region", "Region", Region::TAGS),
    FieldSpec::flag("bone_graft", "Bone graft needed").optional(),
    FieldSpec::flag("sinus_lift", "Sinus lift needed").optional(),
    FieldSpec::number("insurance_coverage_pct", "Insurance coverage", 0.0, 100.0)
        .with_unit("%")
        .optional(),
];

impl Calculator for DentalImplantCostCalculator {
    const ID: &'static str = "dental_implant_cost";
    const TITLE: &'static str = "Dental Implant Cost Calculator";

    type Input = DentalImplantCostInput;
    type Output = DentalImplantCostOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> DentalImplantCostInput {
        DentalImplantCostInput {
            implant_count: 1,
            material: ImplantMaterial::Titanium,
            region: Region::National,
            bone_graft: false,
            sinus_lift: false,
            insurance_coverage_pct: 0.0,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::DentalImplantTotal, Formula::CostRangeBlend]
    }

    fn estimate(input: &DentalImplantCostInput) -> DentalImplantCostOutput {
        let index = input.region.cost_index();
        let count = f64::from(input.implant_count);

        let per_implant = input.material.price().scale(index);
        let implants = per_implant.scale(count);
        let bone_graft = if input.bone_graft {
            BONE_GRAFT.scale(index * count)
        } else {
            Range::default()
        };
        let sinus_lift = if input.sinus_lift {
            SINUS_LIFT.scale(index)
        } else {
            Range::default()
        };

        let total = implants.plus(bone_graft).plus(sinus_lift);
        let coverage = input.insurance_coverage_pct / 100.0;
        let out_of_pocket = total.scale(1.0 - coverage);

        DentalImplantCostOutput {
            per_implant,
            implants,
            bone_graft,
            sinus_lift,
            total,
            insurance_savings: total.scale(coverage),
            out_of_pocket,
            blended_out_of_pocket: out_of_pocket.midpoint(),
        }
    }

    fn present(output: &DentalImplantCostOutput, settings: &Settings) -> PresentedResult {
        let symbol = settings.currency_symbol.as_str();
        let money_range = |r: Range| currency_range(r.low, r.high, symbol);

        let mut presented = PresentedResult::new(Self::ID, Self::TITLE, currency(output.blended_out_of_pocket, symbol))
            .line("per_implant", "Per implant", money_range(output.per_implant));

        if output.bone_graft.high > 0.0 {
            presented = presented.line("bone_graft", "Bone grafting", money_range(output.bone_graft));
        }
        if output.sinus_lift.high > 0.0 {
            presented = presented.line("sinus_lift", "Sinus lift", money_range(output.sinus_lift));
        }

        let covered = if output.total.high > 0.0 {
            output.insurance_savings.high / output.total.high * 100.0
        } else {
            0.0
        };

        presented
            .line("total", "Total treatment", money_range(output.total))
            .line("insurance_savings", "Insurance pays", money_range(output.insurance_savings))
            .line("out_of_pocket", "Out of pocket", money_range(output.out_of_pocket))
            .label("coverage", percent(covered, 0))
            .note("Most dental plans cap annual benefits well below implant costs")
    }
}
