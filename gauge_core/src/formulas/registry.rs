//! # Formula Registry
//!
//! Central registry of every closed-form formula the calculators apply.
//! Each formula carries its plain-text expression, variables, reference and
//! the function that implements it, so the generated reference document can
//! be checked against the code line by line.
//!
//! ## Usage
//!
//! ```rust
//! use gauge_core::formulas::{Formula, FormulaCategory};
//!
//! let meta = Formula::MifflinStJeor.metadata();
//! assert_eq!(meta.category, FormulaCategory::EnergyExpenditure);
//! println!("{}: {}", meta.name, meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Where a formula or its constants come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// Peer-reviewed publication
    Publication {
        authors: &'static str,
        year: u16,
        journal: &'static str,
    },
    /// Public-health or professional guideline
    Guideline {
        issuer: &'static str,
        document: &'static str,
    },
    /// Constants maintained in this crate's formula tables
    FormulaTable { module: &'static str },
    /// Plain arithmetic (no external source needed)
    Mathematics,
}

impl Reference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            Reference::Publication { authors, year, journal } => {
                format!("{} ({}), {}", authors, year, journal)
            }
            Reference::Guideline { issuer, document } => format!("{}: {}", issuer, document),
            Reference::FormulaTable { module } => format!("Formula table in {}", module),
            Reference::Mathematics => "Fundamental Mathematics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            Reference::Publication { .. } => "Publication",
            Reference::Guideline { .. } => "Guideline",
            Reference::FormulaTable { .. } => "Formula table",
            Reference::Mathematics => "Mathematics",
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Categories for grouping formulas in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaCategory {
    BodyComposition,
    BodyWeight,
    EnergyExpenditure,
    Growth,
    Reproductive,
    Longevity,
    Nutrition,
    Hydration,
    Pharmacology,
    Aesthetic,
    Cost,
    Finance,
}

impl FormulaCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::BodyComposition => "Body Composition",
            FormulaCategory::BodyWeight => "Body Weight",
            FormulaCategory::EnergyExpenditure => "Energy Expenditure",
            FormulaCategory::Growth => "Growth",
            FormulaCategory::Reproductive => "Reproductive Health",
            FormulaCategory::Longevity => "Longevity",
            FormulaCategory::Nutrition => "Nutrition",
            FormulaCategory::Hydration => "Hydration",
            FormulaCategory::Pharmacology => "Pharmacology",
            FormulaCategory::Aesthetic => "Aesthetic Sizing",
            FormulaCategory::Cost => "Cost Estimates",
            FormulaCategory::Finance => "Finance",
        }
    }

    /// Sort order for the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            FormulaCategory::BodyComposition => 1,
            FormulaCategory::BodyWeight => 2,
            FormulaCategory::EnergyExpenditure => 3,
            FormulaCategory::Growth => 4,
            FormulaCategory::Reproductive => 5,
            FormulaCategory::Longevity => 6,
            FormulaCategory::Nutrition => 7,
            FormulaCategory::Hydration => 8,
            FormulaCategory::Pharmacology => 9,
            FormulaCategory::Aesthetic => 10,
            FormulaCategory::Cost => 11,
            FormulaCategory::Finance => 12,
        }
    }
}

// ============================================================================
// Variables and metadata
// ============================================================================

/// Definition of a variable used in a formula.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct FormulaMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the formula estimates
    pub description: &'static str,
    /// Plain-text expression
    pub formula_plain: &'static str,
    pub reference: Reference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: FormulaCategory,
    /// Source module where the formula lives
    pub source_module: &'static str,
    /// Function implementing it
    pub source_function: &'static str,
}

// ============================================================================
// Formula Enum
// ============================================================================

/// Every formula applied by a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Formula {
    // Body composition
    BodyMassIndex,
    BmiPrime,
    HealthyWeightRange,
    // Energy
    MifflinStJeor,
    HarrisBenedictRevised,
    ActivityMultiplier,
    // Body weight
    IbwRobinson,
    IbwMiller,
    IbwDevine,
    IbwHamwi,
    // Growth
    MidParentalHeight,
    // Reproductive
    OvulationDay,
    NaegeleDueDate,
    // Longevity
    LifeExpectancyAdjustment,
    // Nutrition
    VitaminDRequirement,
    // Hydration
    CreatineHydration,
    // Pharmacology
    Glp1WeightLoss,
    // Aesthetic sizing
    ImplantBaseWidth,
    ImplantCupStep,
    ImplantBodyFrame,
    // Cost
    CostRangeBlend,
    DentalImplantTotal,
    // Finance
    FutureValueMonthly,
    InflationAdjustment,
    SafeWithdrawal,
}

impl Formula {
    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            Formula::BodyMassIndex => FormulaMetadata {
                name: "Body Mass Index",
                description: "Weight relative to the square of height",
                formula_plain: "BMI = m / h^2",
                reference: Reference::Guideline {
                    issuer: "WHO",
                    document: "Obesity: preventing and managing the global epidemic (TRS 894)",
                },
                variables: vec![
                    Variable::new("m", "Body mass", "kg"),
                    Variable::new("h", "Height", "m"),
                ],
                assumptions: vec!["Adult (18+) classification bands"],
                category: FormulaCategory::BodyComposition,
                source_module: "calculators/bmi.rs",
                source_function: "body_mass_index",
            },

            Formula::BmiPrime => FormulaMetadata {
                name: "BMI Prime",
                description: "BMI as a fraction of the upper limit of the normal band",
                formula_plain: "BMI' = BMI / 25",
                reference: Reference::Mathematics,
                variables: vec![Variable::new("BMI", "Body mass index", "kg/m^2")],
                assumptions: vec![],
                category: FormulaCategory::BodyComposition,
                source_module: "calculators/bmi.rs",
                source_function: "BmiCalculator::estimate",
            },

            Formula::HealthyWeightRange => FormulaMetadata {
                name: "Healthy Weight Range",
                description: "Weights that put BMI inside the normal band for a given height",
                formula_plain: "W_low = 18.5 * h^2, W_high = 24.9 * h^2",
                reference: Reference::Guideline {
                    issuer: "WHO",
                    document: "Obesity: preventing and managing the global epidemic (TRS 894)",
                },
                variables: vec![Variable::new("h", "Height", "m")],
                assumptions: vec!["Adult classification bands"],
                category: FormulaCategory::BodyComposition,
                source_module: "calculators/bmi.rs",
                source_function: "healthy_weight_range",
            },

            Formula::MifflinStJeor => FormulaMetadata {
                name: "Mifflin-St Jeor BMR",
                description: "Resting energy expenditure from weight, height, age and sex",
                formula_plain: "BMR = 10w + 6.25h - 5a + s (s = +5 male, -161 female)",
                reference: Reference::Publication {
                    authors: "Mifflin MD, St Jeor ST, et al.",
                    year: 1990,
                    journal: "Am J Clin Nutr 51(2)",
                },
                variables: vec![
                    Variable::new("w", "Body mass", "kg"),
                    Variable::new("h", "Height", "cm"),
                    Variable::new("a", "Age", "years"),
                    Variable::new("s", "Sex constant", "kcal/day"),
                ],
                assumptions: vec!["Healthy adults"],
                category: FormulaCategory::EnergyExpenditure,
                source_module: "calculators/bmr_tdee.rs",
                source_function: "mifflin_st_jeor",
            },

            Formula::HarrisBenedictRevised => FormulaMetadata {
                name: "Harris-Benedict BMR (revised)",
                description: "Roza-Shizgal revision of the Harris-Benedict equation",
                formula_plain: "male: 88.362 + 13.397w + 4.799h - 5.677a; female: 447.593 + 9.247w + 3.098h - 4.330a",
                reference: Reference::Publication {
                    authors: "Roza AM, Shizgal HM",
                    year: 1984,
                    journal: "Am J Clin Nutr 40(1)",
                },
                variables: vec![
                    Variable::new("w", "Body mass", "kg"),
                    Variable::new("h", "Height", "cm"),
                    Variable::new("a", "Age", "years"),
                ],
                assumptions: vec!["Healthy adults"],
                category: FormulaCategory::EnergyExpenditure,
                source_module: "calculators/bmr_tdee.rs",
                source_function: "harris_benedict",
            },

            Formula::ActivityMultiplier => FormulaMetadata {
                name: "Total Daily Energy Expenditure",
                description: "BMR scaled by a physical activity level, then by a goal factor",
                formula_plain: "TDEE = BMR * PAL, target = TDEE * k_goal",
                reference: Reference::Guideline {
                    issuer: "FAO/WHO/UNU",
                    document: "Human energy requirements (2004)",
                },
                variables: vec![
                    Variable::new("PAL", "Physical activity level", "-"),
                    Variable::new("k_goal", "Goal adjustment", "-"),
                ],
                assumptions: vec!["Activity level held constant across the week"],
                category: FormulaCategory::EnergyExpenditure,
                source_module: "calculators/bmr_tdee.rs",
                source_function: "BmrTdeeCalculator::estimate",
            },

            Formula::IbwRobinson => ibw_metadata(
                "Robinson Ideal Body Weight",
                "IBW = 52 + 1.9(in - 60) male, 49 + 1.7(in - 60) female",
                "Robinson JD, Lupkiewicz SM, et al.",
                1983,
                "Am J Hosp Pharm 40(6)",
            ),
            Formula::IbwMiller => ibw_metadata(
                "Miller Ideal Body Weight",
                "IBW = 56.2 + 1.41(in - 60) male, 53.1 + 1.36(in - 60) female",
                "Miller DR, Carlson JD, et al.",
                1983,
                "Drug Intell Clin Pharm 17",
            ),
            Formula::IbwDevine => ibw_metadata(
                "Devine Ideal Body Weight",
                "IBW = 50 + 2.3(in - 60) male, 45.5 + 2.3(in - 60) female",
                "Devine BJ",
                1974,
                "Drug Intell Clin Pharm 8",
            ),
            Formula::IbwHamwi => ibw_metadata(
                "Hamwi Ideal Body Weight",
                "IBW = 48 + 2.7(in - 60) male, 45.5 + 2.2(in - 60) female",
                "Hamwi GJ",
                1964,
                "Diabetes: Diagnosis and Treatment, Vol 1",
            ),

            Formula::MidParentalHeight => FormulaMetadata {
                name: "Mid-Parental Height",
                description: "Expected adult height of a child from the parents' heights",
                formula_plain: "H = (H_f + H_m + 13) / 2 boy, (H_f + H_m - 13) / 2 girl; range H +/- 8.5",
                reference: Reference::Publication {
                    authors: "Tanner JM, Goldstein H, Whitehouse RH",
                    year: 1970,
                    journal: "Arch Dis Child 45(244)",
                },
                variables: vec![
                    Variable::new("H_f", "Father's height", "cm"),
                    Variable::new("H_m", "Mother's height", "cm"),
                ],
                assumptions: vec!["Roughly 95% of children fall within +/- 8.5 cm"],
                category: FormulaCategory::Growth,
                source_module: "calculators/child_height.rs",
                source_function: "mid_parental_height",
            },

            Formula::OvulationDay => FormulaMetadata {
                name: "Ovulation Day",
                description: "Ovulation precedes the next period by the luteal phase length",
                formula_plain: "O = LMP + (C - L) days; fertile window O - 5 .. O + 1",
                reference: Reference::Publication {
                    authors: "Wilcox AJ, Dunson D, Baird DD",
                    year: 2000,
                    journal: "BMJ 321(7271)",
                },
                variables: vec![
                    Variable::new("LMP", "First day of last menstrual period", "date"),
                    Variable::new("C", "Cycle length", "days"),
                    Variable::new("L", "Luteal phase length", "days"),
                ],
                assumptions: vec!["Regular cycles"],
                category: FormulaCategory::Reproductive,
                source_module: "calculators/fertility.rs",
                source_function: "predict_cycle",
            },

            Formula::NaegeleDueDate => FormulaMetadata {
                name: "Naegele's Rule (cycle adjusted)",
                description: "Estimated due date from the last menstrual period",
                formula_plain: "EDD = LMP + 280 + (C - 28) days",
                reference: Reference::Guideline {
                    issuer: "ACOG",
                    document: "Committee Opinion 700: Methods for Estimating the Due Date",
                },
                variables: vec![
                    Variable::new("LMP", "First day of last menstrual period", "date"),
                    Variable::new("C", "Cycle length", "days"),
                ],
                assumptions: vec!["Conception in the first predicted cycle"],
                category: FormulaCategory::Reproductive,
                source_module: "calculators/fertility.rs",
                source_function: "due_date",
            },

            Formula::LifeExpectancyAdjustment => FormulaMetadata {
                name: "Adjusted Life Expectancy",
                description: "Demographic baseline plus banded lifestyle and health deltas",
                formula_plain: "E = B(sex, race) + sum(delta_i)",
                reference: Reference::Guideline {
                    issuer: "CDC/NCHS",
                    document: "United States Life Tables (baselines)",
                },
                variables: vec![
                    Variable::new("B", "Baseline life expectancy", "years"),
                    Variable::new("delta_i", "Per-factor adjustment", "years"),
                ],
                assumptions: vec!["Factors are additive and independent", "No interpolation inside bands"],
                category: FormulaCategory::Longevity,
                source_module: "calculators/life_expectancy.rs",
                source_function: "LifeExpectancyCalculator::estimate",
            },

            Formula::VitaminDRequirement => FormulaMetadata {
                name: "Vitamin D Daily Intake",
                description: "Age RDA scaled for skin type, sun exposure and BMI, capped at the upper limit",
                formula_plain: "IU = min(RDA(age) * k_skin * k_sun * k_bmi, UL(age)); mcg = IU / 40",
                reference: Reference::Guideline {
                    issuer: "NIH Office of Dietary Supplements",
                    document: "Vitamin D Fact Sheet for Health Professionals",
                },
                variables: vec![
                    Variable::new("RDA", "Recommended dietary allowance", "IU/day"),
                    Variable::new("UL", "Tolerable upper intake level", "IU/day"),
                ],
                assumptions: vec!["Adjustment factors are multiplicative"],
                category: FormulaCategory::Nutrition,
                source_module: "calculators/vitamin_d.rs",
                source_function: "VitaminDCalculator::estimate",
            },

            Formula::CreatineHydration => FormulaMetadata {
                name: "Creatine Water Intake",
                description: "Daily water from body weight, scaled for creatine phase, activity and climate",
                formula_plain: "V = 35 ml * w * k_phase * k_activity * k_climate",
                reference: Reference::Guideline {
                    issuer: "EFSA",
                    document: "Scientific Opinion on Dietary Reference Values for water (2010)",
                },
                variables: vec![
                    Variable::new("w", "Body mass", "kg"),
                    Variable::new("V", "Daily water", "ml"),
                ],
                assumptions: vec!["Factors are multiplicative"],
                category: FormulaCategory::Hydration,
                source_module: "calculators/creatine_water.rs",
                source_function: "CreatineWaterCalculator::estimate",
            },

            Formula::Glp1WeightLoss => FormulaMetadata {
                name: "GLP-1 Projected Weight Loss",
                description: "Expected loss by dose, scaled for duration, diet and activity",
                formula_plain: "loss = w * f_dose * k_duration * k_diet * k_activity",
                reference: Reference::Publication {
                    authors: "Wilding JPH, Batterham RL, et al. (STEP 1)",
                    year: 2021,
                    journal: "N Engl J Med 384(11)",
                },
                variables: vec![
                    Variable::new("w", "Starting body mass", "kg"),
                    Variable::new("f_dose", "Mean fractional loss at 68 weeks", "-"),
                ],
                assumptions: vec!["Population averages; individual response varies widely"],
                category: FormulaCategory::Pharmacology,
                source_module: "calculators/glp1_weight_loss.rs",
                source_function: "Glp1WeightLossCalculator::estimate",
            },

            Formula::ImplantBaseWidth => FormulaMetadata {
                name: "Implant Volume from Base Width",
                description: "Implant volume that fits the measured breast base width",
                formula_plain: "V = 50 * bw - 300",
                reference: Reference::FormulaTable { module: "calculators/implant_size.rs" },
                variables: vec![Variable::new("bw", "Breast base width", "cm")],
                assumptions: vec!["Moderate-profile round implant"],
                category: FormulaCategory::Aesthetic,
                source_module: "calculators/implant_size.rs",
                source_function: "base_width_volume",
            },

            Formula::ImplantCupStep => FormulaMetadata {
                name: "Implant Volume from Cup Increase",
                description: "Volume per cup size step",
                formula_plain: "V = 175 * (cup_desired - cup_current)",
                reference: Reference::FormulaTable { module: "calculators/implant_size.rs" },
                variables: vec![Variable::new("cup", "Cup size ordinal", "-")],
                assumptions: vec!["Roughly 150-200 cc per cup size"],
                category: FormulaCategory::Aesthetic,
                source_module: "calculators/implant_size.rs",
                source_function: "cup_step_volume",
            },

            Formula::ImplantBodyFrame => FormulaMetadata {
                name: "Implant Volume from Body Frame",
                description: "Volume proportional to height and body mass index",
                formula_plain: "V = 4(h - 100) + 8(BMI - 21)",
                reference: Reference::FormulaTable { module: "calculators/implant_size.rs" },
                variables: vec![
                    Variable::new("h", "Height", "cm"),
                    Variable::new("BMI", "Body mass index", "kg/m^2"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Aesthetic,
                source_module: "calculators/implant_size.rs",
                source_function: "body_frame_volume",
            },

            Formula::CostRangeBlend => FormulaMetadata {
                name: "Blended Treatment Cost",
                description: "Low/high cost from unit ranges, unit price and regional/provider indices",
                formula_plain: "C = [sum(u_min) * p_min * k, sum(u_max) * p_max * k]; blended = (C_min + C_max) / 2",
                reference: Reference::FormulaTable { module: "calculators/botox_cost.rs" },
                variables: vec![
                    Variable::new("u", "Units per treated area", "units"),
                    Variable::new("p", "Price per unit", "USD"),
                    Variable::new("k", "Region index * provider index", "-"),
                ],
                assumptions: vec!["National price band scaled by regional cost index"],
                category: FormulaCategory::Cost,
                source_module: "calculators/botox_cost.rs",
                source_function: "BotoxCostCalculator::estimate",
            },

            Formula::DentalImplantTotal => FormulaMetadata {
                name: "Dental Implant Total Cost",
                description: "Per-implant cost plus optional procedures, less insurance coverage",
                formula_plain: "C = k * (n * (c_implant + c_graft) + c_sinus); OOP = C * (1 - p / 100)",
                reference: Reference::FormulaTable { module: "calculators/dental_implant_cost.rs" },
                variables: vec![
                    Variable::new("n", "Number of implants", "-"),
                    Variable::new("p", "Insurance coverage", "%"),
                ],
                assumptions: vec!["One abutment and crown per implant"],
                category: FormulaCategory::Cost,
                source_module: "calculators/dental_implant_cost.rs",
                source_function: "DentalImplantCostCalculator::estimate",
            },

            Formula::FutureValueMonthly => FormulaMetadata {
                name: "Future Value with Monthly Contributions",
                description: "Compound growth of a balance plus level monthly deposits",
                formula_plain: "FV = PV(1+r)^n + PMT((1+r)^n - 1)/r; r = 0: FV = PV + PMT * n",
                reference: Reference::Mathematics,
                variables: vec![
                    Variable::new("PV", "Current savings", "USD"),
                    Variable::new("PMT", "Monthly contribution", "USD"),
                    Variable::new("r", "Monthly return", "-"),
                    Variable::new("n", "Months until retirement", "-"),
                ],
                assumptions: vec!["Deposits at month end", "Constant return"],
                category: FormulaCategory::Finance,
                source_module: "calculators/retirement.rs",
                source_function: "future_value",
            },

            Formula::InflationAdjustment => FormulaMetadata {
                name: "Inflation Adjustment",
                description: "Future amount expressed in today's money",
                formula_plain: "V_real = FV / (1 + i)^t",
                reference: Reference::Mathematics,
                variables: vec![
                    Variable::new("i", "Annual inflation", "-"),
                    Variable::new("t", "Years", "years"),
                ],
                assumptions: vec!["Constant inflation"],
                category: FormulaCategory::Finance,
                source_module: "calculators/retirement.rs",
                source_function: "RetirementCalculator::estimate",
            },

            Formula::SafeWithdrawal => FormulaMetadata {
                name: "Sustainable Withdrawal",
                description: "First-year retirement income at a fixed withdrawal rate",
                formula_plain: "I = FV * w",
                reference: Reference::Publication {
                    authors: "Bengen WP",
                    year: 1994,
                    journal: "Journal of Financial Planning 7(4)",
                },
                variables: vec![Variable::new("w", "Withdrawal rate", "-")],
                assumptions: vec!["30-year horizon"],
                category: FormulaCategory::Finance,
                source_module: "calculators/retirement.rs",
                source_function: "RetirementCalculator::estimate",
            },
        }
    }

    /// Get all formulas in a given category
    pub fn in_category(category: FormulaCategory) -> Vec<Formula> {
        ALL_FORMULAS
            .iter()
            .filter(|f| f.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories, in document order
    pub fn all_categories() -> Vec<FormulaCategory> {
        use FormulaCategory::*;
        let mut cats = vec![
            BodyComposition,
            BodyWeight,
            EnergyExpenditure,
            Growth,
            Reproductive,
            Longevity,
            Nutrition,
            Hydration,
            Pharmacology,
            Aesthetic,
            Cost,
            Finance,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

fn ibw_metadata(
    name: &'static str,
    formula_plain: &'static str,
    authors: &'static str,
    year: u16,
    journal: &'static str,
) -> FormulaMetadata {
    FormulaMetadata {
        name,
        description: "Ideal body weight as a linear function of height over five feet, scaled by frame",
        formula_plain,
        reference: Reference::Publication { authors, year, journal },
        variables: vec![
            Variable::new("in", "Height", "in"),
            Variable::new("IBW", "Ideal body weight", "kg"),
        ],
        assumptions: vec!["Linear below 60 in as well", "Frame factor applied after the formula"],
        category: FormulaCategory::BodyWeight,
        source_module: "calculators/ideal_weight.rs",
        source_function: "ideal_weight_kg",
    }
}

/// All formulas in the registry (for iteration)
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::BodyMassIndex,
    Formula::BmiPrime,
    Formula::HealthyWeightRange,
    Formula::MifflinStJeor,
    Formula::HarrisBenedictRevised,
    Formula::ActivityMultiplier,
    Formula::IbwRobinson,
    Formula::IbwMiller,
    Formula::IbwDevine,
    Formula::IbwHamwi,
    Formula::MidParentalHeight,
    Formula::OvulationDay,
    Formula::NaegeleDueDate,
    Formula::LifeExpectancyAdjustment,
    Formula::VitaminDRequirement,
    Formula::CreatineHydration,
    Formula::Glp1WeightLoss,
    Formula::ImplantBaseWidth,
    Formula::ImplantCupStep,
    Formula::ImplantBodyFrame,
    Formula::CostRangeBlend,
    Formula::DentalImplantTotal,
    Formula::FutureValueMonthly,
    Formula::InflationAdjustment,
    Formula::SafeWithdrawal,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the formula reference document.
///
/// Written to `gauge_core/src/formulas/FORMULAS.md` by the `gen-formulas` binary.
pub fn generate_formulas_markdown() -> String {
    let mut output = String::with_capacity(24_000);

    output.push_str(
        r#"# Gauge Formula Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-formulas`

This document lists every formula used by the Gauge calculators, with its
variables, reference and the function that implements it.

## Conventions

| Rule | Meaning |
|------|---------|
| Bands | Half-open on the upper end (`x < bound`) unless marked `<=` |
| Rounding | Display only; no intermediate rounding |
| Units | Inputs are metric; inch-based formulas convert internally |

---

"#,
    );

    let categories = Formula::all_categories();

    for category in &categories {
        let formulas = Formula::in_category(*category);
        if formulas.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for formula in formulas {
            let meta = formula.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    let used_categories = categories
        .iter()
        .filter(|c| !Formula::in_category(**c).is_empty())
        .count();
    output.push_str(&format!(
        "## Statistics\n\n- **Total Formulas:** {}\n- **Categories:** {}\n",
        ALL_FORMULAS.len(),
        used_categories
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_formulas_have_metadata() {
        assert_eq!(ALL_FORMULAS.len(), 25);

        for formula in ALL_FORMULAS {
            let meta = formula.metadata();
            assert!(!meta.name.is_empty(), "Formula {:?} has no name", formula);
            assert!(!meta.formula_plain.is_empty(), "Formula {:?} has no expression", formula);
            assert!(!meta.variables.is_empty(), "Formula {:?} has no variables", formula);
            assert!(meta.source_module.starts_with("calculators/"), "Formula {:?} source", formula);
        }

        assert!(Formula::MifflinStJeor.metadata().formula_plain.contains("6.25h"));
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ALL_FORMULAS.iter().map(|f| f.metadata().name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_FORMULAS.len());
    }

    #[test]
    fn test_reference_citation() {
        let r = Reference::Publication {
            authors: "Devine BJ",
            year: 1974,
            journal: "Drug Intell Clin Pharm 8",
        };
        assert_eq!(r.citation(), "Devine BJ (1974), Drug Intell Clin Pharm 8");
        assert_eq!(Reference::Mathematics.short_form(), "Mathematics");
    }

    #[test]
    fn test_every_category_is_used() {
        for category in Formula::all_categories() {
            assert!(
                !Formula::in_category(category).is_empty(),
                "Category {:?} has no formulas",
                category
            );
        }
    }

    #[test]
    fn test_generate_formulas_markdown() {
        let markdown = generate_formulas_markdown();
        assert!(markdown.contains("# Gauge Formula Reference"));
        assert!(markdown.contains("## Energy Expenditure"));
        assert!(markdown.contains("### Mifflin-St Jeor BMR"));
        assert!(markdown.contains("`BMI = m / h^2`"));
        assert!(markdown.contains("**Source:** [`mid_parental_height`](calculators/child_height.rs)"));
        assert!(markdown.contains("**Total Formulas:** 25"));
        assert!(markdown.contains("**Categories:** 12"));
    }
}
