//! # Retirement Savings
//!
//! Future value of current savings plus level monthly contributions,
//! compounded monthly until retirement, then expressed in today's money and
//! as a sustainable first-year income.

use serde::{Deserialize, Serialize};

use crate::engine::present::{currency, percent};
use crate::engine::{Calculator, FieldSpec, PresentedResult};
use crate::errors::FieldError;
use crate::formulas::Formula;
use crate::settings::Settings;

pub const DEFAULT_WITHDRAWAL_RATE_PCT: f64 = 4.0;

fn default_withdrawal_rate() -> f64 {
    DEFAULT_WITHDRAWAL_RATE_PCT
}

/// Balance after `months` of compounding at `monthly_rate`, with
/// `contribution` deposited at the end of every month.
pub fn future_value(present_value: f64, contribution: f64, monthly_rate: f64, months: u32) -> f64 {
    let n = f64::from(months);
    if monthly_rate == 0.0 {
        return present_value + contribution * n;
    }
    let growth = (1.0 + monthly_rate).powf(n);
    present_value * growth + contribution * (growth - 1.0) / monthly_rate
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return_pct: f64,
    pub inflation_pct: f64,
    #[serde(default = "default_withdrawal_rate")]
    pub withdrawal_rate_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetirementOutput {
    pub years: u32,
    pub months: u32,
    pub future_value: f64,
    /// Current savings plus every contribution
    pub total_contributions: f64,
    pub growth: f64,
    /// Future value in today's money
    pub real_value: f64,
    pub annual_income: f64,
    pub monthly_income: f64,
    pub real_annual_income: f64,
}

pub struct RetirementCalculator;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::integer("current_age", "Current age", 18, 80).with_unit("years"),
    FieldSpec::integer("retirement_age", "Retirement age", 30, 100).with_unit("years"),
    FieldSpec::number("current_savings", "Current savings", 0.0, 100_000_000.0),
    FieldSpec::number("monthly_contribution", "Monthly contribution", 0.0, 1_000_000.0),
    FieldSpec::number("annual_return_pct", "Expected annual return", 0.0, 20.0).with_unit("%"),
    FieldSpec::number("inflation_pct", "Inflation", 0.0, 15.0).with_unit("%"),
    FieldSpec::number("withdrawal_rate_pct", "Withdrawal rate", 1.0, 10.0)
        .with_unit("%")
        .optional(),
];

impl Calculator for RetirementCalculator {
    const ID: &'static str = "retirement";
    const TITLE: &'static str = "Retirement Savings Calculator";

    type Input = RetirementInput;
    type Output = RetirementOutput;

    fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    fn defaults() -> RetirementInput {
        RetirementInput {
            current_age: 30,
            retirement_age: 65,
            current_savings: 25_000.0,
            monthly_contribution: 500.0,
            annual_return_pct: 7.0,
            inflation_pct: 2.5,
            withdrawal_rate_pct: DEFAULT_WITHDRAWAL_RATE_PCT,
        }
    }

    fn formulas() -> &'static [Formula] {
        &[Formula::FutureValueMonthly, Formula::InflationAdjustment, Formula::SafeWithdrawal]
    }

    fn cross_check(input: &RetirementInput) -> Vec<FieldError> {
        if input.retirement_age > input.current_age {
            Vec::new()
        } else {
            vec![FieldError::constraint(
                "retirement_age",
                "Retirement age must be greater than current age",
            )]
        }
    }

    fn estimate(input: &RetirementInput) -> RetirementOutput {
        let years = input.retirement_age.saturating_sub(input.current_age);
        let months = years * 12;
        let monthly_rate = input.annual_return_pct / 100.0 / 12.0;

        let future_value = future_value(input.current_savings, input.monthly_contribution, monthly_rate, months);
        let total_contributions = input.current_savings + input.monthly_contribution * f64::from(months);
        let deflator = (1.0 + input.inflation_pct / 100.0).powf(f64::from(years));
        let real_value = future_value / deflator;
        let rate = input.withdrawal_rate_pct / 100.0;

        RetirementOutput {
            years,
            months,
            future_value,
            total_contributions,
            growth: future_value - total_contributions,
            real_value,
            annual_income: future_value * rate,
            monthly_income: future_value * rate / 12.0,
            real_annual_income: real_value * rate,
        }
    }

    fn present(output: &RetirementOutput, settings: &Settings) -> PresentedResult {
        let money = |value: f64| currency(value, &settings.currency_symbol);
        let growth_share = if output.future_value > 0.0 {
            output.growth / output.future_value * 100.0
        } else {
            0.0
        };

        PresentedResult::new(Self::ID, Self::TITLE, money(output.future_value))
            .line("future_value", "Savings at retirement", money(output.future_value))
            .line("total_contributions", "Total contributed", money(output.total_contributions))
            .line("growth", "Investment growth", money(output.growth))
            .line("growth_share", "Share from growth", percent(growth_share, 1))
            .line("real_value", "In today's money", money(output.real_value))
            .line("annual_income", "Annual income", money(output.annual_income))
            .line("monthly_income", "Monthly income", money(output.monthly_income))
            .line("real_annual_income", "Annual income in today's money", money(output.real_annual_income))
            .note(format!("{} years of monthly compounding", output.years))
            .note("Returns are assumed constant; real markets are not")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{calculate, evaluate_defaults};
    use crate::errors::FieldErrorKind;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_zero_return_is_simple_sum() {
        assert_relative_eq!(future_value(10_000.0, 500.0, 0.0, 120), 70_000.0);
    }

    #[test]
    fn test_annuity_one_year() {
        // 12% a year is 1% a month
        assert_relative_eq!(future_value(0.0, 100.0, 0.01, 12), 1268.250_301_3, epsilon = 1e-6);
        assert_relative_eq!(future_value(1000.0, 0.0, 0.01, 12), 1126.825_030_1, epsilon = 1e-6);
    }

    #[test]
    fn test_real_value_and_income() {
        let input = RetirementInput {
            current_age: 40,
            retirement_age: 50,
            current_savings: 100_000.0,
            monthly_contribution: 0.0,
            annual_return_pct: 0.0,
            inflation_pct: 2.0,
            withdrawal_rate_pct: 4.0,
        };
        let output = calculate::<RetirementCalculator>(&input).unwrap();
        assert_eq!(output.months, 120);
        assert_relative_eq!(output.future_value, 100_000.0);
        assert_relative_eq!(output.real_value, 100_000.0 / 1.02f64.powi(10), epsilon = 1e-6);
        assert_relative_eq!(output.annual_income, 4_000.0, epsilon = 1e-9);
        assert_relative_eq!(output.growth, 0.0);
    }

    #[test]
    fn test_retirement_must_follow_current_age() {
        let mut input = RetirementCalculator::defaults();
        input.current_age = 65;
        input.retirement_age = 65;
        let err = calculate::<RetirementCalculator>(&input).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "retirement_age");
        assert_eq!(err.field_errors()[0].kind, FieldErrorKind::Constraint);
    }

    #[test]
    fn test_presented_uses_currency_symbol() {
        let settings = Settings {
            currency_symbol: "€".to_string(),
            ..Settings::default()
        };
        let presented = evaluate_defaults::<RetirementCalculator>(&settings).unwrap().presented;
        assert!(presented.headline.starts_with('€'));
        assert_eq!(presented.value_of("total_contributions"), Some("€235,000"));
    }

    proptest! {
        #[test]
        fn balance_never_below_contributions(
            savings in 0.0f64..1.0e6,
            contribution in 0.0f64..5.0e3,
            return_pct in 0.0f64..=20.0,
            years in 1u32..=50,
        ) {
            let input = RetirementInput {
                current_age: 30,
                retirement_age: 30 + years,
                current_savings: savings,
                monthly_contribution: contribution,
                annual_return_pct: return_pct,
                inflation_pct: 2.0,
                withdrawal_rate_pct: 4.0,
            };
            let output = RetirementCalculator::estimate(&input);
            prop_assert!(output.future_value >= output.total_contributions * (1.0 - 1e-12));
            prop_assert!(output.real_value <= output.future_value);
        }
    }
}
